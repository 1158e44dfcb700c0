fn main() {
    scopa::cli::run();
}
