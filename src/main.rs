fn main() {
    if let Err(err) = panconv::run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
