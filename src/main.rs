use std::process;

fn main() {
    process::exit(docvet::cli::run());
}
