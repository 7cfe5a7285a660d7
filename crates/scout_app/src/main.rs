mod platform;

use clap::Parser;

fn main() {
    let args = platform::config::Args::parse();

    if let Err(err) = platform::run_app(args) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
