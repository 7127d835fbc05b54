use clap::Parser;
use jackc::cmd::compile::{self, Opts};

fn main() {
    pretty_env_logger::init();
    let opts = Opts::parse();

    match compile::execute(&opts) {
        Ok(true) => (),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("error: {:#}", e);
            std::process::exit(2);
        }
    }
}
