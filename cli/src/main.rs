use clap::Parser;
use cli::{Cli, Command};

mod cli;
mod config;
mod token_store;
mod tools;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let args = Cli::parse();

    if let Err(e) = run(args) {
        log::error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    match args.cmd {
        Command::Color(color_args) => tools::color::exec(color_args),
        Command::Direction(direction_cmd) => tools::direction::exec(direction_cmd),
        Command::Session(session_cmd) => tools::session::exec(session_cmd),
        Command::Login { token } => tools::auth::login(&token),
        Command::Logout => tools::auth::logout(),
        Command::Status => tools::auth::status(),
    }
}
