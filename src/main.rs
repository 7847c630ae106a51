mod cli;
mod commands;
mod config;
mod install_log;
mod output;
mod package_manager;

use clap::Parser;

fn main() {
    env_logger::init();

    let cli = cli::Cli::parse();

    let result =
        config::Config::load_or_default().and_then(|config| commands::dispatch(cli, &config));

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("错误: {:#}", err);
            std::process::exit(1);
        }
    }
}
