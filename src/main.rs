mod analysis;
mod config;
mod constants;
mod error;
mod gemini;
mod options;
mod print_help;
mod prompt;
mod render;
mod session;
mod upload;
mod utils;

use crate::config::Config;
use crate::constants::CONNECT_TIMEOUT_SECS;
use crate::print_help::print_help;
use crate::session::Session;
use crate::utils::process_command;
use colored::Colorize;
use std::{env, error::Error, process};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.iter().any(|arg| arg == "-help" || arg == "-h") {
        print_help();
        return Ok(());
    }

    let client = reqwest::Client::builder()
        .connect_timeout(std::time::Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()?;
    let session = Session::new(client, Config::from_env());

    if let Err(e) = process_command(&session, &args).await {
        log::debug!("Command failed: {:?}", e);
        eprintln!("{} {}", "Error:".red().bold(), e.user_message());
        process::exit(1);
    }
    Ok(())
}
