use std::process::ExitCode;
use clap::Parser;
use log::debug;
use taskboard_client::{ApiClient, ClientConfig, FileSessionStore, ReqwestTransport, Session};
use crate::cli::CliConfig;

mod cli;
mod commands;
mod output;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::builder()
        .filter_level(log::LevelFilter::Warn)
        .parse_default_env()
        .init();

    let cli_config = CliConfig::parse();
    match run(cli_config).await {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli_config: CliConfig) -> Result<String, String> {
    let config = ClientConfig::load(cli_config.config_file.as_deref())
        .map_err(|e| format!("could not read client configuration: {e}"))?;
    debug!("using server {}", config.base_url);

    let transport = ReqwestTransport::new(&config)
        .map_err(|e| format!("could not set up the http client: {e}"))?;
    let session = Session::new(FileSessionStore::new(config.session_file_path()));
    session.init().await
        .map_err(|e| format!("could not read the saved session: {e}"))?;

    let client = ApiClient::new(&config, transport, session, || {
        eprintln!("Your session has expired. Run `taskboard login` to log in again.");
    });
    commands::run(&client, cli_config.command).await
        .map_err(|e| e.to_string())
}
