use clap::{crate_name, Parser};
use figment::Figment;
use log::info;
use taskboard::access_token::make_jwt_key;
use taskboard::config::app_config::AppConfig;
use taskboard::config::figment::FigmentExt;
use taskboard::error_exit;
use taskboard::logging::init_logging;
use taskboardd::build_rocket;
use taskboardd::cli::CliConfig;

fn main() {
    init_logging();

    info!("{} starting up", crate_name!());

    let cli_config = CliConfig::parse();
    if !cli_config.config_file.exists() {
        error_exit!(
            "configuration file at {} does not exist",
            cli_config.config_file.display()
        )
    }
    let figment = Figment::from(rocket::Config::default())
        .setup_app_config(&cli_config.config_file);

    if cli_config.generate_jwt_key {
        let app_config: AppConfig = figment.extract()
            .unwrap_or_else(|e| error_exit!("failed to read configuration: {e}"));
        make_jwt_key(&app_config.jwt_key)
            .unwrap_or_else(|e|
                error_exit!("failed to write jwt key to {}: {e}", app_config.jwt_key.display())
            );
        info!("jwt key written to {}", app_config.jwt_key.display());
        return;
    }

    let result = rocket::execute(build_rocket(figment).launch());
    if let Err(e) = result {
        error_exit!("failed to launch rocket: {}", e);
    }
}
