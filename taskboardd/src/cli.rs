use std::path::PathBuf;
use clap::Parser;
use taskboard::bin_constants::DEFAULT_CONFIG_FILE;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about)]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: PathBuf,

    /// Write a new jwt signing key to the configured path and exit.
    #[arg(long, default_value_t = false)]
    pub generate_jwt_key: bool,
}
