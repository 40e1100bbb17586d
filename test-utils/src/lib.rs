pub mod data;
mod mock;

pub use mock::{config_file_path, setup_basic_config, setup_basic_config_with_key, CONFIG_FILE_REL_PATH, JWT_KEY_REL_PATH};
