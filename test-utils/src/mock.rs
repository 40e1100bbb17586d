use std::path::PathBuf;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use crate::data::MOCK_JWT_KEY_STR;

pub const CONFIG_FILE_REL_PATH: &str = "etc/taskboard/taskboard.toml";
pub const JWT_KEY_REL_PATH: &str = "etc/taskboard/private/jwt_key.json";

/// A config tree with a file-backed database and a cheap hasher. The jwt
/// key path is configured but the key itself is not written.
pub fn setup_basic_config() -> TempDir {
    let root = TempDir::new().unwrap();
    let config_dir = root.child("etc/taskboard");
    config_dir.create_dir_all().unwrap();
    config_dir.child("private").create_dir_all().unwrap();
    let data_dir = root.child("var/taskboard");
    data_dir.create_dir_all().unwrap();

    let config = format!(
        r#"database_url = "sqlite://{}"
jwt_key = "{}"

[hasher_config]
argon2_m_cost = 64
argon2_t_cost = 1
argon2_p_cost = 1
"#,
        data_dir.child("taskboard.db").to_str().unwrap(),
        root.child(JWT_KEY_REL_PATH).to_str().unwrap(),
    );
    root.child(CONFIG_FILE_REL_PATH).write_str(&config).unwrap();

    root
}

pub fn setup_basic_config_with_key() -> TempDir {
    let root = setup_basic_config();
    root.child(JWT_KEY_REL_PATH).write_str(MOCK_JWT_KEY_STR).unwrap();
    root
}

pub fn config_file_path(root: &TempDir) -> PathBuf {
    root.child(CONFIG_FILE_REL_PATH).to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_written_only_on_request() {
        let bare = setup_basic_config();
        assert!(config_file_path(&bare).exists());
        assert!(!bare.child(JWT_KEY_REL_PATH).exists());

        let keyed = setup_basic_config_with_key();
        assert!(keyed.child(JWT_KEY_REL_PATH).exists());
    }
}
