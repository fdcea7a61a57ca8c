use super::Config;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_parse_full_config() {
    let config = Config::from_toml("max_suggestions = 3\noutput = \"json\"\n").unwrap();

    assert_eq!(config.max_suggestions, 3);
    assert!(config.wants_json());
}

#[test]
fn test_missing_keys_use_defaults() {
    let config = Config::from_toml("").unwrap();

    assert_eq!(config, Config::default());
    assert_eq!(config.max_suggestions, 5);
    assert!(!config.wants_json());
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_suggestions = 8").unwrap();

    let config = Config::load_from(file.path());
    assert_eq!(config.max_suggestions, 8);
    assert_eq!(config.output, "text");
}

#[test]
fn test_invalid_or_missing_file_falls_back_to_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "max_suggestions = \"many\"").unwrap();

    assert_eq!(Config::load_from(file.path()), Config::default());
    assert_eq!(
        Config::load_from(std::path::Path::new("/definitely/not/here.toml")),
        Config::default()
    );
}
