use std::time::Duration;

use keel::config::Config;

#[test]
fn test_config_defaults() {
    let cfg = Config::default();

    assert_eq!(cfg.listen_addr, "127.0.0.1:9999");
    assert_eq!(cfg.workers, 64);
    assert_eq!(cfg.read_buffer_capacity, 4096);
    assert_eq!(cfg.read_timeout(), None);
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_config_listen_env_override() {
    // All LISTEN manipulation lives in this one test; tests run in parallel.
    unsafe {
        std::env::set_var("LISTEN", "0.0.0.0:3000");
    }
    let cfg = Config::load();
    assert_eq!(cfg.listen_addr, "0.0.0.0:3000");

    unsafe {
        std::env::remove_var("LISTEN");
    }
    let cfg = Config::load();
    assert_eq!(cfg.listen_addr, "127.0.0.1:9999");
}

#[test]
fn test_config_partial_yaml() {
    let cfg = Config::from_yaml_str("workers: 8\nread_timeout_ms: 1500\n").unwrap();

    assert_eq!(cfg.workers, 8);
    assert_eq!(cfg.read_timeout(), Some(Duration::from_millis(1500)));
    assert_eq!(cfg.read_buffer_capacity, 4096);
    assert_eq!(cfg.listen_addr, "127.0.0.1:9999");
}

#[test]
fn test_config_yaml_type_error() {
    assert!(Config::from_yaml_str("workers: many\n").is_err());
}

#[test]
fn test_config_from_file() {
    let path = std::env::temp_dir().join(format!("keel-config-{}.yaml", std::process::id()));
    std::fs::write(&path, "public_dir: /srv/site\nread_buffer_capacity: 8192\n").unwrap();

    let cfg = Config::from_file(&path).unwrap();

    assert_eq!(cfg.public_dir, std::path::PathBuf::from("/srv/site"));
    assert_eq!(cfg.read_buffer_capacity, 8192);
}

#[test]
fn test_config_missing_file() {
    let err = Config::from_file("/definitely/not/here.yaml").unwrap_err();

    assert!(err.to_string().contains("Failed to read config file"));
}

#[test]
fn test_config_validation() {
    let zero_workers = Config {
        workers: 0,
        ..Config::default()
    };
    assert!(zero_workers.validate().is_err());

    let tiny_buffer = Config {
        read_buffer_capacity: 8,
        ..Config::default()
    };
    assert!(tiny_buffer.validate().is_err());

    let zero_timeout = Config {
        read_timeout_ms: Some(0),
        ..Config::default()
    };
    assert!(zero_timeout.validate().is_err());
}
