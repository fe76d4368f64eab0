use super::*;
use serial_test::serial;

fn write_config(dir: &Path, contents: &str) -> PathBuf {
    let path = dir.join("sqlbatch.yml");
    std::fs::write(&path, contents).unwrap();
    path
}

const MINIMAL: &str = r#"
name: test_project
connection:
  database: testdb
  username: app
  strategy: driver
"#;

#[test]
fn test_parse_minimal_config() {
    let config: Config = serde_yaml::from_str(MINIMAL).unwrap();
    assert_eq!(config.name, "test_project");
    assert_eq!(config.delimiter, "GO");
    assert_eq!(config.connection.host, "localhost");
    assert_eq!(config.connection.port, 5432);
    assert!(config.default_migration.is_none());
    assert!(config.post_check.is_none());
    assert!(config.checks.is_empty());
}

#[test]
fn test_parse_full_config() {
    let yaml = r#"
name: apg_db
delimiter: GO
default_migration: migrations/005_AddCalculatorSettings.sql
connection:
  strategy: container
  host: localhost
  port: 1433
  database: APGDb
  username: sa
  trust_certificate: true
container:
  name: apg-sqlserver
post_check:
  query: "SELECT COUNT(*) FROM information_schema.columns WHERE table_name = 'GlobalSalarySettings' AND column_name = 'IsDeleted'"
  description: "IsDeleted column exists"
checks:
  - label: "GlobalSalarySettings structure"
    query: "SELECT COLUMN_NAME FROM INFORMATION_SCHEMA.COLUMNS WHERE TABLE_NAME = 'GlobalSalarySettings'"
  - label: "GlobalSalarySettings count"
    query: "SELECT COUNT(*) FROM GlobalSalarySettings"
"#;
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.connection.strategy, Strategy::Container);
    assert_eq!(config.connection.port, 1433);
    assert!(config.connection.trust_certificate);
    assert_eq!(config.container.name, "apg-sqlserver");
    assert_eq!(config.container.client_path, "/opt/mssql-tools18/bin/sqlcmd");
    assert_eq!(config.container.remote_path, "/tmp/sqlbatch.sql");
    assert_eq!(config.checks.len(), 2);
    let post_check = config.post_check.unwrap();
    assert_eq!(post_check.expect, 1);
    assert_eq!(post_check.description, "IsDeleted column exists");
}

#[test]
fn test_strategy_default_is_container() {
    let config: Config = serde_yaml::from_str("name: test").unwrap();
    assert_eq!(config.connection.strategy, Strategy::Container);
}

#[test]
fn test_load_from_dir() {
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), MINIMAL);
    let config = Config::load_from_dir(dir.path()).unwrap();
    assert_eq!(config.name, "test_project");
}

#[test]
fn test_load_missing_config() {
    let dir = tempfile::tempdir().unwrap();
    let err = Config::load_from_dir(dir.path()).unwrap_err();
    assert!(matches!(err, CoreError::ConfigNotFound { .. }));
}

#[test]
fn test_validate_rejects_missing_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "name: test\nconnection:\n  username: app\n  strategy: driver\n",
    );
    let err = Config::load(&path).unwrap_err();
    assert!(matches!(err, CoreError::ConfigInvalid { .. }));
}

#[test]
fn test_validate_rejects_container_strategy_without_container_name() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_config(
        dir.path(),
        "name: test\nconnection:\n  database: db\n  username: app\n",
    );
    let err = Config::load(&path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("container.name"), "got: {message}");
}

#[test]
fn test_validate_rejects_unknown_fields() {
    let result: Result<Config, _> = serde_yaml::from_str("name: test\nbogus_field: 1");
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_resolve_password_env_precedence() {
    std::env::set_var(PASSWORD_ENV_VAR, "from-env");
    let connection = ConnectionConfig {
        password: Some("from-config".to_string()),
        ..ConnectionConfig::default()
    };
    assert_eq!(connection.resolve_password().unwrap(), "from-env");
    std::env::remove_var(PASSWORD_ENV_VAR);
}

#[test]
#[serial]
fn test_resolve_password_config_fallback() {
    std::env::remove_var(PASSWORD_ENV_VAR);
    let connection = ConnectionConfig {
        password: Some("from-config".to_string()),
        ..ConnectionConfig::default()
    };
    assert_eq!(connection.resolve_password().unwrap(), "from-config");
}

#[test]
#[serial]
fn test_resolve_password_missing() {
    std::env::remove_var(PASSWORD_ENV_VAR);
    let connection = ConnectionConfig::default();
    let err = connection.resolve_password().unwrap_err();
    assert!(matches!(err, CoreError::PasswordMissing { .. }));
}
