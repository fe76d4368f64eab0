use super::*;

fn test_connector() -> ContainerConnector {
    let connection = ConnectionConfig {
        database: "APGDb".to_string(),
        username: "sa".to_string(),
        ..ConnectionConfig::default()
    };
    let container = ContainerConfig {
        name: "apg-sqlserver".to_string(),
        ..ContainerConfig::default()
    };
    ContainerConnector::new(&connection, &container, "secret")
}

#[test]
fn test_client_args_batch_mode() {
    let args = test_connector().client_args(false);
    assert_eq!(
        args,
        vec![
            "exec",
            "apg-sqlserver",
            "/opt/mssql-tools18/bin/sqlcmd",
            "-S",
            "localhost",
            "-U",
            "sa",
            "-P",
            "secret",
            "-d",
            "APGDb",
            "-i",
            "/tmp/sqlbatch.sql",
            "-C",
        ]
    );
}

#[test]
fn test_client_args_query_mode_adds_formatting_flags() {
    let args = test_connector().client_args(true);
    let tail: Vec<&str> = args.iter().rev().take(3).rev().map(String::as_str).collect();
    assert_eq!(tail, vec!["-s", ",", "-W"]);
}

#[test]
fn test_filter_benign_stderr_drops_sqlcmd_notices() {
    let stderr = "Sqlcmd: Warning: the server certificate was not validated.\n";
    assert_eq!(filter_benign_stderr(stderr), None);
}

#[test]
fn test_filter_benign_stderr_keeps_real_errors() {
    let stderr = "Sqlcmd: Warning: certificate not validated.\nLogin failed for user 'sa'.\n";
    let kept = filter_benign_stderr(stderr).unwrap();
    assert_eq!(kept, "Login failed for user 'sa'.");
}

#[test]
fn test_filter_benign_stderr_empty() {
    assert_eq!(filter_benign_stderr(""), None);
    assert_eq!(filter_benign_stderr("\n  \n"), None);
}

#[test]
fn test_parse_count_from_client_output() {
    let stdout = "cnt\n---\n42\n\n(1 rows affected)";
    assert_eq!(parse_count(stdout).unwrap(), 42);
}

#[test]
fn test_parse_count_no_number_is_an_error() {
    let err = parse_count("Msg 208, Level 16: Invalid object name").unwrap_err();
    assert!(matches!(err, DbError::CountParse(_)));
}
