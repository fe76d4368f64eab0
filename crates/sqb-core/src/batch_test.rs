use super::*;

#[test]
fn test_no_delimiter_single_batch() {
    let batches = split_batches("SELECT 1;", "GO");
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].index, 1);
    assert_eq!(batches[0].sql, "SELECT 1;");
}

#[test]
fn test_no_delimiter_blank_input_yields_nothing() {
    assert!(split_batches("", "GO").is_empty());
    assert!(split_batches("   \n\t\n  ", "GO").is_empty());
}

#[test]
fn test_create_then_alter_scenario() {
    let text = "CREATE TABLE T(x int);\nGO\nALTER TABLE T ADD y int;\nGO";
    let batches = split_batches(text, "GO");
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].sql, "CREATE TABLE T(x int);");
    assert_eq!(batches[1].sql, "ALTER TABLE T ADD y int;");
}

#[test]
fn test_order_preserved() {
    let text = "first\nGO\nsecond\nGO\nthird";
    let batches = split_batches(text, "GO");
    let sql: Vec<&str> = batches.iter().map(|b| b.sql.as_str()).collect();
    assert_eq!(sql, vec!["first", "second", "third"]);
    let indices: Vec<usize> = batches.iter().map(|b| b.index).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[test]
fn test_empty_segments_dropped() {
    // Consecutive delimiters and trailing delimiters produce empty
    // segments that must not become batches.
    let text = "GO\n\nSELECT 1;\nGO\nGO\n   \nGO";
    let batches = split_batches(text, "GO");
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].sql, "SELECT 1;");
}

#[test]
fn test_at_most_n_plus_one_batches() {
    let text = "a\nGO\nb\nGO\nc\nGO\nd";
    let delimiter_count = text.matches("GO").count();
    let batches = split_batches(text, "GO");
    assert!(batches.len() <= delimiter_count + 1);
}

#[test]
fn test_split_is_case_sensitive() {
    let batches = split_batches("SELECT 1;\ngo\nSELECT 2;", "GO");
    assert_eq!(batches.len(), 1);
}

#[test]
fn test_naive_split_inside_string_literal() {
    // Known limitation: the delimiter token is matched anywhere, including
    // inside string literals. The split is intentionally not SQL-aware.
    let batches = split_batches("INSERT INTO t VALUES ('GO');", "GO");
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].sql, "INSERT INTO t VALUES ('");
    assert_eq!(batches[1].sql, "');");
}

#[test]
fn test_custom_delimiter() {
    let batches = split_batches("SELECT 1;\n--//--\nSELECT 2;", "--//--");
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].sql, "SELECT 1;");
    assert_eq!(batches[1].sql, "SELECT 2;");
}
