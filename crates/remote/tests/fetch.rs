// crates/remote/tests/fetch.rs
//! Fetchers against real files through the local transport.

use std::fs;
use std::path::Path;

use drishti_remote::{
    fetch_all, fetch_tail, fetch_tail_with_header, overwrite, LocalTransport, RemoteError,
};

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn numbered(n: usize) -> String {
    (1..=n).map(|i| format!("row{i}\n")).collect()
}

#[tokio::test]
async fn tail_returns_last_lines_oldest_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "log.csv", &numbered(120));
    let t = LocalTransport::default();

    let text = fetch_tail(&t, &path, 50).await.unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 50);
    assert_eq!(lines[0], "row71");
    assert_eq!(lines[49], "row120");
}

#[tokio::test]
async fn tail_of_short_file_is_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "short.csv", &numbered(3));
    let t = LocalTransport::default();
    assert_eq!(fetch_tail(&t, &path, 50).await.unwrap(), "row1\nrow2\nrow3");
}

#[tokio::test]
async fn tail_of_empty_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "empty.csv", "");
    let t = LocalTransport::default();
    assert_eq!(fetch_tail(&t, &path, 50).await.unwrap(), "");
}

#[tokio::test]
async fn tail_with_header_keeps_header() {
    let dir = tempfile::tempdir().unwrap();
    let content = format!("image_name,timestamp\n{}", numbered(80));
    let path = write(dir.path(), "drowsy.csv", &content);
    let t = LocalTransport::default();

    let text = fetch_tail_with_header(&t, &path, 50).await.unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 51);
    assert_eq!(lines[0], "image_name,timestamp");
    assert_eq!(lines[1], "row31");
    assert_eq!(lines[50], "row80");
}

#[tokio::test]
async fn tail_with_header_on_header_only_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "h.csv", "a,b\n");
    let t = LocalTransport::default();
    assert_eq!(fetch_tail_with_header(&t, &path, 50).await.unwrap(), "a,b");
}

#[tokio::test]
async fn path_with_spaces_and_quote() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "it's a log.csv", "x\ny\n");
    let t = LocalTransport::default();
    assert_eq!(fetch_tail(&t, &path, 1).await.unwrap(), "y");
}

#[tokio::test]
async fn missing_file_is_execution_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");
    let t = LocalTransport::default();
    let err = fetch_tail(&t, path.to_str().unwrap(), 50).await.unwrap_err();
    match err {
        RemoteError::Execution { stderr, .. } => assert!(!stderr.is_empty()),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn fetch_all_then_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(dir.path(), "tickets.csv", "id,status\nT1,Pending\n");
    let t = LocalTransport::default();

    assert_eq!(fetch_all(&t, &path).await.unwrap(), "id,status\nT1,Pending\n");
    overwrite(&t, &path, "id,status\nT1,Resolved\n").await.unwrap();
    assert_eq!(fetch_all(&t, &path).await.unwrap(), "id,status\nT1,Resolved\n");
}
