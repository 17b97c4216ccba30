//! Playlist loading tests
//!
//! Verifies the JSON playlist boundary: the documented format, the
//! summarizer-output alias, and the failure modes.

use lector::playlist;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_playlist(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write playlist");
    file.flush().expect("flush playlist");
    file
}

#[test]
fn test_loads_documents_in_order() {
    let file = write_playlist(
        r#"[
            {"title": "First", "body": "alpha"},
            {"title": "Second", "body": "beta"}
        ]"#,
    );

    let documents = playlist::load(file.path()).unwrap();
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].title, "First");
    assert_eq!(documents[1].body, "beta");
}

#[test]
fn test_accepts_summary_alias() {
    let file = write_playlist(r#"[{"title": "Paper", "summary": "the gist"}]"#);

    let documents = playlist::load(file.path()).unwrap();
    assert_eq!(documents[0].body, "the gist");
    assert_eq!(documents[0].spoken_text(), "Paper\nthe gist");
}

#[test]
fn test_empty_playlist_is_valid() {
    let file = write_playlist("[]");
    let documents = playlist::load(file.path()).unwrap();
    assert!(documents.is_empty());
}

#[test]
fn test_missing_file_is_an_error() {
    let result = playlist::load(std::path::Path::new("/nonexistent/playlist.json"));
    assert!(result.is_err());
}

#[test]
fn test_malformed_json_is_an_error() {
    let file = write_playlist("{not json");
    assert!(playlist::load(file.path()).is_err());
}

#[test]
fn test_missing_title_is_an_error() {
    let file = write_playlist(r#"[{"body": "no title"}]"#);
    assert!(playlist::load(file.path()).is_err());
}
