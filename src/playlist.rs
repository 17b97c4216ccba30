//! Playlist loading
//!
//! A playlist is an ordered, finite list of documents, loaded once from a
//! JSON file and consumed front-to-back. Summarizer output stores the spoken
//! text under `summary`, so the loader accepts that as an alias for `body`.

use crate::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// One document to read aloud
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    #[serde(alias = "summary")]
    pub body: String,
}

impl Document {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// The text handed to the synthesizer: title, then body
    pub fn spoken_text(&self) -> String {
        format!("{}\n{}", self.title, self.body)
    }
}

/// Ordered sequence of documents, consumed once
pub type Playlist = Vec<Document>;

/// Load a playlist from a JSON file of `[{title, body|summary}]` records
pub fn load(path: &Path) -> Result<Playlist> {
    debug!("Loading playlist from {:?}", path);
    let file = File::open(path)?;
    let playlist: Playlist = serde_json::from_reader(BufReader::new(file))?;
    debug!("Loaded {} documents", playlist.len());
    Ok(playlist)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spoken_text() {
        let doc = Document::new("Title", "Body text.");
        assert_eq!(doc.spoken_text(), "Title\nBody text.");
    }

    #[test]
    fn test_summary_alias() {
        let doc: Document =
            serde_json::from_str(r#"{"title": "T", "summary": "S"}"#).unwrap();
        assert_eq!(doc.body, "S");
    }

    #[test]
    fn test_body_field() {
        let doc: Document = serde_json::from_str(r#"{"title": "T", "body": "B"}"#).unwrap();
        assert_eq!(doc.body, "B");
    }
}
