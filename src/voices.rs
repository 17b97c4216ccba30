//! Language to synthesizer voice mapping
//!
//! Maps human-friendly language names (as used in playlists and config) to
//! espeak-ng voice identifiers.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Known languages and their synthesizer voices
pub static VOICES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("english", "en-us");
    m.insert("british", "en-gb");
    m.insert("chinese", "zh");
    m.insert("spanish", "es");
    m.insert("french", "fr");
    m.insert("german", "de");
    m.insert("italian", "it");
    m.insert("portuguese", "pt");
    m.insert("russian", "ru");
    m
});

/// Look up the voice for a language name (case-insensitive)
pub fn voice_for_language(language: &str) -> Option<&'static str> {
    VOICES.get(language.to_lowercase().as_str()).copied()
}
