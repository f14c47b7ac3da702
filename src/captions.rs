//! Loading pre-parsed caption records.
//!
//! Captions arrive as a JSON array of `{start_ms, end_ms, text}` objects,
//! produced by whatever subtitle parser the host uses. `text` may also be a
//! list of lines, which are joined with `\n`.

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::timeline::Caption;

/// Errors raised while loading captions.
#[derive(Debug, thiserror::Error)]
pub enum CaptionLoadError {
    #[error("Failed to read captions from {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid caption JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CaptionText {
    Single(String),
    Lines(Vec<String>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CaptionRecord {
    start_ms: u64,
    end_ms: u64,
    text: CaptionText,
}

impl From<CaptionRecord> for Caption {
    fn from(record: CaptionRecord) -> Self {
        let text = match record.text {
            CaptionText::Single(text) => text,
            CaptionText::Lines(lines) => lines.join("\n"),
        };
        Caption::new(record.start_ms, record.end_ms, text)
    }
}

/// Parse captions from a JSON string.
pub fn parse_captions(json: &str) -> Result<Vec<Caption>, CaptionLoadError> {
    let records: Vec<CaptionRecord> = serde_json::from_str(json)?;
    Ok(records.into_iter().map(Caption::from).collect())
}

/// Read captions from a JSON file, or from stdin when `path` is `-`.
pub fn load_captions(path: &Path) -> Result<Vec<Caption>, CaptionLoadError> {
    let read_error = |source| CaptionLoadError::Read {
        path: path.to_path_buf(),
        source,
    };

    let json = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .map_err(read_error)?;
        buffer
    } else {
        fs::read_to_string(path).map_err(read_error)?
    };
    parse_captions(&json)
}
