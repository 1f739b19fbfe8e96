//! Reel dataset loading for the caption pipeline.
//!
//! The dataset is a JSON array exported from an Instagram reel scrape. Only
//! three fields are read; everything else in each entry is ignored.

use std::path::Path;

use serde::Deserialize;

use crate::CoreError;

/// One reel from the input dataset.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReelRecord {
    /// Thumbnail image that gets OCR'd.
    #[serde(rename = "displayUrl", default)]
    pub image_url: String,
    /// Link to the reel itself; stored in the Notion `URL` property.
    #[serde(rename = "url", default)]
    pub target_url: String,
    #[serde(rename = "ownerUsername", default = "unknown_owner")]
    pub owner_handle: String,
}

fn unknown_owner() -> String {
    "Unknown".to_string()
}

/// Parse a dataset from its JSON text. `context` names the source in errors.
///
/// # Errors
///
/// Returns [`CoreError::DatasetParse`] if the text is not a JSON array of
/// objects.
pub fn parse_reels(json: &str, context: &str) -> Result<Vec<ReelRecord>, CoreError> {
    serde_json::from_str(json).map_err(|e| CoreError::DatasetParse {
        path: context.to_string(),
        source: e,
    })
}

/// Load the reel dataset from a local JSON file.
///
/// # Errors
///
/// Returns [`CoreError::DatasetIo`] if the file cannot be read, or
/// [`CoreError::DatasetParse`] if it is not a JSON array of objects.
pub fn load_reels(path: &Path) -> Result<Vec<ReelRecord>, CoreError> {
    let display = path.display().to_string();
    let content = std::fs::read_to_string(path).map_err(|e| CoreError::DatasetIo {
        path: display.clone(),
        source: e,
    })?;
    parse_reels(&content, &display)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parse_reels_reads_known_fields() {
        let json = r#"[{
            "displayUrl": "https://cdn.example.com/a.jpg",
            "url": "https://www.instagram.com/reel/abc/",
            "ownerUsername": "natgeo",
            "likesCount": 12
        }]"#;
        let reels = parse_reels(json, "inline").unwrap();
        assert_eq!(
            reels,
            vec![ReelRecord {
                image_url: "https://cdn.example.com/a.jpg".to_string(),
                target_url: "https://www.instagram.com/reel/abc/".to_string(),
                owner_handle: "natgeo".to_string(),
            }]
        );
    }

    #[test]
    fn parse_reels_applies_defaults_for_missing_fields() {
        let reels = parse_reels("[{}]", "inline").unwrap();
        assert_eq!(reels[0].image_url, "");
        assert_eq!(reels[0].target_url, "");
        assert_eq!(reels[0].owner_handle, "Unknown");
    }

    #[test]
    fn parse_reels_rejects_non_array() {
        let err = parse_reels(r#"{"displayUrl": "x"}"#, "inline").unwrap_err();
        assert!(matches!(err, CoreError::DatasetParse { ref path, .. } if path == "inline"));
    }

    #[test]
    fn load_reels_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"displayUrl": "a", "url": "b", "ownerUsername": "c"}}, {{"url": "d"}}]"#
        )
        .unwrap();

        let reels = load_reels(file.path()).unwrap();
        assert_eq!(reels.len(), 2);
        assert_eq!(reels[1].target_url, "d");
        assert_eq!(reels[1].owner_handle, "Unknown");
    }

    #[test]
    fn load_reels_reports_missing_file() {
        let err = load_reels(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, CoreError::DatasetIo { .. }));
    }
}
