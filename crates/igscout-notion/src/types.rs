//! Request and response shapes for `POST /v1/pages`.

use serde::{Deserialize, Serialize};

/// Notion rejects rich-text objects whose `content` exceeds this many
/// characters.
pub const MAX_TEXT_CHARS: usize = 2000;

/// The three properties written for every captioned reel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionPage {
    /// Reel owner; goes into the `Account` title property.
    pub account: String,
    /// OCR text; goes into the `Caption` rich-text property. May contain
    /// newlines.
    pub caption: String,
    /// Reel link; goes into the `URL` property.
    pub url: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct CreatePageRequest<'a> {
    pub parent: Parent<'a>,
    pub properties: CaptionProperties,
}

#[derive(Debug, Serialize)]
pub(crate) struct Parent<'a> {
    pub database_id: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CaptionProperties {
    #[serde(rename = "Account")]
    pub account: TitleProperty,
    #[serde(rename = "Caption")]
    pub caption: RichTextProperty,
    #[serde(rename = "URL")]
    pub url: UrlProperty,
}

#[derive(Debug, Serialize)]
pub(crate) struct TitleProperty {
    pub title: Vec<RichText>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RichTextProperty {
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Serialize)]
pub(crate) struct UrlProperty {
    /// Notion refuses an empty string here; `null` clears the cell instead.
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RichText {
    pub text: TextContent,
}

#[derive(Debug, Serialize)]
pub(crate) struct TextContent {
    pub content: String,
}

impl<'a> CreatePageRequest<'a> {
    pub(crate) fn new(database_id: &'a str, page: &CaptionPage) -> Self {
        Self {
            parent: Parent { database_id },
            properties: CaptionProperties {
                account: TitleProperty {
                    title: text_segments(&page.account),
                },
                caption: RichTextProperty {
                    rich_text: text_segments(&page.caption),
                },
                url: UrlProperty {
                    url: Some(page.url.clone()).filter(|u| !u.is_empty()),
                },
            },
        }
    }
}

/// Split `text` into consecutive rich-text objects of at most
/// [`MAX_TEXT_CHARS`] characters each.
pub(crate) fn text_segments(text: &str) -> Vec<RichText> {
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(MAX_TEXT_CHARS)
        .map(|chunk| RichText {
            text: TextContent {
                content: chunk.iter().collect(),
            },
        })
        .collect()
}

/// The subset of Notion's page object the caller needs.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPage {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
}

/// Notion's error envelope: `{"object": "error", "status", "code", "message"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}
