//! Wire types for `POST /v1/images:annotate`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct AnnotateRequest {
    pub requests: Vec<AnnotateImageRequest>,
}

#[derive(Debug, Serialize)]
pub struct AnnotateImageRequest {
    pub image: ImageContent,
    pub features: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct ImageContent {
    /// Base64-encoded image bytes.
    pub content: String,
}

#[derive(Debug, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl AnnotateRequest {
    /// A single-image `TEXT_DETECTION` request.
    #[must_use]
    pub fn text_detection(content: String) -> Self {
        Self {
            requests: vec![AnnotateImageRequest {
                image: ImageContent { content },
                features: vec![Feature {
                    kind: "TEXT_DETECTION",
                }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnnotateResponse {
    pub responses: Option<Vec<AnnotateImageResponse>>,
}

#[derive(Debug, Deserialize)]
pub struct AnnotateImageResponse {
    /// The first entry holds the full detected text; the rest are per-word.
    #[serde(rename = "textAnnotations", default)]
    pub text_annotations: Vec<EntityAnnotation>,
    pub error: Option<Status>,
}

#[derive(Debug, Deserialize)]
pub struct EntityAnnotation {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct Status {
    #[serde(default)]
    pub code: i32,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_detection_request_serializes_expected_shape() {
        let body = serde_json::to_value(AnnotateRequest::text_detection("abc=".to_string()))
            .expect("serialize");
        assert_eq!(
            body,
            serde_json::json!({
                "requests": [{
                    "image": {"content": "abc="},
                    "features": [{"type": "TEXT_DETECTION"}]
                }]
            })
        );
    }

    #[test]
    fn response_without_annotations_deserializes() {
        let parsed: AnnotateResponse = serde_json::from_str(r#"{"responses": [{}]}"#).unwrap();
        let responses = parsed.responses.unwrap();
        assert!(responses[0].text_annotations.is_empty());
        assert!(responses[0].error.is_none());
    }
}
