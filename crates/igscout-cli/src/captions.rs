//! `captions` command: OCR each reel in the dataset and upload non-empty
//! captions to Notion, one page per reel.

use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use igscout_core::{AppConfig, ReelRecord};
use igscout_notion::{CaptionPage, NotionClient};
use igscout_vision::VisionClient;

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UploadSummary {
    pub processed: usize,
    pub uploaded: usize,
    /// Reels with text seen during a dry run.
    pub would_upload: usize,
    pub skipped: usize,
}

impl fmt::Display for UploadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "processed {} reels: {} uploaded, ",
            self.processed, self.uploaded
        )?;
        if self.would_upload > 0 {
            write!(f, "{} would upload, ", self.would_upload)?;
        }
        write!(f, "{} skipped", self.skipped)
    }
}

/// Where captions go. `None` at the call site means a dry run.
pub(crate) struct NotionTarget<'a> {
    pub client: &'a NotionClient,
    pub database_id: &'a str,
}

/// Load the dataset and upload captions.
///
/// # Errors
///
/// Returns an error if a required key is missing, the dataset cannot be
/// read, or any page upload fails. OCR failures only skip the reel.
pub(crate) async fn run_captions(
    config: &AppConfig,
    dataset: Option<PathBuf>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let vision_key = config
        .vision_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("VISION_API_KEY is not set; cannot run captions"))?;
    let vision = VisionClient::new(vision_key, config.http_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build Vision client: {e}"))?;

    let notion = if dry_run {
        None
    } else {
        let token = config
            .notion_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("NOTION_TOKEN is not set; cannot upload captions"))?;
        let database_id = config.notion_database_id.as_deref().ok_or_else(|| {
            anyhow::anyhow!("NOTION_DATABASE_ID is not set; cannot upload captions")
        })?;
        let client = NotionClient::new(token, config.http_timeout_secs, &config.user_agent)
            .map_err(|e| anyhow::anyhow!("failed to build Notion client: {e}"))?;
        Some((client, database_id))
    };

    let path = dataset.unwrap_or_else(|| config.dataset_path.clone());
    let reels = igscout_core::load_reels(&path)?;
    tracing::info!(path = %path.display(), reels = reels.len(), "loaded reel dataset");

    let target = notion.as_ref().map(|(client, database_id)| NotionTarget {
        client,
        database_id,
    });
    let summary = upload_captions(&vision, target.as_ref(), &reels).await?;

    if dry_run {
        println!("dry-run: {summary}");
    } else {
        println!("{summary}");
    }
    Ok(())
}

/// Sequential OCR-then-upload loop over `reels`.
///
/// # Errors
///
/// The first failed page upload aborts the loop; reels already uploaded stay
/// in Notion.
pub(crate) async fn upload_captions(
    vision: &VisionClient,
    target: Option<&NotionTarget<'_>>,
    reels: &[ReelRecord],
) -> anyhow::Result<UploadSummary> {
    let mut summary = UploadSummary::default();

    for reel in reels {
        summary.processed += 1;
        println!("processing reel: {}", reel.target_url);

        let caption = vision.extract_text(&reel.image_url).await;
        if caption.is_empty() {
            println!("no text found, skipping");
            summary.skipped += 1;
            continue;
        }

        let page = CaptionPage {
            account: reel.owner_handle.clone(),
            caption,
            url: reel.target_url.clone(),
        };

        match target {
            Some(target) => {
                let created = target
                    .client
                    .create_page(target.database_id, &page)
                    .await
                    .with_context(|| {
                        format!("failed to upload caption for {}", reel.target_url)
                    })?;
                tracing::debug!(
                    page_id = %created.id,
                    account = %page.account,
                    "created caption page"
                );
                println!("uploaded: {}", reel.target_url);
                summary.uploaded += 1;
            }
            None => {
                println!(
                    "dry-run: would upload {} chars for {} ({})",
                    page.caption.chars().count(),
                    page.account,
                    page.url
                );
                summary.would_upload += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn reel(image: &str, url: &str) -> ReelRecord {
        ReelRecord {
            image_url: image.to_owned(),
            target_url: url.to_owned(),
            owner_handle: "someone".to_owned(),
        }
    }

    async fn mount_image(server: &MockServer, name: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/img/{name}")))
            .respond_with(ResponseTemplate::new(status).set_body_bytes(b"jpeg".to_vec()))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn uploads_only_reels_with_text() {
        let server = MockServer::start().await;
        mount_image(&server, "good.jpg", 200).await;
        mount_image(&server, "gone.jpg", 404).await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{"textAnnotations": [{"description": "  Hello reel \n"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "page-1"})))
            .expect(1)
            .mount(&server)
            .await;

        let vision =
            VisionClient::with_base_url("vk", 5, "test", &server.uri()).expect("vision client");
        let notion =
            NotionClient::with_base_url("nt", 5, "test", &server.uri()).expect("notion client");
        let target = NotionTarget {
            client: &notion,
            database_id: "db",
        };

        let reels = vec![
            reel(&format!("{}/img/good.jpg", server.uri()), "https://ig/r/1"),
            reel(&format!("{}/img/gone.jpg", server.uri()), "https://ig/r/2"),
        ];
        let summary = upload_captions(&vision, Some(&target), &reels)
            .await
            .expect("run succeeds");

        assert_eq!(
            summary,
            UploadSummary {
                processed: 2,
                uploaded: 1,
                would_upload: 0,
                skipped: 1
            }
        );
    }

    #[tokio::test]
    async fn upload_failure_halts_the_run() {
        let server = MockServer::start().await;
        mount_image(&server, "a.jpg", 200).await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{"textAnnotations": [{"description": "text"}]}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let vision =
            VisionClient::with_base_url("vk", 5, "test", &server.uri()).expect("vision client");
        let notion =
            NotionClient::with_base_url("nt", 5, "test", &server.uri()).expect("notion client");
        let target = NotionTarget {
            client: &notion,
            database_id: "db",
        };

        let image = format!("{}/img/a.jpg", server.uri());
        let reels = vec![reel(&image, "https://ig/r/1"), reel(&image, "https://ig/r/2")];
        let err = upload_captions(&vision, Some(&target), &reels)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("https://ig/r/1"), "got {err:#}");
    }

    #[tokio::test]
    async fn dry_run_never_calls_notion() {
        let server = MockServer::start().await;
        mount_image(&server, "a.jpg", 200).await;

        Mock::given(method("POST"))
            .and(path("/v1/images:annotate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [{"textAnnotations": [{"description": "text"}]}]
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p"})))
            .expect(0)
            .mount(&server)
            .await;

        let vision =
            VisionClient::with_base_url("vk", 5, "test", &server.uri()).expect("vision client");
        let reels = vec![reel(&format!("{}/img/a.jpg", server.uri()), "https://ig/r/1")];
        let summary = upload_captions(&vision, None, &reels).await.expect("dry run");

        assert_eq!(summary.uploaded, 0);
        assert_eq!(summary.would_upload, 1);
        assert_eq!(summary.skipped, 0);
        assert_eq!(
            summary.to_string(),
            "processed 1 reels: 0 uploaded, 1 would upload, 0 skipped"
        );
    }

    #[test]
    fn summary_line_reports_counts() {
        let summary = UploadSummary {
            processed: 3,
            uploaded: 2,
            would_upload: 0,
            skipped: 1,
        };
        assert_eq!(
            summary.to_string(),
            "processed 3 reels: 2 uploaded, 1 skipped"
        );
    }
}
