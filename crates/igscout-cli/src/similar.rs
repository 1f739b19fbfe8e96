//! `similar` command: the web UI's fetch run headlessly, exported to a
//! text file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use igscout_apify::{ApifyClient, FetchOutcome};
use igscout_core::{
    export_file_name, normalize_handle, visible_profiles, AppConfig, EnrichedProfile,
    FilterCriteria, HiddenSet,
};

/// Fetch accounts similar to `profile` and write their usernames to `out`
/// (or `{seed}_similar.txt`).
///
/// # Errors
///
/// Returns an error if the input has no username, `APIFY_API_KEY` is not
/// set, either actor run fails, or the export cannot be written.
pub(crate) async fn run_similar(
    config: &AppConfig,
    profile: &str,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let seed = normalize_handle(profile);
    if seed.is_empty() {
        anyhow::bail!("no Instagram username found in {profile:?}");
    }

    let token = config
        .apify_api_key
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("APIFY_API_KEY is not set; cannot run similar"))?;
    let client = ApifyClient::new(
        token,
        &config.apify_actor_id,
        config.apify_timeout_secs,
        &config.user_agent,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Apify client: {e}"))?;

    println!("fetching accounts similar to {seed}");
    let profiles = match client
        .fetch_similar(&seed)
        .await
        .with_context(|| format!("similar-accounts fetch for {seed} failed"))?
    {
        FetchOutcome::NoRelatedProfiles => {
            println!("No related profiles found.");
            return Ok(());
        }
        FetchOutcome::Profiles(profiles) => profiles,
    };

    let path = out.unwrap_or_else(|| PathBuf::from(export_file_name(&seed)));
    let written = write_export(&path, &profiles)?;
    println!("wrote {written} usernames to {}", path.display());
    Ok(())
}

/// Writes every username in `profiles`, one per line. Returns the count.
fn write_export(path: &Path, profiles: &[EnrichedProfile]) -> anyhow::Result<usize> {
    let view = visible_profiles(profiles, &HiddenSet::default(), &FilterCriteria::default());
    std::fs::write(path, view.usernames_text())
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(view.visible.len())
}
