//! Sonarr backend: series, keyed by TVDB id.

use std::collections::HashSet;

use importarr_lib::sync::Backend;
use importarr_lib::{MediaFolder, SyncError};

use crate::client::{ArrClient, rejection_reason};
use crate::config::BackendSettings;
use crate::types::{AddSeriesRequest, SeriesResource};

/// Sonarr's disk scanner is touchier than Radarr's: smaller batches, but a
/// shorter pause suffices.
pub const DEFAULT_BATCH_SIZE: usize = 40;
pub const DEFAULT_BATCH_DELAY_SECS: u64 = 10;

pub struct SonarrBackend {
    client: ArrClient,
    root_folder: String,
    quality_profile_id: u32,
    language_profile_id: u32,
}

impl SonarrBackend {
    pub fn new(settings: &BackendSettings) -> Result<Self, SyncError> {
        let client = ArrClient::new(
            &settings.base_url,
            &settings.api_key,
            settings.request_timeout(),
        )?;
        Ok(Self {
            client,
            root_folder: settings.root_folder.clone(),
            quality_profile_id: settings.quality_profile_id,
            language_profile_id: settings.language_profile_id,
        })
    }
}

impl Backend for SonarrBackend {
    type Entry = SeriesResource;

    fn name(&self) -> &str {
        "sonarr"
    }

    async fn fetch_known_ids(&self) -> Result<HashSet<u64>, SyncError> {
        let series: Vec<SeriesResource> = self.client.get_json("/api/v3/series").await?;
        Ok(series.iter().map(|s| s.tvdb_id).collect())
    }

    async fn lookup(&self, term: &str) -> Result<Option<SeriesResource>, SyncError> {
        let resp = self
            .client
            .get("/api/v3/series/lookup", &[("term", term)])
            .await?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let mut results: Vec<SeriesResource> = resp
            .json()
            .await
            .map_err(|e| SyncError::unreachable(format!("Malformed lookup response: {e}")))?;
        if results.is_empty() {
            return Ok(None);
        }
        Ok(Some(results.swap_remove(0)))
    }

    async fn add(&self, entry: &SeriesResource, folder: &MediaFolder) -> Result<(), SyncError> {
        // Pin the on-disk path to the existing folder (as the backend sees
        // it) so Sonarr keeps the layout instead of renaming.
        let path = series_path(&self.root_folder, &folder.name);
        let body = AddSeriesRequest::from_lookup(
            entry,
            &self.root_folder,
            &path,
            self.quality_profile_id,
            self.language_profile_id,
        );
        let resp = self.client.post_json("/api/v3/series", &body).await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        Err(SyncError::Rejected(rejection_reason(status, &text)))
    }
}

/// Join the backend-side root folder and the folder name. The root is a
/// backend-side path string, not a local path, so this is plain string
/// joining with `/`.
fn series_path(root_folder: &str, folder_name: &str) -> String {
    format!("{}/{}", root_folder.trim_end_matches('/'), folder_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_path_joins_with_slash() {
        assert_eq!(
            series_path("/mnt/media/series", "The Expanse"),
            "/mnt/media/series/The Expanse"
        );
    }

    #[test]
    fn test_series_path_tolerates_trailing_slash() {
        assert_eq!(series_path("/srv/tv/", "Severance"), "/srv/tv/Severance");
    }
}
