//! Radarr backend: movies, keyed by TMDB id.

use std::collections::HashSet;

use importarr_lib::sync::Backend;
use importarr_lib::{MediaFolder, SyncError};

use crate::client::{ArrClient, rejection_reason};
use crate::config::BackendSettings;
use crate::types::{AddMovieRequest, MovieResource};

/// Radarr's post-add disk scan is the slow path, so batches are large with
/// a long pause between them.
pub const DEFAULT_BATCH_SIZE: usize = 75;
pub const DEFAULT_BATCH_DELAY_SECS: u64 = 30;

pub struct RadarrBackend {
    client: ArrClient,
    root_folder: String,
    quality_profile_id: u32,
}

impl RadarrBackend {
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
        })
    }
}

impl Backend for RadarrBackend {
    type Entry = MovieResource;

    fn name(&self) -> &str {
        "radarr"
    }

    async fn fetch_known_ids(&self) -> Result<HashSet<u64>, SyncError> {
        let movies: Vec<MovieResource> = self.client.get_json("/api/v3/movie").await?;
        Ok(movies.iter().map(|m| m.tmdb_id).collect())
    }

    async fn lookup(&self, term: &str) -> Result<Option<MovieResource>, SyncError> {
        let resp = self
            .client
            .get("/api/v3/movie/lookup", &[("term", term)])
            .await?;
        if !resp.status().is_success() {
            return Ok(None);
        }
        let mut results: Vec<MovieResource> = resp
            .json()
            .await
            .map_err(|e| SyncError::unreachable(format!("Malformed lookup response: {e}")))?;
        if results.is_empty() {
            return Ok(None);
        }
        Ok(Some(results.swap_remove(0)))
    }

    async fn add(&self, entry: &MovieResource, _folder: &MediaFolder) -> Result<(), SyncError> {
        let body = AddMovieRequest::from_lookup(entry, &self.root_folder, self.quality_profile_id);
        let resp = self.client.post_json("/api/v3/movie", &body).await?;
        let status = resp.status();
        if status.is_success() {
            return Ok(());
        }
        let text = resp.text().await.unwrap_or_default();
        Err(SyncError::Rejected(rejection_reason(status, &text)))
    }
}
