//! Wire models for the Radarr and Sonarr v3 APIs.
//!
//! Lookup responses are deserialized leniently (`#[serde(default)]` on
//! anything the backends have been seen to omit). Season and artwork
//! substructure is carried opaquely from the lookup response into the add
//! request; its shape is the backend's business.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use importarr_lib::sync::Candidate;

/// A movie as returned by `/api/v3/movie` and `/api/v3/movie/lookup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieResource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_slug: String,
    pub tmdb_id: u64,
    /// 0 when the backend has no release year.
    #[serde(default)]
    pub year: u16,
}

impl Candidate for MovieResource {
    fn remote_id(&self) -> u64 {
        self.tmdb_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<u16> {
        if self.year == 0 { None } else { Some(self.year) }
    }
}

/// A series as returned by `/api/v3/series` and `/api/v3/series/lookup`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesResource {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_slug: String,
    pub tvdb_id: u64,
    #[serde(default)]
    pub tmdb_id: u64,
    #[serde(default)]
    pub year: u16,
    /// Artwork references, forwarded opaquely into the add request.
    #[serde(default)]
    pub images: Vec<Value>,
    /// Season list, forwarded opaquely into the add request.
    #[serde(default)]
    pub seasons: Vec<Value>,
}

impl Candidate for SeriesResource {
    fn remote_id(&self) -> u64 {
        self.tvdb_id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn year(&self) -> Option<u16> {
        if self.year == 0 { None } else { Some(self.year) }
    }
}

/// POST body for `/api/v3/movie`. Pure function of the looked-up movie and
/// static settings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddMovieRequest {
    pub title: String,
    pub quality_profile_id: u32,
    pub title_slug: String,
    pub tmdb_id: u64,
    pub year: u16,
    pub root_folder_path: String,
    pub monitored: bool,
    pub add_options: MovieAddOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieAddOptions {
    /// Always false for bulk imports: a burst of simultaneous indexer
    /// searches trips external rate limits.
    pub search_for_movie: bool,
    /// "movieOnly" — no sub-unit monitoring exists for movies.
    pub monitor: &'static str,
}

impl AddMovieRequest {
    pub fn from_lookup(movie: &MovieResource, root_folder: &str, quality_profile_id: u32) -> Self {
        Self {
            title: movie.title.clone(),
            quality_profile_id,
            title_slug: movie.title_slug.clone(),
            tmdb_id: movie.tmdb_id,
            year: movie.year,
            root_folder_path: root_folder.to_string(),
            monitored: true,
            add_options: MovieAddOptions {
                search_for_movie: false,
                monitor: "movieOnly",
            },
        }
    }
}

/// POST body for `/api/v3/series`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddSeriesRequest {
    pub title: String,
    pub quality_profile_id: u32,
    /// Sonarr v3 concept; v4 ignores it.
    pub language_profile_id: u32,
    pub title_slug: String,
    pub tvdb_id: u64,
    pub tmdb_id: u64,
    pub images: Vec<Value>,
    pub seasons: Vec<Value>,
    pub root_folder_path: String,
    /// Pinned to the pre-existing folder so Sonarr keeps the on-disk layout
    /// instead of computing (and renaming to) its own.
    pub path: String,
    pub monitored: bool,
    pub series_type: &'static str,
    pub add_options: SeriesAddOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAddOptions {
    pub ignore_episodes_with_files: bool,
    pub ignore_episodes_without_files: bool,
    /// Always false for bulk imports, same rationale as movies.
    pub search_for_missing_episodes: bool,
    /// "all" — monitor every season explicitly.
    pub monitor: &'static str,
}

impl AddSeriesRequest {
    pub fn from_lookup(
        series: &SeriesResource,
        root_folder: &str,
        path: &str,
        quality_profile_id: u32,
        language_profile_id: u32,
    ) -> Self {
        Self {
            title: series.title.clone(),
            quality_profile_id,
            language_profile_id,
            title_slug: series.title_slug.clone(),
            tvdb_id: series.tvdb_id,
            tmdb_id: series.tmdb_id,
            images: series.images.clone(),
            seasons: series.seasons.clone(),
            root_folder_path: root_folder.to_string(),
            path: path.to_string(),
            monitored: true,
            series_type: "standard",
            add_options: SeriesAddOptions {
                ignore_episodes_with_files: false,
                ignore_episodes_without_files: false,
                search_for_missing_episodes: false,
                monitor: "all",
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_movie() -> MovieResource {
        serde_json::from_value(json!({
            "title": "Alien",
            "titleSlug": "alien-348",
            "tmdbId": 348,
            "year": 1979
        }))
        .unwrap()
    }

    #[test]
    fn test_movie_lookup_tolerates_missing_fields() {
        let movie: MovieResource = serde_json::from_value(json!({ "tmdbId": 348 })).unwrap();
        assert_eq!(movie.tmdb_id, 348);
        assert_eq!(movie.title, "");
        assert_eq!(movie.year(), None);
    }

    #[test]
    fn test_add_movie_request_policy_flags() {
        let body =
            serde_json::to_value(AddMovieRequest::from_lookup(&sample_movie(), "/movies", 1))
                .unwrap();

        assert_eq!(body["title"], "Alien");
        assert_eq!(body["titleSlug"], "alien-348");
        assert_eq!(body["tmdbId"], 348);
        assert_eq!(body["year"], 1979);
        assert_eq!(body["qualityProfileId"], 1);
        assert_eq!(body["rootFolderPath"], "/movies");
        assert_eq!(body["monitored"], true);
        assert_eq!(body["addOptions"]["searchForMovie"], false);
        assert_eq!(body["addOptions"]["monitor"], "movieOnly");
    }

    #[test]
    fn test_add_series_request_policy_flags_and_pinned_path() {
        let series: SeriesResource = serde_json::from_value(json!({
            "title": "The Expanse",
            "titleSlug": "the-expanse",
            "tvdbId": 280619,
            "tmdbId": 63639,
            "images": [{"coverType": "poster", "url": "/p.jpg"}],
            "seasons": [{"seasonNumber": 1, "monitored": true}]
        }))
        .unwrap();

        let body = serde_json::to_value(AddSeriesRequest::from_lookup(
            &series,
            "/series",
            "/series/The Expanse",
            1,
            1,
        ))
        .unwrap();

        assert_eq!(body["tvdbId"], 280619);
        assert_eq!(body["tmdbId"], 63639);
        assert_eq!(body["languageProfileId"], 1);
        assert_eq!(body["rootFolderPath"], "/series");
        assert_eq!(body["path"], "/series/The Expanse");
        assert_eq!(body["seriesType"], "standard");
        assert_eq!(body["monitored"], true);
        assert_eq!(body["images"][0]["coverType"], "poster");
        assert_eq!(body["seasons"][0]["seasonNumber"], 1);
        assert_eq!(body["addOptions"]["ignoreEpisodesWithFiles"], false);
        assert_eq!(body["addOptions"]["ignoreEpisodesWithoutFiles"], false);
        assert_eq!(body["addOptions"]["searchForMissingEpisodes"], false);
        assert_eq!(body["addOptions"]["monitor"], "all");
    }

    #[test]
    fn test_series_without_tmdb_id_defaults_to_zero() {
        let series: SeriesResource =
            serde_json::from_value(json!({ "title": "X", "tvdbId": 7 })).unwrap();
        let body = serde_json::to_value(AddSeriesRequest::from_lookup(&series, "/s", "/s/X", 1, 1))
            .unwrap();
        assert_eq!(body["tmdbId"], 0);
        assert_eq!(body["images"], json!([]));
        assert_eq!(body["seasons"], json!([]));
    }
}
