//! The reconciliation pipeline: resolve folder names against the backend,
//! filter out identifiers already held, and commit the rest in paced batches.
//!
//! Strictly sequential by design: the backend's own catalog ingestion is
//! asynchronous relative to its API responses, so pacing is a correctness
//! measure rather than courtesy throttling.

use std::collections::HashSet;

use tokio::time::Duration;

use crate::batch::BatchPlan;
use crate::error::SyncError;
use crate::outcome::{Outcome, RunSummary};
use crate::scanner::MediaFolder;

/// A candidate entry returned by a backend lookup.
pub trait Candidate {
    /// Canonical identifier within the backend's catalog (tmdbId, tvdbId).
    /// Uniquely determines an entry; two folders resolving to the same
    /// identifier must not both produce an add.
    fn remote_id(&self) -> u64;

    /// Display title.
    fn title(&self) -> &str;

    /// Release year, when the backend reports one.
    fn year(&self) -> Option<u16>;
}

/// Capability set a media manager must provide to drive the pipeline.
/// One implementation per backend variant.
#[allow(async_fn_in_trait)]
pub trait Backend {
    type Entry: Candidate;

    /// Backend name for reporting ("radarr", "sonarr").
    fn name(&self) -> &str;

    /// Snapshot of identifiers already in the library. Called exactly once
    /// per run, before any add attempt; failure is fatal to the run, since
    /// membership testing without it could produce duplicates.
    async fn fetch_known_ids(&self) -> Result<HashSet<u64>, SyncError>;

    /// Fuzzy lookup by folder name. `Ok(None)` means no usable match
    /// (empty result list or non-success status) — an expected steady-state
    /// occurrence, not an error. The first result in the backend's own
    /// relevance order is the match; no local re-ranking.
    async fn lookup(&self, term: &str) -> Result<Option<Self::Entry>, SyncError>;

    /// Add the entry to the library. Non-success statuses surface as
    /// [`SyncError::Rejected`] with the backend's message.
    async fn add(&self, entry: &Self::Entry, folder: &MediaFolder) -> Result<(), SyncError>;
}

/// Options for a sync run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Folders per batch.
    pub batch_size: usize,
    /// Pause between batches, skipped after the final batch.
    pub batch_delay: Duration,
    /// Classify outcomes without issuing any add requests.
    pub dry_run: bool,
}

/// Progress events emitted during a run, consumed by the CLI reporter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncEvent {
    /// Snapshot fetched; `known` identifiers already in the library.
    SnapshotLoaded { known: usize },
    /// A batch is starting. `first`/`last` are 1-based item positions.
    BatchStarted {
        index: usize,
        count: usize,
        first: usize,
        last: usize,
        total: usize,
    },
    /// A folder finished processing.
    FolderDone { folder: String, outcome: Outcome },
    /// Pausing before the next batch.
    BatchWaiting { delay: Duration },
}

/// Run the pipeline: snapshot once, then resolve → filter → commit each
/// folder in batch order, pausing between batches.
///
/// Only the snapshot fetch can fail; every per-folder error is converted
/// into an [`Outcome`] and reported through `progress`.
pub async fn run_sync<B: Backend>(
    backend: &B,
    folders: &[MediaFolder],
    options: &SyncOptions,
    mut progress: impl FnMut(SyncEvent),
) -> Result<RunSummary, SyncError> {
    let mut known = backend.fetch_known_ids().await?;
    progress(SyncEvent::SnapshotLoaded { known: known.len() });

    let plan = BatchPlan::new(folders.len(), options.batch_size);
    let mut summary = RunSummary::default();

    for (index, batch) in folders.chunks(plan.batch_size()).enumerate() {
        let (start, end) = plan.bounds(index);
        progress(SyncEvent::BatchStarted {
            index,
            count: plan.batch_count(),
            first: start + 1,
            last: end,
            total: plan.total(),
        });

        for folder in batch {
            let outcome = process_folder(backend, folder, &mut known, options.dry_run).await;
            summary.record(&outcome);
            progress(SyncEvent::FolderDone {
                folder: folder.name.clone(),
                outcome,
            });
        }

        if !plan.is_last(index) {
            progress(SyncEvent::BatchWaiting {
                delay: options.batch_delay,
            });
            tokio::time::sleep(options.batch_delay).await;
        }
    }

    Ok(summary)
}

/// Process one folder through resolve → filter → commit. Never fails: every
/// error is folded into an [`Outcome`] at this boundary.
async fn process_folder<B: Backend>(
    backend: &B,
    folder: &MediaFolder,
    known: &mut HashSet<u64>,
    dry_run: bool,
) -> Outcome {
    let entry = match backend.lookup(&folder.name).await {
        Ok(Some(entry)) => entry,
        Ok(None) => return Outcome::NotFound,
        Err(SyncError::TimedOut) => return Outcome::TimedOut,
        Err(e) => {
            return Outcome::Failed {
                reason: e.to_string(),
            };
        }
    };

    if known.contains(&entry.remote_id()) {
        return Outcome::Skipped {
            title: entry.title().to_string(),
        };
    }

    if !dry_run {
        match backend.add(&entry, folder).await {
            Ok(()) => {}
            Err(SyncError::TimedOut) => return Outcome::TimedOut,
            Err(SyncError::Rejected(reason)) => return Outcome::Failed { reason },
            Err(e) => {
                return Outcome::Failed {
                    reason: e.to_string(),
                };
            }
        }
    }

    // Inserted before the next folder is processed, so two folders in one
    // run resolving to the same identifier produce exactly one add.
    known.insert(entry.remote_id());
    Outcome::Added {
        title: entry.title().to_string(),
        year: entry.year(),
    }
}
