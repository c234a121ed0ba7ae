//! Console rendering of sync progress.
//!
//! One line per folder outcome, one per batch boundary. This output is the
//! only record of a run; there is no log file or machine-readable format.

use owo_colors::OwoColorize;
use owo_colors::Stream::{Stderr, Stdout};

use importarr_lib::sync::SyncEvent;
use importarr_lib::{Outcome, RunSummary};

/// Header printed before a backend run starts.
pub(crate) fn run_header(backend: &str, folders: usize, batch_size: usize, dry_run: bool) {
    println!(
        "{} Found {} folders. Starting import in batches of {}...",
        backend.if_supports_color(Stdout, |t| t.bold()),
        folders,
        batch_size,
    );
    if dry_run {
        println!(
            "{}",
            "Dry run: no add requests will be issued".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
}

/// Render one pipeline event.
pub(crate) fn render_event(event: SyncEvent) {
    match event {
        SyncEvent::SnapshotLoaded { known } => {
            println!(
                "{}",
                format!("Library snapshot: {known} entries")
                    .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
        SyncEvent::BatchStarted {
            index,
            count,
            first,
            last,
            total,
        } => {
            println!("--- Batch {}/{} ({}-{} of {}) ---", index + 1, count, first, last, total);
        }
        SyncEvent::FolderDone { folder, outcome } => render_outcome(&folder, &outcome),
        SyncEvent::BatchWaiting { delay } => {
            println!(
                "{}",
                format!(
                    "Waiting {}s for the backend scanner to catch up...",
                    delay.as_secs()
                )
                .if_supports_color(Stdout, |t| t.dimmed()),
            );
        }
    }
}

fn render_outcome(folder: &str, outcome: &Outcome) {
    match outcome {
        Outcome::Added { title, year } => {
            let title = match year {
                Some(year) => format!("{title} ({year})"),
                None => title.clone(),
            };
            println!(
                "  {} Added     {}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                title,
            );
        }
        Outcome::Skipped { title } => {
            println!(
                "  {} Skipped   {} (already in library)",
                "\u{2022}".if_supports_color(Stdout, |t| t.dimmed()),
                title,
            );
        }
        Outcome::NotFound => {
            println!(
                "  {} Not found {}",
                "?".if_supports_color(Stdout, |t| t.yellow()),
                folder,
            );
        }
        Outcome::TimedOut => {
            println!(
                "  {} Timed out {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                folder,
            );
        }
        Outcome::Failed { reason } => {
            println!(
                "  {} Failed    {}: {}",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                folder,
                reason,
            );
        }
    }
}

/// Final tally for one backend run.
pub(crate) fn run_summary(backend: &str, summary: &RunSummary) {
    println!(
        "{} {} added, {} skipped, {} not found, {} timed out, {} failed",
        format!("{backend} done:").if_supports_color(Stdout, |t| t.bold()),
        summary.added,
        summary.skipped,
        summary.not_found,
        summary.timed_out,
        summary.failed,
    );
    println!();
}

/// A run-fatal error (snapshot failure, bad config). Reported once.
pub(crate) fn fatal(message: &str) {
    eprintln!(
        "{} Fatal: {}",
        "\u{2718}".if_supports_color(Stderr, |t| t.red()),
        message,
    );
}
