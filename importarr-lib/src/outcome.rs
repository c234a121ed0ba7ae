//! Per-folder outcome classification and run tallies.

/// What happened to a single folder. Every per-item error is converted to
/// one of these; nothing propagates past a folder's processing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A new entry was added to the library.
    Added { title: String, year: Option<u16> },
    /// The resolved entry was already in the library, or was added earlier
    /// in this run.
    Skipped { title: String },
    /// The lookup returned nothing usable.
    NotFound,
    /// A request exceeded its timeout.
    TimedOut,
    /// The add was rejected, or another per-item error occurred.
    Failed { reason: String },
}

impl Outcome {
    pub fn is_added(&self) -> bool {
        matches!(self, Outcome::Added { .. })
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    /// Whether this outcome represents a problem the operator should see
    /// (timeouts and failures, not expected misses or skips).
    pub fn is_problem(&self) -> bool {
        matches!(self, Outcome::TimedOut | Outcome::Failed { .. })
    }
}

/// Tallies for a completed run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub added: usize,
    pub skipped: usize,
    pub not_found: usize,
    pub timed_out: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &Outcome) {
        match outcome {
            Outcome::Added { .. } => self.added += 1,
            Outcome::Skipped { .. } => self.skipped += 1,
            Outcome::NotFound => self.not_found += 1,
            Outcome::TimedOut => self.timed_out += 1,
            Outcome::Failed { .. } => self.failed += 1,
        }
    }

    /// Total folders processed.
    pub fn total(&self) -> usize {
        self.added + self.skipped + self.not_found + self.timed_out + self.failed
    }

    pub fn has_issues(&self) -> bool {
        self.timed_out > 0 || self.failed > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_tallies_each_variant() {
        let mut summary = RunSummary::default();
        summary.record(&Outcome::Added {
            title: "Alien".into(),
            year: Some(1979),
        });
        summary.record(&Outcome::Skipped {
            title: "Arrival".into(),
        });
        summary.record(&Outcome::NotFound);
        summary.record(&Outcome::TimedOut);
        summary.record(&Outcome::Failed {
            reason: "boom".into(),
        });

        assert_eq!(summary.added, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.not_found, 1);
        assert_eq!(summary.timed_out, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total(), 5);
        assert!(summary.has_issues());
    }

    #[test]
    fn test_expected_misses_are_not_issues() {
        let mut summary = RunSummary::default();
        summary.record(&Outcome::NotFound);
        summary.record(&Outcome::Skipped { title: "x".into() });
        assert!(!summary.has_issues());
    }
}
