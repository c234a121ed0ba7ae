//! Batch planning for paced backend requests.
//!
//! The manager's background disk scanner runs asynchronously relative to its
//! API responses; sustained request bursts desynchronize its internal state
//! from what the API reports. Work is therefore split into fixed-size chunks
//! with a pause after every chunk except the last.

/// An ordered partition of `total` items into chunks of at most `batch_size`,
/// preserving enumeration order. Purely a scheduling artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    total: usize,
    batch_size: usize,
}

impl BatchPlan {
    /// Create a plan. `batch_size` is clamped to at least 1.
    pub fn new(total: usize, batch_size: usize) -> Self {
        Self {
            total,
            batch_size: batch_size.max(1),
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Number of batches: `ceil(total / batch_size)`.
    pub fn batch_count(&self) -> usize {
        self.total.div_ceil(self.batch_size)
    }

    /// Number of inter-batch pauses: one after every batch except the last.
    pub fn delay_count(&self) -> usize {
        self.batch_count().saturating_sub(1)
    }

    /// Half-open item range `[start, end)` covered by batch `index`.
    pub fn bounds(&self, index: usize) -> (usize, usize) {
        let start = index * self.batch_size;
        let end = (start + self.batch_size).min(self.total);
        (start, end)
    }

    /// Whether `index` is the final batch.
    pub fn is_last(&self, index: usize) -> bool {
        index + 1 >= self.batch_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_count_rounds_up() {
        assert_eq!(BatchPlan::new(10, 4).batch_count(), 3);
        assert_eq!(BatchPlan::new(8, 4).batch_count(), 2);
        assert_eq!(BatchPlan::new(3, 4).batch_count(), 1);
        assert_eq!(BatchPlan::new(0, 4).batch_count(), 0);
    }

    #[test]
    fn test_delay_count_is_batches_minus_one() {
        assert_eq!(BatchPlan::new(10, 4).delay_count(), 2);
        assert_eq!(BatchPlan::new(4, 4).delay_count(), 0);
        assert_eq!(BatchPlan::new(2, 4).delay_count(), 0);
        assert_eq!(BatchPlan::new(0, 4).delay_count(), 0);
    }

    #[test]
    fn test_bounds_cover_all_items_in_order() {
        let plan = BatchPlan::new(10, 4);
        assert_eq!(plan.bounds(0), (0, 4));
        assert_eq!(plan.bounds(1), (4, 8));
        assert_eq!(plan.bounds(2), (8, 10));
    }

    #[test]
    fn test_is_last() {
        let plan = BatchPlan::new(10, 4);
        assert!(!plan.is_last(0));
        assert!(!plan.is_last(1));
        assert!(plan.is_last(2));
    }

    #[test]
    fn test_zero_batch_size_is_clamped() {
        let plan = BatchPlan::new(3, 0);
        assert_eq!(plan.batch_size(), 1);
        assert_eq!(plan.batch_count(), 3);
    }
}
