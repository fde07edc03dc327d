//! Circuit designers
//!
//! Each designer generates candidates from a catalog, scores them against a
//! target and keeps the best few ranked by ascending error.

pub mod divider;
pub mod led;
pub mod rc_filter;
pub mod regulator;

pub use divider::{design_divider, DividerCandidate};
pub use led::{design_led, LedDesign};
pub use rc_filter::{design_rc_filter, RcCandidate};
pub use regulator::{design_regulator, RegulatorCandidate, R1_CANDIDATES};

/// Ranked list that keeps at most `capacity` entries with the lowest score.
/// Entries with equal scores keep insertion order.
pub(crate) struct TopK<T> {
    capacity: usize,
    entries: Vec<(f64, T)>,
}

impl<T> TopK<T> {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity + 1),
        }
    }

    pub(crate) fn push(&mut self, score: f64, item: T) {
        if score.is_nan() {
            return;
        }
        let index = self.entries.partition_point(|(s, _)| *s <= score);
        if index >= self.capacity {
            return;
        }
        self.entries.insert(index, (score, item));
        self.entries.truncate(self.capacity);
    }

    pub(crate) fn into_vec(self) -> Vec<T> {
        self.entries.into_iter().map(|(_, item)| item).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_k_keeps_lowest() {
        let mut top = TopK::new(3);
        for (score, name) in [(5.0, "a"), (1.0, "b"), (3.0, "c"), (0.5, "d"), (9.0, "e")] {
            top.push(score, name);
        }
        assert_eq!(top.into_vec(), vec!["d", "b", "c"]);
    }

    #[test]
    fn test_top_k_is_stable() {
        let mut top = TopK::new(2);
        top.push(1.0, "first");
        top.push(1.0, "second");
        top.push(1.0, "third");
        assert_eq!(top.into_vec(), vec!["first", "second"]);
    }

    #[test]
    fn test_top_k_zero_capacity() {
        let mut top = TopK::new(0);
        top.push(1.0, ());
        assert!(top.into_vec().is_empty());
    }
}
