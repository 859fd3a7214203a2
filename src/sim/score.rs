//! Score bookkeeping

/// Session score; starts at zero and never decreases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreTracker {
    total: u64,
}

impl ScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_delta(&mut self, delta: u64) {
        self.total = self.total.saturating_add(delta);
    }

    pub fn current(&self) -> u64 {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates() {
        let mut score = ScoreTracker::new();
        assert_eq!(score.current(), 0);
        score.apply_delta(5);
        score.apply_delta(5);
        assert_eq!(score.current(), 10);
    }

    #[test]
    fn test_saturates() {
        let mut score = ScoreTracker::new();
        score.apply_delta(u64::MAX);
        score.apply_delta(5);
        assert_eq!(score.current(), u64::MAX);
    }
}
