/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Completed share in `[0, 1]`; an empty session counts as done.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        (self.answered.min(self.total) as f64) / (self.total as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_is_answered_over_total() {
        let p = SessionProgress {
            total: 4,
            answered: 1,
            remaining: 3,
            is_complete: false,
        };
        assert!((p.fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_progress_does_not_divide_by_zero() {
        let p = SessionProgress {
            total: 0,
            answered: 0,
            remaining: 0,
            is_complete: true,
        };
        assert!((p.fraction() - 1.0).abs() < f64::EPSILON);
    }
}
