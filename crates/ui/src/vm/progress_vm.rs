use services::SessionProgress;

/// Cells in the rendered bar.
pub const PROGRESS_WIDTH: usize = 30;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProgressVm {
    pub answered: usize,
    pub total: usize,
    pub filled: usize,
    pub width: usize,
    pub percent: u32,
}

impl ProgressVm {
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(progress: &SessionProgress, width: usize) -> Self {
        let fraction = progress.fraction().clamp(0.0, 1.0);
        let filled = ((fraction * width as f64).round() as usize).min(width);
        Self {
            answered: progress.answered.min(progress.total),
            total: progress.total,
            filled,
            width,
            percent: (fraction * 100.0).round() as u32,
        }
    }

    #[must_use]
    pub fn bar(&self) -> String {
        format!(
            "[{}{}]",
            "#".repeat(self.filled),
            "-".repeat(self.width - self.filled)
        )
    }

    #[must_use]
    pub fn label(&self) -> String {
        format!(
            "{} {}/{} ({}%)",
            self.bar(),
            self.answered,
            self.total,
            self.percent
        )
    }
}

impl From<&SessionProgress> for ProgressVm {
    fn from(progress: &SessionProgress) -> Self {
        Self::new(progress, PROGRESS_WIDTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(answered: usize, total: usize) -> SessionProgress {
        SessionProgress {
            total,
            answered,
            remaining: total - answered,
            is_complete: false,
        }
    }

    #[test]
    fn bar_is_proportional() {
        let vm = ProgressVm::new(&progress(1, 4), 8);
        assert_eq!(vm.bar(), "[##------]");
        assert_eq!(vm.label(), "[##------] 1/4 (25%)");
    }

    #[test]
    fn full_and_empty_bars() {
        assert_eq!(ProgressVm::new(&progress(0, 3), 4).bar(), "[----]");
        assert_eq!(ProgressVm::new(&progress(3, 3), 4).bar(), "[####]");
    }
}
