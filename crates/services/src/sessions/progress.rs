/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    pub total: usize,
    /// Zero-based index of the question on screen.
    pub current: usize,
    pub answered: usize,
    pub remaining: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// Share of the bank already passed, `current / total`, for a progress bar.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.is_complete {
            return 1.0;
        }
        if self.total == 0 {
            return 0.0;
        }
        self.current as f64 / self.total as f64
    }
}
