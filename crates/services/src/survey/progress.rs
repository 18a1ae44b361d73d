/// Aggregated view of survey progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowProgress {
    pub total: usize,
    pub answered: usize,
    /// 1-based position of the question on screen, if any.
    pub position: Option<usize>,
}
