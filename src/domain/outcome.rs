/// Drives which transient status the host shell shows after a submission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Success,
    Failure(String),
}

impl SubmissionOutcome {
    pub fn is_idle(&self) -> bool {
        matches!(self, SubmissionOutcome::Idle)
    }
}
