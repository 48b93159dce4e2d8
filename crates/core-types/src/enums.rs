use serde::{Deserialize, Serialize};

/// Decides what happens when a metric is mathematically undefined for the
/// given input, i.e. a correlation over a zero-variance series or the mean of
/// an empty temperature cohort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneratePolicy {
    /// Fail the whole computation with a typed error.
    #[default]
    Strict,
    /// Report the metric as absent (`None`) and keep going.
    Lenient,
}

impl DegeneratePolicy {
    pub fn is_lenient(&self) -> bool {
        matches!(self, DegeneratePolicy::Lenient)
    }
}
