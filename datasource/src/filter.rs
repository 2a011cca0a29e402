use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Could not interpolate filters into {target}: {reason}")]
pub struct FilterInterpolationError {
    pub target: String,
    pub reason: String,
}

/// Expands dashboard template expressions (filter variables) in a target string.
pub trait FilterInterpolator: Send + Sync {
    fn apply_filter_to_target(&self, target: &str) -> Result<String, FilterInterpolationError>;
}

/// Used when a dashboard defines no template filters.
pub struct NoFilters;

impl FilterInterpolator for NoFilters {
    fn apply_filter_to_target(&self, target: &str) -> Result<String, FilterInterpolationError> {
        Ok(target.to_string())
    }
}
