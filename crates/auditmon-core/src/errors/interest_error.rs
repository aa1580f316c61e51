/// Degree-of-interest model errors.
#[derive(Debug, thiserror::Error)]
pub enum InterestError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("timeline unavailable: {0}")]
    Timeline(#[from] super::SessionError),
}
