use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The one condition that aborts a whole calculation. Carries the actual
    /// total so the caller can show the user what they entered. The `{:?}`
    /// rendering keeps a decimal point on whole totals ("110.0%"), the text
    /// the frontend already displays.
    #[error("Category weights must sum to 100% (currently {total:?}%)")]
    WeightSum { total: f64 },
}
