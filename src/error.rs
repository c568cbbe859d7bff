use thiserror::Error;

/// Everything the plotting core can reject.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum VizError {
    #[error("invalid bounds [{lo}, {hi}]")]
    InvalidBounds { lo: f64, hi: f64 },

    #[error("step size must be positive and finite, got {0}")]
    InvalidStep(f64),

    #[error("a Riemann sum needs at least one subinterval")]
    ZeroSubintervals,

    #[error("a curve needs at least one segment")]
    NoSegments,

    #[error("function is undefined at x = {x}")]
    Undefined { x: f64 },

    #[error("function '{0}' is not registered")]
    UnknownFunction(String),

    #[error("function '{0}' is already registered")]
    DuplicateFunction(String),

    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    #[error("invalid fraction {num}/{den}")]
    InvalidFraction { num: u32, den: u32 },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("element '{0}' not found")]
    MissingElement(String),

    #[error("graphics: {0}")]
    Graphics(String),
}

pub type Result<T> = std::result::Result<T, VizError>;
