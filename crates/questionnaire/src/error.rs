use thiserror::Error;

/// Rejected input on the question screen. Never reaches the wizard.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("please enter a value")]
    Missing,
    #[error("\"{input}\" is not a number")]
    NotNumeric { input: String },
    #[error("value must be between {min} and {max}")]
    OutOfRange { min: f64, max: f64 },
    #[error("{value} is not one of the offered options")]
    UnknownOption { value: f64 },
}

/// Failure of a prediction exchange. `Display` is the best message available
/// for the user.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    #[error("{0}")]
    Transport(String),
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("unrecognized prediction response: {0}")]
    MalformedResponse(String),
    #[error("missing answer for {0}")]
    MissingAnswer(String),
    #[error("answer for {0} is not a finite number")]
    NonFiniteAnswer(String),
    #[error("invalid predictor configuration: {0}")]
    Config(String),
}

impl PredictionError {
    pub const GENERIC_SERVER_MESSAGE: &'static str = "Prediction failed";

    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Transport(_) => "transport",
            PredictionError::Server { .. } => "server",
            PredictionError::MalformedResponse(_) => "malformed_response",
            PredictionError::MissingAnswer(_) => "missing_answer",
            PredictionError::NonFiniteAnswer(_) => "non_finite_answer",
            PredictionError::Config(_) => "config",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("no question is being asked")]
    NotAsking,
    #[error("a prediction is already in flight")]
    PredictionPending,
    #[error("answer for {id} is not a finite number")]
    InvalidAnswer { id: String },
    #[error(transparent)]
    Features(#[from] PredictionError),
}
