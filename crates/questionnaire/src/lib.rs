pub mod catalog;
pub mod error;
pub mod features;
pub mod predictor;
pub mod wizard;

pub use catalog::{Catalog, ChoiceOption, InputKind, Question};
pub use error::{PredictionError, ValidationError, WizardError};
pub use features::{Answers, FeatureVector};
pub use heartcheck_protocol::Verdict;
pub use predictor::{HttpPredictor, Prediction, Predictor};
pub use wizard::{Effect, Intent, Phase, Wizard};
