use heartcheck_protocol::PredictRequest;
use std::collections::BTreeMap;

use crate::catalog::Catalog;
use crate::error::PredictionError;

/// Recorded answers keyed by question id.
pub type Answers = BTreeMap<String, f64>;

/// Answers laid out in catalog order, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Reads the answers in catalog order, never insertion order. Every
    /// question must have a finite answer.
    pub fn from_answers(catalog: &Catalog, answers: &Answers) -> Result<Self, PredictionError> {
        let mut values = Vec::with_capacity(catalog.len());
        for question in catalog.questions() {
            let value = answers
                .get(question.id)
                .copied()
                .ok_or_else(|| PredictionError::MissingAnswer(question.id.to_string()))?;
            if !value.is_finite() {
                return Err(PredictionError::NonFiniteAnswer(question.id.to_string()));
            }
            values.push(value);
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn to_request(&self) -> PredictRequest {
        PredictRequest {
            features: self.0.clone(),
        }
    }
}
