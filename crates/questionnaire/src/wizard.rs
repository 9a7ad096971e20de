use tracing::debug;

use crate::catalog::{Catalog, Question};
use crate::error::{PredictionError, WizardError};
use crate::features::{Answers, FeatureVector};
use crate::predictor::Prediction;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Home,
    Asking,
    Result,
}

#[derive(Debug)]
pub enum Intent {
    Start,
    SubmitAnswer(f64),
    GoBack,
    Settle(Result<Prediction, PredictionError>),
    Reset,
}

/// Work the caller must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    RequestPrediction(FeatureVector),
}

/// Owns the questionnaire session: phase, position, answers and the
/// outstanding prediction.
#[derive(Debug)]
pub struct Wizard {
    catalog: Catalog,
    phase: Phase,
    current_index: usize,
    answers: Answers,
    pending: bool,
    outcome: Option<Prediction>,
    notice: Option<String>,
}

impl Wizard {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            phase: Phase::Home,
            current_index: 0,
            answers: Answers::new(),
            pending: false,
            outcome: None,
            notice: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn answers(&self) -> &Answers {
        &self.answers
    }

    pub fn pending(&self) -> bool {
        self.pending
    }

    pub fn outcome(&self) -> Option<&Prediction> {
        self.outcome.as_ref()
    }

    /// Message left by the last failed prediction.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn current_question(&self) -> Option<&'static Question> {
        if self.phase != Phase::Asking {
            return None;
        }
        self.catalog.get(self.current_index)
    }

    /// Previously recorded answer for the question on screen, used to
    /// pre-fill the input after going back.
    pub fn current_answer(&self) -> Option<f64> {
        self.current_question()
            .and_then(|question| self.answers.get(question.id).copied())
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index == self.catalog.last_index()
    }

    pub fn dispatch(&mut self, intent: Intent) -> Result<Option<Effect>, WizardError> {
        match intent {
            Intent::Start => {
                self.start();
                Ok(None)
            }
            Intent::SubmitAnswer(value) => self.submit_answer(value),
            Intent::GoBack => {
                self.go_back();
                Ok(None)
            }
            Intent::Settle(result) => {
                self.settle(result);
                Ok(None)
            }
            Intent::Reset => {
                self.reset();
                Ok(None)
            }
        }
    }

    pub fn start(&mut self) -> bool {
        if self.phase != Phase::Home || self.catalog.is_empty() {
            return false;
        }
        self.phase = Phase::Asking;
        self.current_index = 0;
        self.answers.clear();
        self.outcome = None;
        self.notice = None;
        debug!(questions = self.catalog.len(), "wizard started");
        true
    }

    /// Records the answer for the current question and advances. On the last
    /// question this moves to `Result` and hands back the prediction to run.
    pub fn submit_answer(&mut self, value: f64) -> Result<Option<Effect>, WizardError> {
        if self.pending {
            return Err(WizardError::PredictionPending);
        }
        let question = self.current_question().ok_or(WizardError::NotAsking)?;
        if !value.is_finite() {
            return Err(WizardError::InvalidAnswer {
                id: question.id.to_string(),
            });
        }
        self.answers.insert(question.id.to_string(), value);
        self.notice = None;

        if !self.is_last_question() {
            self.current_index += 1;
            debug!(index = self.current_index, "wizard advanced");
            return Ok(None);
        }

        let features = FeatureVector::from_answers(&self.catalog, &self.answers)?;
        self.phase = Phase::Result;
        self.pending = true;
        self.outcome = None;
        debug!(answers = self.answers.len(), "wizard awaiting prediction");
        Ok(Some(Effect::RequestPrediction(features)))
    }

    pub fn go_back(&mut self) -> bool {
        if self.phase != Phase::Asking || self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Applies the result of the prediction started by the final answer.
    /// A failure sends the user back to the last question to resubmit.
    pub fn settle(&mut self, result: Result<Prediction, PredictionError>) -> bool {
        if !self.pending {
            return false;
        }
        self.pending = false;
        match result {
            Ok(prediction) => {
                self.outcome = Some(prediction);
            }
            Err(err) => {
                self.outcome = None;
                self.notice = Some(err.to_string());
                self.phase = Phase::Asking;
                self.current_index = self.catalog.last_index();
            }
        }
        true
    }

    pub fn reset(&mut self) {
        self.phase = Phase::Home;
        self.current_index = 0;
        self.answers.clear();
        self.pending = false;
        self.outcome = None;
        self.notice = None;
    }
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(Catalog::standard())
    }
}
