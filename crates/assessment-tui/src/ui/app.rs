use questionnaire::{
    Catalog, Effect, FeatureVector, InputKind, Phase, Prediction, PredictionError, Question,
    ValidationError, Wizard,
};
use ratatui::widgets::ListState;
use std::time::SystemTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::events::UiEvent;

const MAX_INPUT_LEN: usize = 12;

pub(crate) struct AppState {
    pub(crate) wizard: Wizard,
    pub(crate) input: String,
    pub(crate) option_selected: usize,
    pub(crate) option_state: ListState,
    pub(crate) validation: Option<String>,
    pub(crate) session_id: Option<Uuid>,
    pub(crate) assessed_at: Option<SystemTime>,
    pub(crate) confirm_quit: bool,
}

impl AppState {
    pub(crate) fn new(catalog: Catalog) -> Self {
        Self {
            wizard: Wizard::new(catalog),
            input: String::new(),
            option_selected: 0,
            option_state: ListState::default(),
            validation: None,
            session_id: None,
            assessed_at: None,
            confirm_quit: false,
        }
    }

    pub(crate) fn phase(&self) -> Phase {
        self.wizard.phase()
    }

    pub(crate) fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::PredictionSettled { session_id, result } => {
                if self.session_id != Some(session_id) {
                    warn!(session = %session_id, "dropping prediction for a finished session");
                    return;
                }
                self.settle(result);
            }
        }
    }

    pub(crate) fn start(&mut self) {
        if !self.wizard.start() {
            return;
        }
        let session_id = Uuid::new_v4();
        self.session_id = Some(session_id);
        self.assessed_at = None;
        info!(session = %session_id, "assessment started");
        self.sync_input();
    }

    pub(crate) fn push_char(&mut self, ch: char) {
        if !self.current_is_numeric() {
            return;
        }
        let accepted = ch.is_ascii_digit() || ch == '.' || (ch == '-' && self.input.is_empty());
        if accepted && self.input.len() < MAX_INPUT_LEN {
            self.input.push(ch);
            self.validation = None;
        }
    }

    pub(crate) fn pop_char(&mut self) {
        self.input.pop();
        self.validation = None;
    }

    pub(crate) fn select_next_option(&mut self) {
        let count = self.current_options_len();
        if count == 0 {
            return;
        }
        self.option_selected = (self.option_selected + 1) % count;
        self.sync_option_selection();
    }

    pub(crate) fn select_prev_option(&mut self) {
        let count = self.current_options_len();
        if count == 0 {
            return;
        }
        if self.option_selected == 0 {
            self.option_selected = count - 1;
        } else {
            self.option_selected -= 1;
        }
        self.sync_option_selection();
    }

    /// Validates the on-screen answer and hands it to the wizard. Returns
    /// the features to send once the last question is answered.
    pub(crate) fn submit(&mut self) -> Option<FeatureVector> {
        let question = self.wizard.current_question()?;
        let value = match self.read_answer(question) {
            Ok(value) => value,
            Err(err) => {
                self.validation = Some(err.to_string());
                return None;
            }
        };
        match self.wizard.submit_answer(value) {
            Ok(Some(Effect::RequestPrediction(features))) => {
                info!(
                    session = %self.session_id.unwrap_or_default(),
                    "answers complete, requesting prediction"
                );
                tracing::debug!(features = ?features.values(), "feature vector");
                self.validation = None;
                Some(features)
            }
            Ok(None) => {
                self.sync_input();
                None
            }
            Err(err) => {
                self.validation = Some(err.to_string());
                None
            }
        }
    }

    pub(crate) fn go_back(&mut self) {
        if self.wizard.go_back() {
            self.sync_input();
        }
    }

    pub(crate) fn settle(&mut self, result: Result<Prediction, PredictionError>) {
        let failed = result.is_err();
        if !self.wizard.settle(result) {
            return;
        }
        if failed {
            self.sync_input();
        } else {
            self.assessed_at = Some(SystemTime::now());
        }
    }

    pub(crate) fn reset(&mut self) {
        if let Some(session_id) = self.session_id.take() {
            info!(session = %session_id, "assessment reset");
        }
        self.wizard.reset();
        self.input.clear();
        self.option_selected = 0;
        self.option_state.select(None);
        self.validation = None;
        self.assessed_at = None;
        self.confirm_quit = false;
    }

    pub(crate) fn current_is_numeric(&self) -> bool {
        self.wizard
            .current_question()
            .is_some_and(|question| !question.is_choice())
    }

    fn read_answer(&self, question: &Question) -> Result<f64, ValidationError> {
        match question.input {
            InputKind::Numeric { .. } => question.parse_input(&self.input),
            InputKind::Choice { options } => options
                .get(self.option_selected)
                .map(|option| option.value)
                .ok_or(ValidationError::Missing),
        }
    }

    fn current_options_len(&self) -> usize {
        self.wizard
            .current_question()
            .map(|question| question.options().len())
            .unwrap_or(0)
    }

    /// Pre-fills the input for the question now on screen.
    fn sync_input(&mut self) {
        self.validation = None;
        let recorded = self.wizard.current_answer();
        self.input = recorded.map(|value| value.to_string()).unwrap_or_default();
        self.option_selected = match (self.wizard.current_question(), recorded) {
            (Some(question), Some(value)) => question
                .options()
                .iter()
                .position(|option| option.value == value)
                .unwrap_or(0),
            _ => 0,
        };
        self.sync_option_selection();
    }

    fn sync_option_selection(&mut self) {
        if self.current_options_len() == 0 {
            self.option_state.select(None);
        } else {
            self.option_state.select(Some(self.option_selected));
        }
    }
}
