use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use questionnaire::{Phase, Predictor};
use std::sync::Arc;
use tokio::sync::mpsc;

use super::app::AppState;
use super::events::{spawn_prediction, UiEvent};

/// Returns `true` when the user asked to quit.
pub(crate) fn handle_key_event(
    key: KeyEvent,
    app: &mut AppState,
    predictor: &Arc<dyn Predictor>,
    ui_tx: &mpsc::Sender<UiEvent>,
) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.confirm_quit {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return true,
            KeyCode::Esc => {
                app.confirm_quit = false;
                return false;
            }
            _ => {
                app.confirm_quit = false;
            }
        }
    }

    match app.phase() {
        Phase::Home => handle_home_key(key, app),
        Phase::Asking => handle_question_key(key, app, predictor, ui_tx),
        Phase::Result => handle_result_key(key, app),
    }
    false
}

fn handle_home_key(key: KeyEvent, app: &mut AppState) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        KeyCode::Enter | KeyCode::Char(' ') => app.start(),
        _ => {}
    }
}

fn handle_question_key(
    key: KeyEvent,
    app: &mut AppState,
    predictor: &Arc<dyn Predictor>,
    ui_tx: &mpsc::Sender<UiEvent>,
) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        KeyCode::Esc | KeyCode::Left => app.go_back(),
        KeyCode::Enter => {
            if let Some(features) = app.submit() {
                if let Some(session_id) = app.session_id {
                    spawn_prediction(Arc::clone(predictor), session_id, features, ui_tx.clone());
                }
            }
        }
        KeyCode::Backspace => app.pop_char(),
        KeyCode::Down | KeyCode::Char('j') if !app.current_is_numeric() => {
            app.select_next_option()
        }
        KeyCode::Up | KeyCode::Char('k') if !app.current_is_numeric() => app.select_prev_option(),
        KeyCode::Char(ch) => app.push_char(ch),
        _ => {}
    }
}

fn handle_result_key(key: KeyEvent, app: &mut AppState) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => app.confirm_quit = true,
        KeyCode::Char('r') | KeyCode::Char('R') if !app.wizard.pending() => app.reset(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use questionnaire::{Catalog, FeatureVector, InputKind, Prediction, PredictionError, Verdict};
    use std::sync::Mutex;
    use std::time::Duration;

    struct RecordingPredictor {
        calls: Mutex<Vec<FeatureVector>>,
        verdict: Verdict,
    }

    #[async_trait]
    impl Predictor for RecordingPredictor {
        async fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
            self.calls.lock().unwrap().push(features.clone());
            Ok(Prediction {
                verdict: self.verdict,
                probability: None,
            })
        }
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_keys(
        app: &mut AppState,
        predictor: &Arc<dyn Predictor>,
        ui_tx: &mpsc::Sender<UiEvent>,
        keys: &[KeyCode],
    ) {
        for code in keys {
            assert!(!handle_key_event(press(*code), app, predictor, ui_tx));
        }
    }

    fn text(value: &str) -> Vec<KeyCode> {
        let mut keys: Vec<KeyCode> = value.chars().map(KeyCode::Char).collect();
        keys.push(KeyCode::Enter);
        keys
    }

    #[tokio::test]
    async fn keyboard_run_issues_one_prediction() {
        let recording = Arc::new(RecordingPredictor {
            calls: Mutex::new(Vec::new()),
            verdict: Verdict::Risk,
        });
        let predictor: Arc<dyn Predictor> = recording.clone();
        let (ui_tx, mut ui_rx) = mpsc::channel(4);
        let mut app = AppState::new(Catalog::standard());

        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Enter]);
        type_keys(&mut app, &predictor, &ui_tx, &text("63"));
        // sex: keep "Male"; chest pain: move to "Atypical Angina".
        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Enter]);
        type_keys(
            &mut app,
            &predictor,
            &ui_tx,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Up, KeyCode::Enter],
        );
        type_keys(&mut app, &predictor, &ui_tx, &text("2.3"));
        type_keys(&mut app, &predictor, &ui_tx, &text("150"));
        type_keys(&mut app, &predictor, &ui_tx, &text("233"));
        assert_eq!(app.phase(), Phase::Result);

        // Repeated Enter while pending must not fire another request.
        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Enter, KeyCode::Enter]);

        let event = tokio::time::timeout(Duration::from_secs(5), ui_rx.recv())
            .await
            .expect("prediction settles")
            .expect("event");
        app.handle_event(event);
        assert_eq!(
            app.wizard.outcome().map(|p| p.verdict),
            Some(Verdict::Risk)
        );

        let calls = recording.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].values(), &[63.0, 1.0, 1.0, 2.3, 150.0, 233.0]);
    }

    #[tokio::test]
    async fn quit_requires_confirmation() {
        let predictor: Arc<dyn Predictor> = Arc::new(RecordingPredictor {
            calls: Mutex::new(Vec::new()),
            verdict: Verdict::NoRisk,
        });
        let (ui_tx, _ui_rx) = mpsc::channel(1);
        let mut app = AppState::new(Catalog::standard());
        assert!(!handle_key_event(
            press(KeyCode::Char('q')),
            &mut app,
            &predictor,
            &ui_tx
        ));
        assert!(app.confirm_quit);
        assert!(!handle_key_event(press(KeyCode::Esc), &mut app, &predictor, &ui_tx));
        assert!(!app.confirm_quit);
        handle_key_event(press(KeyCode::Char('q')), &mut app, &predictor, &ui_tx);
        assert!(handle_key_event(
            press(KeyCode::Char('q')),
            &mut app,
            &predictor,
            &ui_tx
        ));
    }

    #[tokio::test]
    async fn escape_goes_back_and_result_resets() {
        let predictor: Arc<dyn Predictor> = Arc::new(RecordingPredictor {
            calls: Mutex::new(Vec::new()),
            verdict: Verdict::NoRisk,
        });
        let (ui_tx, _ui_rx) = mpsc::channel(1);
        let mut app = AppState::new(Catalog::standard());
        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Enter]);
        type_keys(&mut app, &predictor, &ui_tx, &text("63"));
        assert_eq!(app.wizard.current_index(), 1);
        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Esc]);
        assert_eq!(app.wizard.current_index(), 0);

        app.reset();
        app.start();
        let session_id = app.session_id.unwrap();
        for _ in 0..6 {
            let question = app.wizard.current_question().unwrap();
            if let InputKind::Numeric { min, .. } = question.input {
                app.input = min.to_string();
            }
            app.submit();
        }
        app.handle_event(UiEvent::PredictionSettled {
            session_id,
            result: Ok(Prediction {
                verdict: Verdict::NoRisk,
                probability: None,
            }),
        });
        // A held Enter must not dismiss the verdict.
        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Enter]);
        assert_eq!(app.phase(), Phase::Result);
        assert!(app.wizard.outcome().is_some());
        type_keys(&mut app, &predictor, &ui_tx, &[KeyCode::Char('r')]);
        assert_eq!(app.phase(), Phase::Home);
    }
}
