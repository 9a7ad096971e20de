use questionnaire::{FeatureVector, Prediction, PredictionError, Predictor};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, Instrument};
use uuid::Uuid;

pub(crate) enum UiEvent {
    PredictionSettled {
        session_id: Uuid,
        result: Result<Prediction, PredictionError>,
    },
}

/// Runs the prediction off the UI loop and reports back on `ui_tx`.
pub(crate) fn spawn_prediction(
    predictor: Arc<dyn Predictor>,
    session_id: Uuid,
    features: FeatureVector,
    ui_tx: mpsc::Sender<UiEvent>,
) {
    let span = tracing::info_span!("prediction", session = %session_id);
    tokio::spawn(
        async move {
            let result = predictor.predict(&features).await;
            if ui_tx
                .send(UiEvent::PredictionSettled { session_id, result })
                .await
                .is_err()
            {
                debug!("ui closed before prediction settled");
            }
        }
        .instrument(span),
    );
}
