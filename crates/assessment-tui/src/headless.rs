use anyhow::Context;
use questionnaire::{Catalog, Effect, Prediction, Predictor, Wizard};
use std::collections::BTreeMap;
use tracing::info;

/// Splits `id=value` arguments, rejecting ids the catalog does not know.
pub(crate) fn parse_answer_args(
    catalog: &Catalog,
    args: &[String],
) -> anyhow::Result<BTreeMap<String, String>> {
    let mut answers = BTreeMap::new();
    for arg in args {
        let (id, value) = arg
            .split_once('=')
            .with_context(|| format!("answer must look like id=value, got {arg:?}"))?;
        let id = id.trim();
        if catalog.position(id).is_none() {
            let known: Vec<_> = catalog.questions().iter().map(|q| q.id).collect();
            anyhow::bail!("unknown question {id:?}; expected one of {}", known.join(", "));
        }
        if answers.insert(id.to_string(), value.trim().to_string()).is_some() {
            anyhow::bail!("question {id:?} answered more than once");
        }
    }
    Ok(answers)
}

/// Walks the wizard with pre-supplied answers and runs the single
/// prediction, without a terminal UI.
pub(crate) async fn run_headless(
    catalog: Catalog,
    predictor: &dyn Predictor,
    answers: &BTreeMap<String, String>,
) -> anyhow::Result<Prediction> {
    let mut wizard = Wizard::new(catalog);
    wizard.start();

    let mut effect = None;
    for question in catalog.questions() {
        let raw = answers
            .get(question.id)
            .with_context(|| format!("missing --answer {}=<value>", question.id))?;
        let value = question
            .parse_input(raw)
            .with_context(|| format!("invalid answer for {}", question.id))?;
        effect = wizard.submit_answer(value)?;
    }

    let Some(Effect::RequestPrediction(features)) = effect else {
        anyhow::bail!("questionnaire did not complete");
    };
    info!(mode = "headless", "requesting prediction");
    let result = predictor.predict(&features).await;
    wizard.settle(result.clone());
    result.map_err(|err| anyhow::anyhow!("Unable to get prediction: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use questionnaire::{FeatureVector, PredictionError, Verdict};
    use std::sync::Mutex;

    struct CannedPredictor {
        result: Result<Prediction, PredictionError>,
        seen: Mutex<Vec<Vec<f64>>>,
    }

    #[async_trait]
    impl Predictor for CannedPredictor {
        async fn predict(&self, features: &FeatureVector) -> Result<Prediction, PredictionError> {
            self.seen.lock().unwrap().push(features.values().to_vec());
            self.result.clone()
        }
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    fn full_answers() -> BTreeMap<String, String> {
        parse_answer_args(
            &Catalog::standard(),
            &args(&[
                "chol=233",
                "thalach=150",
                "oldpeak=2.3",
                "cp=0",
                "sex=1",
                "age=63",
            ]),
        )
        .unwrap()
    }

    #[test]
    fn rejects_malformed_and_unknown_answers() {
        let catalog = Catalog::standard();
        assert!(parse_answer_args(&catalog, &args(&["age"])).is_err());
        assert!(parse_answer_args(&catalog, &args(&["bp=120"])).is_err());
        assert!(parse_answer_args(&catalog, &args(&["age=63", "age=64"])).is_err());
    }

    #[tokio::test]
    async fn sends_catalog_ordered_features() {
        let predictor = CannedPredictor {
            result: Ok(Prediction {
                verdict: Verdict::Risk,
                probability: None,
            }),
            seen: Mutex::new(Vec::new()),
        };
        let prediction = run_headless(Catalog::standard(), &predictor, &full_answers())
            .await
            .unwrap();
        assert_eq!(prediction.verdict, Verdict::Risk);
        assert_eq!(
            *predictor.seen.lock().unwrap(),
            vec![vec![63.0, 1.0, 0.0, 2.3, 150.0, 233.0]]
        );
    }

    #[tokio::test]
    async fn missing_answer_never_reaches_endpoint() {
        let predictor = CannedPredictor {
            result: Err(PredictionError::Transport("unused".to_string())),
            seen: Mutex::new(Vec::new()),
        };
        let mut answers = full_answers();
        answers.remove("thalach");
        let err = run_headless(Catalog::standard(), &predictor, &answers)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("missing --answer thalach"));
        assert!(predictor.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn out_of_range_answer_is_rejected() {
        let predictor = CannedPredictor {
            result: Err(PredictionError::Transport("unused".to_string())),
            seen: Mutex::new(Vec::new()),
        };
        let mut answers = full_answers();
        answers.insert("chol".to_string(), "900".to_string());
        let err = run_headless(Catalog::standard(), &predictor, &answers)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid answer for chol"));
    }

    #[tokio::test]
    async fn endpoint_failure_surfaces_message() {
        let predictor = CannedPredictor {
            result: Err(PredictionError::Server {
                status: 500,
                message: "model unavailable".to_string(),
            }),
            seen: Mutex::new(Vec::new()),
        };
        let err = run_headless(Catalog::standard(), &predictor, &full_answers())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unable to get prediction: model unavailable"
        );
    }
}
