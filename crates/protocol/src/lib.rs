use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

pub mod config;

pub const PREDICT_PATH: &str = "/api/predict";
pub const FEATURE_COUNT: usize = 6;

/// Body of the single POST sent to the prediction endpoint.
///
/// Feature order is `[age, sex, cp, oldpeak, thalach, chol]`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PredictRequest {
    pub features: Vec<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    NoRisk,
    Risk,
}

impl Verdict {
    /// `0` and `1` in any JSON spelling (`1`, `1.0`); anything else is no verdict.
    pub fn from_code(code: &Number) -> Option<Self> {
        match code.as_f64() {
            Some(value) if value == 0.0 => Some(Verdict::NoRisk),
            Some(value) if value == 1.0 => Some(Verdict::Risk),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Verdict::NoRisk => 0,
            Verdict::Risk => 1,
        }
    }
}

impl From<bool> for Verdict {
    fn from(has_risk: bool) -> Self {
        if has_risk {
            Verdict::Risk
        } else {
            Verdict::NoRisk
        }
    }
}

/// Any body the endpoint may answer with. Every field is optional: success
/// bodies carry `prediction` and/or `has_risk`, failure bodies an `error`.
/// `probability` is kept as raw JSON so a stray type there cannot reject an
/// otherwise valid verdict.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PredictResponse {
    #[serde(default)]
    pub prediction: Option<Number>,
    #[serde(default)]
    pub has_risk: Option<bool>,
    #[serde(default)]
    pub probability: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictResponse {
    /// `prediction` wins when present; `has_risk` is the fallback.
    /// A `prediction` outside `0|1` is not a verdict.
    pub fn verdict(&self) -> Option<Verdict> {
        match &self.prediction {
            Some(code) => Verdict::from_code(code),
            None => self.has_risk.map(Verdict::from),
        }
    }

    pub fn probability(&self) -> Option<f64> {
        self.probability
            .as_ref()
            .and_then(Value::as_f64)
            .filter(|probability| probability.is_finite())
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
    }
}

/// Joins a base URL and a route without doubling or dropping the slash.
pub fn join_base_path(base: &str, path: &str) -> Result<String, String> {
    if base.trim().is_empty() {
        return Err("base_url is empty".to_string());
    }
    let normalized_base = base.trim().trim_end_matches('/');
    let normalized_path = if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    };
    Ok(format!("{normalized_base}{normalized_path}"))
}
