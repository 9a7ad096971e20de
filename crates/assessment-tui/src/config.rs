use anyhow::Context;
pub(crate) use heartcheck_protocol::config::AppConfig;
use std::path::Path;

fn parse_config(raw: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(raw)?;
    Ok(config)
}

/// Reads the optional config file, then applies command line overrides.
/// Endpoint settings are checked when the prediction client is built.
pub(crate) fn load_config(
    path: Option<&Path>,
    endpoint: Option<&str>,
    timeout_ms: Option<u64>,
) -> anyhow::Result<AppConfig> {
    let mut config = match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            parse_config(&raw)
                .with_context(|| format!("failed to parse config {}", path.display()))?
        }
        None => AppConfig::default(),
    };
    if let Some(endpoint) = endpoint {
        config.predictor.base_url = endpoint.trim().to_string();
    }
    if let Some(timeout_ms) = timeout_ms {
        config.predictor.timeout_ms = timeout_ms;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use heartcheck_protocol::config::DEFAULT_BASE_URL;

    #[test]
    fn defaults_without_file() {
        let config = load_config(None, None, None).unwrap();
        assert_eq!(config.predictor.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.predictor.path, "/api/predict");
    }

    #[test]
    fn command_line_overrides_apply() {
        let config = load_config(None, Some(" https://risk.example.com "), Some(5_000)).unwrap();
        assert_eq!(config.predictor.base_url, "https://risk.example.com");
        assert_eq!(config.predictor.timeout_ms, 5_000);
    }

    #[test]
    fn file_values_survive_without_overrides() {
        let input = r#"
[predictor]
base_url = "https://risk.example.com"
timeout_ms = 2500
"#;
        let parsed = parse_config(input).unwrap();
        assert_eq!(parsed.predictor.base_url, "https://risk.example.com");
        assert_eq!(parsed.predictor.path, "/api/predict");
        assert_eq!(parsed.predictor.timeout_ms, 2500);
    }

    #[test]
    fn config_rejects_unknown_types() {
        let input = r#"
[predictor]
timeout_ms = "fast"
"#;
        assert!(parse_config(input).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Some(Path::new("does/not/exist.toml")), None, None).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
