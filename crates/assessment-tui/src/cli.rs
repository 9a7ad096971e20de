use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "heartcheck",
    version,
    about = "Heart disease risk questionnaire backed by a remote prediction endpoint"
)]
pub(crate) struct Args {
    /// Optional TOML file with a [predictor] section.
    #[arg(long)]
    pub(crate) config: Option<PathBuf>,
    /// Base URL of the prediction service, overrides the config file.
    #[arg(long)]
    pub(crate) endpoint: Option<String>,
    #[arg(long)]
    pub(crate) timeout_ms: Option<u64>,
    #[arg(long, default_value = "logs")]
    pub(crate) log_dir: PathBuf,
    #[arg(long, default_value_t = false)]
    pub(crate) log_to_stderr: bool,
    /// Answer a question without the TUI, e.g. `--answer age=63`.
    /// Supplying any answer runs headless and requires all of them.
    #[arg(long = "answer", value_name = "ID=VALUE")]
    pub(crate) answers: Vec<String>,
}
