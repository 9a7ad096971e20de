mod cli;
mod config;
mod headless;
mod logging;
mod ui;

use crate::cli::Args;
use crate::config::load_config;
use crate::headless::{parse_answer_args, run_headless};
use crate::logging::init_tracing;
use crate::ui::terminal::Tui;
use crate::ui::{
    draw_ui, handle_key_event, restore_terminal, setup_terminal, verdict_title, AppState, UiEvent,
};
use anyhow::Context;
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use questionnaire::{Catalog, HttpPredictor, Predictor};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _file_guard = init_tracing(&args.log_dir, args.log_to_stderr)?;

    let config = load_config(args.config.as_deref(), args.endpoint.as_deref(), args.timeout_ms)?;
    let predictor = HttpPredictor::new(&config.predictor)
        .context("failed to build prediction client")?;
    info!(
        url = %predictor.url(),
        timeout_ms = config.predictor.timeout_ms,
        "heartcheck starting"
    );
    let catalog = Catalog::standard();

    if !args.answers.is_empty() {
        let answers = parse_answer_args(&catalog, &args.answers)?;
        let prediction = run_headless(catalog, &predictor, &answers).await?;
        println!(
            "{} (prediction={})",
            verdict_title(prediction.verdict),
            prediction.verdict.code()
        );
        return Ok(());
    }

    let predictor: Arc<dyn Predictor> = Arc::new(predictor);
    let mut terminal = setup_terminal()?;
    let result = run_ui(&mut terminal, catalog, predictor).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn run_ui(
    terminal: &mut Tui,
    catalog: Catalog,
    predictor: Arc<dyn Predictor>,
) -> anyhow::Result<()> {
    let (ui_tx, mut ui_rx) = mpsc::channel::<UiEvent>(16);
    let mut app = AppState::new(catalog);

    let tick_rate = Duration::from_millis(100);
    loop {
        while let Ok(event) = ui_rx.try_recv() {
            app.handle_event(event);
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press
                    && handle_key_event(key, &mut app, &predictor, &ui_tx)
                {
                    break;
                }
            }
        }
    }

    info!("heartcheck exiting");
    Ok(())
}
