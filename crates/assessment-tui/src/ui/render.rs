use questionnaire::{InputKind, Phase, Question};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Clear, Gauge, List, ListItem, Paragraph, Wrap};

use super::app::AppState;
use super::format::{format_answer_summary, format_verdict, DISCLAIMER};
use super::text::{progress_label, range_hint, truncate_with_ellipsis};
use super::theme::Theme;

const APP_TITLE: &str = "Heart Disease Predictor";

pub(crate) fn draw_ui(frame: &mut ratatui::Frame, app: &mut AppState) {
    let theme = Theme::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(frame.area());

    let help = match app.phase() {
        Phase::Home => {
            draw_home(frame, &theme, chunks[0]);
            "Enter=begin  Q=quit  "
        }
        Phase::Asking => {
            draw_question(frame, &theme, app, chunks[0]);
            if app.current_is_numeric() {
                "Enter=next  Backspace=delete  Esc=back  Q=quit  "
            } else {
                "↑/↓=select  Enter=next  Esc=back  Q=quit  "
            }
        }
        Phase::Result => {
            draw_result(frame, &theme, app, chunks[0]);
            if app.wizard.pending() {
                "Q=quit  "
            } else {
                "R=start new assessment  Q=quit  "
            }
        }
    };

    let mut footer_spans = vec![Span::styled(help, theme.muted_style())];
    if app.confirm_quit {
        footer_spans.push(Span::styled(
            "press Q again to quit / Esc to cancel  ",
            theme.caution_style(),
        ));
    }
    let footer = Paragraph::new(Line::from(footer_spans)).block(theme.panel("Controls"));
    frame.render_widget(footer, chunks[1]);
}

fn draw_home(frame: &mut ratatui::Frame, theme: &Theme, area: Rect) {
    let text = Text::from(vec![
        Line::styled(APP_TITLE, theme.prompt_style()),
        Line::default(),
        Line::styled(
            "Welcome to our Heart Disease Risk Assessment tool. This application uses machine \
             learning to help you understand your potential risk for heart disease based on key \
             health indicators.",
            theme.body_style(),
        ),
        Line::default(),
        Line::styled(
            "We'll ask you a few simple questions about your health metrics. The assessment \
             takes just a few minutes and provides valuable insights about your cardiovascular \
             health.",
            theme.body_style(),
        ),
        Line::default(),
        Line::styled(
            "Important: This tool is for informational purposes only and should not replace \
             professional medical advice. Always consult with a healthcare provider for medical \
             concerns.",
            theme.caution_style(),
        ),
        Line::default(),
        Line::styled("Press Enter to begin.", theme.prompt_style()),
    ]);
    let widget = Paragraph::new(text)
        .block(theme.panel("Welcome"))
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn draw_question(frame: &mut ratatui::Frame, theme: &Theme, app: &mut AppState, area: Rect) {
    let Some(question) = app.wizard.current_question() else {
        return;
    };
    let total = app.wizard.catalog().len();
    let number = app.wizard.current_index() + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Min(4),
            Constraint::Length(3),
        ])
        .split(area);

    let gauge = Gauge::default()
        .block(theme.panel(APP_TITLE))
        .gauge_style(theme.progress_style())
        .ratio(number as f64 / total.max(1) as f64)
        .label(progress_label(number, total));
    frame.render_widget(gauge, chunks[0]);

    let prompt = Text::from(vec![
        Line::styled(question.label, theme.prompt_style()),
        Line::default(),
        Line::styled(question.description, theme.muted_style()),
    ]);
    let prompt_widget = Paragraph::new(prompt)
        .block(theme.panel("Question"))
        .wrap(Wrap { trim: true });
    frame.render_widget(Clear, chunks[1]);
    frame.render_widget(prompt_widget, chunks[1]);

    let answer_title = if app.wizard.is_last_question() {
        "Answer (Enter = Get Results)"
    } else {
        "Answer (Enter = Next)"
    };
    match question.input {
        InputKind::Numeric { placeholder, .. } => {
            draw_numeric_input(frame, theme, app, question, placeholder, answer_title, chunks[2])
        }
        InputKind::Choice { .. } => {
            draw_choice_input(frame, theme, app, question, answer_title, chunks[2])
        }
    }

    let status = if let Some(message) = &app.validation {
        Line::styled(message.clone(), theme.caution_style())
    } else if let Some(notice) = app.wizard.notice() {
        Line::styled(
            format!("Unable to get prediction: {notice}. Please try again later."),
            theme.failure_style(),
        )
    } else {
        Line::styled("", theme.muted_style())
    };
    let status_widget = Paragraph::new(status)
        .block(theme.panel("Status"))
        .wrap(Wrap { trim: true });
    frame.render_widget(status_widget, chunks[3]);
}

fn draw_numeric_input(
    frame: &mut ratatui::Frame,
    theme: &Theme,
    app: &AppState,
    question: &Question,
    placeholder: &str,
    title: &str,
    area: Rect,
) {
    let field = if app.input.is_empty() {
        Span::styled(placeholder.to_string(), theme.muted_style())
    } else {
        Span::styled(
            format!("{}_", app.input),
            theme.prompt_style(),
        )
    };
    let mut lines = vec![Line::from(vec![Span::styled("> ", theme.muted_style()), field])];
    if let Some(hint) = range_hint(&question.input) {
        lines.push(Line::styled(hint, theme.muted_style()));
    }
    let widget = Paragraph::new(Text::from(lines)).block(theme.panel(title));
    frame.render_widget(widget, area);
}

fn draw_choice_input(
    frame: &mut ratatui::Frame,
    theme: &Theme,
    app: &mut AppState,
    question: &Question,
    title: &str,
    area: Rect,
) {
    let block = theme.panel(title);
    let available = block.inner(area).width.saturating_sub(3) as usize;
    let items = question
        .options()
        .iter()
        .map(|option| ListItem::new(Line::from(truncate_with_ellipsis(option.label, available))))
        .collect::<Vec<_>>();
    let list = List::new(items)
        .block(block)
        .style(theme.body_style())
        .highlight_style(theme.selection_style())
        .highlight_symbol(">> ");
    frame.render_stateful_widget(list, area, &mut app.option_state);
}

fn draw_result(frame: &mut ratatui::Frame, theme: &Theme, app: &AppState, area: Rect) {
    if app.wizard.pending() {
        let widget = Paragraph::new(Text::from(vec![
            Line::default(),
            Line::styled("Analyzing your results...", theme.prompt_style()),
        ]))
        .block(theme.panel("Result"));
        frame.render_widget(widget, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(8), Constraint::Length(5)])
        .split(area);

    let verdict = app
        .wizard
        .outcome()
        .map(|prediction| format_verdict(theme, prediction, app.assessed_at))
        .unwrap_or_else(|| Text::from("no result"));
    let verdict_widget = Paragraph::new(verdict)
        .block(theme.panel("Result"))
        .wrap(Wrap { trim: true });
    frame.render_widget(verdict_widget, chunks[0]);

    let summary_block = theme.panel("Your answers");
    let summary_inner = summary_block.inner(chunks[1]);
    let summary = format_answer_summary(
        theme,
        app.wizard.catalog(),
        app.wizard.answers(),
        summary_inner.width,
    );
    frame.render_widget(Paragraph::new(summary).block(summary_block), chunks[1]);

    let disclaimer = Paragraph::new(Line::styled(DISCLAIMER, theme.muted_style()))
        .block(theme.panel("Disclaimer"))
        .wrap(Wrap { trim: true });
    frame.render_widget(disclaimer, chunks[2]);
}
