use questionnaire::Verdict;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders};

/// Colors for the questionnaire screens, keyed by what they mark rather
/// than by hue.
pub(crate) struct Theme {
    frame: Color,
    heading: Color,
    body: Color,
    muted: Color,
    prompt: Color,
    caution: Color,
    low_risk: Color,
    high_risk: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            frame: Color::DarkGray,
            heading: Color::Blue,
            body: Color::White,
            muted: Color::Gray,
            prompt: Color::Cyan,
            caution: Color::Yellow,
            low_risk: Color::Green,
            high_risk: Color::Red,
        }
    }
}

impl Theme {
    fn bold(color: Color) -> Style {
        Style::default().fg(color).add_modifier(Modifier::BOLD)
    }

    pub(crate) fn panel<'a>(&self, title: &'a str) -> Block<'a> {
        Block::default()
            .title(Span::styled(title, Self::bold(self.heading)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.frame))
    }

    pub(crate) fn body_style(&self) -> Style {
        Style::default().fg(self.body)
    }

    pub(crate) fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Prompts, typed answers and key hints.
    pub(crate) fn prompt_style(&self) -> Style {
        Self::bold(self.prompt)
    }

    /// Highlighted row in a choice list.
    pub(crate) fn selection_style(&self) -> Style {
        Self::bold(self.body).bg(self.frame)
    }

    pub(crate) fn caution_style(&self) -> Style {
        Self::bold(self.caution)
    }

    pub(crate) fn failure_style(&self) -> Style {
        Self::bold(self.high_risk)
    }

    pub(crate) fn progress_style(&self) -> Style {
        Style::default().fg(self.prompt).bg(self.frame)
    }

    pub(crate) fn verdict_style(&self, verdict: Verdict) -> Style {
        match verdict {
            Verdict::Risk => Self::bold(self.high_risk),
            Verdict::NoRisk => Self::bold(self.low_risk),
        }
    }
}
