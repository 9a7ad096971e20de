use questionnaire::{Answers, Catalog, Prediction, Verdict};
use ratatui::text::{Line, Span, Text};
use std::time::SystemTime;

use super::text::{display_width, format_probability, pad_right, truncate_with_ellipsis};
use super::theme::Theme;

pub(super) const DISCLAIMER: &str = "Disclaimer: This assessment is for informational purposes \
only and is not a substitute for professional medical advice, diagnosis, or treatment. Always \
seek the advice of qualified health providers with any questions you may have regarding a \
medical condition.";

pub(crate) fn verdict_title(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::Risk => "Heart Disease Risk Detected",
        Verdict::NoRisk => "Low Risk of Heart Disease",
    }
}

pub(super) fn format_verdict(
    theme: &Theme,
    prediction: &Prediction,
    assessed_at: Option<SystemTime>,
) -> Text<'static> {
    let (message, advice) = match prediction.verdict {
        Verdict::Risk => (
            "Based on the information you provided, our assessment indicates a potential risk \
             for heart disease.",
            "Please consult with a healthcare professional for a comprehensive evaluation. \
             Early detection and proper medical guidance are crucial for maintaining heart \
             health.",
        ),
        Verdict::NoRisk => (
            "Based on the information you provided, our assessment indicates a low risk of \
             heart disease.",
            "However, it's still important to maintain regular check-ups with your healthcare \
             provider and follow a heart-healthy lifestyle.",
        ),
    };

    let mut lines = vec![
        Line::styled(
            verdict_title(prediction.verdict),
            theme.verdict_style(prediction.verdict),
        ),
        Line::default(),
        Line::styled(message, theme.body_style()),
        Line::default(),
        Line::styled(advice, theme.prompt_style()),
    ];
    if prediction.probability.is_some() || assessed_at.is_some() {
        lines.push(Line::default());
    }
    if let Some(probability) = prediction.probability {
        lines.push(Line::from(vec![
            Span::styled("model confidence: ", theme.muted_style()),
            Span::styled(
                format_probability(probability),
                theme.body_style(),
            ),
        ]));
    }
    if let Some(assessed_at) = assessed_at {
        lines.push(Line::from(vec![
            Span::styled("assessed at: ", theme.muted_style()),
            Span::styled(
                humantime::format_rfc3339_seconds(assessed_at).to_string(),
                theme.muted_style(),
            ),
        ]));
    }
    Text::from(lines)
}

/// One `id  value` row per question, in catalog order.
pub(super) fn format_answer_summary(
    theme: &Theme,
    catalog: &Catalog,
    answers: &Answers,
    width: u16,
) -> Text<'static> {
    let key_width = catalog
        .questions()
        .iter()
        .map(|question| display_width(question.id))
        .max()
        .unwrap_or(0)
        + 2;
    let value_width = (width as usize).saturating_sub(key_width).max(1);
    let lines = catalog
        .questions()
        .iter()
        .map(|question| {
            let value = match answers.get(question.id) {
                Some(value) => question
                    .option_label(*value)
                    .map(str::to_string)
                    .unwrap_or_else(|| value.to_string()),
                None => "-".to_string(),
            };
            Line::from(vec![
                Span::styled(pad_right(question.id, key_width), theme.muted_style()),
                Span::styled(
                    truncate_with_ellipsis(&value, value_width),
                    theme.body_style(),
                ),
            ])
        })
        .collect::<Vec<_>>();
    Text::from(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(text: &Text<'_>) -> Vec<String> {
        text.lines
            .iter()
            .map(|line| {
                line.spans
                    .iter()
                    .map(|span| span.content.as_ref())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn summary_uses_option_labels_and_catalog_order() {
        let answers: Answers = [("sex", 0.0), ("age", 63.0), ("oldpeak", 2.3)]
            .into_iter()
            .map(|(id, value)| (id.to_string(), value))
            .collect();
        let text = format_answer_summary(&Theme::default(), &Catalog::standard(), &answers, 40);
        let lines = plain(&text);
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "age      63");
        assert_eq!(lines[1], "sex      Female");
        assert_eq!(lines[2], "cp       -");
        assert_eq!(lines[3], "oldpeak  2.3");
    }

    #[test]
    fn verdict_includes_confidence_when_reported() {
        let prediction = Prediction {
            verdict: Verdict::Risk,
            probability: Some(0.83),
        };
        let lines = plain(&format_verdict(&Theme::default(), &prediction, None));
        assert_eq!(lines[0], "Heart Disease Risk Detected");
        assert!(lines.iter().any(|line| line == "model confidence: 83%"));
        assert!(!lines.iter().any(|line| line.starts_with("assessed at")));
    }
}
