use questionnaire::InputKind;

pub(super) fn display_width(text: &str) -> usize {
    text.chars().count()
}

pub(super) fn pad_right(text: &str, width: usize) -> String {
    let mut out = text.to_string();
    let current = display_width(text);
    if current < width {
        out.extend(std::iter::repeat(' ').take(width - current));
    }
    out
}

pub(super) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }
    let chars = text.chars();
    let count = chars.clone().count();
    if count <= max_len {
        return text.to_string();
    }
    if max_len <= 3 {
        return chars.take(max_len).collect();
    }
    let keep = max_len - 3;
    let mut out: String = chars.take(keep).collect();
    out.push_str("...");
    out
}

/// Hint shown under a numeric field, e.g. `range 0 to 10, step 0.1`.
pub(super) fn range_hint(input: &InputKind) -> Option<String> {
    match input {
        InputKind::Numeric {
            min,
            max,
            step: Some(step),
            ..
        } => Some(format!("range {min} to {max}, step {step}")),
        InputKind::Numeric { min, max, .. } => Some(format!("range {min} to {max}")),
        InputKind::Choice { .. } => None,
    }
}

pub(super) fn progress_label(number: usize, total: usize) -> String {
    format!("Question {number} of {total}")
}

pub(super) fn format_probability(probability: f64) -> String {
    format!("{:.0}%", (probability * 100.0).clamp(0.0, 100.0))
}
