pub const SHORT_HASH_LEN: usize = 7;

pub fn short_hash(id: &str) -> &str {
    match id.char_indices().nth(SHORT_HASH_LEN) {
        Some((idx, _)) => &id[..idx],
        None => id,
    }
}

/// Percentage with at most one decimal and trailing zeros trimmed, e.g. `37.5%`, `100%`.
pub fn format_percent(proportion: f64) -> String {
    let formatted = format!("{:.1}", proportion * 100.0);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed}%")
}

/// Truncate to `max` chars with an ellipsis when necessary.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

pub fn selection_label(count: usize) -> String {
    match count {
        0 => "No commits selected".to_string(),
        1 => "1 commit selected".to_string(),
        n => format!("{n} commits selected"),
    }
}
