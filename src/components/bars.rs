/// Create a proportional bar string, `value` scaled against `max`
pub fn scaled_bar(value: f64, max: f64, width: usize) -> String {
    const FULL: char = '█';
    const PARTIAL: &[char] = &[' ', '▏', '▎', '▍', '▌', '▋', '▊', '▉', '█'];
    const EMPTY: char = '░';

    let ratio = if max > 0.0 {
        (value / max).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let filled_width = ratio * width as f64;
    let full_blocks = filled_width as usize;
    let remainder = filled_width - full_blocks as f64;
    let partial_idx = (remainder * 8.0).round() as usize;

    let mut bar = String::new();

    for i in 0..width {
        if i < full_blocks {
            bar.push(FULL);
        } else if i == full_blocks && partial_idx > 0 {
            bar.push(PARTIAL[partial_idx]);
        } else {
            bar.push(EMPTY);
        }
    }

    bar
}

/// Truncate a label to fit in the given width
pub fn truncate_label(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(max_len.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_bar_extremes() {
        assert_eq!(scaled_bar(0.0, 10.0, 4), "░░░░");
        assert_eq!(scaled_bar(10.0, 10.0, 4), "████");
    }

    #[test]
    fn test_scaled_bar_width_is_respected() {
        for value in [0.0, 3.3, 7.5, 10.0] {
            assert_eq!(scaled_bar(value, 10.0, 8).chars().count(), 8);
        }
    }

    #[test]
    fn test_scaled_bar_zero_max_is_empty() {
        assert_eq!(scaled_bar(5.0, 0.0, 4), "░░░░");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("toys", 10), "toys");
        assert_eq!(truncate_label("cama_mesa_banho", 8), "cama_me…");
    }
}
