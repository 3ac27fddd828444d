/// Format a sensitivity index with three decimals
pub fn format_index(value: f64) -> String {
    format!("{:.3}", value)
}

/// Format an optional index; missing values show as a dash
pub fn format_optional_index(value: Option<f64>) -> String {
    value.map(format_index).unwrap_or_else(|| "-".to_string())
}

/// Format an index with its confidence interval, e.g. `0.412 ± 0.031`
pub fn format_with_conf(value: f64, conf: Option<f64>) -> String {
    match conf {
        Some(c) => format!("{} ± {}", format_index(value), format_index(c)),
        None => format_index(value),
    }
}

/// Pad or cut `name` to exactly `width` characters
pub fn fit_label(name: &str, width: usize) -> String {
    let count = name.chars().count();
    if count <= width {
        format!("{:<width$}", name, width = width)
    } else if width == 0 {
        String::new()
    } else {
        let mut cut: String = name.chars().take(width - 1).collect();
        cut.push('…');
        cut
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_index() {
        assert_eq!(format_index(0.41234), "0.412");
        assert_eq!(format_index(0.0), "0.000");
        assert_eq!(format_optional_index(None), "-");
        assert_eq!(format_optional_index(Some(0.5)), "0.500");
    }

    #[test]
    fn test_format_with_conf() {
        assert_eq!(format_with_conf(0.412, Some(0.031)), "0.412 ± 0.031");
        assert_eq!(format_with_conf(0.412, None), "0.412");
    }

    #[test]
    fn test_fit_label() {
        assert_eq!(fit_label("k1", 4), "k1  ");
        assert_eq!(fit_label("k123456", 4), "k12…");
        assert_eq!(fit_label("abc", 0), "");
    }
}
