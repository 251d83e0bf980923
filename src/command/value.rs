//! Numeric argument parsing with engineering suffixes.

/// Parse a number with an optional SI suffix (`10k`, `4.7u`, `1M`).
///
/// `m` is milli and `M` is mega.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    let last = text.chars().last()?;

    let multiplier = match last {
        'p' => 1e-12,
        'n' => 1e-9,
        'u' | 'µ' => 1e-6,
        'm' => 1e-3,
        'k' | 'K' => 1e3,
        'M' => 1e6,
        'G' => 1e9,
        _ => return text.parse::<f64>().ok(),
    };

    text[..text.len() - last.len_utf8()]
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_value() {
        assert_relative_eq!(parse_value("10k").unwrap(), 10_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_value("100n").unwrap(), 100e-9, max_relative = 1e-12);
        assert_relative_eq!(parse_value("4.7u").unwrap(), 4.7e-6, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1M").unwrap(), 1_000_000.0, max_relative = 1e-12);
        assert_relative_eq!(parse_value("2.2").unwrap(), 2.2, max_relative = 1e-12);
        assert_relative_eq!(parse_value("1e-9").unwrap(), 1e-9, max_relative = 1e-12);
        assert_relative_eq!(parse_value("-5").unwrap(), -5.0, max_relative = 1e-12);
    }

    #[test]
    fn test_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("k"), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("1.2.3"), None);
    }
}
