//! SI-prefix formatting and parsing of component values

const PREFIXES: [(f64, &str); 8] = [
    (1e9, "G"),
    (1e6, "M"),
    (1e3, "k"),
    (1.0, ""),
    (1e-3, "m"),
    (1e-6, "µ"),
    (1e-9, "n"),
    (1e-12, "p"),
];

/// Format a magnitude with three decimals and an SI prefix, e.g. `4.700 kΩ`.
pub fn format_value(value: f64, unit: &str) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.3} {}", value, unit);
    }
    let magnitude = value.abs();
    let (scale, prefix) = PREFIXES
        .iter()
        .copied()
        .find(|(scale, _)| magnitude >= *scale)
        .unwrap_or(PREFIXES[PREFIXES.len() - 1]);
    format!("{:.3} {}{}", value / scale, prefix, unit)
}

/// Resistance in ohms.
pub fn format_ohms(value: f64) -> String {
    format_value(value, "Ω")
}

fn prefix_multiplier(prefix: &str) -> Option<f64> {
    match prefix {
        "p" => Some(1e-12),
        "n" => Some(1e-9),
        "u" | "µ" | "μ" => Some(1e-6),
        "m" => Some(1e-3),
        "" | "r" => Some(1.0),
        "k" => Some(1e3),
        "meg" | "M" => Some(1e6),
        "g" | "G" => Some(1e9),
        _ => None,
    }
}

/// Length of a leading `e[+-]digits` exponent, or 0 when there is none.
fn exponent_len(rest: &str) -> usize {
    let bytes = rest.as_bytes();
    if !matches!(bytes.first(), Some(b'e' | b'E')) {
        return 0;
    }
    let sign = usize::from(matches!(bytes.get(1), Some(b'+' | b'-')));
    let digits = bytes[1 + sign..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        0
    } else {
        1 + sign + digits
    }
}

/// Parse a component value such as `4.7k`, `100nF`, `2M2`, `4R7` or `1e3`.
///
/// Unit words (`ohm`, `Ω`, `F`, `Hz`, `V`, `A`) after the prefix are ignored.
/// A lowercase `m` is milli, `M` or `meg` is mega.
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(v) = text.parse::<f64>() {
        return Some(v);
    }

    // Leading number, including an exponent if present.
    let mut split = text
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-' || *c == '+'))
        .map(|(i, _)| i)
        .unwrap_or(text.len());
    split += exponent_len(&text[split..]);
    let (head, tail) = text.split_at(split);

    // RKM notation: the prefix letter replaces the decimal point (4k7, 2R2, R47).
    let tail_chars: Vec<char> = tail.chars().collect();
    if let Some(letter) = tail_chars.first() {
        let rest: String = tail_chars[1..].iter().collect();
        let rest_digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
        if !rest_digits.is_empty() && !head.contains('.') {
            let key = if *letter == 'R' || *letter == 'r' {
                "r".to_string()
            } else if *letter == 'M' {
                "M".to_string()
            } else {
                letter.to_lowercase().to_string()
            };
            if let Some(multiplier) = prefix_multiplier(&key) {
                let int_part = if head.is_empty() { "0" } else { head };
                let number: f64 = format!("{}.{}", int_part, rest_digits).parse().ok()?;
                return Some(number * multiplier);
            }
        }
    }

    let number: f64 = head.parse().ok()?;
    let unit = tail.trim();
    let lowered = unit.to_lowercase();
    let stripped = ["ohms", "ohm", "ω", "Ω", "hz", "f", "v", "a"]
        .iter()
        .find_map(|suffix| lowered.strip_suffix(suffix).map(|s| s.len()))
        .and_then(|len| unit.get(..len))
        .unwrap_or(unit)
        .trim();

    let multiplier = if stripped.eq_ignore_ascii_case("meg") || stripped == "M" {
        1e6
    } else if stripped == "G" {
        1e9
    } else {
        prefix_multiplier(&stripped.to_lowercase())?
    };
    Some(number * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= b.abs() * 1e-9
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(1000.0, "Ω"), "1.000 kΩ");
        assert_eq!(format_value(1000.0, "Hz"), "1.000 kHz");
        assert_eq!(format_value(0.000001, "F"), "1.000 µF");
        assert_eq!(format_value(1e9, "Ω"), "1.000 GΩ");
        assert_eq!(format_value(4.7, "Ω"), "4.700 Ω");
        assert_eq!(format_value(0.47, "Ω"), "470.000 mΩ");
        assert_eq!(format_value(22e-12, "F"), "22.000 pF");
    }

    #[test]
    fn test_parse_plain_and_suffixes() {
        assert!(close(parse_value("100").unwrap(), 100.0));
        assert!(close(parse_value("4.7k").unwrap(), 4_700.0));
        assert!(close(parse_value("10k").unwrap(), 10_000.0));
        assert!(close(parse_value("1M").unwrap(), 1_000_000.0));
        assert!(close(parse_value("1meg").unwrap(), 1_000_000.0));
        assert!(close(parse_value("100nF").unwrap(), 100e-9));
        assert!(close(parse_value("4.7uF").unwrap(), 4.7e-6));
        assert!(close(parse_value("10µF").unwrap(), 10e-6));
        assert!(close(parse_value("22pF").unwrap(), 22e-12));
        assert!(close(parse_value("2.2kohm").unwrap(), 2_200.0));
        assert!(close(parse_value("1e3").unwrap(), 1_000.0));
    }

    #[test]
    fn test_parse_exponent_with_unit() {
        assert!(close(parse_value("1e-9F").unwrap(), 1e-9));
        assert!(close(parse_value("2.2e3ohm").unwrap(), 2_200.0));
        assert!(close(parse_value("4.7E+3 Ω").unwrap(), 4_700.0));
        assert!(close(parse_value("1e3k").unwrap(), 1e6));
        assert_eq!(parse_value("1ex"), None);
    }

    #[test]
    fn test_parse_rkm() {
        assert!(close(parse_value("4k7").unwrap(), 4_700.0));
        assert!(close(parse_value("2R2").unwrap(), 2.2));
        assert!(close(parse_value("R47").unwrap(), 0.47));
        assert!(close(parse_value("1M5").unwrap(), 1_500_000.0));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("10q"), None);
    }
}
