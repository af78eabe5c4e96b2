/// Format a float as a currency amount with thousands separators: ¥1,234.56
pub fn money(val: f64, symbol: &str) -> String {
    let negative = val < 0.0;
    let cents = format!("{:.2}", val.abs());
    let (int_part, dec_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut with_commas = String::new();
    for (i, c) in int_part.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative && (int_part != "0" || dec_part != "00") {
        format!("-{symbol}{with_commas}.{dec_part}")
    } else {
        format!("{symbol}{with_commas}.{dec_part}")
    }
}

/// Hours without a trailing `.0` for whole numbers: 20, 7.5
pub fn hours(val: f64) -> String {
    if val.fract() == 0.0 {
        format!("{val:.0}")
    } else {
        let s = format!("{val:.2}");
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(1234.56, "$"), "$1,234.56");
        assert_eq!(money(-500.00, "$"), "-$500.00");
        assert_eq!(money(0.0, "\u{a5}"), "\u{a5}0.00");
        assert_eq!(money(1000000.99, "\u{a5}"), "\u{a5}1,000,000.99");
        assert_eq!(money(42.10, "$"), "$42.10");
    }

    #[test]
    fn test_money_negative_zero() {
        assert_eq!(money(-0.001, "$"), "$0.00");
    }

    #[test]
    fn test_hours_formatting() {
        assert_eq!(hours(20.0), "20");
        assert_eq!(hours(7.5), "7.5");
        assert_eq!(hours(1.25), "1.25");
    }
}
