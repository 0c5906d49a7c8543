use rust_decimal::Decimal;

/// Renders a currency amount as a whole number with spaces between
/// thousands: `163921954` becomes `"163 921 954"`. Fractions are truncated.
pub fn format_amount(amount: Decimal) -> String {
    let whole = amount.trunc().normalize().to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", whole.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }

    if grouped == "0" {
        return grouped;
    }
    format!("{sign}{grouped}")
}

/// Joins an image base URL and a path fragment with exactly one slash.
pub fn image_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(format_amount(dec!(163921954)), "163 921 954");
        assert_eq!(format_amount(dec!(1000)), "1 000");
        assert_eq!(format_amount(dec!(999)), "999");
        assert_eq!(format_amount(dec!(0)), "0");
    }

    #[test]
    fn keeps_the_sign_and_truncates() {
        assert_eq!(format_amount(dec!(-25000)), "-25 000");
        assert_eq!(format_amount(dec!(1234.99)), "1 234");
        assert_eq!(format_amount(dec!(-0.5)), "0");
    }

    #[test]
    fn image_urls_have_a_single_separator() {
        assert_eq!(
            image_url("https://image.tmdb.org/t/p/w185/", "/abc.jpg"),
            "https://image.tmdb.org/t/p/w185/abc.jpg"
        );
        assert_eq!(image_url("https://img", "abc.jpg"), "https://img/abc.jpg");
    }
}
