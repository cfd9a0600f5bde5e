/// Longest accepted number argument, after commas and `$` are stripped.
const MAX_NUMBER_LEN: usize = 10;

/// Why a money argument was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberError {
    NotANumber,
    TooLarge,
}

impl NumberError {
    pub fn message(self) -> &'static str {
        match self {
            Self::NotANumber => "That is not a number!",
            Self::TooLarge => "That number is much too big! Use at most 10 characters",
        }
    }
}

/// Parse a money amount like `1,000`, `$25` or `-3.5`, rounded to cents.
pub fn parse_number(raw: &str) -> Result<f64, NumberError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| *ch != ',')
        .collect::<String>()
        .trim_matches('$')
        .to_owned();

    let unsigned = cleaned.trim_start_matches('-');
    let digits_only = unsigned.replacen('.', "", 1);
    if digits_only.is_empty() || !digits_only.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(NumberError::NotANumber);
    }

    if cleaned.len() > MAX_NUMBER_LEN {
        return Err(NumberError::TooLarge);
    }

    let value = cleaned.parse::<f64>().map_err(|_| NumberError::NotANumber)?;
    Ok((value * 100.0).round() / 100.0)
}

/// Parse a yes/no style argument.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "t" | "1" | "enable" | "on" => Some(true),
        "no" | "n" | "false" | "f" | "0" | "disable" | "off" => Some(false),
        _ => None,
    }
}

/// Render an amount without a trailing `.0` for whole numbers.
pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{amount:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_accept_separators_and_currency_sign() {
        assert_eq!(parse_number("1,000"), Ok(1000.0));
        assert_eq!(parse_number("$25"), Ok(25.0));
        assert_eq!(parse_number("-3.456"), Ok(-3.46));
        assert_eq!(parse_number(" 42 "), Ok(42.0));
    }

    #[test]
    fn numbers_reject_garbage_and_oversized_values() {
        assert_eq!(parse_number("abc"), Err(NumberError::NotANumber));
        assert_eq!(parse_number("1.2.3"), Err(NumberError::NotANumber));
        assert_eq!(parse_number(""), Err(NumberError::NotANumber));
        assert_eq!(parse_number("12345678901"), Err(NumberError::TooLarge));
    }

    #[test]
    fn length_limit_matches_the_error_message() {
        assert_eq!(parse_number("9999999999"), Ok(9_999_999_999.0));
        assert_eq!(parse_number("$9,999,999,999"), Ok(9_999_999_999.0));
        assert_eq!(parse_number("99999999999"), Err(NumberError::TooLarge));
        assert!(NumberError::TooLarge.message().contains(&MAX_NUMBER_LEN.to_string()));
    }

    #[test]
    fn bools_follow_the_usual_spellings() {
        assert_eq!(parse_bool("Yes"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("disable"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn amounts_drop_trailing_zero_fraction() {
        assert_eq!(format_amount(100.0), "100");
        assert_eq!(format_amount(2.5), "2.50");
        assert_eq!(format_amount(-7.0), "-7");
    }
}
