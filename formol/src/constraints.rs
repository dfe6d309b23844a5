//! Native constraint checks shared by the built-in renderers.

use formol_types::{FieldProps, ItemValue, Violation};

/// Parse a number out of a widget value.
///
/// Numbers pass through; strings are trimmed and parsed. Anything else is
/// not a number.
pub fn number(value: &ItemValue) -> Option<f64> {
    match value {
        ItemValue::Int(i) => Some(*i as f64),
        ItemValue::Float(f) if f.is_finite() => Some(*f),
        ItemValue::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Whether a required field is missing its value.
///
/// Returns `Ok(true)` when the value is blank and nothing else needs to be
/// checked (an optional, empty field is valid).
pub fn presence(value: Option<&ItemValue>, props: &FieldProps) -> Result<bool, Violation> {
    let blank = value.is_none_or(ItemValue::is_blank);
    if blank && props.required {
        return Err(Violation::ValueMissing);
    }
    Ok(blank)
}

/// Character-length bounds of a text value.
pub fn length(text: &str, props: &FieldProps) -> Result<(), Violation> {
    let count = text.chars().count();
    if let Some(min_length) = props.min_length
        && count < min_length
    {
        return Err(Violation::TooShort { min_length });
    }
    if let Some(max_length) = props.max_length
        && count > max_length
    {
        return Err(Violation::TooLong { max_length });
    }
    Ok(())
}

/// Range and step of a numeric value.
pub fn range(number: f64, props: &FieldProps) -> Result<(), Violation> {
    if let Some(min) = props.min
        && number < min
    {
        return Err(Violation::RangeUnderflow { min });
    }
    if let Some(max) = props.max
        && number > max
    {
        return Err(Violation::RangeOverflow { max });
    }
    if let Some(step) = props.step
        && step > 0.0
    {
        let steps = (number - props.min.unwrap_or(0.0)) / step;
        if (steps - steps.round()).abs() > 1e-9 * steps.abs().max(1.0) {
            return Err(Violation::StepMismatch { step });
        }
    }
    Ok(())
}

/// A single e-mail address: `local@domain`, no whitespace.
pub fn is_email(text: &str) -> bool {
    let Some((local, domain)) = text.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !text.chars().any(char::is_whitespace)
}

/// An absolute URL: a scheme, a colon and something after it.
pub fn is_url(text: &str) -> bool {
    let Some((scheme, rest)) = text.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        && !rest.is_empty()
        && !text.chars().any(char::is_whitespace)
}

/// A `#rrggbb` colour.
pub fn is_color(text: &str) -> bool {
    text.len() == 7
        && text.starts_with('#')
        && text[1..].chars().all(|c| c.is_ascii_hexdigit())
}

fn digits(text: &str, len: usize) -> Option<u32> {
    if text.len() != len || !text.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// `YYYY-MM`.
pub fn is_month(text: &str) -> bool {
    month_parts(text).is_some()
}

fn month_parts(text: &str) -> Option<(u32, u32)> {
    let (year, month) = text.split_once('-')?;
    let year = digits(year, 4)?;
    let month = digits(month, 2)?;
    (1..=12).contains(&month).then_some((year, month))
}

/// `YYYY-MM-DD`, with a day that exists in that month.
pub fn is_date(text: &str) -> bool {
    let Some((month, day)) = text.rsplit_once('-') else {
        return false;
    };
    let Some((year, month)) = month_parts(month) else {
        return false;
    };
    digits(day, 2).is_some_and(|day| day >= 1 && day <= days_in_month(year, month))
}

/// `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`.
pub fn is_time(text: &str) -> bool {
    let (clock, fraction) = match text.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (text, None),
    };
    let parts: Vec<&str> = clock.split(':').collect();
    let valid_clock = match parts.as_slice() {
        [h, m] => digits(h, 2).is_some_and(|h| h < 24) && digits(m, 2).is_some_and(|m| m < 60),
        [h, m, s] => {
            digits(h, 2).is_some_and(|h| h < 24)
                && digits(m, 2).is_some_and(|m| m < 60)
                && digits(s, 2).is_some_and(|s| s < 60)
        }
        _ => false,
    };
    let valid_fraction = fraction.is_none_or(|f| {
        !f.is_empty() && f.len() <= 3 && f.chars().all(|c| c.is_ascii_digit())
    });
    valid_clock && valid_fraction && (fraction.is_none() || parts.len() == 3)
}

/// `YYYY-MM-DDTHH:MM[:SS[.fff]]`.
pub fn is_datetime_local(text: &str) -> bool {
    text.split_once('T')
        .is_some_and(|(date, time)| is_date(date) && is_time(time))
}

/// `YYYY-Www`, week 01 to 53.
pub fn is_week(text: &str) -> bool {
    let Some((year, week)) = text.split_once("-W") else {
        return false;
    };
    digits(year, 4).is_some() && digits(week, 2).is_some_and(|w| (1..=53).contains(&w))
}
