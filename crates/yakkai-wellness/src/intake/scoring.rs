//! Tolerant conversion of form text into numbers.
//!
//! Form answers are never validated: anything that is not a plain run of ASCII digits
//! counts as zero (or as absent, for counts).

fn digits_only(raw: &str) -> bool {
    !raw.is_empty() && raw.bytes().all(|byte| byte.is_ascii_digit())
}

/// Numeric value of a single answer, `0` when missing, non-numeric, or too large to parse.
pub fn answer_value(raw: Option<&str>) -> u64 {
    match raw {
        Some(value) if digits_only(value) => value.parse().unwrap_or(0),
        _ => 0,
    }
}

/// Sum of all answers. No per-answer bound is applied; the total saturates instead of
/// wrapping.
pub fn total_score<'a, I>(answers: I) -> i64
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let total = answers
        .into_iter()
        .map(answer_value)
        .fold(0u64, u64::saturating_add);
    i64::try_from(total).unwrap_or(i64::MAX)
}

/// Parses a headcount style field, `None` unless it is a representable digit string.
pub fn parse_count(raw: Option<&str>) -> Option<i64> {
    raw.filter(|value| digits_only(value))
        .and_then(|value| value.parse().ok())
}
