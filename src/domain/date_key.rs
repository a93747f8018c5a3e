/// Canonical date-key codec
///
/// Every completed day is identified by a `YYYY-MM-DD` string key. Keys are
/// anchored to UTC calendar days, and all day arithmetic goes through
/// `NaiveDate` so that subtracting two keys is never off by one across a
/// daylight-saving transition.

use chrono::NaiveDate;

use crate::domain::DomainError;

/// Format a calendar day as its canonical `YYYY-MM-DD` key
pub fn to_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a canonical date key back into a calendar day
///
/// The key must match the exact `YYYY-MM-DD` shape and name a real calendar
/// day. Out-of-range months or days are rejected, never auto-normalized.
pub fn parse_key(key: &str) -> Result<NaiveDate, DomainError> {
    let bytes = key.as_bytes();

    // Shape check first: 10 chars, dashes at positions 4 and 7, digits elsewhere
    let well_formed = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());

    if !well_formed {
        return Err(DomainError::InvalidKey(format!(
            "expected YYYY-MM-DD, got '{}'",
            key
        )));
    }

    let year: i32 = key[0..4]
        .parse()
        .map_err(|_| DomainError::InvalidKey(format!("bad year in '{}'", key)))?;
    let month: u32 = key[5..7]
        .parse()
        .map_err(|_| DomainError::InvalidKey(format!("bad month in '{}'", key)))?;
    let day: u32 = key[8..10]
        .parse()
        .map_err(|_| DomainError::InvalidKey(format!("bad day in '{}'", key)))?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DomainError::InvalidKey(format!("'{}' is not a real calendar day", key))
    })
}

/// Return the key for the calendar day immediately before the given key
pub fn day_before(key: &str) -> Result<String, DomainError> {
    let date = parse_key(key)?;
    let previous = date.pred_opt().ok_or_else(|| {
        DomainError::InvalidKey(format!("no day before '{}'", key))
    })?;
    Ok(to_key(previous))
}
