//! Date extraction from file path strings.
//!
//! This module recognizes calendar dates embedded anywhere in a path, in
//! either the `YYYY-MM-DD` or the `YYYYMMDD` form, and validates them with
//! real calendar semantics before accepting them.

use chrono::NaiveDate;

/// Extracts the leftmost valid calendar date embedded in the given string.
///
/// The string is scanned left to right. At every position holding an ASCII
/// digit a candidate is attempted: four year digits, an optional single dash,
/// two month digits, an optional single dash, and two day digits. A candidate
/// whose digits do not form a real calendar date (month outside 1-12, day
/// outside the month's range, with leap years handled) is discarded and the
/// scan resumes at the next position, so an invalid run earlier in the string
/// never hides a valid date later in it.
///
/// # Arguments
///
/// * `input` - An arbitrary string, typically a file path
///
/// # Returns
///
/// The first (leftmost) valid date found, or `None` if the string contains
/// no valid date. The function is total: it never fails on empty, short, or
/// binary-garbage inputs.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use datewalk::extract::extract_date;
///
/// let date = extract_date("logs/main_2018-05-05.log");
/// assert_eq!(date, NaiveDate::from_ymd_opt(2018, 5, 5));
///
/// // The compact form is recognized as well
/// assert_eq!(extract_date("dump-20180505.sql"), NaiveDate::from_ymd_opt(2018, 5, 5));
///
/// // February 30th is not a real date
/// assert_eq!(extract_date("main_2018-02-30.log"), None);
/// ```
pub fn extract_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();

    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        if let Some(date) = candidate_at(bytes, start) {
            return Some(date);
        }
    }

    None
}

/// Attempts to read and validate one date candidate starting at `start`.
///
/// The window must contain exactly eight digits, with at most one dash after
/// the year digits and at most one dash after the month digits. Any other
/// byte inside the window rejects the candidate.
fn candidate_at(bytes: &[u8], start: usize) -> Option<NaiveDate> {
    let mut pos = start;

    let year = read_digits(bytes, &mut pos, 4)?;
    skip_separator(bytes, &mut pos);
    let month = read_digits(bytes, &mut pos, 2)?;
    skip_separator(bytes, &mut pos);
    let day = read_digits(bytes, &mut pos, 2)?;

    NaiveDate::from_ymd_opt(year as i32, month, day)
}

/// Reads exactly `count` consecutive ASCII digits at `*pos`, advancing it.
fn read_digits(bytes: &[u8], pos: &mut usize, count: usize) -> Option<u32> {
    let mut value: u32 = 0;
    for _ in 0..count {
        let byte = *bytes.get(*pos)?;
        if !byte.is_ascii_digit() {
            return None;
        }
        value = value * 10 + u32::from(byte - b'0');
        *pos += 1;
    }
    Some(value)
}

/// Consumes at most one dash separator at `*pos`.
fn skip_separator(bytes: &[u8], pos: &mut usize) {
    if bytes.get(*pos) == Some(&b'-') {
        *pos += 1;
    }
}
