//! Post dates are plain `YYYY-MM-DD` strings on the wire and on disk.
use chrono::NaiveDate;

pub const POST_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a post date, accepting only the zero-padded `YYYY-MM-DD` shape of a
/// real calendar day.
pub fn parse_post_date(raw: &str) -> Option<NaiveDate> {
    let bytes = raw.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }

    NaiveDate::parse_from_str(raw, POST_DATE_FORMAT).ok()
}
