use time::{format_description::FormatItem, macros::format_description, Date};

/// Storage format of `dateOfBirth`.
pub const STORED_FORMAT: &[FormatItem<'static>] = format_description!("[month]/[day]/[year]");
/// Value format of an HTML date input.
pub const INPUT_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Stored dates written by hand may drop the leading zeros.
const STORED_LOOSE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month padding:none]/[day padding:none]/[year]");

/// Reads `M/D/YYYY` with or without zero padding, falling back to an ISO
/// date or the date part of an ISO timestamp.
pub fn parse_stored(value: &str) -> Option<Date> {
    let value = value.trim();
    if let Ok(date) = Date::parse(value, STORED_LOOSE_FORMAT) {
        return Some(date);
    }
    let (day, rest) = value.split_at_checked(10)?;
    if !rest.is_empty() && !rest.starts_with(['T', ' ']) {
        return None;
    }
    Date::parse(day, INPUT_FORMAT).ok()
}

/// Stored `MM/DD/YYYY` to a date-input value. Unparseable input gives an empty picker.
pub fn stored_to_input(value: &str) -> String {
    parse_stored(value)
        .and_then(|date| date.format(INPUT_FORMAT).ok())
        .unwrap_or_default()
}

/// Date-input value to stored `MM/DD/YYYY`; a cleared picker stores an empty string.
pub fn input_to_stored(value: &str) -> String {
    Date::parse(value.trim(), INPUT_FORMAT)
        .ok()
        .and_then(|date| date.format(STORED_FORMAT).ok())
        .unwrap_or_default()
}
