// Time-related operations.
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

// Use this format for formatting and parsing dates.
static ISO_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

// Format a date for screen packages and terminal output.
pub fn date_to_iso_string(date: &Date) -> String {
    date.format(&ISO_FORMAT).unwrap()
}

// Format an optional date. An absent date becomes an empty string.
pub fn optional_date_to_iso_string(date: &Option<Date>) -> String {
    match date {
        Some(d) => date_to_iso_string(d),
        None => String::new(),
    }
}
