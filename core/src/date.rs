//! The timestamp format WordPress uses for `date`, `date_gmt`, `modified`
//! and `modified_gmt`: `YYYY-MM-DDTHH:MM:SS`, no offset, no fraction.

use chrono::NaiveDateTime;
use serde::Serializer;

use crate::error::WpError;

pub const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Field names the mapper converts to `NaiveDateTime`.
pub const DATE_FIELDS: [&str; 4] = ["date", "date_gmt", "modified", "modified_gmt"];

pub fn parse(field: &str, value: &str) -> Result<NaiveDateTime, WpError> {
    NaiveDateTime::parse_from_str(value, FORMAT).map_err(|_| WpError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

pub fn format(value: &NaiveDateTime) -> String {
    value.format(FORMAT).to_string()
}

pub(crate) fn serialize_option<S: Serializer>(
    value: &Option<NaiveDateTime>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match value {
        Some(dt) => serializer.serialize_str(&format(dt)),
        None => serializer.serialize_none(),
    }
}
