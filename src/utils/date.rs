use chrono::NaiveDate;

pub const FORM_DATE_FMT: &str = "%Y-%m-%d";

// ISO-8601 date form fields, empty string treated as not provided
pub fn parse_optional_date(value: &str) -> Result<Option<NaiveDate>, chrono::ParseError> {
    if value.trim().is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(value.trim(), FORM_DATE_FMT).map(Some)
}
