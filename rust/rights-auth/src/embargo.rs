//! Embargo release dates.

use chrono::format::ParseErrorKind;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::{EmbargoDateProblem, RightsError};

const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses the text of an `<embargoReleaseDate>` element.
///
/// Accepts RFC 3339 timestamps, `YYYY-MM-DDTHH:MM:SS` and
/// `YYYY-MM-DD HH:MM:SS` (read as UTC), and bare `YYYY-MM-DD` dates
/// (midnight UTC). Surrounding whitespace is ignored.
pub fn parse_release_date(text: &str) -> Result<DateTime<Utc>, RightsError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(malformed(text, EmbargoDateProblem::NoTimeInformation));
    }

    let mut failures = Vec::new();

    match DateTime::parse_from_rfc3339(trimmed) {
        Ok(instant) => return Ok(instant.with_timezone(&Utc)),
        Err(error) => failures.push(error.kind()),
    }

    for format in DATE_TIME_FORMATS {
        match NaiveDateTime::parse_from_str(trimmed, format) {
            Ok(instant) => return Ok(instant.and_utc()),
            Err(error) => failures.push(error.kind()),
        }
    }

    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
            failures.push(ParseErrorKind::OutOfRange);
        }
        Err(error) => failures.push(error.kind()),
    }

    let problem = if failures.contains(&ParseErrorKind::OutOfRange) {
        EmbargoDateProblem::OutOfRange
    } else {
        EmbargoDateProblem::Unrecognized
    };
    Err(malformed(text, problem))
}

fn malformed(text: &str, problem: EmbargoDateProblem) -> RightsError {
    RightsError::MalformedEmbargoDate {
        value: text.to_string(),
        problem,
    }
}
