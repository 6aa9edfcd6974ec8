use std::fmt;

use rights_xml::XmlError;
use thiserror::Error;

/// Errors that can occur while parsing or querying rights metadata.
///
/// Missing elements and attributes are never errors; they read as
/// "not granted". The variants below are the only ways rights evaluation
/// refuses to answer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RightsError {
    /// The input could not be read as XML at all.
    #[error(transparent)]
    Xml(#[from] XmlError),

    /// An `<embargoReleaseDate>` is present but does not hold a date.
    ///
    /// Neither "embargoed" nor "not embargoed" is a safe guess, so parsing
    /// stops here instead of defaulting.
    #[error("Malformed embargo release date {value:?}: {problem}")]
    MalformedEmbargoDate {
        /// The element text as written.
        value: String,
        /// Why the text was rejected.
        problem: EmbargoDateProblem,
    },

    /// An index-derived answer was requested from rights parsed without
    /// index elements.
    #[error(
        "{operation} can only be answered when index elements were built; \
         construct with RightsAuth::parse_for_index or ParseConfig::for_index(true)"
    )]
    IndexNotBuilt {
        /// The method that was called.
        operation: &'static str,
    },
}

/// Why an embargo release date was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbargoDateProblem {
    /// The element is empty or whitespace.
    NoTimeInformation,
    /// A field is outside its calendar range (e.g. month 44).
    OutOfRange,
    /// The text is not in a recognised date or timestamp format.
    Unrecognized,
}

impl fmt::Display for EmbargoDateProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmbargoDateProblem::NoTimeInformation => write!(f, "no time information"),
            EmbargoDateProblem::OutOfRange => write!(f, "argument out of range"),
            EmbargoDateProblem::Unrecognized => write!(f, "unrecognized date format"),
        }
    }
}
