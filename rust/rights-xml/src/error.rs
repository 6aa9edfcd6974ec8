use thiserror::Error;

/// Errors that can occur while reading an XML document into a [`crate::Document`].
///
/// Only failures that leave no usable tree are reported. Unresolved entity
/// references, unbalanced end tags and elements left open at the end of
/// input are recovered from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum XmlError {
    /// The reader could not tokenize the input.
    #[error("Malformed XML at byte {position}: {message}")]
    Syntax {
        /// Byte offset into the input where reading stopped.
        position: u64,
        /// Description reported by the reader.
        message: String,
    },

    /// An element carried an attribute that could not be decoded.
    #[error("Malformed attribute at byte {position}: {message}")]
    Attribute {
        /// Byte offset of the element that carried the attribute.
        position: u64,
        /// Description reported by the reader.
        message: String,
    },

    /// A name or CDATA section could not be decoded as UTF-8.
    #[error("Failed to decode XML content: {0}")]
    Encoding(String),
}
