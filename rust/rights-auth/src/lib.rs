//! Access decisions from rightsMetadata documents.
//!
//! [`RightsAuth`] parses a rightsMetadata document once and answers
//! questions about it: can the world read this object, is this file limited
//! to a reading room, is the object still under embargo. Answers for a file
//! fall back to the object field by field when the file's access block does
//! not say otherwise.
//!
//! Parsed with [`RightsAuth::parse_for_index`], the rights also carry an
//! [`IndexSummary`]: terms describing the document's shape, validation
//! findings and a single [`Primary`] label for faceted search.
//!
//! ```
//! use rights_auth::{Primary, RightsAuth};
//!
//! let rights = RightsAuth::parse_for_index(
//!     r#"<rightsMetadata>
//!          <access type="discover"><machine><world/></machine></access>
//!          <access type="read">
//!            <machine><world/></machine>
//!          </access>
//!          <access type="read">
//!            <file>interview.doc</file>
//!            <machine><world rule="no-download"/></machine>
//!          </access>
//!        </rightsMetadata>"#,
//! )?;
//!
//! assert!(rights.world_unrestricted());
//! assert_eq!(rights.world_rights_for_file("interview.doc"), (true, Some("no-download")));
//! assert!(!rights.world_downloadable_for_file("interview.doc"));
//! assert_eq!(rights.index_summary()?.primary, Primary::World);
//! # Ok::<(), rights_auth::RightsError>(())
//! ```

pub mod vocab;

mod error;
pub use error::*;

mod config;
pub use config::*;

mod rights;
pub use rights::*;

mod embargo;
pub use embargo::*;

mod select;
pub use select::AccessType;

mod validate;
pub use validate::*;

mod element;
pub use element::*;

mod index;
pub use index::{Buckets, IndexSummary, Primary, QualifiedGrant, RuleQualifier, Term};

mod auth;
pub use auth::*;

mod parser;
mod query;
