//! Path-based access to XML documents.
//!
//! Rights evaluation only needs four things from an XML engine: find the
//! first node matching a path, find all of them, read a node's text, and read
//! one of its attributes. This crate states that contract as the [`Query`]
//! trait and ships one implementation, [`Document`], an owned element tree
//! read with [`quick_xml`].
//!
//! ```
//! use rights_xml::{Document, Path, Query};
//!
//! let document = Document::parse(
//!     r#"<rightsMetadata>
//!          <access type="read"><machine><world rule="no-download"/></machine></access>
//!        </rightsMetadata>"#,
//! ).unwrap();
//!
//! let world = document
//!     .find_first(document.root(), &Path::new("//rightsMetadata/access/machine/world"))
//!     .unwrap();
//! assert_eq!(document.attribute(world, "rule"), Some("no-download"));
//! ```

mod error;
pub use error::*;

mod path;
pub use path::*;

mod query;
pub use query::*;

mod document;
pub use document::*;
