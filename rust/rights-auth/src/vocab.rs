//! Element, attribute and value names of the rightsMetadata vocabulary.

/// Container element holding all access blocks.
pub const RIGHTS_METADATA: &str = "rightsMetadata";
/// An access block; its `type` attribute says what it grants.
pub const ACCESS: &str = "access";
/// Names a file an access block is scoped to.
pub const FILE: &str = "file";
/// Machine-readable grants of an access block.
pub const MACHINE: &str = "machine";

/// Grant to everybody.
pub const WORLD: &str = "world";
/// Grant to a named group.
pub const GROUP: &str = "group";
/// Grant to a named agent (usually an application).
pub const AGENT: &str = "agent";
/// Grant to a physical location.
pub const LOCATION: &str = "location";
/// Explicit absence of any grant.
pub const NONE: &str = "none";
/// Controlled digital lending.
pub const CDL: &str = "cdl";
/// Date before which read access is suppressed.
pub const EMBARGO_RELEASE_DATE: &str = "embargoReleaseDate";

/// Attribute selecting the kind of access block.
pub const TYPE: &str = "type";
/// Attribute qualifying a grant.
pub const RULE: &str = "rule";

/// The only group the rights logic interprets.
pub const STANFORD: &str = "stanford";
/// Rule value that withholds downloads from an otherwise granted scope.
pub const NO_DOWNLOAD: &str = "no-download";

/// Returns `true` if a `<group>` text names the stanford group.
///
/// The test is an ASCII case-insensitive containment check, so
/// `"East-Stanford-Archive"` qualifies just like `"Stanford"`.
pub fn is_stanford_group(text: &str) -> bool {
    text.to_ascii_lowercase().contains(STANFORD)
}
