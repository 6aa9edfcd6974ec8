use crate::Path;

/// Read-only, path-based access to a parsed document.
///
/// This is the whole surface rights evaluation needs from an XML engine:
/// select nodes by [`Path`], then read their name, text and attributes.
/// [`crate::Document`] is the implementation shipped with this crate; other
/// engines (or hand-built fixtures) can implement it instead.
///
/// Implementations must return nodes in document order.
pub trait Query {
    /// A cheap handle to one element of the document.
    type Node: Copy;

    /// The document node. Absolute paths are evaluated from here.
    fn root(&self) -> Self::Node;

    /// All elements reached by walking `path` from `from`, in document order
    /// and without duplicates.
    fn find_all(&self, from: Self::Node, path: &Path) -> Vec<Self::Node>;

    /// The first element reached by walking `path` from `from`.
    fn find_first(&self, from: Self::Node, path: &Path) -> Option<Self::Node> {
        self.find_all(from, path).into_iter().next()
    }

    /// Local name of the element (namespace prefix removed).
    fn name(&self, node: Self::Node) -> &str;

    /// Concatenated text of the element and all of its descendants.
    fn text(&self, node: Self::Node) -> String;

    /// Value of the attribute with the given local name.
    fn attribute(&self, node: Self::Node, name: &str) -> Option<&str>;
}
