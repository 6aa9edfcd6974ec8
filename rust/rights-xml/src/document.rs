use std::str::FromStr;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use tracing::debug;

use crate::{Axis, NameTest, Path, Query, XmlError};

/// Handle to an element of a [`Document`].
///
/// Handles are allocated in document order, so comparing two handles from
/// the same document compares their positions in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// The synthetic document node that owns the top-level elements.
const ROOT: NodeId = NodeId(0);

#[derive(Debug, Clone)]
enum Content {
    Element(NodeId),
    Text(String),
}

#[derive(Debug, Clone)]
struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    content: Vec<Content>,
    children: Vec<NodeId>,
}

impl Element {
    fn new(name: String, attributes: Vec<(String, String)>) -> Self {
        Self {
            name,
            attributes,
            content: Vec::new(),
            children: Vec::new(),
        }
    }
}

/// An owned element tree read from XML text.
///
/// Reading is forgiving about structure the way a recovering parser is: end
/// tags that close nothing are dropped, an end tag closes every element
/// opened after the matching start tag, and elements still open at the end
/// of input are closed implicitly. Text and attribute values holding
/// undeclared entities or a bare `&` are kept as written. Comments, processing instructions and the
/// XML declaration are discarded. Element and attribute names are stored
/// without their namespace prefix.
#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
}

impl Document {
    /// Reads `xml` into a tree.
    pub fn parse(xml: &str) -> Result<Self, XmlError> {
        let mut reader = Reader::from_str(xml);
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;

        let mut document = Document {
            elements: vec![Element::new(String::new(), Vec::new())],
        };
        let mut open = vec![ROOT];

        loop {
            let position = reader.buffer_position();
            let parent = open.last().copied().unwrap_or(ROOT);
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let id = document.push_element(parent, &start, position)?;
                    open.push(id);
                }
                Ok(Event::Empty(start)) => {
                    document.push_element(parent, &start, position)?;
                }
                Ok(Event::End(end)) => {
                    let name = decode_name(end.local_name().as_ref())?;
                    match open
                        .iter()
                        .rposition(|id| *id != ROOT && document.elements[id.0].name == name)
                    {
                        Some(depth) => open.truncate(depth),
                        None => {
                            debug!(position, name = %name, "Ignoring unmatched end tag");
                        }
                    }
                }
                Ok(Event::Text(text)) => {
                    let text = match text.unescape() {
                        Ok(text) => text.into_owned(),
                        Err(error) => {
                            debug!(
                                position,
                                %error,
                                "Keeping text with unresolved references as written"
                            );
                            String::from_utf8_lossy(&text).into_owned()
                        }
                    };
                    document.push_text(parent, text);
                }
                Ok(Event::CData(cdata)) => {
                    let text = String::from_utf8(cdata.into_inner().into_owned())
                        .map_err(|error| XmlError::Encoding(error.to_string()))?;
                    document.push_text(parent, text);
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(error) => {
                    return Err(XmlError::Syntax {
                        position: reader.error_position(),
                        message: error.to_string(),
                    });
                }
            }
        }

        if open.len() > 1 {
            debug!(unclosed = open.len() - 1, "Closing elements left open at end of input");
        }

        Ok(document)
    }

    /// Number of elements in the tree, not counting the document node.
    pub fn len(&self) -> usize {
        self.elements.len() - 1
    }

    /// Returns `true` if the input contained no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element children of `node`, in document order.
    pub fn children(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.element(node).children.iter().copied()
    }

    fn element(&self, node: NodeId) -> &Element {
        &self.elements[node.0]
    }

    fn push_element(
        &mut self,
        parent: NodeId,
        start: &BytesStart<'_>,
        position: u64,
    ) -> Result<NodeId, XmlError> {
        let name = decode_name(start.local_name().as_ref())?;
        let mut attributes = Vec::new();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| XmlError::Attribute {
                position,
                message: error.to_string(),
            })?;
            if attribute.key.as_namespace_binding().is_some() {
                continue;
            }
            let key = decode_name(attribute.key.local_name().as_ref())?;
            let value = match attribute.unescape_value() {
                Ok(value) => value.into_owned(),
                Err(error) => {
                    debug!(
                        position,
                        key = %key,
                        %error,
                        "Keeping attribute with unresolved references as written"
                    );
                    String::from_utf8_lossy(&attribute.value).into_owned()
                }
            };
            attributes.push((key, value));
        }

        let id = NodeId(self.elements.len());
        self.elements.push(Element::new(name, attributes));
        let parent = &mut self.elements[parent.0];
        parent.children.push(id);
        parent.content.push(Content::Element(id));
        Ok(id)
    }

    fn push_text(&mut self, parent: NodeId, text: String) {
        // Text outside of any element (stray characters around the root)
        // carries no meaning.
        if parent != ROOT {
            self.elements[parent.0].content.push(Content::Text(text));
        }
    }

    fn collect_descendants(&self, node: NodeId, test: &NameTest, found: &mut Vec<NodeId>) {
        let mut stack: Vec<NodeId> = self.element(node).children.iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            let element = self.element(next);
            if test.matches(&element.name) {
                found.push(next);
            }
            stack.extend(element.children.iter().rev().copied());
        }
    }
}

impl FromStr for Document {
    type Err = XmlError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        Document::parse(xml)
    }
}

impl Query for Document {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        ROOT
    }

    fn find_all(&self, from: NodeId, path: &Path) -> Vec<NodeId> {
        let mut current = vec![from];
        for step in path.steps() {
            let mut next = Vec::new();
            for node in &current {
                match step.axis {
                    Axis::Child => next.extend(
                        self.children(*node)
                            .filter(|child| step.test.matches(&self.element(*child).name)),
                    ),
                    Axis::Descendant => self.collect_descendants(*node, &step.test, &mut next),
                }
            }
            next.sort_unstable();
            next.dedup();
            current = next;
        }
        current
    }

    fn name(&self, node: NodeId) -> &str {
        &self.element(node).name
    }

    fn text(&self, node: NodeId) -> String {
        let mut text = String::new();
        let mut stack: Vec<&Content> = self.element(node).content.iter().rev().collect();
        while let Some(content) = stack.pop() {
            match content {
                Content::Text(value) => text.push_str(value),
                Content::Element(child) => {
                    stack.extend(self.element(*child).content.iter().rev());
                }
            }
        }
        text
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<&str> {
        self.element(node)
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn decode_name(bytes: &[u8]) -> Result<String, XmlError> {
    std::str::from_utf8(bytes)
        .map(str::to_string)
        .map_err(|error| XmlError::Encoding(error.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use testresult::TestResult;

    fn names(document: &Document, nodes: &[NodeId]) -> Vec<String> {
        nodes
            .iter()
            .map(|node| document.name(*node).to_string())
            .collect()
    }

    #[test]
    fn it_selects_descendants_in_document_order() -> TestResult {
        let document = Document::parse(
            r#"<wrapper>
                 <rightsMetadata>
                   <access type="discover"><machine><world/></machine></access>
                   <access type="read"><machine><group>stanford</group></machine></access>
                 </rightsMetadata>
               </wrapper>"#,
        )?;

        let access = document.find_all(document.root(), &Path::new("//rightsMetadata/access"));
        assert_eq!(access.len(), 2);
        assert_eq!(document.attribute(access[0], "type"), Some("discover"));
        assert_eq!(document.attribute(access[1], "type"), Some("read"));

        let leaves = document.find_all(document.root(), &Path::new("//machine/*"));
        assert_eq!(names(&document, &leaves), vec!["world", "group"]);
        Ok(())
    }

    #[test]
    fn it_does_not_duplicate_nested_matches() -> TestResult {
        let document = Document::parse("<a><b><b><c/></b></b></a>")?;
        let found = document.find_all(document.root(), &Path::new("//b//c"));
        assert_eq!(found.len(), 1);
        let bs = document.find_all(document.root(), &Path::new("//b"));
        assert_eq!(bs.len(), 2);
        Ok(())
    }

    #[test]
    fn it_evaluates_relative_paths_from_a_context_node() -> TestResult {
        let document = Document::parse(
            "<access><file>a.doc</file><file>b.doc</file><machine><world/></machine></access>",
        )?;
        let access = document
            .find_first(document.root(), &Path::new("/access"))
            .ok_or("no access element")?;
        let files = document.find_all(access, &Path::new("file"));
        let texts: Vec<String> = files.iter().map(|file| document.text(*file)).collect();
        assert_eq!(texts, vec!["a.doc", "b.doc"]);
        assert!(document.find_first(access, &Path::new("machine/world")).is_some());
        assert!(document.find_first(access, &Path::new("world")).is_none());
        Ok(())
    }

    #[test]
    fn it_concatenates_descendant_text() -> TestResult {
        let document = Document::parse("<a>one<b>two</b><![CDATA[three]]>&amp;</a>")?;
        let a = document
            .find_first(document.root(), &Path::new("a"))
            .ok_or("no a element")?;
        assert_eq!(document.text(a), "onetwothree&");
        Ok(())
    }

    #[test]
    fn it_strips_namespace_prefixes() -> TestResult {
        let document =
            Document::parse(r#"<r:rights xmlns:r="urn:x"><r:group r:rule="x">s</r:group></r:rights>"#)?;
        let group = document
            .find_first(document.root(), &Path::new("//rights/group"))
            .ok_or("no group element")?;
        assert_eq!(document.attribute(group, "rule"), Some("x"));
        assert_eq!(document.attribute(group, "r"), None);
        Ok(())
    }

    #[test]
    fn it_recovers_from_unbalanced_end_tags() -> TestResult {
        let document = Document::parse("<a><b><c>text</b></d><e/></a>")?;
        let b_children = document.find_all(document.root(), &Path::new("//b/*"));
        assert_eq!(names(&document, &b_children), vec!["c"]);
        let a_children = document.find_all(document.root(), &Path::new("/a/*"));
        assert_eq!(names(&document, &a_children), vec!["b", "e"]);
        Ok(())
    }

    #[test]
    fn it_closes_elements_open_at_end_of_input() -> TestResult {
        let document = Document::parse("<a><b>")?;
        assert_eq!(document.len(), 2);
        Ok(())
    }

    #[test]
    fn it_treats_plain_text_as_an_empty_document() -> TestResult {
        let document: Document = "this is not xml at all".parse()?;
        assert!(document.is_empty());
        Ok(())
    }

    #[test]
    fn it_rejects_undecodable_markup() {
        let result = Document::parse("<a><!-- never closed");
        assert!(matches!(result, Err(XmlError::Syntax { .. })));
    }

    #[test]
    fn it_keeps_unresolved_references_as_written() -> TestResult {
        let document = Document::parse(
            r#"<a><b>&copy; 2020 Smith</b><c>Smith & Sons</c><d note="AT&T">x &lt; y</d></a>"#,
        )?;
        let [b, c, d] = ["//b", "//c", "//d"]
            .map(|path| document.find_first(document.root(), &Path::new(path)));
        let (b, c, d) = (b.ok_or("no b")?, c.ok_or("no c")?, d.ok_or("no d")?);
        assert_eq!(document.text(b), "&copy; 2020 Smith");
        assert_eq!(document.text(c), "Smith & Sons");
        assert_eq!(document.text(d), "x < y");
        assert_eq!(document.attribute(d, "note"), Some("AT&T"));
        Ok(())
    }
}
