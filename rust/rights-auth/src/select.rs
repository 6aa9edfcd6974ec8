//! Locating access blocks and their machine grants in a document.

use std::fmt;
use std::sync::LazyLock;

use rights_xml::{Path, Query};
use serde::{Deserialize, Serialize};

use crate::vocab::{ACCESS, EMBARGO_RELEASE_DATE, FILE, GROUP, MACHINE, RIGHTS_METADATA, RULE, TYPE};

static RIGHTS_METADATA_PATH: LazyLock<Path> =
    LazyLock::new(|| Path::new(&format!("//{RIGHTS_METADATA}")));
static ACCESS_PATH: LazyLock<Path> =
    LazyLock::new(|| Path::new(&format!("//{RIGHTS_METADATA}/{ACCESS}")));
static FILE_PATH: LazyLock<Path> = LazyLock::new(|| Path::new(FILE));
static MACHINE_PATH: LazyLock<Path> = LazyLock::new(|| Path::new(MACHINE));
static CHILDREN_PATH: LazyLock<Path> = LazyLock::new(|| Path::new("*"));
static DESCENDANTS_PATH: LazyLock<Path> = LazyLock::new(|| Path::new(".//*"));
static GROUP_PATH: LazyLock<Path> = LazyLock::new(|| Path::new(GROUP));
static EMBARGO_PATH: LazyLock<Path> =
    LazyLock::new(|| Path::new(&format!(".//{EMBARGO_RELEASE_DATE}")));

/// The two kinds of access an access block can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Whether the object can be found at all.
    Discover,
    /// Whether content can be retrieved.
    Read,
}

impl AccessType {
    /// The value of the `type` attribute naming this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessType::Discover => "discover",
            AccessType::Read => "read",
        }
    }
}

impl fmt::Display for AccessType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether an access block covers the object or lists files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Scope {
    Object,
    File,
    Any,
}

pub(crate) fn has_rights_metadata<D: Query>(document: &D) -> bool {
    document
        .find_first(document.root(), &RIGHTS_METADATA_PATH)
        .is_some()
}

/// Access blocks of the given type and scope, in document order, across
/// every `rightsMetadata` element.
pub(crate) fn access_blocks<D: Query>(
    document: &D,
    access: AccessType,
    scope: Scope,
) -> Vec<D::Node> {
    document
        .find_all(document.root(), &ACCESS_PATH)
        .into_iter()
        .filter(|block| document.attribute(*block, TYPE) == Some(access.as_str()))
        .filter(|block| {
            let lists_files = document.find_first(*block, &FILE_PATH).is_some();
            match scope {
                Scope::Object => !lists_files,
                Scope::File => lists_files,
                Scope::Any => true,
            }
        })
        .collect()
}

pub(crate) fn files<D: Query>(document: &D, block: D::Node) -> Vec<String> {
    document
        .find_all(block, &FILE_PATH)
        .into_iter()
        .map(|file| document.text(file))
        .collect()
}

/// `<machine>` elements of the given blocks, in document order.
pub(crate) fn machines<D: Query>(document: &D, blocks: &[D::Node]) -> Vec<D::Node> {
    blocks
        .iter()
        .flat_map(|block| document.find_all(*block, &MACHINE_PATH))
        .collect()
}

/// The object-level machines of one access type, pooled.
pub(crate) fn object_machines<D: Query>(document: &D, access: AccessType) -> Vec<D::Node> {
    machines(document, &access_blocks(document, access, Scope::Object))
}

/// Direct children of every machine, pooled in document order.
pub(crate) fn grants<D: Query>(document: &D, machines: &[D::Node]) -> Vec<D::Node> {
    machines
        .iter()
        .flat_map(|machine| document.find_all(*machine, &CHILDREN_PATH))
        .collect()
}

pub(crate) fn named<'a, D: Query>(
    document: &'a D,
    nodes: &'a [D::Node],
    name: &'a str,
) -> impl Iterator<Item = D::Node> + 'a {
    nodes
        .iter()
        .copied()
        .filter(move |node| document.name(*node) == name)
}

pub(crate) fn rule<D: Query>(document: &D, node: D::Node) -> Option<String> {
    document.attribute(node, RULE).map(str::to_string)
}

/// The rule of the first `<group>` nested in a `<cdl>` element.
pub(crate) fn lending_rule<D: Query>(document: &D, cdl: D::Node) -> Option<String> {
    document
        .find_first(cdl, &GROUP_PATH)
        .and_then(|group| rule(document, group))
}

/// The first `<embargoReleaseDate>` below any read machine, object or file
/// scoped.
pub(crate) fn embargo_release_date<D: Query>(document: &D) -> Option<D::Node> {
    let blocks = access_blocks(document, AccessType::Read, Scope::Any);
    machines(document, &blocks)
        .into_iter()
        .find_map(|machine| document.find_first(machine, &EMBARGO_PATH))
}

/// Returns `true` if any element below the machines carries a rule.
pub(crate) fn any_rule<D: Query>(document: &D, machines: &[D::Node]) -> bool {
    machines.iter().any(|machine| {
        document
            .find_all(*machine, &DESCENDANTS_PATH)
            .into_iter()
            .any(|node| document.attribute(node, RULE).is_some())
    })
}
