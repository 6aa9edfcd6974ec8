//! Index terms and the primary classification of a rights document.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use rights_xml::Query;
use serde::{Serialize, Serializer};

use crate::element::{ElementTally, MachineElement};
use crate::select::{self, AccessType, Scope};
use crate::validate::ValidationError;
use crate::vocab::{AGENT, CDL, GROUP, LOCATION, NONE, WORLD, is_stanford_group};

/// A token describing one structural fact about a rights document.
///
/// Terms display as the strings downstream search indexes facet on, e.g.
/// `world|no-download` or `file_rights_for_group|2`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// Discover access is explicitly `<none/>`.
    NoneDiscover,
    /// Discover access grants world without a rule.
    WorldDiscover,
    /// Object-level read access names a group.
    HasGroupRights,
    /// Some element under the object-level read machine carries a rule.
    HasRule,
    /// Object-level read access is granted to the stanford group.
    StanfordGroup,
    /// The stanford group grant carries a rule.
    StanfordGroupWithRule,
    /// Object-level read access names a non-stanford group (lowercased).
    Group(String),
    /// Object-level read access names a location.
    Location,
    /// Emitted alongside [`Term::Location`].
    LocationWithRule,
    /// Object-level read access names an agent.
    Agent,
    /// Emitted alongside [`Term::Agent`].
    AgentWithRule,
    /// Object-level read access is under controlled digital lending.
    CdlNone,
    /// Some file-scoped read access is explicitly `<none/>`.
    NoneReadFile,
    /// Object-level read access is explicitly `<none/>`.
    NoneRead,
    /// Object-level read access grants world.
    WorldRead,
    /// The world read grant carries this rule.
    WorldRule(String),
    /// Child element counts of the object-level read machine.
    Profile(ElementTally),
    /// At least one read block is scoped to files.
    HasFileRights,
    /// Number of `<machine>` elements in file-scoped read blocks.
    FileRightsCount(usize),
    /// Some file-scoped read machine has a child of this kind.
    FileHas(MachineElement),
    /// How many children of this kind file-scoped read machines have.
    FileRightsFor(MachineElement, usize),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::NoneDiscover => f.write_str("none_discover"),
            Term::WorldDiscover => f.write_str("world_discover"),
            Term::HasGroupRights => f.write_str("has_group_rights"),
            Term::HasRule => f.write_str("has_rule"),
            Term::StanfordGroup => f.write_str("group|stanford"),
            Term::StanfordGroupWithRule => f.write_str("group|stanford_with_rule"),
            Term::Group(name) => write!(f, "group|{name}"),
            Term::Location => f.write_str("location"),
            Term::LocationWithRule => f.write_str("location_with_rule"),
            Term::Agent => f.write_str("agent"),
            Term::AgentWithRule => f.write_str("agent_with_rule"),
            Term::CdlNone => f.write_str("cdl_none"),
            Term::NoneReadFile => f.write_str("none_read_file"),
            Term::NoneRead => f.write_str("none_read"),
            Term::WorldRead => f.write_str("world_read"),
            Term::WorldRule(rule) => write!(f, "world|{rule}"),
            Term::Profile(tally) => write!(f, "profile:{tally}"),
            Term::HasFileRights => f.write_str("has_file_rights"),
            Term::FileRightsCount(count) => write!(f, "file_rights_count|{count}"),
            Term::FileHas(element) => write!(f, "file_has_{element}"),
            Term::FileRightsFor(element, count) => {
                write!(f, "file_rights_for_{element}|{count}")
            }
        }
    }
}

impl Serialize for Term {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The single coarse label an object is faceted under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primary {
    /// Not discoverable.
    Dark,
    /// Discoverable, but content cannot be read.
    Citation,
    /// Read access is lent under controlled digital lending.
    ControlledDigitalLending,
    /// World readable.
    World,
    /// World readable, with a rule somewhere in read access.
    WorldQualified,
    /// Readable by groups, locations or agents.
    AccessRestricted,
    /// Restricted, with a rule somewhere in read access.
    AccessRestrictedQualified,
    /// No classification rule matched.
    Unknown,
    /// No classification rule matched, and read access has a rule.
    UnknownQualified,
}

impl Primary {
    /// The label as indexed, e.g. `"world_qualified"`.
    pub fn label(&self) -> &'static str {
        match self {
            Primary::Dark => "dark",
            Primary::Citation => "citation",
            Primary::ControlledDigitalLending => "controlled digital lending",
            Primary::World => "world",
            Primary::WorldQualified => "world_qualified",
            Primary::AccessRestricted => "access_restricted",
            Primary::AccessRestrictedQualified => "access_restricted_qualified",
            Primary::Unknown => "UNKNOWN",
            Primary::UnknownQualified => "UNKNOWN_qualified",
        }
    }

    fn qualified(plain: Primary, qualified: Primary, has_rule: bool) -> Primary {
        if has_rule { qualified } else { plain }
    }
}

impl fmt::Display for Primary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Primary {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// A rule recorded for a world grant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RuleQualifier {
    /// The grant's rule, if any.
    pub rule: Option<String>,
}

/// A named grant and its rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct QualifiedGrant {
    /// Group, location or agent name.
    pub name: String,
    /// The grant's rule, if any.
    pub rule: Option<String>,
}

/// Grants seen at one scope (object or file), in document order.
///
/// Only the stanford group is recorded in the group lists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Buckets {
    /// Group names, de-duplicated.
    pub groups: Vec<String>,
    /// Location names, de-duplicated.
    pub locations: Vec<String>,
    /// Agent names, de-duplicated.
    pub agents: Vec<String>,
    /// Rules of world grants.
    pub world_qualified: Vec<RuleQualifier>,
    /// Group grants with their rules.
    pub groups_qualified: Vec<QualifiedGrant>,
    /// Location grants with their rules.
    pub locations_qualified: Vec<QualifiedGrant>,
    /// Agent grants with their rules.
    pub agents_qualified: Vec<QualifiedGrant>,
}

impl Buckets {
    pub(crate) fn record_world(&mut self, rule: Option<&str>) {
        self.world_qualified.push(RuleQualifier {
            rule: rule.map(str::to_string),
        });
    }

    pub(crate) fn record_group(&mut self, name: &str, rule: Option<&str>) {
        self.groups.push(name.to_string());
        self.groups_qualified.push(qualified(name, rule));
    }

    pub(crate) fn record_location(&mut self, name: &str, rule: Option<&str>) {
        self.locations.push(name.to_string());
        self.locations_qualified.push(qualified(name, rule));
    }

    pub(crate) fn record_agent(&mut self, name: &str, rule: Option<&str>) {
        self.agents.push(name.to_string());
        self.agents_qualified.push(qualified(name, rule));
    }

    /// Drops repeated entries, keeping the first occurrence of each.
    pub(crate) fn dedup(&mut self) {
        dedup_in_order(&mut self.groups);
        dedup_in_order(&mut self.locations);
        dedup_in_order(&mut self.agents);
        dedup_in_order(&mut self.world_qualified);
        dedup_in_order(&mut self.groups_qualified);
        dedup_in_order(&mut self.locations_qualified);
        dedup_in_order(&mut self.agents_qualified);
    }
}

fn qualified(name: &str, rule: Option<&str>) -> QualifiedGrant {
    QualifiedGrant {
        name: name.to_string(),
        rule: rule.map(str::to_string),
    }
}

fn dedup_in_order<T: Clone + Eq + Hash>(values: &mut Vec<T>) {
    let mut seen = HashSet::new();
    values.retain(|value| seen.insert(value.clone()));
}

/// What the index classifier derived from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSummary {
    /// The coarse classification.
    pub primary: Primary,
    /// Validation findings, see [`crate::validate_lite`].
    pub errors: Vec<ValidationError>,
    /// Structural terms, in derivation order.
    pub terms: Vec<Term>,
    /// Grants seen in object-level read access.
    pub object: Buckets,
    /// Grants seen in file-scoped read access.
    pub file: Buckets,
}

impl IndexSummary {
    /// Returns `true` if a term displays as `token`.
    pub fn has_term(&self, token: &str) -> bool {
        self.terms.iter().any(|term| term.to_string() == token)
    }

    /// Returns `true` if a validation finding has the given code.
    pub fn has_error(&self, code: &str) -> bool {
        self.errors.iter().any(|error| error.code() == code)
    }

    /// The terms as their display strings.
    pub fn term_strings(&self) -> Vec<String> {
        self.terms.iter().map(Term::to_string).collect()
    }

    pub(crate) fn without_rights_metadata() -> Self {
        Self {
            primary: Primary::Dark,
            errors: vec![ValidationError::NoRightsMetadata],
            terms: Vec::new(),
            object: Buckets::default(),
            file: Buckets::default(),
        }
    }
}

/// Derives the terms of a document that holds `rightsMetadata`.
pub(crate) fn terms<D: Query>(document: &D) -> Vec<Term> {
    let mut terms = Vec::new();

    let discover = select::object_machines(document, AccessType::Discover);
    let discover = select::grants(document, &discover);
    if select::named(document, &discover, NONE).next().is_some() {
        terms.push(Term::NoneDiscover);
    }
    if select::named(document, &discover, WORLD)
        .any(|world| select::rule(document, world).is_none())
    {
        terms.push(Term::WorldDiscover);
    }

    let machines = select::object_machines(document, AccessType::Read);
    let read = select::grants(document, &machines);
    let has_read_machine = !machines.is_empty();

    if has_read_machine {
        let groups: Vec<_> = select::named(document, &read, GROUP).collect();
        if !groups.is_empty() {
            terms.push(Term::HasGroupRights);
        }
        if select::any_rule(document, &machines) {
            terms.push(Term::HasRule);
        }

        if let Some(stanford) = groups
            .iter()
            .find(|group| is_stanford_group(&document.text(**group)))
        {
            terms.push(Term::StanfordGroup);
            if select::rule(document, *stanford).is_some() {
                terms.push(Term::StanfordGroupWithRule);
            }
        } else if let Some(group) = groups.first() {
            terms.push(Term::Group(document.text(*group).to_lowercase()));
        }

        if select::named(document, &read, LOCATION).next().is_some() {
            terms.push(Term::Location);
            terms.push(Term::LocationWithRule);
        }
        if select::named(document, &read, AGENT).next().is_some() {
            terms.push(Term::Agent);
            terms.push(Term::AgentWithRule);
        }
        if select::named(document, &read, CDL).next().is_some() {
            terms.push(Term::CdlNone);
        }
    }

    let file_blocks = select::access_blocks(document, AccessType::Read, Scope::File);
    let file_machines = select::machines(document, &file_blocks);
    let file_grants = select::grants(document, &file_machines);
    if select::named(document, &file_grants, NONE).next().is_some() {
        terms.push(Term::NoneReadFile);
    }

    if has_read_machine {
        if select::named(document, &read, NONE).next().is_some() {
            terms.push(Term::NoneRead);
        } else if let Some(world) = select::named(document, &read, WORLD).next() {
            terms.push(Term::WorldRead);
            if let Some(rule) = select::rule(document, world) {
                terms.push(Term::WorldRule(rule));
            }
        }

        let tally = ElementTally::from_names(read.iter().map(|grant| document.name(*grant)));
        if !tally.is_empty() {
            terms.push(Term::Profile(tally));
        }
    }

    if !file_blocks.is_empty() {
        terms.push(Term::HasFileRights);
        terms.push(Term::FileRightsCount(file_machines.len()));
        let tally =
            ElementTally::from_names(file_grants.iter().map(|grant| document.name(*grant)));
        for (element, count) in tally.iter() {
            terms.push(Term::FileHas(element.clone()));
            terms.push(Term::FileRightsFor(element.clone(), count));
        }
    }

    terms
}

/// Picks the primary label; the first matching rule wins.
pub(crate) fn primary(terms: &[Term], errors: &[ValidationError]) -> Primary {
    let has = |term: &Term| terms.contains(term);
    let has_rule = has(&Term::HasRule);

    if has(&Term::NoneDiscover) {
        return Primary::Dark;
    }
    if errors.iter().any(|error| {
        matches!(
            error,
            ValidationError::NoAccess(AccessType::Discover)
                | ValidationError::NoMachine(AccessType::Discover)
        )
    }) {
        return Primary::Dark;
    }
    if errors.contains(&ValidationError::NoMachine(AccessType::Read)) || has(&Term::NoneRead) {
        return Primary::Citation;
    }
    if has(&Term::CdlNone) {
        return Primary::ControlledDigitalLending;
    }
    if has(&Term::WorldRead) {
        return Primary::qualified(Primary::World, Primary::WorldQualified, has_rule);
    }
    if has(&Term::HasGroupRights) || has(&Term::Location) || has(&Term::Agent) {
        return Primary::qualified(
            Primary::AccessRestricted,
            Primary::AccessRestrictedQualified,
            has_rule,
        );
    }
    Primary::qualified(Primary::Unknown, Primary::UnknownQualified, has_rule)
}
