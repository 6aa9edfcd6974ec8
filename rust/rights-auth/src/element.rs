use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::vocab::{AGENT, CDL, EMBARGO_RELEASE_DATE, GROUP, LOCATION, NONE, WORLD};

/// The kind of a child element found directly under a `<machine>`.
#[derive(Debug, Clone)]
pub enum MachineElement {
    /// `<world>`
    World,
    /// `<group>`
    Group,
    /// `<agent>`
    Agent,
    /// `<location>`
    Location,
    /// `<none>`
    None,
    /// `<embargoReleaseDate>`
    EmbargoReleaseDate,
    /// `<cdl>`
    Cdl,
    /// Any element outside the vocabulary, by local name.
    Other(String),
}

impl MachineElement {
    /// Classifies an element by its local name.
    pub fn from_name(name: &str) -> Self {
        match name {
            WORLD => MachineElement::World,
            GROUP => MachineElement::Group,
            AGENT => MachineElement::Agent,
            LOCATION => MachineElement::Location,
            NONE => MachineElement::None,
            EMBARGO_RELEASE_DATE => MachineElement::EmbargoReleaseDate,
            CDL => MachineElement::Cdl,
            other => MachineElement::Other(other.to_string()),
        }
    }

    /// The element name this kind was read from.
    pub fn as_str(&self) -> &str {
        match self {
            MachineElement::World => WORLD,
            MachineElement::Group => GROUP,
            MachineElement::Agent => AGENT,
            MachineElement::Location => LOCATION,
            MachineElement::None => NONE,
            MachineElement::EmbargoReleaseDate => EMBARGO_RELEASE_DATE,
            MachineElement::Cdl => CDL,
            MachineElement::Other(name) => name,
        }
    }
}

// Identity is the element name, so `Other("world")` equals `World`.
impl PartialEq for MachineElement {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for MachineElement {}

impl Hash for MachineElement {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl Ord for MachineElement {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for MachineElement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for MachineElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Occurrence counts of machine child elements, ordered by name.
///
/// Displays as the profile fingerprint: `name` immediately followed by its
/// count, entries joined with `|` (e.g. `group1|world2`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementTally(BTreeMap<MachineElement, usize>);

impl ElementTally {
    /// Counts the given element names.
    pub fn from_names<'a, I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tally = Self::default();
        for name in names {
            *tally.0.entry(MachineElement::from_name(name)).or_default() += 1;
        }
        tally
    }

    /// Number of occurrences of `element`.
    pub fn count(&self, element: &MachineElement) -> usize {
        self.0.get(element).copied().unwrap_or(0)
    }

    /// Iterates over `(element, count)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&MachineElement, usize)> {
        self.0.iter().map(|(element, count)| (element, *count))
    }

    /// Returns `true` if nothing was counted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ElementTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (element, count)) in self.iter().enumerate() {
            if index > 0 {
                f.write_str("|")?;
            }
            write!(f, "{element}{count}")?;
        }
        Ok(())
    }
}
