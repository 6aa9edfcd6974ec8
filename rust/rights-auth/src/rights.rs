use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::vocab::{NO_DOWNLOAD, STANFORD};

/// A single grant: whether access is given, and the rule qualifying it.
///
/// Any rule at all makes the grant qualified. Only [`NO_DOWNLOAD`] is
/// interpreted, by [`Rights::is_downloadable`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rights {
    /// Whether the scope grants access.
    pub granted: bool,
    /// Opaque qualifier, e.g. `"no-download"`.
    pub rule: Option<String>,
}

/// Shared value for "nothing granted".
pub(crate) static DENIED: Rights = Rights {
    granted: false,
    rule: None,
};

impl Rights {
    /// A granted right carrying an optional rule.
    pub fn grant(rule: Option<String>) -> Self {
        Self {
            granted: true,
            rule,
        }
    }

    /// A right that is not granted.
    pub fn deny() -> Self {
        Self::default()
    }

    /// Granted and carrying no rule.
    pub fn is_unrestricted(&self) -> bool {
        self.granted && self.rule.is_none()
    }

    /// Granted and not withheld from download.
    pub fn is_downloadable(&self) -> bool {
        self.granted && self.rule.as_deref() != Some(NO_DOWNLOAD)
    }

    /// The `(granted, rule)` pair answered by the query methods.
    pub fn as_pair(&self) -> (bool, Option<&str>) {
        (self.granted, self.rule.as_deref())
    }
}

/// Rights scoped to the whole object or to the files of one access block.
///
/// Every field is optional. An object-level entity produced by the parser
/// always has `world`, the stanford group, `agent`, `location` and
/// `controlled_digital_lending` set. A file-level entity only carries what
/// its access block grants; an unset field means "ask the object".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntityRights {
    /// Grant to everybody.
    pub world: Option<Rights>,
    /// Grants by group name. Only [`STANFORD`] is populated.
    pub group: BTreeMap<String, Rights>,
    /// Grants by agent identifier.
    pub agent: Option<BTreeMap<String, Rights>>,
    /// Grants by location identifier.
    pub location: Option<BTreeMap<String, Rights>>,
    /// Controlled digital lending.
    pub controlled_digital_lending: Option<Rights>,
}

impl EntityRights {
    /// The stanford group grant, if this scope sets one.
    pub fn stanford(&self) -> Option<&Rights> {
        self.group.get(STANFORD)
    }

    /// Returns `true` if this scope names at least one location.
    pub fn has_locations(&self) -> bool {
        self.location
            .as_ref()
            .is_some_and(|locations| !locations.is_empty())
    }
}
