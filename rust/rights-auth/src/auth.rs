use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rights_xml::Document;

use crate::{EntityRights, IndexSummary, ParseConfig, RightsError};

/// Rights parsed from one rightsMetadata document.
///
/// Built once and never mutated, so it can be shared freely across threads.
///
/// ```
/// use rights_auth::RightsAuth;
///
/// let rights = RightsAuth::parse(
///     r#"<rightsMetadata>
///          <access type="read"><machine><group>Stanford</group></machine></access>
///        </rightsMetadata>"#,
/// )?;
/// assert!(rights.stanford_only_unrestricted());
/// assert!(!rights.world_unrestricted());
/// # Ok::<(), rights_auth::RightsError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsAuth {
    pub(crate) object: EntityRights,
    /// Files listed in the same access block share one entity.
    pub(crate) files: HashMap<String, Arc<EntityRights>>,
    pub(crate) embargo_release_date: Option<DateTime<Utc>>,
    pub(crate) embargoed: bool,
    pub(crate) index: Option<IndexSummary>,
}

impl RightsAuth {
    /// Parses rights for access decisions.
    pub fn parse(xml: &str) -> Result<Self, RightsError> {
        Self::parse_with(xml, &ParseConfig::new())
    }

    /// Parses rights and builds the [`IndexSummary`] as well.
    pub fn parse_for_index(xml: &str) -> Result<Self, RightsError> {
        Self::parse_with(xml, &ParseConfig::new().for_index(true))
    }

    /// Parses rights with explicit options.
    pub fn parse_with(xml: &str, config: &ParseConfig) -> Result<Self, RightsError> {
        let document = Document::parse(xml)?;
        Self::from_document(&document, config)
    }
}

impl FromStr for RightsAuth {
    type Err = RightsError;

    fn from_str(xml: &str) -> Result<Self, Self::Err> {
        Self::parse(xml)
    }
}
