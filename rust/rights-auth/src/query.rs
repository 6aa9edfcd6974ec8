//! Access questions answered against parsed rights.
//!
//! Object-level questions read the object entity. `*_for_file` questions
//! read the file's entity and fall back to the object one field at a time:
//! a file can set its own world grant and still inherit the object's
//! stanford grant. Agent and location maps count as one field each, so a
//! file that names any agent answers every agent question itself.

use chrono::{DateTime, Utc};

use crate::rights::DENIED;
use crate::{EntityRights, IndexSummary, Primary, Rights, RightsAuth, RightsError, ValidationError};

impl RightsAuth {
    /// World read access without a rule.
    pub fn world_unrestricted(&self) -> bool {
        self.object_world().is_unrestricted()
    }

    /// Stanford read access without a rule.
    pub fn stanford_only_unrestricted(&self) -> bool {
        self.object_stanford().is_unrestricted()
    }

    /// Read access for `agent` without a rule.
    pub fn agent_unrestricted(&self, agent: &str) -> bool {
        self.object_agent(agent).is_unrestricted()
    }

    /// World or stanford read access without a rule.
    ///
    /// A rough answer: qualified grants and agents are not considered.
    pub fn readable(&self) -> bool {
        self.world_unrestricted() || self.stanford_only_unrestricted()
    }

    /// World read access that does not forbid downloads.
    pub fn world_downloadable(&self) -> bool {
        self.object_world().is_downloadable()
    }

    /// Stanford read access that does not forbid downloads.
    pub fn stanford_only_downloadable(&self) -> bool {
        self.object_stanford().is_downloadable()
    }

    /// Returns `true` if the object names `agent` at all, whatever its rule.
    pub fn allowed_read_agent(&self, agent: &str) -> bool {
        self.object
            .agent
            .as_ref()
            .is_some_and(|agents| agents.contains_key(agent))
    }

    /// `(granted, rule)` of the object's world grant.
    pub fn world_rights(&self) -> (bool, Option<&str>) {
        self.object_world().as_pair()
    }

    /// `(granted, rule)` of the object's stanford grant.
    pub fn stanford_only_rights(&self) -> (bool, Option<&str>) {
        self.object_stanford().as_pair()
    }

    /// `(granted, rule)` for `agent`; `(false, None)` if it is not named.
    pub fn agent_rights(&self, agent: &str) -> (bool, Option<&str>) {
        self.object_agent(agent).as_pair()
    }

    /// `(granted, rule)` for `location`; `(false, None)` if it is not named.
    pub fn location_rights(&self, location: &str) -> (bool, Option<&str>) {
        self.object_location(location).as_pair()
    }

    /// `(granted, rule)` of controlled digital lending.
    pub fn controlled_digital_lending(&self) -> (bool, Option<&str>) {
        self.object
            .controlled_digital_lending
            .as_ref()
            .unwrap_or(&DENIED)
            .as_pair()
    }

    /// [`RightsAuth::world_rights`] for one file.
    pub fn world_rights_for_file(&self, file: &str) -> (bool, Option<&str>) {
        self.file_world(file).as_pair()
    }

    /// [`RightsAuth::stanford_only_rights`] for one file.
    pub fn stanford_only_rights_for_file(&self, file: &str) -> (bool, Option<&str>) {
        self.file_stanford(file).as_pair()
    }

    /// [`RightsAuth::agent_rights`] for one file.
    pub fn agent_rights_for_file(&self, file: &str, agent: &str) -> (bool, Option<&str>) {
        self.file_agent(file, agent).as_pair()
    }

    /// [`RightsAuth::location_rights`] for one file.
    pub fn location_rights_for_file(&self, file: &str, location: &str) -> (bool, Option<&str>) {
        self.file_location(file, location).as_pair()
    }

    /// [`RightsAuth::controlled_digital_lending`] for one file.
    pub fn controlled_digital_lending_for_file(&self, file: &str) -> (bool, Option<&str>) {
        match self
            .file_entity(file)
            .and_then(|entity| entity.controlled_digital_lending.as_ref())
        {
            Some(rights) => rights.as_pair(),
            None => self.controlled_digital_lending(),
        }
    }

    /// [`RightsAuth::world_unrestricted`] for one file.
    pub fn world_unrestricted_for_file(&self, file: &str) -> bool {
        self.file_world(file).is_unrestricted()
    }

    /// [`RightsAuth::stanford_only_unrestricted`] for one file.
    pub fn stanford_only_unrestricted_for_file(&self, file: &str) -> bool {
        self.file_stanford(file).is_unrestricted()
    }

    /// [`RightsAuth::agent_unrestricted`] for one file.
    pub fn agent_unrestricted_for_file(&self, file: &str, agent: &str) -> bool {
        self.file_agent(file, agent).is_unrestricted()
    }

    /// [`RightsAuth::world_downloadable`] for one file.
    pub fn world_downloadable_for_file(&self, file: &str) -> bool {
        self.file_world(file).is_downloadable()
    }

    /// [`RightsAuth::stanford_only_downloadable`] for one file.
    pub fn stanford_only_downloadable_for_file(&self, file: &str) -> bool {
        self.file_stanford(file).is_downloadable()
    }

    /// Returns `true` if the file, or the object, names any location.
    ///
    /// Object locations restrict every file, even one with its own
    /// locations. Pass `None` to ask about the object alone.
    pub fn restricted_by_location(&self, file: Option<&str>) -> bool {
        let file_restricted = file
            .and_then(|file| self.file_entity(file))
            .is_some_and(EntityRights::has_locations);
        file_restricted || self.object.has_locations()
    }

    /// Returns `true` if the embargo release date lies after the evaluation
    /// instant.
    pub fn embargoed(&self) -> bool {
        self.embargoed
    }

    /// The parsed `<embargoReleaseDate>`, whether or not it has passed.
    pub fn embargo_release_date(&self) -> Option<DateTime<Utc>> {
        self.embargo_release_date
    }

    /// The index summary, if rights were parsed for the index.
    pub fn index_summary(&self) -> Result<&IndexSummary, RightsError> {
        self.index
            .as_ref()
            .ok_or(RightsError::IndexNotBuilt {
                operation: "RightsAuth::index_summary",
            })
    }

    /// Returns `true` if the object cannot be discovered.
    pub fn is_dark(&self) -> Result<bool, RightsError> {
        let summary = self.index.as_ref().ok_or(RightsError::IndexNotBuilt {
            operation: "RightsAuth::is_dark",
        })?;
        Ok(summary.primary == Primary::Dark
            || summary
                .errors
                .contains(&ValidationError::DiscoverMachineUnrecognized))
    }

    /// Returns `true` if only the object's metadata can be read.
    pub fn is_citation_only(&self) -> Result<bool, RightsError> {
        let summary = self.index.as_ref().ok_or(RightsError::IndexNotBuilt {
            operation: "RightsAuth::is_citation_only",
        })?;
        Ok(summary.primary == Primary::Citation)
    }

    /// The object-level entity.
    pub fn object_rights(&self) -> &EntityRights {
        &self.object
    }

    /// The entity of a listed file.
    pub fn file_rights(&self, file: &str) -> Option<&EntityRights> {
        self.file_entity(file)
    }

    /// Names of all files with their own rights, unordered.
    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    fn file_entity(&self, file: &str) -> Option<&EntityRights> {
        self.files.get(file).map(|entity| entity.as_ref())
    }

    fn object_world(&self) -> &Rights {
        self.object.world.as_ref().unwrap_or(&DENIED)
    }

    fn object_stanford(&self) -> &Rights {
        self.object.stanford().unwrap_or(&DENIED)
    }

    fn object_agent(&self, agent: &str) -> &Rights {
        self.object
            .agent
            .as_ref()
            .and_then(|agents| agents.get(agent))
            .unwrap_or(&DENIED)
    }

    fn object_location(&self, location: &str) -> &Rights {
        self.object
            .location
            .as_ref()
            .and_then(|locations| locations.get(location))
            .unwrap_or(&DENIED)
    }

    fn file_world(&self, file: &str) -> &Rights {
        self.file_entity(file)
            .and_then(|entity| entity.world.as_ref())
            .unwrap_or_else(|| self.object_world())
    }

    fn file_stanford(&self, file: &str) -> &Rights {
        self.file_entity(file)
            .and_then(EntityRights::stanford)
            .unwrap_or_else(|| self.object_stanford())
    }

    fn file_agent(&self, file: &str, agent: &str) -> &Rights {
        match self.file_entity(file).and_then(|entity| entity.agent.as_ref()) {
            Some(agents) => agents.get(agent).unwrap_or(&DENIED),
            None => self.object_agent(agent),
        }
    }

    fn file_location(&self, file: &str, location: &str) -> &Rights {
        match self
            .file_entity(file)
            .and_then(|entity| entity.location.as_ref())
        {
            Some(locations) => locations.get(location).unwrap_or(&DENIED),
            None => self.object_location(location),
        }
    }
}
