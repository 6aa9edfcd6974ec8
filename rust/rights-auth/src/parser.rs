use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rights_xml::Query;
use tracing::debug;

use crate::embargo::parse_release_date;
use crate::index::{self, Buckets, IndexSummary};
use crate::select::{self, AccessType, Scope};
use crate::vocab::{AGENT, CDL, GROUP, LOCATION, STANFORD, WORLD, is_stanford_group};
use crate::{EntityRights, ParseConfig, Rights, RightsAuth, RightsError, validate_lite};

impl RightsAuth {
    /// Evaluates a document that has already been parsed.
    ///
    /// Any [`Query`] implementation works; [`rights_xml::Document`] is the
    /// one [`RightsAuth::parse`] uses.
    pub fn from_document<D: Query>(
        document: &D,
        config: &ParseConfig,
    ) -> Result<Self, RightsError> {
        let has_rights_metadata = select::has_rights_metadata(document);
        let indexing = config.builds_index() && has_rights_metadata;
        let mut object_buckets = Buckets::default();
        let mut file_buckets = Buckets::default();

        let machines = select::object_machines(document, AccessType::Read);
        let object = read_entity(
            document,
            &machines,
            Scope::Object,
            indexing.then_some(&mut object_buckets),
        );

        let mut files: HashMap<String, Arc<EntityRights>> = HashMap::new();
        for block in select::access_blocks(document, AccessType::Read, Scope::File) {
            let machines = select::machines(document, &[block]);
            let entity = Arc::new(read_entity(
                document,
                &machines,
                Scope::File,
                indexing.then_some(&mut file_buckets),
            ));
            for file in select::files(document, block) {
                if files.insert(file.clone(), Arc::clone(&entity)).is_some() {
                    debug!(file = %file, "Replacing file rights with a later access block");
                }
            }
        }

        let embargo_release_date = select::embargo_release_date(document)
            .map(|node| parse_release_date(&document.text(node)))
            .transpose()?;
        let embargoed = embargo_release_date.is_some_and(|date| date > config.now());

        let index = match (config.builds_index(), has_rights_metadata) {
            (false, _) => None,
            (true, false) => Some(IndexSummary::without_rights_metadata()),
            (true, true) => {
                object_buckets.dedup();
                file_buckets.dedup();
                let errors = validate_lite(document);
                let terms = index::terms(document);
                let primary = index::primary(&terms, &errors);
                Some(IndexSummary {
                    primary,
                    errors,
                    terms,
                    object: object_buckets,
                    file: file_buckets,
                })
            }
        };
        if let Some(summary) = &index {
            let errors: Vec<String> = summary.errors.iter().map(|error| error.code()).collect();
            debug!(primary = %summary.primary, ?errors, "Classified rights for index");
        }

        debug!(
            files = files.len(),
            embargoed,
            for_index = config.builds_index(),
            "Parsed rights metadata"
        );

        Ok(Self {
            object,
            files,
            embargo_release_date,
            embargoed,
            index,
        })
    }
}

/// Reads the grants of the given machines into one entity.
///
/// At object scope every field is filled, defaulting to "not granted". At
/// file scope a field is only set when the machines grant it, so queries
/// can fall back to the object for the rest.
fn read_entity<D: Query>(
    document: &D,
    machines: &[D::Node],
    scope: Scope,
    mut buckets: Option<&mut Buckets>,
) -> EntityRights {
    let grants = select::grants(document, machines);
    let defaults = scope == Scope::Object;
    let mut entity = EntityRights::default();

    if let Some(world) = select::named(document, &grants, WORLD).next() {
        let rule = select::rule(document, world);
        if let Some(buckets) = buckets.as_deref_mut() {
            buckets.record_world(rule.as_deref());
        }
        entity.world = Some(Rights::grant(rule));
    } else if defaults {
        entity.world = Some(Rights::deny());
    }

    let stanford = select::named(document, &grants, GROUP)
        .find(|group| is_stanford_group(&document.text(*group)));
    if let Some(group) = stanford {
        let rule = select::rule(document, group);
        if let Some(buckets) = buckets.as_deref_mut() {
            buckets.record_group(STANFORD, rule.as_deref());
        }
        entity.group.insert(STANFORD.to_string(), Rights::grant(rule));
    } else if defaults {
        entity.group.insert(STANFORD.to_string(), Rights::deny());
    }

    let mut agents = BTreeMap::new();
    for agent in select::named(document, &grants, AGENT) {
        let name = document.text(agent);
        let rule = select::rule(document, agent);
        if let Some(buckets) = buckets.as_deref_mut() {
            buckets.record_agent(&name, rule.as_deref());
        }
        agents.insert(name, Rights::grant(rule));
    }
    if defaults || !agents.is_empty() {
        entity.agent = Some(agents);
    }

    let mut locations = BTreeMap::new();
    for location in select::named(document, &grants, LOCATION) {
        let name = document.text(location);
        let rule = select::rule(document, location);
        if let Some(buckets) = buckets.as_deref_mut() {
            buckets.record_location(&name, rule.as_deref());
        }
        locations.insert(name, Rights::grant(rule));
    }
    if defaults || !locations.is_empty() {
        entity.location = Some(locations);
    }

    if let Some(cdl) = select::named(document, &grants, CDL).next() {
        entity.controlled_digital_lending =
            Some(Rights::grant(select::lending_rule(document, cdl)));
    } else if defaults {
        entity.controlled_digital_lending = Some(Rights::deny());
    }

    entity
}
