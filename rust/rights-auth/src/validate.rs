use std::fmt;

use rights_xml::Query;
use serde::{Serialize, Serializer};

use crate::select::{self, AccessType, Scope};
use crate::vocab::{NONE, WORLD};

/// A structural problem found by [`validate_lite`].
///
/// Findings are reported as data inside [`crate::IndexSummary`]; they never
/// stop parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationError {
    /// The document holds no `rightsMetadata` element.
    NoRightsMetadata,
    /// No object-level access block of the given type exists.
    NoAccess(AccessType),
    /// No object-level access block of the given type has a `<machine>`.
    NoMachine(AccessType),
    /// The discover machine grants neither unqualified world nor none.
    DiscoverMachineUnrecognized,
}

impl ValidationError {
    /// The error code, e.g. `"no_discover_access"`.
    pub fn code(&self) -> String {
        match self {
            ValidationError::NoRightsMetadata => "no_rightsMetadata".to_string(),
            ValidationError::NoAccess(access) => format!("no_{access}_access"),
            ValidationError::NoMachine(access) => format!("no_{access}_machine"),
            ValidationError::DiscoverMachineUnrecognized => {
                "discover_machine_unrecognized".to_string()
            }
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Checks the object-level discover and read blocks for missing pieces.
///
/// Findings come in a fixed order: discover checks, then read checks, then
/// [`ValidationError::DiscoverMachineUnrecognized`]. A document without
/// `rightsMetadata` yields only [`ValidationError::NoRightsMetadata`].
pub fn validate_lite<D: Query>(document: &D) -> Vec<ValidationError> {
    if !select::has_rights_metadata(document) {
        return vec![ValidationError::NoRightsMetadata];
    }

    let mut errors = Vec::new();
    for access in [AccessType::Discover, AccessType::Read] {
        let blocks = select::access_blocks(document, access, Scope::Object);
        if blocks.is_empty() {
            errors.push(ValidationError::NoAccess(access));
            errors.push(ValidationError::NoMachine(access));
        } else if select::machines(document, &blocks).is_empty() {
            errors.push(ValidationError::NoMachine(access));
        }
    }

    let machines = select::object_machines(document, AccessType::Discover);
    if !machines.is_empty() {
        let grants = select::grants(document, &machines);
        let recognized = grants.iter().any(|grant| match document.name(*grant) {
            WORLD => select::rule(document, *grant).is_none(),
            NONE => true,
            _ => false,
        });
        if !recognized {
            errors.push(ValidationError::DiscoverMachineUnrecognized);
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rights_xml::Document;
    use testresult::TestResult;

    fn codes(xml: &str) -> Result<Vec<String>, rights_xml::XmlError> {
        let document = Document::parse(xml)?;
        Ok(validate_lite(&document)
            .iter()
            .map(ValidationError::code)
            .collect())
    }

    #[test]
    fn it_short_circuits_without_rights_metadata() -> TestResult {
        assert_eq!(codes("<objectType><access type=\"read\"/></objectType>")?, vec![
            "no_rightsMetadata"
        ]);
        Ok(())
    }

    #[test]
    fn it_reports_missing_blocks_and_machines() -> TestResult {
        assert_eq!(codes("<rightsMetadata/>")?, vec![
            "no_discover_access",
            "no_discover_machine",
            "no_read_access",
            "no_read_machine",
        ]);
        assert_eq!(
            codes(
                r#"<rightsMetadata>
                     <access type="read"></access>
                     <access type="discover"></access>
                   </rightsMetadata>"#
            )?,
            vec!["no_discover_machine", "no_read_machine"]
        );
        Ok(())
    }

    #[test]
    fn it_ignores_file_scoped_blocks() -> TestResult {
        let errors = codes(
            r#"<rightsMetadata>
                 <access type="discover"><machine><world/></machine></access>
                 <access type="read"><file>a.pdf</file><machine><world/></machine></access>
               </rightsMetadata>"#,
        )?;
        assert_eq!(errors, vec!["no_read_access", "no_read_machine"]);
        Ok(())
    }

    #[test]
    fn it_flags_unrecognized_discover_machines() -> TestResult {
        let empty = r#"<rightsMetadata>
                         <access type="discover"><machine></machine></access>
                         <access type="read"><machine><world/></machine></access>
                       </rightsMetadata>"#;
        assert_eq!(codes(empty)?, vec!["discover_machine_unrecognized"]);

        let qualified = r#"<rightsMetadata>
                             <access type="discover"><machine><world rule="x"/></machine></access>
                             <access type="read"><machine><world/></machine></access>
                           </rightsMetadata>"#;
        assert_eq!(codes(qualified)?, vec!["discover_machine_unrecognized"]);

        let none = r#"<rightsMetadata>
                        <access type="discover"><machine><none/></machine></access>
                        <access type="read"><machine><none/></machine></access>
                      </rightsMetadata>"#;
        assert!(codes(none)?.is_empty());
        Ok(())
    }
}
