//! Recursively acquires every schema an XSD `<import>`/`<include>` points
//! at, beyond the inline `<types>` schema the WSDL parser already captures.
//! Ported from `original_source/builder/builder.go`'s `resolveExternal`.

pub mod fetch;
pub mod location;

use std::collections::{HashSet, VecDeque};

use fetch::Fetcher;
use location::Location;

use crate::parser::wsdl::WsdlModel;
use crate::parser::xsd::parser::parse_schema;
use crate::error::{CodegenError, Result};

/// `resolveExternal`'s recursion guard: the Go original gives up after 20
/// levels of import/include chasing rather than risk an unbounded walk
/// through a pathological or cyclic schema graph.
const MAX_RECURSION: u32 = 20;

struct WorkItem {
    schema_location: String,
    base: Location,
    depth: u32,
}

/// Walks `wsdl`'s schemas for `<import>`/`<include>` references not yet
/// loaded, fetching and parsing each one and appending it to
/// `wsdl.schemas()` before walking its own references in turn. `base` is
/// the location of the root WSDL document, used to resolve the first level
/// of relative `schemaLocation`s.
///
/// Iterates over a worklist rather than `wsdl.schemas()` directly, since
/// appending newly-acquired schemas to that same vector while iterating it
/// would otherwise require either cloning the whole list up front or
/// fighting the borrow checker over a `Vec` mutated mid-iteration.
pub fn resolve_external(wsdl: &mut WsdlModel, base: &Location, fetcher: &dyn Fetcher) -> Result<()> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut worklist: VecDeque<WorkItem> = VecDeque::new();

    for schema in wsdl.schemas() {
        queue_references(schema, base, 0, &mut worklist);
    }

    while let Some(item) = worklist.pop_front() {
        if item.depth >= MAX_RECURSION {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "schema import/include recursion exceeded {} levels at '{}'; skipping",
                MAX_RECURSION,
                item.schema_location
            );
            continue;
        }

        let loc = item.base.join(&item.schema_location)?;
        let key = loc.to_string();
        if seen.contains(&key) {
            continue;
        }
        seen.insert(key);

        #[cfg(feature = "tracing")]
        tracing::debug!("fetching schema '{}'", loc);

        let bytes = fetcher.fetch(&loc)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| CodegenError::XsdParse(format!("schema at '{loc}' is not valid UTF-8: {e}")))?;
        let schema = parse_schema(&text).map_err(|e| CodegenError::XsdParse(e.to_string()))?;

        queue_references(&schema, &loc, item.depth + 1, &mut worklist);
        wsdl.push_schema(schema);
    }

    Ok(())
}

fn queue_references(
    schema: &crate::parser::XmlSchema,
    base: &Location,
    depth: u32,
    worklist: &mut VecDeque<WorkItem>,
) {
    for import in &schema.imports {
        if let Some(location) = &import.schema_location {
            worklist.push_back(WorkItem {
                schema_location: location.clone(),
                base: base.clone(),
                depth,
            });
        } else {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                "xsd:import of namespace '{}' has no schemaLocation; skipping",
                import.namespace.as_deref().unwrap_or("")
            );
        }
    }
    for include in &schema.includes {
        worklist.push_back(WorkItem {
            schema_location: include.schema_location.clone(),
            base: base.clone(),
            depth,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_wsdl;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct FakeFetcher {
        documents: Mutex<HashMap<String, Vec<u8>>>,
    }

    impl Fetcher for FakeFetcher {
        fn fetch(&self, loc: &Location) -> Result<Vec<u8>> {
            self.documents
                .lock()
                .unwrap()
                .get(&loc.to_string())
                .cloned()
                .ok_or_else(|| CodegenError::Fetch {
                    location: loc.to_string(),
                    status: 404,
                })
        }
    }

    const WSDL: &str = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:s="http://www.w3.org/2001/XMLSchema"
             targetNamespace="http://tempuri.org/"
             name="Calculator">
  <types>
    <s:schema targetNamespace="http://tempuri.org/">
      <s:import namespace="http://tempuri.org/shared" schemaLocation="shared.xsd"/>
    </s:schema>
  </types>
</definitions>"#;

    const SHARED_XSD: &str = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="http://tempuri.org/shared">
  <xs:complexType name="Shared">
    <xs:sequence/>
  </xs:complexType>
</xs:schema>"#;

    #[test]
    fn fetches_imported_schema_and_appends_it() {
        let mut model = parse_wsdl(WSDL).unwrap();
        let base = Location::parse("/tmp/calculator.wsdl").unwrap();
        let mut documents = HashMap::new();
        documents.insert(
            "/tmp/shared.xsd".to_string(),
            SHARED_XSD.as_bytes().to_vec(),
        );
        let fetcher = FakeFetcher {
            documents: Mutex::new(documents),
        };

        resolve_external(&mut model, &base, &fetcher).unwrap();

        assert_eq!(model.schemas().len(), 2);
        assert!(model.schemas()[1].complex_types.contains_key("Shared"));
    }

    #[test]
    fn skips_already_seen_location() {
        let mut model = parse_wsdl(WSDL).unwrap();
        model.schemas_mut().push(model.schemas()[0].clone());
        let base = Location::parse("/tmp/calculator.wsdl").unwrap();
        let mut documents = HashMap::new();
        documents.insert(
            "/tmp/shared.xsd".to_string(),
            SHARED_XSD.as_bytes().to_vec(),
        );
        let fetcher = FakeFetcher {
            documents: Mutex::new(documents),
        };

        resolve_external(&mut model, &base, &fetcher).unwrap();

        // Each schema has its own import queued, but both point at the
        // same location, so it's fetched once.
        assert_eq!(model.schemas().len(), 3);
    }
}
