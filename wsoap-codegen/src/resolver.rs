//! Resolves `ref=` attribute references and inline-`simpleType` attribute
//! types in place, and finds the element name a given type is referenced
//! by. Ported from `original_source/builder/xsdParser.go`'s `xsdParser`.
//!
//! The Go original models this as a single struct with a `parseMode` field
//! switched between two passes over the same tree-walk. Rust expresses that
//! more plainly as two free functions operating on `&mut [XmlSchema]` /
//! `&[XmlSchema]` respectively, per the "thread state explicitly" design
//! note rather than carrying a mutable-mode flag through every call.

use crate::parser::{Attribute, ComplexType, XmlSchema};

/// Resolves every attribute's `ref="prefix:name"` to the referenced global
/// attribute's `name`/`type`/`abstract`/`fixed`, and fills in `type` for an
/// attribute declared with an inline `<simpleType><restriction base="...">`
/// instead of a `type=` attribute. Mirrors `xsdParser.parse()`'s
/// `refResolution` pass.
pub fn resolve_references(schemas: &mut [XmlSchema]) {
    let global_attributes: Vec<Attribute> = schemas
        .iter()
        .flat_map(|s| s.attributes.iter().cloned())
        .collect();

    for schema in schemas.iter_mut() {
        for complex_type in schema.complex_types.values_mut() {
            resolve_complex_type(complex_type, &global_attributes);
        }
    }
}

fn resolve_complex_type(ct: &mut ComplexType, globals: &[Attribute]) {
    for attr in ct.attributes.iter_mut() {
        resolve_attribute(attr, globals);
    }
    if let Some(ext) = ct.complex_content.as_mut() {
        for attr in ext.attributes.iter_mut() {
            resolve_attribute(attr, globals);
        }
    }
    if let Some(ext) = ct.simple_content.as_mut() {
        for attr in ext.attributes.iter_mut() {
            resolve_attribute(attr, globals);
        }
    }
}

fn resolve_attribute(attr: &mut Attribute, globals: &[Attribute]) {
    if let Some(ref_) = &attr.ref_ {
        let ref_name = crate::generator::identifiers::strip_alias_ns_from_type(ref_.as_str());
        if let Some(found) = globals
            .iter()
            .find(|g| g.ref_.is_none() && g.name == ref_name)
        {
            attr.name = found.name.clone();
            attr.type_ = found.type_.clone();
            attr.abstract_ = found.abstract_;
            if attr.fixed.is_none() {
                attr.fixed = found.fixed.clone();
            }
        }
        return;
    }

    if attr.type_.is_none() {
        if let Some(simple_type) = &attr.simple_type {
            if let crate::parser::SimpleType::Restriction { base, .. } = simple_type {
                attr.type_ = Some(base.clone());
            }
        }
    }
}

/// Finds the element name that references `type_name`, by local-name
/// comparison across every loaded schema, mirroring `findNameByType`. When
/// more than one distinctly-named element references the type, the Go
/// original's tie-break is "first one found wins, flag the conflict"; this
/// keeps the same behavior but surfaces the conflict via the returned
/// `bool` instead of a struct field.
///
/// Returns `(element_name, had_conflict)`; `element_name` is empty if no
/// element referenced the type.
pub fn find_name_by_type(schemas: &[XmlSchema], type_name: &str) -> (String, bool) {
    let wanted = crate::generator::identifiers::strip_alias_ns_from_type(type_name);
    let mut found = String::new();
    let mut conflict = false;

    'outer: for schema in schemas {
        for element in schema.elements.values() {
            let element_type =
                crate::generator::identifiers::strip_alias_ns_from_type(element.type_.as_str());
            if element_type != wanted {
                continue;
            }
            if found.is_empty() {
                found = element.name.clone();
            } else if found != element.name {
                conflict = true;
                break 'outer;
            }
        }
    }

    (found, conflict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_schema;

    #[test]
    fn resolves_attribute_ref_to_global() {
        let xsd = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="http://tempuri.org/">
  <xs:attribute name="lang" type="xs:string"/>
  <xs:complexType name="Doc">
    <xs:sequence/>
    <xs:attribute ref="lang"/>
  </xs:complexType>
</xs:schema>"#;
        let mut schema = parse_schema(xsd).unwrap();
        resolve_complex_type(
            schema.complex_types.get_mut("Doc").unwrap(),
            &schema.attributes.clone(),
        );
        let attr = &schema.complex_types["Doc"].attributes[0];
        assert_eq!(attr.name, "lang");
        assert!(attr.type_.is_some());
    }

    #[test]
    fn finds_element_name_by_type() {
        let xsd = r#"<?xml version="1.0"?>
<xs:schema xmlns:xs="http://www.w3.org/2001/XMLSchema" targetNamespace="http://tempuri.org/">
  <xs:element name="Add" type="AddRequestType"/>
  <xs:complexType name="AddRequestType">
    <xs:sequence/>
  </xs:complexType>
</xs:schema>"#;
        let schema = parse_schema(xsd).unwrap();
        let (name, conflict) = find_name_by_type(&[schema], "AddRequestType");
        assert_eq!(name, "Add");
        assert!(!conflict);
    }
}
