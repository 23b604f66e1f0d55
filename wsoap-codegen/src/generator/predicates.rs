//! Free-standing emitter predicates, ported from `builder.go`'s
//! `isBasicType`/`isAbstract`/`isInnerBasicType` template functions.
//!
//! The original builder exposes these (plus `setNamespace`) to its
//! `text/template` artifacts as methods on a mutable `*Builder` carrying
//! `b.wsdl`/`b.currentNamespace` as implicit state. Here they're plain
//! functions over a borrowed `&[XmlSchema]` (or, for the namespace check,
//! two namespace strings) instead — nothing here needs template-engine
//! access to a builder's internal fields.

use crate::generator::identifiers::strip_alias_ns_from_type;
use crate::parser::XmlSchema;

/// Rust-side basic/primitive type vocabulary, the analogue of `builder.go`'s
/// `basicTypes` map (which lists Go primitives like `"int32"`/`"[]byte"`
/// rather than XSD names — callers pass an already-mapped Rust type name).
const BASIC_TYPES: &[&str] = &[
    "String", "bool", "f32", "f64", "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64",
    "Vec<u8>", "XsdDate", "XsdTime", "XsdDateTime",
];

/// Is `rust_type` one of the built-in primitive types the type mapper
/// produces directly, as opposed to a generated struct/enum name?
pub fn is_basic_type(rust_type: &str) -> bool {
    BASIC_TYPES.contains(&strip_alias_ns_from_type(rust_type))
}

/// Is `type_name` declared `abstract="true"` in any loaded schema?
///
/// Mirrors `(*Builder).isAbstract` with `checkParent == false`: a basic
/// type is never abstract, and an unresolvable type name (not found in any
/// schema) is treated as concrete.
pub fn is_abstract(schemas: &[XmlSchema], type_name: &str) -> bool {
    let stripped = strip_alias_ns_from_type(type_name);
    if is_basic_type(stripped) {
        return false;
    }
    for schema in schemas {
        if let Some(ct) = schema.complex_types.get(stripped) {
            return ct.abstract_;
        }
    }
    false
}

/// Does `type_name` behave as a scalar/leaf value on the wire — a basic
/// type, a simpleType, or a non-mixed complexType with no element content
/// (an empty marker type, or one that's abstract and thus never directly
/// instantiated)? Mirrors `(*Builder).isInnerBasicType`.
pub fn is_inner_basic_type(schemas: &[XmlSchema], type_name: &str) -> bool {
    let stripped = strip_alias_ns_from_type(type_name);
    if is_basic_type(stripped) {
        return true;
    }
    for schema in schemas {
        if schema.simple_types.contains_key(stripped) {
            return true;
        }
    }
    for schema in schemas {
        if let Some(ct) = schema.complex_types.get(stripped) {
            let has_content = ct.sequence.is_some() || ct.choice.is_some() || ct.all.is_some();
            if !ct.mixed && (has_content || ct.abstract_) {
                return true;
            }
        }
    }
    false
}

/// Should a generated field comment carry an explicit namespace prefix?
///
/// No literal `outputNSInField` function exists in the original builder;
/// this is grounded on `(*Builder).setNamespace`/`getNamespace`'s "currently
/// active namespace" bookkeeping, which the Go templates consult before
/// emitting a qualified element name. The Rust emitter has no template-global
/// mutable namespace to track, so this takes the two namespaces being
/// compared explicitly: true when `field_ns` diverges from the
/// `current_ns` the surrounding type was rendered under, meaning a reader
/// can't infer the field's namespace from context alone.
pub fn output_ns_in_field(current_ns: &str, field_ns: &str) -> bool {
    !field_ns.is_empty() && field_ns != current_ns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ComplexType;

    fn schema_with_complex_type(name: &str, ct: ComplexType) -> XmlSchema {
        let mut schema = XmlSchema::default();
        schema.complex_types.insert(name.to_string(), ct);
        schema
    }

    #[test]
    fn basic_types_are_recognized_regardless_of_alias_prefix() {
        assert!(is_basic_type("String"));
        assert!(is_basic_type("tns:i32"));
        assert!(!is_basic_type("Address"));
    }

    #[test]
    fn is_abstract_reads_the_declared_flag() {
        let ct = ComplexType {
            abstract_: true,
            ..Default::default()
        };
        let schemas = vec![schema_with_complex_type("Shape", ct)];
        assert!(is_abstract(&schemas, "Shape"));
        assert!(is_abstract(&schemas, "tns:Shape"));
        assert!(!is_abstract(&schemas, "Unknown"));
    }

    #[test]
    fn is_abstract_treats_basic_types_as_concrete() {
        let schemas: Vec<XmlSchema> = vec![];
        assert!(!is_abstract(&schemas, "String"));
    }

    #[test]
    fn is_inner_basic_type_covers_simple_types_and_leaf_complex_types() {
        let mut schema = XmlSchema::default();
        schema.simple_types.insert(
            "StatusCode".to_string(),
            crate::parser::SimpleType::List {
                item_type: crate::parser::QName::new("xs:string"),
            },
        );
        let leaf_ct = ComplexType {
            sequence: Some(crate::parser::Sequence::default()),
            ..Default::default()
        };
        schema.complex_types.insert("Empty".to_string(), leaf_ct);
        let schemas = vec![schema];

        assert!(is_inner_basic_type(&schemas, "i64"));
        assert!(is_inner_basic_type(&schemas, "StatusCode"));
        assert!(is_inner_basic_type(&schemas, "Empty"));
        assert!(!is_inner_basic_type(&schemas, "Unmodeled"));
    }

    #[test]
    fn output_ns_in_field_flags_divergent_namespaces() {
        assert!(output_ns_in_field(
            "http://tempuri.org/",
            "http://tempuri.org/types"
        ));
        assert!(!output_ns_in_field(
            "http://tempuri.org/",
            "http://tempuri.org/"
        ));
        assert!(!output_ns_in_field("http://tempuri.org/", ""));
    }
}
