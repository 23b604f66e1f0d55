//! Rust code generation from a parsed `WsdlModel`.
//!
//! - `type_mapper` - XSD primitive -> Rust type mapping
//! - `identifiers` - reserved-word avoidance and case conversion, ported
//!   from `builder.go`'s `normalize`/`makePublic`/`makePrivate`
//! - `message_type` - message -> part -> element resolution
//! - `predicates` - `isBasicType`/`isAbstract`/`isInnerBasicType` and the
//!   namespace-in-field check, ported from `builder.go`'s template functions
//! - `rust_codegen` - struct/enum/operation emission
//! - `templates` - the header artifact, rendered with `tera`

pub mod identifiers;
pub mod message_type;
pub mod predicates;
pub mod rust_codegen;
pub mod templates;
pub mod type_mapper;

use crate::error::Result;
use crate::SoapClientGenerator;
use crate::parser::WsdlModel;

/// Convert an identifier (any case, possibly containing separators) to
/// `PascalCase`, for struct/enum names.
pub fn to_pascal_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut capitalize_next = true;
    for c in s.chars() {
        if c == '_' || c == '-' || c == '.' || c == ' ' {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            out.extend(c.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(c);
        }
    }
    if out.is_empty() {
        "EmptyString".to_string()
    } else {
        out
    }
}

/// Convert an identifier to `snake_case`, for field/method names.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_lower_or_digit = false;
    for c in s.chars() {
        if c == '_' || c == '-' || c == '.' || c == ' ' {
            if !out.ends_with('_') && !out.is_empty() {
                out.push('_');
            }
            prev_lower_or_digit = false;
            continue;
        }
        if c.is_uppercase() {
            if prev_lower_or_digit {
                out.push('_');
            }
            out.extend(c.to_lowercase());
            prev_lower_or_digit = false;
        } else {
            out.push(c);
            prev_lower_or_digit = c.is_lowercase() || c.is_ascii_digit();
        }
    }
    if out.is_empty() {
        "field".to_string()
    } else {
        out
    }
}

/// Sanitize a field/method identifier that has already been case-converted:
/// reject Rust reserved words and a leading digit. Mirrors
/// `replaceReservedWords`/`normalize` from `builder.go`, adapted to Rust's
/// keyword set (see [`identifiers::reserved_words`]).
pub fn sanitize_identifier(ident: &str) -> String {
    let normalized = identifiers::normalize(ident);
    if let Some(replacement) = identifiers::reserved_words().get(normalized.as_str()) {
        return (*replacement).to_string();
    }
    if normalized
        .chars()
        .next()
        .map(|c| c.is_ascii_digit())
        .unwrap_or(true)
    {
        return format!("field_{}", normalized);
    }
    normalized
}

/// Entry point called by [`crate::SoapClientGenerator::generate`]. Renders
/// the types, operations and header artifacts and concatenates them into a
/// single `soap_client.rs` module, mirroring `builder.go`'s `Build()`.
pub fn generate_client_code(wsdl: &WsdlModel, config: &SoapClientGenerator) -> Result<String> {
    let type_mapper = type_mapper::TypeMapper::new();

    // Types and operations are independent passes over the same immutable
    // model; render them on scoped threads the way `Build()` fans out two
    // goroutines over a shared `*Builder`, joined before the header (which
    // needs both artifacts' declared names) is rendered.
    let (types_code, operations_code) = std::thread::scope(|scope| {
        let types_handle =
            scope.spawn(|| rust_codegen::generate_types_module(wsdl, &type_mapper));
        let operations_handle =
            scope.spawn(|| rust_codegen::generate_operations_module(wsdl, &type_mapper, config));
        (
            types_handle.join().expect("types codegen panicked"),
            operations_handle.join().expect("operations codegen panicked"),
        )
    });
    let types_code = types_code?;
    let operations_code = operations_code?;

    let header = templates::render_header(wsdl, config, &types_code, &operations_code)?;

    let mut out = String::with_capacity(header.len() + types_code.len() + operations_code.len());
    out.push_str(&header);
    out.push_str(&types_code);
    out.push_str(&operations_code);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pascal_case_from_snake() {
        assert_eq!(to_pascal_case("get_all_versions"), "GetAllVersions");
        assert_eq!(to_pascal_case("Add"), "Add");
    }

    #[test]
    fn snake_case_from_pascal() {
        assert_eq!(to_snake_case("AddResult"), "add_result");
        assert_eq!(to_snake_case("intA"), "int_a");
        assert_eq!(to_snake_case("userName"), "user_name");
    }

    #[test]
    fn sanitize_identifier_avoids_keywords() {
        assert_eq!(sanitize_identifier("type"), "r#type");
        assert_eq!(sanitize_identifier("normal_field"), "normal_field");
    }

    #[test]
    fn sanitize_identifier_prefixes_leading_digit() {
        assert_eq!(sanitize_identifier("2fast"), "field_2fast");
    }
}
