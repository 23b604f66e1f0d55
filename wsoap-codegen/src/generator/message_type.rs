//! Message -> part -> element type resolution, ported from `builder.go`'s
//! `findMessageType`.

use crate::generator::identifiers::strip_alias_ns_from_type;
use crate::parser::WsdlModel;

/// Resolve the Rust-facing type name carried by a WSDL message, per the
/// document/literal-wrapped WS-I assumption: a message has exactly one
/// part, named either by an inline `type=` or by chasing a top-level
/// `<element>` of the same (case-insensitive) local name across every
/// loaded schema.
///
/// Returns `None` when the message has no parts (an HTTP-binding or SOAP
/// 1.2 message, neither of which this crate supports) or cannot be found.
pub fn resolve_message_type(wsdl: &WsdlModel, message: &str) -> Option<String> {
    let message = strip_alias_ns_from_type(message);
    let msg = wsdl.messages().iter().find(|m| m.name == message)?;

    let part = msg.parts.first()?;

    if let Some(type_) = &part.type_ {
        return Some(strip_alias_ns_from_type(type_.as_str()).to_string());
    }

    let el_ref = part
        .element
        .as_ref()
        .map(|e| strip_alias_ns_from_type(e.as_str()))?;

    for schema in wsdl.schemas() {
        for (name, el) in &schema.elements {
            if !name.eq_ignore_ascii_case(el_ref) {
                continue;
            }
            return Some(strip_alias_ns_from_type(el.type_.as_str()).to_string());
        }
    }

    // An element declared with an inline, anonymous <complexType> (the
    // common document/literal-wrapped shape) isn't registered in
    // `schema.elements` at all; its complex type is instead registered
    // under the element's own name. Fall back to that name directly.
    for schema in wsdl.schemas() {
        if schema
            .complex_types
            .keys()
            .any(|name| name.eq_ignore_ascii_case(el_ref))
        {
            return Some(el_ref.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_wsdl;

    const WSDL: &str = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:tns="http://tempuri.org/"
             xmlns:s="http://www.w3.org/2001/XMLSchema"
             targetNamespace="http://tempuri.org/"
             name="Calculator">
  <types>
    <s:schema targetNamespace="http://tempuri.org/">
      <s:element name="Add" type="tns:AddRequestType"/>
    </s:schema>
  </types>
  <message name="AddSoapIn">
    <part name="parameters" element="tns:Add"/>
  </message>
  <message name="AddSoapOut"/>
</definitions>"#;

    #[test]
    fn resolves_via_element_chase() {
        let model = parse_wsdl(WSDL).unwrap();
        assert_eq!(
            resolve_message_type(&model, "tns:AddSoapIn"),
            Some("AddRequestType".to_string())
        );
    }

    #[test]
    fn returns_none_for_partless_message() {
        let model = parse_wsdl(WSDL).unwrap();
        assert_eq!(resolve_message_type(&model, "tns:AddSoapOut"), None);
    }
}
