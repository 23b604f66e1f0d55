//! WSDL 1.1 / XML Schema 1.0 parsing
//!
//! `wsdl` parses the WSDL document itself (messages, port types, bindings,
//! services) and delegates embedded `<types>` schemas to `xsd`, which parses
//! XML Schema fragments independently of the WSDL envelope that carries them.

pub mod wsdl;
pub mod xsd;

pub use wsdl::{parser::parse_wsdl, Binding, BindingOperation, Message, MessagePart, Port,
    PortType, PortTypeOperation, Service, WsdlImport, WsdlModel};
pub use xsd::{
    parser::parse_schema, Attribute, ComplexType, ContentExtension, Restriction, SchemaElement,
    SchemaImport, SchemaInclude, Sequence, SequenceElement, SimpleType, XmlSchema,
};

/// A namespace-qualified name as it appears on the wire, e.g. `tns:Foo` or
/// just `Foo` when no prefix is used.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QName(pub String);

impl QName {
    /// Construct a QName from any string-like value.
    pub fn new(raw: impl Into<String>) -> Self {
        QName(raw.into())
    }

    /// The raw `prefix:local` (or unprefixed) string as written on the wire.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the last `:`, or the whole string if unprefixed.
    pub fn local_name(&self) -> &str {
        match self.0.rsplit_once(':') {
            Some((_, local)) => local,
            None => &self.0,
        }
    }

    /// The part before the last `:`, if any.
    pub fn prefix(&self) -> Option<&str> {
        self.0.rsplit_once(':').map(|(prefix, _)| prefix)
    }
}

impl std::fmt::Display for QName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for QName {
    fn from(s: &str) -> Self {
        QName(s.to_string())
    }
}

impl From<String> for QName {
    fn from(s: String) -> Self {
        QName(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_name_strips_prefix() {
        assert_eq!(QName::from("tns:Foo").local_name(), "Foo");
        assert_eq!(QName::from("Foo").local_name(), "Foo");
    }

    #[test]
    fn prefix_is_none_without_colon() {
        assert_eq!(QName::from("Foo").prefix(), None);
        assert_eq!(QName::from("tns:Foo").prefix(), Some("tns"));
    }
}
