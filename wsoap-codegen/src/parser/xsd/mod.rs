//! In-memory model for an XML Schema (XSD) document.
//!
//! This module contains the main [`SchemaParser`] struct and orchestrates
//! the parsing of XML Schema documents. The actual parsing logic for each
//! XSD element type is implemented in separate modules:
//!
//! - `schema_attributes` - Schema element attributes
//! - `schema_content` - Top-level schema elements
//! - `element` - Element definitions
//! - `complex_type` - ComplexType definitions
//! - `attribute` - Attribute definitions (global and inline)
//! - `sequence` - Sequence and all compositors
//! - `simple_type` - SimpleType definitions and utilities

pub mod parser;

mod attribute;
mod complex_type;
mod element;
mod schema_attributes;
mod schema_content;
mod sequence;
mod simple_type;

use crate::parser::QName;
use std::collections::HashMap;

/// A fully parsed `<schema>` document.
#[derive(Default, Debug, Clone)]
pub struct XmlSchema {
    pub target_namespace: Option<String>,
    pub attribute_form_default: Option<String>,
    pub element_form_default: Option<String>,
    pub version: Option<String>,
    /// xmlns:* declarations on this schema, plus any inherited from the WSDL
    /// root that this schema did not already bind (see `inherit_namespaces`).
    pub namespaces: HashMap<String, String>,
    pub includes: Vec<SchemaInclude>,
    pub imports: Vec<SchemaImport>,
    pub elements: HashMap<String, SchemaElement>,
    pub attributes: Vec<Attribute>,
    pub complex_types: HashMap<String, ComplexType>,
    pub simple_types: HashMap<String, SimpleType>,
}

impl XmlSchema {
    /// Union this schema's `xmlns` map with any prefixes it does not already
    /// bind, per the invariant in §3: "any inherited prefixes from the WSDL
    /// root that it did not already bind."
    pub fn inherit_namespaces(&mut self, root: &HashMap<String, String>) {
        for (prefix, uri) in root {
            self.namespaces
                .entry(prefix.clone())
                .or_insert_with(|| uri.clone());
        }
    }
}

#[derive(Debug, Clone)]
pub struct SchemaInclude {
    pub schema_location: String,
}

#[derive(Debug, Clone)]
pub struct SchemaImport {
    pub namespace: Option<String>,
    pub schema_location: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct SchemaElement {
    pub name: String,
    pub type_: QName,
    pub nillable: bool,
    pub min_occurs: Option<u32>,
    pub max_occurs: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct Attribute {
    pub name: String,
    pub ref_: Option<QName>,
    pub type_: Option<QName>,
    pub use_: Option<String>,
    pub fixed: Option<String>,
    pub simple_type: Option<SimpleType>,
    pub abstract_: bool,
}

#[derive(Debug, Clone, Default)]
pub struct ComplexType {
    pub name: String,
    pub abstract_: bool,
    pub mixed: bool,
    pub sequence: Option<Sequence>,
    pub choice: Option<Sequence>,
    pub sequence_choice: Option<Sequence>,
    pub all: Option<Sequence>,
    pub attributes: Vec<Attribute>,
    pub complex_content: Option<ContentExtension>,
    pub simple_content: Option<ContentExtension>,
}

/// Shared shape of `<complexContent><extension>` and
/// `<simpleContent><extension>`. `simpleContent` extensions only ever
/// populate `attributes` (their base is a simple/text type, not a sequence).
#[derive(Debug, Clone, Default)]
pub struct ContentExtension {
    pub base: QName,
    pub sequence: Option<Sequence>,
    pub choice: Option<Sequence>,
    pub sequence_choice: Option<Sequence>,
    pub attributes: Vec<Attribute>,
}

#[derive(Debug, Clone, Default)]
pub struct Sequence {
    pub elements: Vec<SequenceElement>,
}

#[derive(Debug, Clone, Default)]
pub struct SequenceElement {
    pub name: String,
    pub type_: QName,
    pub min_occurs: u32,
    pub max_occurs: Option<String>,
    pub nillable: bool,
}

#[derive(Debug, Clone)]
pub enum SimpleType {
    Restriction {
        base: QName,
        restrictions: Vec<Restriction>,
    },
    List {
        item_type: QName,
    },
    Union {
        member_types: Vec<QName>,
    },
}

impl Default for SimpleType {
    fn default() -> Self {
        SimpleType::Restriction {
            base: QName::from("xs:string"),
            restrictions: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Restriction {
    Enumeration(String),
    Pattern(String),
    MinLength(u32),
    MaxLength(u32),
    Length(u32),
    MinInclusive(String),
    MaxInclusive(String),
    MinExclusive(String),
    MaxExclusive(String),
    TotalDigits(u32),
    FractionDigits(u32),
}
