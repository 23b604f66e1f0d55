//! Parsing of XSD schema content (top-level elements)

use quick_xml::events::{BytesStart, Event};
use std::error::Error;

use super::parser::SchemaParser;
use super::{ComplexType, SchemaImport, SchemaInclude};

impl<B: std::io::BufRead> SchemaParser<B> {
    /// Parse the content of the <schema> element
    ///
    /// This processes all top-level schema elements:
    /// - <element> - Top-level element definitions
    /// - <complexType> - Complex type definitions
    /// - <simpleType> - Simple type definitions
    /// - <attribute> - Global attribute definitions (resolvable by `ref=`)
    /// - <include> / <import> - External schema references walked by the
    ///   schema loader
    pub(super) fn parse_schema_content(&mut self) -> Result<(), Box<dyn Error>> {
        let mut buf = Vec::new();

        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"element" => self.parse_element(&e, true)?,
                    b"complexType" => self.parse_complex_type(&e)?,
                    b"simpleType" => self.parse_simple_type(&e)?,
                    b"attribute" => {
                        let attr = self.parse_attribute(&e, true)?;
                        self.model.attributes.push(attr);
                    }
                    b"include" => self.model.includes.push(parse_include(&e)?),
                    b"import" => self.model.imports.push(parse_import(&e)?),
                    // group, annotation, etc. are not part of the generated model
                    _ => {}
                },
                Event::Empty(e) => match e.local_name().as_ref() {
                    b"element" => self.parse_element(&e, false)?,
                    b"complexType" => {
                        // Empty complex type (unusual but handle it)
                        let name = e
                            .try_get_attribute("name")?
                            .map(|a| a.unescape_value().unwrap().into_owned());
                        if let Some(n) = name {
                            self.model.complex_types.insert(
                                n.clone(),
                                ComplexType {
                                    name: n,
                                    ..Default::default()
                                },
                            );
                        }
                    }
                    b"attribute" => {
                        let attr = self.parse_attribute(&e, false)?;
                        self.model.attributes.push(attr);
                    }
                    b"include" => self.model.includes.push(parse_include(&e)?),
                    b"import" => self.model.imports.push(parse_import(&e)?),
                    b"simpleType" => {
                        // Empty simple type - just skip
                    }
                    _ => {}
                },
                Event::End(e) if e.local_name().as_ref() == b"schema" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }
}

fn parse_include(e: &BytesStart) -> Result<SchemaInclude, Box<dyn Error>> {
    let schema_location = e
        .try_get_attribute("schemaLocation")?
        .map(|a| a.unescape_value().unwrap().into_owned())
        .unwrap_or_default();
    Ok(SchemaInclude { schema_location })
}

fn parse_import(e: &BytesStart) -> Result<SchemaImport, Box<dyn Error>> {
    let mut namespace = None;
    let mut schema_location = None;
    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let val = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"namespace" => namespace = Some(val.to_string()),
            b"schemaLocation" => schema_location = Some(val.to_string()),
            _ => {}
        }
    }
    Ok(SchemaImport {
        namespace,
        schema_location,
    })
}
