//! Parsing of XSD `<attribute>` definitions, both top-level (global,
//! resolvable by `ref=`) and inline within a complexType/extension.

use crate::parser::xsd::Attribute;
use crate::parser::QName;
use quick_xml::events::{BytesStart, Event};
use std::error::Error;

use super::parser::SchemaParser;

impl<B: std::io::BufRead> SchemaParser<B> {
    /// Parse an `<attribute>` tag. `should_skip` is true for a `Start`
    /// event (so we must consume up to and including the matching `End`),
    /// false for an `Empty` (self-closing) event.
    pub(super) fn parse_attribute(
        &mut self,
        e: &BytesStart,
        should_skip: bool,
    ) -> Result<Attribute, Box<dyn Error>> {
        let mut attr = Attribute::default();

        for a in e.attributes().with_checks(false) {
            let a = a?;
            let val = a.unescape_value()?;
            match a.key.as_ref() {
                b"name" => attr.name = val.to_string(),
                b"ref" => attr.ref_ = Some(QName(val.to_string())),
                b"type" => attr.type_ = Some(QName(val.to_string())),
                b"use" => attr.use_ = Some(val.to_string()),
                b"fixed" => attr.fixed = Some(val.to_string()),
                b"abstract" => attr.abstract_ = val == "true",
                _ => {}
            }
        }

        if should_skip {
            let mut buf = Vec::new();
            loop {
                match self.reader.read_event_into(&mut buf)? {
                    Event::Start(e) if e.local_name().as_ref() == b"simpleType" => {
                        attr.simple_type = Some(self.parse_inline_simple_type(&e)?);
                    }
                    Event::End(e) if e.local_name().as_ref() == b"attribute" => break,
                    Event::Eof => break,
                    _ => {}
                }
                buf.clear();
            }
        }

        Ok(attr)
    }

    /// Parse the restriction base out of a simpleType inlined directly
    /// inside an `<attribute>` (used when `type=` is absent, per §4.4: "if
    /// `type` is empty and an inline simple type is present, promote the
    /// restriction base as the attribute's type").
    fn parse_inline_simple_type(
        &mut self,
        _e: &BytesStart,
    ) -> Result<super::SimpleType, Box<dyn Error>> {
        let mut base = QName::from("xs:string");
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"restriction" => {
                    if let Some(b) = e.try_get_attribute("base")? {
                        base = QName(b.unescape_value()?.into_owned());
                    }
                    self.skip_element()?;
                }
                Event::Empty(e) if e.local_name().as_ref() == b"restriction" => {
                    if let Some(b) = e.try_get_attribute("base")? {
                        base = QName(b.unescape_value()?.into_owned());
                    }
                }
                Event::End(e) if e.local_name().as_ref() == b"simpleType" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(super::SimpleType::Restriction {
            base,
            restrictions: Vec::new(),
        })
    }
}
