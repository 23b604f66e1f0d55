//! Parsing of XSD complexType definitions

use crate::parser::xsd::{ComplexType, ContentExtension, Sequence};
use quick_xml::events::{BytesStart, Event};
use std::error::Error;

use super::parser::SchemaParser;

impl<B: std::io::BufRead> SchemaParser<B> {
    /// Parse a <complexType> definition.
    ///
    /// ComplexTypes define structured types with child elements. They can
    /// contain `<sequence>`, `<choice>`, `<all>`, inline `<attribute>`
    /// children, or a `<complexContent>`/`<simpleContent>` extension of a
    /// base type.
    ///
    /// Example:
    /// ```xml
    /// <complexType name="Person">
    ///   <sequence>
    ///     <element name="firstName" type="xs:string"/>
    ///     <element name="lastName" type="xs:string"/>
    ///   </sequence>
    /// </complexType>
    /// ```
    pub(super) fn parse_complex_type(&mut self, e: &BytesStart) -> Result<(), Box<dyn Error>> {
        let name = e
            .try_get_attribute("name")?
            .map(|a| a.unescape_value().unwrap().into_owned());
        let mut complex_type = ComplexType::default();
        if let Some(n) = name {
            complex_type.name = n;
        }
        for attr in e.attributes().with_checks(false) {
            let attr = attr?;
            match attr.key.as_ref() {
                b"abstract" => complex_type.abstract_ = attr.unescape_value()? == "true",
                b"mixed" => complex_type.mixed = attr.unescape_value()? == "true",
                _ => {}
            }
        }

        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"sequence" => {
                    complex_type.sequence = Some(self.parse_sequence()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"sequence" => {
                    complex_type.sequence = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"choice" => {
                    complex_type.choice = Some(self.parse_choice()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"choice" => {
                    complex_type.choice = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"all" => {
                    complex_type.all = Some(self.parse_all()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"all" => {
                    complex_type.all = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"attribute" => {
                    complex_type.attributes.push(self.parse_attribute(&e, true)?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"attribute" => {
                    complex_type.attributes.push(self.parse_attribute(&e, false)?);
                }
                Event::Start(e) if e.local_name().as_ref() == b"complexContent" => {
                    complex_type.complex_content = Some(self.parse_content_extension()?);
                }
                Event::Start(e) if e.local_name().as_ref() == b"simpleContent" => {
                    complex_type.simple_content = Some(self.parse_content_extension()?);
                }
                Event::End(e) if e.local_name().as_ref() == b"complexType" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !complex_type.name.is_empty() {
            self.model
                .complex_types
                .insert(complex_type.name.clone(), complex_type);
        }
        Ok(())
    }

    /// Parse the single `<extension base="...">` child of a
    /// `<complexContent>` or `<simpleContent>` wrapper, stopping at the
    /// wrapper's own closing tag.
    fn parse_content_extension(&mut self) -> Result<ContentExtension, Box<dyn Error>> {
        let mut ext = ContentExtension::default();
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"extension" => {
                    if let Some(base) = e.try_get_attribute("base")? {
                        ext.base = base.unescape_value()?.into_owned().into();
                    }
                    self.parse_extension_body(&mut ext)?;
                }
                Event::Empty(e) if e.local_name().as_ref() == b"extension" => {
                    if let Some(base) = e.try_get_attribute("base")? {
                        ext.base = base.unescape_value()?.into_owned().into();
                    }
                }
                Event::End(e)
                    if e.local_name().as_ref() == b"complexContent"
                        || e.local_name().as_ref() == b"simpleContent" =>
                {
                    break
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(ext)
    }

    fn parse_extension_body(&mut self, ext: &mut ContentExtension) -> Result<(), Box<dyn Error>> {
        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(e) if e.local_name().as_ref() == b"sequence" => {
                    ext.sequence = Some(self.parse_sequence()?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"sequence" => {
                    ext.sequence = Some(Sequence::default());
                }
                Event::Start(e) if e.local_name().as_ref() == b"choice" => {
                    ext.choice = Some(self.parse_choice()?);
                }
                Event::Start(e) if e.local_name().as_ref() == b"attribute" => {
                    ext.attributes.push(self.parse_attribute(&e, true)?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"attribute" => {
                    ext.attributes.push(self.parse_attribute(&e, false)?);
                }
                Event::End(e) if e.local_name().as_ref() == b"extension" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        Ok(())
    }
}
