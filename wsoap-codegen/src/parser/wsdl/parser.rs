//! WSDL parser orchestration
//!
//! This module contains the main `WsdlParser` struct and orchestrates
//! the parsing of WSDL documents. The actual parsing logic for each
//! WSDL element type is implemented in separate modules:
//!
//! - `definitions` - Root element attributes and namespaces
//! - `types` - XSD schema extraction
//! - `message` - Message definitions
//! - `port_type` - PortType and operation definitions
//! - `binding` - SOAP binding and operation details
//! - `service` - Service endpoints and ports

use super::{WsdlImport, WsdlModel};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;
use std::error::Error;

#[cfg(feature = "tracing")]
use tracing::{debug, info};

/// Parse a WSDL XML string into a structured model
///
/// # Arguments
///
/// * `xml` - The WSDL document as a string
///
/// # Returns
///
/// A `WsdlModel` containing all parsed WSDL elements
///
/// # Errors
///
/// Returns an error if the XML is malformed or the WSDL is invalid
pub fn parse_wsdl(xml: &str) -> Result<WsdlModel, Box<dyn Error>> {
    #[cfg(feature = "tracing")]
    info!(xml_size = xml.len(), "Starting WSDL parsing");

    let reader = Reader::from_str(xml);
    let result = WsdlParser::new(reader).parse();

    #[cfg(feature = "tracing")]
    match &result {
        Ok(model) => info!(
            service_count = model.services.len(),
            message_count = model.messages.len(),
            port_type_count = model.port_types.len(),
            "WSDL parsing completed successfully"
        ),
        Err(e) => tracing::error!(error = %e, "WSDL parsing failed"),
    }

    result
}

/// WSDL parser state
///
/// This struct maintains the parsing state while traversing the WSDL document.
/// It is used by the parsing functions in the submodules.
pub struct WsdlParser<B: std::io::BufRead> {
    pub(super) reader: Reader<B>,
    pub(super) namespaces: HashMap<String, String>,
    pub(super) target_namespace: Option<String>,
    pub(super) model: WsdlModel,
}

impl<B: std::io::BufRead> WsdlParser<B> {
    /// Create a new WSDL parser
    pub fn new(reader: Reader<B>) -> Self {
        Self {
            reader,
            namespaces: HashMap::new(),
            target_namespace: None,
            model: WsdlModel::default(),
        }
    }

    /// Resolve a namespace prefix to its URI
    #[allow(dead_code)]
    pub fn resolve_prefix(&self, prefix: &str) -> Option<&String> {
        self.namespaces.get(prefix)
    }

    /// Get namespace URI from an element name
    ///
    /// For example, "soap:binding" returns the namespace URI for the "soap" prefix
    pub(super) fn get_namespace_uri(&self, element_name: &[u8]) -> Option<&String> {
        // Find the prefix (everything before ':')
        if let Some(colon_pos) = element_name.iter().position(|&b| b == b':') {
            let prefix = String::from_utf8_lossy(&element_name[..colon_pos]);
            self.namespaces.get(prefix.as_ref())
        } else {
            None
        }
    }

    /// Parse a top-level `<wsdl:import namespace=".." location=".."/>`.
    ///
    /// This is the WSDL-document-level import (a reference to another WSDL),
    /// distinct from an `<xsd:import>` inside `<types>` which the schema
    /// loader (C4) walks instead.
    fn parse_wsdl_import(&mut self, e: &BytesStart) -> Result<(), Box<dyn Error>> {
        let mut namespace = String::new();
        let mut location = String::new();
        for attr in e.attributes().with_checks(false) {
            let attr = attr?;
            let val = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"namespace" => namespace = val.to_string(),
                b"location" => location = val.to_string(),
                _ => {}
            }
        }
        self.model.imports.push(WsdlImport { namespace, location });
        Ok(())
    }

    /// Parse the root-level `<wsdl:documentation>` element's text content.
    fn parse_documentation(&mut self) -> Result<(), Box<dyn Error>> {
        let mut buf = Vec::new();
        let mut text = String::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::End(e) if e.local_name().as_ref() == b"documentation" => break,
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }
        if !text.trim().is_empty() {
            self.model.doc = Some(text.trim().to_string());
        }
        Ok(())
    }

    /// Parse the WSDL document
    ///
    /// This orchestrates parsing of all WSDL elements by dispatching
    /// to the appropriate parsing functions in submodules.
    pub fn parse(mut self) -> Result<WsdlModel, Box<dyn Error>> {
        #[cfg(feature = "tracing")]
        debug!("Starting WSDL document traversal");

        let mut buf = Vec::new();
        loop {
            match self.reader.read_event_into(&mut buf)? {
                Event::Start(ev) => match ev.local_name().as_ref() {
                    b"definitions" => {
                        #[cfg(feature = "tracing")]
                        debug!("Parsing definitions element");
                        self.parse_definitions_attrs(&ev)?
                    }
                    b"types" => {
                        #[cfg(feature = "tracing")]
                        debug!("Parsing types element");
                        self.parse_types()?
                    }
                    b"message" => {
                        #[cfg(feature = "tracing")]
                        debug!("Parsing message element");
                        self.parse_message(&ev)?
                    }
                    b"portType" => {
                        #[cfg(feature = "tracing")]
                        debug!("Parsing portType element");
                        self.parse_port_type(&ev)?
                    }
                    b"binding" => {
                        #[cfg(feature = "tracing")]
                        debug!("Parsing binding element");
                        self.parse_binding(&ev)?
                    }
                    b"service" => {
                        #[cfg(feature = "tracing")]
                        debug!("Parsing service element");
                        self.parse_service(&ev)?
                    }
                    b"import" => self.parse_wsdl_import(&ev)?,
                    b"documentation" => self.parse_documentation()?,
                    _ => {}
                },
                Event::Empty(ev) if ev.local_name().as_ref() == b"import" => {
                    self.parse_wsdl_import(&ev)?
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear()
        }

        self.model.target_namespace = self.target_namespace;
        self.model.namespaces = self.namespaces;
        Ok(self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wsdl() {
        let wsdl = r#"<?xml version="1.0" encoding="utf-8"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:tns="http://tempuri.org/"
             targetNamespace="http://tempuri.org/"
             name="Calculator">
  <types>
    <schema xmlns="http://www.w3.org/2001/XMLSchema"
            targetNamespace="http://tempuri.org/">
      <element name="Add">
        <complexType>
          <sequence>
            <element name="intA" type="int"/>
            <element name="intB" type="int"/>
          </sequence>
        </complexType>
      </element>
    </schema>
  </types>

  <message name="AddSoapIn">
    <part name="parameters" element="tns:Add"/>
  </message>

  <message name="AddSoapOut">
    <part name="parameters" element="tns:AddResponse"/>
  </message>

  <portType name="CalculatorSoap">
    <operation name="Add">
      <input message="tns:AddSoapIn"/>
      <output message="tns:AddSoapOut"/>
    </operation>
  </portType>

  <binding name="CalculatorSoap" type="tns:CalculatorSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="Add">
      <soap:operation soapAction="http://tempuri.org/Add" style="document"/>
      <input>
        <soap:body use="literal"/>
      </input>
      <output>
        <soap:body use="literal"/>
      </output>
    </operation>
  </binding>

  <service name="Calculator">
    <port name="CalculatorSoap" binding="tns:CalculatorSoap">
      <soap:address location="http://www.dneonline.com/calculator.asmx"/>
    </port>
  </service>
</definitions>"#;

        let result = parse_wsdl(wsdl);
        assert!(result.is_ok());

        let model = result.unwrap();
        assert_eq!(model.name, Some("Calculator".to_string()));
        assert_eq!(
            model.target_namespace,
            Some("http://tempuri.org/".to_string())
        );
        assert_eq!(model.messages.len(), 2);
        assert_eq!(model.port_types.len(), 1);
        assert_eq!(model.bindings.len(), 1);
        assert_eq!(model.services.len(), 1);
    }

    #[test]
    fn parses_documentation_and_import() {
        let wsdl = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:tns="http://tempuri.org/shared"
             targetNamespace="http://tempuri.org/">
  <documentation>A minimal ping service.</documentation>
  <import namespace="http://tempuri.org/shared" location="shared.wsdl"/>
  <types>
    <schema xmlns="http://www.w3.org/2001/XMLSchema" targetNamespace="http://tempuri.org/">
      <element name="Ping" type="string"/>
    </schema>
  </types>
</definitions>"#;

        let model = parse_wsdl(wsdl).unwrap();
        assert_eq!(model.doc(), Some("A minimal ping service."));
        assert_eq!(model.imports().len(), 1);
        assert_eq!(model.imports()[0].location, "shared.wsdl");
        assert!(model.schema().is_some());
    }

    #[test]
    fn tracks_multiple_bindings_for_soap11_and_soap12() {
        let wsdl = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/"
             xmlns:soap12="http://schemas.xmlsoap.org/wsdl/soap12/"
             xmlns:tns="http://tempuri.org/"
             targetNamespace="http://tempuri.org/"
             name="Calculator">
  <message name="AddSoapIn">
    <part name="parameters" element="tns:Add"/>
  </message>
  <message name="AddSoapOut">
    <part name="parameters" element="tns:AddResponse"/>
  </message>
  <portType name="CalculatorSoap">
    <operation name="Add">
      <input message="tns:AddSoapIn"/>
      <output message="tns:AddSoapOut"/>
    </operation>
  </portType>
  <binding name="CalculatorSoap" type="tns:CalculatorSoap">
    <soap:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="Add">
      <soap:operation soapAction="http://tempuri.org/Add" style="document"/>
      <input><soap:body use="literal"/></input>
      <output><soap:body use="literal"/></output>
    </operation>
  </binding>
  <binding name="CalculatorSoap12" type="tns:CalculatorSoap">
    <soap12:binding transport="http://schemas.xmlsoap.org/soap/http"/>
    <operation name="Add">
      <soap12:operation soapAction="http://tempuri.org/Add" style="document"/>
      <input><soap12:body use="literal"/></input>
      <output><soap12:body use="literal"/></output>
    </operation>
  </binding>
  <service name="Calculator">
    <port name="CalculatorSoap" binding="tns:CalculatorSoap">
      <soap:address location="http://example.org/calculator.asmx"/>
    </port>
  </service>
</definitions>"#;

        let model = parse_wsdl(wsdl).unwrap();
        // Only the SOAP 1.1 binding is recognized; SOAP 1.2 is an explicit non-goal.
        assert_eq!(model.bindings.len(), 1);
        assert_eq!(model.bindings[0].soap_version, "1.1");
        assert_eq!(model.port_types[0].operations.len(), 1);
    }
}
