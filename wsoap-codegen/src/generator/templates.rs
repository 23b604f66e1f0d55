//! Renders the file-level header that wraps the generated types and
//! operations modules: the `#![allow(...)]` preamble, a doc comment naming
//! the source WSDL, and the `use` block the rest of the generated file
//! depends on.
//!
//! Templated with `tera` rather than built up by hand so the header's shape
//! stays declarative and easy to extend (e.g. adding a generation-timestamp
//! line) without another round of string-concatenation surgery.

use std::sync::OnceLock;
use tera::{Context, Tera};

use crate::error::{CodegenError, Result};
use crate::parser::WsdlModel;
use crate::SoapClientGenerator;

const HEADER_TEMPLATE: &str = r#"// This file was automatically generated by wsoap-codegen.
// DO NOT EDIT - your changes will be overwritten on the next generation run.
//
// Source WSDL: {{ target_namespace }}
// SOAP version: {{ soap_version }}
#![allow(dead_code, clippy::all)]

use serde::{Deserialize, Serialize};
use wsoap_runtime::{SoapClient, SoapResult};

"#;

fn tera() -> &'static Tera {
    static TERA: OnceLock<Tera> = OnceLock::new();
    TERA.get_or_init(|| {
        let mut tera = Tera::default();
        tera.add_raw_template("header", HEADER_TEMPLATE)
            .expect("header template is valid");
        tera
    })
}

/// Render the header that precedes `types_code` and `operations_code` in the
/// generated output file. `types_code`/`operations_code` are accepted so the
/// template can be extended to summarize them (operation count, type count)
/// without changing the caller's signature again.
pub fn render_header(
    wsdl: &WsdlModel,
    config: &SoapClientGenerator,
    _types_code: &str,
    _operations_code: &str,
) -> Result<String> {
    let mut ctx = Context::new();
    ctx.insert(
        "target_namespace",
        wsdl.target_namespace().unwrap_or("<none>"),
    );
    ctx.insert("soap_version", &format!("{:?}", config.soap_version()));

    tera()
        .render("header", &ctx)
        .map_err(|e| CodegenError::CodeGeneration(format!("header template render failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_wsdl;

    const WSDL: &str = r#"<?xml version="1.0"?>
<definitions xmlns="http://schemas.xmlsoap.org/wsdl/"
             targetNamespace="http://tempuri.org/"
             name="Calculator"/>"#;

    #[test]
    fn render_header_includes_namespace() {
        let model = parse_wsdl(WSDL).unwrap();
        let config = SoapClientGenerator::builder()
            .wsdl_path("calculator.wsdl")
            .out_dir(".")
            .build()
            .unwrap();
        let header = render_header(&model, &config, "", "").unwrap();
        assert!(header.contains("http://tempuri.org/"));
        assert!(header.contains("use wsoap_runtime::{SoapClient, SoapResult};"));
    }
}
