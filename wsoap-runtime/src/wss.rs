//! WS-Security `UsernameToken` header, ported from
//! `original_source/proxy/wss-security-header.go`.

use serde::Serialize;

const WSSE_NS: &str = "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-secext-1.0.xsd";
const WSU_NS: &str = "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-wssecurity-utility-1.0.xsd";
const PASSWORD_TEXT_TYPE: &str =
    "http://docs.oasis-open.org/wss/2004/01/oasis-200401-wss-username-token-profile-1.0#PasswordText";

/// A `<wsse:Security>` SOAP header carrying a `PasswordText` username
/// token. Serialized with `quick_xml::se::to_string` and spliced into the
/// envelope's `<soap:Header>` the way `envelope.rs` already splices the
/// body, to avoid a second, heavier XML-building dependency.
#[derive(Debug, Clone, Serialize)]
#[serde(rename = "wsse:Security")]
pub struct SecurityHeader {
    #[serde(rename = "@xmlns:wsse")]
    pub xmlns_wsse: String,
    #[serde(rename = "@mustUnderstand", skip_serializing_if = "Option::is_none")]
    pub must_understand: Option<String>,
    #[serde(rename = "wsse:UsernameToken")]
    pub token: UsernameToken,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsernameToken {
    #[serde(rename = "@xmlns:wsu")]
    pub xmlns_wsu: String,
    #[serde(rename = "@xmlns:wsse")]
    pub xmlns_wsse: String,
    #[serde(rename = "@wsu:Id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "wsse:Username")]
    pub username: Username,
    #[serde(rename = "wsse:Password")]
    pub password: Password,
}

#[derive(Debug, Clone, Serialize)]
pub struct Username {
    #[serde(rename = "@xmlns:wsse")]
    pub xmlns_wsse: String,
    #[serde(rename = "$text")]
    pub value: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Password {
    #[serde(rename = "@xmlns:wsse")]
    pub xmlns_wsse: String,
    #[serde(rename = "@Type")]
    pub type_: String,
    #[serde(rename = "$text")]
    pub value: String,
}

impl SecurityHeader {
    /// Builds a `PasswordText` username token header for `username`/
    /// `password`, optionally tagged with `token_id` (a `wsu:Id` for
    /// signature/reference use) and `must_understand` ("1"/"0" per SOAP's
    /// `mustUnderstand` attribute).
    pub fn username_token(
        username: impl Into<String>,
        password: impl Into<String>,
        token_id: Option<String>,
        must_understand: Option<String>,
    ) -> Self {
        SecurityHeader {
            xmlns_wsse: WSSE_NS.to_string(),
            must_understand,
            token: UsernameToken {
                xmlns_wsu: WSU_NS.to_string(),
                xmlns_wsse: WSSE_NS.to_string(),
                id: token_id,
                username: Username {
                    xmlns_wsse: WSSE_NS.to_string(),
                    value: username.into(),
                },
                password: Password {
                    xmlns_wsse: WSSE_NS.to_string(),
                    type_: PASSWORD_TEXT_TYPE.to_string(),
                    value: password.into(),
                },
            },
        }
    }

    /// Renders this header to its wire XML, suitable for splicing into a
    /// `<soap:Header>` element.
    pub fn to_xml(&self) -> Result<String, crate::error::SoapError> {
        quick_xml::se::to_string(self)
            .map_err(|e| crate::error::SoapError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_username_token_header() {
        let header = SecurityHeader::username_token("alice", "s3cret", None, None);
        let xml = header.to_xml().unwrap();
        assert!(xml.contains("wsse:UsernameToken"));
        assert!(xml.contains("alice"));
        assert!(xml.contains("s3cret"));
        assert!(xml.contains(PASSWORD_TEXT_TYPE));
    }
}
