//! MIME-multipart attachments (MMA): the SOAP envelope travels as one
//! `text/xml` part, binary attachments as sibling parts referenced by
//! `Content-ID`. Ported from `original_source/proxy/mma-encoder.go` and
//! `mma-decoder.go`.

use crate::error::{SoapError, SoapResult};

/// A single MIME-multipart attachment part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

const CONTENT_ID_ROOT: &str = "soap-request@wsoap-runtime.proxy";

/// Encodes a SOAP envelope plus its attachments as a single
/// `multipart/related` body, matching `mmaEncoder.Encode`'s part framing
/// (manual `\r\n--boundary` writes, mirroring `envelope.rs`'s existing
/// preference for building wire text by hand over pulling in a generic
/// MIME-building crate). Returns raw bytes rather than a `String` since
/// attachment data is arbitrary binary, not necessarily valid UTF-8.
pub fn encode(envelope_xml: &str, attachments: &[Attachment], boundary: &str) -> Vec<u8> {
    let mut out = Vec::new();

    out.extend_from_slice(b"--");
    out.extend_from_slice(boundary.as_bytes());
    out.extend_from_slice(b"\r\n");
    out.extend_from_slice(b"Content-Type: text/xml;charset=UTF-8\r\n");
    out.extend_from_slice(b"Content-Transfer-Encoding: 8bit\r\n");
    out.extend_from_slice(format!("Content-ID: <{CONTENT_ID_ROOT}>\r\n\r\n").as_bytes());
    out.extend_from_slice(envelope_xml.as_bytes());
    out.extend_from_slice(b"\r\n");

    for attachment in attachments {
        out.extend_from_slice(b"--");
        out.extend_from_slice(boundary.as_bytes());
        out.extend_from_slice(b"\r\n");
        out.extend_from_slice(
            format!(
                "Content-Type: application/octet-stream; name={}\r\n",
                attachment.name
            )
            .as_bytes(),
        );
        out.extend_from_slice(b"Content-Transfer-Encoding: binary\r\n");
        out.extend_from_slice(format!("Content-ID: <{}>\r\n", attachment.name).as_bytes());
        out.extend_from_slice(
            format!(
                "Content-Disposition: attachment; name=\"{0}\"; filename=\"{0}\"\r\n\r\n",
                attachment.name
            )
            .as_bytes(),
        );
        out.extend_from_slice(&attachment.data);
        out.extend_from_slice(b"\r\n");
    }

    out.extend_from_slice(b"--");
    out.extend_from_slice(boundary.as_bytes());
    out.extend_from_slice(b"--\r\n");
    out
}

/// The `Content-Type` header value to send with an [`encode`]d body.
pub fn content_type(boundary: &str) -> String {
    format!(
        r#"multipart/related; start="<{CONTENT_ID_ROOT}>"; type="text/xml"; boundary="{boundary}""#
    )
}

/// Parses a response `Content-Type` header, returning the multipart
/// boundary when it's an MMA response (`start` names this module's root
/// Content-ID), or `None` for a plain (non-multipart) response. Mirrors
/// `getMmaHeader`.
pub fn parse_mma_header(content_type: &str) -> SoapResult<Option<String>> {
    let mut parts = content_type.split(';');
    let media_type = parts.next().unwrap_or_default().trim().to_ascii_lowercase();
    if !media_type.starts_with("multipart/") {
        return Ok(None);
    }

    let mut boundary = None;
    let mut start = None;
    for part in parts {
        if let Some((key, value)) = part.split_once('=') {
            let key = key.trim().to_ascii_lowercase();
            let value = value.trim().trim_matches('"').to_string();
            match key.as_str() {
                "boundary" => boundary = Some(value),
                "start" => start = Some(value),
                _ => {}
            }
        }
    }

    let boundary = boundary
        .filter(|b| !b.is_empty())
        .ok_or_else(|| SoapError::InvalidResponse("invalid multipart boundary".to_string()))?;

    let expected_start = format!("<{CONTENT_ID_ROOT}>");
    match start.as_deref() {
        Some(s) if s == expected_start => Ok(Some(boundary)),
        other => Err(SoapError::InvalidResponse(format!(
            "expected param start=\"{expected_start}\", got {:?}",
            other
        ))),
    }
}

/// Splits a decoded `multipart/related` response body into the SOAP
/// envelope part (`text/xml` content type) and any attachment parts,
/// mirroring `mmaDecoder.Decode`. Operates on raw bytes so binary
/// attachment parts aren't forced through a lossy UTF-8 conversion; only
/// the envelope part (which must be text) is converted to `String`.
pub fn decode(body: &[u8], boundary: &str) -> SoapResult<(String, Vec<Attachment>)> {
    let mut envelope = None;
    let mut attachments = Vec::new();

    for part in split_parts(body, boundary) {
        let (headers, content) = match find_subslice(part, b"\r\n\r\n") {
            Some(pos) => (&part[..pos], &part[pos + 4..]),
            None => continue,
        };
        let headers = String::from_utf8_lossy(headers);

        if headers.to_ascii_lowercase().contains("text/xml") {
            let content = trim_end_crlf(content);
            envelope = Some(String::from_utf8(content.to_vec()).map_err(|_| {
                SoapError::InvalidResponse("SOAP part is not valid UTF-8".to_string())
            })?);
            continue;
        }

        let content_id = headers
            .lines()
            .find(|l| l.to_ascii_lowercase().starts_with("content-id:"))
            .and_then(|l| l.split_once(':'))
            .map(|(_, v)| v.trim().trim_matches(|c| c == '<' || c == '>').to_string())
            .ok_or_else(|| SoapError::InvalidResponse("invalid multipart content id".to_string()))?;

        attachments.push(Attachment {
            name: content_id,
            data: trim_end_crlf(content).to_vec(),
        });
    }

    let envelope = envelope
        .ok_or_else(|| SoapError::InvalidResponse("no SOAP part found in MMA response".to_string()))?;

    Ok((envelope, attachments))
}

fn split_parts<'a>(body: &'a [u8], boundary: &str) -> Vec<&'a [u8]> {
    let delimiter = format!("--{boundary}");
    split_on_subslice(body, delimiter.as_bytes())
        .into_iter()
        .map(trim_start_crlf)
        .filter(|s| !s.is_empty() && *s != b"--\r\n" && *s != b"--")
        .collect()
}

/// Splits `haystack` on every occurrence of `needle`, the byte-slice
/// equivalent of `str::split` (which has no `&[u8]` counterpart).
fn split_on_subslice<'a>(haystack: &'a [u8], needle: &[u8]) -> Vec<&'a [u8]> {
    if needle.is_empty() {
        return vec![haystack];
    }
    let mut parts = Vec::new();
    let mut start = 0;
    while let Some(pos) = find_subslice(&haystack[start..], needle) {
        parts.push(&haystack[start..start + pos]);
        start += pos + needle.len();
    }
    parts.push(&haystack[start..]);
    parts
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn trim_start_crlf(s: &[u8]) -> &[u8] {
    s.strip_prefix(b"\r\n").unwrap_or(s)
}

fn trim_end_crlf(s: &[u8]) -> &[u8] {
    s.strip_suffix(b"\r\n").unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_and_decodes_round_trip() {
        let attachments = vec![Attachment {
            name: "file1".to_string(),
            data: b"hello world".to_vec(),
        }];
        let encoded = encode("<soap:Envelope/>", &attachments, "BOUNDARY");

        let (envelope, decoded_attachments) = decode(&encoded, "BOUNDARY").unwrap();
        assert_eq!(envelope, "<soap:Envelope/>");
        assert_eq!(decoded_attachments.len(), 1);
        assert_eq!(decoded_attachments[0].name, "file1");
        assert_eq!(decoded_attachments[0].data, b"hello world");
    }

    #[test]
    fn encodes_and_decodes_non_utf8_binary_round_trip() {
        // A payload that isn't valid UTF-8 at all (e.g. the first bytes of
        // a PNG); from_utf8_lossy would corrupt this into replacement
        // characters and change its length.
        let data = vec![0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, 0x4a, 0x46, 0x00];
        let attachments = vec![Attachment {
            name: "photo.jpg".to_string(),
            data: data.clone(),
        }];
        let encoded = encode("<soap:Envelope/>", &attachments, "BOUNDARY");

        let (envelope, decoded_attachments) = decode(&encoded, "BOUNDARY").unwrap();
        assert_eq!(envelope, "<soap:Envelope/>");
        assert_eq!(decoded_attachments[0].data, data);
    }

    #[test]
    fn content_type_names_the_soap_part() {
        let ct = content_type("BOUNDARY");
        assert!(ct.contains("multipart/related"));
        assert!(ct.contains("BOUNDARY"));
    }

    #[test]
    fn parse_mma_header_extracts_boundary() {
        let ct = content_type("BOUNDARY");
        let boundary = parse_mma_header(&ct).unwrap();
        assert_eq!(boundary, Some("BOUNDARY".to_string()));
    }

    #[test]
    fn parse_mma_header_returns_none_for_plain_xml() {
        let boundary = parse_mma_header("text/xml; charset=utf-8").unwrap();
        assert_eq!(boundary, None);
    }
}
