//! Form field extraction.
//!
//! Fields come from the request body (for POST, PUT, and PATCH) followed by
//! the query string, so a field present in both resolves to the body value.
//! Bodies are read as `application/x-www-form-urlencoded` or
//! `multipart/form-data`; any other content type contributes no fields.
//!
//! Values are kept as raw bytes. A page body submitted as `%FF%00a` is
//! stored as exactly `[0xFF, 0x00, b'a']`.

use std::borrow::Cow;

use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::{Method, header};
use percent_encoding::percent_decode;

/// Error reading form fields from a request.
#[derive(Debug, thiserror::Error)]
pub(crate) enum FormError {
    /// Request body could not be read.
    #[error("Failed to read form body: {0}")]
    Body(#[from] BytesRejection),

    /// Multipart request is missing a usable boundary.
    #[error("Invalid multipart request: {0}")]
    MultipartRequest(#[from] MultipartRejection),

    /// Multipart body is malformed.
    #[error("Malformed multipart body: {0}")]
    Multipart(#[from] MultipartError),
}

/// Form fields of a request, in lookup order.
#[derive(Debug, Default)]
pub(crate) struct FormData {
    fields: Vec<(String, Vec<u8>)>,
}

/// How a request body is encoded.
#[derive(Debug, PartialEq, Eq)]
enum BodyEncoding {
    UrlEncoded,
    Multipart,
    None,
}

impl FormData {
    /// Read form fields from the query string and, where the method
    /// carries one, the request body.
    pub(crate) async fn from_request(req: Request) -> Result<Self, FormError> {
        let query_fields = req
            .uri()
            .query()
            .map(|query| parse_urlencoded(query.as_bytes()))
            .unwrap_or_default();

        let mut fields = match body_encoding(&req) {
            BodyEncoding::UrlEncoded => {
                let body = Bytes::from_request(req, &()).await?;
                parse_urlencoded(&body)
            }
            BodyEncoding::Multipart => read_multipart(req).await?,
            BodyEncoding::None => Vec::new(),
        };
        fields.extend(query_fields);

        Ok(Self { fields })
    }

    /// First value submitted for `name`.
    pub(crate) fn value(&self, name: &str) -> Option<&[u8]> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_slice())
    }

    /// First value for `name` decoded as UTF-8, empty if absent.
    pub(crate) fn text(&self, name: &str) -> Cow<'_, str> {
        String::from_utf8_lossy(self.value(name).unwrap_or_default())
    }
}

fn body_encoding(req: &Request) -> BodyEncoding {
    if ![Method::POST, Method::PUT, Method::PATCH].contains(req.method()) {
        return BodyEncoding::None;
    }

    let essence = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if essence.eq_ignore_ascii_case("application/x-www-form-urlencoded") {
        BodyEncoding::UrlEncoded
    } else if essence.eq_ignore_ascii_case("multipart/form-data") {
        BodyEncoding::Multipart
    } else {
        BodyEncoding::None
    }
}

async fn read_multipart(req: Request) -> Result<Vec<(String, Vec<u8>)>, FormError> {
    let mut multipart = Multipart::from_request(req, &()).await?;
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };
        let value = field.bytes().await?;
        fields.push((name, value.to_vec()));
    }
    Ok(fields)
}

/// Split `a=1&b=2` into decoded pairs. Empty segments are skipped and a
/// segment without `=` has an empty value.
fn parse_urlencoded(input: &[u8]) -> Vec<(String, Vec<u8>)> {
    input
        .split(|&b| b == b'&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = match segment.iter().position(|&b| b == b'=') {
                Some(eq) => (&segment[..eq], &segment[eq + 1..]),
                None => (segment, &[][..]),
            };
            let key = String::from_utf8_lossy(&decode_component(key)).into_owned();
            (key, decode_component(value))
        })
        .collect()
}

/// Percent-decode one component, with `+` meaning space.
fn decode_component(raw: &[u8]) -> Vec<u8> {
    let spaced: Vec<u8> = raw
        .iter()
        .map(|&b| if b == b'+' { b' ' } else { b })
        .collect();
    percent_decode(&spaced).collect()
}
