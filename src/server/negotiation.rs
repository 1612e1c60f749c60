//! Content negotiation between JSON, XML and YAML
//!
//! Responses follow the `Accept` header ([`Accepts`] + [`Negotiated`]),
//! request bodies follow `Content-Type` ([`Payload`]). JSON is the default
//! on both sides.

use crate::core::error::{BookstoreError, BookstoreResult};
use crate::core::query::ListModel;
use axum::{
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Request},
    http::{HeaderMap, HeaderValue, StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde::de::DeserializeOwned;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_XML: &str = "application/xml";
pub const APPLICATION_YAML: &str = "application/x-yaml";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MediaFormat {
    #[default]
    Json,
    Xml,
    Yaml,
}

impl MediaFormat {
    fn from_media_type(media: &str) -> Option<Self> {
        let media = media.trim().to_ascii_lowercase();
        match media.as_str() {
            "application/json" | "application/*" | "*/*" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            "application/x-yaml" | "application/yaml" | "text/yaml" => Some(Self::Yaml),
            other if other.ends_with("+json") => Some(Self::Json),
            _ => None,
        }
    }

    /// First recognized entry of the `Accept` header, JSON otherwise
    pub fn from_accept(headers: &HeaderMap) -> Self {
        headers
            .get(header::ACCEPT)
            .and_then(|value| value.to_str().ok())
            .and_then(|accept| {
                accept
                    .split(',')
                    .filter_map(|part| part.split(';').next())
                    .find_map(Self::from_media_type)
            })
            .unwrap_or_default()
    }

    /// Format of a request body; `None` when the content type is unsupported
    pub fn from_content_type(headers: &HeaderMap) -> Option<Self> {
        match headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        {
            None => Some(Self::Json),
            Some(value) => value.split(';').next().and_then(Self::from_media_type),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Json => APPLICATION_JSON,
            Self::Xml => APPLICATION_XML,
            Self::Yaml => APPLICATION_YAML,
        }
    }

    pub fn serialize<T: Serialize>(&self, value: &T) -> BookstoreResult<Vec<u8>> {
        match self {
            Self::Json => serde_json::to_vec(value)
                .map_err(|e| BookstoreError::Internal(format!("JSON encoding failed: {}", e))),
            Self::Xml => quick_xml::se::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| BookstoreError::Internal(format!("XML encoding failed: {}", e))),
            Self::Yaml => serde_yaml::to_string(value)
                .map(String::into_bytes)
                .map_err(|e| BookstoreError::Internal(format!("YAML encoding failed: {}", e))),
        }
    }

    pub fn deserialize<T: DeserializeOwned>(&self, bytes: &[u8]) -> BookstoreResult<T> {
        match self {
            Self::Json => Ok(serde_json::from_slice(bytes)?),
            Self::Xml => {
                let text = std::str::from_utf8(bytes)
                    .map_err(|e| BookstoreError::bad_request(format!("Invalid XML: {}", e)))?;
                quick_xml::de::from_str(text)
                    .map_err(|e| BookstoreError::bad_request(format!("Invalid XML: {}", e)))
            }
            Self::Yaml => Ok(serde_yaml::from_slice(bytes)?),
        }
    }
}

/// Response format requested by the client
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Accepts(pub MediaFormat);

impl<S> FromRequestParts<S> for Accepts
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Accepts(MediaFormat::from_accept(&parts.headers)))
    }
}

/// A list body: a bare sequence, or a [`ListModel`] root for XML
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    Items(Vec<T>),
    Rooted(ListModel<T>),
}

/// A body serialized in the negotiated format
#[derive(Debug)]
pub struct Negotiated<T> {
    pub format: MediaFormat,
    pub status: StatusCode,
    pub body: T,
}

impl<T> Negotiated<T> {
    pub fn ok(format: MediaFormat, body: T) -> Self {
        Self {
            format,
            status: StatusCode::OK,
            body,
        }
    }

    pub fn created(format: MediaFormat, body: T) -> Self {
        Self {
            format,
            status: StatusCode::CREATED,
            body,
        }
    }
}

impl<T> Negotiated<ListBody<T>> {
    /// XML cannot encode a top-level sequence, so it gets a `<List>` root
    pub fn list(format: MediaFormat, items: Vec<T>) -> Self {
        let body = match format {
            MediaFormat::Xml => ListBody::Rooted(ListModel { content: items }),
            MediaFormat::Json | MediaFormat::Yaml => ListBody::Items(items),
        };
        Self::ok(format, body)
    }
}

impl<T: Serialize> IntoResponse for Negotiated<T> {
    fn into_response(self) -> Response {
        match self.format.serialize(&self.body) {
            Ok(bytes) => (
                self.status,
                [(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(self.format.content_type()),
                )],
                bytes,
            )
                .into_response(),
            Err(err) => err.into_response(),
        }
    }
}

/// Request body decoded by `Content-Type`; an empty body is `None`
#[derive(Debug)]
pub struct Payload<T>(pub Option<T>);

impl<S, T> FromRequest<S> for Payload<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = BookstoreError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let format = MediaFormat::from_content_type(req.headers())
            .ok_or_else(|| BookstoreError::bad_request("Unsupported content type"))?;
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| BookstoreError::bad_request(e.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Payload(None));
        }
        format.deserialize(&bytes).map(|value| Payload(Some(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::person::PersonDto;

    fn headers(name: header::HeaderName, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_accept_selection() {
        assert_eq!(MediaFormat::from_accept(&HeaderMap::new()), MediaFormat::Json);
        assert_eq!(
            MediaFormat::from_accept(&headers(header::ACCEPT, "application/xml")),
            MediaFormat::Xml
        );
        assert_eq!(
            MediaFormat::from_accept(&headers(header::ACCEPT, "text/html, application/yaml;q=0.8")),
            MediaFormat::Yaml
        );
        assert_eq!(
            MediaFormat::from_accept(&headers(header::ACCEPT, "image/png")),
            MediaFormat::Json
        );
    }

    #[test]
    fn test_unsupported_content_type() {
        assert_eq!(
            MediaFormat::from_content_type(&headers(header::CONTENT_TYPE, "text/plain")),
            None
        );
        assert_eq!(
            MediaFormat::from_content_type(&headers(
                header::CONTENT_TYPE,
                "application/json; charset=utf-8"
            )),
            Some(MediaFormat::Json)
        );
    }

    #[test]
    fn test_xml_root_is_type_name() {
        let dto = PersonDto::new("Ana", "Lima", "Rio", "Female");
        let xml = String::from_utf8(MediaFormat::Xml.serialize(&dto).unwrap()).unwrap();
        assert!(xml.starts_with("<Person>"));
        assert!(xml.contains("<first_name>Ana</first_name>"));
    }

    #[test]
    fn test_xml_list_gets_a_root() {
        let people = vec![
            PersonDto::new("Ana", "Lima", "Rio", "Female"),
            PersonDto::new("Bruno", "Reis", "Recife", "Male"),
        ];
        let response = Negotiated::list(MediaFormat::Xml, people.clone());
        let xml = String::from_utf8(MediaFormat::Xml.serialize(&response.body).unwrap()).unwrap();
        assert!(xml.starts_with("<List>"));
        assert!(xml.contains("<first_name>Bruno</first_name>"));

        let response = Negotiated::list(MediaFormat::Json, people);
        let json: serde_json::Value =
            serde_json::from_slice(&MediaFormat::Json.serialize(&response.body).unwrap()).unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_yaml_body_decodes() {
        let yaml = b"first_name: Ana\nlast_name: Lima\naddress: Rio\ngender: Female\n";
        let dto: PersonDto = MediaFormat::Yaml.deserialize(yaml).unwrap();
        assert_eq!(dto.first_name, "Ana");
        assert!(dto.enabled);
    }
}
