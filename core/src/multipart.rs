//! `multipart/form-data` bodies for media uploads.
//!
//! A `MultipartForm` is an ordered list of parts. It carries no boundary of
//! its own: the transport picks one per request and calls `encode`.

use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PartContent {
    Text(String),
    File {
        file_name: String,
        content_type: String,
        bytes: Vec<u8>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    pub name: String,
    pub content: PartContent,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartForm {
    parts: Vec<Part>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a form with one text part per top-level field of `value`.
    ///
    /// Strings are sent verbatim, numbers and booleans in their JSON
    /// spelling, `null` fields are skipped, array items become repeated
    /// `name[]` parts and nested objects are sent as JSON text.
    pub fn from_fields<T: Serialize + ?Sized>(value: &T) -> Result<Self, serde_json::Error> {
        let mut form = Self::new();
        let Value::Object(fields) = serde_json::to_value(value)? else {
            return Ok(form);
        };
        for (name, field) in fields {
            match field {
                Value::Null => {}
                Value::Array(items) => {
                    let name = format!("{name}[]");
                    for item in items {
                        form.push_text(&name, text_value(item));
                    }
                }
                other => form.push_text(&name, text_value(other)),
            }
        }
        Ok(form)
    }

    pub fn text(mut self, name: &str, value: impl Into<String>) -> Self {
        self.push_text(name, value.into());
        self
    }

    pub fn file(
        mut self,
        name: &str,
        file_name: &str,
        content_type: &str,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        self.parts.push(Part {
            name: name.to_string(),
            content: PartContent::File {
                file_name: file_name.to_string(),
                content_type: content_type.to_string(),
                bytes: bytes.into(),
            },
        });
        self
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Serialize the form using `boundary` as the part delimiter.
    pub fn encode(&self, boundary: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for part in &self.parts {
            out.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
            match &part.content {
                PartContent::Text(value) => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                            escape_quoted(&part.name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(value.as_bytes());
                }
                PartContent::File {
                    file_name,
                    content_type,
                    bytes,
                } => {
                    out.extend_from_slice(
                        format!(
                            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {content_type}\r\n\r\n",
                            escape_quoted(&part.name),
                            escape_quoted(file_name)
                        )
                        .as_bytes(),
                    );
                    out.extend_from_slice(bytes);
                }
            }
            out.extend_from_slice(b"\r\n");
        }
        out.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
        out
    }

    fn push_text(&mut self, name: &str, value: String) {
        self.parts.push(Part {
            name: name.to_string(),
            content: PartContent::Text(value),
        });
    }
}

/// Full `Content-Type` value for a form encoded with `boundary`.
pub fn content_type_with_boundary(boundary: &str) -> String {
    format!("{MULTIPART_FORM_DATA}; boundary={boundary}")
}

pub fn generate_boundary() -> String {
    format!("----gymhub-{}", Uuid::new_v4().simple())
}

fn text_value(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn escape_quoted(raw: &str) -> String {
    raw.replace('"', "%22")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
