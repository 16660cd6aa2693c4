//! Per-request input record handed to the core by the transport layer.
//!
//! The transport owns everything before this point: socket handling, header
//! parsing, multipart decoding, and the static-resource short-circuit. By the
//! time a [`RequestView`] exists, query and form values are merged into one
//! multi-valued map and uploaded parts carry their own byte sources.

use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

/// One uploaded multipart part.
///
/// The byte source is readable at most once; the binder (or the handler it
/// hands the part to) must not assume re-readability. Temp-storage cleanup
/// after response completion belongs to the transport.
pub struct UploadedPart {
    /// Client-supplied file name.
    pub file_name: String,
    /// Declared content type of the part.
    pub content_type: String,
    /// Size in bytes as reported by the transport.
    pub size_bytes: u64,
    source: Option<Box<dyn Read + Send>>,
}

impl UploadedPart {
    /// Wrap a transport-provided byte source.
    #[must_use]
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        size_bytes: u64,
        source: Box<dyn Read + Send>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            size_bytes,
            source: Some(source),
        }
    }

    /// Convenience constructor over an in-memory buffer (tests, small parts).
    #[must_use]
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        let size_bytes = bytes.len() as u64;
        Self::new(file_name, content_type, size_bytes, Box::new(io::Cursor::new(bytes)))
    }

    /// Drain the byte source. A second call returns an empty buffer; the
    /// source is consumed by the first read.
    pub fn take_bytes(&mut self) -> io::Result<Vec<u8>> {
        let mut buf = Vec::new();
        if let Some(mut source) = self.source.take() {
            source.read_to_end(&mut buf)?;
        }
        Ok(buf)
    }

    /// Stream the part's bytes into `path`, returning the byte count written.
    /// Consumes the byte source like [`UploadedPart::take_bytes`].
    pub fn save_to(&mut self, path: impl AsRef<Path>) -> io::Result<u64> {
        let bytes = self.take_bytes()?;
        let mut file = File::create(path)?;
        file.write_all(&bytes)?;
        Ok(bytes.len() as u64)
    }

    /// Whether the byte source is still unread.
    #[must_use]
    pub fn is_unread(&self) -> bool {
        self.source.is_some()
    }
}

impl std::fmt::Debug for UploadedPart {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadedPart")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size_bytes", &self.size_bytes)
            .field("unread", &self.source.is_some())
            .finish()
    }
}

/// Already-parsed request record, the core's only input per request.
#[derive(Debug)]
pub struct RequestView {
    /// HTTP method.
    pub method: Method,
    /// Request path without query string. Empty paths normalize to `/`;
    /// trailing slashes are preserved (a trailing slash is a distinct
    /// segment, see the router module).
    pub path: String,
    /// Query and form values merged by the transport, multi-valued per name.
    pub params: HashMap<String, Vec<String>>,
    /// Uploaded multipart parts, grouped per part name. Repeated part names
    /// accumulate, which is what `FileList` parameters bind against.
    pub parts: HashMap<String, Vec<UploadedPart>>,
    /// Transport- or filter-installed request attributes.
    pub attributes: HashMap<String, Value>,
}

impl RequestView {
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        let mut path = path.into();
        if path.is_empty() {
            path.push('/');
        }
        Self {
            method,
            path,
            params: HashMap::new(),
            parts: HashMap::new(),
            attributes: HashMap::new(),
        }
    }

    /// Build a request from a path that may carry a query string, e.g.
    /// `/etudiant?age=21&ville=Lyon`.
    #[must_use]
    pub fn from_target(method: Method, target: &str) -> Self {
        let path = target.split('?').next().unwrap_or("/");
        let mut view = Self::new(method, path);
        if let Some(pos) = target.find('?') {
            for (k, v) in url::form_urlencoded::parse(target[pos + 1..].as_bytes()) {
                view.add_param(k.as_ref(), v.as_ref());
            }
        }
        view
    }

    /// Append one query/form value under `name`.
    pub fn add_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.params.entry(name.into()).or_default().push(value.into());
    }

    /// First value registered under `name`, if any.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Attach an uploaded part under its part name.
    pub fn add_part(&mut self, name: impl Into<String>, part: UploadedPart) {
        self.parts.entry(name.into()).or_default().push(part);
    }

    /// Install a request attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: Value) {
        self.attributes.insert(name.into(), value);
    }
}
