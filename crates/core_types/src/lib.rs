use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico"];
pub const DOCUMENT_EXTENSIONS: &[&str] =
    &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt", "csv"];

/// Name used when a path has no usable trailing segment.
pub const DEFAULT_FILE_NAME: &str = "file";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Eq, PartialEq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentKind {
    Image,
    Document,
    Other,
}

impl AttachmentKind {
    /// Expects an already lower-cased extension.
    pub fn from_extension(extension: Option<&str>) -> Self {
        match extension {
            Some(ext) if IMAGE_EXTENSIONS.contains(&ext) => Self::Image,
            Some(ext) if DOCUMENT_EXTENSIONS.contains(&ext) => Self::Document,
            _ => Self::Other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Eq, PartialEq)]
pub struct FileAttachment {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl FileAttachment {
    pub fn is_image(&self) -> bool {
        self.kind == AttachmentKind::Image
    }

    pub fn is_document(&self) -> bool {
        self.kind == AttachmentKind::Document
    }
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ResolveError {
    #[error("url template `{template}` has no {{path}} placeholder")]
    MissingPlaceholder { template: String },

    #[error("attachment has an empty path")]
    EmptyPath,
}

/// Turns a classified attachment into a location the renderer can load.
///
/// `Ok(None)` means the attachment has no downloadable location; errors are
/// per attachment and never abort a whole message.
pub trait AttachmentUrlResolver: Send + Sync {
    fn resolve(&self, attachment: &FileAttachment) -> Result<Option<String>, ResolveError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopResolver;

impl AttachmentUrlResolver for NoopResolver {
    fn resolve(&self, _attachment: &FileAttachment) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_follows_extension_tables() {
        assert_eq!(AttachmentKind::from_extension(Some("ico")), AttachmentKind::Image);
        assert_eq!(AttachmentKind::from_extension(Some("csv")), AttachmentKind::Document);
        assert_eq!(AttachmentKind::from_extension(Some("")), AttachmentKind::Other);
        assert_eq!(AttachmentKind::from_extension(None), AttachmentKind::Other);
        // tables hold lower-case literals only
        assert_eq!(AttachmentKind::from_extension(Some("PNG")), AttachmentKind::Other);
    }

    #[test]
    fn serializes_kind_as_type_field() {
        let attachment = FileAttachment {
            path: "/tmp/a.png".to_string(),
            kind: AttachmentKind::Image,
            name: "a.png".to_string(),
            extension: Some("png".to_string()),
        };
        let value = serde_json::to_value(&attachment).expect("serialize");
        assert_eq!(value["type"], "image");
        assert_eq!(value["extension"], "png");

        let bare = FileAttachment {
            extension: None,
            kind: AttachmentKind::Other,
            ..attachment
        };
        let value = serde_json::to_value(&bare).expect("serialize");
        assert_eq!(value["type"], "other");
        assert!(value.get("extension").is_none());
    }

    #[test]
    fn noop_resolver_has_no_location() {
        let attachment = FileAttachment {
            path: "a.pdf".to_string(),
            kind: AttachmentKind::Document,
            name: "a.pdf".to_string(),
            extension: Some("pdf".to_string()),
        };
        assert_eq!(NoopResolver.resolve(&attachment), Ok(None));
    }
}
