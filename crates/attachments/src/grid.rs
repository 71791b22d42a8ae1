use core_types::{AttachmentKind, AttachmentUrlResolver, FileAttachment};
use serde::Serialize;
use tracing::{debug, warn};

use crate::classify::classify_all;
use crate::references::{extract_references, remove_references};

/// A message split into its display text and the files it references.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct MessageAttachments {
    pub text: String,
    pub attachments: Vec<FileAttachment>,
}

impl MessageAttachments {
    pub fn parse(content: &str) -> Self {
        let attachments = classify_all(extract_references(content));
        debug!(attachments = attachments.len(), "parsed message content");
        Self {
            text: remove_references(content),
            attachments,
        }
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments.is_empty()
    }

    pub fn grid(&self) -> AttachmentGrid {
        AttachmentGrid::new(self.attachments.clone())
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AttachmentView {
    #[serde(flatten)]
    pub attachment: FileAttachment,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Ordered attachments of one message, grouped by category on demand.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentGrid {
    attachments: Vec<FileAttachment>,
}

impl AttachmentGrid {
    pub fn new(attachments: Vec<FileAttachment>) -> Self {
        Self { attachments }
    }

    pub fn from_paths<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(classify_all(paths))
    }

    pub fn len(&self) -> usize {
        self.attachments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attachments.is_empty()
    }

    pub fn all(&self) -> &[FileAttachment] {
        &self.attachments
    }

    pub fn of_kind(&self, kind: AttachmentKind) -> impl Iterator<Item = &FileAttachment> {
        self.attachments.iter().filter(move |a| a.kind == kind)
    }

    pub fn images(&self) -> impl Iterator<Item = &FileAttachment> {
        self.of_kind(AttachmentKind::Image)
    }

    pub fn documents(&self) -> impl Iterator<Item = &FileAttachment> {
        self.of_kind(AttachmentKind::Document)
    }

    pub fn others(&self) -> impl Iterator<Item = &FileAttachment> {
        self.of_kind(AttachmentKind::Other)
    }

    /// Pairs each attachment with its location. A failing attachment gets no
    /// url; the rest of the grid is unaffected.
    pub fn resolve(&self, resolver: &dyn AttachmentUrlResolver) -> Vec<AttachmentView> {
        self.attachments
            .iter()
            .map(|attachment| {
                let url = match resolver.resolve(attachment) {
                    Ok(url) => url,
                    Err(err) => {
                        warn!(path = %attachment.path, "failed to resolve attachment url: {err}");
                        None
                    }
                };
                AttachmentView {
                    attachment: attachment.clone(),
                    url,
                }
            })
            .collect()
    }
}
