pub mod classify;
pub mod grid;
pub mod references;
pub mod resolver;

pub use classify::{classify, classify_all};
pub use core_types::{
    AttachmentKind, AttachmentUrlResolver, FileAttachment, NoopResolver, ResolveError,
};
pub use grid::{AttachmentGrid, AttachmentView, MessageAttachments};
pub use references::{
    MARKER_PREFIX, MARKER_SUFFIX, append_references, count_references, extract_references,
    format_reference, remove_references,
};
pub use resolver::TemplateUrlResolver;
