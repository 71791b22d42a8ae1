use core_types::{AttachmentKind, DEFAULT_FILE_NAME, FileAttachment};
use tracing::debug;

/// Derives name, extension and category for a path without touching the filesystem.
pub fn classify(path: &str) -> FileAttachment {
    let name = match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => DEFAULT_FILE_NAME,
    };
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase());
    let kind = AttachmentKind::from_extension(extension.as_deref());

    FileAttachment {
        path: path.to_string(),
        kind,
        name: name.to_string(),
        extension,
    }
}

pub fn classify_all<I, S>(paths: I) -> Vec<FileAttachment>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let attachments: Vec<FileAttachment> =
        paths.into_iter().map(|path| classify(path.as_ref())).collect();
    debug!(count = attachments.len(), "classified attachment paths");
    attachments
}

#[cfg(test)]
mod tests {
    use core_types::{DOCUMENT_EXTENSIONS, IMAGE_EXTENSIONS};

    use super::*;

    #[test]
    fn extension_match_ignores_case() {
        let upper = classify("a/B.PNG");
        let lower = classify("a/b.png");
        assert_eq!(upper.kind, AttachmentKind::Image);
        assert_eq!(lower.kind, AttachmentKind::Image);
        assert_eq!(upper.name, "B.PNG");
        assert_eq!(upper.extension.as_deref(), Some("png"));
    }

    #[test]
    fn name_without_dot_has_no_extension() {
        let attachment = classify("README");
        assert_eq!(attachment.name, "README");
        assert_eq!(attachment.extension, None);
        assert_eq!(attachment.kind, AttachmentKind::Other);
    }

    #[test]
    fn trailing_dot_gives_empty_extension() {
        let attachment = classify("file.");
        assert_eq!(attachment.extension.as_deref(), Some(""));
        assert_eq!(attachment.kind, AttachmentKind::Other);
    }

    #[test]
    fn every_image_extension_is_an_image() {
        for ext in IMAGE_EXTENSIONS {
            assert_eq!(classify(&format!("x.{ext}")).kind, AttachmentKind::Image, "{ext}");
        }
    }

    #[test]
    fn every_document_extension_is_a_document() {
        for ext in DOCUMENT_EXTENSIONS {
            assert_eq!(
                classify(&format!("x.{ext}")).kind,
                AttachmentKind::Document,
                "{ext}"
            );
        }
    }

    #[test]
    fn unknown_extension_is_other() {
        assert_eq!(classify("x.exe").kind, AttachmentKind::Other);
        assert_eq!(classify("archive.tar.gz").extension.as_deref(), Some("gz"));
    }

    #[test]
    fn empty_or_directory_path_falls_back_to_default_name() {
        let empty = classify("");
        assert_eq!(empty.name, "file");
        assert_eq!(empty.path, "");
        assert_eq!(empty.extension, None);
        assert_eq!(empty.kind, AttachmentKind::Other);

        assert_eq!(classify("/home/user/uploads/").name, "file");
    }

    #[test]
    fn keeps_original_path_untouched() {
        let attachment = classify("/sandbox/Reports/Q3 Summary.PDF");
        assert_eq!(attachment.path, "/sandbox/Reports/Q3 Summary.PDF");
        assert_eq!(attachment.name, "Q3 Summary.PDF");
        assert_eq!(attachment.kind, AttachmentKind::Document);
    }

    #[test]
    fn dotfile_uses_text_after_dot() {
        let attachment = classify("home/.bashrc");
        assert_eq!(attachment.extension.as_deref(), Some("bashrc"));
        assert_eq!(attachment.kind, AttachmentKind::Other);
    }

    #[test]
    fn classify_all_preserves_order() {
        let attachments = classify_all(["b.pdf", "a.png", "c"]);
        let kinds: Vec<_> = attachments.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds,
            vec![
                AttachmentKind::Document,
                AttachmentKind::Image,
                AttachmentKind::Other
            ]
        );
    }
}
