use core_types::{AttachmentKind, AttachmentUrlResolver, FileAttachment, ResolveError};

const PATH_PLACEHOLDER: &str = "{path}";
const NAME_PLACEHOLDER: &str = "{name}";

/// Builds download URLs by substituting `{path}` and `{name}` into a template,
/// e.g. `https://files.example.com/download/{path}`.
#[derive(Debug, Clone)]
pub struct TemplateUrlResolver {
    template: String,
    kinds: Vec<AttachmentKind>,
}

impl TemplateUrlResolver {
    pub fn new(
        template: impl Into<String>,
        kinds: impl IntoIterator<Item = AttachmentKind>,
    ) -> Result<Self, ResolveError> {
        let template = template.into();
        if !template.contains(PATH_PLACEHOLDER) {
            return Err(ResolveError::MissingPlaceholder { template });
        }
        Ok(Self {
            template,
            kinds: kinds.into_iter().collect(),
        })
    }

    /// Images and documents only; `other` attachments have no download location.
    pub fn with_default_kinds(template: impl Into<String>) -> Result<Self, ResolveError> {
        Self::new(template, [AttachmentKind::Image, AttachmentKind::Document])
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl AttachmentUrlResolver for TemplateUrlResolver {
    fn resolve(&self, attachment: &FileAttachment) -> Result<Option<String>, ResolveError> {
        if !self.kinds.contains(&attachment.kind) {
            return Ok(None);
        }
        let relative = attachment.path.trim_start_matches('/');
        if relative.is_empty() {
            return Err(ResolveError::EmptyPath);
        }

        let url = self
            .template
            .replace(PATH_PLACEHOLDER, &encode_path(relative))
            .replace(NAME_PLACEHOLDER, &urlencoding::encode(&attachment.name));
        Ok(Some(url))
    }
}

fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
