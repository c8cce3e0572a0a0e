use serde::{Deserialize, Serialize};

/// Construction settings for [`ExportProvider`](crate::ExportProvider).
///
/// Deserializable so hosts can embed it in their own settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProviderOptions {
    /// Resolve platform templates such as "Custom HTML Tag" when the export
    /// does not declare them.
    pub include_default_templates: bool,
    /// Reject sources larger than this many bytes. `None` means no limit.
    pub max_source_bytes: Option<u64>,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            include_default_templates: true,
            max_source_bytes: None,
        }
    }
}
