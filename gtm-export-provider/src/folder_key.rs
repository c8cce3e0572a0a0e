use std::fmt;

use gtm_export_model::Folder;
use serde_json::Value;

use crate::{ProviderError, ProviderResult};

/// Selects a folder for scoped queries.
///
/// Most callers use [`FolderKey::IdOrName`], which matches a folder's id or
/// its name, whichever matches first in declaration order. The explicit
/// variants restrict matching to one attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FolderKey {
    Id(String),
    Name(String),
    IdOrName(String),
}

impl FolderKey {
    /// Parses a dual-key selector. Blank selectors are rejected.
    pub fn parse(selector: &str) -> ProviderResult<Self> {
        non_blank(selector).map(|s| Self::IdOrName(s.to_string()))
    }

    /// A selector that only matches a folder id.
    pub fn id(folder_id: &str) -> ProviderResult<Self> {
        non_blank(folder_id).map(|s| Self::Id(s.to_string()))
    }

    /// A selector that only matches a folder name.
    pub fn name(name: &str) -> ProviderResult<Self> {
        non_blank(name).map(|s| Self::Name(s.to_string()))
    }

    /// The raw selector text.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Id(s) | Self::Name(s) | Self::IdOrName(s) => s,
        }
    }

    /// Whether this key selects `folder`.
    pub fn matches(&self, folder: &Folder) -> bool {
        match self {
            Self::Id(id) => folder.folder_id == *id,
            Self::Name(name) => folder.name == *name,
            Self::IdOrName(key) => folder.folder_id == *key || folder.name == *key,
        }
    }
}

fn non_blank(selector: &str) -> ProviderResult<&str> {
    if selector.trim().is_empty() {
        Err(ProviderError::InvalidSelector(
            "folder selector must not be blank".into(),
        ))
    } else {
        Ok(selector)
    }
}

impl fmt::Display for FolderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(s) => write!(f, "id:{s}"),
            Self::Name(s) => write!(f, "name:{s}"),
            Self::IdOrName(s) => f.write_str(s),
        }
    }
}

impl TryFrom<&str> for FolderKey {
    type Error = ProviderError;

    fn try_from(selector: &str) -> Result<Self, Self::Error> {
        Self::parse(selector)
    }
}

impl TryFrom<String> for FolderKey {
    type Error = ProviderError;

    fn try_from(selector: String) -> Result<Self, Self::Error> {
        Self::parse(&selector)
    }
}

/// Accepts selectors arriving as JSON, e.g. from a host extension.
///
/// Strings and integers are valid (folder ids are sometimes numeric); any
/// other JSON type is an [`ProviderError::InvalidSelector`].
impl TryFrom<&Value> for FolderKey {
    type Error = ProviderError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Number(n) if n.is_u64() || n.is_i64() => Self::parse(&n.to_string()),
            other => Err(ProviderError::InvalidSelector(format!(
                "expected a folder id or name, got {other}"
            ))),
        }
    }
}
