use std::collections::HashSet;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::container::{Container, ContainerVersion};
use crate::de;
use crate::entity::{
    BuiltInVariable, CustomTemplate, Entity, Folder, GroupedEntity, Tag, Trigger, Variable,
};
use crate::timestamp::parse_export_time;
use crate::{ModelError, ModelResult};

/// Export-level metadata.
///
/// Account and container ids and the fingerprint come from the container
/// version and are mirrored onto [`Container`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_format_version: Option<u32>,
    pub export_time: DateTime<Utc>,
    pub account_id: String,
    pub container_id: String,
    pub container_version_id: String,
    /// Opaque version stamp. Digit-like, but never treated as a number.
    pub fingerprint: String,
}

/// A fully normalized container export.
///
/// Every collection keeps the declaration order of the source document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportBundle {
    pub metadata: ExportMetadata,
    pub container: Container,
    pub container_version: ContainerVersion,
    pub folders: Vec<Folder>,
    pub tags: Vec<Tag>,
    pub triggers: Vec<Trigger>,
    pub variables: Vec<Variable>,
    pub built_in_variables: Vec<BuiltInVariable>,
    pub custom_templates: Vec<CustomTemplate>,
}

impl ExportBundle {
    /// Parses and normalizes an export from raw bytes.
    pub fn from_slice(bytes: &[u8]) -> ModelResult<Self> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    /// Normalizes an already-parsed export document.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        normalize(value)
    }
}

impl FromStr for ExportBundle {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_slice(s.as_bytes())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExport {
    #[serde(default)]
    export_format_version: Option<u32>,
    export_time: String,
    container_version: RawContainerVersion,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContainerVersion {
    #[serde(default, deserialize_with = "de::opt_string")]
    account_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    container_id: Option<String>,
    #[serde(deserialize_with = "de::string")]
    container_version_id: String,
    #[serde(deserialize_with = "de::string")]
    fingerprint: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    tag_manager_url: Option<String>,
    container: RawContainer,
    #[serde(default, deserialize_with = "de::section")]
    folder: Vec<Folder>,
    #[serde(default, deserialize_with = "de::section")]
    tag: Vec<Tag>,
    #[serde(default, deserialize_with = "de::section")]
    trigger: Vec<Trigger>,
    #[serde(default, deserialize_with = "de::section")]
    variable: Vec<Variable>,
    #[serde(default, deserialize_with = "de::section")]
    built_in_variable: Vec<BuiltInVariable>,
    #[serde(default, deserialize_with = "de::section")]
    custom_template: Vec<CustomTemplate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContainer {
    #[serde(default, deserialize_with = "de::opt_string")]
    account_id: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    container_id: Option<String>,
    name: String,
    #[serde(default)]
    public_id: String,
    #[serde(default, deserialize_with = "de::string_list")]
    usage_context: Vec<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    fingerprint: Option<String>,
}

fn require_object<'a>(value: &'a Value, key: &str, section: &'static str) -> ModelResult<&'a Value> {
    match value.get(key) {
        Some(v) if v.is_object() => Ok(v),
        _ => Err(ModelError::MissingSection(section)),
    }
}

/// Turns an export document into the typed model.
///
/// Fails if the document is not an object, if `containerVersion` or its
/// `container` is missing, or if a required field has the wrong shape.
pub fn normalize(value: Value) -> ModelResult<ExportBundle> {
    if !value.is_object() {
        return Err(ModelError::MalformedDocument(
            "expected a JSON object at the top level".into(),
        ));
    }
    let version = require_object(&value, "containerVersion", "containerVersion")?;
    require_object(version, "container", "containerVersion.container")?;

    let raw: RawExport = serde_json::from_value(value)?;
    let export_time = parse_export_time(&raw.export_time)?;
    let version = raw.container_version;

    let account_id = version
        .account_id
        .or_else(|| version.container.account_id.clone())
        .ok_or_else(|| ModelError::MalformedDocument("missing field `accountId`".into()))?;
    let container_id = version
        .container_id
        .or_else(|| version.container.container_id.clone())
        .ok_or_else(|| ModelError::MalformedDocument("missing field `containerId`".into()))?;

    let raw_container = version.container;
    let container = Container::new(
        raw_container.account_id.unwrap_or_else(|| account_id.clone()),
        raw_container.container_id.unwrap_or_else(|| container_id.clone()),
        raw_container.name,
        raw_container.public_id,
        raw_container.usage_context,
        raw_container
            .fingerprint
            .unwrap_or_else(|| version.fingerprint.clone()),
    );

    let container_version = ContainerVersion {
        account_id: account_id.clone(),
        container_id: container_id.clone(),
        container_version_id: version.container_version_id.clone(),
        name: version.name,
        description: version.description,
        path: version.path,
        fingerprint: version.fingerprint.clone(),
        tag_manager_url: version.tag_manager_url,
    };

    let metadata = ExportMetadata {
        export_format_version: raw.export_format_version,
        export_time,
        account_id,
        container_id,
        container_version_id: version.container_version_id,
        fingerprint: version.fingerprint,
    };

    let folders = version.folder;
    let folder_ids: HashSet<&str> = folders.iter().map(|f| f.folder_id.as_str()).collect();
    let mut tags = version.tag;
    let mut triggers = version.trigger;
    let mut variables = version.variable;
    detach_dangling(&mut tags, &folder_ids);
    detach_dangling(&mut triggers, &folder_ids);
    detach_dangling(&mut variables, &folder_ids);

    debug!(
        folders = folders.len(),
        tags = tags.len(),
        triggers = triggers.len(),
        variables = variables.len(),
        built_in_variables = version.built_in_variable.len(),
        custom_templates = version.custom_template.len(),
        "Normalized export document"
    );

    Ok(ExportBundle {
        metadata,
        container,
        container_version,
        folders,
        tags,
        triggers,
        variables,
        built_in_variables: version.built_in_variable,
        custom_templates: version.custom_template,
    })
}

/// Clears folder references that do not name a folder in the export.
fn detach_dangling<T: GroupedEntity>(items: &mut [T], folder_ids: &HashSet<&str>) {
    for item in items.iter_mut() {
        let dangling = item
            .parent_folder_id()
            .is_some_and(|folder_id| !folder_ids.contains(folder_id));
        if dangling {
            debug!(
                kind = T::KIND,
                id = item.id(),
                folder_id = item.parent_folder_id().unwrap_or_default(),
                "Dangling folder reference, treating entity as ungrouped"
            );
            item.clear_parent_folder();
        }
    }
}
