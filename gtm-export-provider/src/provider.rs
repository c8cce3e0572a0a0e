use std::path::Path;

use chrono::{DateTime, Utc};
use gtm_export_model::{
    BuiltInVariable, Container, ContainerVersion, CustomTemplate, ExportBundle, ExportMetadata,
    Folder, GroupedEntity, Tag, Trigger, Variable,
};
use serde_json::Value;
use tracing::info;

use crate::index::{FlatIndex, GroupedIndex};
use crate::{
    ExportSource, ExportSummary, FolderKey, Lookup, ProviderOptions, ProviderResult,
};

/// Read-only, indexed view over one container export.
///
/// Built in a single step from a source; once a value exists every index is
/// complete and nothing in it changes. All queries are synchronous and the
/// provider can be shared across threads without locking.
#[derive(Debug, Clone)]
pub struct ExportProvider {
    metadata: ExportMetadata,
    container: Container,
    container_version: ContainerVersion,
    folders: FlatIndex<Folder>,
    tags: GroupedIndex<Tag>,
    triggers: GroupedIndex<Trigger>,
    variables: GroupedIndex<Variable>,
    built_in_variables: FlatIndex<BuiltInVariable>,
    custom_templates: FlatIndex<CustomTemplate>,
    default_templates: FlatIndex<CustomTemplate>,
}

impl ExportProvider {
    // ── Construction ────────────────────────────────────────────

    /// Reads and indexes the export file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> ProviderResult<Self> {
        Self::load(path.as_ref()).await
    }

    /// Reads and indexes an export from any [`ExportSource`].
    pub async fn load(source: impl Into<ExportSource>) -> ProviderResult<Self> {
        Self::load_with(source, ProviderOptions::default()).await
    }

    pub async fn load_with(
        source: impl Into<ExportSource>,
        options: ProviderOptions,
    ) -> ProviderResult<Self> {
        let source = source.into();
        let bytes = source.read(options.max_source_bytes).await?;
        let bundle = ExportBundle::from_slice(&bytes)?;
        Ok(Self::with_options(bundle, &options))
    }

    pub fn from_slice(bytes: &[u8]) -> ProviderResult<Self> {
        Ok(Self::from_bundle(ExportBundle::from_slice(bytes)?))
    }

    pub fn from_value(value: Value) -> ProviderResult<Self> {
        Ok(Self::from_bundle(ExportBundle::from_value(value)?))
    }

    pub fn from_bundle(bundle: ExportBundle) -> Self {
        Self::with_options(bundle, &ProviderOptions::default())
    }

    /// Indexes an already-normalized bundle.
    pub fn with_options(bundle: ExportBundle, options: &ProviderOptions) -> Self {
        let defaults = if options.include_default_templates {
            CustomTemplate::platform_defaults()
        } else {
            Vec::new()
        };

        let provider = Self {
            metadata: bundle.metadata,
            container: bundle.container,
            container_version: bundle.container_version,
            folders: FlatIndex::new(bundle.folders),
            tags: GroupedIndex::new(bundle.tags),
            triggers: GroupedIndex::new(bundle.triggers),
            variables: GroupedIndex::new(bundle.variables),
            built_in_variables: FlatIndex::new(bundle.built_in_variables),
            custom_templates: FlatIndex::new(bundle.custom_templates),
            default_templates: FlatIndex::new(defaults),
        };

        info!(
            account_id = %provider.metadata.account_id,
            container_id = %provider.metadata.container_id,
            container_version_id = %provider.metadata.container_version_id,
            tags = provider.tags.len(),
            triggers = provider.triggers.len(),
            variables = provider.variables.len(),
            "Export indexed"
        );
        provider
    }

    // ── Metadata ────────────────────────────────────────────────

    pub fn metadata(&self) -> &ExportMetadata {
        &self.metadata
    }

    pub fn export_time(&self) -> DateTime<Utc> {
        self.metadata.export_time
    }

    pub fn account_id(&self) -> &str {
        &self.metadata.account_id
    }

    pub fn container_id(&self) -> &str {
        &self.metadata.container_id
    }

    pub fn container_version_id(&self) -> &str {
        &self.metadata.container_version_id
    }

    pub fn fingerprint(&self) -> &str {
        &self.metadata.fingerprint
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_version(&self) -> &ContainerVersion {
        &self.container_version
    }

    pub fn summary(&self) -> ExportSummary {
        ExportSummary {
            public_id: self.container.public_id.clone(),
            container_version_id: self.metadata.container_version_id.clone(),
            export_time: self.metadata.export_time,
            folders: self.folders.len(),
            tags: self.tags.len(),
            triggers: self.triggers.len(),
            variables: self.variables.len(),
            built_in_variables: self.built_in_variables.len(),
            custom_templates: self.custom_templates.len(),
            ungrouped: self.tags.ungrouped().count()
                + self.triggers.ungrouped().count()
                + self.variables.ungrouped().count(),
        }
    }

    // ── Folders ─────────────────────────────────────────────────

    pub fn folders(&self) -> &[Folder] {
        self.folders.all()
    }

    /// The first folder selected by `key`.
    ///
    /// Returns the stored folder; its `folder_id` is the folder's own id
    /// even when `key` matched by name.
    pub fn find_folder(&self, key: &FolderKey) -> Option<&Folder> {
        match key {
            FolderKey::Id(id) => self.folders.get(id),
            FolderKey::Name(name) => self.folders.first_named(name),
            FolderKey::IdOrName(key) => self.folders.first_matching(key),
        }
    }

    /// The folder an entity is filed under, if any.
    pub fn folder_of<T: GroupedEntity>(&self, entity: &T) -> Option<&Folder> {
        entity.parent_folder_id().and_then(|id| self.folders.get(id))
    }

    fn list_in<'a, T: GroupedEntity>(
        &self,
        index: &'a GroupedIndex<T>,
        folder: Option<&FolderKey>,
    ) -> Vec<&'a T> {
        match folder {
            None => index.all().iter().collect(),
            Some(key) => match self.find_folder(key) {
                Some(folder) => index.in_folder(&folder.folder_id).collect(),
                None => Vec::new(),
            },
        }
    }

    fn find_in<'a, T: GroupedEntity>(
        &self,
        index: &'a GroupedIndex<T>,
        folder: Option<&FolderKey>,
        name: &str,
    ) -> Option<&'a T> {
        match folder {
            None => index.first_named(name),
            Some(key) => {
                let folder = self.find_folder(key)?;
                index.first_named_in_folder(&folder.folder_id, name)
            }
        }
    }

    fn lookup_in<'a, T: GroupedEntity>(
        &self,
        index: &'a GroupedIndex<T>,
        folder: Option<&FolderKey>,
        name: Option<&str>,
    ) -> Lookup<'a, T> {
        match name {
            None => Lookup::All(self.list_in(index, folder)),
            Some(name) => Lookup::found(self.find_in(index, folder, name)),
        }
    }

    // ── Tags ────────────────────────────────────────────────────

    /// All tags, or the tags of one folder. An unknown folder yields nothing.
    pub fn tags(&self, folder: Option<&FolderKey>) -> Vec<&Tag> {
        self.list_in(&self.tags, folder)
    }

    /// The first tag named `name`, optionally within a folder.
    pub fn find_tag(&self, folder: Option<&FolderKey>, name: &str) -> Option<&Tag> {
        self.find_in(&self.tags, folder, name)
    }

    pub fn get_tag(&self, folder: Option<&FolderKey>, name: Option<&str>) -> Lookup<'_, Tag> {
        self.lookup_in(&self.tags, folder, name)
    }

    pub fn tag(&self, tag_id: &str) -> Option<&Tag> {
        self.tags.get(tag_id)
    }

    pub fn ungrouped_tags(&self) -> Vec<&Tag> {
        self.tags.ungrouped().collect()
    }

    // ── Triggers ────────────────────────────────────────────────

    pub fn triggers(&self, folder: Option<&FolderKey>) -> Vec<&Trigger> {
        self.list_in(&self.triggers, folder)
    }

    pub fn find_trigger(&self, folder: Option<&FolderKey>, name: &str) -> Option<&Trigger> {
        self.find_in(&self.triggers, folder, name)
    }

    pub fn get_trigger(
        &self,
        folder: Option<&FolderKey>,
        name: Option<&str>,
    ) -> Lookup<'_, Trigger> {
        self.lookup_in(&self.triggers, folder, name)
    }

    pub fn trigger(&self, trigger_id: &str) -> Option<&Trigger> {
        self.triggers.get(trigger_id)
    }

    pub fn ungrouped_triggers(&self) -> Vec<&Trigger> {
        self.triggers.ungrouped().collect()
    }

    /// Tags that list `trigger_id` among their firing triggers.
    pub fn tags_fired_by(&self, trigger_id: &str) -> Vec<&Tag> {
        self.tags
            .all()
            .iter()
            .filter(|tag| tag.fires_on(trigger_id))
            .collect()
    }

    // ── Variables ───────────────────────────────────────────────

    pub fn variables(&self, folder: Option<&FolderKey>) -> Vec<&Variable> {
        self.list_in(&self.variables, folder)
    }

    pub fn find_variable(&self, folder: Option<&FolderKey>, name: &str) -> Option<&Variable> {
        self.find_in(&self.variables, folder, name)
    }

    pub fn get_variable(
        &self,
        folder: Option<&FolderKey>,
        name: Option<&str>,
    ) -> Lookup<'_, Variable> {
        self.lookup_in(&self.variables, folder, name)
    }

    pub fn variable(&self, variable_id: &str) -> Option<&Variable> {
        self.variables.get(variable_id)
    }

    pub fn ungrouped_variables(&self) -> Vec<&Variable> {
        self.variables.ungrouped().collect()
    }

    // ── Built-in variables ──────────────────────────────────────

    pub fn built_in_variables(&self) -> &[BuiltInVariable] {
        self.built_in_variables.all()
    }

    pub fn find_built_in_variable(&self, name: &str) -> Option<&BuiltInVariable> {
        self.built_in_variables.first_named(name)
    }

    /// The enabled built-in variable of a platform type, e.g. `PAGE_URL`.
    pub fn find_built_in_variable_by_type(&self, kind: &str) -> Option<&BuiltInVariable> {
        self.built_in_variables.all().iter().find(|v| v.kind == kind)
    }

    pub fn get_built_in_variable(&self, name: Option<&str>) -> Lookup<'_, BuiltInVariable> {
        match name {
            None => Lookup::All(self.built_in_variables.all().iter().collect()),
            Some(name) => Lookup::found(self.find_built_in_variable(name)),
        }
    }

    // ── Custom templates ────────────────────────────────────────

    /// Templates declared in the export. Platform defaults are not listed.
    pub fn custom_templates(&self) -> &[CustomTemplate] {
        self.custom_templates.all()
    }

    /// Finds a template by name, then by template id.
    ///
    /// Falls back to platform defaults ("Custom HTML Tag", id `"0"`) unless
    /// they were disabled in [`ProviderOptions`].
    pub fn find_custom_template(&self, selector: &str) -> Option<&CustomTemplate> {
        self.custom_templates
            .first_named(selector)
            .or_else(|| self.custom_templates.get(selector))
            .or_else(|| self.default_templates.first_matching(selector))
    }

    pub fn get_custom_template(&self, selector: Option<&str>) -> Lookup<'_, CustomTemplate> {
        match selector {
            None => Lookup::All(self.custom_templates.all().iter().collect()),
            Some(selector) => Lookup::found(self.find_custom_template(selector)),
        }
    }
}
