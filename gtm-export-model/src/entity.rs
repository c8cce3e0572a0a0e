use serde::{Deserialize, Serialize};

use crate::de;

/// Common identity of every entity kind in an export.
pub trait Entity {
    /// Human-readable kind, used in log fields ("tag", "trigger", ...).
    const KIND: &'static str;

    /// The entity's identifier within its collection.
    fn id(&self) -> &str;

    /// The display name; not guaranteed unique.
    fn name(&self) -> &str;
}

/// An entity that may be filed under a [`Folder`].
pub trait GroupedEntity: Entity {
    /// The folder this entity belongs to, if any.
    ///
    /// References to folders that do not exist in the export are cleared
    /// during normalization, so a `Some` here always resolves.
    fn parent_folder_id(&self) -> Option<&str>;

    #[doc(hidden)]
    fn clear_parent_folder(&mut self);
}

/// A flat grouping of tags, triggers and variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    #[serde(deserialize_with = "de::string")]
    pub folder_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A configuration value tree.
///
/// GTM stores tag, trigger and variable settings as typed key/value nodes
/// where `LIST` and `MAP` nodes nest further parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "de::section")]
    pub list: Vec<Parameter>,
    #[serde(default, deserialize_with = "de::section")]
    pub map: Vec<Parameter>,
}

impl Parameter {
    /// Finds the direct child (in `map`) with the given key.
    pub fn entry(&self, key: &str) -> Option<&Parameter> {
        find_parameter(&self.map, key)
    }
}

/// Returns the first parameter with `key` in a parameter list.
pub fn find_parameter<'a>(parameters: &'a [Parameter], key: &str) -> Option<&'a Parameter> {
    parameters.iter().find(|p| p.key.as_deref() == Some(key))
}

/// A filter clause on a trigger, such as `{{_event}} equals gtm.js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::section")]
    pub parameter: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(deserialize_with = "de::string")]
    pub tag_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub parent_folder_id: Option<String>,
    #[serde(default, deserialize_with = "de::string_list")]
    pub firing_trigger_id: Vec<String>,
    #[serde(default, deserialize_with = "de::string_list")]
    pub blocking_trigger_id: Vec<String>,
    #[serde(default, deserialize_with = "de::section")]
    pub parameter: Vec<Parameter>,
    #[serde(default)]
    pub tag_firing_option: Option<String>,
    #[serde(default)]
    pub paused: bool,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Tag {
    /// Whether `trigger_id` is one of this tag's firing triggers.
    pub fn fires_on(&self, trigger_id: &str) -> bool {
        self.firing_trigger_id.iter().any(|id| id == trigger_id)
    }

    /// Whether `trigger_id` blocks this tag.
    pub fn blocked_by(&self, trigger_id: &str) -> bool {
        self.blocking_trigger_id.iter().any(|id| id == trigger_id)
    }

    pub fn parameter(&self, key: &str) -> Option<&Parameter> {
        find_parameter(&self.parameter, key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trigger {
    #[serde(deserialize_with = "de::string")]
    pub trigger_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub parent_folder_id: Option<String>,
    #[serde(default, deserialize_with = "de::section")]
    pub filter: Vec<Condition>,
    #[serde(default, deserialize_with = "de::section")]
    pub custom_event_filter: Vec<Condition>,
    #[serde(default, deserialize_with = "de::section")]
    pub auto_event_filter: Vec<Condition>,
    #[serde(default, deserialize_with = "de::section")]
    pub parameter: Vec<Parameter>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Trigger {
    /// All filter clauses of this trigger, in declaration order.
    pub fn conditions(&self) -> impl Iterator<Item = &Condition> {
        self.filter
            .iter()
            .chain(&self.custom_event_filter)
            .chain(&self.auto_event_filter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variable {
    #[serde(deserialize_with = "de::string")]
    pub variable_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub parent_folder_id: Option<String>,
    #[serde(default, deserialize_with = "de::section")]
    pub parameter: Vec<Parameter>,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Variable {
    pub fn parameter(&self, key: &str) -> Option<&Parameter> {
        find_parameter(&self.parameter, key)
    }
}

/// A platform-provided variable that has been enabled in the container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltInVariable {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Template id of the platform's "Custom HTML Tag" template.
pub const CUSTOM_HTML_TEMPLATE_ID: &str = "0";

/// Display name of the platform's "Custom HTML Tag" template.
pub const CUSTOM_HTML_TEMPLATE_NAME: &str = "Custom HTML Tag";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomTemplate {
    #[serde(deserialize_with = "de::string")]
    pub template_id: String,
    pub name: String,
    #[serde(default, deserialize_with = "de::opt_string")]
    pub fingerprint: Option<String>,
    #[serde(default)]
    pub template_data: Option<String>,
}

impl CustomTemplate {
    /// Templates every container can use without declaring them.
    ///
    /// Exports never list these, but tags of type `html` refer to the
    /// Custom HTML template by its reserved id.
    pub fn platform_defaults() -> Vec<CustomTemplate> {
        vec![CustomTemplate {
            template_id: CUSTOM_HTML_TEMPLATE_ID.to_string(),
            name: CUSTOM_HTML_TEMPLATE_NAME.to_string(),
            fingerprint: None,
            template_data: None,
        }]
    }
}

macro_rules! impl_entity {
    ($ty:ty, $kind:literal, $id:ident) => {
        impl Entity for $ty {
            const KIND: &'static str = $kind;

            fn id(&self) -> &str {
                &self.$id
            }

            fn name(&self) -> &str {
                &self.name
            }
        }
    };
}

macro_rules! impl_grouped {
    ($ty:ty) => {
        impl GroupedEntity for $ty {
            fn parent_folder_id(&self) -> Option<&str> {
                self.parent_folder_id.as_deref()
            }

            fn clear_parent_folder(&mut self) {
                self.parent_folder_id = None;
            }
        }
    };
}

impl_entity!(Folder, "folder", folder_id);
impl_entity!(Tag, "tag", tag_id);
impl_entity!(Trigger, "trigger", trigger_id);
impl_entity!(Variable, "variable", variable_id);
impl_entity!(CustomTemplate, "custom template", template_id);
// Built-in variables have no id of their own; the name is the identifier.
impl_entity!(BuiltInVariable, "built-in variable", name);

impl_grouped!(Tag);
impl_grouped!(Trigger);
impl_grouped!(Variable);
