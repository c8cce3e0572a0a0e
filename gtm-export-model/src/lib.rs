//! Typed model for Google Tag Manager container exports.
//!
//! Turns the loosely-typed JSON produced by GTM's "Export Container" into
//! strongly-shaped, immutable collections:
//! - [`ExportMetadata`], [`Container`] and [`ContainerVersion`] descriptors
//! - [`Folder`], [`Tag`], [`Trigger`], [`Variable`] (the last three may be
//!   grouped into a folder)
//! - [`BuiltInVariable`] and [`CustomTemplate`] (always global)
//!
//! Normalization is a pure transformation. Identifiers are normalized to
//! strings, absent sections become empty collections and folder references
//! that point nowhere are cleared. Declaration order is preserved everywhere.

mod container;
mod de;
mod entity;
mod error;
mod export;
mod timestamp;

pub use container::{tag_manager_url, Container, ContainerVersion};
pub use entity::{
    find_parameter, BuiltInVariable, Condition, CustomTemplate, Entity, Folder, GroupedEntity,
    Parameter, Tag, Trigger, Variable, CUSTOM_HTML_TEMPLATE_ID, CUSTOM_HTML_TEMPLATE_NAME,
};
pub use error::{ModelError, ModelResult};
pub use export::{normalize, ExportBundle, ExportMetadata};
pub use timestamp::parse_export_time;
