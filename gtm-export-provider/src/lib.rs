//! Indexed query surface over Google Tag Manager container exports.
//!
//! An [`ExportProvider`] is built once from an export document and then
//! answers synchronous, read-only queries:
//! - by id (`tag("8")`), by name (`find_tag(None, "UA - Pageview")`)
//! - by folder, addressed by id or name through a [`FolderKey`]
//! - combined list-or-find queries returning a [`Lookup`]
//!
//! # Lifecycle
//!
//! Construction reads the source once, normalizes it with
//! [`gtm_export_model`] and builds every index before returning. A failed
//! construction returns no provider at all.
//!
//! ```no_run
//! # async fn demo() -> gtm_export_provider::ProviderResult<()> {
//! use gtm_export_provider::{ExportProvider, FolderKey};
//!
//! let provider = ExportProvider::open("wordpress.gtm-export.json").await?;
//! let folder = FolderKey::parse("GTM4WP")?;
//! for tag in provider.tags(Some(&folder)) {
//!     println!("{} ({})", tag.name, tag.kind);
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod folder_key;
mod index;
mod lookup;
mod options;
mod provider;
mod source;
mod summary;

pub use error::{ProviderError, ProviderResult};
pub use folder_key::FolderKey;
pub use lookup::Lookup;
pub use options::ProviderOptions;
pub use provider::ExportProvider;
pub use source::ExportSource;
pub use summary::ExportSummary;

pub use gtm_export_model::{
    BuiltInVariable, Condition, Container, ContainerVersion, CustomTemplate, Entity,
    ExportBundle, ExportMetadata, Folder, GroupedEntity, ModelError, Parameter, Tag, Trigger,
    Variable,
};
