//! Public record-access API for recordgate
//!
//! This crate is what feature code talks to:
//! - **RecordAccess**: `get`, `query`, `retrieve`, `create`, `update`,
//!   `delete` and `copy_record`, dispatched per call to the live or mock
//!   adapter
//! - **BackendProbe**: the per-call answer to "is a live store reachable?"
//! - **apply_to_many**: settle-all bulk update with per-target outcomes
//! - **AccessConfig**: `recordgate.toml` settings
//!
//! ## Quick Start
//!
//! ```ignore
//! use recordgate_api::{RecordAccess, StaticProbe};
//! use recordgate_core::{FieldSet, RecordRef};
//!
//! let access = RecordAccess::new(Arc::new(StaticProbe::live(store)));
//! let fields = FieldSet::new()
//!     .scalar("title", "Replace pump seal")
//!     .lookup("owner", RecordRef::new("users", "{6f1c...}"));
//! let created = access.create("workorders", &fields).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod bulk;
pub mod config;
pub mod environment;
pub mod facade;

pub use bulk::{BulkOutcome, Target, TargetOutcome};
pub use config::{AccessConfig, StoreConfig, CONFIG_FILE_NAME};
pub use environment::{BackendProbe, StaticProbe, SwitchableProbe};
pub use facade::RecordAccess;

#[cfg(feature = "http")]
mod connect {
    use crate::config::AccessConfig;
    use crate::environment::StaticProbe;
    use recordgate_adapters::HttpEntityStore;
    use recordgate_core::{Error, Result};
    use std::sync::Arc;

    impl StaticProbe {
        /// Probe for the store described by `config`
        ///
        /// Without a `[store]` section the probe is offline.
        pub fn from_config(config: &AccessConfig) -> Result<Self> {
            match &config.store {
                Some(store) => {
                    let http = HttpEntityStore::new(
                        &store.endpoint,
                        store.token.as_deref(),
                        store.timeout(),
                    )
                    .map_err(Error::from)?;
                    Ok(StaticProbe::live(Arc::new(http)))
                }
                None => Ok(StaticProbe::offline()),
            }
        }
    }
}
