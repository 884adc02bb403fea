//! Builds the summary view of a single Kubernetes object for a dashboard.
//!
//! An [`printer::Object`] runs a fixed sequence of generator phases over the
//! object and assembles their output into a [`component::FlexLayout`]:
//!
//! 1. summary: registered config components, extended by plugin sections,
//!    followed by registered summary items
//! 2. metadata
//! 3. pod template, when enabled
//! 4. events, when enabled
//! 5. one section per registered item batch
//!
//! The first failing phase aborts the print; no partial layout is returned.

use k8s_openapi::serde_json;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub mod cache;
pub mod component;
pub mod error;
pub mod log;
pub mod plugin;
pub mod printer;
pub mod store;
pub mod structs;

mod utils;

#[cfg(feature = "lua")]
mod lua;

#[cfg(test)]
mod testutil;

pub use cache::{Cache, CacheKey};
pub use component::{Component, FlexLayout, Section, SummarySection, Width};
pub use error::{BoxError, Cancelled, CacheError, Phase, PluginError, PrintError};
pub use plugin::{PluginChain, PluginPrinter, PrintResponse};
pub use printer::{print_object, ItemDescriptor, Object, Options};
pub use store::StoreCache;

/// Prints the object described by a [`structs::PrintArgs`] JSON document and
/// returns the layout as JSON. The cached objects back the generators' cache.
#[tracing::instrument(skip_all, fields(len = json.len()))]
pub fn print_json(json: &str) -> Result<String, PrintError> {
    let args: structs::PrintArgs = serde_json::from_str(json)?;
    let options = Options::new(Arc::new(StoreCache::from_objects(args.cached)));

    let component = print_object(args.object, &CancellationToken::new(), options)?;

    Ok(serde_json::to_string(&component)?)
}
