//! Object printers: turn a single object into a summary layout.
//!
//! [`Object`] does the orchestration. The kind handlers register what each kind
//! shows and [`print_object`] picks the handler for an object.

pub mod default;
pub mod deployment;
pub mod events;
pub mod metadata;
pub mod object;
pub mod options;
pub mod pod_template;

use std::str::FromStr;

use kube::api::DynamicObject;
use tokio_util::sync::CancellationToken;
use tracing::{span, Level};

use crate::component::Component;
use crate::error::PrintError;

pub use object::{
    with_events_gen, with_metadata_gen, with_pod_template_gen, ItemDescriptor, Object, ObjectOpt,
};
pub use options::Options;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PrinterKind {
    Deployment,
    Default,
}

impl FromStr for PrinterKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "deployment" => Self::Deployment,
            _ => return Err(()),
        })
    }
}

impl PrinterKind {
    pub fn for_object(object: Option<&DynamicObject>) -> Self {
        object
            .and_then(|o| o.types.as_ref())
            .and_then(|t| t.kind.to_lowercase().parse().ok())
            .unwrap_or(Self::Default)
    }

    pub fn build(self, object: Option<DynamicObject>) -> Result<Object, PrintError> {
        match self {
            Self::Deployment => match object {
                Some(object) => deployment::deployment_object(object),
                None => Err(PrintError::InvalidInput("object is nil".into())),
            },
            Self::Default => default::default_object(object),
        }
    }
}

/// Prints `object` with the printer registered for its kind.
pub fn print_object(
    object: Option<DynamicObject>,
    ctx: &CancellationToken,
    options: Options,
) -> Result<Component, PrintError> {
    let kind = PrinterKind::for_object(object.as_ref());
    let _span = span!(Level::INFO, "print_object", kind = ?kind).entered();

    kind.build(object)?.to_component(ctx, options)
}
