use k8s_openapi::serde_json;
use std::fmt;

use crate::cache::CacheKey;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Stage of [`Object::to_component`](crate::printer::Object::to_component) an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Summary,
    Metadata,
    PodTemplate,
    Events,
    Items,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Summary => "summary",
            Phase::Metadata => "metadata",
            Phase::PodTemplate => "pod-template",
            Phase::Events => "events",
            Phase::Items => "items",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PrintError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{phase} generator failed: {source}")]
    Generator {
        phase: Phase,
        #[source]
        source: BoxError,
    },

    #[error("plugin printer failed: {0}")]
    Plugin(#[from] PluginError),

    #[error("{phase} cache lookup failed: {source}")]
    Collaborator {
        phase: Phase,
        #[source]
        source: CacheError,
    },

    #[error("{phase} generator cancelled")]
    Cancelled { phase: Phase },

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}

impl PrintError {
    /// Classifies a hook or producer failure, keeping cache and cancellation
    /// errors distinguishable from plain generator failures. Plugin errors only
    /// surface as [`PrintError::Plugin`] from the summary phase, where the
    /// plugin runs; elsewhere they stay generator errors of their phase.
    pub(crate) fn from_hook(phase: Phase, err: BoxError) -> Self {
        let err = match err.downcast::<CacheError>() {
            Ok(source) => {
                return PrintError::Collaborator {
                    phase,
                    source: *source,
                }
            }
            Err(err) => err,
        };
        if phase == Phase::Summary {
            if let Some(source) = err.downcast_ref::<PluginError>() {
                return PrintError::Plugin(source.clone());
            }
        }
        if err.is::<Cancelled>() {
            return PrintError::Cancelled { phase };
        }
        PrintError::Generator { phase, source: err }
    }

    pub fn phase(&self) -> Option<Phase> {
        match self {
            PrintError::Generator { phase, .. }
            | PrintError::Collaborator { phase, .. }
            | PrintError::Cancelled { phase } => Some(*phase),
            PrintError::Plugin(_) => Some(Phase::Summary),
            PrintError::InvalidInput(_) | PrintError::Json(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CacheError {
    #[error("{0} not found")]
    NotFound(CacheKey),

    #[error("cache unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PluginError {
    #[error("plugin {name}: {message}")]
    Failed { name: String, message: String },

    #[error("malformed plugin response: {0}")]
    Malformed(String),
}

/// Returned by hooks that observed a cancelled context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("context cancelled")]
pub struct Cancelled;

#[cfg(feature = "lua")]
impl From<PrintError> for mlua::Error {
    fn from(err: PrintError) -> Self {
        mlua::Error::external(err)
    }
}
