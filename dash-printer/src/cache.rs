use std::fmt;

use kube::api::DynamicObject;

use crate::error::CacheError;

/// Identifies objects in a [`Cache`]. Without a name it matches every object
/// of the kind (in the namespace, when one is set).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub namespace: Option<String>,
    pub api_version: String,
    pub kind: String,
    pub name: Option<String>,
}

impl CacheKey {
    pub fn new(api_version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            namespace: None,
            api_version: api_version.into(),
            kind: kind.into(),
            name: None,
        }
    }

    pub fn in_namespace(mut self, namespace: Option<String>) -> Self {
        self.namespace = namespace;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.api_version, self.kind)?;
        if let Some(ns) = &self.namespace {
            write!(f, " in {ns}")?;
        }
        if let Some(name) = &self.name {
            write!(f, " named {name}")?;
        }
        Ok(())
    }
}

/// Read-only lookup of cluster state consulted by generator hooks.
pub trait Cache: Send + Sync {
    fn list(&self, key: &CacheKey) -> Result<Vec<DynamicObject>, CacheError>;

    fn get(&self, key: &CacheKey) -> Result<DynamicObject, CacheError>;
}
