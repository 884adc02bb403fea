use kube::api::{ApiResource, DynamicObject, GroupVersionKind, ResourceExt};
use kube::runtime::reflector::store::Writer;
use kube::runtime::reflector::Store;
use kube::runtime::watcher::Event;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

use crate::cache::{Cache, CacheKey};
use crate::error::CacheError;

/// `(api_version, kind)`. The same kind served under two versions gets two stores.
type StoreKey = (String, String);

/// [`Cache`] over reflector stores, one store per api version and kind.
#[derive(Clone, Default)]
pub struct StoreCache {
    stores: HashMap<StoreKey, Store<DynamicObject>>,
}

impl fmt::Debug for StoreCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self
            .stores
            .keys()
            .map(|(api_version, kind)| format!("{api_version}/{kind}"))
            .collect();
        kinds.sort();
        f.debug_struct("StoreCache").field("kinds", &kinds).finish()
    }
}

impl StoreCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `api_version`/`kind` from an existing reflector store, e.g. one
    /// kept live by a watcher.
    pub fn with_store(
        mut self,
        api_version: impl Into<String>,
        kind: impl Into<String>,
        store: Store<DynamicObject>,
    ) -> Self {
        self.stores.insert((api_version.into(), kind.into()), store);
        self
    }

    /// Builds stores from a snapshot of objects. Objects without type
    /// information or a name cannot be keyed and are skipped.
    #[tracing::instrument(skip(objects), fields(object_count = objects.len()))]
    pub fn from_objects(objects: Vec<DynamicObject>) -> Self {
        let mut writers: HashMap<StoreKey, Writer<DynamicObject>> = HashMap::new();

        for obj in objects {
            let Some(types) = obj.types.clone() else {
                warn!(name = %obj.name_any(), "skipping cached object without type meta");
                continue;
            };
            if obj.metadata.name.is_none() {
                warn!(kind = %types.kind, "skipping cached object without name");
                continue;
            }

            let key = (types.api_version.clone(), types.kind.clone());
            let writer = writers.entry(key).or_insert_with(|| {
                let (group, version) = split_api_version(&types.api_version);
                let gvk = GroupVersionKind::gvk(group, version, &types.kind);
                Writer::new(ApiResource::from_gvk(&gvk))
            });
            writer.apply_watcher_event(&Event::Apply(obj));
        }

        let stores = writers
            .into_iter()
            .map(|(key, writer)| (key, writer.as_reader()))
            .collect();

        Self { stores }
    }
}

fn split_api_version(api_version: &str) -> (&str, &str) {
    api_version.split_once('/').unwrap_or(("", api_version))
}

impl Cache for StoreCache {
    #[tracing::instrument(skip(self))]
    fn list(&self, key: &CacheKey) -> Result<Vec<DynamicObject>, CacheError> {
        let store_key = (key.api_version.clone(), key.kind.clone());
        let store = match self.stores.get(&store_key) {
            Some(store) => store,
            None => return Ok(Vec::new()),
        };

        let result: Vec<DynamicObject> = store
            .state()
            .par_iter()
            .filter(|arc_obj| {
                let obj = arc_obj.as_ref();
                // Cluster-scoped resources have no namespace; always include them
                let namespace_matches = match (&key.namespace, obj.namespace()) {
                    (Some(ns), Some(obj_ns)) => *ns == obj_ns,
                    _ => true,
                };
                let name_matches = key
                    .name
                    .as_ref()
                    .map_or(true, |name| *name == obj.name_any());
                namespace_matches && name_matches
            })
            .map(|arc_obj| arc_obj.as_ref().clone())
            .collect();

        Ok(result)
    }

    #[tracing::instrument(skip(self))]
    fn get(&self, key: &CacheKey) -> Result<DynamicObject, CacheError> {
        if key.name.is_none() {
            return Err(CacheError::Unavailable(format!(
                "get requires a name: {key}"
            )));
        }
        self.list(key)?
            .into_iter()
            .next()
            .ok_or_else(|| CacheError::NotFound(key.clone()))
    }
}
