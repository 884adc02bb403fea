use kube::api::DynamicObject;
use serde::Deserialize;

/// Arguments of the `print_object` Lua call.
#[derive(Debug, Clone, Deserialize)]
pub struct PrintArgs {
    pub object: Option<DynamicObject>,
    /// Snapshot served to generators through the cache, e.g. the object's events.
    #[serde(default)]
    pub cached: Vec<DynamicObject>,
}
