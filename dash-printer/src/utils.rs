use chrono::{DateTime, Utc};
use k8s_openapi::serde_json;
use kube::api::DynamicObject;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::BTreeMap;

/// Renders a serde timestamp (`Time`, `MicroTime`) as its RFC 3339 string.
pub fn timestamp<T: Serialize>(time: &T) -> Option<String> {
    serde_json::to_value(time)
        .ok()?
        .as_str()
        .map(str::to_owned)
}

pub fn parse_time(ts: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(ts)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

pub fn time_since(ts: &str) -> String {
    time_since_at(ts, Utc::now())
}

pub fn time_since_at(ts: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_time(ts) else {
        return "unknown".to_string();
    };

    let total_secs = now.signed_duration_since(then).num_seconds().max(0);
    let days = total_secs / 86400;
    let hours = (total_secs % 86400) / 3600;
    let mins = (total_secs % 3600) / 60;
    let secs = total_secs % 60;

    if days > 365 {
        format!("{}y{}d", days / 365, days % 365)
    } else if days > 7 {
        format!("{}d", days)
    } else if days > 0 {
        format!("{}d{}h", days, hours)
    } else if hours > 0 {
        format!("{}h{}m", hours, mins)
    } else if mins > 0 {
        format!("{}m{}s", mins, secs)
    } else {
        format!("{}s", secs)
    }
}

/// `k=v` pairs joined by `, `, in key order.
pub fn format_labels(labels: &BTreeMap<String, String>) -> String {
    labels
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn dynamic_to_typed<K: DeserializeOwned>(obj: &DynamicObject) -> Result<K, serde_json::Error> {
    serde_json::from_value(serde_json::to_value(obj)?)
}
