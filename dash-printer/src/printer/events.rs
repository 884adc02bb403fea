use chrono::{DateTime, Utc};
use k8s_openapi::api::core::v1::Event;
use kube::api::{DynamicObject, ResourceExt};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::cache::CacheKey;
use crate::component::{Component, FlexLayout, Table, TableRow, Width};
use crate::error::{BoxError, Cancelled};
use crate::utils::{dynamic_to_typed, parse_time, time_since, timestamp};

use super::Options;

const EVENT_COLUMNS: [&str; 6] = ["Kind", "Message", "Reason", "Type", "First Seen", "Last Seen"];

/// Default events generator: a full width table of the events recorded
/// against the object, newest first.
pub fn events_gen(
    ctx: &CancellationToken,
    object: &DynamicObject,
    fl: &mut FlexLayout,
    options: &Options,
) -> Result<(), BoxError> {
    if ctx.is_cancelled() {
        return Err(Cancelled.into());
    }

    let key = CacheKey::new("v1", "Event").in_namespace(object.namespace());
    let cached = options.cache.list(&key)?;

    if ctx.is_cancelled() {
        return Err(Cancelled.into());
    }

    let mut events = Vec::new();
    for obj in &cached {
        let event: Event = dynamic_to_typed(obj)?;
        if involves(&event, object) {
            events.push(event);
        }
    }
    events.sort_by(|a, b| last_seen(b).cmp(&last_seen(a)));
    debug!(cached = cached.len(), related = events.len(), "events for object");

    let mut table = Table::new("Events", &EVENT_COLUMNS);
    for event in &events {
        table.add_row(event_row(event));
    }

    fl.add_section().add(Component::Table(table), Width::Full);
    Ok(())
}

fn involves(event: &Event, object: &DynamicObject) -> bool {
    let involved = &event.involved_object;
    if let Some(uid) = object.uid() {
        return involved.uid.as_deref() == Some(uid.as_str());
    }
    let kind = object.types.as_ref().map(|t| t.kind.as_str());
    involved.kind.as_deref() == kind && involved.name.as_deref() == Some(object.name_any().as_str())
}

fn last_seen_str(event: &Event) -> Option<String> {
    event
        .series
        .as_ref()
        .and_then(|s| s.last_observed_time.as_ref())
        .and_then(timestamp)
        .or_else(|| event.last_timestamp.as_ref().and_then(timestamp))
        .or_else(|| event.event_time.as_ref().and_then(timestamp))
        .or_else(|| event.metadata.creation_timestamp.as_ref().and_then(timestamp))
}

fn last_seen(event: &Event) -> Option<DateTime<Utc>> {
    last_seen_str(event).as_deref().and_then(parse_time)
}

fn age(ts: Option<String>) -> Component {
    Component::text(ts.map(|t| time_since(&t)).unwrap_or_else(|| "<unknown>".into()))
}

fn event_row(event: &Event) -> TableRow {
    let text = |v: &Option<String>| Component::text(v.clone().unwrap_or_default());
    TableRow::from([
        ("Kind".to_string(), text(&event.involved_object.kind)),
        ("Message".to_string(), text(&event.message)),
        ("Reason".to_string(), text(&event.reason)),
        ("Type".to_string(), text(&event.type_)),
        (
            "First Seen".to_string(),
            age(event.first_timestamp.as_ref().and_then(timestamp)),
        ),
        ("Last Seen".to_string(), age(last_seen_str(event))),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::error::CacheError;
    use crate::store::StoreCache;
    use crate::testutil::{create_deployment, create_event, to_dynamic};
    use k8s_openapi::serde_json;
    use std::sync::Arc;

    fn messages(fl: &FlexLayout) -> Vec<Component> {
        let Component::Table(table) = &fl.sections()[0].items()[0].view else {
            panic!("expected a table");
        };
        table.rows.iter().map(|r| r["Message"].clone()).collect()
    }

    #[test]
    fn test_events_gen_filters_and_sorts() {
        let cache = StoreCache::from_objects(vec![
            create_event("old", "Deployment", "web", "web-uid", "2024-01-01T00:00:00Z"),
            create_event("other", "Deployment", "db", "db-uid", "2024-01-03T00:00:00Z"),
            create_event("new", "Deployment", "web", "web-uid", "2024-01-02T00:00:00Z"),
        ]);
        let options = Options::new(Arc::new(cache));
        let object = to_dynamic(&create_deployment("web"));

        let mut fl = FlexLayout::new("Summary");
        events_gen(&CancellationToken::new(), &object, &mut fl, &options).unwrap();

        assert_eq!(fl.sections().len(), 1);
        assert_eq!(fl.sections()[0].items()[0].width, Width::Full);
        assert_eq!(
            messages(&fl),
            vec![
                Component::text("new happened"),
                Component::text("old happened")
            ]
        );
    }

    #[test]
    fn test_events_gen_prefers_series_last_observed_time() {
        let mut recurring = create_event(
            "recurring",
            "Deployment",
            "web",
            "web-uid",
            "2024-01-01T00:00:00Z",
        );
        recurring.data["series"] = serde_json::json!({
            "count": 5,
            "lastObservedTime": "2024-01-05T00:00:00.000000Z",
        });
        let cache = StoreCache::from_objects(vec![
            recurring,
            create_event("single", "Deployment", "web", "web-uid", "2024-01-03T00:00:00Z"),
        ]);
        let object = to_dynamic(&create_deployment("web"));

        let mut fl = FlexLayout::new("Summary");
        events_gen(&CancellationToken::new(), &object, &mut fl, &Options::new(Arc::new(cache)))
            .unwrap();

        assert_eq!(
            messages(&fl),
            vec![
                Component::text("recurring happened"),
                Component::text("single happened")
            ]
        );
    }

    #[test]
    fn test_events_gen_matches_by_name_without_uid() {
        let cache = StoreCache::from_objects(vec![create_event(
            "scaled",
            "Deployment",
            "web",
            "",
            "2024-01-01T00:00:00Z",
        )]);
        let mut deployment = create_deployment("web");
        deployment.metadata.uid = None;

        let mut fl = FlexLayout::new("Summary");
        events_gen(
            &CancellationToken::new(),
            &to_dynamic(&deployment),
            &mut fl,
            &Options::new(Arc::new(cache)),
        )
        .unwrap();

        assert_eq!(messages(&fl), vec![Component::text("scaled happened")]);
    }

    #[test]
    fn test_events_gen_empty_table() {
        let mut fl = FlexLayout::new("Summary");
        events_gen(
            &CancellationToken::new(),
            &to_dynamic(&create_deployment("web")),
            &mut fl,
            &Options::new(Arc::new(StoreCache::new())),
        )
        .unwrap();

        assert!(messages(&fl).is_empty());
    }

    #[test]
    fn test_events_gen_cancelled() {
        let ctx = CancellationToken::new();
        ctx.cancel();
        let mut fl = FlexLayout::new("Summary");

        let err = events_gen(
            &ctx,
            &to_dynamic(&create_deployment("web")),
            &mut fl,
            &Options::new(Arc::new(StoreCache::new())),
        )
        .unwrap_err();

        assert!(err.is::<Cancelled>());
        assert!(fl.sections().is_empty());
    }

    struct BrokenCache;

    impl Cache for BrokenCache {
        fn list(&self, _key: &CacheKey) -> Result<Vec<DynamicObject>, CacheError> {
            Err(CacheError::Unavailable("store not synced".into()))
        }

        fn get(&self, key: &CacheKey) -> Result<DynamicObject, CacheError> {
            Err(CacheError::NotFound(key.clone()))
        }
    }

    #[test]
    fn test_events_gen_surfaces_cache_errors() {
        let mut fl = FlexLayout::new("Summary");
        let err = events_gen(
            &CancellationToken::new(),
            &to_dynamic(&create_deployment("web")),
            &mut fl,
            &Options::new(Arc::new(BrokenCache)),
        )
        .unwrap_err();

        assert!(err.is::<CacheError>());
    }
}
