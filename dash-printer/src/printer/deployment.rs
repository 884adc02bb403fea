use k8s_openapi::api::apps::v1::Deployment;
use k8s_openapi::apimachinery::pkg::util::intstr::IntOrString;
use kube::api::DynamicObject;

use crate::component::{Component, SummarySection, Width};
use crate::error::PrintError;
use crate::utils::{dynamic_to_typed, format_labels};

use super::Object;

/// Summary view of a deployment: its config and status, the pod template
/// and recent events.
pub fn deployment_object(object: DynamicObject) -> Result<Object, PrintError> {
    let deployment: Deployment = dynamic_to_typed(&object)
        .map_err(|e| PrintError::InvalidInput(format!("not a deployment: {e}")))?;
    let template = deployment
        .spec
        .as_ref()
        .map(|s| s.template.clone())
        .unwrap_or_default();

    let mut o = Object::new(Some(object), []);

    let config = deployment.clone();
    o.register_config(move |_| Ok(deployment_config(&config)), Width::Half);
    o.register_summary(move |_| Ok(deployment_status(&deployment)), Width::Half);
    o.enable_pod_template(template);
    o.enable_events();

    Ok(o)
}

fn int_or_string(v: &IntOrString) -> String {
    match v {
        IntOrString::Int(i) => i.to_string(),
        IntOrString::String(s) => s.clone(),
    }
}

fn deployment_config(deployment: &Deployment) -> Component {
    let Some(spec) = deployment.spec.as_ref() else {
        return Component::summary("Configuration", Vec::new());
    };

    let strategy = spec.strategy.as_ref();
    let mut sections = vec![SummarySection::new(
        "Deployment Strategy",
        Component::text(
            strategy
                .and_then(|s| s.type_.clone())
                .unwrap_or_else(|| "RollingUpdate".into()),
        ),
    )];

    if let Some(rolling) = strategy.and_then(|s| s.rolling_update.as_ref()) {
        let surge = rolling.max_surge.as_ref().map_or("25%".into(), int_or_string);
        let unavailable = rolling
            .max_unavailable
            .as_ref()
            .map_or("25%".into(), int_or_string);
        sections.push(SummarySection::new(
            "Rolling Update Strategy",
            Component::text(format!("Max Surge {surge}, Max Unavailable {unavailable}")),
        ));
    }

    if let Some(labels) = spec.selector.match_labels.as_ref().filter(|l| !l.is_empty()) {
        sections.push(SummarySection::new(
            "Selectors",
            Component::text(format_labels(labels)),
        ));
    }

    sections.push(SummarySection::new(
        "Min Ready Seconds",
        Component::text(spec.min_ready_seconds.unwrap_or(0).to_string()),
    ));
    sections.push(SummarySection::new(
        "Revision History Limit",
        Component::text(spec.revision_history_limit.unwrap_or(10).to_string()),
    ));
    sections.push(SummarySection::new(
        "Replicas",
        Component::text(spec.replicas.unwrap_or(1).to_string()),
    ));

    Component::summary("Configuration", sections)
}

fn deployment_status(deployment: &Deployment) -> Component {
    let status = deployment.status.as_ref();
    let count = |f: fn(&k8s_openapi::api::apps::v1::DeploymentStatus) -> Option<i32>| {
        Component::text(status.and_then(f).unwrap_or(0).to_string())
    };
    let replicas = deployment
        .spec
        .as_ref()
        .and_then(|s| s.replicas)
        .or_else(|| status.and_then(|s| s.replicas))
        .unwrap_or(0);
    let available = status.and_then(|s| s.available_replicas).unwrap_or(0);

    Component::summary(
        "Status",
        vec![
            SummarySection::new(
                "Ready",
                Component::text(format!("{available}/{replicas}")),
            ),
            SummarySection::new("Available Replicas", count(|s| s.available_replicas)),
            SummarySection::new("Ready Replicas", count(|s| s.ready_replicas)),
            SummarySection::new("Updated Replicas", count(|s| s.updated_replicas)),
            SummarySection::new("Unavailable Replicas", count(|s| s.unavailable_replicas)),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printer::Options;
    use crate::store::StoreCache;
    use crate::testutil::{create_deployment, create_event, to_dynamic};
    use k8s_openapi::api::apps::v1::DeploymentStatus;
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    #[test]
    fn test_deployment_config() {
        let got = deployment_config(&create_deployment("web"));
        assert_eq!(
            got,
            Component::summary(
                "Configuration",
                vec![
                    SummarySection::new("Deployment Strategy", Component::text("RollingUpdate")),
                    SummarySection::new("Selectors", Component::text("app=web")),
                    SummarySection::new("Min Ready Seconds", Component::text("0")),
                    SummarySection::new("Revision History Limit", Component::text("10")),
                    SummarySection::new("Replicas", Component::text("1")),
                ]
            )
        );
    }

    #[test]
    fn test_deployment_status_ready() {
        let mut deployment = create_deployment("web");
        deployment.status = Some(DeploymentStatus {
            available_replicas: Some(1),
            ready_replicas: Some(1),
            ..Default::default()
        });

        let Component::Summary(summary) = deployment_status(&deployment) else {
            panic!("expected a summary");
        };
        assert_eq!(summary.sections[0].header, "Ready");
        assert_eq!(
            summary.sections[0].content.as_deref(),
            Some(&Component::text("1/1"))
        );
    }

    #[test]
    fn test_deployment_object_layout() {
        let cache = StoreCache::from_objects(vec![create_event(
            "scaled",
            "Deployment",
            "web",
            "web-uid",
            "2024-01-01T00:00:00Z",
        )]);
        let o = deployment_object(to_dynamic(&create_deployment("web"))).unwrap();

        let layout = o
            .to_layout(&CancellationToken::new(), Options::new(Arc::new(cache)))
            .unwrap();

        // summary, metadata, pod template, events
        assert_eq!(layout.sections().len(), 4);
        assert_eq!(layout.sections()[0].len(), 2);
        assert!(matches!(
            layout.sections()[3].items()[0].view,
            Component::Table(ref t) if t.rows.len() == 1
        ));
    }

    #[test]
    fn test_deployment_object_rejects_other_shapes() {
        let not_a_deployment: DynamicObject = k8s_openapi::serde_json::from_value(
            k8s_openapi::serde_json::json!({
                "apiVersion": "apps/v1",
                "kind": "Deployment",
                "metadata": { "name": "web" },
                "spec": { "replicas": "three" }
            }),
        )
        .unwrap();

        let err = deployment_object(not_a_deployment).unwrap_err();
        assert!(matches!(err, PrintError::InvalidInput(_)));
    }
}
