use std::collections::BTreeMap;

use k8s_openapi::api::apps::v1::{Deployment, DeploymentSpec};
use k8s_openapi::api::core::v1::{Container, PodSpec, PodTemplateSpec};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::{LabelSelector, ObjectMeta};
use k8s_openapi::serde_json::{self, json};
use kube::api::DynamicObject;
use serde::Serialize;

pub fn create_deployment(name: &str) -> Deployment {
    let labels = BTreeMap::from([("app".to_string(), name.to_string())]);
    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some("default".to_string()),
            uid: Some(format!("{name}-uid")),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: Some(1),
            selector: LabelSelector {
                match_labels: Some(labels.clone()),
                ..Default::default()
            },
            template: PodTemplateSpec {
                metadata: Some(ObjectMeta {
                    labels: Some(labels),
                    ..Default::default()
                }),
                spec: Some(PodSpec {
                    containers: vec![Container {
                        name: "nginx".to_string(),
                        image: Some("nginx:1.27".to_string()),
                        ..Default::default()
                    }],
                    ..Default::default()
                }),
            },
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn to_dynamic<T: Serialize>(resource: &T) -> DynamicObject {
    serde_json::from_value(serde_json::to_value(resource).unwrap()).unwrap()
}

/// Core v1 event pointing at `object_kind/object_name` in `default`.
pub fn create_event(
    name: &str,
    object_kind: &str,
    object_name: &str,
    object_uid: &str,
    last_timestamp: &str,
) -> DynamicObject {
    serde_json::from_value(json!({
        "apiVersion": "v1",
        "kind": "Event",
        "metadata": { "name": name, "namespace": "default" },
        "involvedObject": {
            "kind": object_kind,
            "name": object_name,
            "namespace": "default",
            "uid": object_uid,
        },
        "reason": "ScalingReplicaSet",
        "message": format!("{name} happened"),
        "type": "Normal",
        "count": 1,
        "firstTimestamp": last_timestamp,
        "lastTimestamp": last_timestamp,
    }))
    .unwrap()
}
