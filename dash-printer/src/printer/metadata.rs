use kube::api::DynamicObject;

use crate::component::{Component, FlexLayout, SummarySection, Width};
use crate::error::BoxError;
use crate::utils::{format_labels, time_since, timestamp};

/// Default metadata generator: one section holding a "Metadata" summary.
pub fn metadata_gen(object: &DynamicObject, fl: &mut FlexLayout) -> Result<(), BoxError> {
    let section = fl.add_section();
    section.add(metadata_summary(object), Width::Half);
    Ok(())
}

fn metadata_summary(object: &DynamicObject) -> Component {
    let meta = &object.metadata;
    let mut sections = Vec::new();

    if let Some(created) = meta.creation_timestamp.as_ref().and_then(timestamp) {
        sections.push(SummarySection::new("Age", Component::text(time_since(&created))));
    }

    if let Some(labels) = meta.labels.as_ref().filter(|l| !l.is_empty()) {
        sections.push(SummarySection::new(
            "Labels",
            Component::text(format_labels(labels)),
        ));
    }

    if let Some(annotations) = meta.annotations.as_ref().filter(|a| !a.is_empty()) {
        sections.push(SummarySection::new(
            "Annotations",
            Component::text(format_labels(annotations)),
        ));
    }

    let controller = meta
        .owner_references
        .as_deref()
        .unwrap_or_default()
        .iter()
        .find(|r| r.controller == Some(true));
    if let Some(owner) = controller {
        sections.push(SummarySection::new(
            "Controlled By",
            Component::text(format!("{}/{}", owner.kind, owner.name)),
        ));
    }

    Component::summary("Metadata", sections)
}
