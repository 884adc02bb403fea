use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::api::DynamicObject;

use crate::component::{Component, FlexLayout, SummarySection, Width};
use crate::error::BoxError;
use crate::utils::format_labels;

use super::Options;

/// Default pod template generator: labels plus the image of every container.
pub fn pod_template_gen(
    _object: &DynamicObject,
    template: &PodTemplateSpec,
    fl: &mut FlexLayout,
    _options: &Options,
) -> Result<(), BoxError> {
    let mut sections = Vec::new();

    if let Some(labels) = template
        .metadata
        .as_ref()
        .and_then(|m| m.labels.as_ref())
        .filter(|l| !l.is_empty())
    {
        sections.push(SummarySection::new(
            "Labels",
            Component::text(format_labels(labels)),
        ));
    }

    let containers = template
        .spec
        .as_ref()
        .map(|s| s.init_containers.iter().flatten().chain(&s.containers));
    for container in containers.into_iter().flatten() {
        let image = container.image.clone().unwrap_or_else(|| "<none>".into());
        sections.push(SummarySection::new(
            format!("Container {}", container.name),
            Component::text(image),
        ));
    }

    fl.add_section()
        .add(Component::summary("Pod Template", sections), Width::Half);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{Cache, CacheKey};
    use crate::error::CacheError;
    use crate::testutil::{create_deployment, to_dynamic};
    use std::sync::Arc;

    struct NoCache;

    impl Cache for NoCache {
        fn list(&self, key: &CacheKey) -> Result<Vec<DynamicObject>, CacheError> {
            Err(CacheError::NotFound(key.clone()))
        }

        fn get(&self, key: &CacheKey) -> Result<DynamicObject, CacheError> {
            Err(CacheError::NotFound(key.clone()))
        }
    }

    #[test]
    fn test_pod_template_gen() {
        let deployment = create_deployment("web");
        let template = deployment.spec.clone().unwrap().template;

        let mut fl = FlexLayout::new("Summary");
        pod_template_gen(
            &to_dynamic(&deployment),
            &template,
            &mut fl,
            &Options::new(Arc::new(NoCache)),
        )
        .unwrap();

        assert_eq!(fl.sections().len(), 1);
        assert_eq!(
            fl.sections()[0].items()[0].view,
            Component::summary(
                "Pod Template",
                vec![
                    SummarySection::new("Labels", Component::text("app=web")),
                    SummarySection::new("Container nginx", Component::text("nginx:1.27")),
                ]
            )
        );
    }

    #[test]
    fn test_pod_template_gen_empty_template() {
        let deployment = create_deployment("web");
        let mut fl = FlexLayout::new("Summary");
        pod_template_gen(
            &to_dynamic(&deployment),
            &PodTemplateSpec::default(),
            &mut fl,
            &Options::new(Arc::new(NoCache)),
        )
        .unwrap();

        assert_eq!(
            fl.sections()[0].items()[0].view,
            Component::summary("Pod Template", Vec::new())
        );
    }
}
