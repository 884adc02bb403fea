use kube::api::DynamicObject;

use crate::component::{Component, SummarySection, Width};
use crate::error::PrintError;

use super::Object;

/// Summary view for kinds without a dedicated printer.
pub fn default_object(object: Option<DynamicObject>) -> Result<Object, PrintError> {
    let mut o = Object::new(object, []);

    let (api_version, kind) = o
        .object()
        .and_then(|obj| obj.types.as_ref())
        .map(|t| (t.api_version.clone(), t.kind.clone()))
        .unwrap_or_default();
    o.register_config(
        move |_| {
            Ok(Component::summary(
                "Configuration",
                vec![
                    SummarySection::new("API Version", Component::text(api_version.clone())),
                    SummarySection::new("Kind", Component::text(kind.clone())),
                ],
            ))
        },
        Width::Half,
    );
    o.enable_events();

    Ok(o)
}
