use std::fmt;

use k8s_openapi::api::core::v1::PodTemplateSpec;
use kube::api::{DynamicObject, ResourceExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::component::{Component, FlexLayout, SummarySection, Width};
use crate::error::{BoxError, Phase, PrintError};

use super::{events, metadata, pod_template, Options};

/// Produces a single component for an object.
pub type Producer = Box<dyn Fn(&DynamicObject) -> Result<Component, BoxError> + Send + Sync>;

pub type MetadataGen =
    Box<dyn Fn(&DynamicObject, &mut FlexLayout) -> Result<(), BoxError> + Send + Sync>;

pub type PodTemplateGen = Box<
    dyn Fn(&DynamicObject, &PodTemplateSpec, &mut FlexLayout, &Options) -> Result<(), BoxError>
        + Send
        + Sync,
>;

pub type EventsGen = Box<
    dyn Fn(&CancellationToken, &DynamicObject, &mut FlexLayout, &Options) -> Result<(), BoxError>
        + Send
        + Sync,
>;

/// Configures an [`Object`] at construction, typically by swapping a generator.
pub type ObjectOpt = Box<dyn FnOnce(&mut Object)>;

pub fn with_metadata_gen<F>(f: F) -> ObjectOpt
where
    F: Fn(&DynamicObject, &mut FlexLayout) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Box::new(move |o: &mut Object| o.metadata_gen = Box::new(f))
}

pub fn with_pod_template_gen<F>(f: F) -> ObjectOpt
where
    F: Fn(&DynamicObject, &PodTemplateSpec, &mut FlexLayout, &Options) -> Result<(), BoxError>
        + Send
        + Sync
        + 'static,
{
    Box::new(move |o: &mut Object| o.pod_template_gen = Box::new(f))
}

pub fn with_events_gen<F>(f: F) -> ObjectOpt
where
    F: Fn(&CancellationToken, &DynamicObject, &mut FlexLayout, &Options) -> Result<(), BoxError>
        + Send
        + Sync
        + 'static,
{
    Box::new(move |o: &mut Object| o.events_gen = Box::new(f))
}

/// A producer paired with the width its component occupies.
pub struct ItemDescriptor {
    pub func: Producer,
    pub width: Width,
}

impl ItemDescriptor {
    pub fn new<F>(func: F, width: Width) -> Self
    where
        F: Fn(&DynamicObject) -> Result<Component, BoxError> + Send + Sync + 'static,
    {
        Self {
            func: Box::new(func),
            width,
        }
    }

    fn generate(&self, object: &DynamicObject, phase: Phase) -> Result<Component, PrintError> {
        (self.func)(object).map_err(|e| PrintError::from_hook(phase, e))
    }
}

impl fmt::Debug for ItemDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemDescriptor")
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}

/// Lets `register_items` take a lone descriptor as well as a sequence.
impl IntoIterator for ItemDescriptor {
    type Item = ItemDescriptor;
    type IntoIter = std::iter::Once<ItemDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

/// Builds the summary view of a single object.
///
/// Registration happens up front; [`Object::to_component`] then runs the
/// summary, metadata, pod template, events and item phases in that order and
/// returns the layout only if every phase succeeded.
pub struct Object {
    object: Option<DynamicObject>,
    pod_template: Option<PodTemplateSpec>,
    events_enabled: bool,

    config: Vec<ItemDescriptor>,
    summaries: Vec<ItemDescriptor>,
    item_batches: Vec<Vec<ItemDescriptor>>,

    metadata_gen: MetadataGen,
    pod_template_gen: PodTemplateGen,
    events_gen: EventsGen,
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("object", &self.object.as_ref().map(|o| o.name_any()))
            .field("pod_template", &self.pod_template.is_some())
            .field("events_enabled", &self.events_enabled)
            .field("config", &self.config.len())
            .field("summaries", &self.summaries.len())
            .field("item_batches", &self.item_batches.len())
            .finish_non_exhaustive()
    }
}

impl Object {
    pub fn new(object: Option<DynamicObject>, opts: impl IntoIterator<Item = ObjectOpt>) -> Self {
        let mut o = Self {
            object,
            pod_template: None,
            events_enabled: false,
            config: Vec::new(),
            summaries: Vec::new(),
            item_batches: Vec::new(),
            metadata_gen: Box::new(metadata::metadata_gen),
            pod_template_gen: Box::new(pod_template::pod_template_gen),
            events_gen: Box::new(events::events_gen),
        };

        for opt in opts {
            opt(&mut o);
        }

        o
    }

    pub fn object(&self) -> Option<&DynamicObject> {
        self.object.as_ref()
    }

    pub fn register_config<F>(&mut self, func: F, width: Width)
    where
        F: Fn(&DynamicObject) -> Result<Component, BoxError> + Send + Sync + 'static,
    {
        self.config.push(ItemDescriptor::new(func, width));
    }

    pub fn register_summary<F>(&mut self, func: F, width: Width)
    where
        F: Fn(&DynamicObject) -> Result<Component, BoxError> + Send + Sync + 'static,
    {
        self.summaries.push(ItemDescriptor::new(func, width));
    }

    /// Turns on the pod template phase. Only meaningful for objects that own a
    /// pod template; the template is not checked against the object.
    pub fn enable_pod_template(&mut self, template: PodTemplateSpec) {
        self.pod_template = Some(template);
    }

    pub fn enable_events(&mut self) {
        self.events_enabled = true;
    }

    /// Adds one batch of items. Each call becomes its own section.
    pub fn register_items(&mut self, items: impl IntoIterator<Item = ItemDescriptor>) {
        self.item_batches.push(items.into_iter().collect());
    }

    /// Renders the object as a flex layout component titled "Summary".
    pub fn to_component(
        &self,
        ctx: &CancellationToken,
        options: Options,
    ) -> Result<Component, PrintError> {
        self.to_layout(ctx, options).map(Component::from)
    }

    #[tracing::instrument(
        skip_all,
        fields(
            name = ?self.object.as_ref().map(|o| o.name_any()),
            batches = self.item_batches.len(),
        ),
        err(Display)
    )]
    pub fn to_layout(
        &self,
        ctx: &CancellationToken,
        options: Options,
    ) -> Result<FlexLayout, PrintError> {
        let Some(object) = self.object.as_ref() else {
            return Err(PrintError::InvalidInput("object is nil".into()));
        };

        let mut layout = FlexLayout::new("Summary");

        debug!(phase = %Phase::Summary, "generating");
        self.summary_section(object, &mut layout, &options)?;

        debug!(phase = %Phase::Metadata, "generating");
        (self.metadata_gen)(object, &mut layout)
            .map_err(|e| PrintError::from_hook(Phase::Metadata, e))?;

        if let Some(template) = &self.pod_template {
            debug!(phase = %Phase::PodTemplate, "generating");
            (self.pod_template_gen)(object, template, &mut layout, &options)
                .map_err(|e| PrintError::from_hook(Phase::PodTemplate, e))?;
        }

        if self.events_enabled {
            debug!(phase = %Phase::Events, "generating");
            (self.events_gen)(ctx, object, &mut layout, &options)
                .map_err(|e| PrintError::from_hook(Phase::Events, e))?;
        }

        for batch in &self.item_batches {
            debug!(phase = %Phase::Items, items = batch.len(), "generating");
            let section = layout.add_section();
            for item in batch {
                section.add(item.generate(object, Phase::Items)?, item.width);
            }
        }

        Ok(layout)
    }

    fn summary_section(
        &self,
        object: &DynamicObject,
        layout: &mut FlexLayout,
        options: &Options,
    ) -> Result<(), PrintError> {
        let mut config = Vec::with_capacity(self.config.len());
        for item in &self.config {
            config.push((item.generate(object, Phase::Summary)?, item.width));
        }

        if let Some(printer) = &options.plugin_printer {
            let response = printer.print(object)?;
            response.validate()?;
            merge_plugin_config(&mut config, response.config);
        }

        let mut summaries = Vec::with_capacity(self.summaries.len());
        for item in &self.summaries {
            summaries.push((item.generate(object, Phase::Summary)?, item.width));
        }

        let section = layout.add_section();
        for (view, width) in config.into_iter().chain(summaries) {
            section.add(view, width);
        }

        Ok(())
    }
}

/// Plugin sections extend the last local config summary. Without one they get
/// a summary of their own after the local config.
fn merge_plugin_config(config: &mut Vec<(Component, Width)>, sections: Vec<SummarySection>) {
    if sections.is_empty() {
        return;
    }

    let last_summary = config.iter_mut().rev().find_map(|(view, _)| match view {
        Component::Summary(summary) => Some(summary),
        _ => None,
    });

    match last_summary {
        Some(summary) => summary.add(sections),
        None => {
            warn!("no local config summary, plugin sections get their own");
            config.push((Component::summary("Configuration", sections), Width::Half));
        }
    }
}
