use std::fmt;
use std::sync::Arc;

use crate::cache::Cache;
use crate::plugin::PluginPrinter;

/// Collaborators available to generators during one print.
#[derive(Clone)]
pub struct Options {
    pub cache: Arc<dyn Cache>,
    pub plugin_printer: Option<Arc<dyn PluginPrinter>>,
}

impl Options {
    pub fn new(cache: Arc<dyn Cache>) -> Self {
        Self {
            cache,
            plugin_printer: None,
        }
    }

    pub fn with_plugin_printer(mut self, printer: Arc<dyn PluginPrinter>) -> Self {
        self.plugin_printer = Some(printer);
        self
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("plugin_printer", &self.plugin_printer.is_some())
            .finish_non_exhaustive()
    }
}
