use std::sync::Arc;

use kube::api::DynamicObject;

use crate::component::SummarySection;
use crate::error::PluginError;

/// Extra content a plugin contributes for an object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PrintResponse {
    pub config: Vec<SummarySection>,
}

impl PrintResponse {
    /// Rejects sections the dashboard cannot label.
    pub fn validate(&self) -> Result<(), PluginError> {
        match self.config.iter().position(|s| s.header.trim().is_empty()) {
            Some(idx) => Err(PluginError::Malformed(format!(
                "config section {idx} has an empty header"
            ))),
            None => Ok(()),
        }
    }
}

pub trait PluginPrinter: Send + Sync {
    fn print(&self, object: &DynamicObject) -> Result<PrintResponse, PluginError>;
}

/// Fans one print request out to several plugins, in registration order.
#[derive(Clone, Default)]
pub struct PluginChain {
    printers: Vec<Arc<dyn PluginPrinter>>,
}

impl PluginChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, printer: Arc<dyn PluginPrinter>) {
        self.printers.push(printer);
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }
}

impl PluginPrinter for PluginChain {
    #[tracing::instrument(skip_all, fields(plugins = self.printers.len()))]
    fn print(&self, object: &DynamicObject) -> Result<PrintResponse, PluginError> {
        let mut response = PrintResponse::default();
        for printer in &self.printers {
            let part = printer.print(object)?;
            response.config.extend(part.config);
        }
        Ok(response)
    }
}
