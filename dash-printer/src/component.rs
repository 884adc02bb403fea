//! View components produced by the printer.
//!
//! Components are plain data. They serialize into the
//! `{"metadata": {...}, "config": {...}}` envelope the dashboard renders.

use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Relative width of a component inside a layout section, in grid columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Width {
    Full,
    #[default]
    Half,
    Third,
    Quarter,
}

impl Width {
    /// Number of grid columns (out of 24) the width spans.
    pub fn columns(self) -> u16 {
        match self {
            Width::Full => 24,
            Width::Half => 12,
            Width::Third => 8,
            Width::Quarter => 6,
        }
    }
}

impl Serialize for Width {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.columns())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Component {
    Text(Text),
    Summary(Summary),
    Table(Table),
    FlexLayout(FlexLayout),
}

impl Component {
    pub fn text(value: impl Into<String>) -> Self {
        Component::Text(Text {
            value: value.into(),
        })
    }

    pub fn summary(title: impl Into<String>, sections: Vec<SummarySection>) -> Self {
        Component::Summary(Summary::new(title, sections))
    }

    fn kind(&self) -> &'static str {
        match self {
            Component::Text(_) => "text",
            Component::Summary(_) => "summary",
            Component::Table(_) => "table",
            Component::FlexLayout(_) => "flexlayout",
        }
    }

    fn title(&self) -> Option<&str> {
        match self {
            Component::Text(_) => None,
            Component::Summary(s) => Some(&s.title),
            Component::Table(t) => Some(&t.title),
            Component::FlexLayout(f) => Some(&f.title),
        }
    }
}

#[derive(Serialize)]
struct Metadata<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
}

#[derive(Serialize)]
struct Envelope<'a, C: Serialize> {
    metadata: Metadata<'a>,
    config: &'a C,
}

impl Serialize for Component {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let metadata = Metadata {
            kind: self.kind(),
            title: self.title(),
        };
        match self {
            Component::Text(config) => Envelope { metadata, config }.serialize(serializer),
            Component::Summary(config) => Envelope { metadata, config }.serialize(serializer),
            Component::Table(config) => Envelope { metadata, config }.serialize(serializer),
            Component::FlexLayout(config) => Envelope { metadata, config }.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub value: String,
}

/// A titled list of header/content pairs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    #[serde(skip)]
    pub title: String,
    pub sections: Vec<SummarySection>,
}

impl Summary {
    pub fn new(title: impl Into<String>, sections: Vec<SummarySection>) -> Self {
        Self {
            title: title.into(),
            sections,
        }
    }

    /// Appends sections after the existing ones.
    pub fn add(&mut self, sections: impl IntoIterator<Item = SummarySection>) {
        self.sections.extend(sections);
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct SummarySection {
    pub header: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Box<Component>>,
}

impl SummarySection {
    pub fn new(header: impl Into<String>, content: Component) -> Self {
        Self {
            header: header.into(),
            content: Some(Box::new(content)),
        }
    }

    pub fn header(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            content: None,
        }
    }
}

pub type TableRow = BTreeMap<String, Component>;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    #[serde(skip)]
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl Table {
    pub fn new(title: impl Into<String>, columns: &[&str]) -> Self {
        Self {
            title: title.into(),
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: TableRow) {
        self.rows.push(row);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexLayoutItem {
    pub width: Width,
    pub view: Component,
}

impl FlexLayoutItem {
    pub fn new(width: Width, view: Component) -> Self {
        Self { width, view }
    }
}

/// One row of a [`FlexLayout`]: components laid out left to right.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct Section {
    items: Vec<FlexLayoutItem>,
}

impl Section {
    pub fn add(&mut self, view: Component, width: Width) {
        self.items.push(FlexLayoutItem::new(width, view));
    }

    pub fn items(&self) -> &[FlexLayoutItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<Vec<FlexLayoutItem>> for Section {
    fn from(items: Vec<FlexLayoutItem>) -> Self {
        Self { items }
    }
}

impl FromIterator<FlexLayoutItem> for Section {
    fn from_iter<I: IntoIterator<Item = FlexLayoutItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

/// Ordered sections, each rendered as its own row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FlexLayout {
    #[serde(skip)]
    pub title: String,
    sections: Vec<Section>,
}

impl FlexLayout {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            sections: Vec::new(),
        }
    }

    /// Appends an empty section and hands it back for population.
    pub fn add_section(&mut self) -> &mut Section {
        self.sections.push(Section::default());
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    pub fn add_sections(&mut self, sections: impl IntoIterator<Item = Section>) {
        self.sections.extend(sections);
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }
}

impl From<FlexLayout> for Component {
    fn from(layout: FlexLayout) -> Self {
        Component::FlexLayout(layout)
    }
}
