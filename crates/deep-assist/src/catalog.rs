//! Widget catalog reader
//!
//! Flattens a framework into one ordered widget list: primary tagging
//! sections in order, each section's widgets in order, then secondary
//! tagging. Default attributes are built index-aligned with this order, so it
//! must never depend on anything but the framework itself.

use deep_framework::{Framework, Widget, WidgetId};

/// Ordered view over the widgets of a framework
#[derive(Debug, Clone)]
pub struct WidgetCatalog<'a> {
    all: Vec<&'a Widget>,
    filtered: Vec<&'a Widget>,
}

impl<'a> WidgetCatalog<'a> {
    /// Read the catalog of a framework
    #[must_use]
    pub fn read(framework: &'a Framework) -> Self {
        let all: Vec<&'a Widget> = framework
            .primary_tagging
            .iter()
            .flat_map(|section| section.widgets.iter())
            .chain(framework.secondary_tagging.iter())
            .collect();

        let filtered = all
            .iter()
            .copied()
            .filter(|w| w.widget_type().supports_mapping())
            .collect();

        Self { all, filtered }
    }

    /// Every widget in catalog order
    #[inline]
    #[must_use]
    pub fn all(&self) -> &[&'a Widget] {
        &self.all
    }

    /// Widgets whose type supports prediction mappings, in catalog order
    #[inline]
    #[must_use]
    pub fn filtered(&self) -> &[&'a Widget] {
        &self.filtered
    }

    /// Find a widget by id
    #[must_use]
    pub fn get(&self, id: &WidgetId) -> Option<&'a Widget> {
        self.all.iter().copied().find(|w| &w.id == id)
    }

    /// Number of widgets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.all.len()
    }

    /// Whether the framework has no widgets
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}
