//! Attribute builder trait and core types
//!
//! Provides the [`AttributeBuilder`] trait for pluggable per-widget-type
//! attribute construction during a recommendation pass.

use crate::classifier::MappingClassifier;
use crate::config::AssistConfig;
use deep_framework::{
    Attribute, ClientIdGenerator, Predictions, Widget, WidgetHint, WidgetId, WidgetType,
};
use indexmap::IndexSet;

/// Attribute builder for one widget type
///
/// Builders are pure: the same widget, mappings and predictions always
/// produce the same outcome apart from generated client ids.
pub trait AttributeBuilder: Send + Sync + std::fmt::Debug {
    /// Widget type handled by this builder
    fn widget_type(&self) -> WidgetType;

    /// Build the recommendation for one widget
    ///
    /// # Preconditions
    /// `widget.widget_type() == self.widget_type()`
    fn build(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome;

    /// Builder name (for debugging)
    fn name(&self) -> &'static str;
}

/// Inputs shared by every builder during one recommendation pass
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Categorical mappings whose tag was predicted
    pub classifier: &'a MappingClassifier<'a>,
    /// Prediction payload
    pub predictions: &'a Predictions,
    /// GEO widgets allowed to receive location recommendations
    pub geo_widgets: &'a IndexSet<&'a WidgetId>,
    /// Pipeline tunables
    pub config: &'a AssistConfig,
    /// Client id source
    pub ids: &'a dyn ClientIdGenerator,
}

impl BuildContext<'_> {
    /// Whether a GEO widget is on the allow-list
    #[inline]
    #[must_use]
    pub fn allows_geo(&self, widget: &WidgetId) -> bool {
        self.geo_widgets.contains(widget)
    }
}

/// Result of building one widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOutcome {
    /// Recommended attribute
    pub attribute: Option<Attribute>,
    /// Candidate options for a single-choice widget
    pub hint: Option<WidgetHint>,
}

impl BuildOutcome {
    /// Nothing recommended
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Attribute only
    #[inline]
    #[must_use]
    pub fn attribute(attribute: Option<Attribute>) -> Self {
        Self {
            attribute,
            hint: None,
        }
    }
}
