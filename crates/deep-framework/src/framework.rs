//! Analytical framework definition
//!
//! Widgets live in ordered primary tagging sections and in a flat secondary
//! tagging list. The framework also carries the prediction tag mappings
//! configured for assisted tagging.

use crate::error::FrameworkError;
use crate::mapping::{self, PredictionTagMapping};
use crate::widget::Widget;
use serde::{Deserialize, Serialize};

/// Ordered group of widgets in primary tagging
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Server id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Widgets in display order
    #[serde(default)]
    pub widgets: Vec<Widget>,
}

impl Section {
    /// Create a section
    #[must_use]
    pub fn new(title: impl Into<String>, widgets: Vec<Widget>) -> Self {
        Self {
            id: None,
            title: title.into(),
            widgets,
        }
    }
}

/// Analytical framework
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Framework {
    /// Server id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Primary tagging sections
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub primary_tagging: Vec<Section>,
    /// Secondary tagging widgets
    #[serde(default, deserialize_with = "deserialize_nullable")]
    pub secondary_tagging: Vec<Widget>,
    /// Assisted tagging mappings
    #[serde(default, deserialize_with = "mapping::deserialize_lenient")]
    pub prediction_tags_mapping: Vec<PredictionTagMapping>,
}

fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl Framework {
    /// Create an empty framework
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a framework from its JSON representation
    ///
    /// # Errors
    /// Returns error if sections or widgets do not match the expected shape.
    /// Malformed mapping records are dropped rather than reported.
    pub fn from_json(json: &str) -> Result<Self, FrameworkError> {
        let framework: Self = serde_json::from_str(json)?;
        tracing::debug!(
            "Loaded framework with {} sections, {} secondary widgets, {} mappings",
            framework.primary_tagging.len(),
            framework.secondary_tagging.len(),
            framework.prediction_tags_mapping.len()
        );
        Ok(framework)
    }

    /// Append a primary tagging section
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.primary_tagging.push(section);
        self
    }

    /// Append a secondary tagging widget
    #[must_use]
    pub fn with_secondary(mut self, widget: Widget) -> Self {
        self.secondary_tagging.push(widget);
        self
    }

    /// Replace the mapping list
    #[must_use]
    pub fn with_mappings(mut self, mappings: Vec<PredictionTagMapping>) -> Self {
        self.prediction_tags_mapping = mappings;
        self
    }

    /// Total number of widgets across both taggings
    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.primary_tagging
            .iter()
            .map(|s| s.widgets.len())
            .sum::<usize>()
            + self.secondary_tagging.len()
    }
}
