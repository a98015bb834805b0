//! Widget definitions
//!
//! A widget is one taggable field of an analytical framework. Its
//! [`WidgetKind`] carries the type tag (`widgetId` on the wire) together with
//! the type-specific properties: matrix rows and columns, option lists or an
//! organigram tree.

use crate::error::FrameworkError;
use crate::id::WidgetId;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Closed set of widget types
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WidgetType {
    /// Rows of selectable cells
    #[serde(rename = "MATRIX1D")]
    Matrix1d,
    /// Sub-rows crossed with columns and sub-columns
    #[serde(rename = "MATRIX2D")]
    Matrix2d,
    /// Ordered single choice
    #[serde(rename = "SCALE")]
    Scale,
    /// Single choice
    #[serde(rename = "SELECT")]
    Select,
    /// Multiple choice
    #[serde(rename = "MULTISELECT")]
    MultiSelect,
    /// Multiple choice over a tree
    #[serde(rename = "ORGANIGRAM")]
    Organigram,
    /// Geographic areas
    #[serde(rename = "GEO")]
    Geo,
    /// Free text
    #[serde(rename = "TEXT")]
    Text,
    /// Number
    #[serde(rename = "NUMBER")]
    Number,
    /// Calendar date
    #[serde(rename = "DATE")]
    Date,
    /// Time of day
    #[serde(rename = "TIME")]
    Time,
    /// Pair of dates
    #[serde(rename = "DATE_RANGE")]
    DateRange,
    /// Pair of times
    #[serde(rename = "TIME_RANGE")]
    TimeRange,
}

impl WidgetType {
    /// Every widget type
    pub const ALL: [WidgetType; 13] = [
        WidgetType::Matrix1d,
        WidgetType::Matrix2d,
        WidgetType::Scale,
        WidgetType::Select,
        WidgetType::MultiSelect,
        WidgetType::Organigram,
        WidgetType::Geo,
        WidgetType::Text,
        WidgetType::Number,
        WidgetType::Date,
        WidgetType::Time,
        WidgetType::DateRange,
        WidgetType::TimeRange,
    ];

    /// Widget types that prediction tags can be mapped onto
    pub const MAPPING_SUPPORTED: [WidgetType; 7] = [
        WidgetType::Matrix1d,
        WidgetType::Matrix2d,
        WidgetType::Scale,
        WidgetType::Select,
        WidgetType::MultiSelect,
        WidgetType::Organigram,
        WidgetType::Geo,
    ];

    /// Wire name of the type
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WidgetType::Matrix1d => "MATRIX1D",
            WidgetType::Matrix2d => "MATRIX2D",
            WidgetType::Scale => "SCALE",
            WidgetType::Select => "SELECT",
            WidgetType::MultiSelect => "MULTISELECT",
            WidgetType::Organigram => "ORGANIGRAM",
            WidgetType::Geo => "GEO",
            WidgetType::Text => "TEXT",
            WidgetType::Number => "NUMBER",
            WidgetType::Date => "DATE",
            WidgetType::Time => "TIME",
            WidgetType::DateRange => "DATE_RANGE",
            WidgetType::TimeRange => "TIME_RANGE",
        }
    }

    /// Whether prediction mappings can target this type
    #[inline]
    #[must_use]
    pub fn supports_mapping(self) -> bool {
        Self::MAPPING_SUPPORTED.contains(&self)
    }

    /// Whether mappings of this type are driven by categorical tags
    ///
    /// GEO mappings are a widget allow-list and never carry a tag.
    #[inline]
    #[must_use]
    pub fn is_categorical(self) -> bool {
        self.supports_mapping() && self != WidgetType::Geo
    }

    /// Current schema version of the attribute value shape
    ///
    /// Attributes created without a concrete widget version (static defaults)
    /// are stamped with this value.
    #[must_use]
    pub fn current_version(self) -> u32 {
        match self {
            WidgetType::Matrix1d
            | WidgetType::Matrix2d
            | WidgetType::Scale
            | WidgetType::Select
            | WidgetType::MultiSelect
            | WidgetType::Organigram
            | WidgetType::Geo
            | WidgetType::Text
            | WidgetType::Number
            | WidgetType::Date
            | WidgetType::Time
            | WidgetType::DateRange
            | WidgetType::TimeRange => 1,
        }
    }
}

impl Display for WidgetType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetType {
    type Err = FrameworkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| FrameworkError::UnknownWidgetType(s.to_string()))
    }
}

/// Keyed, labelled option or cell
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyLabel {
    /// Stable key referenced by mappings and attribute values
    pub key: String,
    /// Display label
    pub label: String,
    /// Display order
    #[serde(default)]
    pub order: i32,
    /// Display color (rows and scale options only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl KeyLabel {
    /// Create option with order 0 and no color
    #[must_use]
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            order: 0,
            color: None,
        }
    }
}

/// Row of a MATRIX1D widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix1dRow {
    /// Row key
    pub key: String,
    /// Row label
    pub label: String,
    /// Display order
    #[serde(default)]
    pub order: i32,
    /// Row color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Cells (sub-rows)
    #[serde(default)]
    pub cells: Vec<KeyLabel>,
}

/// Row of a MATRIX2D widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix2dRow {
    /// Row key
    pub key: String,
    /// Row label
    pub label: String,
    /// Display order
    #[serde(default)]
    pub order: i32,
    /// Row color
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Sub-rows
    #[serde(default)]
    pub sub_rows: Vec<KeyLabel>,
}

/// Column of a MATRIX2D widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix2dColumn {
    /// Column key
    pub key: String,
    /// Column label
    pub label: String,
    /// Display order
    #[serde(default)]
    pub order: i32,
    /// Sub-columns
    #[serde(default)]
    pub sub_columns: Vec<KeyLabel>,
}

/// Node of an ORGANIGRAM tree
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganigramNode {
    /// Node key
    pub key: String,
    /// Node label
    pub label: String,
    /// Display order
    #[serde(default)]
    pub order: i32,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<OrganigramNode>,
}

/// MATRIX1D properties
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix1dProperties {
    /// Rows in display order
    #[serde(default)]
    pub rows: Vec<Matrix1dRow>,
}

/// MATRIX2D properties
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix2dProperties {
    /// Rows in display order
    #[serde(default)]
    pub rows: Vec<Matrix2dRow>,
    /// Columns in display order
    #[serde(default)]
    pub columns: Vec<Matrix2dColumn>,
}

/// Properties of single-choice widgets (SCALE, SELECT)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleChoiceProperties {
    /// Options in display order
    #[serde(default)]
    pub options: Vec<KeyLabel>,
    /// Option key selected by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// MULTISELECT properties
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiChoiceProperties {
    /// Options in display order
    #[serde(default)]
    pub options: Vec<KeyLabel>,
    /// Option keys selected by default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Vec<String>>,
}

/// ORGANIGRAM properties
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganigramProperties {
    /// Root of the option tree
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OrganigramNode>,
}

/// Properties of TEXT, DATE and TIME widgets
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextualProperties {
    /// Value used when an entry is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// NUMBER properties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberProperties {
    /// Value used when an entry is created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
    /// Lower bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_value: Option<f64>,
    /// Upper bound
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_value: Option<f64>,
}

/// Properties of widgets with no structure (GEO, ranges)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EmptyProperties {}

/// Widget type tag plus properties
///
/// Properties are optional on the wire; a missing block behaves like an
/// empty one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widgetId", content = "properties")]
pub enum WidgetKind {
    /// Rows of selectable cells
    #[serde(rename = "MATRIX1D")]
    Matrix1d(Option<Matrix1dProperties>),
    /// Sub-rows crossed with columns
    #[serde(rename = "MATRIX2D")]
    Matrix2d(Option<Matrix2dProperties>),
    /// Ordered single choice
    #[serde(rename = "SCALE")]
    Scale(Option<SingleChoiceProperties>),
    /// Single choice
    #[serde(rename = "SELECT")]
    Select(Option<SingleChoiceProperties>),
    /// Multiple choice
    #[serde(rename = "MULTISELECT")]
    MultiSelect(Option<MultiChoiceProperties>),
    /// Tree of selectable nodes
    #[serde(rename = "ORGANIGRAM")]
    Organigram(Option<OrganigramProperties>),
    /// Geographic areas
    #[serde(rename = "GEO")]
    Geo(Option<EmptyProperties>),
    /// Free text
    #[serde(rename = "TEXT")]
    Text(Option<TextualProperties>),
    /// Numeric value
    #[serde(rename = "NUMBER")]
    Number(Option<NumberProperties>),
    /// Calendar date
    #[serde(rename = "DATE")]
    Date(Option<TextualProperties>),
    /// Time of day
    #[serde(rename = "TIME")]
    Time(Option<TextualProperties>),
    /// Pair of dates
    #[serde(rename = "DATE_RANGE")]
    DateRange(Option<EmptyProperties>),
    /// Pair of times
    #[serde(rename = "TIME_RANGE")]
    TimeRange(Option<EmptyProperties>),
}

impl WidgetKind {
    /// Type tag of this kind
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        match self {
            WidgetKind::Matrix1d(_) => WidgetType::Matrix1d,
            WidgetKind::Matrix2d(_) => WidgetType::Matrix2d,
            WidgetKind::Scale(_) => WidgetType::Scale,
            WidgetKind::Select(_) => WidgetType::Select,
            WidgetKind::MultiSelect(_) => WidgetType::MultiSelect,
            WidgetKind::Organigram(_) => WidgetType::Organigram,
            WidgetKind::Geo(_) => WidgetType::Geo,
            WidgetKind::Text(_) => WidgetType::Text,
            WidgetKind::Number(_) => WidgetType::Number,
            WidgetKind::Date(_) => WidgetType::Date,
            WidgetKind::Time(_) => WidgetType::Time,
            WidgetKind::DateRange(_) => WidgetType::DateRange,
            WidgetKind::TimeRange(_) => WidgetType::TimeRange,
        }
    }
}

/// Taggable field of an analytical framework
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    /// Server id
    pub id: WidgetId,
    /// Framework-unique key
    #[serde(default)]
    pub key: String,
    /// Display title
    #[serde(default)]
    pub title: String,
    /// Schema version of the attribute value shape
    #[serde(default = "default_widget_version")]
    pub version: u32,
    /// Type and properties
    #[serde(flatten)]
    pub kind: WidgetKind,
}

fn default_widget_version() -> u32 {
    1
}

impl Widget {
    /// Create widget with empty key and title
    #[must_use]
    pub fn new(id: impl Into<WidgetId>, version: u32, kind: WidgetKind) -> Self {
        Self {
            id: id.into(),
            key: String::new(),
            title: String::new(),
            version,
            kind,
        }
    }

    /// Type tag
    #[inline]
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        self.kind.widget_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn widget_type_round_trips_through_names() {
        for widget_type in WidgetType::ALL {
            assert_eq!(widget_type.as_str().parse::<WidgetType>().unwrap(), widget_type);
        }
        assert!("MATRIX3D".parse::<WidgetType>().is_err());
    }

    #[test]
    fn categorical_types_exclude_geo_and_plain_inputs() {
        assert!(WidgetType::Matrix2d.is_categorical());
        assert!(WidgetType::Organigram.is_categorical());
        assert!(!WidgetType::Geo.is_categorical());
        assert!(WidgetType::Geo.supports_mapping());
        assert!(!WidgetType::Text.supports_mapping());
        assert!(!WidgetType::DateRange.supports_mapping());
    }

    #[test]
    fn widget_decodes_graphql_shape() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "13",
            "key": "sample-matrix-1d",
            "title": "Matrix 1D",
            "version": 11,
            "widgetId": "MATRIX1D",
            "properties": {
                "rows": [{
                    "key": "row-1",
                    "label": "Row 1",
                    "order": 1,
                    "color": "#b0b0b0",
                    "cells": [{ "key": "sub-row-1-1", "label": "Sub Row 1 1", "order": 1 }]
                }]
            }
        }))
        .unwrap();

        assert_eq!(widget.widget_type(), WidgetType::Matrix1d);
        assert_eq!(widget.version, 11);
        match widget.kind {
            WidgetKind::Matrix1d(Some(props)) => {
                assert_eq!(props.rows[0].cells[0].key, "sub-row-1-1");
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn widget_without_properties_decodes() {
        let widget: Widget = serde_json::from_value(json!({
            "id": "3",
            "widgetId": "GEO",
            "properties": null
        }))
        .unwrap();
        assert_eq!(widget.widget_type(), WidgetType::Geo);
        assert_eq!(widget.version, 1);
    }
}
