//! Entry attributes and widget hints
//!
//! An [`Attribute`] is the value one entry holds for one widget. Its
//! [`AttributeValue`] is tagged with the widget type (`widgetType` on the
//! wire) and wraps the type-specific value in a `data: { value }` block.

use crate::id::{ClientId, WidgetId};
use crate::widget::{Widget, WidgetType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// MATRIX1D value: row key → cell key → selected
pub type Matrix1dValue = IndexMap<String, IndexMap<String, bool>>;

/// Column selection of a MATRIX2D cell: column key → sub-column keys
pub type Matrix2dColumns = IndexMap<String, Vec<String>>;

/// MATRIX2D value: row key → sub-row key → column selection
pub type Matrix2dValue = IndexMap<String, IndexMap<String, Matrix2dColumns>>;

/// `data` block of an attribute
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AttributeData<T> {
    /// Widget-specific value
    pub value: T,
}

impl<T> AttributeData<T> {
    /// Wrap a value
    #[inline]
    #[must_use]
    pub fn new(value: T) -> Self {
        Self { value }
    }
}

/// Date range value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeValue {
    /// First day
    pub start_date: String,
    /// Last day
    pub end_date: String,
}

/// Time range value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRangeValue {
    /// Start time
    pub start_time: String,
    /// End time
    pub end_time: String,
}

/// Attribute value tagged by widget type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widgetType", content = "data")]
pub enum AttributeValue {
    /// Selected cells by row
    #[serde(rename = "MATRIX1D")]
    Matrix1d(AttributeData<Matrix1dValue>),
    /// Selected columns by sub-row
    #[serde(rename = "MATRIX2D")]
    Matrix2d(AttributeData<Matrix2dValue>),
    /// Selected option key
    #[serde(rename = "SCALE")]
    Scale(AttributeData<String>),
    /// Selected option key
    #[serde(rename = "SELECT")]
    Select(AttributeData<String>),
    /// Selected option keys
    #[serde(rename = "MULTISELECT")]
    MultiSelect(AttributeData<Vec<String>>),
    /// Selected node keys
    #[serde(rename = "ORGANIGRAM")]
    Organigram(AttributeData<Vec<String>>),
    /// Selected area ids
    #[serde(rename = "GEO")]
    Geo(AttributeData<Vec<String>>),
    /// Text
    #[serde(rename = "TEXT")]
    Text(AttributeData<String>),
    /// Number
    #[serde(rename = "NUMBER")]
    Number(AttributeData<f64>),
    /// ISO date
    #[serde(rename = "DATE")]
    Date(AttributeData<String>),
    /// Time of day
    #[serde(rename = "TIME")]
    Time(AttributeData<String>),
    /// Date range
    #[serde(rename = "DATE_RANGE")]
    DateRange(AttributeData<DateRangeValue>),
    /// Time range
    #[serde(rename = "TIME_RANGE")]
    TimeRange(AttributeData<TimeRangeValue>),
}

impl AttributeValue {
    /// Widget type of the value
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        match self {
            AttributeValue::Matrix1d(_) => WidgetType::Matrix1d,
            AttributeValue::Matrix2d(_) => WidgetType::Matrix2d,
            AttributeValue::Scale(_) => WidgetType::Scale,
            AttributeValue::Select(_) => WidgetType::Select,
            AttributeValue::MultiSelect(_) => WidgetType::MultiSelect,
            AttributeValue::Organigram(_) => WidgetType::Organigram,
            AttributeValue::Geo(_) => WidgetType::Geo,
            AttributeValue::Text(_) => WidgetType::Text,
            AttributeValue::Number(_) => WidgetType::Number,
            AttributeValue::Date(_) => WidgetType::Date,
            AttributeValue::Time(_) => WidgetType::Time,
            AttributeValue::DateRange(_) => WidgetType::DateRange,
            AttributeValue::TimeRange(_) => WidgetType::TimeRange,
        }
    }

    /// MATRIX1D value
    #[inline]
    #[must_use]
    pub fn matrix1d(value: Matrix1dValue) -> Self {
        AttributeValue::Matrix1d(AttributeData::new(value))
    }

    /// MATRIX2D value
    #[inline]
    #[must_use]
    pub fn matrix2d(value: Matrix2dValue) -> Self {
        AttributeValue::Matrix2d(AttributeData::new(value))
    }

    /// GEO value
    #[inline]
    #[must_use]
    pub fn geo(area_ids: Vec<String>) -> Self {
        AttributeValue::Geo(AttributeData::new(area_ids))
    }

    /// Selected option keys for single and multiple choice values
    #[must_use]
    pub fn option_keys(&self) -> Vec<&str> {
        match self {
            AttributeValue::Scale(d) | AttributeValue::Select(d) => vec![d.value.as_str()],
            AttributeValue::MultiSelect(d) | AttributeValue::Organigram(d) => {
                d.value.iter().map(String::as_str).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Value of one widget on one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attribute {
    /// Local identity
    pub client_id: ClientId,
    /// Server id (absent until saved)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Owning widget; identity for merge purposes
    pub widget: WidgetId,
    /// Widget schema version the value was written against
    pub widget_version: u32,
    /// Typed value
    #[serde(flatten)]
    pub value: AttributeValue,
}

impl Attribute {
    /// Create an unsaved attribute for a widget
    #[must_use]
    pub fn new(client_id: ClientId, widget: &Widget, value: AttributeValue) -> Self {
        Self {
            client_id,
            id: None,
            widget: widget.id.clone(),
            widget_version: widget.version,
            value,
        }
    }

    /// Widget type of the value
    #[inline]
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        self.value.widget_type()
    }

    /// Keep only the first `keep` area ids of a GEO value
    ///
    /// Non-GEO attributes are returned unchanged.
    #[must_use]
    pub fn truncate_geo(mut self, keep: usize) -> Self {
        if let AttributeValue::Geo(data) = &mut self.value {
            data.value.truncate(keep);
        }
        self
    }
}

/// Candidate option keys surfaced for a single-choice widget
///
/// Hints are informational and never produce an attribute on their own. A
/// single hint accompanies an automatic selection; two or more mean the
/// selection was ambiguous and left to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetHint {
    /// Widget the hints belong to
    pub widget_pk: WidgetId,
    /// Widget type (SCALE or SELECT)
    pub widget_type: WidgetType,
    /// Candidate option keys in mapping order
    pub hints: Vec<String>,
}
