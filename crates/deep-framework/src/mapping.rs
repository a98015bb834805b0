//! Prediction tag mappings
//!
//! A [`PredictionTagMapping`] links one NLP prediction tag to one position in
//! a widget's value space. The [`Association`] is discriminated by the target
//! widget type so a mapping can never describe a position of the wrong shape.
//!
//! Raw mapping lists coming from the framework service are decoded leniently
//! ([`parse_mappings`]): a record that does not match any association shape
//! is dropped on its own instead of failing the whole list.

use crate::error::FrameworkError;
use crate::id::{ClientId, TagId, WidgetId};
use crate::widget::WidgetType;
use serde::{Deserialize, Deserializer, Serialize};

/// MATRIX1D position: one cell of one row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matrix1dAssociation {
    /// Row key
    pub row_key: String,
    /// Cell key
    pub sub_row_key: String,
}

/// MATRIX2D position
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Matrix2dAssociation {
    /// Whole column
    #[serde(rename_all = "camelCase")]
    Column {
        /// Column key
        column_key: String,
    },
    /// One sub-column of a column
    #[serde(rename_all = "camelCase")]
    SubColumn {
        /// Column key
        column_key: String,
        /// Sub-column key
        sub_column_key: String,
    },
    /// One sub-row of a row
    #[serde(rename_all = "camelCase")]
    SubRow {
        /// Row key
        row_key: String,
        /// Sub-row key
        sub_row_key: String,
    },
}

impl Matrix2dAssociation {
    /// Column-axis position (`COLUMN` or `SUB_COLUMN`)
    #[inline]
    #[must_use]
    pub fn is_column(&self) -> bool {
        matches!(self, Self::Column { .. } | Self::SubColumn { .. })
    }

    /// Row-axis position (`SUB_ROW`)
    #[inline]
    #[must_use]
    pub fn is_sub_row(&self) -> bool {
        matches!(self, Self::SubRow { .. })
    }
}

/// Option position of SCALE, SELECT, MULTISELECT and ORGANIGRAM widgets
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionAssociation {
    /// Option key
    pub option_key: String,
}

impl OptionAssociation {
    /// Create association for an option key
    #[must_use]
    pub fn new(option_key: impl Into<String>) -> Self {
        Self {
            option_key: option_key.into(),
        }
    }
}

/// Position within a widget, tagged by widget type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "widgetType", content = "association")]
pub enum Association {
    /// MATRIX1D cell
    #[serde(rename = "MATRIX1D")]
    Matrix1d(Matrix1dAssociation),
    /// MATRIX2D axis position
    #[serde(rename = "MATRIX2D")]
    Matrix2d(Matrix2dAssociation),
    /// SCALE option
    #[serde(rename = "SCALE")]
    Scale(OptionAssociation),
    /// SELECT option
    #[serde(rename = "SELECT")]
    Select(OptionAssociation),
    /// MULTISELECT option
    #[serde(rename = "MULTISELECT")]
    MultiSelect(OptionAssociation),
    /// ORGANIGRAM node
    #[serde(rename = "ORGANIGRAM")]
    Organigram(OptionAssociation),
    /// GEO allow-list entry, no position
    #[serde(rename = "GEO")]
    Geo,
}

impl Association {
    /// Widget type this association targets
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        match self {
            Association::Matrix1d(_) => WidgetType::Matrix1d,
            Association::Matrix2d(_) => WidgetType::Matrix2d,
            Association::Scale(_) => WidgetType::Scale,
            Association::Select(_) => WidgetType::Select,
            Association::MultiSelect(_) => WidgetType::MultiSelect,
            Association::Organigram(_) => WidgetType::Organigram,
            Association::Geo => WidgetType::Geo,
        }
    }

    /// Option position, if this is an option-shaped association
    #[must_use]
    pub fn option(&self) -> Option<&OptionAssociation> {
        match self {
            Association::Scale(a)
            | Association::Select(a)
            | Association::MultiSelect(a)
            | Association::Organigram(a) => Some(a),
            Association::Matrix1d(_) | Association::Matrix2d(_) | Association::Geo => None,
        }
    }

    /// Build an option association for the given widget type
    ///
    /// Returns `None` for types that are not option-shaped.
    #[must_use]
    pub fn for_option(widget_type: WidgetType, option_key: impl Into<String>) -> Option<Self> {
        let option = OptionAssociation::new(option_key);
        match widget_type {
            WidgetType::Scale => Some(Association::Scale(option)),
            WidgetType::Select => Some(Association::Select(option)),
            WidgetType::MultiSelect => Some(Association::MultiSelect(option)),
            WidgetType::Organigram => Some(Association::Organigram(option)),
            _ => None,
        }
    }
}

/// Link from a prediction tag to a widget position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionTagMapping {
    /// Server id (absent until saved)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Client id (absent for server-loaded records)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<ClientId>,
    /// Prediction tag (absent for GEO allow-list entries)
    #[serde(default)]
    pub tag: Option<TagId>,
    /// Target widget
    pub widget: WidgetId,
    /// Position within the target widget
    #[serde(flatten)]
    pub association: Association,
}

impl PredictionTagMapping {
    /// Create a tagged mapping
    #[must_use]
    pub fn new(tag: impl Into<TagId>, widget: impl Into<WidgetId>, association: Association) -> Self {
        Self {
            id: None,
            client_id: None,
            tag: Some(tag.into()),
            widget: widget.into(),
            association,
        }
    }

    /// Create a GEO allow-list entry for a widget
    #[must_use]
    pub fn geo(widget: impl Into<WidgetId>) -> Self {
        Self {
            id: None,
            client_id: None,
            tag: None,
            widget: widget.into(),
            association: Association::Geo,
        }
    }

    /// Widget type of the association
    #[inline]
    #[must_use]
    pub fn widget_type(&self) -> WidgetType {
        self.association.widget_type()
    }

    /// Whether this mapping is driven by a categorical tag
    #[inline]
    #[must_use]
    pub fn is_categorical(&self) -> bool {
        self.widget_type().is_categorical()
    }
}

/// Decode one raw mapping record
///
/// GEO records carry no position, so whatever the service put in their
/// `association` slot is ignored.
fn decode_mapping(mut raw: serde_json::Value) -> Result<PredictionTagMapping, serde_json::Error> {
    if let Some(record) = raw.as_object_mut() {
        if record.get("widgetType").and_then(serde_json::Value::as_str) == Some("GEO") {
            record.remove("association");
        }
    }
    serde_json::from_value(raw)
}

/// Decode a list of raw mapping records, dropping malformed ones
#[must_use]
pub fn decode_mappings(raw: Vec<serde_json::Value>) -> Vec<PredictionTagMapping> {
    let total = raw.len();
    let mappings: Vec<_> = raw
        .into_iter()
        .filter_map(|record| match decode_mapping(record) {
            Ok(mapping) => Some(mapping),
            Err(e) => {
                tracing::debug!("Dropping malformed prediction tag mapping: {}", e);
                None
            }
        })
        .collect();

    if mappings.len() < total {
        tracing::warn!(
            "Dropped {} of {} prediction tag mappings with unsupported shapes",
            total - mappings.len(),
            total
        );
    }
    mappings
}

/// Parse a JSON array of mapping records, dropping malformed ones
///
/// # Errors
/// Returns error only if `json` is not a JSON array (or `null`)
pub fn parse_mappings(json: &str) -> Result<Vec<PredictionTagMapping>, FrameworkError> {
    let raw: Option<Vec<serde_json::Value>> = serde_json::from_str(json)?;
    Ok(decode_mappings(raw.unwrap_or_default()))
}

/// Serde helper for fields holding a lenient mapping list
///
/// # Errors
/// Fails only when the field is not an array or `null`
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Vec<PredictionTagMapping>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<serde_json::Value>> = Option::deserialize(deserializer)?;
    Ok(decode_mappings(raw.unwrap_or_default()))
}
