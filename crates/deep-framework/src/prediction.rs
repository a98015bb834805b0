//! Prediction payloads from the NLP service
//!
//! The service is polled by the host; this module only interprets what it
//! returned. A [`DraftEntryPrediction`] still in progress yields
//! [`PredictionState::Pending`], a finished one yields the [`Predictions`]
//! payload consumed by the recommendation pipeline.

use crate::id::TagId;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Geographic area suggested by the prediction service
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoArea {
    /// Area id
    pub id: String,
    /// Display title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Parent area id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Title of the admin level the area belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub admin_level_title: Option<String>,
}

impl GeoArea {
    /// Create area with only an id
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            parent: None,
            admin_level_title: None,
        }
    }
}

/// Selected categorical tags plus candidate locations for one excerpt
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Predictions {
    /// Selected tag ids
    #[serde(default)]
    pub tags: IndexSet<TagId>,
    /// Candidate locations, most relevant first
    #[serde(default)]
    pub locations: Vec<GeoArea>,
}

impl Predictions {
    /// Build payload from tag ids and locations
    #[must_use]
    pub fn new<I, T>(tags: I, locations: Vec<GeoArea>) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<TagId>,
    {
        Self {
            tags: tags.into_iter().map(Into::into).collect(),
            locations,
        }
    }

    /// Neither tags nor locations were predicted
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.locations.is_empty()
    }

    /// Whether a tag was predicted
    #[inline]
    #[must_use]
    pub fn has_tag(&self, tag: &TagId) -> bool {
        self.tags.contains(tag)
    }
}

/// Processing status of a draft entry prediction job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PredictionStatus {
    /// Queued
    Pending,
    /// Running
    Started,
    /// Finished
    Done,
    /// Service could not be reached
    SendFailed,
    /// Anything else reported by the service
    #[serde(other)]
    Unknown,
}

impl PredictionStatus {
    /// Job has not finished; keep polling
    #[inline]
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending | Self::Started)
    }
}

/// One predicted tag of a draft entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionTag {
    /// Tag id
    #[serde(default)]
    pub tag: Option<TagId>,
    /// Whether the model selected this tag
    #[serde(default)]
    pub is_selected: bool,
    /// Category tag id
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TagId>,
}

/// Prediction result attached to a draft entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftEntryPrediction {
    /// Draft entry id
    #[serde(default)]
    pub id: Option<String>,
    /// Job status
    pub prediction_status: PredictionStatus,
    /// Predicted tags; null items are skipped
    #[serde(default)]
    pub prediction_tags: Option<Vec<Option<PredictionTag>>>,
    /// Predicted areas; null items are skipped
    #[serde(default)]
    pub geo_areas: Option<Vec<Option<GeoArea>>>,
}

/// Interpretation of a draft entry prediction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictionState {
    /// Job still running
    Pending,
    /// Job finished with this payload
    Ready(Predictions),
}

impl DraftEntryPrediction {
    /// Interpret the result
    ///
    /// Only selected tags with a tag id contribute to the payload.
    #[must_use]
    pub fn state(&self) -> PredictionState {
        if self.prediction_status.is_pending() {
            return PredictionState::Pending;
        }

        let tags = self
            .prediction_tags
            .iter()
            .flatten()
            .flatten()
            .filter(|p| p.is_selected)
            .filter_map(|p| p.tag.clone())
            .collect();

        let locations = self
            .geo_areas
            .iter()
            .flatten()
            .flatten()
            .cloned()
            .collect();

        PredictionState::Ready(Predictions { tags, locations })
    }
}

/// Prediction tag as listed by the assisted tagging catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistedTag {
    /// Tag id
    pub id: TagId,
    /// Display name, matched against widget labels
    pub name: String,
    /// Grouping label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Category tags only group other tags
    #[serde(default)]
    pub is_category: bool,
    /// Excluded from framework mapping
    #[serde(default)]
    pub hide_in_analysis_framework_mapping: bool,
}

impl AssistedTag {
    /// Whether the tag can be mapped onto framework widgets
    #[inline]
    #[must_use]
    pub fn is_mappable(&self) -> bool {
        !self.is_category && !self.hide_in_analysis_framework_mapping
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn draft(status: &str) -> DraftEntryPrediction {
        serde_json::from_value(json!({
            "id": "d1",
            "predictionStatus": status,
            "predictionTags": [
                { "tag": "t1", "isSelected": true },
                { "tag": "t2", "isSelected": false },
                null,
                { "tag": null, "isSelected": true },
                { "tag": "t3", "isSelected": true }
            ],
            "geoAreas": [{ "id": "g1" }, null, { "id": "g2", "parent": "g0" }]
        }))
        .unwrap()
    }

    #[test]
    fn pending_statuses_keep_polling() {
        assert_eq!(draft("PENDING").state(), PredictionState::Pending);
        assert_eq!(draft("STARTED").state(), PredictionState::Pending);
    }

    #[test]
    fn finished_prediction_keeps_selected_tags() {
        let PredictionState::Ready(predictions) = draft("DONE").state() else {
            panic!("expected ready predictions");
        };

        let tags: Vec<_> = predictions.tags.iter().map(TagId::as_str).collect();
        assert_eq!(tags, vec!["t1", "t3"]);
        assert_eq!(predictions.locations.len(), 2);
        assert_eq!(predictions.locations[1].parent.as_deref(), Some("g0"));
    }

    #[test]
    fn unknown_status_is_not_pending() {
        let draft = draft("SOMETHING_NEW");
        assert_eq!(draft.prediction_status, PredictionStatus::Unknown);
        assert!(matches!(draft.state(), PredictionState::Ready(_)));
    }

    #[test]
    fn category_tags_are_not_mappable() {
        let tag: AssistedTag = serde_json::from_value(json!({
            "id": "c1",
            "name": "Sector",
            "isCategory": true
        }))
        .unwrap();
        assert!(!tag.is_mappable());
    }
}
