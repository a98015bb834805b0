//! Entry draft assembly
//!
//! An [`EntryDraft`] is the excerpt entry being prepared from a
//! recommendation. Recommended GEO attributes carry several candidate
//! areas; only the first ones are pre-selected on the draft. Finalizing a
//! draft merges its attributes into the framework's default attributes.

use crate::config::AssistConfig;
use crate::defaults::default_attributes;
use crate::reconcile::reconcile;
use crate::recommend::Recommendation;
use deep_framework::{Attribute, ClientId, ClientIdGenerator, Widget};
use serde::{Deserialize, Serialize};

/// Kind of entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntryType {
    /// Text excerpt of a lead
    #[default]
    Excerpt,
}

/// Entry under construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryDraft {
    /// Local identity
    pub client_id: ClientId,
    /// Entry kind; always `EXCERPT` for assisted entries
    pub entry_type: EntryType,
    /// Lead the excerpt was taken from
    pub lead: String,
    /// Excerpt text
    pub excerpt: String,
    /// Text originally dropped on the lead
    pub dropped_excerpt: String,
    /// Widget values
    #[serde(default)]
    pub attributes: Vec<Attribute>,
    /// Server draft entry the predictions belong to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draft_entry: Option<String>,
}

impl EntryDraft {
    /// Empty excerpt entry for a lead
    #[must_use]
    pub fn excerpt(
        lead: impl Into<String>,
        text: impl Into<String>,
        ids: &dyn ClientIdGenerator,
    ) -> Self {
        let text = text.into();
        Self {
            client_id: ids.next_id(),
            entry_type: EntryType::Excerpt,
            lead: lead.into(),
            excerpt: text.clone(),
            dropped_excerpt: text,
            attributes: Vec::new(),
            draft_entry: None,
        }
    }

    /// Link to a server draft entry
    #[inline]
    #[must_use]
    pub fn with_draft_entry(mut self, draft_entry: impl Into<String>) -> Self {
        self.draft_entry = Some(draft_entry.into());
        self
    }

    /// Replace the attributes with a recommendation
    ///
    /// GEO attributes keep `config.initial_geo_selection` area ids; every
    /// other attribute is taken as recommended.
    #[must_use]
    pub fn with_recommendation(mut self, recommendation: &Recommendation, config: &AssistConfig) -> Self {
        self.attributes = recommendation
            .recommendations
            .iter()
            .cloned()
            .map(|attr| attr.truncate_geo(config.initial_geo_selection))
            .collect();
        self
    }

    /// Merge the attributes into fresh default attributes of `widgets`
    #[must_use]
    pub fn finalize<'a>(
        mut self,
        widgets: impl IntoIterator<Item = &'a Widget>,
        ids: &dyn ClientIdGenerator,
    ) -> Self {
        let defaults = default_attributes(widgets, ids);
        self.attributes = reconcile(defaults, std::mem::take(&mut self.attributes));
        self
    }

    /// Whether an entry for the same dropped text already exists
    #[must_use]
    pub fn is_duplicate_of(&self, entries: &[EntryDraft]) -> bool {
        entries
            .iter()
            .any(|e| e.client_id != self.client_id && e.dropped_excerpt == self.dropped_excerpt)
    }
}

/// Apply a recommendation to the current draft, creating one if needed
#[must_use]
pub fn apply_recommendation(
    current: Option<EntryDraft>,
    lead: &str,
    text: &str,
    recommendation: &Recommendation,
    config: &AssistConfig,
    ids: &dyn ClientIdGenerator,
) -> EntryDraft {
    current
        .unwrap_or_else(|| EntryDraft::excerpt(lead, text, ids))
        .with_recommendation(recommendation, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use deep_framework::{
        AttributeData, AttributeValue, SequentialIds, TextualProperties, WidgetKind,
    };
    use pretty_assertions::assert_eq;

    fn recommendation() -> Recommendation {
        let select = Widget::new("w1", 1, WidgetKind::Select(None));
        let geo = Widget::new("w3", 1, WidgetKind::Geo(None));
        Recommendation {
            recommendations: vec![
                Attribute::new(
                    ClientId::from("r1"),
                    &select,
                    AttributeValue::Select(AttributeData::new("a".into())),
                ),
                Attribute::new(
                    ClientId::from("r2"),
                    &geo,
                    AttributeValue::geo(vec!["g1".into(), "g2".into(), "g3".into()]),
                ),
            ],
            hints: Vec::new(),
            geo_areas: Vec::new(),
        }
    }

    #[test]
    fn new_draft_keeps_first_geo_area() {
        let ids = SequentialIds::new("entry");
        let draft = apply_recommendation(
            None,
            "lead-1",
            "some text",
            &recommendation(),
            &AssistConfig::default(),
            &ids,
        );

        assert_eq!(draft.client_id, ClientId::from("entry-1"));
        assert_eq!(draft.entry_type, EntryType::Excerpt);
        assert_eq!(draft.dropped_excerpt, "some text");
        assert_eq!(draft.attributes[0], recommendation().recommendations[0]);
        assert_eq!(draft.attributes[1].value, AttributeValue::geo(vec!["g1".into()]));
    }

    #[test]
    fn existing_draft_attributes_are_replaced() {
        let ids = SequentialIds::default();
        let mut existing = EntryDraft::excerpt("lead-1", "text", &ids).with_draft_entry("9");
        existing.attributes = recommendation().recommendations;

        let config = AssistConfig::default().with_initial_geo_selection(2);
        let draft = apply_recommendation(Some(existing.clone()), "x", "y", &recommendation(), &config, &ids);

        assert_eq!(draft.client_id, existing.client_id);
        assert_eq!(draft.draft_entry.as_deref(), Some("9"));
        assert_eq!(draft.lead, "lead-1");
        assert_eq!(
            draft.attributes[1].value,
            AttributeValue::geo(vec!["g1".into(), "g2".into()])
        );
    }

    #[test]
    fn finalize_merges_into_defaults() {
        let ids = SequentialIds::new("d");
        let widgets = vec![
            Widget::new("t", 1, WidgetKind::Text(Some(TextualProperties {
                default_value: Some("n/a".into()),
            }))),
            Widget::new("w1", 1, WidgetKind::Select(None)),
        ];
        let draft = EntryDraft::excerpt("lead", "text", &ids)
            .with_recommendation(&recommendation(), &AssistConfig::default())
            .finalize(&widgets, &ids);

        let summary: Vec<_> = draft
            .attributes
            .iter()
            .map(|a| (a.client_id.as_str(), a.widget.as_str()))
            .collect();
        assert_eq!(summary, vec![("d-2", "t"), ("r1", "w1"), ("r2", "w3")]);
    }

    #[test]
    fn duplicate_check_compares_dropped_text() {
        let ids = SequentialIds::default();
        let first = EntryDraft::excerpt("lead", "same", &ids);
        let second = EntryDraft::excerpt("lead", "same", &ids);
        let third = EntryDraft::excerpt("lead", "other", &ids);

        assert!(second.is_duplicate_of(&[first.clone()]));
        assert!(!third.is_duplicate_of(&[first.clone(), second]));
        assert!(!first.is_duplicate_of(&[first.clone()]));
    }

    #[test]
    fn draft_serializes_in_entry_shape() {
        let draft = EntryDraft::excerpt("12", "text", &SequentialIds::new("e"));
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["entryType"], "EXCERPT");
        assert_eq!(json["droppedExcerpt"], "text");
        assert!(json.get("draftEntry").is_none());
    }
}
