//! DEEP Assisted Tagging
//!
//! Turns NLP predictions for an excerpt into recommended entry attributes
//! for the widgets of an analytical framework.
//!
//! # Core Concepts
//!
//! - [`WidgetCatalog`]: Ordered widget list of a framework
//! - [`MappingClassifier`]: Narrows mappings to one widget and shape
//! - [`AttributeBuilder`]: Per-widget-type attribute construction
//! - [`BuilderRegistry`]: Dispatch table validated against supported types
//! - [`Recommender`]: One recommendation pass over a prediction payload
//! - [`reconcile`]: Merges recommendations into default attributes
//! - [`EntryDraft`]: Excerpt entry assembled from a recommendation
//! - [`auto_match`]: Suggests mappings from label similarity
//!
//! # Example
//!
//! ```rust,ignore
//! use deep_assist::{EntryDraft, Recommender, AssistConfig};
//! use deep_framework::{Framework, Predictions, UlidGenerator};
//!
//! let framework = Framework::from_json(&payload)?;
//! let ids = UlidGenerator::new();
//! let recommender = Recommender::new(&framework);
//!
//! match recommender.recommend(&predictions, &ids).into_recommendation() {
//!     Some(recommendation) => {
//!         let draft = EntryDraft::excerpt(lead, text, &ids)
//!             .with_recommendation(&recommendation, recommender.config())
//!             .finalize(recommender.catalog().all().iter().copied(), &ids);
//!     }
//!     None => { /* show outcome.message() */ }
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Pipeline stages
mod builders;
mod catalog;
mod classifier;
mod config;
mod defaults;
mod entry;
mod error;
mod possible;
mod recommend;
mod reconcile;
mod registry;
mod strategy;

// Re-exports
pub use builders::{
    geo_attribute, matrix1d_attribute, matrix2d_attribute, multi_choice_attribute,
    single_choice_attribute, GeoBuilder, Matrix1dBuilder, Matrix2dBuilder, MultiChoiceBuilder,
    SingleChoice, SingleChoiceBuilder,
};
pub use catalog::WidgetCatalog;
pub use classifier::{supported_geo_widgets, MappingClassifier, MappingShape};
pub use config::AssistConfig;
pub use defaults::{default_attributes, default_value};
pub use entry::{apply_recommendation, EntryDraft, EntryType};
pub use error::{AssistError, ConfigError, RegistryError};
pub use possible::{
    auto_match, label_similarity, mapping_coverage, possible_mappings, possible_mappings_for,
    PossibleMapping,
};
pub use recommend::{
    recommend, Recommendation, RecommendationOutcome, Recommender, NO_FIT_MESSAGE,
    NO_RECOMMENDATIONS_MESSAGE,
};
pub use reconcile::reconcile;
pub use registry::BuilderRegistry;
pub use strategy::{AttributeBuilder, BuildContext, BuildOutcome};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use deep_framework::{
        AssistedTag, Association, Framework, KeyLabel, Predictions, Section, SequentialIds,
        SingleChoiceProperties, TagId, Widget, WidgetKind, WidgetType,
    };

    fn framework() -> Framework {
        let select = Widget::new(
            "w1",
            1,
            WidgetKind::Select(Some(SingleChoiceProperties {
                options: vec![KeyLabel::new("a", "Health"), KeyLabel::new("b", "Shelter")],
                default_value: None,
            })),
        );
        Framework::new().with_section(Section::new("main", vec![select]))
    }

    #[test]
    fn auto_matched_mappings_drive_recommendations() {
        let ids = SequentialIds::default();
        let tags = vec![AssistedTag {
            id: TagId::from("t1"),
            name: "health".into(),
            group: None,
            is_category: false,
            hide_in_analysis_framework_mapping: false,
        }];

        let base = framework();
        let possible = possible_mappings_for(&WidgetCatalog::read(&base));
        let mappings = auto_match(&possible, &tags, AssistConfig::default().auto_match_threshold, &ids);
        assert!((mapping_coverage(&mappings, possible.len()) - 50.0).abs() < f64::EPSILON);

        let framework = base.with_mappings(mappings);
        let outcome = recommend(&framework, &Predictions::new(["t1"], Vec::new()), &ids);
        let recommendation = outcome.recommendation().unwrap();

        assert_eq!(recommendation.recommendations.len(), 1);
        assert_eq!(recommendation.hints[0].widget_type, WidgetType::Select);
        assert_eq!(recommendation.hints[0].hints, vec!["a".to_string()]);
    }

    #[test]
    fn classifier_and_registry_agree_on_shapes() {
        let registry = BuilderRegistry::with_defaults();
        for widget_type in WidgetType::MAPPING_SUPPORTED {
            let builder = registry.get(widget_type).unwrap();
            assert_eq!(builder.widget_type(), widget_type);
        }
        let select = Association::for_option(WidgetType::Select, "a").unwrap();
        assert!(MappingShape::Option(WidgetType::Select).accepts(&select));
    }
}
