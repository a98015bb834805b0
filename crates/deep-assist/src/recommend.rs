//! Recommendation aggregator
//!
//! One pass runs `INIT → CLASSIFY → BUILD → FINALIZE` over a framework and a
//! prediction payload. No state survives between passes, so a
//! [`Recommender`] can be shared and reused freely.

use crate::catalog::WidgetCatalog;
use crate::classifier::{supported_geo_widgets, MappingClassifier};
use crate::config::AssistConfig;
use crate::error::AssistError;
use crate::registry::BuilderRegistry;
use crate::strategy::{BuildContext, BuildOutcome};
use deep_framework::{
    Attribute, ClientIdGenerator, Framework, GeoArea, Predictions, Widget, WidgetHint, WidgetType,
};
use serde::Serialize;

/// Message reported when the payload carries neither tags nor locations
pub const NO_RECOMMENDATIONS_MESSAGE: &str = "no recommendations found";

/// Message reported when predictions produced nothing for this framework
pub const NO_FIT_MESSAGE: &str = "recommendations did not fit any tags in this project";

/// Attributes and hints recommended for one excerpt
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Recommended attributes in catalog order
    pub recommendations: Vec<Attribute>,
    /// Single-choice hints in catalog order
    pub hints: Vec<WidgetHint>,
    /// Predicted locations, unmodified
    pub geo_areas: Vec<GeoArea>,
}

/// Terminal state of a recommendation pass
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationOutcome {
    /// Payload was empty
    NoRecommendations,
    /// Predictions matched no mapping of the framework
    NoFit,
    /// At least one attribute or hint was produced
    Recommended(Recommendation),
}

impl RecommendationOutcome {
    /// User-facing message of a negative outcome
    #[must_use]
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::NoRecommendations => Some(NO_RECOMMENDATIONS_MESSAGE),
            Self::NoFit => Some(NO_FIT_MESSAGE),
            Self::Recommended(_) => None,
        }
    }

    /// Recommendation, if any
    #[must_use]
    pub fn recommendation(&self) -> Option<&Recommendation> {
        match self {
            Self::Recommended(r) => Some(r),
            _ => None,
        }
    }

    /// Take the recommendation, if any
    #[must_use]
    pub fn into_recommendation(self) -> Option<Recommendation> {
        match self {
            Self::Recommended(r) => Some(r),
            _ => None,
        }
    }
}

/// Recommendation pipeline bound to one framework
#[derive(Debug)]
pub struct Recommender<'f> {
    framework: &'f Framework,
    catalog: WidgetCatalog<'f>,
    registry: BuilderRegistry,
    config: AssistConfig,
}

impl<'f> Recommender<'f> {
    /// Recommender with built-in builders and default configuration
    #[must_use]
    pub fn new(framework: &'f Framework) -> Self {
        Self {
            framework,
            catalog: WidgetCatalog::read(framework),
            registry: BuilderRegistry::with_defaults(),
            config: AssistConfig::default(),
        }
    }

    /// Recommender with a custom registry and configuration
    ///
    /// # Errors
    /// Returns error if the registry does not cover exactly the
    /// mapping-supported widget types or the configuration is out of range
    pub fn with_parts(
        framework: &'f Framework,
        registry: BuilderRegistry,
        config: AssistConfig,
    ) -> Result<Self, AssistError> {
        registry.validate()?;
        config.validate()?;
        Ok(Self {
            framework,
            catalog: WidgetCatalog::read(framework),
            registry,
            config,
        })
    }

    /// Widget catalog of the framework
    #[inline]
    #[must_use]
    pub fn catalog(&self) -> &WidgetCatalog<'f> {
        &self.catalog
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &AssistConfig {
        &self.config
    }

    /// Run one recommendation pass
    #[must_use]
    pub fn recommend(
        &self,
        predictions: &Predictions,
        ids: &dyn ClientIdGenerator,
    ) -> RecommendationOutcome {
        if predictions.is_empty() {
            tracing::info!("No tags or locations predicted");
            return RecommendationOutcome::NoRecommendations;
        }

        let mappings = &self.framework.prediction_tags_mapping;
        let classifier = MappingClassifier::matched(mappings, predictions);
        let geo_widgets = supported_geo_widgets(mappings);
        tracing::debug!(
            "Classified {} of {} mappings, {} GEO widgets allowed",
            classifier.len(),
            mappings.len(),
            geo_widgets.len()
        );

        let ctx = BuildContext {
            classifier: &classifier,
            predictions,
            geo_widgets: &geo_widgets,
            config: &self.config,
            ids,
        };

        let (recommendations, hints) = self.catalog.filtered().iter().fold(
            (Vec::new(), Vec::new()),
            |(mut attributes, mut hints), widget| {
                let outcome = self.build_widget(widget, &ctx);
                attributes.extend(outcome.attribute);
                hints.extend(outcome.hint);
                (attributes, hints)
            },
        );

        if recommendations.is_empty() && hints.is_empty() {
            tracing::info!("Predictions did not fit any widget");
            return RecommendationOutcome::NoFit;
        }

        tracing::info!(
            "Recommended {} attributes with {} hints",
            recommendations.len(),
            hints.len()
        );
        RecommendationOutcome::Recommended(Recommendation {
            recommendations,
            hints,
            geo_areas: predictions.locations.clone(),
        })
    }

    fn build_widget(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome {
        let widget_type = widget.widget_type();
        if widget_type == WidgetType::Geo && ctx.predictions.locations.is_empty() {
            return BuildOutcome::none();
        }

        match self.registry.get(widget_type) {
            Some(builder) => builder.build(widget, ctx),
            None => {
                tracing::warn!("No builder for {} widget {}", widget_type, widget.id);
                BuildOutcome::none()
            }
        }
    }
}

/// Run one recommendation pass with the built-in builders
#[must_use]
pub fn recommend(
    framework: &Framework,
    predictions: &Predictions,
    ids: &dyn ClientIdGenerator,
) -> RecommendationOutcome {
    Recommender::new(framework).recommend(predictions, ids)
}
