//! Builder registry
//!
//! Provides [`BuilderRegistry`] for dispatching widgets to their
//! [`AttributeBuilder`] by widget type.

use crate::builders::{
    GeoBuilder, Matrix1dBuilder, Matrix2dBuilder, MultiChoiceBuilder, SingleChoiceBuilder,
};
use crate::error::RegistryError;
use crate::strategy::AttributeBuilder;
use deep_framework::WidgetType;
use std::collections::HashMap;

/// Registry of attribute builders keyed by widget type
#[derive(Debug, Default)]
pub struct BuilderRegistry {
    builders: HashMap<WidgetType, Box<dyn AttributeBuilder>>,
}

impl BuilderRegistry {
    /// Create new empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Create registry with the built-in builders
    ///
    /// Covers every mapping-supported widget type.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Matrix1dBuilder);
        registry.register(Matrix2dBuilder);
        registry.register(SingleChoiceBuilder::scale());
        registry.register(SingleChoiceBuilder::select());
        registry.register(MultiChoiceBuilder::multi_select());
        registry.register(MultiChoiceBuilder::organigram());
        registry.register(GeoBuilder);
        registry
    }

    /// Register a builder, replacing any builder for the same type
    pub fn register(&mut self, builder: impl AttributeBuilder + 'static) {
        let widget_type = builder.widget_type();
        if let Some(previous) = self.builders.insert(widget_type, Box::new(builder)) {
            tracing::debug!("Replaced {} builder '{}'", widget_type, previous.name());
        }
    }

    /// Builder for a widget type
    #[inline]
    #[must_use]
    pub fn get(&self, widget_type: WidgetType) -> Option<&dyn AttributeBuilder> {
        self.builders.get(&widget_type).map(|b| &**b)
    }

    /// Check if a builder exists for a widget type
    #[inline]
    #[must_use]
    pub fn contains(&self, widget_type: WidgetType) -> bool {
        self.builders.contains_key(&widget_type)
    }

    /// Registered widget types in declaration order
    #[must_use]
    pub fn widget_types(&self) -> Vec<WidgetType> {
        let mut types: Vec<_> = self.builders.keys().copied().collect();
        types.sort_unstable();
        types
    }

    /// Get number of registered builders
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.builders.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }

    /// Check that the registry covers exactly the mapping-supported types
    ///
    /// # Errors
    /// - [`RegistryError::UnsupportedType`] when a builder targets a type
    ///   that cannot carry mappings
    /// - [`RegistryError::MissingBuilder`] when a supported type has no builder
    pub fn validate(&self) -> Result<(), RegistryError> {
        if let Some(extra) = self
            .widget_types()
            .into_iter()
            .find(|t| !t.supports_mapping())
        {
            return Err(RegistryError::UnsupportedType(extra));
        }

        match WidgetType::MAPPING_SUPPORTED
            .into_iter()
            .find(|t| !self.contains(*t))
        {
            Some(missing) => Err(RegistryError::MissingBuilder(missing)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::{BuildContext, BuildOutcome};
    use deep_framework::Widget;

    #[derive(Debug)]
    struct NoopBuilder(WidgetType);

    impl AttributeBuilder for NoopBuilder {
        fn widget_type(&self) -> WidgetType {
            self.0
        }

        fn build(&self, _widget: &Widget, _ctx: &BuildContext<'_>) -> BuildOutcome {
            BuildOutcome::none()
        }

        fn name(&self) -> &'static str {
            "noop"
        }
    }

    #[test]
    fn defaults_cover_supported_types() {
        let registry = BuilderRegistry::with_defaults();
        assert_eq!(registry.len(), WidgetType::MAPPING_SUPPORTED.len());
        assert_eq!(registry.widget_types(), WidgetType::MAPPING_SUPPORTED.to_vec());
        assert!(registry.validate().is_ok());
        assert_eq!(registry.get(WidgetType::Scale).map(|b| b.name()), Some("scale"));
    }

    #[test]
    fn missing_builder_is_reported() {
        let mut registry = BuilderRegistry::new();
        registry.register(Matrix1dBuilder);
        assert!(!registry.is_empty());
        assert_eq!(
            registry.validate(),
            Err(RegistryError::MissingBuilder(WidgetType::Matrix2d))
        );
    }

    #[test]
    fn unsupported_builder_is_reported() {
        let mut registry = BuilderRegistry::with_defaults();
        registry.register(NoopBuilder(WidgetType::Text));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::UnsupportedType(WidgetType::Text))
        );
    }

    #[test]
    fn register_replaces_existing_builder() {
        let mut registry = BuilderRegistry::with_defaults();
        registry.register(NoopBuilder(WidgetType::Geo));
        assert_eq!(registry.len(), WidgetType::MAPPING_SUPPORTED.len());
        assert_eq!(registry.get(WidgetType::Geo).map(|b| b.name()), Some("noop"));
    }
}
