//! Default/recommendation reconciler
//!
//! Merges recommended attributes into the default attributes of a new entry.
//! Attributes are matched on their widget; the default keeps its identity
//! (client id, server id, widget version) and takes the recommended value.

use deep_framework::{Attribute, WidgetId};
use indexmap::IndexMap;

/// Outer join of defaults and recommendations on `widget`
///
/// Output order: defaults in their order, then recommendation-only
/// attributes in theirs. When a widget appears twice in `recommended` the
/// last one wins.
#[must_use]
pub fn reconcile(defaults: Vec<Attribute>, recommended: Vec<Attribute>) -> Vec<Attribute> {
    let mut by_widget: IndexMap<WidgetId, Attribute> = IndexMap::with_capacity(recommended.len());
    for attribute in recommended {
        by_widget.insert(attribute.widget.clone(), attribute);
    }
    let appended = by_widget.len();

    let mut merged: Vec<Attribute> = defaults
        .into_iter()
        .map(|mut default| {
            if let Some(recommendation) = by_widget.shift_remove(&default.widget) {
                default.value = recommendation.value;
            }
            default
        })
        .collect();

    merged.extend(by_widget.into_values());
    tracing::debug!(
        "Reconciled {} attributes ({} recommendation widgets)",
        merged.len(),
        appended
    );
    merged
}
