//! DEEP Framework Model
//!
//! Typed representation of analytical frameworks, prediction tag mappings
//! and entry attributes, as exchanged with the DEEP server.
//!
//! # Core Concepts
//!
//! - [`Framework`]: Primary tagging sections plus secondary tagging widgets
//! - [`Widget`]: One taggable field, typed by [`WidgetKind`]
//! - [`PredictionTagMapping`]: Link from a prediction tag to a widget position
//! - [`Predictions`]: Selected tags and candidate locations for one excerpt
//! - [`Attribute`]: Value of one widget on one entry
//! - [`ClientIdGenerator`]: Injected source of local identifiers
//!
//! # Example
//!
//! ```rust,ignore
//! use deep_framework::{Framework, Predictions, GeoArea};
//!
//! let framework = Framework::from_json(&payload)?;
//! let predictions = Predictions::new(["t1", "t2"], vec![GeoArea::new("g1")]);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

// Core modules
mod attribute;
mod error;
mod framework;
mod id;
mod mapping;
mod prediction;
mod widget;

// Re-exports
pub use attribute::{
    Attribute, AttributeData, AttributeValue, DateRangeValue, Matrix1dValue, Matrix2dColumns,
    Matrix2dValue, TimeRangeValue, WidgetHint,
};
pub use error::FrameworkError;
pub use framework::{Framework, Section};
pub use id::{ClientId, ClientIdGenerator, SequentialIds, TagId, UlidGenerator, WidgetId};
pub use mapping::{
    decode_mappings, deserialize_lenient, parse_mappings, Association, Matrix1dAssociation,
    Matrix2dAssociation, OptionAssociation, PredictionTagMapping,
};
pub use prediction::{
    AssistedTag, DraftEntryPrediction, GeoArea, PredictionState, PredictionStatus, PredictionTag,
    Predictions,
};
pub use widget::{
    EmptyProperties, KeyLabel, Matrix1dProperties, Matrix1dRow, Matrix2dColumn,
    Matrix2dProperties, Matrix2dRow, MultiChoiceProperties, NumberProperties, OrganigramNode,
    OrganigramProperties, SingleChoiceProperties, TextualProperties, Widget, WidgetKind,
    WidgetType,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
