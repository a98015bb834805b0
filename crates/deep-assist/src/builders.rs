//! Per-widget-type attribute builders
//!
//! Each `*_attribute` function turns the narrowed mappings of one widget into
//! at most one attribute. The builder structs wire those functions into the
//! [`AttributeBuilder`] dispatch used by the recommender.

use crate::strategy::{AttributeBuilder, BuildContext, BuildOutcome};
use deep_framework::{
    Attribute, AttributeData, AttributeValue, ClientIdGenerator, GeoArea, Matrix1dAssociation,
    Matrix1dValue, Matrix2dAssociation, Matrix2dColumns, Matrix2dValue, OptionAssociation, Widget,
    WidgetHint, WidgetType,
};

/// MATRIX1D attribute: row key → cell key → `true`
#[must_use]
pub fn matrix1d_attribute(
    cells: &[&Matrix1dAssociation],
    widget: &Widget,
    ids: &dyn ClientIdGenerator,
) -> Option<Attribute> {
    if cells.is_empty() {
        return None;
    }

    let mut value = Matrix1dValue::new();
    for cell in cells {
        value
            .entry(cell.row_key.clone())
            .or_default()
            .insert(cell.sub_row_key.clone(), true);
    }

    Some(Attribute::new(ids.next_id(), widget, AttributeValue::matrix1d(value)))
}

/// MATRIX2D attribute
///
/// Requires at least one column-axis and one sub-row position. Every
/// selected sub-row receives the same column selection; which column belongs
/// to which sub-row is not recorded by the mappings.
#[must_use]
pub fn matrix2d_attribute(
    positions: &[&Matrix2dAssociation],
    widget: &Widget,
    ids: &dyn ClientIdGenerator,
) -> Option<Attribute> {
    let mut columns = Matrix2dColumns::new();
    let mut sub_rows: Vec<(&str, &str)> = Vec::new();

    for position in positions {
        match position {
            Matrix2dAssociation::Column { column_key } => {
                columns.entry(column_key.clone()).or_default();
            }
            Matrix2dAssociation::SubColumn {
                column_key,
                sub_column_key,
            } => {
                columns
                    .entry(column_key.clone())
                    .or_default()
                    .push(sub_column_key.clone());
            }
            Matrix2dAssociation::SubRow {
                row_key,
                sub_row_key,
            } => sub_rows.push((row_key.as_str(), sub_row_key.as_str())),
        }
    }

    if columns.is_empty() || sub_rows.is_empty() {
        return None;
    }

    let mut value = Matrix2dValue::new();
    for (row_key, sub_row_key) in sub_rows {
        value
            .entry(row_key.to_string())
            .or_default()
            .insert(sub_row_key.to_string(), columns.clone());
    }

    Some(Attribute::new(ids.next_id(), widget, AttributeValue::matrix2d(value)))
}

/// Outcome of a SCALE or SELECT widget
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SingleChoice {
    /// Selected option, only when exactly one option matched
    pub attribute: Option<Attribute>,
    /// Every matched option key, in mapping order
    pub hints: Option<Vec<String>>,
}

/// SCALE / SELECT attribute
///
/// One match selects the option and also reports it as a hint; several
/// matches only produce hints.
#[must_use]
pub fn single_choice_attribute(
    options: &[&OptionAssociation],
    widget: &Widget,
    ids: &dyn ClientIdGenerator,
) -> SingleChoice {
    let hints: Vec<String> = options.iter().map(|o| o.option_key.clone()).collect();

    match hints.as_slice() {
        [] => SingleChoice::default(),
        [only] => {
            let data = AttributeData::new(only.clone());
            let value = if widget.widget_type() == WidgetType::Scale {
                AttributeValue::Scale(data)
            } else {
                AttributeValue::Select(data)
            };
            SingleChoice {
                attribute: Some(Attribute::new(ids.next_id(), widget, value)),
                hints: Some(hints),
            }
        }
        _ => SingleChoice {
            attribute: None,
            hints: Some(hints),
        },
    }
}

/// MULTISELECT / ORGANIGRAM attribute: matched keys in mapping order
#[must_use]
pub fn multi_choice_attribute(
    options: &[&OptionAssociation],
    widget: &Widget,
    ids: &dyn ClientIdGenerator,
) -> Option<Attribute> {
    if options.is_empty() {
        return None;
    }

    let data = AttributeData::new(options.iter().map(|o| o.option_key.clone()).collect());
    let value = if widget.widget_type() == WidgetType::Organigram {
        AttributeValue::Organigram(data)
    } else {
        AttributeValue::MultiSelect(data)
    };
    Some(Attribute::new(ids.next_id(), widget, value))
}

/// GEO attribute: ids of the first `limit` locations
#[must_use]
pub fn geo_attribute(
    locations: &[GeoArea],
    limit: usize,
    widget: &Widget,
    ids: &dyn ClientIdGenerator,
) -> Option<Attribute> {
    if locations.is_empty() {
        return None;
    }

    let area_ids = locations.iter().take(limit).map(|l| l.id.clone()).collect();
    Some(Attribute::new(ids.next_id(), widget, AttributeValue::geo(area_ids)))
}

/// MATRIX1D builder
#[derive(Debug, Clone, Copy, Default)]
pub struct Matrix1dBuilder;

impl AttributeBuilder for Matrix1dBuilder {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Matrix1d
    }

    fn build(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome {
        let cells = ctx.classifier.matrix1d(&widget.id);
        BuildOutcome::attribute(matrix1d_attribute(&cells, widget, ctx.ids))
    }

    fn name(&self) -> &'static str {
        "matrix1d"
    }
}

/// MATRIX2D builder
#[derive(Debug, Clone, Copy, Default)]
pub struct Matrix2dBuilder;

impl AttributeBuilder for Matrix2dBuilder {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Matrix2d
    }

    fn build(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome {
        let positions = ctx.classifier.matrix2d(&widget.id);
        BuildOutcome::attribute(matrix2d_attribute(&positions, widget, ctx.ids))
    }

    fn name(&self) -> &'static str {
        "matrix2d"
    }
}

/// SCALE and SELECT builder
#[derive(Debug, Clone, Copy)]
pub struct SingleChoiceBuilder {
    widget_type: WidgetType,
}

impl SingleChoiceBuilder {
    /// Builder for SCALE widgets
    #[must_use]
    pub fn scale() -> Self {
        Self {
            widget_type: WidgetType::Scale,
        }
    }

    /// Builder for SELECT widgets
    #[must_use]
    pub fn select() -> Self {
        Self {
            widget_type: WidgetType::Select,
        }
    }
}

impl AttributeBuilder for SingleChoiceBuilder {
    fn widget_type(&self) -> WidgetType {
        self.widget_type
    }

    fn build(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome {
        let options = ctx.classifier.options(&widget.id, self.widget_type);
        let choice = single_choice_attribute(&options, widget, ctx.ids);
        BuildOutcome {
            attribute: choice.attribute,
            hint: choice.hints.map(|hints| WidgetHint {
                widget_pk: widget.id.clone(),
                widget_type: self.widget_type,
                hints,
            }),
        }
    }

    fn name(&self) -> &'static str {
        match self.widget_type {
            WidgetType::Scale => "scale",
            _ => "select",
        }
    }
}

/// MULTISELECT and ORGANIGRAM builder
#[derive(Debug, Clone, Copy)]
pub struct MultiChoiceBuilder {
    widget_type: WidgetType,
}

impl MultiChoiceBuilder {
    /// Builder for MULTISELECT widgets
    #[must_use]
    pub fn multi_select() -> Self {
        Self {
            widget_type: WidgetType::MultiSelect,
        }
    }

    /// Builder for ORGANIGRAM widgets
    #[must_use]
    pub fn organigram() -> Self {
        Self {
            widget_type: WidgetType::Organigram,
        }
    }
}

impl AttributeBuilder for MultiChoiceBuilder {
    fn widget_type(&self) -> WidgetType {
        self.widget_type
    }

    fn build(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome {
        let options = ctx.classifier.options(&widget.id, self.widget_type);
        BuildOutcome::attribute(multi_choice_attribute(&options, widget, ctx.ids))
    }

    fn name(&self) -> &'static str {
        match self.widget_type {
            WidgetType::Organigram => "organigram",
            _ => "multiselect",
        }
    }
}

/// GEO builder
///
/// Fires only for allow-listed widgets when locations were predicted.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoBuilder;

impl AttributeBuilder for GeoBuilder {
    fn widget_type(&self) -> WidgetType {
        WidgetType::Geo
    }

    fn build(&self, widget: &Widget, ctx: &BuildContext<'_>) -> BuildOutcome {
        if !ctx.allows_geo(&widget.id) {
            return BuildOutcome::none();
        }
        BuildOutcome::attribute(geo_attribute(
            &ctx.predictions.locations,
            ctx.config.geo_suggestion_limit,
            widget,
            ctx.ids,
        ))
    }

    fn name(&self) -> &'static str {
        "geo"
    }
}
