//! Possible mappings, auto-matching and coverage
//!
//! Every position a prediction tag can be mapped onto is a
//! [`PossibleMapping`]. Auto-matching pairs positions with prediction tags
//! by label similarity; coverage reports how many positions a mapping list
//! reaches.

use crate::catalog::WidgetCatalog;
use deep_framework::{
    AssistedTag, Association, ClientIdGenerator, KeyLabel, Matrix1dAssociation,
    Matrix2dAssociation, OptionAssociation, OrganigramNode, PredictionTagMapping, Widget,
    WidgetId, WidgetKind,
};
use std::collections::HashSet;

/// Position of a widget that a prediction tag can be mapped onto
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PossibleMapping {
    /// Label matched against prediction tag names
    pub label: String,
    /// Target widget
    pub widget: WidgetId,
    /// Position within the widget
    pub association: Association,
}

impl PossibleMapping {
    fn new(label: impl Into<String>, widget: &Widget, association: Association) -> Self {
        Self {
            label: label.into(),
            widget: widget.id.clone(),
            association,
        }
    }
}

/// Positions of one widget in display order
///
/// MATRIX2D positions are listed columns first, then sub-columns, then
/// sub-rows. ORGANIGRAM nodes are listed in pre-order with labels joined by
/// `/` from the root.
#[must_use]
pub fn possible_mappings(widget: &Widget) -> Vec<PossibleMapping> {
    match &widget.kind {
        WidgetKind::Matrix1d(Some(props)) => props
            .rows
            .iter()
            .flat_map(|row| {
                row.cells.iter().map(move |cell| {
                    PossibleMapping::new(
                        cell.label.clone(),
                        widget,
                        Association::Matrix1d(Matrix1dAssociation {
                            row_key: row.key.clone(),
                            sub_row_key: cell.key.clone(),
                        }),
                    )
                })
            })
            .collect(),
        WidgetKind::Matrix2d(Some(props)) => {
            let columns = props.columns.iter().map(|column| {
                PossibleMapping::new(
                    column.label.clone(),
                    widget,
                    Association::Matrix2d(Matrix2dAssociation::Column {
                        column_key: column.key.clone(),
                    }),
                )
            });
            let sub_columns = props.columns.iter().flat_map(|column| {
                column.sub_columns.iter().map(move |sub_column| {
                    PossibleMapping::new(
                        sub_column.label.clone(),
                        widget,
                        Association::Matrix2d(Matrix2dAssociation::SubColumn {
                            column_key: column.key.clone(),
                            sub_column_key: sub_column.key.clone(),
                        }),
                    )
                })
            });
            let sub_rows = props.rows.iter().flat_map(|row| {
                row.sub_rows.iter().map(move |sub_row| {
                    PossibleMapping::new(
                        sub_row.label.clone(),
                        widget,
                        Association::Matrix2d(Matrix2dAssociation::SubRow {
                            row_key: row.key.clone(),
                            sub_row_key: sub_row.key.clone(),
                        }),
                    )
                })
            });
            columns.chain(sub_columns).chain(sub_rows).collect()
        }
        WidgetKind::Scale(Some(props)) | WidgetKind::Select(Some(props)) => {
            option_mappings(&props.options, widget)
        }
        WidgetKind::MultiSelect(Some(props)) => option_mappings(&props.options, widget),
        WidgetKind::Organigram(Some(props)) => {
            let mut out = Vec::new();
            if let Some(root) = &props.options {
                walk_organigram(root, None, widget, &mut out);
            }
            out
        }
        _ => Vec::new(),
    }
}

fn option_mappings(options: &[KeyLabel], widget: &Widget) -> Vec<PossibleMapping> {
    options
        .iter()
        .filter_map(|option| {
            let association = Association::for_option(widget.widget_type(), option.key.clone())?;
            Some(PossibleMapping::new(option.label.clone(), widget, association))
        })
        .collect()
}

fn walk_organigram(
    node: &OrganigramNode,
    parent_label: Option<&str>,
    widget: &Widget,
    out: &mut Vec<PossibleMapping>,
) {
    let label = match parent_label {
        Some(parent) => format!("{parent}/{}", node.label),
        None => node.label.clone(),
    };
    out.push(PossibleMapping::new(
        label.clone(),
        widget,
        Association::Organigram(OptionAssociation::new(node.key.clone())),
    ));
    for child in &node.children {
        walk_organigram(child, Some(&label), widget, out);
    }
}

/// Positions of every mappable widget of a catalog, in catalog order
#[must_use]
pub fn possible_mappings_for(catalog: &WidgetCatalog<'_>) -> Vec<PossibleMapping> {
    catalog
        .filtered()
        .iter()
        .flat_map(|widget| possible_mappings(widget))
        .collect()
}

/// Case-insensitive Sørensen–Dice similarity of two labels
#[must_use]
pub fn label_similarity(a: &str, b: &str) -> f64 {
    strsim::sorensen_dice(&a.to_lowercase(), &b.to_lowercase())
}

/// Map positions onto prediction tags with similar names
///
/// A mapping is emitted for every (position, tag) pair whose similarity
/// exceeds `threshold`. Positions keep their order; tags matching the same
/// position come out latest first. Category tags and tags hidden from
/// framework mapping never match.
#[must_use]
pub fn auto_match(
    possible: &[PossibleMapping],
    tags: &[AssistedTag],
    threshold: f64,
    ids: &dyn ClientIdGenerator,
) -> Vec<PredictionTagMapping> {
    let candidates: Vec<&AssistedTag> = tags.iter().filter(|t| t.is_mappable()).collect();

    let mappings: Vec<PredictionTagMapping> = possible
        .iter()
        .flat_map(|position| {
            let mut matched: Vec<PredictionTagMapping> = candidates
                .iter()
                .filter(|tag| label_similarity(&position.label, &tag.name) > threshold)
                .map(|tag| {
                    let mut mapping = PredictionTagMapping::new(
                        tag.id.clone(),
                        position.widget.clone(),
                        position.association.clone(),
                    );
                    mapping.client_id = Some(ids.next_id());
                    mapping
                })
                .collect();
            matched.reverse();
            matched
        })
        .collect();

    tracing::info!(
        "Auto-matched {} mappings over {} positions and {} tags",
        mappings.len(),
        possible.len(),
        candidates.len()
    );
    mappings
}

/// Position of an association regardless of the widget type it targets
#[derive(PartialEq, Eq, Hash)]
enum Position<'a> {
    Cell(&'a Matrix1dAssociation),
    Axis(&'a Matrix2dAssociation),
    Choice(&'a OptionAssociation),
}

impl<'a> Position<'a> {
    fn of(association: &'a Association) -> Option<Self> {
        match association {
            Association::Matrix1d(cell) => Some(Self::Cell(cell)),
            Association::Matrix2d(axis) => Some(Self::Axis(axis)),
            Association::Geo => None,
            option => option.option().map(Self::Choice),
        }
    }
}

/// Share of possible positions reached by categorical mappings
///
/// Percentage rounded to two decimals. Positions are counted by their keys
/// only, so the same keys on different widgets, or under different option
/// widget types, count once.
#[must_use]
pub fn mapping_coverage(mappings: &[PredictionTagMapping], possible_count: usize) -> f64 {
    if possible_count == 0 {
        return 0.0;
    }

    let unique: HashSet<Position<'_>> = mappings
        .iter()
        .filter_map(|m| Position::of(&m.association))
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let ratio = unique.len() as f64 / possible_count as f64;
    (ratio * 10_000.0).round() / 100.0
}
