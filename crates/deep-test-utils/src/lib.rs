//! Testing utilities for DEEP workspace
//!
//! Shared widget, mapping and framework fixtures.

#![allow(missing_docs)]

use deep_framework::{
    Association, Framework, GeoArea, KeyLabel, Matrix1dAssociation, Matrix1dProperties,
    Matrix1dRow, Matrix2dAssociation, Matrix2dColumn, Matrix2dProperties, Matrix2dRow,
    MultiChoiceProperties, PredictionTagMapping, Predictions, Section, SingleChoiceProperties,
    Widget, WidgetKind, WidgetType,
};

pub fn options(keys: &[&str]) -> Vec<KeyLabel> {
    keys.iter()
        .map(|key| KeyLabel::new(*key, key.to_uppercase()))
        .collect()
}

pub fn select_widget(id: &str, keys: &[&str]) -> Widget {
    Widget::new(
        id,
        1,
        WidgetKind::Select(Some(SingleChoiceProperties {
            options: options(keys),
            default_value: None,
        })),
    )
}

pub fn scale_widget(id: &str, keys: &[&str]) -> Widget {
    Widget::new(
        id,
        1,
        WidgetKind::Scale(Some(SingleChoiceProperties {
            options: options(keys),
            default_value: None,
        })),
    )
}

pub fn multi_select_widget(id: &str, keys: &[&str]) -> Widget {
    Widget::new(
        id,
        1,
        WidgetKind::MultiSelect(Some(MultiChoiceProperties {
            options: options(keys),
            default_value: None,
        })),
    )
}

/// MATRIX1D widget from `(row, [cells])` pairs
pub fn matrix1d_widget(id: &str, rows: &[(&str, &[&str])]) -> Widget {
    let rows = rows
        .iter()
        .map(|(row, cells)| Matrix1dRow {
            key: (*row).to_string(),
            label: row.to_uppercase(),
            order: 0,
            color: None,
            cells: options(cells),
        })
        .collect();
    Widget::new(id, 1, WidgetKind::Matrix1d(Some(Matrix1dProperties { rows })))
}

/// MATRIX2D widget from `(row, [sub_rows])` and `(column, [sub_columns])` pairs
pub fn matrix2d_widget(id: &str, rows: &[(&str, &[&str])], columns: &[(&str, &[&str])]) -> Widget {
    let rows = rows
        .iter()
        .map(|(row, sub_rows)| Matrix2dRow {
            key: (*row).to_string(),
            label: row.to_uppercase(),
            order: 0,
            color: None,
            sub_rows: options(sub_rows),
        })
        .collect();
    let columns = columns
        .iter()
        .map(|(column, sub_columns)| Matrix2dColumn {
            key: (*column).to_string(),
            label: column.to_uppercase(),
            order: 0,
            sub_columns: options(sub_columns),
        })
        .collect();
    Widget::new(id, 1, WidgetKind::Matrix2d(Some(Matrix2dProperties { rows, columns })))
}

pub fn geo_widget(id: &str) -> Widget {
    Widget::new(id, 1, WidgetKind::Geo(None))
}

pub fn option_mapping(tag: &str, widget: &str, widget_type: WidgetType, key: &str) -> PredictionTagMapping {
    let association = Association::for_option(widget_type, key)
        .unwrap_or_else(|| panic!("{widget_type} has no options"));
    PredictionTagMapping::new(tag, widget, association)
}

pub fn cell_mapping(tag: &str, widget: &str, row: &str, sub_row: &str) -> PredictionTagMapping {
    PredictionTagMapping::new(
        tag,
        widget,
        Association::Matrix1d(Matrix1dAssociation {
            row_key: row.into(),
            sub_row_key: sub_row.into(),
        }),
    )
}

pub fn column_mapping(tag: &str, widget: &str, column: &str) -> PredictionTagMapping {
    PredictionTagMapping::new(
        tag,
        widget,
        Association::Matrix2d(Matrix2dAssociation::Column {
            column_key: column.into(),
        }),
    )
}

pub fn sub_column_mapping(tag: &str, widget: &str, column: &str, sub_column: &str) -> PredictionTagMapping {
    PredictionTagMapping::new(
        tag,
        widget,
        Association::Matrix2d(Matrix2dAssociation::SubColumn {
            column_key: column.into(),
            sub_column_key: sub_column.into(),
        }),
    )
}

pub fn sub_row_mapping(tag: &str, widget: &str, row: &str, sub_row: &str) -> PredictionTagMapping {
    PredictionTagMapping::new(
        tag,
        widget,
        Association::Matrix2d(Matrix2dAssociation::SubRow {
            row_key: row.into(),
            sub_row_key: sub_row.into(),
        }),
    )
}

pub fn locations(ids: &[&str]) -> Vec<GeoArea> {
    ids.iter().map(|id| GeoArea::new(*id)).collect()
}

/// SELECT `w1`, MATRIX1D `w2` and allow-listed GEO `w3`
pub fn scenario_framework() -> Framework {
    Framework::new()
        .with_section(Section::new(
            "Operational",
            vec![
                select_widget("w1", &["a", "b"]),
                matrix1d_widget("w2", &[("r1", &["s1", "s2"])]),
            ],
        ))
        .with_secondary(geo_widget("w3"))
        .with_mappings(vec![
            option_mapping("t1", "w1", WidgetType::Select, "a"),
            cell_mapping("t2", "w2", "r1", "s1"),
            PredictionTagMapping::geo("w3"),
        ])
}

pub fn scenario_predictions() -> Predictions {
    Predictions::new(["t1", "t2"], locations(&["g1", "g2", "g3", "g4"]))
}

/// Framework in the JSON shape served by the DEEP API
pub fn framework_json() -> serde_json::Value {
    serde_json::json!({
        "id": "1",
        "title": "Sample framework",
        "primaryTagging": [{
            "title": "Operational",
            "widgets": [
                {
                    "id": "w1", "key": "select", "title": "Sector", "version": 2,
                    "widgetId": "SELECT",
                    "properties": { "options": [
                        { "key": "a", "label": "Health", "order": 1 },
                        { "key": "b", "label": "Shelter", "order": 2 }
                    ] }
                },
                {
                    "id": "w2", "key": "matrix", "title": "Pillars", "version": 3,
                    "widgetId": "MATRIX1D",
                    "properties": { "rows": [{
                        "key": "r1", "label": "Context", "order": 1,
                        "cells": [
                            { "key": "s1", "label": "Politics", "order": 1 },
                            { "key": "s2", "label": "Economy", "order": 2 }
                        ]
                    }] }
                },
                {
                    "id": "w4", "key": "notes", "title": "Notes", "version": 1,
                    "widgetId": "TEXT",
                    "properties": { "defaultValue": "n/a" }
                }
            ]
        }],
        "secondaryTagging": [
            { "id": "w3", "key": "geo", "title": "Location", "version": 1, "widgetId": "GEO" }
        ],
        "predictionTagsMapping": [
            { "id": "1", "tag": "t1", "widget": "w1", "widgetType": "SELECT",
              "association": { "optionKey": "a" } },
            { "id": "2", "tag": "t2", "widget": "w2", "widgetType": "MATRIX1D",
              "association": { "rowKey": "r1", "subRowKey": "s1" } },
            { "id": "3", "tag": "t3", "widget": "w2", "widgetType": "MATRIX1D",
              "association": { "optionKey": "s2" } },
            { "id": "4", "widget": "w3", "widgetType": "GEO", "association": {} }
        ]
    })
}

/// Install a test subscriber honouring `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
