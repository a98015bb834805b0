//! Mapping classifier
//!
//! Narrows a mapping list to the records targeting one widget with one
//! association shape. Shape mismatches are dropped here and never reach a
//! builder.

use deep_framework::{
    Association, Matrix1dAssociation, Matrix2dAssociation, OptionAssociation,
    PredictionTagMapping, Predictions, WidgetId, WidgetType,
};
use indexmap::IndexSet;

/// Association shape a builder asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MappingShape {
    /// MATRIX1D cell (`rowKey` + `subRowKey`)
    Matrix1d,
    /// Any MATRIX2D position
    Matrix2d,
    /// MATRIX2D `COLUMN` or `SUB_COLUMN`
    Matrix2dColumn,
    /// MATRIX2D `SUB_ROW`
    Matrix2dSubRow,
    /// Option of a widget of the given type
    Option(WidgetType),
}

impl MappingShape {
    /// Whether an association has this shape
    #[must_use]
    pub fn accepts(self, association: &Association) -> bool {
        match (self, association) {
            (MappingShape::Matrix1d, Association::Matrix1d(_))
            | (MappingShape::Matrix2d, Association::Matrix2d(_)) => true,
            (MappingShape::Matrix2dColumn, Association::Matrix2d(a)) => a.is_column(),
            (MappingShape::Matrix2dSubRow, Association::Matrix2d(a)) => a.is_sub_row(),
            (MappingShape::Option(widget_type), association) => {
                association.option().is_some() && association.widget_type() == widget_type
            }
            _ => false,
        }
    }
}

/// Borrowed mapping list with per-widget narrowing
#[derive(Debug, Clone, Default)]
pub struct MappingClassifier<'a> {
    mappings: Vec<&'a PredictionTagMapping>,
}

impl<'a> MappingClassifier<'a> {
    /// Classify an arbitrary mapping list
    #[must_use]
    pub fn new(mappings: impl IntoIterator<Item = &'a PredictionTagMapping>) -> Self {
        Self {
            mappings: mappings.into_iter().collect(),
        }
    }

    /// Keep categorical mappings whose tag was predicted
    ///
    /// GEO mappings and mappings without a tag are excluded.
    #[must_use]
    pub fn matched(mappings: &'a [PredictionTagMapping], predictions: &Predictions) -> Self {
        Self::new(mappings.iter().filter(|m| {
            m.is_categorical() && m.tag.as_ref().is_some_and(|tag| predictions.has_tag(tag))
        }))
    }

    /// Number of mappings under classification
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    /// Whether there is nothing to classify
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Mappings targeting `widget` with the requested shape
    #[must_use]
    pub fn narrow(&self, widget: &WidgetId, shape: MappingShape) -> Vec<&'a PredictionTagMapping> {
        self.mappings
            .iter()
            .copied()
            .filter(|m| &m.widget == widget && shape.accepts(&m.association))
            .collect()
    }

    /// MATRIX1D cells of `widget`
    #[must_use]
    pub fn matrix1d(&self, widget: &WidgetId) -> Vec<&'a Matrix1dAssociation> {
        self.narrow(widget, MappingShape::Matrix1d)
            .into_iter()
            .filter_map(|m| match &m.association {
                Association::Matrix1d(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// MATRIX2D positions of `widget` restricted to `shape`
    fn matrix2d_with(&self, widget: &WidgetId, shape: MappingShape) -> Vec<&'a Matrix2dAssociation> {
        self.narrow(widget, shape)
            .into_iter()
            .filter_map(|m| match &m.association {
                Association::Matrix2d(a) => Some(a),
                _ => None,
            })
            .collect()
    }

    /// All MATRIX2D positions of `widget`
    #[must_use]
    pub fn matrix2d(&self, widget: &WidgetId) -> Vec<&'a Matrix2dAssociation> {
        self.matrix2d_with(widget, MappingShape::Matrix2d)
    }

    /// MATRIX2D column positions of `widget`
    #[must_use]
    pub fn matrix2d_columns(&self, widget: &WidgetId) -> Vec<&'a Matrix2dAssociation> {
        self.matrix2d_with(widget, MappingShape::Matrix2dColumn)
    }

    /// MATRIX2D sub-row positions of `widget`
    #[must_use]
    pub fn matrix2d_sub_rows(&self, widget: &WidgetId) -> Vec<&'a Matrix2dAssociation> {
        self.matrix2d_with(widget, MappingShape::Matrix2dSubRow)
    }

    /// Options of `widget`, which must be of `widget_type`
    #[must_use]
    pub fn options(&self, widget: &WidgetId, widget_type: WidgetType) -> Vec<&'a OptionAssociation> {
        self.narrow(widget, MappingShape::Option(widget_type))
            .into_iter()
            .filter_map(|m| m.association.option())
            .collect()
    }
}

/// Widgets allow-listed for GEO recommendations
#[must_use]
pub fn supported_geo_widgets(mappings: &[PredictionTagMapping]) -> IndexSet<&WidgetId> {
    mappings
        .iter()
        .filter(|m| m.widget_type() == WidgetType::Geo)
        .map(|m| &m.widget)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deep_framework::GeoArea;

    fn option(tag: &str, widget: &str, widget_type: WidgetType, key: &str) -> PredictionTagMapping {
        PredictionTagMapping::new(tag, widget, Association::for_option(widget_type, key).unwrap())
    }

    fn sub_row(tag: &str, widget: &str, row: &str, sub_row: &str) -> PredictionTagMapping {
        PredictionTagMapping::new(
            tag,
            widget,
            Association::Matrix2d(Matrix2dAssociation::SubRow {
                row_key: row.into(),
                sub_row_key: sub_row.into(),
            }),
        )
    }

    fn column(tag: &str, widget: &str, col: &str) -> PredictionTagMapping {
        PredictionTagMapping::new(
            tag,
            widget,
            Association::Matrix2d(Matrix2dAssociation::Column { column_key: col.into() }),
        )
    }

    #[test]
    fn matched_keeps_predicted_categorical_tags() {
        let mut untagged = option("x", "w1", WidgetType::Select, "b");
        untagged.tag = None;
        let mappings = vec![
            option("t1", "w1", WidgetType::Select, "a"),
            untagged,
            option("t9", "w1", WidgetType::Select, "c"),
            PredictionTagMapping::geo("w3"),
        ];
        let predictions = Predictions::new(["t1", "t2"], vec![GeoArea::new("g1")]);

        let classifier = MappingClassifier::matched(&mappings, &predictions);
        assert_eq!(classifier.len(), 1);
    }

    #[test]
    fn narrowing_filters_by_widget_and_shape() {
        let mappings = vec![
            option("t1", "w1", WidgetType::Select, "a"),
            option("t2", "w1", WidgetType::Scale, "b"),
            option("t3", "w2", WidgetType::Select, "c"),
        ];
        let classifier = MappingClassifier::new(&mappings);

        let keys: Vec<_> = classifier
            .options(&WidgetId::from("w1"), WidgetType::Select)
            .into_iter()
            .map(|a| a.option_key.as_str())
            .collect();
        assert_eq!(keys, vec!["a"]);
        assert!(classifier.matrix1d(&WidgetId::from("w1")).is_empty());
    }

    #[test]
    fn matrix2d_axes_are_separated() {
        let mappings = vec![
            column("t1", "m", "c1"),
            sub_row("t2", "m", "r1", "s1"),
            sub_row("t3", "m", "r1", "s2"),
        ];
        let classifier = MappingClassifier::new(&mappings);
        let widget = WidgetId::from("m");

        assert_eq!(classifier.matrix2d(&widget).len(), 3);
        assert_eq!(classifier.matrix2d_columns(&widget).len(), 1);
        assert_eq!(classifier.matrix2d_sub_rows(&widget).len(), 2);
    }

    #[test]
    fn option_shape_rejects_foreign_types() {
        let select = Association::for_option(WidgetType::Select, "a").unwrap();
        assert!(MappingShape::Option(WidgetType::Select).accepts(&select));
        assert!(!MappingShape::Option(WidgetType::MultiSelect).accepts(&select));
        assert!(!MappingShape::Option(WidgetType::Geo).accepts(&Association::Geo));
        assert!(!MappingShape::Matrix1d.accepts(&select));
    }

    #[test]
    fn geo_allow_list_ignores_tags() {
        let mappings = vec![
            PredictionTagMapping::geo("g1"),
            option("t1", "w1", WidgetType::Select, "a"),
            PredictionTagMapping::geo("g2"),
        ];
        let widgets: Vec<_> = supported_geo_widgets(&mappings)
            .into_iter()
            .map(WidgetId::as_str)
            .collect();
        assert_eq!(widgets, vec!["g1", "g2"]);
    }
}
