//! Default attributes of a new entry
//!
//! TEXT, NUMBER, DATE, TIME and SCALE widgets may carry a `defaultValue`.
//! Every such widget seeds a fresh entry with one attribute. Empty strings
//! and a numeric `0` count as no default. Default
//! attributes are stamped with the static version of their widget type
//! rather than the widget's own version.

use deep_framework::{
    Attribute, AttributeData, AttributeValue, ClientIdGenerator, Widget, WidgetKind,
};

/// Default value of one widget, if it has one
#[must_use]
pub fn default_value(widget: &Widget) -> Option<AttributeValue> {
    fn text(value: Option<&String>) -> Option<AttributeData<String>> {
        value
            .filter(|v| !v.is_empty())
            .map(|v| AttributeData::new(v.clone()))
    }

    match &widget.kind {
        WidgetKind::Text(Some(p)) => text(p.default_value.as_ref()).map(AttributeValue::Text),
        WidgetKind::Date(Some(p)) => text(p.default_value.as_ref()).map(AttributeValue::Date),
        WidgetKind::Time(Some(p)) => text(p.default_value.as_ref()).map(AttributeValue::Time),
        WidgetKind::Scale(Some(p)) => text(p.default_value.as_ref()).map(AttributeValue::Scale),
        WidgetKind::Number(Some(p)) => p
            .default_value
            .filter(|v| v.is_finite() && v.abs() > 0.0)
            .map(|v| AttributeValue::Number(AttributeData::new(v))),
        _ => None,
    }
}

/// Default attributes for widgets in catalog order
#[must_use]
pub fn default_attributes<'a>(
    widgets: impl IntoIterator<Item = &'a Widget>,
    ids: &dyn ClientIdGenerator,
) -> Vec<Attribute> {
    widgets
        .into_iter()
        .filter_map(|widget| {
            let value = default_value(widget)?;
            let mut attribute = Attribute::new(ids.next_id(), widget, value);
            attribute.widget_version = widget.widget_type().current_version();
            Some(attribute)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use deep_framework::{
        NumberProperties, SequentialIds, SingleChoiceProperties, TextualProperties, WidgetType,
    };
    use pretty_assertions::assert_eq;

    fn textual(value: Option<&str>) -> Option<TextualProperties> {
        Some(TextualProperties {
            default_value: value.map(str::to_string),
        })
    }

    #[test]
    fn only_defaulted_scalar_widgets_produce_attributes() {
        let widgets = vec![
            Widget::new("text", 5, WidgetKind::Text(textual(Some("hello")))),
            Widget::new("empty-text", 1, WidgetKind::Text(textual(Some("")))),
            Widget::new("date", 1, WidgetKind::Date(textual(Some("2021-01-01")))),
            Widget::new("select", 1, WidgetKind::Select(Some(SingleChoiceProperties {
                options: Vec::new(),
                default_value: Some("a".into()),
            }))),
            Widget::new("scale", 1, WidgetKind::Scale(Some(SingleChoiceProperties {
                options: Vec::new(),
                default_value: Some("high".into()),
            }))),
            Widget::new("number", 1, WidgetKind::Number(Some(NumberProperties {
                default_value: Some(12.5),
                ..NumberProperties::default()
            }))),
            Widget::new("zero", 1, WidgetKind::Number(Some(NumberProperties {
                default_value: Some(0.0),
                ..NumberProperties::default()
            }))),
            Widget::new("time", 1, WidgetKind::Time(None)),
        ];

        let ids = SequentialIds::default();
        let attributes = default_attributes(&widgets, &ids);
        let summary: Vec<_> = attributes
            .iter()
            .map(|a| (a.widget.as_str(), a.widget_type()))
            .collect();

        assert_eq!(
            summary,
            vec![
                ("text", WidgetType::Text),
                ("date", WidgetType::Date),
                ("scale", WidgetType::Scale),
                ("number", WidgetType::Number),
            ]
        );
        assert_eq!(ids.issued(), 4);
    }

    #[test]
    fn zero_and_non_finite_numbers_are_not_defaults() {
        for value in [0.0, -0.0, f64::NAN, f64::INFINITY] {
            let widget = Widget::new("number", 1, WidgetKind::Number(Some(NumberProperties {
                default_value: Some(value),
                ..NumberProperties::default()
            })));
            assert_eq!(default_value(&widget), None);
        }
    }

    #[test]
    fn defaults_use_static_type_version() {
        let widget = Widget::new("text", 9, WidgetKind::Text(textual(Some("x"))));
        let attributes = default_attributes([&widget], &SequentialIds::default());
        assert_eq!(attributes[0].widget_version, WidgetType::Text.current_version());
    }
}
