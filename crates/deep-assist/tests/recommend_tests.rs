use deep_assist::{
    recommend, reconcile, AssistConfig, EntryDraft, RecommendationOutcome, Recommender,
    NO_FIT_MESSAGE, NO_RECOMMENDATIONS_MESSAGE,
};
use deep_framework::{
    Attribute, AttributeData, AttributeValue, ClientId, Framework, Predictions, SequentialIds,
    WidgetHint, WidgetId, WidgetType,
};
use deep_test_utils::{
    column_mapping, init_tracing, locations, matrix2d_widget, scenario_framework,
    scenario_predictions, select_widget, sub_row_mapping,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn without_client_ids(attributes: &[Attribute]) -> Vec<serde_json::Value> {
    attributes
        .iter()
        .map(|a| {
            let mut value = serde_json::to_value(a).unwrap();
            value.as_object_mut().unwrap().remove("clientId");
            value
        })
        .collect()
}

#[test]
fn end_to_end_scenario() {
    init_tracing();
    let framework = scenario_framework();
    let ids = SequentialIds::new("r");

    let outcome = recommend(&framework, &scenario_predictions(), &ids);
    assert_eq!(outcome.message(), None);
    let recommendation = outcome.into_recommendation().unwrap();

    assert_eq!(
        without_client_ids(&recommendation.recommendations),
        vec![
            json!({ "widget": "w1", "widgetVersion": 1, "widgetType": "SELECT",
                    "data": { "value": "a" } }),
            json!({ "widget": "w2", "widgetVersion": 1, "widgetType": "MATRIX1D",
                    "data": { "value": { "r1": { "s1": true } } } }),
            json!({ "widget": "w3", "widgetVersion": 1, "widgetType": "GEO",
                    "data": { "value": ["g1", "g2", "g3"] } }),
        ]
    );
    assert_eq!(
        recommendation.hints,
        vec![WidgetHint {
            widget_pk: WidgetId::from("w1"),
            widget_type: WidgetType::Select,
            hints: vec!["a".to_string()],
        }]
    );
    assert_eq!(recommendation.geo_areas, locations(&["g1", "g2", "g3", "g4"]));
    assert_eq!(ids.issued(), 3);
}

#[test]
fn repeated_passes_differ_only_in_client_ids() {
    let framework = scenario_framework();
    let recommender = Recommender::new(&framework);

    let first = recommender
        .recommend(&scenario_predictions(), &SequentialIds::new("first"))
        .into_recommendation()
        .unwrap();
    let second = recommender
        .recommend(&scenario_predictions(), &SequentialIds::new("second"))
        .into_recommendation()
        .unwrap();

    assert_ne!(first.recommendations, second.recommendations);
    assert_eq!(
        without_client_ids(&first.recommendations),
        without_client_ids(&second.recommendations)
    );
    assert_eq!(first.hints, second.hints);
}

#[test]
fn negative_outcomes_carry_their_messages() {
    let framework = scenario_framework();
    let ids = SequentialIds::default();

    let empty = recommend(&framework, &Predictions::default(), &ids);
    assert_eq!(empty, RecommendationOutcome::NoRecommendations);
    assert_eq!(empty.message(), Some(NO_RECOMMENDATIONS_MESSAGE));

    let unknown = recommend(&framework, &Predictions::new(["t7"], Vec::new()), &ids);
    assert_eq!(unknown.message(), Some(NO_FIT_MESSAGE));
    assert_eq!(ids.issued(), 0);
}

#[test]
fn locations_without_allow_listed_widget_do_not_fit() {
    let framework = Framework::new()
        .with_secondary(deep_test_utils::geo_widget("g"))
        .with_secondary(select_widget("s", &["a"]));
    let predictions = Predictions::new(Vec::<&str>::new(), locations(&["x"]));

    let outcome = recommend(&framework, &predictions, &SequentialIds::default());
    assert_eq!(outcome, RecommendationOutcome::NoFit);
}

#[test]
fn ambiguous_select_only_produces_hints() {
    let framework = Framework::new()
        .with_secondary(select_widget("s", &["a", "b"]))
        .with_mappings(vec![
            deep_test_utils::option_mapping("t1", "s", WidgetType::Select, "a"),
            deep_test_utils::option_mapping("t2", "s", WidgetType::Select, "b"),
        ]);

    let recommendation = recommend(
        &framework,
        &Predictions::new(["t1", "t2"], Vec::new()),
        &SequentialIds::default(),
    )
    .into_recommendation()
    .unwrap();

    assert!(recommendation.recommendations.is_empty());
    assert_eq!(recommendation.hints[0].hints, vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn matrix2d_shares_column_selection_across_sub_rows() {
    let framework = Framework::new()
        .with_secondary(matrix2d_widget(
            "m",
            &[("r1", &["s1"]), ("r2", &["s2"])],
            &[("c1", &["sc1"]), ("c2", &[])],
        ))
        .with_mappings(vec![
            column_mapping("t1", "m", "c2"),
            sub_row_mapping("t2", "m", "r1", "s1"),
            sub_row_mapping("t3", "m", "r2", "s2"),
        ]);

    let recommendation = recommend(
        &framework,
        &Predictions::new(["t1", "t2", "t3"], Vec::new()),
        &SequentialIds::default(),
    )
    .into_recommendation()
    .unwrap();

    assert_eq!(
        serde_json::to_value(&recommendation.recommendations[0].value).unwrap()["data"]["value"],
        json!({ "r1": { "s1": { "c2": [] } }, "r2": { "s2": { "c2": [] } } })
    );
}

#[test]
fn json_framework_flows_into_finalized_entry() {
    let framework = Framework::from_json(&deep_test_utils::framework_json().to_string()).unwrap();
    assert_eq!(framework.prediction_tags_mapping.len(), 3);

    let ids = SequentialIds::new("id");
    let recommender = Recommender::new(&framework);
    let recommendation = recommender
        .recommend(&scenario_predictions(), &ids)
        .into_recommendation()
        .unwrap();

    let draft = EntryDraft::excerpt("lead-1", "Floods hit the capital", &ids)
        .with_recommendation(&recommendation, recommender.config())
        .with_draft_entry("99")
        .finalize(recommender.catalog().all().iter().copied(), &ids);

    let widgets: Vec<_> = draft.attributes.iter().map(|a| a.widget.as_str()).collect();
    assert_eq!(widgets, vec!["w4", "w1", "w2", "w3"]);
    assert_eq!(draft.attributes[0].value, AttributeValue::Text(AttributeData::new("n/a".into())));
    assert_eq!(draft.attributes[1].widget_version, 2);
    assert_eq!(draft.attributes[3].value, AttributeValue::geo(vec!["g1".into()]));
    assert_eq!(draft.draft_entry.as_deref(), Some("99"));
}

#[test]
fn reconcile_preserves_default_identity() {
    let widget = select_widget("w1", &["old", "new"]);
    let mut default = Attribute::new(
        ClientId::from("d1"),
        &widget,
        AttributeValue::Select(AttributeData::new("old".into())),
    );
    default.id = Some("42".into());
    default.widget_version = 2;
    let recommended = Attribute::new(
        ClientId::from("r1"),
        &widget,
        AttributeValue::Select(AttributeData::new("new".into())),
    );

    let merged = reconcile(vec![default], vec![recommended]);
    assert_eq!(
        serde_json::to_value(&merged).unwrap(),
        json!([{
            "clientId": "d1", "id": "42", "widget": "w1", "widgetVersion": 2,
            "widgetType": "SELECT", "data": { "value": "new" }
        }])
    );
}

#[test]
fn geo_cap_is_configurable() {
    let framework = scenario_framework();
    let recommender = Recommender::with_parts(
        &framework,
        deep_assist::BuilderRegistry::with_defaults(),
        AssistConfig::from_toml_str("geo_suggestion_limit = 4\ninitial_geo_selection = 2").unwrap(),
    )
    .unwrap();

    let recommendation = recommender
        .recommend(&scenario_predictions(), &SequentialIds::default())
        .into_recommendation()
        .unwrap();
    let geo = recommendation.recommendations.last().unwrap();
    assert_eq!(geo.value.widget_type(), WidgetType::Geo);
    assert_eq!(
        geo.value,
        AttributeValue::geo(vec!["g1".into(), "g2".into(), "g3".into(), "g4".into()])
    );
}
