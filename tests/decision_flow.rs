//! Integration tests for the question-asking loop.
//!
//! These tests drive a small pizza catalog end to end:
//! 1. Ingest the catalog from YAML
//! 2. Compute the informative questions
//! 3. Answer, filter, and ask again until one pizza remains
//!
//! The last section checks engine-wide properties with proptest.

use std::sync::Arc;

use proptest::prelude::*;
use serde_json::json;

use help_me_decide::adapters::{DuplicateItemsValidator, FixedRandomSource, SeededRandomSource};
use help_me_decide::application::{
    CatalogSource, IngestCatalogCommand, IngestCatalogHandler, ListQuestionsHandler,
    ListQuestionsQuery, NextQuestionHandler, NextQuestionQuery,
};
use help_me_decide::domain::catalog::{
    query, Answers, Catalog, FeatureKind, FeatureSummary, FeatureValue, Item, Scalar,
};
use help_me_decide::domain::foundation::ErrorCode;
use help_me_decide::domain::questions::Strategy as QuestionStrategy;

const PIZZAS: &str = include_str!("fixtures/pizzas.yaml");

// =============================================================================
// Test Infrastructure
// =============================================================================

fn pizzas() -> Catalog {
    Catalog::from_yaml_str(PIZZAS).expect("fixture parses")
}

fn ids(catalog: &Catalog) -> Vec<&str> {
    catalog.ids().map(|id| id.as_str()).collect()
}

fn answers(pairs: &[(&str, &str)]) -> Answers {
    Answers::from_query_pairs(pairs.iter().copied())
}

// =============================================================================
// Catalog Derivation
// =============================================================================

#[test]
fn fixture_features_are_classified() {
    let catalog = pizzas();
    let features = catalog.features();

    let names: Vec<_> = features.names().collect();
    assert_eq!(names, vec!["topping", "sizes", "ingredients", "evening_drink", "spicy"]);
    assert_eq!(features.get("topping").unwrap().kind(), FeatureKind::SetMembership);
    assert_eq!(features.get("sizes").unwrap().kind(), FeatureKind::SetMembership);
    assert_eq!(features.get("ingredients").unwrap().kind(), FeatureKind::NumericRange);
    assert_eq!(features.get("evening_drink").unwrap().kind(), FeatureKind::FreeValue);
    assert_eq!(features.get("spicy").unwrap().kind(), FeatureKind::Flag);
}

#[test]
fn pure_definition_round_trips() {
    let summary = pizzas().features().pure();
    let yaml = serde_yaml::to_string(&summary).unwrap();
    let parsed: FeatureSummary = serde_yaml::from_str(&yaml).unwrap();
    assert_eq!(summary, parsed);
}

// =============================================================================
// Questions
// =============================================================================

#[test]
fn full_catalog_questions() {
    let questions = serde_json::to_value(pizzas().questions()).unwrap();

    assert_eq!(questions["topping"].as_object().unwrap().len(), 10);
    assert_eq!(questions["topping"]["tomatoes"], json!(["margherita", "inferno"]));
    assert_eq!(questions["sizes"], json!({"xl": ["margherita", "inferno"]}));
    assert_eq!(
        questions["ingredients"],
        json!({"3": ["margherita"], "7": ["inferno"], "4": ["hawaii"]})
    );
    assert_eq!(
        questions["evening_drink"],
        json!({"white wine": ["margherita", "hawaii"], "water": ["inferno"]})
    );
    assert_eq!(questions["spicy"], json!({"true": ["inferno"]}));
}

#[test]
fn questions_after_basil() {
    let remaining = pizzas().filter(&answers(&[("topping", "basil")]));
    assert_eq!(ids(&remaining), vec!["margherita", "hawaii"]);

    let questions = serde_json::to_value(remaining.questions()).unwrap();
    assert_eq!(
        questions,
        json!({
            "topping": {
                "mozzarella": ["margherita"],
                "tomatoes": ["margherita"],
                "gouda": ["hawaii"],
                "ham": ["hawaii"],
                "pineapple": ["hawaii"]
            },
            "sizes": {"xl": ["margherita"]},
            "ingredients": {"3": ["margherita"], "4": ["hawaii"]}
        })
    );
}

#[test]
fn loop_narrows_to_single_pizza() {
    let rng = FixedRandomSource::new(0);
    let mut catalog = pizzas();
    let mut given = Answers::new();
    let mut asked = Vec::new();

    while let Some(question) = catalog.questions().pick("first_question", &rng).unwrap().into_single() {
        // always answer with the first option so the loop is deterministic
        let option = &question.options[0];
        given.insert(question.feature.clone(), option.value.clone());
        asked.push(question.feature.clone());
        catalog = pizzas().filter(&given);
        assert!(!catalog.is_empty());
        assert!(asked.len() <= 5, "loop did not converge: {:?}", asked);
    }

    assert_eq!(catalog.len(), 1);
    assert!(catalog.questions().is_exhausted());
}

#[test]
fn compound_and_operator_answers() {
    let catalog = pizzas();

    let not_spicy_ham = catalog.filter(&answers(&[("topping", "ham"), ("topping", "-chili")]));
    assert_eq!(ids(&not_spicy_ham), vec!["hawaii"]);

    let small = catalog.filter(&answers(&[("ingredients", "<5")]));
    assert_eq!(ids(&small), vec!["margherita", "hawaii"]);

    let mild = catalog.filter(&answers(&[("spicy", "false")]));
    assert_eq!(ids(&mild), vec!["margherita", "hawaii"]);

    let exact = catalog.filter(&answers(&[("ingredients", "4")]));
    assert_eq!(ids(&exact), vec!["hawaii"]);
}

#[test]
fn answer_order_does_not_change_survivors() {
    let catalog = pizzas();
    let forward = catalog.filter(&Answers::new().with("sizes", "xl").with("evening_drink", "water"));
    let backward = catalog.filter(&Answers::new().with("evening_drink", "water").with("sizes", "xl"));
    assert_eq!(ids(&forward), ids(&backward));
    assert_eq!(ids(&forward), vec!["inferno"]);
}

#[test]
fn empty_answers_share_the_catalog() {
    let catalog = pizzas();
    assert!(catalog.filter(&Answers::new()).ptr_eq(&catalog));
}

// =============================================================================
// Handlers
// =============================================================================

#[test]
fn handlers_cover_a_session() {
    let ingested = IngestCatalogHandler::new(vec![Arc::new(DuplicateItemsValidator::new())], 100)
        .handle(IngestCatalogCommand {
            source: CatalogSource::Yaml(PIZZAS.to_string()),
        })
        .unwrap();
    assert_eq!(ingested.catalog.len(), 3);

    let listed = ListQuestionsHandler::new()
        .handle(ListQuestionsQuery {
            catalog: ingested.catalog.clone(),
            answers: answers(&[("topping", "basil")]),
        })
        .unwrap();
    assert_eq!(listed.questions.len(), 3);

    let next = NextQuestionHandler::new(Arc::new(FixedRandomSource::new(1)), QuestionStrategy::FirstQuestion)
        .handle(NextQuestionQuery {
            catalog: ingested.catalog,
            answers: answers(&[("topping", "basil")]),
            strategy: Some("random_question".to_string()),
        })
        .unwrap();
    assert_eq!(next.question.first().unwrap().feature, "sizes");
}

#[test]
fn seeded_sessions_repeat() {
    let pick = |seed| {
        let handler =
            NextQuestionHandler::new(Arc::new(SeededRandomSource::new(seed)), QuestionStrategy::RandomQuestion);
        (0..5)
            .map(|_| {
                handler
                    .handle(NextQuestionQuery {
                        catalog: pizzas(),
                        answers: Answers::new(),
                        strategy: None,
                    })
                    .unwrap()
                    .question
                    .into_single()
                    .unwrap()
                    .feature
            })
            .collect::<Vec<_>>()
    };
    assert_eq!(pick(11), pick(11));
}

#[test]
fn unknown_strategy_fails_even_without_questions() {
    let err = NextQuestionHandler::new(Arc::new(FixedRandomSource::new(0)), QuestionStrategy::FirstQuestion)
        .handle(NextQuestionQuery {
            catalog: pizzas(),
            answers: answers(&[("spicy", "true")]),
            strategy: Some("coin_flip".to_string()),
        })
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::UnknownStrategy);
}

// =============================================================================
// Properties
// =============================================================================

const FEATURES: [&str; 3] = ["color", "size", "tags"];

fn feature_value() -> impl Strategy<Value = FeatureValue> {
    prop_oneof![
        "[a-c]".prop_map(FeatureValue::from),
        (0i64..4).prop_map(FeatureValue::from),
        any::<bool>().prop_map(FeatureValue::from),
        prop::collection::vec("[a-c]", 0..3).prop_map(FeatureValue::set),
    ]
}

fn catalog_items() -> impl Strategy<Value = Vec<Item>> {
    prop::collection::vec(
        prop::collection::vec((0usize..FEATURES.len(), feature_value()), 1..4),
        0..7,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, features)| {
                Item::new(
                    format!("item-{}", i),
                    features.into_iter().map(|(f, v)| (FEATURES[f], v)),
                )
                .unwrap()
            })
            .collect()
    })
}

fn answer_token() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-c]",
        "-[a-c]",
        "[<>!][0-4]",
        "[0-4]",
        Just("true".to_string()),
        Just("false".to_string()),
    ]
}

fn answer_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(
        (prop_oneof![Just("color"), Just("size"), Just("tags"), Just("unknown")], answer_token())
            .prop_map(|(f, v)| (f.to_string(), v)),
        0..4,
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn filtering_never_adds_items(items in catalog_items(), pairs in answer_pairs()) {
        let catalog = Catalog::derive(items).unwrap();
        let filtered = catalog.filter(&Answers::from_query_pairs(pairs));
        prop_assert!(filtered.len() <= catalog.len());
        for id in filtered.ids() {
            prop_assert!(catalog.contains(id.as_str()));
        }
    }

    #[test]
    fn options_split_the_catalog(items in catalog_items()) {
        let catalog = Catalog::derive(items).unwrap();
        let questions = catalog.questions();
        if catalog.len() <= 1 {
            prop_assert!(questions.is_exhausted());
        }
        for question in questions.iter() {
            prop_assert!(!question.options.is_empty());
            for option in &question.options {
                prop_assert!(!option.item_ids.is_empty());
                prop_assert!(option.item_ids.len() < catalog.len());
            }
        }
    }

    #[test]
    fn derived_domains_have_no_reserved_prefixes(
        values in prop::collection::vec("[<>!-]?[a-c]{1,2}", 1..6)
    ) {
        let items: Vec<Item> = values
            .iter()
            .enumerate()
            .map(|(i, v)| Item::new(format!("item-{}", i), [("tags", FeatureValue::set([v.as_str()]))]).unwrap())
            .collect();

        if let Ok(catalog) = Catalog::derive(items) {
            for spec in catalog.features().iter() {
                for value in spec.domain() {
                    if let Scalar::Text(text) = value {
                        prop_assert!(query::reserved_prefix(text).is_none());
                    }
                }
            }
        } else {
            prop_assert!(values.iter().any(|v| query::reserved_prefix(v).is_some()));
        }
    }

    #[test]
    fn duplicates_are_symmetric(items in catalog_items()) {
        let catalog = Catalog::derive(items).unwrap();
        let duplicates = catalog.find_duplicates();
        for id in &duplicates {
            let item = catalog.get(id.as_str()).unwrap();
            let twin = duplicates
                .iter()
                .filter(|other| *other != id)
                .any(|other| catalog.get(other.as_str()).unwrap().features == item.features);
            prop_assert!(twin);
        }
    }
}
