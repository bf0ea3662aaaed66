//! End-to-end scoring scenarios through the public API.

mod common;

use std::sync::Arc;

use common::fixtures::{
    COMPLIANCE_QUERY, RESPONSE_JSON, ResponseBuilder, integrity_law_citation,
};
use juris::embedding::{LexicalEmbedder, MockEmbedder};
use juris::evaluator::QualityAggregator;
use juris::model::{
    Citation, EnforcementGapClaim, EvaluationResult, Metric, ModelError, Response, WeightMap,
};
use juris::registry::{CanonicalRegistry, GapCatalog, ReferenceData, StepMarkers};
use juris::scoring::{CitationValidator, CoherenceEvaluator, GapDetectionEvaluator};

fn aggregator<E: juris::Embedder>(embedder: E) -> QualityAggregator<E> {
    QualityAggregator::new(
        embedder,
        Arc::new(ReferenceData::builtin()),
        WeightMap::default(),
    )
    .unwrap()
}

#[test]
fn test_scenario_registry_match_counts_correct() {
    let validator = CitationValidator::new(Arc::new(CanonicalRegistry::builtin()));

    let report = validator.validate(&[integrity_law_citation()]).unwrap();

    assert_eq!(report.score, 1.0);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn test_scenario_jurisdiction_mismatch_counts_incorrect() {
    let validator = CitationValidator::new(Arc::new(CanonicalRegistry::builtin()));
    let mut citation = integrity_law_citation();
    citation.jurisdiction = "BR".into();

    let report = validator.validate(&[citation]).unwrap();

    assert_eq!(report.score, 0.0);
    assert_eq!(
        report.diagnostics,
        vec!["Citation 1: Jurisdiction mismatch: BR vs AR".to_string()]
    );
}

#[test]
fn test_scenario_gap_within_tolerance_detected() {
    let evaluator = GapDetectionEvaluator::new(Arc::new(GapCatalog::builtin()));
    let predicted = EnforcementGapClaim::new(65.0, ["lack_enforcement"]);

    let report = evaluator
        .evaluate(&[predicted], "programa de compliance")
        .unwrap();

    assert_eq!(report.score, 1.0);
    assert!(report.diagnostics.is_empty());
}

#[tokio::test]
async fn test_scenario_no_usable_steps() {
    let evaluator = CoherenceEvaluator::new(MockEmbedder::new(), &StepMarkers::builtin()).unwrap();

    let report = evaluator
        .evaluate("Breve.", &[integrity_law_citation()])
        .await
        .unwrap();

    assert_eq!(report.score, 0.0);
    assert_eq!(
        report.diagnostics,
        vec!["Insufficient content for coherence evaluation".to_string()]
    );
}

#[tokio::test]
async fn test_decoded_response_scores_cleanly() {
    let response = Response::from_json(RESPONSE_JSON).unwrap();
    let aggregator = aggregator(MockEmbedder::new().with_similarity(0.9));

    let result = aggregator
        .evaluate(&response, COMPLIANCE_QUERY)
        .await
        .unwrap();

    let scores = result.scores();
    assert_eq!(scores.citation_precision, 1.0);
    assert_eq!(scores.groundedness, 1.0);
    assert_eq!(scores.jurisdiction_accuracy, 1.0);
    assert_eq!(scores.gap_detection_rate, 1.0);
    assert!((scores.nli_coherence - 0.9).abs() < 1e-6);
    assert!(result.diagnostics().is_empty());
}

#[test]
fn test_boundary_rejects_out_of_range_confidence() {
    let json = RESPONSE_JSON.replace("\"confidence\": 0.8", "\"confidence\": 1.8");

    let err = Response::from_json(&json).unwrap_err();

    assert!(matches!(err, ModelError::OutOfRange { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_lexical_scores_stay_in_unit_range() {
    let aggregator = aggregator(LexicalEmbedder::default());
    let responses = [
        ResponseBuilder::new().build(),
        ResponseBuilder::new().citations(Vec::new()).build(),
        ResponseBuilder::new().summary("").reasoning("").gap(None).build(),
        Response::from_json(RESPONSE_JSON).unwrap(),
    ];

    for response in &responses {
        let result = aggregator.evaluate(response, COMPLIANCE_QUERY).await.unwrap();
        for metric in Metric::ALL {
            let score = result.scores().get(metric);
            assert!((0.0..=1.0).contains(&score), "{metric} = {score}");
        }
        let expected = result.scores().weighted_sum(&WeightMap::default());
        assert!((result.overall_score() - expected).abs() < 1e-9);
        assert!(result.diagnostics().jurisdiction_mismatches.is_empty());
    }
}

#[tokio::test]
async fn test_missing_fields_reported_in_order() {
    let aggregator = aggregator(MockEmbedder::new().with_similarity(0.9));
    let incomplete = Citation::new("", "", "", "");
    let response = ResponseBuilder::new()
        .citations(vec![integrity_law_citation(), incomplete])
        .build();

    let result = aggregator.evaluate(&response, "").await.unwrap();

    assert_eq!(result.scores().citation_precision, 0.5);
    assert_eq!(
        result.diagnostics().citation_errors,
        vec![
            "Citation 2: Missing required field: type".to_string(),
            "Citation 2: Missing required field: title".to_string(),
            "Citation 2: Missing required field: jurisdiction".to_string(),
            "Citation 2: Missing required field: locator".to_string(),
        ]
    );
}

#[tokio::test]
async fn test_result_json_round_trip_preserves_diagnostics() {
    let aggregator = aggregator(MockEmbedder::new().with_similarity(0.2));
    let mut wrong_article = integrity_law_citation();
    wrong_article.section = Some("Art. 45".to_string());
    let response = ResponseBuilder::new()
        .summary("La ley establece que todo empleador debe registrar a sus empleados.")
        .citations(vec![wrong_article])
        .build();

    let result = aggregator.evaluate(&response, COMPLIANCE_QUERY).await.unwrap();
    assert!(!result.diagnostics().citation_errors.is_empty());
    assert!(!result.diagnostics().coherence_violations.is_empty());
    assert!(!result.diagnostics().ungrounded_statements.is_empty());

    let decoded = EvaluationResult::from_json(&result.to_json().unwrap()).unwrap();

    assert_eq!(decoded, result);
}

#[tokio::test]
async fn test_evaluation_is_repeatable() {
    let aggregator = aggregator(LexicalEmbedder::default());
    let response = ResponseBuilder::new().query_id("q-7").build();

    let first = aggregator.evaluate(&response, COMPLIANCE_QUERY).await.unwrap();
    let second = aggregator.evaluate(&response, COMPLIANCE_QUERY).await.unwrap();

    assert_eq!(first, second);
}
