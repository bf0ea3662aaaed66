use super::*;
use crate::embedding::MockEmbedder;
use crate::model::{Answer, Citation, Diagnostics, MetricScores};
use crate::registry::{CanonicalRegistry, GapCatalog, ReferenceData, StepMarkers};
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

fn result_with_overall(overall: f64) -> EvaluationResult {
    EvaluationResult::new(
        MetricScores {
            citation_precision: overall,
            nli_coherence: overall,
            groundedness: overall,
            overall_score: overall,
            ..Default::default()
        },
        Diagnostics::default(),
    )
}

fn cited_response(reasoning: &str) -> Response {
    let citation = Citation::new("ley", "Ley 27.401", "AR", "AR_L27401")
        .with_section("Art. 9")
        .with_snippet("Las personas jurídicas deberán adoptar un Programa de Integridad");
    Response::new(
        Answer::new(
            "La ley establece que las personas jurídicas deberán adoptar un programa.",
            reasoning,
        ),
        vec![citation],
    )
}

fn runner(embedder: MockEmbedder, concurrency: usize) -> BatchRunner<MockEmbedder> {
    BatchRunner::new(
        Arc::new(ReferenceStore::default()),
        Arc::new(embedder),
        WeightMap::default(),
        concurrency,
    )
}

#[test]
fn test_distribution_bands() {
    let mut distribution = QualityDistribution::default();
    for score in [0.95, 0.8, 0.79, 0.6, 0.59, 0.0] {
        distribution.record(score);
    }

    assert_eq!(
        distribution,
        QualityDistribution {
            high_quality: 2,
            medium_quality: 2,
            low_quality: 2,
        }
    );
    assert_eq!(distribution.total(), 6);
}

#[test]
fn test_summary_statistics() {
    let report = AggregateReport::from_results(
        3,
        vec![result_with_overall(0.2), result_with_overall(0.4), result_with_overall(0.9)],
        Vec::new(),
    );

    let summary = &report.summary;
    assert_eq!(summary.total_responses, 3);
    assert_eq!(summary.evaluated, 3);
    assert!((summary.mean_overall_score - 0.5).abs() < 1e-12);
    // population variance: (0.09 + 0.01 + 0.16) / 3
    assert!((summary.std_overall_score - (0.26f64 / 3.0).sqrt()).abs() < 1e-12);
    assert!((summary.mean_citation_precision - 0.5).abs() < 1e-12);
    assert!((summary.mean_coherence - 0.5).abs() < 1e-12);
    assert!((summary.mean_groundedness - 0.5).abs() < 1e-12);
    assert_eq!(report.distribution.high_quality, 1);
    assert_eq!(report.distribution.low_quality, 2);
}

#[test]
fn test_empty_report() {
    let report = AggregateReport::from_results(0, Vec::new(), Vec::new());

    assert_eq!(report.summary, BatchSummary::default());
    assert_eq!(report.distribution.total(), 0);
}

#[test]
fn test_report_serializes_expected_sections() {
    let report = AggregateReport::from_results(1, vec![result_with_overall(0.7)], Vec::new());
    let json: serde_json::Value = serde_json::from_str(&report.to_json_pretty().unwrap()).unwrap();

    assert_eq!(json["summary"]["total_responses"], 1);
    assert_eq!(json["distribution"]["medium_quality"], 1);
    assert_eq!(json["detailed_results"][0]["scores"]["overall_score"], 0.7);
    assert!(json["failures"].as_array().unwrap().is_empty());
    assert!(json["generated_at"].is_string());
}

#[tokio::test]
async fn test_run_pairs_queries_by_position() {
    let runner = runner(MockEmbedder::new().with_similarity(0.9), 2);
    let responses = vec![cited_response("a"), cited_response("b")];
    let queries = vec!["programa de integridad".to_string()];

    let report = runner.run(&responses, &queries).await.unwrap();

    assert_eq!(report.summary.total_responses, 2);
    assert_eq!(report.detailed_results.len(), 2);
    assert_eq!(report.detailed_results[0].scores().gap_detection_rate, 0.0);
    assert_eq!(report.detailed_results[1].scores().gap_detection_rate, 1.0);
}

#[tokio::test]
async fn test_capability_failures_become_item_records() {
    let failing_step = "el programa de integridad no fue implementado en término";
    let runner = runner(MockEmbedder::new().failing_on(failing_step), 4);

    let ok = cited_response("El programa de integridad debe incluir capacitación periódica.");
    let bad = cited_response(failing_step);

    let report = runner
        .run(&[ok.clone(), bad, ok], &[])
        .await
        .unwrap();

    assert_eq!(report.summary.total_responses, 3);
    assert_eq!(report.summary.evaluated, 2);
    assert_eq!(report.summary.failed, 1);
    assert_eq!(report.failures[0].index, 1);
    assert!(report.failures[0].error.contains("embedding"));
    assert_eq!(report.distribution.total(), 2);
}

#[tokio::test]
async fn test_concurrency_is_bounded() {
    let embedder = MockEmbedder::new().with_delay(Duration::from_millis(10));
    let runner = runner(embedder, 2);
    let responses: Vec<Response> = (0..6)
        .map(|i| cited_response(&format!("El empleador número {i} debe registrar a su personal.")))
        .collect();

    let report = runner.run(&responses, &[]).await.unwrap();

    assert_eq!(report.summary.evaluated, 6);
    // Each evaluation embeds its steps and its citations concurrently.
    assert!(runner.embedder.max_in_flight() <= 2 * 2);
}

#[tokio::test]
async fn test_run_uses_snapshot_taken_at_start() {
    let store = Arc::new(ReferenceStore::default());
    let runner = BatchRunner::new(
        Arc::clone(&store),
        Arc::new(MockEmbedder::new()),
        WeightMap::default(),
        1,
    );

    let before = runner.run(&[cited_response("x")], &[]).await.unwrap();
    assert_eq!(before.detailed_results[0].scores().citation_precision, 1.0);

    let mut sources = std::collections::HashMap::new();
    sources.insert(
        "AR_L27401".to_string(),
        crate::registry::CanonicalSource {
            title: "Ley 27.401".to_string(),
            articles: crate::registry::ArticleRange::new(1, 5),
            jurisdiction: "AR".into(),
            year: 2017,
        },
    );
    store.replace(ReferenceData::new(
        CanonicalRegistry::new(sources).unwrap(),
        GapCatalog::builtin(),
        StepMarkers::builtin(),
    ));

    let after = runner.run(&[cited_response("x")], &[]).await.unwrap();
    assert_eq!(after.detailed_results[0].scores().citation_precision, 0.0);
}

#[test]
fn test_parse_batch_items() {
    let json = r#"[
        {"response": {"answer": {"summary": "s", "reasoning": "r"}, "citations": []},
         "query": "trabajo"},
        {"response": {"answer": {"summary": "s", "reasoning": "r"}}}
    ]"#;

    let items = BatchItem::parse_all(json, Path::new("batch.json")).unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].query, "trabajo");
    assert_eq!(items[1].query, "");
}

#[test]
fn test_parse_batch_rejects_invalid_item() {
    let json = r#"[{"response": {"answer": {"confidence": 1.5}}}]"#;

    assert!(matches!(
        BatchItem::parse_all(json, Path::new("batch.json")),
        Err(BatchError::InvalidItem { index: 0, .. })
    ));
}

#[test]
fn test_load_batch_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(br#"[{"response": {}, "query": "q"}]"#).unwrap();

    let items = BatchItem::load_all(file.path()).unwrap();
    assert_eq!(items[0].query, "q");

    assert!(matches!(
        BatchItem::load_all(&PathBuf::from("/nonexistent/batch.json")),
        Err(BatchError::Io { .. })
    ));
}

#[tokio::test]
async fn test_run_items_matches_run() {
    let runner = runner(MockEmbedder::new(), 3);
    let items = vec![
        BatchItem::new(cited_response("uno"), "compliance"),
        BatchItem::new(cited_response("dos"), ""),
    ];
    let responses: Vec<Response> = items.iter().map(|i| i.response.clone()).collect();
    let queries: Vec<String> = items.iter().map(|i| i.query.clone()).collect();

    let a = runner.run_items(&items).await.unwrap();
    let b = runner.run(&responses, &queries).await.unwrap();

    assert_eq!(a.detailed_results, b.detailed_results);
    assert_eq!(a.summary, b.summary);
}
