//! End-to-end scoring tests against mocked upstream services.

use artifact_rank::facts::Resolver;
use artifact_rank::metrics::{MetricKind, MetricValue};
use artifact_rank::reports::generate;
use artifact_rank::scoring::{ScoreTarget, Scorer};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn scorer_for(server: &MockServer) -> Scorer {
    Scorer::new(Resolver::with_bases(None, server.uri(), server.uri(), server.uri()).unwrap(), None)
}

async fn mount_model(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/models/google/bert-base-uncased"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "google/bert-base-uncased",
            "description": "Pretrained BERT model. Quick start: pip install transformers and run the usage example.",
            "tags": ["transformers", "bert", "license:apache-2.0", "arxiv:1810.04805"],
            "downloads": 2_000_000,
            "likes": 1_500,
            "usedStorage": 440_401_920u64,
            "cardData": {"github": "https://github.com/google-research/bert"},
            "siblings": [{"rfilename": "README.md", "size": 4096}],
            "widgetData": [{"text": "Paris is the [MASK] of France."}],
            "transformersInfo": {"auto_model": "AutoModelForMaskedLM"}
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/google-research/bert/commits"))
        .and(query_param("per_page", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"author": {"login": "alice"}},
            {"author": {"login": "bob"}},
            {"author": {"login": "alice"}}
        ])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/repos/google-research/bert/git/trees/HEAD"))
        .and(query_param("recursive", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tree": [
                {"path": "README.md", "type": "blob"},
                {"path": "requirements.txt", "type": "blob"},
                {"path": "run_classifier.py", "type": "blob"},
                {"path": "modeling.py", "type": "blob"},
                {"path": "tests/test_modeling.py", "type": "blob"}
            ]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn scores_well_populated_model() {
    let server = MockServer::start().await;
    mount_model(&server).await;

    let scorer = scorer_for(&server);
    let target = ScoreTarget::from_url("https://huggingface.co/google/bert-base-uncased");
    let scored = scorer.score(&target).await;

    assert_eq!(scored.name, "bert-base-uncased");
    assert_eq!(scored.category.label(), "MODEL");
    assert!((0.0..=1.0).contains(&scored.net_score));
    assert!(scored.net_score > 0.5, "net_score was {}", scored.net_score);

    let by_kind = |kind: MetricKind| {
        scored
            .metrics
            .iter()
            .find(|m| m.kind == kind)
            .map(|m| m.value.clone())
            .unwrap()
    };

    // two unique authors out of fifty
    assert_eq!(by_kind(MetricKind::BusFactor), MetricValue::Scalar(0.04));
    assert_eq!(by_kind(MetricKind::License), MetricValue::Scalar(1.0));

    if let MetricValue::Scalar(quality) = by_kind(MetricKind::CodeQuality) {
        assert!(quality > 0.4, "code_quality was {quality}");
    } else {
        panic!("code_quality should be scalar");
    }

    if let MetricValue::PerDevice(map) = by_kind(MetricKind::Size) {
        // 420 MB: too big for the small boards, fine for the big targets
        assert!(map.mean() > 0.0 && map.mean() < 1.0);
    } else {
        panic!("size_score should be a device map");
    }

    let latency_sum: u64 = scored.metrics.iter().map(|m| m.latency_ms).sum();
    assert_eq!(scored.net_score_latency, latency_sum);
}

#[tokio::test]
async fn every_metric_is_bounded() {
    let server = MockServer::start().await;
    mount_model(&server).await;

    let scorer = scorer_for(&server);
    let scored = scorer
        .score(&ScoreTarget::from_url("https://huggingface.co/google/bert-base-uncased"))
        .await;

    for metric in &scored.metrics {
        match &metric.value {
            MetricValue::Scalar(v) => assert!((0.0..=1.0).contains(v), "{}: {v}", metric.kind),
            MetricValue::PerDevice(map) => {
                for (device, v) in map.iter() {
                    assert!((0.0..=1.0).contains(&v), "{device}: {v}");
                }
            }
        }
    }
}

#[tokio::test]
async fn degraded_model_holds_its_floors() {
    // No mocks at all: every upstream call fails
    let server = MockServer::start().await;

    let scorer = scorer_for(&server);
    let scored = scorer
        .score(&ScoreTarget::from_url("https://huggingface.co/google/bert-base-uncased"))
        .await;

    let by_kind = |kind: MetricKind| {
        scored
            .metrics
            .iter()
            .find(|m| m.kind == kind)
            .map(|m| m.value.clone())
            .unwrap()
    };

    assert_eq!(by_kind(MetricKind::License), MetricValue::Scalar(0.2));
    assert_eq!(by_kind(MetricKind::PerformanceClaims), MetricValue::Scalar(0.1));
    assert_eq!(by_kind(MetricKind::BusFactor), MetricValue::Scalar(0.0));

    if let MetricValue::PerDevice(map) = by_kind(MetricKind::Size) {
        assert_eq!(map.mean(), 0.0);
    } else {
        panic!("size_score should be a device map");
    }

    assert!((0.0..=1.0).contains(&scored.net_score));
}

#[tokio::test]
async fn companion_dataset_link_counts_toward_reproducibility() {
    let server = MockServer::start().await;
    mount_model(&server).await;

    let scorer = scorer_for(&server);
    let url = "https://huggingface.co/google/bert-base-uncased";

    let without = scorer.score(&ScoreTarget::from_url(url)).await;
    let with = scorer
        .score(&ScoreTarget {
            url: url.to_string(),
            dataset_url: Some("https://huggingface.co/datasets/bookcorpus".to_string()),
            code_url: None,
        })
        .await;

    let dataset_and_code = |scored: &artifact_rank::scoring::ScoreRecord| {
        scored
            .metrics
            .iter()
            .find(|m| m.kind == MetricKind::DatasetAndCode)
            .map(|m| m.value.contribution())
            .unwrap()
    };

    assert!(dataset_and_code(&with) > dataset_and_code(&without));
}

#[tokio::test]
async fn report_contains_every_key() {
    let server = MockServer::start().await;
    mount_model(&server).await;

    let scorer = scorer_for(&server);
    let scored = scorer
        .score(&ScoreTarget::from_url("https://huggingface.co/google/bert-base-uncased"))
        .await;

    let mut output = String::new();
    generate(&scored, false, &mut output).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(parsed["name"], "bert-base-uncased");
    assert_eq!(parsed["category"], "MODEL");
    for kind in MetricKind::ALL {
        assert!(!parsed[kind.key()].is_null(), "{}", kind.key());
        assert!(parsed[&format!("{}_latency", kind.key())].is_number(), "{}_latency", kind.key());
    }
}
