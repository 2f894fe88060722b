// Integration tests for attrx
use attrx::{
    hydrate, AttributeNormalizer, CandidateIndex, CandidateRecord, ConfidenceTier, EmbeddedItem,
    Error, FuzzyMatcher, InMemoryEmbeddings, JsonFileSource, MatchConfig, MatchType, RankParams,
    RawAttributes, SimilarityRanker, StaticSource,
};
use attrx_core::ManualClock;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

fn nike_index() -> CandidateIndex {
    let source = StaticSource::new(vec![
        CandidateRecord::new("nike", "Nike").with_aliases(["Just Do It"]),
    ]);
    CandidateIndex::new("brands", Arc::new(source), &MatchConfig::default())
}

fn brands_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"[
            {{"id": "nike", "name": "Nike", "aliases": ["Just Do It"], "popularity": 120}},
            {{"id": "ralph-lauren", "name": "Ralph Lauren", "aliases": ["Polo Ralph Lauren"], "popularity": 80}},
            {{"id": "levis", "name": "Levi's", "aliases": ["Levi Strauss"], "popularity": 95}},
            {{"id": "zara", "name": "Zara", "popularity": 150}}
        ]"#
    )
    .unwrap();
    file
}

#[test]
fn test_exact_match() {
    let index = nike_index();
    let snapshot = index.get().unwrap();
    let result = FuzzyMatcher::default().match_query("nike", &snapshot);

    assert_eq!(result.candidate_id.as_deref(), Some("nike"));
    assert_eq!(result.confidence, 1.0);
    assert_eq!(result.match_type, MatchType::Exact);
    assert!(!result.needs_confirmation);

    // aliases match exactly too
    let result = FuzzyMatcher::default().match_query("just do it", &snapshot);
    assert_eq!(result.match_type, MatchType::Exact);
}

#[test]
fn test_typo_needs_confirmation() {
    let index = nike_index();
    let snapshot = index.get().unwrap();
    let result = FuzzyMatcher::default().match_query("Nke", &snapshot);

    assert_eq!(result.match_type, MatchType::Fuzzy);
    assert_eq!(result.candidate_id.as_deref(), Some("nike"));
    assert!(result.confidence >= 0.75 && result.confidence < 0.90);
    assert!(result.needs_confirmation);
}

#[test]
fn test_empty_query() {
    let index = nike_index();
    let snapshot = index.get().unwrap();
    let result = FuzzyMatcher::default().match_query("", &snapshot);

    assert_eq!(result.match_type, MatchType::None);
    assert_eq!(result.confidence, 0.0);
    assert!(result.candidate_id.is_none());
}

#[test]
fn test_ranking_threshold_and_limit() {
    let query = attrx::EmbeddingVector::new(vec![1.0, 0.0]);
    let candidates: Vec<_> = [("a", 0.9f32), ("b", 0.5), ("c", 0.7)]
        .iter()
        .map(|&(id, cos)| EmbeddedItem::new(id, vec![cos, (1.0 - cos * cos).sqrt()]))
        .collect();

    let results = SimilarityRanker::default().rank(&query, &candidates, 0.6, 2);
    let scores: Vec<f32> = results.iter().map(|r| r.score).collect();

    assert_eq!(scores.len(), 2);
    assert!((scores[0] - 0.9).abs() < 1e-5);
    assert!((scores[1] - 0.7).abs() < 1e-5);
}

#[test]
fn test_source_down_without_snapshot() {
    let index = CandidateIndex::new(
        "brands",
        Arc::new(JsonFileSource::new("/nonexistent/brands.json")),
        &MatchConfig::default(),
    );
    assert!(matches!(index.get(), Err(Error::SourceUnavailable(_))));
    assert!(index.peek().is_none());
}

#[test]
fn test_source_down_serves_previous_snapshot() {
    let file = brands_file();
    let path = file.path().to_path_buf();
    let clock = Arc::new(ManualClock::new());
    let index = CandidateIndex::new("brands", Arc::new(JsonFileSource::new(&path)), &MatchConfig::default())
        .with_clock(clock.clone());

    let first = index.get().unwrap();
    assert_eq!(first.len(), 4);

    // source goes away and the TTL runs out
    drop(file);
    clock.advance(Duration::from_secs(3601));

    let served = index.get().unwrap();
    assert!(Arc::ptr_eq(&first, &served));

    let stats = index.stats();
    assert_eq!(stats.fetches, 2);
    assert_eq!(stats.failures, 1);
    assert_eq!(stats.stale_serves, 1);
    assert_eq!(stats.generation, 1);
}

#[test]
fn test_file_source_picked_up_after_invalidate() {
    let file = brands_file();
    let index = CandidateIndex::new(
        "brands",
        Arc::new(JsonFileSource::new(file.path())),
        &MatchConfig::default(),
    );
    assert_eq!(index.get().unwrap().len(), 4);

    std::fs::write(file.path(), r#"[{"id": "gap", "name": "Gap"}]"#).unwrap();

    // still cached
    assert_eq!(index.get().unwrap().len(), 4);

    index.invalidate();
    let snapshot = index.get().unwrap();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot.generation(), 2);
}

#[test]
fn test_normalize_listing_from_files() {
    let file = brands_file();
    let config = MatchConfig::default();
    let index = Arc::new(CandidateIndex::new(
        "brands",
        Arc::new(JsonFileSource::new(file.path())),
        &config,
    ));
    let normalizer = AttributeNormalizer::new(&config, index);

    let raw: RawAttributes = serde_json::from_str(
        r#"{
            "genre": "Women",
            "category": "Sneakers",
            "color": "Gray",
            "material": "cotton",
            "brand": "Ralph Lauran",
            "condition": "like new",
            "confidence": 0.8
        }"#,
    )
    .unwrap();

    let product = normalizer.normalize(&raw).unwrap();

    assert_eq!(product.brand.id, "ralph-lauren");
    assert!(product.brand.validated);
    assert!(!product.brand.needs_confirmation);

    assert_eq!(product.category.full_label, "Women > Shoes > Sneakers");
    assert_eq!(product.color.id, "grey");
    assert_eq!(product.material.id, "cotton");
    assert_eq!(product.condition.id, "new_without_tags");
    assert_eq!(product.confidence, 0.8);
    assert_eq!(product.raw, raw);

    let json = serde_json::to_value(&product).unwrap();
    assert_eq!(json["category"]["fullLabel"], "Women > Shoes > Sneakers");
    assert_eq!(json["brand"]["displayName"], "Ralph Lauren");
}

#[test]
fn test_normalize_unknown_values_kept() {
    let file = brands_file();
    let config = MatchConfig::default();
    let index = Arc::new(CandidateIndex::new(
        "brands",
        Arc::new(JsonFileSource::new(file.path())),
        &config,
    ));
    let normalizer = AttributeNormalizer::new(&config, index);

    let raw = RawAttributes {
        brand: Some("Qwxyz Atelier".into()),
        color: Some("Chartreuse-ish".into()),
        confidence: 0.6,
        ..RawAttributes::default()
    };
    let product = normalizer.normalize(&raw).unwrap();

    assert!(!product.brand.validated);
    assert_eq!(product.brand.display_name, "Qwxyz Atelier");
    assert!((product.brand.confidence - 0.3).abs() < 1e-9);
    assert_eq!(product.brand.tier, ConfidenceTier::Low);

    assert!(!product.color.validated);
    assert_eq!(product.color.display_name, "Chartreuse-ish");

    assert!(product.category.attribute.is_empty());
    assert!(product.unverified_fields().contains(&"brand"));
}

#[test]
fn test_recommend_and_hydrate() {
    let store = InMemoryEmbeddings::from_items(vec![
        EmbeddedItem::new("denim-jacket", vec![0.9, 0.1, 0.0])
            .with_payload(serde_json::json!({"title": "Denim jacket"})),
        EmbeddedItem::new("trucker-jacket", vec![0.85, 0.15, 0.05])
            .with_payload(serde_json::json!({"title": "Trucker jacket"})),
        EmbeddedItem::new("sandals", vec![0.0, 0.1, 0.95])
            .with_payload(serde_json::json!({"title": "Sandals"})),
        EmbeddedItem::new("sold-out", vec![0.88, 0.12, 0.0]),
    ]);

    let ranker = SimilarityRanker::default();
    let params = RankParams {
        min_score: 0.5,
        limit: 10,
    };
    let results = ranker.recommend(&store, "denim-jacket", params).unwrap();

    assert!(results.iter().all(|r| r.id != "denim-jacket"));
    assert!(results.iter().all(|r| r.id != "sandals"));
    assert_eq!(results.len(), 2);

    // sold-out has no payload but stays on the page
    let page = hydrate(&results, &store);
    let ids: Vec<_> = page.iter().map(|h| h.id.as_str()).collect();
    assert_eq!(ids, vec!["sold-out", "trucker-jacket"]);
    assert!(page[0].record.is_null());
    assert_eq!(page[1].record["title"], "Trucker jacket");
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{"cacheTTLSeconds": 60, "similarityHardCap": 3}}"#).unwrap();

    let config = MatchConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.cache_ttl(), Duration::from_secs(60));

    let candidates: Vec<_> = (0..10)
        .map(|i| EmbeddedItem::new(format!("item-{}", i), vec![1.0, 0.0]))
        .collect();
    let query = attrx::EmbeddingVector::new(vec![1.0, 0.0]);
    let results = SimilarityRanker::new(&config).rank(&query, &candidates, 0.0, 10);
    assert_eq!(results.len(), 3);
}
