mod common;

use atlas::db::{ApiCreate, EntityKind, OperationCreate};
use atlas::export::{ExportFormat, render, render_csv};
use common::{category, endpoint, provider, service, spawn_db};

#[tokio::test]
async fn search_matches_case_insensitive_substrings() {
    let t = spawn_db("search").await;
    let db = &t.db;

    let fr24 = provider(db, "Flightradar24", "FR24", &[]).await;
    let photos = provider(db, "Planespotters", "PS", &[]).await;
    let svc = service(db, &fr24.provider.id, "tracking").await;
    let live = db
        .create_api(ApiCreate {
            service_id: svc.service.id.clone(),
            name: "live".to_string(),
            display_name: "Live Flights API".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let e = endpoint(db, &live.api.id, "/positions").await;
    db.create_operation(OperationCreate {
        endpoint_id: e.endpoint.id.clone(),
        method: "GET".to_string(),
        summary: Some("Current FLIGHT positions".to_string()),
        ..Default::default()
    })
    .await
    .unwrap();
    service(db, &photos.provider.id, "photos").await;

    // 1. One query fans out over every entity type
    let results = db.search("flight").await.unwrap();
    let providers: Vec<&str> = results
        .providers
        .iter()
        .map(|p| p.provider.short_code.as_str())
        .collect();
    assert_eq!(providers, vec!["FR24"]);
    assert!(results.services.is_empty());
    assert_eq!(results.apis.len(), 1);
    assert_eq!(results.apis[0].api.id, live.api.id);
    assert_eq!(results.operations.len(), 1);

    // 2. Every hit really contains the query
    for p in &results.providers {
        let haystack = format!("{} {}", p.provider.name, p.provider.short_code).to_lowercase();
        assert!(haystack.contains("flight"));
    }

    // 3. No match yields four empty lists
    let results = db.search("zeppelin").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn provider_list_filters_by_search_term() {
    let t = spawn_db("provider-search").await;
    let db = &t.db;

    provider(db, "Flightradar24", "FR24", &[]).await;
    provider(db, "Planespotters", "PS", &[]).await;

    let all = db.list_providers(None).await.unwrap();
    assert_eq!(all.len(), 2);

    let hits = db.list_providers(Some("spotter")).await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].provider.short_code, "PS");
}

#[tokio::test]
async fn csv_export_has_one_row_per_provider() {
    let t = spawn_db("export-csv").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let tracking = category(db, "Tracking").await;
    let fr24 = provider(db, "FR24", "FR24", &[&aviation.id, &tracking.id]).await;
    let svc = service(db, &fr24.provider.id, "tracking").await;
    common::api(db, &svc.service.id, "live", &[]).await;
    common::api(db, &svc.service.id, "history", &[]).await;

    let snapshot = db.export().await.unwrap();
    let csv = render_csv(&snapshot.providers);
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Provider Name,Short Code,Website,APIs Count,Categories",
            "\"FR24\",\"FR24\",\"https://fr24.example.com\",2,\"Aviation, Tracking\"",
        ]
    );
    assert!(!csv.ends_with('\n'));
}

#[tokio::test]
async fn json_export_flattens_endpoints_with_lineage() {
    let t = spawn_db("export-json").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let fr24 = provider(db, "Flightradar24", "FR24", &[&aviation.id]).await;
    let svc = service(db, &fr24.provider.id, "tracking").await;
    let live = common::api(db, &svc.service.id, "live", &[]).await;
    let flights = endpoint(db, &live.api.id, "/flights").await;

    let snapshot = db.export().await.unwrap();
    assert_eq!(snapshot.categories, vec![aviation]);
    assert_eq!(snapshot.providers.len(), 1);
    assert_eq!(snapshot.apis.len(), 1);
    assert_eq!(snapshot.endpoints.len(), 1);

    let exported = &snapshot.endpoints[0];
    assert_eq!(exported.endpoint.endpoint.id, flights.endpoint.id);
    assert_eq!(exported.api.as_ref().map(|a| a.id.as_str()), Some(live.api.id.as_str()));
    assert_eq!(
        exported.provider.as_ref().map(|p| p.id.as_str()),
        Some(fr24.provider.id.as_str())
    );

    let body = render(&snapshot, ExportFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(value["endpoints"][0]["path"], "/flights");
    assert_eq!(value["endpoints"][0]["provider"]["shortCode"], "FR24");
    assert_eq!(value["providers"][0]["categories"][0]["name"], "Aviation");
}

#[tokio::test]
async fn sample_data_is_loaded_once() {
    let t = spawn_db("seed").await;
    let db = &t.db;

    assert!(atlas::seed::seed_sample_data(db).await.unwrap());
    assert_eq!(db.count(EntityKind::Provider).await.unwrap(), 3);
    assert_eq!(db.count(EntityKind::Category).await.unwrap(), 3);

    // 1. Second run is a no-op
    assert!(!atlas::seed::seed_sample_data(db).await.unwrap());
    assert_eq!(db.count(EntityKind::Provider).await.unwrap(), 3);

    // 2. The sample tree is searchable
    let results = db.search("flight").await.unwrap();
    assert!(
        results
            .providers
            .iter()
            .any(|p| p.provider.short_code == "FR24")
    );
    assert!(!results.operations.is_empty());
}
