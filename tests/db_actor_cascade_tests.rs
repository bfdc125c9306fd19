mod common;

use atlas::db::{
    ApiPatch, EntityKind, EnvironmentCreate, ParameterCreate, ProviderPatch, ResponseSchemaCreate,
};
use atlas_schema::ParameterLocation;
use common::{api, category, count_rows, endpoint, operation, provider, service, spawn_db};

const OWNED_KINDS: [EntityKind; 8] = [
    EntityKind::Provider,
    EntityKind::Environment,
    EntityKind::Service,
    EntityKind::Api,
    EntityKind::Endpoint,
    EntityKind::Operation,
    EntityKind::Parameter,
    EntityKind::ResponseSchema,
];

#[tokio::test]
async fn replacing_categories_is_idempotent() {
    let t = spawn_db("tags-replace").await;
    let db = &t.db;

    let a = category(db, "Aviation").await;
    let b = category(db, "Tracking").await;
    let c = category(db, "Analytics").await;
    let p = provider(db, "Flightradar24", "FR24", &[&c.id]).await;
    let id = p.provider.id.clone();

    let patch = ProviderPatch {
        category_ids: Some(vec![a.id.clone(), b.id.clone(), a.id.clone()]),
        ..Default::default()
    };

    // 1. Replace twice with the same set, duplicates folded
    db.update_provider(&id, patch.clone()).await.unwrap();
    let view = db.update_provider(&id, patch).await.unwrap();

    let ids: Vec<&str> = view.categories.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec![a.id.as_str(), b.id.as_str()]);
    assert_eq!(count_rows(db, "provider_categories").await, 2);

    // 2. Absent categoryIds leaves tags alone
    let view = db
        .update_provider(
            &id,
            ProviderPatch {
                name: Some("FR24".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(view.categories.len(), 2);

    // 3. An empty list clears them
    let view = db
        .update_provider(
            &id,
            ProviderPatch {
                category_ids: Some(Vec::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(view.categories.is_empty());
    assert_eq!(count_rows(db, "provider_categories").await, 0);
}

#[tokio::test]
async fn deleting_a_category_untags_providers_and_apis() {
    let t = spawn_db("category-delete").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let tracking = category(db, "Tracking").await;
    let p = provider(db, "Flightradar24", "FR24", &[&aviation.id, &tracking.id]).await;
    let svc = service(db, &p.provider.id, "flight-tracking").await;
    let live = api(db, &svc.service.id, "live-flights", &[&aviation.id]).await;

    db.delete(EntityKind::Category, &aviation.id).await.unwrap();

    let p = db.get_provider(&p.provider.id).await.unwrap();
    assert_eq!(p.categories, vec![tracking.clone()]);
    let live = db.get_api(&live.api.id).await.unwrap();
    assert!(live.categories.is_empty());

    assert_eq!(count_rows(db, "provider_categories").await, 1);
    assert_eq!(count_rows(db, "api_categories").await, 0);
    assert_eq!(db.list_categories().await.unwrap(), vec![tracking]);
}

#[tokio::test]
async fn dangling_tag_rows_are_skipped() {
    let t = spawn_db("tags-dangling").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let p = provider(db, "Flightradar24", "FR24", &[&aviation.id]).await;

    sqlx::query("INSERT INTO provider_categories (provider_id, category_id) VALUES (?, ?)")
        .bind(&p.provider.id)
        .bind("ghost")
        .execute(db.pool())
        .await
        .unwrap();

    let view = db.get_provider(&p.provider.id).await.unwrap();
    assert_eq!(view.categories, vec![aviation]);
}

#[tokio::test]
async fn deleting_a_provider_removes_everything_it_owns() {
    let t = spawn_db("provider-cascade").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;

    // 1. Build two full trees; only the first one is deleted
    let mut provider_ids = Vec::new();
    for (name, code) in [("Flightradar24", "FR24"), ("FlightAware", "FA")] {
        let p = provider(db, name, code, &[&aviation.id]).await;
        let pid = p.provider.id.clone();
        db.create_environment(EnvironmentCreate {
            provider_id: pid.clone(),
            name: "production".to_string(),
            display_name: "Production".to_string(),
            base_url: format!("https://api.{}.example.com", code.to_lowercase()),
            ..Default::default()
        })
        .await
        .unwrap();
        let svc = service(db, &pid, "tracking").await;
        let a = api(db, &svc.service.id, "live", &[&aviation.id]).await;
        let e = endpoint(db, &a.api.id, "/flights").await;
        let op = operation(db, &e.endpoint.id, "GET").await;
        db.create_parameter(ParameterCreate {
            operation_id: op.operation.id.clone(),
            name: "limit".to_string(),
            param_type: "integer".to_string(),
            location: Some(ParameterLocation::Query),
            ..Default::default()
        })
        .await
        .unwrap();
        db.create_response_schema(ResponseSchemaCreate {
            operation_id: op.operation.id.clone(),
            status_code: Some(200),
            ..Default::default()
        })
        .await
        .unwrap();
        provider_ids.push(pid);
    }

    for kind in OWNED_KINDS {
        assert_eq!(db.count(kind).await.unwrap(), 2, "Expected two {kind} rows");
    }

    // 2. Delete the first provider
    db.delete(EntityKind::Provider, &provider_ids[0])
        .await
        .unwrap();

    for kind in OWNED_KINDS {
        assert_eq!(
            db.count(kind).await.unwrap(),
            1,
            "Expected one {kind} row left"
        );
    }
    assert_eq!(count_rows(db, "provider_categories").await, 1);
    assert_eq!(count_rows(db, "api_categories").await, 1);
    assert_eq!(db.count(EntityKind::Category).await.unwrap(), 1);

    // 3. The survivor is intact
    let survivor = db.get_provider(&provider_ids[1]).await.unwrap();
    assert_eq!(survivor.provider.short_code, "FA");
    assert_eq!(survivor.api_count(), 1);
    let op = &survivor.services[0].apis[0].endpoints[0].operations[0];
    assert_eq!(op.parameters.len(), 1);
    assert_eq!(op.response_schemas.len(), 1);
}

#[tokio::test]
async fn deleting_a_service_keeps_its_provider() {
    let t = spawn_db("service-cascade").await;
    let db = &t.db;

    let tracking = category(db, "Tracking").await;
    let p = provider(db, "Flightradar24", "FR24", &[&tracking.id]).await;
    let pid = p.provider.id.clone();
    let flights = service(db, &pid, "flight-tracking").await;
    let aircraft = service(db, &pid, "aircraft-data").await;
    let live = api(db, &flights.service.id, "live-flights", &[&tracking.id]).await;
    let e = endpoint(db, &live.api.id, "/flights").await;
    operation(db, &e.endpoint.id, "GET").await;
    let kept = api(db, &aircraft.service.id, "aircraft", &[]).await;

    db.delete(EntityKind::Service, &flights.service.id)
        .await
        .unwrap();

    let view = db.get_provider(&pid).await.unwrap();
    assert_eq!(view.categories, vec![tracking]);
    assert_eq!(view.services.len(), 1);
    assert_eq!(view.services[0].service.id, aircraft.service.id);
    assert_eq!(view.services[0].apis[0].api.id, kept.api.id);

    assert_eq!(db.count(EntityKind::Api).await.unwrap(), 1);
    assert_eq!(db.count(EntityKind::Endpoint).await.unwrap(), 0);
    assert_eq!(db.count(EntityKind::Operation).await.unwrap(), 0);
    assert_eq!(count_rows(db, "api_categories").await, 0);
    assert!(db.get_api(&live.api.id).await.is_err());
}

#[tokio::test]
async fn api_categories_replace_on_patch() {
    let t = spawn_db("api-tags").await;
    let db = &t.db;

    let a = category(db, "Aviation").await;
    let b = category(db, "Analytics").await;
    let p = provider(db, "FlightAware", "FA", &[]).await;
    let svc = service(db, &p.provider.id, "aeroapi").await;
    let flight_data = api(db, &svc.service.id, "flight-data", &[&a.id]).await;

    let view = db
        .update_api(
            &flight_data.api.id,
            ApiPatch {
                category_ids: Some(vec![b.id.clone()]),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(view.categories, vec![b]);
    assert_eq!(count_rows(db, "api_categories").await, 1);
}
