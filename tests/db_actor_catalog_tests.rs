mod common;

use atlas::CatalogError;
use atlas::db::{
    ApiPatch, CategoryCreate, CategoryPatch, EntityKind, EnvironmentCreate, ListFilter,
    ParameterCreate, ProviderCreate, ProviderPatch, ResponseSchemaCreate, ServiceCreate,
    ServicePatch,
};
use atlas_schema::ParameterLocation;
use common::{api, category, endpoint, operation, provider, service, spawn_db};

#[tokio::test]
async fn category_create_get_and_list_sorted_by_name() {
    let t = spawn_db("category-crud").await;
    let db = &t.db;

    // 1. Fresh store lists nothing
    assert!(db.list_categories().await.unwrap().is_empty());

    // 2. Create out of order, including the localized aliases
    let tracking = db
        .create_category(CategoryCreate {
            name: "Tracking".to_string(),
            description: Some("Live positions".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let aviation = category(db, "Aviation").await;

    assert!(!tracking.id.is_empty(), "Expected a generated id");
    assert_ne!(tracking.id, aviation.id);
    assert_eq!(tracking.created_at, tracking.updated_at);
    assert_eq!(tracking.description.as_deref(), Some("Live positions"));

    // 3. get returns the same record
    let fetched = db.get_category(&tracking.id).await.unwrap();
    assert_eq!(fetched, tracking);

    // 4. list is ordered by name
    let names: Vec<String> = db
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["Aviation", "Tracking"]);

    // 5. Case does not affect the order
    category(db, "Zeta").await;
    category(db, "analytics").await;
    category(db, "beta").await;
    let names: Vec<String> = db
        .list_categories()
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(
        names,
        vec!["analytics", "Aviation", "beta", "Tracking", "Zeta"]
    );
}

#[tokio::test]
async fn provider_round_trip_keeps_every_field() {
    let t = spawn_db("provider-round-trip").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let created = db
        .create_provider(ProviderCreate {
            name: "Flightradar24".to_string(),
            short_code: "FR24".to_string(),
            website_url: "https://www.flightradar24.com".to_string(),
            data_sources: vec!["ADS-B".to_string(), "MLAT".to_string()],
            historical_data_available: true,
            free_tier_available: true,
            contact_info: Some(serde_json::json!({ "phone": "+46 0000" })),
            category_ids: vec![aviation.id.clone()],
            ..Default::default()
        })
        .await
        .unwrap();

    let p = &created.provider;
    assert_eq!(p.short_code, "FR24");
    assert_eq!(p.data_sources, vec!["ADS-B", "MLAT"]);
    assert!(p.historical_data_available);
    assert!(p.free_tier_available);
    assert!(p.is_active, "Expected isActive to default to true");
    assert_eq!(p.contact_info, Some(serde_json::json!({ "phone": "+46 0000" })));
    assert_eq!(p.created_at, p.updated_at);
    assert_eq!(created.categories, vec![aviation]);
    assert!(created.environments.is_empty());
    assert!(created.services.is_empty());

    let fetched = db.get_provider(&p.id).await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_reports_every_invalid_field_at_once() {
    let t = spawn_db("validation").await;
    let db = &t.db;

    // 1. Missing required fields
    let err = db
        .create_provider(ProviderCreate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Validation { .. }));
    assert_eq!(err.invalid_fields(), vec!["name", "shortCode", "websiteUrl"]);

    // 2. Unknown parent is a validation failure, not a lookup failure
    let err = db
        .create_service(ServiceCreate {
            provider_id: "missing".to_string(),
            name: "svc".to_string(),
            display_name: "Service".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), vec!["providerId"]);

    // 3. Unknown category ids
    let err = db
        .create_provider(ProviderCreate {
            name: "Acme".to_string(),
            short_code: "ACME".to_string(),
            website_url: "https://acme.example.com".to_string(),
            category_ids: vec!["nope".to_string()],
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), vec!["categoryIds"]);

    // 4. Parameter without a location
    let err = db
        .create_parameter(ParameterCreate {
            operation_id: "missing".to_string(),
            name: "limit".to_string(),
            param_type: "integer".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), vec!["location", "operationId"]);

    // 5. Nothing was written
    assert_eq!(db.count(EntityKind::Provider).await.unwrap(), 0);
    assert_eq!(db.count(EntityKind::Service).await.unwrap(), 0);
}

#[tokio::test]
async fn short_code_is_unique_across_providers() {
    let t = spawn_db("short-code").await;
    let db = &t.db;

    let first = provider(db, "Flightradar24", "FR24", &[]).await;
    let err = db
        .create_provider(ProviderCreate {
            name: "Copycat".to_string(),
            short_code: "FR24".to_string(),
            website_url: "https://copycat.example.com".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), vec!["shortCode"]);

    // Resubmitting its own code is fine
    let patched = db
        .update_provider(
            &first.provider.id,
            ProviderPatch {
                short_code: Some("FR24".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(patched.provider.short_code, "FR24");
}

#[tokio::test]
async fn partial_update_only_touches_given_fields() {
    let t = spawn_db("partial-update").await;
    let db = &t.db;

    let created = db
        .create_category(CategoryCreate {
            name: "Aviation".to_string(),
            description: Some("Aircraft and airports".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    let updated = db
        .update_category(
            &created.id,
            CategoryPatch {
                name: Some("Air Travel".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Air Travel");
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    // Blank strings are rejected for required fields
    let err = db
        .update_category(
            &created.id,
            CategoryPatch {
                name: Some("   ".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), vec!["name"]);
    assert_eq!(db.get_category(&created.id).await.unwrap(), updated);
}

#[tokio::test]
async fn unknown_ids_are_not_found_and_leave_store_untouched() {
    let t = spawn_db("not-found").await;
    let db = &t.db;

    let kept = provider(db, "Flightradar24", "FR24", &[]).await;

    let err = db
        .update_provider(
            "does-not-exist",
            ProviderPatch {
                name: Some("X".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        CatalogError::NotFound {
            entity: EntityKind::Provider,
            ..
        }
    ));

    let err = db
        .delete(EntityKind::Service, "does-not-exist")
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));

    let err = db.get_api("does-not-exist").await.unwrap_err();
    assert!(matches!(err, CatalogError::NotFound { .. }));

    assert_eq!(db.get_provider(&kept.provider.id).await.unwrap(), kept);
}

#[tokio::test]
async fn api_provider_follows_its_service() {
    let t = spawn_db("api-lineage").await;
    let db = &t.db;

    let fr24 = provider(db, "Flightradar24", "FR24", &[]).await;
    let fa = provider(db, "FlightAware", "FA", &[]).await;
    let tracking = service(db, &fr24.provider.id, "flight-tracking").await;
    let aeroapi = service(db, &fa.provider.id, "aeroapi").await;

    // 1. providerId is derived from the service on create
    let live = api(db, &tracking.service.id, "live-flights", &[]).await;
    assert_eq!(live.api.provider_id, fr24.provider.id);

    // 2. Moving the API to another service moves its provider too
    let moved = db
        .update_api(
            &live.api.id,
            ApiPatch {
                service_id: Some(aeroapi.service.id.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.api.service_id, aeroapi.service.id);
    assert_eq!(moved.api.provider_id, fa.provider.id);

    // 3. Re-parenting a service rewrites the provider of its APIs
    db.update_service(
        &aeroapi.service.id,
        ServicePatch {
            provider_id: Some(fr24.provider.id.clone()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let api = db.get_api(&live.api.id).await.unwrap();
    assert_eq!(api.api.provider_id, fr24.provider.id);

    let by_provider = db
        .list_apis(ListFilter {
            provider_id: Some(&fr24.provider.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_provider.len(), 1);
    assert_eq!(by_provider[0].api.id, live.api.id);
}

#[tokio::test]
async fn provider_view_nests_the_whole_tree() {
    let t = spawn_db("tree").await;
    let db = &t.db;

    let fr24 = provider(db, "Flightradar24", "FR24", &[]).await;
    let pid = fr24.provider.id.clone();
    db.create_environment(EnvironmentCreate {
        provider_id: pid.clone(),
        name: "production".to_string(),
        display_name: "Production".to_string(),
        base_url: "https://api.flightradar24.com".to_string(),
        ..Default::default()
    })
    .await
    .unwrap();
    let svc = service(db, &pid, "flight-tracking").await;
    let live = api(db, &svc.service.id, "live-flights", &[]).await;
    let flights = endpoint(db, &live.api.id, "/flights").await;
    endpoint(db, &live.api.id, "/airports").await;
    let get = operation(db, &flights.endpoint.id, "GET").await;
    assert!(get.operation.auth_required, "Expected authRequired default");
    assert_eq!(get.operation.default_response_format, "json");

    db.create_parameter(ParameterCreate {
        operation_id: get.operation.id.clone(),
        name: "bounds".to_string(),
        param_type: "string".to_string(),
        location: Some(ParameterLocation::Query),
        ..Default::default()
    })
    .await
    .unwrap();
    let ok = db
        .create_response_schema(ResponseSchemaCreate {
            operation_id: get.operation.id.clone(),
            status_code: Some(200),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(ok.media_type, "application/json");

    let view = db.get_provider(&pid).await.unwrap();
    assert_eq!(view.environments.len(), 1);
    assert_eq!(view.services.len(), 1);
    assert_eq!(view.api_count(), 1);

    let api_view = &view.services[0].apis[0];
    let paths: Vec<&str> = api_view
        .endpoints
        .iter()
        .map(|e| e.endpoint.path.as_str())
        .collect();
    assert_eq!(paths, vec!["/flights", "/airports"]);

    let op = &api_view.endpoints[0].operations[0];
    assert_eq!(op.parameters.len(), 1);
    assert_eq!(op.parameters[0].location, ParameterLocation::Query);
    assert_eq!(op.response_schemas, vec![ok]);
}
