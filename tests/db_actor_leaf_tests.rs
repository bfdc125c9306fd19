mod common;

use atlas::db::{
    DbActorHandle, EndpointPatch, EntityKind, EnvironmentCreate, EnvironmentPatch,
    OperationPatch, ParameterCreate, ParameterPatch, ResponseSchemaCreate, ResponseSchemaPatch,
};
use atlas_schema::{Environment, Parameter, ParameterLocation, ResponseSchema};
use common::{api, category, count_rows, endpoint, operation, provider, service, spawn_db};
use serde_json::json;

/// Ids of one fully populated branch: provider down to its leaves.
struct Branch {
    provider_id: String,
    api_id: String,
    endpoint_id: String,
    operation_id: String,
    environment: Environment,
    parameter: Parameter,
    response_schema: ResponseSchema,
}

async fn branch(db: &DbActorHandle, code: &str, category_id: &str) -> Branch {
    let p = provider(db, code, code, &[category_id]).await;
    let environment = db
        .create_environment(EnvironmentCreate {
            provider_id: p.provider.id.clone(),
            name: "sandbox".to_string(),
            display_name: "Sandbox".to_string(),
            base_url: format!("https://sandbox.{}.example.com", code.to_lowercase()),
            description: Some("Test traffic only".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let svc = service(db, &p.provider.id, "tracking").await;
    let a = api(db, &svc.service.id, "live", &[category_id]).await;
    let e = endpoint(db, &a.api.id, "/flights").await;
    let op = operation(db, &e.endpoint.id, "GET").await;
    let parameter = db
        .create_parameter(ParameterCreate {
            operation_id: op.operation.id.clone(),
            name: "limit".to_string(),
            param_type: "integer".to_string(),
            location: Some(ParameterLocation::Query),
            description: Some("Page size".to_string()),
            maximum: Some(500),
            ..Default::default()
        })
        .await
        .unwrap();
    let response_schema = db
        .create_response_schema(ResponseSchemaCreate {
            operation_id: op.operation.id.clone(),
            status_code: Some(200),
            schema: Some(json!({ "type": "array" })),
            description: Some("Flight list".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();

    Branch {
        provider_id: p.provider.id,
        api_id: a.api.id,
        endpoint_id: e.endpoint.id,
        operation_id: op.operation.id,
        environment,
        parameter,
        response_schema,
    }
}

async fn counts(db: &DbActorHandle, kinds: &[EntityKind]) -> Vec<i64> {
    let mut out = Vec::with_capacity(kinds.len());
    for kind in kinds {
        out.push(db.count(*kind).await.unwrap());
    }
    out
}

const BELOW_API: [EntityKind; 5] = [
    EntityKind::Api,
    EntityKind::Endpoint,
    EntityKind::Operation,
    EntityKind::Parameter,
    EntityKind::ResponseSchema,
];

#[tokio::test]
async fn deleting_an_api_removes_its_endpoints_and_tags() {
    let t = spawn_db("api-cascade").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let doomed = branch(db, "FR24", &aviation.id).await;
    let kept = branch(db, "FA", &aviation.id).await;

    db.delete(EntityKind::Api, &doomed.api_id).await.unwrap();

    assert_eq!(counts(db, &BELOW_API).await, vec![1, 1, 1, 1, 1]);
    assert_eq!(count_rows(db, "api_categories").await, 1);
    assert_eq!(count_rows(db, "provider_categories").await, 2);
    assert_eq!(db.count(EntityKind::Service).await.unwrap(), 2);

    let view = db.get_provider(&doomed.provider_id).await.unwrap();
    assert_eq!(view.categories, vec![aviation]);
    assert!(view.services[0].apis.is_empty());
    assert!(db.get_endpoint(&doomed.endpoint_id).await.is_err());
    assert_eq!(db.get_api(&kept.api_id).await.unwrap().endpoints.len(), 1);
}

#[tokio::test]
async fn deleting_an_endpoint_removes_its_operations() {
    let t = spawn_db("endpoint-cascade").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let doomed = branch(db, "FR24", &aviation.id).await;
    branch(db, "FA", &aviation.id).await;

    db.delete(EntityKind::Endpoint, &doomed.endpoint_id)
        .await
        .unwrap();

    assert_eq!(counts(db, &BELOW_API).await, vec![2, 1, 1, 1, 1]);
    assert_eq!(count_rows(db, "api_categories").await, 2);
    let api = db.get_api(&doomed.api_id).await.unwrap();
    assert!(api.endpoints.is_empty());
    assert_eq!(api.categories.len(), 1);
}

#[tokio::test]
async fn deleting_an_operation_removes_parameters_and_response_schemas() {
    let t = spawn_db("operation-cascade").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let doomed = branch(db, "FR24", &aviation.id).await;
    branch(db, "FA", &aviation.id).await;

    db.delete(EntityKind::Operation, &doomed.operation_id)
        .await
        .unwrap();

    assert_eq!(counts(db, &BELOW_API).await, vec![2, 2, 1, 1, 1]);
    let endpoint = db.get_endpoint(&doomed.endpoint_id).await.unwrap();
    assert!(endpoint.operations.is_empty());
    assert!(db.get_parameter(&doomed.parameter.id).await.is_err());
    assert!(
        db.get_response_schema(&doomed.response_schema.id)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn deleting_leaves_touches_nothing_else() {
    let t = spawn_db("leaf-delete").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let b = branch(db, "FR24", &aviation.id).await;

    // 1. Environment
    db.delete(EntityKind::Environment, &b.environment.id)
        .await
        .unwrap();
    assert_eq!(db.count(EntityKind::Environment).await.unwrap(), 0);
    assert_eq!(db.count(EntityKind::Service).await.unwrap(), 1);
    let view = db.get_provider(&b.provider_id).await.unwrap();
    assert!(view.environments.is_empty());
    assert_eq!(view.services.len(), 1);

    // 2. Parameter
    db.delete(EntityKind::Parameter, &b.parameter.id)
        .await
        .unwrap();
    assert_eq!(db.count(EntityKind::Parameter).await.unwrap(), 0);
    assert_eq!(db.count(EntityKind::ResponseSchema).await.unwrap(), 1);

    // 3. Response schema
    db.delete(EntityKind::ResponseSchema, &b.response_schema.id)
        .await
        .unwrap();
    assert_eq!(db.count(EntityKind::ResponseSchema).await.unwrap(), 0);

    let op = db.get_operation(&b.operation_id).await.unwrap();
    assert!(op.parameters.is_empty());
    assert!(op.response_schemas.is_empty());
    assert_eq!(count_rows(db, "provider_categories").await, 1);
    assert_eq!(count_rows(db, "api_categories").await, 1);

    // 4. Deleting twice is NotFound
    assert!(
        db.delete(EntityKind::Parameter, &b.parameter.id)
            .await
            .is_err()
    );
}

#[tokio::test]
async fn environment_partial_update() {
    let t = spawn_db("environment-update").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let b = branch(db, "FR24", &aviation.id).await;
    let before = b.environment;

    let after = db
        .update_environment(
            &before.id,
            EnvironmentPatch {
                base_url: Some("https://sandbox-v2.fr24.example.com".to_string()),
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(after.base_url, "https://sandbox-v2.fr24.example.com");
    assert!(!after.is_active);
    assert_eq!(after.name, before.name);
    assert_eq!(after.display_name, before.display_name);
    assert_eq!(after.description, before.description);
    assert_eq!(after.provider_id, before.provider_id);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
}

#[tokio::test]
async fn endpoint_and_operation_partial_update() {
    let t = spawn_db("endpoint-operation-update").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let b = branch(db, "FR24", &aviation.id).await;

    // 1. Endpoint: only the description changes
    let before = db.get_endpoint(&b.endpoint_id).await.unwrap();
    let after = db
        .update_endpoint(
            &b.endpoint_id,
            EndpointPatch {
                description: Some("All live flights".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(after.endpoint.description.as_deref(), Some("All live flights"));
    assert_eq!(after.endpoint.path, before.endpoint.path);
    assert_eq!(after.endpoint.name, before.endpoint.name);
    assert_eq!(after.endpoint.api_id, before.endpoint.api_id);
    assert_eq!(after.operations, before.operations);

    // 2. Operation: summary and caching change, the rest stays
    let before = db.get_operation(&b.operation_id).await.unwrap();
    let after = db
        .update_operation(
            &b.operation_id,
            OperationPatch {
                summary: Some("List flights".to_string()),
                cacheable: Some(true),
                cache_time: Some(30),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(after.operation.summary.as_deref(), Some("List flights"));
    assert!(after.operation.cacheable);
    assert_eq!(after.operation.cache_time, Some(30));
    assert_eq!(after.operation.method, before.operation.method);
    assert_eq!(after.operation.auth_required, before.operation.auth_required);
    assert_eq!(
        after.operation.default_response_format,
        before.operation.default_response_format
    );
    assert_eq!(after.parameters, before.parameters);
    assert_eq!(after.response_schemas, before.response_schemas);

    // 3. Blank method is rejected
    let err = db
        .update_operation(
            &b.operation_id,
            OperationPatch {
                method: Some(String::new()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.invalid_fields(), vec!["method"]);
}

#[tokio::test]
async fn parameter_and_response_schema_partial_update() {
    let t = spawn_db("leaf-update").await;
    let db = &t.db;

    let aviation = category(db, "Aviation").await;
    let b = branch(db, "FR24", &aviation.id).await;

    // 1. Parameter moves from query to header
    let before = b.parameter;
    let after = db
        .update_parameter(
            &before.id,
            ParameterPatch {
                location: Some(ParameterLocation::Header),
                required: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(after.location, ParameterLocation::Header);
    assert!(after.required);
    assert_eq!(after.name, before.name);
    assert_eq!(after.param_type, before.param_type);
    assert_eq!(after.description, before.description);
    assert_eq!(after.maximum, Some(500));
    assert_eq!(after.created_at, before.created_at);
    assert_eq!(db.get_parameter(&before.id).await.unwrap(), after);

    // 2. Response schema: status changes, schema body stays
    let before = b.response_schema;
    let after = db
        .update_response_schema(
            &before.id,
            ResponseSchemaPatch {
                status_code: Some(206),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(after.status_code, 206);
    assert_eq!(after.schema, before.schema);
    assert_eq!(after.media_type, before.media_type);
    assert_eq!(after.description, before.description);
    assert_eq!(db.get_response_schema(&before.id).await.unwrap(), after);
}
