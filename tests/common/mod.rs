#![allow(dead_code)]

use atlas::db::{
    ApiCreate, CategoryCreate, DbActorHandle, EndpointCreate, OperationCreate, ProviderCreate,
    ServiceCreate,
};
use atlas_schema::{ApiView, Category, EndpointView, OperationView, ProviderView, ServiceView};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static NEXT_DB: AtomicU64 = AtomicU64::new(0);

/// Store backed by a throwaway SQLite file, removed on drop.
pub struct TestDb {
    pub db: DbActorHandle,
    path: PathBuf,
}

impl Drop for TestDb {
    fn drop(&mut self) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = self.path.clone().into_os_string();
            file.push(suffix);
            let _ = std::fs::remove_file(file);
        }
    }
}

pub async fn spawn_db(tag: &str) -> TestDb {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();
    let seq = NEXT_DB.fetch_add(1, Ordering::Relaxed);

    let mut path = std::env::temp_dir();
    path.push(format!(
        "atlas-{tag}-{}-{nanos}-{seq}.sqlite",
        std::process::id()
    ));

    let database_url = format!("sqlite:{}", path.display());
    let db = atlas::db::spawn(&database_url)
        .await
        .expect("failed to spawn catalog store");
    TestDb { db, path }
}

pub async fn count_rows(db: &DbActorHandle, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql)
        .fetch_one(db.pool())
        .await
        .expect("count query failed")
}

pub async fn category(db: &DbActorHandle, name: &str) -> Category {
    db.create_category(CategoryCreate {
        name: name.to_string(),
        ..Default::default()
    })
    .await
    .expect("create category")
}

pub async fn provider(
    db: &DbActorHandle,
    name: &str,
    short_code: &str,
    category_ids: &[&str],
) -> ProviderView {
    db.create_provider(ProviderCreate {
        name: name.to_string(),
        short_code: short_code.to_string(),
        website_url: format!("https://{}.example.com", short_code.to_lowercase()),
        category_ids: category_ids.iter().map(|id| (*id).to_string()).collect(),
        ..Default::default()
    })
    .await
    .expect("create provider")
}

pub async fn service(db: &DbActorHandle, provider_id: &str, name: &str) -> ServiceView {
    db.create_service(ServiceCreate {
        provider_id: provider_id.to_string(),
        name: name.to_string(),
        display_name: name.to_string(),
        ..Default::default()
    })
    .await
    .expect("create service")
}

pub async fn api(
    db: &DbActorHandle,
    service_id: &str,
    name: &str,
    category_ids: &[&str],
) -> ApiView {
    db.create_api(ApiCreate {
        service_id: service_id.to_string(),
        name: name.to_string(),
        display_name: name.to_string(),
        category_ids: category_ids.iter().map(|id| (*id).to_string()).collect(),
        ..Default::default()
    })
    .await
    .expect("create api")
}

pub async fn endpoint(db: &DbActorHandle, api_id: &str, path: &str) -> EndpointView {
    db.create_endpoint(EndpointCreate {
        api_id: api_id.to_string(),
        name: path.trim_start_matches('/').to_string(),
        path: path.to_string(),
        ..Default::default()
    })
    .await
    .expect("create endpoint")
}

pub async fn operation(db: &DbActorHandle, endpoint_id: &str, method: &str) -> OperationView {
    db.create_operation(OperationCreate {
        endpoint_id: endpoint_id.to_string(),
        method: method.to_string(),
        ..Default::default()
    })
    .await
    .expect("create operation")
}
