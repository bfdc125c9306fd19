use crate::db::assemble::{self, ListFilter};
use crate::db::cascade;
use crate::db::patch::{
    ApiCreate, ApiPatch, CategoryCreate, CategoryPatch, DbPatchable, EndpointCreate,
    EndpointPatch, EntityCreate, EntityPatch, EnvironmentCreate, EnvironmentPatch,
    OperationCreate, OperationPatch, ParameterCreate, ParameterPatch, ProviderCreate,
    ProviderPatch, ResponseSchemaCreate, ResponseSchemaPatch, ServiceCreate, ServicePatch,
};
use crate::db::record::CatalogRecord;
use crate::db::schema::SQLITE_INIT;
use crate::db::{EntityKind, search};
use crate::error::CatalogError;
use atlas_schema::{
    ApiView, Category, EndpointView, Environment, ExportSnapshot, OperationView, Parameter,
    ProviderView, ResponseSchema, SearchResults, ServiceView,
};
use ractor::{Actor, ActorProcessingErr, ActorRef, RpcReplyPort};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::info;

#[derive(Debug)]
pub enum DbActorMessage {
    /// Insert a new row (plus tag rows) and return its assembled view.
    Create(EntityCreate, RpcReplyPort<Result<CatalogRecord, CatalogError>>),

    /// Patch a row by id and return its assembled view.
    Patch(EntityPatch, RpcReplyPort<Result<CatalogRecord, CatalogError>>),

    /// Delete a row by id, cascading to everything it owns.
    Delete(EntityKind, String, RpcReplyPort<Result<(), CatalogError>>),
}

/// Cloneable entry point to the catalog store.
///
/// Writes are serialized through the actor; reads go straight to the pool,
/// each inside its own read transaction.
#[derive(Clone)]
pub struct DbActorHandle {
    actor: ActorRef<DbActorMessage>,
    pool: SqlitePool,
}

impl DbActorHandle {
    pub async fn create(&self, create: EntityCreate) -> Result<CatalogRecord, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Create, create)
            .map_err(|e| CatalogError::RactorError(format!("DbActor Create RPC failed: {e}")))?
    }

    pub async fn patch(&self, patch: EntityPatch) -> Result<CatalogRecord, CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Patch, patch)
            .map_err(|e| CatalogError::RactorError(format!("DbActor Patch RPC failed: {e}")))?
    }

    pub async fn delete(&self, kind: EntityKind, id: &str) -> Result<(), CatalogError> {
        ractor::call!(self.actor, DbActorMessage::Delete, kind, id.to_string())
            .map_err(|e| CatalogError::RactorError(format!("DbActor Delete RPC failed: {e}")))?
    }

    async fn create_as<T>(&self, create: EntityCreate) -> Result<T, CatalogError>
    where
        T: TryFrom<CatalogRecord, Error = CatalogError>,
    {
        self.create(create).await?.try_into()
    }

    async fn patch_as<T>(&self, patch: EntityPatch) -> Result<T, CatalogError>
    where
        T: TryFrom<CatalogRecord, Error = CatalogError>,
    {
        self.patch(patch).await?.try_into()
    }

    pub async fn create_category(&self, create: CategoryCreate) -> Result<Category, CatalogError> {
        self.create_as(EntityCreate::Category(create)).await
    }

    pub async fn create_provider(
        &self,
        create: ProviderCreate,
    ) -> Result<ProviderView, CatalogError> {
        self.create_as(EntityCreate::Provider(create)).await
    }

    pub async fn create_environment(
        &self,
        create: EnvironmentCreate,
    ) -> Result<Environment, CatalogError> {
        self.create_as(EntityCreate::Environment(create)).await
    }

    pub async fn create_service(&self, create: ServiceCreate) -> Result<ServiceView, CatalogError> {
        self.create_as(EntityCreate::Service(create)).await
    }

    pub async fn create_api(&self, create: ApiCreate) -> Result<ApiView, CatalogError> {
        self.create_as(EntityCreate::Api(create)).await
    }

    pub async fn create_endpoint(
        &self,
        create: EndpointCreate,
    ) -> Result<EndpointView, CatalogError> {
        self.create_as(EntityCreate::Endpoint(create)).await
    }

    pub async fn create_operation(
        &self,
        create: OperationCreate,
    ) -> Result<OperationView, CatalogError> {
        self.create_as(EntityCreate::Operation(create)).await
    }

    pub async fn create_parameter(
        &self,
        create: ParameterCreate,
    ) -> Result<Parameter, CatalogError> {
        self.create_as(EntityCreate::Parameter(create)).await
    }

    pub async fn create_response_schema(
        &self,
        create: ResponseSchemaCreate,
    ) -> Result<ResponseSchema, CatalogError> {
        self.create_as(EntityCreate::ResponseSchema(create)).await
    }

    pub async fn update_category(
        &self,
        id: &str,
        patch: CategoryPatch,
    ) -> Result<Category, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Category { id, patch }).await
    }

    pub async fn update_provider(
        &self,
        id: &str,
        patch: ProviderPatch,
    ) -> Result<ProviderView, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Provider { id, patch }).await
    }

    pub async fn update_environment(
        &self,
        id: &str,
        patch: EnvironmentPatch,
    ) -> Result<Environment, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Environment { id, patch }).await
    }

    pub async fn update_service(
        &self,
        id: &str,
        patch: ServicePatch,
    ) -> Result<ServiceView, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Service { id, patch }).await
    }

    pub async fn update_api(&self, id: &str, patch: ApiPatch) -> Result<ApiView, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Api { id, patch }).await
    }

    pub async fn update_endpoint(
        &self,
        id: &str,
        patch: EndpointPatch,
    ) -> Result<EndpointView, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Endpoint { id, patch }).await
    }

    pub async fn update_operation(
        &self,
        id: &str,
        patch: OperationPatch,
    ) -> Result<OperationView, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Operation { id, patch }).await
    }

    pub async fn update_parameter(
        &self,
        id: &str,
        patch: ParameterPatch,
    ) -> Result<Parameter, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::Parameter { id, patch }).await
    }

    pub async fn update_response_schema(
        &self,
        id: &str,
        patch: ResponseSchemaPatch,
    ) -> Result<ResponseSchema, CatalogError> {
        let id = id.to_string();
        self.patch_as(EntityPatch::ResponseSchema { id, patch }).await
    }

    /// Assembled view of one row; `NotFound` when the id is unknown.
    pub async fn get(&self, kind: EntityKind, id: &str) -> Result<CatalogRecord, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let record = assemble::require_record(&mut tx, kind, id).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn get_as<T>(&self, kind: EntityKind, id: &str) -> Result<T, CatalogError>
    where
        T: TryFrom<CatalogRecord, Error = CatalogError>,
    {
        self.get(kind, id).await?.try_into()
    }

    pub async fn get_category(&self, id: &str) -> Result<Category, CatalogError> {
        self.get_as(EntityKind::Category, id).await
    }

    pub async fn get_provider(&self, id: &str) -> Result<ProviderView, CatalogError> {
        self.get_as(EntityKind::Provider, id).await
    }

    pub async fn get_environment(&self, id: &str) -> Result<Environment, CatalogError> {
        self.get_as(EntityKind::Environment, id).await
    }

    pub async fn get_service(&self, id: &str) -> Result<ServiceView, CatalogError> {
        self.get_as(EntityKind::Service, id).await
    }

    pub async fn get_api(&self, id: &str) -> Result<ApiView, CatalogError> {
        self.get_as(EntityKind::Api, id).await
    }

    pub async fn get_endpoint(&self, id: &str) -> Result<EndpointView, CatalogError> {
        self.get_as(EntityKind::Endpoint, id).await
    }

    pub async fn get_operation(&self, id: &str) -> Result<OperationView, CatalogError> {
        self.get_as(EntityKind::Operation, id).await
    }

    pub async fn get_parameter(&self, id: &str) -> Result<Parameter, CatalogError> {
        self.get_as(EntityKind::Parameter, id).await
    }

    pub async fn get_response_schema(&self, id: &str) -> Result<ResponseSchema, CatalogError> {
        self.get_as(EntityKind::ResponseSchema, id).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_categories(&mut tx).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_providers(
        &self,
        search: Option<&str>,
    ) -> Result<Vec<ProviderView>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_providers(&mut tx, search).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_environments(
        &self,
        filter: ListFilter<'_>,
    ) -> Result<Vec<Environment>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_environments(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_services(
        &self,
        filter: ListFilter<'_>,
    ) -> Result<Vec<ServiceView>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_services(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_apis(&self, filter: ListFilter<'_>) -> Result<Vec<ApiView>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_apis(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_endpoints(
        &self,
        filter: ListFilter<'_>,
    ) -> Result<Vec<EndpointView>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_endpoints(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_operations(
        &self,
        filter: ListFilter<'_>,
    ) -> Result<Vec<OperationView>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_operations(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_parameters(
        &self,
        filter: ListFilter<'_>,
    ) -> Result<Vec<Parameter>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_parameters(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    pub async fn list_response_schemas(
        &self,
        filter: ListFilter<'_>,
    ) -> Result<Vec<ResponseSchema>, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let rows = assemble::list_response_schemas(&mut tx, filter).await?;
        tx.commit().await?;
        Ok(rows)
    }

    /// Free-text search across providers, services, APIs and operations.
    pub async fn search(&self, query: &str) -> Result<SearchResults, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let results = search::search(&mut tx, query).await?;
        tx.commit().await?;
        Ok(results)
    }

    pub async fn export(&self) -> Result<ExportSnapshot, CatalogError> {
        let mut tx = self.pool.begin().await?;
        let snapshot = assemble::export_snapshot(&mut tx).await?;
        tx.commit().await?;
        Ok(snapshot)
    }

    /// Number of rows stored for `kind`.
    pub async fn count(&self, kind: EntityKind) -> Result<i64, CatalogError> {
        let sql = format!("SELECT COUNT(*) FROM {}", kind.table());
        let count: i64 = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Direct pool access for diagnostics and tests.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

struct DbActorState {
    pool: SqlitePool,
}

struct DbActor;

#[ractor::async_trait]
impl Actor for DbActor {
    type Msg = DbActorMessage;
    type State = DbActorState;
    type Arguments = SqlitePool;

    async fn pre_start(
        &self,
        _myself: ActorRef<Self::Msg>,
        pool: Self::Arguments,
    ) -> Result<Self::State, ActorProcessingErr> {
        info!("DbActor initialized");
        Ok(DbActorState { pool })
    }

    async fn handle(
        &self,
        _myself: ActorRef<Self::Msg>,
        message: Self::Msg,
        state: &mut Self::State,
    ) -> Result<(), ActorProcessingErr> {
        match message {
            DbActorMessage::Create(create, reply) => {
                let res = self.create(&state.pool, create).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Patch(patch, reply) => {
                let res = self.patch(&state.pool, patch).await;
                let _ = reply.send(res);
            }
            DbActorMessage::Delete(kind, id, reply) => {
                let res = self.delete(&state.pool, kind, &id).await;
                let _ = reply.send(res);
            }
        }
        Ok(())
    }
}

impl DbActor {
    async fn create(
        &self,
        pool: &SqlitePool,
        create: EntityCreate,
    ) -> Result<CatalogRecord, CatalogError> {
        let kind = create.kind();
        let mut tx = pool.begin().await?;
        let id = create.insert(&mut tx).await?;
        let record = assemble::require_record(&mut tx, kind, &id).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn patch(
        &self,
        pool: &SqlitePool,
        patch: EntityPatch,
    ) -> Result<CatalogRecord, CatalogError> {
        let mut tx = pool.begin().await?;
        patch.apply_patch(&mut tx).await?;
        let record = assemble::require_record(&mut tx, patch.kind(), patch.id()).await?;
        tx.commit().await?;
        Ok(record)
    }

    async fn delete(
        &self,
        pool: &SqlitePool,
        kind: EntityKind,
        id: &str,
    ) -> Result<(), CatalogError> {
        let mut tx = pool.begin().await?;
        cascade::delete(&mut tx, kind, id).await?;
        tx.commit().await?;
        Ok(())
    }
}

/// Open the pool, apply the schema, and spawn the writer.
///
/// The actor is unnamed so several stores can live in one process.
pub async fn spawn(database_url: &str) -> Result<DbActorHandle, CatalogError> {
    let pool = connect(database_url).await?;
    apply_schema(&pool).await?;

    let (actor, _jh) = Actor::spawn(None, DbActor, pool.clone())
        .await
        .map_err(|e| CatalogError::RactorError(format!("failed to spawn DbActor: {e}")))?;

    Ok(DbActorHandle { actor, pool })
}

async fn connect(database_url: &str) -> Result<SqlitePool, CatalogError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    // Every connection to an in-memory database sees its own copy, so keep
    // exactly one alive for the life of the pool.
    let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
    let pool_opts = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new()
    };

    let pool = pool_opts.connect_with(connect_opts).await?;
    info!(database_url, in_memory, "database pool ready");
    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), CatalogError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}
