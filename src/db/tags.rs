//! Category tagging through the `provider_categories` and `api_categories`
//! join tables.

use atlas_schema::Category;
use sqlx::SqliteConnection;
use tracing::warn;

use crate::db::models::DbCategory;
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TagJoin {
    Provider,
    Api,
}

impl TagJoin {
    fn table(self) -> &'static str {
        match self {
            TagJoin::Provider => "provider_categories",
            TagJoin::Api => "api_categories",
        }
    }

    fn owner_column(self) -> &'static str {
        match self {
            TagJoin::Provider => "provider_id",
            TagJoin::Api => "api_id",
        }
    }
}

/// Replaces the owner's tag set wholesale: every existing row goes, then
/// the new set is inserted. `ids` must already be deduplicated.
pub(crate) async fn replace(
    conn: &mut SqliteConnection,
    join: TagJoin,
    owner_id: &str,
    ids: &[String],
) -> Result<(), CatalogError> {
    let delete = format!("DELETE FROM {} WHERE {} = ?", join.table(), join.owner_column());
    sqlx::query(&delete)
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

    let insert = format!(
        "INSERT OR IGNORE INTO {} ({}, category_id) VALUES (?, ?)",
        join.table(),
        join.owner_column()
    );
    for category_id in ids {
        sqlx::query(&insert)
            .bind(owner_id)
            .bind(category_id)
            .execute(&mut *conn)
            .await?;
    }
    Ok(())
}

/// Resolves the owner's tags in tag-insertion order.
///
/// A join row whose category no longer exists is skipped and reported.
pub(crate) async fn load(
    conn: &mut SqliteConnection,
    join: TagJoin,
    owner_id: &str,
) -> Result<Vec<Category>, CatalogError> {
    let select = format!(
        r#"
        SELECT c.*
        FROM {table} j
        INNER JOIN categories c ON c.id = j.category_id
        WHERE j.{owner} = ?
        ORDER BY j.rowid
        "#,
        table = join.table(),
        owner = join.owner_column()
    );
    let rows = sqlx::query_as::<_, DbCategory>(&select)
        .bind(owner_id)
        .fetch_all(&mut *conn)
        .await?;

    let count = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        join.table(),
        join.owner_column()
    );
    let total: i64 = sqlx::query_scalar(&count)
        .bind(owner_id)
        .fetch_one(&mut *conn)
        .await?;

    let resolved = rows.len();
    if usize::try_from(total).unwrap_or(usize::MAX) > resolved {
        warn!(
            join = join.table(),
            owner_id,
            total,
            resolved,
            "skipping category tags that point at deleted categories"
        );
    }

    Ok(rows.into_iter().map(Category::from).collect())
}
