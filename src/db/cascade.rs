//! Explicit delete cascades. There are no foreign keys, so removing a row
//! means walking the ownership chain and deleting every descendant plus the
//! tag rows that point at them, all inside the writer's transaction.

use sqlx::SqliteConnection;
use tracing::debug;

use crate::db::EntityKind;
use crate::db::validate::ensure_exists;
use crate::error::CatalogError;

/// Deletion order: leaves first, so each scope subquery still resolves
/// through the parents it walks.
const BOTTOM_UP: [EntityKind; 8] = [
    EntityKind::Parameter,
    EntityKind::ResponseSchema,
    EntityKind::Operation,
    EntityKind::Endpoint,
    EntityKind::Api,
    EntityKind::Service,
    EntityKind::Environment,
    EntityKind::Provider,
];

/// Owning entity and the column that references it.
fn parent(kind: EntityKind) -> Option<(EntityKind, &'static str)> {
    match kind {
        EntityKind::Category | EntityKind::Provider => None,
        EntityKind::Environment | EntityKind::Service => Some((EntityKind::Provider, "provider_id")),
        EntityKind::Api => Some((EntityKind::Service, "service_id")),
        EntityKind::Endpoint => Some((EntityKind::Api, "api_id")),
        EntityKind::Operation => Some((EntityKind::Endpoint, "endpoint_id")),
        EntityKind::Parameter | EntityKind::ResponseSchema => {
            Some((EntityKind::Operation, "operation_id"))
        }
    }
}

/// Subquery selecting the ids of every `target` row owned (transitively) by
/// the `anchor` row whose id is bound to the single `?`. `None` when
/// `target` is not under `anchor`.
fn owned_ids(target: EntityKind, anchor: EntityKind) -> Option<String> {
    if target == anchor {
        return Some(format!("SELECT id FROM {} WHERE id = ?", target.table()));
    }
    let (owner, column) = parent(target)?;
    let inner = owned_ids(owner, anchor)?;
    Some(format!(
        "SELECT id FROM {} WHERE {column} IN ({inner})",
        target.table()
    ))
}

/// Deletes one row and everything it owns. Fails with `NotFound` when the
/// id is unknown, leaving every table untouched.
pub(crate) async fn delete(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<(), CatalogError> {
    ensure_exists(conn, kind, id).await?;

    let removed = if kind == EntityKind::Category {
        delete_category(conn, id).await?
    } else {
        delete_subtree(conn, kind, id).await?
    };

    debug!(entity = kind.as_str(), id, removed, "db row deleted with cascade");
    Ok(())
}

async fn delete_category(conn: &mut SqliteConnection, id: &str) -> Result<u64, CatalogError> {
    let mut removed = 0;
    for sql in [
        "DELETE FROM provider_categories WHERE category_id = ?",
        "DELETE FROM api_categories WHERE category_id = ?",
        "DELETE FROM categories WHERE id = ?",
    ] {
        removed += sqlx::query(sql)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    Ok(removed)
}

async fn delete_subtree(
    conn: &mut SqliteConnection,
    anchor: EntityKind,
    id: &str,
) -> Result<u64, CatalogError> {
    let mut statements = Vec::new();

    // Tag rows go first, while the owners they hang off are still present.
    if let Some(apis) = owned_ids(EntityKind::Api, anchor) {
        statements.push(format!("DELETE FROM api_categories WHERE api_id IN ({apis})"));
    }
    if let Some(providers) = owned_ids(EntityKind::Provider, anchor) {
        statements.push(format!(
            "DELETE FROM provider_categories WHERE provider_id IN ({providers})"
        ));
    }
    for kind in BOTTOM_UP {
        if let Some(scope) = owned_ids(kind, anchor) {
            statements.push(format!("DELETE FROM {} WHERE id IN ({scope})", kind.table()));
        }
    }

    let mut removed = 0;
    for sql in &statements {
        removed += sqlx::query(sql)
            .bind(id)
            .execute(&mut *conn)
            .await?
            .rows_affected();
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_walks_the_ownership_chain() {
        assert_eq!(
            owned_ids(EntityKind::Operation, EntityKind::Api).as_deref(),
            Some(
                "SELECT id FROM operations WHERE endpoint_id IN \
                 (SELECT id FROM endpoints WHERE api_id IN \
                 (SELECT id FROM apis WHERE id = ?))"
            )
        );
    }

    #[test]
    fn siblings_and_ancestors_are_out_of_scope() {
        assert_eq!(owned_ids(EntityKind::Environment, EntityKind::Service), None);
        assert_eq!(owned_ids(EntityKind::Provider, EntityKind::Api), None);
        assert_eq!(owned_ids(EntityKind::Parameter, EntityKind::Category), None);
    }

    #[test]
    fn provider_scope_reaches_every_descendant() {
        for kind in BOTTOM_UP {
            assert!(owned_ids(kind, EntityKind::Provider).is_some(), "{kind}");
        }
    }
}
