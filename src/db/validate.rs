//! Input checks run by the writer before a row is touched.

use sqlx::SqliteConnection;

use crate::db::EntityKind;
use crate::error::{CatalogError, InvalidField};

/// Collects every offending field so one request reports all of them.
#[derive(Debug, Default)]
pub(crate) struct Issues {
    fields: Vec<InvalidField>,
}

impl Issues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, reason: impl Into<String>) {
        self.fields.push(InvalidField::new(field, reason));
    }

    /// Create-time check for a required text field.
    pub fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.fields.push(InvalidField::required(field));
        }
    }

    pub fn require_some<T>(&mut self, field: &str, value: Option<&T>) {
        if value.is_none() {
            self.fields.push(InvalidField::required(field));
        }
    }

    /// Patch-time check: a supplied required field must still carry text.
    pub fn non_blank(&mut self, field: &str, value: Option<&String>) {
        if value.is_some_and(|v| v.trim().is_empty()) {
            self.push(field, "must not be blank");
        }
    }

    /// Records a failure when `id` names no row of `kind`. Blank ids are
    /// left to `require`.
    pub async fn reference(
        &mut self,
        conn: &mut SqliteConnection,
        field: &str,
        kind: EntityKind,
        id: &str,
    ) -> Result<(), CatalogError> {
        if id.trim().is_empty() {
            return Ok(());
        }
        if !exists(conn, kind, id).await? {
            self.push(field, format!("unknown {} {id}", kind.as_str()));
        }
        Ok(())
    }

    pub async fn categories(
        &mut self,
        conn: &mut SqliteConnection,
        ids: &[String],
    ) -> Result<(), CatalogError> {
        for id in ids {
            if !exists(conn, EntityKind::Category, id).await? {
                self.push("categoryIds", format!("unknown category {id}"));
            }
        }
        Ok(())
    }

    /// Short codes are unique across providers; `own_id` is skipped so a
    /// provider may resubmit its own code.
    pub async fn short_code(
        &mut self,
        conn: &mut SqliteConnection,
        short_code: &str,
        own_id: Option<&str>,
    ) -> Result<(), CatalogError> {
        let taken: Option<i64> =
            sqlx::query_scalar("SELECT 1 FROM providers WHERE short_code = ? AND id != ?")
                .bind(short_code)
                .bind(own_id.unwrap_or(""))
                .fetch_optional(&mut *conn)
                .await?;
        if taken.is_some() {
            self.push("shortCode", format!("short code {short_code} is already in use"));
        }
        Ok(())
    }

    pub fn into_result(self) -> Result<(), CatalogError> {
        if self.fields.is_empty() {
            Ok(())
        } else {
            Err(CatalogError::Validation {
                fields: self.fields,
            })
        }
    }
}

pub(crate) async fn exists(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<bool, CatalogError> {
    let sql = format!("SELECT 1 FROM {} WHERE id = ?", kind.table());
    let hit: Option<i64> = sqlx::query_scalar(&sql)
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;
    Ok(hit.is_some())
}

/// Fails with `NotFound` when the addressed row is missing.
pub(crate) async fn ensure_exists(
    conn: &mut SqliteConnection,
    kind: EntityKind,
    id: &str,
) -> Result<(), CatalogError> {
    if exists(conn, kind, id).await? {
        Ok(())
    } else {
        Err(CatalogError::not_found(kind, id))
    }
}

/// Collapses repeated ids, keeping first-seen order.
pub(crate) fn dedupe_ids(ids: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(ids.len());
    for id in ids {
        if !out.contains(id) {
            out.push(id.clone());
        }
    }
    out
}
