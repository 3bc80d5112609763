//! Database operations for the `site_system_status` table.

use sqlx::SqlitePool;
use wcsdk_core::SiteSystemStatus;

use crate::DbError;

/// A row from the `site_system_status` table.
///
/// The `database` section is stored in `database_info` to keep the column
/// name clear of the SQL keyword.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SiteSystemStatusRow {
    pub site_id: i64,
    pub environment: Option<String>,
    pub database_info: Option<String>,
    pub active_plugins: Option<String>,
    pub theme: Option<String>,
    pub settings: Option<String>,
    pub security: Option<String>,
    pub pages: Option<String>,
}

impl From<SiteSystemStatusRow> for SiteSystemStatus {
    fn from(row: SiteSystemStatusRow) -> Self {
        Self {
            site_id: row.site_id,
            environment: row.environment,
            database: row.database_info,
            active_plugins: row.active_plugins,
            theme: row.theme,
            settings: row.settings,
            security: row.security,
            pages: row.pages,
        }
    }
}

/// Returns the stored snapshot for a site, if one has been fetched.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_system_status(
    pool: &SqlitePool,
    site_id: i64,
) -> Result<Option<SiteSystemStatus>, DbError> {
    let row = sqlx::query_as::<_, SiteSystemStatusRow>(
        "SELECT site_id, environment, database_info, active_plugins, theme, settings, \
                security, pages \
         FROM site_system_status \
         WHERE site_id = ?1",
    )
    .bind(site_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(SiteSystemStatus::from))
}

/// Replaces the snapshot for `status.site_id`.
///
/// The old row is deleted and the new one inserted in one transaction, so no
/// section of a previous snapshot survives the replace.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if either statement fails.
pub async fn replace_system_status(
    pool: &SqlitePool,
    status: &SiteSystemStatus,
) -> Result<(), DbError> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM site_system_status WHERE site_id = ?1")
        .bind(status.site_id)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        "INSERT INTO site_system_status \
             (site_id, environment, database_info, active_plugins, theme, settings, security, pages) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(status.site_id)
    .bind(status.environment.as_deref())
    .bind(status.database.as_deref())
    .bind(status.active_plugins.as_deref())
    .bind(status.theme.as_deref())
    .bind(status.settings.as_deref())
    .bind(status.security.as_deref())
    .bind(status.pages.as_deref())
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(())
}

/// Deletes the stored snapshot for a site. Returns the number of rows removed.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the delete fails.
pub async fn delete_system_status(pool: &SqlitePool, site_id: i64) -> Result<u64, DbError> {
    let result = sqlx::query("DELETE FROM site_system_status WHERE site_id = ?1")
        .bind(site_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
