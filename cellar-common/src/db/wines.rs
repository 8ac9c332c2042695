//! Wine table operations

use crate::models::WineRecord;
use crate::{Error, Result};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Insert or update a wine by guid
pub async fn save_wine(pool: &SqlitePool, wine: &WineRecord) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO wines (guid, color, region, subregion, commune, cru, vintage,
                           producer, appellation, vineyard, size, created_at, updated_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
        ON CONFLICT(guid) DO UPDATE SET
            color = excluded.color,
            region = excluded.region,
            subregion = excluded.subregion,
            commune = excluded.commune,
            cru = excluded.cru,
            vintage = excluded.vintage,
            producer = excluded.producer,
            appellation = excluded.appellation,
            vineyard = excluded.vineyard,
            size = excluded.size,
            updated_at = CURRENT_TIMESTAMP
        "#,
    )
    .bind(wine.id.to_string())
    .bind(&wine.color)
    .bind(&wine.region)
    .bind(&wine.subregion)
    .bind(&wine.commune)
    .bind(&wine.cru)
    .bind(wine.vintage)
    .bind(&wine.producer)
    .bind(&wine.appellation)
    .bind(&wine.vineyard)
    .bind(&wine.size)
    .execute(pool)
    .await?;

    Ok(())
}

/// Load every wine in the cellar, in insertion order
pub async fn load_all_wines(pool: &SqlitePool) -> Result<Vec<WineRecord>> {
    let rows = sqlx::query(
        r#"
        SELECT guid, color, region, subregion, commune, cru, vintage,
               producer, appellation, vineyard, size
        FROM wines
        ORDER BY created_at, rowid
        "#,
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|row| {
            let guid: String = row.get("guid");
            let id = Uuid::parse_str(&guid)
                .map_err(|e| Error::InvalidInput(format!("Bad wine guid '{}': {}", guid, e)))?;

            Ok(WineRecord {
                id,
                color: row.get("color"),
                region: row.get("region"),
                subregion: row.get("subregion"),
                commune: row.get("commune"),
                cru: row.get("cru"),
                vintage: row.get("vintage"),
                producer: row.get("producer"),
                appellation: row.get("appellation"),
                vineyard: row.get("vineyard"),
                size: row.get("size"),
            })
        })
        .collect()
}

/// Number of wines in the cellar
pub async fn count_wines(pool: &SqlitePool) -> Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wines")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
