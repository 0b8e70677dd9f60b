//! Queries over the `station` table.

use anyhow::Result;
use rusqlite::Connection;

/// Every `station` identifier in row order. Duplicate rows are kept.
pub fn list_station_ids(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT station FROM station")?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()?;
    Ok(ids)
}
