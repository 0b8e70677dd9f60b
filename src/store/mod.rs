//! Store layer: read-only SQLite access to the climate dataset.
//!
//! The dataset is pre-existing and never modified. It holds two tables:
//!
//! - `station (id, station, name, latitude, longitude, elevation)`
//! - `measurement (id, station, date, prcp, tobs)` where `date` is `yyyy-mm-dd` text
//!
//! Query functions take a borrowed [`Connection`] and return `anyhow::Result`,
//! leaving connection ownership to the caller.

pub mod measurements;
pub mod stations;

#[cfg(test)]
pub(crate) mod fixture;

use anyhow::{bail, Context, Result};
use rusqlite::{Connection, OpenFlags};
use std::path::Path;

/// Tables the service reads from. Their schema is assumed, not created.
pub const REQUIRED_TABLES: [&str; 2] = ["station", "measurement"];

/// Open the dataset read-only and check that the expected tables exist.
pub fn open_readonly(db_path: &Path) -> Result<Connection> {
    if !db_path.exists() {
        bail!("dataset not found at {}", db_path.display());
    }

    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open dataset {}", db_path.display()))?;

    check_schema(&conn)?;
    Ok(conn)
}

/// Fail if any of [`REQUIRED_TABLES`] is missing.
pub fn check_schema(conn: &Connection) -> Result<()> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;

    for table in REQUIRED_TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            bail!("dataset is missing the `{table}` table");
        }
    }
    Ok(())
}
