//! Queries over the `measurement` table.
//!
//! Dates are compared as `yyyy-mm-dd` text, which orders the same way as the
//! calendar. Caller-supplied bounds are bound verbatim.

use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

/// Most recent `date`, or `None` for an empty table.
pub fn latest_date(conn: &Connection) -> Result<Option<String>> {
    let date = conn.query_row("SELECT MAX(date) FROM measurement", [], |row| row.get(0))?;
    Ok(date)
}

/// Oldest `date`, or `None` for an empty table.
pub fn earliest_date(conn: &Connection) -> Result<Option<String>> {
    let date = conn.query_row("SELECT MIN(date) FROM measurement", [], |row| row.get(0))?;
    Ok(date)
}

/// Station with the most measurement rows, with its row count.
///
/// Equal counts resolve to whichever group SQLite yields first.
pub fn most_active_station(conn: &Connection) -> Result<Option<(String, i64)>> {
    let mut stmt = conn.prepare(
        "SELECT station, COUNT(id) AS n
         FROM measurement
         GROUP BY station
         ORDER BY n DESC
         LIMIT 1",
    )?;

    let result = stmt
        .query_row([], |row| Ok((row.get(0)?, row.get(1)?)))
        .optional()?;
    Ok(result)
}

/// `(date, prcp)` pairs with `date >= since`, in row order.
pub fn precipitation_since(conn: &Connection, since: &str) -> Result<Vec<(String, Option<f64>)>> {
    let mut stmt = conn.prepare("SELECT date, prcp FROM measurement WHERE date >= ?1")?;
    let rows = stmt
        .query_map(params![since], |row| Ok((row.get(0)?, row.get(1)?)))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// `tobs` values for one station with `date >= since`, in row order.
pub fn tobs_for_station_since(
    conn: &Connection,
    station: &str,
    since: &str,
) -> Result<Vec<Option<f64>>> {
    let mut stmt =
        conn.prepare("SELECT tobs FROM measurement WHERE station = ?1 AND date >= ?2")?;
    let rows = stmt
        .query_map(params![station, since], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(rows)
}

/// Min, max and mean of `tobs` over `start <= date <= end`.
///
/// All three are `None` when no row matches, including when `start > end`.
pub fn temperature_stats(
    conn: &Connection,
    start: &str,
    end: &str,
) -> Result<(Option<f64>, Option<f64>, Option<f64>)> {
    let stats = conn.query_row(
        "SELECT MIN(tobs), MAX(tobs), AVG(tobs)
         FROM measurement
         WHERE date >= ?1 AND date <= ?2",
        params![start, end],
        |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
    )?;
    Ok(stats)
}
