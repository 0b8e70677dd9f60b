//! Climate query service.
//!
//! [`ClimateContext`] holds the values derived once at startup (latest date,
//! one-year window, most active station). [`ClimateService`] answers the four
//! read-only query shapes against the shared dataset connection using that
//! context. Nothing here is recomputed or invalidated after construction.

mod context;

pub use context::{ClimateContext, ClimateError, ONE_YEAR_DAYS};

use crate::store;
use anyhow::Result;
use parking_lot::Mutex;
use rusqlite::Connection;
use serde::Serialize;
use std::collections::BTreeMap;

/// `[min, max, avg]` of `tobs`; serialises as a three-element JSON array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemperatureSummary(pub [Option<f64>; 3]);

impl TemperatureSummary {
    pub fn min(&self) -> Option<f64> {
        self.0[0]
    }

    pub fn max(&self) -> Option<f64> {
        self.0[1]
    }

    pub fn avg(&self) -> Option<f64> {
        self.0[2]
    }

    pub fn is_empty(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

/// Query service over one shared read-only connection.
///
/// Queries run inline on the calling task and are serialised by the mutex.
/// Moving them onto `tokio::task::spawn_blocking` or a connection pool would
/// let concurrent requests read in parallel.
pub struct ClimateService {
    conn: Mutex<Connection>,
    context: ClimateContext,
}

impl ClimateService {
    /// Derive the startup context from `conn` and take ownership of it.
    pub fn new(conn: Connection, default_end_override: Option<String>) -> Result<Self> {
        let context = ClimateContext::derive(&conn, default_end_override)?;
        Ok(Self {
            conn: Mutex::new(conn),
            context,
        })
    }

    pub fn context(&self) -> &ClimateContext {
        &self.context
    }

    /// Precipitation by date over the last year.
    ///
    /// Rows sharing a date overwrite each other in retrieval order; the last
    /// one wins. Values are never summed or averaged.
    pub fn precipitation_last_year(&self) -> Result<BTreeMap<String, Option<f64>>> {
        let rows = {
            let conn = self.conn.lock();
            store::measurements::precipitation_since(&conn, &self.context.window_start())?
        };
        Ok(rows.into_iter().collect())
    }

    /// Station identifiers in retrieval order, not deduplicated.
    pub fn stations(&self) -> Result<Vec<String>> {
        let conn = self.conn.lock();
        store::stations::list_station_ids(&conn)
    }

    /// Temperature observations of the most active station over the last year.
    pub fn tobs_last_year(&self) -> Result<Vec<Option<f64>>> {
        let conn = self.conn.lock();
        store::measurements::tobs_for_station_since(
            &conn,
            &self.context.most_active_station,
            &self.context.window_start(),
        )
    }

    /// Min/max/avg temperature for `start <= date <= end`.
    ///
    /// `end` falls back to the context's default closing date. Bounds are not
    /// validated: malformed or inverted ranges yield `[null, null, null]`.
    pub fn temperature_summary(&self, start: &str, end: Option<&str>) -> Result<TemperatureSummary> {
        let end = end.unwrap_or(&self.context.default_end);
        let (min, max, avg) = {
            let conn = self.conn.lock();
            store::measurements::temperature_stats(&conn, start, end)?
        };
        let summary = TemperatureSummary([min, max, avg]);
        tracing::debug!(
            start,
            end,
            min = ?summary.min(),
            max = ?summary.max(),
            avg = ?summary.avg(),
            empty = summary.is_empty(),
            "temperature summary"
        );
        Ok(summary)
    }

    /// Number of rows in the `station` table.
    pub fn station_count(&self) -> Result<usize> {
        Ok(self.stations()?.len())
    }
}
