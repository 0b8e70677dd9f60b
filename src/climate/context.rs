use crate::store;
use chrono::{Duration, NaiveDate};
use rusqlite::Connection;

/// Length of the "last year" window, counted back from the latest date.
pub const ONE_YEAR_DAYS: i64 = 365;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, thiserror::Error)]
pub enum ClimateError {
    #[error("dataset has no measurements")]
    EmptyDataset,

    #[error("measurement date {0:?} is not yyyy-mm-dd")]
    InvalidDate(String),

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Values derived once from the dataset and reused for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateContext {
    pub latest_date: NaiveDate,
    /// Oldest stored date, kept as text. Only shown to clients.
    pub earliest_date: String,
    /// `latest_date - 365 days`; opens the last-year window (inclusive).
    pub one_year_ago: NaiveDate,
    /// Ties between equal row counts follow SQLite's grouping order.
    pub most_active_station: String,
    pub most_active_count: i64,
    /// Closing bound for open-ended temperature ranges.
    pub default_end: String,
}

impl ClimateContext {
    /// Run the startup queries. `default_end_override` pins the open-ended
    /// range bound to a literal instead of the latest date.
    pub fn derive(
        conn: &Connection,
        default_end_override: Option<String>,
    ) -> Result<Self, ClimateError> {
        let latest = store::measurements::latest_date(conn)?.ok_or(ClimateError::EmptyDataset)?;
        let earliest_date =
            store::measurements::earliest_date(conn)?.ok_or(ClimateError::EmptyDataset)?;
        let (most_active_station, most_active_count) =
            store::measurements::most_active_station(conn)?.ok_or(ClimateError::EmptyDataset)?;

        let latest_date = parse_date(&latest)?;
        let one_year_ago = latest_date - Duration::days(ONE_YEAR_DAYS);
        let default_end = default_end_override.unwrap_or(latest);

        tracing::info!(
            %latest_date,
            %one_year_ago,
            station = %most_active_station,
            rows = most_active_count,
            %default_end,
            "Derived climate context"
        );

        Ok(Self {
            latest_date,
            earliest_date,
            one_year_ago,
            most_active_station,
            most_active_count,
            default_end,
        })
    }

    /// Inclusive lower bound of the last-year window as stored text.
    pub fn window_start(&self) -> String {
        self.one_year_ago.format(DATE_FORMAT).to_string()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, ClimateError> {
    NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|_| ClimateError::InvalidDate(raw.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixture;

    #[test]
    fn derives_from_sample() {
        let conn = fixture::in_memory();
        let ctx = ClimateContext::derive(&conn, None).unwrap();

        assert_eq!(ctx.latest_date, NaiveDate::from_ymd_opt(2017, 8, 23).unwrap());
        assert_eq!(ctx.earliest_date, fixture::EARLIEST_DATE);
        assert_eq!(ctx.window_start(), fixture::WINDOW_START);
        assert_eq!(ctx.most_active_station, fixture::MOST_ACTIVE);
        assert_eq!(ctx.most_active_count, 6);
        assert_eq!(ctx.default_end, fixture::LATEST_DATE);
    }

    #[test]
    fn window_is_fixed_365_days_across_leap_year() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
             INSERT INTO measurement (station, date) VALUES ('A', '2016-03-01');",
        )
        .unwrap();

        let ctx = ClimateContext::derive(&conn, None).unwrap();
        assert_eq!(ctx.window_start(), "2015-03-02");
    }

    #[test]
    fn override_pins_default_end() {
        let conn = fixture::in_memory();
        let ctx = ClimateContext::derive(&conn, Some("2017-01-01".into())).unwrap();
        assert_eq!(ctx.default_end, "2017-01-01");
        assert_eq!(ctx.latest_date, NaiveDate::from_ymd_opt(2017, 8, 23).unwrap());
    }

    #[test]
    fn empty_dataset_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);",
        )
        .unwrap();

        assert!(matches!(
            ClimateContext::derive(&conn, None),
            Err(ClimateError::EmptyDataset)
        ));
    }

    #[test]
    fn malformed_earliest_date_does_not_block_startup() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
             INSERT INTO measurement (station, date) VALUES ('A', '1/1/2010');
             INSERT INTO measurement (station, date) VALUES ('A', '2017-08-23');",
        )
        .unwrap();

        let ctx = ClimateContext::derive(&conn, None).unwrap();
        assert_eq!(ctx.earliest_date, "1/1/2010");
        assert_eq!(ctx.latest_date, NaiveDate::from_ymd_opt(2017, 8, 23).unwrap());
    }

    #[test]
    fn unparseable_latest_date_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "CREATE TABLE measurement (id INTEGER PRIMARY KEY, station TEXT, date TEXT, prcp FLOAT, tobs FLOAT);
             INSERT INTO measurement (station, date) VALUES ('A', '23/08/2017');",
        )
        .unwrap();

        assert!(matches!(
            ClimateContext::derive(&conn, None),
            Err(ClimateError::InvalidDate(_))
        ));
    }
}
