//! Small Hawaii-shaped dataset for tests.
//!
//! Latest date is 2017-08-23, so the one-year window opens on 2016-08-23.
//! `USC00519281` has the most rows (6). Row 9 has a null `prcp`, and
//! 2016-08-23, 2017-01-01 and 2017-01-05 each appear under two stations.

use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const LATEST_DATE: &str = "2017-08-23";
pub const EARLIEST_DATE: &str = "2010-01-01";
pub const WINDOW_START: &str = "2016-08-23";
pub const MOST_ACTIVE: &str = "USC00519281";

const SCHEMA: &str = "
    CREATE TABLE station (
        id INTEGER PRIMARY KEY,
        station TEXT,
        name TEXT,
        latitude FLOAT,
        longitude FLOAT,
        elevation FLOAT
    );
    CREATE TABLE measurement (
        id INTEGER PRIMARY KEY,
        station TEXT,
        date TEXT,
        prcp FLOAT,
        tobs FLOAT
    );";

const STATIONS: [(&str, &str); 3] = [
    ("USC00519397", "WAIKIKI 717.2, HI US"),
    ("USC00519281", "WAIHEE 837.5, HI US"),
    ("USC00513117", "KANEOHE 838.1, HI US"),
];

pub const MEASUREMENTS: [(&str, &str, Option<f64>, f64); 13] = [
    ("USC00519397", "2010-01-01", Some(0.08), 65.0),
    ("USC00519397", "2016-08-22", Some(0.10), 79.0),
    ("USC00519397", "2016-08-23", Some(0.00), 81.0),
    ("USC00519397", "2017-01-01", Some(0.00), 62.0),
    ("USC00519397", "2017-08-23", Some(0.00), 81.0),
    ("USC00519281", "2010-01-01", Some(0.15), 70.0),
    ("USC00519281", "2016-08-23", Some(1.79), 77.0),
    ("USC00519281", "2017-01-01", Some(0.29), 72.0),
    ("USC00519281", "2017-01-03", None, 68.0),
    ("USC00519281", "2017-01-05", Some(0.00), 66.0),
    ("USC00519281", "2017-08-18", Some(0.06), 79.0),
    ("USC00513117", "2017-01-02", Some(0.02), 70.0),
    ("USC00513117", "2017-01-05", Some(0.03), 74.0),
];

/// Create the schema and insert the sample rows in order.
pub fn seed(conn: &Connection) {
    conn.execute_batch(SCHEMA).unwrap();
    for (name, label) in STATIONS {
        conn.execute(
            "INSERT INTO station (station, name) VALUES (?1, ?2)",
            (name, label),
        )
        .unwrap();
    }
    for (station, date, prcp, tobs) in MEASUREMENTS {
        conn.execute(
            "INSERT INTO measurement (station, date, prcp, tobs) VALUES (?1, ?2, ?3, ?4)",
            (station, date, prcp, tobs),
        )
        .unwrap();
    }
}

pub fn in_memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    seed(&conn);
    conn
}

/// Write the sample dataset to `dir/hawaii.sqlite` and return its path.
pub fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("hawaii.sqlite");
    let conn = Connection::open(&path).unwrap();
    seed(&conn);
    path
}
