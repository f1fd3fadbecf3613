//! In-memory SQLite feature store for incident and region data.
//!
//! This crate stands in for the remote feature service behind the dashboard:
//! it loads CSV fixtures into an in-memory SQLite database and executes the
//! grouped-count query specifications built by `mim-core`, including spatial
//! constraints and point-in-region hit testing.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in a
//!   single-threaded event-driven host
//! - In-memory SQLite via `rusqlite`
//! - CSV fixtures loaded from strings (callers typically `include_str!` or
//!   read them from disk)
//! - Implements `mim_core::source::FeatureSource`, so a `Database` can be
//!   plugged directly into a `DashboardSession`
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.
//!
//! - `regions` - Region metadata and geometry (the hit-test layer)
//! - `incidents` - Point incidents with a derived month attribute
//!
//! Grouped month counts are derived on-the-fly via SQL `GROUP BY month`
//! queries against the incidents table; spatially constrained counts refine
//! a bounding-box pre-filter with exact geometry containment.

pub mod schema;
mod loader;
mod queries;
pub mod models;

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite store wrapping incident and region data.
///
/// Cheaply cloneable (via `Rc`); all clones share the same connection.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    ///
    /// The database is empty after creation; use the `load_*` methods to
    /// populate it with CSV fixtures.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}
