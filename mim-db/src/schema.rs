//! SQL schema definitions for the in-memory feature store.
//!
//! Contains CREATE TABLE statements for the region and incident tables.
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// This creates the following tables:
///
/// - `regions` - Region metadata (id, name) and geometry as JSON text;
///   the hit-test layer for pointer events
/// - `incidents` - Point incidents (id, owning region, calendar date, the
///   month label derived from it, and x/y map coordinates)
///
/// Grouped month counts are derived on-the-fly via SQL `GROUP BY month`
/// against the incidents table.
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS regions (
        region_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        geometry TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS incidents (
        incident_id INTEGER PRIMARY KEY,
        region_id INTEGER,
        date TEXT NOT NULL,
        month TEXT NOT NULL,
        x REAL NOT NULL,
        y REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_incidents_month ON incidents(month);
    CREATE INDEX IF NOT EXISTS idx_incidents_xy ON incidents(x, y);

    "#
}
