//! Database drivers implementing the [`Connection`](crate::core::Connection) trait.
//!
//! - [`SqliteConnection`]: embedded databases and tests (sqlx)
//! - [`PostgresConnection`]: PostgreSQL targets (tokio-postgres)

mod postgres;
mod sqlite;

pub use postgres::PostgresConnection;
pub use sqlite::SqliteConnection;

/// Build an INSERT statement from already-quoted column names.
///
/// An empty column list produces `INSERT INTO t DEFAULT VALUES` so the
/// insert is still attempted, never skipped. `placeholder` renders the
/// 1-based parameter marker for the driver (`?` or `$n`).
fn insert_sql(
    quoted_table: &str,
    quoted_columns: &[&str],
    placeholder: impl Fn(usize) -> String,
) -> String {
    if quoted_columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", quoted_table);
    }

    let params = (1..=quoted_columns.len())
        .map(placeholder)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quoted_table,
        quoted_columns.join(", "),
        params
    )
}
