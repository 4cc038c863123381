//! Building ID extraction from a metadata file.
//!
//! Parquet files are scanned with an in-memory DuckDB connection; only the
//! `bldg_id` column is read.

use super::{EussError, MetadataFormat};
use std::path::Path;

pub const BUILDING_ID_COLUMN: &str = "bldg_id";

/// Reads the `bldg_id` column of a metadata file in `format`, in file order.
pub fn read_building_ids(path: &Path, format: MetadataFormat) -> Result<Vec<String>, EussError> {
    match format {
        MetadataFormat::Csv => read_building_ids_csv(path),
        MetadataFormat::Parquet => read_building_ids_parquet(path),
    }
}

/// CSV variant. Blank cells are skipped.
pub fn read_building_ids_csv(path: &Path) -> Result<Vec<String>, EussError> {
    let csv_err = |source| EussError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .map_err(csv_err)?;
    let column = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .position(|h| h.trim() == BUILDING_ID_COLUMN)
        .ok_or_else(|| missing_column(path))?;

    let mut ids = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        if let Some(id) = record.get(column).map(str::trim).filter(|s| !s.is_empty()) {
            ids.push(id.to_string());
        }
    }
    Ok(ids)
}

/// Parquet variant. The pandas index of ResStock metadata is stored as the
/// `bldg_id` column. Nulls are skipped.
pub fn read_building_ids_parquet(path: &Path) -> Result<Vec<String>, EussError> {
    let db_err = |source| EussError::Parquet {
        path: path.to_path_buf(),
        source,
    };
    let conn = duckdb::Connection::open_in_memory().map_err(db_err)?;
    let file = sql_literal(&path.to_string_lossy());

    let has_column: i64 = conn
        .query_row(
            &format!(
                "SELECT count(*) FROM parquet_schema({}) WHERE name = '{}'",
                file, BUILDING_ID_COLUMN
            ),
            [],
            |row| row.get(0),
        )
        .map_err(db_err)?;
    if has_column == 0 {
        return Err(missing_column(path));
    }

    let query = format!(
        "SELECT CAST({col} AS VARCHAR) FROM read_parquet({file}) WHERE {col} IS NOT NULL",
        col = BUILDING_ID_COLUMN,
        file = file
    );
    let mut stmt = conn.prepare(&query).map_err(db_err)?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .map_err(db_err)?;
    rows.collect::<Result<Vec<String>, _>>().map_err(db_err)
}

fn missing_column(path: &Path) -> EussError {
    EussError::MissingColumn {
        path: path.to_path_buf(),
        column: BUILDING_ID_COLUMN.to_string(),
    }
}

/// Single-quoted SQL string literal.
fn sql_literal(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}

/// Writes a small ResStock-shaped metadata file: `bldg_id`, `upgrade`, `in.county`.
#[cfg(test)]
pub(crate) fn write_parquet_fixture(path: &Path, rows: &[(i64, &str)]) {
    let conn = duckdb::Connection::open_in_memory().unwrap();
    conn.execute_batch(r#"CREATE TABLE meta (bldg_id BIGINT, upgrade INTEGER, "in.county" VARCHAR);"#)
        .unwrap();
    for (id, county) in rows {
        conn.execute(
            "INSERT INTO meta VALUES (?, 0, ?)",
            duckdb::params![id, county],
        )
        .unwrap();
    }
    conn.execute_batch(&format!(
        "COPY meta TO {} (FORMAT PARQUET);",
        sql_literal(&path.to_string_lossy())
    ))
    .unwrap();
}
