//! Export per-interval SQLite databases into Excel workbooks.
//!
//! Every interval `n` names a database `{prefix}_{n}days.db` in the working
//! directory and an output workbook `{prefix}_{n}days.xlsx` next to it. Each
//! table of the database becomes one sheet, in catalogue order.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags};
use rust_xlsxwriter::{Workbook, Worksheet};

pub const DEFAULT_PREFIX: &str = "fangraph";

/// Where to look for databases and which intervals to export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    pub directory: PathBuf,
    pub prefix: String,
    pub intervals: Vec<u32>,
}

impl ExportConfig {
    pub fn new(directory: impl Into<PathBuf>, intervals: Vec<u32>) -> Self {
        Self {
            directory: directory.into(),
            prefix: DEFAULT_PREFIX.to_string(),
            intervals,
        }
    }

    pub fn database_path(&self, interval: u32) -> PathBuf {
        self.directory
            .join(format!("{}_{interval}days.db", self.prefix))
    }

    pub fn workbook_path(&self, interval: u32) -> PathBuf {
        self.directory
            .join(format!("{}_{interval}days.xlsx", self.prefix))
    }

    /// Glob matching every workbook this exporter could have produced.
    pub fn stale_pattern(&self) -> String {
        let dir = glob::Pattern::escape(&self.directory.to_string_lossy());
        let prefix = glob::Pattern::escape(&self.prefix);
        format!("{dir}/{prefix}_*days.xlsx")
    }
}

/// One written sheet: its name and the size of the copied table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetReport {
    pub name: String,
    pub columns: usize,
    pub rows: usize,
}

/// Result of exporting one interval.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub interval: u32,
    pub workbook: PathBuf,
    pub sheets: Vec<SheetReport>,
}

/// Remove every previously generated workbook before a run.
pub fn remove_stale_workbooks(config: &ExportConfig) -> Result<Vec<PathBuf>> {
    let pattern = config.stale_pattern();
    let mut removed = Vec::new();

    for entry in glob::glob(&pattern).with_context(|| format!("bad glob pattern {pattern}"))? {
        let path = entry.context("scanning for stale workbooks")?;
        if !path.is_file() || !is_generated_workbook(config, &path) {
            continue;
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("removing {}", path.display()))?;
        log::debug!("Removed {}", path.display());
        removed.push(path);
    }

    Ok(removed)
}

/// Table names in catalogue order.
pub fn list_tables(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table'")
        .context("listing tables")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("listing tables")?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("reading table names")?;
    Ok(names)
}

/// Export every table of the interval's database as a sheet of its workbook.
pub fn export_interval(config: &ExportConfig, interval: u32) -> Result<ExportReport> {
    let db_path = config.database_path(interval);
    let workbook_path = config.workbook_path(interval);

    // Read-only: a missing database is an error, never created empty.
    let conn = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
        .with_context(|| format!("opening database {}", db_path.display()))?;

    let tables = list_tables(&conn)?;
    log::info!(
        "{}: {} tables {:?}",
        db_path.display(),
        tables.len(),
        tables
    );

    let mut workbook = Workbook::new();
    let mut sheets = Vec::with_capacity(tables.len());

    for table in &tables {
        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(table)
            .with_context(|| format!("naming sheet '{table}'"))?;
        let report = copy_table(&conn, table, worksheet)
            .with_context(|| format!("copying table '{table}' from {}", db_path.display()))?;
        log::debug!(
            "Sheet '{}': {} columns, {} rows",
            report.name,
            report.columns,
            report.rows
        );
        sheets.push(report);
    }

    workbook
        .save(&workbook_path)
        .with_context(|| format!("writing {}", workbook_path.display()))?;
    log::info!("Wrote {}", workbook_path.display());

    Ok(ExportReport {
        interval,
        workbook: workbook_path,
        sheets,
    })
}

/// Copy `SELECT *` of `table` into `worksheet`: header row first, no index.
fn copy_table(conn: &Connection, table: &str, worksheet: &mut Worksheet) -> Result<SheetReport> {
    let sql = format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""));
    let mut stmt = conn.prepare(&sql)?;

    let columns: Vec<String> = stmt
        .column_names()
        .into_iter()
        .map(str::to_string)
        .collect();
    for (col, name) in columns.iter().enumerate() {
        worksheet.write_string(0, col as u16, name)?;
    }

    let mut rows = stmt.query([])?;
    let mut row_no: u32 = 0;
    while let Some(row) = rows.next()? {
        row_no += 1;
        for col in 0..columns.len() {
            let col_no = col as u16;
            match row.get_ref(col)? {
                ValueRef::Null => {}
                ValueRef::Integer(n) => {
                    worksheet.write_number(row_no, col_no, n as f64)?;
                }
                ValueRef::Real(f) => {
                    worksheet.write_number(row_no, col_no, f)?;
                }
                ValueRef::Text(s) => {
                    worksheet.write_string(row_no, col_no, String::from_utf8_lossy(s))?;
                }
                ValueRef::Blob(b) => {
                    worksheet.write_string(row_no, col_no, String::from_utf8_lossy(b))?;
                }
            }
        }
    }

    Ok(SheetReport {
        name: table.to_string(),
        columns: columns.len(),
        rows: row_no as usize,
    })
}

/// Remove stale workbooks, then export every interval in order.
///
/// The first failure aborts the run.
pub fn run(config: &ExportConfig) -> Result<Vec<ExportReport>> {
    log::info!("Remove files");
    let removed = remove_stale_workbooks(config)?;
    if !removed.is_empty() {
        log::info!("Removed {} stale workbook(s)", removed.len());
    }

    config
        .intervals
        .iter()
        .map(|&interval| {
            export_interval(config, interval)
                .with_context(|| format!("exporting interval {interval}"))
        })
        .collect()
}

/// True when `path` has the naming pattern of an exported workbook.
pub fn is_generated_workbook(config: &ExportConfig, path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.strip_prefix(&format!("{}_", config.prefix))
        .and_then(|rest| rest.strip_suffix("days.xlsx"))
        .is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_db(config: &ExportConfig, interval: u32, tables: &[(&str, usize)]) {
        let conn = Connection::open(config.database_path(interval)).unwrap();
        for (name, rows) in tables {
            conn.execute(
                &format!("CREATE TABLE \"{name}\" (player TEXT, games INTEGER, avg REAL)"),
                [],
            )
            .unwrap();
            for i in 0..*rows {
                conn.execute(
                    &format!("INSERT INTO \"{name}\" VALUES (?1, ?2, ?3)"),
                    rusqlite::params![format!("p{i}"), i as i64, i as f64 / 10.0],
                )
                .unwrap();
            }
        }
    }

    #[test]
    fn naming_follows_interval_pattern() {
        let config = ExportConfig::new("/data", vec![7]);
        assert_eq!(config.database_path(7), PathBuf::from("/data/fangraph_7days.db"));
        assert_eq!(config.workbook_path(7), PathBuf::from("/data/fangraph_7days.xlsx"));
        assert!(is_generated_workbook(&config, Path::new("fangraph_365days.xlsx")));
        assert!(!is_generated_workbook(&config, Path::new("fangraph_7days.db")));
        assert!(!is_generated_workbook(&config, Path::new("other_7days.xlsx")));
    }

    #[test]
    fn exports_one_sheet_per_table_in_catalogue_order() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::new(dir.path(), vec![7, 14]);
        make_db(&config, 7, &[("batting", 3), ("pitching", 0), ("fielding", 2)]);
        make_db(&config, 14, &[("batting", 5)]);

        let reports = run(&config).unwrap();
        assert_eq!(reports.len(), 2);

        let names: Vec<&str> = reports[0].sheets.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["batting", "pitching", "fielding"]);
        assert_eq!(
            reports[0].sheets[0],
            SheetReport {
                name: "batting".into(),
                columns: 3,
                rows: 3
            }
        );
        assert_eq!(reports[0].sheets[1].rows, 0);
        assert_eq!(reports[1].sheets[0].rows, 5);

        assert!(config.workbook_path(7).is_file());
        assert!(config.workbook_path(14).is_file());
    }

    fn sheet_cells(path: &Path, sheet: &str) -> Vec<Vec<String>> {
        use calamine::{Reader, Xlsx, open_workbook};

        let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
        let range = workbook.worksheet_range(sheet).unwrap();
        assert_eq!(range.start(), Some((0, 0)), "sheet '{sheet}' must start at A1");
        range
            .rows()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect()
    }

    #[test]
    fn workbook_holds_header_then_rows_without_index_column() {
        use calamine::{Reader, Xlsx, open_workbook};

        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::new(dir.path(), vec![7]);
        make_db(&config, 7, &[("batting", 3)]);
        Connection::open(config.database_path(7))
            .unwrap()
            .execute_batch(
                "CREATE TABLE notes (name TEXT, score REAL, flag INTEGER);
                 INSERT INTO notes VALUES ('a', NULL, 1);",
            )
            .unwrap();

        let report = export_interval(&config, 7).unwrap();

        let workbook: Xlsx<_> = open_workbook(&report.workbook).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["batting", "notes"]);

        let batting = sheet_cells(&report.workbook, "batting");
        assert_eq!(
            batting,
            vec![
                vec!["player", "games", "avg"],
                vec!["p0", "0", "0"],
                vec!["p1", "1", "0.1"],
                vec!["p2", "2", "0.2"],
            ]
        );

        let notes = sheet_cells(&report.workbook, "notes");
        assert_eq!(notes, vec![vec!["name", "score", "flag"], vec!["a", "", "1"]]);
    }

    #[test]
    fn stale_workbooks_are_removed_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::new(dir.path(), vec![7]);
        make_db(&config, 7, &[("batting", 1)]);

        let stale = config.workbook_path(365);
        std::fs::write(&stale, b"old").unwrap();
        let unrelated = dir.path().join("notes.xlsx");
        std::fs::write(&unrelated, b"keep").unwrap();

        run(&config).unwrap();

        assert!(!stale.exists());
        assert!(unrelated.exists());
        assert!(config.workbook_path(7).is_file());
    }

    #[test]
    fn missing_database_aborts_without_creating_it() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExportConfig::new(dir.path(), vec![30]);

        let err = run(&config).unwrap_err();
        assert!(format!("{err:#}").contains("fangraph_30days.db"), "{err:#}");
        assert!(!config.database_path(30).exists());
        assert!(!config.workbook_path(30).exists());
    }

    #[test]
    fn list_tables_reads_the_catalogue() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE b (x); CREATE TABLE a (y); CREATE VIEW v AS SELECT 1;")
            .unwrap();
        assert_eq!(list_tables(&conn).unwrap(), vec!["b", "a"]);
    }
}
