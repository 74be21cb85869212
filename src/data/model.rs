use std::fmt;

use anyhow::{Result, bail};

// ---------------------------------------------------------------------------
// CellValue – a single cell of the table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) if v.is_finite() && v.fract() == 0.0 => write!(f, "{v:.1}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "NaN"),
        }
    }
}

impl CellValue {
    /// Interpret the value as an `f64`; only numeric cells qualify.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// ColumnKind – the single inferred type of a column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
}

impl ColumnKind {
    pub fn is_numeric(self) -> bool {
        matches!(self, ColumnKind::Integer | ColumnKind::Float)
    }

    /// Infer the narrowest kind that fits every non-missing raw cell.
    ///
    /// Integer ⊂ Float, then Bool, then Text as the fallback. A column made
    /// only of missing cells is Text.
    pub fn infer<'a>(raw: impl IntoIterator<Item = &'a str> + Clone) -> Self {
        let non_empty = || raw.clone().into_iter().map(str::trim).filter(|s| !is_missing(s));
        if non_empty().next().is_none() {
            return ColumnKind::Text;
        }

        if non_empty().all(|s| s.parse::<i64>().is_ok()) {
            ColumnKind::Integer
        } else if non_empty().all(|s| s.parse::<f64>().is_ok()) {
            ColumnKind::Float
        } else if non_empty().all(|s| parse_bool(s).is_some()) {
            ColumnKind::Bool
        } else {
            ColumnKind::Text
        }
    }

    /// Convert a raw cell according to this kind. Missing cells become `Null`.
    pub fn parse(self, raw: &str) -> CellValue {
        let trimmed = raw.trim();
        if is_missing(trimmed) {
            return CellValue::Null;
        }
        match self {
            ColumnKind::Integer => trimmed
                .parse()
                .map(CellValue::Integer)
                .unwrap_or(CellValue::Null),
            ColumnKind::Float => trimmed
                .parse()
                .map(CellValue::Float)
                .unwrap_or(CellValue::Null),
            ColumnKind::Bool => parse_bool(trimmed)
                .map(CellValue::Bool)
                .unwrap_or(CellValue::Null),
            ColumnKind::Text => CellValue::Text(raw.to_string()),
        }
    }
}

/// Markers read as missing values, the same set pandas' `read_csv` uses.
const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(s: &str) -> bool {
    MISSING_MARKERS.contains(&s)
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Column / Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// One named column holding values of a single kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub kind: ColumnKind,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Build a column from raw text cells, inferring its kind.
    pub fn from_raw(name: impl Into<String>, raw: &[String]) -> Self {
        let kind = ColumnKind::infer(raw.iter().map(String::as_str));
        let values = raw.iter().map(|s| kind.parse(s)).collect();
        Self::new(name, kind, values)
    }
}

/// An ordered sequence of equally long named columns with stable row order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: usize,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let rows = columns.first().map_or(0, |c| c.values.len());
        for col in &columns {
            if col.values.len() != rows {
                bail!(
                    "column '{}' has {} values but '{}' has {rows}",
                    col.name,
                    col.values.len(),
                    columns[0].name
                );
            }
        }
        Ok(Self { columns, rows })
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Whether the dataset has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellValue> {
        self.columns.get(column)?.values.get(row)
    }

    /// Numeric values of `column` at `rows`, skipping nulls and NaN.
    ///
    /// Returns `None` when the column does not exist; callers check the
    /// column kind before relying on the result.
    pub fn numeric_values<'a>(
        &'a self,
        column: &str,
        rows: impl IntoIterator<Item = usize> + 'a,
    ) -> Option<impl Iterator<Item = f64> + 'a> {
        let col = self.column(column)?;
        Some(
            rows.into_iter()
                .filter_map(move |r| col.values.get(r))
                .filter_map(CellValue::as_f64)
                .filter(|v| !v.is_nan()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn infers_integer_float_bool_and_text() {
        assert_eq!(ColumnKind::infer(["1", "2", "-3"]), ColumnKind::Integer);
        assert_eq!(ColumnKind::infer(["1", "2.5"]), ColumnKind::Float);
        assert_eq!(ColumnKind::infer(["True", "false"]), ColumnKind::Bool);
        assert_eq!(ColumnKind::infer(["1", "abc"]), ColumnKind::Text);
        assert_eq!(ColumnKind::infer(["", " "]), ColumnKind::Text);
    }

    #[test]
    fn empty_cells_do_not_change_the_kind() {
        let col = Column::from_raw("Group_1", &raw(&["1", "", "3"]));
        assert_eq!(col.kind, ColumnKind::Integer);
        assert_eq!(
            col.values,
            vec![CellValue::Integer(1), CellValue::Null, CellValue::Integer(3)]
        );
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let a = Column::from_raw("a", &raw(&["1", "2"]));
        let b = Column::from_raw("b", &raw(&["1"]));
        assert!(Dataset::new(vec![a, b]).is_err());
    }

    #[test]
    fn numeric_values_skip_nulls_and_missing_rows() {
        let ds = Dataset::new(vec![Column::from_raw("g", &raw(&["1", "", "4.5"]))]).unwrap();
        let values: Vec<f64> = ds.numeric_values("g", [0, 1, 2, 9]).unwrap().collect();
        assert_eq!(values, vec![1.0, 4.5]);
        assert!(ds.numeric_values("missing", [0]).is_none());
    }

    #[test]
    fn missing_markers_are_null_and_do_not_force_text() {
        let col = Column::from_raw("Group_1", &raw(&["1", "NaN", "NA", "n/a", "null", "3"]));
        assert_eq!(col.kind, ColumnKind::Integer);
        assert_eq!(col.values.iter().filter(|v| v.is_null()).count(), 4);

        let floats = Column::from_raw("Group_2", &raw(&["1.5", "nan", "#N/A"]));
        assert_eq!(floats.kind, ColumnKind::Float);
        assert_eq!(floats.values[1], CellValue::Null);

        assert_eq!(ColumnKind::infer(["NA", "None"]), ColumnKind::Text);
    }

    #[test]
    fn nan_floats_are_skipped_by_numeric_values() {
        let ds = Dataset::new(vec![Column::new(
            "g",
            ColumnKind::Float,
            vec![CellValue::Float(1.0), CellValue::Float(f64::NAN), CellValue::Float(3.0)],
        )])
        .unwrap();
        let values: Vec<f64> = ds.numeric_values("g", 0..3).unwrap().collect();
        assert_eq!(values, vec![1.0, 3.0]);
    }
}
