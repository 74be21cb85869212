use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, BooleanArray, Float64Array, Int64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use thiserror::Error;

use super::model::{CellValue, Column, ColumnKind, Dataset};
use super::selection::Selection;

#[derive(Debug, Error, PartialEq)]
pub enum SummaryError {
    #[error("column '{0}' not found in the loaded data")]
    MissingColumn(String),

    #[error("column '{0}' is not numeric")]
    NotNumeric(String),

    #[error("could not render selection: {0}")]
    Render(String),
}

// ---------------------------------------------------------------------------
// Group columns
// ---------------------------------------------------------------------------

/// The two numeric columns whose selected values are averaged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupColumns {
    pub first: String,
    pub second: String,
}

impl Default for GroupColumns {
    fn default() -> Self {
        Self {
            first: "Group_1".to_string(),
            second: "Group_2".to_string(),
        }
    }
}

impl GroupColumns {
    pub fn names(&self) -> [&str; 2] {
        [&self.first, &self.second]
    }
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Mean of one group column over the selected rows.
///
/// `mean` is `None` when every selected cell in the column is null.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub column: String,
    pub mean: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionSummary {
    NoSelection,
    Rows {
        indices: Vec<usize>,
        /// Pretty-printed grid of the selected rows.
        table: String,
        means: Vec<GroupMean>,
    },
}

impl SelectionSummary {
    pub fn means(&self) -> &[GroupMean] {
        match self {
            SelectionSummary::NoSelection => &[],
            SelectionSummary::Rows { means, .. } => means,
        }
    }
}

impl fmt::Display for SelectionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionSummary::NoSelection => write!(f, "No rows selected."),
            SelectionSummary::Rows { table, means, .. } => {
                write!(f, "{table}\n\n----Selected Averages----")?;
                for m in means {
                    match m.mean {
                        Some(v) => write!(f, "\nAverage {} : {v:.6}", m.column)?,
                        None => write!(f, "\nAverage {} : n/a", m.column)?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Summarise the selected rows of `dataset`: a grid of those rows plus the
/// mean of each group column.
///
/// Group columns are validated even when nothing is selected, so a dataset
/// without them is reported as soon as it is inspected.
pub fn summarize(
    dataset: &Dataset,
    selection: &Selection,
    groups: &GroupColumns,
) -> Result<SelectionSummary, SummaryError> {
    for name in groups.names() {
        let col = dataset
            .column(name)
            .ok_or_else(|| SummaryError::MissingColumn(name.to_string()))?;
        if !col.kind.is_numeric() {
            return Err(SummaryError::NotNumeric(name.to_string()));
        }
    }

    if selection.is_empty() {
        return Ok(SelectionSummary::NoSelection);
    }

    let indices = selection.indices();
    let means = groups
        .names()
        .iter()
        .map(|name| GroupMean {
            column: name.to_string(),
            mean: dataset
                .numeric_values(name, indices.iter().copied())
                .and_then(mean),
        })
        .collect();

    let table = render_rows(dataset, &indices)?;

    Ok(SelectionSummary::Rows {
        indices,
        table,
        means,
    })
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

// ---------------------------------------------------------------------------
// Rendering via Arrow pretty printer
// ---------------------------------------------------------------------------

/// Render the rows at `indices` (all columns) as a text grid, with a leading
/// `row` column carrying the original row index.
pub fn render_rows(dataset: &Dataset, indices: &[usize]) -> Result<String, SummaryError> {
    let mut fields = vec![Field::new("row", DataType::UInt64, false)];
    let mut arrays: Vec<ArrayRef> = vec![Arc::new(UInt64Array::from(
        indices.iter().map(|&i| i as u64).collect::<Vec<_>>(),
    ))];

    for col in dataset.columns() {
        let (field, array) = column_slice(col, indices);
        fields.push(field);
        arrays.push(array);
    }

    let batch = RecordBatch::try_new(Arc::new(Schema::new(fields)), arrays)
        .map_err(|e| SummaryError::Render(e.to_string()))?;

    pretty_format_batches(&[batch])
        .map(|table| table.to_string())
        .map_err(|e| SummaryError::Render(e.to_string()))
}

fn column_slice(col: &Column, indices: &[usize]) -> (Field, ArrayRef) {
    let cells = indices.iter().map(|&i| col.values.get(i));

    let (data_type, array): (DataType, ArrayRef) = match col.kind {
        ColumnKind::Integer => (
            DataType::Int64,
            Arc::new(Int64Array::from(
                cells
                    .map(|c| match c {
                        Some(CellValue::Integer(i)) => Some(*i),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )),
        ),
        ColumnKind::Float => (
            DataType::Float64,
            Arc::new(Float64Array::from(
                cells.map(|c| c.and_then(CellValue::as_f64)).collect::<Vec<_>>(),
            )),
        ),
        ColumnKind::Bool => (
            DataType::Boolean,
            Arc::new(BooleanArray::from(
                cells
                    .map(|c| match c {
                        Some(CellValue::Bool(b)) => Some(*b),
                        _ => None,
                    })
                    .collect::<Vec<_>>(),
            )),
        ),
        ColumnKind::Text => (
            DataType::Utf8,
            Arc::new(StringArray::from(
                cells
                    .map(|c| c.filter(|c| !c.is_null()).map(ToString::to_string))
                    .collect::<Vec<_>>(),
            )),
        ),
    };

    (Field::new(col.name.clone(), data_type, true), array)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups_dataset() -> Dataset {
        let ints = |v: &[i64]| -> Vec<CellValue> { v.iter().map(|&i| CellValue::Integer(i)).collect() };
        Dataset::new(vec![
            Column::new("Group_1", ColumnKind::Integer, ints(&[1, 2, 3])),
            Column::new("Group_2", ColumnKind::Integer, ints(&[10, 20, 30])),
            Column::new(
                "Label",
                ColumnKind::Text,
                vec![
                    CellValue::Text("a".into()),
                    CellValue::Text("b".into()),
                    CellValue::Null,
                ],
            ),
        ])
        .unwrap()
    }

    fn selection(rows: &[usize]) -> Selection {
        let mut sel = Selection::new(3);
        sel.set(rows.iter().copied());
        sel
    }

    #[test]
    fn means_of_selected_rows() {
        let ds = groups_dataset();
        let summary = summarize(&ds, &selection(&[0, 1]), &GroupColumns::default()).unwrap();

        let means: Vec<_> = summary.means().iter().map(|m| m.mean).collect();
        assert_eq!(means, vec![Some(1.5), Some(15.0)]);
    }

    #[test]
    fn every_subset_matches_the_arithmetic_mean() {
        let ds = groups_dataset();
        let g1 = [1.0, 2.0, 3.0];
        for mask in 1u8..8 {
            let rows: Vec<usize> = (0..3).filter(|i| mask & (1 << i) != 0).collect();
            let expected = rows.iter().map(|&i| g1[i]).sum::<f64>() / rows.len() as f64;

            let summary = summarize(&ds, &selection(&rows), &GroupColumns::default()).unwrap();
            let got = summary.means()[0].mean.unwrap();
            assert!((got - expected).abs() < 1e-12, "rows {rows:?}: {got} != {expected}");
        }
    }

    #[test]
    fn report_text_lists_rows_and_averages() {
        let ds = groups_dataset();
        let text = summarize(&ds, &selection(&[0, 1]), &GroupColumns::default())
            .unwrap()
            .to_string();

        assert!(text.contains("----Selected Averages----"), "{text}");
        assert!(text.contains("Average Group_1 : 1.500000"), "{text}");
        assert!(text.contains("Average Group_2 : 15.000000"), "{text}");
        assert!(text.contains("Label"), "{text}");
        assert!(text.contains("| b "), "{text}");
        assert!(!text.contains("| 30 "), "{text}");
    }

    #[test]
    fn empty_selection_reports_no_selection_instead_of_nan() {
        let ds = groups_dataset();
        let summary = summarize(&ds, &selection(&[]), &GroupColumns::default()).unwrap();
        assert_eq!(summary, SelectionSummary::NoSelection);
        assert_eq!(summary.to_string(), "No rows selected.");
    }

    #[test]
    fn missing_or_text_group_column_is_an_error() {
        let ds = groups_dataset();
        let missing = GroupColumns {
            first: "Group_1".into(),
            second: "Group_3".into(),
        };
        assert_eq!(
            summarize(&ds, &selection(&[0]), &missing),
            Err(SummaryError::MissingColumn("Group_3".into()))
        );

        let text = GroupColumns {
            first: "Label".into(),
            second: "Group_2".into(),
        };
        assert_eq!(
            summarize(&ds, &selection(&[0]), &text),
            Err(SummaryError::NotNumeric("Label".into()))
        );
    }

    #[test]
    fn all_null_group_values_render_as_not_available() {
        let ds = Dataset::new(vec![
            Column::new("Group_1", ColumnKind::Float, vec![CellValue::Null, CellValue::Float(2.0)]),
            Column::new("Group_2", ColumnKind::Float, vec![CellValue::Float(4.0), CellValue::Null]),
        ])
        .unwrap();
        let mut sel = Selection::new(2);
        sel.set([0]);

        let text = summarize(&ds, &sel, &GroupColumns::default()).unwrap().to_string();
        assert!(text.contains("Average Group_1 : n/a"), "{text}");
        assert!(text.contains("Average Group_2 : 4.000000"), "{text}");
    }
}
