// Primitives for reading CSV files.

use std::fs::File;

use crate::vote::{
    io_common::{parse_cell, simplify_file_name},
    *,
};

pub fn read_csv_valuations(path: String, cfs: &FileSource) -> BVoteResult<Vec<Vec<f64>>> {
    let file_name = simplify_file_name(&path);
    let first_col = cfs.first_value_column_index()?;

    let mut res: Vec<Vec<f64>> = Vec::new();
    let (records, row_offset) = get_records(&path, cfs)?;

    for (idx, line_r) in records.enumerate() {
        let lineno = idx + row_offset + 1;
        let line = line_r.context(CsvLineParseSnafu {})?;
        let cells: Vec<&str> = line.iter().skip(first_col).collect();
        if cells.iter().all(|s| s.trim().is_empty()) {
            debug!("read_csv_valuations: {}:{} empty line", file_name, lineno);
            continue;
        }
        let mut row: Vec<f64> = Vec::new();
        for s in cells {
            let v = parse_cell(s).context(NonNumericCellSnafu {
                lineno,
                content: s.to_string(),
            })?;
            row.push(v);
        }
        debug!("read_csv_valuations: {}:{} {:?}", file_name, lineno, row);
        res.push(row);
    }
    Ok(res)
}

fn get_records(
    path: &str,
    cfs: &FileSource,
) -> BVoteResult<(csv::StringRecordsIntoIter<File>, usize)> {
    let first_row = cfs.first_value_row_index()?;
    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .context(CsvOpenSnafu { path })?;
    let mut records = rdr.into_records();
    for _ in 0..first_row {
        _ = records.next();
    }
    Ok((records, first_row))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lunch_source(row: JSValue, col: JSValue) -> (String, FileSource) {
        let path = format!("{}/tests/data/lunch.csv", env!("CARGO_MANIFEST_DIR"));
        let cfs = FileSource {
            provider: "csv".to_string(),
            file_path: path.clone(),
            first_value_row_index: Some(row),
            first_value_column_index: Some(col),
            excel_worksheet_name: None,
        };
        (path, cfs)
    }

    #[test]
    fn reads_the_valuations() {
        let (path, cfs) = lunch_source(json!(2), json!("B"));
        let rows = read_csv_valuations(path, &cfs).unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], vec![5.0, 3.0, 4.0, 1.0]);
        assert_eq!(rows[4], vec![5.0, 1.0, 2.0, 4.0]);
    }

    #[test]
    fn reports_text_cells() {
        // The header row is not skipped.
        let (path, cfs) = lunch_source(json!(1), json!("B"));
        let err = read_csv_valuations(path, &cfs).unwrap_err();
        assert!(matches!(
            *err,
            VoteError::NonNumericCell { lineno: 1, .. }
        ));
    }

    #[test]
    fn missing_file() {
        let (_, cfs) = lunch_source(json!(1), json!(1));
        let err = read_csv_valuations("/nonexistent/lunch.csv".to_string(), &cfs).unwrap_err();
        assert!(matches!(*err, VoteError::CsvOpen { .. }));
    }
}
