use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::vote::*;

pub fn read_xlsx_valuations(path: String, cfs: &FileSource) -> BVoteResult<Vec<Vec<f64>>> {
    let wrange = get_range(&path, cfs)?;
    let first_row = cfs.first_value_row_index()?;
    let first_col = cfs.first_value_column_index()?;

    // The range starts at the first non-empty cell of the worksheet. Blank
    // columns between the first value column and the range count as 0.
    let (row0, col0) = wrange.start().unwrap_or((0, 0));
    let (row0, col0) = (row0 as usize, col0 as usize);
    let skip_cols = first_col.saturating_sub(col0);
    let blank_cols = col0.saturating_sub(first_col);

    let mut res: Vec<Vec<f64>> = Vec::new();
    for (idx, row) in wrange.rows().enumerate() {
        let row_idx = row0 + idx;
        if row_idx < first_row {
            continue;
        }
        let lineno = row_idx + 1;
        let cells = row.get(skip_cols..).unwrap_or(&[]);
        if cells.iter().all(|c| matches!(c, DataType::Empty)) {
            debug!("read_xlsx_valuations: {} empty row", lineno);
            continue;
        }
        let mut vals: Vec<f64> = vec![0.0; blank_cols];
        for cell in cells {
            vals.push(read_cell(cell, lineno)?);
        }
        debug!("read_xlsx_valuations: {} {:?}", lineno, vals);
        res.push(vals);
    }
    Ok(res)
}

fn read_cell(cell: &DataType, lineno: usize) -> BVoteResult<f64> {
    match cell {
        DataType::Float(f) => Ok(*f),
        DataType::Int(i) => Ok(*i as f64),
        DataType::Empty => Ok(0.0),
        _ => Err(Box::new(VoteError::ExcelWrongCellType {
            lineno,
            content: format!("{:?}", cell),
        })),
    }
}

fn get_range(path: &String, cfs: &FileSource) -> BVoteResult<calamine::Range<DataType>> {
    let worksheet_name_o = cfs.excel_worksheet_name.clone();
    debug!(
        "read_xlsx_valuations: path: {:?} worksheet: {:?}",
        &path, &worksheet_name_o
    );
    let p = path.clone();
    let mut workbook: Xlsx<_> =
        open_workbook(p).context(OpeningExcelSnafu { path: path.clone() })?;

    // A worksheet name was provided, use it.
    if let Some(worksheet_name) = worksheet_name_o {
        let wrange = workbook
            .worksheet_range(&worksheet_name)
            .context(MissingWorksheetSnafu {
                worksheet: worksheet_name.clone(),
                path: path.clone(),
            })?
            .context(OpeningExcelSnafu { path: path.clone() })?;

        Ok(wrange)
    } else {
        let all_worksheets = workbook.worksheets();
        match all_worksheets.as_slice() {
            [] => EmptyExcelSnafu { path }.fail().map_err(Box::new),
            [(worksheet_name, wrange)] => {
                debug!(
                    "read_xlsx_valuations: path: {:?} worksheet: {:?}",
                    &path, &worksheet_name
                );
                Ok(wrange.clone())
            }
            _ => AmbiguousWorksheetSnafu { path }.fail().map_err(Box::new),
        }
    }
}
