use calamine::{open_workbook, DataType, Reader, Xlsx};

use crate::ahp::{
    io_common::{make_default_id, parse_numeric_cell},
    *,
};

// TODO: support legacy .xls workbooks in addition to .xlsx.
pub fn read_excel_dataset(path: String, source: &DatasetSource) -> AhpCliResult<Vec<ParsedRecord>> {
    let default_id = make_default_id(path.as_str());
    let alternative_column = source.alternative_column();

    let mut workbook: Xlsx<_> = open_workbook(path.clone()).context(OpeningExcelSnafu {
        path: path.clone(),
    })?;
    let wrange = match source.excel_worksheet_name.clone() {
        Some(name) => workbook
            .worksheet_range(name.as_str())
            .context(EmptyExcelSnafu { path: path.clone() })?
            .context(OpeningExcelSnafu { path: path.clone() })?,
        None => workbook
            .worksheet_range_at(0)
            .context(EmptyExcelSnafu { path: path.clone() })?
            .context(OpeningExcelSnafu { path: path.clone() })?,
    };

    let mut rows = wrange.rows();
    let header = rows.next().context(EmptyExcelSnafu { path: path.clone() })?;
    let headers: Vec<String> = header.iter().map(read_text_calamine).collect();
    debug!("read_excel_dataset: header: {:?}", headers);
    let alternative_idx = headers
        .iter()
        .position(|h| *h == alternative_column)
        .context(MissingColumnSnafu {
            column: alternative_column.clone(),
        })?;

    let first_row = source.first_data_row_index()?;
    for _ in 2..first_row {
        rows.next();
    }

    let mut res: Vec<ParsedRecord> = Vec::new();
    for (idx, row) in rows.enumerate() {
        let lineno = idx + first_row;
        debug!("read_excel_dataset: lineno: {:?} row: {:?}", lineno, row);
        let alternative = row
            .get(alternative_idx)
            .map(read_text_calamine)
            .unwrap_or_default();

        let mut values: Vec<(String, Option<f64>)> = Vec::new();
        for (cidx, cell) in row.iter().enumerate() {
            if cidx == alternative_idx {
                continue;
            }
            if let Some(column) = headers.get(cidx) {
                values.push((column.clone(), read_numeric_calamine(cell)));
            }
        }

        res.push(ParsedRecord {
            id: Some(default_id(lineno)),
            alternative,
            values,
        });
    }
    Ok(res)
}

fn read_text_calamine(cell: &DataType) -> String {
    match cell {
        DataType::String(s) => s.trim().to_string(),
        DataType::Empty => "".to_string(),
        x => format!("{}", x),
    }
}

fn read_numeric_calamine(cell: &DataType) -> Option<f64> {
    match cell {
        DataType::Float(f) => Some(*f),
        DataType::Int(i) => Some(*i as f64),
        DataType::String(s) => parse_numeric_cell(s),
        _ => None,
    }
}
