// Primitives for reading CSV datasets.

use crate::ahp::{
    io_common::{make_default_id, parse_numeric_cell},
    *,
};

pub fn read_csv_dataset(path: String, source: &DatasetSource) -> AhpCliResult<Vec<ParsedRecord>> {
    let default_id = make_default_id(path.as_str());
    let alternative_column = source.alternative_column();

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path.clone())
        .context(CsvOpenSnafu {})?;
    let mut records = rdr.into_records();

    let header = match records.next() {
        Some(r) => r.context(CsvLineParseSnafu {})?,
        None => whatever!("the dataset {} is empty", path),
    };
    let headers: Vec<String> = header.iter().map(|s| s.trim().to_string()).collect();
    debug!("read_csv_dataset: header: {:?}", headers);
    let alternative_idx = headers
        .iter()
        .position(|h| *h == alternative_column)
        .context(MissingColumnSnafu {
            column: alternative_column.clone(),
        })?;

    // The index starts at 1 to respect most conventions in the spreadsheet world.
    let first_row = source.first_data_row_index()?;
    for _ in 2..first_row {
        _ = records.next();
    }

    let mut res: Vec<ParsedRecord> = Vec::new();
    for (idx, line_r) in records.enumerate() {
        let lineno = idx + first_row;
        let line = line_r.context(CsvLineParseSnafu {})?;
        debug!("read_csv_dataset: lineno: {:?} row: {:?}", lineno, line);
        let alternative = line
            .get(alternative_idx)
            .context(CsvLineTooShortSnafu { lineno })?
            .trim()
            .to_string();

        let mut values: Vec<(String, Option<f64>)> = Vec::new();
        for (cidx, cell) in line.iter().enumerate() {
            if cidx == alternative_idx {
                continue;
            }
            if let Some(column) = headers.get(cidx) {
                values.push((column.clone(), parse_numeric_cell(cell)));
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
