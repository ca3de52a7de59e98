use std::io::{self, Write};

use serde_json::Value;

use crate::cli::OutputFormat;
use crate::commands::CommandResult;
use crate::error::CliError;

const MAX_CELL_WIDTH: usize = 40;

pub fn render(result: &CommandResult, format: OutputFormat, pretty: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, result, format, pretty)?;
    out.flush()?;
    Ok(())
}

fn write_result<W: Write>(
    out: &mut W,
    result: &CommandResult,
    format: OutputFormat,
    pretty: bool,
) -> Result<(), CliError> {
    match format {
        OutputFormat::Json => {
            if pretty {
                serde_json::to_writer_pretty(&mut *out, &result.records)?;
            } else {
                serde_json::to_writer(&mut *out, &result.records)?;
            }
            writeln!(out)?;
        }
        OutputFormat::Ndjson => {
            for record in &result.records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Table => write_table(out, result)?,
    }

    Ok(())
}

fn write_table<W: Write>(out: &mut W, result: &CommandResult) -> Result<(), CliError> {
    let rows: Vec<Vec<String>> = result
        .records
        .iter()
        .map(|record| {
            result
                .columns
                .iter()
                .map(|column| cell(record.get(*column)))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = result
        .columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .map(|row| row[index].chars().count())
                .chain([column.len()])
                .max()
                .unwrap_or(0)
        })
        .collect();

    let header: Vec<String> = result.columns.iter().map(|c| (*c).to_owned()).collect();
    write_row(out, &header, &widths)?;
    for row in &rows {
        write_row(out, row, &widths)?;
    }
    writeln!(out, "({} rows)", rows.len())?;

    Ok(())
}

fn write_row<W: Write>(out: &mut W, cells: &[String], widths: &[usize]) -> io::Result<()> {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    writeln!(out, "{}", line.trim_end())
}

fn cell(value: Option<&Value>) -> String {
    let text = match value {
        None | Some(Value::Null) => String::from("-"),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    };

    if text.chars().count() > MAX_CELL_WIDTH {
        let mut truncated: String = text.chars().take(MAX_CELL_WIDTH - 1).collect();
        truncated.push('…');
        truncated
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn sample() -> CommandResult {
        CommandResult::new(
            vec![
                json!({ "VIN": "5YJ3E1EA1KF000001", "Model": "m3", "Price": 41990 }),
                json!({ "VIN": "5YJ3E1EA1KF000002", "Model": "m3", "Price": null }),
            ],
            &["VIN", "Model", "Price", "City"],
        )
    }

    fn rendered(format: OutputFormat, pretty: bool) -> String {
        let mut buffer = Vec::new();
        write_result(&mut buffer, &sample(), format, pretty).expect("render succeeds");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[test]
    fn json_is_a_single_array() {
        let output = rendered(OutputFormat::Json, false);
        let parsed: Value = serde_json::from_str(&output).expect("valid json");

        assert_eq!(output.lines().count(), 1);
        assert_eq!(parsed.as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn ndjson_is_one_record_per_line() {
        let output = rendered(OutputFormat::Ndjson, false);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        for line in lines {
            let record: Value = serde_json::from_str(line).expect("each line is json");
            assert_eq!(record["Model"], "m3");
        }
    }

    #[test]
    fn table_aligns_columns_and_marks_missing_cells() {
        let output = rendered(OutputFormat::Table, false);
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("VIN"));
        assert!(lines[0].contains("Price"));
        assert!(lines[1].contains("41990"));
        assert!(lines[2].ends_with('-'));
        assert_eq!(lines[3], "(2 rows)");
    }

    #[test]
    fn long_cells_are_truncated() {
        let text = cell(Some(&json!("x".repeat(100))));
        assert_eq!(text.chars().count(), MAX_CELL_WIDTH);
        assert!(text.ends_with('…'));
    }
}
