use std::fs::File;
use std::path::Path;

use serde_json::Value as JsonValue;

use super::error::{LoadError, SchemaMismatch};
use super::model::{Deal, DealTable};

/// The columns a well-formed source is expected to carry. Header names are
/// trimmed of surrounding whitespace before matching; no case-folding.
pub const EXPECTED_COLUMNS: [&str; 5] =
    ["year", "country", "industry", "investor", "amount_usd_millions"];

/// A loaded table plus any non-fatal schema warning.
#[derive(Debug)]
pub struct LoadOutcome {
    pub table: DealTable,
    pub schema_warning: Option<SchemaMismatch>,
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a deals table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – delimited text with a header row naming the columns
/// * `.json` – records-oriented array: `[{ "year": 2020, ... }, ...]`
pub fn load_file(path: &Path) -> Result<LoadOutcome, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        other => Err(LoadError::UnsupportedExtension(other.to_string())),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<LoadOutcome, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| format_error(path, e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let column_index = |name: &str| headers.iter().position(|h| h == name);
    let year_idx = column_index("year");
    let country_idx = column_index("country");
    let industry_idx = column_index("industry");
    let investor_idx = column_index("investor");
    let amount_idx = column_index("amount_usd_millions");

    let schema_warning = missing_columns(|name| column_index(name).is_some());

    let mut deals = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result.map_err(|e| format_error(path, e))?;
        let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

        deals.push(Deal {
            year: match year_idx {
                Some(_) => parse_year(field(year_idx), row)?,
                None => 0,
            },
            country: field(country_idx).to_string(),
            industry: field(industry_idx).to_string(),
            investor: field(investor_idx).to_string(),
            amount: parse_amount(field(amount_idx)),
        });
    }

    Ok(LoadOutcome {
        table: DealTable::from_deals(deals),
        schema_warning,
    })
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   {
///     "year": 2020,
///     "country": "Nigeria",
///     "industry": "Fintech",
///     "investor": "Savannah Capital",
///     "amount_usd_millions": 12.5
///   },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<LoadOutcome, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Source {
        path: path.to_path_buf(),
        source,
    })?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| format_error(path, e))?;

    let records = root.as_array().ok_or_else(|| LoadError::Format {
        path: path.to_path_buf(),
        message: "expected a top-level JSON array".to_string(),
    })?;

    let mut seen = [false; EXPECTED_COLUMNS.len()];
    let mut deals = Vec::with_capacity(records.len());

    for (row, rec) in records.iter().enumerate() {
        let obj = rec.as_object().ok_or_else(|| LoadError::Format {
            path: path.to_path_buf(),
            message: format!("row {row} is not a JSON object"),
        })?;

        for (i, name) in EXPECTED_COLUMNS.iter().enumerate() {
            if obj.contains_key(*name) {
                seen[i] = true;
            }
        }

        let year = match obj.get("year") {
            Some(v) => match json_to_f64(v) {
                Some(n) if n.is_finite() => n as i32,
                _ => {
                    return Err(LoadError::DataIntegrity {
                        row,
                        value: json_field_text(obj.get("year")),
                    })
                }
            },
            None => 0,
        };

        let amount = obj
            .get("amount_usd_millions")
            .and_then(json_to_f64)
            .filter(|v| v.is_finite() && *v >= 0.0)
            .unwrap_or(0.0);

        deals.push(Deal {
            year,
            country: json_field_text(obj.get("country")),
            industry: json_field_text(obj.get("industry")),
            investor: json_field_text(obj.get("investor")),
            amount,
        });
    }

    // A key counts as present if any record carries it; an empty array has
    // nothing to check against.
    let schema_warning = if records.is_empty() {
        None
    } else {
        missing_columns(|name| {
            let i = EXPECTED_COLUMNS.iter().position(|c| *c == name);
            i.map(|i| seen[i]).unwrap_or(false)
        })
    };

    Ok(LoadOutcome {
        table: DealTable::from_deals(deals),
        schema_warning,
    })
}

// ---------------------------------------------------------------------------
// Field normalization
// ---------------------------------------------------------------------------

/// Strict year conversion: parse as a number, truncate to an integer.
/// Anything non-numeric is fatal for the load.
fn parse_year(value: &str, row: usize) -> Result<i32, LoadError> {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v as i32),
        _ => Err(LoadError::DataIntegrity {
            row,
            value: value.to_string(),
        }),
    }
}

/// Lenient amount conversion: anything that does not parse to a finite,
/// non-negative number becomes 0 so the record never leaves the pipeline.
fn parse_amount(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v,
        _ => 0.0,
    }
}

fn json_to_f64(value: &JsonValue) -> Option<f64> {
    match value {
        JsonValue::Number(n) => n.as_f64(),
        JsonValue::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn json_field_text(value: Option<&JsonValue>) -> String {
    match value {
        Some(JsonValue::String(s)) => s.clone(),
        Some(JsonValue::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn missing_columns(present: impl Fn(&str) -> bool) -> Option<SchemaMismatch> {
    let missing: Vec<String> = EXPECTED_COLUMNS
        .iter()
        .filter(|name| !present(name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        None
    } else {
        Some(SchemaMismatch { missing })
    }
}

fn format_error(path: &Path, e: impl std::fmt::Display) -> LoadError {
    LoadError::Format {
        path: path.to_path_buf(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_coercion() {
        assert_eq!(parse_amount("12.5"), 12.5);
        assert_eq!(parse_amount(" 7 "), 7.0);
        assert_eq!(parse_amount("N/A"), 0.0);
        assert_eq!(parse_amount(""), 0.0);
        assert_eq!(parse_amount("-3.0"), 0.0);
        assert_eq!(parse_amount("inf"), 0.0);
        assert_eq!(parse_amount("NaN"), 0.0);
    }

    #[test]
    fn test_parse_year_truncates() {
        assert_eq!(parse_year("2020", 0).unwrap(), 2020);
        assert_eq!(parse_year("2020.9", 0).unwrap(), 2020);
        assert_eq!(parse_year(" 2021 ", 0).unwrap(), 2021);
    }

    #[test]
    fn test_parse_year_rejects_non_numeric() {
        for bad in ["", "unknown", "20x0", "NaN"] {
            let err = parse_year(bad, 3).unwrap_err();
            match err {
                LoadError::DataIntegrity { row, value } => {
                    assert_eq!(row, 3);
                    assert_eq!(value, bad);
                }
                other => panic!("expected DataIntegrity, got {other:?}"),
            }
        }
    }
}
