//! Citation dataset loading.
//!
//! The dataset is a CSV file with the columns `Category`, `URL`, `Domain`,
//! `Age` and `Trust_Description` (matched case-insensitively, any order).
//! `Age` is a plain run of decimal digits or the literal `Ongoing`, which
//! maps to 0. Signs, decimals and anything else are malformed.
//! A single title line before the header row is skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use ancestor_contracts::{
    citation::CitationRecord,
    error::{AncestorError, AncestorResult},
};

/// What to do with a row that cannot be coerced into a `CitationRecord`.
///
/// Applied uniformly to every row of a load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MalformedPolicy {
    /// Fail the load with `MalformedRecord`.
    #[default]
    Abort,
    /// Replace the bad age with 0 and any missing text field with "".
    Coerce,
    /// Drop the row with a warning.
    Skip,
}

impl std::str::FromStr for MalformedPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "abort" => Ok(Self::Abort),
            "coerce" => Ok(Self::Coerce),
            "skip" => Ok(Self::Skip),
            other => Err(format!(
                "unknown malformed-row policy '{other}' (expected abort, coerce or skip)"
            )),
        }
    }
}

const COLUMNS: [&str; 5] = ["Category", "URL", "Domain", "Age", "Trust_Description"];

/// The fixed, in-memory citation dataset.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Where the records came from, for diagnostics and the audit trail.
    pub source_name: String,
    pub records: Vec<CitationRecord>,
    /// Rows dropped under `MalformedPolicy::Skip`.
    pub skipped: usize,
    /// Rows repaired under `MalformedPolicy::Coerce`.
    pub coerced: usize,
}

impl Dataset {
    /// Load the dataset at `path`.
    ///
    /// Returns `MissingInput` if the file cannot be read and `EmptyDataset`
    /// if no usable rows remain.
    pub fn load(path: &Path, policy: MalformedPolicy) -> AncestorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| AncestorError::MissingInput {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        Self::from_csv_str(&path.display().to_string(), &contents, policy)
    }

    /// Parse CSV text already in memory.
    pub fn from_csv_str(
        source_name: &str,
        contents: &str,
        policy: MalformedPolicy,
    ) -> AncestorResult<Self> {
        let body = skip_title_line(contents);

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(body.as_bytes());

        let headers = reader
            .headers()
            .map_err(|e| AncestorError::MalformedRecord {
                row: 0,
                reason: format!("unreadable header: {e}"),
            })?
            .clone();

        let mut indices = [0usize; 5];
        for (slot, column) in indices.iter_mut().zip(COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| h.eq_ignore_ascii_case(column))
                .ok_or_else(|| AncestorError::MalformedRecord {
                    row: 0,
                    reason: format!("missing column '{column}'"),
                })?;
        }

        let mut dataset = Dataset {
            source_name: source_name.to_string(),
            records: Vec::new(),
            skipped: 0,
            coerced: 0,
        };

        for (idx, row) in reader.records().enumerate() {
            let row_number = idx + 1;
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    let reason = format!("unreadable row: {e}");
                    if policy == MalformedPolicy::Abort {
                        return Err(AncestorError::MalformedRecord { row: row_number, reason });
                    }
                    // Nothing to coerce in a row the csv reader rejected.
                    warn!(row = row_number, %reason, "skipping unreadable citation row");
                    dataset.skipped += 1;
                    continue;
                }
            };

            let reason = match parse_row(&row, &indices) {
                Ok(record) => {
                    dataset.records.push(record);
                    continue;
                }
                Err(reason) => reason,
            };

            match policy {
                MalformedPolicy::Abort => {
                    return Err(AncestorError::MalformedRecord { row: row_number, reason });
                }
                MalformedPolicy::Skip => {
                    warn!(row = row_number, %reason, "skipping malformed citation row");
                    dataset.skipped += 1;
                }
                MalformedPolicy::Coerce => {
                    warn!(row = row_number, %reason, "coercing malformed citation row");
                    dataset.records.push(coerce_row(&row, &indices));
                    dataset.coerced += 1;
                }
            }
        }

        if dataset.records.is_empty() {
            return Err(AncestorError::EmptyDataset {
                source_name: source_name.to_string(),
            });
        }

        debug!(
            source = %dataset.source_name,
            records = dataset.records.len(),
            skipped = dataset.skipped,
            coerced = dataset.coerced,
            "citation dataset loaded"
        );
        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Drop a leading title line such as `public_citation_sources` when the
/// header row is on the second line.
fn skip_title_line(contents: &str) -> &str {
    let contents = contents.trim_start_matches('\u{feff}');
    let Some((first, rest)) = contents.split_once('\n') else {
        return contents;
    };
    let looks_like_header = first
        .split(',')
        .any(|cell| cell.trim().trim_matches('"').eq_ignore_ascii_case("Category"));
    if looks_like_header {
        contents
    } else {
        rest
    }
}

/// Parse the `Age` column.
pub fn parse_age(raw: &str) -> Result<u32, String> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("ongoing") {
        return Ok(0);
    }
    let malformed = || format!("age '{raw}' is neither a non-negative integer nor 'Ongoing'");
    // `u32::from_str` would accept a leading '+'.
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    raw.parse::<u32>().map_err(|_| malformed())
}

fn parse_row(row: &csv::StringRecord, indices: &[usize; 5]) -> Result<CitationRecord, String> {
    let field = |i: usize| {
        row.get(indices[i])
            .map(str::to_string)
            .ok_or_else(|| format!("missing value for column '{}'", COLUMNS[i]))
    };

    Ok(CitationRecord {
        category: field(0)?,
        url: field(1)?,
        domain: field(2)?,
        age_days: parse_age(&field(3)?)?,
        trust_description: field(4)?,
    })
}

/// Repair a row: missing text becomes "" and a bad age becomes 0.
fn coerce_row(row: &csv::StringRecord, indices: &[usize; 5]) -> CitationRecord {
    let field = |i: usize| row.get(indices[i]).unwrap_or_default().to_string();

    CitationRecord {
        category: field(0),
        url: field(1),
        domain: field(2),
        age_days: parse_age(&field(3)).unwrap_or(0),
        trust_description: field(4),
    }
}
