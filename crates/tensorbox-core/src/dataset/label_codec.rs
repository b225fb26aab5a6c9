//! Per-dimension mapping between categorical labels and integer indices.

use crate::errors::{DatasetError, PatternError};
use crate::types::collections::FxHashMap;

/// Bidirectional label/index tables, one per dimension.
///
/// Indices follow the sorted order of the distinct labels: numeric when every
/// label of a dimension parses as an integer, lexicographic otherwise.
#[derive(Debug, Clone, Default)]
pub struct LabelCodec {
    labels: Vec<Vec<String>>,
    lookup: Vec<FxHashMap<String, usize>>,
}

impl LabelCodec {
    /// Learns the tables from raw rows of labels (one column per dimension).
    pub fn fit<I, R, S>(rows: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut columns: Vec<Vec<String>> = Vec::new();
        for row in rows {
            for (d, label) in row.into_iter().enumerate() {
                if columns.len() <= d {
                    columns.resize_with(d + 1, Vec::new);
                }
                columns[d].push(label.as_ref().to_string());
            }
        }
        for column in &mut columns {
            sort_labels(column);
            column.dedup();
        }
        Self::from_labels(columns)
    }

    /// Uses the given tables as is: `labels[d][i]` is the label of index `i`.
    pub fn from_labels(labels: Vec<Vec<String>>) -> Self {
        let lookup = labels
            .iter()
            .map(|column| {
                column
                    .iter()
                    .enumerate()
                    .map(|(i, label)| (label.clone(), i))
                    .collect()
            })
            .collect();
        Self { labels, lookup }
    }

    pub fn dimension(&self) -> usize {
        self.labels.len()
    }

    /// Number of distinct labels per dimension.
    pub fn sizes(&self) -> Vec<usize> {
        self.labels.iter().map(Vec::len).collect()
    }

    pub fn encode(&self, dimension: usize, label: &str) -> Result<usize, DatasetError> {
        self.lookup
            .get(dimension)
            .and_then(|column| column.get(label).copied())
            .ok_or_else(|| DatasetError::UnknownLabel {
                dimension,
                label: label.to_string(),
            })
    }

    pub fn decode(&self, dimension: usize, index: usize) -> Result<&str, DatasetError> {
        self.labels
            .get(dimension)
            .and_then(|column| column.get(index))
            .map(String::as_str)
            .ok_or_else(|| DatasetError::UnknownLabel {
                dimension,
                label: index.to_string(),
            })
    }

    /// Maps every index of an integer pattern line to its label. The density
    /// field is kept verbatim.
    pub fn decode_line(&self, line: &str) -> Result<String, DatasetError> {
        self.map_line(line, |d, token| {
            let index: usize = token.parse().map_err(|_| {
                DatasetError::Pattern(PatternError::Malformed {
                    line: line.to_string(),
                    reason: format!("index token {token:?} is not a non-negative integer"),
                })
            })?;
            self.decode(d, index).map(str::to_string)
        })
    }

    /// Maps every label of a labelled pattern line to its index. The density
    /// field is kept verbatim.
    pub fn encode_line(&self, line: &str) -> Result<String, DatasetError> {
        self.map_line(line, |d, token| self.encode(d, token).map(|i| i.to_string()))
    }

    fn map_line<F>(&self, line: &str, mut map: F) -> Result<String, DatasetError>
    where
        F: FnMut(usize, &str) -> Result<String, DatasetError>,
    {
        let trimmed = line.trim();
        let fields: Vec<&str> = trimmed.split(|c: char| c == ' ' || c == '\t').collect();
        let dimension = self.dimension();
        if trimmed.is_empty() || fields.len() != dimension + 1 {
            return Err(DatasetError::Pattern(PatternError::Malformed {
                line: line.to_string(),
                reason: format!("expected {} fields, found {}", dimension + 1, fields.len()),
            }));
        }

        let mut out = Vec::with_capacity(fields.len());
        for (d, field) in fields[..dimension].iter().enumerate() {
            if field.is_empty() {
                out.push(String::new());
                continue;
            }
            let mapped = field
                .split(',')
                .map(|token| map(d, token))
                .collect::<Result<Vec<_>, _>>()?;
            out.push(mapped.join(","));
        }
        out.push(fields[dimension].to_string());
        Ok(out.join(" "))
    }
}

fn sort_labels(column: &mut [String]) {
    if column.iter().all(|label| label.parse::<i64>().is_ok()) {
        column.sort_by_key(|label| label.parse::<i64>().unwrap_or_default());
    } else {
        column.sort();
    }
}
