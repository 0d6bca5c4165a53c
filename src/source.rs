use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use crate::{Error, Result};

/// Column names assigned to the headerless five column layout
pub const MINIMAL_HEADERS: [&str; 5] = ["time", "x", "y", "z", "cdt"];

/// A numeric table with named columns, in file order
///
/// Solution logs come either as a header labelled, comma separated table or as an older
/// headerless, whitespace separated table holding `time x y z cdt`. Both read into a `Table`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl Table {
    /// Build a table from already parsed parts.
    ///
    /// # Errors
    /// Returns [`Error::FieldCount`] if a row does not have one value per header.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<f64>>) -> Result<Self> {
        if let Some((ii, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != headers.len())
        {
            return Err(Error::FieldCount {
                line: ii + 1,
                expected: headers.len(),
                found: row.len(),
            });
        }
        Ok(Self { headers, rows })
    }

    /// Read a header labelled, comma separated table
    ///
    /// # Errors
    /// Returns an error if the reader fails, a row is ragged or a field is not numeric.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr
            .headers()?
            .iter()
            .map(ToOwned::to_owned)
            .collect::<Vec<_>>();

        let mut rows = vec![];
        for result in rdr.deserialize() {
            let row: Vec<f64> = result?;
            rows.push(row);
        }

        debug!("read {} rows with headers {headers:?}", rows.len());
        Ok(Self { headers, rows })
    }

    /// Read a headerless table whose fields are separated by runs of whitespace.
    ///
    /// Blank lines are skipped.
    ///
    /// # Errors
    /// Returns an error if the reader fails, a line has the wrong number of fields or a field is
    /// not numeric.
    pub fn from_whitespace_reader<R: Read>(reader: R, headers: &[&str]) -> Result<Self> {
        let mut rows = vec![];
        for (ii, line) in BufReader::new(reader).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|field| {
                    field.parse::<f64>().map_err(|source| Error::Parse {
                        line: ii + 1,
                        value: field.to_owned(),
                        source,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            if row.len() != headers.len() {
                return Err(Error::FieldCount {
                    line: ii + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }
            rows.push(row);
        }

        debug!("read {} headerless rows", rows.len());
        Ok(Self {
            headers: headers.iter().map(|&h| h.to_owned()).collect(),
            rows,
        })
    }

    /// Read a solution log from disk, choosing the layout from the first non blank line
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is malformed.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::read(path)?;
        let header_labelled = file
            .split(|&b| b == b'\n')
            .find(|line| !line.iter().all(u8::is_ascii_whitespace))
            .is_some_and(|line| line.contains(&b','));

        debug!(
            "reading {path:?} as {} table",
            if header_labelled {
                "labelled"
            } else {
                "headerless"
            }
        );

        if header_labelled {
            Self::from_csv_reader(&file[..])
        } else {
            Self::from_whitespace_reader(&file[..], &MINIMAL_HEADERS)
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Values of the column at `index`, in row order
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = f64> + '_ {
        self.rows.iter().map(move |row| row[index])
    }
}
