use std::num::ParseFloatError;

use thiserror::Error;

use crate::schema::{Column, RecordSchema};

#[derive(Debug, Error)]
pub enum Error {
    /// A column the requested schema depends on is not present in the source.
    #[error("{schema} schema requires column \"{column}\"")]
    Schema { schema: RecordSchema, column: Column },

    /// Zero epochs were loaded, or a zero length series was handed to the statistics.
    #[error("no epochs to analyze")]
    EmptyInput,

    /// A row does not have as many fields as the header.
    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: failed to parse \"{value}\"")]
    Parse {
        line: usize,
        value: String,
        #[source]
        source: ParseFloatError,
    },

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}
