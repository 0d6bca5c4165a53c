use std::collections::BTreeMap;

use log::{debug, warn};
use nalgebra::Vector3;
use ndarray::{Array1, ArrayView1};
use num_traits::ToPrimitive;

use crate::schema::{Column, RecordSchema};
use crate::source::Table;
use crate::{Error, Result};

/// Dilution of precision reported by the solver for one epoch
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dop {
    pub hdop: f64,
    pub vdop: f64,
    pub pdop: f64,
    pub gdop: f64,
}

/// Signed East, North, Up residual of the estimate against the surveyed position (m)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

/// One row of a solution log
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EpochRecord {
    /// GPS seconds of week
    pub epoch_time: f64,
    /// ECEF estimate (m)
    pub position: Vector3<f64>,
    /// Clock bias in meters
    pub clock_bias: f64,
    pub dop: Option<Dop>,
    pub num_satellites: Option<u32>,
    pub local_error: Option<Enu>,
}

/// Ordered, read only view of the epochs of a solution log.
///
/// Rows are kept exactly as loaded: nothing is sorted, filtered or deduplicated, and every column
/// has one value per loaded row.
#[derive(Clone, Debug)]
pub struct EpochRecordStore {
    schema: RecordSchema,
    len: usize,
    columns: BTreeMap<Column, Array1<f64>>,
}

impl EpochRecordStore {
    /// Build the store from a [`Table`], checking the columns `schema` requires.
    ///
    /// Recognised columns beyond those the schema requires are kept, unrecognised ones are
    /// ignored.
    ///
    /// # Errors
    /// - [`Error::Schema`] if a required column is absent
    /// - [`Error::EmptyInput`] if the table has no rows
    pub fn load(table: &Table, schema: RecordSchema) -> Result<Self> {
        let mut positions = BTreeMap::new();
        for (index, header) in table.headers().iter().enumerate() {
            if let Some(column) = Column::from_header(header) {
                // First occurrence wins when a header is repeated
                positions.entry(column).or_insert(index);
            }
        }

        if let Some(&column) = schema
            .required_columns()
            .iter()
            .find(|column| !positions.contains_key(column))
        {
            return Err(Error::Schema { schema, column });
        }

        if table.is_empty() {
            return Err(Error::EmptyInput);
        }

        let columns = positions
            .into_iter()
            .map(|(column, index)| (column, table.column_values(index).collect::<Array1<_>>()))
            .collect::<BTreeMap<_, _>>();

        debug!(
            "loaded {} epochs using the {schema} schema, columns {:?}",
            table.len(),
            columns.keys().collect::<Vec<_>>()
        );

        Ok(Self {
            schema,
            len: table.len(),
            columns,
        })
    }

    pub const fn schema(&self) -> RecordSchema {
        self.schema
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn has_column(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }

    /// # Errors
    /// Returns [`Error::Schema`] if the column was not loaded.
    pub fn column(&self, column: Column) -> Result<ArrayView1<'_, f64>> {
        self.columns
            .get(&column)
            .map(Array1::view)
            .ok_or(Error::Schema {
                schema: self.schema,
                column,
            })
    }

    /// The requested columns as parallel sequences, in row order
    ///
    /// # Errors
    /// Returns [`Error::Schema`] naming the first requested column that was not loaded.
    pub fn columns(&self, names: &[Column]) -> Result<Vec<ArrayView1<'_, f64>>> {
        names.iter().map(|&column| self.column(column)).collect()
    }

    fn value(&self, column: Column, index: usize) -> Option<f64> {
        self.columns.get(&column).map(|values| values[index])
    }

    fn record(&self, index: usize) -> EpochRecord {
        let required = |column| self.value(column, index).unwrap_or(f64::NAN);

        let dop = match (
            self.value(Column::Hdop, index),
            self.value(Column::Vdop, index),
            self.value(Column::Pdop, index),
            self.value(Column::Gdop, index),
        ) {
            (Some(hdop), Some(vdop), Some(pdop), Some(gdop)) => Some(Dop {
                hdop,
                vdop,
                pdop,
                gdop,
            }),
            _ => None,
        };

        let local_error = match (
            self.value(Column::EastError, index),
            self.value(Column::NorthError, index),
            self.value(Column::UpError, index),
        ) {
            (Some(east), Some(north), Some(up)) => Some(Enu { east, north, up }),
            _ => None,
        };

        EpochRecord {
            epoch_time: required(Column::EpochTime),
            position: Vector3::new(required(Column::X), required(Column::Y), required(Column::Z)),
            clock_bias: required(Column::ClockBias),
            dop,
            num_satellites: self
                .value(Column::NumSats, index)
                .filter(|n| n.fract() == 0.0)
                .and_then(|n| n.to_u32()),
            local_error,
        }
    }

    /// Typed rows, in load order
    pub fn records(&self) -> impl Iterator<Item = EpochRecord> + '_ {
        (0..self.len).map(move |index| self.record(index))
    }

    /// Scan the loaded rows for suspicious but tolerated input.
    ///
    /// Nothing is rejected here: findings are logged and returned so the caller can decide.
    pub fn check_consistency(&self) -> ConsistencyReport {
        let mut report = ConsistencyReport::default();

        if let Some(time) = self.columns.get(&Column::EpochTime) {
            report.time_reversals = time
                .windows(2)
                .into_iter()
                .enumerate()
                .filter(|(_, pair)| pair[1] < pair[0])
                .map(|(ii, _)| ii + 1)
                .collect();
        }

        for (index, record) in self.records().enumerate() {
            let dop_values = record
                .dop
                .map(|dop| [dop.hdop, dop.vdop, dop.pdop, dop.gdop]);
            let error_values = record
                .local_error
                .map(|error| [error.east, error.north, error.up]);
            if dop_values
                .iter()
                .flatten()
                .chain(error_values.iter().flatten())
                .any(|value| !value.is_finite())
            {
                report.non_finite.push(index);
            }

            let Some(dop) = record.dop else {
                continue;
            };
            if dop.pdop < dop.hdop || dop.pdop < dop.vdop {
                report.dop_inversions.push(index);
            }
            if [dop.hdop, dop.vdop, dop.pdop, dop.gdop]
                .iter()
                .any(|&value| value < 0.0)
            {
                report.negative_dop.push(index);
            }
        }

        if !report.time_reversals.is_empty() {
            warn!(
                "epoch time decreases at {} rows, first at row {}",
                report.time_reversals.len(),
                report.time_reversals[0]
            );
        }
        if !report.dop_inversions.is_empty() {
            warn!(
                "PDOP smaller than HDOP or VDOP at {} rows",
                report.dop_inversions.len()
            );
        }
        if !report.non_finite.is_empty() {
            warn!(
                "NaN or infinite DOP or local error at {} rows, first at row {}",
                report.non_finite.len(),
                report.non_finite[0]
            );
        }
        if !report.negative_dop.is_empty() {
            warn!(
                "negative DOP at {} rows, uncertainty bands will be inverted",
                report.negative_dop.len()
            );
        }

        report
    }
}

/// Row indices of tolerated inconsistencies in a store
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    /// Rows whose epoch time is earlier than the previous row's
    pub time_reversals: Vec<usize>,
    /// Rows where PDOP is smaller than HDOP or VDOP
    pub dop_inversions: Vec<usize>,
    pub negative_dop: Vec<usize>,
    /// Rows with a NaN or infinite DOP or local error value
    pub non_finite: Vec<usize>,
}

impl ConsistencyReport {
    pub fn is_clean(&self) -> bool {
        self.time_reversals.is_empty()
            && self.dop_inversions.is_empty()
            && self.negative_dop.is_empty()
            && self.non_finite.is_empty()
    }
}
