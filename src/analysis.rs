use std::path::Path;

use itertools::{Itertools, MinMaxResult};
use log::{debug, info};
use nalgebra::Vector3;
use ndarray::Array1;

use crate::config::{AnalysisConfig, TruePosition};
use crate::envelope::UncertaintyEnvelope;
use crate::math::nan_max;
use crate::schema::{Column, RecordSchema};
use crate::source::Table;
use crate::statistics::{AxisStatistics, Statistics};
use crate::store::{ConsistencyReport, EpochRecordStore};
use crate::Result;

/// Envelope and error statistics of one run, handed to rendering and reporting
#[derive(Clone, Debug, PartialEq)]
pub struct AccuracyReport {
    pub envelope: UncertaintyEnvelope,
    pub stats: AxisStatistics<f64>,
}

/// Derive the uncertainty envelope and the per axis error statistics of `store`.
///
/// The store is never mutated and nothing is cached, every call recomputes in full.
///
/// # Errors
/// - [`crate::Error::Schema`] if the store lacks DOP or local error columns
/// - [`crate::Error::EmptyInput`] if the store has no epochs
pub fn analyze(store: &EpochRecordStore, config: &AnalysisConfig) -> Result<AccuracyReport> {
    let envelope = UncertaintyEnvelope::derive(store, &config.noise)?;
    let stats = AxisStatistics::compute(
        store.column(Column::EastError)?,
        store.column(Column::NorthError)?,
        store.column(Column::UpError)?,
    )?;

    debug!("error statistics over {} epochs: {stats:?}", store.len());
    Ok(AccuracyReport { envelope, stats })
}

/// ECEF residuals of the estimates against a surveyed position
///
/// No rotation into the local frame is applied, these are plain coordinate differences.
#[derive(Clone, Debug, PartialEq)]
pub struct EcefOffsets {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
    pub z: Array1<f64>,
    /// Euclidean norm of the residual per epoch
    pub distance: Array1<f64>,
}

/// [`Statistics`] of [`EcefOffsets`] per ECEF axis and for the 3D distance
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EcefStatistics {
    pub x: Statistics<f64>,
    pub y: Statistics<f64>,
    pub z: Statistics<f64>,
    pub distance: Statistics<f64>,
}

impl EcefOffsets {
    pub fn from_store(store: &EpochRecordStore, truth: &TruePosition) -> Self {
        let truth = Vector3::from(*truth);
        let offsets = store
            .records()
            .map(|record| record.position - truth)
            .collect::<Vec<_>>();

        Self {
            x: offsets.iter().map(|offset| offset.x).collect(),
            y: offsets.iter().map(|offset| offset.y).collect(),
            z: offsets.iter().map(|offset| offset.z).collect(),
            distance: offsets.iter().map(|offset| offset.norm()).collect(),
        }
    }

    /// # Errors
    /// Returns [`crate::Error::EmptyInput`] if there are no offsets.
    pub fn statistics(&self) -> Result<EcefStatistics> {
        Ok(EcefStatistics {
            x: Statistics::compute(self.x.view())?,
            y: Statistics::compute(self.y.view())?,
            z: Statistics::compute(self.z.view())?,
            distance: Statistics::compute(self.distance.view())?,
        })
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Extent of the satellite geometry over a session
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeometrySummary {
    /// Largest HDOP, VDOP, PDOP or GDOP seen, `NaN` if any of them is
    pub max_dop: Option<f64>,
    /// Fewest and most satellites used in a fix
    pub satellites: Option<(u32, u32)>,
}

impl GeometrySummary {
    pub fn from_store(store: &EpochRecordStore) -> Self {
        let max_dop = store
            .records()
            .filter_map(|record| record.dop)
            .flat_map(|dop| [dop.hdop, dop.vdop, dop.pdop, dop.gdop])
            .reduce(nan_max);

        let satellites = match store
            .records()
            .filter_map(|record| record.num_satellites)
            .minmax()
        {
            MinMaxResult::NoElements => None,
            MinMaxResult::OneElement(n) => Some((n, n)),
            MinMaxResult::MinMax(min, max) => Some((min, max)),
        };

        Self {
            max_dop,
            satellites,
        }
    }
}

/// Everything derived from one solution log
#[derive(Clone, Debug)]
pub struct Session {
    pub store: EpochRecordStore,
    pub consistency: ConsistencyReport,
    /// Present when the log was loaded with the extended schema
    pub accuracy: Option<AccuracyReport>,
    /// Present when the configuration names a true position
    pub offsets: Option<EcefOffsets>,
    pub geometry: GeometrySummary,
}

/// Load a solution log and analyze it in one pass.
///
/// Nothing partial is returned: any failure aborts the run for this file.
///
/// # Errors
/// Returns an error if the file cannot be read or loaded with `schema`, or if the analysis fails.
pub fn analyze_file(
    path: &Path,
    schema: RecordSchema,
    config: &AnalysisConfig,
) -> Result<Session> {
    let table = Table::from_path(path)?;
    let store = EpochRecordStore::load(&table, schema)?;
    let consistency = store.check_consistency();

    let accuracy = match schema {
        RecordSchema::Extended => Some(analyze(&store, config)?),
        RecordSchema::Minimal => None,
    };
    let offsets = config
        .true_position
        .map(|truth| EcefOffsets::from_store(&store, &truth));
    let geometry = GeometrySummary::from_store(&store);

    info!("analyzed {} epochs from {path:?}", store.len());
    Ok(Session {
        store,
        consistency,
        accuracy,
        offsets,
        geometry,
    })
}
