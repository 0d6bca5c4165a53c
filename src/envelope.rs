use log::debug;
use ndarray::{Array1, ArrayView1};

use crate::config::NoiseModel;
use crate::schema::Column;
use crate::store::EpochRecordStore;
use crate::Result;

/// Symmetric per epoch half widths of the expected error, one series per axis.
///
/// Each series is aligned with the epochs of the store it was derived from. The envelope is not
/// validated: a negative or zero DOP gives a negative or zero half width.
#[derive(Clone, Debug, PartialEq)]
pub struct UncertaintyEnvelope {
    pub east: Array1<f64>,
    pub north: Array1<f64>,
    pub up: Array1<f64>,
}

impl UncertaintyEnvelope {
    /// Scale HDOP by the horizontal sigmas and VDOP by the vertical sigma
    pub fn from_dop(
        hdop: ArrayView1<'_, f64>,
        vdop: ArrayView1<'_, f64>,
        noise: &NoiseModel,
    ) -> Self {
        Self {
            east: hdop.mapv(|h| h * noise.sigma_east),
            north: hdop.mapv(|h| h * noise.sigma_north),
            up: vdop.mapv(|v| v * noise.sigma_up),
        }
    }

    /// Derive the envelope for every epoch of `store`
    ///
    /// # Errors
    /// Returns [`crate::Error::Schema`] if the store was loaded without HDOP or VDOP.
    pub fn derive(store: &EpochRecordStore, noise: &NoiseModel) -> Result<Self> {
        let hdop = store.column(Column::Hdop)?;
        let vdop = store.column(Column::Vdop)?;
        debug!("deriving uncertainty envelope over {} epochs with {noise:?}", store.len());
        Ok(Self::from_dop(hdop, vdop, noise))
    }

    pub fn len(&self) -> usize {
        self.east.len()
    }

    pub fn is_empty(&self) -> bool {
        self.east.is_empty()
    }

    /// Lower and upper band edges for an axis, as drawn around a zero error line
    pub fn band(half_width: &Array1<f64>) -> (Array1<f64>, Array1<f64>) {
        (half_width.mapv(|w| -w), half_width.clone())
    }
}
