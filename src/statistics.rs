use std::fmt;

use ndarray::ArrayView1;
use num_traits::Float;

use crate::math::{max_abs, mean, population_variance, root_mean_square};
use crate::Result;

/// Raw dispersion of an error series.
///
/// No windowing or outlier rejection is applied, every sample counts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Statistics<T> {
    pub max_abs_error: T,
    pub mean: T,
    /// Population standard deviation, normalised by $n$
    pub std_dev: T,
    pub rms: T,
}

impl<T: Float> Statistics<T> {
    /// # Errors
    /// Returns [`crate::Error::EmptyInput`] if `series` is empty.
    pub fn compute(series: ArrayView1<'_, T>) -> Result<Self> {
        Ok(Self {
            max_abs_error: max_abs(series)?,
            mean: mean(series)?,
            std_dev: population_variance(series)?.sqrt(),
            rms: root_mean_square(series)?,
        })
    }
}

/// [`Statistics`] for each local tangent plane axis
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisStatistics<T> {
    pub east: Statistics<T>,
    pub north: Statistics<T>,
    pub up: Statistics<T>,
}

impl<T: Float> AxisStatistics<T> {
    /// # Errors
    /// Returns [`crate::Error::EmptyInput`] if any series is empty.
    pub fn compute(
        east: ArrayView1<'_, T>,
        north: ArrayView1<'_, T>,
        up: ArrayView1<'_, T>,
    ) -> Result<Self> {
        Ok(Self {
            east: Statistics::compute(east)?,
            north: Statistics::compute(north)?,
            up: Statistics::compute(up)?,
        })
    }

    pub const fn axes(&self) -> [(&'static str, &Statistics<T>); 3] {
        [("East", &self.east), ("North", &self.north), ("Up", &self.up)]
    }
}

/// Console summary, one row per axis in meters to the millimeter
impl<T: Float + fmt::Display> fmt::Display for AxisStatistics<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<6} | {:>14} | {:>10} | {:>6} | {:>6}",
            "Axis", "Max Abs Error", "Mean Error", "STD", "RMS"
        )?;
        writeln!(f, "{}", "-".repeat(56))?;
        for (label, stats) in self.axes() {
            writeln!(
                f,
                "{label:<6} | {:>14.3} | {:>10.3} | {:>6.3} | {:>6.3}",
                stats.max_abs_error, stats.mean, stats.std_dev, stats.rms
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::{aview1, Array1};
    use ndarray_rand::rand::{Rng, SeedableRng};
    use proptest::prelude::*;
    use rand_isaac::Isaac64Rng;
    use rstest::rstest;

    use super::{AxisStatistics, Statistics};
    use crate::{Error, Result};

    #[test]
    fn empty_series_has_no_statistics() {
        let empty: [f64; 0] = [];
        assert!(matches!(
            Statistics::compute(aview1(&empty)),
            Err(Error::EmptyInput)
        ));
    }

    #[rstest]
    #[case(&[5.0, -5.0], 5.0, 0.0, 5.0, 5.0)]
    #[case(&[1.0, 2.0, 3.0, 4.0, 5.0], 5.0, 3.0, 1.414_213_56, 3.316_624_79)]
    #[case(&[1.0, -2.0, 0.5], 2.0, -0.166_666_67, 1.312_334_65, 1.322_875_66)]
    #[case(&[-4.25], 4.25, -4.25, 0.0, 4.25)]
    fn statistics_match_hand_computed_values(
        #[case] series: &[f64],
        #[case] max_abs_error: f64,
        #[case] mean: f64,
        #[case] std_dev: f64,
        #[case] rms: f64,
    ) -> Result<()> {
        let stats = Statistics::compute(aview1(series))?;
        assert_abs_diff_eq!(stats.max_abs_error, max_abs_error, epsilon = 1e-8);
        assert_abs_diff_eq!(stats.mean, mean, epsilon = 1e-8);
        assert_abs_diff_eq!(stats.std_dev, std_dev, epsilon = 1e-8);
        assert_abs_diff_eq!(stats.rms, rms, epsilon = 1e-8);
        Ok(())
    }

    #[test]
    fn standard_deviation_uses_population_normalisation() -> Result<()> {
        // Sample normalisation would give sqrt(50) here
        let stats = Statistics::compute(aview1(&[5.0, -5.0]))?;
        assert_relative_eq!(stats.std_dev, 5.0);
        Ok(())
    }

    #[test]
    fn constant_series_has_no_spread() -> Result<()> {
        let seed = 40;
        let mut rng = Isaac64Rng::seed_from_u64(seed);
        let value: f64 = rng.gen_range(-50.0..50.0);
        let series = Array1::from_elem(rng.gen_range(1..500usize), value);

        let stats = Statistics::compute(series.view())?;
        assert_relative_eq!(stats.mean, value, max_relative = 1e-12);
        assert_relative_eq!(stats.rms, value.abs(), max_relative = 1e-12);
        assert_relative_eq!(stats.max_abs_error, value.abs());
        assert_abs_diff_eq!(stats.std_dev, 0.0, epsilon = 1e-9);
        Ok(())
    }

    #[test]
    fn axes_are_computed_independently() -> Result<()> {
        let stats = AxisStatistics::compute(
            aview1(&[1.0, -2.0, 0.5]),
            aview1(&[5.0, -5.0]),
            aview1(&[1.0, 2.0, 3.0, 4.0, 5.0]),
        )?;
        assert_relative_eq!(stats.east.max_abs_error, 2.0);
        assert_relative_eq!(stats.north.std_dev, 5.0);
        assert_relative_eq!(stats.up.mean, 3.0);
        Ok(())
    }

    #[test]
    fn an_empty_axis_fails_the_whole_set() {
        let empty: [f64; 0] = [];
        let result = AxisStatistics::compute(aview1(&[1.0]), aview1(&empty), aview1(&[1.0]));
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn summary_table_has_a_row_per_axis() -> Result<()> {
        let stats = AxisStatistics::compute(
            aview1(&[1.0, -2.0, 0.5]),
            aview1(&[5.0, -5.0]),
            aview1(&[1.0, 2.0, 3.0, 4.0, 5.0]),
        )?;
        let table = stats.to_string();
        let lines = table.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("Axis   | "));
        assert_eq!(lines[2], "East   |          2.000 |     -0.167 |  1.312 |  1.323");
        assert!(lines[3].starts_with("North "));
        assert!(lines[4].starts_with("Up "));
        Ok(())
    }

    proptest! {
        #[test]
        fn rms_bounds_the_magnitude_of_the_mean(
            series in prop::collection::vec(-1.0e6..1.0e6f64, 1..200)
        ) {
            let stats = Statistics::compute(aview1(&series)).unwrap();
            prop_assert!(stats.rms >= stats.mean.abs() * (1.0 - 1e-12));
            prop_assert!(stats.max_abs_error >= stats.mean.abs() * (1.0 - 1e-12));
            prop_assert!(stats.max_abs_error >= stats.std_dev * (1.0 - 1e-12));
        }
    }
}
