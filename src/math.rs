use ndarray::ArrayView1;
use num_traits::Float;

use crate::{Error, Result};

fn length<T: Float>(series: &ArrayView1<'_, T>) -> Result<T> {
    if series.is_empty() {
        return Err(Error::EmptyInput);
    }
    // A length always fits a float, possibly losing precision
    Ok(T::from(series.len()).unwrap_or_else(T::nan))
}

/// Larger of two values, returning `NaN` if either is `NaN`
///
/// [`Float::max`] skips a `NaN` operand instead.
///
/// # Examples
///
/// ```
/// use gnss_accuracy::math::nan_max;
///
/// assert_eq!(nan_max(1.0, 2.5), 2.5);
/// assert!(nan_max(f64::NAN, 2.5).is_nan());
/// assert!(nan_max(2.5, f64::NAN).is_nan());
/// ```
pub fn nan_max<T: Float>(a: T, b: T) -> T {
    if a.is_nan() || b.is_nan() {
        T::nan()
    } else {
        a.max(b)
    }
}

/// Arithmetic mean of a series
///
/// # Examples
///
/// ```
/// use gnss_accuracy::math::mean;
/// use ndarray::aview1;
///
/// let mean = mean(aview1(&[1., 2., 3., 4., 5.])).unwrap();
/// assert_eq!(mean, 3.);
/// ```
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty series.
pub fn mean<T: Float>(series: ArrayView1<'_, T>) -> Result<T> {
    let n = length(&series)?;
    Ok(series.fold(T::zero(), |acc, &x| acc + x) / n)
}

/// Population variance of a series, normalised by $n$ rather than $n - 1$
///
/// $$
///     \sigma^2 = \frac{1}{n} \sum_i \left(e_i - \bar{e}\right)^2
/// $$
///
/// # Examples
///
/// ```
/// use gnss_accuracy::math::population_variance;
/// use ndarray::aview1;
///
/// let variance = population_variance(aview1(&[5., -5.])).unwrap();
/// assert_eq!(variance, 25.);
/// ```
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty series.
pub fn population_variance<T: Float>(series: ArrayView1<'_, T>) -> Result<T> {
    let n = length(&series)?;
    let mean = mean(series)?;
    Ok(series.fold(T::zero(), |acc, &x| acc + (x - mean).powi(2)) / n)
}

/// Root mean square of a series
///
/// # Examples
///
/// ```
/// use gnss_accuracy::math::root_mean_square;
/// use ndarray::aview1;
///
/// let rms = root_mean_square(aview1(&[3., -4.])).unwrap();
/// assert!((rms - 12.5f64.sqrt()).abs() < 1e-12);
/// ```
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty series.
pub fn root_mean_square<T: Float>(series: ArrayView1<'_, T>) -> Result<T> {
    let n = length(&series)?;
    Ok((series.fold(T::zero(), |acc, &x| acc + x.powi(2)) / n).sqrt())
}

/// Largest absolute value of a series
///
/// Unlike [`Float::max`] a `NaN` anywhere in the series is returned rather than skipped.
///
/// # Errors
/// Returns [`Error::EmptyInput`] for an empty series.
pub fn max_abs<T: Float>(series: ArrayView1<'_, T>) -> Result<T> {
    length(&series)?;
    Ok(series.fold(T::zero(), |acc, &x| nan_max(acc, x.abs())))
}
