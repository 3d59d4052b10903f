//! This file defines some functions that checks some pre-conditions.
//! E.g., range of the configuration values.
//! Every check runs before training, never mid-algorithm.

use crate::error::{C45Error, Result};


/// The maximal number of trials the trial runner accepts.
pub const MAX_TRIALS: usize = 10_000;


/// Check whether the train/test split percentage is in `[0, 100]`.
#[inline(always)]
pub fn check_percentage_split(percentage: f64) -> Result<()> {
    if !(0f64..=100f64).contains(&percentage) {
        return Err(C45Error::config(format!(
            "split percentage must be in range 0 - 100, got {percentage}"
        )));
    }
    Ok(())
}


/// Check whether the number of trials is in `1..=MAX_TRIALS`.
#[inline(always)]
pub fn check_trials(trials: usize) -> Result<()> {
    if !(1..=MAX_TRIALS).contains(&trials) {
        return Err(C45Error::config(format!(
            "trial count must be in range 1 - {MAX_TRIALS}, got {trials}"
        )));
    }
    Ok(())
}


/// Check the z-value of the pessimistic error estimate.
#[inline(always)]
pub fn check_z_value(z: f64) -> Result<()> {
    if !z.is_finite() || z < 0f64 {
        return Err(C45Error::config(format!(
            "z-value must be a non-negative finite number, got {z}"
        )));
    }
    Ok(())
}


/// Check the minimal number of instances per leaf.
#[inline(always)]
pub fn check_min_instances(min_instances: usize) -> Result<()> {
    if min_instances == 0 {
        return Err(C45Error::config(
            "minimum instances per leaf must be positive"
        ));
    }
    Ok(())
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_bounds_are_inclusive() {
        assert!(check_percentage_split(0.0).is_ok());
        assert!(check_percentage_split(100.0).is_ok());
        assert!(check_percentage_split(-0.1).is_err());
        assert!(check_percentage_split(100.1).is_err());
        assert!(check_percentage_split(f64::NAN).is_err());
    }

    #[test]
    fn trials_must_be_positive_and_bounded() {
        assert!(check_trials(0).is_err());
        assert!(check_trials(1).is_ok());
        assert!(check_trials(MAX_TRIALS).is_ok());
        assert!(check_trials(MAX_TRIALS + 1).is_err());
    }

    #[test]
    fn z_value_must_be_finite() {
        assert!(check_z_value(0.69).is_ok());
        assert!(check_z_value(f64::INFINITY).is_err());
        assert!(check_z_value(-1.0).is_err());
    }
}
