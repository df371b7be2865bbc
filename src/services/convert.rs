//! Unit conversion policy
//!
//! Turns a raw numeric reading into its display value: apply the
//! per-endpoint scale factor, then either round to the configured number
//! of decimal places or truncate to an integer.

use crate::config::registry::TOTAL_ENERGY_URI;
use crate::config::SensorConfig;
use crate::error::{EtaError, Result};
use crate::services::value_resolution::StateValue;

/// Apply scale factor and decimal policy to a raw numeric reading.
pub fn convert(raw: f64, sensor: &SensorConfig) -> Result<StateValue> {
    // The cumulative-energy endpoint is pre-scaled the other way around;
    // every other endpoint divides.
    let scaled = if sensor.uri == TOTAL_ENERGY_URI {
        raw * sensor.factor
    } else {
        raw / sensor.factor
    };

    if !scaled.is_finite() {
        return Err(EtaError::conversion(format!(
            "sensor '{}': raw value {raw} does not scale to a finite number",
            sensor.name
        )));
    }

    if sensor.decimals > 0 {
        let precision = 10f64.powi(sensor.decimals as i32);
        Ok(StateValue::Number((scaled * precision).round() / precision))
    } else {
        // Truncation, not rounding: legacy sensor values were produced by
        // an integer cast and consumers rely on that.
        Ok(StateValue::Integer(scaled as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValueKind;
    use pretty_assertions::assert_eq;

    fn sensor(uri: &str, factor: f64, decimals: u32) -> SensorConfig {
        SensorConfig {
            uri: uri.to_string(),
            name: "Test".to_string(),
            unit: None,
            factor,
            decimals,
            kind: ValueKind::Numeric,
            device_class: None,
            state_class: None,
        }
    }

    #[test]
    fn zero_decimals_truncates_instead_of_rounding() {
        // 19.96 / 10 = 1.996 would round to 2; the cast must yield 1.
        let value = convert(19.96, &sensor("/user/var/1", 10.0, 0)).unwrap();
        assert_eq!(value, StateValue::Integer(1));
    }

    #[test]
    fn truncation_is_toward_zero_for_negative_values() {
        let value = convert(-19.96, &sensor("/user/var/1", 10.0, 0)).unwrap();
        assert_eq!(value, StateValue::Integer(-1));
    }

    #[test]
    fn positive_decimals_round_to_that_many_places() {
        let value = convert(123.0, &sensor("/user/var/1", 10.0, 1)).unwrap();
        assert_eq!(value, StateValue::Number(12.3));

        let value = convert(225.0, &sensor("/user/var/1", 10.0, 1)).unwrap();
        assert_eq!(value, StateValue::Number(22.5));
    }

    #[test]
    fn energy_endpoint_multiplies_instead_of_dividing() {
        let value = convert(100.0, &sensor(TOTAL_ENERGY_URI, 0.48, 1)).unwrap();
        assert_eq!(value, StateValue::Number(48.0));

        // Any other endpoint with the same factor divides.
        let value = convert(100.0, &sensor("/user/var/other", 0.48, 1)).unwrap();
        assert_eq!(value, StateValue::Number(208.3));
    }

    #[test]
    fn unit_factor_passes_values_through() {
        let value = convert(7.0, &sensor("/user/var/1", 1.0, 2)).unwrap();
        assert_eq!(value, StateValue::Number(7.0));
    }

    #[test]
    fn non_finite_result_is_a_conversion_error() {
        let result = convert(f64::INFINITY, &sensor("/user/var/1", 10.0, 1));
        assert!(matches!(result, Err(EtaError::Conversion(_))));
    }
}
