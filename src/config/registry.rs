//! Built-in sensor registry
//!
//! Default descriptor table for a stock pellet boiler installation, used
//! when the configuration supplies no sensor list. Constructed once at
//! first access and read-only afterwards.

use super::{DeviceClass, SensorConfig, StateClass, ValueKind};
use once_cell::sync::Lazy;

/// Cumulative energy endpoint. The controller pre-scales this one data
/// point in the opposite direction, so the conversion policy multiplies
/// by the factor here instead of dividing.
pub const TOTAL_ENERGY_URI: &str = "/user/var/40/10021/0/0/12016";

fn sensor(
    uri: &str,
    name: &str,
    unit: Option<&str>,
    factor: f64,
    decimals: u32,
    kind: ValueKind,
    device_class: Option<DeviceClass>,
    state_class: Option<StateClass>,
) -> SensorConfig {
    SensorConfig {
        uri: uri.to_string(),
        name: name.to_string(),
        unit: unit.map(str::to_string),
        factor,
        decimals,
        kind,
        device_class,
        state_class,
    }
}

/// Default sensor descriptors
pub static DEFAULT_SENSORS: Lazy<Vec<SensorConfig>> = Lazy::new(|| {
    use DeviceClass::*;
    use StateClass::*;

    vec![
        sensor(
            "/user/var/120/10601/0/0/12208",
            "Puffer Status",
            None,
            1.0,
            0,
            ValueKind::Status,
            None,
            None,
        ),
        sensor(
            "/user/var/120/10601/0/0/12197",
            "Außentemperatur",
            Some("°C"),
            10.0,
            1,
            ValueKind::Numeric,
            Some(Temperature),
            Some(Measurement),
        ),
        sensor(
            "/user/var/40/10021/0/0/12077",
            "Angeforderte Leistung",
            Some("kW"),
            1.0,
            2,
            ValueKind::Numeric,
            Some(Power),
            Some(Measurement),
        ),
        sensor(
            "/user/var/40/10021/0/0/12006",
            "Angeforderte Temperatur",
            Some("°C"),
            10.0,
            1,
            ValueKind::Numeric,
            Some(Temperature),
            Some(Measurement),
        ),
        sensor(
            "/user/var/40/10021/0/11109/0",
            "Kessel",
            Some("°C"),
            10.0,
            1,
            ValueKind::Numeric,
            Some(Temperature),
            Some(Measurement),
        ),
        sensor(
            "/user/var/40/10021/0/11110/0",
            "Abgas",
            Some("°C"),
            10.0,
            1,
            ValueKind::Numeric,
            Some(Temperature),
            Some(Measurement),
        ),
        sensor(
            "/user/var/40/10201/0/0/12015",
            "Pelletsvorrat",
            Some("kg"),
            10.0,
            0,
            ValueKind::Numeric,
            Some(Weight),
            Some(Measurement),
        ),
        sensor(
            "/user/var/120/10601/0/0/12528",
            "Puffer geladen",
            Some("%"),
            10.0,
            1,
            ValueKind::Numeric,
            Some(Battery),
            Some(Measurement),
        ),
        sensor(
            "/user/var/120/10601/0/0/13932",
            "Warmwasser Aus Fühler",
            Some("°C"),
            10.0,
            1,
            ValueKind::Numeric,
            Some(Temperature),
            Some(Measurement),
        ),
        // 4.8 kWh/kg divided by the controller's scale factor of 10
        sensor(
            TOTAL_ENERGY_URI,
            "Gesamt Energieverbrauch",
            Some("kWh"),
            0.48,
            1,
            ValueKind::Numeric,
            Some(Energy),
            Some(TotalIncreasing),
        ),
    ]
});
