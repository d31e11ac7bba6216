//! Derived columns, computed per record once the table is assembled.

use crate::model::{Co2Band, Derived, VehicleRecord, VehicleRow};
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::LazyLock;

pub const ELECTRIC: &str = "Elétrico";
pub const HYBRID: &str = "Híbrido";
pub const PLUG_IN: &str = "Plug-in";
pub const COMBUSTION: &str = "Combustão";

pub const SEAL_YES: &str = "SIM";
pub const SEAL_NO: &str = "NÃO";

static GEAR_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").unwrap());
static DIGITS_AND_HYPHENS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\d]").unwrap());

/// Normalize a record and compute its derived columns.
///
/// The powertrain and seal columns are rewritten in place; everything else
/// lands in [`Derived`].
pub fn derive_row(mut record: VehicleRecord) -> VehicleRow {
    record.powertrain = record.powertrain.map(|p| standardize_powertrain(&p));
    record.conpet_seal = Some(normalize_seal(record.conpet_seal.as_deref()).to_string());

    let powertrain = record.powertrain.as_deref();
    let derived = Derived {
        transmission_type: record.transmission.as_deref().and_then(transmission_type),
        gear_count: record.transmission.as_deref().and_then(gear_count),
        fuel_description: record.fuel.as_deref().map(fuel_description),
        fossil_combined: combined_consumption(record.fossil_city, record.fossil_highway),
        ethanol_combined: combined_consumption(record.ethanol_city, record.ethanol_highway),
        electric_combined: combined_consumption(record.electric_city, record.electric_highway),
        co2_band: record.co2_gasoline_diesel.and_then(co2_band),
        zero_emission: is_zero_emission(powertrain),
        electrified: is_electrified(powertrain),
    };

    VehicleRow { record, derived }
}

/// Map a powertrain label to its canonical spelling; unknown labels pass through.
pub fn standardize_powertrain(raw: &str) -> String {
    match raw.to_lowercase().as_str() {
        "combustão" | "combustao" => COMBUSTION.to_string(),
        "híbrido" | "hibrido" => HYBRID.to_string(),
        "plug-in" => PLUG_IN.to_string(),
        "elétrico" | "eletrico" => ELECTRIC.to_string(),
        _ => raw.to_string(),
    }
}

/// Transmission code without gear count: "M-5" -> "M", "DCT-7" -> "DCT".
pub fn transmission_type(raw: &str) -> Option<String> {
    let stripped = DIGITS_AND_HYPHENS.replace_all(raw, "");
    let stripped = stripped.trim();
    if stripped.is_empty() {
        None
    } else {
        Some(stripped.to_string())
    }
}

/// First run of digits in the transmission code.
pub fn gear_count(raw: &str) -> Option<u32> {
    GEAR_COUNT.find(raw)?.as_str().parse().ok()
}

pub fn fuel_description(code: &str) -> String {
    match code {
        "E" => "Elétrico",
        "G" => "Gasolina",
        "F" => "Flex",
        "D" => "Diesel",
        other => other,
    }
    .to_string()
}

/// Combined cycle: 55% city, 45% highway, two decimals.
pub fn combined_consumption(city: Option<Decimal>, highway: Option<Decimal>) -> Option<Decimal> {
    let city = city?;
    let highway = highway?;
    Some((Decimal::new(55, 2) * city + Decimal::new(45, 2) * highway).round_dp(2))
}

/// Band of a fossil CO2 figure in g/km; negative values have no band.
pub fn co2_band(co2: Decimal) -> Option<Co2Band> {
    if co2.is_sign_negative() && !co2.is_zero() {
        return None;
    }
    let band = if co2 <= Decimal::from(50) {
        Co2Band::UpTo50
    } else if co2 <= Decimal::from(100) {
        Co2Band::UpTo100
    } else if co2 <= Decimal::from(150) {
        Co2Band::UpTo150
    } else if co2 <= Decimal::from(200) {
        Co2Band::UpTo200
    } else if co2 <= Decimal::from(250) {
        Co2Band::UpTo250
    } else {
        Co2Band::Above250
    };
    Some(band)
}

pub fn is_zero_emission(powertrain: Option<&str>) -> bool {
    powertrain == Some(ELECTRIC)
}

pub fn is_electrified(powertrain: Option<&str>) -> bool {
    matches!(powertrain, Some(ELECTRIC | HYBRID | PLUG_IN))
}

/// "SIM" (any case, padded) stays "SIM"; everything else, absent included, is "NÃO".
pub fn normalize_seal(raw: Option<&str>) -> &'static str {
    match raw {
        Some(s) if s.trim().to_uppercase() == SEAL_YES => SEAL_YES,
        _ => SEAL_NO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_standardize_powertrain() {
        assert_eq!(standardize_powertrain("COMBUSTÃO"), "Combustão");
        assert_eq!(standardize_powertrain("hibrido"), "Híbrido");
        assert_eq!(standardize_powertrain("Plug-In"), "Plug-in");
        assert_eq!(standardize_powertrain("Eletrico"), "Elétrico");
        assert_eq!(standardize_powertrain("Hidrogênio"), "Hidrogênio");
    }

    #[test]
    fn test_transmission_split() {
        assert_eq!(transmission_type("M-5").as_deref(), Some("M"));
        assert_eq!(gear_count("M-5"), Some(5));
        assert_eq!(transmission_type("DCT-7").as_deref(), Some("DCT"));
        assert_eq!(gear_count("A-10"), Some(10));
        assert_eq!(transmission_type("CVT").as_deref(), Some("CVT"));
        assert_eq!(gear_count("CVT"), None);
        assert_eq!(transmission_type("1"), None);
    }

    #[test]
    fn test_fuel_description() {
        assert_eq!(fuel_description("F"), "Flex");
        assert_eq!(fuel_description("E"), "Elétrico");
        assert_eq!(fuel_description("G/E"), "G/E");
    }

    #[test]
    fn test_combined_consumption() {
        assert_eq!(combined_consumption(Some(dec!(10.0)), Some(dec!(12.0))), Some(dec!(10.9)));
        assert_eq!(combined_consumption(Some(dec!(14.0)), Some(dec!(16.0))), Some(dec!(14.90)));
        assert_eq!(combined_consumption(Some(dec!(11.3)), Some(dec!(13.7))), Some(dec!(12.38)));
    }

    #[test]
    fn test_combined_consumption_propagates_absent() {
        assert_eq!(combined_consumption(None, Some(dec!(12.0))), None);
        assert_eq!(combined_consumption(Some(dec!(10.0)), None), None);
    }

    #[test]
    fn test_co2_band_edges() {
        assert_eq!(co2_band(dec!(0)), Some(Co2Band::UpTo50));
        assert_eq!(co2_band(dec!(50)), Some(Co2Band::UpTo50));
        assert_eq!(co2_band(dec!(50.01)), Some(Co2Band::UpTo100));
        assert_eq!(co2_band(dec!(100)), Some(Co2Band::UpTo100));
        assert_eq!(co2_band(dec!(250)), Some(Co2Band::UpTo250));
        assert_eq!(co2_band(dec!(250.5)), Some(Co2Band::Above250));
        assert_eq!(co2_band(dec!(1200)), Some(Co2Band::Above250));
        assert_eq!(co2_band(dec!(-1)), None);
    }

    #[test]
    fn test_flags() {
        assert!(is_zero_emission(Some("Elétrico")));
        assert!(!is_zero_emission(Some("Híbrido")));
        assert!(is_electrified(Some("Plug-in")));
        assert!(!is_electrified(Some("Combustão")));
        assert!(!is_electrified(None));
    }

    #[test]
    fn test_normalize_seal() {
        assert_eq!(normalize_seal(Some(" sim ")), "SIM");
        assert_eq!(normalize_seal(Some("Não")), "NÃO");
        assert_eq!(normalize_seal(Some("SIM*")), "NÃO");
        assert_eq!(normalize_seal(None), "NÃO");
    }

    #[test]
    fn test_derive_row() {
        let record = VehicleRecord {
            brand: Some("BYD".into()),
            powertrain: Some("eletrico".into()),
            fuel: Some("E".into()),
            electric_city: Some(dec!(60.1)),
            electric_highway: Some(dec!(50.3)),
            conpet_seal: Some("Sim".into()),
            ..Default::default()
        };
        let row = derive_row(record);
        assert_eq!(row.record.powertrain.as_deref(), Some("Elétrico"));
        assert_eq!(row.record.conpet_seal.as_deref(), Some("SIM"));
        assert_eq!(row.derived.fuel_description.as_deref(), Some("Elétrico"));
        assert_eq!(row.derived.electric_combined, Some(dec!(55.69)));
        assert_eq!(row.derived.fossil_combined, None);
        assert_eq!(row.derived.co2_band, None);
        assert_eq!(row.derived.transmission_type, None);
        assert!(row.derived.zero_emission);
        assert!(row.derived.electrified);
    }
}
