use crate::schema::{Field, ValueKind};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cell of a table region as extracted from the PDF.
pub type RawCell = Option<String>;

/// One row of a table region, cells in left-to-right order.
pub type RawRow = Vec<RawCell>;

/// A vehicle row of the report, one field per schema column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub category: Option<String>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub version: Option<String>,
    pub engine: Option<String>,
    pub powertrain: Option<String>,
    pub transmission: Option<String>,
    pub air_conditioning: Option<String>,
    pub power_steering: Option<String>,
    pub fuel: Option<String>,
    pub nmog_nox: Option<Decimal>,
    pub co: Option<Decimal>,
    pub cho: Option<Decimal>,
    pub pollutant_reduction: Option<String>,
    pub co2_ethanol: Option<Decimal>,
    pub co2_gasoline_diesel: Option<Decimal>,
    pub co2e_plug_in: Option<Decimal>,
    pub ethanol_city: Option<Decimal>,
    pub ethanol_highway: Option<Decimal>,
    pub fossil_city: Option<Decimal>,
    pub fossil_highway: Option<Decimal>,
    pub electric_city: Option<Decimal>,
    pub electric_highway: Option<Decimal>,
    pub energy_consumption: Option<Decimal>,
    pub electric_range: Option<Decimal>,
    pub rating_in_category: Option<String>,
    pub rating_overall: Option<String>,
    pub conpet_seal: Option<String>,
}

impl VehicleRecord {
    /// Mutable slot of a text field; `None` for numeric fields.
    pub fn text_slot(&mut self, field: Field) -> Option<&mut Option<String>> {
        let slot = match field {
            Field::Category => &mut self.category,
            Field::Brand => &mut self.brand,
            Field::Model => &mut self.model,
            Field::Version => &mut self.version,
            Field::Engine => &mut self.engine,
            Field::Powertrain => &mut self.powertrain,
            Field::Transmission => &mut self.transmission,
            Field::AirConditioning => &mut self.air_conditioning,
            Field::PowerSteering => &mut self.power_steering,
            Field::Fuel => &mut self.fuel,
            Field::PollutantReduction => &mut self.pollutant_reduction,
            Field::RatingInCategory => &mut self.rating_in_category,
            Field::RatingOverall => &mut self.rating_overall,
            Field::ConpetSeal => &mut self.conpet_seal,
            _ => return None,
        };
        Some(slot)
    }

    /// Mutable slot of a numeric field; `None` for text fields.
    pub fn number_slot(&mut self, field: Field) -> Option<&mut Option<Decimal>> {
        let slot = match field {
            Field::NmogNox => &mut self.nmog_nox,
            Field::Co => &mut self.co,
            Field::Cho => &mut self.cho,
            Field::Co2Ethanol => &mut self.co2_ethanol,
            Field::Co2GasolineDiesel => &mut self.co2_gasoline_diesel,
            Field::Co2ePlugIn => &mut self.co2e_plug_in,
            Field::EthanolCity => &mut self.ethanol_city,
            Field::EthanolHighway => &mut self.ethanol_highway,
            Field::FossilCity => &mut self.fossil_city,
            Field::FossilHighway => &mut self.fossil_highway,
            Field::ElectricCity => &mut self.electric_city,
            Field::ElectricHighway => &mut self.electric_highway,
            Field::EnergyConsumption => &mut self.energy_consumption,
            Field::ElectricRange => &mut self.electric_range,
            _ => return None,
        };
        Some(slot)
    }

    /// Text value of a text field; `None` for numeric fields or absent values.
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Category => &self.category,
            Field::Brand => &self.brand,
            Field::Model => &self.model,
            Field::Version => &self.version,
            Field::Engine => &self.engine,
            Field::Powertrain => &self.powertrain,
            Field::Transmission => &self.transmission,
            Field::AirConditioning => &self.air_conditioning,
            Field::PowerSteering => &self.power_steering,
            Field::Fuel => &self.fuel,
            Field::PollutantReduction => &self.pollutant_reduction,
            Field::RatingInCategory => &self.rating_in_category,
            Field::RatingOverall => &self.rating_overall,
            Field::ConpetSeal => &self.conpet_seal,
            _ => return None,
        };
        value.as_deref()
    }

    /// Numeric value of a numeric field; `None` for text fields or absent values.
    pub fn number(&self, field: Field) -> Option<Decimal> {
        match field {
            Field::NmogNox => self.nmog_nox,
            Field::Co => self.co,
            Field::Cho => self.cho,
            Field::Co2Ethanol => self.co2_ethanol,
            Field::Co2GasolineDiesel => self.co2_gasoline_diesel,
            Field::Co2ePlugIn => self.co2e_plug_in,
            Field::EthanolCity => self.ethanol_city,
            Field::EthanolHighway => self.ethanol_highway,
            Field::FossilCity => self.fossil_city,
            Field::FossilHighway => self.fossil_highway,
            Field::ElectricCity => self.electric_city,
            Field::ElectricHighway => self.electric_highway,
            Field::EnergyConsumption => self.energy_consumption,
            Field::ElectricRange => self.electric_range,
            _ => None,
        }
    }

    /// Value of any field as an output cell.
    pub fn value(&self, field: Field) -> CellValue {
        match field.kind() {
            ValueKind::Text => CellValue::from(self.text(field).map(str::to_string)),
            ValueKind::Number => CellValue::from(self.number(field)),
        }
    }
}

/// CO2 emission band of the fossil gasoline/diesel figure (g/km).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Co2Band {
    #[serde(rename = "0-50")]
    UpTo50,
    #[serde(rename = "51-100")]
    UpTo100,
    #[serde(rename = "101-150")]
    UpTo150,
    #[serde(rename = "151-200")]
    UpTo200,
    #[serde(rename = "201-250")]
    UpTo250,
    #[serde(rename = "250+")]
    Above250,
}

impl Co2Band {
    pub fn label(self) -> &'static str {
        match self {
            Co2Band::UpTo50 => "0-50",
            Co2Band::UpTo100 => "51-100",
            Co2Band::UpTo150 => "101-150",
            Co2Band::UpTo200 => "151-200",
            Co2Band::UpTo250 => "201-250",
            Co2Band::Above250 => "250+",
        }
    }
}

impl fmt::Display for Co2Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Columns computed from a record after assembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Derived {
    pub transmission_type: Option<String>,
    pub gear_count: Option<u32>,
    pub fuel_description: Option<String>,
    pub fossil_combined: Option<Decimal>,
    pub ethanol_combined: Option<Decimal>,
    pub electric_combined: Option<Decimal>,
    pub co2_band: Option<Co2Band>,
    pub zero_emission: bool,
    pub electrified: bool,
}

/// A row of the output table: the normalized record plus derived columns.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VehicleRow {
    pub record: VehicleRecord,
    pub derived: Derived,
}

/// A typed output cell, shared by the spreadsheet and CSV writers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(Decimal),
    Integer(u64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map(CellValue::Text).unwrap_or(CellValue::Empty)
    }
}

impl From<Option<Decimal>> for CellValue {
    fn from(value: Option<Decimal>) -> Self {
        value.map(CellValue::Number).unwrap_or(CellValue::Empty)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(d) => write!(f, "{}", d.normalize()),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Bool(true) => write!(f, "True"),
            CellValue::Bool(false) => write!(f, "False"),
        }
    }
}
