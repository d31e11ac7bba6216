use crate::model::{CellValue, VehicleRow};
use crate::schema::{Field, ValueKind};

/// A column of the exported table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputColumn {
    Source(Field),
    TransmissionType,
    GearCount,
    FuelDescription,
    FossilCombined,
    EthanolCombined,
    ElectricCombined,
    Co2Band,
    ZeroEmission,
    Electrified,
}

/// Derived columns, in export order after the source columns.
pub const DERIVED_COLUMNS: [OutputColumn; 9] = [
    OutputColumn::TransmissionType,
    OutputColumn::GearCount,
    OutputColumn::FuelDescription,
    OutputColumn::FossilCombined,
    OutputColumn::EthanolCombined,
    OutputColumn::ElectricCombined,
    OutputColumn::Co2Band,
    OutputColumn::ZeroEmission,
    OutputColumn::Electrified,
];

/// All exported columns: the 28 source columns, then the derived ones.
pub fn output_columns() -> Vec<OutputColumn> {
    Field::ALL
        .iter()
        .map(|&f| OutputColumn::Source(f))
        .chain(DERIVED_COLUMNS)
        .collect()
}

impl OutputColumn {
    pub fn label(self) -> &'static str {
        match self {
            OutputColumn::Source(field) => field.label(),
            OutputColumn::TransmissionType => "Transmissão - Tipo",
            OutputColumn::GearCount => "Transmissão - Nº Velocidades",
            OutputColumn::FuelDescription => "Combustível - Descrição",
            OutputColumn::FossilCombined => "Consumo Gasolina ou Diesel - Combinado (km/l)",
            OutputColumn::EthanolCombined => "Consumo Etanol - Combinado (km/l)",
            OutputColumn::ElectricCombined => "Consumo Elétrico - Combinado (km/le)",
            OutputColumn::Co2Band => "Faixa CO2 Gasolina/Diesel (g/km)",
            OutputColumn::ZeroEmission => "Zero Emissão (Elétrico Puro)",
            OutputColumn::Electrified => "Eletrificado (Elétrico/Híbrido/Plug-in)",
        }
    }

    /// Value type shown in the column dictionary.
    pub fn type_name(self) -> &'static str {
        match self {
            OutputColumn::Source(field) => match field.kind() {
                ValueKind::Text => "texto",
                ValueKind::Number => "decimal",
            },
            OutputColumn::TransmissionType | OutputColumn::FuelDescription => "texto",
            OutputColumn::GearCount => "inteiro",
            OutputColumn::FossilCombined
            | OutputColumn::EthanolCombined
            | OutputColumn::ElectricCombined => "decimal",
            OutputColumn::Co2Band => "categoria",
            OutputColumn::ZeroEmission | OutputColumn::Electrified => "booleano",
        }
    }

    pub fn value(self, row: &VehicleRow) -> CellValue {
        let d = &row.derived;
        match self {
            OutputColumn::Source(field) => row.record.value(field),
            OutputColumn::TransmissionType => CellValue::from(d.transmission_type.clone()),
            OutputColumn::GearCount => d
                .gear_count
                .map(|g| CellValue::Integer(u64::from(g)))
                .unwrap_or(CellValue::Empty),
            OutputColumn::FuelDescription => CellValue::from(d.fuel_description.clone()),
            OutputColumn::FossilCombined => CellValue::from(d.fossil_combined),
            OutputColumn::EthanolCombined => CellValue::from(d.ethanol_combined),
            OutputColumn::ElectricCombined => CellValue::from(d.electric_combined),
            OutputColumn::Co2Band => d
                .co2_band
                .map(|b| CellValue::Text(b.label().to_string()))
                .unwrap_or(CellValue::Empty),
            OutputColumn::ZeroEmission => CellValue::Bool(d.zero_emission),
            OutputColumn::Electrified => CellValue::Bool(d.electrified),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derive::derive_row;
    use crate::model::VehicleRecord;
    use rust_decimal_macros::dec;

    #[test]
    fn test_column_order() {
        let columns = output_columns();
        assert_eq!(columns.len(), 37);
        assert_eq!(columns[0].label(), "Categoria");
        assert_eq!(columns[27], OutputColumn::Source(Field::ConpetSeal));
        assert_eq!(columns[28].label(), "Transmissão - Tipo");
        assert_eq!(columns[36].label(), "Eletrificado (Elétrico/Híbrido/Plug-in)");
    }

    #[test]
    fn test_values_of_derived_columns() {
        let row = derive_row(VehicleRecord {
            brand: Some("Fiat".into()),
            transmission: Some("M-5".into()),
            co2_gasoline_diesel: Some(dec!(96)),
            ..Default::default()
        });
        assert_eq!(OutputColumn::GearCount.value(&row), CellValue::Integer(5));
        assert_eq!(OutputColumn::Co2Band.value(&row), CellValue::Text("51-100".into()));
        assert_eq!(OutputColumn::Electrified.value(&row), CellValue::Bool(false));
        assert_eq!(OutputColumn::FossilCombined.value(&row), CellValue::Empty);
    }
}
