use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage type of a source column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Text,
    Number,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::Text => write!(f, "text"),
            ValueKind::Number => write!(f, "number"),
        }
    }
}

/// Semantic fields of one PBEV table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Category,
    Brand,
    Model,
    Version,
    Engine,
    Powertrain,
    Transmission,
    AirConditioning,
    PowerSteering,
    Fuel,
    NmogNox,
    Co,
    Cho,
    PollutantReduction,
    Co2Ethanol,
    Co2GasolineDiesel,
    Co2ePlugIn,
    EthanolCity,
    EthanolHighway,
    FossilCity,
    FossilHighway,
    ElectricCity,
    ElectricHighway,
    EnergyConsumption,
    ElectricRange,
    RatingInCategory,
    RatingOverall,
    ConpetSeal,
}

impl Field {
    /// Every field, in the column order of the published report.
    pub const ALL: [Field; 28] = [
        Field::Category,
        Field::Brand,
        Field::Model,
        Field::Version,
        Field::Engine,
        Field::Powertrain,
        Field::Transmission,
        Field::AirConditioning,
        Field::PowerSteering,
        Field::Fuel,
        Field::NmogNox,
        Field::Co,
        Field::Cho,
        Field::PollutantReduction,
        Field::Co2Ethanol,
        Field::Co2GasolineDiesel,
        Field::Co2ePlugIn,
        Field::EthanolCity,
        Field::EthanolHighway,
        Field::FossilCity,
        Field::FossilHighway,
        Field::ElectricCity,
        Field::ElectricHighway,
        Field::EnergyConsumption,
        Field::ElectricRange,
        Field::RatingInCategory,
        Field::RatingOverall,
        Field::ConpetSeal,
    ];

    pub fn kind(self) -> ValueKind {
        match self {
            Field::NmogNox
            | Field::Co
            | Field::Cho
            | Field::Co2Ethanol
            | Field::Co2GasolineDiesel
            | Field::Co2ePlugIn
            | Field::EthanolCity
            | Field::EthanolHighway
            | Field::FossilCity
            | Field::FossilHighway
            | Field::ElectricCity
            | Field::ElectricHighway
            | Field::EnergyConsumption
            | Field::ElectricRange => ValueKind::Number,
            _ => ValueKind::Text,
        }
    }

    /// Key used in schema files.
    pub fn key(self) -> &'static str {
        match self {
            Field::Category => "category",
            Field::Brand => "brand",
            Field::Model => "model",
            Field::Version => "version",
            Field::Engine => "engine",
            Field::Powertrain => "powertrain",
            Field::Transmission => "transmission",
            Field::AirConditioning => "air_conditioning",
            Field::PowerSteering => "power_steering",
            Field::Fuel => "fuel",
            Field::NmogNox => "nmog_nox",
            Field::Co => "co",
            Field::Cho => "cho",
            Field::PollutantReduction => "pollutant_reduction",
            Field::Co2Ethanol => "co2_ethanol",
            Field::Co2GasolineDiesel => "co2_gasoline_diesel",
            Field::Co2ePlugIn => "co2e_plug_in",
            Field::EthanolCity => "ethanol_city",
            Field::EthanolHighway => "ethanol_highway",
            Field::FossilCity => "fossil_city",
            Field::FossilHighway => "fossil_highway",
            Field::ElectricCity => "electric_city",
            Field::ElectricHighway => "electric_highway",
            Field::EnergyConsumption => "energy_consumption",
            Field::ElectricRange => "electric_range",
            Field::RatingInCategory => "rating_in_category",
            Field::RatingOverall => "rating_overall",
            Field::ConpetSeal => "conpet_seal",
        }
    }

    /// Column header used in the exported files.
    ///
    /// Headers carry the report's group hierarchy and units, e.g.
    /// "Consumo Etanol - Cidade (km/l)".
    pub fn label(self) -> &'static str {
        match self {
            Field::Category => "Categoria",
            Field::Brand => "Marca",
            Field::Model => "Modelo",
            Field::Version => "Versão",
            Field::Engine => "Motor",
            Field::Powertrain => "Tipo de Propulsão (Combustão / Híbrido / Plug-in / Elétrico)",
            Field::Transmission => "Transmissão e Velocidades (Manual=M / Automática=A / Dupla Embreagem=DCT / Automatizada=MTA / Contínua=CVT)",
            Field::AirConditioning => "Ar Condicionado (S=Sim / N=Não)",
            Field::PowerSteering => "Direção Assistida (H=Hidráulica / M=Mecânica / E=Elétrica / E-H=Eletro-hidráulica)",
            Field::Fuel => "Combustível (E=Elétrico / G=Gasolina / F=Flex / D=Diesel)",
            Field::NmogNox => "Emissões Poluentes - NMOG+NOx (mg/km)",
            Field::Co => "Emissões Poluentes - CO (mg/km)",
            Field::Cho => "Emissões Poluentes - CHO Aldeídos (mg/km)",
            Field::PollutantReduction => "Emissões Poluentes - Redução Relativa ao Limite (A=≥40% abaixo PROCONVE L7 / B=<40%)",
            Field::Co2Ethanol => "Emissões GEE - CO2 Fóssil Etanol (g/km)",
            Field::Co2GasolineDiesel => "Emissões GEE - CO2 Fóssil Gasolina ou Diesel (g/km)",
            Field::Co2ePlugIn => "Emissões GEE - CO2e Fóssil VEHP Plug-in (g/km)",
            Field::EthanolCity => "Consumo Etanol - Cidade (km/l)",
            Field::EthanolHighway => "Consumo Etanol - Estrada (km/l)",
            Field::FossilCity => "Consumo Gasolina ou Diesel - Cidade (km/l)",
            Field::FossilHighway => "Consumo Gasolina ou Diesel - Estrada (km/l)",
            Field::ElectricCity => "Consumo Elétrico - Cidade (km/le)",
            Field::ElectricHighway => "Consumo Elétrico - Estrada (km/le)",
            Field::EnergyConsumption => "Consumo Energético (MJ/km)",
            Field::ElectricRange => "Autonomia Modo Elétrico (km)",
            Field::RatingInCategory => "Classificação PBE - Relativa na Categoria (A=Mais Eficiente / B / C / D / E=Menos Eficiente)",
            Field::RatingOverall => "Classificação PBE - Absoluta Geral (A=Mais Eficiente / B / C / D / E=Menos Eficiente)",
            Field::ConpetSeal => "Selo CONPET de Eficiência Energética (SIM / NÃO)",
        }
    }
}
