use serde::Serialize;

/// One row of the code legend shipped with the workbook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendEntry {
    pub field: &'static str,
    pub code: &'static str,
    pub meaning: &'static str,
}

const fn entry(field: &'static str, code: &'static str, meaning: &'static str) -> LegendEntry {
    LegendEntry {
        field,
        code,
        meaning,
    }
}

/// Meaning of the codes and abbreviations used in the report.
pub const LEGEND: &[LegendEntry] = &[
    entry("Transmissão", "M", "Manual"),
    entry("Transmissão", "A", "Automática"),
    entry("Transmissão", "DCT", "Automática Dupla Embreagem"),
    entry("Transmissão", "MTA", "Automatizada"),
    entry("Transmissão", "CVT", "Contínua (Variação Contínua)"),
    entry("Transmissão", "Nº após hífen", "Quantidade de marchas (ex: M-5 = Manual 5 marchas)"),
    entry("Transmissão", "N.A. ou --", "Não se aplica (veículos elétricos)"),
    entry("Ar Condicionado", "S", "Sim"),
    entry("Ar Condicionado", "N", "Não"),
    entry("Direção Assistida", "H", "Hidráulica"),
    entry("Direção Assistida", "M", "Mecânica"),
    entry("Direção Assistida", "E", "Elétrica"),
    entry("Direção Assistida", "E-H", "Eletro-hidráulica"),
    entry("Combustível", "E", "Elétrico"),
    entry("Combustível", "G", "Gasolina"),
    entry("Combustível", "F", "Flex (Etanol / Gasolina)"),
    entry("Combustível", "D", "Diesel"),
    entry("Tipo de Propulsão", "Combustão", "Motor a combustão interna"),
    entry("Tipo de Propulsão", "Híbrido", "Combustão + elétrico (não recarregável na tomada)"),
    entry("Tipo de Propulsão", "Plug-in", "Híbrido recarregável na tomada (VEHP)"),
    entry("Tipo de Propulsão", "Elétrico", "100% elétrico (VE) - zero emissão no escapamento"),
    entry("Emissões Poluentes", "NMOG+NOx", "Hidrocarbonetos não-metano + Óxidos de Nitrogênio"),
    entry("Emissões Poluentes", "CO", "Monóxido de Carbono"),
    entry("Emissões Poluentes", "CHO", "Aldeídos (formaldeído + acetaldeído)"),
    entry("Emissões Poluentes", "ND", "Não Disponível (importados sem ensaio local)"),
    entry("Redução Relativa", "A", "≥ 40% abaixo do limite PROCONVE L7 (melhor)"),
    entry("Redução Relativa", "B", "< 40% abaixo do limite PROCONVE L7"),
    entry("Emissões GEE", "CO2 Fóssil Etanol", "CO2 fóssil ao usar Etanol (0 para flex pois etanol é renovável)"),
    entry("Emissões GEE", "CO2 Fóssil Gasolina/Diesel", "CO2 fóssil ao usar Gasolina ou Diesel"),
    entry("Emissões GEE", "CO2e VEHP", "CO2 equivalente fóssil para Plug-in (modo combinado)"),
    entry("Consumo (km/l)", "Cidade", "Ciclo urbano (mais paradas)"),
    entry("Consumo (km/l)", "Estrada", "Ciclo rodoviário (velocidade constante)"),
    entry("Consumo (km/l)", "Combinado", "55% cidade + 45% estrada (metodologia INMETRO)"),
    entry("Consumo (km/l)", "km/le", "Quilômetros por litro de gasolina equivalente (1L ≈ 8,9 kWh)"),
    entry("Consumo Energético", "MJ/km", "Megajoules por km - quanto menor, mais eficiente"),
    entry("Consumo Energético", "Referência", "Elétrico ~0.4-0.7 | Combustão ~1.4-1.6 | SUV diesel ~2.5-3.0"),
    entry("Classificação PBE", "A", "Mais eficiente (menor consumo energético)"),
    entry("Classificação PBE", "B", "Eficiente"),
    entry("Classificação PBE", "C", "Médio"),
    entry("Classificação PBE", "D", "Menos eficiente"),
    entry("Classificação PBE", "E", "Menos eficiente (maior consumo energético)"),
    entry("Classificação PBE", "Relativa na Categoria", "Compara com outros veículos da mesma categoria"),
    entry("Classificação PBE", "Absoluta Geral", "Compara com TODOS os veículos do programa"),
    entry("Selo CONPET", "SIM", "Recebeu selo de eficiência energética"),
    entry("Selo CONPET", "NÃO", "Não recebeu o selo"),
    entry("Categoria", "Sub Compacto", "Ex: Fiat Mobi, BYD Dolphin Mini"),
    entry("Categoria", "Compacto", "Ex: Fiat Argo, Hyundai HB20"),
    entry("Categoria", "Médio", "Ex: Audi A3, Toyota Corolla"),
    entry("Categoria", "Grande", "Ex: Mercedes C300, BMW 330i"),
    entry("Categoria", "Extra Grande", "Ex: BMW i4, Audi A6"),
    entry("Categoria", "Esportivo", "Ex: Porsche 911, BMW M3"),
    entry("Categoria", "Utilitário Esportivo Compacto", "SUVs compactos - ex: Creta, T-Cross"),
    entry("Categoria", "Utilitário Esportivo Grande", "SUVs grandes - ex: Commander, SW4"),
    entry("Categoria", "Utilitário Esp. Grande 4x4", "SUVs grandes com tração 4x4"),
    entry("Categoria", "Fora de Estrada Compacto", "Off-road compactos"),
    entry("Categoria", "Fora de Estrada Grande", "Off-road grandes - ex: Land Rover Defender"),
    entry("Categoria", "Picape", "Ex: Fiat Toro, Toyota Hilux"),
    entry("Categoria", "Picape Compacta", "Ex: Fiat Strada"),
    entry("Categoria", "Minivan", "Minivans"),
    entry("Categoria", "Comercial", "Veículos comerciais leves"),
    entry("Valores Especiais", "\\", "Não se aplica ao veículo"),
    entry("Valores Especiais", "-", "Sem informação / Não possui"),
    entry("Valores Especiais", "ND", "Não Disponível (ensaio não realizado)"),
    entry("Valores Especiais", "N.A.", "Não Aplicável"),
    entry("Valores Especiais", "vazio / None", "Campo vazio no PDF original"),
];
