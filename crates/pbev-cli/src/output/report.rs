use pbev_core::columns::OutputColumn;
use pbev_core::export::OutputPaths;
use pbev_core::summary::{Co2Stats, RunReport};

const RULE_WIDTH: usize = 70;

pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n  {title}\n{rule}")
}

fn co2_line(stats: &Co2Stats, with_max: bool) -> String {
    let mut line = format!(
        "média={:.1}  mediana={:.0}",
        stats.mean.round_dp(1),
        stats.median.round_dp(0)
    );
    if with_max {
        line.push_str(&format!("  max={:.0}", stats.max.round_dp(0)));
    }
    line.push_str(" g/km");
    line
}

pub fn format_report(year: &str, report: &RunReport) -> String {
    let mut lines = vec![
        String::new(),
        banner(&format!("RELATÓRIO PBEV {year}")),
        format!("  Registros: {}", report.records),
        format!(
            "  Colunas: {} do PDF + {} derivadas = {}",
            report.source_columns,
            report.derived_columns,
            report.source_columns + report.derived_columns
        ),
        format!("  Marcas: {} | Modelos: {}", report.brands, report.models),
        String::new(),
        "  Propulsão:".to_string(),
    ];
    lines.extend(
        report
            .powertrains
            .iter()
            .map(|(powertrain, count)| format!("    {powertrain:12}: {count}")),
    );

    lines.push(String::new());
    lines.push("  CO2 Gasolina/Diesel:".to_string());
    if let Some(all) = &report.co2_all {
        lines.push(format!("    Todos:     {}", co2_line(all, true)));
    }
    if let Some(combustion) = &report.co2_combustion {
        lines.push(format!("    Combustão: {}", co2_line(combustion, false)));
    }
    lines.join("\n") + "\n"
}

pub fn format_columns(columns: &[OutputColumn]) -> String {
    let mut out = String::from("\n  Colunas finais:\n");
    for (i, column) in columns.iter().enumerate() {
        out.push_str(&format!("    {:2}. {}\n", i + 1, column.label()));
    }
    out
}

pub fn format_paths(paths: &OutputPaths) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!(
        "\n{rule}\n  Pronto! Arquivos salvos:\n     {}\n     {}\n{rule}\n",
        paths.xlsx.display(),
        paths.csv.display()
    )
}
