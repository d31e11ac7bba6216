use pbev_core::error::PbevError;
use pbev_core::legend::LEGEND;

pub fn print() -> Result<(), PbevError> {
    let field_width = LEGEND
        .iter()
        .map(|e| e.field.chars().count())
        .max()
        .unwrap_or(10);
    let code_width = LEGEND
        .iter()
        .map(|e| e.code.chars().count())
        .max()
        .unwrap_or(10);

    let mut previous = "";
    for entry in LEGEND {
        if entry.field != previous && !previous.is_empty() {
            println!();
        }
        previous = entry.field;
        println!(
            "  {:<fw$}  {:<cw$}  {}",
            entry.field,
            entry.code,
            entry.meaning,
            fw = field_width,
            cw = code_width
        );
    }
    Ok(())
}
