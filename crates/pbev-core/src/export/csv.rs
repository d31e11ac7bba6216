use crate::columns::OutputColumn;
use crate::dataset::VehicleTable;
use crate::error::PbevError;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// UTF-8 byte-order mark, so spreadsheet tools pick the right encoding.
pub const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Write the full table as comma-separated UTF-8 with a leading BOM.
pub fn write_csv(path: &Path, table: &VehicleTable, columns: &[OutputColumn]) -> Result<(), PbevError> {
    let file = File::create(path).map_err(|e| PbevError::Export {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let mut out = BufWriter::new(file);
    out.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(columns.iter().map(|c| c.label()))?;
    for row in &table.rows {
        writer.write_record(columns.iter().map(|c| c.value(row).to_string()))?;
    }
    writer.flush()?;

    log::debug!("wrote {} row(s) to {}", table.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::columns::output_columns;
    use crate::model::VehicleRecord;
    use rust_decimal_macros::dec;

    #[test]
    fn test_csv_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let table = VehicleTable::from_records(vec![VehicleRecord {
            category: Some("Compacto".into()),
            brand: Some("Fiat".into()),
            model: Some("Argo, Drive".into()),
            fossil_city: Some(dec!(14.0)),
            fossil_highway: Some(dec!(16.0)),
            ..Default::default()
        }]);

        write_csv(&path, &table, &output_columns()).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Categoria,Marca,Modelo,"));
        let row = lines.next().unwrap();
        assert!(row.starts_with("Compacto,Fiat,\"Argo, Drive\",,"));
        assert!(row.contains(",14.9,"));
        assert!(row.ends_with(",NÃO,,,,14.9,,,,False,False"));
        assert_eq!(lines.next(), None);
    }
}
