use crate::{
    entities::ProcedureRecord, errors::LedgerError, presentation::currency_codec::CurrencyCodec,
};

use super::utils::format_date;

const HEADER: [&str; 6] = [
    "Data",
    "Região",
    "Estado",
    "Hospital",
    "Procedimento",
    "Valor Pago",
];

/// Spreadsheet-friendly export: BOM-prefixed UTF-8, `;`-delimited, comma
/// decimal mark.
pub(crate) struct CsvExporter<'a> {
    codec: &'a CurrencyCodec,
}

impl<'a> CsvExporter<'a> {
    pub(crate) fn new(codec: &'a CurrencyCodec) -> Self {
        Self { codec }
    }

    pub(crate) fn export(&self, records: &[ProcedureRecord]) -> Result<String, LedgerError> {
        let failed = |e: &dyn std::fmt::Display| LedgerError::ExportFailure {
            details: e.to_string(),
        };

        let mut writer = csv::WriterBuilder::new()
            .delimiter(b';')
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(vec![]);
        writer.write_record(HEADER).map_err(|e| failed(&e))?;
        for r in records {
            writer
                .write_record([
                    format_date(r.date).as_str(),
                    r.region.label(),
                    r.state.code(),
                    r.hospital_unit.as_str(),
                    r.procedure_name.as_str(),
                    self.codec.render_plain(r.value_paid).as_str(),
                ])
                .map_err(|e| failed(&e))?;
        }
        let bytes = writer.into_inner().map_err(|e| failed(&e))?;
        let body = String::from_utf8(bytes).map_err(|e| failed(&e))?;
        Ok(format!("\u{FEFF}{}", body))
    }
}
