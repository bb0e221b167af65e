use chrono::NaiveDate;

use crate::{entities::ProcedureRecord, presentation::currency_codec::CurrencyCodec};

use super::utils::format_date;

const TITLE: &str = "Relatório de Procedimentos";
const TEXT_COLUMN_WIDTH: usize = 26;

/// Plain-text tabular report of a record sequence, one row per record. Long
/// hospital and procedure names wrap within their columns.
pub(crate) struct ReportPrinter<'a> {
    codec: &'a CurrencyCodec,
}

impl<'a> ReportPrinter<'a> {
    pub(crate) fn new(codec: &'a CurrencyCodec) -> Self {
        Self { codec }
    }

    pub(crate) fn print(&self, records: &[ProcedureRecord], generated_on: NaiveDate) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", TITLE));
        output.push_str(&format!("Gerado em: {}\n\n", format_date(generated_on)));

        let header = self.row(
            "Data",
            "Região",
            "UF",
            "Hospital",
            "Procedimento",
            "Qtd",
            "Valor Pago",
        );
        output.push_str(&header);
        let rule = "-".repeat(header.trim_end().chars().count());
        output.push_str(&format!("{}\n", rule));

        for r in records {
            self.print_record(&mut output, r);
        }

        output
    }

    fn print_record(&self, output: &mut String, r: &ProcedureRecord) {
        let hospital = textwrap::wrap(&r.hospital_unit, TEXT_COLUMN_WIDTH);
        let procedure = textwrap::wrap(&r.procedure_name, TEXT_COLUMN_WIDTH);
        let height = hospital.len().max(procedure.len()).max(1);
        let date = format_date(r.date);
        let qty = self.codec.format_quantity(r.qty_performed);
        let paid = self.codec.format(r.value_paid);

        for i in 0..height {
            let first = i == 0;
            output.push_str(&self.row(
                if first { date.as_str() } else { "" },
                if first { r.region.label() } else { "" },
                if first { r.state.code() } else { "" },
                hospital.get(i).map_or("", |s| &**s),
                procedure.get(i).map_or("", |s| &**s),
                if first { qty.as_str() } else { "" },
                if first { paid.as_str() } else { "" },
            ));
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn row(
        &self,
        date: &str,
        region: &str,
        state: &str,
        hospital: &str,
        procedure: &str,
        qty: &str,
        paid: &str,
    ) -> String {
        let line = format!(
            "{:10}  {:12}  {:2}  {:w$}  {:w$}  {:>7}  {:>16}",
            date,
            region,
            state,
            hospital,
            procedure,
            qty,
            paid,
            w = TEXT_COLUMN_WIDTH,
        );
        format!("{}\n", line.trim_end())
    }
}
