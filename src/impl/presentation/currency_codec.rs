use std::sync::LazyLock;

use iso_currency::Currency;
use num_format::{CustomFormat, Grouping, ToFormattedString as _};
use rust_decimal::{prelude::ToPrimitive as _, Decimal};

/// pt-BR style grouping: '.' between thousands, ',' before the cents.
static GROUPED: LazyLock<CustomFormat> = LazyLock::new(|| {
    CustomFormat::builder()
        .grouping(Grouping::Standard)
        .separator(".")
        .build()
        .expect("hardcoded number format should be valid")
});

const DECIMAL_MARK: char = ',';

/// Converts monetary amounts between exact decimals and the grouped text
/// users read and edit, e.g. `R$ 1.500,00` / `1.500,00`.
///
/// Amounts always carry exactly 2 fractional digits, whatever the
/// currency's own exponent.
#[derive(Debug, Clone, Copy)]
pub struct CurrencyCodec {
    currency: Currency,
}

impl CurrencyCodec {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Display form, with the currency symbol.
    pub fn format(&self, amount: Decimal) -> String {
        let symbol = self.currency.symbol();
        format!("{} {}", symbol, self.render_for_edit(amount))
    }

    /// Edit form: grouped, no symbol.
    pub fn render_for_edit(&self, amount: Decimal) -> String {
        let (negative, integer, cents) = split(amount);
        format!(
            "{}{}{}{:02}",
            if negative { "-" } else { "" },
            integer.to_formatted_string(&*GROUPED),
            DECIMAL_MARK,
            cents
        )
    }

    /// Ungrouped form used in delimited exports, e.g. `21000,00`.
    pub fn render_plain(&self, amount: Decimal) -> String {
        let (negative, integer, cents) = split(amount);
        format!(
            "{}{}{}{:02}",
            if negative { "-" } else { "" },
            integer,
            DECIMAL_MARK,
            cents
        )
    }

    /// Only digits are significant and the last two are the cents, so
    /// `"1.500,00"` and `"150000"` both read as 1500.00. Anything without
    /// digits (or too large to represent) reads as zero.
    pub fn parse_edited_text(&self, text: &str) -> Decimal {
        let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
        digits
            .parse::<i128>()
            .ok()
            .and_then(|n| Decimal::try_from_i128_with_scale(n, 2).ok())
            .unwrap_or(Decimal::ZERO)
    }

    /// Reformats raw input as it is typed.
    pub fn mask_edited_text(&self, raw: &str) -> String {
        self.render_for_edit(self.parse_edited_text(raw))
    }

    pub fn format_quantity(&self, qty: u64) -> String {
        qty.to_formatted_string(&*GROUPED)
    }
}

impl Default for CurrencyCodec {
    fn default() -> Self {
        Self::new(Currency::BRL)
    }
}

fn split(amount: Decimal) -> (bool, u128, u32) {
    let negative = amount.is_sign_negative() && !amount.round_dp(2).is_zero();
    let rounded = amount.abs().round_dp(2);
    let integer = rounded.trunc();
    let cents = ((rounded - integer) * Decimal::ONE_HUNDRED)
        .to_u32()
        .unwrap_or_default();
    (negative, integer.to_u128().unwrap_or_default(), cents)
}
