//! Locale-aware rendering of [`Money`] values for the shell.

use crate::domain::Money;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

/// Symbol placement and separators used to render amounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyFormat {
    pub code: String,
    pub symbol: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub negative_style: NegativeStyle,
}

impl CurrencyFormat {
    /// Brazilian real: `R$ 1.234,56`.
    pub fn brl() -> Self {
        Self {
            code: "BRL".into(),
            symbol: "R$ ".into(),
            decimal_separator: ',',
            grouping_separator: '.',
            negative_style: NegativeStyle::Sign,
        }
    }

    /// US dollar: `$1,234.56`, negatives in accounting parentheses.
    pub fn usd() -> Self {
        Self {
            code: "USD".into(),
            symbol: "$".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            negative_style: NegativeStyle::Parentheses,
        }
    }

    /// Picks separators from the locale tag and the symbol from the currency code.
    pub fn for_locale(locale: &str, currency: &str) -> Self {
        let mut format = if locale.to_ascii_lowercase().starts_with("en") {
            Self::usd()
        } else {
            Self::brl()
        };
        let code = currency.trim().to_uppercase();
        format.symbol = symbol_for(&code);
        format.code = code;
        format
    }

    pub fn format(&self, amount: Money) -> String {
        format_currency(self, amount)
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::brl()
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "BRL" => "R$ ".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        _ => format!("{code} "),
    }
}

/// Absolute value of `amount` with grouping and two decimals, no sign or symbol.
pub fn format_number(format: &CurrencyFormat, amount: Money) -> String {
    let (units, cents) = amount.split_abs();
    format!(
        "{}{}{:02}",
        group_digits(&units.to_string(), format.grouping_separator),
        format.decimal_separator,
        cents
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency(format: &CurrencyFormat, amount: Money) -> String {
    let body = format!("{}{}", format.symbol, format_number(format, amount));
    if !amount.is_negative() {
        return body;
    }
    match format.negative_style {
        NegativeStyle::Sign => format!("-{body}"),
        NegativeStyle::Parentheses => format!("({body})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brl_groups_thousands_with_dots() {
        let brl = CurrencyFormat::brl();
        assert_eq!(brl.format(Money::from_cents(123_456)), "R$ 1.234,56");
        assert_eq!(brl.format(Money::from_cents(5)), "R$ 0,05");
        assert_eq!(brl.format(Money::from_cents(100_000_000)), "R$ 1.000.000,00");
    }

    #[test]
    fn negatives_follow_locale_style() {
        let brl = CurrencyFormat::for_locale("pt-BR", "BRL");
        assert_eq!(brl.negative_style, NegativeStyle::Sign);
        assert_eq!(brl.format(Money::from_cents(-800)), "-R$ 8,00");

        let usd = CurrencyFormat::for_locale("en-US", "USD");
        assert_eq!(usd.negative_style, NegativeStyle::Parentheses);
        assert_eq!(usd.format(Money::from_cents(-123_456)), "($1,234.56)");
        assert_eq!(usd.format(Money::from_cents(-800)), "($8.00)");
    }

    #[test]
    fn locale_selects_separators() {
        let format = CurrencyFormat::for_locale("en-US", "brl");
        assert_eq!(format.code, "BRL");
        assert_eq!(format.format(Money::from_cents(250_000)), "R$ 2,500.00");
        let format = CurrencyFormat::for_locale("pt-BR", "EUR");
        assert_eq!(format.format(Money::from_cents(1050)), "€10,50");
    }
}
