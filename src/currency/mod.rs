//! Locale-aware money rendering and amount parsing.

use std::str::FromStr;

use chrono::{DateTime, Local, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, LedgerResult};

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("ARS")
    }
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub date_pattern: String,
    pub time_pattern: String,
}

impl LocaleConfig {
    /// Spanish (Argentina): `$12.500,75`, `14/03/2025`, `18:05`.
    pub fn es_ar() -> Self {
        Self {
            language_tag: "es-AR".into(),
            decimal_separator: ',',
            grouping_separator: '.',
            date_pattern: "%d/%m/%Y".into(),
            time_pattern: "%H:%M".into(),
        }
    }

    pub fn en_us() -> Self {
        Self {
            language_tag: "en-US".into(),
            decimal_separator: '.',
            grouping_separator: ',',
            date_pattern: "%m/%d/%Y".into(),
            time_pattern: "%H:%M".into(),
        }
    }

    /// Resolves a language tag, falling back to es-AR for unknown tags.
    pub fn for_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "en-us" | "en" => Self::en_us(),
            _ => Self::es_ar(),
        }
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        Self::es_ar()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum NegativeStyle {
    Sign,
    Parentheses,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormatOptions {
    pub currency: CurrencyCode,
    pub negative_style: NegativeStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            currency: CurrencyCode::default(),
            negative_style: NegativeStyle::Sign,
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "ARS" | "USD" | "MXN" | "CLP" | "COP" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "BRL" => "R$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> u32 {
    match code {
        "JPY" | "CLP" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

/// Renders `value` with the locale's separators and a fixed number of decimals.
pub fn format_number(locale: &LocaleConfig, value: Decimal, precision: u32) -> String {
    let rounded = value.round_dp_with_strategy(precision, RoundingStrategy::MidpointAwayFromZero);
    let body = format!("{:.*}", precision as usize, rounded);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = insert_grouping(int_part, locale.grouping_separator);
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, locale.decimal_separator, frac),
        None => grouped,
    }
}

fn insert_grouping(int_part: &str, separator: char) -> String {
    match int_part.strip_prefix('-') {
        Some(digits) => format!("-{}", group_digits(digits, separator)),
        None => group_digits(int_part, separator),
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

pub fn format_currency_value(
    amount: Decimal,
    locale: &LocaleConfig,
    options: &FormatOptions,
) -> String {
    let precision = minor_units_for(options.currency.as_str());
    let symbol = options.currency.symbol();
    let body = format_number(locale, amount.abs(), precision);
    let is_negative = amount.is_sign_negative() && !amount.is_zero();
    if !is_negative {
        return format!("{}{}", symbol, body);
    }
    match options.negative_style {
        NegativeStyle::Sign => format!("-{}{}", symbol, body),
        NegativeStyle::Parentheses => format!("({}{})", symbol, body),
    }
}

/// Formats `amount` in the locale's default currency presentation.
pub fn format_currency(amount: Decimal, locale: &LocaleConfig) -> String {
    format_currency_value(amount, locale, &FormatOptions::default())
}

pub fn format_date(locale: &LocaleConfig, timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(&locale.date_pattern)
        .to_string()
}

pub fn format_time(locale: &LocaleConfig, timestamp: DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format(&locale.time_pattern)
        .to_string()
}

/// Parses user-typed money such as `1000`, `12,5`, `12.50` or `$1.000,50`.
///
/// A comma is always the decimal separator. A lone dot followed by at most two
/// digits is read as a decimal point; otherwise dots must be thousands
/// separators between groups of three digits. At most two decimals are kept.
/// Signs are rejected: direction comes from the transaction kind.
pub fn parse_amount_input(input: &str) -> LedgerResult<Decimal> {
    let trimmed = input.trim();
    let trimmed = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidAmount("amount is required".into()));
    }
    let normalized = normalize_amount_text(trimmed).ok_or_else(|| {
        LedgerError::InvalidAmount(format!("`{}` is not a valid amount", input.trim()))
    })?;
    Decimal::from_str(&normalized).map_err(|_| {
        LedgerError::InvalidAmount(format!("`{}` is not a valid amount", input.trim()))
    })
}

fn normalize_amount_text(text: &str) -> Option<String> {
    if !text
        .chars()
        .all(|ch| ch.is_ascii_digit() || ch == '.' || ch == ',')
    {
        return None;
    }
    let (int_part, frac_part) = if text.contains(',') {
        let (int_part, frac_part) = text.split_once(',')?;
        if frac_part.contains(',') || frac_part.contains('.') {
            return None;
        }
        (strip_grouping(int_part)?, frac_part)
    } else if text.matches('.').count() == 1 {
        let (int_part, frac_part) = text.split_once('.')?;
        if frac_part.len() <= 2 {
            (plain_digits(int_part)?, frac_part)
        } else {
            (strip_grouping(text)?, "")
        }
    } else {
        (strip_grouping(text)?, "")
    };
    if frac_part.len() > 2 {
        return None;
    }
    if frac_part.is_empty() {
        Some(int_part)
    } else {
        Some(format!("{}.{}", int_part, frac_part))
    }
}

fn plain_digits(text: &str) -> Option<String> {
    if !text.is_empty() && text.chars().all(|ch| ch.is_ascii_digit()) {
        Some(text.to_string())
    } else {
        None
    }
}

fn strip_grouping(text: &str) -> Option<String> {
    let mut groups = text.split('.');
    let first = groups.next()?;
    if first.is_empty() || (text.contains('.') && first.len() > 3) {
        return None;
    }
    let mut digits = plain_digits(first)?;
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(&plain_digits(group)?);
    }
    Some(digits)
}
