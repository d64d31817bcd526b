use rust_decimal::Decimal;
use serde::Serialize;

use crate::currency::{format_currency_value, FormatOptions, LocaleConfig};
use crate::ledger::Ledger;

/// Aggregates shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerSummary {
    pub balance: Decimal,
    pub total_income: Decimal,
    pub total_expenses: Decimal,
    pub transaction_count: usize,
}

/// Presentation-ready strings for a [`LedgerSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSummary {
    pub balance: String,
    pub total_income: String,
    pub total_expenses: String,
    pub transaction_count: usize,
}

pub struct SummaryService;

impl SummaryService {
    pub fn summarize(ledger: &Ledger) -> LedgerSummary {
        let summary = LedgerSummary {
            balance: ledger.balance(),
            total_income: ledger.total_income(),
            total_expenses: ledger.total_expenses(),
            transaction_count: ledger.len(),
        };
        tracing::debug!(?summary, "ledger summary computed");
        summary
    }

    pub fn render(
        summary: &LedgerSummary,
        locale: &LocaleConfig,
        options: &FormatOptions,
    ) -> RenderedSummary {
        RenderedSummary {
            balance: format_currency_value(summary.balance, locale, options),
            total_income: format_currency_value(summary.total_income, locale, options),
            total_expenses: format_currency_value(summary.total_expenses, locale, options),
            transaction_count: summary.transaction_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::TransactionInput;
    use std::str::FromStr;

    #[test]
    fn summary_renders_home_screen_values() {
        let mut ledger = Ledger::new();
        ledger
            .add(TransactionInput::income(
                Decimal::from_str("12500.75").unwrap(),
                "Banco",
            ))
            .unwrap();
        ledger
            .add(TransactionInput::expense(
                Decimal::from_str("3200.5").unwrap(),
                "Alquiler",
                "Banco",
            ))
            .unwrap();

        let summary = SummaryService::summarize(&ledger);
        assert_eq!(summary.transaction_count, 2);

        let rendered =
            SummaryService::render(&summary, &LocaleConfig::es_ar(), &FormatOptions::default());
        assert_eq!(rendered.balance, "$9.300,25");
        assert_eq!(rendered.total_income, "$12.500,75");
        assert_eq!(rendered.total_expenses, "$3.200,50");
    }

    #[test]
    fn empty_ledger_summarizes_to_zero() {
        let summary = SummaryService::summarize(&Ledger::new());
        assert_eq!(summary.balance, Decimal::ZERO);
        assert_eq!(summary.total_expenses, Decimal::ZERO);
        assert_eq!(summary.transaction_count, 0);
    }
}
