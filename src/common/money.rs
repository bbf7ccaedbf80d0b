// src/common/money.rs

use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::error::AppError;

/// Cotação usada para preencher o valor que faltar num pedido (INR por 1 USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeRate {
    inr_per_usd: Decimal,
}

impl ExchangeRate {
    pub const DEFAULT_INR_PER_USD: i64 = 83;

    /// Retorna `None` para cotações não positivas.
    pub fn new(inr_per_usd: Decimal) -> Option<Self> {
        (inr_per_usd > Decimal::ZERO).then_some(Self { inr_per_usd })
    }

    pub fn inr_per_usd(&self) -> Decimal {
        self.inr_per_usd
    }

    pub fn inr_to_usd(&self, inr: Decimal) -> Result<Decimal, AppError> {
        inr.checked_div(self.inr_per_usd).map(round_cents).ok_or_else(out_of_range)
    }

    pub fn usd_to_inr(&self, usd: Decimal) -> Result<Decimal, AppError> {
        usd.checked_mul(self.inr_per_usd).map(round_cents).ok_or_else(out_of_range)
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self {
            inr_per_usd: Decimal::from(Self::DEFAULT_INR_PER_USD),
        }
    }
}

/// Soma que falha em vez de estourar o limite do `Decimal`.
pub fn checked_total(amounts: impl IntoIterator<Item = Decimal>) -> Result<Decimal, AppError> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(out_of_range)
}

fn out_of_range() -> AppError {
    AppError::InvalidInput("Amount is out of range".to_string())
}

pub fn round_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Agrupamento indiano: 1,23,45,678.50
pub fn format_inr(amount: Decimal) -> String {
    format_grouped(amount, |digits| {
        let len = digits.len();
        if len <= 3 {
            return digits.to_string();
        }
        let (head, tail) = digits.split_at(len - 3);
        let mut groups: Vec<&str> = Vec::new();
        let mut end = head.len();
        while end > 0 {
            let start = end.saturating_sub(2);
            groups.push(&head[start..end]);
            end = start;
        }
        groups.reverse();
        format!("{},{}", groups.join(","), tail)
    })
}

/// Agrupamento ocidental: 12,345,678.50
pub fn format_usd(amount: Decimal) -> String {
    format_grouped(amount, |digits| {
        let mut groups: Vec<&str> = Vec::new();
        let mut end = digits.len();
        while end > 0 {
            let start = end.saturating_sub(3);
            groups.push(&digits[start..end]);
            end = start;
        }
        groups.reverse();
        groups.join(",")
    })
}

fn format_grouped(amount: Decimal, group: impl Fn(&str) -> String) -> String {
    let rounded = round_cents(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let plain = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = plain.split_once('.').unwrap_or((plain.as_str(), "00"));
    format!("{}{}.{}", sign, group(int_part), frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn indian_grouping() {
        assert_eq!(format_inr(dec!(0)), "0.00");
        assert_eq!(format_inr(dec!(999)), "999.00");
        assert_eq!(format_inr(dec!(1000)), "1,000.00");
        assert_eq!(format_inr(dec!(123456)), "1,23,456.00");
        assert_eq!(format_inr(dec!(12345678.5)), "1,23,45,678.50");
    }

    #[test]
    fn western_grouping() {
        assert_eq!(format_usd(dec!(12.345)), "12.35");
        assert_eq!(format_usd(dec!(1234.5)), "1,234.50");
        assert_eq!(format_usd(dec!(12345678.5)), "12,345,678.50");
        assert_eq!(format_usd(dec!(-1234)), "-1,234.00");
    }

    #[test]
    fn conversion_rounds_to_cents() {
        let rate = ExchangeRate::default();
        assert_eq!(rate.inr_to_usd(dec!(8300)).unwrap(), dec!(100));
        assert_eq!(rate.inr_to_usd(dec!(1000)).unwrap(), dec!(12.05));
        assert_eq!(rate.usd_to_inr(dec!(10)).unwrap(), dec!(830));
    }

    #[test]
    fn conversion_past_decimal_range_is_invalid_input() {
        let rate = ExchangeRate::default();
        assert!(matches!(rate.usd_to_inr(Decimal::MAX), Err(AppError::InvalidInput(_))));

        let cheap = ExchangeRate::new(dec!(0.5)).unwrap();
        assert!(matches!(cheap.inr_to_usd(Decimal::MAX), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn totals_stop_at_decimal_range() {
        assert_eq!(checked_total([dec!(1.50), dec!(2.25)]).unwrap(), dec!(3.75));
        assert_eq!(checked_total(Vec::new()).unwrap(), Decimal::ZERO);
        assert!(matches!(
            checked_total([Decimal::MAX, dec!(1)]),
            Err(AppError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_non_positive_rate() {
        assert!(ExchangeRate::new(Decimal::ZERO).is_none());
        assert!(ExchangeRate::new(dec!(-1)).is_none());
        assert_eq!(ExchangeRate::new(dec!(90)).unwrap().inr_per_usd(), dec!(90));
    }
}
