//! Invoice totals: subtotal, discount, taxable amount, GST split and grand total

use bigdecimal::BigDecimal;

use crate::config::BillingConfig;
use crate::invoice::words::amount_in_words;
use crate::tax::gst::{GstError, GstSplit, TaxPolicy};
use crate::types::*;
use crate::utils::money::round2;

/// Compute the totals for a list of lines.
///
/// Every stage is rounded to paise before it feeds the next one:
/// 1. subtotal = Σ line amounts
/// 2. discount = percent of subtotal, or the flat amount, clamped to `[0, subtotal]`
/// 3. taxable = subtotal - discount
/// 4. sgst = cgst = taxable × half the GST rate
/// 5. grand total = taxable + sgst + cgst
pub fn compute_totals(
    lines: &[LineItem],
    discount_policy: &DiscountPolicy,
    tax_policy: &TaxPolicy,
) -> InvoiceTotals {
    let zero = BigDecimal::from(0);

    let subtotal = round2(&lines.iter().map(LineItem::amount).sum::<BigDecimal>());

    // Negative lines can pull the subtotal below zero; the discount never follows
    let ceiling = subtotal.clone().max(zero.clone());
    let discount = round2(
        &discount_policy
            .raw_discount(&subtotal)
            .max(zero.clone())
            .min(ceiling),
    );

    let mut taxable = &subtotal - &discount;
    if taxable < zero {
        taxable = zero;
    }
    let taxable = round2(&taxable);

    let GstSplit { sgst, cgst } = GstSplit::calculate(&taxable, tax_policy);
    let grand_total = round2(&(&taxable + &sgst + &cgst));

    InvoiceTotals {
        subtotal,
        discount,
        taxable,
        sgst,
        cgst,
        grand_total,
    }
}

/// Calculator bound to one tax policy
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceCalculator {
    tax_policy: TaxPolicy,
}

impl InvoiceCalculator {
    /// Create a calculator, rejecting unusable tax rates
    pub fn new(tax_policy: TaxPolicy) -> Result<Self, GstError> {
        tax_policy.validate()?;
        Ok(Self { tax_policy })
    }

    /// Calculator for the configured tax rate
    pub fn from_config(config: &BillingConfig) -> Result<Self, GstError> {
        Self::new(TaxPolicy::intra_state(config.tax_rate_percent.clone()))
    }

    /// Tax policy in use
    pub fn tax_policy(&self) -> &TaxPolicy {
        &self.tax_policy
    }

    /// Amount for a single line
    pub fn line_amount(&self, line: &LineItem) -> BigDecimal {
        line.amount()
    }

    /// Totals for a bill
    pub fn compute_totals(
        &self,
        lines: &[LineItem],
        discount_policy: &DiscountPolicy,
    ) -> InvoiceTotals {
        compute_totals(lines, discount_policy, &self.tax_policy)
    }

    /// Grand total of a bill, spelled out
    pub fn grand_total_in_words(&self, totals: &InvoiceTotals) -> String {
        amount_in_words(&totals.grand_total)
    }
}

impl Default for InvoiceCalculator {
    fn default() -> Self {
        Self {
            tax_policy: TaxPolicy::jewellery(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn chain() -> LineItem {
        LineItemInput::new("Gold chain 22K", 10.5, 5200i64, 250i64).resolve()
    }

    #[test]
    fn test_empty_bill_is_all_zero() {
        let totals = compute_totals(&[], &DiscountPolicy::none(), &TaxPolicy::jewellery());
        assert_eq!(totals, InvoiceTotals::zero());
        assert_eq!(totals.grand_total, BigDecimal::from(0));
    }

    #[test]
    fn test_single_line_without_discount() {
        let totals = InvoiceCalculator::default().compute_totals(&[chain()], &DiscountPolicy::none());

        assert_eq!(totals.subtotal, dec("54850.00"));
        assert_eq!(totals.discount, dec("0.00"));
        assert_eq!(totals.taxable, dec("54850.00"));
        assert_eq!(totals.sgst, dec("822.75"));
        assert_eq!(totals.cgst, dec("822.75"));
        assert_eq!(totals.grand_total, dec("56495.50"));
    }

    #[test]
    fn test_percent_discount_with_stepwise_rounding() {
        let totals = InvoiceCalculator::default()
            .compute_totals(&[chain()], &DiscountPolicy::percent(BigDecimal::from(10)));

        assert_eq!(totals.discount, dec("5485.00"));
        assert_eq!(totals.taxable, dec("49365.00"));
        assert_eq!(totals.sgst, dec("740.48"));
        assert_eq!(totals.cgst, dec("740.48"));
        assert_eq!(totals.grand_total, dec("50845.96"));
    }

    #[test]
    fn test_percent_ignores_absolute() {
        let policy = DiscountPolicy {
            percent: BigDecimal::from(10),
            absolute: BigDecimal::from(20000),
        };
        let totals = InvoiceCalculator::default().compute_totals(&[chain()], &policy);
        assert_eq!(totals.discount, dec("5485.00"));
    }

    #[test]
    fn test_absolute_discount() {
        let totals = InvoiceCalculator::default()
            .compute_totals(&[chain()], &DiscountPolicy::absolute(dec("850")));
        assert_eq!(totals.discount, dec("850"));
        assert_eq!(totals.taxable, dec("54000"));
        assert_eq!(totals.sgst, dec("810"));
        assert_eq!(totals.grand_total, dec("55620"));
    }

    #[test]
    fn test_discount_clamped_to_subtotal() {
        let calculator = InvoiceCalculator::default();

        let totals = calculator.compute_totals(&[chain()], &DiscountPolicy::absolute(dec("99999")));
        assert_eq!(totals.discount, totals.subtotal);
        assert_eq!(totals.taxable, BigDecimal::from(0));
        assert_eq!(totals.grand_total, BigDecimal::from(0));

        let totals = calculator.compute_totals(&[chain()], &DiscountPolicy::absolute(dec("-50")));
        assert_eq!(totals.discount, BigDecimal::from(0));
        assert_eq!(totals.taxable, totals.subtotal);

        let totals =
            calculator.compute_totals(&[chain()], &DiscountPolicy::percent(BigDecimal::from(150)));
        assert_eq!(totals.taxable, BigDecimal::from(0));
    }

    #[test]
    fn test_negative_subtotal_keeps_discount_at_zero() {
        let credit = LineItemInput::new("Old gold exchange", 1i64, "-100", 0i64).resolve();
        let calculator = InvoiceCalculator::default();

        let totals = calculator.compute_totals(&[credit.clone()], &DiscountPolicy::absolute(dec("50")));
        assert_eq!(totals.subtotal, dec("-100.00"));
        assert_eq!(totals.discount, BigDecimal::from(0));
        assert_eq!(totals.taxable, BigDecimal::from(0));
        assert_eq!(totals.grand_total, BigDecimal::from(0));

        let totals =
            calculator.compute_totals(&[credit], &DiscountPolicy::percent(BigDecimal::from(10)));
        assert_eq!(totals.discount, BigDecimal::from(0));
    }

    #[test]
    fn test_tax_split_symmetry_across_lines() {
        let lines = vec![
            chain(),
            LineItemInput::new("Silver anklet", "42.35", "₹92.40", "Rs 180").resolve(),
            LineItemInput::new("Earring studs", 3.2, "6,450", 0.0).resolve(),
        ];
        let totals = InvoiceCalculator::default().compute_totals(&lines, &DiscountPolicy::none());

        assert_eq!(totals.sgst, totals.cgst);
        assert_eq!(totals.sgst, round2(&(&totals.taxable * dec("0.015"))));
        assert_eq!(
            totals.grand_total,
            round2(&(&totals.taxable + &totals.sgst + &totals.cgst))
        );
    }

    #[test]
    fn test_calculator_rejects_bad_rate() {
        assert!(InvoiceCalculator::new(TaxPolicy::intra_state(BigDecimal::from(-3))).is_err());
    }

    #[test]
    fn test_words_for_grand_total() {
        let calculator = InvoiceCalculator::default();
        let totals = calculator.compute_totals(&[chain()], &DiscountPolicy::none());
        assert_eq!(
            calculator.grand_total_in_words(&totals),
            "Fifty Six Thousand Four Hundred and Ninety Five Rupees and 50/100 Paise Only"
        );
    }
}
