use super::partition::SupplierGroup;
use super::snapshot::ResolvedCartLine;
use rust_decimal::{Decimal, RoundingStrategy};
use uuid::Uuid;

/// Shipping policy input. The marketplace does not charge shipping yet, so
/// every supplier order carries a zero fee.
pub const SHIPPING_FEE: Decimal = Decimal::ZERO;

/// Rounds a monetary value to two decimal places, half away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Computed money amounts for one supplier order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplierTotals {
    pub supplier_id: Uuid,
    pub subtotal: Decimal,
    pub shipping_fee: Decimal,
    pub total_price: Decimal,
}

/// Authoritative totals for one checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutTotals {
    pub per_supplier: Vec<SupplierTotals>,
    pub grand_total: Decimal,
}

fn line_contribution(line: &ResolvedCartLine) -> Decimal {
    line.unit_price * Decimal::from(line.quantity) - line.discount_applied
}

fn supplier_subtotal(lines: &[ResolvedCartLine]) -> Decimal {
    round_money(lines.iter().map(line_contribution).sum())
}

/// Computes per-supplier subtotals and the grand total for the given
/// partitioned cart. Pure and deterministic.
///
/// The grand total sums the already-rounded supplier totals and rounds the
/// sum again. Double rounding is kept so totals stay penny-compatible with
/// historical orders; do not re-derive the grand total from raw line sums.
pub fn compute_totals(groups: &[SupplierGroup]) -> CheckoutTotals {
    let per_supplier: Vec<SupplierTotals> = groups
        .iter()
        .map(|group| {
            let subtotal = supplier_subtotal(&group.lines);
            SupplierTotals {
                supplier_id: group.supplier_id,
                subtotal,
                shipping_fee: SHIPPING_FEE,
                total_price: subtotal + SHIPPING_FEE,
            }
        })
        .collect();

    let grand_total = round_money(per_supplier.iter().map(|t| t.total_price).sum());

    CheckoutTotals {
        per_supplier,
        grand_total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn line(
        supplier_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        discount: Decimal,
    ) -> ResolvedCartLine {
        ResolvedCartLine {
            cart_item_id: Uuid::new_v4(),
            variant_id: Uuid::new_v4(),
            quantity,
            unit_price,
            discount_applied: discount,
            supplier_id,
        }
    }

    fn group(supplier_id: Uuid, lines: Vec<ResolvedCartLine>) -> SupplierGroup {
        SupplierGroup { supplier_id, lines }
    }

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_money(dec!(1.005)), dec!(1.01));
        assert_eq!(round_money(dec!(-1.005)), dec!(-1.01));
        assert_eq!(round_money(dec!(2.344)), dec!(2.34));
        assert_eq!(round_money(dec!(2.345)), dec!(2.35));
    }

    #[test]
    fn single_supplier_two_lines() {
        let supplier = Uuid::new_v4();
        let groups = vec![group(
            supplier,
            vec![
                line(supplier, 2, dec!(4.99), dec!(0)),
                line(supplier, 1, dec!(4.99), dec!(0)),
            ],
        )];

        let totals = compute_totals(&groups);

        assert_eq!(totals.per_supplier.len(), 1);
        assert_eq!(totals.per_supplier[0].subtotal, dec!(14.97));
        assert_eq!(totals.per_supplier[0].total_price, dec!(14.97));
        assert_eq!(totals.grand_total, dec!(14.97));
    }

    #[test]
    fn discount_reduces_line_contribution() {
        let supplier = Uuid::new_v4();
        let groups = vec![group(
            supplier,
            vec![line(supplier, 3, dec!(10.00), dec!(5.50))],
        )];

        let totals = compute_totals(&groups);
        assert_eq!(totals.per_supplier[0].subtotal, dec!(24.50));
    }

    #[test]
    fn grand_total_sums_pre_rounded_subtotals() {
        let supplier_a = Uuid::new_v4();
        let supplier_b = Uuid::new_v4();
        // Each subtotal rounds up individually: 1.005 -> 1.01.
        let groups = vec![
            group(supplier_a, vec![line(supplier_a, 1, dec!(1.005), dec!(0))]),
            group(supplier_b, vec![line(supplier_b, 1, dec!(1.005), dec!(0))]),
        ];

        let totals = compute_totals(&groups);

        // Summing rounded subtotals gives 2.02, not round(2.01) = 2.01.
        assert_eq!(totals.grand_total, dec!(2.02));
    }

    #[test]
    fn totals_are_deterministic() {
        let supplier = Uuid::new_v4();
        let groups = vec![group(
            supplier,
            vec![
                line(supplier, 2, dec!(4.99), dec!(0.25)),
                line(supplier, 5, dec!(13.37), dec!(1.00)),
            ],
        )];

        let first = compute_totals(&groups);
        let second = compute_totals(&groups);
        assert_eq!(first, second);
    }

    #[test]
    fn shipping_fee_is_zero() {
        assert_eq!(SHIPPING_FEE, Decimal::ZERO);
    }
}
