use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

/// Federal Investment Tax Credit share of total installed cost.
const ITC_RATE: Decimal = dec!(0.30);

/// Depreciable basis as a share of cost when the ITC is claimed: the basis
/// is reduced by half the credit.
const ITC_BASIS_FACTOR: Decimal = dec!(0.85);

/// ITC credit and depreciation amounts derived from total project cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncentiveSummary {
    pub itc_amount: Money,
    pub depreciable_basis: Money,
    pub after_itc_cost: Money,
    /// Full basis claimed in the placement year (100% bonus depreciation)
    pub year1_depreciation: Money,
    pub year1_depreciation_tax_savings: Money,
}

/// Derive the ITC credit amount and depreciable basis from total cost.
/// Pure function; the toggle models whether the project owner can claim
/// the 30% federal credit.
pub fn calculate_incentives(total_cost: Money, itc_enabled: bool, tax_bracket: Rate) -> IncentiveSummary {
    let (itc_amount, depreciable_basis) = if itc_enabled {
        (total_cost * ITC_RATE, total_cost * ITC_BASIS_FACTOR)
    } else {
        (Decimal::ZERO, total_cost)
    };

    let year1_depreciation = depreciable_basis;

    IncentiveSummary {
        itc_amount,
        depreciable_basis,
        after_itc_cost: total_cost - itc_amount,
        year1_depreciation,
        year1_depreciation_tax_savings: year1_depreciation * tax_bracket,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_with_itc() {
        let summary = calculate_incentives(dec!(224770), true, dec!(0.21));

        assert_eq!(summary.itc_amount, dec!(67431.00));
        assert_eq!(summary.after_itc_cost, dec!(224770) * dec!(0.70));
        assert_eq!(summary.depreciable_basis, dec!(224770) * dec!(0.85));
        assert_eq!(summary.year1_depreciation, summary.depreciable_basis);
        assert_eq!(
            summary.year1_depreciation_tax_savings,
            summary.depreciable_basis * dec!(0.21)
        );
    }

    #[test]
    fn test_without_itc() {
        let summary = calculate_incentives(dec!(100000), false, dec!(0.30));

        assert_eq!(summary.itc_amount, Decimal::ZERO);
        assert_eq!(summary.after_itc_cost, dec!(100000));
        assert_eq!(summary.depreciable_basis, dec!(100000));
        assert_eq!(summary.year1_depreciation_tax_savings, dec!(30000));
    }

    #[test]
    fn test_zero_tax_bracket() {
        let summary = calculate_incentives(dec!(100000), true, Decimal::ZERO);
        assert_eq!(summary.year1_depreciation_tax_savings, Decimal::ZERO);
    }
}
