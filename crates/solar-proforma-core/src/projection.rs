use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::incentives::IncentiveSummary;
use crate::proforma::ProjectInputs;
use crate::srec::{self, KWH_PER_SREC};
use crate::types::{Money, Rate};

/// Fixed projection horizon.
pub const HORIZON_YEARS: u32 = 25;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One year of the cash-flow projection. Produced once, ordered by year,
/// never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    /// 1-based projection year
    pub year: u32,
    /// Escalated retail rate, $/kWh
    pub electric_rate: Rate,
    /// Degraded production, kWh
    pub production_kwh: Decimal,
    pub electric_savings: Money,
    pub srec_unit_value: Money,
    pub srec_count: Decimal,
    pub srec_income: Money,
    /// Bonus-depreciation tax savings; non-zero only in year 1
    pub tax_savings: Money,
    pub total_benefit: Money,
    /// Running total, seeded at -after_itc_cost before year 1
    pub cumulative_benefit: Money,
}

/// Grand totals across the projection horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionTotals {
    pub electric_savings: Money,
    pub srec_income: Money,
    pub tax_savings: Money,
    pub grand_total_benefit: Money,
    /// Final cumulative position: grand total less the after-ITC cost
    pub net_position: Money,
}

/// The 25-year record set with its totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowProjection {
    pub years: Vec<YearRecord>,
    pub totals: ProjectionTotals,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Project 25 annual periods: compound escalation on the electric rate,
/// compound degradation on production, the jurisdiction ACP schedule per
/// year, and a running cumulative benefit seeded at -after_itc_cost.
///
/// Year 1 uses the unescalated rate and full nameplate-derived production,
/// so the year-1 record matches the standalone year-1 metrics exactly.
/// Deterministic fold: identical inputs produce identical records.
pub fn project_cash_flows(
    inputs: &ProjectInputs,
    incentives: &IncentiveSummary,
) -> CashFlowProjection {
    let one_plus_escalation = Decimal::ONE + inputs.escalation.rate();
    let one_less_degradation = Decimal::ONE - inputs.degradation_rate;

    let mut electric_rate = inputs.electric_rate;
    let mut production = inputs.system_size_kw * inputs.tsrf;
    let mut cumulative = -incentives.after_itc_cost;

    let mut total_electric_savings = Decimal::ZERO;
    let mut total_srec_income = Decimal::ZERO;

    let mut years = Vec::with_capacity(HORIZON_YEARS as usize);

    for year in 1..=HORIZON_YEARS {
        if year > 1 {
            electric_rate *= one_plus_escalation;
            production *= one_less_degradation;
        }

        let electric_savings = production * electric_rate;
        let srec_unit_value =
            srec::srec_unit_value(inputs.jurisdiction, inputs.srec_program, year);
        let srec_count = production / KWH_PER_SREC;
        let srec_income = srec_count * srec_unit_value;
        let tax_savings = if year == 1 {
            incentives.year1_depreciation_tax_savings
        } else {
            Decimal::ZERO
        };
        let total_benefit = electric_savings + srec_income + tax_savings;
        cumulative += total_benefit;

        total_electric_savings += electric_savings;
        total_srec_income += srec_income;

        years.push(YearRecord {
            year,
            electric_rate,
            production_kwh: production,
            electric_savings,
            srec_unit_value,
            srec_count,
            srec_income,
            tax_savings,
            total_benefit,
            cumulative_benefit: cumulative,
        });
    }

    let tax_savings = incentives.year1_depreciation_tax_savings;
    let grand_total_benefit = total_electric_savings + total_srec_income + tax_savings;

    CashFlowProjection {
        years,
        totals: ProjectionTotals {
            electric_savings: total_electric_savings,
            srec_income: total_srec_income,
            tax_savings,
            grand_total_benefit,
            net_position: grand_total_benefit - incentives.after_itc_cost,
        },
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::incentives::calculate_incentives;
    use crate::metrics::calculate_year_one;
    use crate::proforma::tests::standard_inputs;
    use crate::types::{Jurisdiction, SrecProgram};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const TOLERANCE: Decimal = dec!(0.000001);

    fn standard_incentives() -> IncentiveSummary {
        calculate_incentives(dec!(224770), true, dec!(0.21))
    }

    #[test]
    fn test_produces_full_horizon() {
        let projection = project_cash_flows(&standard_inputs(), &standard_incentives());
        assert_eq!(projection.years.len(), 25);
        for (i, record) in projection.years.iter().enumerate() {
            assert_eq!(record.year, (i + 1) as u32);
        }
    }

    #[test]
    fn test_year_one_matches_standalone_metrics() {
        // The projector's first record and the year-1 calculator must not drift.
        let inputs = standard_inputs();
        let incentives = standard_incentives();

        let year_one = calculate_year_one(&inputs, &incentives);
        let projection = project_cash_flows(&inputs, &incentives);
        let first = &projection.years[0];

        assert_eq!(first.production_kwh, year_one.production_kwh);
        assert_eq!(first.electric_rate, inputs.electric_rate);
        assert_eq!(first.electric_savings, year_one.electric_savings);
        assert_eq!(first.srec_unit_value, year_one.srec_unit_value);
        assert_eq!(first.srec_count, year_one.srec_count);
        assert_eq!(first.srec_income, year_one.srec_income);
        assert_eq!(first.tax_savings, year_one.depreciation_tax_savings);
        assert_eq!(first.total_benefit, year_one.total_benefit);
    }

    #[test]
    fn test_compounding_at_year_five() {
        let inputs = standard_inputs();
        let projection = project_cash_flows(&inputs, &standard_incentives());
        let year5 = &projection.years[4];

        let escalation = inputs.escalation.rate();
        let mut expected_rate = inputs.electric_rate;
        let mut expected_production = inputs.system_size_kw * inputs.tsrf;
        for _ in 0..4 {
            expected_rate *= Decimal::ONE + escalation;
            expected_production *= Decimal::ONE - inputs.degradation_rate;
        }

        assert!((year5.electric_rate - expected_rate).abs() < TOLERANCE);
        assert!((year5.production_kwh - expected_production).abs() < TOLERANCE);
    }

    #[test]
    fn test_cumulative_invariant() {
        let incentives = standard_incentives();
        let projection = project_cash_flows(&standard_inputs(), &incentives);

        // cumulative[y] = cumulative[y-1] + total_benefit[y], seeded at -after_itc_cost
        let mut running = -incentives.after_itc_cost;
        for record in &projection.years {
            running += record.total_benefit;
            assert_eq!(
                record.cumulative_benefit, running,
                "cumulative drifted at year {}",
                record.year
            );
        }

        // Final cumulative equals -after_itc_cost + sum of all benefits, exactly
        let benefit_sum: Decimal = projection.years.iter().map(|r| r.total_benefit).sum();
        assert_eq!(
            projection.years[24].cumulative_benefit,
            -incentives.after_itc_cost + benefit_sum
        );
        assert_eq!(projection.totals.net_position, projection.years[24].cumulative_benefit);
    }

    #[test]
    fn test_tax_savings_front_loaded() {
        let incentives = standard_incentives();
        let projection = project_cash_flows(&standard_inputs(), &incentives);

        assert_eq!(
            projection.years[0].tax_savings,
            incentives.year1_depreciation_tax_savings
        );
        for record in &projection.years[1..] {
            assert_eq!(
                record.tax_savings,
                Decimal::ZERO,
                "tax savings leaked into year {}",
                record.year
            );
        }
    }

    #[test]
    fn test_maryland_srec_value_zero_from_year_nine() {
        let projection = project_cash_flows(&standard_inputs(), &standard_incentives());
        for record in &projection.years[8..] {
            assert_eq!(
                record.srec_unit_value,
                Decimal::ZERO,
                "Maryland SREC value should be zero in year {}",
                record.year
            );
            assert_eq!(record.srec_income, Decimal::ZERO);
        }
    }

    #[test]
    fn test_dc_floor_in_year_eighteen() {
        let mut inputs = standard_inputs();
        inputs.jurisdiction = Jurisdiction::WashingtonDc;
        inputs.srec_program = SrecProgram::DcStandard;

        let projection = project_cash_flows(&inputs, &standard_incentives());
        let year18 = &projection.years[17];

        assert_eq!(year18.srec_unit_value, dec!(100) * dec!(0.85));
        assert!(year18.srec_income > Decimal::ZERO);
    }

    #[test]
    fn test_totals_re_sum() {
        let projection = project_cash_flows(&standard_inputs(), &standard_incentives());

        let electric: Decimal = projection.years.iter().map(|r| r.electric_savings).sum();
        let srec: Decimal = projection.years.iter().map(|r| r.srec_income).sum();
        let tax: Decimal = projection.years.iter().map(|r| r.tax_savings).sum();

        assert_eq!(projection.totals.electric_savings, electric);
        assert_eq!(projection.totals.srec_income, srec);
        assert_eq!(projection.totals.tax_savings, tax);
        assert_eq!(
            projection.totals.grand_total_benefit,
            electric + srec + tax
        );
    }

    #[test]
    fn test_idempotent() {
        let inputs = standard_inputs();
        let incentives = standard_incentives();

        let first = project_cash_flows(&inputs, &incentives);
        let second = project_cash_flows(&inputs, &incentives);

        assert_eq!(first, second);
    }
}
