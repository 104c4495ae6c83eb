use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::incentives::IncentiveSummary;
use crate::proforma::ProjectInputs;
use crate::srec::{self, KWH_PER_SREC};
use crate::types::{Money, Years};

/// First-year production and benefit metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearOneMetrics {
    /// system size x TSRF, kWh
    pub production_kwh: Decimal,
    pub electric_savings: Money,
    pub srec_unit_value: Money,
    pub srec_count: Decimal,
    pub srec_income: Money,
    pub depreciation_tax_savings: Money,
    pub total_benefit: Money,
    /// None when year-1 savings plus SREC income are not positive; payback
    /// is undefined there, never zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simple_payback_years: Option<Years>,
}

/// Derive first-year production, electric savings, SREC income, and simple
/// payback from the validated inputs and incentive amounts.
pub fn calculate_year_one(inputs: &ProjectInputs, incentives: &IncentiveSummary) -> YearOneMetrics {
    let production_kwh = inputs.system_size_kw * inputs.tsrf;
    let electric_savings = production_kwh * inputs.electric_rate;

    let srec_unit_value = srec::srec_unit_value(inputs.jurisdiction, inputs.srec_program, 1);
    let srec_count = production_kwh / KWH_PER_SREC;
    let srec_income = srec_count * srec_unit_value;

    let recurring_benefit = electric_savings + srec_income;
    let simple_payback_years = if recurring_benefit > Decimal::ZERO {
        Some(incentives.after_itc_cost / recurring_benefit)
    } else {
        None
    };

    YearOneMetrics {
        production_kwh,
        electric_savings,
        srec_unit_value,
        srec_count,
        srec_income,
        depreciation_tax_savings: incentives.year1_depreciation_tax_savings,
        total_benefit: recurring_benefit + incentives.year1_depreciation_tax_savings,
        simple_payback_years,
    }
}
