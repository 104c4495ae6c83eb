use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::ProFormaError;
use crate::incentives::{self, IncentiveSummary};
use crate::metrics::{self, YearOneMetrics};
use crate::pricing::{self, PricingSchedule, PricingSummary};
use crate::projection::{self, CashFlowProjection};
use crate::types::{
    with_metadata, ComputationOutput, EscalationAssumption, Jurisdiction, Rate, SrecProgram,
    Utility,
};
use crate::ProFormaResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Parameters for one pro-forma generation. Constructed once per request
/// and passed by reference through every calculator stage; nothing here is
/// mutated after validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInputs {
    pub customer_name: String,
    pub project_name: String,
    /// Nameplate system size, kW
    pub system_size_kw: Decimal,
    pub jurisdiction: Jurisdiction,
    /// Defaults the electric rate at the input boundary; no other effect
    pub utility: Utility,
    /// Retail electric rate, $/kWh
    pub electric_rate: Rate,
    /// Total Solar Resource Factor, kWh per installed kW per year
    pub tsrf: Decimal,
    /// Marginal tax bracket applied to depreciation (decimal)
    pub tax_bracket: Rate,
    pub itc_enabled: bool,
    pub srec_program: SrecProgram,
    pub escalation: EscalationAssumption,
    /// Annual panel degradation (decimal, 0-0.02)
    pub degradation_rate: Rate,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Complete pro-forma: the sole object handed to the report assembler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProFormaOutput {
    pub inputs: ProjectInputs,
    pub pricing: PricingSummary,
    pub incentives: IncentiveSummary,
    pub year_one: YearOneMetrics,
    pub projection: CashFlowProjection,
}

/// The live-preview subset: everything except the 25-year projection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewOutput {
    pub inputs: ProjectInputs,
    pub pricing: PricingSummary,
    pub incentives: IncentiveSummary,
    pub year_one: YearOneMetrics,
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Run the full pro-forma: pricing aggregation, incentives, year-1 metrics,
/// and the 25-year cash-flow projection.
pub fn generate_pro_forma(
    inputs: &ProjectInputs,
    schedule: &PricingSchedule,
) -> ProFormaResult<ComputationOutput<ProFormaOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(inputs)?;

    let pricing = pricing::aggregate_pricing(schedule, inputs.system_size_kw)?;
    let incentives =
        incentives::calculate_incentives(pricing.total_cost, inputs.itc_enabled, inputs.tax_bracket);
    let year_one = metrics::calculate_year_one(inputs, &incentives);
    let projection = projection::project_cash_flows(inputs, &incentives);

    collect_warnings(&pricing, &year_one, &mut warnings);

    let assumptions = assumptions_json(inputs, schedule);
    let output = ProFormaOutput {
        inputs: inputs.clone(),
        pricing,
        incentives,
        year_one,
        projection,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Solar Pro-Forma (25-Year Cash Flow)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Pricing, incentives, and year-1 metrics only, for live preview before a
/// full generation is requested.
pub fn preview_pro_forma(
    inputs: &ProjectInputs,
    schedule: &PricingSchedule,
) -> ProFormaResult<ComputationOutput<PreviewOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(inputs)?;

    let pricing = pricing::aggregate_pricing(schedule, inputs.system_size_kw)?;
    let incentives =
        incentives::calculate_incentives(pricing.total_cost, inputs.itc_enabled, inputs.tax_bracket);
    let year_one = metrics::calculate_year_one(inputs, &incentives);

    collect_warnings(&pricing, &year_one, &mut warnings);

    let assumptions = assumptions_json(inputs, schedule);
    let output = PreviewOutput {
        inputs: inputs.clone(),
        pricing,
        incentives,
        year_one,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Solar Pro-Forma (Year-1 Preview)",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Validate the boundary ranges and toggle consistency.
fn validate_input(inputs: &ProjectInputs) -> ProFormaResult<()> {
    if inputs.system_size_kw <= Decimal::ZERO || inputs.system_size_kw > dec!(10000) {
        return Err(ProFormaError::InvalidInput {
            field: "system_size_kw".into(),
            reason: "System size must be between 0 and 10,000 kW".into(),
        });
    }

    if inputs.electric_rate < dec!(0.05) || inputs.electric_rate > dec!(0.50) {
        return Err(ProFormaError::InvalidInput {
            field: "electric_rate".into(),
            reason: "Electric rate must be between 0.05 and 0.50 $/kWh".into(),
        });
    }

    if inputs.tsrf < dec!(500) || inputs.tsrf > dec!(2000) {
        return Err(ProFormaError::InvalidInput {
            field: "tsrf".into(),
            reason: "TSRF must be between 500 and 2000".into(),
        });
    }

    if inputs.tax_bracket < Decimal::ZERO || inputs.tax_bracket > dec!(0.50) {
        return Err(ProFormaError::InvalidInput {
            field: "tax_bracket".into(),
            reason: "Tax bracket must be between 0 and 0.50".into(),
        });
    }

    if inputs.degradation_rate < Decimal::ZERO || inputs.degradation_rate > dec!(0.02) {
        return Err(ProFormaError::InvalidInput {
            field: "degradation_rate".into(),
            reason: "Degradation must be between 0 and 0.02 per year".into(),
        });
    }

    if inputs.srec_program.jurisdiction() != inputs.jurisdiction {
        return Err(ProFormaError::InvalidInput {
            field: "srec_program".into(),
            reason: format!(
                "{} is not offered in {}",
                inputs.srec_program, inputs.jurisdiction
            ),
        });
    }

    Ok(())
}

fn collect_warnings(pricing: &PricingSummary, year_one: &YearOneMetrics, warnings: &mut Vec<String>) {
    match year_one.simple_payback_years {
        None => warnings.push(
            "Simple payback is undefined: year-1 savings plus SREC income are not positive".into(),
        ),
        Some(payback) if payback > dec!(15) => warnings.push(format!(
            "Simple payback of {} years exceeds 15 years",
            payback.round_dp(1)
        )),
        _ => {}
    }

    if pricing.total_unit_cost > dec!(4) {
        warnings.push(format!(
            "Total unit cost of {} $/W is unusually high",
            pricing.total_unit_cost
        ));
    }
}

fn assumptions_json(inputs: &ProjectInputs, schedule: &PricingSchedule) -> serde_json::Value {
    serde_json::json!({
        "customer_name": inputs.customer_name,
        "project_name": inputs.project_name,
        "system_size_kw": inputs.system_size_kw.to_string(),
        "jurisdiction": inputs.jurisdiction.to_string(),
        "utility": inputs.utility.to_string(),
        "srec_program": inputs.srec_program.to_string(),
        "escalation_rate": inputs.escalation.rate().to_string(),
        "degradation_rate": inputs.degradation_rate.to_string(),
        "itc_enabled": inputs.itc_enabled,
        "total_unit_cost": schedule.total_unit_cost().to_string(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: the reference commercial rooftop project (236.6 kW, Maryland).
    pub(crate) fn standard_inputs() -> ProjectInputs {
        ProjectInputs {
            customer_name: "NDMU".into(),
            project_name: "Notre Dame MD".into(),
            system_size_kw: dec!(236.6),
            jurisdiction: Jurisdiction::Maryland,
            utility: Utility::PepcoMaryland,
            electric_rate: dec!(0.135),
            tsrf: dec!(1250),
            tax_bracket: dec!(0.21),
            itc_enabled: true,
            srec_program: SrecProgram::Standard,
            escalation: EscalationAssumption::Moderate,
            degradation_rate: dec!(0.005),
        }
    }

    /// Helper: schedule summing to 0.95 $/W, matching the reference totals.
    pub(crate) fn reference_schedule() -> PricingSchedule {
        PricingSchedule {
            electrical_material: dec!(0.10),
            stamps: dec!(0.00),
            origination_costs: dec!(0.01),
            ..PricingSchedule::default()
        }
    }

    #[test]
    fn test_reference_project_end_to_end() {
        let result = generate_pro_forma(&standard_inputs(), &reference_schedule()).unwrap();
        let out = &result.result;

        assert_eq!(out.pricing.total_unit_cost, dec!(0.95));
        assert_eq!(out.pricing.total_cost, dec!(224770.0));
        assert_eq!(out.incentives.itc_amount, dec!(67431.000));
        assert_eq!(out.year_one.production_kwh, dec!(295750.0));
        assert_eq!(out.year_one.electric_savings, dec!(39926.250));
        assert_eq!(out.year_one.srec_unit_value, dec!(49.5));
        assert_eq!(out.year_one.srec_income, dec!(14639.625));
        assert_eq!(out.projection.years.len(), 25);
    }

    #[test]
    fn test_after_itc_cost_seventy_percent() {
        let result = generate_pro_forma(&standard_inputs(), &reference_schedule()).unwrap();
        let out = &result.result;
        assert_eq!(out.incentives.after_itc_cost, out.pricing.total_cost * dec!(0.70));

        let mut no_itc = standard_inputs();
        no_itc.itc_enabled = false;
        let result = generate_pro_forma(&no_itc, &reference_schedule()).unwrap();
        let out = &result.result;
        assert_eq!(out.incentives.after_itc_cost, out.pricing.total_cost);
    }

    #[test]
    fn test_preview_matches_generation() {
        let inputs = standard_inputs();
        let schedule = reference_schedule();

        let preview = preview_pro_forma(&inputs, &schedule).unwrap();
        let full = generate_pro_forma(&inputs, &schedule).unwrap();

        assert_eq!(
            preview.result.year_one.total_benefit,
            full.result.year_one.total_benefit
        );
        assert_eq!(
            preview.result.incentives.after_itc_cost,
            full.result.incentives.after_itc_cost
        );
    }

    #[test]
    fn test_validation_rejects_out_of_range() {
        let schedule = reference_schedule();

        let mut inputs = standard_inputs();
        inputs.system_size_kw = dec!(10001);
        assert!(generate_pro_forma(&inputs, &schedule).is_err());

        let mut inputs = standard_inputs();
        inputs.electric_rate = dec!(0.51);
        assert!(generate_pro_forma(&inputs, &schedule).is_err());

        let mut inputs = standard_inputs();
        inputs.tsrf = dec!(400);
        assert!(generate_pro_forma(&inputs, &schedule).is_err());

        let mut inputs = standard_inputs();
        inputs.tax_bracket = dec!(0.51);
        assert!(generate_pro_forma(&inputs, &schedule).is_err());

        let mut inputs = standard_inputs();
        inputs.degradation_rate = dec!(0.021);
        assert!(generate_pro_forma(&inputs, &schedule).is_err());
    }

    #[test]
    fn test_validation_names_offending_field() {
        let mut inputs = standard_inputs();
        inputs.tsrf = dec!(2500);
        match generate_pro_forma(&inputs, &reference_schedule()).unwrap_err() {
            ProFormaError::InvalidInput { field, .. } => assert_eq!(field, "tsrf"),
            other => panic!("Expected InvalidInput, got: {other:?}"),
        }
    }

    #[test]
    fn test_validation_rejects_program_jurisdiction_mismatch() {
        let mut inputs = standard_inputs();
        inputs.srec_program = SrecProgram::DcStandard;
        assert!(generate_pro_forma(&inputs, &reference_schedule()).is_err());

        let mut inputs = standard_inputs();
        inputs.jurisdiction = Jurisdiction::WashingtonDc;
        inputs.srec_program = SrecProgram::BrighterTomorrow;
        assert!(generate_pro_forma(&inputs, &reference_schedule()).is_err());

        // The valid DC pairing passes
        let mut inputs = standard_inputs();
        inputs.jurisdiction = Jurisdiction::WashingtonDc;
        inputs.srec_program = SrecProgram::DcStandard;
        assert!(generate_pro_forma(&inputs, &reference_schedule()).is_ok());
    }

    #[test]
    fn test_long_payback_warning() {
        // Without the ITC and with a modest rate the payback stretches
        // past 15 years on an expensive build.
        let mut inputs = standard_inputs();
        inputs.itc_enabled = false;
        inputs.electric_rate = dec!(0.05);

        let schedule = PricingSchedule {
            modules: dec!(1.50),
            inverters: dec!(1.00),
            racking: dec!(1.00),
            ..PricingSchedule::default()
        };

        let result = generate_pro_forma(&inputs, &schedule).unwrap();
        assert!(
            result.warnings.iter().any(|w| w.contains("payback")),
            "expected a payback warning, got: {:?}",
            result.warnings
        );
    }

    #[test]
    fn test_generation_is_deterministic() {
        let inputs = standard_inputs();
        let schedule = reference_schedule();

        let first = generate_pro_forma(&inputs, &schedule).unwrap();
        let second = generate_pro_forma(&inputs, &schedule).unwrap();

        assert_eq!(first.result.projection, second.result.projection);
    }
}
