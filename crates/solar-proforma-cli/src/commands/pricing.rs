use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use solar_proforma_core::pricing;

use super::proforma::load_schedule;

/// Arguments for the cost breakdown
#[derive(Args)]
pub struct PricingArgs {
    /// Path to a JSON pricing schedule (defaults to the built-in pricing set)
    #[arg(long)]
    pub pricing: Option<String>,

    /// System size in kW
    #[arg(long)]
    pub system_size_kw: Decimal,
}

pub fn run_pricing(args: PricingArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule = load_schedule(args.pricing.as_deref())?;
    let summary = pricing::aggregate_pricing(&schedule, args.system_size_kw)?;
    Ok(serde_json::json!({ "result": summary }))
}
