use chrono::Local;
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;
use std::path::Path;

use solar_proforma_core::pricing::PricingSchedule;
use solar_proforma_core::proforma::{self, ProjectInputs};
use solar_proforma_core::report;
use solar_proforma_core::types::{EscalationAssumption, Jurisdiction, SrecProgram, Utility};

use crate::input;
use crate::render;

// ---------------------------------------------------------------------------
// Flag enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum JurisdictionArg {
    Maryland,
    WashingtonDc,
}

impl From<JurisdictionArg> for Jurisdiction {
    fn from(arg: JurisdictionArg) -> Self {
        match arg {
            JurisdictionArg::Maryland => Jurisdiction::Maryland,
            JurisdictionArg::WashingtonDc => Jurisdiction::WashingtonDc,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UtilityArg {
    PepcoMaryland,
    PepcoDc,
    Bge,
    PotomacEdison,
    Other,
}

impl From<UtilityArg> for Utility {
    fn from(arg: UtilityArg) -> Self {
        match arg {
            UtilityArg::PepcoMaryland => Utility::PepcoMaryland,
            UtilityArg::PepcoDc => Utility::PepcoDc,
            UtilityArg::Bge => Utility::Bge,
            UtilityArg::PotomacEdison => Utility::PotomacEdison,
            UtilityArg::Other => Utility::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SrecProgramArg {
    Standard,
    BrighterTomorrow,
    DcStandard,
}

impl From<SrecProgramArg> for SrecProgram {
    fn from(arg: SrecProgramArg) -> Self {
        match arg {
            SrecProgramArg::Standard => SrecProgram::Standard,
            SrecProgramArg::BrighterTomorrow => SrecProgram::BrighterTomorrow,
            SrecProgramArg::DcStandard => SrecProgram::DcStandard,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum EscalationArg {
    Conservative,
    Moderate,
    Aggressive,
}

impl From<EscalationArg> for EscalationAssumption {
    fn from(arg: EscalationArg) -> Self {
        match arg {
            EscalationArg::Conservative => EscalationAssumption::Conservative,
            EscalationArg::Moderate => EscalationAssumption::Moderate,
            EscalationArg::Aggressive => EscalationAssumption::Aggressive,
        }
    }
}

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Project flags shared by the pro-forma subcommands.
#[derive(Args)]
pub struct ProjectFlags {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Customer or organization name
    #[arg(long, default_value = "Customer")]
    pub customer: String,

    /// Project name
    #[arg(long, default_value = "Project")]
    pub project: String,

    /// System size in kW
    #[arg(long)]
    pub system_size_kw: Option<Decimal>,

    /// Project jurisdiction
    #[arg(long, value_enum, default_value = "maryland")]
    pub jurisdiction: JurisdictionArg,

    /// Utility company, used to default the electric rate
    #[arg(long, value_enum, default_value = "pepco-maryland")]
    pub utility: UtilityArg,

    /// Electric rate in $/kWh (defaults from the utility)
    #[arg(long)]
    pub electric_rate: Option<Decimal>,

    /// Total Solar Resource Factor (kWh/kW/yr)
    #[arg(long, default_value = "1250")]
    pub tsrf: Decimal,

    /// Tax bracket as a decimal (e.g. 0.21)
    #[arg(long, default_value = "0.21")]
    pub tax_bracket: Decimal,

    /// Disable the 30% federal investment tax credit
    #[arg(long)]
    pub no_itc: bool,

    /// SREC program (defaults from the jurisdiction)
    #[arg(long, value_enum)]
    pub srec_program: Option<SrecProgramArg>,

    /// Utility-rate escalation assumption
    #[arg(long, value_enum, default_value = "moderate")]
    pub escalation: EscalationArg,

    /// Annual panel degradation as a decimal (e.g. 0.005)
    #[arg(long, default_value = "0.005")]
    pub degradation: Decimal,
}

/// Arguments for full pro-forma generation
#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub project: ProjectFlags,

    /// Path to a JSON pricing schedule (defaults to the built-in pricing set)
    #[arg(long)]
    pub pricing: Option<String>,

    /// Directory to write the workbook into
    #[arg(long, default_value = ".")]
    pub out_dir: String,
}

/// Arguments for the year-1 preview
#[derive(Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub project: ProjectFlags,

    /// Path to a JSON pricing schedule (defaults to the built-in pricing set)
    #[arg(long)]
    pub pricing: Option<String>,
}

/// Arguments for the cash-flow table
#[derive(Args)]
pub struct CashflowArgs {
    #[command(flatten)]
    pub project: ProjectFlags,

    /// Path to a JSON pricing schedule (defaults to the built-in pricing set)
    #[arg(long)]
    pub pricing: Option<String>,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

pub fn run_generate(args: GenerateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = build_inputs(&args.project)?;
    let schedule = load_schedule(args.pricing.as_deref())?;

    let result = proforma::generate_pro_forma(&inputs, &schedule)?;
    let workbook = report::assemble_workbook(&result.result, Some(Local::now().date_naive()));

    let path = Path::new(&args.out_dir).join(&workbook.filename);
    render::xlsx::write_workbook(&workbook, &path)?;

    let mut value = serde_json::to_value(&result)?;
    if let Value::Object(ref mut map) = value {
        map.insert("artifact".into(), Value::String(path.display().to_string()));
    }
    Ok(value)
}

pub fn run_preview(args: PreviewArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = build_inputs(&args.project)?;
    let schedule = load_schedule(args.pricing.as_deref())?;

    let result = proforma::preview_pro_forma(&inputs, &schedule)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cashflow(args: CashflowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let inputs = build_inputs(&args.project)?;
    let schedule = load_schedule(args.pricing.as_deref())?;

    let result = proforma::generate_pro_forma(&inputs, &schedule)?;
    Ok(serde_json::to_value(&result.result.projection.years)?)
}

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

/// Resolve project inputs: JSON file, piped stdin, then individual flags.
fn build_inputs(flags: &ProjectFlags) -> Result<ProjectInputs, Box<dyn std::error::Error>> {
    if let Some(ref path) = flags.input {
        return Ok(input::read_json(path)?);
    }
    if let Some(data) = input::read_stdin()? {
        return Ok(serde_json::from_value(data)?);
    }

    let jurisdiction: Jurisdiction = flags.jurisdiction.into();
    let utility: Utility = flags.utility.into();

    let srec_program = match flags.srec_program {
        Some(arg) => arg.into(),
        None => match jurisdiction {
            Jurisdiction::Maryland => SrecProgram::Standard,
            Jurisdiction::WashingtonDc => SrecProgram::DcStandard,
        },
    };

    Ok(ProjectInputs {
        customer_name: flags.customer.clone(),
        project_name: flags.project.clone(),
        system_size_kw: flags
            .system_size_kw
            .ok_or("--system-size-kw is required (or provide --input)")?,
        jurisdiction,
        utility,
        electric_rate: flags
            .electric_rate
            .unwrap_or_else(|| utility.default_electric_rate()),
        tsrf: flags.tsrf,
        tax_bracket: flags.tax_bracket,
        itc_enabled: !flags.no_itc,
        srec_program,
        escalation: flags.escalation.into(),
        degradation_rate: flags.degradation,
    })
}

/// Load a pricing schedule from a file, or fall back to the built-in set.
pub fn load_schedule(path: Option<&str>) -> Result<PricingSchedule, Box<dyn std::error::Error>> {
    match path {
        Some(p) => Ok(input::read_json(p)?),
        None => Ok(PricingSchedule::default()),
    }
}
