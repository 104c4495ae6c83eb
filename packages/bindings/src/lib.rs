use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

use solar_proforma_core::pricing::PricingSchedule;
use solar_proforma_core::proforma::{self, ProjectInputs};
use solar_proforma_core::report;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Request shape shared by every entry point: project inputs plus an
/// optional pricing schedule (the built-in set applies when omitted).
#[derive(Deserialize)]
struct ProFormaRequest {
    inputs: ProjectInputs,
    pricing: Option<PricingSchedule>,
}

impl ProFormaRequest {
    fn parse(input_json: &str) -> NapiResult<(ProjectInputs, PricingSchedule)> {
        let request: ProFormaRequest = serde_json::from_str(input_json).map_err(to_napi_error)?;
        let schedule = request.pricing.unwrap_or_default();
        Ok((request.inputs, schedule))
    }
}

#[napi]
pub fn generate_pro_forma(input_json: String) -> NapiResult<String> {
    let (inputs, schedule) = ProFormaRequest::parse(&input_json)?;
    let output = proforma::generate_pro_forma(&inputs, &schedule).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn preview_year_one(input_json: String) -> NapiResult<String> {
    let (inputs, schedule) = ProFormaRequest::parse(&input_json)?;
    let output = proforma::preview_pro_forma(&inputs, &schedule).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Run the full generation and return the workbook description for the
/// caller's own rendering sink.
#[napi]
pub fn assemble_workbook(input_json: String) -> NapiResult<String> {
    let (inputs, schedule) = ProFormaRequest::parse(&input_json)?;
    let output = proforma::generate_pro_forma(&inputs, &schedule).map_err(to_napi_error)?;
    let workbook = report::assemble_workbook(&output.result, None);
    serde_json::to_string(&workbook).map_err(to_napi_error)
}
