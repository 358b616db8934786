use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan simulator
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_loan(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::amortization::schedule::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::amortization::schedule::simulate_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Interest solvers
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_simple_interest(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::interest::simple::SimpleInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        fincalc_core::interest::simple::solve_simple_interest(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn solve_compound_interest(input_json: String) -> NapiResult<String> {
    let input: fincalc_core::interest::compound::CompoundInterestInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = fincalc_core::interest::compound::solve_compound_interest(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
