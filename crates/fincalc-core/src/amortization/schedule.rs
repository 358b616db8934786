//! Loan amortization schedules: French (constant payment) and German
//! (constant principal) systems.
//!
//! Generates the full per-period repayment table for a loan plus aggregate
//! totals. The schedule generator is pure: same input, same table, no shared
//! state between invocations. All math in `rust_decimal::Decimal`; rounding
//! for display is the caller's concern.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::FincalcError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate, Years};
use crate::FincalcResult;

/// A final-period balance within this band of zero is treated as fully
/// repaid, absorbing accumulated rounding drift.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Amortization system for the repayment schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleKind {
    /// Constant total payment; the principal/interest split shifts over time.
    French,
    /// Constant principal payment; the total payment shrinks over time.
    German,
}

/// Loan specification for one schedule computation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Initial amount owed.
    pub principal: Money,
    /// Nominal annual interest rate as a percentage (12 = 12%).
    pub annual_rate: Percent,
    /// Loan duration in years.
    pub term_years: Years,
    /// Payment and compounding frequency: 1 = annual, 12 = monthly.
    pub payments_per_year: u32,
    /// Amortization system to apply.
    pub schedule: ScheduleKind,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One line of the amortization table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodRow {
    /// Period number, 1-based and contiguous.
    pub period: u32,
    /// Total amount due this period.
    pub payment: Money,
    /// Portion of the payment that reduces the balance.
    pub principal: Money,
    /// Portion of the payment covering accrued interest.
    pub interest: Money,
    /// Balance outstanding after this period's principal is applied.
    /// Never negative; exactly zero on the final period.
    pub balance: Money,
}

/// Aggregate sums over a full schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleTotals {
    /// Sum of all payments.
    pub total_paid: Money,
    /// Sum of all principal portions (equals the loan principal up to
    /// rounding drift).
    pub total_principal: Money,
    /// Sum of all interest portions.
    pub total_interest: Money,
}

/// Full simulator output: the table plus its totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanScheduleOutput {
    pub rows: Vec<PeriodRow>,
    pub totals: ScheduleTotals,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Simulate a loan: generate the amortization table and its totals.
pub fn simulate_loan(input: &LoanInput) -> FincalcResult<ComputationOutput<LoanScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.annual_rate.is_zero() {
        warnings.push("Zero annual rate: payments amortize principal only".to_string());
    }

    let rows = generate_schedule(input)?;
    let totals = schedule_totals(&rows);

    let methodology = match input.schedule {
        ScheduleKind::French => "French amortization (constant-payment annuity)",
        ScheduleKind::German => "German amortization (constant principal)",
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        methodology,
        input,
        warnings,
        elapsed,
        LoanScheduleOutput { rows, totals },
    ))
}

/// Generate the per-period repayment rows for a loan.
///
/// Deterministic and pure; the running balance is local to the call, so
/// concurrent invocations never interfere.
pub fn generate_schedule(input: &LoanInput) -> FincalcResult<Vec<PeriodRow>> {
    let (period_rate, period_count) = derive_loan_terms(input)?;

    match input.schedule {
        ScheduleKind::French => french_schedule(input.principal, period_rate, period_count),
        ScheduleKind::German => Ok(german_schedule(input.principal, period_rate, period_count)),
    }
}

/// Sum payments, principal and interest over an already-generated table.
pub fn schedule_totals(rows: &[PeriodRow]) -> ScheduleTotals {
    let mut totals = ScheduleTotals {
        total_paid: Decimal::ZERO,
        total_principal: Decimal::ZERO,
        total_interest: Decimal::ZERO,
    };

    for row in rows {
        totals.total_paid += row.payment;
        totals.total_principal += row.principal;
        totals.total_interest += row.interest;
    }

    totals
}

// ---------------------------------------------------------------------------
// Validation and derived terms
// ---------------------------------------------------------------------------

/// Validate the loan and derive the period rate and period count.
///
/// The period count must resolve to a whole number of periods; a fractional
/// `term_years * payments_per_year` is rejected rather than truncated.
fn derive_loan_terms(input: &LoanInput) -> FincalcResult<(Rate, u32)> {
    if input.principal <= Decimal::ZERO {
        return Err(FincalcError::InvalidInput {
            field: "principal".into(),
            reason: "must be greater than zero".into(),
        });
    }
    if input.annual_rate < Decimal::ZERO {
        return Err(FincalcError::InvalidInput {
            field: "annual_rate".into(),
            reason: "must not be negative".into(),
        });
    }
    if input.term_years <= Decimal::ZERO {
        return Err(FincalcError::InvalidInput {
            field: "term_years".into(),
            reason: "must be greater than zero".into(),
        });
    }
    if input.payments_per_year == 0 {
        return Err(FincalcError::InvalidInput {
            field: "payments_per_year".into(),
            reason: "must be at least 1".into(),
        });
    }

    let periods = input.term_years * Decimal::from(input.payments_per_year);
    if !periods.fract().is_zero() {
        return Err(FincalcError::InvalidInput {
            field: "term_years".into(),
            reason: format!(
                "{} years at {} payments per year gives a fractional period count ({periods})",
                input.term_years, input.payments_per_year
            ),
        });
    }

    let period_count = periods.to_u32().ok_or_else(|| FincalcError::InvalidInput {
        field: "term_years".into(),
        reason: format!("period count ({periods}) is out of range"),
    })?;
    if period_count == 0 {
        return Err(FincalcError::InvalidInput {
            field: "term_years".into(),
            reason: "period count resolves to zero".into(),
        });
    }

    let period_rate = input.annual_rate / dec!(100) / Decimal::from(input.payments_per_year);
    Ok((period_rate, period_count))
}

// ---------------------------------------------------------------------------
// Schedule generation
// ---------------------------------------------------------------------------

/// Fixed payment from the annuity formula C·[i·(1+i)^n] / [(1+i)^n − 1].
///
/// A zero period rate collapses the formula to straight division of the
/// principal (its limit), so the denominator never hits zero there.
fn french_payment(principal: Money, period_rate: Rate, period_count: u32) -> FincalcResult<Money> {
    if period_rate.is_zero() {
        return Ok(principal / Decimal::from(period_count));
    }

    let growth = (Decimal::ONE + period_rate).powd(Decimal::from(period_count));
    let annuity_factor = growth - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(FincalcError::DivisionByZero {
            context: "French annuity factor".into(),
        });
    }

    Ok(principal * period_rate * growth / annuity_factor)
}

fn french_schedule(
    principal: Money,
    period_rate: Rate,
    period_count: u32,
) -> FincalcResult<Vec<PeriodRow>> {
    let payment = french_payment(principal, period_rate, period_count)?;

    let mut balance = principal;
    let mut rows = Vec::with_capacity(period_count as usize);

    for period in 1..=period_count {
        let interest = balance * period_rate;
        let principal_portion = payment - interest;
        balance = settle_balance(balance - principal_portion, period == period_count);

        rows.push(PeriodRow {
            period,
            payment,
            principal: principal_portion,
            interest,
            balance,
        });
    }

    Ok(rows)
}

fn german_schedule(principal: Money, period_rate: Rate, period_count: u32) -> Vec<PeriodRow> {
    let principal_portion = principal / Decimal::from(period_count);

    let mut balance = principal;
    let mut rows = Vec::with_capacity(period_count as usize);

    for period in 1..=period_count {
        let interest = balance * period_rate;
        let payment = principal_portion + interest;
        balance = settle_balance(balance - principal_portion, period == period_count);

        rows.push(PeriodRow {
            period,
            payment,
            principal: principal_portion,
            interest,
            balance,
        });
    }

    rows
}

/// Reported balances are clamped at zero; the final period additionally
/// snaps any residual within `BALANCE_EPSILON` of zero to exactly zero.
fn settle_balance(balance: Money, is_final: bool) -> Money {
    if is_final && balance.abs() < BALANCE_EPSILON {
        return Decimal::ZERO;
    }
    if balance < Decimal::ZERO {
        Decimal::ZERO
    } else {
        balance
    }
}
