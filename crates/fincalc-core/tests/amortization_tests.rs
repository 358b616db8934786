use fincalc_core::amortization::schedule::{self, LoanInput, ScheduleKind};
use fincalc_core::FincalcError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Fixtures
// ===========================================================================

// The worked classroom example: 10,000 at 12% nominal over one year of
// monthly payments, so period rate 0.01 and 12 periods.
fn one_year_monthly(schedule: ScheduleKind) -> LoanInput {
    LoanInput {
        principal: dec!(10000),
        annual_rate: dec!(12),
        term_years: dec!(1),
        payments_per_year: 12,
        schedule,
    }
}

fn two_year_monthly(schedule: ScheduleKind) -> LoanInput {
    LoanInput {
        term_years: dec!(2),
        ..one_year_monthly(schedule)
    }
}

// ===========================================================================
// Row count and ordering
// ===========================================================================

#[test]
fn test_french_two_years_has_24_rows() {
    let rows = schedule::generate_schedule(&two_year_monthly(ScheduleKind::French)).unwrap();
    assert_eq!(rows.len(), 24);
}

#[test]
fn test_periods_are_contiguous_from_one() {
    for kind in [ScheduleKind::French, ScheduleKind::German] {
        let rows = schedule::generate_schedule(&two_year_monthly(kind)).unwrap();
        for (idx, row) in rows.iter().enumerate() {
            assert_eq!(row.period, idx as u32 + 1);
        }
    }
}

// ===========================================================================
// Balance invariants
// ===========================================================================

#[test]
fn test_balance_is_non_increasing() {
    for kind in [ScheduleKind::French, ScheduleKind::German] {
        let rows = schedule::generate_schedule(&two_year_monthly(kind)).unwrap();
        let mut previous = rows[0].balance;
        for row in &rows[1..] {
            assert!(
                row.balance <= previous,
                "balance rose at period {}: {} > {}",
                row.period,
                row.balance,
                previous,
            );
            previous = row.balance;
        }
    }
}

#[test]
fn test_balance_terminates_at_exactly_zero() {
    for kind in [ScheduleKind::French, ScheduleKind::German] {
        let rows = schedule::generate_schedule(&two_year_monthly(kind)).unwrap();
        assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
    }
}

#[test]
fn test_balance_is_never_negative() {
    for kind in [ScheduleKind::French, ScheduleKind::German] {
        let rows = schedule::generate_schedule(&two_year_monthly(kind)).unwrap();
        assert!(rows.iter().all(|row| row.balance >= Decimal::ZERO));
    }
}

// ===========================================================================
// Row decomposition and conservation
// ===========================================================================

#[test]
fn test_payment_decomposes_into_principal_plus_interest() {
    let tolerance = dec!(0.000001);
    for kind in [ScheduleKind::French, ScheduleKind::German] {
        let rows = schedule::generate_schedule(&two_year_monthly(kind)).unwrap();
        for row in &rows {
            assert!((row.payment - (row.principal + row.interest)).abs() < tolerance);
        }
    }
}

#[test]
fn test_principal_portions_sum_to_principal() {
    for kind in [ScheduleKind::French, ScheduleKind::German] {
        let rows = schedule::generate_schedule(&two_year_monthly(kind)).unwrap();
        let repaid: Decimal = rows.iter().map(|row| row.principal).sum();
        assert!((repaid - dec!(10000)).abs() < dec!(0.01));
    }
}

// ===========================================================================
// French system
// ===========================================================================

#[test]
fn test_french_concrete_first_period() {
    // payment = 10000·[0.01·1.01^12]/[1.01^12 − 1] ≈ 888.49
    // first interest = 10000·0.01 = 100.00 exactly
    // first principal = payment − 100 ≈ 788.49
    let rows = schedule::generate_schedule(&one_year_monthly(ScheduleKind::French)).unwrap();
    let first = &rows[0];
    assert!((first.payment - dec!(888.49)).abs() < dec!(0.01));
    assert_eq!(first.interest, dec!(100));
    assert!((first.principal - dec!(788.49)).abs() < dec!(0.01));
}

#[test]
fn test_french_payment_is_invariant() {
    let rows = schedule::generate_schedule(&two_year_monthly(ScheduleKind::French)).unwrap();
    let fixed = rows[0].payment;
    for row in &rows {
        assert!((row.payment - fixed).abs() < dec!(0.000001));
    }
}

#[test]
fn test_french_zero_rate_divides_principal_evenly() {
    // 12000 over 12 periods at 0%: payment is exactly 1000, no interest.
    let input = LoanInput {
        principal: dec!(12000),
        annual_rate: Decimal::ZERO,
        term_years: dec!(1),
        payments_per_year: 12,
        schedule: ScheduleKind::French,
    };
    let rows = schedule::generate_schedule(&input).unwrap();
    assert_eq!(rows.len(), 12);
    for row in &rows {
        assert_eq!(row.payment, dec!(1000));
        assert_eq!(row.interest, Decimal::ZERO);
    }
    assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
}

// ===========================================================================
// German system
// ===========================================================================

#[test]
fn test_german_concrete_scenario() {
    // principal portion = 10000/12 ≈ 833.33 every period
    // first payment = 833.33 + 100.00 ≈ 933.33
    // last payment = 833.33 + 833.33·0.01 ≈ 841.67
    let rows = schedule::generate_schedule(&one_year_monthly(ScheduleKind::German)).unwrap();
    let first = rows.first().unwrap();
    let last = rows.last().unwrap();

    assert!((first.principal - dec!(833.33)).abs() < dec!(0.01));
    assert_eq!(first.interest, dec!(100));
    assert!((first.payment - dec!(933.33)).abs() < dec!(0.01));
    assert!((last.payment - dec!(841.67)).abs() < dec!(0.01));
}

#[test]
fn test_german_principal_is_invariant() {
    let rows = schedule::generate_schedule(&two_year_monthly(ScheduleKind::German)).unwrap();
    let fixed = rows[0].principal;
    for row in &rows {
        assert!((row.principal - fixed).abs() < dec!(0.000001));
    }
}

// ===========================================================================
// Totals
// ===========================================================================

#[test]
fn test_totals_match_column_sums() {
    let rows = schedule::generate_schedule(&one_year_monthly(ScheduleKind::French)).unwrap();
    let totals = schedule::schedule_totals(&rows);

    let paid: Decimal = rows.iter().map(|row| row.payment).sum();
    let principal: Decimal = rows.iter().map(|row| row.principal).sum();
    let interest: Decimal = rows.iter().map(|row| row.interest).sum();

    assert_eq!(totals.total_paid, paid);
    assert_eq!(totals.total_principal, principal);
    assert_eq!(totals.total_interest, interest);
    assert!(
        (totals.total_paid - (totals.total_principal + totals.total_interest)).abs()
            < dec!(0.000001)
    );
}

#[test]
fn test_simulate_loan_envelope() {
    let output = schedule::simulate_loan(&one_year_monthly(ScheduleKind::French)).unwrap();
    assert_eq!(
        output.methodology,
        "French amortization (constant-payment annuity)"
    );
    assert_eq!(output.result.rows.len(), 12);
    assert!(output.warnings.is_empty());
    assert!((output.result.totals.total_principal - dec!(10000)).abs() < dec!(0.01));
}

#[test]
fn test_simulate_loan_zero_rate_warns() {
    let input = LoanInput {
        annual_rate: Decimal::ZERO,
        ..one_year_monthly(ScheduleKind::German)
    };
    let output = schedule::simulate_loan(&input).unwrap();
    assert_eq!(output.warnings.len(), 1);
}

// ===========================================================================
// Input rejection
// ===========================================================================

#[test]
fn test_fractional_period_count_is_rejected() {
    // 1.5 years of annual payments would need 1.5 periods.
    let input = LoanInput {
        principal: dec!(10000),
        annual_rate: dec!(12),
        term_years: dec!(1.5),
        payments_per_year: 1,
        schedule: ScheduleKind::French,
    };
    let err = schedule::generate_schedule(&input).unwrap_err();
    assert!(matches!(err, FincalcError::InvalidInput { .. }));
}

#[test]
fn test_fractional_term_with_matching_frequency_is_accepted() {
    // 1.5 years of monthly payments is a whole 18 periods.
    let input = LoanInput {
        principal: dec!(10000),
        annual_rate: dec!(12),
        term_years: dec!(1.5),
        payments_per_year: 12,
        schedule: ScheduleKind::French,
    };
    let rows = schedule::generate_schedule(&input).unwrap();
    assert_eq!(rows.len(), 18);
}

#[test]
fn test_non_positive_inputs_are_rejected() {
    let base = one_year_monthly(ScheduleKind::French);

    let mut input = base.clone();
    input.principal = Decimal::ZERO;
    assert!(schedule::generate_schedule(&input).is_err());

    let mut input = base.clone();
    input.annual_rate = dec!(-1);
    assert!(schedule::generate_schedule(&input).is_err());

    let mut input = base.clone();
    input.term_years = Decimal::ZERO;
    assert!(schedule::generate_schedule(&input).is_err());

    let mut input = base;
    input.payments_per_year = 0;
    assert!(schedule::generate_schedule(&input).is_err());
}
