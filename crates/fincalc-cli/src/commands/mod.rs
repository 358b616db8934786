pub mod amortization;
pub mod interest;
