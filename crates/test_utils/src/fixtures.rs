//! Common test fixtures

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use core_kernel::Money;
use rust_decimal_macros::dec;

/// Shorthand for building dates in tests
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Temporal fixtures shared across the suite
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// The frozen "today" every deterministic test adjudicates against
    pub fn today() -> NaiveDate {
        *TODAY
    }

    /// Start of the plan year
    pub fn plan_year_start() -> NaiveDate {
        date(2024, 1, 1)
    }

    /// A fill date comfortably inside the plan year
    pub fn fill_date() -> NaiveDate {
        date(2024, 3, 15)
    }
}

static TODAY: Lazy<NaiveDate> = Lazy::new(|| date(2024, 6, 1));

/// Money fixtures shared across the suite
pub struct MoneyFixtures;

impl MoneyFixtures {
    pub fn ingredient_cost() -> Money {
        Money::new(dec!(15.75))
    }

    pub fn dispensing_fee() -> Money {
        Money::new(dec!(1.75))
    }

    pub fn specialty_ingredient_cost() -> Money {
        Money::new(dec!(5495.00))
    }
}

/// Code fixtures shared across the suite
pub struct CodeFixtures;

impl CodeFixtures {
    pub fn ndc() -> &'static str {
        "00093-0058-01"
    }

    pub fn pharmacy_npi() -> &'static str {
        "1234567890"
    }

    pub fn prescriber_npi() -> &'static str {
        "9876543210"
    }
}
