//! Randomized data generators
//!
//! Thin wrappers over `fake` for tests that want plausible but varied data
//! rather than fixed fixtures.

use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

/// A plausible member name
pub fn person_name() -> (String, String) {
    (FirstName().fake(), LastName().fake())
}

/// A random 10-digit NPI
pub fn npi() -> String {
    (1_000_000_000u64..9_999_999_999u64).fake::<u64>().to_string()
}

/// A random NDC in the 5-3-2 layout
pub fn ndc() -> String {
    format!(
        "{:05}-{:03}-{:02}",
        (0..99999u32).fake::<u32>(),
        (0..999u32).fake::<u32>(),
        (0..99u32).fake::<u32>()
    )
}

/// A random external member number
pub fn member_number() -> String {
    format!("M{:06}", (1..999_999u32).fake::<u32>())
}
