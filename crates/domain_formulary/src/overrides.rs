//! Plan-specific formulary overrides
//!
//! An override adjusts tier, copay, prior-auth requirement, or quantity limit
//! for one (plan, drug) pair over a half-open validity window. The data
//! invariant says windows for the same pair never overlap; the index still
//! verifies this on every lookup and refuses to pick arbitrarily when the
//! invariant is broken.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::{CoverageWindow, DrugId, Money, OverrideId, PlanId};

use crate::drug::Tier;
use crate::error::FormularyError;

/// A date-ranged benefit override scoped to one (plan, drug) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormularyOverride {
    /// Unique identifier
    pub id: OverrideId,
    /// Plan the override applies to
    pub plan_id: PlanId,
    /// Drug the override applies to
    pub drug_id: DrugId,
    /// Replacement tier, when set
    pub tier_override: Option<Tier>,
    /// Replacement copay, when set
    pub copay_amount: Option<Money>,
    /// Replacement prior-auth requirement, when set
    pub prior_auth_override: Option<bool>,
    /// Replacement quantity limit, when set
    pub quantity_limit_override: Option<Decimal>,
    /// Validity window, half-open
    pub window: CoverageWindow,
}

/// In-memory interval index over overrides, keyed by (plan, drug)
///
/// Entries per key are kept sorted by effective date so a lookup scans at
/// most one pair's windows.
#[derive(Debug, Default, Clone)]
pub struct FormularyIndex {
    entries: HashMap<(PlanId, DrugId), Vec<FormularyOverride>>,
}

impl FormularyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an index from existing override records
    pub fn from_records(records: impl IntoIterator<Item = FormularyOverride>) -> Self {
        let mut index = Self::new();
        for record in records {
            index.insert(record);
        }
        index
    }

    /// Adds an override to the index
    pub fn insert(&mut self, record: FormularyOverride) {
        let key = (record.plan_id, record.drug_id);
        let windows = self.entries.entry(key).or_default();
        let position = windows
            .binary_search_by_key(&record.window.effective, |o| o.window.effective)
            .unwrap_or_else(|p| p);
        windows.insert(position, record);
    }

    /// Number of overrides held
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Finds the override active for (plan, drug) on the given date
    ///
    /// Returns an error if more than one window covers the date: the
    /// non-overlap invariant is broken and picking either would make the
    /// decision depend on iteration order.
    pub fn active_at(
        &self,
        plan_id: PlanId,
        drug_id: DrugId,
        date: NaiveDate,
    ) -> Result<Option<&FormularyOverride>, FormularyError> {
        let Some(windows) = self.entries.get(&(plan_id, drug_id)) else {
            return Ok(None);
        };

        let mut matches = windows.iter().filter(|o| o.window.contains(date));
        let first = matches.next();
        let extra = matches.count();
        if extra > 0 {
            return Err(FormularyError::OverlappingOverrides {
                plan_id,
                drug_id,
                date,
                count: extra + 1,
            });
        }
        Ok(first)
    }
}
