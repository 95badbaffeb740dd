//! Test data builders
//!
//! Builder patterns for constructing test entities with sensible defaults.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{
    CoverageWindow, DrugId, MemberId, Money, OverrideId, PharmacyId, PlanId, PriorAuthId,
};
use domain_adjudication::{AdjudicationRequest, Pharmacy};
use domain_eligibility::{EligibilityStatus, Member};
use domain_formulary::{Drug, FormularyOverride, Tier};
use domain_priorauth::{AuthorizationStatus, PriorAuthorization};

use crate::fixtures::{date, CodeFixtures, MoneyFixtures, TemporalFixtures};

/// Builder for members
pub struct MemberBuilder {
    id: MemberId,
    member_number: String,
    first_name: String,
    last_name: String,
    plan_id: PlanId,
    eligibility_status: EligibilityStatus,
    effective_date: NaiveDate,
    termination_date: Option<NaiveDate>,
}

impl Default for MemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MemberBuilder {
    pub fn new() -> Self {
        Self {
            id: MemberId::new_v7(),
            member_number: "M000001".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Rivera".to_string(),
            plan_id: PlanId::new_v7(),
            eligibility_status: EligibilityStatus::Active,
            effective_date: TemporalFixtures::plan_year_start(),
            termination_date: None,
        }
    }

    pub fn with_id(mut self, id: MemberId) -> Self {
        self.id = id;
        self
    }

    pub fn with_plan(mut self, plan_id: PlanId) -> Self {
        self.plan_id = plan_id;
        self
    }

    pub fn with_status(mut self, status: EligibilityStatus) -> Self {
        self.eligibility_status = status;
        self
    }

    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = date;
        self
    }

    pub fn with_termination_date(mut self, date: NaiveDate) -> Self {
        self.termination_date = Some(date);
        self
    }

    pub fn build(self) -> Member {
        Member::new(
            self.id,
            self.member_number,
            self.first_name,
            self.last_name,
            self.plan_id,
            self.eligibility_status,
            self.effective_date,
            self.termination_date,
        )
        .expect("builder produced invalid member")
    }
}

/// Builder for drugs
pub struct DrugBuilder {
    id: DrugId,
    ndc: String,
    name: String,
    tier: Tier,
    prior_auth_required: bool,
    quantity_limit: Option<Decimal>,
    copay: Option<Money>,
}

impl Default for DrugBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DrugBuilder {
    pub fn new() -> Self {
        Self {
            id: DrugId::new_v7(),
            ndc: CodeFixtures::ndc().to_string(),
            name: "Atorvastatin 20mg".to_string(),
            tier: Tier::One,
            prior_auth_required: false,
            quantity_limit: None,
            copay: None,
        }
    }

    pub fn with_id(mut self, id: DrugId) -> Self {
        self.id = id;
        self
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }

    pub fn requiring_prior_auth(mut self) -> Self {
        self.prior_auth_required = true;
        self
    }

    pub fn with_quantity_limit(mut self, limit: Decimal) -> Self {
        self.quantity_limit = Some(limit);
        self
    }

    pub fn with_copay(mut self, copay: Money) -> Self {
        self.copay = Some(copay);
        self
    }

    pub fn build(self) -> Drug {
        Drug::new(
            self.id,
            self.ndc.parse().expect("builder produced invalid NDC"),
            self.name,
            self.tier,
            self.prior_auth_required,
            self.quantity_limit,
            self.copay,
        )
        .expect("builder produced invalid drug")
    }
}

/// Builder for formulary overrides
pub struct OverrideBuilder {
    plan_id: PlanId,
    drug_id: DrugId,
    tier_override: Option<Tier>,
    copay_amount: Option<Money>,
    prior_auth_override: Option<bool>,
    quantity_limit_override: Option<Decimal>,
    window: CoverageWindow,
}

impl OverrideBuilder {
    pub fn for_pair(plan_id: PlanId, drug_id: DrugId) -> Self {
        Self {
            plan_id,
            drug_id,
            tier_override: None,
            copay_amount: None,
            prior_auth_override: None,
            quantity_limit_override: None,
            window: CoverageWindow::from(TemporalFixtures::plan_year_start()),
        }
    }

    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier_override = Some(tier);
        self
    }

    pub fn with_copay(mut self, copay: Money) -> Self {
        self.copay_amount = Some(copay);
        self
    }

    pub fn with_prior_auth(mut self, required: bool) -> Self {
        self.prior_auth_override = Some(required);
        self
    }

    pub fn with_quantity_limit(mut self, limit: Decimal) -> Self {
        self.quantity_limit_override = Some(limit);
        self
    }

    pub fn with_window(mut self, window: CoverageWindow) -> Self {
        self.window = window;
        self
    }

    pub fn build(self) -> FormularyOverride {
        FormularyOverride {
            id: OverrideId::new_v7(),
            plan_id: self.plan_id,
            drug_id: self.drug_id,
            tier_override: self.tier_override,
            copay_amount: self.copay_amount,
            prior_auth_override: self.prior_auth_override,
            quantity_limit_override: self.quantity_limit_override,
            window: self.window,
        }
    }
}

/// Builder for prior authorizations
pub struct AuthorizationBuilder {
    member_id: MemberId,
    drug_id: DrugId,
    status: AuthorizationStatus,
    approved_date: Option<NaiveDate>,
    expiration_date: Option<NaiveDate>,
}

impl AuthorizationBuilder {
    pub fn for_pair(member_id: MemberId, drug_id: DrugId) -> Self {
        Self {
            member_id,
            drug_id,
            status: AuthorizationStatus::Approved,
            approved_date: Some(date(2024, 1, 15)),
            expiration_date: None,
        }
    }

    pub fn with_status(mut self, status: AuthorizationStatus) -> Self {
        self.status = status;
        if status != AuthorizationStatus::Approved {
            self.approved_date = None;
        }
        self
    }

    pub fn expiring(mut self, date: NaiveDate) -> Self {
        self.expiration_date = Some(date);
        self
    }

    pub fn build(self) -> PriorAuthorization {
        PriorAuthorization::new(
            PriorAuthId::new_v7(),
            self.member_id,
            self.drug_id,
            self.status,
            self.approved_date,
            self.expiration_date,
        )
        .expect("builder produced invalid authorization")
    }
}

/// Builder for adjudication requests
pub struct RequestBuilder {
    member_id: MemberId,
    drug_id: DrugId,
    pharmacy_id: PharmacyId,
    prescription_number: String,
    date_prescribed: NaiveDate,
    date_filled: NaiveDate,
    days_supply: u16,
    quantity_dispensed: Decimal,
    prescriber_npi: String,
    ingredient_cost: Money,
    dispensing_fee: Money,
    sales_tax: Option<Money>,
}

impl RequestBuilder {
    pub fn for_claim(member: &Member, drug: &Drug, pharmacy: &Pharmacy) -> Self {
        Self {
            member_id: member.id,
            drug_id: drug.id,
            pharmacy_id: pharmacy.id,
            prescription_number: "RX123456".to_string(),
            date_prescribed: date(2024, 3, 10),
            date_filled: TemporalFixtures::fill_date(),
            days_supply: 30,
            quantity_dispensed: dec!(30),
            prescriber_npi: CodeFixtures::prescriber_npi().to_string(),
            ingredient_cost: MoneyFixtures::ingredient_cost(),
            dispensing_fee: MoneyFixtures::dispensing_fee(),
            sales_tax: None,
        }
    }

    pub fn filled_on(mut self, date: NaiveDate) -> Self {
        self.date_filled = date;
        self
    }

    pub fn prescribed_on(mut self, date: NaiveDate) -> Self {
        self.date_prescribed = date;
        self
    }

    pub fn with_days_supply(mut self, days: u16) -> Self {
        self.days_supply = days;
        self
    }

    pub fn with_quantity(mut self, quantity: Decimal) -> Self {
        self.quantity_dispensed = quantity;
        self
    }

    pub fn with_ingredient_cost(mut self, cost: Money) -> Self {
        self.ingredient_cost = cost;
        self
    }

    pub fn with_dispensing_fee(mut self, fee: Money) -> Self {
        self.dispensing_fee = fee;
        self
    }

    pub fn with_sales_tax(mut self, tax: Money) -> Self {
        self.sales_tax = Some(tax);
        self
    }

    pub fn build(self) -> AdjudicationRequest {
        AdjudicationRequest {
            member_id: self.member_id,
            drug_id: self.drug_id,
            pharmacy_id: self.pharmacy_id,
            prescription_number: self.prescription_number,
            date_prescribed: self.date_prescribed,
            date_filled: self.date_filled,
            days_supply: self.days_supply,
            quantity_dispensed: self.quantity_dispensed,
            prescriber_npi: self
                .prescriber_npi
                .parse()
                .expect("builder produced invalid NPI"),
            ingredient_cost: self.ingredient_cost,
            dispensing_fee: self.dispensing_fee,
            sales_tax: self.sales_tax,
        }
    }
}

/// Builds a default in-network pharmacy
pub fn pharmacy() -> Pharmacy {
    Pharmacy {
        id: PharmacyId::new_v7(),
        npi: CodeFixtures::pharmacy_npi()
            .parse()
            .expect("fixture NPI is valid"),
        name: "Main Street Pharmacy".to_string(),
        in_network: true,
    }
}
