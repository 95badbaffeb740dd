//! Dispensing pharmacies

use serde::{Deserialize, Serialize};

use core_kernel::{Npi, PharmacyId};

/// A dispensing pharmacy
///
/// Reference data owned by the network system. Contract pricing is out of
/// scope; the engine only needs the pharmacy to resolve.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pharmacy {
    /// Unique identifier
    pub id: PharmacyId,
    /// National Provider Identifier
    pub npi: Npi,
    /// Pharmacy name
    pub name: String,
    /// Whether the pharmacy participates in the PBM network
    pub in_network: bool,
}
