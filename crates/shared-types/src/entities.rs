//! # Core Domain Entities
//!
//! Defines the warehouse entities shared by every subsystem.
//!
//! ## Clusters
//!
//! - **Catalog**: `Department`, `Material`, `Batch`, `Customer`, `Location`
//! - **Inventory**: `Roll`, `Transaction`, `TxAction`
//! - **Access**: `Profile`, `Role`
//! - **Operations**: `SiteConfig`, `ReconciliationRecord`, `ImportRecord`

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Store-assigned surrogate identifier.
pub type EntityId = u64;

/// External identity of a roll, generated at creation and never reused.
pub type RollId = Uuid;

/// Milliseconds since the Unix epoch, assigned by the store at commit time.
pub type TimestampMs = u64;

// =============================================================================
// CLUSTER A: CATALOG
// =============================================================================

/// An organizational/physical zone owning materials and locations.
///
/// Departments are referenced by materials, locations, and user profiles;
/// deletion is blocked while any reference exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: EntityId,
    /// Short unique code, e.g. "FM" for Film. Location codes start with it.
    pub code: String,
    /// Human-readable name, e.g. "Film".
    pub name: String,
}

/// A material definition, registered once per distinct material number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub id: EntityId,
    /// Unique business identity; immutable once created.
    pub material_number: String,
    /// Free-text description; may be corrected after creation.
    pub description: String,
    /// Department that first registered this material.
    pub department_id: EntityId,
    /// Username that first created this material, if known.
    pub created_by: Option<String>,
    pub created_at_ms: TimestampMs,
}

/// A production batch of a material.
///
/// The `(material_id, batch_number)` pair is unique; a duplicate create is a
/// conflict, never a silent second row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub id: EntityId,
    pub batch_number: String,
    pub material_id: EntityId,
    pub created_at_ms: TimestampMs,
}

/// A dispatch customer, created lazily the first time a dispatch names it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: EntityId,
    pub name: String,
}

/// Physical location kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocationKind {
    Storage,
    Dept,
    Dispatch,
}

/// A rack or staging position in the warehouse layout.
///
/// Static data; rarely mutated after setup. The first two letters of
/// `location_code` are the owning department's code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub id: EntityId,
    /// Unique code, e.g. "FMA01".
    pub location_code: String,
    pub department_id: Option<EntityId>,
    pub row: String,
    pub column: String,
    pub kind: LocationKind,
}

// =============================================================================
// CLUSTER B: INVENTORY
// =============================================================================

/// A physical unit of material tracked through the warehouse.
///
/// `current_location` is a denormalized cache of the transaction log's tail:
/// it equals the location of the roll's most recent PUTAWAY / TRANSFER /
/// TEMP_STORAGE transaction, or `None` after a DISPATCH (or with no history).
/// It is writable only through the Transaction Recorder's commit path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roll {
    pub roll_id: RollId,
    pub batch_id: EntityId,
    pub weight_kg: f64,
    pub customer_id: Option<EntityId>,
    pub current_location: Option<String>,
    pub status: String,
}

impl Roll {
    /// Default status for a freshly produced roll.
    pub const STATUS_IN_STOCK: &'static str = "IN_STOCK";
}

/// A movement action recorded against a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxAction {
    QaScan,
    Putaway,
    Transfer,
    Dispatch,
    TempStorage,
}

impl TxAction {
    /// Every action, in declaration order. Used by totality tests and by
    /// callers that must enumerate the decision space.
    pub const ALL: [TxAction; 5] = [
        TxAction::QaScan,
        TxAction::Putaway,
        TxAction::Transfer,
        TxAction::Dispatch,
        TxAction::TempStorage,
    ];

    /// Wire name as stored in the log, e.g. "PUTAWAY".
    pub fn as_str(&self) -> &'static str {
        match self {
            TxAction::QaScan => "QA_SCAN",
            TxAction::Putaway => "PUTAWAY",
            TxAction::Transfer => "TRANSFER",
            TxAction::Dispatch => "DISPATCH",
            TxAction::TempStorage => "TEMP_STORAGE",
        }
    }

    /// True for the actions that place a roll at a location.
    pub fn places_roll(&self) -> bool {
        matches!(
            self,
            TxAction::Putaway | TxAction::Transfer | TxAction::TempStorage
        )
    }
}

impl std::fmt::Display for TxAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in a roll's movement history.
///
/// Transactions are never updated or deleted. The full ordered sequence of a
/// roll's transactions is its authoritative history; `Roll.current_location`
/// and `Roll.status` are caches of this sequence's tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: EntityId,
    pub roll_id: RollId,
    pub action: TxAction,
    /// Nulled out if the referenced location is later deleted.
    pub location_id: Option<EntityId>,
    /// Username that performed the scan.
    pub user: String,
    /// Only meaningful for DISPATCH.
    pub customer_id: Option<EntityId>,
    /// Server-assigned at commit; immutable.
    pub scanned_at_ms: TimestampMs,
    /// Store-assigned monotonic sequence number; breaks timestamp ties so
    /// "latest transaction" is always well-defined.
    pub seq: u64,
}

impl Transaction {
    /// Ordering key for "latest transaction per roll" computations.
    pub fn order_key(&self) -> (TimestampMs, u64) {
        (self.scanned_at_ms, self.seq)
    }
}

// =============================================================================
// CLUSTER C: ACCESS
// =============================================================================

/// User roles, as granted by the (out-of-scope) authentication provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Factory Admin")]
    FactoryAdmin,
    #[serde(rename = "Plant Manager")]
    PlantManager,
    #[serde(rename = "Stock Keeper")]
    StockKeeper,
    #[serde(rename = "Operator")]
    Operator,
    #[serde(rename = "Forklift Driver")]
    ForkliftDriver,
    #[serde(rename = "Dept SK")]
    DeptSk,
    #[serde(rename = "View Only")]
    ViewOnly,
}

/// Per-user warehouse profile governing department visibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub username: String,
    /// Home department.
    pub department_id: Option<EntityId>,
    /// Stock Keeper only: comma-separated extra department codes.
    pub extra_access: String,
    pub role: Role,
    /// New accounts start pending approval by a Factory Admin.
    pub needs_approval: bool,
}

impl Profile {
    /// Parse `extra_access` into trimmed, non-empty codes.
    pub fn extra_access_list(&self) -> Vec<String> {
        self.extra_access
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

// =============================================================================
// CLUSTER D: OPERATIONS
// =============================================================================

/// Site-wide configuration toggles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    pub enable_qa_scan: bool,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            enable_qa_scan: true,
        }
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationRecord {
    pub id: EntityId,
    pub run_at_ms: TimestampMs,
    /// True if log-derived and field-derived counts matched everywhere.
    pub is_clean: bool,
    /// One line per mismatched location: "FMA01: dashboard=8 vs api=7".
    pub mismatches: String,
}

/// Audit record of one bulk import run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRecord {
    pub id: EntityId,
    pub run_at_ms: TimestampMs,
    pub total_rows: u64,
    pub imported: u64,
    pub skipped: u64,
    /// One line per skipped row: "material|batch".
    pub details: String,
}
