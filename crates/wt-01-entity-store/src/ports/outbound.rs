//! Outbound Ports (Driven Ports / SPI)
//!
//! Store traits consumed by the recorder, scoper, reconciliation engine,
//! intake, and gateway subsystems. All methods are synchronous: adapters are
//! expected to complete in the time of a single-row read/write plus index
//! lookups, and callers hold no async locks across them.

use crate::domain::errors::StoreError;
use shared_types::{
    Batch, Customer, Department, EntityId, ImportRecord, Location, LocationKind, Material,
    Profile, ReconciliationRecord, Roll, RollId, SiteConfig, TimestampMs, Transaction, TxAction,
};

/// Clock used by the store to assign commit timestamps.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now_ms(&self) -> TimestampMs;
}

/// Input to [`TransactionLog::commit`]. Identity, timestamp, and sequence
/// number are store-assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub roll_id: RollId,
    pub action: TxAction,
    pub location_id: Option<EntityId>,
    pub user: String,
    pub customer_id: Option<EntityId>,
}

/// Departments, materials, batches, customers, and locations.
///
/// Deletion semantics follow the referential-integrity rules: departments are
/// protected while referenced; material deletion cascades through batches and
/// rolls; customer and location deletion null out their references.
pub trait CatalogStore: Send + Sync {
    fn create_department(&self, code: &str, name: &str) -> Result<Department, StoreError>;
    fn department(&self, id: EntityId) -> Result<Option<Department>, StoreError>;
    fn department_by_code(&self, code: &str) -> Result<Option<Department>, StoreError>;
    fn departments(&self) -> Result<Vec<Department>, StoreError>;
    /// Fails with `Referenced` while any material, location, or profile
    /// points at this department.
    fn delete_department(&self, id: EntityId) -> Result<(), StoreError>;

    /// Returns `(material, created)`. An existing material number returns the
    /// existing row untouched; `description` and `created_by` only apply on
    /// first creation.
    fn get_or_create_material(
        &self,
        material_number: &str,
        description: &str,
        department_id: EntityId,
        created_by: Option<&str>,
    ) -> Result<(Material, bool), StoreError>;
    fn material(&self, id: EntityId) -> Result<Option<Material>, StoreError>;
    fn material_by_number(&self, material_number: &str) -> Result<Option<Material>, StoreError>;
    /// The business identity is immutable; only the description may be
    /// corrected.
    fn update_material_description(
        &self,
        id: EntityId,
        description: &str,
    ) -> Result<Material, StoreError>;
    /// Cascades: batches of this material, rolls of those batches, and the
    /// rolls' transactions are all removed.
    fn delete_material(&self, id: EntityId) -> Result<(), StoreError>;

    /// Returns `(batch, created)`. `(material_id, batch_number)` is unique:
    /// an existing pair returns the existing row with `created == false`.
    fn get_or_create_batch(
        &self,
        material_id: EntityId,
        batch_number: &str,
    ) -> Result<(Batch, bool), StoreError>;
    fn batch(&self, id: EntityId) -> Result<Option<Batch>, StoreError>;

    /// Returns `(customer, created)`, matching by exact name.
    fn get_or_create_customer(&self, name: &str) -> Result<(Customer, bool), StoreError>;
    fn customer(&self, id: EntityId) -> Result<Option<Customer>, StoreError>;
    /// Nulls out roll and transaction references before removing the row.
    fn delete_customer(&self, id: EntityId) -> Result<(), StoreError>;

    fn create_location(
        &self,
        location_code: &str,
        department_id: Option<EntityId>,
        row: &str,
        column: &str,
        kind: LocationKind,
    ) -> Result<Location, StoreError>;
    fn location(&self, id: EntityId) -> Result<Option<Location>, StoreError>;
    fn location_by_code(&self, code: &str) -> Result<Option<Location>, StoreError>;
    fn locations(&self) -> Result<Vec<Location>, StoreError>;
    /// Nulls out transaction references before removing the row.
    fn delete_location(&self, id: EntityId) -> Result<(), StoreError>;
}

/// Roll records. There is intentionally no method to write
/// `current_location`: that cache is maintained exclusively by
/// [`TransactionLog::commit`].
pub trait RollStore: Send + Sync {
    /// Creates a roll with a fresh v4 `roll_id` and status `IN_STOCK`.
    fn create_roll(
        &self,
        batch_id: EntityId,
        weight_kg: f64,
        customer_id: Option<EntityId>,
    ) -> Result<Roll, StoreError>;
    fn roll(&self, roll_id: RollId) -> Result<Option<Roll>, StoreError>;
    fn rolls(&self) -> Result<Vec<Roll>, StoreError>;
    /// Rolls whose `current_location` cache equals the given code.
    fn rolls_at_location(&self, location_code: &str) -> Result<Vec<Roll>, StoreError>;
    /// Cascades the roll's transactions.
    fn delete_roll(&self, roll_id: RollId) -> Result<(), StoreError>;
}

/// The append-only movement log.
///
/// `commit` is the sole mutation: it appends the transaction row with a
/// store-assigned `(scanned_at_ms, seq)` and, in the same atomic section,
/// applies the derived `current_location`/`status` update to the owning roll
/// (placing actions set the location, DISPATCH clears it, QA_SCAN leaves it
/// unchanged). Rows are never updated or deleted afterwards.
pub trait TransactionLog: Send + Sync {
    fn commit(&self, tx: NewTransaction) -> Result<Transaction, StoreError>;
    /// A roll's history in commit order (oldest first).
    fn transactions_for_roll(&self, roll_id: RollId) -> Result<Vec<Transaction>, StoreError>;
    /// The transaction with the maximum `(scanned_at_ms, seq)` for the roll.
    fn latest_for_roll(&self, roll_id: RollId) -> Result<Option<Transaction>, StoreError>;
    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError>;
    /// The latest transaction of every roll that has any history.
    fn latest_per_roll(&self) -> Result<Vec<Transaction>, StoreError>;
}

/// Per-user profiles.
pub trait ProfileStore: Send + Sync {
    /// Insert or replace by username.
    fn save_profile(&self, profile: Profile) -> Result<(), StoreError>;
    fn profile(&self, username: &str) -> Result<Option<Profile>, StoreError>;
}

/// Site-wide configuration toggles.
pub trait SiteConfigStore: Send + Sync {
    fn site_config(&self) -> Result<SiteConfig, StoreError>;
    fn set_site_config(&self, config: SiteConfig) -> Result<(), StoreError>;
}

/// Reconciliation and import audit records.
pub trait AuditStore: Send + Sync {
    fn record_reconciliation(
        &self,
        is_clean: bool,
        mismatches: &str,
    ) -> Result<ReconciliationRecord, StoreError>;
    fn latest_reconciliation(&self) -> Result<Option<ReconciliationRecord>, StoreError>;

    fn record_import(
        &self,
        total_rows: u64,
        imported: u64,
        skipped: u64,
        details: &str,
    ) -> Result<ImportRecord, StoreError>;
    fn import_records(&self) -> Result<Vec<ImportRecord>, StoreError>;
}

/// The full store surface, for `Arc<dyn WarehouseStore>` injection.
pub trait WarehouseStore:
    CatalogStore + RollStore + TransactionLog + ProfileStore + SiteConfigStore + AuditStore
{
}

impl<T> WarehouseStore for T where
    T: CatalogStore + RollStore + TransactionLog + ProfileStore + SiteConfigStore + AuditStore
{
}
