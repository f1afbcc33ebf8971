//! In-memory warehouse store, optionally backed by a JSON snapshot file.
//!
//! All state lives behind one `RwLock`, so every individual store operation
//! is atomic — in particular `commit`, which appends a transaction row and
//! applies the roll's location-cache update in the same write section.
//! When opened with a snapshot path, the full state is rewritten to disk
//! after each mutation via an atomic temp-file rename.

use crate::adapters::time::SystemTimeSource;
use crate::domain::errors::StoreError;
use crate::ports::outbound::{
    AuditStore, CatalogStore, NewTransaction, ProfileStore, RollStore, SiteConfigStore,
    TimeSource, TransactionLog,
};
use serde::{Deserialize, Serialize};
use shared_types::{
    Batch, Customer, Department, EntityId, ImportRecord, Location, LocationKind, Material,
    Profile, ReconciliationRecord, Roll, RollId, SiteConfig, TimestampMs, Transaction, TxAction,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Everything the store holds, in one serializable snapshot.
#[derive(Debug, Default, Serialize, Deserialize)]
struct WarehouseState {
    departments: BTreeMap<EntityId, Department>,
    materials: BTreeMap<EntityId, Material>,
    batches: BTreeMap<EntityId, Batch>,
    customers: BTreeMap<EntityId, Customer>,
    locations: BTreeMap<EntityId, Location>,
    rolls: BTreeMap<RollId, Roll>,
    transactions: Vec<Transaction>,
    profiles: BTreeMap<String, Profile>,
    site_config: Option<SiteConfig>,
    reconciliations: Vec<ReconciliationRecord>,
    imports: Vec<ImportRecord>,
    next_id: EntityId,
    next_seq: u64,
    last_commit_ms: TimestampMs,
}

impl WarehouseState {
    fn next_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }

    /// Non-decreasing server clock: a commit never carries a timestamp
    /// earlier than the previous commit, even if the wall clock steps back.
    fn commit_stamp(&mut self, now_ms: TimestampMs) -> (TimestampMs, u64) {
        let stamp = now_ms.max(self.last_commit_ms);
        self.last_commit_ms = stamp;
        self.next_seq += 1;
        (stamp, self.next_seq)
    }
}

/// In-memory implementation of the warehouse store ports.
pub struct InMemoryWarehouseDb {
    state: RwLock<WarehouseState>,
    time: Arc<dyn TimeSource>,
    snapshot_path: Option<PathBuf>,
}

impl InMemoryWarehouseDb {
    /// Volatile store with the system clock.
    pub fn new() -> Self {
        Self::with_time(Arc::new(SystemTimeSource))
    }

    /// Volatile store with an injected clock.
    pub fn with_time(time: Arc<dyn TimeSource>) -> Self {
        Self {
            state: RwLock::new(WarehouseState::default()),
            time,
            snapshot_path: None,
        }
    }

    /// File-backed store: loads the snapshot at `path` if present and
    /// rewrites it after every mutation.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = match std::fs::read(&path) {
            Ok(bytes) => {
                let state: WarehouseState = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Io(format!("corrupt snapshot: {e}")))?;
                tracing::info!(
                    "[wt-01] 💾 Loaded snapshot from {} ({} rolls, {} transactions)",
                    path.display(),
                    state.rolls.len(),
                    state.transactions.len()
                );
                state
            }
            Err(_) => {
                tracing::info!("[wt-01] 📁 No snapshot at {}, starting empty", path.display());
                WarehouseState::default()
            }
        };
        Ok(Self {
            state: RwLock::new(state),
            time: Arc::new(SystemTimeSource),
            snapshot_path: Some(path),
        })
    }

    fn read<T>(
        &self,
        f: impl FnOnce(&WarehouseState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::LockPoisoned)?;
        f(&state)
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut WarehouseState) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::LockPoisoned)?;
        let out = f(&mut state)?;
        if let Some(path) = &self.snapshot_path {
            Self::save_snapshot(&state, path)?;
        }
        Ok(out)
    }

    /// Write atomically via temp file, then rename over the target.
    fn save_snapshot(state: &WarehouseState, path: &Path) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let bytes = serde_json::to_vec_pretty(state).map_err(|e| StoreError::Io(e.to_string()))?;
        let temp_path = path.with_extension("tmp");
        std::fs::write(&temp_path, &bytes).map_err(|e| StoreError::Io(e.to_string()))?;
        std::fs::rename(&temp_path, path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

impl Default for InMemoryWarehouseDb {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore for InMemoryWarehouseDb {
    fn create_department(&self, code: &str, name: &str) -> Result<Department, StoreError> {
        self.mutate(|state| {
            if state.departments.values().any(|d| d.code == code) {
                return Err(StoreError::duplicate("department", code));
            }
            let dept = Department {
                id: state.next_id(),
                code: code.to_owned(),
                name: name.to_owned(),
            };
            state.departments.insert(dept.id, dept.clone());
            Ok(dept)
        })
    }

    fn department(&self, id: EntityId) -> Result<Option<Department>, StoreError> {
        self.read(|state| Ok(state.departments.get(&id).cloned()))
    }

    fn department_by_code(&self, code: &str) -> Result<Option<Department>, StoreError> {
        self.read(|state| Ok(state.departments.values().find(|d| d.code == code).cloned()))
    }

    fn departments(&self) -> Result<Vec<Department>, StoreError> {
        self.read(|state| Ok(state.departments.values().cloned().collect()))
    }

    fn delete_department(&self, id: EntityId) -> Result<(), StoreError> {
        self.mutate(|state| {
            let dept = state
                .departments
                .get(&id)
                .cloned()
                .ok_or_else(|| StoreError::not_found("department", id))?;
            let referenced = state.materials.values().any(|m| m.department_id == id)
                || state.locations.values().any(|l| l.department_id == Some(id))
                || state.profiles.values().any(|p| p.department_id == Some(id));
            if referenced {
                return Err(StoreError::Referenced {
                    entity: "department",
                    key: dept.code,
                });
            }
            state.departments.remove(&id);
            Ok(())
        })
    }

    fn get_or_create_material(
        &self,
        material_number: &str,
        description: &str,
        department_id: EntityId,
        created_by: Option<&str>,
    ) -> Result<(Material, bool), StoreError> {
        let now_ms = self.time.now_ms();
        self.mutate(|state| {
            if let Some(existing) = state
                .materials
                .values()
                .find(|m| m.material_number == material_number)
            {
                return Ok((existing.clone(), false));
            }
            if !state.departments.contains_key(&department_id) {
                return Err(StoreError::not_found("department", department_id));
            }
            let material = Material {
                id: state.next_id(),
                material_number: material_number.to_owned(),
                description: description.to_owned(),
                department_id,
                created_by: created_by.map(str::to_owned),
                created_at_ms: now_ms,
            };
            state.materials.insert(material.id, material.clone());
            Ok((material, true))
        })
    }

    fn material(&self, id: EntityId) -> Result<Option<Material>, StoreError> {
        self.read(|state| Ok(state.materials.get(&id).cloned()))
    }

    fn material_by_number(&self, material_number: &str) -> Result<Option<Material>, StoreError> {
        self.read(|state| {
            Ok(state
                .materials
                .values()
                .find(|m| m.material_number == material_number)
                .cloned())
        })
    }

    fn update_material_description(
        &self,
        id: EntityId,
        description: &str,
    ) -> Result<Material, StoreError> {
        self.mutate(|state| {
            let material = state
                .materials
                .get_mut(&id)
                .ok_or_else(|| StoreError::not_found("material", id))?;
            material.description = description.to_owned();
            Ok(material.clone())
        })
    }

    fn delete_material(&self, id: EntityId) -> Result<(), StoreError> {
        self.mutate(|state| {
            if state.materials.remove(&id).is_none() {
                return Err(StoreError::not_found("material", id));
            }
            let batch_ids: Vec<EntityId> = state
                .batches
                .values()
                .filter(|b| b.material_id == id)
                .map(|b| b.id)
                .collect();
            for batch_id in &batch_ids {
                state.batches.remove(batch_id);
            }
            let roll_ids: Vec<RollId> = state
                .rolls
                .values()
                .filter(|r| batch_ids.contains(&r.batch_id))
                .map(|r| r.roll_id)
                .collect();
            for roll_id in &roll_ids {
                state.rolls.remove(roll_id);
            }
            state.transactions.retain(|t| !roll_ids.contains(&t.roll_id));
            Ok(())
        })
    }

    fn get_or_create_batch(
        &self,
        material_id: EntityId,
        batch_number: &str,
    ) -> Result<(Batch, bool), StoreError> {
        let now_ms = self.time.now_ms();
        self.mutate(|state| {
            if let Some(existing) = state
                .batches
                .values()
                .find(|b| b.material_id == material_id && b.batch_number == batch_number)
            {
                return Ok((existing.clone(), false));
            }
            if !state.materials.contains_key(&material_id) {
                return Err(StoreError::not_found("material", material_id));
            }
            let batch = Batch {
                id: state.next_id(),
                batch_number: batch_number.to_owned(),
                material_id,
                created_at_ms: now_ms,
            };
            state.batches.insert(batch.id, batch.clone());
            Ok((batch, true))
        })
    }

    fn batch(&self, id: EntityId) -> Result<Option<Batch>, StoreError> {
        self.read(|state| Ok(state.batches.get(&id).cloned()))
    }

    fn get_or_create_customer(&self, name: &str) -> Result<(Customer, bool), StoreError> {
        self.mutate(|state| {
            if let Some(existing) = state.customers.values().find(|c| c.name == name) {
                return Ok((existing.clone(), false));
            }
            let customer = Customer {
                id: state.next_id(),
                name: name.to_owned(),
            };
            state.customers.insert(customer.id, customer.clone());
            Ok((customer, true))
        })
    }

    fn customer(&self, id: EntityId) -> Result<Option<Customer>, StoreError> {
        self.read(|state| Ok(state.customers.get(&id).cloned()))
    }

    fn delete_customer(&self, id: EntityId) -> Result<(), StoreError> {
        self.mutate(|state| {
            if state.customers.remove(&id).is_none() {
                return Err(StoreError::not_found("customer", id));
            }
            for roll in state.rolls.values_mut() {
                if roll.customer_id == Some(id) {
                    roll.customer_id = None;
                }
            }
            for tx in state.transactions.iter_mut() {
                if tx.customer_id == Some(id) {
                    tx.customer_id = None;
                }
            }
            Ok(())
        })
    }

    fn create_location(
        &self,
        location_code: &str,
        department_id: Option<EntityId>,
        row: &str,
        column: &str,
        kind: LocationKind,
    ) -> Result<Location, StoreError> {
        self.mutate(|state| {
            if state
                .locations
                .values()
                .any(|l| l.location_code == location_code)
            {
                return Err(StoreError::duplicate("location", location_code));
            }
            if let Some(dept_id) = department_id {
                if !state.departments.contains_key(&dept_id) {
                    return Err(StoreError::not_found("department", dept_id));
                }
            }
            let location = Location {
                id: state.next_id(),
                location_code: location_code.to_owned(),
                department_id,
                row: row.to_owned(),
                column: column.to_owned(),
                kind,
            };
            state.locations.insert(location.id, location.clone());
            Ok(location)
        })
    }

    fn location(&self, id: EntityId) -> Result<Option<Location>, StoreError> {
        self.read(|state| Ok(state.locations.get(&id).cloned()))
    }

    fn location_by_code(&self, code: &str) -> Result<Option<Location>, StoreError> {
        self.read(|state| {
            Ok(state
                .locations
                .values()
                .find(|l| l.location_code == code)
                .cloned())
        })
    }

    fn locations(&self) -> Result<Vec<Location>, StoreError> {
        self.read(|state| Ok(state.locations.values().cloned().collect()))
    }

    fn delete_location(&self, id: EntityId) -> Result<(), StoreError> {
        self.mutate(|state| {
            if state.locations.remove(&id).is_none() {
                return Err(StoreError::not_found("location", id));
            }
            for tx in state.transactions.iter_mut() {
                if tx.location_id == Some(id) {
                    tx.location_id = None;
                }
            }
            Ok(())
        })
    }
}

impl RollStore for InMemoryWarehouseDb {
    fn create_roll(
        &self,
        batch_id: EntityId,
        weight_kg: f64,
        customer_id: Option<EntityId>,
    ) -> Result<Roll, StoreError> {
        self.mutate(|state| {
            if !state.batches.contains_key(&batch_id) {
                return Err(StoreError::not_found("batch", batch_id));
            }
            if let Some(cust_id) = customer_id {
                if !state.customers.contains_key(&cust_id) {
                    return Err(StoreError::not_found("customer", cust_id));
                }
            }
            let roll = Roll {
                roll_id: Uuid::new_v4(),
                batch_id,
                weight_kg,
                customer_id,
                current_location: None,
                status: Roll::STATUS_IN_STOCK.to_owned(),
            };
            state.rolls.insert(roll.roll_id, roll.clone());
            Ok(roll)
        })
    }

    fn roll(&self, roll_id: RollId) -> Result<Option<Roll>, StoreError> {
        self.read(|state| Ok(state.rolls.get(&roll_id).cloned()))
    }

    fn rolls(&self) -> Result<Vec<Roll>, StoreError> {
        self.read(|state| Ok(state.rolls.values().cloned().collect()))
    }

    fn rolls_at_location(&self, location_code: &str) -> Result<Vec<Roll>, StoreError> {
        self.read(|state| {
            Ok(state
                .rolls
                .values()
                .filter(|r| r.current_location.as_deref() == Some(location_code))
                .cloned()
                .collect())
        })
    }

    fn delete_roll(&self, roll_id: RollId) -> Result<(), StoreError> {
        self.mutate(|state| {
            if state.rolls.remove(&roll_id).is_none() {
                return Err(StoreError::not_found("roll", roll_id));
            }
            state.transactions.retain(|t| t.roll_id != roll_id);
            Ok(())
        })
    }
}

impl TransactionLog for InMemoryWarehouseDb {
    fn commit(&self, tx: NewTransaction) -> Result<Transaction, StoreError> {
        let now_ms = self.time.now_ms();
        self.mutate(|state| {
            if !state.rolls.contains_key(&tx.roll_id) {
                return Err(StoreError::not_found("roll", tx.roll_id));
            }
            let location_code = match tx.location_id {
                Some(loc_id) => Some(
                    state
                        .locations
                        .get(&loc_id)
                        .map(|l| l.location_code.clone())
                        .ok_or_else(|| StoreError::not_found("location", loc_id))?,
                ),
                None => None,
            };
            if let Some(cust_id) = tx.customer_id {
                if !state.customers.contains_key(&cust_id) {
                    return Err(StoreError::not_found("customer", cust_id));
                }
            }
            if tx.action.places_roll() && location_code.is_none() {
                return Err(StoreError::Constraint(format!(
                    "{} requires a location",
                    tx.action
                )));
            }

            let (scanned_at_ms, seq) = state.commit_stamp(now_ms);
            let row = Transaction {
                id: state.next_id(),
                roll_id: tx.roll_id,
                action: tx.action,
                location_id: tx.location_id,
                user: tx.user,
                customer_id: tx.customer_id,
                scanned_at_ms,
                seq,
            };
            state.transactions.push(row.clone());

            // The one place the location cache is written.
            if let Some(roll) = state.rolls.get_mut(&row.roll_id) {
                match row.action {
                    TxAction::Putaway | TxAction::Transfer | TxAction::TempStorage => {
                        roll.current_location = location_code;
                        roll.status = Roll::STATUS_IN_STOCK.to_owned();
                    }
                    TxAction::Dispatch => {
                        roll.current_location = None;
                        roll.status = "DISPATCHED".to_owned();
                    }
                    TxAction::QaScan => {}
                }
            }
            Ok(row)
        })
    }

    fn transactions_for_roll(&self, roll_id: RollId) -> Result<Vec<Transaction>, StoreError> {
        self.read(|state| {
            Ok(state
                .transactions
                .iter()
                .filter(|t| t.roll_id == roll_id)
                .cloned()
                .collect())
        })
    }

    fn latest_for_roll(&self, roll_id: RollId) -> Result<Option<Transaction>, StoreError> {
        self.read(|state| {
            Ok(state
                .transactions
                .iter()
                .filter(|t| t.roll_id == roll_id)
                .max_by_key(|t| t.order_key())
                .cloned())
        })
    }

    fn all_transactions(&self) -> Result<Vec<Transaction>, StoreError> {
        self.read(|state| Ok(state.transactions.clone()))
    }

    fn latest_per_roll(&self) -> Result<Vec<Transaction>, StoreError> {
        self.read(|state| {
            let mut latest: BTreeMap<RollId, Transaction> = BTreeMap::new();
            for tx in &state.transactions {
                match latest.get(&tx.roll_id) {
                    Some(seen) if seen.order_key() >= tx.order_key() => {}
                    _ => {
                        latest.insert(tx.roll_id, tx.clone());
                    }
                }
            }
            Ok(latest.into_values().collect())
        })
    }
}

impl ProfileStore for InMemoryWarehouseDb {
    fn save_profile(&self, profile: Profile) -> Result<(), StoreError> {
        self.mutate(|state| {
            if let Some(dept_id) = profile.department_id {
                if !state.departments.contains_key(&dept_id) {
                    return Err(StoreError::not_found("department", dept_id));
                }
            }
            state.profiles.insert(profile.username.clone(), profile);
            Ok(())
        })
    }

    fn profile(&self, username: &str) -> Result<Option<Profile>, StoreError> {
        self.read(|state| Ok(state.profiles.get(username).cloned()))
    }
}

impl SiteConfigStore for InMemoryWarehouseDb {
    fn site_config(&self) -> Result<SiteConfig, StoreError> {
        self.read(|state| Ok(state.site_config.clone().unwrap_or_default()))
    }

    fn set_site_config(&self, config: SiteConfig) -> Result<(), StoreError> {
        self.mutate(|state| {
            state.site_config = Some(config);
            Ok(())
        })
    }
}

impl AuditStore for InMemoryWarehouseDb {
    fn record_reconciliation(
        &self,
        is_clean: bool,
        mismatches: &str,
    ) -> Result<ReconciliationRecord, StoreError> {
        let now_ms = self.time.now_ms();
        self.mutate(|state| {
            let record = ReconciliationRecord {
                id: state.next_id(),
                run_at_ms: now_ms,
                is_clean,
                mismatches: mismatches.to_owned(),
            };
            state.reconciliations.push(record.clone());
            Ok(record)
        })
    }

    fn latest_reconciliation(&self) -> Result<Option<ReconciliationRecord>, StoreError> {
        self.read(|state| Ok(state.reconciliations.last().cloned()))
    }

    fn record_import(
        &self,
        total_rows: u64,
        imported: u64,
        skipped: u64,
        details: &str,
    ) -> Result<ImportRecord, StoreError> {
        let now_ms = self.time.now_ms();
        self.mutate(|state| {
            let record = ImportRecord {
                id: state.next_id(),
                run_at_ms: now_ms,
                total_rows,
                imported,
                skipped,
                details: details.to_owned(),
            };
            state.imports.push(record.clone());
            Ok(record)
        })
    }

    fn import_records(&self) -> Result<Vec<ImportRecord>, StoreError> {
        self.read(|state| Ok(state.imports.clone()))
    }
}
