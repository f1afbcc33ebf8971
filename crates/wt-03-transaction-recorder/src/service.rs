//! Transaction Recorder Service
//!
//! Orchestrates the record pipeline:
//! 1. Resolve roll and location
//! 2. Read the roll's last transaction
//! 3. Run the transition validator
//! 4. Resolve-or-create the named customer
//! 5. Commit the transaction + location-cache update atomically

use crate::domain::errors::RecordError;
use crate::domain::requests::{RecordOutcome, RecordRequest};
use crate::ports::inbound::TransactionRecorderApi;
use async_trait::async_trait;
use shared_types::RollId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, warn};
use wt_01_entity_store::{NewTransaction, WarehouseStore};
use wt_02_transition_validator::{validate, Decision, LastTransition, TransitionError};

/// Transaction Recorder Service
///
/// Holds one async mutex per roll so that concurrent requests for the same
/// roll serialize around the read-validate-commit section. Requests for
/// different rolls do not contend.
pub struct RecorderService {
    store: Arc<dyn WarehouseStore>,
    roll_locks: Mutex<HashMap<RollId, Arc<tokio::sync::Mutex<()>>>>,
}

impl RecorderService {
    pub fn new(store: Arc<dyn WarehouseStore>) -> Self {
        Self {
            store,
            roll_locks: Mutex::new(HashMap::new()),
        }
    }

    fn lock_for(&self, roll_id: RollId) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self
            .roll_locks
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        locks.entry(roll_id).or_default().clone()
    }
}

#[async_trait]
impl TransactionRecorderApi for RecorderService {
    async fn record(&self, request: RecordRequest) -> Result<RecordOutcome, RecordError> {
        let roll_lock = self.lock_for(request.roll_id);
        let _guard = roll_lock.lock().await;

        // 1. Resolve the roll.
        let roll = self
            .store
            .roll(request.roll_id)?
            .ok_or(RecordError::RollNotFound(request.roll_id))?;

        // 2. Resolve the location, if a code was given.
        let location = match request.location_code.as_deref() {
            Some(code) => Some(
                self.store
                    .location_by_code(code)?
                    .ok_or_else(|| RecordError::LocationNotFound(code.to_owned()))?,
            ),
            None => None,
        };
        if request.action.places_roll() && location.is_none() {
            return Err(RecordError::MissingLocation {
                action: request.action,
            });
        }

        // 3. Validate against the last transaction.
        let last_tx = self.store.latest_for_roll(roll.roll_id)?;
        let last = match &last_tx {
            Some(tx) => {
                let last_code = match tx.location_id {
                    Some(loc_id) => self.store.location(loc_id)?.map(|l| l.location_code),
                    None => None,
                };
                Some(LastTransition::new(tx.action, last_code.as_deref()))
            }
            None => None,
        };
        let decision = validate(last.as_ref(), request.action, request.location_code.as_deref());
        match (decision, last_tx) {
            (Decision::Allow, _) => {}
            (Decision::Noop, Some(prior)) => {
                debug!(
                    roll_id = %roll.roll_id,
                    action = %request.action,
                    "[wt-03] Idempotent repeat, returning prior transaction"
                );
                return Ok(RecordOutcome::AlreadyRecorded(prior));
            }
            (Decision::Reject(reason), _) => {
                warn!(
                    roll_id = %roll.roll_id,
                    action = %request.action,
                    %reason,
                    "[wt-03] Transition rejected"
                );
                return Err(reason.into());
            }
            // The validator only answers Noop off a prior transaction; with
            // none on record the repeat reads as a duplicate.
            (Decision::Noop, None) => {
                return Err(TransitionError::Duplicate {
                    action: request.action,
                }
                .into());
            }
        }

        // 4. Resolve-or-create the customer named by free text.
        let customer_id = match request.customer.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => {
                let (customer, created) = self.store.get_or_create_customer(name)?;
                if created {
                    debug!(customer = name, "[wt-03] Created customer on dispatch");
                }
                Some(customer.id)
            }
            _ => None,
        };

        // 5. Commit: transaction row + location cache, one atomic unit.
        let committed = self.store.commit(NewTransaction {
            roll_id: roll.roll_id,
            action: request.action,
            location_id: location.as_ref().map(|l| l.id),
            user: request.user.clone(),
            customer_id,
        })?;

        info!(
            roll_id = %roll.roll_id,
            action = %committed.action,
            location = request.location_code.as_deref(),
            seq = committed.seq,
            "[wt-03] Transaction recorded"
        );
        Ok(RecordOutcome::Recorded(committed))
    }
}
