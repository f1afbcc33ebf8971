//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::RecordError;
use crate::domain::requests::{RecordOutcome, RecordRequest};
use async_trait::async_trait;

/// Primary Transaction Recorder API.
///
/// This is the only path allowed to mutate `Roll.current_location`; every
/// mutation flows through one atomic append-and-update commit.
#[async_trait]
pub trait TransactionRecorderApi: Send + Sync {
    /// Record one movement for a roll.
    ///
    /// Resolves the roll and location, validates the transition against the
    /// roll's last transaction, resolves-or-creates the named customer, and
    /// commits the transaction plus the location-cache update atomically.
    async fn record(&self, request: RecordRequest) -> Result<RecordOutcome, RecordError>;
}
