//! # Roll Lifecycle Flow
//!
//! End-to-end walk through the state machine: putaway, transfer, dispatch,
//! and the cache/log agreement invariant after every step.

#[cfg(test)]
mod tests {
    use crate::fixtures::Harness;
    use shared_types::{RollId, TxAction};
    use wt_01_entity_store::{CatalogStore, RollStore, TransactionLog};
    use wt_02_transition_validator::TransitionError;
    use wt_03_transaction_recorder::{RecordError, RecordRequest, TransactionRecorderApi};

    /// The invariant every recorded sequence must maintain: the cache equals
    /// the latest transaction's location for placing actions, null after a
    /// dispatch, and null with no history.
    fn assert_cache_matches_log(harness: &Harness, roll_id: RollId) {
        let roll = harness.db.roll(roll_id).unwrap().unwrap();
        let latest = harness.db.latest_for_roll(roll_id).unwrap();
        let expected = match &latest {
            Some(tx) if tx.action.places_roll() => tx
                .location_id
                .and_then(|id| harness.db.location(id).unwrap())
                .map(|l| l.location_code),
            _ => None,
        };
        assert_eq!(
            roll.current_location, expected,
            "cache and log disagree for {roll_id}"
        );
    }

    #[tokio::test]
    async fn test_full_lifecycle_putaway_transfer_dispatch() {
        let harness = Harness::new();
        let roll_id = harness.seed_roll("FM", "MAT-1", "B-1");
        harness.seed_location("FMA01");
        harness.seed_location("FMA02");
        assert_cache_matches_log(&harness, roll_id);

        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location("FMA01"))
            .await
            .unwrap();
        assert_eq!(
            harness.db.roll(roll_id).unwrap().unwrap().current_location,
            Some("FMA01".to_owned())
        );
        assert_cache_matches_log(&harness, roll_id);

        harness.clock.advance(1_000);
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Transfer, "op").at_location("FMA02"))
            .await
            .unwrap();
        assert_eq!(
            harness.db.roll(roll_id).unwrap().unwrap().current_location,
            Some("FMA02".to_owned())
        );
        assert_cache_matches_log(&harness, roll_id);

        harness.clock.advance(1_000);
        harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Dispatch, "driver").for_customer("Acme"))
            .await
            .unwrap();
        assert_eq!(
            harness.db.roll(roll_id).unwrap().unwrap().current_location,
            None
        );
        assert_cache_matches_log(&harness, roll_id);

        // Dispatch is terminal.
        let err = harness
            .recorder
            .record(RecordRequest::new(roll_id, TxAction::Transfer, "op").at_location("FMA01"))
            .await
            .unwrap_err();
        match err {
            RecordError::Transition(TransitionError::InvalidTransition {
                attempted,
                last,
                legal,
            }) => {
                assert_eq!(attempted, TxAction::Transfer);
                assert_eq!(last, Some(TxAction::Dispatch));
                assert!(legal.is_empty());
            }
            other => panic!("expected invalid transition, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_putaway_idempotence_is_one_row() {
        let harness = Harness::new();
        let roll_id = harness.seed_roll("FM", "MAT-1", "B-1");
        harness.seed_location("FMA01");

        let req = RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location("FMA01");
        let first = harness.recorder.record(req.clone()).await.unwrap();
        harness.clock.advance(5_000);
        let second = harness.recorder.record(req).await.unwrap();

        assert!(second.is_noop());
        assert_eq!(second.transaction().id, first.transaction().id);
        assert_eq!(harness.db.transactions_for_roll(roll_id).unwrap().len(), 1);
        assert_cache_matches_log(&harness, roll_id);
    }

    #[tokio::test]
    async fn test_cache_agreement_holds_over_many_rolls() {
        use rand::prelude::*;

        let harness = Harness::new();
        let racks = ["FMA01", "FMA02", "FMA03"];
        for rack in racks {
            harness.seed_location(rack);
        }

        let mut rolls = Vec::new();
        for i in 0..10 {
            rolls.push(harness.seed_roll("FM", "MAT-1", &format!("B-{i}")));
        }

        // Walk each roll a randomized distance through the lifecycle.
        let mut rng = StdRng::seed_from_u64(42);
        for roll_id in rolls.iter().copied() {
            let start = racks.choose(&mut rng).copied().unwrap();
            harness
                .recorder
                .record(RecordRequest::new(roll_id, TxAction::Putaway, "op").at_location(start))
                .await
                .unwrap();
            harness.clock.advance(10);
            if rng.gen_bool(0.5) {
                let target = racks.iter().find(|r| **r != start).copied().unwrap();
                harness
                    .recorder
                    .record(
                        RecordRequest::new(roll_id, TxAction::Transfer, "op").at_location(target),
                    )
                    .await
                    .unwrap();
                harness.clock.advance(10);
            }
            if rng.gen_bool(0.3) {
                harness
                    .recorder
                    .record(
                        RecordRequest::new(roll_id, TxAction::Dispatch, "driver")
                            .for_customer("Acme"),
                    )
                    .await
                    .unwrap();
                harness.clock.advance(10);
            }
        }

        for roll_id in rolls {
            assert_cache_matches_log(&harness, roll_id);
        }
    }

    #[tokio::test]
    async fn test_unknown_roll_is_not_found() {
        let harness = Harness::new();
        let err = harness
            .recorder
            .record(RecordRequest::new(
                uuid::Uuid::new_v4(),
                TxAction::Putaway,
                "op",
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, RecordError::RollNotFound(_)));
    }
}
