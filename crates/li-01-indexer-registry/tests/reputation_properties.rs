//! Property tests for reputation saturation.

use li_01_indexer_registry::{
    IndexerRegistry, IndexerRegistryApi, IndexerType, RegistryConfig, ReputationOutcome,
};
use proptest::prelude::*;
use shared_types::{CallContext, Identity, InMemoryLedger, Name64};
use std::sync::Arc;

const TREASURY: Identity = Identity::new([0xEE; 20]);
const INDEXER: Identity = Identity::new([0x01; 20]);

fn registered() -> IndexerRegistry {
    let ledger = Arc::new(InMemoryLedger::with_balances([(INDEXER, 20_000_000)]));
    let mut registry = IndexerRegistry::new(RegistryConfig::default(), TREASURY, ledger);
    registry
        .register(
            CallContext::new(INDEXER, 0),
            Name64::new("prop").unwrap(),
            IndexerType::Full,
        )
        .unwrap();
    registry
}

proptest! {
    #[test]
    fn reputation_after_n_blocks_saturates(n in 0u64..300) {
        let mut registry = registered();
        for height in 1..=n {
            registry.record_block(&INDEXER, height).unwrap();
        }
        let score = registry.get_indexer(&INDEXER).unwrap().reputation_score.value() as u64;
        prop_assert_eq!(score, (500 + 5 * n).min(1000));
    }

    #[test]
    fn reputation_stays_in_bounds(outcomes in proptest::collection::vec(any::<bool>(), 0..400)) {
        let mut registry = registered();
        for success in outcomes {
            let outcome = if success { ReputationOutcome::Success } else { ReputationOutcome::Failure };
            let score = registry.adjust_reputation(&INDEXER, outcome).unwrap().value();
            prop_assert!(score <= 1000);
        }
    }
}
