//! # Indexer Registry Service Tests

use super::*;
use shared_types::{ErrorCode, CodedError, InMemoryLedger};

const TREASURY: Identity = Identity::new([0xEE; 20]);
const ALPHA: Identity = Identity::new([0xA1; 20]);
const BETA: Identity = Identity::new([0xB2; 20]);

fn make_registry(balances: &[(Identity, u64)]) -> (IndexerRegistry, Arc<InMemoryLedger>) {
    let ledger = Arc::new(InMemoryLedger::with_balances(balances.iter().copied()));
    let registry = IndexerRegistry::new(RegistryConfig::default(), TREASURY, ledger.clone());
    (registry, ledger)
}

fn name(s: &str) -> Name64 {
    Name64::new(s).unwrap()
}

#[test]
fn test_register_debits_bond_and_creates_record() {
    let (mut registry, ledger) = make_registry(&[(ALPHA, 25_000_000)]);

    let record = registry
        .register(CallContext::new(ALPHA, 42), name("alpha"), IndexerType::Archive)
        .unwrap()
        .clone();

    assert!(record.active);
    assert_eq!(record.reputation_score.value(), 500);
    assert_eq!(record.registered_at, 42);
    assert_eq!(record.bond_amount, 20_000_000);
    assert_eq!(ledger.balance_of(&ALPHA), 5_000_000);
    assert_eq!(ledger.balance_of(&TREASURY), 20_000_000);
}

#[test]
fn test_register_twice_fails_and_keeps_first_record() {
    let (mut registry, ledger) = make_registry(&[(ALPHA, 50_000_000)]);
    registry
        .register(CallContext::new(ALPHA, 1), name("first"), IndexerType::Full)
        .unwrap();

    let err = registry
        .register(CallContext::new(ALPHA, 2), name("second"), IndexerType::Archive)
        .unwrap_err();

    assert_eq!(err, RegistryError::AlreadyRegistered { indexer: ALPHA });
    assert_eq!(err.code(), ErrorCode::AlreadyRegistered);
    let record = registry.get_indexer(&ALPHA).unwrap();
    assert_eq!(record.name.as_str(), "first");
    assert_eq!(record.registered_at, 1);
    // Second bond was never taken
    assert_eq!(ledger.balance_of(&ALPHA), 30_000_000);
}

#[test]
fn test_register_without_funds_changes_nothing() {
    let (mut registry, ledger) = make_registry(&[(ALPHA, 100)]);

    let err = registry
        .register(CallContext::new(ALPHA, 1), name("poor"), IndexerType::Full)
        .unwrap_err();

    assert!(matches!(err, RegistryError::BondTransfer(_)));
    assert_eq!(err.code(), ErrorCode::InsufficientPayment);
    assert!(registry.get_indexer(&ALPHA).is_none());
    assert_eq!(registry.indexer_count(), 0);
    assert_eq!(ledger.balance_of(&ALPHA), 100);
}

#[test]
fn test_check_active_distinguishes_unregistered_and_inactive() {
    let (mut registry, _) = make_registry(&[(ALPHA, 20_000_000)]);

    assert_eq!(
        registry.check_active(&BETA).unwrap_err(),
        RegistryError::NotRegistered { indexer: BETA }
    );

    registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();
    assert!(registry.check_active(&ALPHA).is_ok());

    assert!(!registry.toggle_active(&ALPHA).unwrap());
    assert_eq!(
        registry.check_active(&ALPHA).unwrap_err(),
        RegistryError::Inactive { indexer: ALPHA }
    );
    // Still registered
    assert!(registry.check_registered(&ALPHA).is_ok());

    assert!(registry.toggle_active(&ALPHA).unwrap());
    assert!(registry.check_active(&ALPHA).is_ok());
}

#[test]
fn test_toggle_unregistered_fails() {
    let (mut registry, _) = make_registry(&[]);
    let err = registry.toggle_active(&BETA).unwrap_err();
    assert_eq!(err.code(), ErrorCode::IndexerNotRegistered);
}

#[test]
fn test_record_block_updates_counters_and_reputation() {
    let (mut registry, _) = make_registry(&[(ALPHA, 20_000_000)]);
    registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();

    registry.record_block(&ALPHA, 1000).unwrap();
    registry.record_block(&ALPHA, 1001).unwrap();

    let record = registry.get_indexer(&ALPHA).unwrap();
    assert_eq!(record.blocks_indexed, 2);
    assert_eq!(record.last_indexed_height, 1001);
    assert_eq!(record.reputation_score.value(), 510);
}

#[test]
fn test_record_block_rejects_non_increasing_height() {
    let (mut registry, _) = make_registry(&[(ALPHA, 20_000_000)]);
    registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();
    registry.record_block(&ALPHA, 1000).unwrap();

    for height in [999, 1000] {
        let err = registry.record_block(&ALPHA, height).unwrap_err();
        assert_eq!(
            err,
            RegistryError::InvalidBlockSequence {
                indexer: ALPHA,
                height,
                last: 1000
            }
        );
    }
    let record = registry.get_indexer(&ALPHA).unwrap();
    assert_eq!(record.blocks_indexed, 1);
    assert_eq!(record.reputation_score.value(), 505);
}

#[test]
fn test_sequences_are_per_indexer() {
    let (mut registry, _) = make_registry(&[(ALPHA, 20_000_000), (BETA, 20_000_000)]);
    registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();
    registry
        .register(CallContext::new(BETA, 1), name("beta"), IndexerType::Specialized)
        .unwrap();

    registry.record_block(&ALPHA, 500).unwrap();
    // Lower than alpha's height, but beta has its own sequence
    assert!(registry.check_block_sequence(&BETA, 100).is_ok());
}

#[test]
fn test_adjust_reputation_failure_path() {
    let (mut registry, _) = make_registry(&[(ALPHA, 20_000_000)]);
    registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();

    let score = registry
        .adjust_reputation(&ALPHA, ReputationOutcome::Failure)
        .unwrap();
    assert_eq!(score.value(), 490);

    let err = registry
        .adjust_reputation(&BETA, ReputationOutcome::Success)
        .unwrap_err();
    assert_eq!(err, RegistryError::NotRegistered { indexer: BETA });
}

#[test]
fn test_set_active_is_idempotent() {
    let (mut registry, _) = make_registry(&[(ALPHA, 20_000_000)]);
    registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();

    registry.set_active(&ALPHA, false).unwrap();
    registry.set_active(&ALPHA, false).unwrap();
    assert!(!registry.is_active(&ALPHA));
    registry.set_active(&ALPHA, true).unwrap();
    assert!(registry.is_active(&ALPHA));

    assert!(!registry.is_active(&BETA));
    assert!(registry.set_active(&BETA, true).is_err());
}

#[test]
fn test_register_clamps_oversized_initial_reputation() {
    let ledger = Arc::new(InMemoryLedger::with_balances([(ALPHA, 20_000_000)]));
    let config = RegistryConfig {
        initial_reputation: 2000,
        ..RegistryConfig::default()
    };
    let mut registry = IndexerRegistry::new(config, TREASURY, ledger);

    let record = registry
        .register(CallContext::new(ALPHA, 1), name("alpha"), IndexerType::Full)
        .unwrap();
    assert_eq!(record.reputation_score.value(), 1000);
}
