//! # Administrative Service Tests

use super::*;
use li_01_indexer_registry::{IndexerRegistry, IndexerType, RegistryConfig};
use li_02_index_store::shared_store;
use li_04_query_metering::{MeteringConfig, QueryMeteringApi};
use shared_types::{CodedError, ErrorCode, InMemoryLedger, Name64};
use std::sync::Arc;

const OWNER: Identity = Identity::new([0x0F; 20]);
const TREASURY: Identity = Identity::new([0xEE; 20]);
const INDEXER: Identity = Identity::new([0xA1; 20]);
const READER: Identity = Identity::new([0x0A; 20]);

fn owner(now: u64) -> CallContext {
    CallContext::new(OWNER, now)
}

fn intruder() -> CallContext {
    CallContext::new(READER, 1)
}

fn make_meter(ledger: Arc<InMemoryLedger>) -> QueryMeter {
    QueryMeter::new(
        MeteringConfig::default(),
        TREASURY,
        Identity::new([0x5E; 20]),
        ledger,
        shared_store(),
    )
}

#[test]
fn test_every_operation_requires_owner() {
    let ledger = Arc::new(InMemoryLedger::new());
    let mut admin = AdminController::new(OWNER);
    let mut meter = make_meter(ledger.clone());
    let mut registry = IndexerRegistry::new(RegistryConfig::default(), TREASURY, ledger);

    let errors = [
        admin.update_fees(intruder(), &mut meter, 1, 2).unwrap_err(),
        admin
            .toggle_indexer(intruder(), &mut registry, &INDEXER)
            .unwrap_err(),
        admin
            .withdraw_fees(intruder(), &mut meter, 0, &READER)
            .unwrap_err(),
        admin.set_paused(intruder(), true).unwrap_err(),
        admin.trigger_analytics_report(intruder()).unwrap_err(),
    ];
    for err in errors {
        assert_eq!(err.code(), ErrorCode::NotAuthorized);
    }
    assert!(!admin.is_paused());
    assert!(admin.reports().is_empty());
    assert_eq!(meter.config().basic_fee, 100_000);
}

#[test]
fn test_toggle_indexer() {
    let ledger = Arc::new(InMemoryLedger::with_balances([(INDEXER, 20_000_000)]));
    let admin = AdminController::new(OWNER);
    let mut registry = IndexerRegistry::new(RegistryConfig::default(), TREASURY, ledger);

    let err = admin
        .toggle_indexer(owner(1), &mut registry, &INDEXER)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::IndexerNotRegistered);

    registry
        .register(
            CallContext::new(INDEXER, 1),
            Name64::new("idx").unwrap(),
            IndexerType::Specialized,
        )
        .unwrap();
    assert_eq!(admin.toggle_indexer(owner(2), &mut registry, &INDEXER), Ok(false));
    assert_eq!(admin.toggle_indexer(owner(3), &mut registry, &INDEXER), Ok(true));
}

#[test]
fn test_update_fees_and_withdraw() {
    let ledger = Arc::new(InMemoryLedger::with_balances([(READER, 1_000)]));
    let admin = AdminController::new(OWNER);
    let mut meter = make_meter(ledger.clone());

    admin.update_fees(owner(1), &mut meter, 300, 900).unwrap();
    meter
        .query_blocks_by_height_range(CallContext::new(READER, 1), 0, 10)
        .unwrap();
    assert_eq!(ledger.balance_of(&TREASURY), 300);

    let err = admin
        .withdraw_fees(owner(2), &mut meter, 301, &OWNER)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::WithdrawalExceedsFees);
    assert_eq!(admin.withdraw_fees(owner(2), &mut meter, 300, &OWNER), Ok(0));
    assert_eq!(ledger.balance_of(&OWNER), 300);
}

#[test]
fn test_pause_flag() {
    let mut admin = AdminController::new(OWNER);
    assert!(admin.ensure_not_paused().is_ok());

    admin.set_paused(owner(1), true).unwrap();
    assert_eq!(admin.ensure_not_paused(), Err(AdminError::ServicePaused));
    assert_eq!(AdminError::ServicePaused.code(), ErrorCode::ServicePaused);

    admin.set_paused(owner(2), false).unwrap();
    assert!(admin.ensure_not_paused().is_ok());
}

#[test]
fn test_report_tickets_are_unique() {
    let mut admin = AdminController::new(OWNER);
    let first = admin.trigger_analytics_report(owner(10)).unwrap();
    let second = admin.trigger_analytics_report(owner(11)).unwrap();

    assert_ne!(first.report_id, second.report_id);
    assert_eq!(first.requested_by, OWNER);
    assert_eq!(second.requested_at, 11);
    assert_eq!(admin.reports().len(), 2);

    let json = serde_json::to_value(&first).unwrap();
    assert_eq!(json["report_id"], first.report_id.to_string());
}
