//! # Query Metering Service Tests

use super::*;
use li_02_index_store::{shared_store, BlockRecord, IndexStoreWriter};
use shared_types::{CodedError, ErrorCode, InMemoryLedger};

const TREASURY: Identity = Identity::new([0xEE; 20]);
const READER: Identity = Identity::new([0x0A; 20]);
const BROKE: Identity = Identity::new([0x0B; 20]);
const ADDRESS: Identity = Identity::new([0x01; 20]);
const RESULT_STORE: Identity = Identity::new([0x5E; 20]);

fn make_meter() -> (QueryMeter, Arc<InMemoryLedger>, SharedIndexStore) {
    let ledger = Arc::new(InMemoryLedger::with_balances([(READER, 100_000_000)]));
    let store = shared_store();
    let meter = QueryMeter::new(
        MeteringConfig::default(),
        TREASURY,
        RESULT_STORE,
        ledger.clone(),
        store.clone(),
    );
    (meter, ledger, store)
}

fn ctx(now: Timestamp) -> CallContext {
    CallContext::new(READER, now)
}

fn writer(now: Timestamp) -> CallContext {
    CallContext::new(RESULT_STORE, now)
}

fn commit_block(store: &SharedIndexStore, height: Height) {
    store.write().commit_block(BlockRecord {
        height,
        block_hash: [1; 32],
        parent_hash: [0; 32],
        timestamp: height,
        miner: None,
        tx_count: 0,
        total_fees: 0,
        size: 0,
        difficulty: 0,
        indexed_by: Identity::new([0xA1; 20]),
        indexed_at: 0,
    });
}

#[test]
fn test_range_width_limits() {
    let (mut meter, _, _) = make_meter();

    let ok = meter.query_blocks_by_height_range(ctx(1), 900, 1000).unwrap();
    assert_eq!(ok.result_count, 100);

    let err = meter.query_blocks_by_height_range(ctx(1), 1, 200).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TooManyResults);

    let err = meter.query_blocks_by_height_range(ctx(1), 1000, 900).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidTimeRange);

    // Only the accepted query was charged
    assert_eq!(meter.query_stats(&READER).total_queries, 1);
    assert_eq!(meter.metering_stats().total_queries_processed, 1);
}

#[test]
fn test_range_query_charges_basic_fee() {
    let (mut meter, ledger, store) = make_meter();
    commit_block(&store, 1000);
    commit_block(&store, 1003);

    let desc = meter.query_blocks_by_height_range(ctx(5), 995, 1005).unwrap();
    assert_eq!(desc.query_id, 1);
    assert_eq!(desc.result_count, 10);
    assert_eq!(desc.indexed_blocks, 2);
    assert_eq!(ledger.balance_of(&TREASURY), 100_000);
    assert_eq!(ledger.balance_of(&READER), 99_900_000);

    let stats = meter.query_stats(&READER);
    assert_eq!(stats.total_fees_paid, 100_000);
    assert_eq!(stats.successful_queries, 1);
    assert_eq!(stats.last_query_slot, 5);
}

#[test]
fn test_eleventh_query_in_slot_is_rejected() {
    let (mut meter, ledger, _) = make_meter();
    for _ in 0..10 {
        meter.query_blocks_by_height_range(ctx(3), 1, 2).unwrap();
    }
    assert!(!meter.check_rate_limit(&READER, 3));

    let err = meter.query_blocks_by_height_range(ctx(3), 1, 2).unwrap_err();
    assert_eq!(err.code(), ErrorCode::RateLimitExceeded);
    assert_eq!(ledger.balance_of(&TREASURY), 1_000_000);

    meter.query_blocks_by_height_range(ctx(4), 1, 2).unwrap();
    assert_eq!(meter.query_stats(&READER).queries_this_slot, 1);
}

#[test]
fn test_unpaid_query_changes_nothing() {
    let (mut meter, _, _) = make_meter();
    let broke = CallContext::new(BROKE, 1);

    let err = meter.query_blocks_by_height_range(broke, 1, 2).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InsufficientPayment);
    assert_eq!(meter.query_stats(&BROKE), QueryStatsRecord::default());

    let stats = meter.metering_stats();
    assert_eq!(stats.total_queries_processed, 0);
    assert_eq!(stats.next_query_id, 1);
    assert_eq!(stats.fees_collected, 0);
}

#[test]
fn test_premium_query_charges_premium_fee() {
    let (mut meter, ledger, _) = make_meter();
    let query_type = Name64::new("whale_transfers").unwrap();

    let desc = meter
        .premium_query(ctx(1), query_type.clone(), b"min=1000", 100)
        .unwrap();
    assert_eq!(desc.estimated_results, 100);
    assert_eq!(desc.query_key, query_digest("whale_transfers", b"min=1000"));
    assert_eq!(ledger.balance_of(&TREASURY), 500_000);
    assert_eq!(meter.query_stats(&READER).premium_queries, 1);

    let err = meter.premium_query(ctx(1), query_type, b"", 101).unwrap_err();
    assert_eq!(err.code(), ErrorCode::TooManyResults);
}

#[test]
fn test_query_ids_are_shared_across_query_kinds() {
    let (mut meter, _, _) = make_meter();
    let a = meter.query_blocks_by_height_range(ctx(1), 1, 2).unwrap();
    let b = meter.query_events(ctx(1), ADDRESS, None, 1, 5).unwrap();
    let c = meter
        .query_token_transfers(ctx(1), ADDRESS, Some(READER), None, 1, 1)
        .unwrap();
    assert_eq!((a.query_id, b.query_id, c.query_id), (1, 2, 3));
    assert_eq!(c.from, Some(READER));
    assert_eq!(meter.metering_stats().next_query_id, 4);
}

#[test]
fn test_event_and_transfer_queries_validate_range() {
    let (mut meter, _, _) = make_meter();
    let err = meter.query_events(ctx(1), ADDRESS, None, 10, 9).unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidTimeRange);
    let err = meter
        .query_token_transfers(ctx(1), ADDRESS, None, None, 10, 9)
        .unwrap_err();
    assert_eq!(err.code(), ErrorCode::InvalidTimeRange);
}

#[test]
fn test_address_activity_default_is_not_stored() {
    let (mut meter, _, store) = make_meter();
    let desc = meter.query_address_activity(ctx(1), ADDRESS).unwrap();
    assert_eq!(desc.activity.tx_count, 0);
    assert_eq!(desc.activity.address_type.as_str(), "standard");
    assert!(store.read().address_activity(&ADDRESS).is_none());
}

#[test]
fn test_contract_info_is_free() {
    let (meter, ledger, _) = make_meter();
    assert!(meter.query_contract_info(&ADDRESS).is_none());
    assert_eq!(ledger.balance_of(&TREASURY), 0);
    assert_eq!(meter.query_stats(&READER), QueryStatsRecord::default());
}

#[test]
fn test_cache_expires_after_lifetime() {
    let (mut meter, _, _) = make_meter();
    let key = query_digest("range", b"1-2");
    meter.cache_put(writer(1_000), key, [7; 32], 2).unwrap();

    assert!(meter.cache_get(1_000, &key).is_some());
    assert!(meter.cache_get(1_143, &key).is_some());
    assert!(meter.cache_get(1_144, &key).is_none());
    assert!(meter.cache_get(5_000, &key).is_none());

    // Expired entries are not purged
    assert_eq!(meter.metering_stats().cache_entries, 1);
}

#[test]
fn test_cache_hits_are_counted_and_put_overwrites() {
    let (mut meter, _, _) = make_meter();
    let key = query_digest("range", b"x");
    meter.cache_put(writer(10), key, [1; 32], 5).unwrap();
    meter.cache_get(11, &key);
    let hit = meter.cache_get(12, &key).unwrap();
    assert_eq!(hit.hit_count, 2);

    let fresh = meter.cache_put(writer(20), key, [2; 32], 6).unwrap();
    assert_eq!(fresh.hit_count, 0);
    assert_eq!(fresh.expires_at, 164);
    assert_eq!(meter.cache_get(21, &key).unwrap().result_digest, [2; 32]);
}

#[test]
fn test_set_fees_applies_to_next_query() {
    let (mut meter, ledger, _) = make_meter();
    meter.set_fees(1, 2);
    meter.query_blocks_by_height_range(ctx(1), 1, 2).unwrap();
    assert_eq!(ledger.balance_of(&TREASURY), 1);
    assert_eq!(meter.metering_stats().basic_fee, 1);
}

#[test]
fn test_withdraw_fees_bounded_by_collected() {
    let (mut meter, ledger, _) = make_meter();
    meter.query_blocks_by_height_range(ctx(1), 1, 2).unwrap();

    let err = meter.withdraw_fees(100_001, &ADDRESS).unwrap_err();
    assert_eq!(err.code(), ErrorCode::WithdrawalExceedsFees);

    assert_eq!(meter.withdraw_fees(60_000, &ADDRESS), Ok(40_000));
    assert_eq!(ledger.balance_of(&ADDRESS), 60_000);
    assert_eq!(meter.available_fees(), 40_000);
    assert_eq!(meter.metering_stats().fees_withdrawn, 60_000);
}

#[test]
fn test_charge_and_record_failure_path() {
    let (mut meter, _, _) = make_meter();
    meter.charge_and_record(ctx(9), 0, false, false).unwrap();
    let stats = meter.query_stats(&READER);
    assert_eq!(stats.failed_queries, 1);
    assert_eq!(stats.queries_this_slot, 1);
}

#[test]
fn test_cache_put_requires_result_store() {
    let (mut meter, _, _) = make_meter();
    let key = query_digest("range", b"1-2");
    meter.cache_put(writer(10), key, [7; 32], 2).unwrap();

    let err = meter.cache_put(ctx(11), key, [9; 32], 999_999).unwrap_err();
    assert_eq!(err, MeteringError::NotAuthorized { caller: READER });
    assert_eq!(err.code(), ErrorCode::NotAuthorized);

    let entry = meter.cache_get(12, &key).unwrap();
    assert_eq!(entry.result_count, 2);
    assert_eq!(entry.result_digest, [7; 32]);
}

#[test]
fn test_cache_drops_least_recently_used_at_capacity() {
    let config = MeteringConfig {
        cache_capacity: 2,
        ..MeteringConfig::default()
    };
    let mut meter = QueryMeter::new(
        config,
        TREASURY,
        RESULT_STORE,
        Arc::new(InMemoryLedger::new()),
        shared_store(),
    );
    let (a, b, c) = (
        query_digest("range", b"a"),
        query_digest("range", b"b"),
        query_digest("range", b"c"),
    );
    meter.cache_put(writer(1), a, [1; 32], 1).unwrap();
    meter.cache_put(writer(1), b, [2; 32], 1).unwrap();
    assert!(meter.cache_get(2, &a).is_some());
    meter.cache_put(writer(3), c, [3; 32], 1).unwrap();

    assert_eq!(meter.metering_stats().cache_entries, 2);
    assert!(meter.cache_get(4, &a).is_some());
    assert!(meter.cache_get(4, &b).is_none());
    assert!(meter.cache_get(4, &c).is_some());
}

#[test]
fn test_treasury_queries_collect_no_fees() {
    let ledger = Arc::new(InMemoryLedger::with_balances([(TREASURY, 20_000_000)]));
    let mut meter = QueryMeter::new(
        MeteringConfig::default(),
        TREASURY,
        RESULT_STORE,
        ledger.clone(),
        shared_store(),
    );

    meter
        .query_blocks_by_height_range(CallContext::new(TREASURY, 5), 0, 1)
        .unwrap();

    assert_eq!(meter.metering_stats().fees_collected, 0);
    assert_eq!(meter.available_fees(), 0);
    assert_eq!(meter.query_stats(&TREASURY).total_fees_paid, 0);
    assert_eq!(meter.query_stats(&TREASURY).total_queries, 1);
    assert!(meter.withdraw_fees(1, &READER).is_err());
    assert_eq!(ledger.balance_of(&TREASURY), 20_000_000);
}
