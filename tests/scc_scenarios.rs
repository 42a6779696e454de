//! End-to-end coverage of the classification pipeline: `UpstreamPayload` or
//! a hand-built `RawTx` in, a `Parsed` or `EraseResult` out. Exercises the
//! concrete trade shapes the pipeline is meant to resolve plus the
//! boundary cases around multi-hop routing, ambiguous direction, and the
//! rejection taxonomy.

use rust_decimal::Decimal;
use scc::scc::config::{Confidence, CoreConfig};
use scc::scc::error::RejectionReason;
use scc::scc::ids::{Account, Mint, Signature};
use scc::scc::ingest::{ingest, RawBalanceChange, UpstreamPayload};
use scc::scc::parsed::Parsed;
use scc::scc::raw_tx::{Action, AssetAmt, BalanceChange, RawTx, TxStatus};
use scc::scc::roles::Direction;
use scc::scc::storage::to_storage_records;
use scc::scc::telemetry::NoopTelemetry;
use scc::scc::Parser;
use std::collections::{HashMap, HashSet};

fn core_config(core_mints: Vec<&str>) -> CoreConfig {
    CoreConfig::new(
        core_mints.into_iter().map(Mint::new).collect(),
        HashSet::new(),
        HashMap::new(),
        5000,
        None,
        Vec::new(),
    )
}

fn core_config_with_overrides(core_mints: Vec<&str>, overrides: Vec<(&str, u8)>) -> CoreConfig {
    CoreConfig::new(
        core_mints.into_iter().map(Mint::new).collect(),
        HashSet::new(),
        overrides
            .into_iter()
            .map(|(m, d)| (Mint::new(m), d))
            .collect(),
        5000,
        None,
        Vec::new(),
    )
}

fn bc(owner: &str, mint: &str, change_raw: i128, decimals: u8) -> BalanceChange {
    BalanceChange {
        owner: Account::parse(owner),
        mint: Mint::new(mint),
        pre_raw: 0,
        post_raw: change_raw,
        change_raw,
        decimals,
        symbol: None,
    }
}

fn swap_action(swapper: &str, in_mint: &str, in_raw: u128, in_dec: u8, out_mint: &str, out_raw: u128, out_dec: u8) -> Action {
    Action::Swap {
        swapper: Some(Account::parse(swapper)),
        token_in: AssetAmt {
            mint: Mint::new(in_mint),
            amount_raw: in_raw,
            decimals: in_dec,
            symbol: None,
        },
        token_out: AssetAmt {
            mint: Mint::new(out_mint),
            amount_raw: out_raw,
            decimals: out_dec,
            symbol: None,
        },
    }
}

fn raw_tx(balance_changes: Vec<BalanceChange>, actions: Vec<Action>) -> RawTx {
    RawTx {
        signature: Signature::new("sig"),
        timestamp_ms: 1_700_000_000_000,
        status: TxStatus::Success,
        fee: 5000,
        fee_payer: Account::parse("alice"),
        signers: vec![Account::parse("alice")],
        protocol: None,
        balance_changes,
        actions,
        missing_decimals: HashSet::new(),
    }
}

// ---------------------------------------------------------------------
// Concrete trade shapes
// ---------------------------------------------------------------------

#[test]
fn buy_against_core_quote_emits_single_with_null_sol_amount() {
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);

    let changes = vec![
        bc("alice", "usdc-mint", -10_000_000, 6),
        bc("alice", "TKN", 1000, 0),
        bc("venue", "usdc-mint", 10_000_000, 6),
        bc("venue", "TKN", -1000, 0),
    ];
    let actions = vec![swap_action("alice", "usdc-mint", 10_000_000, 6, "TKN", 1000, 0)];
    let raw = raw_tx(changes, actions);

    let parsed = parser.parse(raw).unwrap();
    let swap = match &parsed {
        Parsed::Single(s) => s,
        _ => panic!("expected a single swap"),
    };

    assert_eq!(swap.direction, Direction::Buy);
    assert_eq!(swap.base.mint, Mint::new("TKN"));
    assert_eq!(swap.quote.mint, Mint::new("usdc-mint"));
    assert_eq!(swap.amounts.base_amount, Decimal::from(1000));
    assert_eq!(swap.confidence, Confidence::High);

    let records = to_storage_records(&parsed);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].amount.buy_amount, Some(Decimal::from(1000)));
    assert_eq!(records[0].amount.sell_amount, None);
    assert!(records[0].sol_amount.sell_sol_amount.is_none());
    assert!(records[0].sol_amount.buy_sol_amount.is_none());
}

#[test]
fn sell_against_higher_priority_sol_quote_populates_sell_sol_amount() {
    // SOL ranks ahead of USDC in the priority ladder, so it wins the quote
    // role even though both are configured as core.
    let config = core_config(vec![scc::constants::WRAPPED_SOL_MINT, "usdc-mint"]);
    let parser = Parser::with_config(config);

    let changes = vec![
        bc("alice", "TKN", -500, 0),
        bc("alice", scc::constants::NATIVE_SOL_MINT, 2_000_000_000, 9),
        bc("venue", "TKN", 500, 0),
        bc("venue", scc::constants::NATIVE_SOL_MINT, -2_000_000_000, 9),
    ];
    let actions = vec![swap_action(
        "alice",
        "TKN",
        500,
        0,
        scc::constants::WRAPPED_SOL_MINT,
        2_000_000_000,
        9,
    )];
    let raw = raw_tx(changes, actions);

    let parsed = parser.parse(raw).unwrap();
    let swap = match &parsed {
        Parsed::Single(s) => s,
        _ => panic!("expected a single swap"),
    };

    assert_eq!(swap.direction, Direction::Sell);
    assert_eq!(swap.base.mint, Mint::new("TKN"));
    assert_eq!(swap.quote.mint, Mint::new(scc::constants::WRAPPED_SOL_MINT));

    let records = to_storage_records(&parsed);
    assert_eq!(records[0].sol_amount.sell_sol_amount, Some(Decimal::from(2)));
    assert_eq!(records[0].sol_amount.buy_sol_amount, None);
    assert_eq!(records[0].amount.sell_amount, Some(Decimal::from(500)));
}

#[test]
fn split_via_core_pivot_emits_sell_and_buy_legs() {
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);

    let changes = vec![
        bc("alice", "TKNA", -100, 0),
        bc("alice", "TKNB", 50, 0),
        // The pivot nets to zero for the swapper: it only ever shows up in
        // the venue's own swap legs.
        bc("alice", "usdc-mint", 200_000_000, 6),
        bc("alice", "usdc-mint", -200_000_000, 6),
        bc("venue", "TKNA", 100, 0),
        bc("venue", "TKNB", -50, 0),
    ];
    let actions = vec![
        swap_action("alice", "TKNA", 100, 0, "usdc-mint", 200_000_000, 6),
        swap_action("alice", "usdc-mint", 200_000_000, 6, "TKNB", 50, 0),
    ];
    let raw = raw_tx(changes, actions);

    let parsed = parser.parse(raw).unwrap();
    let pair = match &parsed {
        Parsed::Split(p) => p,
        _ => panic!("expected a split pair"),
    };

    assert_eq!(pair.sell.direction, Direction::Sell);
    assert_eq!(pair.sell.base.mint, Mint::new("TKNA"));
    assert_eq!(pair.sell.quote.mint, Mint::new("usdc-mint"));
    assert_eq!(pair.sell.amounts.base_amount, Decimal::from(100));

    assert_eq!(pair.buy.direction, Direction::Buy);
    assert_eq!(pair.buy.base.mint, Mint::new("TKNB"));
    assert_eq!(pair.buy.quote.mint, Mint::new("usdc-mint"));
    assert_eq!(pair.buy.amounts.base_amount, Decimal::from(50));

    assert_eq!(pair.sell.signature, pair.buy.signature);
    assert_eq!(pair.sell.swapper, pair.buy.swapper);

    // The pivot's venue-boundary flow, not the base quantity, is what the
    // sell leg nets in the quote asset.
    assert_eq!(pair.sell.amounts.net_wallet_received, Some(Decimal::from(200)));

    let records = to_storage_records(&parsed);
    assert_eq!(records.len(), 2);
    // Neither leg's quote is the native wrap-group, so no leg should ever
    // carry a populated sol_amount.
    for record in &records {
        assert!(record.sol_amount.sell_sol_amount.is_none());
        assert!(record.sol_amount.buy_sol_amount.is_none());
    }
    // token_out on the sell leg mirrors the pivot flow the swapper's
    // wallet actually received in the quote asset, not base_amount.
    assert_eq!(records[0].token_out.amount, Decimal::from(200));
}

#[test]
fn failed_status_is_erased_before_parsing() {
    let config = core_config(vec!["usdc-mint"]);
    let telemetry = NoopTelemetry;
    let payload = UpstreamPayload {
        signature: "sig".to_string(),
        timestamp_ms: 0,
        status: "FAILED".to_string(),
        fee: 5000,
        fee_payer: "alice".to_string(),
        signers: vec!["alice".to_string()],
        protocol_name: None,
        protocol_program_id: None,
        balance_changes: vec![RawBalanceChange {
            owner: "alice".to_string(),
            mint: "TKN".to_string(),
            pre_raw: 0,
            post_raw: 100,
            decimals: Some(0),
            symbol: None,
        }],
        actions: Vec::new(),
    };

    let err = ingest(payload, &config, &telemetry).unwrap_err();
    assert_eq!(err.reason, RejectionReason::TxFailed);
}

#[test]
fn venue_only_delta_with_zero_net_is_not_a_swap() {
    // alice only ever gains in this transaction — the matching loss is
    // entirely on the venue's side — so she shows no net loss anywhere and
    // cannot be the swapper.
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);
    let changes = vec![bc("alice", "TKN", 1000, 0)];
    let raw = raw_tx(changes, Vec::new());

    let err = parser.parse(raw).unwrap_err();
    assert_eq!(err.reason, RejectionReason::NoSwapSignature);
}

#[test]
fn missing_decimals_on_selected_base_erases_unless_overridden() {
    fn payload() -> UpstreamPayload {
        UpstreamPayload {
            signature: "sig".to_string(),
            timestamp_ms: 0,
            status: "SUCCESS".to_string(),
            fee: 5000,
            fee_payer: "alice".to_string(),
            signers: vec!["alice".to_string()],
            protocol_name: None,
            protocol_program_id: None,
            balance_changes: vec![
                RawBalanceChange {
                    owner: "alice".to_string(),
                    mint: "TKN".to_string(),
                    pre_raw: 0,
                    post_raw: 100,
                    decimals: None,
                    symbol: None,
                },
                RawBalanceChange {
                    owner: "alice".to_string(),
                    mint: scc::constants::NATIVE_SOL_MINT.to_string(),
                    pre_raw: 0,
                    post_raw: -1_000_000_000,
                    decimals: Some(9),
                    symbol: None,
                },
                RawBalanceChange {
                    owner: "venue".to_string(),
                    mint: "TKN".to_string(),
                    pre_raw: 0,
                    post_raw: -100,
                    decimals: None,
                    symbol: None,
                },
                RawBalanceChange {
                    owner: "venue".to_string(),
                    mint: scc::constants::NATIVE_SOL_MINT.to_string(),
                    pre_raw: 0,
                    post_raw: 1_000_000_000,
                    decimals: Some(9),
                    symbol: None,
                },
            ],
            actions: Vec::new(),
        }
    }

    let telemetry = NoopTelemetry;

    let without_override = core_config(vec![scc::constants::WRAPPED_SOL_MINT]);
    let raw = ingest(payload(), &without_override, &telemetry).unwrap();
    assert!(raw.missing_decimals.contains(&Mint::new("TKN")));
    let err = Parser::with_config(without_override).parse(raw).unwrap_err();
    assert_eq!(err.reason, RejectionReason::MissingDecimals);

    let with_override = core_config_with_overrides(vec![scc::constants::WRAPPED_SOL_MINT], vec![("TKN", 0)]);
    let raw = ingest(payload(), &with_override, &telemetry).unwrap();
    assert!(raw.missing_decimals.is_empty());
    assert!(matches!(
        Parser::with_config(with_override).parse(raw),
        Ok(Parsed::Single(_))
    ));
}

// ---------------------------------------------------------------------
// Boundary behaviors
// ---------------------------------------------------------------------

#[test]
fn single_nonzero_delta_has_no_swap_signature() {
    // alice only ever loses here (e.g. a fee payment with no matching
    // gain) — a wallet with no net gain anywhere isn't a swapper either.
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);
    let raw = raw_tx(vec![bc("alice", "usdc-mint", -10_000_000, 6)], Vec::new());
    let err = parser.parse(raw).unwrap_err();
    assert_eq!(err.reason, RejectionReason::NoSwapSignature);
}

#[test]
fn two_negative_deltas_are_ambiguous_direction() {
    // Both of alice's two non-zero wrap-group deltas are losses — the
    // shape alone can't resolve into buy or sell. Her swap signature still
    // holds because the native wrap-group's own gain (wrapped-SOL) and loss
    // (native-SOL) net negative overall, but show up as separate positive
    // and negative rows before aggregation.
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);
    let changes = vec![
        bc("alice", "usdc-mint", -10_000_000, 6),
        bc("alice", scc::constants::NATIVE_SOL_MINT, -2_000_000_000, 9),
        bc("alice", scc::constants::WRAPPED_SOL_MINT, 500_000_000, 9),
        bc("venue", "usdc-mint", 10_000_000, 6),
        bc("venue", scc::constants::NATIVE_SOL_MINT, 2_000_000_000, 9),
        bc("venue", scc::constants::WRAPPED_SOL_MINT, -500_000_000, 9),
    ];
    let raw = raw_tx(changes, Vec::new());
    let err = parser.parse(raw).unwrap_err();
    assert_eq!(err.reason, RejectionReason::AmbiguousDirection);
}

#[test]
fn net_zero_core_intermediate_collapses_into_a_direct_swap() {
    // alice routes TKNA through USDC into SOL; USDC nets to zero for her so
    // it never becomes one of her two traded assets, but SOL is core, so
    // this resolves directly instead of deferring to the split synthesizer.
    let config = core_config(vec![scc::constants::WRAPPED_SOL_MINT]);
    let parser = Parser::with_config(config);

    let changes = vec![
        bc("alice", "TKNA", -1000, 0),
        bc("alice", scc::constants::NATIVE_SOL_MINT, 5_000_000_000, 9),
        bc("venue", "TKNA", 1000, 0),
        bc("venue", scc::constants::NATIVE_SOL_MINT, -5_000_000_000, 9),
    ];
    let actions = vec![
        swap_action("alice", "TKNA", 1000, 0, "usdc-mint", 300_000_000, 6),
        swap_action(
            "alice",
            "usdc-mint",
            300_000_000,
            6,
            scc::constants::WRAPPED_SOL_MINT,
            5_000_000_000,
            9,
        ),
    ];
    let raw = raw_tx(changes, actions);

    let parsed = parser.parse(raw).unwrap();
    let swap = match &parsed {
        Parsed::Single(s) => s,
        _ => panic!("expected a direct swap, not a split"),
    };
    assert_eq!(swap.direction, Direction::Sell);
    assert_eq!(swap.base.mint, Mint::new("TKNA"));
    assert_eq!(swap.quote.mint, Mint::new(scc::constants::WRAPPED_SOL_MINT));
    assert_eq!(swap.intermediate_assets_collapsed, vec![Mint::new("usdc-mint")]);
}

#[test]
fn native_and_wrapped_sol_rows_aggregate_into_one_quote_side_entry() {
    // Two separate balance-change rows (native-SOL and wrapped-SOL) for the
    // same owner must collapse into a single wrap-group delta, or this
    // would show three non-zero entries for alice and be rejected as
    // invalid_asset_count instead of resolving as a two-asset swap.
    let config = core_config(vec![scc::constants::WRAPPED_SOL_MINT]);
    let parser = Parser::with_config(config);

    let changes = vec![
        bc("alice", "TKN", 100, 0),
        bc("alice", scc::constants::NATIVE_SOL_MINT, -1_500_000_000, 9),
        bc("alice", scc::constants::WRAPPED_SOL_MINT, 500_000_000, 9),
        bc("venue", "TKN", -100, 0),
        bc("venue", scc::constants::NATIVE_SOL_MINT, 1_500_000_000, 9),
        bc("venue", scc::constants::WRAPPED_SOL_MINT, -500_000_000, 9),
    ];
    let raw = raw_tx(changes, Vec::new());

    let parsed = parser.parse(raw).unwrap();
    assert!(matches!(parsed, Parsed::Single(_)));
}

#[test]
fn no_core_pivot_among_non_core_assets_is_unresolvable() {
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);
    let changes = vec![
        bc("alice", "TKNA", -1000, 0),
        bc("alice", "TKNB", 500, 0),
        bc("venue", "TKNA", 1000, 0),
        bc("venue", "TKNB", -500, 0),
    ];
    // No actions at all, so no pivot can be found among the collapsed
    // intermediates.
    let raw = raw_tx(changes, Vec::new());
    let err = parser.parse(raw).unwrap_err();
    assert_eq!(err.reason, RejectionReason::UnresolvableSplit);
}

// ---------------------------------------------------------------------
// Universal invariants
// ---------------------------------------------------------------------

#[test]
fn emitted_base_amounts_are_never_negative() {
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);
    let changes = vec![
        bc("alice", "usdc-mint", -10_000_000, 6),
        bc("alice", "TKN", 1000, 0),
        bc("venue", "usdc-mint", 10_000_000, 6),
        bc("venue", "TKN", -1000, 0),
    ];
    let raw = raw_tx(changes, Vec::new());
    let parsed = parser.parse(raw).unwrap();
    if let Parsed::Single(swap) = parsed {
        assert!(swap.amounts.base_amount >= Decimal::ZERO);
        assert!(swap.amounts.swap_input_amount.unwrap_or(Decimal::ZERO) >= Decimal::ZERO);
    }
}

#[test]
fn repeated_parse_of_the_same_transaction_is_idempotent() {
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);
    let changes = vec![
        bc("alice", "usdc-mint", -10_000_000, 6),
        bc("alice", "TKN", 1000, 0),
        bc("venue", "usdc-mint", 10_000_000, 6),
        bc("venue", "TKN", -1000, 0),
    ];
    let raw = raw_tx(changes, Vec::new());

    let first = parser.parse(raw.clone()).unwrap();
    let second = parser.parse(raw).unwrap();

    let (a, b) = match (first, second) {
        (Parsed::Single(a), Parsed::Single(b)) => (a, b),
        _ => panic!("expected both to classify as a single swap"),
    };
    assert_eq!(a.direction, b.direction);
    assert_eq!(a.base.mint, b.base.mint);
    assert_eq!(a.quote.mint, b.quote.mint);
    assert_eq!(a.amounts.base_amount, b.amounts.base_amount);
}

#[test]
fn storage_record_amount_fields_are_consistent_with_direction() {
    let config = core_config(vec!["usdc-mint"]);
    let parser = Parser::with_config(config);

    let buy_changes = vec![
        bc("alice", "usdc-mint", -10_000_000, 6),
        bc("alice", "TKN", 1000, 0),
        bc("venue", "usdc-mint", 10_000_000, 6),
        bc("venue", "TKN", -1000, 0),
    ];
    let buy_parsed = parser.parse(raw_tx(buy_changes, Vec::new())).unwrap();
    let buy_records = to_storage_records(&buy_parsed);
    assert!(buy_records[0].amount.buy_amount.is_some());
    assert!(buy_records[0].amount.sell_amount.is_none());

    let sell_changes = vec![
        bc("alice", "usdc-mint", 10_000_000, 6),
        bc("alice", "TKN", -1000, 0),
        bc("venue", "usdc-mint", -10_000_000, 6),
        bc("venue", "TKN", 1000, 0),
    ];
    let sell_parsed = parser.parse(raw_tx(sell_changes, Vec::new())).unwrap();
    let sell_records = to_storage_records(&sell_parsed);
    assert!(sell_records[0].amount.sell_amount.is_some());
    assert!(sell_records[0].amount.buy_amount.is_none());
}

