//! Asset-delta collector (component 4.2).
//!
//! Collapses the unordered `balance_changes` list into a per-`(owner,
//! mint)` net-delta map, plus a wrap-group view that aggregates native-SOL
//! and wrapped-SOL deltas into one synthetic key per owner. Rent refunds —
//! small positive native-SOL deltas from closing a token account — are
//! filtered into a side channel rather than counted as swap proceeds.

use crate::scc::assets::{wrap_group_key, WRAP_GROUP_NATIVE};
use crate::scc::ids::{Account, Mint};
use crate::scc::raw_tx::BalanceChange;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// The per-owner delta views produced from a transaction's balance changes.
#[derive(Debug, Default, Clone)]
pub struct AssetDeltaSet {
    /// Net delta per `(owner, mint)`, normalized by decimals.
    pub raw: HashMap<Account, HashMap<Mint, Decimal>>,

    /// Net delta per `(owner, wrap-group key)`, normalized by decimals.
    /// Native-SOL and wrapped-SOL deltas for the same owner are summed
    /// under `WRAP_GROUP_NATIVE`.
    pub wrap_group: HashMap<Account, HashMap<String, Decimal>>,

    /// Decimals observed for each mint, used to denormalize later when
    /// only a wrap-group key is known.
    pub decimals_by_mint: HashMap<Mint, u8>,

    /// Lamports filtered out as rent refunds, per owner. Already excluded
    /// from `raw`/`wrap_group`.
    pub rent_refunds_filtered: HashMap<Account, Decimal>,
}

impl AssetDeltaSet {
    pub fn wrap_group_delta(&self, owner: &Account, key: &str) -> Decimal {
        self.wrap_group
            .get(owner)
            .and_then(|m| m.get(key))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Non-zero `(key, delta)` wrap-group entries for an owner.
    pub fn nonzero_wrap_group_entries(&self, owner: &Account) -> Vec<(String, Decimal)> {
        self.wrap_group
            .get(owner)
            .map(|m| {
                m.iter()
                    .filter(|(_, d)| !d.is_zero())
                    .map(|(k, d)| (k.clone(), *d))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Collect balance changes into owner-scoped delta maps.
///
/// `rent_epsilon_lamports` is the configured upper bound for a positive
/// native-SOL delta to be treated as a rent refund rather than a real
/// swap-side gain.
pub fn collect_deltas(balance_changes: &[BalanceChange], rent_epsilon_lamports: u64) -> AssetDeltaSet {
    let mut set = AssetDeltaSet::default();

    for change in balance_changes {
        set.decimals_by_mint
            .entry(change.mint.clone())
            .or_insert(change.decimals);

        let normalized = crate::scc::amounts::normalize_raw(change.change_raw, change.decimals);

        if change.mint.is_native_sol() && change.change_raw > 0 {
            let magnitude = change.change_raw as u128;
            if magnitude <= rent_epsilon_lamports as u128 {
                *set.rent_refunds_filtered
                    .entry(change.owner.clone())
                    .or_insert(Decimal::ZERO) += normalized;
                continue;
            }
        }

        *set.raw
            .entry(change.owner.clone())
            .or_default()
            .entry(change.mint.clone())
            .or_insert(Decimal::ZERO) += normalized;

        let key = wrap_group_key(&change.mint);
        *set.wrap_group
            .entry(change.owner.clone())
            .or_default()
            .entry(key)
            .or_insert(Decimal::ZERO) += normalized;
    }

    // Drop owners whose every delta (raw and wrap-group) netted to zero —
    // "owners whose total delta set is empty are dropped".
    set.raw.retain(|_, deltas| {
        deltas.retain(|_, d| !d.is_zero());
        !deltas.is_empty()
    });
    set.wrap_group.retain(|_, deltas| {
        deltas.retain(|_, d| !d.is_zero());
        !deltas.is_empty()
    });

    set
}

/// Sum of balance-change raws per mint across all owners, used by the
/// conservation check.
pub fn per_mint_conservation_sums(balance_changes: &[BalanceChange]) -> HashMap<Mint, i128> {
    let mut sums: HashMap<Mint, i128> = HashMap::new();
    for change in balance_changes {
        *sums.entry(change.mint.clone()).or_insert(0) += change.change_raw;
    }
    sums
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scc::ids::Mint as M;

    fn bc(owner: &str, mint: &str, change_raw: i128, decimals: u8) -> BalanceChange {
        BalanceChange {
            owner: Account::parse(owner),
            mint: M::new(mint),
            pre_raw: 0,
            post_raw: change_raw,
            change_raw,
            decimals,
            symbol: None,
        }
    }

    #[test]
    fn sums_multiple_entries_for_same_owner_mint() {
        let changes = vec![
            bc("alice", "TKN", 100, 0),
            bc("alice", "TKN", 50, 0),
        ];
        let deltas = collect_deltas(&changes, 5000);
        let owner = Account::parse("alice");
        assert_eq!(
            deltas.raw.get(&owner).unwrap().get(&M::new("TKN")).unwrap(),
            &Decimal::from(150)
        );
    }

    #[test]
    fn native_and_wrapped_sol_aggregate_under_one_key() {
        let changes = vec![
            bc("alice", crate::constants::NATIVE_SOL_MINT, -2_000_000_000, 9),
            bc("alice", crate::constants::WRAPPED_SOL_MINT, 500_000_000, 9),
        ];
        let deltas = collect_deltas(&changes, 5000);
        let owner = Account::parse("alice");
        let entries = deltas.nonzero_wrap_group_entries(&owner);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, WRAP_GROUP_NATIVE);
    }

    #[test]
    fn small_positive_native_sol_delta_is_filtered_as_rent() {
        let changes = vec![bc("alice", crate::constants::NATIVE_SOL_MINT, 2039, 9)];
        let deltas = collect_deltas(&changes, 5000);
        let owner = Account::parse("alice");
        assert!(deltas.wrap_group.get(&owner).is_none());
        assert!(deltas.rent_refunds_filtered.get(&owner).is_some());
    }

    #[test]
    fn owners_with_all_zero_deltas_are_dropped() {
        let changes = vec![bc("alice", "TKN", 0, 0)];
        let deltas = collect_deltas(&changes, 5000);
        assert!(deltas.raw.is_empty());
    }
}
