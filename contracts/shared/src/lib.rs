//! Shared collaborator interfaces and helpers for the DFT governance contracts.
//!
//! The governor never holds tokens itself. A voter's holdings are read from
//! two external contracts: the staking ledger (staked, accelerated and
//! LP-share balances) and the AMM pair that prices LP shares back into DFT.
#![no_std]
#![allow(unexpected_cfgs)]

use soroban_sdk::{contractclient, Address, Env, String};

/// Strkey of the all-zero ed25519 account, used as the null identity.
pub const ZERO_ACCOUNT_STRKEY: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

/// Read-only view of the staking ledger.
#[contractclient(name = "StakingLedgerClient")]
pub trait StakingLedger {
    fn get_staked_amount(env: Env, account: Address) -> u128;
    fn get_accelerated_amount(env: Env, account: Address) -> u128;
    /// LP shares `account` has staked in the pool identified by `pool`.
    fn get_pool_share_amount(env: Env, account: Address, pool: Address) -> u128;
}

/// Read-only view of a constant-product AMM pair.
#[contractclient(name = "AmmPairClient")]
pub trait AmmPair {
    fn get_reserves(env: Env) -> (u128, u128);
    fn token0(env: Env) -> Address;
    fn total_supply(env: Env) -> u128;
}

pub fn zero_address(env: &Env) -> Address {
    Address::from_string(&String::from_str(env, ZERO_ACCOUNT_STRKEY))
}

pub fn is_zero_address(env: &Env, address: &Address) -> bool {
    *address == zero_address(env)
}

/// Redemption value of `share` LP tokens against one side of the pool:
/// `share * reserve / total_supply`, rounded down.
///
/// An empty pool (zero supply) redeems to nothing. Returns `None` if the
/// intermediate product overflows.
pub fn pool_share_value(share: u128, reserve: u128, total_supply: u128) -> Option<u128> {
    if total_supply == 0 {
        return Some(0);
    }
    share
        .checked_mul(reserve)
        .map(|product| product / total_supply)
}
