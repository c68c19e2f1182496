//! Voting weight derived from external holdings.
//!
//! All collaborator reads for one weight computation happen here, in one
//! pass, before the caller writes anything.

use dft_shared::{pool_share_value, AmmPairClient, StakingLedgerClient};
use soroban_sdk::{Address, Env};

use crate::storage;
use crate::types::{AddressKey, Parameter};
use crate::Error;

/// Staked + accelerated + LP-derived DFT held by `voter`.
pub fn dft_amount(env: &Env, voter: &Address) -> Result<u128, Error> {
    let staking = storage::get_address(env, AddressKey::StakingWrapper)
        .ok_or(Error::ConfigurationError)?;
    let ledger = StakingLedgerClient::new(env, &staking);

    let staked = ledger.get_staked_amount(voter);
    let accelerated = ledger.get_accelerated_amount(voter);
    let pooled = match storage::get_address(env, AddressKey::AmmPair) {
        Some(pair) => pool_amount(env, &ledger, &pair, voter)?,
        None => 0,
    };

    staked
        .checked_add(accelerated)
        .and_then(|v| v.checked_add(pooled))
        .ok_or(Error::Overflow)
}

/// DFT side of the pair redeemable for the voter's staked LP shares.
fn pool_amount(
    env: &Env,
    ledger: &StakingLedgerClient,
    pair: &Address,
    voter: &Address,
) -> Result<u128, Error> {
    let dft = storage::get_address(env, AddressKey::DftToken).ok_or(Error::ConfigurationError)?;
    let pool = AmmPairClient::new(env, pair);

    let share = ledger.get_pool_share_amount(voter, pair);
    let (reserve0, reserve1) = pool.get_reserves();
    let reserve = if pool.token0() == dft { reserve0 } else { reserve1 };

    pool_share_value(share, reserve, pool.total_supply()).ok_or(Error::Overflow)
}

/// Current voting weight: DFT amount divided by the per-vote unit, floored.
pub fn votes(env: &Env, voter: &Address) -> Result<u128, Error> {
    let per_vote = storage::get_parameter(env, Parameter::DftPerVote);
    if per_vote == 0 {
        return Err(Error::ConfigurationError);
    }
    Ok(dft_amount(env, voter)? / per_vote as u128)
}
