//! Typed accessors over contract storage.
//!
//! Singletons (owner, admin, parameters, addresses, counter) live in instance
//! storage. Proposals, receipts and members live in persistent storage and
//! have their TTL bumped on every write.

use soroban_sdk::{contracttype, Address, Env};

use crate::types::{AddressKey, Member, Parameter, Proposal, Receipt};
use crate::Error;

pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Owner,
    Admin,
    Param(Parameter),
    Addr(AddressKey),
    ProposalCount,
    Proposal(u64),
    Receipt(u64, Address), // (proposal_id, voter)
    Member(Address),
}

fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_LEDGERS, PERSISTENT_BUMP_LEDGERS);
}

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Owner)
}

pub fn get_owner(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Owner)
        .ok_or(Error::NotInitialized)
}

pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&DataKey::Owner, owner);
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&DataKey::Admin)
        .ok_or(Error::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&DataKey::Admin, admin);
}

// ---------------------------------------------------------------------------
// Parameters / addresses
// ---------------------------------------------------------------------------

pub fn get_parameter(env: &Env, key: Parameter) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::Param(key))
        .unwrap_or(0)
}

pub fn set_parameter(env: &Env, key: Parameter, value: u64) {
    env.storage().instance().set(&DataKey::Param(key), &value);
}

pub fn get_address(env: &Env, key: AddressKey) -> Option<Address> {
    env.storage().instance().get(&DataKey::Addr(key))
}

pub fn set_address(env: &Env, key: AddressKey, address: &Address) {
    env.storage().instance().set(&DataKey::Addr(key), address);
}

// ---------------------------------------------------------------------------
// Proposals
// ---------------------------------------------------------------------------

pub fn proposal_count(env: &Env) -> u64 {
    env.storage()
        .instance()
        .get(&DataKey::ProposalCount)
        .unwrap_or(0)
}

pub fn set_proposal_count(env: &Env, count: u64) {
    env.storage().instance().set(&DataKey::ProposalCount, &count);
}

/// Loads a proposal, rejecting ids outside `[1, count]`.
pub fn load_proposal(env: &Env, proposal_id: u64) -> Result<Proposal, Error> {
    if proposal_id == 0 || proposal_id > proposal_count(env) {
        return Err(Error::InvalidProposalId);
    }
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(proposal_id))
        .ok_or(Error::InvalidProposalId)
}

pub fn save_proposal(env: &Env, proposal: &Proposal) {
    let key = DataKey::Proposal(proposal.id);
    env.storage().persistent().set(&key, proposal);
    bump(env, &key);
}

pub fn load_receipt(env: &Env, proposal_id: u64, voter: &Address) -> Receipt {
    env.storage()
        .persistent()
        .get(&DataKey::Receipt(proposal_id, voter.clone()))
        .unwrap_or_default()
}

pub fn save_receipt(env: &Env, proposal_id: u64, voter: &Address, receipt: &Receipt) {
    let key = DataKey::Receipt(proposal_id, voter.clone());
    env.storage().persistent().set(&key, receipt);
    bump(env, &key);
}

// ---------------------------------------------------------------------------
// Members
// ---------------------------------------------------------------------------

pub fn load_member(env: &Env, voter: &Address) -> Member {
    env.storage()
        .persistent()
        .get(&DataKey::Member(voter.clone()))
        .unwrap_or_default()
}

pub fn save_member(env: &Env, voter: &Address, member: &Member) {
    let key = DataKey::Member(voter.clone());
    env.storage().persistent().set(&key, member);
    bump(env, &key);
}
