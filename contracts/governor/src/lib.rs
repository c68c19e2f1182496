//! DFT Governor Contract
//!
//! Token-weighted governance over DFT holdings. Members join the governor,
//! the admin publishes proposals with a fixed voting window, and members
//! split their voting weight between for/against on each active proposal.
//!
//! ## Voting Flow
//! 1. Voter calls `join_governor` (idempotent).
//! 2. Admin calls `propose` with a description and `[start, end)` window.
//! 3. While the proposal is Active, a member calls `vote` any number of
//!    times; the running receipt total may never exceed the weight read from
//!    the staking ledger and AMM pair at the time of each vote.
//! 4. Every vote ratchets the member's lock to `end + DelayAfterDeadline`;
//!    `exit_governor` is refused until that deadline passes.
//!
//! ## Lifecycle
//! Proposal state is never stored. `state` derives it from the record and
//! the ledger timestamp: Canceled > Pending > Active > Defeated/Succeed,
//! with ties after the window closing as Defeated.
#![no_std]
#![allow(unexpected_cfgs)]

use dft_shared::is_zero_address;
use soroban_sdk::{
    contract, contracterror, contractevent, contractimpl, panic_with_error, Address, Env, String,
};

mod storage;
mod types;
mod weight;

pub use storage::PERSISTENT_BUMP_LEDGERS;
pub use types::{
    AddressKey, ExitStatus, Member, Parameter, Proposal, ProposalInput, ProposalState, Receipt,
};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default lock extension past a voted proposal's end: 3 days.
pub const DEFAULT_DELAY_AFTER_DEADLINE: u64 = 259_200;
/// Default per-vote unit: one whole token at 7 decimals.
pub const DEFAULT_DFT_PER_VOTE: u64 = 10_000_000;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    AlreadyInitialized = 1,
    NotInitialized     = 2,
    NotAuthorized      = 3,
    ZeroAddress        = 4,
    InvalidProposalId  = 5,
    NotGovernorMember  = 6,
    ProposalNotActive  = 7,
    VoteExceedsWeight  = 8,
    NotInGovernor      = 9,
    ExitLocked         = 10,
    ConfigurationError = 11,
    InvalidTimestamps  = 12,
    Overflow           = 13,
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

#[contractevent]
pub struct Initialized {
    pub owner: Address,
}

#[contractevent]
pub struct OwnershipTransferred {
    pub previous_owner: Address,
    pub new_owner: Address,
}

#[contractevent]
pub struct AdminSet {
    pub previous_admin: Address,
    pub new_admin: Address,
}

#[contractevent]
pub struct ParameterSet {
    pub key: Parameter,
    pub value: u64,
}

#[contractevent]
pub struct AddressSet {
    pub key: AddressKey,
    pub address: Address,
}

#[contractevent]
pub struct GovernorJoin {
    #[topic]
    pub voter: Address,
}

#[contractevent]
pub struct GovernorExit {
    #[topic]
    pub voter: Address,
}

#[contractevent]
pub struct ProposalCreated {
    #[topic]
    pub proposal_id: u64,
    pub proposer: Address,
    pub description: String,
}

#[contractevent]
pub struct ProposalCanceled {
    #[topic]
    pub proposal_id: u64,
}

#[contractevent]
pub struct ProposalEndChanged {
    #[topic]
    pub proposal_id: u64,
    pub end_timestamp: u64,
}

#[contractevent]
pub struct VoteCast {
    #[topic]
    pub proposal_id: u64,
    #[topic]
    pub voter: Address,
    pub support: bool,
    pub amount: u128,
}

// ---------------------------------------------------------------------------
// Contract
// ---------------------------------------------------------------------------

#[contract]
pub struct Governor;

#[contractimpl]
impl Governor {
    /// One-time setup. `caller` becomes both owner and admin, and the
    /// parameter table is seeded with defaults.
    pub fn initialize(env: Env, caller: Address) -> Result<(), Error> {
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        caller.require_auth();

        storage::set_owner(&env, &caller);
        storage::set_admin(&env, &caller);
        storage::set_proposal_count(&env, 0);
        storage::set_parameter(
            &env,
            Parameter::DelayAfterDeadline,
            DEFAULT_DELAY_AFTER_DEADLINE,
        );
        storage::set_parameter(&env, Parameter::DftPerVote, DEFAULT_DFT_PER_VOTE);

        Initialized { owner: caller }.publish(&env);
        Ok(())
    }

    // ----- access control -------------------------------------------------

    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) -> Result<(), Error> {
        let previous_owner = require_owner(&env, &caller)?;
        if is_zero_address(&env, &new_owner) {
            return Err(Error::ZeroAddress);
        }

        storage::set_owner(&env, &new_owner);
        OwnershipTransferred {
            previous_owner,
            new_owner,
        }
        .publish(&env);
        Ok(())
    }

    pub fn set_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if is_zero_address(&env, &new_admin) {
            return Err(Error::ZeroAddress);
        }

        let previous_admin = storage::get_admin(&env)?;
        storage::set_admin(&env, &new_admin);
        AdminSet {
            previous_admin,
            new_admin,
        }
        .publish(&env);
        Ok(())
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        storage::get_owner(&env)
    }

    pub fn admin(env: Env) -> Result<Address, Error> {
        storage::get_admin(&env)
    }

    // ----- parameters / addresses -----------------------------------------

    pub fn set_parameter(env: Env, caller: Address, key: Parameter, value: u64) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        storage::set_parameter(&env, key, value);
        ParameterSet { key, value }.publish(&env);
        Ok(())
    }

    pub fn get_parameter(env: Env, key: Parameter) -> u64 {
        storage::get_parameter(&env, key)
    }

    pub fn set_address(env: Env, caller: Address, key: AddressKey, address: Address) -> Result<(), Error> {
        require_admin(&env, &caller)?;
        storage::set_address(&env, key, &address);
        AddressSet { key, address }.publish(&env);
        Ok(())
    }

    pub fn get_address(env: Env, key: AddressKey) -> Option<Address> {
        storage::get_address(&env, key)
    }

    // ----- membership -----------------------------------------------------

    /// Join the governor. Re-joining is a no-op that still emits the event.
    pub fn join_governor(env: Env, voter: Address) -> Result<(), Error> {
        require_initialized(&env)?;
        voter.require_auth();

        let mut member = storage::load_member(&env, &voter);
        member.joined = true;
        storage::save_member(&env, &voter, &member);

        GovernorJoin { voter }.publish(&env);
        Ok(())
    }

    /// Leave the governor. Refused while the vote lock is still running.
    pub fn exit_governor(env: Env, voter: Address) -> Result<(), Error> {
        require_initialized(&env)?;
        voter.require_auth();

        let mut member = storage::load_member(&env, &voter);
        match member.exit_status(env.ledger().timestamp()) {
            ExitStatus::NotInGovernor => return Err(Error::NotInGovernor),
            ExitStatus::LockedUntil(_) => return Err(Error::ExitLocked),
            ExitStatus::Eligible => {}
        }

        member.joined = false;
        storage::save_member(&env, &voter, &member);

        GovernorExit { voter }.publish(&env);
        Ok(())
    }

    pub fn can_exit_governor(env: Env, voter: Address) -> ExitStatus {
        storage::load_member(&env, &voter).exit_status(env.ledger().timestamp())
    }

    pub fn is_in_governor(env: Env, voter: Address) -> bool {
        storage::load_member(&env, &voter).joined
    }

    pub fn get_member(env: Env, voter: Address) -> Member {
        storage::load_member(&env, &voter)
    }

    // ----- proposals ------------------------------------------------------

    /// Publish a proposal and return its id. Ids start at 1.
    pub fn propose(env: Env, caller: Address, info: ProposalInput) -> Result<u64, Error> {
        require_admin(&env, &caller)?;
        if info.end_timestamp < info.start_timestamp {
            return Err(Error::InvalidTimestamps);
        }

        let proposal_id = storage::proposal_count(&env)
            .checked_add(1)
            .ok_or(Error::Overflow)?;

        let proposal = Proposal {
            id: proposal_id,
            proposer: caller.clone(),
            description: info.description.clone(),
            start_timestamp: info.start_timestamp,
            end_timestamp: info.end_timestamp,
            for_votes: 0,
            against_votes: 0,
            voter_count: 0,
            canceled: false,
            executed: false,
        };

        storage::set_proposal_count(&env, proposal_id);
        storage::save_proposal(&env, &proposal);

        ProposalCreated {
            proposal_id,
            proposer: caller,
            description: info.description,
        }
        .publish(&env);

        Ok(proposal_id)
    }

    /// Cancel a proposal. Canceling twice is allowed.
    pub fn cancel(env: Env, caller: Address, proposal_id: u64) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        let mut proposal = storage::load_proposal(&env, proposal_id)?;
        proposal.canceled = true;
        storage::save_proposal(&env, &proposal);

        ProposalCanceled { proposal_id }.publish(&env);
        Ok(())
    }

    /// Move the end of a proposal's voting window. Only the id is validated.
    pub fn change_propose_end_timestamp(
        env: Env,
        caller: Address,
        proposal_id: u64,
        end_timestamp: u64,
    ) -> Result<(), Error> {
        require_admin(&env, &caller)?;

        let mut proposal = storage::load_proposal(&env, proposal_id)?;
        proposal.end_timestamp = end_timestamp;
        storage::save_proposal(&env, &proposal);

        ProposalEndChanged {
            proposal_id,
            end_timestamp,
        }
        .publish(&env);
        Ok(())
    }

    pub fn state(env: Env, proposal_id: u64) -> Result<ProposalState, Error> {
        let proposal = storage::load_proposal(&env, proposal_id)?;
        Ok(proposal.state_at(env.ledger().timestamp()))
    }

    pub fn proposal_count(env: Env) -> u64 {
        storage::proposal_count(&env)
    }

    pub fn get_proposal(env: Env, proposal_id: u64) -> Result<Proposal, Error> {
        storage::load_proposal(&env, proposal_id)
    }

    pub fn get_receipt(env: Env, proposal_id: u64, voter: Address) -> Result<Receipt, Error> {
        storage::load_proposal(&env, proposal_id)?;
        Ok(storage::load_receipt(&env, proposal_id, &voter))
    }

    // ----- voting ---------------------------------------------------------

    /// Put `amount` votes behind (`support = true`) or against a proposal.
    pub fn vote(
        env: Env,
        voter: Address,
        proposal_id: u64,
        support: bool,
        amount: u128,
    ) -> Result<(), Error> {
        require_initialized(&env)?;
        voter.require_auth();
        cast_vote(&env, voter, proposal_id, support, amount)
    }

    pub fn get_votes(env: Env, voter: Address) -> Result<u128, Error> {
        weight::votes(&env, &voter)
    }

    pub fn get_dft_amount(env: Env, voter: Address) -> Result<u128, Error> {
        weight::dft_amount(&env, &voter)
    }

    /// `(voter_count, for_votes, against_votes)` of a proposal.
    pub fn aggregate_proposal_info(env: Env, proposal_id: u64) -> Result<(u32, u128, u128), Error> {
        let proposal = storage::load_proposal(&env, proposal_id)?;
        Ok((proposal.voter_count, proposal.for_votes, proposal.against_votes))
    }

    /// `(current_weight, receipt.for_votes, receipt.against_votes)` of a voter.
    pub fn aggregate_proposal_voter_info(
        env: Env,
        voter: Address,
        proposal_id: u64,
    ) -> Result<(u128, u128, u128), Error> {
        storage::load_proposal(&env, proposal_id)?;
        let receipt = storage::load_receipt(&env, proposal_id, &voter);
        let votes = weight::votes(&env, &voter)?;
        Ok((votes, receipt.for_votes, receipt.against_votes))
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn require_initialized(env: &Env) -> Result<(), Error> {
    if !storage::is_initialized(env) {
        return Err(Error::NotInitialized);
    }
    Ok(())
}

fn require_owner(env: &Env, caller: &Address) -> Result<Address, Error> {
    let owner = storage::get_owner(env)?;
    caller.require_auth();
    if caller != &owner {
        return Err(Error::NotAuthorized);
    }
    Ok(owner)
}

fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    let admin = storage::get_admin(env)?;
    caller.require_auth();
    if caller != &admin {
        return Err(Error::NotAuthorized);
    }
    Ok(())
}

/// Validates a vote against membership, proposal state and fresh weight,
/// then writes receipt, tally and lock together. Nothing is written unless
/// every check passes.
fn cast_vote(
    env: &Env,
    voter: Address,
    proposal_id: u64,
    support: bool,
    amount: u128,
) -> Result<(), Error> {
    let mut member = storage::load_member(env, &voter);
    if !member.joined {
        return Err(Error::NotGovernorMember);
    }

    let mut proposal = storage::load_proposal(env, proposal_id)?;
    if proposal.state_at(env.ledger().timestamp()) != ProposalState::Active {
        return Err(Error::ProposalNotActive);
    }

    let mut receipt = storage::load_receipt(env, proposal_id, &voter);
    let first_vote = receipt.is_empty() && amount > 0;

    // Single weight snapshot; collaborators are not consulted again below.
    let votes = weight::votes(env, &voter)?;
    let within_weight = receipt
        .for_votes
        .checked_add(receipt.against_votes)
        .and_then(|cast| cast.checked_add(amount))
        .is_some_and(|total| total <= votes);
    if !within_weight {
        return Err(Error::VoteExceedsWeight);
    }

    // Receipts are bounded by weight, so tallies overflowing means the
    // ledger is already corrupt.
    if support {
        receipt.for_votes = add_or_abort(env, receipt.for_votes, amount);
        proposal.for_votes = add_or_abort(env, proposal.for_votes, amount);
    } else {
        receipt.against_votes = add_or_abort(env, receipt.against_votes, amount);
        proposal.against_votes = add_or_abort(env, proposal.against_votes, amount);
    }
    if first_vote {
        proposal.voter_count = proposal
            .voter_count
            .checked_add(1)
            .unwrap_or_else(|| panic_with_error!(env, Error::Overflow));
    }

    let delay = storage::get_parameter(env, Parameter::DelayAfterDeadline);
    let unlock_at = proposal.end_timestamp.saturating_add(delay);
    member.locked_deadline = member.locked_deadline.max(unlock_at);

    storage::save_receipt(env, proposal_id, &voter, &receipt);
    storage::save_proposal(env, &proposal);
    storage::save_member(env, &voter, &member);

    VoteCast {
        proposal_id,
        voter,
        support,
        amount,
    }
    .publish(env);

    Ok(())
}

fn add_or_abort(env: &Env, lhs: u128, rhs: u128) -> u128 {
    lhs.checked_add(rhs)
        .unwrap_or_else(|| panic_with_error!(env, Error::Overflow))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
