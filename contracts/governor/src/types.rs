use soroban_sdk::{contracttype, Address, String};

/// Numeric configuration keys.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Parameter {
    /// Seconds added to a proposal's end when extending a voter's lock.
    DelayAfterDeadline,
    /// DFT units per single vote (divisor, must be non-zero).
    DftPerVote,
}

/// Collaborator address keys.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AddressKey {
    StakingWrapper,
    AmmPair,
    DftToken,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Member {
    pub joined: bool,
    pub locked_deadline: u64,
}

impl Member {
    pub fn exit_status(&self, now: u64) -> ExitStatus {
        if !self.joined {
            ExitStatus::NotInGovernor
        } else if now < self.locked_deadline {
            ExitStatus::LockedUntil(self.locked_deadline)
        } else {
            ExitStatus::Eligible
        }
    }
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ExitStatus {
    NotInGovernor,
    LockedUntil(u64),
    Eligible,
}

/// Admin-supplied fields of a new proposal.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProposalInput {
    pub description: String,
    pub start_timestamp: u64,
    pub end_timestamp: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub id: u64,
    pub proposer: Address,
    pub description: String,
    pub start_timestamp: u64,
    pub end_timestamp: u64,
    pub for_votes: u128,
    pub against_votes: u128,
    pub voter_count: u32,
    pub canceled: bool,
    pub executed: bool,
}

impl Proposal {
    /// Lifecycle state at `now`. Cancellation wins over timing, and a tie
    /// after the window closes is a defeat.
    pub fn state_at(&self, now: u64) -> ProposalState {
        if self.canceled {
            ProposalState::Canceled
        } else if now < self.start_timestamp {
            ProposalState::Pending
        } else if now < self.end_timestamp {
            ProposalState::Active
        } else if self.for_votes <= self.against_votes {
            ProposalState::Defeated
        } else {
            ProposalState::Succeed
        }
    }
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalState {
    Pending,
    Active,
    Defeated,
    Succeed,
    Canceled,
}

/// One voter's recorded amounts on one proposal.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Receipt {
    pub for_votes: u128,
    pub against_votes: u128,
}

impl Receipt {
    pub fn is_empty(&self) -> bool {
        self.for_votes == 0 && self.against_votes == 0
    }
}
