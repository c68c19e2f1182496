use soroban_sdk::{
    contract, contractimpl, contracttype,
    testutils::{Address as _, Ledger},
    Address, Env, String,
};

use dft_governor::{
    AddressKey, ExitStatus, Governor, GovernorClient, Parameter, ProposalInput, ProposalState,
};

#[contracttype]
#[derive(Clone)]
enum Key {
    Staked(Address),
    Share(Address),
    Dft,
}

/// Staking ledger with per-account staked and LP balances; nothing accelerated.
#[contract]
struct Staking;

#[contractimpl]
impl Staking {
    pub fn fund(env: Env, account: Address, staked: u128, lp_share: u128) {
        env.storage().instance().set(&Key::Staked(account.clone()), &staked);
        env.storage().instance().set(&Key::Share(account), &lp_share);
    }

    pub fn get_staked_amount(env: Env, account: Address) -> u128 {
        env.storage().instance().get(&Key::Staked(account)).unwrap_or(0)
    }

    pub fn get_accelerated_amount(_env: Env, _account: Address) -> u128 {
        0
    }

    pub fn get_pool_share_amount(env: Env, account: Address, _pool: Address) -> u128 {
        env.storage().instance().get(&Key::Share(account)).unwrap_or(0)
    }
}

/// DFT/other pair holding 2_000 DFT against 1_000 LP shares.
#[contract]
struct Pair;

#[contractimpl]
impl Pair {
    pub fn set_dft(env: Env, dft: Address) {
        env.storage().instance().set(&Key::Dft, &dft);
    }

    pub fn get_reserves(_env: Env) -> (u128, u128) {
        (2_000, 9_999)
    }

    pub fn token0(env: Env) -> Address {
        env.storage().instance().get(&Key::Dft).unwrap()
    }

    pub fn total_supply(_env: Env) -> u128 {
        1_000
    }
}

#[test]
fn test_full_governance_lifecycle_with_pool_weight() {
    let env = Env::default();
    env.ledger().set_timestamp(10_000);

    let admin = Address::generate(&env);
    let alice = Address::generate(&env);
    let bob = Address::generate(&env);
    let dft = Address::generate(&env);

    let gov_id = env.register(Governor, ());
    let gov = GovernorClient::new(&env, &gov_id);
    let staking_id = env.register(Staking, ());
    let staking = StakingClient::new(&env, &staking_id);
    let pair_id = env.register(Pair, ());
    PairClient::new(&env, &pair_id).set_dft(&dft);

    env.mock_all_auths();

    gov.initialize(&admin);
    gov.set_address(&admin, &AddressKey::StakingWrapper, &staking_id);
    gov.set_address(&admin, &AddressKey::AmmPair, &pair_id);
    gov.set_address(&admin, &AddressKey::DftToken, &dft);
    gov.set_parameter(&admin, &Parameter::DftPerVote, &100);
    gov.set_parameter(&admin, &Parameter::DelayAfterDeadline, &3_600);

    // alice: 500 staked + 100 LP * 2_000 / 1_000 = 700 DFT -> 7 votes.
    staking.fund(&alice, &500, &100);
    // bob: 350 staked, no LP -> 3 votes.
    staking.fund(&bob, &350, &0);
    assert_eq!(gov.get_votes(&alice), 7);
    assert_eq!(gov.get_votes(&bob), 3);

    gov.join_governor(&alice);
    gov.join_governor(&bob);

    let id = gov.propose(
        &admin,
        &ProposalInput {
            description: String::from_str(&env, "list DFT/XLM pair"),
            start_timestamp: 10_100,
            end_timestamp: 10_200,
        },
    );
    assert_eq!(id, 1);
    assert_eq!(gov.state(&id), ProposalState::Pending);

    env.ledger().set_timestamp(10_150);
    assert_eq!(gov.state(&id), ProposalState::Active);

    gov.vote(&alice, &id, &true, &7);
    gov.vote(&bob, &id, &false, &3);
    assert_eq!(gov.aggregate_proposal_info(&id), (2, 7, 3));
    assert_eq!(gov.aggregate_proposal_voter_info(&bob, &id), (3, 0, 3));

    let deadline = 10_200 + 3_600;
    assert_eq!(gov.can_exit_governor(&alice), ExitStatus::LockedUntil(deadline));

    env.ledger().set_timestamp(10_200);
    assert_eq!(gov.state(&id), ProposalState::Succeed);
    assert!(gov.try_exit_governor(&alice).is_err());

    env.ledger().set_timestamp(deadline);
    gov.exit_governor(&alice);
    assert!(!gov.is_in_governor(&alice));
    assert!(gov.is_in_governor(&bob));
}
