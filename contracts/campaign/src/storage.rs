use soroban_sdk::{contracttype, Address, Env, String, Vec};

use crate::ContractError;

/// Longest accepted campaign name, in bytes.
pub const MAX_NAME_LEN: u32 = 32;
/// Longest accepted campaign description, in bytes.
pub const MAX_DESCRIPTION_LEN: u32 = 256;

const LEDGER_CLOSE_SECONDS: u64 = 5;
const DAY_IN_LEDGERS: u32 = 17_280;
/// Lifetime past the deadline, for finalization and later reads.
pub const INSTANCE_GRACE_LEDGERS: u32 = 30 * DAY_IN_LEDGERS;
pub const DONATION_GRACE_LEDGERS: u32 = 90 * DAY_IN_LEDGERS;

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Immutable campaign parameters, written once by `initialize`.
    Config,
    /// Sum of every accepted pledge.
    TotalFunds,
    /// `true` until the campaign is finalized.
    Active,
    /// Distinct contributors in first-pledge order.
    Donors,
    /// Cumulative pledge of one contributor (persistent storage).
    Donation(Address),
}

/// Parameters fixed at construction.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignConfig {
    pub beneficiary: Address,
    pub token: Address,
    pub name: String,
    pub description: String,
    pub funding_goal: i128,
    pub deadline: u64,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn load_config(env: &Env) -> Result<CampaignConfig, ContractError> {
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(ContractError::NotInitialized)
}

pub fn save_config(env: &Env, config: &CampaignConfig) {
    env.storage().instance().set(&DataKey::Config, config);
}

pub fn total_funds(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalFunds)
        .unwrap_or(0)
}

pub fn set_total_funds(env: &Env, total: i128) {
    env.storage().instance().set(&DataKey::TotalFunds, &total);
}

pub fn is_active(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Active)
        .unwrap_or(false)
}

pub fn set_active(env: &Env, active: bool) {
    env.storage().instance().set(&DataKey::Active, &active);
}

pub fn donors(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&DataKey::Donors)
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_donors(env: &Env, donors: &Vec<Address>) {
    env.storage().instance().set(&DataKey::Donors, donors);
}

pub fn donation(env: &Env, contributor: &Address) -> Option<i128> {
    env.storage()
        .persistent()
        .get(&DataKey::Donation(contributor.clone()))
}

pub fn set_donation(env: &Env, contributor: &Address, amount: i128, deadline: u64) {
    env.storage()
        .persistent()
        .set(&DataKey::Donation(contributor.clone()), &amount);
    extend_donation(env, contributor, deadline);
}

/// Keeps the instance (config, totals, donor list) alive until `deadline`
/// plus [`INSTANCE_GRACE_LEDGERS`].
pub fn extend_instance(env: &Env, deadline: u64) {
    let extend_to = ttl_through(env, deadline, INSTANCE_GRACE_LEDGERS);
    env.storage()
        .instance()
        .extend_ttl(extend_to.saturating_sub(DAY_IN_LEDGERS), extend_to);
}

/// Keeps a donation entry alive until `deadline` plus
/// [`DONATION_GRACE_LEDGERS`], so refunds never meet an archived entry.
pub fn extend_donation(env: &Env, contributor: &Address, deadline: u64) {
    let extend_to = ttl_through(env, deadline, DONATION_GRACE_LEDGERS);
    env.storage().persistent().extend_ttl(
        &DataKey::Donation(contributor.clone()),
        extend_to.saturating_sub(DAY_IN_LEDGERS),
        extend_to,
    );
}

/// Ledgers from now until `deadline`, plus `grace`, capped at the network
/// maximum.
fn ttl_through(env: &Env, deadline: u64, grace: u32) -> u32 {
    let remaining = deadline.saturating_sub(env.ledger().timestamp()) / LEDGER_CLOSE_SECONDS;
    u32::try_from(remaining)
        .unwrap_or(u32::MAX)
        .saturating_add(grace)
        .min(env.storage().max_ttl())
}
