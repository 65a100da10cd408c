use soroban_sdk::{contracttype, Address, Env, Symbol};

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct DonationMade {
    pub contributor: Address,
    pub amount: i128,
}

/// Published once, by the pledge that first brings the total up to the goal.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FundingGoalMet {
    pub total_funds: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignFinalized {
    pub beneficiary: Address,
    pub success: bool,
    pub total_funds: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct RefundIssued {
    pub donor: Address,
    pub amount: i128,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct FundsWithdrawn {
    pub beneficiary: Address,
    pub amount: i128,
}

pub fn emit_donation_made(env: &Env, event: DonationMade) {
    env.events()
        .publish((Symbol::new(env, "donation_made"),), event);
}

pub fn emit_funding_goal_met(env: &Env, event: FundingGoalMet) {
    env.events()
        .publish((Symbol::new(env, "funding_goal_met"),), event);
}

pub fn emit_campaign_finalized(env: &Env, event: CampaignFinalized) {
    env.events()
        .publish((Symbol::new(env, "campaign_finalized"),), event);
}

pub fn emit_refund_issued(env: &Env, event: RefundIssued) {
    env.events()
        .publish((Symbol::new(env, "refund_issued"),), event);
}

pub fn emit_funds_withdrawn(env: &Env, event: FundsWithdrawn) {
    env.events()
        .publish((Symbol::new(env, "funds_withdrawn"),), event);
}
