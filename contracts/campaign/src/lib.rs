#![no_std]

#[cfg(test)]
extern crate std;

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, token, Address, Env, String, Vec,
};

mod events;
mod storage;


pub use events::{CampaignFinalized, DonationMade, FundingGoalMet, FundsWithdrawn, RefundIssued};
pub use storage::{CampaignConfig, MAX_DESCRIPTION_LEN, MAX_NAME_LEN};

// ── Data Types ──────────────────────────────────────────────────────────────

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    InvalidGoal = 3,
    DeadlineInPast = 4,
    NameTooLong = 5,
    DescriptionTooLong = 6,
    BeneficiaryForbidden = 10,
    DeadlineExceeded = 11,
    CampaignInactive = 12,
    GoalAlreadyMet = 13,
    ZeroAmount = 14,
    NotBeneficiary = 15,
    CannotFinalizeYet = 16,
    TransferFailed = 17,
    ArithmeticOverflow = 18,
}

/// Read-only snapshot returned by `get_campaign_details`.
#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignDetails {
    pub beneficiary: Address,
    pub name: String,
    pub description: String,
    pub deadline: u64,
    pub funding_goal: i128,
    pub total_funds: i128,
    pub is_active: bool,
}

// ── Contract ────────────────────────────────────────────────────────────────

#[contract]
pub struct CampaignContract;

#[contractimpl]
impl CampaignContract {
    /// Initializes the campaign. Called once, normally by the registry right
    /// after deployment.
    ///
    /// # Arguments
    /// * `beneficiary`  – Receives the funds on success; the only address
    ///                    allowed to finalize.
    /// * `token`        – Token contract that pledges are made in.
    /// * `name`         – At most [`MAX_NAME_LEN`] bytes.
    /// * `description`  – At most [`MAX_DESCRIPTION_LEN`] bytes.
    /// * `funding_goal` – Target in the token's smallest unit, strictly positive.
    /// * `deadline`     – Ledger timestamp, strictly in the future.
    pub fn initialize(
        env: Env,
        beneficiary: Address,
        token: Address,
        name: String,
        description: String,
        funding_goal: i128,
        deadline: u64,
    ) -> Result<(), ContractError> {
        if storage::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }

        beneficiary.require_auth();

        if funding_goal <= 0 {
            return Err(ContractError::InvalidGoal);
        }
        if deadline <= env.ledger().timestamp() {
            return Err(ContractError::DeadlineInPast);
        }
        if name.len() > MAX_NAME_LEN {
            return Err(ContractError::NameTooLong);
        }
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(ContractError::DescriptionTooLong);
        }

        storage::save_config(
            &env,
            &CampaignConfig {
                beneficiary,
                token,
                name,
                description,
                funding_goal,
                deadline,
            },
        );
        storage::set_total_funds(&env, 0);
        storage::set_active(&env, true);
        storage::set_donors(&env, &Vec::new(&env));
        storage::extend_instance(&env, deadline);

        Ok(())
    }

    /// Pledge `amount` tokens to the campaign.
    ///
    /// Pledges accumulate per contributor. Intake closes at the deadline or
    /// as soon as the goal is met, whichever comes first. A pledge that
    /// overshoots the goal is accepted in full.
    pub fn donate(env: Env, contributor: Address, amount: i128) -> Result<(), ContractError> {
        contributor.require_auth();

        let config = storage::load_config(&env)?;

        if contributor == config.beneficiary {
            return Err(ContractError::BeneficiaryForbidden);
        }
        if env.ledger().timestamp() >= config.deadline {
            return Err(ContractError::DeadlineExceeded);
        }
        if !storage::is_active(&env) {
            return Err(ContractError::CampaignInactive);
        }
        let total = storage::total_funds(&env);
        if total >= config.funding_goal {
            return Err(ContractError::GoalAlreadyMet);
        }
        if amount <= 0 {
            return Err(ContractError::ZeroAmount);
        }

        let previous = storage::donation(&env, &contributor);
        let new_donation = previous
            .unwrap_or(0)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        let new_total = total
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;

        storage::set_donation(&env, &contributor, new_donation, config.deadline);
        storage::set_total_funds(&env, new_total);
        if previous.is_none() {
            let mut donors = storage::donors(&env);
            donors.push_back(contributor.clone());
            storage::set_donors(&env, &donors);
        }
        storage::extend_instance(&env, config.deadline);

        transfer(
            &env,
            &config.token,
            &contributor,
            &env.current_contract_address(),
            amount,
        )?;

        events::emit_donation_made(&env, DonationMade { contributor, amount });
        if new_total >= config.funding_goal {
            events::emit_funding_goal_met(
                &env,
                FundingGoalMet {
                    total_funds: new_total,
                },
            );
        }

        Ok(())
    }

    /// Resolve the campaign. Only the beneficiary may call this, once.
    ///
    /// Allowed after the deadline, or earlier once the goal is met. If the
    /// goal was met the whole balance goes to the beneficiary, otherwise every
    /// donor is refunded in first-pledge order. A failed transfer aborts the
    /// call and leaves the campaign active.
    pub fn finalize_campaign(env: Env, caller: Address) -> Result<(), ContractError> {
        let config = storage::load_config(&env)?;

        if caller != config.beneficiary {
            return Err(ContractError::NotBeneficiary);
        }
        caller.require_auth();

        if !storage::is_active(&env) {
            return Err(ContractError::CampaignInactive);
        }

        let total = storage::total_funds(&env);
        let goal_met = total >= config.funding_goal;
        if env.ledger().timestamp() < config.deadline && !goal_met {
            return Err(ContractError::CannotFinalizeYet);
        }

        // Close the campaign before any funds leave the contract.
        storage::set_active(&env, false);
        storage::extend_instance(&env, config.deadline);

        let this = env.current_contract_address();
        if goal_met {
            transfer(&env, &config.token, &this, &config.beneficiary, total)?;
            events::emit_funds_withdrawn(
                &env,
                FundsWithdrawn {
                    beneficiary: config.beneficiary.clone(),
                    amount: total,
                },
            );
        } else {
            for donor in storage::donors(&env).iter() {
                let amount = storage::donation(&env, &donor).unwrap_or(0);
                if amount > 0 {
                    storage::extend_donation(&env, &donor, config.deadline);
                    transfer(&env, &config.token, &this, &donor, amount)?;
                    events::emit_refund_issued(&env, RefundIssued { donor, amount });
                }
            }
        }

        log!(&env, "campaign finalized", goal_met, total);

        events::emit_campaign_finalized(
            &env,
            CampaignFinalized {
                beneficiary: config.beneficiary,
                success: goal_met,
                total_funds: total,
            },
        );

        Ok(())
    }

    // ── View helpers ────────────────────────────────────────────────────

    pub fn get_campaign_details(env: Env) -> Result<CampaignDetails, ContractError> {
        let config = storage::load_config(&env)?;
        Ok(CampaignDetails {
            beneficiary: config.beneficiary,
            name: config.name,
            description: config.description,
            deadline: config.deadline,
            funding_goal: config.funding_goal,
            total_funds: storage::total_funds(&env),
            is_active: storage::is_active(&env),
        })
    }

    /// Returns the distinct contributors in first-pledge order.
    pub fn get_donors(env: Env) -> Vec<Address> {
        storage::donors(&env)
    }

    pub fn donor_count(env: Env) -> u32 {
        storage::donors(&env).len()
    }

    /// Returns the cumulative pledge of `contributor`, or 0 if they never
    /// pledged.
    pub fn donation(env: Env, contributor: Address) -> i128 {
        storage::donation(&env, &contributor).unwrap_or(0)
    }

    pub fn total_funds(env: Env) -> i128 {
        storage::total_funds(&env)
    }

    pub fn is_active(env: Env) -> bool {
        storage::is_active(&env)
    }

    pub fn beneficiary(env: Env) -> Result<Address, ContractError> {
        Ok(storage::load_config(&env)?.beneficiary)
    }

    pub fn token(env: Env) -> Result<Address, ContractError> {
        Ok(storage::load_config(&env)?.token)
    }

    pub fn name(env: Env) -> Result<String, ContractError> {
        Ok(storage::load_config(&env)?.name)
    }

    pub fn description(env: Env) -> Result<String, ContractError> {
        Ok(storage::load_config(&env)?.description)
    }

    /// Returns the funding goal.
    pub fn funding_goal(env: Env) -> Result<i128, ContractError> {
        Ok(storage::load_config(&env)?.funding_goal)
    }

    /// Returns the campaign deadline.
    pub fn deadline(env: Env) -> Result<u64, ContractError> {
        Ok(storage::load_config(&env)?.deadline)
    }
}

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), ContractError> {
    match token::Client::new(env, token).try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}
