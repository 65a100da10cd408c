#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, contracttype, log, Address, BytesN, Env, IntoVal,
    String, Symbol, Vec,
};



/// Longest accepted campaign name, in bytes. Mirrors the campaign contract.
pub const MAX_NAME_LEN: u32 = 32;
/// Longest accepted campaign description, in bytes. Mirrors the campaign contract.
pub const MAX_DESCRIPTION_LEN: u32 = 256;

const DAY_IN_LEDGERS: u32 = 17_280;
const INSTANCE_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = INSTANCE_BUMP_AMOUNT - DAY_IN_LEDGERS;

/// Codes shared with the campaign contract keep the same numeric value.
/// Code 1 (`AlreadyInitialized`) has no counterpart here: the registry is
/// configured by its constructor.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 2,
    InvalidGoal = 3,
    DeadlineInPast = 4,
    NameTooLong = 5,
    DescriptionTooLong = 6,
}

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    /// Token every campaign collects pledges in.
    Token,
    /// Installed WASM hash of the campaign contract.
    CampaignWasm,
    /// List of all deployed campaign addresses, in creation order.
    Campaigns,
}

#[derive(Clone, Debug, Eq, PartialEq)]
#[contracttype]
pub struct CampaignCreated {
    pub campaign: Address,
    pub beneficiary: Address,
    pub funding_goal: i128,
    pub deadline: u64,
}

#[contract]
pub struct RegistryContract;

#[contractimpl]
impl RegistryContract {
    /// Configures the registry at deployment, in the same operation that
    /// creates it, so there is no window in which another caller can set it.
    ///
    /// # Arguments
    /// * `token`              – Token contract that every campaign collects pledges in.
    /// * `campaign_wasm_hash` – Hash of the installed campaign contract WASM.
    pub fn __constructor(env: Env, token: Address, campaign_wasm_hash: BytesN<32>) {
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage()
            .instance()
            .set(&DataKey::CampaignWasm, &campaign_wasm_hash);
        env.storage()
            .instance()
            .set(&DataKey::Campaigns, &Vec::<Address>::new(&env));
        extend_instance(&env);
    }

    /// Deploy a new campaign with `creator` as its beneficiary.
    ///
    /// # Arguments
    /// * `creator`      – The campaign creator's address; becomes the beneficiary.
    /// * `name`         – At most [`MAX_NAME_LEN`] bytes.
    /// * `description`  – At most [`MAX_DESCRIPTION_LEN`] bytes.
    /// * `funding_goal` – The funding goal (in the token's smallest unit).
    /// * `deadline`     – The campaign deadline as a ledger timestamp.
    ///
    /// # Returns
    /// The address of the newly deployed campaign contract.
    pub fn create_campaign(
        env: Env,
        creator: Address,
        name: String,
        description: String,
        funding_goal: i128,
        deadline: u64,
    ) -> Result<Address, ContractError> {
        creator.require_auth();

        let token: Address = env
            .storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(ContractError::NotInitialized)?;
        let wasm_hash: BytesN<32> = env
            .storage()
            .instance()
            .get(&DataKey::CampaignWasm)
            .ok_or(ContractError::NotInitialized)?;

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

        let mut campaigns = Self::campaigns(env.clone());

        // One salt per registry slot, so a creator may own any number of campaigns.
        let deployed_address = env
            .deployer()
            .with_current_contract(campaign_salt(&env, campaigns.len()))
            .deploy_v2(wasm_hash, ());

        let _: () = env.invoke_contract(
            &deployed_address,
            &Symbol::new(&env, "initialize"),
            soroban_sdk::vec![
                &env,
                creator.into_val(&env),
                token.into_val(&env),
                name.into_val(&env),
                description.into_val(&env),
                funding_goal.into_val(&env),
                deadline.into_val(&env),
            ],
        );

        campaigns.push_back(deployed_address.clone());
        env.storage()
            .instance()
            .set(&DataKey::Campaigns, &campaigns);
        extend_instance(&env);

        log!(&env, "campaign deployed", deployed_address, campaigns.len());

        env.events().publish(
            (Symbol::new(&env, "campaign_created"),),
            CampaignCreated {
                campaign: deployed_address.clone(),
                beneficiary: creator,
                funding_goal,
                deadline,
            },
        );

        Ok(deployed_address)
    }

    /// Returns the list of all deployed campaign addresses.
    pub fn campaigns(env: Env) -> Vec<Address> {
        env.storage()
            .instance()
            .get(&DataKey::Campaigns)
            .unwrap_or(Vec::new(&env))
    }

    /// Returns the campaign created `index`-th, if any.
    pub fn campaign_at(env: Env, index: u32) -> Option<Address> {
        Self::campaigns(env).get(index)
    }

    /// Returns the total number of deployed campaigns.
    pub fn campaign_count(env: Env) -> u32 {
        Self::campaigns(env).len()
    }

    pub fn token(env: Env) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::Token)
            .ok_or(ContractError::NotInitialized)
    }

    pub fn campaign_wasm_hash(env: Env) -> Result<BytesN<32>, ContractError> {
        env.storage()
            .instance()
            .get(&DataKey::CampaignWasm)
            .ok_or(ContractError::NotInitialized)
    }
}

fn campaign_salt(env: &Env, index: u32) -> BytesN<32> {
    let mut salt = [0u8; 32];
    salt[28..].copy_from_slice(&index.to_be_bytes());
    BytesN::from_array(env, &salt)
}

fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}
