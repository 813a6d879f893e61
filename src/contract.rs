#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, BankMsg, Binary, Coin, CosmosMsg, Deps, DepsMut, Env, MessageInfo,
    Response, StdResult, Storage, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::oracle::PriceFeed;
use crate::state::{DENOM, FUNDED_AMOUNTS, FUNDERS, OWNER, PRICE_FEED};

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:pooled-funding";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest accepted contribution, in 18-decimal usd. $50.
pub const MINIMUM_USD: Uint128 = Uint128::new(50_000_000_000_000_000_000);

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let price_feed = deps.api.addr_validate(&msg.price_feed)?;

    OWNER.save(deps.storage, &info.sender)?;
    PRICE_FEED.save(deps.storage, &price_feed)?;
    DENOM.save(deps.storage, &msg.denom)?;
    FUNDERS.save(deps.storage, &Vec::new())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("owner", info.sender)
        .add_attribute("price-feed", price_feed)
        .add_attribute("denom", msg.denom))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Fund {} => execute::fund(deps, env, info),
        ExecuteMsg::Withdraw {} => execute::withdraw(deps, env, info),
        ExecuteMsg::CheaperWithdraw {} => execute::cheaper_withdraw(deps, env, info),
        ExecuteMsg::Refund { funder } => execute::refund(deps, env, info, funder),
    }
}

pub mod execute {
    use super::*;

    /// Record the attached funds against the sender, provided their usd
    /// worth clears the minimum.
    pub fn fund(deps: DepsMut, _env: Env, info: MessageInfo) -> Result<Response, ContractError> {
        let denom = DENOM.load(deps.storage)?;
        if info.funds.len() != 1 || info.funds[0].denom != denom {
            return Err(ContractError::InvalidFunds {});
        }
        let amount = info.funds[0].amount;

        let feed = PriceFeed(PRICE_FEED.load(deps.storage)?);
        let sent = feed.convert_to_usd(&deps.querier, amount)?;
        if sent < MINIMUM_USD {
            return Err(ContractError::InsufficientContribution {
                sent,
                minimum: MINIMUM_USD,
            });
        }

        FUNDED_AMOUNTS.update(deps.storage, &info.sender, |funded| -> StdResult<Uint128> {
            Ok(funded.unwrap_or_default().checked_add(amount)?)
        })?;

        // the same address funding again is listed again
        let mut funders = FUNDERS.load(deps.storage)?;
        funders.push(info.sender.clone());
        FUNDERS.save(deps.storage, &funders)?;

        Ok(Response::new()
            .add_attribute("method", "fund")
            .add_attribute("contributor", info.sender)
            .add_attribute("amount", amount.to_string()))
    }

    /// Zero out every listed funder's balance, reset the list and send the
    /// whole pool to the owner. Bookkeeping settles before the bank message
    /// is dispatched, so nothing observes a half-withdrawn ledger.
    pub fn withdraw(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
        let owner = ensure_owner(deps.storage, &info.sender)?;

        let funders = FUNDERS.load(deps.storage)?;
        for funder in &funders {
            FUNDED_AMOUNTS.remove(deps.storage, funder);
        }
        FUNDERS.save(deps.storage, &Vec::new())?;

        let pool = held_balance(deps.as_ref(), &env)?;
        Ok(Response::new()
            .add_attribute("method", "withdraw")
            .add_attribute("amount", pool.amount.to_string())
            .add_message(CosmosMsg::Bank(BankMsg::Send {
                to_address: owner.into_string(),
                amount: vec![pool],
            })))
    }

    /// Same outcome as [`withdraw`]. The funder list can hold the same
    /// address many times, so removing entries per list element re-touches
    /// storage once per contribution; a single sweep over the ledger map
    /// touches each funder once.
    pub fn cheaper_withdraw(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        let owner = ensure_owner(deps.storage, &info.sender)?;

        FUNDED_AMOUNTS.clear(deps.storage);
        FUNDERS.save(deps.storage, &Vec::new())?;

        let pool = held_balance(deps.as_ref(), &env)?;
        Ok(Response::new()
            .add_attribute("method", "cheaper_withdraw")
            .add_attribute("amount", pool.amount.to_string())
            .add_message(CosmosMsg::Bank(BankMsg::Send {
                to_address: owner.into_string(),
                amount: vec![pool],
            })))
    }

    /// Return a single funder's balance to them. The funder list keeps its
    /// entries; only withdrawal resets it.
    pub fn refund(
        deps: DepsMut,
        _env: Env,
        info: MessageInfo,
        funder: String,
    ) -> Result<Response, ContractError> {
        ensure_owner(deps.storage, &info.sender)?;

        let target = deps.api.addr_validate(&funder)?;
        let amount = FUNDED_AMOUNTS
            .may_load(deps.storage, &target)?
            .unwrap_or_default();

        let res = Response::new()
            .add_attribute("method", "refund")
            .add_attribute("funder", target.as_str())
            .add_attribute("amount", amount.to_string());

        // nothing funded, nothing to move back
        if amount.is_zero() {
            return Ok(res);
        }

        FUNDED_AMOUNTS.remove(deps.storage, &target);

        let denom = DENOM.load(deps.storage)?;
        Ok(res.add_message(CosmosMsg::Bank(BankMsg::Send {
            to_address: target.into_string(),
            amount: vec![Coin { denom, amount }],
        })))
    }

    fn ensure_owner(storage: &dyn Storage, sender: &Addr) -> Result<Addr, ContractError> {
        let owner = OWNER.load(storage)?;
        if *sender != owner {
            return Err(ContractError::NotOwner {});
        }
        Ok(owner)
    }

    /// Whole balance the contract holds in the accepted denom. An empty
    /// pool cannot be sent over the bank, so it is rejected here.
    fn held_balance(deps: Deps, env: &Env) -> Result<Coin, ContractError> {
        let denom = DENOM.load(deps.storage)?;
        let balance = deps
            .querier
            .query_balance(env.contract.address.clone(), denom)?;
        if balance.amount.is_zero() {
            return Err(ContractError::TransferFailed {});
        }
        Ok(balance)
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> Result<Binary, ContractError> {
    match msg {
        QueryMsg::GetPriceFeed {} => Ok(to_json_binary(&query::price_feed(deps)?)?),
        QueryMsg::GetAmountFunded { funder } => {
            Ok(to_json_binary(&query::amount_funded(deps, funder)?)?)
        }
        QueryMsg::GetFunder { index } => Ok(to_json_binary(&query::funder(deps, index)?)?),
        QueryMsg::GetOwner {} => Ok(to_json_binary(&query::owner(deps)?)?),
        QueryMsg::GetVersion {} => Ok(to_json_binary(&query::version(deps)?)?),
        QueryMsg::GetMinimumUsd {} => Ok(to_json_binary(&query::minimum_usd())?),
    }
}

pub mod query {
    use super::*;
    use crate::msg::{
        AmountFundedResponse, FunderResponse, MinimumUsdResponse, OwnerResponse,
        PriceFeedResponse, VersionResponse,
    };

    pub fn price_feed(deps: Deps) -> StdResult<PriceFeedResponse> {
        Ok(PriceFeedResponse {
            price_feed: PRICE_FEED.load(deps.storage)?,
        })
    }

    pub fn amount_funded(deps: Deps, funder: String) -> StdResult<AmountFundedResponse> {
        let funder = deps.api.addr_validate(&funder)?;
        Ok(AmountFundedResponse {
            amount: FUNDED_AMOUNTS
                .may_load(deps.storage, &funder)?
                .unwrap_or_default(),
        })
    }

    pub fn funder(deps: Deps, index: u32) -> Result<FunderResponse, ContractError> {
        let funders = FUNDERS.load(deps.storage)?;
        let funder = funders
            .get(index as usize)
            .cloned()
            .ok_or(ContractError::IndexOutOfRange {
                index,
                len: funders.len() as u32,
            })?;
        Ok(FunderResponse { funder })
    }

    pub fn owner(deps: Deps) -> StdResult<OwnerResponse> {
        Ok(OwnerResponse {
            owner: OWNER.load(deps.storage)?,
        })
    }

    pub fn version(deps: Deps) -> Result<VersionResponse, ContractError> {
        let feed = PriceFeed(PRICE_FEED.load(deps.storage)?);
        Ok(VersionResponse {
            version: feed.version(&deps.querier)?,
        })
    }

    pub fn minimum_usd() -> MinimumUsdResponse {
        MinimumUsdResponse {
            minimum_usd: MINIMUM_USD,
        }
    }
}
