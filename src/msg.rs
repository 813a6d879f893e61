use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// Address of the price feed contract, queried on every contribution.
    pub price_feed: String,
    /// Bank denom contributions are accepted in.
    pub denom: String,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Contribute the attached funds. Rejected if their usd worth is below
    /// the minimum.
    Fund {},
    /// Owner only: zero out all funder balances and collect the whole pool.
    Withdraw {},
    /// Same outcome as `Withdraw`, cheaper bookkeeping sweep.
    CheaperWithdraw {},
    /// Owner only: return a single funder's balance to them.
    Refund { funder: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(PriceFeedResponse)]
    GetPriceFeed {},
    #[returns(AmountFundedResponse)]
    GetAmountFunded { funder: String },
    #[returns(FunderResponse)]
    GetFunder { index: u32 },
    #[returns(OwnerResponse)]
    GetOwner {},
    #[returns(VersionResponse)]
    GetVersion {},
    #[returns(MinimumUsdResponse)]
    GetMinimumUsd {},
}

#[cw_serde]
pub struct PriceFeedResponse {
    pub price_feed: Addr,
}

#[cw_serde]
pub struct AmountFundedResponse {
    pub amount: Uint128,
}

#[cw_serde]
pub struct FunderResponse {
    pub funder: Addr,
}

#[cw_serde]
pub struct OwnerResponse {
    pub owner: Addr,
}

#[cw_serde]
pub struct VersionResponse {
    pub version: u64,
}

#[cw_serde]
pub struct MinimumUsdResponse {
    pub minimum_usd: Uint128,
}
