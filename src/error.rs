use cosmwasm_std::{StdError, Uint128};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    /// Contributions must arrive as exactly one coin of the accepted denom.
    #[error("expected exactly one coin of the accepted denom")]
    InvalidFunds {},

    #[error("contribution worth {sent} usd is below the minimum of {minimum} usd")]
    InsufficientContribution { sent: Uint128, minimum: Uint128 },

    #[error("caller is not the contract owner")]
    NotOwner {},

    #[error("price feed read failed: {reason}")]
    OracleRead { reason: String },

    #[error("value transfer failed")]
    TransferFailed {},

    #[error("funder index {index} out of range for list of length {len}")]
    IndexOutOfRange { index: u32, len: u32 },
}
