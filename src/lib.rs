pub mod contract;
pub mod error;
pub mod msg;
pub mod oracle;
pub mod state;

pub use crate::error::ContractError;
