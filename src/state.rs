use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

/// Registry of addresses and the amount they sent to the contract's bank account.
pub const FUNDED_AMOUNTS: Map<&Addr, Uint128> = Map::new("funded-amounts");

/// Every funder in contribution order. Funding twice lists an address twice;
/// withdrawal resets the list.
pub const FUNDERS: Item<Vec<Addr>> = Item::new("funders");

/// Only account allowed to withdraw or refund.
pub const OWNER: Item<Addr> = Item::new("owner");
/// Price feed contract the usd minimum is checked against.
pub const PRICE_FEED: Item<Addr> = Item::new("price-feed");
/// Bank denom contributions are accepted in.
pub const DENOM: Item<String> = Item::new("denom");
