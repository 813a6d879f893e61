use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Int128, QuerierWrapper, StdError, Uint128};

use crate::error::ContractError;

/// Queries every price feed contract has to answer.
#[cw_serde]
pub enum OracleQueryMsg {
    LatestRoundData {},
    Version {},
}

#[cw_serde]
pub struct RoundDataResponse {
    /// Price of one whole native unit in usd, scaled by `10^decimals`.
    pub answer: Int128,
    pub decimals: u8,
}

#[cw_serde]
pub struct OracleVersionResponse {
    pub version: u64,
}

/// Usd amounts carry 18 decimal places, the native unit is assumed to be
/// the 10^-18 subdivision of the priced asset.
pub const USD_DECIMALS: u32 = 18;
const USD_PRECISION: Uint128 = Uint128::new(1_000_000_000_000_000_000);

/// Read-only adapter around a price feed contract.
pub struct PriceFeed(pub Addr);

impl PriceFeed {
    /// Worth of `amount` native units in 18-decimal usd.
    pub fn convert_to_usd(
        &self,
        querier: &QuerierWrapper,
        amount: Uint128,
    ) -> Result<Uint128, ContractError> {
        let price = self.latest_price(querier)?;
        amount
            .checked_multiply_ratio(price, USD_PRECISION)
            .map_err(|e| StdError::generic_err(format!("usd conversion failed: {e}")).into())
    }

    /// Version the feed declares, passed through for compatibility checks.
    pub fn version(&self, querier: &QuerierWrapper) -> Result<u64, ContractError> {
        let resp: OracleVersionResponse = querier
            .query_wasm_smart(self.0.as_str(), &OracleQueryMsg::Version {})
            .map_err(|e| ContractError::OracleRead {
                reason: e.to_string(),
            })?;
        Ok(resp.version)
    }

    /// Latest answer of the feed, normalized to an 18-decimal usd price.
    fn latest_price(&self, querier: &QuerierWrapper) -> Result<Uint128, ContractError> {
        let data: RoundDataResponse = querier
            .query_wasm_smart(self.0.as_str(), &OracleQueryMsg::LatestRoundData {})
            .map_err(|e| ContractError::OracleRead {
                reason: e.to_string(),
            })?;

        if data.answer <= Int128::zero() {
            return Err(ContractError::OracleRead {
                reason: format!("non-positive price: {}", data.answer),
            });
        }
        if u32::from(data.decimals) > USD_DECIMALS {
            return Err(ContractError::OracleRead {
                reason: format!("unsupported feed precision: {} decimals", data.decimals),
            });
        }

        let scale = Uint128::new(10u128.pow(USD_DECIMALS - u32::from(data.decimals)));
        Uint128::new(data.answer.i128() as u128)
            .checked_mul(scale)
            .map_err(|_| ContractError::OracleRead {
                reason: "price out of range".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockQuerier;
    use cosmwasm_std::{from_json, to_json_binary, ContractResult, SystemResult, WasmQuery};

    fn feed_querier(answer: i128, decimals: u8, version: u64) -> MockQuerier {
        let mut querier = MockQuerier::default();
        querier.update_wasm(move |req| match req {
            WasmQuery::Smart { msg, .. } => {
                let resp = match from_json::<OracleQueryMsg>(msg).unwrap() {
                    OracleQueryMsg::LatestRoundData {} => to_json_binary(&RoundDataResponse {
                        answer: Int128::new(answer),
                        decimals,
                    }),
                    OracleQueryMsg::Version {} => {
                        to_json_binary(&OracleVersionResponse { version })
                    }
                };
                SystemResult::Ok(ContractResult::Ok(resp.unwrap()))
            }
            _ => panic!("unexpected non-smart query"),
        });
        querier
    }

    fn feed() -> PriceFeed {
        PriceFeed(Addr::unchecked("feed"))
    }

    #[test]
    fn converts_with_eight_decimal_feed() {
        // 2000 usd per unit, 0.03 units sent
        let querier = feed_querier(2_000_00000000, 8, 4);
        let usd = feed()
            .convert_to_usd(
                &QuerierWrapper::new(&querier),
                Uint128::new(30_000_000_000_000_000),
            )
            .unwrap();
        assert_eq!(Uint128::new(60_000_000_000_000_000_000), usd);
    }

    #[test]
    fn converts_with_zero_decimal_feed() {
        let querier = feed_querier(2_000, 0, 4);
        let usd = feed()
            .convert_to_usd(
                &QuerierWrapper::new(&querier),
                Uint128::new(1_000_000_000_000_000_000),
            )
            .unwrap();
        assert_eq!(Uint128::new(2_000_000_000_000_000_000_000), usd);
    }

    #[test]
    fn converts_with_eighteen_decimal_feed() {
        // already at usd precision, no rescaling left to do
        let querier = feed_querier(5_000_000_000_000_000_000, 18, 4);
        let usd = feed()
            .convert_to_usd(
                &QuerierWrapper::new(&querier),
                Uint128::new(1_000_000_000_000_000_000),
            )
            .unwrap();
        assert_eq!(Uint128::new(5_000_000_000_000_000_000), usd);
    }

    #[test]
    fn rejects_zero_price() {
        let querier = feed_querier(0, 8, 4);
        let err = feed()
            .convert_to_usd(&QuerierWrapper::new(&querier), Uint128::new(1))
            .unwrap_err();
        assert!(matches!(err, ContractError::OracleRead { .. }));
    }

    #[test]
    fn rejects_negative_price() {
        let querier = feed_querier(-2_000_00000000, 8, 4);
        let err = feed()
            .convert_to_usd(&QuerierWrapper::new(&querier), Uint128::new(1))
            .unwrap_err();
        assert!(matches!(err, ContractError::OracleRead { .. }));
    }

    #[test]
    fn rejects_unsupported_precision() {
        let querier = feed_querier(2_000, 19, 4);
        let err = feed()
            .convert_to_usd(&QuerierWrapper::new(&querier), Uint128::new(1))
            .unwrap_err();
        assert!(matches!(err, ContractError::OracleRead { .. }));
    }

    #[test]
    fn reads_version_through() {
        let querier = feed_querier(2_000, 8, 7);
        let version = feed().version(&QuerierWrapper::new(&querier)).unwrap();
        assert_eq!(7, version);
    }
}
