//! Money operation request bodies

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

/// Body for deposit and withdraw endpoints.
/// The account comes from the URL path, the kind from the endpoint.
#[derive(Debug, Deserialize, ToSchema)]
pub struct MoneyRequest {
    /// Amount as a decimal string
    #[schema(example = "100.50")]
    pub amount: Decimal,
}

/// Body for the transfer endpoint.
/// The destination is addressed by public account number and resolved
/// to an account ID before the ledger sees the request.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferApiRequest {
    /// Amount as a decimal string
    #[schema(example = "100.50")]
    pub amount: Decimal,
    /// Destination account number
    #[schema(example = 10000002_i64)]
    pub to_account: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_money_request_parses_decimal_string() {
        let req: MoneyRequest = serde_json::from_str(r#"{"amount": "100.50"}"#).unwrap();
        assert_eq!(req.amount, Decimal::from_str("100.50").unwrap());
    }

    #[test]
    fn test_transfer_request_fields() {
        let req: TransferApiRequest =
            serde_json::from_str(r#"{"amount": "25", "to_account": 10000002}"#).unwrap();
        assert_eq!(req.amount, Decimal::from(25));
        assert_eq!(req.to_account, 10000002);
    }
}
