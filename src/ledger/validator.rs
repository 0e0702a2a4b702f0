//! Transaction Request Validation
//!
//! - `TransactionValidator`: pure shape checks, no storage access
//! - Output is a [`LedgerOp`]; downstream code never re-checks field
//!   combinations

use rust_decimal::Decimal;

use super::error::LedgerError;
use super::types::{LedgerOp, TransactionRequest, TxKind};

/// Validates transaction requests against their declared kind
///
/// The maximum amount is injected configuration, not a global.
#[derive(Debug, Clone)]
pub struct TransactionValidator {
    max_amount: Decimal,
}

impl TransactionValidator {
    pub fn new(max_amount: Decimal) -> Self {
        Self { max_amount }
    }

    /// Validate and convert a request into a typed ledger operation.
    ///
    /// Checks run in order: kind, amount range, then the field rules of
    /// the declared kind. The first violation is returned.
    pub fn validate(&self, req: &TransactionRequest) -> Result<LedgerOp, LedgerError> {
        // 1. Resolve the declared kind
        let kind = TxKind::parse(&req.kind)
            .ok_or_else(|| LedgerError::InvalidTransactionType(req.kind.clone()))?;

        // 2. Amount must be in (0, max]
        if req.amount <= Decimal::ZERO || req.amount > self.max_amount {
            return Err(LedgerError::validation("amount", "outOfRange"));
        }

        // 3. Field rules per kind
        match kind {
            TxKind::Deposit => {
                let destination = req
                    .destination
                    .ok_or(LedgerError::validation("destination", "requiredForDeposit"))?;
                if req.source.is_some() {
                    return Err(LedgerError::validation("source", "shouldBeEmptyForDeposit"));
                }
                Ok(LedgerOp::Deposit {
                    destination,
                    amount: req.amount,
                })
            }
            TxKind::Payout => {
                let source = req
                    .source
                    .ok_or(LedgerError::validation("source", "requiredForPayout"))?;
                if req.destination.is_some() {
                    return Err(LedgerError::validation(
                        "destination",
                        "shouldBeEmptyForPayout",
                    ));
                }
                Ok(LedgerOp::Payout {
                    source,
                    amount: req.amount,
                })
            }
            TxKind::Transfer => {
                let source = req
                    .source
                    .ok_or(LedgerError::validation("source", "requiredForTransfer"))?;
                let destination = req
                    .destination
                    .ok_or(LedgerError::validation("destination", "requiredForTransfer"))?;
                Ok(LedgerOp::Transfer {
                    source,
                    destination,
                    amount: req.amount,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::AccountId;

    fn validator() -> TransactionValidator {
        TransactionValidator::new(Decimal::from(10000))
    }

    fn expect_validation(result: Result<LedgerOp, LedgerError>, field: &str, reason: &str) {
        match result {
            Err(LedgerError::Validation {
                field: f,
                reason: r,
            }) => {
                assert_eq!(f, field);
                assert_eq!(r, reason);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_valid_requests() {
        let a = AccountId::new();
        let b = AccountId::new();
        let v = validator();

        let amount = Decimal::from(100);
        let op = v
            .validate(&TransactionRequest::deposit(a, amount))
            .unwrap();
        assert_eq!(
            op,
            LedgerOp::Deposit {
                destination: a,
                amount
            }
        );

        let op = v.validate(&TransactionRequest::payout(a, amount)).unwrap();
        assert_eq!(op, LedgerOp::Payout { source: a, amount });

        let op = v
            .validate(&TransactionRequest::transfer(a, b, amount))
            .unwrap();
        assert_eq!(
            op,
            LedgerOp::Transfer {
                source: a,
                destination: b,
                amount
            }
        );
    }

    #[test]
    fn test_unknown_kind() {
        let req = TransactionRequest {
            kind: "Wire".to_string(),
            amount: Decimal::from(100),
            source: None,
            destination: Some(AccountId::new()),
        };
        match validator().validate(&req) {
            Err(LedgerError::InvalidTransactionType(kind)) => assert_eq!(kind, "Wire"),
            other => panic!("expected invalid transaction type, got {other:?}"),
        }
    }

    #[test]
    fn test_amount_bounds() {
        let a = AccountId::new();
        let v = validator();

        expect_validation(
            v.validate(&TransactionRequest::deposit(a, Decimal::ZERO)),
            "amount",
            "outOfRange",
        );
        expect_validation(
            v.validate(&TransactionRequest::deposit(a, Decimal::from(-5))),
            "amount",
            "outOfRange",
        );
        expect_validation(
            v.validate(&TransactionRequest::deposit(a, Decimal::from(10001))),
            "amount",
            "outOfRange",
        );

        // Upper bound is inclusive
        assert!(
            v.validate(&TransactionRequest::deposit(a, Decimal::from(10000)))
                .is_ok()
        );
    }

    #[test]
    fn test_deposit_field_rules() {
        let a = AccountId::new();
        let v = validator();

        let mut req = TransactionRequest::deposit(a, Decimal::from(10));
        req.source = Some(AccountId::new());
        expect_validation(v.validate(&req), "source", "shouldBeEmptyForDeposit");

        let mut req = TransactionRequest::deposit(a, Decimal::from(10));
        req.destination = None;
        expect_validation(v.validate(&req), "destination", "requiredForDeposit");
    }

    #[test]
    fn test_payout_field_rules() {
        let a = AccountId::new();
        let v = validator();

        let mut req = TransactionRequest::payout(a, Decimal::from(10));
        req.destination = Some(AccountId::new());
        expect_validation(v.validate(&req), "destination", "shouldBeEmptyForPayout");

        let mut req = TransactionRequest::payout(a, Decimal::from(10));
        req.source = None;
        expect_validation(v.validate(&req), "source", "requiredForPayout");
    }

    #[test]
    fn test_transfer_field_rules() {
        let a = AccountId::new();
        let b = AccountId::new();
        let v = validator();

        let mut req = TransactionRequest::transfer(a, b, Decimal::from(10));
        req.source = None;
        expect_validation(v.validate(&req), "source", "requiredForTransfer");

        let mut req = TransactionRequest::transfer(a, b, Decimal::from(10));
        req.destination = None;
        expect_validation(v.validate(&req), "destination", "requiredForTransfer");
    }

    #[test]
    fn test_configured_maximum_applies() {
        let a = AccountId::new();
        let v = TransactionValidator::new(Decimal::from(50));

        assert!(
            v.validate(&TransactionRequest::deposit(a, Decimal::from(50)))
                .is_ok()
        );
        expect_validation(
            v.validate(&TransactionRequest::deposit(a, Decimal::from(51))),
            "amount",
            "outOfRange",
        );
    }
}
