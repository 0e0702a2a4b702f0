//! Ledger Core Types
//!
//! Type definitions shared by the validator, engine and recorder.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Account identifier - UUID-based opaque identity
///
/// Account numbers are the externally addressable handle; this ID is the
/// storage key and the only thing the ledger core ever sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId(uuid::Uuid);

impl AccountId {
    /// Generate a new random AccountId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Get the inner UUID value
    pub fn inner(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<uuid::Uuid> for AccountId {
    fn from(id: uuid::Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AccountId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(uuid::Uuid::parse_str(s)?))
    }
}

/// Transaction record ID - ULID-based unique identifier
///
/// Using ULID provides:
/// - Monotonic, sortable IDs (matches the append-only log ordering)
/// - No coordination needed across server instances
/// - 128-bit with good entropy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TransactionId(ulid::Ulid);

impl TransactionId {
    /// Generate a new unique TransactionId
    pub fn new() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Get the inner ULID value
    pub fn inner(&self) -> ulid::Ulid {
        self.0
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TransactionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(ulid::Ulid::from_string(s)?))
    }
}

/// Transaction kind
///
/// Kind IDs are designed for PostgreSQL storage as SMALLINT. The string
/// form is the wire vocabulary accepted from clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i16)]
pub enum TxKind {
    /// Money enters the system (destination only)
    Deposit = 1,
    /// Money leaves the system (source only)
    Payout = 2,
    /// Money moves between two accounts
    Transfer = 3,
}

impl TxKind {
    /// Get numeric ID for PostgreSQL storage
    #[inline]
    pub fn id(&self) -> i16 {
        *self as i16
    }

    /// Convert from PostgreSQL ID
    pub fn from_id(id: i16) -> Option<Self> {
        match id {
            1 => Some(TxKind::Deposit),
            2 => Some(TxKind::Payout),
            3 => Some(TxKind::Transfer),
            _ => None,
        }
    }

    /// Get the wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            TxKind::Deposit => "Deposit",
            TxKind::Payout => "Payout",
            TxKind::Transfer => "Transfer",
        }
    }

    /// Parse the wire name. Anything unrecognized is None.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Deposit" => Some(TxKind::Deposit),
            "Payout" => Some(TxKind::Payout),
            "Transfer" => Some(TxKind::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<i16> for TxKind {
    type Error = ();

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        TxKind::from_id(value).ok_or(())
    }
}

/// Phases of a single transfer execution
///
/// Terminal phases: COMMITTED, ROLLED_BACK. A transfer never rests in
/// SOURCE_DEBITED; the scope either commits or rolls the debit back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferPhase {
    /// Scope opened, nothing applied yet
    Pending,
    /// Source debit applied inside the scope - funds are in-flight
    SourceDebited,
    /// Terminal: both mutations committed as one unit
    Committed,
    /// Terminal: scope aborted, debit undone
    RolledBack,
}

impl TransferPhase {
    /// Check if this is a terminal phase (no more transitions possible)
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, TransferPhase::Committed | TransferPhase::RolledBack)
    }

    /// Get human-readable phase name
    pub fn as_str(&self) -> &'static str {
        match self {
            TransferPhase::Pending => "PENDING",
            TransferPhase::SourceDebited => "SOURCE_DEBITED",
            TransferPhase::Committed => "COMMITTED",
            TransferPhase::RolledBack => "ROLLED_BACK",
        }
    }
}

impl fmt::Display for TransferPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction request as decoded from the API layer
///
/// The declared kind is an untrusted string until the validator maps it
/// onto [`LedgerOp`]. Absent account references are `None`, never a
/// zero-value placeholder.
#[derive(Debug, Clone)]
pub struct TransactionRequest {
    /// Declared kind ("Deposit" | "Payout" | "Transfer")
    pub kind: String,
    /// Amount to move (validated against the configured maximum)
    pub amount: Decimal,
    /// Account money leaves
    pub source: Option<AccountId>,
    /// Account money enters
    pub destination: Option<AccountId>,
}

impl TransactionRequest {
    /// Build a deposit request
    pub fn deposit(destination: AccountId, amount: Decimal) -> Self {
        Self {
            kind: TxKind::Deposit.as_str().to_string(),
            amount,
            source: None,
            destination: Some(destination),
        }
    }

    /// Build a payout request
    pub fn payout(source: AccountId, amount: Decimal) -> Self {
        Self {
            kind: TxKind::Payout.as_str().to_string(),
            amount,
            source: Some(source),
            destination: None,
        }
    }

    /// Build a transfer request
    pub fn transfer(source: AccountId, destination: AccountId, amount: Decimal) -> Self {
        Self {
            kind: TxKind::Transfer.as_str().to_string(),
            amount,
            source: Some(source),
            destination: Some(destination),
        }
    }
}

/// Validated ledger operation
///
/// Each variant carries exactly the fields that are legal for it, already
/// checked, so the engine never re-validates combinations or ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOp {
    Deposit {
        destination: AccountId,
        amount: Decimal,
    },
    Payout {
        source: AccountId,
        amount: Decimal,
    },
    Transfer {
        source: AccountId,
        destination: AccountId,
        amount: Decimal,
    },
}

impl LedgerOp {
    /// The kind this operation records as
    pub fn kind(&self) -> TxKind {
        match self {
            LedgerOp::Deposit { .. } => TxKind::Deposit,
            LedgerOp::Payout { .. } => TxKind::Payout,
            LedgerOp::Transfer { .. } => TxKind::Transfer,
        }
    }

    /// Amount to move
    pub fn amount(&self) -> Decimal {
        match self {
            LedgerOp::Deposit { amount, .. }
            | LedgerOp::Payout { amount, .. }
            | LedgerOp::Transfer { amount, .. } => *amount,
        }
    }

    /// Account money leaves, if any
    pub fn source(&self) -> Option<AccountId> {
        match self {
            LedgerOp::Deposit { .. } => None,
            LedgerOp::Payout { source, .. } => Some(*source),
            LedgerOp::Transfer { source, .. } => Some(*source),
        }
    }

    /// Account money enters, if any
    pub fn destination(&self) -> Option<AccountId> {
        match self {
            LedgerOp::Deposit { destination, .. } => Some(*destination),
            LedgerOp::Payout { .. } => None,
            LedgerOp::Transfer { destination, .. } => Some(*destination),
        }
    }
}

impl fmt::Display for LedgerOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LedgerOp::Deposit {
                destination,
                amount,
            } => write!(f, "Deposit {amount} -> {destination}"),
            LedgerOp::Payout { source, amount } => write!(f, "Payout {amount} <- {source}"),
            LedgerOp::Transfer {
                source,
                destination,
                amount,
            } => write!(f, "Transfer {amount} {source} -> {destination}"),
        }
    }
}

/// Account as the ledger core sees it
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Storage identity
    pub account_id: AccountId,
    /// Owning user
    pub user_id: i64,
    /// Externally addressable number, unique per installation
    pub account_number: i64,
    /// Current balance, never negative
    pub balance: Decimal,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Create a fresh zero-balance account
    pub fn new(user_id: i64, account_number: i64) -> Self {
        Self {
            account_id: AccountId::new(),
            user_id,
            account_number,
            balance: Decimal::ZERO,
            created_at: Utc::now(),
        }
    }
}

/// Immutable transaction record
///
/// Created only after the corresponding balance mutation durably
/// succeeded; never updated or deleted afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Unique record ID (ULID, also the DB primary key)
    pub transaction_id: TransactionId,
    /// What was executed
    pub kind: TxKind,
    /// Amount moved
    pub amount: Decimal,
    /// Account money left, None for deposits
    pub source: Option<AccountId>,
    /// Account money entered, None for payouts
    pub destination: Option<AccountId>,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    /// Build the record for an executed operation
    pub fn for_op(op: &LedgerOp) -> Self {
        Self {
            transaction_id: TransactionId::new(),
            kind: op.kind(),
            amount: op.amount(),
            source: op.source(),
            destination: op.destination(),
            created_at: Utc::now(),
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tx[{}] {} amount={} source={} destination={}",
            self.transaction_id,
            self.kind,
            self.amount,
            self.source.map_or_else(|| "-".to_string(), |a| a.to_string()),
            self.destination
                .map_or_else(|| "-".to_string(), |a| a.to_string()),
        )
    }
}
