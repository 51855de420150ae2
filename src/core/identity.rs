//! Record identity system using kind-prefixed ULIDs

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};
use thiserror::Error;
use ulid::{Generator, Ulid};

/// Entity kinds managed by bizdesk
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// Sales lead, also called a "collaboration"
    Lead,
    /// Sales contract
    Contract,
    /// Sales agent / distributor
    Agent,
    /// Product with pricing
    Product,
    /// Customer contact
    Customer,
}

impl EntityKind {
    /// Singular lowercase name, used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Lead => "lead",
            EntityKind::Contract => "contract",
            EntityKind::Agent => "agent",
            EntityKind::Product => "product",
            EntityKind::Customer => "customer",
        }
    }

    /// Prefix used in record IDs
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Lead => "LEAD",
            EntityKind::Contract => "CTR",
            EntityKind::Agent => "AGT",
            EntityKind::Product => "PRD",
            EntityKind::Customer => "CUS",
        }
    }

    /// Key of the collection in the record store
    pub fn store_key(&self) -> &'static str {
        match self {
            EntityKind::Lead => "leads",
            EntityKind::Contract => "contracts",
            EntityKind::Agent => "agents",
            EntityKind::Product => "products",
            EntityKind::Customer => "customers",
        }
    }

    /// Get all kinds
    pub fn all() -> &'static [EntityKind] {
        &[
            EntityKind::Lead,
            EntityKind::Contract,
            EntityKind::Agent,
            EntityKind::Product,
            EntityKind::Customer,
        ]
    }

    fn from_prefix(prefix: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|kind| kind.prefix().eq_ignore_ascii_case(prefix))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lead" | "leads" | "collaboration" | "collaborations" => Ok(EntityKind::Lead),
            "contract" | "contracts" | "ctr" => Ok(EntityKind::Contract),
            "agent" | "agents" | "agt" => Ok(EntityKind::Agent),
            "product" | "products" | "prd" => Ok(EntityKind::Product),
            "customer" | "customers" | "cus" => Ok(EntityKind::Customer),
            _ => Err(IdParseError::InvalidKind(s.to_string())),
        }
    }
}

/// Process-wide monotonic generator; IDs handed out in one process never repeat
fn next_ulid() -> Ulid {
    static GENERATOR: OnceLock<Mutex<Generator>> = OnceLock::new();
    let generator = GENERATOR.get_or_init(|| Mutex::new(Generator::new()));
    match generator.lock() {
        Ok(mut guard) => guard.generate().unwrap_or_else(|_| Ulid::new()),
        Err(poisoned) => poisoned
            .into_inner()
            .generate()
            .unwrap_or_else(|_| Ulid::new()),
    }
}

/// A unique record identifier combining a kind prefix and ULID
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RecordId {
    kind: EntityKind,
    ulid: Ulid,
}

impl RecordId {
    /// Create a fresh RecordId for the given kind
    pub fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            ulid: next_ulid(),
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn ulid(&self) -> Ulid {
        self.ulid
    }

    /// Parse a RecordId from a string
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        s.parse()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.kind.prefix(), self.ulid)
    }
}

impl FromStr for RecordId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (prefix_str, ulid_str) = s
            .split_once('-')
            .ok_or_else(|| IdParseError::MissingDelimiter(s.to_string()))?;

        let kind = EntityKind::from_prefix(prefix_str)
            .ok_or_else(|| IdParseError::InvalidPrefix(prefix_str.to_string()))?;
        let ulid = Ulid::from_string(ulid_str)
            .map_err(|e| IdParseError::InvalidUlid(ulid_str.to_string(), e.to_string()))?;

        Ok(Self { kind, ulid })
    }
}

impl Serialize for RecordId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Errors that can occur when parsing kinds and record IDs
#[derive(Debug, Error)]
pub enum IdParseError {
    #[error("unknown entity type: '{0}' (valid: lead, contract, agent, product, customer)")]
    InvalidKind(String),

    #[error("invalid record prefix: '{0}' (valid: LEAD, CTR, AGT, PRD, CUS)")]
    InvalidPrefix(String),

    #[error("missing '-' delimiter in record ID: '{0}'")]
    MissingDelimiter(String),

    #[error("invalid ULID '{0}': {1}")]
    InvalidUlid(String, String),
}
