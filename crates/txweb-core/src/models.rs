//! Core data models

use serde::{Deserialize, Deserializer, Serialize};

/// A single transaction record
///
/// Serialized with PascalCase keys in declaration order:
/// `{"Id":1,"Description":"DEF","Amount":50}`. Every field is optional on
/// input; the Id of an incoming record is ignored by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Transaction {
    /// Identifier assigned by the repository
    #[serde(default)]
    pub id: i64,
    /// Free-form description, may be empty or null
    #[serde(default)]
    pub description: Option<String>,
    /// Signed amount
    #[serde(default)]
    pub amount: i64,
}

impl Transaction {
    /// Build a record with a known id
    pub fn new(id: i64, description: impl Into<String>, amount: i64) -> Self {
        Self {
            id,
            description: Some(description.into()),
            amount,
        }
    }

    /// Build a record to be submitted for creation (id left at 0)
    pub fn draft(description: impl Into<String>, amount: i64) -> Self {
        Self::new(0, description, amount)
    }

    /// Description, with null shown as empty
    pub fn description_or_empty(&self) -> &str {
        self.description.as_deref().unwrap_or("")
    }
}

/// Body of a create request
///
/// Has no Id field, so an incoming `Id` key is skipped whatever its JSON
/// type. A null `Amount` reads as 0.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewTransaction {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub amount: i64,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<NewTransaction> for Transaction {
    fn from(draft: NewTransaction) -> Self {
        Self {
            id: 0,
            description: draft.description,
            amount: draft.amount,
        }
    }
}

/// The five records every seeded store starts with
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        Transaction::new(0, "ABC", 100),
        Transaction::new(1, "DEF", 50),
        Transaction::new(2, "GHI", 5),
        Transaction::new(3, "JKL", 90),
        Transaction::new(4, "MNO", 200),
    ]
}
