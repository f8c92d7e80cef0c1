//! Transaction storage
//!
//! `TransactionsRepository` is the seam between the controller and the
//! store. `InMemoryTransactionsRepository` keeps the records in a
//! process-lifetime list and emulates database round-trips with a
//! configurable delay.

use async_trait::async_trait;
use std::time::Duration;
use tokio::sync::Mutex;
use txweb_config::StoreConfig;

use crate::error::{CoreError, CoreResult};
use crate::models::{seed_transactions, Transaction};

/// Storage operations the controller relies on
#[async_trait]
pub trait TransactionsRepository: Send + Sync {
    /// All transactions in insertion order
    async fn all_transactions(&self) -> CoreResult<Vec<Transaction>>;

    /// First transaction with the given id, `None` when absent
    async fn transaction(&self, id: i64) -> CoreResult<Option<Transaction>>;

    /// Assign the next id to `transaction`, append it and return the stored record
    async fn add_transaction(&self, transaction: Transaction) -> CoreResult<Transaction>;
}

/// Simulated I/O latency
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    pub read: Duration,
    pub write: Duration,
}

impl Latency {
    pub fn new(read: Duration, write: Duration) -> Self {
        Self { read, write }
    }

    /// No delay at all
    pub fn none() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(Duration::from_millis(500), Duration::from_millis(1000))
    }
}

impl From<&StoreConfig> for Latency {
    fn from(config: &StoreConfig) -> Self {
        Self::new(config.read_delay(), config.write_delay())
    }
}

async fn simulate(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Next id under the `max + 1` rule; an empty store starts at 0
fn next_id(transactions: &[Transaction]) -> CoreResult<i64> {
    match transactions.iter().map(|t| t.id).max() {
        None => Ok(0),
        Some(max_id) => max_id
            .checked_add(1)
            .ok_or(CoreError::IdSpaceExhausted { max_id }),
    }
}

/// In-memory repository
///
/// `None` in the slot is the explicit "store unavailable" state. Writers hold
/// the lock from id assignment until the append, so concurrent creates never
/// observe the same maximum id.
pub struct InMemoryTransactionsRepository {
    data: Mutex<Option<Vec<Transaction>>>,
    latency: Latency,
}

impl InMemoryTransactionsRepository {
    /// Repository seeded with the five sample records
    pub fn new(latency: Latency) -> Self {
        Self::with_transactions(seed_transactions(), latency)
    }

    pub fn with_transactions(transactions: Vec<Transaction>, latency: Latency) -> Self {
        Self {
            data: Mutex::new(Some(transactions)),
            latency,
        }
    }

    /// Repository whose store was never initialized
    pub fn unavailable(latency: Latency) -> Self {
        Self {
            data: Mutex::new(None),
            latency,
        }
    }

    /// Build from the `store` section of the configuration
    pub fn from_config(config: &StoreConfig) -> Self {
        let latency = Latency::from(config);
        if config.seed {
            Self::new(latency)
        } else {
            Self::with_transactions(Vec::new(), latency)
        }
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Number of stored records, `None` when the store is unavailable
    pub async fn len(&self) -> Option<usize> {
        self.data.lock().await.as_ref().map(Vec::len)
    }
}

#[async_trait]
impl TransactionsRepository for InMemoryTransactionsRepository {
    async fn all_transactions(&self) -> CoreResult<Vec<Transaction>> {
        simulate(self.latency.read).await;
        let data = self.data.lock().await;
        data.as_ref().cloned().ok_or(CoreError::StoreUnavailable)
    }

    async fn transaction(&self, id: i64) -> CoreResult<Option<Transaction>> {
        simulate(self.latency.read).await;
        let data = self.data.lock().await;
        let transactions = data.as_ref().ok_or(CoreError::StoreUnavailable)?;
        Ok(transactions.iter().find(|t| t.id == id).cloned())
    }

    async fn add_transaction(&self, mut transaction: Transaction) -> CoreResult<Transaction> {
        let mut data = self.data.lock().await;
        let transactions = data.as_mut().ok_or(CoreError::StoreUnavailable)?;

        transaction.id = next_id(transactions)?;
        simulate(self.latency.write).await;
        transactions.push(transaction.clone());

        log::debug!(
            "Stored transaction {} ({} records)",
            transaction.id,
            transactions.len()
        );
        Ok(transaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Instant;

    fn repository() -> InMemoryTransactionsRepository {
        InMemoryTransactionsRepository::new(Latency::none())
    }

    #[tokio::test]
    async fn test_all_transactions_returns_seed_in_order() {
        let all = repository().all_transactions().await.unwrap();
        assert_eq!(all, seed_transactions());
    }

    #[tokio::test]
    async fn test_transaction_by_id() {
        let repo = repository();
        for id in 0..5 {
            let tx = repo.transaction(id).await.unwrap().unwrap();
            assert_eq!(tx.id, id);
        }
        assert_eq!(repo.transaction(5).await.unwrap(), None);
        assert_eq!(repo.transaction(-1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_assigns_max_plus_one_and_ignores_client_id() {
        let repo = repository();
        let stored = repo
            .add_transaction(Transaction::new(42, "XYZ", 350))
            .await
            .unwrap();

        assert_eq!(stored, Transaction::new(5, "XYZ", 350));
        let all = repo.all_transactions().await.unwrap();
        assert_eq!(all.len(), 6);
        assert_eq!(all[5], stored);
    }

    #[tokio::test]
    async fn test_add_uses_max_not_length() {
        let repo = InMemoryTransactionsRepository::with_transactions(
            vec![Transaction::new(10, "a", 1), Transaction::new(3, "b", 2)],
            Latency::none(),
        );
        let stored = repo.add_transaction(Transaction::draft("c", 3)).await.unwrap();
        assert_eq!(stored.id, 11);
    }

    #[tokio::test]
    async fn test_add_to_empty_store_starts_at_zero() {
        let repo = InMemoryTransactionsRepository::with_transactions(Vec::new(), Latency::none());
        assert!(repo.all_transactions().await.unwrap().is_empty());

        let stored = repo.add_transaction(Transaction::draft("first", 1)).await.unwrap();
        assert_eq!(stored.id, 0);
        assert_eq!(repo.len().await, Some(1));
    }

    #[tokio::test]
    async fn test_add_accepts_null_description_and_negative_amount() {
        let repo = repository();
        let stored = repo
            .add_transaction(Transaction {
                id: 0,
                description: None,
                amount: -25,
            })
            .await
            .unwrap();
        assert_eq!(stored.description, None);
        assert_eq!(stored.amount, -25);
        assert_eq!(repo.len().await, Some(6));
    }

    #[tokio::test]
    async fn test_id_space_exhausted() {
        let repo = InMemoryTransactionsRepository::with_transactions(
            vec![Transaction::new(i64::MAX, "last", 0)],
            Latency::none(),
        );
        let err = repo.add_transaction(Transaction::draft("x", 1)).await.unwrap_err();
        assert_eq!(err, CoreError::IdSpaceExhausted { max_id: i64::MAX });
        assert_eq!(repo.len().await, Some(1));
    }

    #[tokio::test]
    async fn test_unavailable_store() {
        let repo = InMemoryTransactionsRepository::unavailable(Latency::none());
        assert_eq!(repo.all_transactions().await, Err(CoreError::StoreUnavailable));
        assert_eq!(repo.transaction(0).await, Err(CoreError::StoreUnavailable));
        assert_eq!(
            repo.add_transaction(Transaction::draft("x", 1)).await,
            Err(CoreError::StoreUnavailable)
        );
        assert_eq!(repo.len().await, None);
    }

    #[tokio::test]
    async fn test_concurrent_adds_get_distinct_ids() {
        let latency = Latency::new(Duration::ZERO, Duration::from_millis(5));
        let repo = Arc::new(InMemoryTransactionsRepository::new(latency));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.add_transaction(Transaction::draft(format!("concurrent {}", i), i))
                        .await
                })
            })
            .collect();

        let mut ids = HashSet::new();
        for handle in handles {
            let stored = handle.await.unwrap().unwrap();
            assert!(ids.insert(stored.id), "duplicate id {}", stored.id);
        }

        let expected: HashSet<i64> = (5..13).collect();
        assert_eq!(ids, expected);
        assert_eq!(repo.len().await, Some(13));
    }

    #[tokio::test]
    async fn test_read_latency_is_applied() {
        let latency = Latency::new(Duration::from_millis(30), Duration::ZERO);
        let repo = InMemoryTransactionsRepository::new(latency);

        let started = Instant::now();
        repo.all_transactions().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(30));
    }

    #[test]
    fn test_latency_from_config() {
        let config = StoreConfig {
            seed: true,
            read_delay_ms: 7,
            write_delay_ms: 11,
        };
        let latency = Latency::from(&config);
        assert_eq!(latency.read, Duration::from_millis(7));
        assert_eq!(latency.write, Duration::from_millis(11));
        assert_eq!(Latency::default().write, Duration::from_millis(1000));
    }

    #[tokio::test]
    async fn test_from_config_without_seed() {
        let config = StoreConfig {
            seed: false,
            read_delay_ms: 0,
            write_delay_ms: 0,
        };
        let repo = InMemoryTransactionsRepository::from_config(&config);
        assert_eq!(repo.len().await, Some(0));
        assert_eq!(repo.latency(), Latency::none());
    }
}
