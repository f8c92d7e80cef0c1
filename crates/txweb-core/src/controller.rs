//! Transactions controller
//!
//! Thin request/response operations over a `TransactionsRepository`. Holds no
//! state of its own.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::models::Transaction;
use crate::repository::TransactionsRepository;

/// Repository reference type
pub type RepositoryRef = Arc<dyn TransactionsRepository>;

#[derive(Clone)]
pub struct TransactionsController {
    repository: RepositoryRef,
}

impl TransactionsController {
    pub fn new(repository: RepositoryRef) -> Self {
        Self { repository }
    }

    /// Every transaction, exactly as the repository returns them
    pub async fn list(&self) -> CoreResult<Vec<Transaction>> {
        self.repository.all_transactions().await
    }

    /// The transaction with `id`, or `TransactionNotFound`
    pub async fn get_by_id(&self, id: i64) -> CoreResult<Transaction> {
        self.repository
            .transaction(id)
            .await?
            .ok_or(CoreError::TransactionNotFound { id })
    }

    /// Store `transaction` and return the whole collection afterwards
    pub async fn create(&self, transaction: Transaction) -> CoreResult<Vec<Transaction>> {
        self.repository.add_transaction(transaction).await?;
        self.repository.all_transactions().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        All,
        Get(i64),
        Add(Transaction),
    }

    /// Repository stand-in that records every call and serves canned data
    struct RecordingRepository {
        transactions: Mutex<Option<Vec<Transaction>>>,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingRepository {
        fn with(transactions: Option<Vec<Transaction>>) -> Arc<Self> {
            Arc::new(Self {
                transactions: Mutex::new(transactions),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }
    }

    #[async_trait]
    impl TransactionsRepository for RecordingRepository {
        async fn all_transactions(&self) -> CoreResult<Vec<Transaction>> {
            self.record(Call::All);
            self.transactions
                .lock()
                .unwrap()
                .clone()
                .ok_or(CoreError::StoreUnavailable)
        }

        async fn transaction(&self, id: i64) -> CoreResult<Option<Transaction>> {
            self.record(Call::Get(id));
            let guard = self.transactions.lock().unwrap();
            let transactions = guard.as_ref().ok_or(CoreError::StoreUnavailable)?;
            Ok(transactions.iter().find(|t| t.id == id).cloned())
        }

        async fn add_transaction(&self, mut transaction: Transaction) -> CoreResult<Transaction> {
            self.record(Call::Add(transaction.clone()));
            let mut guard = self.transactions.lock().unwrap();
            let transactions = guard.as_mut().ok_or(CoreError::StoreUnavailable)?;
            transaction.id = transactions.iter().map(|t| t.id).max().map_or(0, |m| m + 1);
            transactions.push(transaction.clone());
            Ok(transaction)
        }
    }

    fn sample() -> Vec<Transaction> {
        vec![
            Transaction::new(0, "Demo0", 0),
            Transaction::new(1, "Demo1", -1),
            Transaction::new(2, "Demo2", 25),
            Transaction::new(3, "Demo3", 350),
            Transaction::new(4, "Demo4", 42),
        ]
    }

    fn controller(repository: &Arc<RecordingRepository>) -> TransactionsController {
        TransactionsController::new(repository.clone())
    }

    #[tokio::test]
    async fn test_list_delegates_to_repository() {
        let repo = RecordingRepository::with(Some(sample()));
        let result = controller(&repo).list().await.unwrap();

        assert_eq!(result, sample());
        assert_eq!(repo.calls(), vec![Call::All]);
    }

    #[tokio::test]
    async fn test_list_twice_is_stable() {
        let repo = RecordingRepository::with(Some(sample()));
        let controller = controller(&repo);

        let first = controller.list().await.unwrap();
        let second = controller.list().await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_list_empty_repository() {
        let repo = RecordingRepository::with(Some(Vec::new()));
        let result = controller(&repo).list().await.unwrap();

        assert!(result.is_empty());
        assert_eq!(repo.calls(), vec![Call::All]);
    }

    #[tokio::test]
    async fn test_list_unavailable_repository() {
        let repo = RecordingRepository::with(None);
        let result = controller(&repo).list().await;

        assert_eq!(result, Err(CoreError::StoreUnavailable));
        assert_eq!(repo.calls(), vec![Call::All]);
    }

    #[tokio::test]
    async fn test_get_by_id_calls_underlying_repository() {
        let repo = RecordingRepository::with(Some(sample()));
        let result = controller(&repo).get_by_id(1).await.unwrap();

        assert_eq!(result, Transaction::new(1, "Demo1", -1));
        assert_eq!(repo.calls(), vec![Call::Get(1)]);
    }

    #[tokio::test]
    async fn test_get_by_id_every_present_id() {
        let repo = RecordingRepository::with(Some(sample()));
        let controller = controller(&repo);
        for expected in sample() {
            let result = controller.get_by_id(expected.id).await.unwrap();
            assert_eq!(result, expected);
        }
    }

    #[tokio::test]
    async fn test_get_by_id_missing_is_not_found() {
        let repo = RecordingRepository::with(Some(sample()));
        let result = controller(&repo).get_by_id(5).await;

        assert_eq!(result, Err(CoreError::TransactionNotFound { id: 5 }));
        assert_eq!(repo.calls(), vec![Call::Get(5)]);
    }

    #[tokio::test]
    async fn test_get_by_id_empty_repository_is_not_found() {
        let repo = RecordingRepository::with(Some(Vec::new()));
        let result = controller(&repo).get_by_id(0).await;

        assert_eq!(result, Err(CoreError::TransactionNotFound { id: 0 }));
    }

    #[tokio::test]
    async fn test_get_by_id_unavailable_repository() {
        let repo = RecordingRepository::with(None);
        let result = controller(&repo).get_by_id(0).await;

        assert_eq!(result, Err(CoreError::StoreUnavailable));
    }

    #[tokio::test]
    async fn test_create_adds_then_returns_everything() {
        let repo = RecordingRepository::with(Some(sample()));
        let draft = Transaction::draft("Demo5", 599);
        let result = controller(&repo).create(draft.clone()).await.unwrap();

        assert_eq!(repo.calls(), vec![Call::Add(draft), Call::All]);
        assert_eq!(result.len(), 6);
        assert_eq!(result[5], Transaction::new(5, "Demo5", 599));
        assert_eq!(&result[..5], &sample()[..]);
    }

    #[tokio::test]
    async fn test_create_into_empty_repository() {
        let repo = RecordingRepository::with(Some(Vec::new()));
        let result = controller(&repo)
            .create(Transaction::draft("Demo5", 599))
            .await
            .unwrap();

        assert_eq!(result, vec![Transaction::new(0, "Demo5", 599)]);
    }

    #[tokio::test]
    async fn test_create_unavailable_repository_skips_read() {
        let repo = RecordingRepository::with(None);
        let draft = Transaction::draft("Demo5", 599);
        let result = controller(&repo).create(draft.clone()).await;

        assert_eq!(result, Err(CoreError::StoreUnavailable));
        assert_eq!(repo.calls(), vec![Call::Add(draft)]);
    }
}
