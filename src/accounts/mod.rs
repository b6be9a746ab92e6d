//! Account directory adapters consumed by the game service.

pub mod file;
pub mod memory;

use async_trait::async_trait;

use crate::models::Account;

pub use file::FileAccountRepository;
pub use memory::InMemoryAccountRepository;

/// Storage of registered accounts
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Store `account` unless its user name is already taken.
    /// Returns whether the account was inserted.
    async fn add_account(&self, account: Account) -> bool;

    async fn is_present(&self, user_name: &str) -> bool;

    /// True when `user_name` exists and `password` matches
    async fn is_valid(&self, user_name: &str, password: &str) -> bool;
}
