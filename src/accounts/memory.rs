use async_trait::async_trait;
use dashmap::{mapref::entry::Entry, DashMap};

use super::AccountRepository;
use crate::models::Account;

/// Accounts kept only for the life of the process
#[derive(Default)]
pub struct InMemoryAccountRepository {
    accounts: DashMap<String, Account>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn add_account(&self, account: Account) -> bool {
        match self.accounts.entry(account.user_name.clone()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(account);
                true
            }
        }
    }

    async fn is_present(&self, user_name: &str) -> bool {
        self.accounts.contains_key(user_name)
    }

    async fn is_valid(&self, user_name: &str, password: &str) -> bool {
        self.accounts
            .get(user_name)
            .is_some_and(|account| account.matches_password(password))
    }
}
