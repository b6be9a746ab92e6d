use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::{fs, sync::Mutex};

use super::AccountRepository;
use crate::models::Account;

/// Accounts persisted as a JSON array in a single file.
///
/// The whole file is rewritten after each registration. A failed write is
/// logged and the account stays registered in memory.
pub struct FileAccountRepository {
    path: PathBuf,
    accounts: Mutex<HashMap<String, Account>>,
}

impl FileAccountRepository {
    /// Load accounts from `path`, starting empty (and creating the file) when
    /// it is missing or unreadable
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let accounts = match Self::load(&path).await {
            Ok(accounts) => {
                tracing::info!(
                    "Loaded {} accounts from {}",
                    accounts.len(),
                    path.display()
                );
                accounts
            }
            Err(e) => {
                tracing::info!(
                    "Account file {} not usable ({:#}), creating an empty one",
                    path.display(),
                    e
                );
                let accounts = HashMap::new();
                Self::save(&path, &accounts).await?;
                accounts
            }
        };

        Ok(Self {
            path,
            accounts: Mutex::new(accounts),
        })
    }

    async fn load(path: &Path) -> Result<HashMap<String, Account>> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let list: Vec<Account> = serde_json::from_str(&content)
            .context("Account file is not a JSON account list")?;
        Ok(list
            .into_iter()
            .map(|account| (account.user_name.clone(), account))
            .collect())
    }

    async fn save(path: &Path, accounts: &HashMap<String, Account>) -> Result<()> {
        let mut list: Vec<&Account> = accounts.values().collect();
        list.sort_by(|a, b| a.user_name.cmp(&b.user_name));
        let json = serde_json::to_string_pretty(&list)?;
        fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[async_trait]
impl AccountRepository for FileAccountRepository {
    async fn add_account(&self, account: Account) -> bool {
        let mut accounts = self.accounts.lock().await;
        if accounts.contains_key(&account.user_name) {
            return false;
        }
        accounts.insert(account.user_name.clone(), account);

        if let Err(e) = Self::save(&self.path, &accounts).await {
            tracing::error!("Failed to persist accounts: {:#}", e);
        }
        true
    }

    async fn is_present(&self, user_name: &str) -> bool {
        self.accounts.lock().await.contains_key(user_name)
    }

    async fn is_valid(&self, user_name: &str, password: &str) -> bool {
        self.accounts
            .lock()
            .await
            .get(user_name)
            .is_some_and(|account| account.matches_password(password))
    }
}
