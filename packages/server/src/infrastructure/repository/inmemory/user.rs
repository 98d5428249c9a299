//! InMemory UserDirectory 実装
//!
//! ドメイン層が定義する UserDirectory trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。資格情報は平文のまま照合
//! します（本番のストア実装に差し替える際の seam はこの trait）。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{DirectoryError, NewUser, Timestamp, UserDirectory, UserRecord};
use idobata_shared::time::Clock;

/// In-memory user directory keyed by username.
pub struct InMemoryUserDirectory {
    users: Mutex<HashMap<String, UserRecord>>,
    clock: Arc<dyn Clock>,
}

impl InMemoryUserDirectory {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            clock,
        }
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn create(&self, user: NewUser) -> Result<UserRecord, DirectoryError> {
        if !user.is_complete() {
            return Err(DirectoryError::MissingField);
        }

        let mut users = self.users.lock().await;
        if users.contains_key(&user.username) {
            return Err(DirectoryError::UsernameTaken(user.username));
        }

        let record = UserRecord {
            username: user.username.clone(),
            firstname: user.firstname,
            lastname: user.lastname,
            password: user.password,
            created_on: Timestamp::new(self.clock.now_jst_millis()),
        };
        users.insert(user.username, record.clone());
        Ok(record)
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        let users = self.users.lock().await;
        Ok(users
            .get(username)
            .filter(|record| record.password == password)
            .cloned())
    }

    async fn list_except(&self, exclude: Option<&str>) -> Result<Vec<UserRecord>, DirectoryError> {
        let users = self.users.lock().await;
        let mut records: Vec<UserRecord> = users
            .values()
            .filter(|record| Some(record.username.as_str()) != exclude)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(records)
    }
}
