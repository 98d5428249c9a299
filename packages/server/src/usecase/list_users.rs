//! UseCase: 会話相手ピッカー向けのディレクトリ一覧処理

use std::sync::Arc;

use crate::domain::{DirectoryError, UserDirectory, UserRecord};

/// 呼び出し元を除く全アカウントをユーザー名順で一覧するユースケース
pub struct ListUsersUseCase {
    directory: Arc<dyn UserDirectory>,
}

impl ListUsersUseCase {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    pub async fn execute(
        &self,
        exclude_username: Option<&str>,
    ) -> Result<Vec<UserRecord>, DirectoryError> {
        self.directory.list_except(exclude_username).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewUser;
    use crate::infrastructure::repository::InMemoryUserDirectory;
    use idobata_shared::time::FixedClock;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            firstname: "F".to_string(),
            lastname: "L".to_string(),
            password: "pw".to_string(),
        }
    }

    #[tokio::test]
    async fn test_list_excludes_caller_and_sorts() {
        // テスト項目: 呼び出し元を除外した昇順一覧が返る
        let directory = Arc::new(InMemoryUserDirectory::new(Arc::new(FixedClock::new(0))));
        for name in ["carol", "alice", "bob"] {
            directory.create(new_user(name)).await.unwrap();
        }
        let usecase = ListUsersUseCase::new(directory);

        let users = usecase.execute(Some("bob")).await.unwrap();

        let names: Vec<&str> = users.iter().map(|u| u.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "carol"]);
    }
}
