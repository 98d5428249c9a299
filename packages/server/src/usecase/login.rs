//! UseCase: 資格情報検証処理

use std::sync::Arc;

use crate::domain::{DirectoryError, UserDirectory, UserRecord};

/// ユーザー名／パスワードの組をユーザーディレクトリと照合するユースケース
pub struct LoginUseCase {
    directory: Arc<dyn UserDirectory>,
}

impl LoginUseCase {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// login を実行。`Ok(None)` は資格情報の不一致を表す
    pub async fn execute(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, DirectoryError> {
        self.directory.find_by_credentials(username, password).await
    }
}
