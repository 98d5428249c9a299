//! UseCase: アカウント作成処理

use std::sync::Arc;

use crate::domain::{NewUser, UserDirectory, UserRecord};

use super::error::SignupError;

/// ユーザーディレクトリ経由でアカウントを作成するユースケース
///
/// fire-and-forget のイベント intent と異なり、ここでの失敗は呼び出し元に
/// 返ります。ユーザー名の重複はユーザーに見える独立したエラーです。
pub struct SignupUseCase {
    directory: Arc<dyn UserDirectory>,
}

impl SignupUseCase {
    pub fn new(directory: Arc<dyn UserDirectory>) -> Self {
        Self { directory }
    }

    /// signup を実行
    ///
    /// # Errors
    ///
    /// * `MissingFields` - 必須フィールドが空
    /// * `UsernameTaken` - ユーザー名がディレクトリに登録済み
    pub async fn execute(&self, user: NewUser) -> Result<UserRecord, SignupError> {
        if !user.is_complete() {
            return Err(SignupError::MissingFields);
        }

        let record = self.directory.create(user).await?;
        tracing::info!("Created account '{}'", record.username);
        Ok(record)
    }
}
