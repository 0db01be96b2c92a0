//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    /// データベースがJSONとして読めない
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Database;

    #[test]
    fn test_truncated_database_is_json_error() {
        let error = Database::from_json_str("{\"/d/2023/s/a/f.h5\": {").unwrap_err();
        assert!(matches!(error, Error::Json(_)));
        assert!(format!("{}", error).starts_with("JSON error"));
    }

    #[test]
    fn test_non_object_database_is_json_error() {
        let error = Database::from_json_str("[1, 2, 3]").unwrap_err();
        assert!(matches!(error, Error::Json(_)));
    }
}
