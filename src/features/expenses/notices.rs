use crate::shared::errors::AppError;
use serde::{Deserialize, Serialize};

/// 通知の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// 画面に表示するユーザー向け通知
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// エラーから通知を作成する
    ///
    /// バリデーションエラーは内容をそのまま表示し、
    /// それ以外は操作ごとの汎用メッセージを表示する
    pub fn from_error(error: &AppError, fallback_message: &str) -> Self {
        if error.is_validation() {
            Self::error("入力エラー", error.user_message())
        } else {
            Self::error("エラー", fallback_message)
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_shows_its_message() {
        let notice = Notice::from_error(&AppError::validation("カテゴリは必須項目です"), "汎用");
        assert!(notice.is_error());
        assert_eq!(notice.message, "カテゴリは必須項目です");
    }

    #[test]
    fn test_backend_error_shows_generic_message() {
        let error = AppError::external_service("expenses", "HTTP 500 - detail");
        let notice = Notice::from_error(&error, "経費を保存できませんでした");
        assert_eq!(notice.message, "経費を保存できませんでした");
        assert!(!notice.message.contains("HTTP 500"));
    }
}
