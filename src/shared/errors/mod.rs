use thiserror::Error;

/// アプリケーション全体で使用される統一エラー型
#[derive(Debug, Error)]
pub enum AppError {
    /// 入力値の検証エラー（ネットワーク通信は行われない）
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// APIサーバーとの通信エラー（タイムアウト・サーバーエラー・不正なレスポンス）
    #[error("外部サービスエラー: {0}")]
    ExternalService(String),

    /// 設定関連のエラー
    #[error("設定エラー: {0}")]
    Configuration(String),

    /// JSON解析エラー
    #[error("JSON解析エラー: {0}")]
    Json(#[from] serde_json::Error),

    /// 共有状態のロック取得などの並行処理エラー
    #[error("並行処理エラー: {0}")]
    Concurrency(String),
}

/// エラーの重要度を表す列挙型
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorSeverity {
    /// 低重要度（ユーザー入力エラーなど）
    Low,
    /// 中重要度（外部サービス一時的エラーなど）
    Medium,
    /// 高重要度（設定不備など）
    High,
}

impl AppError {
    /// ユーザーに表示するためのフレンドリーなメッセージを取得
    ///
    /// 通信エラーはタイムアウト・サーバーエラー・不正なレスポンスを区別せず、
    /// 同じ汎用メッセージになる
    pub fn user_message(&self) -> &str {
        match self {
            AppError::Validation(msg) => msg,
            AppError::ExternalService(_) => "サーバーとの通信でエラーが発生しました",
            AppError::Configuration(_) => "設定エラーが発生しました",
            AppError::Json(_) => "データ形式の解析でエラーが発生しました",
            AppError::Concurrency(_) => "並行処理でエラーが発生しました",
        }
    }

    /// エラーの詳細情報を取得（ログ出力用）
    pub fn details(&self) -> String {
        format!("{self}")
    }

    /// エラーの重要度を取得
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AppError::Validation(_) => ErrorSeverity::Low,
            AppError::ExternalService(_) => ErrorSeverity::Medium,
            AppError::Configuration(_) => ErrorSeverity::High,
            AppError::Json(_) => ErrorSeverity::Medium,
            AppError::Concurrency(_) => ErrorSeverity::High,
        }
    }

    /// ローカルバリデーションエラーかどうか
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// バリデーションエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `message` - バリデーションエラーメッセージ
    ///
    /// # 戻り値
    /// バリデーションエラー
    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    /// 外部サービスエラーを作成するヘルパー関数
    ///
    /// # 引数
    /// * `service` - サービス名
    /// * `message` - エラーメッセージ
    ///
    /// # 戻り値
    /// 外部サービスエラー
    pub fn external_service<S: Into<String>>(service: S, message: S) -> Self {
        AppError::ExternalService(format!("{}: {}", service.into(), message.into()))
    }

    /// 設定エラーを作成するヘルパー関数
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    /// 並行処理エラーを作成するヘルパー関数
    pub fn concurrency<S: Into<String>>(message: S) -> Self {
        AppError::Concurrency(message.into())
    }
}

/// reqwest::ErrorからAppErrorへの変換
impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            AppError::ExternalService(format!("APIサーバーからの応答がタイムアウトしました: {error}"))
        } else if error.is_decode() {
            AppError::ExternalService(format!("レスポンス解析エラー: {error}"))
        } else {
            AppError::ExternalService(format!("APIサーバーへの接続に失敗しました: {error}"))
        }
    }
}

/// Result型のエイリアス（アプリケーション全体で使用）
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        // 各エラータイプの重要度をテスト
        assert_eq!(
            AppError::validation("テスト").severity(),
            ErrorSeverity::Low
        );
        assert_eq!(
            AppError::external_service("analyze", "接続失敗").severity(),
            ErrorSeverity::Medium
        );
        assert_eq!(
            AppError::configuration("API_SERVER_URL不正").severity(),
            ErrorSeverity::High
        );
        assert_eq!(
            AppError::concurrency("ロック失敗").severity(),
            ErrorSeverity::High
        );
    }

    #[test]
    fn test_user_message() {
        // バリデーションエラーはメッセージをそのまま表示する
        let validation_error = AppError::validation("金額を入力してください");
        assert_eq!(validation_error.user_message(), "金額を入力してください");

        // 通信エラーは詳細を隠して汎用メッセージにする
        let external_error = AppError::external_service("expenses", "500 Internal Server Error");
        assert_eq!(
            external_error.user_message(),
            "サーバーとの通信でエラーが発生しました"
        );
    }

    #[test]
    fn test_external_service_details_keep_cause() {
        let error = AppError::external_service("analyze", "タイムアウト");
        assert!(matches!(error, AppError::ExternalService(_)));
        assert!(error.details().contains("analyze: タイムアウト"));
    }

    #[test]
    fn test_json_error_conversion() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{invalid").unwrap_err();
        let error: AppError = parse_error.into();
        assert!(matches!(error, AppError::Json(_)));
        assert!(!error.is_validation());
    }
}
