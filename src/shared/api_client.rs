/// 汎用APIクライアント
///
/// APIサーバーとの通信を行う汎用的なクライアント。
/// 経費・テキスト解析・ヘルスチェックの各エンドポイントで使用する。
/// リトライは行わず、失敗はそのまま呼び出し元に返す。
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::{AppError, AppResult};
use log::{debug, info, warn};
use reqwest::{Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;

/// APIサーバーからのエラーレスポンス（`{"detail": ...}`形式）
///
/// `detail`は文字列の場合と、入力検証エラーの配列の場合がある
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: serde_json::Value,
}

impl ErrorResponse {
    /// ログ出力用にdetailを1行の文字列にする
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// 汎用APIクライアント
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    config: ApiConfig,
}

impl ApiClient {
    /// 設定を指定してAPIクライアントを作成
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::configuration(format!("HTTPクライアント初期化失敗: {e}")))?;

        Ok(Self { client, config })
    }

    /// クライアントの設定を取得
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// GETリクエストを送信
    pub async fn get<T>(&self, endpoint: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        info!("GETリクエスト送信: endpoint={endpoint}");

        let request = self.client.get(&url);
        self.send_request(request, "GET", endpoint).await
    }

    /// POSTリクエストを送信
    pub async fn post<B, T>(&self, endpoint: &str, body: &B) -> AppResult<T>
    where
        B: Serialize,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(endpoint);
        info!("POSTリクエスト送信: endpoint={endpoint}");

        let request = self.client.post(&url).json(body);
        self.send_request(request, "POST", endpoint).await
    }

    /// リクエストを送信し、成功時はレスポンスボディをデシリアライズする
    async fn send_request<T>(
        &self,
        request: RequestBuilder,
        method: &str,
        endpoint: &str,
    ) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        let response = request.send().await.map_err(|e| {
            warn!("{method}リクエスト失敗: endpoint={endpoint}, error={e}");
            AppError::from(e)
        })?;

        if !response.status().is_success() {
            let message = self.handle_error_response(response).await;
            return Err(AppError::external_service(endpoint.to_string(), message));
        }

        let result: T = response.json().await.map_err(|e| {
            warn!("{method}レスポンス解析エラー: endpoint={endpoint}, error={e}");
            AppError::ExternalService(format!("レスポンス解析エラー: {e}"))
        })?;

        info!("{method}リクエスト成功: endpoint={endpoint}");
        Ok(result)
    }

    /// エラーレスポンスを処理し、ログ出力用のメッセージを返す
    async fn handle_error_response(&self, response: Response) -> String {
        let status_code = response.status().as_u16();

        let response_text = response
            .text()
            .await
            .unwrap_or_else(|_| "レスポンス読み取り失敗".to_string());

        if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&response_text) {
            let message = error_response.message();
            debug!("APIサーバーから構造化エラーレスポンスを受信: status={status_code}, detail={message}");
            return format!("HTTP {status_code} - {message}");
        }

        warn!("APIサーバーから非構造化エラーレスポンス: status={status_code}, body={response_text}");
        format!("HTTP {status_code} - {}", describe_status(status_code))
    }
}

/// HTTPステータスコードを説明文に変換する
fn describe_status(status_code: u16) -> &'static str {
    match status_code {
        400 => "リクエストの形式が正しくありません",
        404 => "指定されたリソースが見つかりません",
        405 => "許可されていないメソッドです",
        422 => "リクエストの内容を処理できません",
        429 => "リクエストが多すぎます",
        500 => "サーバー内部エラーが発生しました",
        502 => "APIサーバーとの通信でエラーが発生しました",
        503 => "APIサーバーが一時的に利用できません",
        504 => "APIサーバーからの応答がタイムアウトしました",
        _ => "不明なエラーが発生しました",
    }
}
