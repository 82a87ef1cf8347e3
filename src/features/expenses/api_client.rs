/// APIサーバー経由での経費操作
///
/// 経費の作成・一覧取得、自由記述テキストの解析、ヘルスチェックを行う。
/// 各操作は独立しており、呼び出し間で状態を持たない。
use crate::features::expenses::models::{
    AnalysisResult, AnalyzeRequest, CreateExpenseDto, Expense, HealthStatus,
};
use crate::shared::api_client::ApiClient;
use crate::shared::config::environment::ApiConfig;
use crate::shared::errors::AppResult;
use async_trait::async_trait;
use log::info;

const EXPENSES_ENDPOINT: &str = "/expenses/";
const ANALYZE_ENDPOINT: &str = "/analyze/";
const HEALTH_ENDPOINT: &str = "/health";

/// 経費バックエンドとの通信を抽象化するトレイト
#[async_trait]
pub trait ExpenseBackend: Send + Sync {
    /// 経費を作成し、サーバーが採番したレコードを返す
    async fn create_expense(&self, dto: &CreateExpenseDto) -> AppResult<Expense>;

    /// 経費一覧をサーバーの返却順のまま取得する
    async fn get_expenses(&self) -> AppResult<Vec<Expense>>;

    /// 自由記述テキストを解析し、金額・カテゴリ・説明の候補を返す
    async fn analyze_text(&self, text: &str) -> AppResult<AnalysisResult>;

    /// サーバーの稼働状態を確認する
    async fn check_health(&self) -> AppResult<HealthStatus>;
}

/// HTTP経由の経費バックエンド
#[derive(Debug, Clone)]
pub struct ExpenseApiClient {
    api_client: ApiClient,
}

impl ExpenseApiClient {
    pub fn new(config: ApiConfig) -> AppResult<Self> {
        Ok(Self {
            api_client: ApiClient::new(config)?,
        })
    }
}

#[async_trait]
impl ExpenseBackend for ExpenseApiClient {
    async fn create_expense(&self, dto: &CreateExpenseDto) -> AppResult<Expense> {
        let expense: Expense = self.api_client.post(EXPENSES_ENDPOINT, dto).await?;
        info!("経費作成成功: expense_id={}", expense.id);
        Ok(expense)
    }

    async fn get_expenses(&self) -> AppResult<Vec<Expense>> {
        let expenses: Vec<Expense> = self.api_client.get(EXPENSES_ENDPOINT).await?;
        info!("経費一覧取得成功: count={}", expenses.len());
        Ok(expenses)
    }

    async fn analyze_text(&self, text: &str) -> AppResult<AnalysisResult> {
        let request = AnalyzeRequest {
            text: text.to_string(),
        };
        let result: AnalysisResult = self.api_client.post(ANALYZE_ENDPOINT, &request).await?;
        info!(
            "テキスト解析成功: amount={}, category={}, description={}",
            result.amount.is_some(),
            result.category.is_some(),
            result.description.is_some()
        );
        Ok(result)
    }

    async fn check_health(&self) -> AppResult<HealthStatus> {
        self.api_client.get(HEALTH_ENDPOINT).await
    }
}

/// 経費一覧を取得し、新しいものが先頭に来るように並べ替える
///
/// サーバーの返却順（登録順）を反転するだけで、日付による並べ替えは行わない
pub async fn list_expenses(backend: &dyn ExpenseBackend) -> AppResult<Vec<Expense>> {
    let expenses = backend.get_expenses().await?;
    Ok(newest_first(expenses))
}

/// 登録順の一覧を新しい順に反転する
pub fn newest_first(mut expenses: Vec<Expense>) -> Vec<Expense> {
    expenses.reverse();
    expenses
}
