/// 経費機能モジュール
///
/// このモジュールは経費入力画面に関連するすべての機能を提供します：
/// - 下書きの編集と送信前のバリデーション
/// - 自由記述テキストの解析結果による自動入力
/// - APIサーバー経由での経費の作成と一覧取得
/// - 操作ごとの実行状態と古いレスポンスの破棄
pub mod api_client;
pub mod draft;
pub mod models;
pub mod notices;
pub mod operations;
pub mod screen;


// 公開インターフェース：外部から使用可能な型と関数をエクスポート
pub use api_client::{list_expenses, newest_first, ExpenseApiClient, ExpenseBackend};
pub use draft::ExpenseDraft;
pub use models::{
    AnalysisResult, AnalyzeRequest, AnalyzedAmount, CreateExpenseDto, Expense, HealthStatus,
};
pub use notices::{Notice, NoticeLevel};
pub use operations::{Operation, OperationTracker, RequestToken};
pub use screen::{Completion, ExpenseScreen, ScreenMode};
