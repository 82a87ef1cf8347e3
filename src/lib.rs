pub mod features;
pub mod shared;

use features::expenses::{ExpenseApiClient, ExpenseScreen, ScreenMode};
use log::info;
use shared::config::environment::{
    initialize_logging_system, load_environment_variables, ApiConfig,
};
use shared::errors::AppResult;
use std::sync::Arc;

/// アプリケーションを初期化し、API設定を解決する
///
/// # 処理内容
/// 1. 環境変数の読み込み（開発環境では.envファイル）
/// 2. ログシステムの初期化
/// 3. API設定の読み込みと検証（起動時に一度だけ行う）
pub fn initialize() -> AppResult<ApiConfig> {
    load_environment_variables();
    initialize_logging_system();

    let config = ApiConfig::from_env();
    config.validate()?;

    info!("アプリケーション初期化が完了しました: api={}", config.base_url);
    Ok(config)
}

/// HTTPバックエンドに接続した経費入力画面を作成する
///
/// # 引数
/// * `config` - 起動時に解決したAPI設定
/// * `mode` - 画面の構成
pub fn create_screen(config: ApiConfig, mode: ScreenMode) -> AppResult<ExpenseScreen> {
    let user_id = config.user_id.clone();
    let backend = ExpenseApiClient::new(config)?;
    Ok(ExpenseScreen::new(Arc::new(backend), mode, user_id))
}
