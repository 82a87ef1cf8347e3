/// 共通モジュール
///
/// 機能モジュールから横断的に使用される設定・エラー・HTTPクライアント・ユーティリティ
pub mod api_client;
pub mod config;
pub mod errors;
pub mod utils;

#[cfg(test)]
pub mod test_support;
