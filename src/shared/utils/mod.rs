use crate::shared::errors::{AppError, AppResult};

/// 必須フィールドのバリデーション
///
/// # 引数
/// * `text` - 検証対象の文字列
/// * `field_name` - フィールド名（エラーメッセージ用）
///
/// # 戻り値
/// 空でない場合はOk(())、空または空白のみの場合はエラー
pub fn validate_required_field(text: &str, field_name: &str) -> AppResult<()> {
    if text.trim().is_empty() {
        return Err(AppError::validation(format!("{field_name}は必須項目です")));
    }
    Ok(())
}

/// 金額入力テキストを数値に変換する
///
/// # 引数
/// * `text` - 入力された金額（例: "45", "12.50", "12,50"）
///
/// # 戻り値
/// 有限の数値に変換できた場合はその値、できない場合はバリデーションエラー
///
/// # 変換規則
/// - 前後の空白は無視する
/// - 小数点としてカンマも受け付ける（数値キーボードのロケール差異）
/// - 範囲チェックは行わない
pub fn parse_amount(text: &str) -> AppResult<f64> {
    let normalized = text.trim().replace(',', ".");

    let amount: f64 = normalized
        .parse()
        .map_err(|_| AppError::validation(format!("金額を数値として解釈できません: {text}")))?;

    if !amount.is_finite() {
        return Err(AppError::validation(format!("無効な金額です: {text}")));
    }

    Ok(amount)
}

/// 数値の金額を入力欄に表示するテキストに変換する
///
/// 整数値は小数点なしで表示する（45.0 → "45"、12.5 → "12.5"）
pub fn format_amount(amount: f64) -> String {
    amount.to_string()
}
