use crate::shared::utils::format_amount;
use serde::{Deserialize, Serialize};

/// 経費データモデル（APIサーバーが保持する永続化済みの経費）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Expense {
    pub id: i64,
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
    /// 領収書URL（添付機能は未実装のため常にnull）
    pub receipt_url: Option<String>,
    pub user_id: String,
    /// サーバー側で付与される登録日時
    pub date: String,
}

/// 経費作成用DTO
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CreateExpenseDto {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub user_id: String,
    /// 添付機能は未実装。常に明示的なnullとして送信する
    pub receipt_url: Option<String>,
}

/// テキスト解析リクエスト
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// 解析結果の金額（通常は数値、文字列で返された場合もそのまま受け付ける）
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum AnalyzedAmount {
    Number(f64),
    Text(String),
}

impl AnalyzedAmount {
    /// 金額入力欄に表示するテキストに変換する
    pub fn to_input_text(&self) -> String {
        match self {
            AnalyzedAmount::Number(amount) => format_amount(*amount),
            AnalyzedAmount::Text(text) => text.clone(),
        }
    }
}

/// テキスト解析結果（含まれるフィールドのみ下書きに反映する）
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AnalysisResult {
    #[serde(default)]
    pub amount: Option<AnalyzedAmount>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// ヘルスチェックのレスポンス
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_deserialization() {
        let json = r#"{
            "id": 7,
            "amount": 12.5,
            "category": "Comida",
            "description": null,
            "receipt_url": null,
            "user_id": "usuario_prueba_movil",
            "date": "2025-01-10T13:45:00"
        }"#;

        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.id, 7);
        assert_eq!(expense.amount, 12.5);
        assert_eq!(expense.description, None);
        assert_eq!(expense.date, "2025-01-10T13:45:00");
    }

    #[test]
    fn test_create_expense_dto_sends_explicit_null_receipt() {
        let dto = CreateExpenseDto {
            amount: 45.0,
            category: "Comida".to_string(),
            description: String::new(),
            user_id: "usuario_prueba_movil".to_string(),
            receipt_url: None,
        };

        let json: serde_json::Value = serde_json::to_value(&dto).unwrap();
        assert!(json["amount"].is_number());
        assert_eq!(json["amount"].as_f64(), Some(45.0));
        assert!(json.as_object().unwrap().contains_key("receipt_url"));
        assert!(json["receipt_url"].is_null());
    }

    #[test]
    fn test_analysis_result_partial() {
        let result: AnalysisResult = serde_json::from_str(r#"{"category": "Ocio"}"#).unwrap();
        assert_eq!(result.amount, None);
        assert_eq!(result.category, Some("Ocio".to_string()));
        assert_eq!(result.description, None);
    }

    #[test]
    fn test_analyzed_amount_number_and_text() {
        let result: AnalysisResult = serde_json::from_str(r#"{"amount": 45}"#).unwrap();
        assert_eq!(result.amount.unwrap().to_input_text(), "45");

        let result: AnalysisResult = serde_json::from_str(r#"{"amount": "12,50"}"#).unwrap();
        assert_eq!(result.amount.unwrap().to_input_text(), "12,50");
    }

    #[test]
    fn test_health_status() {
        let status: HealthStatus = serde_json::from_str(r#"{"status": "ok"}"#).unwrap();
        assert!(status.is_ok());
    }
}
