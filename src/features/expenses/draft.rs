use crate::features::expenses::models::{AnalysisResult, CreateExpenseDto};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{parse_amount, validate_required_field};

/// 入力中の経費の下書き
///
/// すべてのフィールドは入力欄のテキストをそのまま保持する。
/// 金額は送信時に初めて数値へ変換する。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseDraft {
    pub amount: String,
    pub category: String,
    pub description: String,
    /// テキスト解析の入力にのみ使う自由記述（送信はしない）
    pub natural_text: String,
}

impl ExpenseDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_natural_text(&mut self, natural_text: impl Into<String>) {
        self.natural_text = natural_text.into();
    }

    /// 保存ボタンを有効にできるかどうか（金額とカテゴリが入力済み）
    pub fn can_submit(&self) -> bool {
        !self.amount.is_empty() && !self.category.is_empty()
    }

    /// 下書きを検証し、経費作成リクエストに変換する
    ///
    /// # 引数
    /// * `user_id` - 付与するユーザーID
    ///
    /// # 戻り値
    /// 経費作成用DTO、または金額・カテゴリが不正な場合はバリデーションエラー
    pub fn to_create_request(&self, user_id: &str) -> AppResult<CreateExpenseDto> {
        if !self.can_submit() {
            return Err(AppError::validation("金額とカテゴリを入力してください"));
        }
        validate_required_field(&self.category, "カテゴリ")?;
        let amount = parse_amount(&self.amount)?;

        Ok(CreateExpenseDto {
            amount,
            category: self.category.clone(),
            description: self.description.clone(),
            user_id: user_id.to_string(),
            receipt_url: None,
        })
    }

    /// 解析結果を下書きに反映する
    ///
    /// 結果に含まれるフィールドのみ上書きし、含まれないフィールドはそのまま残す
    pub fn apply_analysis(&mut self, result: &AnalysisResult) {
        if let Some(amount) = &result.amount {
            self.amount = amount.to_input_text();
        }
        if let Some(category) = &result.category {
            self.category = category.clone();
        }
        if let Some(description) = &result.description {
            self.description = description.clone();
        }
    }

    /// すべてのフィールドを空にする（自由記述を含む）
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
