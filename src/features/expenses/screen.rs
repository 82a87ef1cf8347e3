/// 経費入力画面のコントローラー
///
/// 下書き・取得済みの経費一覧・操作ごとの実行状態・通知キューを保持し、
/// 下書きの検証とバックエンドへの各リクエストを結び付ける。
/// 共有状態のロックは`.await`をまたいで保持しない。
use crate::features::expenses::api_client::{list_expenses, ExpenseBackend};
use crate::features::expenses::draft::ExpenseDraft;
use crate::features::expenses::models::Expense;
use crate::features::expenses::notices::Notice;
use crate::features::expenses::operations::{Operation, OperationTracker};
use crate::shared::errors::{AppError, AppResult};
use log::{debug, error, info, warn};
use std::sync::{Arc, Mutex, MutexGuard};

const INTERPRET_FAILED_MESSAGE: &str = "テキストを解析できませんでした";
const SAVE_FAILED_MESSAGE: &str = "経費を保存できませんでした。もう一度お試しください";
const REFRESH_FAILED_MESSAGE: &str = "経費一覧を取得できませんでした";

/// 画面の構成（リリースごとの画面バリエーション）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenMode {
    /// 入力フォームのみ
    PlainForm,
    /// 入力フォーム + テキスト解析による自動入力
    AssistedForm,
    /// 入力フォーム + テキスト解析 + 履歴一覧
    FormWithHistory,
}

impl ScreenMode {
    pub fn supports_interpretation(self) -> bool {
        !matches!(self, ScreenMode::PlainForm)
    }

    pub fn shows_history(self) -> bool {
        matches!(self, ScreenMode::FormWithHistory)
    }
}

/// 非同期操作の完了結果
#[derive(Debug, Clone, PartialEq)]
pub enum Completion<T> {
    /// 結果を画面に反映した
    Applied(T),
    /// より新しいリクエストがあるため結果を破棄した
    Stale,
}

impl<T> Completion<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Completion::Applied(_))
    }
}

#[derive(Debug, Default)]
struct ScreenState {
    draft: ExpenseDraft,
    expenses: Vec<Expense>,
    operations: OperationTracker,
    notices: Vec<Notice>,
    /// 保存成功で下書きをクリアするたびに進む
    draft_epoch: u64,
}

/// 経費入力画面
pub struct ExpenseScreen {
    backend: Arc<dyn ExpenseBackend>,
    mode: ScreenMode,
    user_id: String,
    state: Mutex<ScreenState>,
}

impl ExpenseScreen {
    /// 画面を作成する
    ///
    /// # 引数
    /// * `backend` - 経費バックエンド
    /// * `mode` - 画面の構成
    /// * `user_id` - 経費に付与するユーザーID
    pub fn new(
        backend: Arc<dyn ExpenseBackend>,
        mode: ScreenMode,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            mode,
            user_id: user_id.into(),
            state: Mutex::new(ScreenState::default()),
        }
    }

    pub fn mode(&self) -> ScreenMode {
        self.mode
    }

    fn lock_state(&self) -> AppResult<MutexGuard<'_, ScreenState>> {
        self.state
            .lock()
            .map_err(|e| AppError::concurrency(format!("画面状態のロック取得に失敗しました: {e}")))
    }

    /// 下書きを編集する
    pub fn edit_draft<F>(&self, edit: F) -> AppResult<()>
    where
        F: FnOnce(&mut ExpenseDraft),
    {
        let mut state = self.lock_state()?;
        edit(&mut state.draft);
        Ok(())
    }

    pub fn set_amount(&self, amount: &str) -> AppResult<()> {
        self.edit_draft(|draft| draft.set_amount(amount))
    }

    pub fn set_category(&self, category: &str) -> AppResult<()> {
        self.edit_draft(|draft| draft.set_category(category))
    }

    pub fn set_description(&self, description: &str) -> AppResult<()> {
        self.edit_draft(|draft| draft.set_description(description))
    }

    pub fn set_natural_text(&self, natural_text: &str) -> AppResult<()> {
        self.edit_draft(|draft| draft.set_natural_text(natural_text))
    }

    /// 現在の下書きのコピーを取得する
    pub fn draft(&self) -> AppResult<ExpenseDraft> {
        Ok(self.lock_state()?.draft.clone())
    }

    /// 表示中の経費一覧（新しい順）のコピーを取得する
    pub fn expenses(&self) -> AppResult<Vec<Expense>> {
        Ok(self.lock_state()?.expenses.clone())
    }

    /// 操作が実行中かどうか（実行中は該当するボタンのみ無効にする）
    pub fn is_busy(&self, operation: Operation) -> AppResult<bool> {
        Ok(self.lock_state()?.operations.is_in_flight(operation))
    }

    /// 保存ボタンを有効にできるかどうか
    pub fn can_save(&self) -> AppResult<bool> {
        let state = self.lock_state()?;
        Ok(state.draft.can_submit() && !state.operations.is_in_flight(Operation::Save))
    }

    /// 溜まっている通知を取り出す
    pub fn take_notices(&self) -> AppResult<Vec<Notice>> {
        Ok(std::mem::take(&mut self.lock_state()?.notices))
    }

    fn push_notice(&self, notice: Notice) -> AppResult<()> {
        self.lock_state()?.notices.push(notice);
        Ok(())
    }

    /// ローカルバリデーションエラーを通知し、そのまま返す
    fn reject(&self, error: AppError) -> AppError {
        warn!("入力エラーのため送信しません: {error}");
        if let Err(e) = self.push_notice(Notice::from_error(&error, error.user_message())) {
            error!("通知の追加に失敗しました: {e}");
        }
        error
    }

    /// 画面の初期読み込み
    ///
    /// サーバーの稼働状態をログに記録し、履歴表示がある場合は一覧を取得する
    pub async fn load(&self) -> AppResult<()> {
        match self.backend.check_health().await {
            Ok(status) if status.is_ok() => info!("APIサーバー稼働確認: status={}", status.status),
            Ok(status) => warn!("APIサーバーの状態が異常です: status={}", status.status),
            Err(e) => warn!("APIサーバーのヘルスチェックに失敗しました: {e}"),
        }

        if self.mode.shows_history() {
            self.refresh_expenses().await?;
        }
        Ok(())
    }

    /// 自由記述テキストを解析し、結果を下書きに反映する
    ///
    /// # 戻り値
    /// 反映した場合は`Completion::Applied`、より新しい解析リクエストがあるか
    /// 解析中に保存が完了して下書きがクリアされた場合は`Completion::Stale`
    ///
    /// # エラー
    /// テキストが空の場合はバリデーションエラー（通信は行わない）。
    /// 通信に失敗した場合は下書きを変更せず、汎用の通知を出す。
    pub async fn interpret(&self) -> AppResult<Completion<()>> {
        let issued = {
            let mut state = self.lock_state()?;
            if !self.mode.supports_interpretation() {
                Err(AppError::validation("この画面ではテキスト解析を利用できません"))
            } else {
                let text = state.draft.natural_text.trim().to_string();
                if text.is_empty() {
                    Err(AppError::validation("解析するテキストを入力してください"))
                } else {
                    let token = state.operations.begin(Operation::Interpret);
                    Ok((token, text, state.draft_epoch))
                }
            }
        };
        let (token, text, epoch) = match issued {
            Ok(issued) => issued,
            Err(e) => return Err(self.reject(e)),
        };

        info!("テキスト解析開始: generation={}", token.generation);
        let result = self.backend.analyze_text(&text).await;

        let mut state = self.lock_state()?;
        if !state.operations.finish(token) {
            debug!("古い解析結果を破棄しました: generation={}", token.generation);
            return Ok(Completion::Stale);
        }

        match result {
            Ok(analysis) => {
                if state.draft_epoch != epoch {
                    debug!("保存済みの下書きに対する解析結果を破棄しました");
                    return Ok(Completion::Stale);
                }
                state.draft.apply_analysis(&analysis);
                Ok(Completion::Applied(()))
            }
            Err(e) => {
                error!("テキスト解析に失敗しました: {e}");
                state
                    .notices
                    .push(Notice::from_error(&e, INTERPRET_FAILED_MESSAGE));
                Err(e)
            }
        }
    }

    /// 下書きを検証して経費を保存する
    ///
    /// 成功した場合は採番されたIDを通知し、下書きをクリアして一覧を再取得する。
    /// 失敗した場合は下書きをそのまま残す（再入力なしで再試行できる）。
    ///
    /// # エラー
    /// 金額・カテゴリが不正な場合、または保存が実行中の場合はバリデーションエラー
    /// （通信は行わない）。
    pub async fn save(&self) -> AppResult<Expense> {
        let issued = {
            let mut state = self.lock_state()?;
            if state.operations.is_in_flight(Operation::Save) {
                Err(AppError::validation("保存処理を実行中です"))
            } else {
                state
                    .draft
                    .to_create_request(&self.user_id)
                    .map(|dto| (state.operations.begin(Operation::Save), dto))
            }
        };
        let (token, dto) = match issued {
            Ok(issued) => issued,
            Err(e) => return Err(self.reject(e)),
        };

        info!(
            "経費保存開始: amount={}, category={}",
            dto.amount, dto.category
        );
        let result = self.backend.create_expense(&dto).await;

        let expense = {
            let mut state = self.lock_state()?;
            state.operations.finish(token);
            match result {
                Ok(expense) => {
                    state.notices.push(Notice::info(
                        "保存しました",
                        format!("経費を登録しました（ID: {}）", expense.id),
                    ));
                    state.draft.clear();
                    state.draft_epoch += 1;
                    expense
                }
                Err(e) => {
                    error!("経費の保存に失敗しました: {e}");
                    state
                        .notices
                        .push(Notice::from_error(&e, SAVE_FAILED_MESSAGE));
                    return Err(e);
                }
            }
        };

        if self.mode.shows_history() {
            // 一覧の取得失敗は通知済み。保存自体は成功している
            if let Err(e) = self.refresh_expenses().await {
                warn!("保存後の一覧再取得に失敗しました: {e}");
            }
        }

        Ok(expense)
    }

    /// 経費一覧を再取得し、新しい順に表示する
    pub async fn refresh_expenses(&self) -> AppResult<Completion<usize>> {
        if !self.mode.shows_history() {
            return Err(self.reject(AppError::validation(
                "この画面では履歴を表示できません",
            )));
        }

        let token = self.lock_state()?.operations.begin(Operation::Refresh);
        let result = list_expenses(self.backend.as_ref()).await;

        let mut state = self.lock_state()?;
        if !state.operations.finish(token) {
            debug!("古い一覧取得結果を破棄しました: generation={}", token.generation);
            return Ok(Completion::Stale);
        }

        match result {
            Ok(expenses) => {
                let count = expenses.len();
                state.expenses = expenses;
                Ok(Completion::Applied(count))
            }
            Err(e) => {
                error!("経費一覧の取得に失敗しました: {e}");
                state
                    .notices
                    .push(Notice::from_error(&e, REFRESH_FAILED_MESSAGE));
                Err(e)
            }
        }
    }
}
