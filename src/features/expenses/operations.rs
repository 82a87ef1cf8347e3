/// 画面から発行される非同期操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// 自由記述テキストの解析
    Interpret,
    /// 経費の保存
    Save,
    /// 経費一覧の再取得
    Refresh,
}

/// 発行したリクエストを識別するトークン
///
/// 操作ごとに単調増加する世代番号を持つ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    pub operation: Operation,
    pub generation: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct OperationState {
    latest: u64,
    in_flight: bool,
}

/// 操作ごとの実行中フラグと最新リクエストの世代を管理する
///
/// 完了したレスポンスは、そのトークンが最新の場合のみ反映してよい。
/// 古いリクエストの完了は最新リクエストの実行中フラグに影響しない。
#[derive(Debug, Default)]
pub struct OperationTracker {
    interpret: OperationState,
    save: OperationState,
    refresh: OperationState,
}

impl OperationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self, operation: Operation) -> &OperationState {
        match operation {
            Operation::Interpret => &self.interpret,
            Operation::Save => &self.save,
            Operation::Refresh => &self.refresh,
        }
    }

    fn state_mut(&mut self, operation: Operation) -> &mut OperationState {
        match operation {
            Operation::Interpret => &mut self.interpret,
            Operation::Save => &mut self.save,
            Operation::Refresh => &mut self.refresh,
        }
    }

    /// 新しいリクエストを発行し、そのトークンを返す
    pub fn begin(&mut self, operation: Operation) -> RequestToken {
        let state = self.state_mut(operation);
        state.latest += 1;
        state.in_flight = true;

        RequestToken {
            operation,
            generation: state.latest,
        }
    }

    /// リクエストの完了を記録する
    ///
    /// # 戻り値
    /// トークンが最新の場合はtrue（結果を反映してよい）、古い場合はfalse
    pub fn finish(&mut self, token: RequestToken) -> bool {
        let state = self.state_mut(token.operation);
        if state.latest != token.generation {
            return false;
        }
        state.in_flight = false;
        true
    }

    /// トークンが最新のリクエストを指しているかどうか
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.state(token.operation).latest == token.generation
    }

    /// 操作が実行中かどうか
    pub fn is_in_flight(&self, operation: Operation) -> bool {
        self.state(operation).in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_issues_monotonic_tokens() {
        let mut tracker = OperationTracker::new();
        let first = tracker.begin(Operation::Interpret);
        let second = tracker.begin(Operation::Interpret);

        assert!(second.generation > first.generation);
        assert!(!tracker.is_current(first));
        assert!(tracker.is_current(second));
    }

    #[test]
    fn test_idle_in_flight_idle() {
        let mut tracker = OperationTracker::new();
        assert!(!tracker.is_in_flight(Operation::Save));

        let token = tracker.begin(Operation::Save);
        assert!(tracker.is_in_flight(Operation::Save));

        assert!(tracker.finish(token));
        assert!(!tracker.is_in_flight(Operation::Save));
    }

    #[test]
    fn test_stale_completion_is_rejected() {
        let mut tracker = OperationTracker::new();
        let stale = tracker.begin(Operation::Refresh);
        let latest = tracker.begin(Operation::Refresh);

        assert!(!tracker.finish(stale));
        // 最新のリクエストはまだ実行中
        assert!(tracker.is_in_flight(Operation::Refresh));

        assert!(tracker.finish(latest));
        assert!(!tracker.is_in_flight(Operation::Refresh));
    }

    #[test]
    fn test_operations_are_independent() {
        let mut tracker = OperationTracker::new();
        let interpret = tracker.begin(Operation::Interpret);
        let save = tracker.begin(Operation::Save);

        assert_eq!(interpret.generation, 1);
        assert_eq!(save.generation, 1);
        assert!(!tracker.is_in_flight(Operation::Refresh));

        assert!(tracker.finish(save));
        assert!(tracker.is_in_flight(Operation::Interpret));
    }
}
