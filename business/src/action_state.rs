/// Lifecycle of one fire-and-settle request.
///
/// `Succeeded` and `Failed` are terminal until whoever owns the state consumes
/// them with [`AsyncActionState::take_settled`], which puts it back to `Idle`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AsyncActionState<T> {
    #[default]
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> AsyncActionState<T> {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    /// Moves to `Pending` unless a request is already outstanding.
    ///
    /// Returns `false` when the caller must not fire another request.
    pub fn begin(&mut self) -> bool {
        if self.is_pending() {
            return false;
        }
        *self = Self::Pending;
        true
    }

    pub fn settle(&mut self, result: Result<T, String>) {
        *self = match result {
            Ok(value) => Self::Succeeded(value),
            Err(message) => Self::Failed(message),
        };
    }

    /// Hands out a settled result once and returns to `Idle`.
    ///
    /// `Idle` and `Pending` are left untouched.
    pub fn take_settled(&mut self) -> Option<Result<T, String>> {
        if !self.is_settled() {
            return None;
        }

        match std::mem::take(self) {
            Self::Succeeded(value) => Some(Ok(value)),
            Self::Failed(message) => Some(Err(message)),
            Self::Idle | Self::Pending => None,
        }
    }
}
