//! Custom actions for the Category store.

/// Actions beyond CRUD supported by the Category store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAction {
    /// Enables or disables the category. Returns whether the state changed.
    SetEnabled(bool),
}
