//! Tri-state field for partial updates

/// A field in an update payload.
///
/// Distinguishes a field that was left out (`Unset`) from one that was
/// explicitly cleared (`Null`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Unset,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Self::Unset => Patch::Unset,
            Self::Null => Patch::Null,
            Self::Value(v) => Patch::Value(f(v)),
        }
    }

    /// Write the patch onto a nullable column value.
    pub fn apply_to(self, target: &mut Option<T>) {
        match self {
            Self::Unset => {}
            Self::Null => *target = None,
            Self::Value(v) => *target = Some(v),
        }
    }
}
