/// Decides whether a direct write counts as a change.
///
/// A write that the policy deems equivalent to the current value is dropped
/// without invalidating dependents or firing listeners.
pub trait MutationPolicy<T> {
    fn equivalent(&self, a: &T, b: &T) -> bool;
}

/// Compares values with `PartialEq`. Default for [`crate::Observable::new`].
#[derive(Clone, Copy, Debug, Default)]
pub struct StructuralEquality;

impl<T: PartialEq> MutationPolicy<T> for StructuralEquality {
    fn equivalent(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// Treats every write as a change.
#[derive(Clone, Copy, Debug, Default)]
pub struct NeverEqual;

impl<T> MutationPolicy<T> for NeverEqual {
    fn equivalent(&self, _a: &T, _b: &T) -> bool {
        false
    }
}
