use thiserror::Error;

/// LlrbError enumerates over all possible errors returned by this package.
///
/// Missing keys are not errors, [`Llrb::get`] and [`Llrb::delete`] report
/// them as `None`.
///
/// [`Llrb::get`]: crate::Llrb::get
/// [`Llrb::delete`]: crate::Llrb::delete
#[derive(Error, Debug, PartialEq)]
pub enum LlrbError<K>
where
    K: Clone + Ord,
{
    /// Returned by min(), max() and friends on a map with no entries.
    #[error("map is empty")]
    EmptyTree,
    /// Fatal case, a red node has a red child.
    #[error("consecutive red links")]
    ConsecutiveReds,
    /// Fatal case, a red link leans right.
    #[error("right leaning red link under {0:?}")]
    RightLeaningRed(K),
    /// Fatal case, root is left red after an operation.
    #[error("root is red")]
    RedRoot,
    /// Fatal case, paths carry different number of black nodes. The
    /// String component can be used for debugging.
    #[error("unbalanced blacks, {0}")]
    UnbalancedBlacks(String),
    /// Fatal case, entries are not in sort-order, (key, ancestor) where
    /// key sits on the wrong side of ancestor.
    #[error("sort error, {0:?} against ancestor {1:?}")]
    SortError(K, K),
}
