/// Value type for key-only maps, like ``Llrb<K, Empty>``, when the map
/// is used as an ordered set.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, PartialOrd, Ord, Hash)]
pub struct Empty;
