use core::fmt;
use core::num::NonZeroU32;

/// Compact, stable handle for mesh-side catalog entries.
///
/// Stores `index + 1` so `Option<Id>` costs nothing extra.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index.
    ///
    /// Returns `None` for `u32::MAX`, which has no `index + 1` representation.
    pub fn new(index: u32) -> Option<Self> {
        index.checked_add(1).and_then(NonZeroU32::new).map(Self)
    }

    /// Create an Id from a catalog position.
    ///
    /// Catalogs (zones, patches, builder faces) are far below `u32::MAX`;
    /// positions beyond that saturate to the last representable id.
    pub fn from_index(index: usize) -> Self {
        let clamped = u32::try_from(index).unwrap_or(u32::MAX - 1).min(u32::MAX - 1);
        Self(NonZeroU32::MIN.saturating_add(clamped))
    }

    /// Recover the 0-based index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.index())
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

/// Face zone handle in a mesh's zone catalog.
pub type ZoneId = Id;
/// Boundary patch handle.
pub type PatchId = Id;
/// Face handle issued by the mesh builder, resolved to a mesh face index on build.
pub type FaceId = Id;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trip_index() {
        for i in [0_usize, 1, 2, 42, 10_000] {
            assert_eq!(Id::from_index(i).index(), i);
        }
        assert_eq!(Id::new(7).map(Id::index), Some(7));
    }

    #[test]
    fn id_new_rejects_max() {
        assert!(Id::new(u32::MAX).is_none());
    }

    #[test]
    fn option_id_is_small() {
        assert_eq!(
            core::mem::size_of::<Id>(),
            core::mem::size_of::<Option<Id>>()
        );
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn from_index_inverts_index(i in 0usize..(u32::MAX as usize - 1)) {
                prop_assert_eq!(Id::from_index(i).index(), i);
            }

            #[test]
            fn ordering_follows_index(a in 0usize..1_000_000, b in 0usize..1_000_000) {
                prop_assert_eq!(Id::from_index(a) < Id::from_index(b), a < b);
            }
        }
    }
}
