use core::fmt;
use core::num::NonZeroU32;

/// Compact identifier used for model objects, graph vertices and records.
///
/// - `u32` keeps arenas small
/// - `NonZero` lets `Option<Id>` stay the size of `Id`
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Id(NonZeroU32);

impl Id {
    /// Create an Id from a 0-based index by storing index+1.
    pub fn from_index(index: u32) -> Self {
        match NonZeroU32::new(index.wrapping_add(1)) {
            Some(v) => Self(v),
            None => Self(NonZeroU32::MAX),
        }
    }

    /// Create an Id from a `usize` arena position.
    pub fn from_usize(index: usize) -> Self {
        Self::from_index(index as u32)
    }

    /// Recover the 0-based index.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }

    /// Recover the 0-based index as an arena position.
    pub fn slot(self) -> usize {
        self.index() as usize
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

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type ObjectId = Id;
pub type VertexId = Id;
pub type LinkId = Id;
pub type RecordId = Id;
