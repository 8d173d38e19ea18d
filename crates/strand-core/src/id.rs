//! Typed indices into the flat scene tables.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

macro_rules! index_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
            Serialize, Deserialize, Pod, Zeroable,
        )]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            pub const fn new(value: u32) -> Self {
                Self(value)
            }

            pub const fn value(self) -> u32 {
                self.0
            }

            /// The index as a `usize`, for slice access.
            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(value: u32) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }
    };
}

index_type!(
    /// Index of a curve segment in the segment table.
    SegmentId,
    "seg"
);

index_type!(
    /// Index of a control point in the key table.
    KeyIndex,
    "key"
);

index_type!(
    /// Index of a strand in the curve table.
    CurveId,
    "curve"
);

index_type!(
    /// Base address of an attribute inside its typed attribute table.
    AttributeOffset,
    "@"
);

impl AttributeOffset {
    /// Address of element `element` of the attribute starting at this offset.
    #[inline]
    pub const fn element(self, element: u32) -> usize {
        self.0 as usize + element as usize
    }
}
