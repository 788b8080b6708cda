use std::{
    fmt,
    ops::{Add, Sub},
};

macro_rules! impl_pos {
    (
        $(
            $(#[$attr:meta])*
            $vis:vis struct $ident:ident($inner_vis:vis u32);
        )*
    ) => {
        $(
            $(#[$attr])*
            #[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
            $vis struct $ident($inner_vis u32);

            impl fmt::Debug for $ident {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write!(f, "{}({})", stringify!($ident), self.0)
                }
            }

            impl $ident {
                #[inline(always)]
                pub const fn from_u32(n: u32) -> Self {
                    Self(n)
                }

                #[inline(always)]
                pub fn from_usize(n: usize) -> Self {
                    Self(n as u32)
                }

                #[inline(always)]
                pub const fn to_u32(self) -> u32 {
                    self.0
                }

                #[inline(always)]
                pub const fn to_usize(self) -> usize {
                    self.0 as usize
                }
            }

            impl Add<u32> for $ident {
                type Output = Self;

                #[inline(always)]
                fn add(self, rhs: u32) -> Self {
                    Self(self.0 + rhs)
                }
            }

            impl Sub for $ident {
                type Output = Self;

                #[inline(always)]
                fn sub(self, rhs: Self) -> Self {
                    Self(self.0 - rhs.0)
                }
            }
        )*
    };
}

impl_pos! {
    /// A byte offset relative to the global source map.
    pub struct BytePos(pub u32);

    /// A byte offset relative to the beginning of a source file.
    pub struct RelativeBytePos(pub u32);
}
