//! State identifiers and their integral representations.
//!
//! Every state machine is keyed by a closed set of identifiers, usually a
//! fieldless enum declared with [`state_id!`](crate::state_id). Each
//! identifier carries an integral discriminant which the index mapper turns
//! into a dense table slot.

use std::fmt::Debug;
use std::hash::Hash;

/// Integral representation backing a [`StateId`].
///
/// Implemented for the 8, 16 and 32-bit signed and unsigned integers. Wider
/// representations are deliberately absent so that every implementor can be
/// widened to an index without loss.
pub trait Discriminant: Copy + Debug {
    /// Convert to a table index. Returns `None` for negative values.
    fn to_index(self) -> Option<usize>;

    /// Widen to `i64` for diagnostics.
    fn to_i64(self) -> i64;
}

macro_rules! impl_discriminant {
    ($($ty:ty),*) => {
        $(
            impl Discriminant for $ty {
                #[inline]
                fn to_index(self) -> Option<usize> {
                    usize::try_from(self).ok()
                }

                #[inline]
                fn to_i64(self) -> i64 {
                    i64::from(self)
                }
            }
        )*
    };
}

impl_discriminant!(u8, i8, u16, i16, u32, i32);

/// Trait for state identifiers.
///
/// A state identifier names one state of a machine. The set of identifiers
/// is closed: [`StateId::ALL`] must list every value the type can take.
///
/// # Example
///
/// ```rust
/// use framestate::core::StateId;
///
/// #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
/// #[repr(u8)]
/// enum Menu {
///     Title = 0,
///     Options = 1,
/// }
///
/// impl StateId for Menu {
///     type Repr = u8;
///     const ALL: &'static [Self] = &[Self::Title, Self::Options];
///
///     fn repr(self) -> u8 {
///         self as u8
///     }
///
///     fn name(self) -> &'static str {
///         match self {
///             Self::Title => "Title",
///             Self::Options => "Options",
///         }
///     }
/// }
///
/// assert_eq!(Menu::Options.repr(), 1);
/// ```
pub trait StateId: Copy + Eq + Hash + Debug + 'static {
    /// Integral representation of the identifier.
    type Repr: Discriminant;

    /// Every declared identifier.
    const ALL: &'static [Self];

    /// The identifier's integral value.
    fn repr(self) -> Self::Repr;

    /// The identifier's name for display/logging.
    fn name(self) -> &'static str;
}
