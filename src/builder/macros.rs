//! Macros for ergonomic state identifier declaration.

/// Declare a state identifier enum and implement [`StateId`](crate::core::StateId) for it.
///
/// The representation after the colon must be one of `u8`, `i8`, `u16`,
/// `i16`, `u32` or `i32`. Discriminants may be given explicitly. The enum
/// derives `Serialize` and `Deserialize` through this crate's `serde`
/// re-export.
///
/// # Example
///
/// ```
/// use framestate::state_id;
/// use framestate::core::StateId;
///
/// state_id! {
///     pub enum GameFlow: u8 {
///         Boot,
///         Title,
///         Playing = 4,
///         Paused,
///     }
/// }
///
/// assert_eq!(GameFlow::Playing.repr(), 4);
/// assert_eq!(GameFlow::Paused.name(), "Paused");
/// assert_eq!(GameFlow::ALL.len(), 4);
/// ```
#[macro_export]
macro_rules! state_id {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $repr:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(= $value:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Debug,
            $crate::serde::Serialize,
            $crate::serde::Deserialize
        )]
        #[serde(crate = "framestate::serde")]
        #[repr($repr)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(= $value)?
            ),*
        }

        impl $crate::core::StateId for $name {
            type Repr = $repr;
            const ALL: &'static [Self] = &[$(Self::$variant),*];

            #[inline]
            fn repr(self) -> $repr {
                self as $repr
            }

            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
