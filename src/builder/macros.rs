//! Macros for ergonomic state declaration.

/// Declare a fieldless state enum and implement `State` for it.
///
/// Each variant's label is its identifier. Extra attributes (for example a
/// serde derive) are passed through.
///
/// # Example
///
/// ```
/// use hierarch::core::State;
/// use hierarch::state_enum;
///
/// state_enum! {
///     pub enum RadarState {
///         Initial,
///         Active,
///         GetTargets,
///         UpdateDisplay,
///     }
/// }
///
/// assert_eq!(RadarState::GetTargets.name(), "GetTargets");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
