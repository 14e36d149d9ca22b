//! Macros for declaring simple state enums.

/// Generate `State`, `MutableState`, and `RootState` implementations for
/// a plain unit-variant enum, with ids taken from the variant names.
///
/// # Example
///
/// ```
/// use statecraft::state_enum;
/// use statecraft::core::{State, StateId};
///
/// state_enum! {
///     pub enum AppState {
///         Menu,
///         InGame,
///         Credits,
///     }
/// }
///
/// assert_eq!(AppState::Menu.id(), StateId::name("Menu"));
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
        #[derive(Clone, PartialEq, Eq, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::State for $name {
            fn id(&self) -> $crate::core::StateId {
                match self {
                    $(Self::$variant => $crate::core::StateId::name(stringify!($variant))),*
                }
            }
        }

        impl $crate::core::MutableState for $name {}
        impl $crate::core::RootState for $name {}
    };
}
