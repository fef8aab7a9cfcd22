//! Macros for declaring state and event enums.

/// Generate a [`State`](crate::core::State) implementation for a plain enum.
///
/// The enum derives `Clone`, `PartialEq`, `Eq`, `Hash`, `Debug` and serde's
/// `Serialize`/`Deserialize`; each variant is named after itself.
///
/// # Example
///
/// ```
/// use machinarium::state_enum;
/// use machinarium::core::State;
///
/// state_enum! {
///     pub enum Bulb {
///         Off,
///         On,
///         Broken,
///     }
/// }
///
/// assert_eq!(Bulb::Broken.name(), "Broken");
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
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
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

/// Generate an [`Event`](crate::core::Event) implementation for a plain enum.
///
/// # Example
///
/// ```
/// use machinarium::event_enum;
/// use machinarium::core::Event;
///
/// event_enum! {
///     pub enum BulbEvent {
///         TurnOn,
///         TurnOff,
///     }
/// }
///
/// assert_eq!(BulbEvent::TurnOn.name(), "TurnOn");
/// ```
#[macro_export]
macro_rules! event_enum {
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
        #[derive(Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Event for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}
