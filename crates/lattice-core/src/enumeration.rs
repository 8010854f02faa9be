//! # String Enums
//!
//! Closed enumerations whose wire form is a fixed string (`"READ"`,
//! `"EntityType"`, ...). The tables are frozen at compile time.
//!
//! Declare one with [`string_enum!`](crate::string_enum); it derives the usual
//! traits and wires up `Display`, `FromStr`, `AsRef<str>`, and serde so the
//! enum round-trips through its wire strings and rejects anything else.

/// A closed enum with a fixed wire string per member.
pub trait StringEnum: Sized + Copy + Eq + 'static {
    /// Every member, in declaration order.
    const MEMBERS: &'static [Self];

    /// Human-readable name of the enumeration, used in error messages.
    const ENUM_NAME: &'static str;

    /// The wire string of this member.
    fn as_str(&self) -> &'static str;

    /// Look up a member by wire string (exact, case-sensitive match).
    fn from_member(value: &str) -> Option<Self> {
        Self::MEMBERS.iter().copied().find(|m| m.as_str() == value)
    }
}

/// Error returned by the generated `FromStr` impls.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("\"{value}\" is not a member of {enum_name}")]
pub struct UnknownMember {
    /// The rejected input.
    pub value: String,
    /// The enumeration it was checked against.
    pub enum_name: &'static str,
}

/// Declare a [`StringEnum`].
///
/// ```
/// lattice_core::string_enum! {
///     /// Colors.
///     pub enum Color {
///         /// Red.
///         Red => "RED",
///         /// Blue.
///         Blue => "BLUE",
///     }
/// }
///
/// assert_eq!("RED".parse::<Color>().unwrap(), Color::Red);
/// ```
#[macro_export]
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $crate::StringEnum for $name {
            const MEMBERS: &'static [Self] = &[$(Self::$variant),+];
            const ENUM_NAME: &'static str = stringify!($name);

            fn as_str(&self) -> &'static str {
                match self {
                    $( Self::$variant => $wire ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::StringEnum::as_str(self))
            }
        }

        impl ::std::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                $crate::StringEnum::as_str(self)
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::UnknownMember;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::StringEnum>::from_member(s).ok_or_else(|| $crate::UnknownMember {
                    value: s.to_string(),
                    enum_name: stringify!($name),
                })
            }
        }

        impl $crate::__private::serde::Serialize for $name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: $crate::__private::serde::Serializer,
            {
                serializer.serialize_str($crate::StringEnum::as_str(self))
            }
        }

        impl<'de> $crate::__private::serde::Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: $crate::__private::serde::Deserializer<'de>,
            {
                let raw = <::std::string::String as $crate::__private::serde::Deserialize>::deserialize(
                    deserializer,
                )?;
                raw.parse::<Self>()
                    .map_err(<D::Error as $crate::__private::serde::de::Error>::custom)
            }
        }
    };
}
