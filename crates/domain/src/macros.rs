//! Macro for implementing Display and FromStr for tag enums
//!
//! This macro eliminates boilerplate for tag enum conversions by providing
//! a single implementation for both Display and FromStr traits. It handles
//! case-insensitive parsing and consistent string representation. Extra
//! spellings accepted on parse follow the tag, separated by `|`.
//!
//! # Example
//!
//! ```rust
//! use cadence_domain::impl_domain_tag_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Shade {
//!     Light,
//!     Dark,
//! }
//!
//! impl_domain_tag_conversions!(Shade {
//!     Light => "light",
//!     Dark => "dark" | "dim",
//! });
//!
//! assert_eq!("DARK".parse::<Shade>().unwrap(), Shade::Dark);
//! assert_eq!("dim".parse::<Shade>().unwrap(), Shade::Dark);
//! assert_eq!(Shade::Dark.to_string(), "dark");
//! ```

/// Implements Display and FromStr traits for tag enums
///
/// This macro generates:
/// - Display trait: converts enum variants to their lowercase tag
/// - FromStr trait: parses case-insensitive strings to enum variants,
///   failing with [`CadenceError::InvalidInput`](crate::CadenceError)
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their lowercase string
///   representations
/// * `| $alias` - Optional lowercase spellings also accepted by FromStr
#[macro_export]
macro_rules! impl_domain_tag_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal $(| $alias:literal)*),+ $(,)? }) => {
        impl $enum_name {
            /// Lowercase tag for this variant.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = $crate::CadenceError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str $(| $alias)* => Ok(Self::$variant),)+
                    _ => Err($crate::CadenceError::InvalidInput(format!(
                        "Invalid {}: {}",
                        stringify!($enum_name),
                        s
                    ))),
                }
            }
        }
    };
}
