//! Macro for implementing Display and FromStr for wire-level enums
//!
//! Several attributes accept a closed set of lowercase strings (power
//! signals, server states). This macro provides a single implementation of
//! both conversions with case-insensitive parsing.
//!
//! # Example
//!
//! ```rust
//! use kineticpanel_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Signal {
//!     Start,
//!     Stop,
//! }
//!
//! impl_wire_enum_conversions!(Signal {
//!     Start => "start",
//!     Stop => "stop",
//! });
//!
//! assert_eq!(Signal::Start.to_string(), "start");
//! assert_eq!("STOP".parse::<Signal>().unwrap(), Signal::Stop);
//! ```

/// Implements `as_str`, `variants`, Display and FromStr for a wire enum
///
/// - `as_str`: the canonical lowercase representation
/// - `variants`: every accepted string, in declaration order
/// - FromStr: case-insensitive, errors name the enum and the accepted values
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical wire representation
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }

            /// All accepted wire values
            pub fn variants() -> &'static [&'static str] {
                &[$($str),+]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!(
                        "Invalid {}: {} (expected one of: {})",
                        stringify!($enum_name),
                        s,
                        Self::variants().join(", ")
                    )),
                }
            }
        }
    };
}
