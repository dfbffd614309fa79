//! Macro for implementing Display and FromStr for fieldless domain enums
//!
//! Status-like enums are persisted as text and exchanged with the upstream
//! API as text. The macro keeps the string table in one place so storage,
//! logging and parsing never drift apart.
//!
//! # Example
//!
//! ```rust
//! use adsync_domain::impl_domain_status_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum DeliveryStatus {
//!     Active,
//!     Paused,
//! }
//!
//! impl_domain_status_conversions!(DeliveryStatus {
//!     Active => "ACTIVE",
//!     Paused => "PAUSED",
//! });
//!
//! assert_eq!(DeliveryStatus::Paused.as_str(), "PAUSED");
//! assert_eq!("paused".parse::<DeliveryStatus>(), Ok(DeliveryStatus::Paused));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for fieldless enums
///
/// This macro generates:
/// - `as_str`: the canonical string for a variant, exactly as written
/// - `Display`: writes the canonical string
/// - `FromStr`: ASCII case-insensitive parse, erroring with the enum name
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their canonical strings
#[macro_export]
macro_rules! impl_domain_status_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Canonical string representation.
            pub const fn as_str(&self) -> &'static str {
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
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}
