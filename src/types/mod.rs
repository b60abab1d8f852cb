//! Portable column converters.
//!
//! Each converter maps a domain value to its storage form and back, passing
//! `None` through unchanged in both directions.

pub mod choice;
pub mod uuid;

pub use self::choice::{Choice, ChoiceEnum, CHOICE_COLUMN_TYPE};
pub use self::uuid::{HexCharUuid, NativeUuid, PortableUuid, UuidStorage, UuidValue};
