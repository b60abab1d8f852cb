//! Enumerated-choice column type, stored as an integer.

use crate::entity::ColumnDescriptor;
use crate::error::{HazelError, Result};
use std::any::type_name;
use std::fmt;
use std::marker::PhantomData;

/// Column type name of choice columns. DDL renders it as an integer.
pub const CHOICE_COLUMN_TYPE: &str = "choice";

/// Enum with a fixed integer value per member
///
/// ```
/// use hazel_db::types::ChoiceEnum;
///
/// #[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// enum Gender {
///     Male = 1,
///     Female = 2,
/// }
///
/// impl ChoiceEnum for Gender {
///     fn to_value(self) -> i32 {
///         self as i32
///     }
///
///     fn from_value(value: i32) -> Option<Self> {
///         match value {
///             1 => Some(Gender::Male),
///             2 => Some(Gender::Female),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait ChoiceEnum: Sized + Copy {
    fn to_value(self) -> i32;
    fn from_value(value: i32) -> Option<Self>;
}

/// Converter between an enum and its stored integer
pub struct Choice<E> {
    _marker: PhantomData<E>,
}

// Hand-written so `E` needs no `Debug`/`Default` of its own.
impl<E> fmt::Debug for Choice<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Choice<{}>", type_name::<E>())
    }
}

impl<E> Clone for Choice<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Choice<E> {}

impl<E: ChoiceEnum> Default for Choice<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ChoiceEnum> Choice<E> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    /// Non-null column storing `E` under `key`.
    pub fn column(key: impl Into<String>) -> ColumnDescriptor {
        ColumnDescriptor::new(key, CHOICE_COLUMN_TYPE)
    }

    pub fn encode(&self, value: Option<E>) -> Option<i32> {
        value.map(ChoiceEnum::to_value)
    }

    /// Encode a raw integer, checking it names a member of `E`.
    pub fn encode_value(&self, value: Option<i32>) -> Result<Option<i32>> {
        value.map(|raw| self.member(raw).map(ChoiceEnum::to_value)).transpose()
    }

    pub fn decode(&self, value: Option<i32>) -> Result<Option<E>> {
        value.map(|raw| self.member(raw)).transpose()
    }

    fn member(&self, raw: i32) -> Result<E> {
        E::from_value(raw).ok_or_else(|| {
            HazelError::Conversion(format!("{raw} is not a valid {}", type_name::<E>()))
        })
    }
}
