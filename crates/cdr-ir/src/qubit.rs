//! Qubit and classical bit identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::IrError;

/// Unique identifier for a qubit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QubitId(pub u32);

/// Unique identifier for a classical bit within a circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClbitId(pub u32);

macro_rules! bit_id {
    ($ty:ident, $prefix:literal) => {
        impl $ty {
            /// Position of this bit as a `usize` index.
            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<u32> for $ty {
            fn from(id: u32) -> Self {
                $ty(id)
            }
        }

        impl TryFrom<usize> for $ty {
            type Error = IrError;

            fn try_from(id: usize) -> Result<Self, Self::Error> {
                u32::try_from(id)
                    .map($ty)
                    .map_err(|_| IrError::IdOverflow(id))
            }
        }
    };
}

bit_id!(QubitId, "q");
bit_id!(ClbitId, "c");

/// A quantum bit, optionally named through a register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Qubit {
    /// The unique identifier.
    pub id: QubitId,
    /// Register name and index within it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<(String, u32)>,
}

impl Qubit {
    /// A qubit outside any register.
    pub fn new(id: QubitId) -> Self {
        Self { id, register: None }
    }

    /// A qubit at `index` inside register `name`.
    pub fn with_register(id: QubitId, name: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some((name.into(), index)),
        }
    }
}

impl fmt::Display for Qubit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.register {
            Some((reg, idx)) => write!(f, "{reg}[{idx}]"),
            None => write!(f, "{}", self.id),
        }
    }
}

/// A classical bit, optionally named through a register.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clbit {
    /// The unique identifier.
    pub id: ClbitId,
    /// Register name and index within it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub register: Option<(String, u32)>,
}

impl Clbit {
    /// A classical bit outside any register.
    pub fn new(id: ClbitId) -> Self {
        Self { id, register: None }
    }

    /// A classical bit at `index` inside register `name`.
    pub fn with_register(id: ClbitId, name: impl Into<String>, index: u32) -> Self {
        Self {
            id,
            register: Some((name.into(), index)),
        }
    }
}

impl fmt::Display for Clbit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.register {
            Some((reg, idx)) => write!(f, "{reg}[{idx}]"),
            None => write!(f, "{}", self.id),
        }
    }
}
