use std::{fmt, ops::Deref};

use ark_bls12_377::Fq;

/// Errors that can occur during wire operations
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Wire with the given ID was not found
    #[error("Wire with id {0} not found")]
    WireNotFound(WireId),
    /// Wire with the given ID is already assigned
    #[error("Wire with id {0} already assigned")]
    WireAlreadyAssigned(WireId),
}
pub type WireError = Error;

/// Identifier of a native-field variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WireId(pub usize);

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for WireId {
    type Target = usize;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

mod assigned_wires {
    use super::{Fq, WireError, WireId};

    /// Witness table indexed by `WireId`. A slot stays `None` until its
    /// producing gate could be evaluated.
    #[derive(Debug, Default)]
    pub struct AssignedWires {
        values: Vec<Option<Fq>>,
    }

    impl AssignedWires {
        pub fn issue(&mut self, value: Option<Fq>) -> WireId {
            self.values.push(value);
            WireId(self.values.len() - 1)
        }

        pub fn get(&self, wire_id: WireId) -> Option<Fq> {
            self.values.get(wire_id.0).copied().flatten()
        }

        pub fn assign(&mut self, wire_id: WireId, value: Fq) -> Result<(), WireError> {
            let slot = self
                .values
                .get_mut(wire_id.0)
                .ok_or(WireError::WireNotFound(wire_id))?;

            match slot {
                Some(_) => Err(WireError::WireAlreadyAssigned(wire_id)),
                None => {
                    *slot = Some(value);
                    Ok(())
                }
            }
        }

        pub fn size(&self) -> usize {
            self.values.len()
        }

        pub fn assigned(&self) -> usize {
            self.values.iter().filter(|v| v.is_some()).count()
        }
    }
}
pub use assigned_wires::AssignedWires;
