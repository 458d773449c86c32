//! The global constraint set.

use shared_types::Address;

use crate::errors::RegistryError;

/// Constraint addresses in evaluation order.
///
/// Removal swaps the last element into the vacated slot, so order is only
/// stable until the first removal.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GlobalConstraintSet {
    constraints: Vec<Address>,
}

impl GlobalConstraintSet {
    /// Appends `constraint`.
    ///
    /// # Errors
    ///
    /// Null or already-present constraint.
    pub fn add(&mut self, constraint: Address) -> Result<(), RegistryError> {
        if constraint.is_zero() {
            return Err(RegistryError::NullConstraint);
        }
        if self.position(&constraint).is_some() {
            return Err(RegistryError::DuplicateConstraint);
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Removes `constraint` by swapping the last element into its slot.
    ///
    /// # Errors
    ///
    /// `MissingConstraint` when absent.
    pub fn remove(&mut self, constraint: &Address) -> Result<(), RegistryError> {
        let index = self
            .position(constraint)
            .ok_or(RegistryError::MissingConstraint)?;
        self.constraints.swap_remove(index);
        Ok(())
    }

    fn position(&self, constraint: &Address) -> Option<usize> {
        self.constraints.iter().position(|c| c == constraint)
    }

    /// Whether `constraint` is in the set.
    #[must_use]
    pub fn contains(&self, constraint: &Address) -> bool {
        self.position(constraint).is_some()
    }

    /// Number of constraints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.constraints.len()
    }

    /// True when the set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    /// Constraints in evaluation order.
    #[must_use]
    pub fn as_slice(&self) -> &[Address] {
        &self.constraints
    }
}
