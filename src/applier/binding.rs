use std::collections::HashMap;

use thiserror::Error;

use crate::category::Category;
use crate::viewer::SurfaceHandle;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindingError {
    /// The handle already belongs to another category.
    #[error("surface {} is already bound to {owner}, refusing to bind it to {category}", target.id())]
    AlreadyBound {
        target: SurfaceHandle,
        owner: Category,
        category: Category,
    },
}

/// Category to surface associations made when the viewer becomes ready.
///
/// A handle belongs to at most one category. A category may be pointed at a
/// new handle (for example after the viewer reloads its model); requests
/// issued against the old handle are then dropped when they resolve.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    by_category: HashMap<Category, SurfaceHandle>,
}

impl Bindings {
    pub fn bind(&mut self, category: Category, target: SurfaceHandle) -> Result<(), BindingError> {
        if let Some((owner, _)) = self
            .by_category
            .iter()
            .find(|(owner, handle)| **handle == target && **owner != category)
        {
            return Err(BindingError::AlreadyBound {
                target,
                owner: *owner,
                category,
            });
        }

        self.by_category.insert(category, target);
        Ok(())
    }

    pub fn get(&self, category: Category) -> Option<SurfaceHandle> {
        self.by_category.get(&category).copied()
    }

    pub fn len(&self) -> usize {
        self.by_category.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}
