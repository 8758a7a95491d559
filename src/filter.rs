//! Free-text narrowing of a category's variant list.

use std::fmt;

use crate::catalog::Named;

/// Search text scoped to the active category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery(String);

impl FilterQuery {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `true` when the query does not filter anything.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

impl fmt::Display for FilterQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Keep the items whose name contains `query`, ignoring case and the
/// query's surrounding whitespace. Order is preserved and a blank query
/// keeps everything.
pub fn filter<'a, I, T>(items: I, query: &str) -> Vec<&'a T>
where
    I: IntoIterator<Item = &'a T>,
    T: Named + ?Sized + 'a,
{
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return items.into_iter().collect();
    }

    items
        .into_iter()
        .filter(|item| item.name().to_lowercase().contains(&needle))
        .collect()
}
