//! Per-name results of batch operations.

use crate::error::{StoreError, StoreResult};

/// The result of applying a batch operation to one name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemOutcome {
    pub name: String,
    pub result: StoreResult<()>,
}

impl ItemOutcome {
    pub fn ok(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            result: Ok(()),
        }
    }

    pub fn err(name: impl Into<String>, error: StoreError) -> Self {
        Self {
            name: name.into(),
            result: Err(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-name outcomes of a batch create or delete, in input order.
///
/// A batch never stops at the first failure, so the outcome may mix
/// successes and failures.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    items: Vec<ItemOutcome>,
}

impl BatchOutcome {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `true` if every item succeeded (vacuously true for an empty batch).
    pub fn is_all_ok(&self) -> bool {
        self.items.iter().all(ItemOutcome::is_ok)
    }

    /// Names that succeeded, in input order.
    pub fn succeeded(&self) -> Vec<&str> {
        self.items
            .iter()
            .filter(|item| item.is_ok())
            .map(|item| item.name.as_str())
            .collect()
    }

    /// Failures, in input order.
    pub fn failed(&self) -> Vec<&StoreError> {
        self.items
            .iter()
            .filter_map(|item| item.result.as_ref().err())
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ItemOutcome> {
        self.items.iter()
    }

    /// The outcome of the first item, if any.
    pub fn first(&self) -> Option<&ItemOutcome> {
        self.items.first()
    }
}

impl FromIterator<ItemOutcome> for BatchOutcome {
    fn from_iter<I: IntoIterator<Item = ItemOutcome>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for BatchOutcome {
    type Item = ItemOutcome;
    type IntoIter = std::vec::IntoIter<ItemOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a BatchOutcome {
    type Item = &'a ItemOutcome;
    type IntoIter = std::slice::Iter<'a, ItemOutcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
