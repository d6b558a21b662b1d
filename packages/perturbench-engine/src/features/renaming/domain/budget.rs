//! Rename budget accounting

use serde::Serialize;

/// How a requested budget related to the renamable identifiers
///
/// Clamping is not an error: a budget above the available count renames
/// every eligible identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BudgetUsage {
    /// No budget given
    Unlimited { renamed: usize },
    /// Budget at or below the available count
    Within { requested: usize },
    /// Budget above the available count
    Clamped { requested: usize, available: usize },
}

impl BudgetUsage {
    pub fn resolve(requested: Option<usize>, available: usize) -> Self {
        match requested {
            None => BudgetUsage::Unlimited { renamed: available },
            Some(requested) if requested > available => BudgetUsage::Clamped {
                requested,
                available,
            },
            Some(requested) => BudgetUsage::Within { requested },
        }
    }

    /// Number of distinct names the call renames
    pub fn effective(&self) -> usize {
        match *self {
            BudgetUsage::Unlimited { renamed } => renamed,
            BudgetUsage::Within { requested } => requested,
            BudgetUsage::Clamped { available, .. } => available,
        }
    }

    pub fn is_clamped(&self) -> bool {
        matches!(self, BudgetUsage::Clamped { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(BudgetUsage::resolve(None, 4).effective(), 4);
        assert_eq!(BudgetUsage::resolve(Some(2), 4), BudgetUsage::Within { requested: 2 });

        let clamped = BudgetUsage::resolve(Some(9), 4);
        assert!(clamped.is_clamped());
        assert_eq!(clamped.effective(), 4);
        assert_eq!(BudgetUsage::resolve(Some(0), 0).effective(), 0);
    }
}
