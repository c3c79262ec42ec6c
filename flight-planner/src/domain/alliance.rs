//! Company alliances.

use super::Symbol;

/// Groups of companies that grant each other loyalty discounts.
#[derive(Debug, Clone, Default)]
pub struct AllianceTable {
    groups: Vec<Vec<Symbol>>,
}

impl AllianceTable {
    /// Build a table from membership groups.
    ///
    /// Empty groups are dropped.
    pub fn new(groups: Vec<Vec<Symbol>>) -> Self {
        let groups = groups.into_iter().filter(|g| !g.is_empty()).collect();
        Self { groups }
    }

    /// Returns true if some alliance contains both companies.
    pub fn share_alliance(&self, a: Symbol, b: Symbol) -> bool {
        self.groups
            .iter()
            .any(|group| group.contains(&a) && group.contains(&b))
    }

    /// Membership groups in load order.
    pub fn groups(&self) -> &[Vec<Symbol>] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}
