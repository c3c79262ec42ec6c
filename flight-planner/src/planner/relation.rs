//! Relation graph for composed itineraries.
//!
//! A vacation search merges partial results whose concatenations would be
//! expensive to materialize up front. Instead the two halves are linked into
//! a branch node and the merge emits [`Relation`]s that name one itinerary
//! from each half. The selector resolves them on demand with [`RelationGraph::join`].

use crate::domain::{BranchNode, Candidate, Itinerary, Relation};

/// The two halves linked at one branch node.
#[derive(Debug, Clone, Default)]
pub struct BranchSet {
    pub a: Vec<Itinerary>,
    pub b: Vec<Itinerary>,
}

/// Two-slot arena of branch-sets.
#[derive(Debug, Clone, Default)]
pub struct RelationGraph {
    branches: [BranchSet; 2],
}

impl RelationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the halves for `node`, replacing anything linked before.
    pub fn link(&mut self, node: BranchNode, a: Vec<Itinerary>, b: Vec<Itinerary>) {
        self.branches[node.slot()] = BranchSet { a, b };
    }

    pub fn branch(&self, node: BranchNode) -> &BranchSet {
        &self.branches[node.slot()]
    }

    /// Concatenated legs for a relation.
    ///
    /// # Panics
    ///
    /// Panics if the relation's indices are out of range for its branch,
    /// which means it was produced against different halves.
    pub fn resolve(&self, relation: &Relation) -> Itinerary {
        let branch = self.branch(relation.node);
        Itinerary::concat(
            &branch.a[relation.a as usize],
            &branch.b[relation.b as usize],
        )
    }

    /// Materialize any candidate. Direct candidates are returned unchanged.
    pub fn join(&self, candidate: &Candidate) -> Itinerary {
        match candidate {
            Candidate::Direct(itinerary) => itinerary.clone(),
            Candidate::Composed(relation) => self.resolve(relation),
        }
    }
}
