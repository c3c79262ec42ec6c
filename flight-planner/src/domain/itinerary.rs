//! Itinerary types.
//!
//! An `Itinerary` is an owned, chronological list of flight indices. A
//! `Candidate` is what the selector ranks: either a direct itinerary or a
//! `Relation` that names two stored halves in a relation graph branch.

use super::{FlightIndex, FlightRecord, FlightTable, Symbol};

/// An ordered sequence of legs.
///
/// # Invariants
///
/// Consecutive legs connect in time (`land[i] <= take_off[i + 1]`) and no
/// city appears twice. The empty itinerary is the valid "no path" value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Itinerary {
    legs: Vec<FlightIndex>,
}

impl Itinerary {
    /// Wrap a leg sequence.
    pub fn new(legs: Vec<FlightIndex>) -> Self {
        Self { legs }
    }

    /// The "no path" itinerary.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A one-leg itinerary.
    pub fn single(leg: FlightIndex) -> Self {
        Self { legs: vec![leg] }
    }

    /// Concatenate two halves into a new itinerary.
    pub fn concat(head: &Itinerary, tail: &Itinerary) -> Self {
        let mut legs = Vec::with_capacity(head.legs.len() + tail.legs.len());
        legs.extend_from_slice(&head.legs);
        legs.extend_from_slice(&tail.legs);
        Self { legs }
    }

    /// Copy of this itinerary with one more leg appended.
    pub fn extended(&self, leg: FlightIndex) -> Self {
        let mut legs = Vec::with_capacity(self.legs.len() + 1);
        legs.extend_from_slice(&self.legs);
        legs.push(leg);
        Self { legs }
    }

    pub fn legs(&self) -> &[FlightIndex] {
        &self.legs
    }

    pub fn len(&self) -> usize {
        self.legs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.legs.is_empty()
    }

    /// First leg's record, if any.
    pub fn first_flight<'t>(&self, table: &'t FlightTable) -> Option<&'t FlightRecord> {
        self.legs.first().map(|&i| table.get(i))
    }

    /// Last leg's record, if any.
    pub fn last_flight<'t>(&self, table: &'t FlightTable) -> Option<&'t FlightRecord> {
        self.legs.last().map(|&i| table.get(i))
    }

    /// City where the itinerary currently ends.
    pub fn last_city(&self, table: &FlightTable) -> Option<Symbol> {
        self.last_flight(table).map(|f| f.destination)
    }

    /// Returns true if any leg takes off from or lands at `city`.
    pub fn visits(&self, table: &FlightTable, city: Symbol) -> bool {
        self.legs.iter().any(|&i| {
            let f = table.get(i);
            f.origin == city || f.destination == city
        })
    }
}

impl From<Vec<FlightIndex>> for Itinerary {
    fn from(legs: Vec<FlightIndex>) -> Self {
        Self::new(legs)
    }
}

/// Named slot in a relation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BranchNode {
    Zero,
    One,
}

impl BranchNode {
    /// Every node, in slot order.
    pub const ALL: [BranchNode; 2] = [BranchNode::Zero, BranchNode::One];

    /// Slot position of this node.
    pub fn slot(self) -> usize {
        match self {
            BranchNode::Zero => 0,
            BranchNode::One => 1,
        }
    }
}

/// A composed itinerary: `branch[node].a[a] ++ branch[node].b[b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Relation {
    pub node: BranchNode,
    pub a: u32,
    pub b: u32,
}

impl Relation {
    pub fn new(node: BranchNode, a: u32, b: u32) -> Self {
        Self { node, a, b }
    }
}

/// Something the cheapest selector can rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Candidate {
    /// Owns its legs.
    Direct(Itinerary),
    /// Resolved through a relation graph at evaluation time.
    Composed(Relation),
}

impl Candidate {
    /// Returns true if resolving this candidate needs a relation graph.
    pub fn is_composed(&self) -> bool {
        matches!(self, Candidate::Composed(_))
    }
}

impl From<Itinerary> for Candidate {
    fn from(itinerary: Itinerary) -> Self {
        Candidate::Direct(itinerary)
    }
}

impl From<Relation> for Candidate {
    fn from(relation: Relation) -> Self {
        Candidate::Composed(relation)
    }
}
