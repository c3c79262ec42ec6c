//! Itinerary pricing with loyalty discounts.
//!
//! Discounts depend on neighbouring legs, so they are computed per
//! evaluation into a scratch buffer rather than stored on the flights.
//!
//! Walking the legs in order, for each leg after the first:
//! - same company as the previous leg: both legs get [`COMPANY_DISCOUNT`];
//! - otherwise, a shared alliance: the previous leg is lowered to
//!   [`ALLIANCE_DISCOUNT`] if it is above it, and this leg gets it;
//! - otherwise this leg pays full price.

use crate::domain::{AllianceTable, FlightIndex, FlightTable};

/// Multiplier for a full-price leg.
pub const NO_DISCOUNT: f32 = 1.0;

/// Multiplier for consecutive legs with the same company.
pub const COMPANY_DISCOUNT: f32 = 0.7;

/// Multiplier for consecutive legs with companies in a common alliance.
pub const ALLIANCE_DISCOUNT: f32 = 0.8;

/// Cost reported for an itinerary with no legs.
pub const UNREACHABLE_COST: f32 = f32::MAX;

/// Per-leg discounts and the resulting total.
#[derive(Debug, Clone, PartialEq)]
pub struct Pricing {
    /// One multiplier per leg, in leg order.
    pub discounts: Vec<f32>,
    pub total: f32,
}

impl Pricing {
    /// Pricing of the empty itinerary.
    pub fn unreachable() -> Self {
        Self {
            discounts: Vec::new(),
            total: UNREACHABLE_COST,
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.discounts.is_empty()
    }
}

/// Fill `discounts` with one multiplier per leg.
pub fn apply_discounts(
    flights: &FlightTable,
    alliances: &AllianceTable,
    legs: &[FlightIndex],
    discounts: &mut Vec<f32>,
) {
    discounts.clear();
    discounts.resize(legs.len(), NO_DISCOUNT);

    for i in 1..legs.len() {
        let before = flights.get(legs[i - 1]);
        let current = flights.get(legs[i]);

        if before.company == current.company {
            discounts[i - 1] = COMPANY_DISCOUNT;
            discounts[i] = COMPANY_DISCOUNT;
        } else if alliances.share_alliance(before.company, current.company) {
            if discounts[i - 1] > ALLIANCE_DISCOUNT {
                discounts[i - 1] = ALLIANCE_DISCOUNT;
            }
            discounts[i] = ALLIANCE_DISCOUNT;
        } else {
            discounts[i] = NO_DISCOUNT;
        }
    }
}

/// Discounted total, reusing `scratch` for the multipliers.
pub fn total_cost(
    flights: &FlightTable,
    alliances: &AllianceTable,
    legs: &[FlightIndex],
    scratch: &mut Vec<f32>,
) -> f32 {
    if legs.is_empty() {
        return UNREACHABLE_COST;
    }

    apply_discounts(flights, alliances, legs, scratch);
    legs.iter()
        .zip(scratch.iter())
        .map(|(&leg, &discount)| flights.get(leg).cost * discount)
        .sum()
}

/// Price an itinerary.
pub fn evaluate(flights: &FlightTable, alliances: &AllianceTable, legs: &[FlightIndex]) -> Pricing {
    if legs.is_empty() {
        return Pricing::unreachable();
    }

    let mut discounts = Vec::with_capacity(legs.len());
    let total = total_cost(flights, alliances, legs, &mut discounts);
    Pricing { discounts, total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::fixtures::{company, flight, table};

    fn idx(ids: &[u32]) -> Vec<FlightIndex> {
        ids.iter().map(|&i| FlightIndex(i)).collect()
    }

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn same_company_pair() {
        let flights = table(vec![flight(0, 1, 0, 10, 100.0, 1), flight(1, 2, 20, 30, 50.0, 1)]);
        let pricing = evaluate(&flights, &AllianceTable::default(), &idx(&[0, 1]));

        assert_eq!(pricing.discounts, vec![0.7, 0.7]);
        assert!(approx(pricing.total, 105.0), "total = {}", pricing.total);
    }

    #[test]
    fn alliance_pair() {
        let flights = table(vec![flight(0, 1, 0, 10, 100.0, 1), flight(1, 2, 20, 30, 50.0, 2)]);
        let alliances = AllianceTable::new(vec![vec![company(1), company(2)]]);
        let pricing = evaluate(&flights, &alliances, &idx(&[0, 1]));

        assert_eq!(pricing.discounts, vec![0.8, 0.8]);
        assert!(approx(pricing.total, 120.0));
    }

    #[test]
    fn unrelated_companies_pay_full_price() {
        let flights = table(vec![flight(0, 1, 0, 10, 100.0, 1), flight(1, 2, 20, 30, 50.0, 2)]);
        let pricing = evaluate(&flights, &AllianceTable::default(), &idx(&[0, 1]));

        assert_eq!(pricing.discounts, vec![1.0, 1.0]);
        assert!(approx(pricing.total, 150.0));
    }

    #[test]
    fn alliance_does_not_raise_company_discount() {
        // c1, c1, c2 with c1/c2 allied: second leg keeps 0.7.
        let flights = table(vec![
            flight(0, 1, 0, 10, 10.0, 1),
            flight(1, 2, 20, 30, 10.0, 1),
            flight(2, 3, 40, 50, 10.0, 2),
        ]);
        let alliances = AllianceTable::new(vec![vec![company(1), company(2)]]);
        let pricing = evaluate(&flights, &alliances, &idx(&[0, 1, 2]));
        assert_eq!(pricing.discounts, vec![0.7, 0.7, 0.8]);
    }

    #[test]
    fn company_discount_overrides_alliance() {
        // c2, c1, c1 with c1/c2 allied: middle leg drops from 0.8 to 0.7.
        let flights = table(vec![
            flight(0, 1, 0, 10, 10.0, 2),
            flight(1, 2, 20, 30, 10.0, 1),
            flight(2, 3, 40, 50, 10.0, 1),
        ]);
        let alliances = AllianceTable::new(vec![vec![company(1), company(2)]]);
        let pricing = evaluate(&flights, &alliances, &idx(&[0, 1, 2]));
        assert_eq!(pricing.discounts, vec![0.8, 0.7, 0.7]);
    }

    #[test]
    fn full_price_leg_keeps_previous_discount() {
        let flights = table(vec![
            flight(0, 1, 0, 10, 10.0, 1),
            flight(1, 2, 20, 30, 10.0, 1),
            flight(2, 3, 40, 50, 10.0, 3),
        ]);
        let pricing = evaluate(&flights, &AllianceTable::default(), &idx(&[0, 1, 2]));
        assert_eq!(pricing.discounts, vec![0.7, 0.7, 1.0]);
    }

    #[test]
    fn single_leg_full_price() {
        let flights = table(vec![flight(0, 1, 0, 10, 42.0, 1)]);
        let pricing = evaluate(&flights, &AllianceTable::default(), &idx(&[0]));
        assert_eq!(pricing.discounts, vec![1.0]);
        assert_eq!(pricing.total, 42.0);
    }

    #[test]
    fn empty_itinerary_is_unreachable() {
        let flights = table(vec![flight(0, 1, 0, 10, 42.0, 1)]);
        let pricing = evaluate(&flights, &AllianceTable::default(), &[]);
        assert!(pricing.is_unreachable());
        assert_eq!(pricing.total, UNREACHABLE_COST);

        let mut scratch = vec![0.5];
        assert_eq!(
            total_cost(&flights, &AllianceTable::default(), &[], &mut scratch),
            UNREACHABLE_COST
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::planner::fixtures::{company, flight, table};
    use proptest::prelude::*;

    proptest! {
        /// Discounts are always one of the three multipliers, and an alliance
        /// between every company never makes an itinerary more expensive
        #[test]
        fn alliances_never_raise_cost(companies in prop::collection::vec(0u32..4, 1..8)) {
            let records = companies
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    let t = i as i64 * 100;
                    flight(i as u32, i as u32 + 1, t, t + 10, 10.0, c)
                })
                .collect();
            let flights = table(records);
            let legs: Vec<FlightIndex> = (0..companies.len() as u32).map(FlightIndex).collect();

            let plain = evaluate(&flights, &AllianceTable::default(), &legs);
            let everyone = AllianceTable::new(vec![(0..4).map(company).collect()]);
            let allied = evaluate(&flights, &everyone, &legs);

            for d in plain.discounts.iter().chain(allied.discounts.iter()) {
                prop_assert!([NO_DISCOUNT, COMPANY_DISCOUNT, ALLIANCE_DISCOUNT].contains(d));
            }
            for (a, p) in allied.discounts.iter().zip(plain.discounts.iter()) {
                prop_assert!(a <= p);
            }
            prop_assert!(allied.total <= plain.total + 1e-3);
        }
    }
}
