//! Candidate generation: enumeration of broken-wing strike triples.

use rust_decimal::Decimal;

use crate::data::{OptionsChain, Quote};

/// Lazy iterator over every structurally valid (K1, K2, K3) triple.
///
/// The chain's calls are already sorted by ascending strike with duplicates
/// removed, so walking index triples i < j < k guarantees K1 < K2 < K3.
/// A triple is yielded only when the outer wing is strictly wider than the
/// inner wing. The iterator holds no other state: iterating the same chain
/// twice yields the same sequence.
pub struct StrikeTriples<'a> {
    calls: &'a [Quote],
    i: usize,
    j: usize,
    k: usize,
}

/// Enumerate broken-wing triples from a chain.
///
/// Fewer than three distinct call strikes yields an empty iterator.
pub fn strike_triples(chain: &OptionsChain) -> StrikeTriples<'_> {
    StrikeTriples {
        calls: &chain.calls,
        i: 0,
        j: 1,
        k: 2,
    }
}

impl<'a> Iterator for StrikeTriples<'a> {
    type Item = [&'a Quote; 3];

    fn next(&mut self) -> Option<Self::Item> {
        let calls = self.calls;
        let n = calls.len();
        loop {
            if self.i + 2 >= n {
                return None;
            }
            if self.k >= n {
                self.j += 1;
                self.k = self.j + 1;
                if self.j + 1 >= n {
                    self.i += 1;
                    self.j = self.i + 1;
                    self.k = self.j + 1;
                }
                continue;
            }

            let low = &calls[self.i];
            let body = &calls[self.j];
            let high = &calls[self.k];
            self.k += 1;

            let inner_wing = body.strike - low.strike;
            let outer_wing = high.strike - body.strike;
            if inner_wing > Decimal::ZERO && outer_wing > inner_wing {
                return Some([low, body, high]);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::OptionType;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn chain_of(strikes: &[Decimal]) -> OptionsChain {
        let expiry = NaiveDate::from_ymd_opt(2025, 1, 17).unwrap();
        let calls = strikes
            .iter()
            .map(|&strike| Quote {
                symbol: "XYZ".to_string(),
                expiry,
                dte: 5,
                strike,
                option_type: OptionType::Call,
                bid: dec!(1.0),
                ask: dec!(1.2),
                mid: dec!(1.1),
                delta: 0.30,
                iv: 0.25,
            })
            .collect();
        OptionsChain {
            symbol: "XYZ".to_string(),
            expiry: Some(expiry),
            calls,
        }
    }

    #[test]
    fn test_triples_are_strictly_ordered_and_broken() {
        let chain = chain_of(&[dec!(90), dec!(95), dec!(100), dec!(110), dec!(120)]);
        let triples: Vec<_> = strike_triples(&chain).collect();
        assert!(!triples.is_empty());

        for [low, body, high] in &triples {
            assert!(low.strike < body.strike);
            assert!(body.strike < high.strike);
            assert!(high.strike - body.strike > body.strike - low.strike);
        }
    }

    #[test]
    fn test_symmetric_wings_excluded() {
        // 90/100/110 is a symmetric fly; only the widened upper wings remain
        let chain = chain_of(&[dec!(90), dec!(100), dec!(110), dec!(125)]);
        let triples: Vec<Vec<Decimal>> = strike_triples(&chain)
            .map(|t| t.iter().map(|q| q.strike).collect())
            .collect();

        assert!(!triples.contains(&vec![dec!(90), dec!(100), dec!(110)]));
        assert!(triples.contains(&vec![dec!(90), dec!(100), dec!(125)]));
        assert!(triples.contains(&vec![dec!(100), dec!(110), dec!(125)]));
    }

    #[test]
    fn test_exhaustive_over_small_chain() {
        // 4 strikes with every upper wing wider: all C(4,3) = 4 triples pass
        let chain = chain_of(&[dec!(100), dec!(101), dec!(103), dec!(107)]);
        assert_eq!(strike_triples(&chain).count(), 4);
    }

    #[test]
    fn test_fewer_than_three_strikes_yields_nothing() {
        assert_eq!(strike_triples(&chain_of(&[])).count(), 0);
        assert_eq!(strike_triples(&chain_of(&[dec!(100)])).count(), 0);
        assert_eq!(strike_triples(&chain_of(&[dec!(100), dec!(110)])).count(), 0);
    }

    #[test]
    fn test_iteration_is_restartable() {
        let chain = chain_of(&[dec!(90), dec!(95), dec!(100), dec!(110), dec!(120)]);
        let first: Vec<Vec<Decimal>> = strike_triples(&chain)
            .map(|t| t.iter().map(|q| q.strike).collect())
            .collect();
        let second: Vec<Vec<Decimal>> = strike_triples(&chain)
            .map(|t| t.iter().map(|q| q.strike).collect())
            .collect();
        assert_eq!(first, second);
    }
}
