pub(crate) mod combinations;
pub(crate) mod describe;

use crate::cards::{Card, Rank};
use combinations::FiveOf;
use core::cmp::Ordering;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Poker hand category from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[repr(u8)]
pub enum Category {
    HighCard = 0,
    Pair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    /// A straight flush topped by an Ace.
    RoyalFlush = 9,
}

/// Compact, comparable hand strength. Higher is better.
///
/// Layout (most significant first): `[ category (4 bits) | tiebreak (20 bits) ]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandValue(u32);

impl HandValue {
    const TIEBREAK_BITS: u32 = 20;

    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn new(category: Category, tiebreak: u32) -> Self {
        HandValue(((category as u32) << Self::TIEBREAK_BITS) | tiebreak)
    }
}

/// Encode up to five significant ranks, most significant first, 4 bits each.
///
/// Ranks never exceed 14, so any rank in position `i` outweighs every combination of ranks in
/// positions `i + 1..`.
fn encode_tiebreak(ranks: &[Rank]) -> u32 {
    ranks
        .iter()
        .take(5)
        .enumerate()
        .fold(0u32, |acc, (i, r)| acc | (u32::from(r.value()) << (4 * (4 - i as u32))))
}

/// Result of evaluating a set of cards. Ordering follows `(category, tiebreak)` only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[non_exhaustive]
pub struct HandEvaluation {
    pub category: Category,
    pub tiebreak: u32,
    /// Winning five cards ordered by significance.
    pub best_five: [Card; 5],
    pub description: String,
}

impl HandEvaluation {
    /// Packed comparable value for ordering/caching.
    pub const fn value(&self) -> HandValue {
        HandValue::new(self.category, self.tiebreak)
    }
}

impl Ord for HandEvaluation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value().cmp(&other.value())
    }
}

impl PartialOrd for HandEvaluation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for HandEvaluation {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for HandEvaluation {}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
    #[error("at least 5 cards are required to evaluate a hand, got {got}")]
    InsufficientCards { got: usize },
    #[error("card {0} appears more than once")]
    DuplicateCard(Card),
}

/// Category and tiebreak of five cards, without the description.
struct Ranked {
    category: Category,
    tiebreak: u32,
    best_five: [Card; 5],
}

impl Ranked {
    fn value(&self) -> HandValue {
        HandValue::new(self.category, self.tiebreak)
    }

    fn into_evaluation(self) -> HandEvaluation {
        let description = describe::describe(self.category, &self.best_five);
        HandEvaluation {
            category: self.category,
            tiebreak: self.tiebreak,
            best_five: self.best_five,
            description,
        }
    }
}

fn rank_five(cards: &[Card; 5]) -> Ranked {
    let mut counts = [0u8; 15];
    for c in cards {
        counts[c.rank() as usize] += 1;
    }

    // (rank, count) sorted by count desc then rank desc; the rank sequence is the tiebreak for
    // every non-straight category.
    let mut groups: Vec<(Rank, u8)> = Rank::ALL
        .iter()
        .rev()
        .filter_map(|&r| {
            let c = counts[r as usize];
            (c > 0).then_some((r, c))
        })
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));
    let group_ranks: Vec<Rank> = groups.iter().map(|(r, _)| *r).collect();

    let is_flush = cards.iter().all(|c| c.suit() == cards[0].suit());
    let straight_high = if groups.len() == 5 {
        let hi = group_ranks[0].value();
        let lo = group_ranks[4].value();
        if hi - lo == 4 {
            Some(group_ranks[0])
        } else if group_ranks == [Rank::Ace, Rank::Five, Rank::Four, Rank::Three, Rank::Two] {
            // The wheel plays five-high.
            Some(Rank::Five)
        } else {
            None
        }
    } else {
        None
    };

    let mut best_five = *cards;
    best_five.sort_by(|a, b| {
        counts[b.rank() as usize]
            .cmp(&counts[a.rank() as usize])
            .then(b.rank().cmp(&a.rank()))
            .then(b.suit().cmp(&a.suit()))
    });
    if straight_high == Some(Rank::Five) {
        best_five.rotate_left(1);
    }

    let (category, tiebreak) = match (straight_high, is_flush) {
        (Some(Rank::Ace), true) => (Category::RoyalFlush, encode_tiebreak(&[Rank::Ace])),
        (Some(high), true) => (Category::StraightFlush, encode_tiebreak(&[high])),
        _ if groups[0].1 == 4 => (Category::FourOfAKind, encode_tiebreak(&group_ranks)),
        _ if groups[0].1 == 3 && groups.len() == 2 => {
            (Category::FullHouse, encode_tiebreak(&group_ranks))
        }
        (_, true) => (Category::Flush, encode_tiebreak(&group_ranks)),
        (Some(high), false) => (Category::Straight, encode_tiebreak(&[high])),
        _ if groups[0].1 == 3 => (Category::ThreeOfAKind, encode_tiebreak(&group_ranks)),
        _ if groups[0].1 == 2 && groups[1].1 == 2 => {
            (Category::TwoPair, encode_tiebreak(&group_ranks))
        }
        _ if groups[0].1 == 2 => (Category::Pair, encode_tiebreak(&group_ranks)),
        _ => (Category::HighCard, encode_tiebreak(&group_ranks)),
    };

    Ranked { category, tiebreak, best_five }
}

/// Evaluate exactly five cards.
pub fn evaluate_five(cards: &[Card; 5]) -> HandEvaluation {
    rank_five(cards).into_evaluation()
}

/// Evaluate the best five-card hand from 5..=7 cards.
///
/// Every five-card subset is ranked (21 of them for seven cards) and the maximal
/// `(category, tiebreak)` wins.
///
/// ```
/// use holdem_engine::cards::parse_cards;
/// use holdem_engine::evaluator::{evaluate_hand, Category};
///
/// let cards = parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap();
/// let eval = evaluate_hand(&cards).unwrap();
/// assert_eq!(eval.category, Category::Pair);
/// assert_eq!(eval.description, "Pair of Aces");
/// ```
pub fn evaluate_hand(cards: &[Card]) -> Result<HandEvaluation, EvalError> {
    if cards.len() < FiveOf::K {
        return Err(EvalError::InsufficientCards { got: cards.len() });
    }
    let mut seen = HashSet::with_capacity(cards.len());
    if let Some(dup) = cards.iter().find(|c| !seen.insert(**c)) {
        return Err(EvalError::DuplicateCard(*dup));
    }

    let mut best: Option<Ranked> = None;
    for [a, b, c, d, e] in FiveOf::new(cards.len()) {
        let ranked = rank_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
        if best.as_ref().map_or(true, |cur| ranked.value() > cur.value()) {
            best = Some(ranked);
        }
    }
    best.map(Ranked::into_evaluation).ok_or(EvalError::InsufficientCards { got: cards.len() })
}

/// Order two evaluations; `Equal` is a true tie.
pub fn compare_hands(a: &HandEvaluation, b: &HandEvaluation) -> Ordering {
    a.cmp(b)
}
