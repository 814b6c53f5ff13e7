use crate::cards::{Card, Rank, Suit};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// The 52 cards in canonical order: clubs, diamonds, hearts, spades, each Two..Ace.
///
/// ```
/// use holdem_engine::deck::create_deck;
///
/// let cards = create_deck();
/// assert_eq!(cards.len(), 52);
/// assert_eq!(cards[0].to_string(), "2c");
/// assert_eq!(cards[51].to_string(), "As");
/// ```
pub fn create_deck() -> Vec<Card> {
    Suit::ALL.iter().flat_map(|&s| Rank::ALL.iter().map(move |&r| Card::new(r, s))).collect()
}

/// Fisher–Yates: for `i` from the last index down to 1, swap `i` with a uniform index in `[0, i]`.
pub fn shuffle<R: Rng + ?Sized>(cards: &[Card], rng: &mut R) -> Vec<Card> {
    let mut out = cards.to_vec();
    for i in (1..out.len()).rev() {
        let j = rng.random_range(0..=i);
        out.swap(i, j);
    }
    out
}

/// Remaining cards of a deck, dealt from the front.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    cards: VecDeque<Card>,
}

impl Deck {
    /// An unshuffled deck in canonical order.
    pub fn standard() -> Self {
        Self { cards: create_deck().into() }
    }

    /// A freshly shuffled deck drawn from `rng`.
    pub fn shuffled_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self { cards: shuffle(&create_deck(), rng).into() }
    }

    /// Shuffled with a ChaCha8 stream seeded from `seed`, for replayable hands.
    pub fn shuffled(seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::shuffled_with(&mut rng)
    }

    /// Build a deck that deals exactly `cards`, front first.
    pub fn from_cards(cards: Vec<Card>) -> Self {
        Self { cards: cards.into() }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards still to be dealt, front first.
    pub fn remaining(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Deal one card from the front.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop_front()
    }

    /// Deal up to `n` cards from the front.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).filter_map(|_| self.draw()).collect()
    }

    /// Discard the front card face down.
    pub fn burn(&mut self) {
        let _ = self.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn standard_deck_has_52_unique_cards() {
        let d = Deck::standard();
        assert_eq!(d.len(), 52);
        let set: HashSet<Card> = d.remaining().copied().collect();
        assert_eq!(set.len(), 52);
    }

    #[test]
    fn seeded_shuffle_is_reproducible() {
        let d1 = Deck::shuffled(42);
        let d2 = Deck::shuffled(42);
        assert_eq!(d1, d2);
        assert_ne!(d1, Deck::standard());
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let base = create_deck();
        let shuffled = shuffle(&base, &mut rng);
        let mut a = base.clone();
        let mut b = shuffled.clone();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn shuffle_of_empty_and_single_is_identity() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(shuffle(&[], &mut rng).is_empty());
        let one = [Card::new(Rank::Ace, Suit::Spades)];
        assert_eq!(shuffle(&one, &mut rng), one.to_vec());
    }

    #[test]
    fn draws_come_from_the_front() {
        let mut d = Deck::standard();
        assert_eq!(d.draw(), Some(Card::new(Rank::Two, Suit::Clubs)));
        d.burn();
        assert_eq!(d.draw(), Some(Card::new(Rank::Four, Suit::Clubs)));
        assert_eq!(d.len(), 49);
        let hand = d.draw_n(5);
        assert_eq!(hand.len(), 5);
        assert_eq!(d.len(), 44);
    }

    #[test]
    fn draw_n_stops_when_exhausted() {
        let mut d = Deck::from_cards(vec![Card::new(Rank::Ace, Suit::Spades)]);
        assert_eq!(d.draw_n(3).len(), 1);
        assert!(d.is_empty());
        assert_eq!(d.draw(), None);
    }
}
