use super::Category;
use crate::cards::Card;

/// Human-readable label for a five-card hand.
///
/// `best_five` must be ordered by significance (grouped cards first, wheel Ace last), which is
/// how [`super::evaluate_five`] returns it.
pub(crate) fn describe(category: Category, best_five: &[Card; 5]) -> String {
    let r = |i: usize| best_five[i].rank();
    match category {
        Category::RoyalFlush => "Royal Flush".to_string(),
        Category::StraightFlush => format!("Straight Flush, {}-high", r(0).name()),
        Category::FourOfAKind => format!("Four of a Kind, {}", r(0).plural()),
        Category::FullHouse => format!("Full House, {} full of {}", r(0).plural(), r(3).plural()),
        Category::Flush => format!("Flush, {}-high", r(0).name()),
        Category::Straight => format!("Straight, {}-high", r(0).name()),
        Category::ThreeOfAKind => format!("Three of a Kind, {}", r(0).plural()),
        Category::TwoPair => format!("Two Pair, {} and {}", r(0).plural(), r(2).plural()),
        Category::Pair => format!("Pair of {}", r(0).plural()),
        Category::HighCard => format!("High Card, {}", r(0).name()),
    }
}
