use crate::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// A bucket of chips and the players who can win it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u64,
    /// Eligible players in seat order.
    pub eligible: Vec<PlayerId>,
}

/// Split the hand's contributions into a main pot and side pots.
///
/// Pots are cut at every all-in contribution below the largest contribution, plus the largest
/// itself. Every contributor, folded or not, funds each slice up to what they put in; only
/// non-folded players who reached a slice's level may win it. A slice nobody can win is merged
/// into the pot below it. The amounts always sum to the players' total contributions.
///
/// ```
/// use holdem_engine::player::{Player, PlayerId, PlayerStatus};
/// use holdem_engine::pot::compute_pots;
///
/// let players: Vec<Player> = [30, 50, 100]
///     .iter()
///     .enumerate()
///     .map(|(i, &c)| {
///         let mut p = Player::new(PlayerId(i as u32), format!("P{i}"), 0, i, false);
///         p.total_bet_this_hand = c;
///         p.status = PlayerStatus::AllIn;
///         p
///     })
///     .collect();
/// let pots = compute_pots(&players);
/// let sizes: Vec<u64> = pots.iter().map(|p| p.amount).collect();
/// assert_eq!(sizes, vec![90, 40, 50]);
/// ```
pub fn compute_pots(players: &[Player]) -> Vec<Pot> {
    let total: u64 = players.iter().map(|p| p.total_bet_this_hand).sum();
    if total == 0 {
        return Vec::new();
    }
    let max = players.iter().map(|p| p.total_bet_this_hand).max().unwrap_or(0);

    let mut levels: Vec<u64> = players
        .iter()
        .filter(|p| p.is_all_in() && p.total_bet_this_hand > 0 && p.total_bet_this_hand < max)
        .map(|p| p.total_bet_this_hand)
        .collect();
    if levels.is_empty() {
        let eligible = players.iter().filter(|p| !p.is_folded()).map(|p| p.id).collect();
        return vec![Pot { amount: total, eligible }];
    }
    levels.push(max);
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<Pot> = Vec::with_capacity(levels.len());
    let mut floor = 0u64;
    for level in levels {
        let amount: u64 = players
            .iter()
            .map(|p| p.total_bet_this_hand.clamp(floor, level) - floor)
            .sum();
        let eligible: Vec<PlayerId> = players
            .iter()
            .filter(|p| !p.is_folded() && p.total_bet_this_hand >= level)
            .map(|p| p.id)
            .collect();
        floor = level;
        if amount == 0 {
            continue;
        }
        match pots.last_mut() {
            Some(prev) if eligible.is_empty() => {
                log::debug!("merging {amount} dead chips above level {level} into previous pot");
                prev.amount += amount;
            }
            _ => pots.push(Pot { amount, eligible }),
        }
    }
    pots
}

/// Sum of all pot amounts.
pub fn pot_total(pots: &[Pot]) -> u64 {
    pots.iter().map(|p| p.amount).sum()
}
