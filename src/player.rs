use crate::hand::HoleCards;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identity of a seated player, independent of seat order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum PlayerStatus {
    Active,
    Folded,
    AllIn,
}

/// Table position relative to the button for the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Position {
    Button,
    /// Heads-up button, who also posts the small blind.
    ButtonSmallBlind,
    SmallBlind,
    BigBlind,
    UnderTheGun,
    Middle,
    Hijack,
    Cutoff,
}

impl Position {
    /// Position of the seat `offset` places left of the button at a table of `dealt_in` players.
    pub fn assign(offset: usize, dealt_in: usize) -> Position {
        match (offset, dealt_in) {
            (0, 2) => Position::ButtonSmallBlind,
            (0, _) => Position::Button,
            (1, 2) => Position::BigBlind,
            (1, _) => Position::SmallBlind,
            (2, _) => Position::BigBlind,
            (3, _) => Position::UnderTheGun,
            (k, n) if k + 1 == n => Position::Cutoff,
            (k, n) if k + 2 == n => Position::Hijack,
            _ => Position::Middle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::Button => "BTN",
            Position::ButtonSmallBlind => "BTN/SB",
            Position::SmallBlind => "SB",
            Position::BigBlind => "BB",
            Position::UnderTheGun => "UTG",
            Position::Middle => "MP",
            Position::Hijack => "HJ",
            Position::Cutoff => "CO",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub stack: u64,
    pub hole: Option<HoleCards>,
    /// Chips put in on the current street; reset when the street advances.
    pub current_bet: u64,
    /// Chips put in over the whole hand, antes included.
    pub total_bet_this_hand: u64,
    pub status: PlayerStatus,
    pub is_human: bool,
    pub position: Option<Position>,
    pub seat: usize,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, stack: u64, seat: usize, is_human: bool) -> Self {
        Self {
            id,
            name: name.into(),
            stack,
            hole: None,
            current_bet: 0,
            total_bet_this_hand: 0,
            status: PlayerStatus::Active,
            is_human,
            position: None,
            seat,
        }
    }

    pub fn is_folded(&self) -> bool {
        matches!(self.status, PlayerStatus::Folded)
    }

    pub fn is_all_in(&self) -> bool {
        matches!(self.status, PlayerStatus::AllIn)
    }

    /// Neither folded nor all-in: still has decisions to make this hand.
    pub fn can_act(&self) -> bool {
        matches!(self.status, PlayerStatus::Active)
    }

    /// Move up to `amount` from the stack into the street bet. Returns the chips actually moved.
    pub(crate) fn commit(&mut self, amount: u64) -> u64 {
        let pay = self.stack.min(amount);
        self.stack -= pay;
        self.current_bet += pay;
        self.total_bet_this_hand += pay;
        if self.stack == 0 && pay > 0 {
            self.status = PlayerStatus::AllIn;
        }
        pay
    }

    /// Post dead chips (an ante): they count toward the pot but not the street bet.
    pub(crate) fn post_dead(&mut self, amount: u64) -> u64 {
        let pay = self.stack.min(amount);
        self.stack -= pay;
        self.total_bet_this_hand += pay;
        if self.stack == 0 && pay > 0 {
            self.status = PlayerStatus::AllIn;
        }
        pay
    }

    /// Clear per-hand state. A player with no chips sits the hand out as folded.
    pub(crate) fn reset_for_new_hand(&mut self) {
        self.hole = None;
        self.current_bet = 0;
        self.total_bet_this_hand = 0;
        self.position = None;
        self.status = if self.stack == 0 { PlayerStatus::Folded } else { PlayerStatus::Active };
    }
}

/// First seat after `from` (wrapping, `from` itself checked last) whose player satisfies `pred`.
pub(crate) fn next_seat<F>(players: &[Player], from: usize, pred: F) -> Option<usize>
where
    F: Fn(&Player) -> bool,
{
    let n = players.len();
    (1..=n).map(|step| (from + step) % n).find(|&i| pred(&players[i]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seat(i: usize, stack: u64) -> Player {
        Player::new(PlayerId(i as u32), format!("P{i}"), stack, i, false)
    }

    #[test]
    fn commit_clamps_to_stack_and_marks_all_in() {
        let mut p = seat(0, 30);
        assert_eq!(p.commit(10), 10);
        assert_eq!((p.stack, p.current_bet, p.total_bet_this_hand), (20, 10, 10));
        assert!(p.can_act());
        assert_eq!(p.commit(100), 20);
        assert_eq!(p.stack, 0);
        assert!(p.is_all_in());
    }

    #[test]
    fn antes_are_dead_money() {
        let mut p = seat(0, 30);
        assert_eq!(p.post_dead(5), 5);
        assert_eq!((p.current_bet, p.total_bet_this_hand), (0, 5));
    }

    #[test]
    fn busted_players_sit_out() {
        let mut p = seat(0, 0);
        p.reset_for_new_hand();
        assert!(p.is_folded());
        let mut q = seat(1, 10);
        q.status = PlayerStatus::AllIn;
        q.reset_for_new_hand();
        assert!(q.can_act());
    }

    #[test]
    fn next_seat_wraps_and_checks_origin_last() {
        let mut players: Vec<Player> = (0..4).map(|i| seat(i, 100)).collect();
        players[3].status = PlayerStatus::Folded;
        assert_eq!(next_seat(&players, 2, Player::can_act), Some(0));
        players[0].status = PlayerStatus::Folded;
        players[1].status = PlayerStatus::AllIn;
        assert_eq!(next_seat(&players, 2, Player::can_act), Some(2));
        players[2].status = PlayerStatus::Folded;
        assert_eq!(next_seat(&players, 2, Player::can_act), None);
        assert_eq!(next_seat(&[], 0, Player::can_act), None);
    }

    #[test]
    fn positions_follow_the_button() {
        let six: Vec<Position> = (0..6).map(|k| Position::assign(k, 6)).collect();
        assert_eq!(
            six,
            vec![
                Position::Button,
                Position::SmallBlind,
                Position::BigBlind,
                Position::UnderTheGun,
                Position::Hijack,
                Position::Cutoff,
            ]
        );
        assert_eq!(Position::assign(0, 2), Position::ButtonSmallBlind);
        assert_eq!(Position::assign(1, 2), Position::BigBlind);
        assert_eq!(Position::assign(4, 7), Position::Middle);
        assert_eq!(Position::Cutoff.to_string(), "CO");
    }
}
