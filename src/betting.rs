//! Betting-round state machine: legal actions, action application, round completion and
//! street advancement.
//!
//! Every transition borrows a [`GameState`] and returns a new one; the input is never mutated.

use crate::game::GameState;
use crate::player::{next_seat, Player, PlayerId, PlayerStatus};
use crate::pot::compute_pots;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Community cards dealt when entering the next street (after one burn).
    fn cards_to_next(self) -> usize {
        match self {
            Street::Preflop => 3,
            Street::Flop | Street::Turn => 1,
            Street::River | Street::Showdown => 0,
        }
    }

    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
    Ante,
    SmallBlind,
    BigBlind,
}

impl ActionKind {
    /// Decisions a player made, as opposed to forced posts.
    pub fn is_voluntary(self) -> bool {
        !matches!(self, ActionKind::Ante | ActionKind::SmallBlind | ActionKind::BigBlind)
    }

    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Fold => "Fold",
            ActionKind::Check => "Check",
            ActionKind::Call => "Call",
            ActionKind::Bet => "Bet",
            ActionKind::Raise => "Raise",
            ActionKind::AllIn => "All-in",
            ActionKind::Ante => "Ante",
            ActionKind::SmallBlind => "SB",
            ActionKind::BigBlind => "BB",
        }
    }
}

/// One applied action; `amount` is the chips actually moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub player: PlayerId,
    pub kind: ActionKind,
    pub amount: u64,
    pub street: Street,
}

/// Legal actions and amount bounds for the player to act.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableActions {
    pub can_fold: bool,
    pub can_check: bool,
    pub can_call: bool,
    pub call_amount: u64,
    pub can_bet: bool,
    pub can_raise: bool,
    /// Smallest legal raise increment over the table bet.
    pub min_raise: u64,
    /// Smallest legal street total for a bet or raise, capped at `max_amount`. Pass it
    /// straight to [`execute_action`] as the amount.
    pub min_raise_to: u64,
    /// Street total if the player moves all in.
    pub max_amount: u64,
}

impl AvailableActions {
    /// Nothing is legal.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn any(&self) -> bool {
        self.can_fold || self.can_check || self.can_call || self.can_bet || self.can_raise
    }
}

fn actor(state: &GameState) -> Option<(usize, &Player)> {
    if state.is_hand_complete || matches!(state.street, Street::Showdown) {
        return None;
    }
    let seat = state.active_seat?;
    let player = state.players.get(seat)?;
    player.can_act().then_some((seat, player))
}

/// Legal actions for the active player; [`AvailableActions::none`] when nobody can act.
pub fn get_available_actions(state: &GameState) -> AvailableActions {
    let Some((_, p)) = actor(state) else {
        return AvailableActions::none();
    };
    let outstanding = state.current_bet.saturating_sub(p.current_bet);
    let call_amount = outstanding.min(p.stack);
    let max_amount = p.current_bet + p.stack;
    AvailableActions {
        can_fold: outstanding > 0,
        can_check: outstanding == 0,
        can_call: outstanding > 0,
        call_amount,
        can_bet: outstanding == 0 && p.stack > 0,
        can_raise: outstanding > 0 && p.stack > call_amount,
        min_raise: state.min_raise,
        min_raise_to: (state.current_bet + state.min_raise).min(max_amount),
        max_amount,
    }
}

/// Apply `kind` for the active player and pass the action to the next player able to act.
///
/// `amount` is the player's street total after a bet or raise; with no table bet that is also
/// the chips added. It is clamped into the legal range rather than rejected. A bet while the
/// table already has a bet (the big blind's option included) is applied as a raise, a raise
/// with no table bet as a bet, and a call with nothing to call as a check. Actions that cannot apply (checking into a bet, nobody to act, forced-post kinds)
/// leave the state unchanged.
pub fn execute_action(state: &GameState, kind: ActionKind, amount: u64) -> GameState {
    let mut next = state.clone();
    let Some((seat, _)) = actor(state) else {
        log::warn!("ignoring {kind:?}: no player can act");
        return next;
    };
    let outstanding = state.current_bet.saturating_sub(state.players[seat].current_bet);
    let kind = match kind {
        ActionKind::Bet if state.current_bet > 0 => ActionKind::Raise,
        ActionKind::Raise if state.current_bet == 0 => ActionKind::Bet,
        ActionKind::Call if outstanding == 0 => ActionKind::Check,
        ActionKind::Check if outstanding > 0 => {
            log::warn!("ignoring check from seat {seat}: facing {outstanding}");
            return next;
        }
        ActionKind::Ante | ActionKind::SmallBlind | ActionKind::BigBlind => {
            log::warn!("ignoring forced post {kind:?} as a player action");
            return next;
        }
        ActionKind::Fold if state.players.iter().filter(|p| !p.is_folded()).count() <= 1 => {
            log::warn!("ignoring fold from seat {seat}: last player in the hand");
            return next;
        }
        other => other,
    };

    let table_bet = next.current_bet;
    let min_raise = next.min_raise.max(1);
    let street = next.street;
    let p = &mut next.players[seat];
    let moved = match kind {
        ActionKind::Fold => {
            p.status = PlayerStatus::Folded;
            0
        }
        ActionKind::Check => 0,
        ActionKind::Call => p.commit(outstanding),
        ActionKind::Bet => {
            let size = amount.clamp(min_raise.min(p.stack), p.stack);
            if size != amount {
                log::debug!("bet of {amount} from seat {seat} clamped to {size}");
            }
            p.commit(size)
        }
        ActionKind::Raise => {
            let max_total = p.current_bet + p.stack;
            let min_total = (table_bet + min_raise).min(max_total);
            let target = amount.clamp(min_total, max_total);
            if target != amount {
                log::debug!("raise to {amount} from seat {seat} clamped to {target}");
            }
            p.commit(target - p.current_bet)
        }
        _ => p.commit(p.stack),
    };
    let new_bet = p.current_bet;
    let record = ActionRecord { player: p.id, kind, amount: moved, street };

    if new_bet > table_bet {
        next.min_raise = next.min_raise.max(new_bet - table_bet);
        next.current_bet = new_bet;
    }
    log::trace!("seat {seat} {} {moved} (table bet {})", kind.label(), next.current_bet);
    next.action_log.push(record);
    next.active_seat = next_seat(&next.players, seat, Player::can_act);
    next.pots = compute_pots(&next.players);
    next
}

fn has_acted_this_street(state: &GameState, player: PlayerId) -> bool {
    state
        .action_log
        .iter()
        .any(|r| r.player == player && r.street == state.street && r.kind.is_voluntary())
}

/// Whether the current betting round is over.
///
/// True when at most one player is left in the hand, when nobody left can act, when the only
/// player who can act has acted and matched the bet, or when everyone who can act has acted and
/// matched the bet.
pub fn is_betting_round_complete(state: &GameState) -> bool {
    if state.is_hand_complete || matches!(state.street, Street::Showdown) {
        return true;
    }
    let in_hand = state.players.iter().filter(|p| !p.is_folded()).count();
    if in_hand <= 1 {
        return true;
    }
    let actors: Vec<&Player> = state.players.iter().filter(|p| p.can_act()).collect();
    match actors.as_slice() {
        [] => true,
        [only] => has_acted_this_street(state, only.id) && only.current_bet >= state.current_bet,
        many => many
            .iter()
            .all(|p| has_acted_this_street(state, p.id) && p.current_bet == state.current_bet),
    }
}

/// Burn one card and deal the next street's community cards. No-op at River/Showdown.
pub(crate) fn deal_next_street(state: &mut GameState) {
    let n = state.street.cards_to_next();
    if n > 0 {
        state.deck.burn();
        let cards = state.deck.draw_n(n);
        state.board.extend(cards);
    }
    state.street = state.street.next();
}

/// Close the current street and open the next one.
///
/// Street bets and the table bet return to zero and the minimum raise to `big_blind`. Flop,
/// turn and river are each preceded by a burn; River moves to Showdown without dealing. Action
/// opens with the first seat left of the button that can still act.
pub fn advance_street(state: &GameState, big_blind: u64) -> GameState {
    let mut next = state.clone();
    if next.is_hand_complete || matches!(next.street, Street::Showdown) {
        return next;
    }
    for p in &mut next.players {
        p.current_bet = 0;
    }
    next.current_bet = 0;
    next.min_raise = big_blind;
    deal_next_street(&mut next);
    next.pots = compute_pots(&next.players);
    next.active_seat = if matches!(next.street, Street::Showdown) {
        None
    } else {
        next_seat(&next.players, next.dealer, Player::can_act)
    };
    log::debug!(
        "hand {} advanced to {:?}; board {:?}, pots {:?}",
        next.hand_number,
        next.street,
        next.board.as_slice(),
        next.pots.iter().map(|p| p.amount).collect::<Vec<_>>()
    );
    next
}
