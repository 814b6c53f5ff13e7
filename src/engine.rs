// Engine API boundary. This trait exposes the table transitions and queries so drivers (UIs,
// bots, replay tools) can run a table without depending on module layout. It is implemented
// for `GameState`; every transition returns a new state and leaves `self` untouched.

use crate::betting::{ActionKind, AvailableActions, Street};
use crate::game::GameState;
use crate::hand::{Board, HoleCards};
use crate::settings::TableSettings;
use crate::showdown::Winner;
use rand::RngCore;

pub trait HoldemEngine: Sized {
    // Hand lifecycle
    fn start_new_hand(&self, settings: &TableSettings, rng: &mut dyn RngCore) -> Self;
    fn advance_street(&self) -> Self;
    fn complete_hand(&self) -> Self;

    // Player actions
    fn execute_action(&self, kind: ActionKind, amount: u64) -> Self;

    // Queries
    fn available_actions(&self) -> AvailableActions;
    fn is_betting_round_complete(&self) -> bool;
    fn to_call(&self, seat: usize) -> u64;
    fn pot(&self) -> u64;
    fn hole_cards(&self, seat: usize) -> Option<HoleCards>;
    fn board(&self) -> &Board;
    fn stack(&self, seat: usize) -> u64;
    fn current(&self) -> Option<usize>;
    fn dealer(&self) -> usize;
    fn street(&self) -> Street;
    fn winners(&self) -> &[Winner];
    fn num_players(&self) -> usize;
}

impl HoldemEngine for GameState {
    fn start_new_hand(&self, settings: &TableSettings, rng: &mut dyn RngCore) -> Self {
        crate::game::start_new_hand(self, settings, rng)
    }
    fn advance_street(&self) -> Self {
        crate::betting::advance_street(self, self.big_blind)
    }
    fn complete_hand(&self) -> Self {
        crate::game::complete_hand(self)
    }

    fn execute_action(&self, kind: ActionKind, amount: u64) -> Self {
        crate::betting::execute_action(self, kind, amount)
    }

    fn available_actions(&self) -> AvailableActions {
        crate::betting::get_available_actions(self)
    }
    fn is_betting_round_complete(&self) -> bool {
        crate::betting::is_betting_round_complete(self)
    }
    fn to_call(&self, seat: usize) -> u64 {
        GameState::to_call(self, seat)
    }
    fn pot(&self) -> u64 {
        self.pot_total()
    }
    fn hole_cards(&self, seat: usize) -> Option<HoleCards> {
        self.players.get(seat).and_then(|p| p.hole)
    }
    fn board(&self) -> &Board {
        &self.board
    }
    fn stack(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| p.stack)
    }
    fn current(&self) -> Option<usize> {
        self.active_seat
    }
    fn dealer(&self) -> usize {
        self.dealer
    }
    fn street(&self) -> Street {
        self.street
    }
    fn winners(&self) -> &[Winner] {
        &self.winners
    }
    fn num_players(&self) -> usize {
        self.players.len()
    }
}
