#![allow(dead_code)]

use holdem_engine::cards::parse_cards;
use holdem_engine::hand::HoleCards;
use holdem_engine::{
    advance_street, complete_hand, create_initial_game_state, execute_action,
    is_betting_round_complete, start_new_hand, ActionKind, GameState, Player, PlayerId,
    PlayerStatus, Street, TableSettings,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub fn settings(opponents: usize, stack: u64) -> TableSettings {
    TableSettings { opponent_count: opponents, starting_stack: stack, ..Default::default() }
}

/// A fresh table with the first hand dealt from a seeded deck.
pub fn dealt(opponents: usize, stack: u64, seed: u64) -> GameState {
    let cfg = settings(opponents, stack);
    let table = create_initial_game_state(&cfg).expect("valid settings");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    start_new_hand(&table, &cfg, &mut rng)
}

pub fn hole(s: &str) -> HoleCards {
    s.parse().expect("valid hole cards")
}

/// A player who has put `contributed` into the pot and holds `cards`.
pub fn contender(i: u32, cards: &str, contributed: u64, status: PlayerStatus) -> Player {
    let mut p = Player::new(PlayerId(i), format!("P{i}"), 0, i as usize, false);
    p.hole = Some(hole(cards));
    p.total_bet_this_hand = contributed;
    p.status = status;
    p
}

pub fn in_hand(state: &GameState) -> usize {
    state.players.iter().filter(|p| !p.is_folded()).count()
}

pub fn stacks(state: &GameState) -> u64 {
    state.players.iter().map(|p| p.stack).sum()
}

/// Close the round if it is over: finish the hand at the river or with one player left,
/// otherwise move to the next street.
pub fn step_street(state: GameState) -> GameState {
    if !is_betting_round_complete(&state) {
        return state;
    }
    if in_hand(&state) <= 1 || matches!(state.street, Street::River | Street::Showdown) {
        complete_hand(&state)
    } else {
        advance_street(&state, state.big_blind)
    }
}

/// Call (or check) every decision until the hand is complete.
pub fn call_down(mut state: GameState) -> GameState {
    for _ in 0..200 {
        if state.is_hand_complete {
            return state;
        }
        if is_betting_round_complete(&state) {
            state = step_street(state);
        } else {
            state = execute_action(&state, ActionKind::Call, 0);
        }
    }
    panic!("hand did not finish: {state:?}");
}

pub fn cards(s: &str) -> Vec<holdem_engine::Card> {
    parse_cards(s).expect("valid cards")
}
