//! holdem-engine: No-Limit Texas Hold'em rules engine
//!
//! Goals:
//! - Exact chip accounting: chips are conserved across every transition
//! - Deterministic hand ranking with a total order over 5–7 card hands
//! - Pure transitions: each operation borrows a state and returns a new one
//! - No panics for invalid input; use `Result` for recoverable errors
//!
//! ## Quick start: evaluate a Hold'em hand
//! ```
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::evaluator::{evaluate_hand, Category};
//!
//! let cards = parse_cards("As Ah Kc Qd Jh 3s 2c").unwrap();
//! let eval = evaluate_hand(&cards).unwrap();
//! assert_eq!(eval.category, Category::Pair);
//! assert_eq!(eval.description, "Pair of Aces");
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_engine::{
//!     advance_street, complete_hand, create_initial_game_state, execute_action,
//!     is_betting_round_complete, start_new_hand, ActionKind, Street, TableSettings,
//! };
//! use rand::SeedableRng;
//!
//! let settings = TableSettings::default();
//! let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
//! let table = create_initial_game_state(&settings).unwrap();
//! let mut state = start_new_hand(&table, &settings, &mut rng);
//! while state.street != Street::Showdown {
//!     while !is_betting_round_complete(&state) {
//!         state = execute_action(&state, ActionKind::Call, 0);
//!     }
//!     state = advance_street(&state, settings.big_blind);
//! }
//! let done = complete_hand(&state);
//! assert!(done.is_hand_complete);
//! assert_eq!(done.players.iter().map(|p| p.stack).sum::<u64>(), 6 * settings.starting_stack);
//! ```

pub mod betting;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod settings;
pub mod showdown;

pub use betting::{
    advance_street, execute_action, get_available_actions, is_betting_round_complete, ActionKind,
    ActionRecord, AvailableActions, Street,
};
pub use cards::{Card, Rank, Suit};
pub use engine::HoldemEngine;
pub use evaluator::{compare_hands, evaluate_hand, Category, EvalError, HandEvaluation};
pub use game::{complete_hand, create_initial_game_state, start_new_hand, GameState};
pub use player::{Player, PlayerId, PlayerStatus, Position};
pub use pot::{compute_pots, Pot};
pub use settings::{SettingsError, TableSettings};
pub use showdown::Winner;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
