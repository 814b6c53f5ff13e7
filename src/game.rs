use crate::betting::{deal_next_street, ActionKind, ActionRecord, Street};
use crate::cards::Card;
use crate::deck::Deck;
use crate::hand::{Board, HoleCards};
use crate::player::{next_seat, Player, PlayerId, Position};
use crate::pot::{compute_pots, pot_total, Pot};
use crate::settings::{SettingsError, TableSettings};
use crate::showdown::{resolve_by_fold, resolve_showdown, Winner};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Complete table state between two engine calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct GameState {
    pub hand_number: u64,
    pub street: Street,
    pub deck: Deck,
    pub board: Board,
    pub pots: Vec<Pot>,
    /// Highest street bet on the table.
    pub current_bet: u64,
    /// Minimum raise increment over `current_bet`.
    pub min_raise: u64,
    /// Players in seat order.
    pub players: Vec<Player>,
    pub dealer: usize,
    pub active_seat: Option<usize>,
    pub action_log: Vec<ActionRecord>,
    pub is_hand_complete: bool,
    pub winners: Vec<Winner>,
    pub small_blind: u64,
    pub big_blind: u64,
    pub ante: u64,
    pub sb_seat: Option<usize>,
    pub bb_seat: Option<usize>,
}

impl GameState {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn active_player(&self) -> Option<&Player> {
        self.active_seat.and_then(|s| self.players.get(s))
    }

    /// Chips still owed by `seat` to match the table bet.
    pub fn to_call(&self, seat: usize) -> u64 {
        self.players.get(seat).map_or(0, |p| self.current_bet.saturating_sub(p.current_bet))
    }

    pub fn pot_total(&self) -> u64 {
        pot_total(&self.pots)
    }

    /// Every chip at the table while a hand is running: stacks plus everything committed.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| p.stack + p.total_bet_this_hand).sum()
    }

    /// Last `n` entries of the action log.
    pub fn history_recent(&self, n: usize) -> &[ActionRecord] {
        self.history_recent_offset(n, 0)
    }

    /// Up to `n` entries ending `offset` entries before the newest one.
    pub fn history_recent_offset(&self, n: usize, offset: usize) -> &[ActionRecord] {
        let end = self.action_log.len().saturating_sub(offset);
        let start = end.saturating_sub(n);
        &self.action_log[start..end]
    }

    fn record(&mut self, seat: usize, kind: ActionKind, amount: u64) {
        let player = self.players[seat].id;
        self.action_log.push(ActionRecord { player, kind, amount, street: self.street });
    }
}

/// Seat the human and the AI opponents; no hand is in progress yet.
pub fn create_initial_game_state(settings: &TableSettings) -> Result<GameState, SettingsError> {
    settings.validate()?;
    let players: Vec<Player> = (0..settings.player_count())
        .map(|seat| {
            let id = PlayerId(seat as u32);
            if seat == 0 {
                Player::new(id, settings.human_name.clone(), settings.starting_stack, seat, true)
            } else {
                Player::new(id, format!("Bot {seat}"), settings.starting_stack, seat, false)
            }
        })
        .collect();
    let dealer = players.len() - 1;
    Ok(GameState {
        hand_number: 0,
        street: Street::Preflop,
        deck: Deck::standard(),
        board: Board::default(),
        pots: Vec::new(),
        current_bet: 0,
        min_raise: settings.big_blind,
        players,
        dealer,
        active_seat: None,
        action_log: Vec::new(),
        is_hand_complete: true,
        winners: Vec::new(),
        small_blind: settings.small_blind,
        big_blind: settings.big_blind,
        ante: settings.ante,
        sb_seat: None,
        bb_seat: None,
    })
}

/// Shuffle, move the button, post antes and blinds, and deal hole cards.
///
/// Players without chips sit the hand out. With fewer than two players able to play, the
/// returned state stays hand-complete and nothing is dealt. If `state` is a hand still in
/// progress, every contribution to it goes back to the player who made it first.
pub fn start_new_hand<R: Rng + ?Sized>(
    state: &GameState,
    settings: &TableSettings,
    rng: &mut R,
) -> GameState {
    let mut next = state.clone();
    if !state.is_hand_complete {
        log::warn!(
            "hand {} replaced before completion; returning {} chip(s) to stacks",
            state.hand_number,
            state.players.iter().map(|p| p.total_bet_this_hand).sum::<u64>()
        );
        for p in &mut next.players {
            p.stack += p.total_bet_this_hand;
        }
    }
    next.hand_number += 1;
    next.small_blind = settings.small_blind;
    next.big_blind = settings.big_blind;
    next.ante = settings.ante;
    next.deck = Deck::shuffled_with(rng);
    next.board = Board::default();
    next.pots.clear();
    next.action_log.clear();
    next.winners.clear();
    next.street = Street::Preflop;
    next.current_bet = 0;
    next.min_raise = settings.big_blind;
    next.active_seat = None;
    next.sb_seat = None;
    next.bb_seat = None;
    for p in &mut next.players {
        p.reset_for_new_hand();
    }

    let dealt_in = next.players.iter().filter(|p| p.can_act()).count();
    if dealt_in < 2 {
        log::debug!("hand {} not dealt: {dealt_in} player(s) with chips", next.hand_number);
        next.is_hand_complete = true;
        return next;
    }
    next.is_hand_complete = false;

    let Some(dealer) = next_seat(&next.players, next.dealer, Player::can_act) else {
        next.is_hand_complete = true;
        return next;
    };
    next.dealer = dealer;

    // Seats dealt in, starting left of the button and ending on it.
    let order: Vec<usize> = (1..=next.players.len())
        .map(|k| (dealer + k) % next.players.len())
        .filter(|&s| next.players[s].can_act())
        .collect();
    for (k, &seat) in order.iter().enumerate() {
        let offset = (k + 1) % dealt_in;
        next.players[seat].position = Some(Position::assign(offset, dealt_in));
    }

    if settings.ante > 0 {
        for &seat in &order {
            let paid = next.players[seat].post_dead(settings.ante);
            next.record(seat, ActionKind::Ante, paid);
        }
    }

    let (sb, bb) = if dealt_in == 2 { (dealer, order[0]) } else { (order[0], order[1]) };
    let sb_paid = next.players[sb].commit(settings.small_blind);
    next.record(sb, ActionKind::SmallBlind, sb_paid);
    let bb_paid = next.players[bb].commit(settings.big_blind);
    next.record(bb, ActionKind::BigBlind, bb_paid);
    next.sb_seat = Some(sb);
    next.bb_seat = Some(bb);
    next.current_bet = sb_paid.max(bb_paid);

    // One card at a time, two passes round the table.
    let firsts: Vec<Option<Card>> = order.iter().map(|_| next.deck.draw()).collect();
    for (&seat, first) in order.iter().zip(firsts) {
        let second = next.deck.draw();
        next.players[seat].hole = match (first, second) {
            (Some(a), Some(b)) => HoleCards::try_new(a, b).ok(),
            _ => None,
        };
    }

    next.active_seat = next_seat(&next.players, bb, Player::can_act);
    next.pots = compute_pots(&next.players);
    log::debug!(
        "hand {} started: button seat {dealer}, blinds {}/{} ante {}, {dealt_in} dealt in",
        next.hand_number,
        settings.small_blind,
        settings.big_blind,
        settings.ante
    );
    next
}

/// Finish the hand: award the pots and credit stacks.
///
/// With one player left the pots go to them uncontested. Otherwise the board is run out to five
/// cards (burning before each street) and the hands are shown down. Pots and contributions
/// stay on the returned state as a record of the hand until the next one starts.
pub fn complete_hand(state: &GameState) -> GameState {
    let mut next = state.clone();
    if next.is_hand_complete {
        return next;
    }

    let in_hand = next.players.iter().filter(|p| !p.is_folded()).count();
    next.pots = compute_pots(&next.players);
    let winners: Vec<Winner> = match in_hand {
        0 => {
            log::warn!("hand {} has no players left; returning contributions", next.hand_number);
            next.players
                .iter()
                .filter(|p| p.total_bet_this_hand > 0)
                .map(|p| Winner { player: p.id, amount: p.total_bet_this_hand, description: None })
                .collect()
        }
        1 => resolve_by_fold(&next.players, &next.pots),
        _ => {
            while !next.board.is_complete() && !matches!(next.street, Street::Showdown) {
                deal_next_street(&mut next);
            }
            resolve_showdown(&next.players, &next.board, &next.pots)
        }
    };

    for w in &winners {
        if let Some(p) = next.players.iter_mut().find(|p| p.id == w.player) {
            p.stack += w.amount;
        }
    }
    for p in &mut next.players {
        p.current_bet = 0;
    }
    next.street = Street::Showdown;
    next.current_bet = 0;
    next.min_raise = next.big_blind;
    next.active_seat = None;
    next.is_hand_complete = true;
    log::debug!("hand {} complete: {:?}", next.hand_number, winners);
    next.winners = winners;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::betting::{execute_action, is_betting_round_complete};
    use crate::player::PlayerStatus;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn settings(opponents: usize) -> TableSettings {
        TableSettings { opponent_count: opponents, ..Default::default() }
    }

    fn dealt(opponents: usize, seed: u64) -> (GameState, TableSettings) {
        let s = settings(opponents);
        let state = create_initial_game_state(&s).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (start_new_hand(&state, &s, &mut rng), s)
    }

    #[test]
    fn initial_state_is_hand_complete() {
        let state = create_initial_game_state(&settings(3)).unwrap();
        assert_eq!(state.hand_number, 0);
        assert!(state.is_hand_complete);
        assert_eq!(state.players.len(), 4);
        assert!(state.players[0].is_human);
        assert!(state.players[1..].iter().all(|p| !p.is_human));
        assert!(create_initial_game_state(&settings(0)).is_err());
    }

    #[test]
    fn new_hand_posts_blinds_and_deals() {
        let (s, _) = dealt(3, 1);
        assert_eq!(s.hand_number, 1);
        assert!(!s.is_hand_complete);
        assert_eq!(s.dealer, 0);
        assert_eq!(s.sb_seat, Some(1));
        assert_eq!(s.bb_seat, Some(2));
        assert_eq!(s.players[1].current_bet, 5);
        assert_eq!(s.players[2].current_bet, 10);
        assert_eq!(s.current_bet, 10);
        assert_eq!(s.active_seat, Some(3));
        assert!(s.players.iter().all(|p| p.hole.is_some()));
        assert_eq!(s.deck.len(), 52 - 8);
        assert_eq!(s.pot_total(), 15);
        assert_eq!(s.players[0].position, Some(Position::Button));
        assert_eq!(s.players[3].position, Some(Position::UnderTheGun));
        assert_eq!(s.action_log.len(), 2);
    }

    #[test]
    fn button_moves_each_hand() {
        let (s, cfg) = dealt(2, 1);
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let t = start_new_hand(&complete_hand(&s), &cfg, &mut rng);
        assert_eq!(t.dealer, 1);
        assert_eq!(t.hand_number, 2);
    }

    #[test]
    fn heads_up_button_posts_small_blind_and_acts_first() {
        let (s, _) = dealt(1, 4);
        assert_eq!(s.sb_seat, Some(s.dealer));
        assert_eq!(s.active_seat, Some(s.dealer));
        assert_eq!(s.players[s.dealer].position, Some(Position::ButtonSmallBlind));
    }

    #[test]
    fn antes_are_posted_as_dead_money() {
        let cfg = TableSettings { ante: 2, opponent_count: 2, ..Default::default() };
        let state = create_initial_game_state(&cfg).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let s = start_new_hand(&state, &cfg, &mut rng);
        assert_eq!(s.pot_total(), 6 + 15);
        assert_eq!(s.current_bet, 10);
        assert_eq!(s.action_log.iter().filter(|r| r.kind == ActionKind::Ante).count(), 3);
    }

    #[test]
    fn busted_players_are_skipped() {
        let cfg = settings(3);
        let mut state = create_initial_game_state(&cfg).unwrap();
        state.players[1].stack = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(6);
        let s = start_new_hand(&state, &cfg, &mut rng);
        assert!(s.players[1].is_folded());
        assert!(s.players[1].hole.is_none());
        assert_eq!(s.sb_seat, Some(2));
        assert_eq!(s.bb_seat, Some(3));
    }

    #[test]
    fn lone_player_with_chips_gets_no_hand() {
        let cfg = settings(1);
        let mut state = create_initial_game_state(&cfg).unwrap();
        state.players[1].stack = 0;
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let s = start_new_hand(&state, &cfg, &mut rng);
        assert!(s.is_hand_complete);
        assert!(s.players[0].hole.is_none());
        assert_eq!(s.active_seat, None);
    }

    #[test]
    fn everyone_folds_to_the_big_blind() {
        let (mut s, _) = dealt(3, 8);
        let total = s.total_chips();
        s = execute_action(&s, ActionKind::Fold, 0);
        s = execute_action(&s, ActionKind::Fold, 0);
        s = execute_action(&s, ActionKind::Fold, 0);
        assert!(is_betting_round_complete(&s));
        let done = complete_hand(&s);
        assert!(done.is_hand_complete);
        assert_eq!(done.winners.len(), 1);
        assert_eq!(done.winners[0].player, PlayerId(2));
        assert_eq!(done.winners[0].amount, 15);
        assert_eq!(done.players[2].stack, 1005);
        assert_eq!(done.players.iter().map(|p| p.stack).sum::<u64>(), total);
    }

    #[test]
    fn all_in_preflop_runs_out_the_board() {
        let (mut s, _) = dealt(1, 9);
        s = execute_action(&s, ActionKind::AllIn, 0);
        s = execute_action(&s, ActionKind::Call, 0);
        assert!(s.players.iter().all(|p| p.status == PlayerStatus::AllIn));
        assert!(is_betting_round_complete(&s));
        let done = complete_hand(&s);
        assert_eq!(done.board.len(), 5);
        assert_eq!(done.street, Street::Showdown);
        assert_eq!(done.deck.len(), 52 - 4 - 8);
        assert_eq!(done.players.iter().map(|p| p.stack).sum::<u64>(), 2000);
        assert_eq!(done.winners.iter().map(|w| w.amount).sum::<u64>(), 2000);
    }

    #[test]
    fn completing_twice_is_a_no_op() {
        let (s, _) = dealt(1, 10);
        let s = execute_action(&s, ActionKind::Fold, 0);
        let once = complete_hand(&s);
        assert_eq!(complete_hand(&once), once);
    }

    #[test]
    fn replacing_an_unfinished_hand_returns_committed_chips() {
        let (s, cfg) = dealt(2, 11);
        let s = execute_action(&s, ActionKind::Raise, 300);
        assert_eq!(s.players[0].total_bet_this_hand, 300);
        let before = s.total_chips();
        assert_eq!(before, 3000);

        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let t = start_new_hand(&s, &cfg, &mut rng);
        assert_eq!(t.hand_number, s.hand_number + 1);
        assert_eq!(t.total_chips(), before);
        let posted: u64 = t.players.iter().map(|p| p.total_bet_this_hand).sum();
        assert_eq!(posted, 15);
        assert_eq!(t.players.iter().map(|p| p.stack).sum::<u64>(), 3000 - posted);
    }

    #[test]
    fn finished_hand_contributions_are_not_refunded() {
        let (s, cfg) = dealt(2, 13);
        let s = execute_action(&s, ActionKind::Raise, 300);
        let s = execute_action(&s, ActionKind::Fold, 0);
        let s = execute_action(&s, ActionKind::Fold, 0);
        let done = complete_hand(&s);
        assert_eq!(done.players[0].stack, 1015);

        let mut rng = ChaCha8Rng::seed_from_u64(14);
        let t = start_new_hand(&done, &cfg, &mut rng);
        assert_eq!(t.total_chips(), 3000);
    }
}
