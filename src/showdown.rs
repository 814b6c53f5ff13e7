use crate::evaluator::{evaluate_hand, HandEvaluation};
use crate::hand::{validate_holdem, Board};
use crate::player::{Player, PlayerId};
use crate::pot::{pot_total, Pot};
use serde::{Deserialize, Serialize};

/// Description attached to a pot won without a showdown.
pub const UNCONTESTED: &str = "Uncontested";

/// Chips awarded to one player for the hand, summed over every pot they won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub player: PlayerId,
    pub amount: u64,
    pub description: Option<String>,
}

fn credit(winners: &mut Vec<Winner>, player: PlayerId, amount: u64, description: Option<&str>) {
    if amount == 0 {
        return;
    }
    match winners.iter_mut().find(|w| w.player == player) {
        Some(w) => w.amount += amount,
        None => winners.push(Winner {
            player,
            amount,
            description: description.map(str::to_string),
        }),
    }
}

fn evaluate_contenders(players: &[Player], board: &Board) -> Vec<(PlayerId, HandEvaluation)> {
    players
        .iter()
        .filter(|p| !p.is_folded())
        .filter_map(|p| {
            let hole = p.hole?;
            if let Err(e) = validate_holdem(&hole, board) {
                log::warn!("cannot evaluate {}: {e}", p.id);
                return None;
            }
            evaluate_hand(&hole.with_board(board)).ok().map(|ev| (p.id, ev))
        })
        .collect()
}

/// Award every pot to the best eligible hand.
///
/// Each pot is contested only by its eligible players. Tied players split it by integer
/// division and the odd chips go to the first of them in seat order. A pot none of whose
/// eligible players can be evaluated is shared among them without a description, so the
/// awarded total always equals the pots' total.
pub fn resolve_showdown(players: &[Player], board: &Board, pots: &[Pot]) -> Vec<Winner> {
    let evaluated = evaluate_contenders(players, board);
    let mut winners: Vec<Winner> = Vec::new();

    for (i, pot) in pots.iter().enumerate() {
        let contenders: Vec<&(PlayerId, HandEvaluation)> =
            evaluated.iter().filter(|(id, _)| pot.eligible.contains(id)).collect();

        let Some(best) = contenders.iter().map(|(_, ev)| ev).max() else {
            if pot.eligible.is_empty() {
                log::warn!("pot {i} of {} has no eligible players", pot.amount);
                continue;
            }
            split(&mut winners, pot.amount, pot.eligible.iter().map(|id| (*id, None)));
            continue;
        };
        let tied = contenders
            .iter()
            .filter(|(_, ev)| ev == best)
            .map(|(id, ev)| (*id, Some(ev.description.as_str())));
        split(&mut winners, pot.amount, tied);
        log::debug!("pot {i} of {} won with {}", pot.amount, best.description);
    }
    winners
}

fn split<'a, I>(winners: &mut Vec<Winner>, amount: u64, shares: I)
where
    I: IntoIterator<Item = (PlayerId, Option<&'a str>)>,
{
    let shares: Vec<(PlayerId, Option<&str>)> = shares.into_iter().collect();
    if shares.is_empty() {
        return;
    }
    let n = shares.len() as u64;
    let each = amount / n;
    let odd = amount % n;
    for (k, (id, description)) in shares.into_iter().enumerate() {
        let extra = if k == 0 { odd } else { 0 };
        credit(winners, id, each + extra, description);
    }
}

/// Award everything to the only player who has not folded. No hands are evaluated.
///
/// Returns no winners unless exactly one player remains.
pub fn resolve_by_fold(players: &[Player], pots: &[Pot]) -> Vec<Winner> {
    let mut remaining = players.iter().filter(|p| !p.is_folded());
    match (remaining.next(), remaining.next()) {
        (Some(p), None) => {
            let amount = pot_total(pots);
            log::debug!("{} wins {amount} uncontested", p.id);
            vec![Winner { player: p.id, amount, description: Some(UNCONTESTED.to_string()) }]
        }
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::PlayerStatus;
    use crate::pot::compute_pots;

    fn seated(i: u32, hole: &str, contributed: u64, status: PlayerStatus) -> Player {
        let mut p = Player::new(PlayerId(i), format!("P{i}"), 0, i as usize, false);
        p.hole = Some(hole.parse().unwrap());
        p.total_bet_this_hand = contributed;
        p.status = status;
        p
    }

    #[test]
    fn best_hand_takes_single_pot() {
        let board: Board = "2c 3d 4h 8s Kc".parse().unwrap();
        let players = vec![
            seated(0, "Qs Qh", 100, PlayerStatus::Active),
            seated(1, "As Ah", 100, PlayerStatus::Active),
        ];
        let pots = compute_pots(&players);
        let w = resolve_showdown(&players, &board, &pots);
        assert_eq!(
            w,
            vec![Winner { player: PlayerId(1), amount: 200, description: Some("Pair of Aces".into()) }]
        );
    }

    #[test]
    fn side_pots_go_to_best_eligible_hand() {
        let board: Board = "2c 3d 4h 8s Kc".parse().unwrap();
        let players = vec![
            seated(0, "Qs Qh", 100, PlayerStatus::AllIn),
            seated(1, "As Ah", 50, PlayerStatus::AllIn),
            seated(2, "7c 6c", 200, PlayerStatus::AllIn),
        ];
        let pots = compute_pots(&players);
        let w = resolve_showdown(&players, &board, &pots);
        let amount = |id: u32| w.iter().find(|x| x.player == PlayerId(id)).map_or(0, |x| x.amount);
        assert_eq!(amount(1), 150);
        assert_eq!(amount(0), 100);
        assert_eq!(amount(2), 100);
    }

    #[test]
    fn odd_chip_goes_to_first_tied_winner() {
        let board: Board = "Ac Kd Qh Js 2c".parse().unwrap();
        let players = vec![
            seated(0, "Tc 3d", 3, PlayerStatus::Active),
            seated(1, "Th 4s", 3, PlayerStatus::Active),
            seated(2, "9c 9d", 3, PlayerStatus::Folded),
        ];
        let pots = compute_pots(&players);
        let w = resolve_showdown(&players, &board, &pots);
        assert_eq!(w.len(), 2);
        assert_eq!((w[0].player, w[0].amount), (PlayerId(0), 5));
        assert_eq!((w[1].player, w[1].amount), (PlayerId(1), 4));
    }

    #[test]
    fn fold_win_takes_everything_without_evaluation() {
        let mut players = vec![
            seated(0, "2c 7d", 40, PlayerStatus::Folded),
            seated(1, "3c 8d", 60, PlayerStatus::Active),
        ];
        players[1].hole = None;
        let pots = compute_pots(&players);
        let w = resolve_by_fold(&players, &pots);
        assert_eq!(
            w,
            vec![Winner { player: PlayerId(1), amount: 100, description: Some(UNCONTESTED.into()) }]
        );
    }

    #[test]
    fn fold_resolution_needs_exactly_one_player() {
        let players = vec![
            seated(0, "2c 7d", 40, PlayerStatus::Active),
            seated(1, "3c 8d", 40, PlayerStatus::Active),
        ];
        assert!(resolve_by_fold(&players, &compute_pots(&players)).is_empty());
    }

    #[test]
    fn unevaluable_pot_is_shared() {
        let board: Board = "2c 3d".parse().unwrap();
        let players = vec![
            seated(0, "Ac Ad", 5, PlayerStatus::Active),
            seated(1, "Kc Kd", 6, PlayerStatus::Active),
        ];
        let pots = vec![Pot { amount: 11, eligible: vec![PlayerId(0), PlayerId(1)] }];
        let w = resolve_showdown(&players, &board, &pots);
        assert_eq!(w.iter().map(|x| x.amount).sum::<u64>(), 11);
        assert!(w.iter().all(|x| x.description.is_none()));
    }
}
