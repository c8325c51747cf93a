//! Whole games driven through the turn controller.
//!
//! A simple policy plays every seat: move the first piece that can use the
//! largest roll value, forfeit when nothing can move.

use chowka_bhara::board::{Alias, PieceId, PIECES_PER_PLAYER, PLACES_TO_FRUIT};
use chowka_bhara::core::{Color, GameConfig, GameEvent, PlayerId, RulesError, Stage};
use chowka_bhara::dice::ScriptedDice;
use chowka_bhara::game::Game;

const MAX_ACTIONS: usize = 20_000;

fn step(game: &mut Game) {
    match game.stage() {
        Stage::Roll => {
            game.roll().unwrap();
        }
        Stage::MakeMove => {
            let active = game.active_player();
            let ids: Vec<PieceId> = game.board().player_pieces(active).map(|p| p.id).collect();
            for id in ids {
                let moves = game.legal_moves(id).unwrap();
                if let Some(&mv) = moves.last() {
                    game.play(id, mv).unwrap();
                    return;
                }
            }
            game.forfeit().unwrap();
        }
    }
}

/// Every player still accounts for six pieces, and every piece in play
/// stands on the square its position names.
fn assert_consistent(game: &Game) {
    let board = game.board();
    for player in PlayerId::all(board.player_count()) {
        let on_board: usize = board
            .squares()
            .map(|s| s.team_weight(board.pieces(), player))
            .sum();
        assert_eq!(on_board, PIECES_PER_PLAYER, "{} lost track of a piece", player);
    }

    for piece in board.pieces().iter().filter(|p| p.active) {
        let cell = board.piece_cell(piece.id).unwrap();
        assert!(board.square(cell).contains(piece.id));
        assert!(piece.position <= piece.fruit_position);
    }
}

fn run(game: &mut Game) -> usize {
    let mut actions = 0;
    while !game.is_over() && actions < MAX_ACTIONS {
        step(game);
        assert_consistent(game);
        actions += 1;
    }
    actions
}

#[test]
fn test_seeded_games_stay_consistent() {
    for players in 2..=4 {
        for seed in [1, 42, 2024] {
            let mut game = Game::new(GameConfig::with_player_count(players).with_seed(seed)).unwrap();
            run(&mut game);

            if let Some(standings) = game.standings() {
                assert_eq!(standings.order().len(), players);
                assert_eq!(&standings.order()[..players - 1], game.finished());
                for &player in game.finished() {
                    assert!(game.board().has_player_finished(player));
                }
            }
        }
    }
}

#[test]
fn test_same_seed_same_game() {
    let config = GameConfig::new(vec![Color::Yellow, Color::Red, Color::Blue]).with_seed(9);
    let mut a = Game::new(config.clone()).unwrap();
    let mut b = Game::new(config).unwrap();

    for _ in 0..500 {
        if a.is_over() {
            break;
        }
        step(&mut a);
        step(&mut b);
    }

    assert_eq!(a.board().history(), b.board().history());
}

#[test]
fn test_turns_rotate_through_seats() {
    let mut game = Game::new(GameConfig::with_player_count(4).with_seed(3)).unwrap();
    for _ in 0..400 {
        step(&mut game);
    }

    let passes: Vec<(PlayerId, PlayerId)> = game
        .board()
        .history()
        .iter()
        .filter_map(|r| match r.event {
            GameEvent::TurnPassed { from, to } => Some((from, to)),
            _ => None,
        })
        .collect();

    assert!(!passes.is_empty());
    for (from, to) in passes {
        assert_eq!(to, from.next(4));
    }
}

#[test]
fn test_reset_replays_from_seed() {
    let config = GameConfig::with_player_count(2).with_seed(17);
    let mut game = Game::new(config.clone()).unwrap();
    for _ in 0..50 {
        step(&mut game);
    }
    let first_run = game.board().history().clone();

    game.reset().unwrap();
    assert_eq!(game.stage(), Stage::Roll);
    for _ in 0..50 {
        step(&mut game);
    }

    assert_eq!(game.board().history(), &first_run);
}

#[test]
fn test_invalid_config_rejected() {
    let config = GameConfig::new(vec![Color::Green]);
    assert!(Game::new(config).is_err());
}

#[test]
fn test_actions_after_game_over() {
    let red = PlayerId::new(0);
    let mut game = Game::with_dice(GameConfig::default(), Box::new(ScriptedDice::new(vec![2]))).unwrap();
    let board = game.board_mut();
    board.set_capture_flag(red).unwrap();
    for id in 0..PIECES_PER_PLAYER as u16 {
        let offset = if id == 0 { PLACES_TO_FRUIT - 2 } else { PLACES_TO_FRUIT };
        board.place_piece(PieceId(id), Alias::new(offset)).unwrap();
    }

    game.roll().unwrap();
    step(&mut game);

    assert!(game.is_over());
    assert_eq!(game.standings().unwrap().winner(), Some(red));
    assert_eq!(game.roll().unwrap_err(), RulesError::GameOver);
    assert_eq!(game.forfeit().unwrap_err(), RulesError::GameOver);
    assert_eq!(game.legal_moves(PieceId(6)).unwrap_err(), RulesError::GameOver);
}
