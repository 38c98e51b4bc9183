//! Every counting generator must agree with its materializing twin on
//! every position: `count_* == generate_*.len()`.

extern crate blitzperft;

use blitzperft::board::fen::ALL_FENS;
use blitzperft::board::movegen::*;
use blitzperft::board::pins::{pins_and_checkers, protection_area};
use blitzperft::board::random::RandPosition;
use blitzperft::core::mono_traits::{BlackType, PlayerTrait, WhiteType};
use blitzperft::{MoveStack, Player, Position};

fn check_generators<P: PlayerTrait>(pos: &Position) {
    let occ = pos.occupied();
    let (pins, checkers) = pins_and_checkers::<P>(pos, occ);
    let p_area = protection_area::<P>(pos, occ);
    let any = pins.any();
    let mut stack = MoveStack::with_capacity(512);

    if checkers.is_empty() {
        generate_pawn_moves::<P>(pos, occ, &pins, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_pawn_moves::<P>(pos, occ, &pins),
            "pawns: {}",
            pos.fen()
        );
        stack.clear();

        generate_knight_moves::<P>(pos, occ, any, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_knight_moves::<P>(pos, occ, any),
            "knights: {}",
            pos.fen()
        );
        stack.clear();

        generate_bishop_moves::<P>(pos, occ, &pins, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_bishop_moves::<P>(pos, occ, &pins),
            "bishops: {}",
            pos.fen()
        );
        stack.clear();

        generate_rook_moves::<P>(pos, occ, &pins, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_rook_moves::<P>(pos, occ, &pins),
            "rooks: {}",
            pos.fen()
        );
        stack.clear();

        generate_queen_moves::<P>(pos, occ, &pins, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_queen_moves::<P>(pos, occ, &pins),
            "queens: {}",
            pos.fen()
        );
        stack.clear();

        generate_king_moves::<P>(pos, occ, p_area, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_king_moves::<P>(pos, occ, p_area),
            "king: {}",
            pos.fen()
        );
        stack.clear();

        generate_castling::<P>(pos, occ, p_area, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_castling::<P>(pos, occ, p_area),
            "castling: {}",
            pos.fen()
        );
        stack.clear();
    } else {
        generate_evasions::<P>(pos, occ, p_area, checkers, &pins, &mut stack);
        assert_eq!(
            stack.len() as u64,
            count_evasions::<P>(pos, occ, p_area, checkers, &pins),
            "evasions: {}",
            pos.fen()
        );
        stack.clear();
    }

    generate_all::<P>(pos, occ, p_area, checkers, &pins, &mut stack);
    assert_eq!(
        stack.len() as u64,
        count_all::<P>(pos, occ, p_area, checkers, &pins),
        "all: {}",
        pos.fen()
    );
}

fn check(pos: &Position) {
    match pos.turn() {
        Player::White => check_generators::<WhiteType>(pos),
        Player::Black => check_generators::<BlackType>(pos),
    }
}

#[test]
fn counts_match_on_the_fen_suite() {
    for fen in ALL_FENS.iter() {
        let pos = Position::from_fen(fen).unwrap();
        check(&pos);
        check(&pos.flipped());
    }
}

#[test]
fn counts_match_on_random_positions() {
    let positions = RandPosition::default()
        .pseudo_random(0x5EED_CAFE)
        .many(500);
    for pos in positions.iter() {
        check(pos);
    }
}

#[test]
fn counts_match_one_ply_into_the_suite() {
    // apply every legal move of every suite position and compare again
    for fen in ALL_FENS.iter() {
        let pos = Position::from_fen(fen).unwrap();
        let occ = pos.occupied();
        let mut stack = MoveStack::with_capacity(512);
        match pos.turn() {
            Player::White => {
                let (pins, checkers) = pins_and_checkers::<WhiteType>(&pos, occ);
                let p_area = protection_area::<WhiteType>(&pos, occ);
                generate_all::<WhiteType>(&pos, occ, p_area, checkers, &pins, &mut stack);
            }
            Player::Black => {
                let (pins, checkers) = pins_and_checkers::<BlackType>(&pos, occ);
                let p_area = protection_area::<BlackType>(&pos, occ);
                generate_all::<BlackType>(&pos, occ, p_area, checkers, &pins, &mut stack);
            }
        }
        for &mv in stack.slice_from(0).iter() {
            let next = blitzperft::make(&pos, mv);
            check(&next);
        }
    }
}
