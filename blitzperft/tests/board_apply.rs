//! Random playouts: after every made move the position must keep its
//! structural invariants, and the incrementally maintained hash must equal
//! a full recompute.

extern crate blitzperft;

use blitzperft::board::fen::ALL_FENS;
use blitzperft::board::movegen::generate_all;
use blitzperft::board::pins::{pins_and_checkers, protection_area};
use blitzperft::board::random::RandPosition;
use blitzperft::core::mono_traits::{BlackType, WhiteType};
use blitzperft::helper::zobrist;
use blitzperft::tools::prng::PRNG;
use blitzperft::{make, Move, MoveStack, Player, Position};

fn legal_moves(pos: &Position, stack: &mut MoveStack) -> Vec<Move> {
    stack.clear();
    let occ = pos.occupied();
    match pos.turn() {
        Player::White => {
            let (pins, checkers) = pins_and_checkers::<WhiteType>(pos, occ);
            let p_area = protection_area::<WhiteType>(pos, occ);
            generate_all::<WhiteType>(pos, occ, p_area, checkers, &pins, stack);
        }
        Player::Black => {
            let (pins, checkers) = pins_and_checkers::<BlackType>(pos, occ);
            let p_area = protection_area::<BlackType>(pos, occ);
            generate_all::<BlackType>(pos, occ, p_area, checkers, &pins, stack);
        }
    }
    stack.slice_from(0).to_vec()
}

fn random_playout(start: &Position, plies: usize, prng: &mut PRNG) {
    let mut stack = MoveStack::with_capacity(512);
    let mut pos = *start;
    for _ in 0..plies {
        let moves = legal_moves(&pos, &mut stack);
        if moves.is_empty() {
            break;
        }
        let mv = moves[(prng.rand() % moves.len() as u64) as usize];
        pos = make(&pos, mv);

        assert!(pos.is_okay(), "after {}:\n{}", mv, pos);
        assert_eq!(
            pos.hash,
            zobrist::compute(&pos),
            "incremental hash diverged after {}",
            mv
        );
    }
}

#[test]
fn playouts_from_the_fen_suite() {
    let mut prng = PRNG::init(0xBEEF_F00D);
    for fen in ALL_FENS.iter() {
        let pos = Position::from_fen(fen).unwrap();
        for _ in 0..4 {
            random_playout(&pos, 60, &mut prng);
        }
    }
}

#[test]
fn playouts_from_random_positions() {
    let mut prng = PRNG::init(0x0DDB_A11);
    let positions = RandPosition::default().pseudo_random(0xFEED_5EED).many(64);
    for pos in positions.iter() {
        random_playout(pos, 40, &mut prng);
    }
}

#[test]
fn kings_survive_every_playout() {
    // perft positions never lose a king; the generator must never emit a
    // move that leaves one en prise
    let mut prng = PRNG::init(31_337);
    let mut stack = MoveStack::with_capacity(512);
    let pos = Position::start_pos();
    for _ in 0..8 {
        let mut cur = pos;
        for _ in 0..120 {
            let moves = legal_moves(&cur, &mut stack);
            if moves.is_empty() {
                break;
            }
            cur = make(&cur, moves[(prng.rand() % moves.len() as u64) as usize]);
            assert_eq!(cur.k.count_bits(), 2);
        }
    }
}
