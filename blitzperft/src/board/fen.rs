//! FEN (Forsyth–Edwards Notation) parsing and formatting, plus the standard
//! perft test-position suite.
//!
//! A FEN string describes the board rank-major from rank 8 down to rank 1,
//! `/`-separated, with digits skipping empty squares and letters encoding
//! pieces (uppercase for White). The later fields carry the side to move,
//! the castling rights, the en-passant square and the move clocks. Perft is
//! clock-free, so the clock fields are accepted and ignored.

use crate::board::{Position, EP_SQ_SHIFT, EP_VALID, TURN_WHITE};
use crate::core::bitboard::BitBoard;
use crate::core::castle_rights::CastleRights;
use crate::core::masks::{FILE_DISPLAYS, RANK_DISPLAYS};
use crate::core::sq::SQ;
use crate::core::Player;
use crate::helper::prelude::init_statics;
use crate::helper::zobrist;

use std::fmt;

/// The FEN string of the standard starting position.
pub const START_POS_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Position 2 of the standard perft suite ("kiwipete"), dense with castling,
/// pins and en-passant interactions.
pub const KIWIPETE_FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -";

/// Position 3 of the standard perft suite, a rook endgame.
pub const ENDGAME_FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";

/// Position 4 of the standard perft suite, featuring an en-passant
/// discovered check.
pub const EP_CHECK_FEN: &str = "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -";

/// Position 5 of the standard perft suite, known to catch bugs in several
/// engines.
pub const POSITION_5_FEN: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

/// Position 6 of the standard perft suite, a symmetric middlegame.
pub const POSITION_6_FEN: &str =
    "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - - 0 10";

#[doc(hidden)]
pub static STANDARD_PERFT_FENS: [&str; 6] = [
    START_POS_FEN,
    KIWIPETE_FEN,
    ENDGAME_FEN,
    EP_CHECK_FEN,
    POSITION_5_FEN,
    POSITION_6_FEN,
];

#[doc(hidden)]
pub static EXTRA_TEST_FENS: [&str; 8] = [
    "4rrk1/pp1n3p/3q2pQ/2p1pb2/2PP4/2P3N1/P2B2PP/4RRK1 b - - 7 19",
    "r3r1k1/2p2ppp/p1p1bn2/8/1q2P3/2NPQN2/PPP3PP/R4RK1 b - - 2 15",
    "r1bbk1nr/pp3p1p/2n5/1N4p1/2Np1B2/8/PPP2PPP/2KR1B1R w kq - 0 13",
    "2rqkb1r/ppp2p2/2npb1p1/1N1Nn2p/2P1PP2/8/PP2B1PP/R1BQK2R b KQ - 0 11",
    "3q2k1/pb3p1p/4pbp1/2r5/PpN2N2/1P2P2P/5PP1/Q2R2K1 b - - 4 26",
    "8/2p5/8/2kPKp1p/2p4P/2P5/3P4/8 w - - 0 1",
    "6k1/6p1/P6p/r1N5/5p2/7P/1b3PP1/4R1K1 w - - 0 1",
    "8/8/8/8/5kp1/P7/8/1K1N4 w - - 0 1",
];

lazy_static! {
    /// Every FEN the test and bench suites iterate over.
    #[doc(hidden)]
    pub static ref ALL_FENS: Vec<&'static str> = {
        let mut vec = Vec::new();
        for fen in &STANDARD_PERFT_FENS { vec.push(*fen); }
        for fen in &EXTRA_TEST_FENS { vec.push(*fen); }
        vec
    };
}

/// Ways a FEN string can fail to parse.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum FenParseError {
    /// A field (board, side, castling or en passant) was missing.
    MissingField,
    /// The board field contained an unknown character.
    BadPieceChar(char),
    /// A rank did not describe exactly eight squares.
    BadRankLength,
    /// The side-to-move field was not `w` or `b`.
    BadSideToMove,
    /// The castling field contained a character outside `KQkq-`.
    BadCastlingChar(char),
    /// The en-passant field was not `-` or a square between a3 and h6.
    BadEpSquare,
    /// The board did not contain exactly one king per side.
    BadKingCount,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            FenParseError::MissingField => write!(f, "missing FEN field"),
            FenParseError::BadPieceChar(c) => write!(f, "unknown piece character '{}'", c),
            FenParseError::BadRankLength => write!(f, "rank does not describe 8 squares"),
            FenParseError::BadSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::BadCastlingChar(c) => write!(f, "unknown castling character '{}'", c),
            FenParseError::BadEpSquare => write!(f, "bad en-passant square"),
            FenParseError::BadKingCount => write!(f, "each side needs exactly one king"),
        }
    }
}

/// Parses a FEN string into a [`Position`], computing its hash.
///
/// [`Position`]: ../struct.Position.html
pub fn parse_fen(fen: &str) -> Result<Position, FenParseError> {
    init_statics();

    let mut fields = fen.split_whitespace();
    let board = fields.next().ok_or(FenParseError::MissingField)?;
    let side = fields.next().ok_or(FenParseError::MissingField)?;
    let castling = fields.next().ok_or(FenParseError::MissingField)?;
    let ep = fields.next().ok_or(FenParseError::MissingField)?;
    // halfmove and fullmove counters are irrelevant to perft

    let mut pos = Position {
        p: BitBoard::EMPTY,
        n: BitBoard::EMPTY,
        bq: BitBoard::EMPTY,
        rq: BitBoard::EMPTY,
        k: BitBoard::EMPTY,
        w: BitBoard::EMPTY,
        state: 0,
        hash: 0,
    };

    // board: rank-major from a8, exactly our square numbering
    let mut square: u32 = 0;
    for c in board.chars() {
        match c {
            '/' => {
                if square & 7 != 0 || square == 0 {
                    return Err(FenParseError::BadRankLength);
                }
                continue;
            }
            '1'..='8' => {
                square += c as u32 - '0' as u32;
                continue;
            }
            _ => {}
        }
        if square >= 64 {
            return Err(FenParseError::BadRankLength);
        }
        let bb = BitBoard(1u64 << square);
        match c.to_ascii_lowercase() {
            'p' => pos.p |= bb,
            'n' => pos.n |= bb,
            'b' => pos.bq |= bb,
            'r' => pos.rq |= bb,
            'q' => {
                pos.bq |= bb;
                pos.rq |= bb;
            }
            'k' => pos.k |= bb,
            _ => return Err(FenParseError::BadPieceChar(c)),
        }
        if c.is_ascii_uppercase() {
            pos.w |= bb;
        }
        square += 1;
    }
    if square != 64 {
        return Err(FenParseError::BadRankLength);
    }

    match side {
        "w" => pos.state |= TURN_WHITE,
        "b" => {}
        _ => return Err(FenParseError::BadSideToMove),
    }

    if castling != "-" {
        for c in castling.chars() {
            match CastleRights::from_fen_char(c) {
                Some(right) => pos.state |= right.bits(),
                None => return Err(FenParseError::BadCastlingChar(c)),
            }
        }
    }

    if ep != "-" {
        let mut chars = ep.chars();
        let file_c = chars.next().ok_or(FenParseError::BadEpSquare)?;
        let rank_c = chars.next().ok_or(FenParseError::BadEpSquare)?;
        if !('a'..='h').contains(&file_c) || !('3'..='6').contains(&rank_c) {
            return Err(FenParseError::BadEpSquare);
        }
        let file = file_c as u64 - 'a' as u64;
        let rank = rank_c as u64 - '1' as u64;
        let ep_sq = file + (7 - rank) * 8;
        pos.state |= EP_VALID | (ep_sq << EP_SQ_SHIFT);
    }

    if pos.k.count_bits() != 2 || (pos.k & pos.w).count_bits() != 1 {
        return Err(FenParseError::BadKingCount);
    }

    pos.hash = zobrist::compute(&pos);
    Ok(pos)
}

/// Formats a position as a FEN string. The clock fields are rendered as
/// `0 1`.
pub fn to_fen(pos: &Position) -> String {
    let mut s = String::with_capacity(90);

    for rank in 0..8u8 {
        let mut empty = 0;
        for file in 0..8u8 {
            let sq = SQ(rank * 8 + file);
            match pos.piece_at(sq) {
                None => empty += 1,
                Some((player, piece)) => {
                    if empty > 0 {
                        s.push((b'0' + empty) as char);
                        empty = 0;
                    }
                    let c = match player {
                        Player::White => piece.char_upper(),
                        Player::Black => piece.char_lower(),
                    };
                    s.push(c.unwrap_or('?'));
                }
            }
        }
        if empty > 0 {
            s.push((b'0' + empty) as char);
        }
        if rank != 7 {
            s.push('/');
        }
    }

    s.push(' ');
    s.push(if pos.turn() == Player::White { 'w' } else { 'b' });
    s.push(' ');
    s.push_str(&pos.castle_rights().to_string());
    s.push(' ');
    if pos.ep_valid() {
        let ep = pos.ep_square();
        s.push(FILE_DISPLAYS[ep.file_idx_of_sq() as usize]);
        s.push(RANK_DISPLAYS[(7 - ep.rank_idx_of_sq()) as usize]);
    } else {
        s.push('-');
    }
    s.push_str(" 0 1");

    s
}
