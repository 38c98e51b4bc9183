//! Masks and various other constants.
//!
//! The board is numbered rank-major from the top down: square 0 is a8 and
//! square 63 is h1. The file of a square is `sq & 7`, the rank index
//! (0 = rank 8, 7 = rank 1) is `sq >> 3`.

/// The total number of players on a chessboard.
pub const PLAYER_CNT: usize = 2;
/// The total number of squares on a chessboard.
pub const SQ_CNT: usize = 64;
/// The total number of files on a chessboard.
pub const FILE_CNT: usize = 8;
/// The total number of ranks on a chessboard.
pub const RANK_CNT: usize = 8;

/// Bit representation of file A.
pub const FILE_A: u64 = 0x0101_0101_0101_0101;
/// Bit representation of file B.
pub const FILE_B: u64 = FILE_A << 1;
/// Bit representation of file C.
pub const FILE_C: u64 = FILE_A << 2;
/// Bit representation of file D.
pub const FILE_D: u64 = FILE_A << 3;
/// Bit representation of file E.
pub const FILE_E: u64 = FILE_A << 4;
/// Bit representation of file F.
pub const FILE_F: u64 = FILE_A << 5;
/// Bit representation of file G.
pub const FILE_G: u64 = FILE_A << 6;
/// Bit representation of file H.
pub const FILE_H: u64 = FILE_A << 7;

/// Bit representation of rank 8 (squares 0..=7).
pub const RANK_8: u64 = 0x0000_0000_0000_00FF;
/// Bit representation of rank 7.
pub const RANK_7: u64 = RANK_8 << 8;
/// Bit representation of rank 6.
pub const RANK_6: u64 = RANK_8 << 16;
/// Bit representation of rank 5.
pub const RANK_5: u64 = RANK_8 << 24;
/// Bit representation of rank 4.
pub const RANK_4: u64 = RANK_8 << 32;
/// Bit representation of rank 3.
pub const RANK_3: u64 = RANK_8 << 40;
/// Bit representation of rank 2.
pub const RANK_2: u64 = RANK_8 << 48;
/// Bit representation of rank 1 (squares 56..=63).
pub const RANK_1: u64 = RANK_8 << 56;

/// Array of all files and their corresponding bits, indexed from
/// file A to file H.
pub static FILE_BB: [u64; FILE_CNT] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];

/// Array of all ranks and their corresponding bits, indexed by rank *index*,
/// so entry 0 is rank 8 and entry 7 is rank 1.
pub static RANK_IDX_BB: [u64; RANK_CNT] = [
    RANK_8, RANK_7, RANK_6, RANK_5, RANK_4, RANK_3, RANK_2, RANK_1,
];

/// The four corner squares a8, h8, a1, h1. A capture landing on one of these
/// revokes the matching castling right no matter which piece captured.
pub const CORNER_SQS: u64 = 0x8100_0000_0000_0081;

/// Squares that must be free of enemy attack for white to castle short:
/// e1, f1 and g1.
pub const CASTLE_ATT_WHITE_SHORT: u64 = 0x7000_0000_0000_0000;
/// Squares that must be empty for white to castle short: f1 and g1.
pub const CASTLE_OCC_WHITE_SHORT: u64 = 0x6000_0000_0000_0000;
/// Squares that must be free of enemy attack for white to castle long:
/// c1, d1 and e1.
pub const CASTLE_ATT_WHITE_LONG: u64 = 0x1C00_0000_0000_0000;
/// Squares that must be empty for white to castle long: b1, c1 and d1.
pub const CASTLE_OCC_WHITE_LONG: u64 = 0x0E00_0000_0000_0000;
/// Squares that must be free of enemy attack for black to castle short:
/// e8, f8 and g8.
pub const CASTLE_ATT_BLACK_SHORT: u64 = 0x0000_0000_0000_0070;
/// Squares that must be empty for black to castle short: f8 and g8.
pub const CASTLE_OCC_BLACK_SHORT: u64 = 0x0000_0000_0000_0060;
/// Squares that must be free of enemy attack for black to castle long:
/// c8, d8 and e8.
pub const CASTLE_ATT_BLACK_LONG: u64 = 0x0000_0000_0000_001C;
/// Squares that must be empty for black to castle long: b8, c8 and d8.
pub const CASTLE_OCC_BLACK_LONG: u64 = 0x0000_0000_0000_000E;

/// The rook's from/to squares for a white short castle: h1 and f1.
pub const CASTLE_ROOK_WHITE_SHORT: u64 = 0xA000_0000_0000_0000;
/// The rook's from/to squares for a white long castle: a1 and d1.
pub const CASTLE_ROOK_WHITE_LONG: u64 = 0x0900_0000_0000_0000;
/// The rook's from/to squares for a black short castle: h8 and f8.
pub const CASTLE_ROOK_BLACK_SHORT: u64 = 0x0000_0000_0000_00A0;
/// The rook's from/to squares for a black long castle: a8 and d8.
pub const CASTLE_ROOK_BLACK_LONG: u64 = 0x0000_0000_0000_0009;

/// Array mapping a square index to its algebraic representation.
///
/// # Examples
///
/// ```
/// use blitzperft::core::masks::SQ_DISPLAY;
///
/// assert_eq!(SQ_DISPLAY[0], "a8");
/// assert_eq!(SQ_DISPLAY[7], "h8");
/// assert_eq!(SQ_DISPLAY[63], "h1");
/// ```
pub static SQ_DISPLAY: [&str; SQ_CNT] = [
    "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8", "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
    "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6", "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
    "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4", "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
];

/// Characters for each file, indexed from file A to file H.
pub static FILE_DISPLAYS: [char; FILE_CNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Characters for each rank, indexed from rank 1 to rank 8.
pub static RANK_DISPLAYS: [char; RANK_CNT] = ['1', '2', '3', '4', '5', '6', '7', '8'];
