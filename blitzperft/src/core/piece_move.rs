//! Module for the implementation and definition of a move to be played.
//!
//! We define a move as the struct `Move`. A move needs 16 bits to be stored,
//! and they are used as such:
//!
//! ```md,ignore
//! bits  0 - 5:  source square (from 0 to 63)
//! bits  6 - 11: destination square (from 0 to 63)
//! bits 12 - 14: piece field
//! bit  15:      promotion flag
//! ```
//!
//! The piece field does double duty: with the promotion flag clear it holds
//! the kind of the moving piece; with the flag set the moving piece is
//! implicitly a pawn and the field holds the piece being promoted to. Any
//! extension of the encoding must preserve that a pawn move with the
//! promotion flag set is always a promotion.
//!
//! Castling is encoded as the king's two-step move (e1g1, e1c1, e8g8 or
//! e8c8); the rook's displacement is handled when the move is made.
//!
//! # Safety
//!
//! A `Move` is only guaranteed to be legal for the position that generated
//! it. Applying a move to a position that did not directly create it is
//! undefined.

use super::sq::SQ;
use super::PieceType;

use std::fmt;

const SRC_MASK: u16 = 0b0000_000000_111111;
const DST_MASK: u16 = 0b0000_111111_000000;
const PIECE_MASK: u16 = 0b0111_000000_000000;
const PROMO_FLAG: u16 = 0b1000_000000_000000;

/// Represents a singular move, packed into 16 bits.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[repr(transparent)]
pub struct Move {
    data: u16,
}

impl Move {
    /// Creates a non-promoting `Move` of a piece from a source square to a
    /// destination square.
    #[inline(always)]
    pub fn new(piece: PieceType, src: SQ, dst: SQ) -> Move {
        debug_assert!(src.is_okay() && dst.is_okay());
        debug_assert!(piece.is_some());
        Move {
            data: src.0 as u16 | ((dst.0 as u16) << 6) | ((piece as u16) << 12),
        }
    }

    /// Creates a pawn promotion from a source square to a destination
    /// square, promoting to `prom`.
    #[inline(always)]
    pub fn new_promotion(src: SQ, dst: SQ, prom: PieceType) -> Move {
        debug_assert!(src.is_okay() && dst.is_okay());
        debug_assert!(matches!(
            prom,
            PieceType::N | PieceType::B | PieceType::R | PieceType::Q
        ));
        Move {
            data: src.0 as u16 | ((dst.0 as u16) << 6) | ((prom as u16) << 12) | PROMO_FLAG,
        }
    }

    /// Creates a null move. A null move is never legal to play; it only
    /// serves as a placeholder value.
    #[inline(always)]
    pub const fn null() -> Move {
        Move { data: 0 }
    }

    /// Returns if this is the null move.
    #[inline(always)]
    pub const fn is_null(self) -> bool {
        self.data == 0
    }

    /// Returns the source square of the move.
    #[inline(always)]
    pub const fn src(self) -> SQ {
        SQ((self.data & SRC_MASK) as u8)
    }

    /// Returns the destination square of the move.
    #[inline(always)]
    pub const fn dst(self) -> SQ {
        SQ(((self.data & DST_MASK) >> 6) as u8)
    }

    /// Returns the kind of the moving piece. For a promotion this is always
    /// a pawn.
    #[inline(always)]
    pub fn piece(self) -> PieceType {
        if self.is_promotion() {
            PieceType::P
        } else {
            PieceType::from_bits((self.data >> 12) as u8)
        }
    }

    /// Returns the piece being promoted to, or `PieceType::None` when the
    /// move is not a promotion.
    #[inline(always)]
    pub fn prom(self) -> PieceType {
        if self.is_promotion() {
            PieceType::from_bits(((self.data & PIECE_MASK) >> 12) as u8)
        } else {
            PieceType::None
        }
    }

    /// Returns if the move is a promotion.
    #[inline(always)]
    pub const fn is_promotion(self) -> bool {
        self.data & PROMO_FLAG != 0
    }

    /// Returns the raw 16 bits of the move.
    #[inline(always)]
    pub const fn bits(self) -> u16 {
        self.data
    }
}

impl fmt::Display for Move {
    /// Formats the move as coordinate notation, e.g. `e2e4` or `e7e8q`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.src(), self.dst())?;
        if let Some(c) = self.prom().char_lower() {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_unpack_plain() {
        let m = Move::new(PieceType::N, SQ::G1, SQ::F3);
        assert_eq!(m.src(), SQ::G1);
        assert_eq!(m.dst(), SQ::F3);
        assert_eq!(m.piece(), PieceType::N);
        assert_eq!(m.prom(), PieceType::None);
        assert!(!m.is_promotion());
        assert_eq!(m.to_string(), "g1f3");
    }

    #[test]
    fn pack_unpack_promotion() {
        let m = Move::new_promotion(SQ::E7, SQ::E8, PieceType::Q);
        assert_eq!(m.src(), SQ::E7);
        assert_eq!(m.dst(), SQ::E8);
        assert_eq!(m.piece(), PieceType::P);
        assert_eq!(m.prom(), PieceType::Q);
        assert!(m.is_promotion());
        assert_eq!(m.to_string(), "e7e8q");
    }

    #[test]
    fn castle_encoding_is_king_two_step() {
        let m = Move::new(PieceType::K, SQ::E1, SQ::G1);
        assert_eq!(m.piece(), PieceType::K);
        assert_eq!(m.to_string(), "e1g1");
    }
}
