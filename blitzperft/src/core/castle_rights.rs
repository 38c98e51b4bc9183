//! Module for the `CastleRights` structure, which tracks the castling
//! abilities remaining to each player.
//!
//! The bits are the exact bits the rights occupy inside a position's packed
//! state word (bit 0 there is the side to move), so a `CastleRights` can be
//! masked directly out of the state.

use super::Player;

use std::fmt;

bitflags! {
    /// Set of the castling rights still available on a board.
    ///
    /// A set bit only marks that castling remains a possibility, e.g. a set
    /// `WHITE_SHORT` means neither the white king nor the h1 rook has moved
    /// since the game started. It does not guarantee that castling is legal
    /// right now.
    pub struct CastleRights: u64 {
        const WHITE_SHORT = 1 << 1;
        const WHITE_LONG  = 1 << 2;
        const BLACK_SHORT = 1 << 3;
        const BLACK_LONG  = 1 << 4;
        const WHITE_ALL   = Self::WHITE_SHORT.bits | Self::WHITE_LONG.bits;
        const BLACK_ALL   = Self::BLACK_SHORT.bits | Self::BLACK_LONG.bits;
    }
}

impl CastleRights {
    /// Extracts the castling rights out of a packed state word.
    #[inline(always)]
    pub fn from_state(state: u64) -> CastleRights {
        CastleRights::from_bits_truncate(state)
    }

    /// Returns the rights belonging to a single player.
    #[inline]
    pub fn player_rights(self, player: Player) -> CastleRights {
        match player {
            Player::White => self & CastleRights::WHITE_ALL,
            Player::Black => self & CastleRights::BLACK_ALL,
        }
    }

    /// Parses a single character of a FEN castling field.
    pub fn from_fen_char(c: char) -> Option<CastleRights> {
        match c {
            'K' => Some(CastleRights::WHITE_SHORT),
            'Q' => Some(CastleRights::WHITE_LONG),
            'k' => Some(CastleRights::BLACK_SHORT),
            'q' => Some(CastleRights::BLACK_LONG),
            _ => None,
        }
    }
}

impl fmt::Display for CastleRights {
    /// Formats the rights as a FEN castling field.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_empty() {
            return f.pad("-");
        }
        let mut s = String::with_capacity(4);
        if self.contains(CastleRights::WHITE_SHORT) {
            s.push('K');
        }
        if self.contains(CastleRights::WHITE_LONG) {
            s.push('Q');
        }
        if self.contains(CastleRights::BLACK_SHORT) {
            s.push('k');
        }
        if self.contains(CastleRights::BLACK_LONG) {
            s.push('q');
        }
        f.pad(&s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rights_from_state() {
        let state: u64 = 0b11110 | 1;
        assert_eq!(CastleRights::from_state(state), CastleRights::all());
        assert_eq!(CastleRights::from_state(1), CastleRights::empty());
    }

    #[test]
    fn rights_display() {
        assert_eq!(CastleRights::all().to_string(), "KQkq");
        assert_eq!(CastleRights::empty().to_string(), "-");
        assert_eq!(
            (CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG).to_string(),
            "Kq"
        );
    }

    #[test]
    fn rights_player_split() {
        let all = CastleRights::all();
        assert_eq!(all.player_rights(Player::White), CastleRights::WHITE_ALL);
        assert_eq!(all.player_rights(Player::Black), CastleRights::BLACK_ALL);
    }
}
