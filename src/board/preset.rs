//! Named starting layouts.

use super::cell::Player;
use super::coord::Coord;

/// An immutable initial placement for each player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset<'a> {
    pub name: &'a str,
    pub black: &'a [Coord],
    pub white: &'a [Coord],
}

impl<'a> Preset<'a> {
    /// Starting coordinates for `player`.
    pub const fn placements(&self, player: Player) -> &'a [Coord] {
        match player {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Looks up a built-in preset by name.
    pub fn by_name(name: &str) -> Option<&'static Preset<'static>> {
        PRESETS.iter().find(|p| p.name == name)
    }
}

/// Opposite corners: Black on the main diagonal, White on the other.
pub const CORNERS: Preset<'static> = Preset {
    name: "corners",
    black: &[Coord::new(0, 0), Coord::new(8, 8)],
    white: &[Coord::new(0, 8), Coord::new(8, 0)],
};

/// Black on the four corners, White on the four edge midpoints.
pub const CROSS: Preset<'static> = Preset {
    name: "cross",
    black: &[
        Coord::new(0, 0),
        Coord::new(0, 8),
        Coord::new(8, 8),
        Coord::new(8, 0),
    ],
    white: &[
        Coord::new(0, 4),
        Coord::new(8, 4),
        Coord::new(4, 8),
        Coord::new(4, 0),
    ],
};

/// Built-in layouts for the default 9×9 board.
pub static PRESETS: [Preset<'static>; 2] = [CORNERS, CROSS];
