#![doc = r#"
The panel bitmask carried by every step.

Bits 0-3 are player one's Left, Down, Up and Right panels; bits 4-7 are the
same four panels for player two. A step carries one overlay reference byte per
set bit, in ascending bit order.

# Example
```rust
# use ssq::prelude::*;
let panels = Panels::new(0b1000_0001);

assert_eq!(panels.arrow_count(), 2);
assert_eq!(panels.glyphs(), "<      >");

let mut arrows = panels.arrows();
assert_eq!(arrows.next(), Some(Arrow::new(Player::One, Direction::Left)));
assert_eq!(arrows.next(), Some(Arrow::new(Player::Two, Direction::Right)));
```
"#]

use alloc::string::String;

/// A set of pressed panels for one step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Panels(u8);

impl Panels {
    /// No panels.
    pub const NONE: Self = Self(0);

    /// Wraps a raw bitmask.
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw bitmask.
    pub const fn bits(&self) -> u8 {
        self.0
    }

    /// Number of set panels, and so the number of overlay reference bytes.
    pub const fn arrow_count(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// True if no panel is set.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// True if `arrow`'s bit is set.
    pub const fn contains(&self, arrow: Arrow) -> bool {
        self.0 & arrow.bit() != 0
    }

    /// The set panels in ascending bit order.
    pub fn arrows(&self) -> impl Iterator<Item = Arrow> + use<> {
        let bits = self.0;
        (0..8u8)
            .filter(move |i| bits & (1 << i) != 0)
            .map(Arrow::from_index)
    }

    /// Renders the mask as `<V^><V^>`, with unset panels as spaces.
    pub fn glyphs(&self) -> String {
        (0..8u8)
            .map(|i| {
                if self.0 & (1 << i) != 0 {
                    Arrow::from_index(i).direction.glyph()
                } else {
                    ' '
                }
            })
            .collect()
    }
}

impl From<u8> for Panels {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

/// Which side of the pad a panel belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    /// Bits 0-3
    One,
    /// Bits 4-7
    Two,
}

/// One of the four panels on a side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Left
    Left,
    /// Down
    Down,
    /// Up
    Up,
    /// Right
    Right,
}

impl Direction {
    /// The character used for this direction in dumps.
    pub const fn glyph(&self) -> char {
        match self {
            Direction::Left => '<',
            Direction::Down => 'V',
            Direction::Up => '^',
            Direction::Right => '>',
        }
    }
}

/// A single panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Arrow {
    /// The side
    pub player: Player,
    /// The panel
    pub direction: Direction,
}

impl Arrow {
    /// Names a panel.
    pub const fn new(player: Player, direction: Direction) -> Self {
        Self { player, direction }
    }

    const fn from_index(index: u8) -> Self {
        let player = if index < 4 { Player::One } else { Player::Two };
        let direction = match index % 4 {
            0 => Direction::Left,
            1 => Direction::Down,
            2 => Direction::Up,
            _ => Direction::Right,
        };
        Self { player, direction }
    }

    /// Bit position of this panel in a [`Panels`] mask.
    pub const fn index(&self) -> u8 {
        let side = match self.player {
            Player::One => 0,
            Player::Two => 4,
        };
        let column = match self.direction {
            Direction::Left => 0,
            Direction::Down => 1,
            Direction::Up => 2,
            Direction::Right => 3,
        };
        side + column
    }

    /// This panel's bit.
    pub const fn bit(&self) -> u8 {
        1 << self.index()
    }
}

#[test]
fn glyphs_blank_unset_panels() {
    use pretty_assertions::assert_eq;
    assert_eq!(Panels::new(0xFF).glyphs(), "<V^><V^>");
    assert_eq!(Panels::NONE.glyphs(), "        ");
    assert_eq!(Panels::new(0b0010_0100).glyphs(), "  ^  V  ");
}

#[test]
fn arrow_bits_round_trip() {
    use pretty_assertions::assert_eq;
    for index in 0..8 {
        let arrow = Arrow::from_index(index);
        assert_eq!(arrow.index(), index);
        assert!(Panels::new(1 << index).contains(arrow));
    }
    assert_eq!(Panels::new(0b0101_0110).arrow_count(), 4);
}
