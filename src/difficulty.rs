//! Packed chart difficulty codes.

use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The packed chart code stored at the start of a mush-steps chunk.

The low byte is the play [`Style`] and the high byte the [`Tier`].

# Example
```rust
# use ssq::prelude::*;
let difficulty = Difficulty::new(0x0318);

assert_eq!(difficulty.style(), Some(Style::Double));
assert_eq!(difficulty.tier(), Some(Tier::VeryHard));
assert_eq!(difficulty.name(), "Double Very Hard");
assert_eq!(difficulty.chart_name(), "Hard");
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Difficulty(u16);

impl Difficulty {
    /// Wraps a packed code.
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// The packed code as stored.
    pub const fn code(&self) -> u16 {
        self.0
    }

    /// Single or double play, if recognized.
    pub fn style(&self) -> Option<Style> {
        Style::try_from((self.0 & 0x00FF) as u8).ok()
    }

    /// The difficulty tier, if recognized.
    pub fn tier(&self) -> Option<Tier> {
        Tier::try_from((self.0 >> 8) as u8).ok()
    }

    /// The in-game name, e.g. `"Single Hard"`, or `"Unknown"`.
    pub fn name(&self) -> &'static str {
        use Style::*;
        use Tier::*;
        match (self.style(), self.tier()) {
            (Some(Single), Some(Easy)) => "Single Easy",
            (Some(Single), Some(Medium)) => "Single Medium",
            (Some(Single), Some(Hard)) => "Single Hard",
            (Some(Single), Some(VeryHard)) => "Single Very Hard",
            (Some(Single), Some(SuperHard)) => "Single Super Hard",
            (Some(Double), Some(Easy)) => "Double Easy",
            (Some(Double), Some(Medium)) => "Double Medium",
            (Some(Double), Some(Hard)) => "Double Hard",
            (Some(Double), Some(VeryHard)) => "Double Very Hard",
            (Some(Double), Some(SuperHard)) => "Double Super Hard",
            _ => "Unknown",
        }
    }

    /// The style keyword used by simfile charts. Unrecognized styles read as `"double"`.
    pub fn style_name(&self) -> &'static str {
        match self.style() {
            Some(Style::Single) => "single",
            Some(Style::Double) | None => "double",
        }
    }

    /// The simfile difficulty slot. Unrecognized tiers read as `"Edit"`.
    pub fn chart_name(&self) -> &'static str {
        self.tier().map(|t| t.chart_name()).unwrap_or("Edit")
    }
}

impl From<u16> for Difficulty {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:04x})", self.name(), self.0)
    }
}

/// Play style, the low byte of a [`Difficulty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Style {
    /// One pad
    Single = 0x14,
    /// Both pads
    Double = 0x18,
}

/// Difficulty tier, the high byte of a [`Difficulty`].
///
/// Codes are not in ascending order of difficulty; `0x04` is the easiest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u8)]
pub enum Tier {
    /// `0x01`
    Medium = 0x01,
    /// `0x02`
    Hard = 0x02,
    /// `0x03`
    VeryHard = 0x03,
    /// `0x04`
    Easy = 0x04,
    /// `0x06`
    SuperHard = 0x06,
}

impl Tier {
    /// The simfile slot this tier is written to.
    pub const fn chart_name(&self) -> &'static str {
        match self {
            Tier::Medium => "Easy",
            Tier::Hard => "Medium",
            Tier::VeryHard => "Hard",
            Tier::Easy => "Beginner",
            Tier::SuperHard => "Challenge",
        }
    }
}

#[test]
fn known_codes_have_names() {
    use pretty_assertions::assert_eq;
    let expected = [
        (0x0114, "Single Medium"),
        (0x0214, "Single Hard"),
        (0x0314, "Single Very Hard"),
        (0x0414, "Single Easy"),
        (0x0614, "Single Super Hard"),
        (0x0118, "Double Medium"),
        (0x0218, "Double Hard"),
        (0x0318, "Double Very Hard"),
        (0x0418, "Double Easy"),
        (0x0618, "Double Super Hard"),
    ];
    for (code, name) in expected {
        assert_eq!(Difficulty::new(code).name(), name, "{code:04x}");
    }
}

#[test]
fn unknown_bits_fall_back() {
    use pretty_assertions::assert_eq;
    let odd = Difficulty::new(0x0516);
    assert_eq!(odd.name(), "Unknown");
    assert_eq!(odd.style_name(), "double");
    assert_eq!(odd.chart_name(), "Edit");

    let single_challenge = Difficulty::new(0x0614);
    assert_eq!(single_challenge.style_name(), "single");
    assert_eq!(single_challenge.chart_name(), "Challenge");
    assert_eq!(u8::from(Style::Double), 0x18);
}
