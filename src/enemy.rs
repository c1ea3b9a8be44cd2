//! Overlay ("mush") item kinds.

use core::fmt;
use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
Overlay kinds referenced from a mush-steps item table.

The codes are those used by Mario Mix's "Mush Mode"; later titles reuse the
layout with their own meanings (Hottest Party uses [`EnemyKind::Goomba`] to
mark a remote shake), so the names are a best effort for other titles.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(i32)]
pub enum EnemyKind {
    /// Plays as a regular step
    Goomba = 0x01,
    /// Two steps a beat apart, one for the koopa and one for the shell
    KoopaTroopa = 0x02,
    /// Step
    BobOmbAndPodoboo = 0x03,
    /// Step
    CheepCheep = 0x04,
    /// Mine
    Spiny = 0x05,
    /// Step
    Blooper = 0x06,
    /// Plays as a regular step
    Hammer = 0x07,
    /// Step
    CoinSwitch = 0x08,
    /// Step
    Boo = 0x09,
    /// Shares its name with `0x03`
    BobOmbAndPodobooAlt = 0x0A,
    /// Step that moves between columns
    CheepCheepRearrange = 0x0B,
    /// Shares its name with `0x08`
    CoinSwitchAlt = 0x0C,
    /// Step
    Freezie = 0x0D,
    /// Mine
    IceSpiny = 0x0E,
    /// Step
    BulletBill = 0x0F,
    /// Step
    RocketPart = 0x10,
}

impl EnemyKind {
    /// Looks up a raw item kind.
    pub fn from_code(code: i32) -> Option<Self> {
        Self::try_from(code).ok()
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        use EnemyKind::*;
        match self {
            Goomba => "Goomba",
            KoopaTroopa => "Koopa Troopa",
            BobOmbAndPodoboo | BobOmbAndPodobooAlt => "Bob-Omb and Podoboo",
            CheepCheep => "Cheep Cheep",
            Spiny => "Spiny",
            Blooper => "Blooper",
            Hammer => "Hammer",
            CoinSwitch | CoinSwitchAlt => "Coin Switch",
            Boo => "Boo",
            CheepCheepRearrange => "Cheep Cheep (Rearrange)",
            Freezie => "Freezie",
            IceSpiny => "Ice Spiny",
            BulletBill => "Bullet Bill",
            RocketPart => "Rocket Part",
        }
    }

    /// True for overlays the player must avoid rather than step on.
    pub const fn is_mine(&self) -> bool {
        matches!(self, EnemyKind::Spiny | EnemyKind::IceSpiny)
    }

    /// Display name for a raw code, `"Unknown"` if unrecognized.
    pub fn name_of(code: i32) -> &'static str {
        Self::from_code(code).map(|k| k.name()).unwrap_or("Unknown")
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[test]
fn codes_map_to_names() {
    use pretty_assertions::assert_eq;
    assert_eq!(EnemyKind::name_of(0x02), "Koopa Troopa");
    assert_eq!(EnemyKind::name_of(0x0A), "Bob-Omb and Podoboo");
    assert_eq!(EnemyKind::name_of(0x10), "Rocket Part");
    assert_eq!(EnemyKind::name_of(0), "Unknown");
    assert_eq!(EnemyKind::name_of(0x11), "Unknown");
    assert_eq!(i32::from(EnemyKind::IceSpiny), 0x0E);
    assert!(EnemyKind::IceSpiny.is_mine());
    assert!(!EnemyKind::Goomba.is_mine());
}
