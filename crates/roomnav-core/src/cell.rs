//! [`CellState`] snapshots and the [`MovementProfile`] passability rules.

use std::fmt;

/// Kind of grid entity occupying a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    Decoration,
    Rock,
    RockAlt,
    RockAlt2,
    RockTinted,
    RockBomb,
    RockSpiked,
    RockSuperSpecial,
    Block,
    Pit,
    Spikes,
    SpiderWeb,
    Lock,
    Tnt,
    Poop,
    Wall,
    Door,
    Pillar,
    TrapDoor,
    Gravity,
    PressurePlate,
    /// Any host entity the rules below do not name.
    Other(i32),
}

impl CellKind {
    /// Whether this kind belongs to the breakable rock family.
    pub const fn is_rock(self) -> bool {
        matches!(
            self,
            Self::Rock
                | Self::RockAlt
                | Self::RockAlt2
                | Self::RockTinted
                | Self::RockBomb
                | Self::RockSpiked
                | Self::RockSuperSpecial
        )
    }
}

/// Well-known `state` values the passability rules inspect.
pub mod state {
    /// A rock that has not been destroyed.
    pub const ROCK_UNBROKEN: i32 = 1;
    /// A pit that has not been filled.
    pub const PIT_OPEN: i32 = 0;
    /// A pit that has been filled in and can be walked over.
    pub const PIT_BRIDGED: i32 = 1;
    /// A poop pile with nothing left of it.
    pub const POOP_DESTROYED: i32 = 1000;
    /// A TNT barrel that has already gone off.
    pub const TNT_EXPLODED: i32 = 4;
}

/// What occupies a single grid cell, as far as movement is concerned.
///
/// Two snapshots compare equal iff kind, variant and sub-state all match,
/// which is what the per-tick change detection relies on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellState {
    /// `None` for an unoccupied cell.
    pub kind: Option<CellKind>,
    pub variant: i32,
    pub state: i32,
}

impl CellState {
    /// The unoccupied cell.
    pub const EMPTY: Self = Self {
        kind: None,
        variant: 0,
        state: 0,
    };

    /// An occupied cell with variant 0.
    pub const fn new(kind: CellKind, state: i32) -> Self {
        Self {
            kind: Some(kind),
            variant: 0,
            state,
        }
    }

    /// Set the variant (builder).
    pub const fn with_variant(mut self, variant: i32) -> Self {
        self.variant = variant;
        self
    }

    /// Whether nothing occupies the cell.
    pub const fn is_empty(&self) -> bool {
        self.kind.is_none()
    }
}

impl fmt::Display for CellState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            None => f.write_str("empty"),
            Some(kind) => write!(f, "{kind:?}.{}:{}", self.variant, self.state),
        }
    }
}

/// A named passability rule set.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementProfile {
    /// Blocked only by walls, pillars and doors (flying movers).
    Walls,
    /// Blocked by ground obstacles but free to cross pits.
    NoPits,
    /// Blocked by every ground obstacle, pits included.
    #[default]
    Ground,
    /// Can only occupy open pits.
    PitsOnly,
}

impl MovementProfile {
    /// Every profile, in table order.
    pub const ALL: [MovementProfile; 4] = [Self::Walls, Self::NoPits, Self::Ground, Self::PitsOnly];

    /// Number of profiles.
    pub const COUNT: usize = Self::ALL.len();

    /// Position of this profile in [`ALL`](Self::ALL).
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Self::Walls => 0,
            Self::NoPits => 1,
            Self::Ground => 2,
            Self::PitsOnly => 3,
        }
    }

    /// Whether a mover with this profile may stand on `cell`.
    pub fn allows(self, cell: &CellState) -> bool {
        let Some(kind) = cell.kind else {
            return self != Self::PitsOnly;
        };
        match self {
            Self::Walls => !matches!(kind, CellKind::Wall | CellKind::Pillar | CellKind::Door),
            Self::NoPits => kind == CellKind::Pit || ground_passable(kind, cell.state),
            Self::Ground => ground_passable(kind, cell.state),
            Self::PitsOnly => kind == CellKind::Pit && cell.state == state::PIT_OPEN,
        }
    }
}

fn ground_passable(kind: CellKind, st: i32) -> bool {
    match kind {
        CellKind::Decoration
        | CellKind::Gravity
        | CellKind::PressurePlate
        | CellKind::SpiderWeb
        | CellKind::TrapDoor => true,
        k if k.is_rock() => st != state::ROCK_UNBROKEN,
        CellKind::Poop => st == state::POOP_DESTROYED,
        CellKind::Pit => st == state::PIT_BRIDGED,
        CellKind::Tnt => st == state::TNT_EXPLODED,
        _ => false,
    }
}

impl fmt::Display for MovementProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
