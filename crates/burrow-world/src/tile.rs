//! Tile kinds and their groupings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Material or content of one grid cell.
///
/// Kinds round-trip through their camelCase names (`"hardStone"`,
/// `"goldOre"`). Any name outside the known set parses to
/// [`TileKind::Unknown`], which the catalog resolves to default properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TileKind {
    /// Empty space
    #[default]
    Air,
    /// Soft surface soil
    Dirt,
    /// Stone band (rows 16-30)
    Stone,
    /// Hard stone band (rows 31-50)
    HardStone,
    /// Deepest stone band (rows 51+)
    DarkStone,
    /// Coal seam
    Coal,
    /// Copper ore
    CopperOre,
    /// Iron ore
    IronOre,
    /// Silver ore
    SilverOre,
    /// Gold ore
    GoldOre,
    /// Gem ore
    GemOre,
    /// Uranium ore
    UraniumOre,
    /// Alien ore
    AlienOre,
    /// Crystal
    Crystal,
    /// Void crystal
    VoidCrystal,
    /// Alien crystal
    AlienCrystal,
    /// Obsidian
    Obsidian,
    /// Loose rock obstacle
    Rock,
    /// Lava (fluid, damaging)
    Lava,
    /// Gas pocket (fluid, damaging, rises)
    Gas,
    /// Water (fluid)
    Water,
    /// Alien rock
    AlienRock,
    /// Alien nest
    AlienNest,
    /// Alien artifact
    AlienArtifact,
    /// Clay
    Clay,
    /// Ancient driller part
    DrillerPart,
    /// Alien egg
    AlienEgg,
    /// Crystal formation
    CrystalFormation,
    /// Indestructible world edge
    Boundary,
    /// Any name not in the known set
    Unknown,
}

impl TileKind {
    /// Every known kind, excluding [`TileKind::Unknown`].
    pub const ALL: [TileKind; 29] = [
        Self::Air,
        Self::Dirt,
        Self::Stone,
        Self::HardStone,
        Self::DarkStone,
        Self::Coal,
        Self::CopperOre,
        Self::IronOre,
        Self::SilverOre,
        Self::GoldOre,
        Self::GemOre,
        Self::UraniumOre,
        Self::AlienOre,
        Self::Crystal,
        Self::VoidCrystal,
        Self::AlienCrystal,
        Self::Obsidian,
        Self::Rock,
        Self::Lava,
        Self::Gas,
        Self::Water,
        Self::AlienRock,
        Self::AlienNest,
        Self::AlienArtifact,
        Self::Clay,
        Self::DrillerPart,
        Self::AlienEgg,
        Self::CrystalFormation,
        Self::Boundary,
    ];

    /// Kinds moved by the fluid simulator.
    pub const FLUIDS: [TileKind; 3] = [Self::Water, Self::Lava, Self::Gas];

    /// The camelCase name of this kind.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Air => "air",
            Self::Dirt => "dirt",
            Self::Stone => "stone",
            Self::HardStone => "hardStone",
            Self::DarkStone => "darkStone",
            Self::Coal => "coal",
            Self::CopperOre => "copperOre",
            Self::IronOre => "ironOre",
            Self::SilverOre => "silverOre",
            Self::GoldOre => "goldOre",
            Self::GemOre => "gemOre",
            Self::UraniumOre => "uraniumOre",
            Self::AlienOre => "alienOre",
            Self::Crystal => "crystal",
            Self::VoidCrystal => "voidCrystal",
            Self::AlienCrystal => "alienCrystal",
            Self::Obsidian => "obsidian",
            Self::Rock => "rock",
            Self::Lava => "lava",
            Self::Gas => "gas",
            Self::Water => "water",
            Self::AlienRock => "alienRock",
            Self::AlienNest => "alienNest",
            Self::AlienArtifact => "alienArtifact",
            Self::Clay => "clay",
            Self::DrillerPart => "drillerPart",
            Self::AlienEgg => "alienEgg",
            Self::CrystalFormation => "crystalFormation",
            Self::Boundary => "boundary",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a name, mapping anything unrecognized to `Unknown`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name)
            .unwrap_or(Self::Unknown)
    }

    /// Returns true for water, lava, and gas.
    #[must_use]
    pub const fn is_fluid(self) -> bool {
        matches!(self, Self::Water | Self::Lava | Self::Gas)
    }

    /// Returns true for empty space.
    #[must_use]
    pub const fn is_air(self) -> bool {
        matches!(self, Self::Air)
    }

    /// Single-character glyph for text dumps of the grid.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Air => ' ',
            Self::Dirt => '.',
            Self::Stone => ':',
            Self::HardStone => '%',
            Self::DarkStone => '#',
            Self::Coal => 'c',
            Self::CopperOre => 'o',
            Self::IronOre => 'i',
            Self::SilverOre => 's',
            Self::GoldOre => 'g',
            Self::GemOre => 'e',
            Self::UraniumOre => 'u',
            Self::AlienOre => 'a',
            Self::Crystal => '*',
            Self::VoidCrystal => 'v',
            Self::AlienCrystal => 'x',
            Self::Obsidian => 'O',
            Self::Rock => 'R',
            Self::Lava => 'L',
            Self::Gas => '~',
            Self::Water => 'w',
            Self::AlienRock => 'A',
            Self::AlienNest => 'N',
            Self::AlienArtifact => '!',
            Self::Clay => '=',
            Self::DrillerPart => 'D',
            Self::AlienEgg => '0',
            Self::CrystalFormation => '+',
            Self::Boundary => '|',
            Self::Unknown => '?',
        }
    }

    /// The category this kind belongs to, if any.
    #[must_use]
    pub fn category(self) -> Option<TileCategory> {
        TileCategory::ALL
            .into_iter()
            .find(|category| category.members().contains(&self))
    }
}

impl fmt::Display for TileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TileKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_name(s))
    }
}

impl From<String> for TileKind {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl From<TileKind> for String {
    fn from(kind: TileKind) -> Self {
        kind.name().to_owned()
    }
}

/// Broad groupings of tile kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileCategory {
    /// Air, soils, and stone bands
    BasicTerrain,
    /// Coal, copper, iron, silver
    CommonOre,
    /// Gold, gem, uranium, alien ore
    ValuableOre,
    /// Crystals and obsidian
    SpecialMaterial,
    /// Rock and the three fluids
    Obstacle,
    /// Alien structures
    Alien,
    /// Evolution items
    SpecialObject,
}

impl TileCategory {
    /// All categories.
    pub const ALL: [TileCategory; 7] = [
        Self::BasicTerrain,
        Self::CommonOre,
        Self::ValuableOre,
        Self::SpecialMaterial,
        Self::Obstacle,
        Self::Alien,
        Self::SpecialObject,
    ];

    /// Kinds in this category.
    #[must_use]
    pub const fn members(self) -> &'static [TileKind] {
        use TileKind as K;
        match self {
            Self::BasicTerrain => &[
                K::Air,
                K::Dirt,
                K::Stone,
                K::HardStone,
                K::DarkStone,
                K::Clay,
            ],
            Self::CommonOre => &[K::Coal, K::CopperOre, K::IronOre, K::SilverOre],
            Self::ValuableOre => &[K::GoldOre, K::GemOre, K::UraniumOre, K::AlienOre],
            Self::SpecialMaterial => &[K::Crystal, K::VoidCrystal, K::AlienCrystal, K::Obsidian],
            Self::Obstacle => &[K::Rock, K::Lava, K::Gas, K::Water],
            Self::Alien => &[K::AlienRock, K::AlienNest, K::AlienArtifact],
            Self::SpecialObject => &[K::DrillerPart, K::AlienEgg, K::CrystalFormation],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for kind in TileKind::ALL {
            assert_eq!(TileKind::from_name(kind.name()), kind);
        }
    }

    #[test]
    fn test_unrecognized_name_is_unknown() {
        assert_eq!(TileKind::from_name("mithril"), TileKind::Unknown);
        assert_eq!(TileKind::from_name("HardStone"), TileKind::Unknown);
        assert_eq!("goldOre".parse::<TileKind>(), Ok(TileKind::GoldOre));
    }

    #[test]
    fn test_fluids() {
        let fluids: Vec<_> = TileKind::ALL.into_iter().filter(|k| k.is_fluid()).collect();
        assert_eq!(fluids, TileKind::FLUIDS.to_vec());
    }

    #[test]
    fn test_categories_partition_known_kinds() {
        for kind in TileKind::ALL {
            let owners = TileCategory::ALL
                .into_iter()
                .filter(|c| c.members().contains(&kind))
                .count();
            let expected = usize::from(kind != TileKind::Boundary);
            assert_eq!(owners, expected, "{kind} in {owners} categories");
        }
        assert_eq!(TileKind::Boundary.category(), None);
        assert_eq!(TileKind::Unknown.category(), None);
        assert_eq!(TileKind::GoldOre.category(), Some(TileCategory::ValuableOre));
    }

    #[test]
    fn test_glyphs_are_distinct() {
        let mut glyphs: Vec<char> = TileKind::ALL.iter().map(|k| k.glyph()).collect();
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), TileKind::ALL.len());
    }
}
