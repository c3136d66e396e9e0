//! Static registry of tile physical properties.
//!
//! The catalog is total: every [`TileKind`], including
//! [`TileKind::Unknown`], resolves to a property set. Kinds without their own
//! entry fall back to [`TileProperties::DEFAULT`].

use serde::{Deserialize, Serialize};

use crate::tile::TileKind;

/// Physical and economic properties of a tile kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TileProperties {
    /// Blocks movement
    pub solid: bool,
    /// Hurts whatever stands in it
    pub damaging: bool,
    /// Counts as a mineable resource
    pub is_ore: bool,
    /// Hazard or obstacle
    pub is_obstacle: bool,
    /// Evolution item
    pub is_special: bool,
    /// Minimum dig power to mine the tile in one call
    pub durability: f32,
    /// Resource value handed out when mined
    pub resource_value: u32,
    /// Nutrition handed out when mined
    pub nutrition_value: f32,
    /// Only diggers with a matching special ability may mine this
    pub requires_special_mining: bool,
}

impl TileProperties {
    /// Fallback for kinds without an entry.
    pub const DEFAULT: Self = Self {
        solid: false,
        damaging: false,
        is_ore: false,
        is_obstacle: false,
        is_special: false,
        durability: 1.0,
        resource_value: 1,
        nutrition_value: 0.0,
        requires_special_mining: false,
    };

    const fn solid(durability: f32, nutrition_value: f32) -> Self {
        Self {
            solid: true,
            durability,
            nutrition_value,
            ..Self::DEFAULT
        }
    }

    const fn ore(durability: f32, resource_value: u32, nutrition_value: f32) -> Self {
        Self {
            solid: true,
            is_ore: true,
            durability,
            resource_value,
            nutrition_value,
            ..Self::DEFAULT
        }
    }

    const fn hazard(damaging: bool, is_obstacle: bool) -> Self {
        Self {
            damaging,
            is_obstacle,
            ..Self::DEFAULT
        }
    }

    const fn special_object() -> Self {
        Self {
            is_special: true,
            ..Self::DEFAULT
        }
    }

    const fn needs_special_mining(mut self) -> Self {
        self.requires_special_mining = true;
        self
    }

    /// Projects the classification flags.
    #[must_use]
    pub const fn class(&self) -> TileClass {
        TileClass {
            solid: self.solid,
            ore: self.is_ore,
            damaging: self.damaging,
            obstacle: self.is_obstacle,
            special: self.is_special,
        }
    }
}

impl Default for TileProperties {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Classification flags of a tile kind, as used by movement and rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TileClass {
    /// Blocks movement
    pub solid: bool,
    /// Mineable resource
    pub ore: bool,
    /// Hurts on contact
    pub damaging: bool,
    /// Hazard or obstacle
    pub obstacle: bool,
    /// Evolution item
    pub special: bool,
}

/// Registry mapping tile kinds to their properties.
#[derive(Debug, Clone, Copy, Default)]
pub struct TileCatalog;

impl TileCatalog {
    /// Looks up the properties of a kind. Never fails.
    #[must_use]
    pub const fn lookup(kind: TileKind) -> TileProperties {
        use TileKind as K;
        match kind {
            K::Air => TileProperties {
                durability: 0.0,
                resource_value: 0,
                ..TileProperties::DEFAULT
            },
            K::Dirt => TileProperties::solid(1.0, 1.0),
            K::Stone => TileProperties::solid(2.0, 0.0),
            K::HardStone => TileProperties::solid(3.0, 0.0),
            K::DarkStone => TileProperties::solid(4.0, 0.0),
            K::Clay => TileProperties::solid(1.5, 0.5),

            K::Coal => TileProperties::ore(1.5, 5, 2.0),
            K::CopperOre => TileProperties::ore(2.0, 10, 3.0),
            K::IronOre => TileProperties::ore(2.5, 15, 4.0),
            K::SilverOre => TileProperties::ore(3.0, 25, 5.0),
            K::GoldOre => TileProperties::ore(3.0, 50, 7.0),
            K::GemOre => TileProperties::ore(3.5, 75, 8.0),
            K::UraniumOre => TileProperties::ore(4.0, 100, 10.0),
            K::AlienOre => TileProperties::ore(4.5, 150, 15.0),

            K::Crystal => TileProperties::ore(3.0, 40, 8.0),
            K::VoidCrystal => TileProperties::ore(4.0, 120, 12.0),
            K::AlienCrystal => TileProperties::ore(5.0, 200, 20.0),
            K::Obsidian => TileProperties::solid(6.0, 0.0).needs_special_mining(),

            K::Rock => TileProperties {
                is_obstacle: true,
                ..TileProperties::solid(2.0, 0.0)
            }
            .needs_special_mining(),
            K::Lava | K::Gas => TileProperties::hazard(true, true),
            K::Water => TileProperties::hazard(false, false),

            K::AlienRock => TileProperties::solid(3.0, 0.0).needs_special_mining(),
            K::AlienNest => TileProperties::DEFAULT,
            K::AlienArtifact => TileProperties {
                is_ore: true,
                resource_value: 300,
                ..TileProperties::DEFAULT
            },

            K::DrillerPart | K::AlienEgg | K::CrystalFormation => {
                TileProperties::special_object()
            },

            K::Boundary => TileProperties {
                solid: true,
                durability: f32::INFINITY,
                resource_value: 0,
                ..TileProperties::DEFAULT
            },

            K::Unknown => TileProperties::DEFAULT,
        }
    }

    /// Classification flags of a kind.
    #[must_use]
    pub const fn classify(kind: TileKind) -> TileClass {
        Self::lookup(kind).class()
    }

    /// Whether the kind blocks movement.
    #[must_use]
    pub const fn is_solid(kind: TileKind) -> bool {
        Self::lookup(kind).solid
    }

    /// Whether the kind is a mineable resource.
    #[must_use]
    pub const fn is_ore(kind: TileKind) -> bool {
        Self::lookup(kind).is_ore
    }

    /// Whether the kind hurts on contact.
    #[must_use]
    pub const fn is_damaging(kind: TileKind) -> bool {
        Self::lookup(kind).damaging
    }

    /// Development palette colour (RGB) for flat-shaded rendering.
    #[must_use]
    pub const fn color(kind: TileKind) -> [u8; 3] {
        use TileKind as K;
        match kind {
            K::Dirt => [0x8B, 0x45, 0x13],
            K::Stone => [0x80, 0x80, 0x80],
            K::HardStone => [0x69, 0x69, 0x69],
            K::DarkStone => [0x46, 0x46, 0x46],
            K::Coal => [0x33, 0x33, 0x33],
            K::CopperOre => [0xB8, 0x73, 0x33],
            K::IronOre => [0xA1, 0x9D, 0x94],
            K::SilverOre => [0xC0, 0xC0, 0xC0],
            K::GoldOre => [0xFF, 0xD7, 0x00],
            K::GemOre => [0x93, 0x70, 0xDB],
            K::UraniumOre => [0x4B, 0xC0, 0x76],
            K::AlienOre => [0xDA, 0x70, 0xD6],
            K::Crystal => [0x87, 0xCE, 0xEB],
            K::VoidCrystal => [0x48, 0x3D, 0x8B],
            K::AlienCrystal => [0xFF, 0x14, 0x93],
            K::Obsidian | K::Boundary => [0x00, 0x00, 0x00],
            K::Rock => [0xA0, 0x52, 0x2D],
            K::Lava => [0xFF, 0x45, 0x00],
            K::Gas => [0xAD, 0xFF, 0x2F],
            K::Water => [0x1E, 0x90, 0xFF],
            K::AlienRock => [0x8A, 0x2B, 0xE2],
            K::AlienNest => [0xFF, 0x69, 0xB4],
            K::AlienArtifact => [0x00, 0xFF, 0xFF],
            K::Clay => [0xA5, 0x2A, 0x2A],
            K::DrillerPart => [0xDA, 0xA5, 0x20],
            K::AlienEgg => [0xFF, 0x00, 0xFF],
            K::CrystalFormation => [0x40, 0xE0, 0xD0],
            K::Air | K::Unknown => [0xFF, 0xFF, 0xFF],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_ore_entry() {
        let gold = TileCatalog::lookup(TileKind::GoldOre);
        assert!(gold.solid);
        assert!(!gold.damaging);
        assert!(gold.is_ore);
        assert_eq!(gold.durability, 3.0);
        assert_eq!(gold.resource_value, 50);
        assert_eq!(gold.nutrition_value, 7.0);
    }

    #[test]
    fn test_dirt_entry() {
        let dirt = TileCatalog::lookup(TileKind::Dirt);
        assert_eq!(dirt.durability, 1.0);
        assert_eq!(dirt.resource_value, 1);
        assert_eq!(dirt.nutrition_value, 1.0);
    }

    #[test]
    fn test_unknown_falls_back_to_default() {
        let props = TileCatalog::lookup(TileKind::from_name("notATile"));
        assert_eq!(props, TileProperties::DEFAULT);
        assert!(!props.solid);
        assert_eq!(props.durability, 1.0);
        assert_eq!(props.resource_value, 1);
        assert_eq!(props.nutrition_value, 0.0);
    }

    #[test]
    fn test_air_and_boundary() {
        let air = TileCatalog::classify(TileKind::Air);
        assert!(!air.solid);
        assert!(!air.damaging);

        let boundary = TileCatalog::lookup(TileKind::Boundary);
        assert!(boundary.solid);
        assert_eq!(boundary.resource_value, 0);
        assert_eq!(boundary.nutrition_value, 0.0);
    }

    #[test]
    fn test_hazards() {
        assert!(TileCatalog::is_damaging(TileKind::Lava));
        assert!(TileCatalog::is_damaging(TileKind::Gas));
        assert!(!TileCatalog::is_damaging(TileKind::Water));
        assert!(!TileCatalog::is_solid(TileKind::Water));
        assert!(TileCatalog::classify(TileKind::Rock).obstacle);
        assert!(!TileCatalog::classify(TileKind::Water).obstacle);
    }

    #[test]
    fn test_special_mining_gate() {
        let gated: Vec<_> = TileKind::ALL
            .into_iter()
            .filter(|k| TileCatalog::lookup(*k).requires_special_mining)
            .collect();
        assert_eq!(gated, vec![TileKind::Obsidian, TileKind::Rock, TileKind::AlienRock]);
    }

    #[test]
    fn test_ores_are_solid_except_artifact() {
        for kind in TileKind::ALL {
            let props = TileCatalog::lookup(kind);
            if props.is_ore && kind != TileKind::AlienArtifact {
                assert!(props.solid, "{kind} should be solid");
            }
        }
        assert!(TileCatalog::is_ore(TileKind::AlienArtifact));
        assert_eq!(TileCatalog::lookup(TileKind::AlienArtifact).resource_value, 300);
    }

    #[test]
    fn test_special_objects() {
        for kind in [TileKind::DrillerPart, TileKind::AlienEgg, TileKind::CrystalFormation] {
            let class = TileCatalog::classify(kind);
            assert!(class.special);
            assert!(!class.solid);
        }
    }

    #[test]
    fn test_palette() {
        assert_eq!(TileCatalog::color(TileKind::GoldOre), [0xFF, 0xD7, 0x00]);
        assert_eq!(TileCatalog::color(TileKind::Unknown), [0xFF, 0xFF, 0xFF]);
    }
}
