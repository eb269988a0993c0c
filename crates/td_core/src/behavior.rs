//! Static per-kind data and behavior dispatch.
//!
//! Every [`EntityKind`] has one row in [`ENTITY_INFO`]: stats copied into new
//! entities, optional parameter blocks for the kind's role, and optional
//! function pointers the level calls at fixed points (tick, frame update,
//! draw, placement check). A missing pointer is a no-op.

use serde::{Deserialize, Serialize};

use crate::draw::{self, palette, DrawCommand};
use crate::entity::{Entity, EntityId};
use crate::level::Level;
use crate::math::{Aabb, IVec2, TileCoord};
use crate::systems;

/// Every kind of thing the level knows about, including shop-only items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityKind {
    /// Basic turret.
    TurretL0,
    /// Faster turret.
    TurretL1,
    /// Fastest turret.
    TurretL2,
    /// Shell-firing turret.
    CannonL0,
    /// Heavier shell-firing turret.
    CannonL1,
    /// Tier 1 mine.
    MineL0,
    /// Tier 2 mine.
    MineL1,
    /// Tier 3 mine.
    MineL2,
    /// Radar with a one-tile reveal radius.
    RadarL0,
    /// Radar with a two-tile reveal radius.
    RadarL1,
    /// Bait that aliens prefer over plain buildings.
    DecoyTruck,
    /// Noise source that aliens avoid pathing through.
    Boombox,
    /// Shop item: heal the truck.
    Repair,
    /// Shop item: truck armor.
    ArmorUpgrade,
    /// Shop item: truck speed.
    SpeedUpgrade,
    /// Bullet fired by `TurretL0`.
    BulletL0,
    /// Bullet fired by `TurretL1`.
    BulletL1,
    /// Bullet fired by `TurretL2`.
    BulletL2,
    /// Shell fired by `CannonL0`.
    ShellL0,
    /// Shell fired by `CannonL1`.
    ShellL1,
    /// Marker on the finish warehouse.
    Flag,
    /// The convoy truck.
    Truck,
    /// Small alien.
    AlienL0,
    /// Large alien.
    AlienL1,
    /// Small ship.
    ShipL0,
    /// Large ship.
    ShipL1,
}

impl EntityKind {
    /// Number of kinds.
    pub const COUNT: usize = 26;

    /// All kinds in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::TurretL0,
        Self::TurretL1,
        Self::TurretL2,
        Self::CannonL0,
        Self::CannonL1,
        Self::MineL0,
        Self::MineL1,
        Self::MineL2,
        Self::RadarL0,
        Self::RadarL1,
        Self::DecoyTruck,
        Self::Boombox,
        Self::Repair,
        Self::ArmorUpgrade,
        Self::SpeedUpgrade,
        Self::BulletL0,
        Self::BulletL1,
        Self::BulletL2,
        Self::ShellL0,
        Self::ShellL1,
        Self::Flag,
        Self::Truck,
        Self::AlienL0,
        Self::AlienL1,
        Self::ShipL0,
        Self::ShipL1,
    ];

    /// Static table row for this kind.
    #[inline]
    #[must_use]
    pub fn info(self) -> &'static EntityInfo {
        &ENTITY_INFO[self as usize]
    }

    /// Kinds the player can buy, in shop order.
    pub fn purchasable() -> impl Iterator<Item = Self> {
        Self::ALL
            .into_iter()
            .filter(|k| k.info().flags.intersects(EntityFlags::PLACEABLE | EntityFlags::NOT_AN_ENTITY))
    }
}

/// Classification flags for entity kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EntityFlags(u32);

impl EntityFlags {
    /// Hostile: targeted by turrets, damaged by projectiles and mines.
    pub const ENEMY: Self = Self(1 << 0);
    /// Alien spawner.
    pub const SHIP: Self = Self(1 << 1);
    /// Walking alien.
    pub const ALIEN: Self = Self(1 << 2);
    /// Player can place it on the map.
    pub const PLACEABLE: Self = Self(1 << 3);
    /// Does not occupy its tile for placement.
    pub const DOES_NOT_BLOCK: Self = Self(1 << 4);
    /// Shop item with no entity behind it.
    pub const NOT_AN_ENTITY: Self = Self(1 << 5);

    /// No flags set.
    #[must_use]
    pub const fn empty() -> Self {
        Self(0)
    }

    /// Raw bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// True if all flags in `other` are set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// True if any flag in `other` is set.
    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two flag sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl std::ops::BitOr for EntityFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

/// Called once per fixed tick.
pub type TickFn = fn(&mut Level, EntityId);
/// Called once per frame with the frame delta in seconds.
pub type UpdateFn = fn(&mut Level, EntityId, f32);
/// Appends render commands for one entity.
pub type DrawFn = fn(&Level, &Entity, &mut Vec<DrawCommand>);
/// Placement legality for a tile.
pub type CanPlaceFn = fn(&Level, TileCoord) -> bool;

/// Behavior hooks for one kind.
#[derive(Clone, Copy, Debug)]
pub struct Behavior {
    /// Fixed-tick logic.
    pub tick: Option<TickFn>,
    /// Per-frame logic.
    pub update: Option<UpdateFn>,
    /// Render command emission.
    pub draw: Option<DrawFn>,
    /// Placement predicate.
    pub can_place: Option<CanPlaceFn>,
}

impl Behavior {
    const NONE: Self = Self {
        tick: None,
        update: None,
        draw: None,
        can_place: None,
    };
}

/// Weapon parameters for turrets and cannons.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TurretParams {
    /// Projectile kind fired.
    pub projectile: EntityKind,
    /// Shots per second.
    pub shots_per_second: f32,
    /// Re-run target acquisition right before each volley.
    pub retarget_before_fire: bool,
}

/// Area damage for shells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlastParams {
    /// Half extent of the square damage area in pixels.
    pub radius_px: i32,
}

/// Projectile parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileParams {
    /// Speed in pixels per second.
    pub speed: f32,
    /// Damage on hit, or peak damage for a blast.
    pub damage: f32,
    /// Present for shells.
    pub blast: Option<BlastParams>,
}

/// Parameters shared by hostile kinds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyParams {
    /// Movement speed multiplier.
    pub speed: f32,
    /// Contact damage multiplier.
    pub strength: f32,
    /// Money awarded on death.
    pub bounty: u32,
}

/// One entry of a ship's spawn table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipSpawn {
    /// Kind spawned.
    pub kind: EntityKind,
    /// Spawn attempts per second.
    pub per_second: f32,
    /// Probability each attempt succeeds.
    pub chance: f32,
}

/// Ship parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipParams {
    /// Spawn table.
    pub spawns: &'static [ShipSpawn],
}

/// Mine parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MineParams {
    /// Tier (1-based); scales blast area and damage.
    pub tier: i32,
}

/// Radar parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadarParams {
    /// Reveal radius in tiles.
    pub radius: i32,
}

/// Boombox parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MusicParams {
    /// Radius in tiles that hears the music.
    pub radius: i32,
}

/// One row of the static entity table.
#[derive(Clone, Copy, Debug)]
pub struct EntityInfo {
    /// Kind this row describes.
    pub kind: EntityKind,
    /// Display name.
    pub name: &'static str,
    /// Sprite atlas cell.
    pub base_sprite: IVec2,
    /// Palette index for effects.
    pub palette: u8,
    /// Classification flags.
    pub flags: EntityFlags,
    /// Local bounding box offset from the position.
    pub aabb: Aabb,
    /// Health bar scale.
    pub max_health: u32,
    /// Health of a new entity.
    pub base_health: f32,
    /// Price to unlock in the shop.
    pub unlock_price: u32,
    /// Price per purchase.
    pub buy_price: u32,
    /// Behavior hooks.
    pub behavior: Behavior,
    /// Present for turrets and cannons.
    pub turret: Option<TurretParams>,
    /// Present for bullets and shells.
    pub projectile: Option<ProjectileParams>,
    /// Present for aliens and ships.
    pub enemy: Option<EnemyParams>,
    /// Present for ships.
    pub ship: Option<ShipParams>,
    /// Present for mines.
    pub mine: Option<MineParams>,
    /// Present for radars.
    pub radar: Option<RadarParams>,
    /// Present for boomboxes.
    pub music: Option<MusicParams>,
}

impl EntityInfo {
    const BLANK: Self = Self {
        kind: EntityKind::Flag,
        name: "",
        base_sprite: IVec2::ZERO,
        palette: palette::WHITE,
        flags: EntityFlags::empty(),
        aabb: Aabb::new(IVec2::ZERO, IVec2::new(7, 7)),
        max_health: 0,
        base_health: 0.0,
        unlock_price: 0,
        buy_price: 0,
        behavior: Behavior::NONE,
        turret: None,
        projectile: None,
        enemy: None,
        ship: None,
        mine: None,
        radar: None,
        music: None,
    };

    /// True if entities of this kind count as enemies.
    #[must_use]
    pub const fn is_enemy(&self) -> bool {
        self.flags.contains(EntityFlags::ENEMY)
    }

    /// True if this kind can exist as an entity.
    #[must_use]
    pub const fn is_entity(&self) -> bool {
        !self.flags.contains(EntityFlags::NOT_AN_ENTITY)
    }
}

const fn aabb(min: (i32, i32), max: (i32, i32)) -> Aabb {
    Aabb::new(IVec2::new(min.0, min.1), IVec2::new(max.0, max.1))
}

const TURRET: Behavior = Behavior {
    tick: Some(systems::turret::tick),
    draw: Some(draw::draw_turret),
    can_place: Some(systems::building::can_place),
    ..Behavior::NONE
};

const MINE: Behavior = Behavior {
    tick: Some(systems::mine::tick),
    draw: Some(draw::draw_basic),
    can_place: Some(systems::building::can_place),
    ..Behavior::NONE
};

const RADAR: Behavior = Behavior {
    tick: Some(systems::building::tick),
    draw: Some(draw::draw_radar),
    can_place: Some(systems::building::can_place),
    ..Behavior::NONE
};

const BUILDING: Behavior = Behavior {
    tick: Some(systems::building::tick),
    draw: Some(draw::draw_basic),
    can_place: Some(systems::building::can_place),
    ..Behavior::NONE
};

const BULLET: Behavior = Behavior {
    tick: Some(systems::projectile::tick_bullet),
    update: Some(systems::projectile::update),
    draw: Some(draw::draw_basic),
    ..Behavior::NONE
};

const SHELL: Behavior = Behavior {
    tick: Some(systems::projectile::tick_shell),
    update: Some(systems::projectile::update),
    draw: Some(draw::draw_basic),
    ..Behavior::NONE
};

const ALIEN: Behavior = Behavior {
    tick: Some(systems::alien::tick),
    draw: Some(draw::draw_alien),
    ..Behavior::NONE
};

const SHIP: Behavior = Behavior {
    tick: Some(systems::ship::tick),
    draw: Some(draw::draw_ship),
    ..Behavior::NONE
};

static SHIP_L0_SPAWNS: [ShipSpawn; 1] = [ShipSpawn {
    kind: EntityKind::AlienL0,
    per_second: 0.5,
    chance: 1.0,
}];

static SHIP_L1_SPAWNS: [ShipSpawn; 2] = [
    ShipSpawn {
        kind: EntityKind::AlienL0,
        per_second: 0.5,
        chance: 1.0,
    },
    ShipSpawn {
        kind: EntityKind::AlienL1,
        per_second: 0.25,
        chance: 0.5,
    },
];

/// Static entity table, indexed by `EntityKind as usize`.
pub static ENTITY_INFO: [EntityInfo; EntityKind::COUNT] = [
    EntityInfo {
        kind: EntityKind::TurretL0,
        name: "TURRET MK. 1",
        base_sprite: IVec2::new(0, 5),
        palette: palette::L0,
        flags: EntityFlags::PLACEABLE,
        max_health: 10,
        base_health: 10.0,
        buy_price: 25,
        behavior: TURRET,
        turret: Some(TurretParams {
            projectile: EntityKind::BulletL0,
            shots_per_second: 4.0,
            retarget_before_fire: false,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::TurretL1,
        name: "TURRET MK. 2",
        base_sprite: IVec2::new(1, 5),
        palette: palette::L1,
        flags: EntityFlags::PLACEABLE,
        max_health: 20,
        base_health: 20.0,
        unlock_price: 100,
        buy_price: 50,
        behavior: TURRET,
        turret: Some(TurretParams {
            projectile: EntityKind::BulletL1,
            shots_per_second: 7.5,
            retarget_before_fire: false,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::TurretL2,
        name: "TURRET MK. 3",
        base_sprite: IVec2::new(2, 5),
        palette: palette::L2,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((0, 0), (6, 6)),
        max_health: 35,
        base_health: 35.0,
        unlock_price: 250,
        buy_price: 100,
        behavior: TURRET,
        turret: Some(TurretParams {
            projectile: EntityKind::BulletL2,
            shots_per_second: 10.0,
            retarget_before_fire: false,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::CannonL0,
        name: "CANNON MK. 1",
        base_sprite: IVec2::new(6, 5),
        palette: palette::L0,
        flags: EntityFlags::PLACEABLE,
        max_health: 25,
        base_health: 25.0,
        unlock_price: 300,
        buy_price: 150,
        behavior: TURRET,
        turret: Some(TurretParams {
            projectile: EntityKind::ShellL0,
            shots_per_second: 0.75,
            retarget_before_fire: true,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::CannonL1,
        name: "CANNON MK. 2",
        base_sprite: IVec2::new(7, 5),
        palette: palette::L1,
        flags: EntityFlags::PLACEABLE,
        max_health: 40,
        base_health: 40.0,
        unlock_price: 600,
        buy_price: 250,
        behavior: TURRET,
        turret: Some(TurretParams {
            projectile: EntityKind::ShellL1,
            shots_per_second: 1.0,
            retarget_before_fire: true,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::MineL0,
        name: "MINE MK. 1",
        base_sprite: IVec2::new(3, 4),
        palette: palette::L0,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((0, 2), (6, 4)),
        unlock_price: 100,
        buy_price: 75,
        behavior: MINE,
        mine: Some(MineParams { tier: 1 }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::MineL1,
        name: "MINE MK. 2",
        base_sprite: IVec2::new(4, 4),
        palette: palette::L1,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((0, 2), (6, 4)),
        unlock_price: 200,
        buy_price: 125,
        behavior: MINE,
        mine: Some(MineParams { tier: 2 }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::MineL2,
        name: "MINE MK. 3",
        base_sprite: IVec2::new(5, 4),
        palette: palette::L2,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((0, 2), (6, 4)),
        unlock_price: 400,
        buy_price: 175,
        behavior: MINE,
        mine: Some(MineParams { tier: 3 }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::RadarL0,
        name: "RADAR MK. 1",
        base_sprite: IVec2::new(3, 5),
        palette: palette::L0,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((1, 0), (5, 5)),
        max_health: 5,
        base_health: 5.0,
        unlock_price: 150,
        buy_price: 100,
        behavior: RADAR,
        radar: Some(RadarParams { radius: 1 }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::RadarL1,
        name: "RADAR MK. 2",
        base_sprite: IVec2::new(4, 5),
        palette: palette::L1,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((1, 0), (5, 5)),
        max_health: 10,
        base_health: 10.0,
        unlock_price: 500,
        buy_price: 250,
        behavior: RADAR,
        radar: Some(RadarParams { radius: 2 }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::DecoyTruck,
        name: "DECOY TRUCK",
        base_sprite: IVec2::new(6, 0),
        palette: palette::ORANGE,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((1, 1), (7, 6)),
        max_health: 25,
        base_health: 25.0,
        unlock_price: 250,
        buy_price: 150,
        behavior: BUILDING,
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::Boombox,
        name: "BOOMBOX",
        base_sprite: IVec2::new(3, 3),
        palette: palette::BLACK,
        flags: EntityFlags::PLACEABLE,
        aabb: aabb((1, 0), (5, 5)),
        max_health: 5,
        base_health: 5.0,
        unlock_price: 750,
        buy_price: 200,
        behavior: BUILDING,
        music: Some(MusicParams { radius: 3 }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::Repair,
        name: "REPAIR 10",
        base_sprite: IVec2::new(6, 0),
        flags: EntityFlags::NOT_AN_ENTITY,
        buy_price: 50,
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::ArmorUpgrade,
        name: "ARMOR UPGRADE",
        base_sprite: IVec2::new(7, 0),
        flags: EntityFlags::NOT_AN_ENTITY,
        buy_price: 1000,
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::SpeedUpgrade,
        name: "SPEED UPGRADE",
        base_sprite: IVec2::new(8, 0),
        flags: EntityFlags::NOT_AN_ENTITY,
        buy_price: 1000,
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::BulletL0,
        name: "BULLET MK. 1",
        base_sprite: IVec2::new(0, 7),
        flags: EntityFlags::DOES_NOT_BLOCK,
        aabb: aabb((0, 0), (1, 1)),
        behavior: BULLET,
        projectile: Some(ProjectileParams {
            speed: 110.0,
            damage: 1.0,
            blast: None,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::BulletL1,
        name: "BULLET MK. 2",
        base_sprite: IVec2::new(0, 7),
        flags: EntityFlags::DOES_NOT_BLOCK,
        aabb: aabb((0, 0), (1, 1)),
        behavior: BULLET,
        projectile: Some(ProjectileParams {
            speed: 140.0,
            damage: 1.0,
            blast: None,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::BulletL2,
        name: "BULLET MK. 3",
        base_sprite: IVec2::new(0, 7),
        flags: EntityFlags::DOES_NOT_BLOCK,
        aabb: aabb((0, 0), (1, 1)),
        behavior: BULLET,
        projectile: Some(ProjectileParams {
            speed: 200.0,
            damage: 1.0,
            blast: None,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::ShellL0,
        name: "SHELL MK. 1",
        base_sprite: IVec2::new(1, 7),
        flags: EntityFlags::DOES_NOT_BLOCK,
        aabb: aabb((0, 0), (2, 2)),
        behavior: SHELL,
        projectile: Some(ProjectileParams {
            speed: 80.0,
            damage: 12.0,
            blast: Some(BlastParams { radius_px: 12 }),
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::ShellL1,
        name: "SHELL MK. 2",
        base_sprite: IVec2::new(1, 7),
        flags: EntityFlags::DOES_NOT_BLOCK,
        aabb: aabb((0, 0), (2, 2)),
        behavior: SHELL,
        projectile: Some(ProjectileParams {
            speed: 90.0,
            damage: 20.0,
            blast: Some(BlastParams { radius_px: 16 }),
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::Flag,
        name: "FLAG",
        base_sprite: IVec2::new(7, 1),
        flags: EntityFlags::DOES_NOT_BLOCK,
        behavior: Behavior {
            draw: Some(draw::draw_basic),
            ..Behavior::NONE
        },
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::Truck,
        name: "TRUCK",
        base_sprite: IVec2::new(3, 1),
        palette: palette::LIGHT_GRAY,
        max_health: 10,
        base_health: 10.0,
        behavior: Behavior {
            tick: Some(systems::truck::tick),
            draw: Some(draw::draw_truck),
            ..Behavior::NONE
        },
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::AlienL0,
        name: "ALIEN MK. 1",
        base_sprite: IVec2::new(0, 10),
        palette: palette::ALIEN_GREEN,
        flags: EntityFlags::ENEMY.union(EntityFlags::ALIEN),
        aabb: aabb((0, 0), (4, 4)),
        max_health: 10,
        base_health: 10.0,
        behavior: ALIEN,
        enemy: Some(EnemyParams {
            speed: 1.0,
            strength: 1.0,
            bounty: 5,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::AlienL1,
        name: "ALIEN MK. 2",
        base_sprite: IVec2::new(2, 10),
        palette: palette::ALIEN_RED,
        flags: EntityFlags::ENEMY.union(EntityFlags::ALIEN),
        aabb: aabb((0, 0), (4, 4)),
        max_health: 20,
        base_health: 20.0,
        behavior: ALIEN,
        enemy: Some(EnemyParams {
            speed: 1.4,
            strength: 2.0,
            bounty: 12,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::ShipL0,
        name: "SHIP MK. 1",
        base_sprite: IVec2::new(0, 8),
        palette: palette::ALIEN_GREY,
        flags: EntityFlags::ENEMY.union(EntityFlags::SHIP),
        aabb: aabb((0, 0), (7, 5)),
        max_health: 25,
        base_health: 25.0,
        behavior: SHIP,
        enemy: Some(EnemyParams {
            speed: 0.0,
            strength: 1.0,
            bounty: 10,
        }),
        ship: Some(ShipParams {
            spawns: &SHIP_L0_SPAWNS,
        }),
        ..EntityInfo::BLANK
    },
    EntityInfo {
        kind: EntityKind::ShipL1,
        name: "SHIP MK. 2",
        base_sprite: IVec2::new(1, 8),
        palette: palette::ALIEN_GREY,
        flags: EntityFlags::ENEMY.union(EntityFlags::SHIP),
        aabb: aabb((0, 0), (7, 5)),
        max_health: 60,
        base_health: 60.0,
        behavior: SHIP,
        enemy: Some(EnemyParams {
            speed: 0.0,
            strength: 2.0,
            bounty: 25,
        }),
        ship: Some(ShipParams {
            spawns: &SHIP_L1_SPAWNS,
        }),
        ..EntityInfo::BLANK
    },
];
