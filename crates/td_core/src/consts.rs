//! Simulation-wide constants.

/// Fixed simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 30;

/// Duration of one tick in nanoseconds.
pub const NS_PER_TICK: u64 = 1_000_000_000 / TICKS_PER_SECOND as u64;

/// Most ticks a single frame may run before the clock drops the backlog.
pub const MAX_CATCHUP_TICKS: u64 = TICKS_PER_SECOND as u64;

/// Edge length of one tile in pixels.
pub const TILE_SIZE_PX: i32 = 8;

/// Width of the stock level layout in tiles.
pub const DEFAULT_LEVEL_WIDTH: i32 = 20;

/// Height of the stock level layout in tiles (108px / 8px).
pub const DEFAULT_LEVEL_HEIGHT: i32 = 13;

/// Default number of entity slots per level.
pub const MAX_ENTITIES: usize = 16384;

/// Node expansions before a path search gives up.
pub const PATH_MAX_ITERATIONS: usize = 1024;

/// Tiles visited before a nearest-entity spiral gives up.
pub const SPIRAL_MAX_TILES: usize = 1024;

/// Targeting and repathing run once every this many ticks per entity.
pub const RETARGET_INTERVAL: u64 = 5;

/// Result capacity for single-tile and blast queries.
pub const QUERY_CAPACITY: usize = 64;

/// Result capacity for projectile collision queries.
pub const COLLISION_QUERY_CAPACITY: usize = 256;
