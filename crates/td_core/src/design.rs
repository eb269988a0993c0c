//! Level design data and map parsing.
//!
//! A level is an ASCII map (one glyph per tile, top row first in the text,
//! bottom row first on the grid), a ship manifest, a title and a completion
//! bonus. Designs are plain serde data so they load from RON as easily as
//! from the built-in campaign.

use serde::{Deserialize, Serialize};

use crate::behavior::{EntityFlags, EntityKind};
use crate::error::{GameError, Result};
use crate::grid::{Grid, TileFlags, TileType};
use crate::math::{IVec2, TileCoord};

/// Ships of one kind to land when play starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipEntry {
    /// Ship kind.
    pub kind: EntityKind,
    /// How many.
    pub count: u32,
}

/// Everything needed to build a level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelDesign {
    /// Display title. May contain `$NN` palette codes for the text renderer.
    pub title: String,
    /// Map rows, top of the level first.
    pub map: Vec<String>,
    /// Ships landed by [`crate::level::Level::go`].
    pub ships: Vec<ShipEntry>,
    /// Money awarded for finishing the level.
    pub bonus: u32,
}

/// A parsed map: terrain plus the two warehouse tiles.
#[derive(Debug, Clone)]
pub struct ParsedMap {
    /// Terrain grid.
    pub grid: Grid,
    /// Start warehouse.
    pub start: TileCoord,
    /// Finish warehouse.
    pub finish: TileCoord,
}

/// Terrain and flags for a map glyph.
#[must_use]
pub fn glyph_tile(glyph: char) -> Option<(TileType, TileFlags)> {
    let plain = TileFlags::empty();
    Some(match glyph {
        ' ' => (TileType::Base, plain),
        'r' => (TileType::Road, plain),
        'S' => (TileType::WarehouseStart, plain),
        'F' => (TileType::WarehouseFinish, plain),
        'x' => (TileType::Base, TileFlags::ALIEN_SPAWN),
        'm' => (TileType::Mud, plain),
        't' => (TileType::Forest, plain),
        '#' => (TileType::Rock, plain),
        '?' => (TileType::None, plain),
        _ => return None,
    })
}

/// Glyph for a tile, the inverse of [`glyph_tile`].
#[must_use]
pub fn tile_glyph(kind: TileType, flags: TileFlags) -> char {
    match kind {
        TileType::Base if flags.contains(TileFlags::ALIEN_SPAWN) => 'x',
        TileType::Base => ' ',
        TileType::Road => 'r',
        TileType::WarehouseStart => 'S',
        TileType::WarehouseFinish => 'F',
        TileType::Mud => 'm',
        TileType::Forest => 't',
        TileType::Rock => '#',
        TileType::None => '?',
    }
}

impl LevelDesign {
    /// Parse a design from RON text and check it.
    pub fn from_ron_str(text: &str) -> Result<Self> {
        let design: Self = ron::from_str(text).map_err(|e| GameError::DataParse(e.to_string()))?;
        design.validate()?;
        Ok(design)
    }

    /// Check the map parses and the manifest only names ships.
    pub fn validate(&self) -> Result<()> {
        self.parse_map()?;
        for entry in &self.ships {
            if !entry.kind.info().flags.contains(EntityFlags::SHIP) {
                return Err(GameError::UnknownEntityKind(format!("{:?}", entry.kind)));
            }
        }
        Ok(())
    }

    /// Title with `$NN` palette codes removed.
    #[must_use]
    pub fn plain_title(&self) -> String {
        let mut out = String::with_capacity(self.title.len());
        let mut chars = self.title.chars().peekable();
        while let Some(c) = chars.next() {
            if c == '$' && chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
                if chars.peek().is_some_and(char::is_ascii_digit) {
                    chars.next();
                }
                continue;
            }
            out.push(c);
        }
        out
    }

    /// Build the terrain grid and find the warehouses.
    pub fn parse_map(&self) -> Result<ParsedMap> {
        let height = self.map.len();
        let width = self.map.first().map_or(0, |row| row.chars().count());
        if height == 0 || width == 0 {
            return Err(GameError::EmptyMap);
        }

        let mut grid = Grid::new(width as i32, height as i32, TileType::Base);
        let mut start = None;
        let mut finish = None;

        for (row, text) in self.map.iter().enumerate() {
            let row_width = text.chars().count();
            if row_width != width {
                return Err(GameError::RaggedMap {
                    row,
                    width: row_width,
                    expected: width,
                });
            }

            let y = (height - 1 - row) as i32;
            for (column, glyph) in text.chars().enumerate() {
                let (kind, flags) =
                    glyph_tile(glyph).ok_or(GameError::UnknownGlyph { glyph, row, column })?;
                let tile = IVec2::new(column as i32, y);

                let slot = match kind {
                    TileType::WarehouseStart => Some((&mut start, "start")),
                    TileType::WarehouseFinish => Some((&mut finish, "finish")),
                    _ => None,
                };
                if let Some((slot, name)) = slot {
                    if slot.is_some() {
                        return Err(GameError::DuplicateWarehouse(name));
                    }
                    *slot = Some(tile);
                }

                if let Some(t) = grid.tile_mut(tile) {
                    t.kind = kind;
                    t.flags = flags;
                }
            }
        }

        Ok(ParsedMap {
            grid,
            start: start.ok_or(GameError::MissingWarehouse("start"))?,
            finish: finish.ok_or(GameError::MissingWarehouse("finish"))?,
        })
    }
}

fn rows(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| (*s).to_string()).collect()
}

/// The campaign that ships with the game.
#[must_use]
pub fn builtin_campaign() -> Vec<LevelDesign> {
    vec![
        LevelDesign {
            title: "$33LEVEL 1$08: FIRST DELIVERY".to_string(),
            map: rows(&[
                "              F    ",
                "              r    ",
                "         x    r    ",
                "   x          r    ",
                "        rrrrrrr    ",
                "        r          ",
                "        r   x      ",
                "Srrrrrrrr          ",
                "               x   ",
                "        x          ",
                "    x          x   ",
                "                   ",
                "                   ",
            ]),
            ships: vec![ShipEntry {
                kind: EntityKind::ShipL0,
                count: 1,
            }],
            bonus: 100,
        },
        LevelDesign {
            title: "$33LEVEL 2$08: MUDDY ROADS".to_string(),
            map: rows(&[
                "  x      mmm       F",
                "         mmm  x    r",
                "    ttt        rrrrr",
                "    ttt        r    ",
                " x      rrrrrrrr    ",
                "        r      ##   ",
                "  mm    r  x   ##   ",
                "  mm    r           ",
                "Srrrrrrrr     ttt  x",
                "              ttt   ",
                "   x     ##         ",
                "         ##     x   ",
                "                    ",
            ]),
            ships: vec![
                ShipEntry {
                    kind: EntityKind::ShipL0,
                    count: 2,
                },
                ShipEntry {
                    kind: EntityKind::ShipL1,
                    count: 1,
                },
            ],
            bonus: 200,
        },
        LevelDesign {
            title: "$33LEVEL 3$08: THE LONG HAUL".to_string(),
            map: rows(&[
                "x    ttt     x     F",
                "     ttt           r",
                "  rrrrrrrrrrrrrrrrrr",
                "  r     ##          ",
                "  r  x  ##   mmm  x ",
                "  r          mmm    ",
                "  rrrrrrrrrr        ",
                "           r   ttt  ",
                " x   ###   r   ttt  ",
                "     ###   r      x ",
                "Srrrrrrrrrrr        ",
                "                    ",
                "    x         x     ",
            ]),
            ships: vec![
                ShipEntry {
                    kind: EntityKind::ShipL0,
                    count: 2,
                },
                ShipEntry {
                    kind: EntityKind::ShipL1,
                    count: 2,
                },
            ],
            bonus: 400,
        },
    ]
}
