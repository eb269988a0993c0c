//! ASCII view of a level for terminal review.
//!
//! Terrain uses the map glyphs; entities are drawn over it, one character
//! per tile, with enemies on top of everything else.

use td_core::behavior::EntityKind;
use td_core::design::tile_glyph;
use td_core::entity::Entity;
use td_core::level::Level;
use td_core::math::IVec2;

/// ASCII rendering options.
#[derive(Debug, Clone)]
pub struct AsciiConfig {
    /// Print a header with title, stage and money.
    pub show_header: bool,
    /// Print a legend of entity characters present.
    pub show_legend: bool,
    /// Use ANSI colors.
    pub use_color: bool,
}

impl Default for AsciiConfig {
    fn default() -> Self {
        Self {
            show_header: true,
            show_legend: true,
            use_color: false,
        }
    }
}

/// ANSI color codes.
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const RED: &str = "\x1b[31m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const GREEN: &str = "\x1b[32m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Character for an entity kind.
#[must_use]
pub fn entity_char(kind: EntityKind) -> char {
    use EntityKind as K;
    match kind {
        K::TurretL0 | K::TurretL1 | K::TurretL2 => 'Y',
        K::CannonL0 | K::CannonL1 => 'C',
        K::MineL0 | K::MineL1 | K::MineL2 => 'o',
        K::RadarL0 | K::RadarL1 => 'R',
        K::DecoyTruck => 'D',
        K::Boombox => 'B',
        K::BulletL0 | K::BulletL1 | K::BulletL2 => '.',
        K::ShellL0 | K::ShellL1 => '*',
        K::Flag => 'P',
        K::Truck => 'T',
        K::AlienL0 => 'a',
        K::AlienL1 => 'A',
        K::ShipL0 | K::ShipL1 => '@',
        K::Repair | K::ArmorUpgrade | K::SpeedUpgrade => '?',
    }
}

/// Drawing order: higher wins a shared tile.
fn layer(e: &Entity) -> u8 {
    let info = e.info();
    if info.is_enemy() {
        3
    } else if info.projectile.is_some() {
        2
    } else if e.kind() == EntityKind::Truck {
        1
    } else {
        0
    }
}

fn health_color(e: &Entity) -> &'static str {
    let max = e.info().max_health;
    if max == 0 {
        return colors::GRAY;
    }
    let ratio = e.health / max as f32;
    if ratio > 0.66 {
        colors::GREEN
    } else if ratio > 0.33 {
        colors::YELLOW
    } else {
        colors::RED
    }
}

/// Render the level, top row first.
#[must_use]
pub fn render_ascii(level: &Level, config: &AsciiConfig) -> String {
    let grid = level.grid();
    let (w, h) = (grid.width(), grid.height());
    let mut out = String::new();

    if config.show_header {
        out.push_str(&format!(
            "{} | {:?} | tick {} | money {}\n",
            level.design().plain_title(),
            level.stage(),
            level.tick_count(),
            level.stats().money
        ));
    }

    let mut seen: Vec<EntityKind> = Vec::new();
    for y in (0..h).rev() {
        for x in 0..w {
            let tile = IVec2::new(x, y);
            let top = level
                .entities_on_tile(tile)
                .filter(|e| !e.is_deleted())
                .max_by_key(|e| layer(e));

            match top {
                Some(e) => {
                    if !seen.contains(&e.kind()) {
                        seen.push(e.kind());
                    }
                    let ch = entity_char(e.kind());
                    if config.use_color {
                        out.push_str(&format!("{}{ch}{}", health_color(e), colors::RESET));
                    } else {
                        out.push(ch);
                    }
                }
                None => {
                    let glyph = grid.tile(tile).map_or('?', |t| tile_glyph(t.kind, t.flags));
                    out.push(glyph);
                }
            }
        }
        out.push('\n');
    }

    if config.show_legend && !seen.is_empty() {
        seen.sort();
        let legend: Vec<String> = seen
            .iter()
            .map(|&k| format!("{}={}", entity_char(k), k.info().name))
            .collect();
        out.push_str(&legend.join(" "));
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use td_test_utils::fixtures::{level_from_map, place};

    fn plain() -> AsciiConfig {
        AsciiConfig {
            show_header: false,
            show_legend: false,
            use_color: false,
        }
    }

    #[test]
    fn test_terrain_and_warehouse_entities() {
        let level = level_from_map(&["x  #", "SrrF"]);
        let text = render_ascii(&level, &plain());
        assert_eq!(text, "x  #\nTrrP\n");
    }

    #[test]
    fn test_enemy_drawn_over_building() {
        let mut level = level_from_map(&["    ", "SrrF"]);
        place(&mut level, EntityKind::TurretL0, IVec2::new(1, 1));
        place(&mut level, EntityKind::AlienL0, IVec2::new(1, 1));
        place(&mut level, EntityKind::MineL0, IVec2::new(2, 1));
        let text = render_ascii(&level, &plain());
        assert_eq!(text.lines().next(), Some(" ao "));
    }

    #[test]
    fn test_header_and_legend() {
        let level = level_from_map(&["SrrF"]);
        let text = render_ascii(&level, &AsciiConfig::default());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].contains("Build"));
        assert!(lines[0].contains("money 100"));
        assert_eq!(lines[1], "TrrP");
        assert!(lines[2].contains("T="));
        assert!(text.ends_with('\n'));
    }
}
