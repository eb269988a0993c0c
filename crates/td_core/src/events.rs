//! Cosmetic and bookkeeping events emitted by the simulation.
//!
//! The simulation never plays sounds or spawns particles itself. It records
//! what happened and the driver drains the queue once per frame.

use serde::{Deserialize, Serialize};

use crate::behavior::EntityKind;
use crate::level::Stage;
use crate::math::Vec2;

/// Sound cues the driver may map to audio assets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundCue {
    /// A turret fired.
    Shoot,
    /// Something the player owns took damage.
    Hit,
    /// A building was destroyed or a shell detonated.
    Explode,
    /// A mine went off.
    Mine,
    /// A ship is landing.
    Ship,
    /// A ship spawned an alien.
    Spawn,
    /// The truck reached the finish.
    Win,
    /// The truck was destroyed.
    Lose,
    /// A purchase went through.
    Buy,
}

/// Particle effect shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Single splat.
    Splat,
    /// Burst of splats.
    MultiSplat {
        /// Particle count.
        count: u32,
        /// Spread in pixels.
        spread: u32,
    },
    /// Single smoke puff.
    Smoke,
    /// Cloud of smoke.
    MultiSmoke {
        /// Particle count.
        count: u32,
    },
    /// Sparkle while a ship lands.
    Fancy,
    /// Floating text.
    Text(String),
}

/// One thing the driver may want to present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SimEvent {
    /// Play a sound.
    Sound {
        /// What to play.
        cue: SoundCue,
        /// Volume in `[0, 1]`.
        volume: f32,
    },
    /// Spawn a particle effect.
    Effect {
        /// Effect shape.
        effect: EffectKind,
        /// Pixel position.
        pos: Vec2,
        /// Palette index.
        palette: u8,
        /// Lifetime in ticks.
        lifetime: u32,
    },
    /// An enemy died and paid out.
    Bounty {
        /// Kind that died.
        kind: EntityKind,
        /// Money awarded.
        amount: u32,
        /// Where it died.
        pos: Vec2,
    },
    /// The level changed stage.
    StageChanged {
        /// Previous stage.
        from: Stage,
        /// New stage.
        to: Stage,
    },
}
