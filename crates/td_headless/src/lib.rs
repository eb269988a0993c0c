//! Headless campaign runner for CI and balance testing.
//!
//! Plays levels without graphics or audio:
//!
//! - **Runs**: one seeded campaign with an automated build strategy,
//!   reported as JSON
//! - **Batches**: many seeds in parallel, summarized
//! - **Render**: an ASCII view of a level for quick terminal review
//!
//! Logs go to stderr; reports go to stdout.
//!
//! # Example
//!
//! ```bash
//! cargo run -p td_headless -- run --seed 3 --ascii
//! cargo run -p td_headless -- batch --count 200 --output results/batch.json
//! cargo run -p td_headless -- render --level crates/td_headless/assets/levels/level_01.ron
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod ascii;
pub mod batch;
pub mod error;
pub mod levels;
pub mod runner;
pub mod strategies;

pub use ascii::{render_ascii, AsciiConfig};
pub use batch::{run_batch, BatchConfig, BatchResults, BatchSummary};
pub use error::{HeadlessError, Result};
pub use levels::{load_campaign, load_config, load_level};
pub use runner::{run_campaign, GameReport, LevelReport, RunConfig};
pub use strategies::Strategy;
