//! Loading level designs and simulation config from RON files.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use td_core::config::SimConfig;
use td_core::design::{builtin_campaign, LevelDesign};

use crate::error::Result;

/// Read and check one level design.
pub fn load_level(path: &Path) -> Result<LevelDesign> {
    let text = fs::read_to_string(path)?;
    let design: LevelDesign = ron::from_str(&text)?;
    design.validate()?;
    info!(path = %path.display(), title = %design.plain_title(), "Loaded level");
    Ok(design)
}

/// Levels from `paths` in order, or the built-in campaign when none are given.
pub fn load_campaign(paths: &[PathBuf]) -> Result<Vec<LevelDesign>> {
    if paths.is_empty() {
        return Ok(builtin_campaign());
    }
    paths.iter().map(|p| load_level(p)).collect()
}

/// Config from `path`, or the defaults.
pub fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path)?;
    Ok(ron::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HeadlessError;
    use std::io::Write;

    fn bundled() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/levels/level_01.ron")
    }

    #[test]
    fn test_bundled_level_loads() {
        let design = load_level(&bundled()).unwrap();
        assert_eq!(design.plain_title(), "TRAINING: ONE ROAD");
        assert_eq!(design.bonus, 50);
    }

    #[test]
    fn test_no_paths_means_builtin() {
        assert_eq!(load_campaign(&[]).unwrap(), builtin_campaign());
    }

    #[test]
    fn test_bad_map_is_core_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"(title: "X", map: ["S  "], ships: [], bonus: 0)"#).unwrap();
        assert!(matches!(load_level(file.path()), Err(HeadlessError::Core(_))));
    }

    #[test]
    fn test_bad_syntax_is_ron_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(title: ").unwrap();
        assert!(matches!(load_level(file.path()), Err(HeadlessError::Ron(_))));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.ron");
        assert!(matches!(load_level(&missing), Err(HeadlessError::Io(_))));
    }

    #[test]
    fn test_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "(seed: 9, starting_money: 500)").unwrap();
        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.starting_money, 500);
        assert_eq!(load_config(None).unwrap(), SimConfig::default());
    }
}
