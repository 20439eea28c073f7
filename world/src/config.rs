//! Validation of run configuration.

use nrogue_core::GameConfig;
use nrogue_system_maze::GenerationError;
use thiserror::Error;

/// Reasons a configuration cannot start a run.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The grid cannot hold both a start and an exit room.
    #[error("grid of {columns}x{rows} rooms needs at least two rooms")]
    GridTooSmall {
        /// Configured number of columns.
        columns: u32,
        /// Configured number of rows.
        rows: u32,
    },
    /// The dungeon needs at least one level.
    #[error("dungeon depth must be at least one")]
    NoLevels,
    /// Rooms cannot fit corner pieces and one straight segment per edge.
    #[error("rooms of {width}x{height} cannot fit their walls")]
    RoomTooSmall {
        /// Configured room width.
        width: f32,
        /// Configured room height.
        height: f32,
    },
    /// The first level could not be generated.
    #[error("first level could not be generated")]
    FirstLevel(#[from] GenerationError),
}

/// Checks that `config` describes a playable dungeon.
pub fn validate(config: &GameConfig) -> Result<(), ConfigError> {
    let grid = &config.grid;
    if grid.room_count() < 2 {
        return Err(ConfigError::GridTooSmall {
            columns: grid.columns,
            rows: grid.rows,
        });
    }
    if config.depth == 0 {
        return Err(ConfigError::NoLevels);
    }
    if grid.horizontal_segments() == 0 || grid.vertical_segments() == 0 {
        return Err(ConfigError::RoomTooSmall {
            width: grid.room_width,
            height: grid.room_height,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nrogue_core::GridTuning;

    #[test]
    fn default_configuration_is_valid() {
        assert_eq!(validate(&GameConfig::default()), Ok(()));
    }

    #[test]
    fn rejects_degenerate_layouts() {
        let single = GameConfig {
            grid: GridTuning {
                columns: 1,
                rows: 1,
                ..GridTuning::default()
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            validate(&single),
            Err(ConfigError::GridTooSmall { .. })
        ));

        let shallow = GameConfig {
            depth: 0,
            ..GameConfig::default()
        };
        assert_eq!(validate(&shallow), Err(ConfigError::NoLevels));

        let cramped = GameConfig {
            grid: GridTuning {
                room_width: 150.0,
                ..GridTuning::default()
            },
            ..GameConfig::default()
        };
        assert!(matches!(
            validate(&cramped),
            Err(ConfigError::RoomTooSmall { .. })
        ));
    }
}
