/// Mission catalog — the fixed table of level objectives.
///
/// Each row is `(ingredient kind, required amount)`.  Levels can hold 1 to 6
/// missions; kinds range over 1..=11 and amounts over 1..=20.

use thiserror::Error;

use crate::entities::{LevelDefinition, MissionRequirement};

pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("no missions defined for level {level}")]
    UnknownLevel { level: u32 },
}

const LEVELS: [&[(u8, u32)]; MAX_LEVEL as usize] = [
    &[(1, 2), (2, 1)],
    &[(2, 2), (3, 1), (4, 3)],
    &[(3, 3), (4, 4), (5, 2)],
    &[(2, 2), (1, 3), (6, 5), (7, 2)],
    &[(4, 4), (7, 5), (8, 5), (9, 3)],
    &[(3, 6), (5, 5), (7, 4), (9, 2), (10, 6)],
    &[(2, 4), (5, 5), (4, 4), (10, 6), (11, 7)],
    &[(1, 4), (3, 5), (5, 4), (7, 6), (9, 7), (11, 7)],
    &[(2, 6), (4, 5), (6, 3), (7, 8), (8, 9), (10, 7)],
    // Patty is listed twice; both rows are tracked as separate missions.
    &[(1, 8), (2, 10), (4, 9), (7, 8), (9, 7), (1, 8)],
];

/// Missions for `level`.  Callers are expected to clamp first.
pub fn lookup(level: u32) -> Result<LevelDefinition, CatalogError> {
    if !(MIN_LEVEL..=MAX_LEVEL).contains(&level) {
        return Err(CatalogError::UnknownLevel { level });
    }
    let missions = LEVELS[(level - MIN_LEVEL) as usize]
        .iter()
        .map(|&(kind, required)| MissionRequirement { kind, required })
        .collect();
    Ok(LevelDefinition { level, missions })
}

/// Map any requested level onto the range the catalog defines.
pub fn clamp_level(level: u32) -> u32 {
    level.clamp(MIN_LEVEL, MAX_LEVEL)
}
