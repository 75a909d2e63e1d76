pub mod advice;
pub mod catalog;
pub mod error;
pub mod planet;
pub mod zones;

pub use catalog::{MiniGame, ZoneCatalog, ZoneDef, ZoneMission};
pub use error::{ErrorKind, GameError, GameResult};
pub use planet::{
    advance, BuildingKind, Difficulty, PlanetGame, PlanetMission, PlanetState,
};
pub use zones::{
    ActiveZoneMission, Direction, Position, ZoneGame, ZoneOutcome, ZoneStart, ZoneState,
    ZoneStatus,
};
