use crate::catalog::{ZoneCatalog, ZoneMission};
use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;

pub const MAP_MIN: i32 = 0;
pub const MAP_MAX: i32 = 100;
pub const MOVE_STEP: i32 = 5;
pub const MISSIONS_PER_LEVEL: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl FromStr for Direction {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(Self::Left),
            "right" => Ok(Self::Right),
            "up" => Ok(Self::Up),
            "down" => Ok(Self::Down),
            _ => Err(GameError::UnknownDirection(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn step(self, direction: Direction) -> Self {
        let clamp = |v: i32| v.clamp(MAP_MIN, MAP_MAX);
        match direction {
            Direction::Left => Self {
                x: clamp(self.x - MOVE_STEP),
                ..self
            },
            Direction::Right => Self {
                x: clamp(self.x + MOVE_STEP),
                ..self
            },
            Direction::Up => Self {
                y: clamp(self.y - MOVE_STEP),
                ..self
            },
            Direction::Down => Self {
                y: clamp(self.y + MOVE_STEP),
                ..self
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneStatus {
    pub unlocked: bool,
    pub completed: bool,
    pub name: String,
}

/// The mission being played, tagged with the zone it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveZoneMission {
    pub zone_id: String,
    #[serde(flatten)]
    pub mission: ZoneMission,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneState {
    /// Shown by the client; no rule reads it.
    pub energy: u32,
    pub eco_points: u64,
    pub level: u32,
    pub player_position: Position,
    pub zones: BTreeMap<String, ZoneStatus>,
    pub current_mission: Option<ActiveZoneMission>,
    pub missions_completed: u32,
    pub ecobot_message: String,
}

impl ZoneState {
    pub fn initial(catalog: &ZoneCatalog) -> Self {
        let first = catalog.first_zone().map(|z| z.id.as_str());
        let zones = catalog
            .zones
            .iter()
            .map(|z| {
                (
                    z.id.clone(),
                    ZoneStatus {
                        unlocked: Some(z.id.as_str()) == first,
                        completed: false,
                        name: z.name.clone(),
                    },
                )
            })
            .collect();
        Self {
            energy: 100,
            eco_points: 0,
            level: 1,
            player_position: Position { x: 50, y: 50 },
            zones,
            current_mission: None,
            missions_completed: 0,
            ecobot_message: catalog.welcome_message.clone(),
        }
    }

    pub fn all_completed(&self) -> bool {
        self.zones.values().all(|z| z.completed)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ZoneStart {
    pub mission: ActiveZoneMission,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ZoneOutcome {
    /// The client reported a loss; only the active mission and the message changed.
    Failed,
    Completed {
        mission: ActiveZoneMission,
        message: String,
        all_completed: bool,
    },
}

/// One zone-progression session over a fixed catalog.
#[derive(Debug, Clone)]
pub struct ZoneGame {
    catalog: Arc<ZoneCatalog>,
    state: ZoneState,
}

impl ZoneGame {
    pub fn new(catalog: Arc<ZoneCatalog>) -> Self {
        let state = ZoneState::initial(&catalog);
        Self { catalog, state }
    }

    pub fn catalog(&self) -> &ZoneCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &ZoneState {
        &self.state
    }

    pub fn message(&self) -> &str {
        &self.state.ecobot_message
    }

    /// Unrecognized or missing directions leave the player where they are.
    pub fn move_player(&mut self, direction: Option<&str>) -> Position {
        if let Some(dir) = direction.and_then(|d| d.parse::<Direction>().ok()) {
            self.state.player_position = self.state.player_position.step(dir);
        }
        self.state.player_position
    }

    pub fn start_zone(&mut self, zone_id: &str) -> GameResult<ZoneStart> {
        let status = self
            .state
            .zones
            .get(zone_id)
            .ok_or_else(|| GameError::ZoneNotFound(zone_id.to_string()))?;
        if !status.unlocked {
            return Err(GameError::ZoneLocked(zone_id.to_string()));
        }
        if status.completed {
            return Err(GameError::ZoneCompleted(zone_id.to_string()));
        }
        let def = self
            .catalog
            .zone(zone_id)
            .ok_or_else(|| GameError::ZoneNotFound(zone_id.to_string()))?;

        let mission = ActiveZoneMission {
            zone_id: zone_id.to_string(),
            mission: def.mission.clone(),
        };
        self.state.current_mission = Some(mission.clone());
        self.state.ecobot_message = def.start_message.clone();
        tracing::info!(zone = zone_id, title = %mission.mission.title, "zone mission started");

        Ok(ZoneStart {
            mission,
            message: def.start_message.clone(),
        })
    }

    pub fn complete_mission(&mut self, success: bool) -> GameResult<ZoneOutcome> {
        let Some(mission) = self.state.current_mission.take() else {
            return Err(GameError::NoActiveMission);
        };

        if !success {
            self.state.ecobot_message = self.catalog.retry_message.clone();
            tracing::info!(zone = %mission.zone_id, "zone mission failed");
            return Ok(ZoneOutcome::Failed);
        }

        let zone_id = mission.zone_id.as_str();
        if let Some(status) = self.state.zones.get_mut(zone_id) {
            status.completed = true;
        }
        self.state.eco_points += mission.mission.reward;
        self.state.missions_completed += 1;

        if let Some(next) = mission.mission.next_zone.as_deref() {
            if let Some(status) = self.state.zones.get_mut(next) {
                if !status.unlocked {
                    status.unlocked = true;
                    tracing::info!(zone = next, "zone unlocked");
                }
            }
        }

        if self.state.missions_completed % MISSIONS_PER_LEVEL == 0 {
            self.state.level += 1;
            tracing::info!(level = self.state.level, "level up");
        }

        let message = self
            .catalog
            .zone(zone_id)
            .map(|z| z.completion_message.clone())
            .unwrap_or_else(|| "¡Misión completada!".to_string());
        self.state.ecobot_message = message.clone();

        let all_completed = self.state.all_completed();
        if all_completed {
            self.state.ecobot_message = self.catalog.victory_message.clone();
        }
        tracing::info!(
            zone = zone_id,
            eco_points = self.state.eco_points,
            all_completed,
            "zone mission completed"
        );

        Ok(ZoneOutcome::Completed {
            mission,
            message,
            all_completed,
        })
    }

    pub fn reset(&mut self) -> &ZoneState {
        self.state = ZoneState::initial(&self.catalog);
        tracing::info!("zone game reset");
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game() -> ZoneGame {
        ZoneGame::new(Arc::new(ZoneCatalog::eco_city()))
    }

    fn win(game: &mut ZoneGame, zone: &str) -> ZoneOutcome {
        game.start_zone(zone).unwrap();
        game.complete_mission(true).unwrap()
    }

    #[test]
    fn fresh_game_unlocks_only_casa() {
        let g = game();
        let unlocked: Vec<_> = g
            .state()
            .zones
            .iter()
            .filter(|(_, z)| z.unlocked)
            .map(|(id, _)| id.as_str())
            .collect();
        assert_eq!(unlocked, ["casa"]);
        assert!(g.state().zones.values().all(|z| !z.completed));
        assert_eq!(g.state().level, 1);
        assert_eq!(g.state().player_position, Position { x: 50, y: 50 });
    }

    #[test]
    fn movement_stays_on_the_map() {
        let mut g = game();
        for _ in 0..30 {
            g.move_player(Some("left"));
            g.move_player(Some("up"));
        }
        assert_eq!(g.state().player_position, Position { x: 0, y: 0 });
        for _ in 0..30 {
            g.move_player(Some("right"));
            g.move_player(Some("down"));
        }
        assert_eq!(g.state().player_position, Position { x: 100, y: 100 });

        let before = g.state().player_position;
        assert_eq!(g.move_player(Some("sideways")), before);
        assert_eq!(g.move_player(None), before);
    }

    #[test]
    fn direction_names_parse() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("left".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(
            "sideways".parse::<Direction>(),
            Err(GameError::UnknownDirection("sideways".to_string()))
        );
        assert_eq!(
            "Up".parse::<Direction>(),
            Err(GameError::UnknownDirection("Up".to_string()))
        );
    }

    #[test]
    fn single_step_moves_by_five() {
        let mut g = game();
        assert_eq!(g.move_player(Some("left")), Position { x: 45, y: 50 });
        assert_eq!(g.move_player(Some("down")), Position { x: 45, y: 55 });
    }

    #[test]
    fn start_zone_rejections_leave_state_alone() {
        let mut g = game();
        let before = g.state().clone();

        assert_eq!(
            g.start_zone("luna").unwrap_err(),
            GameError::ZoneNotFound("luna".to_string())
        );
        assert_eq!(
            g.start_zone("solar").unwrap_err(),
            GameError::ZoneLocked("solar".to_string())
        );
        assert_eq!(g.state(), &before);

        win(&mut g, "casa");
        let before = g.state().clone();
        assert_eq!(
            g.start_zone("casa").unwrap_err(),
            GameError::ZoneCompleted("casa".to_string())
        );
        assert_eq!(g.state(), &before);
    }

    #[test]
    fn restarting_a_zone_replaces_its_mission() {
        let mut g = game();
        win(&mut g, "casa");
        let first = g.start_zone("solar").unwrap();
        g.move_player(Some("up"));

        let again = g.start_zone("solar").unwrap();
        assert_eq!(again.mission, first.mission);
        let s = g.state();
        assert_eq!(s.current_mission.as_ref(), Some(&again.mission));
        assert_eq!(s.ecobot_message, again.message);
        assert_eq!(s.missions_completed, 1);
        assert_eq!(s.eco_points, 100);
        assert!(g.complete_mission(true).is_ok());
        assert_eq!(g.state().eco_points, 250);
    }

    #[test]
    fn completed_zone_cannot_replace_the_active_mission() {
        let mut g = game();
        win(&mut g, "casa");
        g.start_zone("solar").unwrap();
        let before = g.state().clone();

        assert_eq!(
            g.start_zone("casa").unwrap_err(),
            GameError::ZoneCompleted("casa".to_string())
        );
        assert_eq!(
            g.start_zone("rio").unwrap_err(),
            GameError::ZoneLocked("rio".to_string())
        );
        assert_eq!(g.state(), &before);
        let active = g.state().current_mission.as_ref().map(|m| m.zone_id.as_str());
        assert_eq!(active, Some("solar"));
    }

    #[test]
    fn casa_scenario() {
        let mut g = game();
        let start = g.start_zone("casa").unwrap();
        assert_eq!(start.mission.mission.title, "Apaga las Luces");
        assert_eq!(start.mission.zone_id, "casa");
        assert_eq!(g.message(), start.message);

        let outcome = g.complete_mission(true).unwrap();
        let s = g.state();
        assert_eq!(s.eco_points, 100);
        assert!(s.zones["solar"].unlocked);
        assert!(s.zones["casa"].completed);
        assert_eq!(s.missions_completed, 1);
        assert_eq!(s.level, 1);
        assert!(s.current_mission.is_none());
        match outcome {
            ZoneOutcome::Completed {
                mission,
                all_completed,
                message,
            } => {
                assert_eq!(mission.zone_id, "casa");
                assert!(!all_completed);
                assert_eq!(s.ecobot_message, message);
            }
            ZoneOutcome::Failed => panic!("expected completion"),
        }
    }

    #[test]
    fn failed_mission_only_clears_the_mission() {
        let mut g = game();
        g.start_zone("casa").unwrap();
        let before = g.state().clone();

        assert_eq!(g.complete_mission(false).unwrap(), ZoneOutcome::Failed);
        let s = g.state();
        assert_eq!(s.eco_points, before.eco_points);
        assert_eq!(s.zones, before.zones);
        assert_eq!(s.missions_completed, before.missions_completed);
        assert!(s.current_mission.is_none());
        assert_eq!(s.ecobot_message, g.catalog().retry_message);
    }

    #[test]
    fn completing_without_mission_is_rejected() {
        let mut g = game();
        assert_eq!(
            g.complete_mission(true).unwrap_err(),
            GameError::NoActiveMission
        );
    }

    #[test]
    fn levels_up_every_second_completion() {
        let mut g = game();
        let mut levels = Vec::new();
        for zone in ["casa", "solar", "fabrica", "rio", "ciudad"] {
            win(&mut g, zone);
            levels.push(g.state().level);
        }
        assert_eq!(levels, [1, 2, 2, 3, 3]);
        assert_eq!(g.state().eco_points, 100 + 150 + 200 + 250 + 300);
    }

    #[test]
    fn finishing_every_zone_sets_victory_message() {
        let mut g = game();
        for zone in ["casa", "solar", "fabrica", "rio"] {
            match win(&mut g, zone) {
                ZoneOutcome::Completed { all_completed, .. } => assert!(!all_completed),
                ZoneOutcome::Failed => panic!("expected completion"),
            }
        }
        match win(&mut g, "ciudad") {
            ZoneOutcome::Completed {
                all_completed,
                message,
                ..
            } => {
                assert!(all_completed);
                assert!(message.starts_with("¡Maravilloso!"));
            }
            ZoneOutcome::Failed => panic!("expected completion"),
        }
        assert_eq!(g.message(), g.catalog().victory_message);
    }

    #[test]
    fn reset_restores_initial_state() {
        let mut g = game();
        g.move_player(Some("up"));
        win(&mut g, "casa");
        g.start_zone("solar").unwrap();

        let fresh = ZoneState::initial(g.catalog());
        assert_eq!(g.reset(), &fresh);
    }

    #[test]
    fn active_mission_serializes_flat() {
        let mut g = game();
        g.start_zone("casa").unwrap();
        let v = serde_json::to_value(g.state()).unwrap();
        let m = &v["current_mission"];
        assert_eq!(m["zone_id"], "casa");
        assert_eq!(m["type"], "click_game");
        assert_eq!(m["reward"], 100);
        assert_eq!(m["next_zone"], "solar");
    }
}
