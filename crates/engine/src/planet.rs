//! Planet simulation: six fixed buildings feed an energy / pollution / health model.
//!
//! All arithmetic lives in [`advance`], a pure function of the current state. Callers decide
//! when the clock moves; [`PlanetGame`] advances once after every mutation and exposes
//! [`PlanetGame::tick`] for callers that also advance on reads.

use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const MISSIONS_PER_LEVEL: u32 = 3;

const ENERGY_RATE: f64 = 0.1;
const HEALTH_RATE: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingKind {
    SolarPanels,
    WindTurbines,
    CoalPlant,
    DataCenter,
    CityLights,
    Factories,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 6] = [
        Self::SolarPanels,
        Self::WindTurbines,
        Self::CoalPlant,
        Self::DataCenter,
        Self::CityLights,
        Self::Factories,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::SolarPanels => "solar_panels",
            Self::WindTurbines => "wind_turbines",
            Self::CoalPlant => "coal_plant",
            Self::DataCenter => "data_center",
            Self::CityLights => "city_lights",
            Self::Factories => "factories",
        }
    }

    /// Energy produced per point of efficiency, for producers.
    fn output_factor(self) -> f64 {
        match self {
            Self::SolarPanels => 0.3,
            Self::WindTurbines => 0.25,
            Self::CoalPlant => 0.5,
            Self::DataCenter | Self::CityLights | Self::Factories => 0.0,
        }
    }

    /// Pollution added per tick while active. Negative values clean the air.
    fn pollution(self) -> f64 {
        match self {
            Self::CoalPlant => 2.0,
            Self::Factories => 1.0,
            Self::CityLights => 0.5,
            Self::SolarPanels | Self::WindTurbines => -0.5,
            Self::DataCenter => 0.0,
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuildingKind {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| GameError::BuildingNotFound(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rating {
    /// Producers: energy output scales with efficiency.
    Efficiency(f64),
    /// Consumers: flat draw while active.
    Consumption(f64),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub active: bool,
    #[serde(flatten)]
    pub rating: Rating,
}

pub type Buildings = BTreeMap<BuildingKind, Building>;

pub fn initial_buildings() -> Buildings {
    let producer = |active, efficiency| Building {
        active,
        rating: Rating::Efficiency(efficiency),
    };
    let consumer = |active, consumption| Building {
        active,
        rating: Rating::Consumption(consumption),
    };
    BTreeMap::from([
        (BuildingKind::SolarPanels, producer(true, 80.0)),
        (BuildingKind::WindTurbines, producer(true, 70.0)),
        (BuildingKind::CoalPlant, producer(false, 90.0)),
        (BuildingKind::DataCenter, consumer(true, 30.0)),
        (BuildingKind::CityLights, consumer(true, 20.0)),
        (BuildingKind::Factories, consumer(true, 40.0)),
    ])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetMission {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub energy_reward: u32,
    pub pollution_penalty: i32,
    pub difficulty: Difficulty,
}

pub fn mission_list() -> Vec<PlanetMission> {
    let mission = |id,
                   title: &str,
                   description: &str,
                   energy_reward,
                   pollution_penalty,
                   difficulty| PlanetMission {
        id,
        title: title.to_string(),
        description: description.to_string(),
        energy_reward,
        pollution_penalty,
        difficulty,
    };
    vec![
        mission(
            1,
            "Optimizar Paneles Solares",
            "Ajusta la eficiencia de los paneles solares para maximizar la energía limpia",
            20,
            -5,
            Difficulty::Easy,
        ),
        mission(
            2,
            "Apagar Luces Innecesarias",
            "Reduce el consumo energético de la ciudad apagando luces no esenciales",
            15,
            -3,
            Difficulty::Easy,
        ),
        mission(
            3,
            "Reparar Turbinas Eólicas",
            "Las turbinas necesitan mantenimiento para funcionar al máximo",
            25,
            -7,
            Difficulty::Medium,
        ),
        mission(
            4,
            "Optimizar Centro de Datos",
            "Reduce el consumo del centro de datos sin afectar su rendimiento",
            30,
            -10,
            Difficulty::Hard,
        ),
        mission(
            5,
            "Cerrar Planta de Carbón",
            "Desactiva la planta de carbón y compensa con energías renovables",
            40,
            -20,
            Difficulty::Hard,
        ),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetState {
    pub energy: f64,
    pub pollution: f64,
    pub health: f64,
    pub level: u32,
    pub score: u64,
    pub missions_completed: u32,
    pub current_mission: Option<PlanetMission>,
    pub buildings: Buildings,
}

impl Default for PlanetState {
    fn default() -> Self {
        Self {
            energy: 100.0,
            pollution: 0.0,
            health: 100.0,
            level: 1,
            score: 0,
            missions_completed: 0,
            current_mission: None,
            buildings: initial_buildings(),
        }
    }
}

fn clamp_pct(v: f64) -> f64 {
    v.clamp(0.0, 100.0)
}

fn active(buildings: &Buildings) -> impl Iterator<Item = (BuildingKind, &Building)> {
    buildings
        .iter()
        .filter(|(_, b)| b.active)
        .map(|(k, b)| (*k, b))
}

pub fn energy_production(buildings: &Buildings) -> f64 {
    active(buildings)
        .map(|(kind, b)| match b.rating {
            Rating::Efficiency(e) => e * kind.output_factor(),
            Rating::Consumption(_) => 0.0,
        })
        .sum()
}

pub fn energy_consumption(buildings: &Buildings) -> f64 {
    active(buildings)
        .map(|(_, b)| match b.rating {
            Rating::Consumption(c) => c,
            Rating::Efficiency(_) => 0.0,
        })
        .sum()
}

pub fn pollution_delta(buildings: &Buildings) -> f64 {
    active(buildings).map(|(kind, _)| kind.pollution()).sum()
}

/// One simulation step. Energy moves by a tenth of the production balance, pollution by
/// the active buildings' emissions, and health follows the gap between the two.
///
/// Calling this twice in a row applies two steps.
pub fn advance(state: &PlanetState) -> PlanetState {
    let mut next = state.clone();
    let balance = energy_production(&state.buildings) - energy_consumption(&state.buildings);

    next.energy = clamp_pct(state.energy + balance * ENERGY_RATE);
    next.pollution = clamp_pct(state.pollution + pollution_delta(&state.buildings));

    let health_factor = next.energy * 0.5 - next.pollution * 0.5;
    next.health = clamp_pct(state.health + health_factor * HEALTH_RATE);

    if next.health > 70.0 && next.energy > 50.0 {
        next.score += 10;
    } else if next.health < 30.0 || next.energy < 20.0 {
        next.score = next.score.saturating_sub(5);
    }
    next
}

/// One planet-simulation session.
#[derive(Debug, Clone)]
pub struct PlanetGame {
    state: PlanetState,
    missions: Vec<PlanetMission>,
}

impl Default for PlanetGame {
    fn default() -> Self {
        Self::new()
    }
}

impl PlanetGame {
    pub fn new() -> Self {
        Self {
            state: PlanetState::default(),
            missions: mission_list(),
        }
    }

    pub fn state(&self) -> &PlanetState {
        &self.state
    }

    pub fn missions(&self) -> &[PlanetMission] {
        &self.missions
    }

    pub fn tick(&mut self) -> &PlanetState {
        self.state = advance(&self.state);
        &self.state
    }

    pub fn toggle_building(&mut self, name: &str) -> GameResult<&PlanetState> {
        let kind: BuildingKind = name.parse()?;
        let building = self
            .state
            .buildings
            .get_mut(&kind)
            .ok_or_else(|| GameError::BuildingNotFound(name.to_string()))?;
        building.active = !building.active;
        tracing::info!(building = %kind, active = building.active, "building toggled");
        Ok(self.tick())
    }

    fn mission(&self, id: u32) -> GameResult<&PlanetMission> {
        self.missions
            .iter()
            .find(|m| m.id == id)
            .ok_or(GameError::MissionNotFound(id))
    }

    /// Replaces any mission already in progress.
    pub fn start_mission(&mut self, id: u32) -> GameResult<PlanetMission> {
        let mission = self.mission(id)?.clone();
        self.state.current_mission = Some(mission.clone());
        tracing::info!(mission = id, title = %mission.title, "planet mission started");
        Ok(mission)
    }

    /// Completes the active mission. When `expected` is given it must name a known mission
    /// and match the one in progress.
    pub fn complete_mission(&mut self, expected: Option<u32>) -> GameResult<PlanetMission> {
        if let Some(id) = expected {
            self.mission(id)?;
        }
        let active_id = match &self.state.current_mission {
            Some(m) => m.id,
            None => return Err(GameError::NoActiveMission),
        };
        if let Some(given) = expected.filter(|id| *id != active_id) {
            return Err(GameError::MissionMismatch {
                given,
                active: active_id,
            });
        }
        let Some(mission) = self.state.current_mission.take() else {
            return Err(GameError::NoActiveMission);
        };

        let s = &mut self.state;
        s.energy = (s.energy + f64::from(mission.energy_reward)).min(100.0);
        s.pollution = (s.pollution + f64::from(mission.pollution_penalty)).max(0.0);
        s.score += u64::from(mission.energy_reward) * 10;
        s.missions_completed += 1;
        if s.missions_completed % MISSIONS_PER_LEVEL == 0 {
            s.level += 1;
            tracing::info!(level = s.level, "level up");
        }
        tracing::info!(mission = mission.id, score = s.score, "planet mission completed");

        self.tick();
        Ok(mission)
    }

    pub fn reset(&mut self) -> &PlanetState {
        self.state = PlanetState::default();
        tracing::info!("planet game reset");
        &self.state
    }
}
