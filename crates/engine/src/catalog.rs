use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// The mini-game the client runs for a zone mission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MiniGame {
    ClickGame,
    SequenceGame,
    SliderGame,
    BalanceGame,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneMission {
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub game: MiniGame,
    pub target: u32,
    pub time_limit: u32,
    pub reward: u64,
    #[serde(default)]
    pub next_zone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub id: String,
    pub name: String,
    pub mission: ZoneMission,
    #[serde(default = "default_start_message")]
    pub start_message: String,
    #[serde(default = "default_completion_message")]
    pub completion_message: String,
}

/// Zones in progression order plus the campaign-wide EcoBot lines.
///
/// The first zone is the one unlocked on a fresh game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneCatalog {
    #[serde(default = "default_welcome_message")]
    pub welcome_message: String,
    #[serde(default = "default_retry_message")]
    pub retry_message: String,
    #[serde(default = "default_victory_message")]
    pub victory_message: String,
    pub zones: Vec<ZoneDef>,
}

fn default_start_message() -> String {
    "¡Adelante!".to_string()
}

fn default_completion_message() -> String {
    "¡Misión completada!".to_string()
}

fn default_welcome_message() -> String {
    "¡Bienvenido, guardián del planeta! Comencemos en la Casa.".to_string()
}

fn default_retry_message() -> String {
    "No te preocupes, inténtalo de nuevo. ¡Tú puedes!".to_string()
}

fn default_victory_message() -> String {
    "¡Felicidades, Guardián del Planeta! Has completado todas las misiones. Ahora sabes que cada acción cuenta para cuidar nuestro mundo. ¡Sigue aplicando lo aprendido en tu vida diaria! 🌍✨".to_string()
}

impl ZoneCatalog {
    /// Parse a catalog from YAML (plain JSON is accepted too) and validate it.
    pub fn from_yaml_str(src: &str) -> anyhow::Result<Self> {
        let catalog: Self = serde_yaml::from_str(src).context("parse zone catalog")?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read zone catalog: {}", path.display()))?;
        Self::from_yaml_str(&src).with_context(|| format!("load zone catalog: {}", path.display()))
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.zones.is_empty() {
            bail!("zone catalog has no zones");
        }
        let mut seen = HashSet::new();
        for zone in &self.zones {
            if !seen.insert(zone.id.as_str()) {
                bail!("duplicate zone id: {}", zone.id);
            }
        }
        for zone in &self.zones {
            if let Some(next) = zone.mission.next_zone.as_deref() {
                if !seen.contains(next) {
                    bail!("zone {} unlocks unknown zone {next}", zone.id);
                }
            }
        }
        Ok(())
    }

    pub fn zone(&self, id: &str) -> Option<&ZoneDef> {
        self.zones.iter().find(|z| z.id == id)
    }

    pub fn first_zone(&self) -> Option<&ZoneDef> {
        self.zones.first()
    }

    /// The five-zone campaign: Casa, Parque Solar, Fábrica, Río, Ciudad.
    pub fn eco_city() -> Self {
        let zone = |id: &str,
                    name: &str,
                    mission: ZoneMission,
                    start_message: &str,
                    completion_message: &str| ZoneDef {
            id: id.to_string(),
            name: name.to_string(),
            mission,
            start_message: start_message.to_string(),
            completion_message: completion_message.to_string(),
        };
        let mission = |title: &str,
                       description: &str,
                       game: MiniGame,
                       target: u32,
                       time_limit: u32,
                       reward: u64,
                       next_zone: Option<&str>| ZoneMission {
            title: title.to_string(),
            description: description.to_string(),
            game,
            target,
            time_limit,
            reward,
            next_zone: next_zone.map(str::to_string),
        };

        Self {
            welcome_message: default_welcome_message(),
            retry_message: default_retry_message(),
            victory_message: default_victory_message(),
            zones: vec![
                zone(
                    "casa",
                    "Casa Eficiente",
                    mission(
                        "Apaga las Luces",
                        "Apaga 5 luces que están encendidas antes de que se acabe el tiempo",
                        MiniGame::ClickGame,
                        5,
                        30,
                        100,
                        Some("solar"),
                    ),
                    "¡Bienvenido a la Casa Eficiente! Aquí hay muchas luces encendidas innecesariamente. ¿Sabías que apagar las luces cuando no las usas puede reducir tu consumo hasta un 20%? ¡Ayúdame a apagarlas todas!",
                    "¡Excelente trabajo! Has reducido el consumo energético un 20%. Dato curioso: Si todos apagáramos las luces innecesarias, ahorraríamos suficiente energía para iluminar una ciudad entera durante un año. 🌎💡",
                ),
                zone(
                    "solar",
                    "Parque Solar",
                    mission(
                        "Conecta los Paneles",
                        "Conecta los paneles solares en el orden correcto",
                        MiniGame::SequenceGame,
                        4,
                        45,
                        150,
                        Some("fabrica"),
                    ),
                    "¡Llegamos al Parque Solar! Los paneles solares convierten la luz del sol en electricidad limpia. Pero deben estar bien conectados para funcionar. ¿Me ayudas a conectarlos correctamente?",
                    "¡Perfecto! Los paneles ahora generan energía limpia eficientemente. Dato curioso: En solo una hora, el sol proporciona suficiente energía para abastecer al mundo entero durante un año. ☀️⚡",
                ),
                zone(
                    "fabrica",
                    "Fábrica Sostenible",
                    mission(
                        "Optimiza la Producción",
                        "Ajusta las máquinas para reducir el consumo sin afectar la producción",
                        MiniGame::SliderGame,
                        3,
                        60,
                        200,
                        Some("rio"),
                    ),
                    "Esta es la Fábrica Sostenible. Las máquinas consumen mucha energía, pero podemos optimizarlas sin afectar la producción. Ajusta cada máquina al nivel óptimo de eficiencia.",
                    "¡Increíble! La fábrica ahora es 30% más eficiente y contamina menos. Dato curioso: La industria representa el 40% del consumo energético mundial, pero con optimización podemos reducirlo significativamente. 🏭♻️",
                ),
                zone(
                    "rio",
                    "Planta Hidroeléctrica",
                    mission(
                        "Controla el Flujo",
                        "Mantén el flujo de agua en el nivel óptimo",
                        MiniGame::BalanceGame,
                        30,
                        45,
                        250,
                        Some("ciudad"),
                    ),
                    "¡Estamos en la Planta Hidroeléctrica! El agua en movimiento genera energía limpia. Debemos mantener el flujo en el nivel perfecto para maximizar la producción sin dañar el ecosistema.",
                    "¡Fantástico! El ecosistema del río está equilibrado y genera energía limpia. Dato curioso: La energía hidroeléctrica es la fuente renovable más utilizada en el mundo, generando el 16% de la electricidad global. 💧🌊",
                ),
                zone(
                    "ciudad",
                    "Ciudad Verde",
                    mission(
                        "Limpia el Smog",
                        "Limpia las nubes contaminantes tocándolas",
                        MiniGame::ClickGame,
                        10,
                        60,
                        300,
                        None,
                    ),
                    "¡Llegamos a la Ciudad Verde! La contaminación del aire afecta la salud de todos. Limpia las nubes de smog tocándolas. Cada nube que limpies mejora la calidad del aire.",
                    "¡Maravilloso! El aire está más limpio y la gente puede respirar mejor. Dato curioso: Las ciudades verdes con más árboles y menos contaminación tienen habitantes más saludables y felices. 🌆🌳",
                ),
            ],
        }
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::eco_city()
    }
}
