use thiserror::Error;

/// Broad classes a rejected request falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Forbidden,
    BadRequest,
}

/// A request the rules refuse. The game state is left untouched whenever one is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Zona no encontrada")]
    ZoneNotFound(String),
    #[error("Zona bloqueada")]
    ZoneLocked(String),
    #[error("Zona ya completada")]
    ZoneCompleted(String),
    #[error("No hay misión activa")]
    NoActiveMission,
    #[error("Edificio no encontrado")]
    BuildingNotFound(String),
    #[error("Misión no encontrada")]
    MissionNotFound(u32),
    #[error("La misión {given} no es la misión activa ({active})")]
    MissionMismatch { given: u32, active: u32 },
    #[error("Dirección desconocida")]
    UnknownDirection(String),
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ZoneNotFound(_) | Self::BuildingNotFound(_) | Self::MissionNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::ZoneLocked(_) => ErrorKind::Forbidden,
            Self::ZoneCompleted(_)
            | Self::NoActiveMission
            | Self::MissionMismatch { .. }
            | Self::UnknownDirection(_) => ErrorKind::BadRequest,
        }
    }
}

pub type GameResult<T> = Result<T, GameError>;
