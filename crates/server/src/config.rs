use clap::{Parser, ValueEnum};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 5000;

/// Which ruleset this process serves. Both share `/api/game/state` and `/api/game/reset`,
/// so a process runs exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Zone progression over a zone catalog.
    Zones,
    /// Building-driven planet simulation.
    Planet,
}

/// Whether reading the planet state moves the simulation forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReadMode {
    /// Every `GET /api/game/state` advances one step before answering.
    Tick,
    /// Reads never change the state; only mutations advance.
    Observe,
}

fn default_addr() -> SocketAddr {
    SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), DEFAULT_PORT)
}

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "EcoBot game server", long_about = None)]
pub struct Config {
    /// Address the HTTP server binds to.
    #[arg(long, env = "ECOBOT_ADDR", default_value_t = default_addr())]
    pub addr: SocketAddr,
    #[arg(long, env = "ECOBOT_MODE", value_enum, default_value_t = Mode::Zones)]
    pub mode: Mode,
    /// YAML or JSON zone catalog replacing the built-in Eco City campaign.
    #[arg(long, env = "ECOBOT_CATALOG")]
    pub catalog: Option<PathBuf>,
    #[arg(long, env = "ECOBOT_READ_MODE", value_enum, default_value_t = ReadMode::Tick)]
    pub read_mode: ReadMode,
    /// Seed for the advice picker. Entropy when absent.
    #[arg(long, env = "ECOBOT_SEED")]
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            mode: Mode::Zones,
            catalog: None,
            read_mode: ReadMode::Tick,
            seed: None,
        }
    }
}
