use crate::planet::{BuildingKind, PlanetState};
use rand::seq::SliceRandom;
use rand::Rng;

pub const CRITICAL_POLLUTION: &str =
    "⚠️ Nivel de contaminación crítico! Desactiva fuentes contaminantes inmediatamente.";
pub const RISING_POLLUTION: &str =
    "🌍 La contaminación está aumentando. Considera usar más energías renovables.";
pub const LOW_ENERGY: &str = "⚡ Energía baja! Activa más fuentes de energía o reduce el consumo.";
pub const HIGH_ENERGY: &str = "✅ Excelente gestión energética! El planeta está prosperando.";
pub const COAL_ACTIVE: &str = "🏭 La planta de carbón está activa. Intenta usar energías limpias.";
pub const LOW_HEALTH: &str =
    "💔 La salud del planeta está en peligro. Equilibra energía y medio ambiente.";
pub const ALL_GOOD: &str = "🤖 Todo está bajo control. Sigue así, guardián del planeta!";

/// Every hint whose threshold the state crosses, in rule order. Never empty.
pub fn applicable(state: &PlanetState) -> Vec<&'static str> {
    let mut advice = Vec::new();

    if state.pollution > 70.0 {
        advice.push(CRITICAL_POLLUTION);
    } else if state.pollution > 40.0 {
        advice.push(RISING_POLLUTION);
    }

    if state.energy < 30.0 {
        advice.push(LOW_ENERGY);
    } else if state.energy > 80.0 {
        advice.push(HIGH_ENERGY);
    }

    if state
        .buildings
        .get(&BuildingKind::CoalPlant)
        .is_some_and(|b| b.active)
    {
        advice.push(COAL_ACTIVE);
    }

    if state.health < 50.0 {
        advice.push(LOW_HEALTH);
    }

    if advice.is_empty() {
        advice.push(ALL_GOOD);
    }
    advice
}

/// Pick one applicable hint uniformly at random.
pub fn advise<R: Rng + ?Sized>(state: &PlanetState, rng: &mut R) -> &'static str {
    applicable(state).choose(rng).copied().unwrap_or(ALL_GOOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(energy: f64, pollution: f64, health: f64) -> PlanetState {
        PlanetState {
            energy,
            pollution,
            health,
            ..PlanetState::default()
        }
    }

    #[test]
    fn fallback_when_nothing_applies() {
        assert_eq!(applicable(&state(60.0, 10.0, 90.0)), [ALL_GOOD]);
    }

    #[test]
    fn pollution_and_energy_rules_are_exclusive_tiers() {
        assert_eq!(
            applicable(&state(10.0, 80.0, 90.0)),
            [CRITICAL_POLLUTION, LOW_ENERGY]
        );
        assert_eq!(
            applicable(&state(90.0, 50.0, 90.0)),
            [RISING_POLLUTION, HIGH_ENERGY]
        );
    }

    #[test]
    fn coal_and_health_rules() {
        let mut s = state(60.0, 10.0, 40.0);
        s.buildings
            .get_mut(&BuildingKind::CoalPlant)
            .expect("coal plant")
            .active = true;
        assert_eq!(applicable(&s), [COAL_ACTIVE, LOW_HEALTH]);
    }

    #[test]
    fn advise_picks_from_applicable_set() {
        let s = state(10.0, 80.0, 20.0);
        let options = applicable(&s);
        assert_eq!(options.len(), 3);

        let mut rng = StdRng::seed_from_u64(7);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            let pick = advise(&s, &mut rng);
            assert!(options.contains(&pick));
            seen.insert(pick);
        }
        assert_eq!(seen.len(), options.len());
    }

    #[test]
    fn same_seed_same_advice() {
        let s = state(10.0, 80.0, 20.0);
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(advise(&s, &mut a), advise(&s, &mut b));
        }
    }
}
