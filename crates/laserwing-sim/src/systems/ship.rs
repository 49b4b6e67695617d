//! Ship control: movement, firing cadence, bombs and death.
//!
//! The ship only acts while `Alive`. Death is one-way; the dead ship stays
//! in the world, hidden, until the deferred restart reloads the level.

use glam::DVec2;
use hecs::{Entity, World};

use laserwing_core::components::{Asteroid, Hitable, Ship};
use laserwing_core::constants::VOLLEY_DIRECTIONS;
use laserwing_core::enums::{HitOutcome, ShipState};
use laserwing_core::input::InputState;
use laserwing_core::types::Position;

use crate::registry::TargetRegistry;

/// Lasers requested by one trigger pull.
#[derive(Debug, Clone, PartialEq)]
pub struct VolleyRequest {
    /// Ship position when the volley was fired.
    pub ship_position: DVec2,
    /// Where the lasers spawn (ship position plus muzzle offset).
    pub origin: DVec2,
    /// Requested directions, not normalized.
    pub directions: [DVec2; 3],
}

/// What the ship asked for during one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipActions {
    pub volley: Option<VolleyRequest>,
    pub bomb: bool,
}

/// Whether the cadence allows a volley at `now`.
pub fn can_fire(ship: &Ship, now: f64) -> bool {
    match ship.last_fire_secs {
        None => true,
        Some(last) => now - last >= 1.0 / ship.rate_of_fire,
    }
}

/// Claim a volley at `now`. Records the shot time on success.
pub fn try_fire(ship: &mut Ship, now: f64) -> bool {
    if ship.state != ShipState::Alive || !can_fire(ship, now) {
        return false;
    }
    ship.last_fire_secs = Some(now);
    true
}

/// Seconds until the next volley is allowed.
pub fn cooldown_remaining(ship: &Ship, now: f64) -> f64 {
    match ship.last_fire_secs {
        None => 0.0,
        Some(last) => (last + 1.0 / ship.rate_of_fire - now).max(0.0),
    }
}

/// The three lasers of a volley fired from `position`.
pub fn volley(ship: &Ship, position: DVec2) -> VolleyRequest {
    VolleyRequest {
        ship_position: position,
        origin: position + DVec2::Y * ship.muzzle_offset,
        directions: VOLLEY_DIRECTIONS.map(|(x, y)| DVec2::new(x, y)),
    }
}

/// Slide along the x axis. Axis input is clamped to [-1, 1].
pub fn steer(ship: &Ship, position: &mut Position, horizontal: f64, dt: f64) {
    let axis = if horizontal.is_finite() {
        horizontal.clamp(-1.0, 1.0)
    } else {
        0.0
    };
    position.0 += DVec2::X * axis * ship.speed * dt;
}

/// One tick of ship control. A dead ship does nothing.
pub fn tick(
    ship: &mut Ship,
    position: &mut Position,
    input: &InputState,
    dt: f64,
    now: f64,
) -> ShipActions {
    if ship.state != ShipState::Alive {
        return ShipActions::default();
    }

    steer(ship, position, input.horizontal, dt);

    let volley = if input.fire_held && try_fire(ship, now) {
        Some(volley(ship, position.0))
    } else {
        None
    };

    ShipActions {
        volley,
        bomb: input.bomb_pressed,
    }
}

/// Handle an overlap with another entity.
///
/// Returns true only on the call that kills the ship; overlaps with
/// non-targets and repeated deliveries after death are no-ops.
pub fn on_overlap(ship: &mut Ship, other_is_target: bool) -> bool {
    if !other_is_target || ship.state == ShipState::Dead {
        return false;
    }
    ship.state = ShipState::Dead;
    ship.visible = false;
    true
}

/// Run ship control for every ship in the world.
pub fn run(world: &mut World, input: &InputState, dt: f64, now: f64) -> Vec<ShipActions> {
    world
        .query_mut::<(&mut Ship, &mut Position)>()
        .into_iter()
        .map(|(_entity, (ship, pos))| tick(ship, pos, input, dt, now))
        .collect()
}

/// Hit every registered target once. Ship state is not involved.
pub fn bomb_all(world: &World, registry: &TargetRegistry) -> Vec<(Entity, HitOutcome)> {
    let mut results = Vec::with_capacity(registry.len());
    for entity in registry.iter() {
        if let Ok(mut asteroid) = world.get::<&mut Asteroid>(entity) {
            let target: &mut dyn Hitable = &mut *asteroid;
            results.push((entity, target.register_hit()));
        }
    }
    results
}

/// Find the ship entity, if one exists.
pub fn find_ship(world: &World) -> Option<Entity> {
    world
        .query::<&Ship>()
        .iter()
        .next()
        .map(|(entity, _)| entity)
}
