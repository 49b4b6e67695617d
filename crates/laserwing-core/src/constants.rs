//! Simulation constants and default tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slowest real-time speed multiplier. Use `Pause` to stop the clock.
pub const MIN_TIME_SCALE: f64 = 0.1;

/// Fastest real-time speed multiplier.
pub const MAX_TIME_SCALE: f64 = 4.0;

// --- Playfield ---

/// Half width of the visible playfield (world units).
pub const PLAYFIELD_HALF_WIDTH: f64 = 8.0;

/// Top edge; asteroids enter here.
pub const PLAYFIELD_TOP: f64 = 6.0;

/// Bottom edge; asteroids below this are discarded.
pub const PLAYFIELD_BOTTOM: f64 = -6.0;

/// Where the ship is placed when a level loads.
pub const SHIP_START: (f64, f64) = (0.0, -4.0);

// --- Ship ---

/// Horizontal speed of the ship (units/second).
pub const SHIP_SPEED: f64 = 1.0;

/// Volleys per second.
pub const SHIP_RATE_OF_FIRE: f64 = 1.0;

/// Distance above the ship at which lasers spawn.
pub const SHIP_MUZZLE_OFFSET: f64 = 1.0;

/// Trigger radius of the ship.
pub const SHIP_RADIUS: f64 = 0.5;

// --- Projectiles ---

/// Laser travel speed (units/second).
pub const PROJECTILE_SPEED: f64 = 2.0;

/// Seconds before an unspent laser is removed.
pub const PROJECTILE_LIFETIME: f64 = 3.0;

/// Trigger radius of a laser.
pub const PROJECTILE_RADIUS: f64 = 0.1;

/// Requested directions of one volley: straight, left, right.
/// Side shots are deliberately not unit length; projectiles normalize on spawn.
pub const VOLLEY_DIRECTIONS: [(f64, f64); 3] = [(0.0, 1.0), (-1.0, 1.0), (1.0, 1.0)];

// --- Asteroids ---

/// Downward drift speed of asteroids (units/second).
pub const ASTEROID_SPEED: f64 = 1.5;

/// Seconds between asteroid spawns.
pub const ASTEROID_SPAWN_INTERVAL: f64 = 1.5;

/// Hits needed to destroy an asteroid.
pub const ASTEROID_HIT_POINTS: u32 = 1;

/// Trigger radius of an asteroid.
pub const ASTEROID_RADIUS: f64 = 0.6;

// --- Effects and sequencing ---

/// Seconds an explosion effect stays alive.
pub const EXPLOSION_DURATION: f64 = 1.0;

/// Delay between ship death and level reload (seconds).
pub const RESTART_DELAY: f64 = 1.0;
