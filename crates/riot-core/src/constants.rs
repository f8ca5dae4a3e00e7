//! Simulation constants and tuning parameters.

/// Nominal frame rate (Hz) used when the host does not supply timestamps.
pub const FRAME_RATE: u32 = 60;

/// Milliseconds per frame at the nominal frame rate.
pub const FRAME_MS: f64 = 1000.0 / FRAME_RATE as f64;

// --- Screen / world ---

/// Viewport width (pixels).
pub const SCREEN_WIDTH: f64 = 800.0;

/// Viewport height (pixels). Projectiles outside [0, SCREEN_HEIGHT] are dropped.
pub const SCREEN_HEIGHT: f64 = 600.0;

/// Ground line (y). Actors rest with their bottom edge on it.
pub const GROUND_LEVEL: f64 = 400.0;

/// Fraction of the viewport kept between the camera edge and the followed actor.
pub const CAMERA_MARGIN_FRACTION: f64 = 0.3;

/// Camera easing factor while following the transport.
pub const CAMERA_EASE: f64 = 0.1;

// --- Physics ---

/// Downward acceleration per frame.
pub const GRAVITY: f64 = 0.6;

/// Initial vertical velocity of a jump.
pub const JUMP_FORCE: f64 = -12.0;

// --- Actors ---

pub const ACTOR_WIDTH: f64 = 30.0;
pub const ACTOR_HEIGHT: f64 = 50.0;

/// Player walking speed (pixels per frame).
pub const PLAYER_SPEED: f64 = 3.0;

/// Player health at mission start.
pub const PLAYER_START_HEALTH: f64 = 100.0;

/// Player maximum health.
pub const PLAYER_MAX_HEALTH: f64 = 500.0;

pub const PLAYER_START_GRENADES: u32 = 3;
pub const PLAYER_START_MEDKITS: u32 = 2;

/// Minimum interval between player attacks.
pub const PLAYER_ATTACK_COOLDOWN_MS: f64 = 200.0;

/// Officer walk speed is `OFFICER_BASE_SPEED + rand * OFFICER_SPEED_SPREAD`.
pub const OFFICER_BASE_SPEED: f64 = 2.0;
pub const OFFICER_SPEED_SPREAD: f64 = 2.0;

/// Rioter maximum (and starting) health.
pub const RIOTER_HEALTH: f64 = 100.0;

/// Initial rioter speed is `1 + rand * RIOTER_SPEED_SPREAD`.
pub const RIOTER_INITIAL_BASE_SPEED: f64 = 1.0;

/// Reinforcement rioter speed is `RIOTER_BASE_SPEED + rand * RIOTER_SPEED_SPREAD`.
pub const RIOTER_BASE_SPEED: f64 = 0.7;
pub const RIOTER_SPEED_SPREAD: f64 = 2.0;

/// Per-frame probability that a grounded rioter jumps.
pub const RIOTER_JUMP_CHANCE: f64 = 0.01;

// --- Weapons ---

pub const BULLET_SPEED: f64 = 12.0;
pub const PLAYER_BULLET_DAMAGE: f64 = 25.0;
pub const OFFICER_BULLET_DAMAGE: f64 = 15.0;

/// Projectile-to-rioter hit radius.
pub const BULLET_HIT_RADIUS: f64 = 20.0;

pub const BATON_RANGE: f64 = 50.0;
pub const BATON_DAMAGE: f64 = 40.0;
pub const KNIFE_RANGE: f64 = 30.0;
pub const KNIFE_DAMAGE: f64 = 60.0;

// --- Grenades ---

pub const GRENADE_THROW_FORCE: f64 = 15.0;
pub const GRENADE_DAMAGE: f64 = 150.0;
pub const GRENADE_RADIUS: f64 = 100.0;
pub const GRENADE_SIZE: f64 = 8.0;

/// Fuse length in frames.
pub const GRENADE_FUSE_FRAMES: u32 = 60;

/// Vertical velocity factor applied on ground contact.
pub const GRENADE_BOUNCE_DAMPING: f64 = -0.5;

/// Horizontal velocity factor applied on ground contact.
pub const GRENADE_GROUND_FRICTION: f64 = 0.7;

// --- Healing ---

pub const MEDKIT_HEAL: f64 = 50.0;
pub const MEDIC_HEAL_RANGE: f64 = 100.0;
pub const MEDIC_HEAL_AMOUNT: f64 = 30.0;
pub const MEDIC_HEAL_COOLDOWN_MS: f64 = 3000.0;

/// Officers below this health ratio are considered wounded.
pub const WOUNDED_THRESHOLD: f64 = 0.9;

// --- Contact damage ---

/// Rioters closer than this hurt the actor they touch.
pub const CONTACT_RADIUS: f64 = 50.0;

/// Damage per touching rioter per frame.
pub const CONTACT_DAMAGE: f64 = 1.0;

// --- Gunner distance band ---

/// Gunners back away below this fraction of their attack range.
pub const GUNNER_MIN_RANGE_FRACTION: f64 = 0.5;

/// Gunners close in above this fraction of their attack range.
pub const GUNNER_MAX_RANGE_FRACTION: f64 = 0.8;

// --- Population ---

pub const INITIAL_RIOTERS: usize = 50;

/// Rioter count at or below which reinforcements spawn.
pub const REPOPULATE_THRESHOLD: usize = 10;

/// Rioters spawned per reinforcement batch.
pub const REPOPULATE_BATCH: usize = 100;

/// Left edge of the rioter spawn band, also the riot site x.
pub const SPAWN_DISTANCE: f64 = 2000.0;

/// Width of the rioter spawn band.
pub const SPAWN_BAND_WIDTH: f64 = 400.0;

// --- Radio backup ---

pub const RADIO_COOLDOWN_MS: f64 = 30_000.0;

/// Officers per division in the starting squad and in each backup call.
pub const SQUAD_GUNNERS: usize = 10;
pub const SQUAD_MEDICS: usize = 2;
pub const SQUAD_CLOSE_COMBAT: usize = 8;

/// Backup spawns at `player.x - BACKUP_SPAWN_OFFSET + rand * BACKUP_SPAWN_SPREAD`.
pub const BACKUP_SPAWN_OFFSET: f64 = 200.0;
pub const BACKUP_SPAWN_SPREAD: f64 = 100.0;

/// Starting squad spawns at `rand * STAGING_SPREAD + STAGING_MIN_X`.
pub const STAGING_MIN_X: f64 = 20.0;
pub const STAGING_SPREAD: f64 = 200.0;

// --- Transport ---

pub const TRUCK_SPEED: f64 = 5.0;
pub const TRUCK_WIDTH: f64 = 160.0;

/// Transport y (top) relative to the ground line.
pub const TRUCK_GROUND_OFFSET: f64 = 80.0;

/// Door (and driver seat) x offset from the transport origin.
pub const TRUCK_DOOR_OFFSET: f64 = 120.0;

/// Driver seat y offset from the transport origin.
pub const TRUCK_SEAT_Y_OFFSET: f64 = 30.0;

/// Exit x offset when leaving at the riot site.
pub const TRUCK_COMBAT_EXIT_OFFSET: f64 = 170.0;

/// Horizontal window around the door in which the player can board.
pub const TRUCK_INTERACT_RANGE: f64 = 30.0;

/// How far above the ground the player may be and still board.
pub const TRUCK_GROUND_TOLERANCE: f64 = 10.0;

/// Transport is "near the riot" within this distance of `SPAWN_DISTANCE`.
pub const RIOT_ZONE_RANGE: f64 = 500.0;

/// Seating grid inside the transport.
pub const SEAT_COLUMNS: usize = 4;
pub const SEAT_ORIGIN_X: f64 = 30.0;
pub const SEAT_ORIGIN_Y: f64 = 20.0;
pub const SEAT_SPACING_X: f64 = 25.0;
pub const SEAT_SPACING_Y: f64 = 15.0;

/// Deployment line to the right of the transport.
pub const DEPLOY_COLUMNS: usize = 5;
pub const DEPLOY_OFFSET_X: f64 = 200.0;
pub const DEPLOY_SPACING_X: f64 = 40.0;
pub const DEPLOY_JITTER: f64 = 20.0;

// --- Mission ---

/// Delay before the briefing is offered.
pub const BRIEFING_DELAY_MS: f64 = 2000.0;

// --- Scoring ---

/// Consecutive scoring events inside this window build the combo.
pub const COMBO_WINDOW_MS: f64 = 2000.0;

/// Multiplier gained per combo step.
pub const COMBO_STEP: f64 = 0.1;

pub const MAX_MULTIPLIER: f64 = 3.0;

// --- Effects ---

pub const EXPLOSION_FRAMES: u32 = 15;
pub const HEAL_EFFECT_FRAMES: u32 = 30;
pub const HEAL_EFFECT_RADIUS: f64 = 20.0;
pub const MELEE_SWING_FRAMES: u32 = 10;

/// Hard cap on live effects; the oldest are dropped first.
pub const MAX_EFFECTS: usize = 256;
