pub const SIM_HZ: f32 = 60.0;
pub const RENDER_HZ: f32 = 30.0;
pub const DT: f32 = 1.0 / SIM_HZ;

// The clock runs in milliseconds, slowed by a fixed time scale. Forces
// integrate over the squared step.
pub const STEP_MS: f32 = 1000.0 / SIM_HZ;
pub const TIME_SCALE: f32 = 0.9;
pub const GRAVITY_SCALE: f32 = 0.0007;

pub const FIELD_OFFSET: f32 = 60.0;
pub const FIELD_GAP: f32 = 20.0;
pub const FIELD_RADIUS_MIN: f32 = 15.0;
pub const FIELD_RADIUS_MAX: f32 = 50.0;
pub const FIELD_MASS_MIN: f32 = 0.1;
pub const FIELD_MASS_MAX: f32 = 3.0;
pub const FIELD_FRICTION: f32 = 0.7;
pub const FIELD_FRICTION_AIR: f32 = 0.0001;
pub const FIELD_FRICTION_STATIC: f32 = 0.7;

pub const ACTOR_SIDES: u32 = 3;
pub const ACTOR_RADIUS: f32 = 70.0;
pub const ACTOR_MASS: f32 = 30.0;
pub const ACTOR_FRICTION: f32 = 1.0;
pub const ACTOR_RESTITUTION: f32 = 1.0;

// Weak long-range pull of every body toward the actor.
pub const ATTRACTION_COEFF: f32 = 1e-6;

pub const WALL_THICKNESS: f32 = 30.0;
pub const WALL_RESTITUTION: f32 = 1.0;

pub const CLOCK_SCALE: f32 = 0.005;
pub const AGITATED_MODULUS: f32 = 18.0;
pub const RELEASE_MODULUS: f32 = 13.0;

// Operating point of the logistic intensity map.
pub const LOGISTIC_POINT: f32 = 0.8;

pub const AGITATED_MASS: f32 = 30.0;
pub const RELEASE_MASS: f32 = 10.0;
pub const EVADE_MASS: f32 = 70.0;

pub const AGITATED_ENTRY_SCALE: f32 = 0.45;
pub const RELEASE_ENTRY_SCALE: f32 = 1.4;
pub const EVADE_ENTRY_SCALE: f32 = 1.2;

pub const RELEASE_SPIN: f32 = 5.0;
pub const AGITATED_GRAVITY: f32 = 0.05;

pub const MOUSE_STIFFNESS: f32 = 0.2;
pub const MOUSE_DAMPING: f32 = 0.85;

// World units per terminal cell. Cells are roughly twice as tall as wide.
pub const PX_PER_CELL_X: f32 = 8.0;
pub const PX_PER_CELL_Y: f32 = 16.0;

pub const DEFAULT_COLUMNS: u32 = 5;
pub const DEFAULT_ROWS: u32 = 5;
pub const DEFAULT_FIELD_SCALES: [f32; 2] = [0.5, 0.3];
