// All values are per-tick at the nominal 62.5 Hz step unless noted.

// Capacities
pub const MAX_PLAYERS: usize = 16;
pub const MAX_PARTICIPANTS: usize = 16;
pub const TEAM_COUNT: usize = 2;

/// Sentinel for "no player / no avatar / no team" index fields.
pub const UNDEFINED_INDEX: u8 = 0xff;

// Discs
pub const AVATAR_RADIUS: f32 = 20.0;
pub const BALL_RADIUS: f32 = 10.0;

// Avatar locomotion
pub const REQUEST_VELOCITY_SCALE: f32 = 0.4;
pub const AVATAR_ACCELERATION: f32 = 0.2;
/// Acceleration while charging a kick; walking slows to a crawl.
pub const AVATAR_ACCELERATION_CHARGING: f32 = 0.05;
pub const MAX_AVATAR_SPEED: f32 = 60.0;
pub const AVATAR_DAMPING: f32 = 0.98;
pub const ROTATION_BLEND: f32 = 0.1;
pub const ROTATION_REQUEST_EPSILON: f32 = 0.001;
pub const AVATAR_BORDER_SAFE_DISTANCE: f32 = 10.0;
pub const AVATAR_BORDER_DAMPENING: f32 = 0.0;

// Dribble
pub const DRIBBLE_REACH_SHRINK: f32 = 2.0;
pub const DRIBBLE_AHEAD_DISTANCE: f32 = 10.0;
pub const DRIBBLE_PULL_FACTOR: f32 = 0.2;
pub const DRIBBLE_VELOCITY_BOOST: f32 = 2.0;

// Kick
pub const KICK_MAX_POWER: u8 = 100;
pub const KICK_REACH_FACTOR: f32 = 2.0;
pub const KICK_BASE_IMPULSE: f32 = 1.0;
pub const KICK_POWER_IMPULSE: f32 = 10.0;
pub const KICK_COOLDOWN_TICKS: u8 = 14;
pub const KICK_DRIBBLE_COOLDOWN_TICKS: u8 = 12;

// Slide tackle
pub const SLIDE_TACKLE_DURATION_TICKS: u8 = 20;
pub const SLIDE_TACKLE_COOLDOWN_TICKS: u8 = 60;
pub const SLIDE_TACKLE_FORCE: f32 = 8.0;

// Ball
pub const BALL_DAMPING: f32 = 0.988;
pub const BALL_BORDER_DAMPENING: f32 = 0.91;
/// Below this squared speed the ball is snapped to rest.
pub const BALL_REST_SPEED_SQ: f32 = 0.1;
pub const BALL_COLLIDE_MIN_IMPACT: f32 = 0.8;
pub const BALL_COLLIDE_MIN_SPEED: f32 = 0.7;

// Border collision
/// Extra push-out past the contact depth so a resolved circle does not
/// re-penetrate the same rail within the frame.
pub const PENETRATION_EPSILON: f32 = 0.1;

// Goal detection
pub const GOAL_DEPTH_EPSILON: f32 = 0.001;

// Phase countdowns (62 ticks per second of wall time)
pub const COUNT_DOWN_TICKS: u16 = 62 * 3;
pub const AFTER_GOAL_TICKS: u16 = 62 * 4;
pub const POST_GAME_TICKS: u16 = 62 * 6;
