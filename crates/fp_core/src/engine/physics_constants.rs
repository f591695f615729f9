//! Physics and geometry constants for the arcade pitch.
//!
//! Tunable gameplay numbers live in `config`; these are the fixed shapes the
//! sprites and colliders were drawn for.

// ============================================================
// Pitch
// ============================================================
pub mod field {
    /// Field box edges (world units, +y down)
    pub const LEFT: f32 = 38.0;
    pub const RIGHT: f32 = 825.0;
    pub const TOP: f32 = 24.0;
    pub const BOTTOM: f32 = 323.0;

    /// Distance between the field box and the world walls
    pub const WALL_MARGIN: f32 = 22.0;

    /// Number of lateral zones (left / mid / right thirds)
    pub const ZONE_COUNT: usize = 3;
}

// ============================================================
// Nets
// ============================================================
pub mod net {
    /// Half height of the goal mouth, centered on the field's vertical center
    pub const MOUTH_HALF_HEIGHT: f32 = 32.0;

    /// Depth of the net behind the field edge
    pub const DEPTH: f32 = 32.0;

    /// Goal-line collider distance inside the mouth
    pub const GOAL_LINE_INSET: f32 = 12.0;

    /// Goal-line collider is shortened at the top / bottom so post grazes
    /// don't count
    pub const GOAL_LINE_TOP_INSET: f32 = 4.0;
    pub const GOAL_LINE_BOTTOM_INSET: f32 = 2.0;

    /// Post thickness (each post is a thin box)
    pub const POST_THICKNESS: f32 = 2.0;

    /// Where a player standing past the goal line knocks the ball back to
    pub const KICK_OUT_DISTANCE: f32 = 48.0;
}

// ============================================================
// Bodies
// ============================================================
pub mod body {
    /// Agent collider: feet box below the sprite anchor
    pub const HALF_WIDTH: f32 = 8.0;
    pub const HEIGHT: f32 = 12.0;

    /// Movement snaps to zero within this distance of the target
    pub const ARRIVE_EPSILON: f32 = 1.0;

    /// Velocity decay per tick while in pain
    pub const PAIN_DECAY: f32 = 0.9;
}

// ============================================================
// Referee
// ============================================================
pub mod referee {
    /// Start spot relative to the kickoff spot, clear of the ball
    pub const START_OFFSET_Y: f32 = -64.0;
}

// ============================================================
// Ice-cream truck
// ============================================================
pub mod truck {
    pub const WIDTH: f32 = 80.0;
    pub const HEIGHT: f32 = 48.0;

    /// Offset from the field's right edge (in addition to half the width)
    pub const RIGHT_OFFSET: f32 = 80.0;
    /// Gap below the field's top edge (in addition to the height)
    pub const TOP_GAP: f32 = 4.0;
}
