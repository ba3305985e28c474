//! Corner geometry.
//!
//! Pure functions over cells and plane points:
//!
//! - [`cell_corner`]: corner `k` of a cell, winding (+x,+y), (+x,-y), (-x,-y), (-x,+y)
//! - [`signed_turn_angle`] / [`turn_sign`]: left/right/straight classification
//! - [`corner_angles`]: how far each corner of a cell deviates from a direction
//!
//! Angles are in degrees, counter-clockwise positive.

mod corners;

pub use corners::{
    ANGLE_EPSILON, CORNER_COUNT, TurnSign, cell_corner, cell_corners, corner_angles,
    signed_angle, signed_turn_angle, turn_sign,
};
