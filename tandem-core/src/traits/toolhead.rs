//! Toolhead trait
//!
//! The toolhead owns the motion queue and the authoritative toolhead
//! position. The kinematics read its limits at setup and resynchronize its
//! position whenever the rail backing the X axis changes.

/// Trait for the motion queue / toolhead collaborator
pub trait Toolhead {
    /// Configured `(max_velocity, max_accel)`
    fn max_velocity_and_accel(&self) -> (f64, f64);

    /// Maximum velocity at which any axis may come to an instant halt
    fn max_axis_halt_velocity(&self) -> f64;

    /// Flush all queued moves and return the last move time
    ///
    /// Blocks until every previously queued move has been sequenced.
    fn sync_last_move_time(&mut self) -> f64;

    /// Current `[x, y, z, e]` position
    fn position(&self) -> [f64; 4];

    /// Overwrite the current `[x, y, z, e]` position without moving
    fn set_position(&mut self, pos: [f64; 4]);
}
