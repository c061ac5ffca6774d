//! In-memory collaborators for unit tests

use crate::error::HomingError;
use crate::kinematics::transform::RailDrive;
use crate::motion::Move;

use super::homing::{HomingDriver, HomingMove};
use super::rail::{HomingInfo, Rail};
use super::toolhead::Toolhead;

#[derive(Debug, Clone)]
pub struct MockRail {
    pub name: String,
    pub endstop_id: u8,
    pub range: (f64, f64),
    pub info: HomingInfo,
    pub position: f64,
    pub enabled: bool,
    pub drive: Option<RailDrive>,
    pub max_jerk: Option<(f64, f64)>,
    pub queued: Vec<Move>,
    pub shared_endstops: Vec<u8>,
    pub enable_calls: u32,
}

impl MockRail {
    pub fn new(name: &str, endstop_id: u8, range: (f64, f64), position_endstop: f64) -> Self {
        Self {
            name: name.into(),
            endstop_id,
            range,
            info: HomingInfo {
                position_endstop,
                positive_dir: position_endstop >= range.1,
            },
            position: 0.0,
            enabled: false,
            drive: None,
            max_jerk: None,
            queued: Vec::new(),
            shared_endstops: Vec::new(),
            enable_calls: 0,
        }
    }
}

impl Rail for MockRail {
    type Endstop = u8;

    fn name(&self) -> &str {
        &self.name
    }

    fn range(&self) -> (f64, f64) {
        self.range
    }

    fn homing_info(&self) -> HomingInfo {
        self.info
    }

    fn commanded_position(&self) -> f64 {
        self.position
    }

    fn set_position(&mut self, coord: [f64; 3]) {
        if let Some(drive) = self.drive {
            self.position = drive.calc_position(coord);
        }
    }

    fn motor_enable(&mut self, _print_time: f64, enable: bool) {
        self.enabled = enable;
        self.enable_calls += 1;
    }

    fn is_motor_enabled(&self) -> bool {
        self.enabled
    }

    fn set_drive_mode(&mut self, drive: RailDrive) {
        self.drive = Some(drive);
    }

    fn set_max_jerk(&mut self, halt_velocity: f64, accel: f64) {
        self.max_jerk = Some((halt_velocity, accel));
    }

    fn queue_move(&mut self, _print_time: f64, mv: &Move) {
        self.queued.push(*mv);
    }

    fn primary_endstop(&self) -> u8 {
        self.endstop_id
    }

    fn add_shared_endstop(&mut self, endstop: u8) {
        self.shared_endstops.push(endstop);
    }
}

#[derive(Debug, Clone)]
pub struct MockToolhead {
    pub max_velocity: f64,
    pub max_accel: f64,
    pub halt_velocity: f64,
    pub position: [f64; 4],
    pub syncs: u32,
    pub set_position_calls: u32,
}

impl MockToolhead {
    pub fn new() -> Self {
        Self {
            max_velocity: 300.0,
            max_accel: 3000.0,
            halt_velocity: 5.0,
            position: [0.0; 4],
            syncs: 0,
            set_position_calls: 0,
        }
    }
}

impl Toolhead for MockToolhead {
    fn max_velocity_and_accel(&self) -> (f64, f64) {
        (self.max_velocity, self.max_accel)
    }

    fn max_axis_halt_velocity(&self) -> f64 {
        self.halt_velocity
    }

    fn sync_last_move_time(&mut self) -> f64 {
        self.syncs += 1;
        f64::from(self.syncs)
    }

    fn position(&self) -> [f64; 4] {
        self.position
    }

    fn set_position(&mut self, pos: [f64; 4]) {
        self.position = pos;
        self.set_position_calls += 1;
    }
}

/// Records every probe; optionally fails the n-th one
#[derive(Debug, Default)]
pub struct MockHoming {
    pub probes: Vec<(String, HomingMove)>,
    pub fail_at: Option<usize>,
}

impl MockHoming {
    pub fn failing_at(index: usize) -> Self {
        Self {
            probes: Vec::new(),
            fail_at: Some(index),
        }
    }
}

impl HomingDriver<MockRail> for MockHoming {
    fn home_rail(&mut self, rail: &mut MockRail, homing: &HomingMove) -> Result<(), HomingError> {
        let index = self.probes.len();
        self.probes.push((rail.name.clone(), *homing));
        if self.fail_at == Some(index) {
            return Err(HomingError::EndstopNotTriggered { axis: homing.axis });
        }
        Ok(())
    }
}
