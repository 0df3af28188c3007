//! Held input intents applied to the camera once per tick.

use tracing::debug;

use crate::camera::Camera;
use crate::map::{Cell, MapModel};

/// Cells moved per tick.
pub const MOVE_SPEED: f64 = 0.15;
/// Radians turned per tick.
pub const ROT_SPEED: f64 = 0.15;
/// How far ahead of the player collisions are probed.
pub const COLLISION_INSET: f64 = 0.2;
/// Ticks before the door key takes effect again.
pub const DOOR_COOLDOWN: u32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Intent {
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    ToggleDoor,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intents {
    pub forward: bool,
    pub backward: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    pub toggle_door: bool,
}

impl Intents {
    pub fn set(&mut self, intent: Intent, active: bool) {
        let flag = match intent {
            Intent::Forward => &mut self.forward,
            Intent::Backward => &mut self.backward,
            Intent::StrafeLeft => &mut self.strafe_left,
            Intent::StrafeRight => &mut self.strafe_right,
            Intent::TurnLeft => &mut self.turn_left,
            Intent::TurnRight => &mut self.turn_right,
            Intent::ToggleDoor => &mut self.toggle_door,
        };
        *flag = active;
    }
}

#[derive(Debug, Clone)]
pub struct MovementController {
    pub intents: Intents,
    doors_enabled: bool,
    door_cooldown: u32,
}

impl MovementController {
    pub fn new(doors_enabled: bool) -> Self {
        Self {
            intents: Intents::default(),
            doors_enabled,
            door_cooldown: 0,
        }
    }

    pub fn set_intent(&mut self, intent: Intent, active: bool) {
        self.intents.set(intent, active);
    }

    pub fn door_cooldown(&self) -> u32 {
        self.door_cooldown
    }

    /// Applies every held intent in a fixed order. Each step sees the pose
    /// left by the previous one.
    pub fn tick(&mut self, camera: &mut Camera, map: &mut MapModel) {
        let i = self.intents;
        if i.forward {
            try_move(camera, map, scale(camera.dir, MOVE_SPEED));
        }
        if i.backward {
            try_move(camera, map, scale(camera.dir, -MOVE_SPEED));
        }
        if i.strafe_right {
            try_move(camera, map, scale(camera.plane, MOVE_SPEED));
        }
        if i.strafe_left {
            try_move(camera, map, scale(camera.plane, -MOVE_SPEED));
        }
        if i.turn_left {
            camera.rotate(-ROT_SPEED);
        }
        if i.turn_right {
            camera.rotate(ROT_SPEED);
        }
        if i.toggle_door && self.doors_enabled && self.door_cooldown == 0 {
            if let Some((x, y, cell)) = toggle_adjacent_door(map, camera.pos) {
                debug!(x, y, ?cell, "door toggled");
            }
            self.door_cooldown = DOOR_COOLDOWN;
        }
        self.door_cooldown = self.door_cooldown.saturating_sub(1);
    }
}

#[inline]
fn scale(v: [f64; 2], k: f64) -> [f64; 2] {
    [v[0] * k, v[1] * k]
}

/// Moves by `motion`, checking each axis on its own so a blocked axis does
/// not stop sliding along the other. The x axis is resolved first.
pub fn try_move(camera: &mut Camera, map: &MapModel, motion: [f64; 2]) {
    let [x, y] = camera.pos;
    let new_x = x + motion[0];
    let new_y = y + motion[1];
    let inset_x = COLLISION_INSET.copysign(motion[0]);
    let inset_y = COLLISION_INSET.copysign(motion[1]);

    if map.cell_at_point(new_x + inset_x, y).is_passable() {
        camera.pos[0] = new_x;
    }
    if map.cell_at_point(camera.pos[0], new_y + inset_y).is_passable() {
        camera.pos[1] = new_y;
    }
}

/// Opens the first closed door next to `pos` (east, west, south, north),
/// otherwise closes the first open one.
pub fn toggle_adjacent_door(map: &mut MapModel, pos: [f64; 2]) -> Option<(isize, isize, Cell)> {
    let px = pos[0].floor() as isize;
    let py = pos[1].floor() as isize;
    let around = [(px + 1, py), (px - 1, py), (px, py + 1), (px, py - 1)];

    for wanted in [Cell::DoorClosed, Cell::DoorOpen] {
        if let Some(&(x, y)) = around.iter().find(|&&(x, y)| map.get(x, y) == Some(wanted)) {
            return map.toggle_door(x, y).map(|cell| (x, y, cell));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::Spawn;

    fn setup(rows: &[&str]) -> (MapModel, Camera) {
        let (map, spawn): (MapModel, Spawn) = MapModel::parse(rows, true).unwrap();
        (map, Camera::from_spawn(&spawn))
    }

    fn held(intent: Intent, doors: bool) -> MovementController {
        let mut c = MovementController::new(doors);
        c.set_intent(intent, true);
        c
    }

    #[test]
    fn forward_moves_until_the_inset_touches_a_wall() {
        let (mut map, mut cam) = setup(&["111", "101", "101", "101", "1N1", "111"]);
        let mut ctl = held(Intent::Forward, false);
        for _ in 0..40 {
            ctl.tick(&mut cam, &mut map);
        }
        assert_eq!(cam.pos[0], 1.5);
        assert!(cam.pos[1] >= 1.0 + COLLISION_INSET - 1e-9);
        assert!(cam.pos[1] < 1.0 + COLLISION_INSET + MOVE_SPEED + 1e-9);
    }

    #[test]
    fn backward_and_strafe() {
        let (mut map, mut cam) = setup(&["11111", "10001", "10N01", "10001", "11111"]);
        let mut ctl = held(Intent::Backward, false);
        ctl.tick(&mut cam, &mut map);
        assert!((cam.pos[1] - 2.65).abs() < 1e-12);

        ctl.set_intent(Intent::Backward, false);
        ctl.set_intent(Intent::StrafeRight, true);
        ctl.tick(&mut cam, &mut map);
        // Facing north, the plane points east.
        assert!((cam.pos[0] - (2.5 + 0.66 * MOVE_SPEED)).abs() < 1e-12);

        ctl.set_intent(Intent::StrafeRight, false);
        ctl.set_intent(Intent::StrafeLeft, true);
        ctl.tick(&mut cam, &mut map);
        assert!((cam.pos[0] - 2.5).abs() < 1e-12);
    }

    #[test]
    fn turning_right_from_north_heads_east() {
        let (mut map, mut cam) = setup(&["111", "1N1", "111"]);
        let mut ctl = held(Intent::TurnRight, false);
        ctl.tick(&mut cam, &mut map);
        assert!(cam.dir[0] > 0.0);
        ctl.set_intent(Intent::TurnRight, false);
        ctl.set_intent(Intent::TurnLeft, true);
        ctl.tick(&mut cam, &mut map);
        assert!(cam.dir[0].abs() < 1e-12);
        assert!((cam.dir[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn diagonal_into_a_wall_slides_along_it() {
        let (mut map, mut cam) = setup(&["11111", "1N001", "10001", "11111"]);
        cam.rotate(std::f64::consts::FRAC_PI_4);
        let mut ctl = held(Intent::Forward, false);
        for _ in 0..40 {
            ctl.tick(&mut cam, &mut map);
        }
        // y stopped by the north wall, x kept going until the east wall.
        assert!(cam.pos[1] > 1.2 && cam.pos[1] < 1.3, "y = {}", cam.pos[1]);
        assert!(cam.pos[0] > 3.6 && cam.pos[0] < 3.8, "x = {}", cam.pos[0]);
    }

    #[test]
    fn diagonal_into_a_corner_stops_at_the_inset() {
        let (mut map, mut cam) = setup(&["111", "1N1", "111"]);
        cam.rotate(std::f64::consts::FRAC_PI_4);
        let mut ctl = held(Intent::Forward, false);
        for _ in 0..10 {
            ctl.tick(&mut cam, &mut map);
        }
        let pinned = cam.pos;
        for _ in 0..10 {
            ctl.tick(&mut cam, &mut map);
        }
        assert_eq!(cam.pos, pinned);
        assert!(pinned[0] < 2.0 - COLLISION_INSET);
        assert!(pinned[1] > 1.0 + COLLISION_INSET);
    }

    #[test]
    fn closed_doors_block_and_open_doors_do_not() {
        let (mut map, mut cam) = setup(&["111111", "1ED001", "111111"]);
        let mut ctl = held(Intent::Forward, true);
        for _ in 0..10 {
            ctl.tick(&mut cam, &mut map);
        }
        assert!(cam.pos[0] < 2.0 - COLLISION_INSET + 1e-12);

        ctl.set_intent(Intent::ToggleDoor, true);
        ctl.tick(&mut cam, &mut map);
        assert_eq!(map.get(2, 1), Some(Cell::DoorOpen));
        ctl.set_intent(Intent::ToggleDoor, false);
        for _ in 0..20 {
            ctl.tick(&mut cam, &mut map);
        }
        assert!(cam.pos[0] > 3.0);
    }

    #[test]
    fn door_toggle_respects_the_cooldown() {
        let (mut map, mut cam) = setup(&["1111", "1ED1", "1111"]);
        let mut ctl = held(Intent::ToggleDoor, true);

        ctl.tick(&mut cam, &mut map);
        assert_eq!(map.get(2, 1), Some(Cell::DoorOpen));
        assert_eq!(ctl.door_cooldown(), DOOR_COOLDOWN - 1);

        // Held key does nothing until the cooldown runs out.
        for _ in 0..DOOR_COOLDOWN - 1 {
            ctl.tick(&mut cam, &mut map);
            assert_eq!(map.get(2, 1), Some(Cell::DoorOpen));
        }
        ctl.tick(&mut cam, &mut map);
        assert_eq!(map.get(2, 1), Some(Cell::DoorClosed));
    }

    #[test]
    fn door_key_is_ignored_without_door_support() {
        let (mut map, mut cam) = setup(&["1111", "1ED1", "1111"]);
        let mut ctl = held(Intent::ToggleDoor, false);
        ctl.tick(&mut cam, &mut map);
        assert_eq!(map.get(2, 1), Some(Cell::DoorClosed));
    }

    #[test]
    fn closed_doors_are_preferred_over_open_ones() {
        let (mut map, _) = setup(&["11111", "1DED1", "11111"]);
        map.toggle_door(3, 1);
        // East is open, west is closed: the closed one opens.
        let toggled = toggle_adjacent_door(&mut map, [2.5, 1.5]);
        assert_eq!(toggled, Some((1, 1, Cell::DoorOpen)));
        // Both open now: east closes first.
        let toggled = toggle_adjacent_door(&mut map, [2.5, 1.5]);
        assert_eq!(toggled, Some((3, 1, Cell::DoorClosed)));
    }
}
