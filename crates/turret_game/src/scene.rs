//! Scene state: the fixed set of game objects plus their running animations.
//!
//! Objects never come and go. Input handlers call the action methods here,
//! which either mutate state and return `true` or refuse and return `false`.
//! Refusals are routine (a key pressed mid-animation) and are only logged at
//! debug level.

use glam::Vec2;

use turret_core::aim::{pointer_angle_deg, AimAngle, HandleHitArea};

use crate::animation::{AnimationKind, AnimationManager, Completion, SceneObject};
use crate::layout::SceneLayout;

#[derive(Debug, Clone)]
pub struct Turret {
    pub x: f32,
    pub y: f32,
    pub center: Vec2,
    pub still_image: String,
}

#[derive(Debug, Clone)]
pub struct Monkey {
    pub x: f32,
    pub y: f32,
    pub origin: Vec2,
    pub idle_image: String,
    pub still_image: String,
}

#[derive(Debug, Clone)]
pub struct Icicle {
    pub x: f32,
    pub y: f32,
    pub origin_y: f32,
    pub fall_distance: f32,
    pub max_fall_distance: f32,
    pub fall_per_drop: f32,
    pub still_image: String,
}

#[derive(Debug, Clone)]
pub struct Snowpile {
    pub x: f32,
    pub y: f32,
    pub current_frame: u32,
    pub max_startup_frame: u32,
    pub max_add_frame: u32,
    pub startup_triggered: bool,
    pub startup_complete: bool,
    pub still_image: String,
}

impl Snowpile {
    /// Add-snow actions still available before the pile is full.
    pub fn snow_amount_left(&self) -> u32 {
        self.max_add_frame.saturating_sub(self.current_frame)
    }
}

#[derive(Debug, Clone)]
pub struct AimSlider {
    pub x: f32,
    pub y: f32,
    pub center: Vec2,
    pub active: bool,
    pub active_image: String,
    pub inactive_image: String,
    pub hit_area: HandleHitArea,
}

impl AimSlider {
    pub fn image(&self) -> &str {
        if self.active {
            &self.active_image
        } else {
            &self.inactive_image
        }
    }
}

#[derive(Debug, Clone)]
pub struct AimGuide {
    pub x: f32,
    pub y: f32,
    pub visible: bool,
    pub mirrored: bool,
    pub still_image: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnowpilePhase {
    Uninitialized,
    Startup,
    Ready,
    Adding,
    Maxed,
}

impl SnowpilePhase {
    pub fn label(self) -> &'static str {
        match self {
            SnowpilePhase::Uninitialized => "Uninitialized",
            SnowpilePhase::Startup => "Startup",
            SnowpilePhase::Ready => "Ready",
            SnowpilePhase::Adding => "Adding",
            SnowpilePhase::Maxed => "Maxed",
        }
    }
}

pub struct SceneState {
    pub turret: Turret,
    pub monkey: Monkey,
    pub icicle: Icicle,
    pub snowpile: Snowpile,
    pub aim_slider: AimSlider,
    pub aim_guide: AimGuide,
    pub aim: AimAngle,
    pub animations: AnimationManager,
    pub show_grid: bool,
    pub show_coordinates: bool,
    snowpile_frame_pattern: String,
}

impl SceneState {
    pub fn new(layout: &SceneLayout, animations: AnimationManager) -> Self {
        let slider_center = Vec2::new(layout.aim_slider.center_x, layout.aim_slider.center_y);
        let slider_handle = Vec2::new(layout.aim_slider.x, layout.aim_slider.y);
        let icicle = &layout.icicle;

        Self {
            turret: Turret {
                x: layout.turret.x,
                y: layout.turret.y,
                center: Vec2::new(layout.turret.center_x, layout.turret.center_y),
                still_image: layout.turret.image.clone(),
            },
            monkey: Monkey {
                x: layout.monkey.x,
                y: layout.monkey.y,
                origin: Vec2::new(layout.monkey.origin_x, layout.monkey.origin_y),
                idle_image: layout.monkey.idle_image.clone(),
                still_image: layout.monkey.idle_image.clone(),
            },
            icicle: Icicle {
                x: icicle.x,
                y: icicle.y,
                origin_y: icicle.y,
                fall_distance: 0.0,
                max_fall_distance: icicle.max_fall_distance,
                fall_per_drop: icicle.max_fall_distance / icicle.drops.max(1) as f32,
                still_image: icicle.image.clone(),
            },
            snowpile: Snowpile {
                x: layout.snowpile.x,
                y: layout.snowpile.y,
                current_frame: 1,
                max_startup_frame: layout.snowpile.max_startup_frame,
                max_add_frame: layout.snowpile.max_add_frame,
                startup_triggered: false,
                startup_complete: false,
                still_image: layout.snowpile_frame_key(1),
            },
            aim_slider: AimSlider {
                x: layout.aim_slider.x,
                y: layout.aim_slider.y,
                center: slider_center,
                active: layout.aim_slider.active,
                active_image: layout.aim_slider.active_image.clone(),
                inactive_image: layout.aim_slider.inactive_image.clone(),
                hit_area: HandleHitArea::new(
                    slider_center,
                    slider_handle,
                    Vec2::new(layout.aim_slider.hit_offset_x, layout.aim_slider.hit_offset_y),
                    layout.aim_slider.hit_tolerance,
                ),
            },
            aim_guide: AimGuide {
                x: layout.aim_guide.x,
                y: layout.aim_guide.y,
                visible: layout.aim_guide.visible,
                mirrored: layout.aim_guide.mirrored,
                still_image: layout.aim_guide.image.clone(),
            },
            aim: AimAngle::default(),
            animations,
            show_grid: layout.grid.visible,
            show_coordinates: false,
            snowpile_frame_pattern: layout.snowpile.frame_pattern.clone(),
        }
    }

    pub fn is_animating(&self, object: SceneObject) -> bool {
        self.animations.is_animating(object)
    }

    /// Where new animations for `object` are spawned.
    fn anchor(&self, object: SceneObject) -> (f32, f32) {
        match object {
            SceneObject::Turret => (self.turret.x, self.turret.y),
            SceneObject::Monkey => (self.monkey.x, self.monkey.y),
            SceneObject::Icicle => (self.icicle.x, self.icicle.y),
            SceneObject::Snowpile => (self.snowpile.x, self.snowpile.y),
        }
    }

    fn trigger(&mut self, kind: AnimationKind) -> bool {
        let (x, y) = self.anchor(kind.target());
        self.animations.trigger(kind, x, y).is_some()
    }

    /// Play the snowpile intro. Only the first call does anything.
    pub fn start_snowpile(&mut self) -> bool {
        if self.snowpile.startup_triggered || self.snowpile.startup_complete {
            log::debug!("Snowpile startup already ran");
            return false;
        }
        log::info!("Starting snowpile startup animation");
        self.snowpile.startup_triggered = self.trigger(AnimationKind::SnowpileStartup);
        self.snowpile.startup_triggered
    }

    pub fn fire_turret(&mut self) -> bool {
        if self.is_animating(SceneObject::Turret) {
            log::debug!("Turret busy, fire ignored");
            return false;
        }
        log::info!("Turret fired! Angle: {:.1}\u{00b0}", self.aim.degrees());
        self.trigger(AnimationKind::TurretFire)
    }

    pub fn reset_icicle(&mut self) {
        self.icicle.y = self.icicle.origin_y;
        self.icicle.fall_distance = 0.0;
        self.animations.retire_target(SceneObject::Icicle);
        log::info!("Icicle reset to its starting position");
    }

    pub fn reset_monkey(&mut self) {
        self.monkey.x = self.monkey.origin.x;
        self.monkey.y = self.monkey.origin.y;
        self.animations.retire_target(SceneObject::Monkey);
        log::info!("Monkey reset to its starting position");
    }

    pub fn reset_aim(&mut self) {
        self.aim = AimAngle::default();
        log::info!("Aim reset to 0\u{00b0}");
    }

    /// Lower the icicle one step and shake it there.
    pub fn drop_icicle(&mut self) -> bool {
        let icicle = &mut self.icicle;
        if icicle.fall_distance >= icicle.max_fall_distance {
            log::debug!("Icicle already fully dropped");
            return false;
        }
        if self.animations.is_animating(SceneObject::Icicle) {
            log::debug!("Icicle still shaking, drop ignored");
            return false;
        }
        icicle.fall_distance = (icicle.fall_distance + icicle.fall_per_drop).min(icicle.max_fall_distance);
        icicle.y = icicle.origin_y + icicle.fall_distance;
        log::info!(
            "Icicle dropped: fall_distance={}, y={}",
            icicle.fall_distance,
            icicle.y
        );
        self.trigger(AnimationKind::IcicleShake)
    }

    /// Grow the snowpile by one frame.
    ///
    /// Accepted only once the intro has finished, while no snowpile animation
    /// is live and the pile is below its maximum. The still image switches to
    /// the new frame immediately; the monkey's shovelling overlay plays only
    /// when the monkey is free.
    pub fn add_snow(&mut self) -> bool {
        let snowpile = &self.snowpile;
        if snowpile.current_frame >= snowpile.max_add_frame {
            log::info!(
                "Cannot add more snow, pile is at its maximum frame {}",
                snowpile.max_add_frame
            );
            return false;
        }
        if !snowpile.startup_complete || self.is_animating(SceneObject::Snowpile) {
            log::debug!(
                "Cannot add snow yet: startup complete {}, animating {}",
                snowpile.startup_complete,
                self.is_animating(SceneObject::Snowpile)
            );
            return false;
        }

        self.snowpile.current_frame += 1;
        self.snowpile.still_image =
            turret_core::animation::frame_path(&self.snowpile_frame_pattern, self.snowpile.current_frame);
        if !self.is_animating(SceneObject::Monkey) {
            self.trigger(AnimationKind::MonkeyAddSnow);
        }
        log::info!(
            "Snow added, now at frame {} ({} left)",
            self.snowpile.current_frame,
            self.snowpile.snow_amount_left()
        );
        true
    }

    /// Flip the aim slider between active and inactive. Returns the new state.
    pub fn toggle_active_player(&mut self) -> bool {
        self.aim_slider.active = !self.aim_slider.active;
        log::info!(
            "Aim slider is now {}",
            if self.aim_slider.active { "ACTIVE" } else { "INACTIVE" }
        );
        self.aim_slider.active
    }

    /// Start a monkey animation regardless of what the monkey is doing.
    pub fn play_monkey(&mut self, kind: AnimationKind) -> bool {
        if kind.target() != SceneObject::Monkey {
            log::warn!("'{}' is not a monkey animation", kind.name());
            return false;
        }
        self.trigger(kind)
    }

    /// Start a monkey animation only if the monkey is not already animating.
    pub fn play_monkey_if_idle(&mut self, kind: AnimationKind) -> bool {
        if self.is_animating(SceneObject::Monkey) {
            log::debug!("Monkey busy, '{}' ignored", kind.name());
            return false;
        }
        self.play_monkey(kind)
    }

    /// Play `kind` on an idle monkey, then `follow_up` once it ends.
    pub fn play_monkey_then(&mut self, kind: AnimationKind, follow_up: AnimationKind) -> bool {
        if self.is_animating(SceneObject::Monkey) {
            log::debug!("Monkey busy, '{}' ignored", kind.name());
            return false;
        }
        if kind.target() != SceneObject::Monkey || follow_up.target() != SceneObject::Monkey {
            log::warn!(
                "'{}' then '{}' is not a monkey sequence",
                kind.name(),
                follow_up.name()
            );
            return false;
        }
        let (x, y) = self.anchor(SceneObject::Monkey);
        self.animations.trigger_then(kind, x, y, follow_up).is_some()
    }

    pub fn slider_hit(&self, pointer: Vec2) -> bool {
        self.aim_slider.active && self.aim_slider.hit_area.contains(pointer)
    }

    /// Aim at `pointer` as seen from the slider pivot, clamped to the aim range.
    pub fn set_aim_from_pointer(&mut self, pointer: Vec2) {
        self.aim
            .set_degrees(pointer_angle_deg(self.aim_slider.center, pointer));
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
        log::info!("Grid: {}", if self.show_grid { "ON" } else { "OFF" });
    }

    pub fn toggle_coordinates(&mut self) {
        self.show_coordinates = !self.show_coordinates;
        log::info!(
            "Coordinates: {}",
            if self.show_coordinates { "ON" } else { "OFF" }
        );
    }

    /// Advance every animation by `dt_us` and apply completion effects.
    pub fn update(&mut self, dt_us: u64) {
        for completion in self.animations.advance(dt_us) {
            self.on_complete(completion);
        }
    }

    fn on_complete(&mut self, completion: Completion) {
        match completion.kind.target() {
            SceneObject::Snowpile if completion.kind == AnimationKind::SnowpileStartup => {
                self.finish_snowpile_startup();
            }
            SceneObject::Monkey => {
                self.monkey.still_image = self.monkey.idle_image.clone();
            }
            _ => {}
        }
        if let Some(follow_up) = completion.follow_up {
            log::debug!(
                "{} finished, following with {}",
                completion.kind.name(),
                follow_up.name()
            );
            self.trigger(follow_up);
        }
    }

    fn finish_snowpile_startup(&mut self) {
        if self.snowpile.startup_complete {
            return;
        }
        self.snowpile.startup_complete = true;
        self.snowpile.current_frame = self.snowpile.current_frame.max(self.snowpile.max_startup_frame);
        self.snowpile.still_image = self
            .animations
            .template(AnimationKind::SnowpileStartup)
            .and_then(|t| t.last_frame())
            .map(str::to_string)
            .unwrap_or_else(|| {
                turret_core::animation::frame_path(&self.snowpile_frame_pattern, self.snowpile.current_frame)
            });
        log::info!(
            "Snowpile startup complete at frame {}",
            self.snowpile.current_frame
        );
    }

    pub fn snowpile_phase(&self) -> SnowpilePhase {
        let snowpile = &self.snowpile;
        if !snowpile.startup_complete {
            return if snowpile.startup_triggered {
                SnowpilePhase::Startup
            } else {
                SnowpilePhase::Uninitialized
            };
        }
        if !self.animations.live_of(AnimationKind::SnowpileAdd).is_empty() {
            SnowpilePhase::Adding
        } else if snowpile.current_frame >= snowpile.max_add_frame {
            SnowpilePhase::Maxed
        } else {
            SnowpilePhase::Ready
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::animation::tests::small_manager;
    use std::path::Path;

    const FRAME_US: u64 = 10_000;

    /// Scene built from the built-in layout with 3-frame, 10 ms templates.
    pub(crate) fn test_scene() -> SceneState {
        SceneState::new(&SceneLayout::default(), small_manager())
    }

    /// Scene with the shipped animation table.
    fn shipped_scene() -> SceneState {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../assets/animations/turret_demo.json");
        let manager = AnimationManager::load(&path).expect("shipped table should load");
        SceneState::new(&SceneLayout::default(), manager)
    }

    pub(crate) fn run_until_idle(scene: &mut SceneState, object: SceneObject) {
        for _ in 0..10_000 {
            if !scene.is_animating(object) {
                return;
            }
            scene.update(FRAME_US);
        }
        panic!("{:?} never stopped animating", object);
    }

    pub(crate) fn ready_scene() -> SceneState {
        let mut scene = test_scene();
        assert!(scene.start_snowpile());
        run_until_idle(&mut scene, SceneObject::Snowpile);
        scene
    }

    #[test]
    fn initial_state_matches_layout() {
        let scene = test_scene();
        assert_eq!(scene.snowpile.current_frame, 1);
        assert_eq!(scene.snowpile.still_image, "sprites/Snowpile_Player1/1.png");
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Uninitialized);
        assert_eq!(scene.icicle.fall_per_drop, 122.0 / 16.0);
        assert_eq!(scene.aim.degrees(), 0.0);
        assert!(scene.show_grid);
        assert!(scene.aim_slider.active);
    }

    #[test]
    fn startup_snaps_to_last_startup_frame_once() {
        let mut scene = test_scene();
        assert!(scene.start_snowpile());
        assert!(!scene.start_snowpile());
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Startup);
        assert!(!scene.snowpile.startup_complete);

        run_until_idle(&mut scene, SceneObject::Snowpile);
        assert!(scene.snowpile.startup_complete);
        assert_eq!(scene.snowpile.current_frame, 46);
        assert_eq!(scene.snowpile.still_image, "SnowpileStartup/3.png");
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Ready);

        // A second completion would not move the counter again.
        scene.finish_snowpile_startup();
        assert_eq!(scene.snowpile.current_frame, 46);
        assert!(!scene.start_snowpile());
    }

    #[test]
    fn add_snow_rejected_before_startup_completes() {
        let mut scene = test_scene();
        assert!(!scene.add_snow());
        scene.start_snowpile();
        assert!(!scene.add_snow());
        assert_eq!(scene.snowpile.current_frame, 1);
    }

    #[test]
    fn forty_six_adds_reach_max_then_saturate() {
        let mut scene = ready_scene();
        for expected in 47..=92 {
            assert!(scene.add_snow());
            assert_eq!(scene.snowpile.current_frame, expected);
            assert_eq!(
                scene.snowpile.still_image,
                format!("sprites/Snowpile_Player1/{expected}.png")
            );
        }
        assert_eq!(scene.snowpile.snow_amount_left(), 0);
        assert!(!scene.add_snow());
        assert!(!scene.add_snow());
        assert_eq!(scene.snowpile.current_frame, 92);

        run_until_idle(&mut scene, SceneObject::Monkey);
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Maxed);
    }

    #[test]
    fn add_snow_plays_overlay_only_on_idle_monkey() {
        let mut scene = ready_scene();
        assert!(scene.add_snow());
        assert_eq!(scene.animations.live_of(AnimationKind::MonkeyAddSnow).len(), 1);
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Ready);

        assert!(scene.add_snow());
        assert_eq!(scene.animations.live_of(AnimationKind::MonkeyAddSnow).len(), 1);
    }

    #[test]
    fn add_snow_accepted_only_in_ready_phase() {
        let mut scene = test_scene();
        for step in 0..400 {
            if step == 5 {
                scene.start_snowpile();
            }
            if step % 40 == 20 {
                let (x, y) = (scene.snowpile.x, scene.snowpile.y);
                scene.animations.trigger(AnimationKind::SnowpileAdd, x, y);
            }
            let phase = scene.snowpile_phase();
            if scene.add_snow() {
                assert_eq!(phase, SnowpilePhase::Ready, "accepted at step {step}");
            }
            scene.update(FRAME_US);
        }
    }

    #[test]
    fn pile_animation_blocks_add_snow() {
        let mut scene = ready_scene();
        let (x, y) = (scene.snowpile.x, scene.snowpile.y);
        scene.animations.trigger(AnimationKind::SnowpileAdd, x, y);
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Adding);
        assert!(!scene.add_snow());

        run_until_idle(&mut scene, SceneObject::Snowpile);
        assert_eq!(scene.snowpile_phase(), SnowpilePhase::Ready);
        assert!(scene.add_snow());
    }

    #[test]
    fn snowpile_frame_never_decreases() {
        let mut scene = ready_scene();
        let mut last = scene.snowpile.current_frame;
        for step in 0..200 {
            if step % 3 == 0 {
                scene.add_snow();
            }
            scene.update(FRAME_US);
            assert!(scene.snowpile.current_frame >= last);
            assert!(scene.snowpile.current_frame <= scene.snowpile.max_add_frame);
            last = scene.snowpile.current_frame;
        }
    }

    #[test]
    fn fire_turret_refused_while_firing() {
        let mut scene = test_scene();
        assert!(scene.fire_turret());
        assert!(!scene.fire_turret());
        run_until_idle(&mut scene, SceneObject::Turret);
        assert!(scene.fire_turret());
    }

    #[test]
    fn drop_icicle_steps_then_saturates() {
        let mut scene = test_scene();
        for drop in 1..=16 {
            assert!(scene.drop_icicle());
            assert!(!scene.drop_icicle(), "shaking icicle should refuse");
            run_until_idle(&mut scene, SceneObject::Icicle);
            assert_eq!(scene.icicle.fall_distance, drop as f32 * 122.0 / 16.0);
        }
        assert_eq!(scene.icicle.y, 178.0 + 122.0);
        assert!(!scene.drop_icicle());
        assert!(!scene.is_animating(SceneObject::Icicle));
    }

    #[test]
    fn shake_spawns_at_dropped_position() {
        let mut scene = test_scene();
        scene.drop_icicle();
        let live = &scene.animations.live_of(AnimationKind::IcicleShake)[0];
        assert_eq!((live.instance.x, live.instance.y), (264.0, 178.0 + 122.0 / 16.0));
    }

    #[test]
    fn reset_icicle_restores_origin_and_stops_shake() {
        let mut scene = test_scene();
        scene.drop_icicle();
        scene.reset_icicle();
        assert_eq!(scene.icicle.y, 178.0);
        assert_eq!(scene.icicle.fall_distance, 0.0);
        assert!(!scene.is_animating(SceneObject::Icicle));
        assert!(scene.drop_icicle());
    }

    #[test]
    fn reset_monkey_moves_to_origin_and_clears_loop() {
        let mut scene = test_scene();
        assert!(scene.play_monkey(AnimationKind::MonkeyIdle));
        for _ in 0..20 {
            scene.update(FRAME_US);
        }
        assert!(scene.is_animating(SceneObject::Monkey));

        scene.reset_monkey();
        assert_eq!((scene.monkey.x, scene.monkey.y), (-4.0, 292.0));
        assert!(!scene.is_animating(SceneObject::Monkey));
        assert!(scene.play_monkey_if_idle(AnimationKind::MonkeyWin));
    }

    #[test]
    fn gated_monkey_animations_wait_for_idle() {
        let mut scene = test_scene();
        assert!(scene.play_monkey_if_idle(AnimationKind::MonkeyLose));
        assert!(!scene.play_monkey_if_idle(AnimationKind::MonkeyWin));
        // Idle is always allowed and stacks alongside.
        assert!(scene.play_monkey(AnimationKind::MonkeyIdle));
        assert_eq!(scene.animations.live_count(), 2);
    }

    #[test]
    fn play_monkey_rejects_other_objects_animations() {
        let mut scene = test_scene();
        assert!(!scene.play_monkey(AnimationKind::TurretFire));
        assert!(!scene.is_animating(SceneObject::Turret));
    }

    #[test]
    fn monkey_completion_restores_idle_still() {
        let mut scene = test_scene();
        scene.monkey.still_image = "something else".to_string();
        scene.play_monkey(AnimationKind::MonkeyHit);
        run_until_idle(&mut scene, SceneObject::Monkey);
        assert_eq!(scene.monkey.still_image, "sprites/MonkeyIdle_Player1/1.png");
    }

    #[test]
    fn hit_then_get_up_chains() {
        let mut scene = test_scene();
        assert!(scene.play_monkey_then(AnimationKind::MonkeyHit, AnimationKind::MonkeyGetUp));
        for _ in 0..3 {
            scene.update(FRAME_US);
        }
        assert!(scene.animations.live_of(AnimationKind::MonkeyHit).is_empty());
        assert_eq!(scene.animations.live_of(AnimationKind::MonkeyGetUp).len(), 1);
        run_until_idle(&mut scene, SceneObject::Monkey);
        assert!(scene.animations.live_of(AnimationKind::MonkeyGetUp).is_empty());
    }

    #[test]
    fn repeated_idle_loops_stack_until_reset() {
        let mut scene = test_scene();
        for _ in 0..3 {
            assert!(scene.play_monkey(AnimationKind::MonkeyIdle));
        }
        for _ in 0..10 {
            scene.update(FRAME_US);
        }
        assert_eq!(scene.animations.live_of(AnimationKind::MonkeyIdle).len(), 3);

        scene.reset_monkey();
        assert!(scene.animations.live_of(AnimationKind::MonkeyIdle).is_empty());
    }

    #[test]
    fn reset_monkey_drops_pending_follow_up() {
        let mut scene = test_scene();
        scene.play_monkey_then(AnimationKind::MonkeyHit, AnimationKind::MonkeyGetUp);
        scene.reset_monkey();
        for _ in 0..10 {
            scene.update(FRAME_US);
        }
        assert!(!scene.is_animating(SceneObject::Monkey));
    }

    #[test]
    fn pointer_aim_is_clamped() {
        let mut scene = test_scene();
        let center = scene.aim_slider.center;

        scene.set_aim_from_pointer(center + Vec2::new(10.0, -10.0));
        assert!((scene.aim.degrees() + 45.0).abs() < 1e-4);

        // Below the pivot is a positive angle, clamped to 0.
        scene.set_aim_from_pointer(center + Vec2::new(10.0, 5.0));
        assert_eq!(scene.aim.degrees(), 0.0);

        // Up and to the left is past -90.
        scene.set_aim_from_pointer(center + Vec2::new(-10.0, -10.0));
        assert_eq!(scene.aim.degrees(), -90.0);

        scene.reset_aim();
        assert_eq!(scene.aim.degrees(), 0.0);
    }

    #[test]
    fn slider_hit_requires_active_slider() {
        let mut scene = test_scene();
        let on_ring = scene.aim_slider.hit_area.center
            + Vec2::new(scene.aim_slider.hit_area.radius, 0.0);
        assert!(scene.slider_hit(on_ring));
        assert!(!scene.toggle_active_player());
        assert!(!scene.slider_hit(on_ring));
        assert_eq!(scene.aim_slider.image(), "sprites/AimSlider/2.png");
    }

    #[test]
    fn shipped_startup_takes_its_full_duration() {
        let mut scene = shipped_scene();
        scene.start_snowpile();
        // 46 frames at 60 ms, one frame advanced per tick that reaches 60 ms.
        for _ in 0..45 {
            scene.update(60_000);
        }
        assert!(scene.is_animating(SceneObject::Snowpile));
        scene.update(60_000);
        assert!(!scene.is_animating(SceneObject::Snowpile));
        assert_eq!(scene.snowpile.current_frame, 46);
        assert_eq!(scene.snowpile.still_image, "sprites/Snowpile_Player1/46.png");
    }
}
