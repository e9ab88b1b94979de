use glam::Vec2;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use turret_core::input::Key;

use crate::bindings::{action_for, apply_action};
use crate::controller::AimDrag;
use crate::scene::SceneState;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayScript {
    #[serde(default = "default_frame_ms")]
    pub frame_ms: u64,
    pub steps: Vec<ReplayStep>,
}

/// One scripted input. A step may press a key, drag the pointer through a
/// list of logical points, or both; the scene then runs `wait_frames` frames.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplayStep {
    #[serde(default)]
    pub key: Option<Key>,
    #[serde(default)]
    pub drag: Vec<[f32; 2]>,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
    #[serde(default = "default_wait_frames")]
    pub wait_frames: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub accepted: u32,
    pub rejected: u32,
    pub frames: u32,
}

impl ReplayScript {
    /// Drive `scene` through every step in order.
    pub fn run(&self, scene: &mut SceneState) -> ReplayOutcome {
        let dt_us = self.frame_ms * 1000;
        let mut drag = AimDrag::new();
        let mut outcome = ReplayOutcome::default();

        for step in &self.steps {
            for _ in 0..step.repeat.max(1) {
                if let Some(action) = step.key.and_then(action_for) {
                    if apply_action(scene, action) {
                        outcome.accepted += 1;
                    } else {
                        outcome.rejected += 1;
                    }
                }
                if let Some((first, rest)) = step.drag.split_first() {
                    drag.pointer_down(scene, Vec2::from(*first));
                    for point in rest {
                        drag.pointer_move(scene, Vec2::from(*point));
                    }
                    drag.pointer_up();
                }
                for _ in 0..step.wait_frames {
                    scene.update(dt_us);
                    outcome.frames += 1;
                }
            }
        }
        outcome
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplayScript, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplayScript = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplayScript) -> Result<(), String> {
    if replay.frame_ms == 0 {
        return Err("Replay validation failed: frame_ms must be > 0".to_string());
    }
    if replay.steps.is_empty() {
        return Err("Replay validation failed: steps list is empty".to_string());
    }
    Ok(())
}

const fn default_frame_ms() -> u64 {
    16
}

const fn default_repeat() -> u32 {
    1
}

const fn default_wait_frames() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::SceneObject;
    use crate::scene::tests::{ready_scene, test_scene};
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "turret_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn load(name_hint: &str, json: &str) -> ReplayScript {
        let path = temp_file_path(name_hint);
        fs::write(&path, json).expect("write replay file");
        let replay = load_replay_from_path(&path).expect("replay should load");
        let _ = fs::remove_file(path);
        replay
    }

    #[test]
    fn replay_file_parses_with_defaults() {
        let replay = load(
            "parse",
            r#"{
              "steps": [
                { "key": "Space", "wait_frames": 5 },
                { "key": "Digit8" },
                { "drag": [[177.0, 371.0], [100.0, 300.0]], "repeat": 2 }
              ]
            }"#,
        );
        assert_eq!(replay.frame_ms, 16);
        assert_eq!(replay.steps[0].key, Some(Key::Space));
        assert_eq!(replay.steps[1].wait_frames, 1);
        assert_eq!(replay.steps[2].drag.len(), 2);
        assert_eq!(replay.steps[2].repeat, 2);
    }

    #[test]
    fn unknown_key_name_is_rejected() {
        let path = temp_file_path("badkey");
        fs::write(&path, r#"{ "steps": [{ "key": "Tab" }] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("unknown key should fail");
        assert!(err.contains("Failed to parse replay JSON"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn empty_script_is_rejected() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "frame_ms": 10, "steps": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty steps should fail");
        assert!(err.contains("steps list is empty"));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn scripted_session_fills_snowpile() {
        let replay = load(
            "fill",
            r#"{
              "frame_ms": 10,
              "steps": [
                { "key": "S", "repeat": 50, "wait_frames": 0 },
                { "wait_frames": 10 }
              ]
            }"#,
        );
        let mut scene = ready_scene();
        let outcome = replay.run(&mut scene);
        assert_eq!(outcome.accepted, 46);
        assert_eq!(outcome.rejected, 4);
        assert_eq!(scene.snowpile.current_frame, 92);
        assert!(!scene.is_animating(SceneObject::Monkey));
    }

    #[test]
    fn drag_step_aims_turret() {
        let replay = load(
            "drag",
            r#"{
              "frame_ms": 10,
              "steps": [
                { "drag": [[177.0, 371.0], [100.0, 300.0]] }
              ]
            }"#,
        );
        let mut scene = test_scene();
        // Script starts near enough to the ring to grab it.
        assert!(scene.slider_hit(Vec2::new(177.0, 371.0)));
        replay.run(&mut scene);
        assert!((scene.aim.degrees() + 90.0).abs() < 1e-4);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let replay = load(
            "deterministic",
            r#"{
              "frame_ms": 10,
              "steps": [
                { "key": "Space", "wait_frames": 2 },
                { "key": "I", "repeat": 5, "wait_frames": 4 },
                { "key": "Digit8", "wait_frames": 3 },
                { "key": "S", "repeat": 7, "wait_frames": 1 },
                { "drag": [[177.0, 371.0], [150.0, 330.0]] },
                { "key": "Space", "wait_frames": 1 },
                { "key": "R" },
                { "key": "Digit1", "wait_frames": 9 }
              ]
            }"#,
        );

        let mut run_a = ready_scene();
        let mut run_b = ready_scene();
        let outcome_a = replay.run(&mut run_a);
        let outcome_b = replay.run(&mut run_b);

        assert_eq!(outcome_a, outcome_b);
        assert_eq!(run_a.snowpile.current_frame, run_b.snowpile.current_frame);
        assert_eq!(run_a.icicle.y, run_b.icicle.y);
        assert_eq!(run_a.aim.degrees(), run_b.aim.degrees());
        assert_eq!(run_a.animations.live_count(), run_b.animations.live_count());
        assert_eq!(run_a.monkey.still_image, run_b.monkey.still_image);
        // R ran after the drops, so the icicle is back home.
        assert_eq!(run_a.icicle.y, 178.0);
    }
}
