//! Keyboard bindings for scene actions.

use turret_core::input::Key;

use crate::animation::AnimationKind;
use crate::scene::SceneState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    FireTurret,
    ResetIcicle,
    ResetMonkey,
    AddSnow,
    ToggleActivePlayer,
    DropIcicle,
    /// Start a monkey animation. `gated` animations wait for an idle monkey.
    Monkey { kind: AnimationKind, gated: bool },
    MonkeyHitThenGetUp,
    ToggleGrid,
}

/// Scene action bound to `key`, if any. App-level keys (F3, Escape) are not
/// scene actions and map to `None`.
pub fn action_for(key: Key) -> Option<Action> {
    let monkey = |kind, gated| Some(Action::Monkey { kind, gated });
    match key {
        Key::Space => Some(Action::FireTurret),
        Key::R => Some(Action::ResetIcicle),
        Key::M => Some(Action::ResetMonkey),
        Key::S => Some(Action::AddSnow),
        Key::T => Some(Action::ToggleActivePlayer),
        Key::I => Some(Action::DropIcicle),
        Key::G => Some(Action::ToggleGrid),
        Key::Digit1 => monkey(AnimationKind::MonkeyIdle, false),
        Key::Digit2 => monkey(AnimationKind::MonkeyWin, true),
        Key::Digit3 => monkey(AnimationKind::MonkeyLose, true),
        Key::Digit4 => monkey(AnimationKind::MonkeyHit, true),
        Key::Digit5 => monkey(AnimationKind::MonkeyGetUp, true),
        Key::Digit6 => monkey(AnimationKind::MonkeyAim, true),
        Key::Digit7 => monkey(AnimationKind::MonkeyFire, true),
        Key::Digit8 => Some(Action::MonkeyHitThenGetUp),
        Key::Escape | Key::F3 => None,
    }
}

/// Run `action` against the scene. Returns whether it was accepted.
pub fn apply_action(scene: &mut SceneState, action: Action) -> bool {
    match action {
        Action::FireTurret => scene.fire_turret(),
        Action::ResetIcicle => {
            scene.reset_icicle();
            true
        }
        Action::ResetMonkey => {
            scene.reset_monkey();
            true
        }
        Action::AddSnow => scene.add_snow(),
        Action::ToggleActivePlayer => {
            scene.toggle_active_player();
            true
        }
        Action::DropIcicle => scene.drop_icicle(),
        Action::Monkey { kind, gated: true } => scene.play_monkey_if_idle(kind),
        Action::Monkey { kind, gated: false } => scene.play_monkey(kind),
        Action::MonkeyHitThenGetUp => {
            scene.play_monkey_then(AnimationKind::MonkeyHit, AnimationKind::MonkeyGetUp)
        }
        Action::ToggleGrid => {
            scene.toggle_grid();
            true
        }
    }
}
