//! Live animation instances grouped by category.
//!
//! Wraps the core `AnimationTemplate`/`AnimationInstance` types from
//! `turret_core::animation`. Each category owns an ordered list of running
//! instances and names the scene object it animates, so "is this object
//! animating" is answered from the live lists rather than a stored flag.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use turret_core::animation::{
    load_animation_file, AnimationFile, AnimationInstance, AnimationTemplate, FrameStep,
};

/// The fixed set of objects in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SceneObject {
    Turret,
    Monkey,
    Icicle,
    Snowpile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AnimationKind {
    IcicleShake,
    MonkeyIdle,
    MonkeyWin,
    MonkeyLose,
    MonkeyHit,
    MonkeyGetUp,
    MonkeyAddSnow,
    MonkeyAim,
    MonkeyFire,
    TurretFire,
    SnowpileStartup,
    SnowpileAdd,
}

impl AnimationKind {
    pub const ALL: [AnimationKind; 12] = [
        AnimationKind::IcicleShake,
        AnimationKind::MonkeyIdle,
        AnimationKind::MonkeyWin,
        AnimationKind::MonkeyLose,
        AnimationKind::MonkeyHit,
        AnimationKind::MonkeyGetUp,
        AnimationKind::MonkeyAddSnow,
        AnimationKind::MonkeyAim,
        AnimationKind::MonkeyFire,
        AnimationKind::TurretFire,
        AnimationKind::SnowpileStartup,
        AnimationKind::SnowpileAdd,
    ];

    /// Template name used in the animation table file.
    pub fn name(self) -> &'static str {
        match self {
            AnimationKind::IcicleShake => "IcicleShake",
            AnimationKind::MonkeyIdle => "MonkeyIdle",
            AnimationKind::MonkeyWin => "MonkeyWin",
            AnimationKind::MonkeyLose => "MonkeyLose",
            AnimationKind::MonkeyHit => "MonkeyHit",
            AnimationKind::MonkeyGetUp => "MonkeyGetUp",
            AnimationKind::MonkeyAddSnow => "MonkeyAddSnow",
            AnimationKind::MonkeyAim => "MonkeyAim",
            AnimationKind::MonkeyFire => "MonkeyFire",
            AnimationKind::TurretFire => "TurretFire",
            AnimationKind::SnowpileStartup => "SnowpileStartup",
            AnimationKind::SnowpileAdd => "SnowpileAdd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn target(self) -> SceneObject {
        match self {
            AnimationKind::IcicleShake => SceneObject::Icicle,
            AnimationKind::MonkeyIdle
            | AnimationKind::MonkeyWin
            | AnimationKind::MonkeyLose
            | AnimationKind::MonkeyHit
            | AnimationKind::MonkeyGetUp
            | AnimationKind::MonkeyAddSnow
            | AnimationKind::MonkeyAim
            | AnimationKind::MonkeyFire => SceneObject::Monkey,
            AnimationKind::TurretFire => SceneObject::Turret,
            AnimationKind::SnowpileStartup | AnimationKind::SnowpileAdd => SceneObject::Snowpile,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

#[derive(Debug, Clone)]
pub struct LiveAnimation {
    pub id: InstanceId,
    pub instance: AnimationInstance,
}

/// A one-shot instance that ran off its last frame during `advance`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub kind: AnimationKind,
    pub id: InstanceId,
    /// Animation registered to start when this one ends.
    pub follow_up: Option<AnimationKind>,
}

pub struct AnimationManager {
    templates: HashMap<AnimationKind, AnimationTemplate>,
    live: BTreeMap<AnimationKind, Vec<LiveAnimation>>,
    follow_ups: HashMap<InstanceId, AnimationKind>,
    next_id: u64,
}

impl AnimationManager {
    pub fn load(path: &Path) -> Result<Self, String> {
        let file = load_animation_file(path)?;
        Self::from_file(file).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Bind every template in `file` to its category. All categories must be present.
    pub fn from_file(file: AnimationFile) -> Result<Self, String> {
        let mut templates = HashMap::new();
        for (name, template) in file.animations {
            match AnimationKind::from_name(&name) {
                Some(kind) => {
                    templates.insert(kind, template);
                }
                None => log::warn!(
                    "Animation table '{}' defines unknown template '{}', ignoring",
                    file.animation_id,
                    name
                ),
            }
        }
        if let Some(missing) = AnimationKind::ALL
            .into_iter()
            .find(|kind| !templates.contains_key(kind))
        {
            return Err(format!(
                "animation table '{}' is missing template '{}'",
                file.animation_id,
                missing.name()
            ));
        }
        log::info!(
            "Loaded {} animation templates from '{}'",
            templates.len(),
            file.animation_id
        );
        Ok(Self::from_templates(templates))
    }

    pub fn from_templates(templates: HashMap<AnimationKind, AnimationTemplate>) -> Self {
        Self {
            templates,
            live: BTreeMap::new(),
            follow_ups: HashMap::new(),
            next_id: 0,
        }
    }

    pub fn template(&self, kind: AnimationKind) -> Option<&AnimationTemplate> {
        self.templates.get(&kind)
    }

    /// Every frame image key across all templates, deduplicated, in category order.
    pub fn frame_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::new();
        for kind in AnimationKind::ALL {
            if let Some(template) = self.templates.get(&kind) {
                for frame in &template.frames {
                    if !keys.contains(frame) {
                        keys.push(frame.clone());
                    }
                }
            }
        }
        keys
    }

    /// Start a new instance of `kind` at `(x, y)`. Siblings already playing are untouched.
    pub fn trigger(&mut self, kind: AnimationKind, x: f32, y: f32) -> Option<InstanceId> {
        if !self.templates.contains_key(&kind) {
            log::warn!("No template for animation '{}'", kind.name());
            return None;
        }
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.live.entry(kind).or_default().push(LiveAnimation {
            id,
            instance: AnimationInstance::new(x, y),
        });
        log::debug!("Triggered {} at ({}, {})", kind.name(), x, y);
        Some(id)
    }

    /// Like `trigger`, but `follow_up` is reported in the completion event of this instance.
    pub fn trigger_then(
        &mut self,
        kind: AnimationKind,
        x: f32,
        y: f32,
        follow_up: AnimationKind,
    ) -> Option<InstanceId> {
        let id = self.trigger(kind, x, y)?;
        self.follow_ups.insert(id, follow_up);
        Some(id)
    }

    /// Tick every live instance by `dt_us` and drop the ones that finished.
    pub fn advance(&mut self, dt_us: u64) -> Vec<Completion> {
        let Self {
            templates,
            live,
            follow_ups,
            ..
        } = self;
        let mut completions = Vec::new();

        for (kind, list) in live.iter_mut() {
            let Some(template) = templates.get(kind) else {
                continue;
            };
            list.retain_mut(|entry| {
                if entry.instance.tick(dt_us, template) != FrameStep::Finished {
                    return true;
                }
                completions.push(Completion {
                    kind: *kind,
                    id: entry.id,
                    follow_up: follow_ups.remove(&entry.id),
                });
                false
            });
        }
        live.retain(|_, list| !list.is_empty());
        completions
    }

    pub fn is_animating(&self, object: SceneObject) -> bool {
        self.live
            .iter()
            .any(|(kind, list)| kind.target() == object && !list.is_empty())
    }

    /// Drop every instance animating `object`, including pending follow-ups.
    pub fn retire_target(&mut self, object: SceneObject) -> usize {
        let mut retired = 0;
        let follow_ups = &mut self.follow_ups;
        self.live.retain(|kind, list| {
            if kind.target() != object {
                return true;
            }
            for live in list.iter() {
                follow_ups.remove(&live.id);
            }
            retired += list.len();
            false
        });
        retired
    }

    /// Live instances in category order, oldest first within a category.
    pub fn iter_live(&self) -> impl Iterator<Item = (AnimationKind, &LiveAnimation)> {
        self.live
            .iter()
            .flat_map(|(kind, list)| list.iter().map(move |live| (*kind, live)))
    }

    pub fn live_of(&self, kind: AnimationKind) -> &[LiveAnimation] {
        self.live.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn current_frame(&self, kind: AnimationKind, live: &LiveAnimation) -> Option<&str> {
        self.templates
            .get(&kind)
            .and_then(|template| live.instance.current_frame(template))
    }

    pub fn live_count(&self) -> usize {
        self.live.values().map(Vec::len).sum()
    }
}
