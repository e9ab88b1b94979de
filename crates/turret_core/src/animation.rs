//! Frame-sequence animation templates and per-instance playback.
//!
//! A template is an immutable list of frame image keys played at a fixed
//! per-frame duration, either once or looping. An instance is one running
//! playback of a template at a screen position.
//!
//! Timing uses integer microseconds (`u64`). Each tick advances at most one
//! frame: once the elapsed time reaches the frame duration the index moves
//! forward by one and the elapsed counter resets to zero, so a long stall
//! never skips frames.
//!
//! The JSON format stores `frame_ms` for human readability; on load this is
//! converted to `frame_duration_us` for internal use.

use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Placeholder replaced by the frame number in frame path patterns.
pub const FRAME_PLACEHOLDER: &str = "{frame}";

/// Expand a frame path pattern such as `sprites/Snowpile/{frame}.png`.
pub fn frame_path(pattern: &str, frame: u32) -> String {
    pattern.replace(FRAME_PLACEHOLDER, &frame.to_string())
}

/// A named, immutable frame sequence.
#[derive(Debug, Clone)]
pub struct AnimationTemplate {
    pub frames: Vec<String>,
    pub frame_duration_us: u64,
    pub looping: bool,
}

impl AnimationTemplate {
    /// Duration of one full pass through the frames in microseconds.
    pub fn total_duration_us(&self) -> u64 {
        self.frame_duration_us.saturating_mul(self.frames.len() as u64)
    }

    pub fn last_frame(&self) -> Option<&str> {
        self.frames.last().map(String::as_str)
    }
}

/// Top-level template table file (deserialized from JSON).
#[derive(Debug, Clone)]
pub struct AnimationFile {
    pub version: String,
    pub animation_id: String,
    pub animations: HashMap<String, AnimationTemplate>,
}

/// What a single tick did to an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStep {
    /// Still accumulating time on the current frame.
    Holding,
    /// Moved to the next frame.
    Advanced,
    /// Ran off the end of a looping template and restarted at frame 0.
    Wrapped,
    /// Ran off the end of a one-shot template. The instance is spent.
    Finished,
}

/// Runtime playback state for one triggered animation.
#[derive(Debug, Clone)]
pub struct AnimationInstance {
    pub x: f32,
    pub y: f32,
    pub frame_index: usize,
    pub elapsed_us: u64,
    pub finished: bool,
}

impl AnimationInstance {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            frame_index: 0,
            elapsed_us: 0,
            finished: false,
        }
    }

    /// Advance by `dt_us` microseconds against `template`.
    pub fn tick(&mut self, dt_us: u64, template: &AnimationTemplate) -> FrameStep {
        if self.finished {
            return FrameStep::Finished;
        }
        if template.frames.is_empty() {
            self.finished = true;
            return FrameStep::Finished;
        }

        self.elapsed_us += dt_us;
        if self.elapsed_us < template.frame_duration_us {
            return FrameStep::Holding;
        }

        self.elapsed_us = 0;
        self.frame_index += 1;
        if self.frame_index < template.frames.len() {
            return FrameStep::Advanced;
        }

        if template.looping {
            self.frame_index = 0;
            FrameStep::Wrapped
        } else {
            // Left at frames.len() so a spent instance never maps to a frame.
            self.finished = true;
            FrameStep::Finished
        }
    }

    /// Image key of the frame currently showing, or `None` once finished.
    pub fn current_frame<'a>(&self, template: &'a AnimationTemplate) -> Option<&'a str> {
        if self.finished {
            return None;
        }
        template.frames.get(self.frame_index).map(String::as_str)
    }
}

// --- JSON deserialization types (private) ---

#[derive(Debug, Deserialize)]
struct AnimationFileJson {
    version: String,
    animation_id: String,
    animations: HashMap<String, AnimationTemplateJson>,
}

#[derive(Debug, Deserialize)]
struct AnimationTemplateJson {
    #[serde(default)]
    frames: Vec<String>,
    #[serde(default)]
    frame_range: Option<FrameRangeJson>,
    frame_ms: u64,
    #[serde(default)]
    looping: bool,
}

#[derive(Debug, Deserialize)]
struct FrameRangeJson {
    pattern: String,
    first: u32,
    last: u32,
}

/// Load a template table from disk.
pub fn load_animation_file(path: &Path) -> Result<AnimationFile, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read animation file {}: {e}", path.display()))?;
    parse_animation_file(&raw)
        .map_err(|e| format!("Animation file {}: {e}", path.display()))
}

/// Parse and validate a template table from a JSON string.
pub fn parse_animation_file(raw: &str) -> Result<AnimationFile, String> {
    let json: AnimationFileJson =
        serde_json::from_str(raw).map_err(|e| format!("Failed to parse animation JSON: {e}"))?;
    validate_animation_json(&json)?;

    let mut animations = HashMap::new();
    for (name, template_json) in json.animations {
        let mut frames = template_json.frames;
        if let Some(range) = &template_json.frame_range {
            frames.extend((range.first..=range.last).map(|n| frame_path(&range.pattern, n)));
        }
        animations.insert(
            name,
            AnimationTemplate {
                frames,
                frame_duration_us: template_json.frame_ms * 1000,
                looping: template_json.looping,
            },
        );
    }

    Ok(AnimationFile {
        version: json.version,
        animation_id: json.animation_id,
        animations,
    })
}

fn validate_animation_json(json: &AnimationFileJson) -> Result<(), String> {
    if json.version != "0.1" {
        return Err(format!(
            "Animation validation failed: unsupported version '{}'",
            json.version
        ));
    }
    if json.animation_id.is_empty() {
        return Err("Animation validation failed: animation_id is empty".to_string());
    }
    for (name, template) in &json.animations {
        if template.frame_ms == 0 {
            return Err(format!(
                "Animation validation failed: template '{}' has zero frame duration",
                name
            ));
        }
        if template.frame_ms.checked_mul(1000).is_none() {
            return Err(format!(
                "Animation validation failed: template '{}' frame_ms {} is out of range",
                name, template.frame_ms
            ));
        }
        if let Some(range) = &template.frame_range {
            if !range.pattern.contains(FRAME_PLACEHOLDER) {
                return Err(format!(
                    "Animation validation failed: template '{}' frame_range pattern lacks '{}'",
                    name, FRAME_PLACEHOLDER
                ));
            }
            if range.first > range.last {
                return Err(format!(
                    "Animation validation failed: template '{}' frame_range is reversed ({}..{})",
                    name, range.first, range.last
                ));
            }
        } else if template.frames.is_empty() {
            return Err(format!(
                "Animation validation failed: template '{}' has no frames",
                name
            ));
        }
        for (i, frame) in template.frames.iter().enumerate() {
            if frame.is_empty() {
                return Err(format!(
                    "Animation validation failed: template '{}' frame {} is empty",
                    name, i
                ));
            }
        }
    }
    Ok(())
}
