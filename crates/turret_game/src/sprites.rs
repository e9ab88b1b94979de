//! Per-key image load tracking.
//!
//! Every still image and animation frame is requested up front by its key
//! (the asset-relative path). Keys move from `Loading` to either `Ready` or
//! `Failed` exactly once; a failed key stays failed for the session and any
//! draw that references it is skipped.

use std::collections::HashMap;

/// Anything the draw-list builder can size a quad from.
pub trait Drawable {
    fn size_px(&self) -> (u32, u32);
}

#[derive(Debug)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadCounts {
    pub ready: usize,
    pub pending: usize,
    pub failed: usize,
}

impl LoadCounts {
    pub fn total(&self) -> usize {
        self.ready + self.pending + self.failed
    }
}

pub struct SpriteRegistry<T> {
    entries: HashMap<String, LoadState<T>>,
    counts: LoadCounts,
}

impl<T> SpriteRegistry<T> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
            counts: LoadCounts::default(),
        }
    }

    /// Register `key` as loading. Returns false if it was already known.
    pub fn request(&mut self, key: &str) -> bool {
        if self.entries.contains_key(key) {
            return false;
        }
        self.entries.insert(key.to_string(), LoadState::Loading);
        self.counts.pending += 1;
        true
    }

    pub fn mark_ready(&mut self, key: &str, resource: T) {
        if !self.settle(key) {
            return;
        }
        self.entries.insert(key.to_string(), LoadState::Ready(resource));
        self.counts.ready += 1;

        let total = self.counts.total();
        let percent = self.counts.ready * 100 / total.max(1);
        if self.counts.ready % 10 == 0 || percent >= 90 {
            log::info!(
                "Sprite loading progress: {}/{} ({}%)",
                self.counts.ready,
                total,
                percent
            );
        }
    }

    pub fn mark_failed(&mut self, key: &str, reason: String) {
        if !self.settle(key) {
            return;
        }
        log::error!("Failed to load sprite '{}': {}", key, reason);
        self.entries.insert(key.to_string(), LoadState::Failed);
        self.counts.failed += 1;
    }

    /// Take `key` out of the pending count. Settled or unknown keys are left alone.
    fn settle(&mut self, key: &str) -> bool {
        match self.entries.get(key) {
            Some(LoadState::Loading) => {
                self.counts.pending -= 1;
                true
            }
            Some(_) => {
                log::warn!("Sprite '{}' reported twice, ignoring", key);
                false
            }
            None => {
                log::warn!("Sprite '{}' was never requested, ignoring", key);
                false
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        match self.entries.get(key) {
            Some(LoadState::Ready(resource)) => Some(resource),
            _ => None,
        }
    }

    pub fn counts(&self) -> LoadCounts {
        self.counts
    }
}

impl<T> Default for SpriteRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}
