//! Draw-list building.
//!
//! Turns the scene into an ordered list of quads in logical coordinates. No
//! GPU types are involved here, so layer order and visibility rules can be
//! tested directly; the wgpu side in `main.rs` only batches and submits.

use turret_render::{clear_color_from_srgb, Pivot, SpriteQuad};

use crate::animation::{AnimationKind, SceneObject};
use crate::layout::{Placement, SceneLayout};
use crate::scene::SceneState;
use crate::sprites::{Drawable, SpriteRegistry};

const WHITE: [f32; 4] = [1.0; 4];

#[derive(Debug, Clone, PartialEq)]
pub enum Fill {
    /// Textured with the sprite stored under this key.
    Image(String),
    /// Flat color (linear RGBA in the quad's color).
    Solid,
}

/// Scissor region in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub fill: Fill,
    pub quad: SpriteQuad,
    pub clip: Option<ClipRect>,
}

impl DrawItem {
    pub fn image_key(&self) -> Option<&str> {
        match &self.fill {
            Fill::Image(key) => Some(key),
            Fill::Solid => None,
        }
    }
}

struct FrameBuilder<'a, T> {
    sprites: &'a SpriteRegistry<T>,
    sprite_scale: f32,
    items: Vec<DrawItem>,
}

impl<T: Drawable> FrameBuilder<'_, T> {
    /// Queue `key` at (x, y). Skipped when the image is not loaded.
    fn image(
        &mut self,
        key: &str,
        x: f32,
        y: f32,
        pivot: Option<Pivot>,
        flip_x: bool,
        clip: Option<ClipRect>,
    ) {
        let Some(sprite) = self.sprites.get(key) else {
            return;
        };
        let (w, h) = sprite.size_px();
        self.items.push(DrawItem {
            fill: Fill::Image(key.to_string()),
            quad: SpriteQuad {
                x,
                y,
                width: w as f32 * self.sprite_scale,
                height: h as f32 * self.sprite_scale,
                pivot,
                flip_x,
                color: WHITE,
            },
            clip,
        });
    }

    fn placement(&mut self, placement: &Placement) {
        self.image(&placement.image, placement.x, placement.y, None, false, None);
    }

    fn solid(&mut self, x: f32, y: f32, width: f32, height: f32, color: [f32; 4]) {
        self.items.push(DrawItem {
            fill: Fill::Solid,
            quad: SpriteQuad {
                x,
                y,
                width,
                height,
                pivot: None,
                flip_x: false,
                color,
            },
            clip: None,
        });
    }
}

fn linear_sky(layout: &SceneLayout) -> [f32; 4] {
    let c = clear_color_from_srgb(layout.sky_rgb());
    [c.r as f32, c.g as f32, c.b as f32, 1.0]
}

/// Build this frame's draw list, back to front.
pub fn build_frame<T: Drawable>(
    scene: &SceneState,
    layout: &SceneLayout,
    sprites: &SpriteRegistry<T>,
) -> Vec<DrawItem> {
    let mut frame = FrameBuilder {
        sprites,
        sprite_scale: layout.sprite_scale,
        items: Vec::new(),
    };
    let anims = &scene.animations;
    let (width, height) = (layout.logical_width, layout.logical_height);

    frame.solid(0.0, 0.0, width, height, linear_sky(layout));
    frame.placement(&layout.background);

    let guide = &scene.aim_guide;
    if guide.visible {
        frame.image(&guide.still_image, guide.x, guide.y, None, guide.mirrored, None);
    }

    if !scene.is_animating(SceneObject::Icicle) {
        let icicle = &scene.icicle;
        frame.image(&icicle.still_image, icicle.x, icicle.y, None, false, None);
    }

    frame.placement(&layout.floor_ceiling);

    let snow_clip = Some(ClipRect {
        x: 0.0,
        y: 0.0,
        width,
        height: layout.snowpile.clip_bottom,
    });
    for kind in [AnimationKind::SnowpileStartup, AnimationKind::SnowpileAdd] {
        for live in anims.live_of(kind) {
            if let Some(key) = anims.current_frame(kind, live) {
                frame.image(key, live.instance.x, live.instance.y, None, false, snow_clip);
            }
        }
    }
    if !scene.is_animating(SceneObject::Snowpile) {
        let pile = &scene.snowpile;
        frame.image(&pile.still_image, pile.x, pile.y, None, false, snow_clip);
    }

    let turret_pivot = Some(Pivot {
        center: scene.turret.center,
        radians: scene.aim.turret_radians(),
    });
    if !scene.is_animating(SceneObject::Turret) {
        let turret = &scene.turret;
        frame.image(&turret.still_image, turret.x, turret.y, turret_pivot, false, None);
    }

    for (kind, live) in anims.iter_live() {
        if kind.target() == SceneObject::Snowpile {
            continue;
        }
        let Some(key) = anims.current_frame(kind, live) else {
            continue;
        };
        let pivot = if kind == AnimationKind::TurretFire {
            turret_pivot
        } else {
            None
        };
        frame.image(key, live.instance.x, live.instance.y, pivot, false, None);
    }

    frame.placement(&layout.floor_detail);

    let slider = &scene.aim_slider;
    frame.image(
        slider.image(),
        slider.x,
        slider.y,
        Some(Pivot {
            center: slider.center,
            radians: scene.aim.slider_radians(),
        }),
        false,
        None,
    );

    if !scene.is_animating(SceneObject::Monkey) {
        let monkey = &scene.monkey;
        frame.image(&monkey.still_image, monkey.x, monkey.y, None, false, None);
    }

    if scene.show_grid {
        grid_lines(&mut frame, width, height, layout.grid.spacing, layout.grid.color);
    }

    frame.items
}

fn grid_lines<T: Drawable>(
    frame: &mut FrameBuilder<'_, T>,
    width: f32,
    height: f32,
    spacing: f32,
    color: [f32; 4],
) {
    if spacing <= 0.0 {
        return;
    }
    let mut x = 0.0;
    while x <= width {
        frame.solid(x, 0.0, 1.0, height, color);
        x += spacing;
    }
    let mut y = 0.0;
    while y <= height {
        frame.solid(0.0, y, width, 1.0, color);
        y += spacing;
    }
}
