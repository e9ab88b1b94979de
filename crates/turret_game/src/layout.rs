use serde::Deserialize;
use std::fs;
use std::path::Path;

use turret_core::animation::{frame_path, FRAME_PLACEHOLDER};

/// Static placement and imagery for every scene object.
///
/// Every field has a default matching the shipped art, so a layout file only
/// needs to list what it changes.
#[derive(Debug, Deserialize, Clone)]
pub struct SceneLayout {
    pub version: String,
    #[serde(default = "default_logical_width")]
    pub logical_width: f32,
    #[serde(default = "default_logical_height")]
    pub logical_height: f32,
    #[serde(default = "default_view_scale")]
    pub view_scale: f32,
    /// Logical units per image pixel.
    #[serde(default = "default_sprite_scale")]
    pub sprite_scale: f32,
    #[serde(default = "default_sky_color")]
    pub sky_color: String,
    /// Directory every image key is resolved against.
    #[serde(default = "default_asset_root")]
    pub asset_root: String,
    #[serde(default)]
    pub background: Placement,
    #[serde(default = "default_floor_ceiling")]
    pub floor_ceiling: Placement,
    #[serde(default = "default_floor_detail")]
    pub floor_detail: Placement,
    #[serde(default)]
    pub aim_guide: AimGuideLayout,
    #[serde(default)]
    pub icicle: IcicleLayout,
    #[serde(default)]
    pub turret: TurretLayout,
    #[serde(default)]
    pub aim_slider: AimSliderLayout,
    #[serde(default)]
    pub monkey: MonkeyLayout,
    #[serde(default)]
    pub snowpile: SnowpileLayout,
    #[serde(default)]
    pub grid: GridLayout,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Placement {
    pub image: String,
    pub x: f32,
    pub y: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            image: "sprites/Background/Background.png".to_string(),
            x: 0.0,
            y: 0.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AimGuideLayout {
    pub image: String,
    pub x: f32,
    pub y: f32,
    pub visible: bool,
    pub mirrored: bool,
}

impl Default for AimGuideLayout {
    fn default() -> Self {
        Self {
            image: "sprites/AimGuide_Player2/1.png".to_string(),
            x: 98.0,
            y: 300.0,
            visible: true,
            mirrored: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct IcicleLayout {
    pub image: String,
    pub x: f32,
    pub y: f32,
    pub max_fall_distance: f32,
    /// Number of `I` presses needed to reach the full fall distance.
    pub drops: u32,
}

impl Default for IcicleLayout {
    fn default() -> Self {
        Self {
            image: "sprites/Icicle Shake/1.png".to_string(),
            x: 264.0,
            y: 178.0,
            max_fall_distance: 122.0,
            drops: 16,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TurretLayout {
    pub image: String,
    pub x: f32,
    pub y: f32,
    pub center_x: f32,
    pub center_y: f32,
}

impl Default for TurretLayout {
    fn default() -> Self {
        Self {
            image: "sprites/TurretExtension_Player1/1.png".to_string(),
            x: 94.0,
            y: 349.0,
            center_x: 101.0,
            center_y: 379.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AimSliderLayout {
    pub active_image: String,
    pub inactive_image: String,
    pub x: f32,
    pub y: f32,
    pub center_x: f32,
    pub center_y: f32,
    pub hit_offset_x: f32,
    pub hit_offset_y: f32,
    pub hit_tolerance: f32,
    pub active: bool,
}

impl Default for AimSliderLayout {
    fn default() -> Self {
        Self {
            active_image: "sprites/AimSlider/1.png".to_string(),
            inactive_image: "sprites/AimSlider/2.png".to_string(),
            x: 167.0,
            y: 370.0,
            center_x: 100.0,
            center_y: 379.0,
            hit_offset_x: 10.0,
            hit_offset_y: -8.0,
            hit_tolerance: 10.0,
            active: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MonkeyLayout {
    pub idle_image: String,
    pub x: f32,
    pub y: f32,
    pub origin_x: f32,
    pub origin_y: f32,
}

impl Default for MonkeyLayout {
    fn default() -> Self {
        Self {
            idle_image: "sprites/MonkeyIdle_Player1/1.png".to_string(),
            x: -5.0,
            y: 292.0,
            origin_x: -4.0,
            origin_y: 292.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SnowpileLayout {
    /// Image key pattern with a `{frame}` placeholder.
    pub frame_pattern: String,
    pub x: f32,
    pub y: f32,
    pub max_startup_frame: u32,
    pub max_add_frame: u32,
    /// Snowpile sprites are clipped to `y < clip_bottom`.
    pub clip_bottom: f32,
}

impl Default for SnowpileLayout {
    fn default() -> Self {
        Self {
            frame_pattern: "sprites/Snowpile_Player1/{frame}.png".to_string(),
            x: -32.0,
            y: -42.0,
            max_startup_frame: 46,
            max_add_frame: 92,
            clip_bottom: 385.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GridLayout {
    pub visible: bool,
    pub spacing: f32,
    /// Straight (non-premultiplied) RGBA.
    pub color: [f32; 4],
}

impl Default for GridLayout {
    fn default() -> Self {
        Self {
            visible: true,
            spacing: 50.0,
            color: [0.0, 0.0, 0.0, 0.2],
        }
    }
}

impl Default for SceneLayout {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            logical_width: default_logical_width(),
            logical_height: default_logical_height(),
            view_scale: default_view_scale(),
            sprite_scale: default_sprite_scale(),
            sky_color: default_sky_color(),
            asset_root: default_asset_root(),
            background: Placement::default(),
            floor_ceiling: default_floor_ceiling(),
            floor_detail: default_floor_detail(),
            aim_guide: AimGuideLayout::default(),
            icicle: IcicleLayout::default(),
            turret: TurretLayout::default(),
            aim_slider: AimSliderLayout::default(),
            monkey: MonkeyLayout::default(),
            snowpile: SnowpileLayout::default(),
            grid: GridLayout::default(),
        }
    }
}

impl SceneLayout {
    /// Sky color as `0xRRGGBB`. Only valid after `validate_layout` passed.
    pub fn sky_rgb(&self) -> u32 {
        parse_hex_color(&self.sky_color).unwrap_or(0x87CEEB)
    }

    pub fn snowpile_frame_key(&self, frame: u32) -> String {
        frame_path(&self.snowpile.frame_pattern, frame)
    }

    /// Every still image the scene can show, in draw order where it has one.
    pub fn still_image_keys(&self) -> Vec<String> {
        let mut keys = vec![
            self.background.image.clone(),
            self.aim_guide.image.clone(),
            self.icicle.image.clone(),
            self.floor_ceiling.image.clone(),
            self.turret.image.clone(),
            self.floor_detail.image.clone(),
            self.aim_slider.active_image.clone(),
            self.aim_slider.inactive_image.clone(),
            self.monkey.idle_image.clone(),
        ];
        keys.extend((1..=self.snowpile.max_add_frame).map(|n| self.snowpile_frame_key(n)));
        keys
    }
}

pub fn load_layout_from_path(path: &Path) -> Result<SceneLayout, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read layout file {}: {e}", path.display()))?;
    let layout: SceneLayout = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse layout JSON {}: {e}", path.display()))?;
    validate_layout(&layout)?;
    Ok(layout)
}

/// Load `path`, or fall back to the built-in layout when the file is absent.
/// A file that exists but does not parse or validate is still an error.
pub fn load_layout_or_default(path: &Path) -> Result<SceneLayout, String> {
    if !path.exists() {
        log::warn!(
            "Layout file '{}' not found, using built-in layout",
            path.display()
        );
        return Ok(SceneLayout::default());
    }
    load_layout_from_path(path)
}

fn validate_layout(layout: &SceneLayout) -> Result<(), String> {
    if layout.version != "0.1" {
        return Err(format!(
            "Layout validation failed: unsupported version '{}'",
            layout.version
        ));
    }
    if layout.logical_width <= 0.0 || layout.logical_height <= 0.0 {
        return Err("Layout validation failed: logical size must be positive".to_string());
    }
    if layout.view_scale <= 0.0 || layout.sprite_scale <= 0.0 {
        return Err("Layout validation failed: scales must be positive".to_string());
    }
    if parse_hex_color(&layout.sky_color).is_none() {
        return Err(format!(
            "Layout validation failed: sky_color '{}' is not #RRGGBB",
            layout.sky_color
        ));
    }

    let snowpile = &layout.snowpile;
    if !snowpile.frame_pattern.contains(FRAME_PLACEHOLDER) {
        return Err(format!(
            "Layout validation failed: snowpile frame_pattern lacks '{}'",
            FRAME_PLACEHOLDER
        ));
    }
    if snowpile.max_startup_frame == 0 || snowpile.max_startup_frame > snowpile.max_add_frame {
        return Err(format!(
            "Layout validation failed: snowpile frames need 1 <= max_startup_frame ({}) <= max_add_frame ({})",
            snowpile.max_startup_frame, snowpile.max_add_frame
        ));
    }
    if snowpile.clip_bottom <= 0.0 || snowpile.clip_bottom > layout.logical_height {
        return Err(format!(
            "Layout validation failed: snowpile clip_bottom {} is outside the scene",
            snowpile.clip_bottom
        ));
    }

    if layout.icicle.drops == 0 || layout.icicle.max_fall_distance < 0.0 {
        return Err("Layout validation failed: icicle needs drops > 0 and a non-negative fall".to_string());
    }
    if layout.aim_slider.hit_tolerance <= 0.0 {
        return Err("Layout validation failed: aim_slider hit_tolerance must be positive".to_string());
    }
    if layout.grid.spacing <= 0.0 {
        return Err("Layout validation failed: grid spacing must be positive".to_string());
    }

    for (field, key) in [
        ("background", &layout.background.image),
        ("floor_ceiling", &layout.floor_ceiling.image),
        ("floor_detail", &layout.floor_detail.image),
        ("aim_guide", &layout.aim_guide.image),
        ("icicle", &layout.icicle.image),
        ("turret", &layout.turret.image),
        ("aim_slider.active_image", &layout.aim_slider.active_image),
        ("aim_slider.inactive_image", &layout.aim_slider.inactive_image),
        ("monkey", &layout.monkey.idle_image),
    ] {
        if key.is_empty() {
            return Err(format!("Layout validation failed: {field} image is empty"));
        }
    }

    Ok(())
}

fn parse_hex_color(raw: &str) -> Option<u32> {
    let hex = raw.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}

const fn default_logical_width() -> f32 {
    600.0
}

const fn default_logical_height() -> f32 {
    400.0
}

const fn default_view_scale() -> f32 {
    2.0
}

const fn default_sprite_scale() -> f32 {
    1.0
}

fn default_sky_color() -> String {
    "#87CEEB".to_string()
}

fn default_asset_root() -> String {
    "assets".to_string()
}

fn default_floor_ceiling() -> Placement {
    Placement {
        image: "sprites/FloorAndCeiling/1.png".to_string(),
        x: 0.0,
        y: -50.0,
    }
}

fn default_floor_detail() -> Placement {
    Placement {
        image: "sprites/FloorAndCeiling/574.png".to_string(),
        x: 248.0,
        y: 374.5,
    }
}
