//! Colors and the model-driven color ramps used to paint the planet.

/// 8-bit RGB triple.
pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];
pub const WHITE: Rgb = [255, 255, 255];
pub const GREEN: Rgb = [34, 139, 34];
pub const LIGHT_GREEN: Rgb = [144, 238, 144];
pub const SANDY: Rgb = [205, 133, 63];
pub const BROWN: Rgb = [139, 69, 19];
pub const WATER: Rgb = [70, 130, 180];

/// Alpha of a cloud puff.
pub const CLOUD_ALPHA: u8 = 60;

/// Linear blend from `a` to `b`; `t` is clamped to [0, 1].
pub fn lerp_rgb(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let mut out = [0u8; 3];
    for i in 0..3 {
        let v = f64::from(a[i]) * (1.0 - t) + f64::from(b[i]) * t;
        out[i] = v.clamp(0.0, 255.0) as u8;
    }
    out
}

/// Source-over composite of `src` with opacity `alpha` onto `dst`.
pub fn blend(dst: Rgb, src: Rgb, alpha: u8) -> Rgb {
    lerp_rgb(dst, src, f64::from(alpha) / 255.0)
}

/// Greenness from plant density: ramps up to 50, full through 100, gone by 150.
pub fn plant_factor(plant_density: f64) -> f64 {
    let f = if plant_density < 50.0 {
        plant_density / 50.0
    } else if plant_density > 100.0 {
        1.0 - (plant_density - 100.0) / 50.0
    } else {
        1.0
    };
    f.clamp(0.0, 1.0)
}

/// Wetness from rainfall area: none below 80 000, full at 90 000, gone by 100 000.
pub fn rain_factor(rainfall: f64) -> f64 {
    let f = if rainfall < 80_000.0 {
        0.0
    } else if rainfall > 90_000.0 {
        1.0 - (rainfall - 90_000.0) / 10_000.0
    } else {
        (rainfall - 80_000.0) / 10_000.0
    };
    f.clamp(0.0, 1.0)
}

/// Terrain color for a noise sample.
///
/// Lowlands (`noise < -0.1`) go brown → green with plant density, coasts
/// (`noise < 0`) sandy → light green with rainfall, everything else brown →
/// water with rainfall.
pub fn terrain_color(noise: f32, rainfall: f64, plant_density: f64) -> Rgb {
    if noise < -0.1 {
        lerp_rgb(BROWN, GREEN, plant_factor(plant_density))
    } else if noise < 0.0 {
        lerp_rgb(SANDY, LIGHT_GREEN, rain_factor(rainfall))
    } else {
        lerp_rgb(BROWN, WATER, rain_factor(rainfall))
    }
}

/// Opacity of the dark overlay on the planet disc; brighter suns shade less.
pub fn shading_alpha(solar_intensity: f64) -> u8 {
    match solar_intensity {
        s if s < 20.0 => 180,
        s if s < 40.0 => 100,
        s if s < 60.0 => 70,
        s if s < 80.0 => 60,
        _ => 30,
    }
}

/// Atmosphere glow color and peak opacity for an aggregate stability index.
pub fn glow_rgba(asi: f64) -> [u8; 4] {
    let asi = if asi.is_nan() { 0.0 } else { asi.max(0.0) };
    let channel = (240.0 + (asi * 0.3).trunc()).min(255.0) as u8;
    let alpha = (100.0 + (asi * 1.55).trunc()).min(255.0) as u8;
    [channel, channel, channel, alpha]
}

/// Fraction of a 0-100 bar filled by `value`.
pub fn bar_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        (value / 100.0).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_endpoints() {
        assert_eq!(lerp_rgb(BROWN, GREEN, 0.0), BROWN);
        assert_eq!(lerp_rgb(BROWN, GREEN, 1.0), GREEN);
        assert_eq!(lerp_rgb(BROWN, GREEN, 7.0), GREEN);
        assert_eq!(lerp_rgb(BLACK, WHITE, 0.5), [127, 127, 127]);
    }

    #[test]
    fn test_plant_factor_ramps() {
        assert_eq!(plant_factor(0.0), 0.0);
        assert_eq!(plant_factor(25.0), 0.5);
        assert_eq!(plant_factor(75.0), 1.0);
        assert_eq!(plant_factor(125.0), 0.5);
        assert_eq!(plant_factor(500.0), 0.0);
        assert_eq!(plant_factor(-10.0), 0.0);
    }

    #[test]
    fn test_rain_factor_ramps() {
        assert_eq!(rain_factor(6_911.5), 0.0);
        assert_eq!(rain_factor(85_000.0), 0.5);
        assert_eq!(rain_factor(90_000.0), 1.0);
        assert_eq!(rain_factor(95_000.0), 0.5);
        assert_eq!(rain_factor(1_256_637.06), 0.0);
    }

    #[test]
    fn test_terrain_bands() {
        assert_eq!(terrain_color(-0.5, 0.0, 75.0), GREEN);
        assert_eq!(terrain_color(-0.05, 0.0, 75.0), SANDY);
        assert_eq!(terrain_color(0.3, 90_000.0, 0.0), WATER);
        assert_eq!(terrain_color(0.3, 0.0, 0.0), BROWN);
    }

    #[test]
    fn test_shading_bands() {
        assert_eq!(shading_alpha(0.0), 180);
        assert_eq!(shading_alpha(20.0), 100);
        assert_eq!(shading_alpha(59.9), 70);
        assert_eq!(shading_alpha(60.0), 60);
        assert_eq!(shading_alpha(100.0), 30);
    }

    #[test]
    fn test_glow_saturates() {
        assert_eq!(glow_rgba(0.0), [240, 240, 240, 100]);
        assert_eq!(glow_rgba(10.0), [243, 243, 243, 115]);
        assert_eq!(glow_rgba(3_591.08), [255, 255, 255, 255]);
    }

    #[test]
    fn test_blend_extremes() {
        assert_eq!(blend(BLACK, WHITE, 255), WHITE);
        assert_eq!(blend(GREEN, WHITE, 0), GREEN);
    }

    #[test]
    fn test_bar_fraction_clamps() {
        assert_eq!(bar_fraction(50.0), 0.5);
        assert_eq!(bar_fraction(3_437.0), 1.0);
        assert_eq!(bar_fraction(-1.0), 0.0);
        assert_eq!(bar_fraction(f64::NAN), 0.0);
    }
}
