use glam::Vec3;

/// sRGB hex (0xRRGGBB) to linear RGB, ready for a linear-space shader.
pub fn hex(rgb: u32) -> Vec3 {
    let r = ((rgb >> 16) & 0xff) as f32 / 255.0;
    let g = ((rgb >> 8) & 0xff) as f32 / 255.0;
    let b = (rgb & 0xff) as f32 / 255.0;
    Vec3::new(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
}

#[inline]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// HSL (all components in [0, 1], hue wraps) to linear RGB.
pub fn hsl(h: f32, s: f32, l: f32) -> Vec3 {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);
    if s == 0.0 {
        return Vec3::splat(srgb_to_linear(l));
    }
    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    Vec3::new(
        srgb_to_linear(hue_to_channel(p, q, h + 1.0 / 3.0)),
        srgb_to_linear(hue_to_channel(p, q, h)),
        srgb_to_linear(hue_to_channel(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_extremes() {
        assert_eq!(hex(0x000000), Vec3::ZERO);
        assert!((hex(0xffffff) - Vec3::ONE).abs().max_element() < 1e-6);
    }

    #[test]
    fn hsl_primaries() {
        assert!((hsl(0.0, 1.0, 0.5) - Vec3::X).abs().max_element() < 1e-5);
        assert!((hsl(1.0 / 3.0, 1.0, 0.5) - Vec3::Y).abs().max_element() < 1e-5);
        assert!((hsl(2.0 / 3.0, 1.0, 0.5) - Vec3::Z).abs().max_element() < 1e-5);
    }

    #[test]
    fn hue_wraps() {
        assert!((hsl(1.25, 0.8, 0.7) - hsl(0.25, 0.8, 0.7)).abs().max_element() < 1e-5);
    }
}
