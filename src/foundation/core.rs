use crate::foundation::error::{FxError, FxResult};

pub use kurbo::{Point, Rect, Size, Vec2};

/// Visible scene area in CSS pixels plus the device pixel density.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub device_pixel_ratio: f64, // default 1.0
}

impl Viewport {
    pub fn new(width: f64, height: f64, device_pixel_ratio: f64) -> FxResult<Self> {
        if !(width.is_finite() && height.is_finite()) || width < 0.0 || height < 0.0 {
            return Err(FxError::validation(
                "Viewport width/height must be finite and >= 0",
            ));
        }
        if !device_pixel_ratio.is_finite() || device_pixel_ratio <= 0.0 {
            return Err(FxError::validation("Viewport device_pixel_ratio must be > 0"));
        }
        Ok(Self {
            width,
            height,
            device_pixel_ratio,
        })
    }

    pub fn css_size(self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn device_size(self) -> (u32, u32) {
        device_size(self.css_size(), self.device_pixel_ratio)
    }

    pub fn min_side(self) -> f64 {
        self.width.min(self.height)
    }

    pub fn center(self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }

    /// Map a fractional anchor (0..1 on both axes) to CSS pixels.
    pub fn anchor(self, fx: f64, fy: f64) -> Point {
        Point::new(self.width * fx, self.height * fy)
    }
}

/// Round a CSS size scaled by `dpr` to whole device pixels.
pub fn device_size(css: Size, dpr: f64) -> (u32, u32) {
    let w = (css.width * dpr).round().max(0.0);
    let h = (css.height * dpr).round().max(0.0);
    (w as u32, h as u32)
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`.
    pub fn from_hex(hex: &str) -> FxResult<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(FxError::validation(format!("invalid hex color '{hex}'")));
        }
        let channel = |i: usize| -> FxResult<u8> {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| FxError::validation(format!("invalid hex color '{hex}'")))
        };
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::from_straight_rgba(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// 2D pose of an animated element: offset from its rest layout position,
/// rotation in degrees and per-axis scale around the element centre.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Transform2D {
    pub translate: Vec2,
    pub rotation_deg: f64,
    pub scale: Vec2, // default (1,1)
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            translate: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    pub fn uniform_scale(mut self, s: f64) -> Self {
        self.scale = Vec2::new(s, s);
        self
    }

    pub fn to_affine(self, center: Point) -> kurbo::Affine {
        let c = center.to_vec2();
        kurbo::Affine::translate(self.translate + c)
            * kurbo::Affine::rotate(crate::foundation::math::deg_to_rad(self.rotation_deg))
            * kurbo::Affine::scale_non_uniform(self.scale.x, self.scale.y)
            * kurbo::Affine::translate(-c)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
