//! Colors for materials, lights and grid lines
//!
//! Colors are authored as 24-bit sRGB hex values and stored linear,
//! which is what the shaders expect when writing to an sRGB surface.

/// RGBA color with floating point components (linear)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RGBA {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl RGBA {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        RGBA { r, g, b, a }
    }

    pub fn black() -> Self {
        RGBA { r: 0.0, g: 0.0, b: 0.0, a: 1.0 }
    }

    pub fn white() -> Self {
        RGBA { r: 1.0, g: 1.0, b: 1.0, a: 1.0 }
    }

    /// Builds an opaque color from a `0xRRGGBB` sRGB value.
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
        RGBA {
            r: channel(16),
            g: channel(8),
            b: channel(0),
            a: 1.0,
        }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn rgb(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

/// Converts a single sRGB-encoded channel (0.0-1.0) to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_basics() {
        let color = RGBA::new(0.5, 0.75, 0.25, 0.9);
        assert_eq!((color.r, color.g, color.b, color.a), (0.5, 0.75, 0.25, 0.9));

        let black = RGBA::black();
        assert_eq!((black.r, black.g, black.b, black.a), (0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_from_hex_channels() {
        // Pure magenta: red and blue saturated, no green
        let magenta = RGBA::from_hex(0xff00ff);
        assert!((magenta.r - 1.0).abs() < 1e-6);
        assert_eq!(magenta.g, 0.0);
        assert!((magenta.b - 1.0).abs() < 1e-6);
        assert_eq!(magenta.a, 1.0);

        // 0xcc is ~0.8 in sRGB, ~0.6 linear
        let green = RGBA::from_hex(0x00cc00);
        assert!(green.g > 0.58 && green.g < 0.62, "g = {}", green.g);
        assert_eq!((green.r, green.b), (0.0, 0.0));
    }

    #[test]
    fn test_srgb_to_linear_endpoints() {
        assert_eq!(srgb_to_linear(0.0), 0.0);
        assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
        // Linear segment
        assert!((srgb_to_linear(0.04) - 0.04 / 12.92).abs() < 1e-7);
    }
}
