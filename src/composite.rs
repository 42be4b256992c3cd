use image::{DynamicImage, GrayAlphaImage, LumaA, Rgba, RgbImage, RgbaImage};

use crate::color::Rgb;

/// An 8-bit RGB or RGBA raster: a tinted layer, or the canvas layers are merged onto.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Canvas {
    Rgb(RgbImage),
    Rgba(RgbaImage),
}

impl Canvas {
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            Self::Rgb(img) => img.dimensions(),
            Self::Rgba(img) => img.dimensions(),
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, Self::Rgba(_))
    }

    /// Raw interleaved pixel bytes (3 or 4 per pixel).
    pub fn as_raw(&self) -> &[u8] {
        match self {
            Self::Rgb(img) => img.as_raw(),
            Self::Rgba(img) => img.as_raw(),
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Self::Rgb(img) => DynamicImage::ImageRgb8(img),
            Self::Rgba(img) => DynamicImage::ImageRgba8(img),
        }
    }
}

/// Greyscale+alpha and RGB+alpha sources carry an alpha channel; everything else does not.
pub fn has_alpha(img: &DynamicImage) -> bool {
    matches!(img.color().channel_count(), 2 | 4)
}

/// Lookup table for a duotone ramp: grey 0 maps to `color`, grey 255 to white.
pub fn tint_lut(color: Rgb) -> [[u8; 3]; 256] {
    let lo = color.channels();
    let mut lut = [[0u8; 3]; 256];
    for (v, entry) in lut.iter_mut().enumerate() {
        for (out, c) in entry.iter_mut().zip(lo) {
            let c = u32::from(c);
            *out = (c + (v as u32) * (255 - c) / 255) as u8;
        }
    }
    lut
}

/// ITU-R 601-2 luma in 16-bit fixed point: `(299 R + 587 G + 114 B) / 1000`, rounded.
pub fn luma_601(r: u8, g: u8, b: u8) -> u8 {
    let y = u32::from(r) * 19595 + u32::from(g) * 38470 + u32::from(b) * 7471 + 0x8000;
    (y >> 16) as u8
}

/// 8-bit grey plus alpha (255 where the source has none).
///
/// Greyscale sources pass through unchanged; color sources are reduced with [`luma_601`].
fn grey_alpha(img: &DynamicImage) -> GrayAlphaImage {
    if matches!(img.color().channel_count(), 1 | 2) {
        return img.to_luma_alpha8();
    }
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    let mut out = GrayAlphaImage::new(width, height);
    for (dst, src) in out.pixels_mut().zip(rgba.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = LumaA([luma_601(r, g, b), a]);
    }
    out
}

/// Greyscale-normalize `img` and tint it with `color`, keeping its alpha channel if it has one.
pub fn colorize(img: &DynamicImage, color: Rgb) -> Canvas {
    let lut = tint_lut(color);
    let la = grey_alpha(img);
    let (width, height) = la.dimensions();

    if has_alpha(img) {
        let mut out = RgbaImage::new(width, height);
        for (dst, src) in out.pixels_mut().zip(la.pixels()) {
            let [r, g, b] = lut[usize::from(src[0])];
            *dst = Rgba([r, g, b, src[1]]);
        }
        Canvas::Rgba(out)
    } else {
        let mut out = RgbImage::new(width, height);
        for (dst, src) in out.pixels_mut().zip(la.pixels()) {
            dst.0 = lut[usize::from(src[0])];
        }
        Canvas::Rgb(out)
    }
}

/// Paste `layer` onto `canvas` at the origin, using the layer's own alpha as the mask.
///
/// Every canvas channel (alpha included, for RGBA canvases) moves toward the layer's value
/// in proportion to the mask. Only the overlapping region is touched.
pub fn paste_masked(canvas: &mut Canvas, layer: &RgbaImage) {
    let (cw, ch) = canvas.dimensions();
    let width = cw.min(layer.width());
    let height = ch.min(layer.height());

    match canvas {
        Canvas::Rgb(dst) => {
            for y in 0..height {
                for x in 0..width {
                    let src = layer.get_pixel(x, y);
                    let mask = src[3];
                    let px = dst.get_pixel_mut(x, y);
                    for (d, s) in px.0.iter_mut().zip(&src.0[..3]) {
                        *d = blend(*d, *s, mask);
                    }
                }
            }
        }
        Canvas::Rgba(dst) => {
            for y in 0..height {
                for x in 0..width {
                    let src = layer.get_pixel(x, y);
                    let mask = src[3];
                    let px = dst.get_pixel_mut(x, y);
                    for (d, s) in px.0.iter_mut().zip(src.0) {
                        *d = blend(*d, s, mask);
                    }
                }
            }
        }
    }
}

fn blend(dst: u8, src: u8, mask: u8) -> u8 {
    let m = u32::from(mask);
    ((u32::from(src) * m + u32::from(dst) * (255 - m) + 127) / 255) as u8
}
