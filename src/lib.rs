//! Tintstack turns a stack of greyscale masks into one colored image.
//!
//! Each layer is a greyscale image (usually with an alpha channel) paired with a color
//! variable. A [`GeneratorConfig`] fixes the layer order, the source directory and the output
//! file; an [`ImageGenerator`] binds that configuration to a [`ColorMap`] and renders:
//!
//! 1. **Resolve**: every color variable is looked up and parsed (`#RRGGBB`, `#RGB`,
//!    `rgb(..)`, `rgb(..%)` or a CSS color name) when the generator is built.
//! 2. **Colorize**: each mask is greyscale-normalized and tinted so black becomes the layer
//!    color and white stays white.
//! 3. **Stack**: the first layer is the background; later layers are pasted on top through
//!    their own alpha channel.
//! 4. **Write**: the flattened canvas is encoded to `output_path/output_filename`.
#![forbid(unsafe_code)]

mod color;
mod composite;
mod config;
mod foundation;
mod generator;
mod layers;

pub use color::{NAMED_COLORS, Rgb, resolve};
pub use composite::{Canvas, colorize, has_alpha, paste_masked, tint_lut};
pub use config::{
    DEFAULT_OUTPUT_PATH, DEFAULT_SOURCE_PATH, GeneratorConfig, OutputFormat, load_color_map,
};
pub use foundation::error::{TintError, TintResult};
pub use generator::{Composite, CompositeWarning, ImageGenerator, RenderReport};
pub use layers::{ColorMap, LayerSpec, ResolvedLayer, build_resolved_layers};
