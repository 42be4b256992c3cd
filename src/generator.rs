use std::path::{Path, PathBuf};

use crate::{
    composite::{self, Canvas},
    config::GeneratorConfig,
    foundation::error::{TintError, TintResult},
    layers::{ColorMap, ResolvedLayer, build_resolved_layers},
};

/// A non-fatal condition hit while compositing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CompositeWarning {
    /// A layer above the background had no alpha channel and replaced everything beneath it.
    OpaqueLayerReplacedCanvas { index: usize, source: String },
}

/// The flattened image plus anything worth telling the caller about how it was built.
#[derive(Clone, Debug)]
pub struct Composite {
    pub canvas: Canvas,
    pub warnings: Vec<CompositeWarning>,
}

#[derive(Clone, Debug)]
pub struct RenderReport {
    pub output: PathBuf,
    pub warnings: Vec<CompositeWarning>,
}

/// Tints and stacks the layers of one [`GeneratorConfig`] with one set of colors.
///
/// Colors are resolved when the generator is built, so a missing color variable or an
/// unparsable color surfaces before any file is touched. Rendering keeps no state between
/// calls; rendering twice with unchanged sources writes identical files.
#[derive(Clone, Debug)]
pub struct ImageGenerator {
    config: GeneratorConfig,
    layers: Vec<ResolvedLayer>,
}

impl ImageGenerator {
    pub fn new(config: GeneratorConfig, colors: &ColorMap) -> TintResult<Self> {
        let layers = build_resolved_layers(&config.layers, colors)?;
        Ok(Self { config, layers })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn layers(&self) -> &[ResolvedLayer] {
        &self.layers
    }

    pub fn source_path(&self) -> &Path {
        &self.config.source_path
    }

    pub fn output_path(&self) -> &Path {
        &self.config.output_path
    }

    /// Load, tint and stack every layer in memory without writing anything.
    #[tracing::instrument(skip(self), fields(layers = self.layers.len()))]
    pub fn compose(&self) -> TintResult<Composite> {
        let mut canvas: Option<Canvas> = None;
        let mut warnings = Vec::new();

        for (index, layer) in self.layers.iter().enumerate() {
            let path = self.config.source_path.join(&layer.source);
            let img = load_source(&path)?;
            let tinted = composite::colorize(&img, layer.color);
            tracing::debug!(
                index,
                source = %path.display(),
                color = %layer.color,
                alpha = tinted.has_alpha(),
                "colorized layer"
            );

            canvas = Some(match (canvas, tinted) {
                (None, tinted) => tinted,
                (Some(mut base), Canvas::Rgba(top)) => {
                    composite::paste_masked(&mut base, &top);
                    base
                }
                (Some(_), opaque @ Canvas::Rgb(_)) => {
                    tracing::warn!(
                        index,
                        source = %layer.source,
                        "non-background layer has no alpha channel, which obscures all previous layers"
                    );
                    warnings.push(CompositeWarning::OpaqueLayerReplacedCanvas {
                        index,
                        source: layer.source.clone(),
                    });
                    opaque
                }
            });
        }

        let canvas = canvas.ok_or_else(|| TintError::configuration("no layers to render"))?;
        Ok(Composite { canvas, warnings })
    }

    /// Composite every layer and write the result to `output_path/output_filename`.
    ///
    /// The output target is checked before any source is read, and nothing is written
    /// unless every layer loaded.
    #[tracing::instrument(skip(self))]
    pub fn render(&self) -> TintResult<RenderReport> {
        self.config.output_target()?;
        let Composite { canvas, warnings } = self.compose()?;
        let output = self.write(canvas)?;
        tracing::info!(output = %output.display(), "rendered image");
        Ok(RenderReport { output, warnings })
    }

    /// Save `canvas` with the configured filename and format, returning the written path.
    pub fn write(&self, canvas: Canvas) -> TintResult<PathBuf> {
        let (path, format) = self.config.output_target()?;
        canvas
            .into_dynamic()
            .save_with_format(&path, format.image_format())
            .map_err(|source| TintError::Write {
                path: path.clone(),
                source,
            })?;
        Ok(path)
    }
}

fn load_source(path: &Path) -> TintResult<image::DynamicImage> {
    let reader = image::ImageReader::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => TintError::SourceImageNotFound {
            path: path.to_path_buf(),
        },
        _ => TintError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        },
    })?;
    reader
        .with_guessed_format()
        .map_err(|e| TintError::Decode {
            path: path.to_path_buf(),
            source: image::ImageError::IoError(e),
        })?
        .decode()
        .map_err(|source| TintError::Decode {
            path: path.to_path_buf(),
            source,
        })
}
