use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    str::FromStr,
};

use anyhow::Context as _;

use crate::{
    foundation::error::{TintError, TintResult},
    layers::{ColorMap, LayerSpec},
};

pub const DEFAULT_SOURCE_PATH: &str = "source_images";
pub const DEFAULT_OUTPUT_PATH: &str = "generated_images";

/// Encoding used for the flattened output image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum OutputFormat {
    Png,
    Jpeg,
    Bmp,
    Gif,
    Tiff,
    WebP,
    Ico,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Bmp => "bmp",
            Self::Gif => "gif",
            Self::Tiff => "tiff",
            Self::WebP => "webp",
            Self::Ico => "ico",
        }
    }

    pub fn image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Gif => image::ImageFormat::Gif,
            Self::Tiff => image::ImageFormat::Tiff,
            Self::WebP => image::ImageFormat::WebP,
            Self::Ico => image::ImageFormat::Ico,
        }
    }
}

impl FromStr for OutputFormat {
    type Err = TintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" | "jpe" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "gif" => Ok(Self::Gif),
            "tif" | "tiff" => Ok(Self::Tiff),
            "webp" => Ok(Self::WebP),
            "ico" => Ok(Self::Ico),
            other => Err(TintError::configuration(format!(
                "unsupported output format \"{other}\" (supported: png, jpg/jpeg, bmp, gif, tif/tiff, webp, ico)"
            ))),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = TintError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<OutputFormat> for String {
    fn from(f: OutputFormat) -> Self {
        f.name().to_owned()
    }
}

/// Everything fixed about one kind of generated image: which masks to stack, in which
/// order, where they live, and where the result goes.
///
/// `output_filename` and `image_format` are optional here so that a half-finished
/// configuration can still be constructed; rendering it fails with a configuration error.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GeneratorConfig {
    pub layers: Vec<LayerSpec>,
    #[serde(default)]
    pub output_filename: Option<String>,
    #[serde(default)]
    pub image_format: Option<OutputFormat>,
    #[serde(default = "default_source_path")]
    pub source_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
}

fn default_source_path() -> PathBuf {
    PathBuf::from(DEFAULT_SOURCE_PATH)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

impl GeneratorConfig {
    pub fn new(layers: Vec<LayerSpec>) -> Self {
        Self {
            layers,
            output_filename: None,
            image_format: None,
            source_path: default_source_path(),
            output_path: default_output_path(),
        }
    }

    pub fn with_output(mut self, filename: impl Into<String>, format: OutputFormat) -> Self {
        self.output_filename = Some(filename.into());
        self.image_format = Some(format);
        self
    }

    pub fn with_source_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.source_path = path.into();
        self
    }

    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }

    /// Output file location and encoding, or a configuration error naming whichever is unset.
    pub fn output_target(&self) -> TintResult<(PathBuf, OutputFormat)> {
        let filename = self
            .output_filename
            .as_deref()
            .filter(|f| !f.is_empty())
            .ok_or_else(|| TintError::configuration("an output filename must be specified"))?;
        let format = self
            .image_format
            .ok_or_else(|| TintError::configuration("an output format must be specified"))?;
        Ok((self.output_path.join(filename), format))
    }

    pub fn from_json_str(s: &str) -> TintResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| TintError::configuration(format!("parse generator config: {e}")))
    }

    pub fn from_json_file(path: &Path) -> TintResult<Self> {
        let f = File::open(path)
            .with_context(|| format!("open generator config '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            TintError::configuration(format!(
                "parse generator config '{}': {e}",
                path.display()
            ))
        })
    }
}

/// Read a JSON object of `"name": "color"` pairs.
pub fn load_color_map(path: &Path) -> TintResult<ColorMap> {
    let f = File::open(path).with_context(|| format!("open color map '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).map_err(|e| {
        TintError::configuration(format!("parse color map '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_config() {
        let cfg = GeneratorConfig::from_json_str(
            r#"{
                "layers": [{"bg": "bg.png"}, {"fg": "fg.png"}],
                "output_filename": "button.png",
                "image_format": "PNG",
                "source_path": "masks",
                "output_path": "out"
            }"#,
        )
        .unwrap();
        assert_eq!(
            cfg.layers,
            vec![LayerSpec::new("bg", "bg.png"), LayerSpec::new("fg", "fg.png")]
        );
        assert_eq!(cfg.image_format, Some(OutputFormat::Png));
        assert_eq!(
            cfg.output_target().unwrap(),
            (PathBuf::from("out").join("button.png"), OutputFormat::Png)
        );
        assert_eq!(cfg.source_path, PathBuf::from("masks"));
    }

    #[test]
    fn paths_default_to_fixed_relative_dirs() {
        let cfg = GeneratorConfig::from_json_str(r#"{"layers": []}"#).unwrap();
        assert_eq!(cfg.source_path, PathBuf::from(DEFAULT_SOURCE_PATH));
        assert_eq!(cfg.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(cfg, GeneratorConfig::new(vec![]));
    }

    #[test]
    fn malformed_layer_entry_is_a_configuration_error() {
        let err =
            GeneratorConfig::from_json_str(r#"{"layers": [{"a": "a.png", "b": "b.png"}]}"#)
                .unwrap_err();
        assert!(matches!(err, TintError::Configuration(_)));

        let err = GeneratorConfig::from_json_str(r#"{"layers": ["a.png"]}"#).unwrap_err();
        assert!(matches!(err, TintError::Configuration(_)));
    }

    #[test]
    fn output_target_requires_filename_and_format() {
        let cfg = GeneratorConfig::new(vec![]);
        let err = cfg.output_target().unwrap_err();
        assert!(err.to_string().contains("output filename"));

        let mut cfg = cfg.with_output("x.png", OutputFormat::Png);
        cfg.image_format = None;
        let err = cfg.output_target().unwrap_err();
        assert!(err.to_string().contains("output format"));
    }

    #[test]
    fn output_format_aliases() {
        assert_eq!("jpg".parse::<OutputFormat>().unwrap(), OutputFormat::Jpeg);
        assert_eq!("TIF".parse::<OutputFormat>().unwrap(), OutputFormat::Tiff);
        assert_eq!(OutputFormat::WebP.image_format(), image::ImageFormat::WebP);
        assert!("psd".parse::<OutputFormat>().is_err());
    }
}
