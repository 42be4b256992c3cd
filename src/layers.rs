use std::collections::BTreeMap;

use crate::{
    color::{self, Rgb},
    foundation::error::{TintError, TintResult},
};

/// Color variable name -> color specification string (hex, `rgb()`, or a named color).
pub type ColorMap = BTreeMap<String, String>;

/// One entry of a layer list: the color variable that tints `source`.
///
/// Serialized as a single-pair object, `{"my_blue": "blue_mask.png"}`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct LayerSpec {
    pub color: String,
    pub source: String,
}

impl LayerSpec {
    pub fn new(color: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            color: color.into(),
            source: source.into(),
        }
    }
}

impl TryFrom<BTreeMap<String, String>> for LayerSpec {
    type Error = TintError;

    fn try_from(entry: BTreeMap<String, String>) -> Result<Self, Self::Error> {
        if entry.len() != 1 {
            return Err(TintError::configuration(format!(
                "each layer must have exactly one color/file pair, got {}",
                entry.len()
            )));
        }
        let (color, source) = entry
            .into_iter()
            .next()
            .ok_or_else(|| TintError::configuration("empty layer entry"))?;
        Ok(Self { color, source })
    }
}

impl From<LayerSpec> for BTreeMap<String, String> {
    fn from(layer: LayerSpec) -> Self {
        BTreeMap::from([(layer.color, layer.source)])
    }
}

/// A layer whose color variable has been looked up and parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedLayer {
    pub color: Rgb,
    pub source: String,
}

/// Map every layer onto its color, preserving layer order (first entry is the background).
///
/// Fails with a configuration error when a layer names a color variable missing from
/// `colors`, and with an invalid-color error when the mapped specification does not parse.
pub fn build_resolved_layers(
    layers: &[LayerSpec],
    colors: &ColorMap,
) -> TintResult<Vec<ResolvedLayer>> {
    layers
        .iter()
        .map(|layer| {
            let spec = colors.get(&layer.color).ok_or_else(|| {
                TintError::configuration(format!(
                    "required color \"{}\" not found in color map",
                    layer.color
                ))
            })?;
            Ok(ResolvedLayer {
                color: color::resolve(spec)?,
                source: layer.source.clone(),
            })
        })
        .collect()
}
