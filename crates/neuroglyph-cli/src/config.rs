//! Layered configuration: built-in defaults, then the TOML file, then flags.
//!
//! ```toml
//! [output]
//! dir = "assets"
//!
//! [brain]
//! variant = "lobed"
//! seed = 7
//!
//! [pixel_text]
//! text = "HELLO"
//! fill = "#DC143C"
//!
//! [logo]
//! font_size = 48.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use neuroglyph_core::CellMetrics;
use neuroglyph_error::{Error, Result};
use neuroglyph_svg::{BrainScene, BrainVariant, LogoScene, PixelScene, PixelStyle};

use crate::options::{BrainArgs, LogoArgs, PixelTextArgs};

pub const DEFAULT_OUT_DIR: &str = "assets";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub output: OutputSection,
    pub brain: BrainSection,
    pub pixel_text: PixelTextSection,
    pub logo: LogoSection,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrainSection {
    pub variant: Option<BrainVariant>,
    pub seed: Option<u64>,
    pub nodes: Option<usize>,
    pub edges: Option<usize>,
    pub size: Option<u32>,
    pub unique_edges: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PixelTextSection {
    pub text: Option<String>,
    pub cell_size: Option<u32>,
    pub gap_size: Option<u32>,
    pub font: Option<PathBuf>,
    pub fill: Option<String>,
    pub outline: Option<String>,
    pub outline_width: Option<f64>,
    pub strict: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogoSection {
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
}

impl Config {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| {
            Error::config_invalid(e.message().to_string())
                .with_operation("config::parse")
                .set_source(e)
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::from(e)
                .with_operation("config::load")
                .with_context("path", path.display().to_string())
        })?;
        let config = Self::from_toml_str(&source)
            .map_err(|e| e.with_context("path", path.display().to_string()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// Load `path` if given, otherwise use the built-in defaults.
    pub fn load_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn out_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.output.dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR))
    }

    pub fn brain_scene(&self, args: &BrainArgs) -> BrainScene {
        let section = &self.brain;
        let variant = args.variant.or(section.variant).unwrap_or_default();
        let preset = BrainScene::preset(variant);
        let unique = args.unique_edges || section.unique_edges.unwrap_or(false);
        BrainScene {
            variant,
            size: args.size.or(section.size).unwrap_or(preset.size),
            node_count: args.node_count.or(section.nodes).unwrap_or(preset.node_count),
            edge_count: args.edge_count.or(section.edges).unwrap_or(preset.edge_count),
            seed: args.seed.or(section.seed).unwrap_or(preset.seed),
            allow_duplicate_edges: !unique,
        }
    }

    pub fn pixel_scene(&self, args: &PixelTextArgs) -> PixelScene {
        let section = &self.pixel_text;
        let defaults = PixelScene::default();
        let metrics = CellMetrics::new(
            args.cell_size
                .or(section.cell_size)
                .unwrap_or(defaults.metrics.cell_size),
            args.gap_size
                .or(section.gap_size)
                .unwrap_or(defaults.metrics.gap_size),
        );
        PixelScene {
            text: pick(&args.text, &section.text).unwrap_or(defaults.text),
            metrics,
            style: PixelStyle {
                fill: pick(&args.fill, &section.fill).unwrap_or(defaults.style.fill),
                outline: pick(&args.outline, &section.outline).unwrap_or(defaults.style.outline),
                outline_width: section
                    .outline_width
                    .unwrap_or(defaults.style.outline_width),
            },
        }
    }

    pub fn pixel_font(&self, args: &PixelTextArgs) -> Option<PathBuf> {
        pick(&args.font, &self.pixel_text.font)
    }

    pub fn pixel_strict(&self, args: &PixelTextArgs) -> bool {
        args.strict || self.pixel_text.strict.unwrap_or(false)
    }

    pub fn logo_scene(&self, args: &LogoArgs) -> LogoScene {
        let section = &self.logo;
        let defaults = LogoScene::default();
        LogoScene {
            text: pick(&args.text, &section.text).unwrap_or(defaults.text),
            font_size: args
                .font_size
                .or(section.font_size)
                .unwrap_or(defaults.font_size),
            font_family: section.font_family.clone().unwrap_or(defaults.font_family),
        }
    }
}

fn pick<T: Clone>(flag: &Option<T>, file: &Option<T>) -> Option<T> {
    flag.as_ref().or(file.as_ref()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use neuroglyph_error::ErrorKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_config_gives_presets() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.brain_scene(&BrainArgs::new()), BrainScene::default());
        assert_eq!(config.pixel_scene(&PixelTextArgs::new()), PixelScene::default());
        assert_eq!(config.logo_scene(&LogoArgs::default()), LogoScene::default());
        assert_eq!(config.out_dir(None), PathBuf::from("assets"));
    }

    #[test]
    fn flags_override_file_override_defaults() {
        let config = Config::from_toml_str(
            r#"
            [output]
            dir = "out"

            [brain]
            variant = "lobed"
            seed = 7
            nodes = 20
            unique_edges = true

            [pixel_text]
            text = "FROM FILE"
            fill = "gold"
            "#,
        )
        .unwrap();

        let brain = config.brain_scene(&BrainArgs::new().with_seed(9));
        assert_eq!(brain.variant, BrainVariant::Lobed);
        assert_eq!(brain.seed, 9);
        assert_eq!(brain.node_count, 20);
        assert_eq!(brain.edge_count, 150);
        assert!(!brain.allow_duplicate_edges);

        let pixel = config.pixel_scene(&PixelTextArgs::new().with_text("FLAG"));
        assert_eq!(pixel.text, "FLAG");
        assert_eq!(pixel.style.fill, "gold");
        assert_eq!(pixel.style.outline, "black");

        assert_eq!(config.out_dir(None), PathBuf::from("out"));
        assert_eq!(config.out_dir(Some(Path::new("cli"))), PathBuf::from("cli"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = Config::from_toml_str("[brain]\nneurons = 3\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);

        let err = Config::from_toml_str("[colour]\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn bad_variant_is_rejected() {
        let err = Config::from_toml_str("[brain]\nvariant = \"round\"\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn missing_config_file() {
        let err = Config::load(Path::new("/nonexistent/neuroglyph.toml")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert_eq!(err.context_value("path"), Some("/nonexistent/neuroglyph.toml"));
    }
}
