//! Named colormap presets and the XML colormap description they share with
//! batch files.
//!
//! A preset document looks like the following; the `<colormaps>` container
//! is optional.
//!
//! ```xml
//! <colormaps>
//!   <entry>
//!     <name>fire</name>
//!     <colormap type="gradient" start="0x000000" end="0xff8000"/>
//!   </entry>
//!   <entry>
//!     <name>psychedelic</name>
//!     <colormap type="rainbow">
//!       <phase r="2" g="0" b="4"/>
//!       <freq r="3" g="3" b="3"/>
//!     </colormap>
//!   </entry>
//! </colormaps>
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use roxmltree::{Document, Node};
use tracing::{debug, info};

use fractalgen_render::{Color, ColorMap, GradientMap, RainbowMap};

use crate::error::AppError;
use crate::xml;

/// File name of the preset document.
pub const PRESET_DOCUMENT: &str = "fractal_colormaps.xml";

/// Preset that exists even without a preset document.
pub const DEFAULT_PRESET: &str = "rainbow";

/// Return the first `dir/PRESET_DOCUMENT` that exists.
pub fn find_preset_document(dirs: &[PathBuf]) -> crate::Result<PathBuf> {
    for dir in dirs {
        let candidate = dir.join(PRESET_DOCUMENT);
        if candidate.is_file() {
            return Ok(candidate);
        }
        debug!("No preset document at {}", candidate.display());
    }
    Err(AppError::PresetDocumentNotFound {
        searched: dirs.iter().map(|d| d.join(PRESET_DOCUMENT)).collect(),
    })
}

/// Name → colormap table, built once at startup and passed to whatever needs
/// to resolve colormap names.
#[derive(Debug, Clone)]
pub struct ColorMapRegistry {
    presets: BTreeMap<String, ColorMap>,
}

impl Default for ColorMapRegistry {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert(DEFAULT_PRESET.to_string(), ColorMap::default());
        Self { presets }
    }
}

impl ColorMapRegistry {
    /// Built-in presets plus the preset document at `explicit`, or the first
    /// one found in `search_dirs`.
    pub fn load(explicit: Option<&Path>, search_dirs: &[PathBuf]) -> crate::Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => find_preset_document(search_dirs)?,
        };
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| AppError::io(path, e))?;
        let mut registry = Self::default();
        let count = registry.load_document(path, &text)?;
        info!("Loaded {count} colormap presets from {}", path.display());
        Ok(registry)
    }

    /// Add every `<entry>` of a preset document. Entries may sit at the top
    /// level or inside a container element, and may refer to presets defined
    /// earlier in the same document. Returns the number of entries.
    pub fn load_document(&mut self, origin: &Path, text: &str) -> crate::Result<usize> {
        let wrapped = xml::wrap_fragment(text);
        let doc = Document::parse(&wrapped).map_err(|source| AppError::Xml {
            path: origin.to_path_buf(),
            source,
        })?;

        let mut count = 0;
        for entry in xml::elements(doc.root_element(), "entry") {
            let name = xml::require_value(entry, "name")?.to_string();
            let colormap = self.parse_colormap(xml::require_child(entry, "colormap")?)?;
            debug!(name = %name, kind = colormap.kind(), "Registered colormap preset");
            self.presets.insert(name, colormap);
            count += 1;
        }
        Ok(count)
    }

    pub fn get(&self, name: &str) -> crate::Result<&ColorMap> {
        self.presets
            .get(name)
            .ok_or_else(|| AppError::UnknownPreset(name.to_string()))
    }

    /// Preset names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.presets.keys().map(String::as_str)
    }

    /// Build a colormap from a `<colormap>` node: either a `preset="name"`
    /// reference or an inline `type="gradient"` / `type="rainbow"` description.
    pub fn parse_colormap(&self, node: Node<'_, '_>) -> crate::Result<ColorMap> {
        if let Some(name) = node.attribute("preset") {
            return self.get(name).copied();
        }
        match xml::require_value(node, "type")? {
            "gradient" => {
                let start = xml::require_rgb(node, "start")?;
                let end = xml::require_rgb(node, "end")?;
                Ok(GradientMap::new(Color::from_hex(start), Color::from_hex(end)).into())
            }
            "rainbow" => {
                let phase = channel_triple(xml::child(node, "phase"), RainbowMap::DEFAULT_PHASE)?;
                let freq = channel_triple(xml::child(node, "freq"), RainbowMap::DEFAULT_FREQ)?;
                let width = xml::f64_value(node, "width")?.unwrap_or(RainbowMap::DEFAULT_WIDTH);
                let center = xml::f64_value(node, "center")?.unwrap_or(RainbowMap::DEFAULT_CENTER);
                Ok(RainbowMap::new(phase, freq).with_wave(width, center).into())
            }
            other => Err(AppError::UnknownColorMapType(other.to_string())),
        }
    }
}

/// Short human label for a `<colormap>` node: the preset name or the type.
pub fn describe_colormap(node: Node<'_, '_>) -> String {
    node.attribute("preset")
        .or_else(|| xml::value(node, "type"))
        .unwrap_or("unknown")
        .to_string()
}

/// Read `r`, `g`, `b` from a node, keeping `defaults` for anything missing.
fn channel_triple(node: Option<Node<'_, '_>>, defaults: [f64; 3]) -> crate::Result<[f64; 3]> {
    let Some(node) = node else {
        return Ok(defaults);
    };
    let mut out = defaults;
    for (slot, name) in out.iter_mut().zip(["r", "g", "b"]) {
        if let Some(v) = xml::f64_value(node, name)? {
            *slot = v;
        }
    }
    Ok(out)
}
