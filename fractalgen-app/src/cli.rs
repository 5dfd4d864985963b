use std::path::{Path, PathBuf};

use clap::Parser;

use fractalgen_core::{Complex, FractalKind, ImageSize, Transform};

use crate::generate::FractalJob;
use crate::presets::ColorMapRegistry;

/// Render Julia and Mandelbrot set images.
#[derive(Debug, Parser)]
#[command(name = "fractalgen", version, about, allow_negative_numbers = true)]
pub struct Cli {
    /// Render the jobs described in this XML batch file
    #[arg(long, value_name = "FILE")]
    pub xml: Option<PathBuf>,
    /// Only render the batch entry with this id
    #[arg(long, requires = "xml")]
    pub id: Option<String>,
    /// Real part of the Julia constant
    #[arg(long, default_value_t = 0.0)]
    pub cr: f64,
    /// Imaginary part of the Julia constant
    #[arg(long, default_value_t = 0.0)]
    pub ci: f64,
    /// Render the Mandelbrot set instead of a Julia set
    #[arg(long)]
    pub mbrot: bool,
    /// Image width in pixels
    #[arg(long, alias = "imgx", default_value_t = 1920)]
    pub width: u32,
    /// Image height in pixels
    #[arg(long, alias = "imgy", default_value_t = 1080)]
    pub height: u32,
    /// Zoom factor
    #[arg(long, default_value_t = 1.0)]
    pub zoom: f64,
    /// Real offset of the image centre
    #[arg(long, default_value_t = 0.0)]
    pub offx: f64,
    /// Imaginary offset of the image centre
    #[arg(long, default_value_t = 0.0)]
    pub offy: f64,
    /// Rotation in degrees
    #[arg(long, default_value_t = 0.0)]
    pub rot: f64,
    /// Output file; the extension picks the format
    #[arg(long, value_name = "FILE", default_value = "fractal.png")]
    pub save: PathBuf,
    /// Colormap preset name
    #[arg(long, default_value = "rainbow")]
    pub cmap: String,
    /// List the available colormap presets
    #[arg(long)]
    pub cmaps: bool,
    /// Save a 400x300 strip of the selected colormap instead of a fractal
    #[arg(long)]
    pub test: bool,
    /// Preset document to load instead of searching for one
    #[arg(long, value_name = "FILE")]
    pub presets: Option<PathBuf>,
    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,
}

/// What a command line asks for, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode<'a> {
    ListPresets,
    TestColorMap,
    Batch(&'a Path),
    Single,
}

/// Size of the `--test` colormap strip.
pub const TEST_STRIP_SIZE: ImageSize = ImageSize {
    width: 400,
    height: 300,
};

impl Cli {
    pub fn mode(&self) -> Mode<'_> {
        if self.cmaps {
            Mode::ListPresets
        } else if self.test {
            Mode::TestColorMap
        } else if let Some(path) = self.xml.as_deref() {
            Mode::Batch(path)
        } else {
            Mode::Single
        }
    }

    /// The image described by the command-line flags alone.
    pub fn single_job(&self, registry: &ColorMapRegistry) -> crate::Result<FractalJob> {
        let transform = Transform::new(
            ImageSize::new(self.width, self.height),
            self.zoom,
            Complex::new(self.offx, self.offy),
            self.rot,
        )?;
        Ok(FractalJob {
            id: "cli".to_string(),
            save: self.save.clone(),
            transform,
            colormap: *registry.get(&self.cmap)?,
            colormap_name: self.cmap.clone(),
            fractal: FractalKind::from_flag(self.mbrot, Complex::new(self.cr, self.ci)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("fractalgen").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.mode(), Mode::Single);
        assert_eq!((cli.width, cli.height), (1920, 1080));
        assert_eq!(cli.zoom, 1.0);
        assert_eq!(cli.save, PathBuf::from("fractal.png"));
        assert_eq!(cli.cmap, "rainbow");
    }

    #[test]
    fn mode_precedence() {
        assert_eq!(parse(&["--cmaps", "--test", "--xml", "b.xml"]).mode(), Mode::ListPresets);
        assert_eq!(parse(&["--test", "--xml", "b.xml"]).mode(), Mode::TestColorMap);
        let cli = parse(&["--xml", "b.xml", "--id", "x"]);
        assert_eq!(cli.mode(), Mode::Batch(Path::new("b.xml")));
    }

    #[test]
    fn negative_numbers_and_aliases() {
        let cli = parse(&["--cr", "-0.7", "--ci", "0.27015", "--imgx", "64", "--imgy", "48", "--rot", "-45"]);
        assert_eq!(cli.cr, -0.7);
        assert_eq!((cli.width, cli.height), (64, 48));
        assert_eq!(cli.rot, -45.0);
    }

    #[test]
    fn id_requires_xml() {
        assert!(Cli::try_parse_from(["fractalgen", "--id", "a"]).is_err());
    }

    #[test]
    fn single_job_from_flags() {
        let cli = parse(&[
            "--mbrot", "--width", "32", "--height", "16", "--zoom", "2", "--offx", "-0.5", "--offy",
            "0.25", "--save", "out.bmp",
        ]);
        let job = cli.single_job(&ColorMapRegistry::default()).unwrap();
        assert_eq!(job.fractal, FractalKind::Mandelbrot);
        assert_eq!(job.transform.size(), ImageSize::new(32, 16));
        assert_eq!(job.transform.zoom(), 2.0);
        assert_eq!(job.transform.offset(), Complex::new(-0.5, 0.25));
        assert_eq!(job.save, PathBuf::from("out.bmp"));
        assert_eq!(job.colormap_name, "rainbow");
    }

    #[test]
    fn single_job_julia_constant() {
        let cli = parse(&["--cr", "-0.4", "--ci", "0.6"]);
        let job = cli.single_job(&ColorMapRegistry::default()).unwrap();
        assert_eq!(job.fractal.constant(), Some(Complex::new(-0.4, 0.6)));
    }

    #[test]
    fn single_job_rejects_bad_input() {
        let registry = ColorMapRegistry::default();
        let err = parse(&["--cmap", "nope"]).single_job(&registry).unwrap_err();
        assert!(matches!(err, AppError::UnknownPreset(_)));
        let err = parse(&["--zoom", "0"]).single_job(&registry).unwrap_err();
        assert!(matches!(err, AppError::Core(_)));
    }
}
