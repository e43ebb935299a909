use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use weft_renderer::{RenderConfig, Strategy};

/// Log levels accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// How the frame is split between worker threads
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// One fixed band per thread
    Static,
    /// Threads claim whole rows
    Rows,
    /// Threads claim square blocks
    Blocks,
}

#[derive(Debug, Parser)]
#[command(name = "weft")]
#[command(about = "A multi-threaded recursive ray tracer")]
pub struct Args {
    /// Scene file to render
    #[arg(value_name = "SCENE", required_unless_present = "input")]
    pub scene: Option<PathBuf>,

    /// Scene file to render (alternative to the positional argument)
    #[arg(short, long, conflicts_with = "scene")]
    pub input: Option<PathBuf>,

    /// Output BMP path (defaults to a name built from the render settings)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Image size in pixels
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"], default_values_t = [1024, 1024])]
    pub size: Vec<usize>,

    /// Anti-aliasing samples per axis per pixel
    #[arg(long, default_value_t = 1)]
    pub samples: u32,

    /// Number of worker threads
    #[arg(long, default_value_t = 1)]
    pub threads: usize,

    /// Work distribution strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Static)]
    pub strategy: StrategyArg,

    /// Block edge length for the blocks strategy
    #[arg(long, default_value_t = Strategy::DEFAULT_BLOCK_SIZE)]
    pub block_size: usize,

    /// Tint each pixel by the thread that rendered it
    #[arg(long)]
    pub colourise: bool,

    /// Number of timed renders to average
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub runs: u32,

    /// Set the logging level, overriding RUST_LOG
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,
}

impl Args {
    pub fn scene_path(&self) -> &Path {
        // clap guarantees exactly one of the two is present
        self.scene
            .as_deref()
            .or(self.input.as_deref())
            .unwrap_or_else(|| Path::new(""))
    }

    /// Level forced by `--log-level`, if it was given.
    pub fn log_filter(&self) -> Option<LevelFilter> {
        self.log_level.map(LevelFilter::from)
    }

    pub fn width(&self) -> usize {
        self.size.first().copied().unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.size.get(1).copied().unwrap_or(0)
    }

    pub fn strategy(&self) -> Strategy {
        match self.strategy {
            StrategyArg::Static => Strategy::Static,
            StrategyArg::Rows => Strategy::RowClaim,
            StrategyArg::Blocks => Strategy::BlockClaim {
                block_size: self.block_size,
            },
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.width(),
            height: self.height(),
            aa_level: self.samples,
            workers: self.threads,
            strategy: self.strategy(),
            colour_rise: self.colourise,
        }
    }

    /// `Thread_{threads}_{scene}_{w}x{h}x{samples}.bmp` in the current
    /// directory, unless `--output` was given.
    pub fn output_path(&self) -> PathBuf {
        if let Some(output) = &self.output {
            return output.clone();
        }
        let scene = self
            .scene_path()
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "scene".to_string());
        PathBuf::from(format!(
            "Thread_{}_{}_{}x{}x{}.bmp",
            self.threads,
            scene,
            self.width(),
            self.height(),
            self.samples
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("weft").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["scenes/spheres.json"]);
        assert_eq!(args.scene_path(), Path::new("scenes/spheres.json"));
        assert_eq!((args.width(), args.height()), (1024, 1024));
        assert_eq!(args.runs, 1);
        assert_eq!(args.log_filter(), None);
        assert_eq!(args.render_config(), RenderConfig::default());
        assert_eq!(args.output_path(), PathBuf::from("Thread_1_spheres_1024x1024x1.bmp"));
    }

    #[test]
    fn test_full_command_line() {
        let args = parse(&[
            "--input",
            "bunny.json",
            "--size",
            "640",
            "480",
            "--samples",
            "4",
            "--threads",
            "8",
            "--strategy",
            "blocks",
            "--block-size",
            "32",
            "--colourise",
            "--runs",
            "5",
            "--log-level",
            "debug",
        ]);

        let config = args.render_config();
        assert_eq!((config.width, config.height), (640, 480));
        assert_eq!(config.aa_level, 4);
        assert_eq!(config.workers, 8);
        assert_eq!(config.strategy, Strategy::BlockClaim { block_size: 32 });
        assert!(config.colour_rise);
        assert_eq!(args.runs, 5);
        assert_eq!(args.log_filter(), Some(LevelFilter::Debug));
        assert_eq!(args.output_path(), PathBuf::from("Thread_8_bunny_640x480x4.bmp"));
    }

    #[test]
    fn test_explicit_output() {
        let args = parse(&["scene.json", "--output", "out/frame.bmp", "--strategy", "rows"]);
        assert_eq!(args.output_path(), PathBuf::from("out/frame.bmp"));
        assert_eq!(args.strategy(), Strategy::RowClaim);
    }

    #[test]
    fn test_rejected_arguments() {
        // No scene
        assert!(Args::try_parse_from(["weft"]).is_err());
        // Both forms of scene
        assert!(Args::try_parse_from(["weft", "a.json", "--input", "b.json"]).is_err());
        // Size needs two values
        assert!(Args::try_parse_from(["weft", "a.json", "--size", "640"]).is_err());
        // Zero runs
        assert!(Args::try_parse_from(["weft", "a.json", "--runs", "0"]).is_err());
    }
}
