//! Command-line interface for the snaplabel utility
//!
//! Samples connector paths, replays scripted label sessions and renders the
//! resulting scene as SVG.

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{debug, info};

use snaplabel::core::logging::init_logging;
use snaplabel::simulation::{self, Frame, Script, Step};
use snaplabel::{sample_with_count, HandlePosition, LabelConfig, Point};

/// snaplabel - Draggable edge labels that snap to their path
#[derive(Parser)]
#[command(name = "snaplabel")]
#[command(about = "Sample edge paths and replay draggable edge label sessions")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,

    /// Label configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of snap points per edge
    #[arg(long, global = true)]
    pub samples: Option<usize>,

    /// Initial label index
    #[arg(long, global = true)]
    pub index: Option<usize>,

    /// Drag session rebuild debounce in milliseconds
    #[arg(long, global = true)]
    pub debounce_ms: Option<u64>,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the snap points sampled along the path between two handles
    Sample {
        /// Source handle coordinates as X,Y
        #[arg(long, value_parser = parse_point)]
        source: Point,

        /// Target handle coordinates as X,Y
        #[arg(long, value_parser = parse_point)]
        target: Point,

        /// Side of the source node the edge leaves from
        #[arg(long, value_enum, default_value_t = HandleChoice::Bottom)]
        source_handle: HandleChoice,

        /// Side of the target node the edge enters
        #[arg(long, value_enum, default_value_t = HandleChoice::Top)]
        target_handle: HandleChoice,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a simulation script and print the label state after each step
    Simulate {
        /// Script file (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output frames as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a simulation script and write the final scene as SVG
    Render {
        /// Script file (use - for stdin); the untouched demo scene if omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file for the SVG (use - for stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Walk through a drag session on the demo scene
    Demo,
}

/// Node sides accepted on the command line
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum HandleChoice {
    Top,
    Right,
    Bottom,
    Left,
}

impl From<HandleChoice> for HandlePosition {
    fn from(value: HandleChoice) -> Self {
        match value {
            HandleChoice::Top => HandlePosition::Top,
            HandleChoice::Right => HandlePosition::Right,
            HandleChoice::Bottom => HandlePosition::Bottom,
            HandleChoice::Left => HandlePosition::Left,
        }
    }
}

/// Parse an `X,Y` coordinate pair
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f64 = x
        .trim()
        .parse()
        .map_err(|_| format!("invalid X coordinate '{}'", x.trim()))?;
    let y: f64 = y
        .trim()
        .parse()
        .map_err(|_| format!("invalid Y coordinate '{}'", y.trim()))?;
    Ok(Point::new(x, y))
}

/// Scripted walkthrough used by the `demo` command
pub fn demo_script(config: LabelConfig) -> Script {
    let edge = "edge-button".to_string();
    Script {
        config,
        steps: vec![
            Step::Advance { ms: 600 },
            Step::Press {
                edge: edge.clone(),
                x: 125.0,
                y: 220.0,
            },
            Step::Drag {
                edge: edge.clone(),
                x: 160.0,
                y: 220.0,
            },
            Step::Drag {
                edge: edge.clone(),
                x: 200.0,
                y: 160.0,
            },
            Step::Release { edge: edge.clone() },
            Step::MoveNode {
                id: "button-2".to_string(),
                x: 325.0,
                y: 400.0,
            },
            Step::Advance { ms: 600 },
            Step::DeleteEdge { edge },
        ],
        ..Script::default()
    }
}

/// Main CLI application
pub struct SnaplabelApp {
    config: LabelConfig,
}

impl SnaplabelApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(LabelConfig::default())
    }

    pub fn with_config(config: LabelConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LabelConfig {
        &self.config
    }

    /// Merge the config file and flag overrides into the app config
    ///
    /// Returns true if anything was overridden.
    fn apply_overrides(&mut self, cli: &Cli) -> Result<bool> {
        let mut changed = false;
        let mut file_index = None;
        if let Some(path) = &cli.config {
            let content = fs::read_to_string(path)
                .map_err(|e| anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
            self.config = LabelConfig::from_json(&content)
                .with_context(|| format!("Invalid config file '{}'", path.display()))?;
            let raw: serde_json::Value = serde_json::from_str(&content)?;
            if raw.get("initial_index").is_some() {
                file_index = Some(self.config.initial_index);
            }
            changed = true;
        }
        if let Some(samples) = cli.samples {
            // Re-centred only when neither the file nor --index picks an index
            self.config = self.config.clone().with_sample_count(samples);
            if let Some(index) = file_index {
                debug!(index, "Keeping initial index from config file");
                self.config = self.config.clone().with_initial_index(index);
            }
            changed = true;
        }
        if let Some(index) = cli.index {
            self.config = self.config.clone().with_initial_index(index);
            changed = true;
        }
        if let Some(debounce_ms) = cli.debounce_ms {
            self.config = self.config.clone().with_debounce_ms(debounce_ms);
            changed = true;
        }
        self.config.validate()?;
        Ok(changed)
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var("SNAPLABEL_LOG_LEVEL")
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var("SNAPLABEL_LOG_FORMAT")
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("snaplabel v{}", env!("CARGO_PKG_VERSION"));
        }

        let overridden = self.apply_overrides(&cli)?;
        debug!(config = ?self.config, overridden, "Resolved label config");

        match cli.command {
            Commands::Sample {
                source,
                target,
                source_handle,
                target_handle,
                json,
            } => self.sample_command(source, target, source_handle, target_handle, json),
            Commands::Simulate {
                input,
                output,
                json,
            } => self.simulate_command(input, output, json, overridden, cli.verbose),
            Commands::Render { input, output } => {
                self.render_command(input, output, overridden, cli.verbose)
            }
            Commands::Demo => self.demo_command(),
        }
    }

    fn sample_command(
        &self,
        source: Point,
        target: Point,
        source_handle: HandleChoice,
        target_handle: HandleChoice,
        json: bool,
    ) -> Result<()> {
        let samples = sample_with_count(
            source,
            source_handle.into(),
            target,
            target_handle.into(),
            self.config.sample_count,
        );

        if json {
            println!("{}", serde_json::to_string_pretty(samples.points())?);
        } else {
            for (i, p) in samples.iter().enumerate() {
                let marker = if i == self.config.clamped_initial_index() {
                    "  <- label"
                } else {
                    ""
                };
                println!("{:>3}  {:>9.2} {:>9.2}{}", i, p.x, p.y, marker);
            }
        }
        Ok(())
    }

    /// Load a script, replacing its config when flags or a config file were given
    fn load_script(&self, input: Option<PathBuf>, overridden: bool) -> Result<Script> {
        let content = self.read_input(input)?;
        let mut script = Script::from_json(&content)?;
        if overridden {
            script.config = self.config.clone();
        }
        Ok(script)
    }

    fn simulate_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        json: bool,
        overridden: bool,
        verbose: bool,
    ) -> Result<()> {
        let script = self.load_script(input, overridden)?;
        if verbose {
            eprintln!("Replaying {} steps", script.steps.len());
        }
        let frames = simulation::run(&script)?;
        info!(frames = frames.len(), "Simulation complete");
        let rendered = if json {
            serde_json::to_string_pretty(&frames)?
        } else {
            format_frames(&frames)
        };
        self.write_output(output, &rendered)
    }

    fn render_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        overridden: bool,
        verbose: bool,
    ) -> Result<()> {
        let script = match input {
            Some(path) => self.load_script(Some(path), overridden)?,
            None => Script {
                config: self.config.clone(),
                ..Script::default()
            },
        };
        let (scene, _) = simulation::replay(&script)?;
        if verbose {
            eprintln!(
                "Rendering {} nodes and {} edges",
                scene.nodes().len(),
                scene.edges().len()
            );
        }
        self.write_output(output, &scene.to_svg())
    }

    fn demo_command(&self) -> Result<()> {
        let script = demo_script(self.config.clone());
        let captions = [
            "initial render, label at its configured index",
            "geometry quiet for 600ms, drag session built",
            "label pressed",
            "dragged along the edge",
            "dragged further, snapping to the path",
            "released, index resolved from the resting point",
            "target node moved, label follows at the same index",
            "geometry quiet again, drag session rebuilt",
            "edge deleted",
        ];
        let frames = simulation::run(&script)?;
        for (frame, caption) in frames.iter().zip(captions.iter()) {
            println!("# {}", caption);
            println!("{}", format_frames(std::slice::from_ref(frame)));
        }
        Ok(())
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write output to file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &str) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                if content.is_empty() || content.ends_with('\n') {
                    print!("{}", content);
                } else {
                    println!("{}", content);
                }
                io::stdout().flush()?;
            }
        }
        Ok(())
    }
}

impl Default for SnaplabelApp {
    fn default() -> Self {
        Self::new()
    }
}

/// One line per edge per frame
pub fn format_frames(frames: &[Frame]) -> String {
    let mut out = String::new();
    for frame in frames {
        if frame.edges.is_empty() {
            out.push_str(&format!(
                "step {:>3} @ {:>5}ms  (no edges)\n",
                frame.step, frame.time_ms
            ));
        }
        for edge in &frame.edges {
            let mut flags = Vec::new();
            if edge.draggable {
                flags.push("draggable");
            }
            if edge.pending_rebuild {
                flags.push("rebuild pending");
            }
            out.push_str(&format!(
                "step {:>3} @ {:>5}ms  {}  index={:<3} at ({:.2}, {:.2})  [{}]\n",
                frame.step,
                frame.time_ms,
                edge.edge,
                edge.index,
                edge.position.x,
                edge.position.y,
                flags.join(", ")
            ));
        }
    }
    out
}
