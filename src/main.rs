use clap::{ArgAction, Parser, Subcommand};
use imgtweak::annotate::{AnnotationKind, parse_positive, parse_radius};
use imgtweak::config::{self, AppConfig};
use imgtweak::imaging::{OutputFormat, RustBackend, accepted_upload_extensions, is_accepted_upload};
use imgtweak::output::{self, InfoReport};
use imgtweak::process;
use imgtweak::request::{AnnotationForm, ProcessingRequest};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "imgtweak")]
#[command(about = "Apply one transform or annotation to an image")]
#[command(long_about = "\
Apply one transform or annotation to an image

Each command reads one JPEG or PNG, applies a single transform, and writes
the result into the output directory named after its caption, e.g.
'Grayscale Image.png'.

Annotation coordinates are written as (x, y). Anything left out is filled
from the image size and the [annotation] section of the config:

  Line       (w/8, h/8) → (7w/8, 7h/8)
  Rectangle  (w/4, h/4) → (3w/4, 3h/4)
  Circle     center (w/2, h/2)
  Text       origin (w/4, h/2), bottom-left of the baseline

Run 'imgtweak gen-config' to generate a documented imgtweak.toml.")]
#[command(version)]
struct Cli {
    /// Config file (default: ./imgtweak.toml if present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory the result is written to
    #[arg(long, default_value = ".", global = true)]
    output_dir: PathBuf,

    /// Output format, overriding the config
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args)]
struct InputArgs {
    /// Image to process (.jpg, .jpeg or .png)
    input: PathBuf,
}

#[derive(clap::Args)]
struct AnnotateArgs {
    /// Image to annotate (.jpg, .jpeg or .png)
    input: PathBuf,

    /// Shape to draw
    #[arg(value_enum)]
    kind: AnnotationKind,

    /// Line start or rectangle top-left, "(x, y)"
    #[arg(long, allow_hyphen_values = true)]
    start: Option<String>,

    /// Line end or rectangle bottom-right, "(x, y)"
    #[arg(long, allow_hyphen_values = true)]
    end: Option<String>,

    /// Circle center, "(x, y)"
    #[arg(long, allow_hyphen_values = true)]
    center: Option<String>,

    /// Circle radius in pixels
    #[arg(long, value_parser = parse_radius)]
    radius: Option<f32>,

    /// Text to draw
    #[arg(long)]
    text: Option<String>,

    /// Text origin, bottom-left of the baseline, "(x, y)"
    #[arg(long, allow_hyphen_values = true)]
    position: Option<String>,

    /// Arial, Times New Roman, Courier or Cursive
    #[arg(long)]
    font: Option<String>,

    /// Stroke width in pixels (1-10)
    #[arg(long)]
    width: Option<u32>,

    /// Text scale (0.1-10.0)
    #[arg(long, value_parser = parse_scale)]
    scale: Option<f32>,

    /// Color as #RRGGBB
    #[arg(long)]
    color: Option<String>,
}

impl From<AnnotateArgs> for AnnotationForm {
    fn from(args: AnnotateArgs) -> Self {
        AnnotationForm {
            kind: args.kind,
            start: args.start,
            end: args.end,
            center: args.center,
            radius: args.radius,
            text: args.text,
            position: args.position,
            font: args.font,
            width: args.width,
            scale: args.scale,
            color: args.color,
        }
    }
}

fn parse_scale(input: &str) -> Result<f32, imgtweak::annotate::ParseError> {
    parse_positive("text scale", input)
}

#[derive(Subcommand)]
enum Command {
    /// Print image dimensions and the annotation form defaults
    Info {
        #[command(flatten)]
        input: InputArgs,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Re-encode the image unchanged
    Original(InputArgs),
    /// Convert to RGB channel order
    Rgb(InputArgs),
    /// Reduce to a single luma channel
    Grayscale(InputArgs),
    /// Threshold to black and white
    Binary(InputArgs),
    /// Add DELTA (-100 to 100) to every sample
    Brightness {
        #[command(flatten)]
        input: InputArgs,
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },
    /// Scale every sample by LEVEL / 127 + 1 (LEVEL -100 to 100)
    Contrast {
        #[command(flatten)]
        input: InputArgs,
        #[arg(allow_negative_numbers = true)]
        level: i32,
    },
    /// Draw one line, rectangle, circle or text
    Annotate(AnnotateArgs),
    /// Run a request saved as TOML
    Apply {
        #[command(flatten)]
        input: InputArgs,
        /// Request file, e.g. mode = "brightness" / delta = 20
        #[arg(long)]
        request: PathBuf,
    },
    /// Print a stock imgtweak.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let (input, request) = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Info { input, json } => {
            let config = load_config(cli.config.as_deref(), cli.format)?;
            let bytes = read_upload(&input.input)?;
            let image = process::decode_upload(&RustBackend::new(), &bytes, &config)?;
            let dims = image.dimensions();
            if json {
                println!("{}", serde_json::to_string_pretty(&InfoReport::new(dims))?);
            } else {
                output::print_info(dims, &config.annotation);
            }
            return Ok(());
        }
        Command::Original(input) => (input.input, ProcessingRequest::Original),
        Command::Rgb(input) => (input.input, ProcessingRequest::Rgb),
        Command::Grayscale(input) => (input.input, ProcessingRequest::Grayscale),
        Command::Binary(input) => (input.input, ProcessingRequest::Binary),
        Command::Brightness { input, delta } => {
            (input.input, ProcessingRequest::Brightness { delta })
        }
        Command::Contrast { input, level } => (input.input, ProcessingRequest::Contrast { level }),
        Command::Annotate(args) => {
            let input = args.input.clone();
            let annotation = AnnotationForm::from(args);
            (input, ProcessingRequest::Annotation { annotation })
        }
        Command::Apply { input, request } => (input.input, process::load_request(&request)?),
    };

    let config = load_config(cli.config.as_deref(), cli.format)?;
    let bytes = read_upload(&input)?;
    let processed = process::process_upload(&RustBackend::new(), &bytes, &request, &config)?;
    let path = process::write_result(&processed, &cli.output_dir)?;
    output::print_result(&processed, &path);
    Ok(())
}

/// `warn` by default; each `-v` raises one level. `RUST_LOG` wins.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(
    path: Option<&Path>,
    format: Option<OutputFormat>,
) -> Result<AppConfig, config::ConfigError> {
    let mut config = config::load_config(path)?;
    if let Some(format) = format {
        config.output.format = format;
    }
    Ok(config)
}

/// Read an upload, refusing file types the upload form would not offer.
fn read_upload(path: &Path) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    if !is_accepted_upload(path) {
        return Err(format!(
            "{}: unsupported file type (expected one of: {})",
            path.display(),
            accepted_upload_extensions().join(", ")
        )
        .into());
    }
    log::debug!("reading {}", path.display());
    Ok(std::fs::read(path)?)
}
