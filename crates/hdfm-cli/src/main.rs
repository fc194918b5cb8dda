/// HDFM command-line tool for the `hdfm` containers that wrap legacy
/// iTunes library files.
///
/// # Command overview
///
/// ```text
/// hdfm <COMMAND> [OPTIONS]
///
/// Commands:
///   inspect    Print the decoded header of an HDFM file
///   validate   Check an HDFM file and its payload for structural correctness
///   extract    Write the (inflated) payload of an HDFM file
///   pack       Wrap a payload in a fresh HDFM header
///   help       Print help information
///
/// Global options:
///   --log-level <LEVEL>    error | warn | info | debug | trace
///   --log-format <FORMAT>  text (default) | json
///   -h, --help             Print help
///   -V, --version          Print version
/// ```
///
/// # Exit codes
///
/// | Code | Meaning                                    |
/// |------|--------------------------------------------|
/// | 0    | Success                                    |
/// | 1    | Error (I/O failure, malformed file, etc.)  |
///
/// All error details and log output go to stderr so stdout can be piped
/// cleanly.
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod cmd_extract;
mod cmd_inspect;
mod cmd_pack;
mod cmd_validate;
mod logging;

use logging::{LogFormat, LogLevel};

// ── CLI root ──────────────────────────────────────────────────────────────────

/// The HDFM container command-line tool.
#[derive(Parser)]
#[command(name = "hdfm", version, about = "iTunes library HDFM container tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level. Defaults to `RUST_LOG`, or `warn` when that is unset.
    #[arg(long, global = true, value_enum)]
    log_level: Option<LogLevel>,

    /// Log output format.
    #[arg(long, global = true, value_enum, default_value = "text")]
    log_format: LogFormat,
}

// ── Sub-commands ──────────────────────────────────────────────────────────────

#[derive(Subcommand)]
enum Commands {
    /// Print the decoded header of an HDFM file.
    Inspect(InspectArgs),
    /// Check an HDFM file and its payload for structural correctness.
    Validate(ValidateArgs),
    /// Write the (inflated) payload of an HDFM file.
    Extract(ExtractArgs),
    /// Wrap a payload in a fresh HDFM header.
    Pack(PackArgs),
}

// ── Argument structs ──────────────────────────────────────────────────────────

/// Arguments for `hdfm inspect`.
///
/// Reads the header and file data without inflating anything, and prints
/// the header fields, the raw reserved values, and whether the file data
/// looks zlib-compressed.
#[derive(clap::Args)]
pub struct InspectArgs {
    /// Path to the HDFM file (e.g. `iTunes Library.itl`).
    pub file: PathBuf,

    /// Include a 16-byte-per-line hex dump of the header block.
    #[arg(long)]
    pub show_hex: bool,
}

/// Arguments for `hdfm validate`.
///
/// Decodes the header, reads the file data, and inflates it when it carries
/// a zlib signature. Exits with code 0 on success and 1 on any problem.
#[derive(clap::Args)]
pub struct ValidateArgs {
    /// Path to the HDFM file to validate.
    pub file: PathBuf,
}

/// Arguments for `hdfm extract`.
///
/// ```text
/// ┌──────────────┬────────────────────────────────────────────────────┐
/// │ Flag         │ Effect                                             │
/// ├──────────────┼────────────────────────────────────────────────────┤
/// │ --inflate    │ auto (default): inflate zlib payloads              │
/// │              │ never: write the payload exactly as stored         │
/// │ --max-size N │ Fail instead of inflating beyond N bytes           │
/// │ -o / --output│ Write to file instead of stdout                    │
/// └──────────────┴────────────────────────────────────────────────────┘
/// ```
#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Path to the HDFM file to extract from.
    pub file: PathBuf,

    /// Write the payload to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Inflate mode: `auto` or `never`.
    #[arg(long, default_value = "auto")]
    pub inflate: String,

    /// Maximum inflated payload size in bytes.
    #[arg(long)]
    pub max_size: Option<usize>,
}

/// Arguments for `hdfm pack`.
///
/// Builds a 132-byte header around the payload, the layout every known
/// iTunes version writes. With `--compress` the payload is deflated first.
#[derive(clap::Args)]
pub struct PackArgs {
    /// Path to the payload to wrap.
    pub input: PathBuf,

    /// Output HDFM file path.
    #[arg(short, long)]
    pub output: PathBuf,

    /// Version string to record in the header, e.g. `8.0`.
    #[arg(long = "app-version")]
    pub app_version: String,

    /// zlib-compress the payload before writing it.
    #[arg(long)]
    pub compress: bool,

    /// zlib compression level (0–9), used with `--compress`.
    #[arg(long, default_value_t = hdfm_codec::compression::DEFAULT_COMPRESSION_LEVEL)]
    pub level: u32,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.log_format, cli.log_level);

    let result = match cli.command {
        Commands::Inspect(args) => cmd_inspect::run(&args),
        Commands::Validate(args) => cmd_validate::run(&args),
        Commands::Extract(args) => cmd_extract::run(&args),
        Commands::Pack(args) => cmd_pack::run(&args),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}
