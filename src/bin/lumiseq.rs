use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use lumiseq::{GeneratorConfig, GeneratorKind, SEQUENCE_FRAME_RATE, Sequence, generate, parse_csv};

#[derive(Parser, Debug)]
#[command(name = "lumiseq", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a CSV timing export into a sequence JSON document.
    Convert(ConvertArgs),
    /// Generate a procedural sequence JSON document.
    Gen(GenArgs),
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input CSV timing file.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JSON path (defaults to the input path with a .json extension).
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenArgs {
    /// Pattern to generate.
    #[arg(long, value_enum)]
    kind: GeneratorKind,

    /// Number of lights on the string.
    #[arg(long, default_value_t = 28)]
    lights: u32,

    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Convert(args) => cmd_convert(args),
        Command::Gen(args) => cmd_gen(args),
    }
}

fn cmd_convert(args: ConvertArgs) -> anyhow::Result<()> {
    let text = fs::read_to_string(&args.in_path)
        .with_context(|| format!("read timing csv '{}'", args.in_path.display()))?;
    let data = parse_csv(&text)?;

    // The audio track is conventionally named after the timing file.
    let audio = args
        .in_path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| format!("{s}.mp3"));
    let sequence = Sequence::from_frames(&data, SEQUENCE_FRAME_RATE, audio);

    let out = args
        .out
        .unwrap_or_else(|| args.in_path.with_extension("json"));
    write_sequence(&sequence, &out)
}

fn cmd_gen(args: GenArgs) -> anyhow::Result<()> {
    let data = generate(args.kind, args.lights, &GeneratorConfig::default());
    let sequence = Sequence::from_timed(&data, None);
    write_sequence(&sequence, &args.out)
}

fn write_sequence(sequence: &Sequence, path: &Path) -> anyhow::Result<()> {
    fs::write(path, sequence.to_json()?)
        .with_context(|| format!("write sequence '{}'", path.display()))?;
    println!("sequence written to {}", path.display());
    Ok(())
}
