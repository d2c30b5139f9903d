//! CLI tool for salvaging slide decks from LLM responses.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use deck_core::{
    extract_message_content, GenerationRequest, ModelChoice, OutlineFormatter, Salvaged,
    SlideNormalizer, SlideSalvager,
};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Recover slide decks from raw model responses.
#[derive(Parser, Debug)]
#[command(name = "deck-salvage")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Salvage slides from saved model responses
    Salvage(SalvageArgs),
    /// Print the prompt (and optionally the request body) for a topic
    Prompt(PromptArgs),
}

#[derive(clap::Args, Debug)]
struct SalvageArgs {
    /// Response file(s), or "-" for stdin
    #[arg(required = true)]
    input: Vec<PathBuf>,

    /// Inputs are full chat-completions response bodies
    #[arg(short, long)]
    envelope: bool,

    /// Collapse whitespace and compose Unicode in slide text
    #[arg(short, long)]
    clean: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Output directory (default: same as input file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print output to stdout instead of writing to file
    #[arg(short, long)]
    print: bool,
}

#[derive(clap::Args, Debug)]
struct PromptArgs {
    /// Presentation topic
    topic: String,

    /// Number of slides
    #[arg(short = 'n', long, default_value = "10")]
    slides: usize,

    /// Output language
    #[arg(short, long, default_value = "English")]
    language: String,

    /// Category, e.g. Business or Education
    #[arg(long, default_value = "Business")]
    category: String,

    /// Tone, e.g. Professional or Casual
    #[arg(long, default_value = "Professional")]
    tone: String,

    /// Intended audience
    #[arg(long, default_value = "")]
    audience: String,

    /// Points the deck must cover
    #[arg(short, long, default_value = "")]
    key_points: String,

    /// Model to build the request body for
    #[arg(short, long, value_enum, default_value_t = ModelArg::ClaudeSonnet)]
    model: ModelArg,

    /// Print the JSON request body instead of the bare prompt
    #[arg(short, long)]
    body: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    Json,
    Outline,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "slides.json",
            OutputFormat::Outline => "outline.txt",
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModelArg {
    ClaudeSonnet,
    GeminiFlash,
    LlamaSmall,
    Mistral,
    GroqLlama,
    GroqMixtral,
}

impl From<ModelArg> for ModelChoice {
    fn from(arg: ModelArg) -> Self {
        match arg {
            ModelArg::ClaudeSonnet => ModelChoice::ClaudeSonnet,
            ModelArg::GeminiFlash => ModelChoice::GeminiFlash,
            ModelArg::LlamaSmall => ModelChoice::LlamaSmall,
            ModelArg::Mistral => ModelChoice::Mistral,
            ModelArg::GroqLlama => ModelChoice::GroqLlama,
            ModelArg::GroqMixtral => ModelChoice::GroqMixtral,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match &args.command {
        Command::Salvage(salvage_args) => run_salvage(salvage_args, args.verbose),
        Command::Prompt(prompt_args) => run_prompt(prompt_args),
    }
}

/// Salvage every input, reporting failures without stopping.
fn run_salvage(args: &SalvageArgs, verbose: bool) -> Result<()> {
    let salvager =
        SlideSalvager::new().with_normalizer(SlideNormalizer::new().with_clean_text(args.clean));
    let formatter = OutlineFormatter::new();
    let mut failures = 0;

    for input_path in &args.input {
        if verbose {
            eprintln!("Processing: {}", input_path.display());
        }

        match process_input(input_path, args, &salvager) {
            Ok(salvaged) => {
                if verbose {
                    eprintln!(
                        "  Salvaged {} slides ({:?}, {} discarded)",
                        salvaged.draft.len(),
                        salvaged.path,
                        salvaged.discarded
                    );
                }

                let output = match args.format {
                    OutputFormat::Json => format!("{}\n", salvaged.draft.to_json_pretty()?),
                    OutputFormat::Outline => formatter.format_with_newline(&salvaged.draft),
                };

                if args.print || is_stdin(input_path) {
                    print!("{}", output);
                } else {
                    let output_path =
                        get_output_path(input_path, args.output.as_ref(), args.format)?;
                    write_output(&output_path, &output)?;
                    if verbose {
                        eprintln!("Written to: {}", output_path.display());
                    }
                }
            }
            Err(e) => {
                failures += 1;
                eprintln!("Error processing {}: {:#}", input_path.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} inputs failed", failures, args.input.len());
    }

    Ok(())
}

/// Read one input and run it through the salvager.
fn process_input(input_path: &Path, args: &SalvageArgs, salvager: &SlideSalvager) -> Result<Salvaged> {
    let raw = read_input(input_path)?;

    let text = if args.envelope {
        extract_message_content(&raw).context("Failed to read response envelope")?
    } else {
        raw
    };

    salvager.salvage(&text).map_err(|e| {
        log::debug!("Salvage failed: {}", e);
        anyhow::anyhow!("{} ({})", e.user_message(), e)
    })
}

fn run_prompt(args: &PromptArgs) -> Result<()> {
    let request = GenerationRequest {
        topic: args.topic.clone(),
        category: args.category.clone(),
        slide_count: args.slides,
        tone: args.tone.clone(),
        audience: args.audience.clone(),
        key_points: args.key_points.clone(),
        language: args.language.clone(),
    };
    request.validate()?;

    let prompt = request.build_prompt();
    if args.body {
        let model = ModelChoice::from(args.model);
        let body = model.chat_request(&prompt, request.max_tokens());
        log::debug!("Request for {} goes to {}", model.name(), model.config().api_url);
        println!("{}", serde_json::to_string_pretty(&body)?);
    } else {
        println!("{}", prompt);
    }

    Ok(())
}

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read an input file, or stdin for "-".
fn read_input(path: &Path) -> Result<String> {
    let mut raw = String::new();
    if is_stdin(path) {
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read stdin")?;
    } else {
        File::open(path)
            .with_context(|| format!("Failed to open {}", path.display()))?
            .read_to_string(&mut raw)
            .with_context(|| format!("Failed to read {}", path.display()))?;
    }
    Ok(raw)
}

/// Determine the output path for a processed file.
fn get_output_path(
    input_path: &Path,
    output_dir: Option<&PathBuf>,
    format: OutputFormat,
) -> Result<PathBuf> {
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");

    let output_filename = format!("{}.{}", stem, format.extension());

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(output_filename)
        }
        None => match input_path.parent() {
            Some(parent) => parent.join(output_filename),
            None => PathBuf::from(output_filename),
        },
    };

    Ok(output_path)
}

/// Write output to a file.
fn write_output(path: &Path, content: &str) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;

    file.write_all(content.as_bytes())
        .with_context(|| format!("Failed to write to {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_next_to_input() {
        let path = get_output_path(Path::new("runs/reply.txt"), None, OutputFormat::Json).unwrap();
        assert_eq!(path, PathBuf::from("runs/reply.slides.json"));
    }

    #[test]
    fn test_output_path_for_outline() {
        let path = get_output_path(Path::new("reply.txt"), None, OutputFormat::Outline).unwrap();
        assert_eq!(path, PathBuf::from("reply.outline.txt"));
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["deck-salvage", "salvage", "-", "--format", "outline", "-c"])
            .unwrap();
        match args.command {
            Command::Salvage(s) => {
                assert!(s.clean);
                assert!(matches!(s.format, OutputFormat::Outline));
                assert!(is_stdin(&s.input[0]));
            }
            _ => panic!("expected salvage"),
        }
    }

    #[test]
    fn test_model_arg_maps_to_choice() {
        assert_eq!(ModelChoice::from(ModelArg::GroqLlama), ModelChoice::GroqLlama);
    }
}
