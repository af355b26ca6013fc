//! htmldocx CLI - HTML to DOCX conversion tool

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use htmldocx::render::write_json;
use htmldocx::{
    convert::emit, convert_to_model, ConvertOptions, DocumentStats, JsonFormat, MeasurementUnit,
};

#[derive(Parser)]
#[command(name = "htmldocx")]
#[command(version)]
#[command(about = "Convert HTML with inline CSS into Word documents", long_about = None)]
struct Cli {
    /// Input HTML file ("-" reads stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output DOCX file
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert HTML to DOCX
    Convert {
        /// Input HTML file ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (defaults to <input>.docx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Show the parsed document model as JSON
    Inspect {
        /// Input HTML file ("-" reads stdin)
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Print content statistics instead of the model
        #[arg(long)]
        stats: bool,

        #[command(flatten)]
        options: OptionArgs,
    },

    /// Show version information
    Version,
}

/// Conversion flags shared by `convert` and `inspect`.
#[derive(clap::Args, Default)]
struct OptionArgs {
    /// JSON file with conversion options (flags override it)
    #[arg(long, value_name = "FILE", env = "HTMLDOCX_CONFIG")]
    config: Option<PathBuf>,

    /// Default font size in points
    #[arg(long, value_name = "PT")]
    font_size: Option<f32>,

    /// Unit of unit-less CSS numbers
    #[arg(long, value_enum)]
    unit: Option<UnitArg>,

    /// Reject malformed markup instead of repairing it
    #[arg(long)]
    strict: bool,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Document author
    #[arg(long)]
    author: Option<String>,

    /// Body font family
    #[arg(long, value_name = "NAME")]
    font: Option<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum UnitArg {
    /// Typographic points
    Pt,
    /// CSS pixels
    Px,
}

impl From<UnitArg> for MeasurementUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Pt => MeasurementUnit::Points,
            UnitArg::Px => MeasurementUnit::Pixels,
        }
    }
}

impl OptionArgs {
    fn to_options(&self) -> Result<ConvertOptions, Box<dyn std::error::Error>> {
        let mut options = match &self.config {
            Some(path) => ConvertOptions::from_json(&fs::read_to_string(path)?)?,
            None => ConvertOptions::default(),
        };

        if let Some(size) = self.font_size {
            options = options.with_default_font_size(size);
        }
        if let Some(unit) = self.unit {
            options = options.with_measurement_unit(unit.into());
        }
        if self.strict {
            options = options.with_strict_mode(true);
        }
        if let Some(title) = &self.title {
            options = options.with_title(title.as_str());
        }
        if let Some(author) = &self.author {
            options = options.with_author(author.as_str());
        }
        if let Some(font) = &self.font {
            options = options.with_font_family(font.as_str());
        }
        Ok(options)
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            options,
        }) => cmd_convert(&input, output.as_deref(), &options),
        Some(Commands::Inspect {
            input,
            output,
            compact,
            stats,
            options,
        }) => cmd_inspect(&input, output.as_deref(), compact, stats, &options),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), &OptionArgs::default())
            } else {
                println!("{}", "Usage: htmldocx <FILE> [OUTPUT]".yellow());
                println!("       htmldocx --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn read_input(input: &Path) -> io::Result<String> {
    if input == Path::new("-") {
        let mut html = String::new();
        io::stdin().read_to_string(&mut html)?;
        Ok(html)
    } else {
        fs::read_to_string(input)
    }
}

/// Append `.docx` unless the name already ends with it.
fn with_docx_extension(path: &Path) -> PathBuf {
    let name = path.to_string_lossy();
    if name.to_lowercase().ends_with(".docx") {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{}.docx", name))
    }
}

fn output_path(input: &Path, output: Option<&Path>) -> PathBuf {
    match output {
        Some(path) => with_docx_extension(path),
        None if input == Path::new("-") => PathBuf::from("output.docx"),
        None => {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            input.with_file_name(format!("{}.docx", stem))
        }
    }
}

fn cmd_convert(
    input: &Path,
    output: Option<&Path>,
    args: &OptionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let output = output_path(input, output);

    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Reading HTML...");
    let html = read_input(input)?;
    pb.inc(1);

    pb.set_message("Building document...");
    let model = convert_to_model(&html, &options)?;
    pb.inc(1);

    pb.set_message("Writing DOCX...");
    let bytes = emit(&model, &options)?;
    fs::write(&output, &bytes)?;
    pb.inc(1);

    pb.finish_with_message("Done!");

    println!("\n{} {}", "Saved to".green().bold(), output.display());
    print_stats(&model.stats());
    Ok(())
}

fn cmd_inspect(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    stats: bool,
    args: &OptionArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = args.to_options()?;
    let html = read_input(input)?;
    let model = convert_to_model(&html, &options)?;

    if stats {
        println!("{}: {}", "File".bold(), input.display());
        print_stats(&model.stats());
        return Ok(());
    }

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    if let Some(path) = output {
        write_json(&model, format, fs::File::create(path)?)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        write_json(&model, format, io::stdout().lock())?;
    }

    Ok(())
}

fn print_stats(stats: &DocumentStats) {
    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "Paragraphs".bold(), stats.paragraphs);
    println!("{}: {}", "Headings".bold(), stats.headings);
    println!("{}: {} ({} items)", "Lists".bold(), stats.lists, stats.list_items);
    println!("{}: {}", "Tables".bold(), stats.tables);
    println!("{}: {}", "Characters".bold(), stats.characters);
}

fn cmd_version() {
    println!("{} {}", "htmldocx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("HTML to DOCX conversion tool");
    println!();
    println!("License: MIT");
}
