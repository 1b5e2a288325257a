use anyhow::{Context, Result};
use chartopts::{ChartRequest, ChartType, DefaultTranslator, DesignOptions, compile_request};
use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "chartopts",
    version,
    about = "Compile chart data and style options into renderer-ready chart configurations"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile a chart request (JSON) into chart options.
    Compile(CompileArgs),
    /// Print the default design options of a chart type.
    Defaults(DefaultsArgs),
}

#[derive(Args, Debug)]
struct CompileArgs {
    /// Request file, or '-' for stdin.
    input: PathBuf,
    /// Write the result to a file instead of stdout.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Indent the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
    /// Locale for tooltip numbers (e.g., en, de, fr). Overrides the request's locale.
    #[arg(long)]
    locale: Option<String>,
}

#[derive(Args, Debug)]
struct DefaultsArgs {
    /// Chart type (line, column, pie, funnel, scatter, ...).
    #[arg(short = 't', long)]
    chart_type: ChartType,
    /// Indent the JSON output.
    #[arg(long, default_value_t = false)]
    pretty: bool,
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let s = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(s)
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading request from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compile(args) => cmd_compile(args),
        Command::Defaults(args) => cmd_defaults(args),
    }
}

fn cmd_compile(args: CompileArgs) -> Result<()> {
    let raw = read_input(&args.input)?;
    let mut request: ChartRequest = serde_json::from_str(&raw)
        .with_context(|| format!("decoding chart request from {}", args.input.display()))?;
    if let Some(locale) = args.locale {
        request.locale = Some(locale);
    }

    let compiled = compile_request(&request, &DefaultTranslator)?;
    for alert in &compiled.alerts {
        eprintln!("warning: {}", alert.message(&DefaultTranslator));
    }

    let json = to_json(&compiled, args.pretty)?;
    match args.out.as_ref() {
        Some(path) => {
            std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            eprintln!(
                "Wrote {} series to {}",
                compiled.options.series.len(),
                path.display()
            );
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_defaults(args: DefaultsArgs) -> Result<()> {
    let design = DesignOptions::for_chart_type(args.chart_type);
    println!("{}", to_json(&design, args.pretty)?);
    Ok(())
}
