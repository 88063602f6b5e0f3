use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use zenxml::{serialize, Config, ExtraAttributes, Node};

#[derive(Debug, Parser)]
#[command(
    name = "zenxml",
    version,
    about = "Inspect and rewrite tree-style XML documents"
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Re-serialize an XML document with the editor's tab indentation
    Fmt {
        /// Input file (defaults to stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
        /// Output file (defaults to stdout); `.xml` is appended when missing
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
        /// Fail on attributes other than `name` instead of dropping them
        #[arg(long)]
        reject_extra_attributes: bool,
    },
    /// Print a read-only tree listing of an XML document
    View {
        /// Input file (defaults to stdin)
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    match args.command {
        Command::Fmt {
            input,
            output,
            reject_extra_attributes,
        } => {
            let config = Config {
                extra_attributes: if reject_extra_attributes {
                    ExtraAttributes::Reject
                } else {
                    ExtraAttributes::Drop
                },
                ..Config::default()
            };
            let root = load_tree(&input, config)?;
            let xml = serialize(&root);
            write_output(output, xml.as_bytes())
        }
        Command::View { input } => {
            let root = load_tree(&input, Config::default())?;
            let mut stdout = io::stdout();
            print_tree(&root, 0, &mut stdout).context("failed to write stdout")
        }
    }
}

fn load_tree(path: &Option<PathBuf>, config: Config) -> Result<Node> {
    let text = read_input(path)?;
    let source = match path {
        Some(path) => path.display().to_string(),
        None => "<stdin>".to_string(),
    };
    zenxml::parse_with_config(&text, config)
        .with_context(|| format!("failed to parse {source}"))
}

fn read_input(path: &Option<PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            if buffer.trim().is_empty() {
                bail!("no input provided on stdin");
            }
            Ok(buffer)
        }
    }
}

fn write_output(path: Option<PathBuf>, data: &[u8]) -> Result<()> {
    match path {
        Some(path) => {
            let path = ensure_xml_extension(path);
            std::fs::write(&path, data)
                .with_context(|| format!("failed to write output file {}", path.display()))?;
            info!("saved {}", path.display());
            Ok(())
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(data).context("failed to write stdout")?;
            Ok(())
        }
    }
}

/// The editor always saved with a `.xml` extension, appending one if the
/// chosen file name lacked it.
fn ensure_xml_extension(path: PathBuf) -> PathBuf {
    let has_xml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xml"));
    if has_xml {
        path
    } else {
        let mut name = path.into_os_string();
        name.push(".xml");
        PathBuf::from(name)
    }
}

fn print_tree(node: &Node, depth: usize, out: &mut impl Write) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let mut line = format!("{indent}{}", node.tag());
    if let Some(name) = node.attribute() {
        line.push_str(&format!(" [name={name}]"));
    }
    if let Some(text) = node.text() {
        let trimmed = text.trim();
        if !trimmed.is_empty() {
            line.push_str(&format!(" {trimmed:?}"));
        }
    }
    writeln!(out, "{line}")?;
    for child in node.children() {
        print_tree(child, depth + 1, out)?;
    }
    Ok(())
}
