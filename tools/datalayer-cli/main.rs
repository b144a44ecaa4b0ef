use clap::{Parser, Subcommand};
use datalayer::prelude::*;
use itertools::Itertools;
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Inspect and convert data layer pipeline configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the configuration exported by a prebuilt layout
    Preset {
        #[arg(value_enum, default_value = "default")]
        preset: LayoutPreset,
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ConfigFormat,
        /// Also save the whole layout as a JSON snapshot
        #[arg(long)]
        snapshot: Option<String>,
    },
    /// Re-encode a configuration through import and export
    Convert {
        /// Input file, or `-` for stdin
        input: String,
        /// Input format; guessed from the file extension when omitted
        #[arg(long, value_enum)]
        from: Option<ConfigFormat>,
        /// Output format
        #[arg(long, value_enum, default_value = "yaml")]
        to: ConfigFormat,
        /// Output file; stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Import a configuration and list its flows, services and edges
    Inspect {
        /// Input file, or `-` for stdin
        input: String,
        #[arg(long, value_enum)]
        from: Option<ConfigFormat>,
    },
}

fn main() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,datalayer=info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Preset {
            preset,
            format,
            snapshot,
        } => run_preset(preset, format, snapshot),
        Command::Convert {
            input,
            from,
            to,
            output,
        } => run_convert(&input, from, to, output),
        Command::Inspect { input, from } => run_inspect(&input, from),
    }
}

fn run_preset(preset: LayoutPreset, format: ConfigFormat, snapshot: Option<String>) {
    let graph = Graph::from_preset(preset)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to build preset {}: {}", preset, e)));

    if let Some(path) = snapshot {
        graph
            .to_layout()
            .save(&path)
            .unwrap_or_else(|e| exit_with_error(&e.to_string()));
        eprintln!("Layout snapshot written to '{}'", path);
    }

    let rendered = render_config(&graph.to_config(), format)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("{}", rendered);
}

fn run_convert(input: &str, from: Option<ConfigFormat>, to: ConfigFormat, output: Option<String>) {
    let graph = load_graph(input, from);
    let rendered = render_config(&graph.to_config(), to)
        .unwrap_or_else(|e| exit_with_error(&e.to_string()));

    match output {
        Some(path) => {
            fs::write(&path, rendered).unwrap_or_else(|e| {
                exit_with_error(&format!("Failed to write output file '{}': {}", path, e))
            });
        }
        None => println!("{}", rendered),
    }
}

fn run_inspect(input: &str, from: Option<ConfigFormat>) {
    let graph = load_graph(input, from);

    println!("Flows ({}):", graph.flows().len());
    for (index, flow) in graph.flows().iter().enumerate() {
        let feeds = |stage: &str| {
            graph
                .edges()
                .iter()
                .filter(|e| e.source == stage)
                .map(|e| e.target.as_str())
                .join(", ")
        };
        println!(
            "  #{} {} [{}] modelize -> {} | egress -> {}",
            index + 1,
            flow.container,
            graph.status_of(&flow.modelize),
            feeds(&flow.modelize),
            feeds(&flow.egress),
        );
    }

    let services = graph
        .nodes()
        .iter()
        .filter_map(|n| n.as_service().map(|s| (n, s)))
        .collect::<Vec<_>>();
    println!("\nServices ({}):", services.len());
    for (node, service) in services {
        println!(
            "  {} {} '{}' every {}m [{}]",
            node.id,
            service.configuration.service_type,
            service.configuration.identifier,
            service.interval,
            node.status(),
        );
    }

    println!("\nEdges ({}):", graph.edges().len());
    for edge in graph.edges() {
        println!(
            "  {} -> {} ({:?}, {:?})",
            edge.source,
            edge.target,
            edge.data.shape,
            edge.indicator()
        );
    }
}

fn load_graph(input: &str, from: Option<ConfigFormat>) -> Graph {
    let text = read_input(input);
    let format = from.unwrap_or_else(|| guess_format(input));
    let parsed = parse_config(&text, format).unwrap_or_else(|e| exit_with_error(&e.to_string()));
    for entry in &parsed.skipped {
        eprintln!("Warning: skipped flow #{}: {}", entry.index + 1, entry.reason);
    }
    Graph::from_config(&parsed.flows).unwrap_or_else(|e| exit_with_error(&e.to_string()))
}

fn read_input(input: &str) -> String {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .unwrap_or_else(|e| exit_with_error(&format!("Failed to read stdin: {}", e)));
        return text;
    }
    fs::read_to_string(input).unwrap_or_else(|e| {
        exit_with_error(&format!("Failed to read input file '{}': {}", input, e))
    })
}

fn guess_format(input: &str) -> ConfigFormat {
    Path::new(input)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse().ok())
        .unwrap_or(ConfigFormat::Json)
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
