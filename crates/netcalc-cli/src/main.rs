use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use netcalc_core::settings::Settings;
use netcalc_core::CalcError;
use netcalc_subnet::codec::{parse_prefix, split_cidr};
use netcalc_subnet::mask::{parse_mask, MAX_PREFIX_V4, MAX_PREFIX_V6};
use netcalc_subnet::report::prefix_table;
use netcalc_subnet::{
    parse_ipv4, parse_ipv6_with_prefix, Ipv4Block, Ipv4Report, Ipv6Block, Ipv6Report, NeedReport,
};
use std::fs::File;
use std::io::{self, BufReader, Write};
use std::process::ExitCode;
use tracing::{debug, Level};

mod batch;
mod output;

use batch::{read_inputs, BatchProcessor};
use output::{print_error, print_record, print_records, OutputFormat};

/// IPv4/IPv6 subnet calculator
#[derive(Parser)]
#[command(name = "netcalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output format [default: human, or $NETCALC_OUTPUT]
    #[arg(short, long, value_enum, global = true)]
    output: Option<OutputFormat>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Network, broadcast, masks and host range of an IPv4 subnet
    Ipv4(Ipv4Args),
    /// Smallest IPv4 subnet holding a number of hosts
    Need(NeedArgs),
    /// Start, end and host count of an IPv6 prefix
    Ipv6(Ipv6Args),
    /// Calculate many subnets from a file or stdin, one per line
    Batch(BatchArgs),
    /// Prefix, mask and host count reference table
    Table(TableArgs),
}

#[derive(Parser)]
struct Ipv4Args {
    /// IPv4 address, optionally with /PREFIX (e.g., 10.10.10.10/29)
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Prefix length (0-32)
    #[arg(short, long, conflicts_with = "mask")]
    prefix: Option<String>,

    /// Dotted subnet mask (e.g., 255.255.255.248)
    #[arg(short, long)]
    mask: Option<String>,
}

#[derive(Parser)]
struct NeedArgs {
    /// IPv4 address the subnet is built around
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Number of usable hosts required
    #[arg(short = 'n', long)]
    hosts: u64,
}

#[derive(Parser)]
struct Ipv6Args {
    /// IPv6 address, optionally with /PREFIX (e.g., 2001:db8::1/64)
    #[arg(value_name = "ADDRESS")]
    address: String,

    /// Prefix length (0-128) [default: 64]
    #[arg(short, long)]
    prefix: Option<String>,
}

#[derive(Parser)]
struct BatchArgs {
    /// Input file (use '-' for stdin)
    #[arg(short, long, value_name = "FILE")]
    file: Option<String>,

    /// Number of worker threads [default: CPU cores, or $NETCALC_WORKERS]
    #[arg(short, long)]
    workers: Option<usize>,
}

#[derive(Parser)]
struct TableArgs {
    /// Shortest prefix in the table
    #[arg(long, default_value = "8")]
    from: u8,

    /// Longest prefix in the table
    #[arg(long, default_value = "30")]
    to: u8,
}

const DEFAULT_IPV6_PREFIX: u8 = 64;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let settings = Settings::from_env()?;
    init_logging(cli.verbose, &settings)?;

    let format = match cli.output {
        Some(format) => format,
        None => default_format(&settings)?,
    };

    let mut stdout = io::stdout().lock();
    let outcome = match cli.command {
        Commands::Ipv4(args) => handle_ipv4(&mut stdout, args, format)?,
        Commands::Need(args) => handle_need(&mut stdout, args, format)?,
        Commands::Ipv6(args) => handle_ipv6(&mut stdout, args, format)?,
        Commands::Batch(args) => handle_batch(&mut stdout, args, format, &settings)?,
        Commands::Table(args) => handle_table(&mut stdout, args, format)?,
    };

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            print_error(&mut stdout, &err, format)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Result of a command: validation failures are rendered, not propagated
type Outcome = std::result::Result<(), CalcError>;

fn init_logging(verbose: bool, settings: &Settings) -> Result<()> {
    let level = if verbose {
        Level::DEBUG
    } else {
        match settings.log_level.as_deref() {
            Some(name) => name
                .parse::<Level>()
                .map_err(|_| anyhow!("Invalid value for NETCALC_LOG: {:?}", name))?,
            None => Level::WARN,
        }
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
    Ok(())
}

fn default_format(settings: &Settings) -> Result<OutputFormat> {
    match settings.output.as_deref() {
        Some(name) => OutputFormat::from_str(name, true)
            .map_err(|_| anyhow!("Invalid value for NETCALC_OUTPUT: {:?}", name)),
        None => Ok(OutputFormat::Human),
    }
}

/// Resolve the IPv4 block from inline, `--prefix` or `--mask` input
fn ipv4_block(
    address: &str,
    prefix: Option<&str>,
    mask: Option<&str>,
) -> netcalc_core::Result<Ipv4Block> {
    let (address, inline) = split_optional_prefix(address)?;

    let prefix_len = match (inline, prefix, mask) {
        (Some(p), None, None) | (None, Some(p), None) => parse_prefix(p, MAX_PREFIX_V4)?,
        (None, None, Some(m)) => parse_mask(m)?,
        (None, None, None) => {
            return Err(CalcError::InvalidFormat(
                "missing prefix: use ADDRESS/PREFIX, --prefix or --mask".to_string(),
            ))
        }
        _ => {
            return Err(CalcError::InvalidFormat(
                "prefix given more than once".to_string(),
            ))
        }
    };

    Ipv4Block::new(parse_ipv4(address)?, prefix_len)
}

fn ipv6_block(address: &str, prefix: Option<&str>) -> netcalc_core::Result<Ipv6Block> {
    let (address, inline) = split_optional_prefix(address)?;

    let prefix_len = match (inline, prefix) {
        (Some(p), None) | (None, Some(p)) => parse_prefix(p, MAX_PREFIX_V6)?,
        (None, None) => DEFAULT_IPV6_PREFIX,
        (Some(_), Some(_)) => {
            return Err(CalcError::InvalidFormat(
                "prefix given more than once".to_string(),
            ))
        }
    };

    parse_ipv6_with_prefix(address, prefix_len)
}

fn split_optional_prefix(text: &str) -> netcalc_core::Result<(&str, Option<&str>)> {
    if text.contains('/') {
        let (address, prefix) = split_cidr(text)?;
        Ok((address, Some(prefix)))
    } else {
        Ok((text, None))
    }
}

fn handle_ipv4<W: Write>(out: &mut W, args: Ipv4Args, format: OutputFormat) -> Result<Outcome> {
    debug!("IPv4 calculation for {}", args.address);

    let block = match ipv4_block(&args.address, args.prefix.as_deref(), args.mask.as_deref()) {
        Ok(block) => block,
        Err(err) => return Ok(Err(err)),
    };

    print_record(out, &Ipv4Report::from_block(&block), format)?;
    Ok(Ok(()))
}

fn handle_need<W: Write>(out: &mut W, args: NeedArgs, format: OutputFormat) -> Result<Outcome> {
    debug!("Sizing subnet for {} hosts around {}", args.hosts, args.address);

    let report = match parse_ipv4(&args.address).and_then(|ip| NeedReport::compute(ip, args.hosts)) {
        Ok(report) => report,
        Err(err) => return Ok(Err(err)),
    };

    print_record(out, &report, format)?;
    Ok(Ok(()))
}

fn handle_ipv6<W: Write>(out: &mut W, args: Ipv6Args, format: OutputFormat) -> Result<Outcome> {
    debug!("IPv6 calculation for {}", args.address);

    let block = match ipv6_block(&args.address, args.prefix.as_deref()) {
        Ok(block) => block,
        Err(err) => return Ok(Err(err)),
    };

    print_record(out, &Ipv6Report::from_block(&block), format)?;
    Ok(Ok(()))
}

fn handle_batch<W: Write>(
    out: &mut W,
    args: BatchArgs,
    format: OutputFormat,
    settings: &Settings,
) -> Result<Outcome> {
    let inputs = match args.file.as_deref() {
        None | Some("-") => {
            debug!("Reading from stdin");
            read_inputs(io::stdin().lock())?
        }
        Some(path) => {
            debug!("Reading from: {}", path);
            read_inputs(BufReader::new(File::open(path)?))?
        }
    };

    let processor = BatchProcessor::new(args.workers.or(settings.workers))?;
    debug!(
        "Batch processing {} lines with {} workers",
        inputs.len(),
        processor.thread_count()
    );

    let entries = processor.process(inputs);
    print_records(out, &entries, format)?;
    Ok(Ok(()))
}

fn handle_table<W: Write>(out: &mut W, args: TableArgs, format: OutputFormat) -> Result<Outcome> {
    let rows = match prefix_table(args.from..=args.to) {
        Ok(rows) => rows,
        Err(err) => return Ok(Err(err)),
    };

    print_records(out, &rows, format)?;
    Ok(Ok(()))
}
