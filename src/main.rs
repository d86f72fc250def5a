//! # Vozy CLI
//!
//! Command-line interface for VOZY Bluetooth LE receipt printers.
//!
//! ## Usage
//!
//! ```bash
//! # Find a printer and report which characteristic it prints through
//! vozy connect
//!
//! # Print a queue ticket
//! vozy queue PEDIATRICS 42
//!
//! # Show the bytes instead of printing
//! vozy queue PEDIATRICS 42 --dry-run --hex
//!
//! # Look up a bill and print it on a Star printer
//! vozy bill 0123-4567 R12 --model tsp650ii
//!
//! # Run the HTTP server against a simulated printer
//! vozy serve --mock --listen 127.0.0.1:8080
//! ```
//!
//! Logging goes to stderr and is controlled by `RUST_LOG`
//! (default `vozy=info`).

use clap::{Args, Parser, Subcommand};
use std::io::Write;
use std::time::Duration;

use tracing_subscriber::EnvFilter;
use vozy::{
    VozyError,
    connection::{ConnectOptions, PrinterConnection},
    lookup::{self, DEFAULT_UPSTREAM},
    protocol::Codepage,
    receipt::{BillReceipt, EncoderConfig, Layout, QueueTicket, Receipt},
    server::{self, ServerConfig},
    transport::{BtleplugPlatform, MockDevice, MockPlatform, Platform},
};

/// Vozy - Bluetooth LE receipt printer utility
#[derive(Parser, Debug)]
#[command(name = "vozy")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to a printer and show the diagnostic log
    Connect {
        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// Print a queue ticket
    Queue {
        /// Department name printed under the header
        department: String,

        /// Ticket number (printed zero-padded to three digits)
        number: u32,

        #[command(flatten)]
        printer: PrinterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Look up a bill and print a summary
    Bill {
        /// Account number
        account: String,

        /// Route code
        route: String,

        /// Bill search endpoint
        #[arg(long, default_value = DEFAULT_UPSTREAM)]
        upstream: String,

        #[command(flatten)]
        printer: PrinterArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Run the HTTP server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:8080")]
        listen: String,

        /// Bill search endpoint
        #[arg(long, default_value = DEFAULT_UPSTREAM)]
        upstream: String,

        #[command(flatten)]
        printer: PrinterArgs,
    },
}

/// Printer selection and encoding options shared by all commands.
#[derive(Args, Debug)]
struct PrinterArgs {
    /// Advertised name prefix of the printer
    #[arg(long, default_value = "VOZY")]
    prefix: String,

    /// Seconds to scan for a matching printer
    #[arg(long, default_value = "10")]
    scan_timeout: u64,

    /// Printer model preset (generic-58, generic-80, tsp650ii)
    #[arg(long, default_value = "generic-58")]
    model: String,

    /// Characters per line (defaults to the model's)
    #[arg(long)]
    columns: Option<u8>,

    /// Character table (ascii, cp437)
    #[arg(long, value_parser = Codepage::parse)]
    codepage: Option<Codepage>,

    /// Use a simulated printer instead of Bluetooth
    #[arg(long)]
    mock: bool,
}

impl PrinterArgs {
    fn options(&self) -> ConnectOptions {
        ConnectOptions {
            scan_timeout: Duration::from_secs(self.scan_timeout),
            ..ConnectOptions::default()
        }
        .with_name_prefix(&self.prefix)
    }

    fn encoder(&self) -> Result<EncoderConfig, VozyError> {
        let config = EncoderConfig {
            printer_model: Some(self.model.clone()),
            columns: self.columns,
            language: None,
            codepage: self.codepage,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Dry-run output options.
#[derive(Args, Debug)]
struct OutputArgs {
    /// Write the encoded bytes to stdout instead of printing
    #[arg(long)]
    dry_run: bool,

    /// With --dry-run, write a hex dump instead of raw bytes
    #[arg(long, requires = "dry_run")]
    hex: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vozy=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<(), VozyError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Connect { printer } => dispatch(&printer, Job::Connect).await,

        Commands::Queue {
            department,
            number,
            printer,
            output,
        } => {
            let ticket = QueueTicket::new(department, number);
            // stderr: stdout may carry the raw bytes of a dry run
            eprintln!(
                "Queue ticket {} for {}",
                ticket.display_number(),
                ticket.department
            );
            print_layout(ticket, &printer, &output).await
        }

        Commands::Bill {
            account,
            route,
            upstream,
            printer,
            output,
        } => {
            eprintln!(
                "Looking up bill for account {} (route {})...",
                account, route
            );
            let client = reqwest::Client::new();
            let record = lookup::fetch_bill(&client, &upstream, &account, &route).await?;
            match &record.error {
                None => eprintln!(
                    "Amount due: {} (due {})",
                    record.amount.as_deref().unwrap_or("-"),
                    record.due_date.as_deref().unwrap_or("-")
                ),
                Some(error) => eprintln!("{}", error),
            }
            print_layout(BillReceipt::new(record), &printer, &output).await
        }

        Commands::Serve {
            listen,
            upstream,
            printer,
        } => {
            let config = ServerConfig {
                listen_addr: listen,
                bill_upstream: upstream,
                encoder: printer.encoder()?,
            };
            dispatch(&printer, Job::Serve(config)).await
        }
    }
}

/// Work that needs a printer connection.
enum Job {
    Connect,
    Print(Vec<u8>),
    Serve(ServerConfig),
}

/// Run `job` on the Bluetooth backend, or the simulated one under `--mock`.
async fn dispatch(args: &PrinterArgs, job: Job) -> Result<(), VozyError> {
    let options = args.options();
    if args.mock {
        let name = format!("{}-MOCK", args.prefix);
        println!("Using simulated printer \"{}\"", name);
        let platform = MockPlatform::new().with_device(MockDevice::demo_printer(name));
        execute(PrinterConnection::new(platform, options), job).await
    } else {
        let platform = BtleplugPlatform::new()
            .await
            .with_scan_timeout(options.scan_timeout);
        execute(PrinterConnection::new(platform, options), job).await
    }
}

async fn execute<P: Platform + 'static>(
    mut connection: PrinterConnection<P>,
    job: Job,
) -> Result<(), VozyError> {
    match job {
        Job::Connect => connect_printer(&mut connection).await,
        Job::Print(payload) => {
            connect_printer(&mut connection).await?;
            println!("Printing {} bytes...", payload.len());
            connection.write(&payload).await?;
            println!("Printed successfully!");
            Ok(())
        }
        Job::Serve(config) => server::serve(config, connection).await,
    }
}

/// Encode `layout` and either dump or print it.
async fn print_layout<L: Layout>(
    layout: L,
    args: &PrinterArgs,
    output: &OutputArgs,
) -> Result<(), VozyError> {
    let payload = Receipt::new(layout, args.encoder()?).encode();

    if output.dry_run {
        let mut stdout = std::io::stdout();
        if output.hex {
            writeln!(stdout, "{}", hex_dump(&payload))?;
        } else {
            stdout.write_all(&payload)?;
        }
        stdout.flush()?;
        return Ok(());
    }

    dispatch(args, Job::Print(payload)).await
}

/// Connect and echo the diagnostic log.
async fn connect_printer<P: Platform>(
    connection: &mut PrinterConnection<P>,
) -> Result<(), VozyError> {
    println!(
        "Connecting to printer (name prefix \"{}\")...",
        connection.options().name_prefix
    );
    connection.connect().await;
    for line in connection.log_messages() {
        println!("  {}", line);
    }

    ensure_ready(connection)?;
    println!("Printer ready");
    Ok(())
}

/// The recorded reason as an error when the attempt did not reach ready.
fn ensure_ready<P: Platform>(connection: &PrinterConnection<P>) -> Result<(), VozyError> {
    if connection.is_ready() {
        return Ok(());
    }
    let reason = connection.last_error().unwrap_or("not connected");
    Err(VozyError::PrinterUnavailable(reason.to_string()))
}

/// 16 bytes per line: offset, hex, ASCII.
fn hex_dump(bytes: &[u8]) -> String {
    bytes
        .chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let hex: Vec<String> = chunk.iter().map(|b| format!("{:02X}", b)).collect();
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
                .collect();
            format!("{:08X}  {:<47}  {}", i * 16, hex.join(" "), ascii)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// TESTS
// ============================================================================
