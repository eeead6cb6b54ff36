use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::io;
use tracing_subscriber::EnvFilter;

use polyrecord::{
    equals, hash_of, read_any, CertifiedLetter, Discounted, DisplaySink, Employee, JsonLinesSink,
    Letter, Manager, Money, PrescriptionSunglasses, RecordKind, Roster, SloganTeeShirt,
    Sunglasses, TeeShirt, TextSink,
};

/// Value records with layered display
///
/// `demo` prints the built-in sample records and how they compare;
/// `parse` turns CSV lines from stdin into records of one kind.
#[derive(Parser, Debug)]
#[command(name = "polyrecord", version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging on stderr. Repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Output format for records
    #[arg(long, value_enum, global = true, env = "POLYRECORD_FORMAT", default_value_t = Format::Text)]
    format: Format,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Display text, one record per line
    Text,
    /// JSON snapshot, one record per line
    Json,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the sample records and the equality checks between them
    Demo,

    /// Read CSV lines of one record kind from stdin
    Parse {
        /// Record kind, e.g. employee, manager, certified-letter
        kind: RecordKind,

        /// Stop at the first bad line instead of skipping it
        #[arg(long)]
        strict: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut sink: Box<dyn DisplaySink> = match cli.format {
        Format::Text => Box::new(TextSink::new(io::stdout())),
        Format::Json => Box::new(JsonLinesSink::new(io::stdout())),
    };

    match cli.command {
        Command::Demo => run_demo(sink.as_mut(), cli.format)?,
        Command::Parse { kind, strict } => run_parse(kind, strict, sink.as_mut())?,
    }

    sink.flush()?;
    Ok(())
}

/// RUST_LOG wins; otherwise -v picks the level.
fn init_tracing(verbose: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn run_demo(sink: &mut dyn DisplaySink, format: Format) -> Result<()> {
    tracing::info!("building sample records");

    let emp1 = Employee::new(234, "Johnson")?;
    let emp2 = Employee::new(234, "Johnson")?;
    let twin_manager = Manager::new(234, "Johnson", "IT")?;
    let letter = Letter::new("John", "11/16/2025")?;
    let certified = CertifiedLetter::new("Jane Smith", "11/17/2025", "ABC123")?;
    let shirt = TeeShirt::new("blue", 1000)?;
    let slogan = SloganTeeShirt::new("orange", 1000, Some("Tigers".to_string()))?;

    let mut roster = Roster::new();
    roster.push(emp1.clone());
    roster.push(emp2.clone()); // equal to emp1, not stored
    roster.push(Manager::new(567, "Smith", "IT")?);
    roster.push(twin_manager.clone());
    roster.push(letter);
    roster.push(certified);
    roster.push(Sunglasses::default());
    roster.push(PrescriptionSunglasses::builder().diopter(-1.5).build()?);
    roster.push(shirt.clone());
    roster.push(slogan.clone());

    let emitted = roster.emit_all(sink)?;
    tracing::info!(emitted, "records written");

    if format == Format::Json {
        return Ok(());
    }
    sink.flush()?;

    println!();
    println!("Equality:");
    println!("  {} == {} → {}", emp1, emp2, equals(Some(&emp1), Some(&emp2)));
    println!(
        "  hash({}) == hash({}) → {}",
        emp1,
        emp2,
        hash_of(&emp1) == hash_of(&emp2)
    );
    println!(
        "  {} == {} → {}",
        emp1,
        twin_manager,
        equals(Some(&emp1), Some(&twin_manager))
    );
    println!("  {} == nothing → {}", emp1, equals(Some(&emp1), None));

    println!();
    println!("Discounts:");
    println!("  {} → {}", shirt, Money(shirt.discounted_cents()));
    println!("  {} → {}", slogan, Money(slogan.discounted_cents()));
    println!(
        "  {} with $1.00 promotion → {}",
        slogan,
        Money(slogan.discounted_with_promotion(100))
    );

    Ok(())
}

fn run_parse(kind: RecordKind, strict: bool, sink: &mut dyn DisplaySink) -> Result<()> {
    let stdin = io::stdin();
    let mut parsed = 0usize;
    let mut rejected = 0usize;

    for (index, result) in read_any(kind, stdin.lock()).into_iter().enumerate() {
        let line = index + 1;
        match result {
            Ok(entity) => {
                sink.emit(entity.as_ref())?;
                parsed += 1;
            }
            Err(e) if strict => {
                return Err(e).with_context(|| format!("line {} is not a valid {}", line, kind));
            }
            Err(e) => {
                tracing::warn!(line, error = %e, "skipping invalid record");
                rejected += 1;
            }
        }
    }

    tracing::info!(%kind, parsed, rejected, "input finished");

    if parsed == 0 && rejected > 0 {
        bail!("no valid {} records in input", kind);
    }
    Ok(())
}
