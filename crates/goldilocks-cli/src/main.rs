use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod check_pubkey;
mod genkey;
mod hexutil;
mod pubkey;
mod sign;
mod verify;

/// Goldilocks command-line tool for Ed448 keys and signatures.
#[derive(Parser)]
#[command(name = "goldilocks")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random 57-byte Ed448 private seed.
    Genkey {
        /// Output file for the hex seed (stdout if omitted).
        #[arg(short, long)]
        out: Option<String>,
    },
    /// Print the public key for a private seed.
    Pubkey {
        /// File holding the hex-encoded private seed.
        #[arg(short, long)]
        key: String,
    },
    /// Sign a file with Ed448 (or Ed448ph).
    Sign {
        /// File holding the hex-encoded private seed.
        #[arg(short, long)]
        key: String,
        /// Context string (at most 255 bytes).
        #[arg(short, long, default_value = "")]
        context: String,
        /// Use Ed448ph: sign the SHAKE256 digest of the input.
        #[arg(long)]
        prehash: bool,
        /// Input file (use - for stdin).
        input: String,
    },
    /// Verify an Ed448 (or Ed448ph) signature.
    Verify {
        /// Public key as hex, or a file containing it.
        #[arg(short, long)]
        pubkey: String,
        /// Signature as hex.
        #[arg(short, long)]
        sig: String,
        /// Context string used when signing.
        #[arg(short, long, default_value = "")]
        context: String,
        /// The signature is an Ed448ph signature.
        #[arg(long)]
        prehash: bool,
        /// Input file (use - for stdin).
        input: String,
    },
    /// Check that a hex public key decodes to a curve point.
    CheckPubkey {
        /// Public key as hex.
        pubkey: String,
    },
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Commands::Genkey { out } => genkey::run(out.as_deref()),
        Commands::Pubkey { key } => pubkey::run(key),
        Commands::Sign {
            key,
            context,
            prehash,
            input,
        } => sign::run(key, context, *prehash, input),
        Commands::Verify {
            pubkey,
            sig,
            context,
            prehash,
            input,
        } => verify::run(pubkey, sig, context, *prehash, input),
        Commands::CheckPubkey { pubkey } => check_pubkey::run(pubkey),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
