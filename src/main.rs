use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use rsa_demo::config::AppConfig;
use rsa_demo::ui::rsa_demo::DEFAULT_MESSAGE;
use rsa_demo::ui::{create_app, Demo};

#[derive(Debug, Parser)]
#[command(name = "rsa-demo", version, about = "Textbook RSA and salted password hashing demos")]
struct Cli {
    /// JSON configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate a key pair and round-trip a message through it
    Rsa {
        /// Bit length of each prime
        #[arg(long)]
        prime_bits: Option<u64>,

        /// Miller-Rabin rounds per candidate
        #[arg(long)]
        rounds: Option<u32>,

        #[arg(long, default_value = DEFAULT_MESSAGE)]
        message: String,
    },
    /// Register a password, then verify an authentication attempt
    Password,
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = AppConfig::load(cli.config.as_deref())?;

    let demo = match cli.command {
        Command::Rsa {
            prime_bits,
            rounds,
            message,
        } => {
            if let Some(bits) = prime_bits {
                config.rsa.prime_bits = bits;
            }
            if let Some(rounds) = rounds {
                config.rsa.primality_rounds = rounds;
            }
            config.rsa.validate()?;
            Demo::Rsa { message }
        }
        Command::Password => Demo::Password,
    };

    create_app(&demo, &config)
}

fn main() {
    let cli = Cli::parse();

    env_logger::builder()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .parse_default_env()
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error running application: {:#}", e);
        process::exit(1);
    }
}
