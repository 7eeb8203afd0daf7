//! Command-line interface for `rcon-dfa`.

#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use aes_core::{invert_key_schedule, Aes128Key, Block};
use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use dfa_sim::{random_key, FaultyDevice, RconFault};
use dfa_solver::{format_hex_blocks, recover_with, Recovery, SampleSet, StageReport};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Differential fault analysis of AES-128 with a corrupted round constant.
#[derive(Parser)]
#[command(
    name = "aesdfa",
    version,
    author,
    about = "Recover AES-128 keys from correct/faulty ciphertext pairs (round-constant fault)"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Recover the master key from correct/faulty ciphertexts.
    Recover {
        #[command(flatten)]
        input: RecoverInput,
        /// Print the partial key after every stage.
        #[arg(long, short)]
        verbose: bool,
    },
    /// Produce a corpus from the simulated faulty device.
    Simulate {
        /// AES-128 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// XOR mask applied to the round constant (decimal or 0x-prefixed hex).
        #[arg(long, default_value = "0x10", value_parser = parse_byte)]
        mask: u8,
        /// Index of the corrupted round constant.
        #[arg(long, default_value_t = RconFault::LAST_ROUNDS_INDEX)]
        index: usize,
        /// Number of plaintexts to encrypt.
        #[arg(long, default_value_t = 3)]
        samples: usize,
        /// Optional RNG seed for reproducible plaintexts.
        #[arg(long)]
        seed: Option<u64>,
        #[command(flatten)]
        output: SimulateOutput,
    },
    /// Run the key schedule backward from a round-10 key.
    InvertSchedule {
        /// Round-10 key as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        round_key: String,
    },
    /// Run a local demo: random key, simulated fault, recovery.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Pairs collected per attempt.
        #[arg(long, default_value_t = 3)]
        samples: usize,
        /// Attempts with fresh plaintexts before giving up.
        #[arg(long, default_value_t = 8)]
        attempts: usize,
    },
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct RecoverInput {
    /// Hex dump of correct ciphertexts, one block per line.
    #[arg(long, value_name = "FILE", requires = "faulty", conflicts_with = "corpus")]
    correct: Option<PathBuf>,
    /// Hex dump of faulty ciphertexts, one block per line.
    #[arg(long, value_name = "FILE", requires = "correct", conflicts_with = "corpus")]
    faulty: Option<PathBuf>,
    /// Serialized corpus written by `simulate --out`.
    #[arg(long, value_name = "FILE")]
    corpus: Option<PathBuf>,
}

#[derive(Args)]
#[group(required = true, multiple = true)]
struct SimulateOutput {
    /// Write a serialized corpus.
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,
    /// Write correct ciphertexts as a hex dump.
    #[arg(long, value_name = "FILE", requires = "faulty_out")]
    correct_out: Option<PathBuf>,
    /// Write faulty ciphertexts as a hex dump.
    #[arg(long, value_name = "FILE", requires = "correct_out")]
    faulty_out: Option<PathBuf>,
    /// Write the plaintexts as a hex dump.
    #[arg(long, value_name = "FILE")]
    plain_out: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Recover { input, verbose } => cmd_recover(&input, verbose),
        Commands::Simulate {
            key_hex,
            mask,
            index,
            samples,
            seed,
            output,
        } => cmd_simulate(&key_hex, mask, index, samples, seed, &output),
        Commands::InvertSchedule { round_key } => cmd_invert(&round_key),
        Commands::Demo {
            seed,
            samples,
            attempts,
        } => cmd_demo(seed, samples, attempts),
    }
}

fn cmd_recover(input: &RecoverInput, verbose: bool) -> Result<()> {
    let samples = load_samples(input)?;
    println!("loaded {} ciphertext pairs", samples.len());
    let found = run_recovery(&samples, verbose)?;
    print_recovery(&found);
    Ok(())
}

fn cmd_simulate(
    key_hex: &str,
    mask: u8,
    index: usize,
    samples: usize,
    seed: Option<u64>,
    output: &SimulateOutput,
) -> Result<()> {
    if samples == 0 {
        bail!("at least one sample is required");
    }
    let key = parse_key_hex(key_hex)?;
    let fault = RconFault::new(index, mask).context("build fault")?;
    let device = FaultyDevice::new(&key, fault);
    let mut rng = seeded_rng(seed);
    let plaintexts = dfa_sim::random_plaintexts(&mut rng, samples);
    let corpus = device.collect(&plaintexts).context("collect samples")?;

    if let Some(path) = &output.out {
        let bytes = corpus.to_bytes().context("serialize corpus")?;
        write_file(path, bytes)?;
    }
    if let (Some(correct), Some(faulty)) = (&output.correct_out, &output.faulty_out) {
        write_file(correct, corpus.correct_hex())?;
        write_file(faulty, corpus.faulty_hex())?;
    }
    if let Some(path) = &output.plain_out {
        write_file(path, format_hex_blocks(&plaintexts))?;
    }
    println!(
        "simulated {} pairs with RCON[{}] ^= {:#04x}",
        corpus.len(),
        fault.index(),
        fault.mask()
    );
    Ok(())
}

fn cmd_invert(round_key_hex: &str) -> Result<()> {
    let round_key = parse_block_hex(round_key_hex).context("parse round key")?;
    let master = invert_key_schedule(&round_key);
    println!("master key: {}", hex::encode(master.as_bytes()));
    Ok(())
}

fn cmd_demo(seed: Option<u64>, samples: usize, attempts: usize) -> Result<()> {
    if samples == 0 || attempts == 0 {
        bail!("samples and attempts must be positive");
    }
    let mut rng = seeded_rng(seed);
    let key = random_key(&mut rng);
    let fault = RconFault::random_last_rounds(&mut rng);
    let device = FaultyDevice::new(&key, fault);
    println!("demo key: {}", hex::encode(key.as_bytes()));
    println!("fault: RCON[{}] ^= {:#04x}", fault.index(), fault.mask());

    for attempt in 1..=attempts {
        let corpus = device
            .collect_random(&mut rng, samples)
            .context("collect samples")?;
        match run_recovery(&corpus, false) {
            Ok(found) => {
                print_recovery(&found);
                if found.master_key != key {
                    bail!("demo recovered a different key");
                }
                return Ok(());
            }
            Err(err) => println!("attempt {attempt}: {err:#}; collecting new plaintexts"),
        }
    }
    bail!("no unique key after {attempts} attempts")
}

fn run_recovery(samples: &SampleSet, verbose: bool) -> Result<Recovery> {
    let found = recover_with(samples, |report: &StageReport| {
        if verbose {
            println!("{report}");
        }
    })
    .context("key recovery failed")?;
    Ok(found)
}

fn print_recovery(found: &Recovery) {
    println!("last round key: {}", hex::encode(found.last_round_key));
    println!(
        "deltas: {:02x} {:02x} {:02x}",
        found.deltas[0], found.deltas[1], found.deltas[2]
    );
    println!("master key: {}", hex::encode(found.master_key.as_bytes()));
}

fn load_samples(input: &RecoverInput) -> Result<SampleSet> {
    if let Some(path) = &input.corpus {
        let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
        return SampleSet::from_bytes(&bytes).context("deserialize corpus");
    }
    match (&input.correct, &input.faulty) {
        (Some(correct), Some(faulty)) => {
            let correct_text = read_text(correct)?;
            let faulty_text = read_text(faulty)?;
            SampleSet::from_hex(&correct_text, &faulty_text).context("parse hex dumps")
        }
        _ => bail!("pass either --corpus or both --correct and --faulty"),
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("read {}", path.display()))
}

fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("write {}", path.display()))
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let digits: String = hex_str.split_whitespace().collect();
    let bytes = hex::decode(&digits).context("decode hex")?;
    if bytes.len() != 16 {
        bail!("expected 16 bytes (32 hex characters), got {}", bytes.len());
    }
    let mut block = [0u8; 16];
    block.copy_from_slice(&bytes);
    Ok(block)
}

fn parse_key_hex(hex_str: &str) -> Result<Aes128Key> {
    parse_block_hex(hex_str)
        .map(Aes128Key::from)
        .context("parse AES-128 key")
}

fn parse_byte(text: &str) -> Result<u8, String> {
    let text = text.trim();
    let parsed = match text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        Some(digits) => u8::from_str_radix(digits, 16),
        None => text.parse::<u8>(),
    };
    parsed.map_err(|err| format!("invalid byte {text:?}: {err}"))
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    let mut seed_bytes = [0u8; 32];
    match seed {
        Some(value) => seed_bytes[..8].copy_from_slice(&value.to_le_bytes()),
        None => rand::rngs::OsRng.fill_bytes(&mut seed_bytes),
    }
    ChaCha20Rng::from_seed(seed_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_bytes_in_decimal_and_hex() {
        assert_eq!(parse_byte("16"), Ok(16));
        assert_eq!(parse_byte("0x10"), Ok(16));
        assert_eq!(parse_byte("0XfF"), Ok(255));
        assert!(parse_byte("256").is_err());
        assert!(parse_byte("0xgg").is_err());
    }

    #[test]
    fn parses_keys_with_spaces() {
        let key = parse_key_hex("00 11 22 33 44 55 66 77 88 99 aa bb cc dd ee ff").expect("key");
        assert_eq!(key.as_bytes()[15], 0xff);
        assert!(parse_key_hex("0011").is_err());
    }

    #[test]
    fn recover_requires_an_input() {
        assert!(Cli::try_parse_from(["aesdfa", "recover"]).is_err());
        assert!(Cli::try_parse_from(["aesdfa", "recover", "--correct", "c.txt"]).is_err());
        assert!(Cli::try_parse_from([
            "aesdfa",
            "recover",
            "--correct",
            "c.txt",
            "--faulty",
            "f.txt"
        ])
        .is_ok());
        assert!(Cli::try_parse_from(["aesdfa", "recover", "--corpus", "c.bin"]).is_ok());
    }

    #[test]
    fn invert_schedule_of_fips_round_key() {
        let round_key = parse_block_hex("13111d7fe3944a17f307a78b4d2b30c5").expect("block");
        assert_eq!(
            hex::encode(invert_key_schedule(&round_key).as_bytes()),
            "000102030405060708090a0b0c0d0e0f"
        );
    }
}
