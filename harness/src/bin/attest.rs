//! `attest`: encode, chunk and inspect verification metadata.
//!
//! Output is `key=value` lines on stdout; logs go to stderr and are filtered
//! by `RUST_LOG`.

use std::path::PathBuf;

use anyhow::Context;
use attest_harness::blueprint::Blueprint;
use attest_harness::submission::MetadataRequest;
use attest_kernel::metadata::chunk::{ChunkPolicy, DEFAULT_CHUNK_HEX_CHARS};
use attest_resolve::classify::{classify, is_hash_like_title};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_LOG_FILTER: &str = "attest=info,attest_harness=info,attest_resolve=info,attest_kernel=info";

#[derive(Parser)]
#[command(name = "attest")]
#[command(about = "Canonical verification metadata for Cardano validators", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a metadata request file and print its CBOR, chunks and digest.
    Encode {
        /// JSON request: sourceUrl, commit, sourcePath, compiler, compilerVersion, parameters.
        #[arg(long, short)]
        request: PathBuf,

        /// Chunk width in hex characters (diagnostics only; the protocol uses 128).
        #[arg(long, default_value_t = DEFAULT_CHUNK_HEX_CHARS)]
        chunk_hex_chars: usize,
    },
    /// List the validators of a blueprint with their parameter classifications.
    Inspect {
        /// Path to plutus.json.
        #[arg(long, short)]
        blueprint: PathBuf,
    },
    /// Split arbitrary hex into chunks.
    Chunk {
        hex: String,

        #[arg(long, default_value_t = DEFAULT_CHUNK_HEX_CHARS)]
        chunk_hex_chars: usize,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Encode {
            request,
            chunk_hex_chars,
        } => encode(&request, chunk_hex_chars),
        Commands::Inspect { blueprint } => inspect(&blueprint),
        Commands::Chunk {
            hex,
            chunk_hex_chars,
        } => chunk(&hex, chunk_hex_chars),
    }
}

fn encode(path: &std::path::Path, chunk_hex_chars: usize) -> anyhow::Result<()> {
    let request = MetadataRequest::read(path)
        .with_context(|| format!("loading request {}", path.display()))?;
    let submission = request
        .encode(&ChunkPolicy { chunk_hex_chars })
        .context("encoding metadata")?;

    println!("cbor={}", submission.cbor_hex);
    println!("bytes={}", submission.cbor_hex.len() / 2);
    for (i, c) in submission.chunks.iter().enumerate() {
        println!("chunk[{i}]={c}");
    }
    println!("label={}", submission.envelope.label());
    println!("envelope={}", submission.envelope.to_cbor_hex());
    println!("digest={}", submission.digest);
    Ok(())
}

fn inspect(path: &std::path::Path) -> anyhow::Result<()> {
    let blueprint =
        Blueprint::read(path).with_context(|| format!("loading blueprint {}", path.display()))?;

    println!(
        "compiler={} {}",
        blueprint.compiler_name.as_deref().unwrap_or("unknown"),
        blueprint.compiler_version.as_deref().unwrap_or("unknown")
    );
    println!("plutus_version={}", blueprint.plutus_version);
    for v in &blueprint.validators {
        let purposes: Vec<&str> = v.purposes.iter().map(String::as_str).collect();
        println!(
            "validator={} hash={} purposes={}",
            v.id,
            v.unparameterized_hash,
            purposes.join(",")
        );
        for (i, p) in v.parameters.iter().enumerate() {
            let title = p.display_title(i);
            let hint = if is_hash_like_title(&title) {
                " reference-capable"
            } else {
                ""
            };
            println!(
                "  param[{i}]={title} type={} class={}{hint}",
                p.schema,
                classify(&p.schema)
            );
        }
    }
    for s in &blueprint.skipped {
        println!("skipped={:?} reason={}", s.title, s.reason);
    }
    Ok(())
}

fn chunk(hex: &str, chunk_hex_chars: usize) -> anyhow::Result<()> {
    let chunks = ChunkPolicy { chunk_hex_chars }.split(hex.trim())?;
    for (i, c) in chunks.iter().enumerate() {
        println!("chunk[{i}]={c}");
    }
    Ok(())
}
