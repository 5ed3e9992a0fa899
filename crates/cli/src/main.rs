//! Cache simulator CLI.
//!
//! This binary provides a single entry point for the simulator. It performs:
//! 1. **Demo:** Loads "hello world" at address 0, checks 0xCAFE cold, reads it, and shows the fill.
//! 2. **Trace replay:** Runs an access trace (optionally over a loaded image) and prints statistics.
//! 3. **Dump:** Hex-dumps a backing-store range after an optional image load.

use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use memsim_core::sim::loader;
use memsim_core::{Config, SimError, System};

#[derive(Parser, Debug)]
#[command(
    name = "memsim",
    author,
    version,
    about = "Set-associative cache simulator for a 16-bit CPU",
    long_about = "Simulate a 64 KiB backing store behind an N-way set-associative cache.\n\nExamples:\n  memsim demo\n  memsim --config cache.json trace accesses.txt -v\n  memsim dump --image rom.bin --base 0x100 --start 0x100 --len 64\n\nSet RUST_LOG=debug to see fills and evictions."
)]
struct Cli {
    /// JSON configuration file (geometry, policy, tracing).
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Print every access outcome.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Load "hello world" at 0 and walk through a cold miss at 0xCAFE.
    Demo,

    /// Replay an access trace file.
    Trace {
        /// Trace file: `R <addr>`, `W <addr> <byte>` or a bare address per line.
        path: String,

        /// Raw image to load into the backing store first.
        #[arg(long)]
        image: Option<String>,

        /// Load address of the image.
        #[arg(long, default_value = "0", value_parser = loader::parse_addr)]
        base: u16,
    },

    /// Hex-dump a backing-store range.
    Dump {
        /// Raw image to load into the backing store first.
        #[arg(long)]
        image: Option<String>,

        /// Load address of the image.
        #[arg(long, default_value = "0", value_parser = loader::parse_addr)]
        base: u16,

        /// First address to dump.
        #[arg(long, default_value = "0", value_parser = loader::parse_addr)]
        start: u16,

        /// Number of bytes to dump.
        #[arg(long, default_value_t = 256)]
        len: usize,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("[!] {e}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), SimError> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    let mut system = System::new(&config)?;
    let geometry = *system.geometry();
    println!(
        "Cache: {} B, {}-way, {} sets x {} B blocks, tag/index/offset = {}/{}/{}, policy {:?}",
        geometry.size_bytes(),
        geometry.ways(),
        geometry.num_sets(),
        geometry.block_size(),
        geometry.tag_bits(),
        geometry.index_bits(),
        geometry.offset_bits(),
        config.cache.policy
    );
    println!();

    match cli.command {
        Commands::Demo => cmd_demo(&mut system),
        Commands::Trace { path, image, base } => {
            load_image(&mut system, image.as_deref(), base)?;
            cmd_trace(&mut system, &path, cli.verbose)
        }
        Commands::Dump {
            image,
            base,
            start,
            len,
        } => {
            load_image(&mut system, image.as_deref(), base)?;
            print!("{}", system.dump(start, len));
            Ok(())
        }
    }
}

fn load_image(system: &mut System, image: Option<&str>, base: u16) -> Result<(), SimError> {
    if let Some(path) = image {
        let data = loader::load_binary(path)?;
        system.load_bytes(base, &data)?;
        info!(path, base, len = data.len(), "loaded image");
        println!("[*] Loaded {} bytes from {} at {:#06x}", data.len(), path, base);
    }
    Ok(())
}

/// Runs the cold-miss walkthrough over the reference message.
fn cmd_demo(system: &mut System) -> Result<(), SimError> {
    const MESSAGE: &[u8] = b"hello world\n\0";
    const TARGET: u16 = 0xCAFE;

    system.load_bytes(0, MESSAGE)?;
    print!("{}", system.dump(0, 16));
    println!();

    let fields = system.geometry().decode(TARGET);
    let block = system.geometry().block_range(TARGET);
    println!("[*] Target {TARGET:#06x}: {fields}, block {block}");
    println!("    is_hit before read: {}", system.is_hit(TARGET));

    let value = system.read_byte(TARGET);
    println!("    read_byte -> {value:#04x}");
    println!("    is_hit after read:  {}", system.is_hit(TARGET));

    let whole_block = block.addresses().all(|addr| system.is_hit(addr));
    println!("    all {} addresses of the block hit: {whole_block}", block.len());

    let first = system.read_byte(0);
    println!("[*] read_byte(0x0000) -> {:?}", first as char);
    println!();
    system.stats().print();
    Ok(())
}

fn cmd_trace(system: &mut System, path: &str, verbose: bool) -> Result<(), SimError> {
    let ops = loader::load_trace(path)?;
    println!("[*] Replaying {} accesses from {}", ops.len(), path);

    let outcomes = system.run_trace(&ops);
    if verbose {
        for outcome in &outcomes {
            let status = if outcome.hit { "hit " } else { "miss" };
            let evicted = outcome
                .evicted
                .map(|start| format!(" evicted {start:#06x}"))
                .unwrap_or_default();
            println!(
                "  {:#06x} {:<9} {} way {} value {:#04x}{}",
                outcome.addr,
                outcome.kind.to_string(),
                status,
                outcome.way,
                outcome.value,
                evicted
            );
        }
    }
    println!();
    system.stats().print();
    Ok(())
}
