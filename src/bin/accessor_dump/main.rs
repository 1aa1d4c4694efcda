//! accessor-dump - print the decoded elements of one accessor.
//!
//! ```text
//! accessor-dump [-v|-vv|-q] <buffer.bin> <accessor.json>
//! ```
//!
//! The JSON is either a bare accessor object, whose dense data then starts
//! at byte 0 of the buffer, or `{"bufferViews": [...], "accessor": {...}}`
//! (needed for sparse accessors).
//! Every element is printed as a JSON array on its own line.

use std::env;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;
use gltf_accessor::document::{AccessorDesc, BufferViewDesc};
use gltf_accessor::source::BinarySource;
use gltf_accessor::view::Accessor;
use gltf_accessor::AccessorType;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

const LOG_QUIET: &str = "error";
const LOG_INFO: &str = "info";
const LOG_DEBUG: &str = "debug";
const LOG_TRACE: &str = "trace";

#[derive(Deserialize)]
#[serde(untagged)]
enum Descriptor {
    Document {
        #[serde(rename = "bufferViews", default)]
        buffer_views: Vec<BufferViewDesc>,
        accessor: AccessorDesc,
    },
    Accessor(AccessorDesc),
}

fn main() {
    let args: Vec<String> = env::args().collect();

    let mut level = LOG_INFO;
    let mut positional: Vec<&str> = Vec::new();
    for arg in &args[1..] {
        match arg.as_str() {
            "-v" | "--verbose" => level = LOG_DEBUG,
            "-vv" | "--trace" => level = LOG_TRACE,
            "-q" | "--quiet" => level = LOG_QUIET,
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-V" | "--version" => {
                println!(
                    "accessor-dump {} (built {})",
                    env!("CARGO_PKG_VERSION"),
                    env!("GLTF_ACCESSOR_BUILD_DATE")
                );
                return;
            }
            _ => positional.push(arg),
        }
    }
    init_logging(level);

    let [bin, json] = positional.as_slice() else {
        print_help();
        std::process::exit(2);
    };

    if let Err(e) = run(Path::new(bin), Path::new(json)) {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_help() {
    eprintln!("Usage: accessor-dump [-v|-vv|-q] <buffer.bin> <accessor.json>");
    eprintln!();
    eprintln!("  <accessor.json>  accessor object, or {{\"bufferViews\": [...], \"accessor\": {{...}}}}");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -v, --verbose    debug logging");
    eprintln!("  -vv, --trace     trace logging");
    eprintln!("  -q, --quiet      errors only");
    eprintln!("  -V, --version    print version");
    eprintln!();
    eprintln!("RUST_LOG overrides the verbosity flags.");
}

fn run(bin: &Path, json: &Path) -> anyhow::Result<()> {
    let source = BinarySource::open(bin).with_context(|| format!("loading {}", bin.display()))?;
    let text = std::fs::read_to_string(json).with_context(|| format!("reading {}", json.display()))?;
    let descriptor: Descriptor =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", json.display()))?;

    let (views, accessor) = match descriptor {
        Descriptor::Document { buffer_views, accessor } => (buffer_views, accessor),
        Descriptor::Accessor(mut accessor) => {
            // Bare accessor: the whole file is its only buffer view.
            let view = BufferViewDesc {
                buffer: 0,
                byte_offset: 0,
                byte_length: source.len(),
                byte_stride: None,
            };
            accessor.buffer_view = Some(0);
            (vec![view], accessor)
        }
    };
    tracing::info!(
        file = %bin.display(),
        bytes = source.len(),
        count = accessor.count,
        ty = %accessor.accessor_type,
        component = %accessor.component_type,
        sparse = accessor.sparse.is_some(),
        "dumping accessor"
    );

    let buffers = [source.as_bytes()];
    match accessor.accessor_type {
        AccessorType::Scalar => dump::<1>(&accessor, &views, &buffers),
        AccessorType::Vec2 => dump::<2>(&accessor, &views, &buffers),
        AccessorType::Vec3 => dump::<3>(&accessor, &views, &buffers),
        AccessorType::Vec4 | AccessorType::Mat2 => dump::<4>(&accessor, &views, &buffers),
        AccessorType::Mat3 => dump::<9>(&accessor, &views, &buffers),
        AccessorType::Mat4 => dump::<16>(&accessor, &views, &buffers),
    }
}

/// Decode as `f64` components, which hold every encoding exactly.
fn dump<const N: usize>(
    accessor: &AccessorDesc,
    views: &[BufferViewDesc],
    buffers: &[&[u8]],
) -> anyhow::Result<()> {
    let view = accessor.resolve::<[f64; N]>(views, buffers)?;

    let mut out = BufWriter::new(std::io::stdout().lock());
    for value in view.iter() {
        serde_json::to_writer(&mut out, &value[..])?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}
