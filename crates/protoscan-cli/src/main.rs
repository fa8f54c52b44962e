//! protoscan - Dump the raw field structure of Protocol Buffers messages
//!
//! This tool walks encoded messages without a schema and prints every
//! field it finds, guessing at embedded messages and strings the way
//! `protoc --decode_raw` does.

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, ValueEnum};
use protoscan_core::{Cursor, ScalarRead, WireType};
use std::fmt::Write as FmtWrite;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace, warn, Level};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// Dump the raw field structure of Protocol Buffers messages
#[derive(Parser, Debug)]
#[command(name = "protoscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    input: InputMode,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Output format
    #[arg(long, value_enum, default_value = "tree")]
    format: OutputFormat,

    /// Deepest level at which length-delimited values are tried as messages
    #[arg(long, default_value = "16")]
    max_depth: usize,

    /// Longest byte payload printed in full; longer ones are shown by digest
    #[arg(long, default_value = "64")]
    max_bytes: usize,

    /// Print per-file field counts after each dump
    #[arg(long)]
    summary: bool,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputMode {
    /// Path to a single encoded message
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a directory of encoded messages to process
    #[arg(short, long)]
    directory: Option<PathBuf>,
}

/// Output format for dumped messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Indented tree of fields, nested messages expanded
    Tree,
    /// One line per top-level field with the byte range of its value
    Fields,
}

/// Rendering options
#[derive(Debug, Clone)]
struct DumpConfig {
    /// Nesting limit for guessing embedded messages
    max_depth: usize,
    /// Byte payloads longer than this are elided
    max_bytes: usize,
    /// Indentation string
    indent_str: String,
}

impl Default for DumpConfig {
    fn default() -> Self {
        Self {
            max_depth: 16,
            max_bytes: 64,
            indent_str: "  ".to_string(),
        }
    }
}

impl DumpConfig {
    fn new() -> Self {
        Self::default()
    }

    fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    fn max_bytes(mut self, len: usize) -> Self {
        self.max_bytes = len;
        self
    }
}

/// Counts gathered while dumping one input
#[derive(Debug, Default, PartialEq, Eq)]
struct DumpStats {
    fields: usize,
    messages: usize,
    groups: usize,
    strings: usize,
    elided: usize,
}

/// Writes the tree rendering of one message
struct TreeDumper<'c> {
    config: &'c DumpConfig,
    out: String,
    stats: DumpStats,
}

impl<'c> TreeDumper<'c> {
    fn new(config: &'c DumpConfig) -> Self {
        Self {
            config,
            out: String::new(),
            stats: DumpStats::default(),
        }
    }

    fn dump(&mut self, data: &[u8]) -> Result<()> {
        let mut cursor = Cursor::new(data);
        self.write_message(&mut cursor, 0)
    }

    fn write_message(&mut self, cursor: &mut Cursor<'_>, depth: usize) -> Result<()> {
        let indent = self.config.indent_str.repeat(depth);

        while cursor.advance() {
            self.stats.fields += 1;
            self.write_field(cursor, depth, &indent)
                .with_context(|| format!("scan stopped at offset {}", cursor.index()))?;
        }

        if let Some(err) = cursor.error() {
            return Err(err).with_context(|| format!("scan stopped at offset {}", cursor.index()));
        }

        Ok(())
    }

    fn write_field(&mut self, cursor: &mut Cursor<'_>, depth: usize, indent: &str) -> Result<()> {
        let field = cursor.field_number();

        match cursor.wire_type() {
            WireType::Varint => {
                let value = cursor.uint64()?;
                write!(self.out, "{indent}{field}: {value}")?;
                if (value as i64) < 0 {
                    write!(self.out, " ({})", value as i64)?;
                }
                writeln!(self.out)?;
            }
            WireType::Fixed64 => {
                let value = cursor.fixed64()?;
                writeln!(self.out, "{indent}{field}: 0x{value:016x}")?;
            }
            WireType::Fixed32 => {
                let value = cursor.fixed32()?;
                writeln!(self.out, "{indent}{field}: 0x{value:08x}")?;
            }
            WireType::LengthDelimited => {
                let payload = cursor.bytes()?;
                self.write_payload(field, payload, depth, indent)?;
            }
            WireType::StartGroup => {
                let contents = cursor.group()?;
                self.stats.groups += 1;
                if depth >= self.config.max_depth {
                    return self.write_raw(field, contents, indent);
                }
                writeln!(self.out, "{indent}{field} {{")?;
                self.write_message(&mut Cursor::new(contents), depth + 1)?;
                writeln!(self.out, "{indent}}}")?;
            }
            WireType::EndGroup => {
                warn!("Unmatched end group for field {} at offset {}", field, cursor.index());
                writeln!(self.out, "{indent}{field}: <end group>")?;
            }
        }

        Ok(())
    }

    fn write_payload(&mut self, field: u32, payload: &[u8], depth: usize, indent: &str) -> Result<()> {
        if depth < self.config.max_depth && looks_like_message(payload) {
            self.stats.messages += 1;
            writeln!(self.out, "{indent}{field} {{")?;
            self.write_message(&mut Cursor::new(payload), depth + 1)?;
            writeln!(self.out, "{indent}}}")?;
            return Ok(());
        }

        if let Some(text) = printable_text(payload) {
            self.stats.strings += 1;
            writeln!(self.out, "{indent}{field}: {text:?}")?;
            return Ok(());
        }

        self.write_raw(field, payload, indent)
    }

    /// Hex for short payloads, length and digest for long ones
    fn write_raw(&mut self, field: u32, payload: &[u8], indent: &str) -> Result<()> {
        if payload.len() > self.config.max_bytes {
            self.stats.elided += 1;
            writeln!(
                self.out,
                "{indent}{field}: <{} bytes, blake3 {}>",
                payload.len(),
                short_digest(payload)
            )?;
        } else {
            writeln!(self.out, "{indent}{field}: <{}>", hex(payload))?;
        }

        Ok(())
    }
}

/// Heuristic: does this payload scan cleanly as a message?
fn looks_like_message(payload: &[u8]) -> bool {
    if payload.is_empty() {
        return false;
    }

    let mut cursor = Cursor::new(payload);
    while cursor.advance() {
        let consumed = match cursor.wire_type() {
            WireType::StartGroup => cursor.group().map(|_| ()),
            WireType::EndGroup => return false,
            _ => cursor.skip(),
        };
        if consumed.is_err() {
            return false;
        }
    }

    cursor.error().is_none() && cursor.index() == cursor.len()
}

/// The payload as text, if it is UTF-8 without stray control characters
fn printable_text(payload: &[u8]) -> Option<&str> {
    let text = std::str::from_utf8(payload).ok()?;
    text.chars()
        .all(|c| !c.is_control() || c == '\n' || c == '\t' || c == '\r')
        .then_some(text)
}

/// First 8 hex chars of the blake3 hash
fn short_digest(payload: &[u8]) -> String {
    let hash = blake3::hash(payload);
    hash.to_hex()[..8].to_string()
}

fn hex(payload: &[u8]) -> String {
    payload
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render one line per top-level field: number, wire type, value byte range
fn render_fields(data: &[u8]) -> Result<(String, DumpStats)> {
    let mut out = String::new();
    let mut stats = DumpStats::default();
    let mut cursor = Cursor::new(data);

    while cursor.advance() {
        stats.fields += 1;
        let field = cursor.field_number();
        let wire_type = cursor.wire_type();
        let start = cursor.index();
        match wire_type {
            WireType::StartGroup => {
                stats.groups += 1;
                cursor.group()?;
            }
            _ => cursor.skip()?,
        }
        writeln!(
            out,
            "{field}\t{wire_type}\t{start}..{}",
            cursor.index()
        )?;
    }

    if let Some(err) = cursor.error() {
        return Err(err).with_context(|| format!("scan stopped at offset {}", cursor.index()));
    }

    Ok((out, stats))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = DumpConfig::new()
        .max_depth(cli.max_depth)
        .max_bytes(cli.max_bytes);

    // Dispatch based on input mode
    if let Some(ref file) = cli.input.file {
        process_single_file(&cli, &config, file)
    } else if let Some(ref directory) = cli.input.directory {
        process_directory(&cli, &config, directory)
    } else {
        bail!("Either --file or --directory must be specified")
    }
}

/// Process a single encoded message
fn process_single_file(cli: &Cli, config: &DumpConfig, file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("Input file does not exist: {}", file.display());
    }
    if !file.is_file() {
        bail!("Input path is not a file: {}", file.display());
    }

    let output = dump_file(cli, config, file)?;
    print!("{output}");
    Ok(())
}

/// Process a directory of encoded messages recursively
fn process_directory(cli: &Cli, config: &DumpConfig, directory: &Path) -> Result<()> {
    if !directory.exists() {
        bail!("Directory does not exist: {}", directory.display());
    }
    if !directory.is_dir() {
        bail!("Path is not a directory: {}", directory.display());
    }

    info!("Scanning directory: {}", directory.display());

    let inputs = collect_inputs(directory);
    let mut failed = 0;

    for path in &inputs {
        println!("==> {} <==", path.display());
        match dump_file(cli, config, path) {
            Ok(output) => print!("{output}"),
            Err(e) => {
                // Log error but continue with other files
                warn!("Error processing {}: {:#}", path.display(), e);
                failed += 1;
            }
        }
    }

    info!("Processed {} files, {} failed", inputs.len(), failed);
    Ok(())
}

/// Find candidate message files below `directory`, in walk order
fn collect_inputs(directory: &Path) -> Vec<PathBuf> {
    WalkDir::new(directory)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.into_path())
        .filter(|path| {
            // Skip directories and hidden files
            let hidden = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false);
            if !path.is_file() || hidden {
                return false;
            }
            if !is_likely_message(path) {
                trace!("Skipping: {}", path.display());
                return false;
            }
            true
        })
        .collect()
}

/// Heuristic to determine if a file holds an encoded message
fn is_likely_message(path: &Path) -> bool {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => matches!(ext.to_lowercase().as_str(), "pb" | "bin" | "binpb"),
        None => true,
    }
}

/// Read and render one file
fn dump_file(cli: &Cli, config: &DumpConfig, path: &Path) -> Result<String> {
    trace!("Reading {}", path.display());
    let data =
        fs::read(path).with_context(|| format!("Failed to read input file: {}", path.display()))?;
    debug!("Read {} bytes from {}", data.len(), path.display());

    let (mut output, stats) = match cli.format {
        OutputFormat::Tree => {
            let mut dumper = TreeDumper::new(config);
            dumper
                .dump(&data)
                .with_context(|| format!("Failed to scan message: {}", path.display()))?;
            (dumper.out, dumper.stats)
        }
        OutputFormat::Fields => render_fields(&data)
            .with_context(|| format!("Failed to scan message: {}", path.display()))?,
    };

    if cli.summary {
        writeln!(
            output,
            "# {} fields, {} messages, {} groups, {} strings, {} elided",
            stats.fields, stats.messages, stats.groups, stats.strings, stats.elided
        )?;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn varint(mut value: u64, out: &mut Vec<u8>) {
        while value >= 0x80 {
            out.push((value as u8 & 0x7F) | 0x80);
            value >>= 7;
        }
        out.push(value as u8);
    }

    fn tag(field: u32, wire_type: WireType, out: &mut Vec<u8>) {
        varint(u64::from(field) << 3 | u64::from(wire_type.as_u8()), out);
    }

    fn len_field(field: u32, payload: &[u8], out: &mut Vec<u8>) {
        tag(field, WireType::LengthDelimited, out);
        varint(payload.len() as u64, out);
        out.extend_from_slice(payload);
    }

    fn sample_message() -> Vec<u8> {
        let mut child = Vec::new();
        tag(1, WireType::Varint, &mut child);
        varint(150, &mut child);

        let mut data = Vec::new();
        tag(1, WireType::Varint, &mut data);
        varint(-2i64 as u64, &mut data);
        len_field(2, b"name", &mut data);
        len_field(3, &child, &mut data);
        tag(4, WireType::Fixed32, &mut data);
        data.extend(7u32.to_le_bytes());
        data
    }

    fn tree(data: &[u8], config: &DumpConfig) -> (String, DumpStats) {
        let mut dumper = TreeDumper::new(config);
        dumper.dump(data).unwrap();
        (dumper.out, dumper.stats)
    }

    #[test]
    fn test_tree_dump() {
        let (out, stats) = tree(&sample_message(), &DumpConfig::new());
        assert_eq!(
            out,
            "1: 18446744073709551614 (-2)\n\
             2: \"name\"\n\
             3 {\n  1: 150\n}\n\
             4: 0x00000007\n"
        );
        assert_eq!(
            stats,
            DumpStats {
                fields: 5,
                messages: 1,
                strings: 1,
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_tree_dump_depth_limit() {
        let config = DumpConfig::new().max_depth(0);
        let (out, stats) = tree(&sample_message(), &config);
        assert!(out.contains("3: <08 96 01>\n"));
        assert_eq!(stats.messages, 0);
    }

    #[test]
    fn test_tree_dump_elides_long_bytes() {
        let payload = vec![0xFFu8; 100];
        let mut data = Vec::new();
        len_field(5, &payload, &mut data);

        let config = DumpConfig::new().max_bytes(16);
        let (out, stats) = tree(&data, &config);
        assert_eq!(
            out,
            format!("5: <100 bytes, blake3 {}>\n", short_digest(&payload))
        );
        assert_eq!(stats.elided, 1);

        // Short payloads are printed in hex
        let mut data = Vec::new();
        len_field(5, &[0xFF, 0x00], &mut data);
        let (out, _) = tree(&data, &config);
        assert_eq!(out, "5: <ff 00>\n");
    }

    fn tree_error(data: &[u8]) -> String {
        let config = DumpConfig::new();
        let mut dumper = TreeDumper::new(&config);
        format!("{:#}", dumper.dump(data).unwrap_err())
    }

    #[test]
    fn test_tree_dump_group() {
        let mut data = Vec::new();
        tag(7, WireType::StartGroup, &mut data);
        tag(1, WireType::Varint, &mut data);
        varint(3, &mut data);
        tag(7, WireType::EndGroup, &mut data);

        let (out, stats) = tree(&data, &DumpConfig::new());
        assert_eq!(out, "7 {\n  1: 3\n}\n");
        assert_eq!(stats.groups, 1);
    }

    #[test]
    fn test_tree_dump_group_depth_limit() {
        // 100k nested groups for field 1, closed in order
        let mut data = vec![0x0B; 100_000];
        data.extend(vec![0x0C; 100_000]);

        let config = DumpConfig::new().max_depth(2);
        let (out, stats) = tree(&data, &config);
        let innermost = &data[3..data.len() - 3];
        assert_eq!(
            out,
            format!(
                "1 {{\n  1 {{\n    1: <{} bytes, blake3 {}>\n  }}\n}}\n",
                innermost.len(),
                short_digest(innermost)
            )
        );
        assert_eq!(stats.groups, 3);
        assert_eq!(stats.elided, 1);

        // Short group contents at the limit are printed in hex
        let config = DumpConfig::new().max_depth(0);
        let (out, _) = tree(&[0x0B, 0x08, 0x03, 0x0C], &config);
        assert_eq!(out, "1: <08 03>\n");
    }

    #[test]
    fn test_tree_dump_reports_corruption() {
        let mut data = sample_message();
        data.truncate(data.len() - 2);

        let message = tree_error(&data);
        assert!(message.contains("scan stopped at offset"));
        assert!(message.contains("unexpected end of input"));
    }

    #[test]
    fn test_render_fields() {
        let (out, stats) = render_fields(&sample_message()).unwrap();
        assert_eq!(
            out,
            "1\tvarint\t1..11\n\
             2\tlen\t12..17\n\
             3\tlen\t18..22\n\
             4\tfixed32\t23..27\n"
        );
        assert_eq!(stats.fields, 4);

        // A group's range starts after its start tag and runs through its end tag
        let (out, stats) = render_fields(&[0x3B, 0x08, 0x03, 0x3C]).unwrap();
        assert_eq!(out, "7\tsgroup\t1..4\n");
        assert_eq!(stats.groups, 1);
    }

    #[test]
    fn test_looks_like_message() {
        assert!(looks_like_message(&[0x08, 0x96, 0x01]));
        assert!(!looks_like_message(b""));
        assert!(!looks_like_message(b"name"));
        // Stray end group
        assert!(!looks_like_message(&[0x0C]));
    }

    #[test]
    fn test_printable_text() {
        assert_eq!(printable_text(b"hello\n"), Some("hello\n"));
        assert_eq!(printable_text(&[0x00, 0x41]), None);
        assert_eq!(printable_text(&[0xC3, 0x28]), None);
    }

    #[test]
    fn test_hex() {
        assert_eq!(hex(&[0x08, 0x96, 0x01]), "08 96 01");
        assert_eq!(hex(&[]), "");
    }

    #[test]
    fn test_is_likely_message() {
        assert!(is_likely_message(Path::new("/tmp/msg.pb")));
        assert!(is_likely_message(Path::new("/tmp/msg.BIN")));
        assert!(is_likely_message(Path::new("/tmp/msg")));
        assert!(!is_likely_message(Path::new("/tmp/test.txt")));
        assert!(!is_likely_message(Path::new("/tmp/test.proto")));
    }

    #[test]
    fn test_collect_inputs() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir(root.join("nested")).unwrap();
        fs::write(root.join("a.pb"), sample_message()).unwrap();
        fs::write(root.join("nested").join("b.binpb"), sample_message()).unwrap();
        fs::write(root.join("notes.txt"), "not a message").unwrap();
        fs::write(root.join(".hidden.pb"), sample_message()).unwrap();

        let inputs = collect_inputs(root);
        assert_eq!(
            inputs,
            vec![root.join("a.pb"), root.join("nested").join("b.binpb")]
        );
    }

    #[test]
    fn test_dump_file_summary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("msg.pb");
        fs::write(&path, sample_message()).unwrap();

        let cli = Cli::parse_from(["protoscan", "--file", "x", "--summary"]);
        let output = dump_file(&cli, &DumpConfig::new(), &path).unwrap();
        assert!(output.starts_with("1: "));
        assert!(output.ends_with("# 5 fields, 1 messages, 0 groups, 1 strings, 0 elided\n"));

        let cli = Cli::parse_from(["protoscan", "--file", "x", "--format", "fields"]);
        let output = dump_file(&cli, &DumpConfig::new(), &path).unwrap();
        assert_eq!(output.lines().count(), 4);
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
