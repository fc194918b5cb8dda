/// Implementation of `hdfm inspect`.
///
/// Reads the header and the stored file data, then prints the decoded
/// fields. Nothing is inflated; the compression line only reports what the
/// leading bytes of the file data look like.
///
/// # Output format
///
/// ```text
/// Header:    hdfm v8.0, 132 bytes
/// Reserved:  0000 ed1b 000e 0001
/// Padding:   112 bytes (14 non-zero)
/// File data: 60567 bytes at offset 132, zlib-compressed (78 9c)
/// ```
use std::fs::File;
use std::io::BufReader;

use anyhow::{Context, Result};
use hdfm_codec::{PayloadKind, classify};
use hdfm_wire::Hdfm;

use crate::InspectArgs;

/// Run the `hdfm inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or its header is
/// malformed.
pub fn run(args: &InspectArgs) -> Result<()> {
    let file =
        File::open(&args.file).with_context(|| format!("cannot open {}", args.file.display()))?;
    let total_length = file
        .metadata()
        .with_context(|| format!("cannot stat {}", args.file.display()))?
        .len();

    let hdfm = Hdfm::read(&mut BufReader::new(file), total_length)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let header = &hdfm.header;

    let [a, b, c, d] = header.reserved_fields();
    let non_zero = header.padding.iter().filter(|&&byte| byte != 0).count();

    println!("Header:    hdfm v{}, {} bytes", header.version, header.header_length);
    println!("Reserved:  {a:04x} {b:04x} {c:04x} {d:04x}");
    println!("Padding:   {} bytes ({non_zero} non-zero)", header.padding.len());
    println!(
        "File data: {} bytes at offset {}, {}",
        hdfm.file_data.len(),
        header.header_length,
        compression_label(&hdfm.file_data)
    );

    if args.show_hex {
        let mut raw = Vec::with_capacity(header.encoded_len());
        header
            .write_to(&mut raw)
            .context("cannot re-encode header for hex dump")?;
        println!("Hex dump:");
        for line in hex_dump(&raw) {
            println!("  {line}");
        }
    }

    Ok(())
}

fn compression_label(data: &[u8]) -> String {
    match classify(data) {
        PayloadKind::ProbablyCompressed => {
            format!("zlib-compressed ({:02x} {:02x})", data[0], data[1])
        }
        PayloadKind::Plain => "not compressed".to_string(),
    }
}

/// Format `raw` as `offset  hex  ascii` lines, 16 bytes each.
fn hex_dump(raw: &[u8]) -> Vec<String> {
    raw.chunks(16)
        .enumerate()
        .map(|(i, chunk)| {
            let offset = i * 16;
            let hex: String = chunk
                .iter()
                .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                    use std::fmt::Write as _;
                    if !s.is_empty() {
                        s.push(' ');
                    }
                    let _ = write!(s, "{b:02x}");
                    s
                });
            let ascii: String = chunk
                .iter()
                .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
                .collect();
            format!("{offset:04x}  {hex:<48}  {ascii}")
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_compression_state() {
        assert_eq!(compression_label(&[0x78, 0x9C, 0x01]), "zlib-compressed (78 9c)");
        assert_eq!(compression_label(b"plain"), "not compressed");
    }

    #[test]
    fn hex_dump_lines() {
        let lines = hex_dump(b"hdfm\x00\x00\x00\x84");
        assert_eq!(lines.len(), 1);
        assert_eq!(
            lines[0],
            format!("0000  {:<48}  hdfm....", "68 64 66 6d 00 00 00 84")
        );
    }
}
