/// Implementation of `hdfm extract`.
///
/// Decodes the file and writes its payload to `-o <file>` or stdout.
/// With the default `--inflate auto`, a zlib payload is written inflated
/// and a plain payload as stored; `--inflate never` always writes the
/// stored bytes.
use std::fs;
use std::io::{self, Write as _};

use anyhow::{Context, Result, anyhow};
use hdfm_decoder::{DecoderConfig, HdfmDecoder, InflateMode};
use tracing::info;

use crate::ExtractArgs;

/// Run the `hdfm extract` command.
///
/// # Errors
///
/// Returns an error if the `--inflate` value is unknown, the file does not
/// decode, or the output cannot be written.
pub fn run(args: &ExtractArgs) -> Result<()> {
    let config = DecoderConfig {
        inflate: parse_inflate_mode(&args.inflate)?,
        max_inflated_size: args.max_size,
    };

    let decoded = HdfmDecoder::decode_path(&args.file, &config)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    if let Some(path) = &args.output {
        fs::write(path, &decoded.payload)
            .with_context(|| format!("cannot write {}", path.display()))?;
        info!(
            path = %path.display(),
            bytes = decoded.payload.len(),
            inflated = decoded.inflated,
            "wrote payload"
        );
    } else {
        io::stdout()
            .lock()
            .write_all(&decoded.payload)
            .context("cannot write to stdout")?;
    }

    Ok(())
}

/// Parses the `--inflate` string to an [`InflateMode`].
///
/// # Errors
///
/// Returns an error for unrecognised mode names.
fn parse_inflate_mode(s: &str) -> Result<InflateMode> {
    InflateMode::from_name(&s.to_lowercase())
        .ok_or_else(|| anyhow!("unknown inflate mode {s:?} — expected auto|never"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corrupt_payload_error_chain_has_no_repeats() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("corrupt.itl");
        let mut compressed = hdfm_codec::deflate(b"mhbd records").unwrap();
        let last = compressed.len() - 1;
        compressed[last] ^= 0xFF;
        let file = hdfm_wire::Hdfm {
            header: hdfm_wire::HdfmHeader::new("8.0").unwrap(),
            file_data: compressed,
        };
        let mut bytes = Vec::new();
        file.write_to(&mut bytes).unwrap();
        fs::write(&path, bytes).unwrap();

        let args = ExtractArgs {
            file: path,
            output: Some(dir.path().join("out.bin")),
            inflate: "auto".to_string(),
            max_size: None,
        };
        let rendered = format!("{:#}", run(&args).unwrap_err());
        assert!(
            rendered.contains(": payload decompression failed: zlib stream corrupt after "),
            "{rendered}"
        );
        assert_eq!(rendered.matches("zlib stream corrupt").count(), 1, "{rendered}");
        assert_eq!(rendered.matches("payload decompression failed").count(), 1, "{rendered}");
    }

    #[test]
    fn inflate_mode_is_case_insensitive() {
        assert_eq!(parse_inflate_mode("Never").unwrap(), InflateMode::Never);
        assert!(parse_inflate_mode("sometimes").is_err());
    }
}
