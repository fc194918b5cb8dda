/// Implementation of `hdfm validate`.
///
/// Runs a full decode and reports either a series of success checkmarks
/// (`✓`) or a diagnostic failure line (`✗`). The main dispatcher turns the
/// returned `Err` into exit code 1.
///
/// # Success output
///
/// ```text
/// ✓ Header: valid (hdfm v8.0, 132 bytes)
/// ✓ File data: 60567 bytes, matches file size
/// ✓ Payload: zlib stream inflated to 297844 bytes
/// ```
///
/// # Failure output
///
/// ```text
/// ✗ Error: bad magic at offset 0 — invalid magic: expected "hdfm" (0x6864666D), got 0x504B0304
/// ```
use anyhow::{Result, anyhow};
use hdfm_decoder::{DecodeError, DecoderConfig, HdfmDecoder};
use hdfm_wire::FormatError;

use crate::ValidateArgs;

/// Run the `hdfm validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails any check.
pub fn run(args: &ValidateArgs) -> Result<()> {
    match HdfmDecoder::decode_path(&args.file, &DecoderConfig::default()) {
        Ok(decoded) => {
            let header = &decoded.header;
            println!(
                "✓ Header: valid (hdfm v{}, {} bytes)",
                header.version, header.header_length
            );
            println!(
                "✓ File data: {} bytes, matches file size",
                decoded.stored_size
            );
            if decoded.inflated {
                println!(
                    "✓ Payload: zlib stream inflated to {} bytes",
                    decoded.payload.len()
                );
            } else {
                println!("✓ Payload: stored uncompressed");
            }
            Ok(())
        }

        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            Err(anyhow!("validation failed"))
        }
    }
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a human-readable diagnostic string that
/// names the failing layer before the error's own message.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────────────┐
/// │ Error                    │ Diagnostic prefix                    │
/// ├──────────────────────────┼──────────────────────────────────────┤
/// │ BadMagic                 │ "bad magic at offset 0"              │
/// │ TruncatedFile            │ "file shorter than declared"         │
/// │ other FormatError        │ "malformed header"                   │
/// │ Io                       │ "cannot read file"                   │
/// │ DecompressionError       │ "payload does not inflate"           │
/// └──────────────────────────┴──────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::Format(inner @ FormatError::BadMagic { .. }) => {
            format!("bad magic at offset 0 — {inner}")
        }
        DecodeError::Format(inner @ FormatError::TruncatedFile { .. }) => {
            format!("file shorter than declared — {inner}")
        }
        DecodeError::Format(FormatError::Io(inner)) => format!("cannot read file — {inner}"),
        DecodeError::Format(inner) => format!("malformed header — {inner}"),
        DecodeError::Decompression(inner) => format!("payload does not inflate — {inner}"),
    }
}
