/// Implementation of `hdfm pack`.
///
/// The inverse of `extract`: reads a payload, optionally deflates it, and
/// writes it behind a fresh 132-byte header carrying `--app-version`.
use std::fs;
use std::io::{BufWriter, Write as _};

use anyhow::{Context, Result};
use hdfm_codec::compression::deflate_with_level;
use hdfm_wire::{Hdfm, HdfmHeader};
use tracing::info;

use crate::PackArgs;

/// Run the `hdfm pack` command.
///
/// # Errors
///
/// Returns an error if the payload cannot be read, the version does not
/// fit in the header, or the output cannot be written.
pub fn run(args: &PackArgs) -> Result<()> {
    let payload =
        fs::read(&args.input).with_context(|| format!("cannot read {}", args.input.display()))?;

    let file_data = if args.compress {
        deflate_with_level(&payload, args.level).context("cannot compress payload")?
    } else {
        payload
    };

    let hdfm = Hdfm {
        header: HdfmHeader::new(&args.app_version)
            .with_context(|| format!("cannot use version {:?}", args.app_version))?,
        file_data,
    };

    let out = fs::File::create(&args.output)
        .with_context(|| format!("cannot create {}", args.output.display()))?;
    let mut writer = BufWriter::new(out);
    let written = hdfm
        .write_to(&mut writer)
        .with_context(|| format!("cannot write {}", args.output.display()))?;
    writer
        .flush()
        .with_context(|| format!("cannot write {}", args.output.display()))?;

    info!(
        path = %args.output.display(),
        bytes = written,
        compressed = args.compress,
        "wrote hdfm file"
    );
    println!("Wrote {} ({written} bytes)", args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ExtractArgs;
    use crate::cmd_extract;
    use hdfm_codec::compression::DEFAULT_COMPRESSION_LEVEL;
    use hdfm_wire::Hdfm;

    fn pack_args(dir: &std::path::Path, compress: bool) -> PackArgs {
        PackArgs {
            input: dir.join("records.bin"),
            output: dir.join("iTunes Library.itl"),
            app_version: "8.0".to_string(),
            compress,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    fn extract_args(dir: &std::path::Path) -> ExtractArgs {
        ExtractArgs {
            file: dir.join("iTunes Library.itl"),
            output: Some(dir.join("extracted.bin")),
            inflate: "auto".to_string(),
            max_size: None,
        }
    }

    #[test]
    fn extract_reverses_compressed_pack() {
        let dir = tempfile::tempdir().unwrap();
        let records = b"mhbd library records ".repeat(200);
        fs::write(dir.path().join("records.bin"), &records).unwrap();

        run(&pack_args(dir.path(), true)).unwrap();
        let packed = fs::read(dir.path().join("iTunes Library.itl")).unwrap();
        let hdfm = Hdfm::from_bytes(&packed).unwrap();
        assert_eq!(hdfm.header.version, "8.0");
        assert_eq!(&hdfm.file_data[..2], &[0x78, 0x9C]);

        cmd_extract::run(&extract_args(dir.path())).unwrap();
        assert_eq!(fs::read(dir.path().join("extracted.bin")).unwrap(), records);
    }

    #[test]
    fn extract_reverses_plain_pack() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("records.bin"), b"mhbd plain").unwrap();

        run(&pack_args(dir.path(), false)).unwrap();
        let packed = fs::read(dir.path().join("iTunes Library.itl")).unwrap();
        assert_eq!(packed.len(), 132 + 10);

        cmd_extract::run(&extract_args(dir.path())).unwrap();
        assert_eq!(fs::read(dir.path().join("extracted.bin")).unwrap(), b"mhbd plain");
    }

    #[test]
    fn version_that_does_not_fit_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("records.bin"), b"x").unwrap();
        let args = PackArgs {
            app_version: "9".repeat(116),
            ..pack_args(dir.path(), false)
        };
        assert!(run(&args).is_err());
        assert!(!dir.path().join("iTunes Library.itl").exists());
    }
}
