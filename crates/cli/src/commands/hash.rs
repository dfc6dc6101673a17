use std::{
    fs::File,
    io::{self, ErrorKind, Read},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use sha3_rocc_executor::{
    staging::MessageStager, Accelerator, AcceleratorOpts, AcceleratorReport, Charge,
};
use sha3_rocc_primitives::consts::LANE_SIZE;

use crate::Variant;

#[derive(Parser, Debug)]
#[command(name = "hash", about = "Hash a file (or stdin) on the simulated accelerator.")]
pub struct HashCmd {
    /// The function to compute.
    #[arg(long, value_enum)]
    variant: Variant,

    /// Output length in bytes. Only SHAKE variants accept a length other than their digest size.
    #[arg(long)]
    out_len: Option<usize>,

    /// Bytes read from the input per absorb instruction.
    #[arg(long, env = "SHA3_ROCC_CHUNK_SIZE", default_value = "4096")]
    chunk_size: usize,

    /// Print the digest, the charges and the report as JSON.
    #[arg(long)]
    json: bool,

    /// Print the accelerator report after the digest.
    #[arg(long)]
    report: bool,

    /// The file to hash. Reads stdin when absent or `-`.
    file: Option<PathBuf>,
}

/// The result of hashing one message.
#[derive(Debug, Clone, Serialize)]
pub struct Digest {
    /// The output, truncated to the requested length.
    #[serde(rename = "digest", serialize_with = "hex_bytes")]
    pub bytes: Vec<u8>,
    /// The charge of every absorb, including the padded final word.
    pub absorb: Charge,
    /// The charge of the squeeze, which covers whole words.
    pub squeeze: Charge,
}

#[derive(Serialize)]
struct HashOutput<'a> {
    variant: &'static str,
    #[serde(flatten)]
    digest: &'a Digest,
    report: &'a AcceleratorReport,
}

fn hex_bytes<T: AsRef<[u8]>, S: serde::Serializer>(
    bytes: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&hex::encode(bytes))
}

impl HashCmd {
    #[allow(clippy::print_stdout)]
    pub fn run(&self) -> Result<()> {
        let out_len = resolve_out_len(self.variant, self.out_len)?;
        if self.chunk_size == 0 {
            bail!("--chunk-size must be at least 1");
        }

        let mut input = open_input(self.file.as_deref())?;
        let mut acc = Accelerator::with_opts(AcceleratorOpts::from_env());
        let digest = hash_reader(&mut acc, self.variant, &mut input, self.chunk_size, out_len)?;

        if self.json {
            let output =
                HashOutput { variant: self.variant.name(), digest: &digest, report: acc.report() };
            println!("{}", serde_json::to_string_pretty(&output)?);
            return Ok(());
        }

        println!("{}", hex::encode(&digest.bytes));
        if self.report {
            print!("{}", acc.report());
        }
        Ok(())
    }
}

/// Opens `path` for reading, or stdin when `path` is absent or `-`.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(file))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Checks a requested output length against the variant.
pub fn resolve_out_len(variant: Variant, out_len: Option<usize>) -> Result<usize> {
    match out_len {
        None => Ok(variant.default_out_len()),
        Some(len) if variant.is_xof() || len == variant.default_out_len() => Ok(len),
        Some(len) => bail!(
            "{} produces {} bytes, cannot output {len}",
            variant.name(),
            variant.default_out_len()
        ),
    }
}

/// Streams `reader` through `acc` in chunks of `chunk_size` bytes and squeezes `out_len` bytes.
///
/// The squeeze is rounded up to whole words and truncated afterwards.
pub fn hash_reader<R: Read>(
    acc: &mut Accelerator,
    variant: Variant,
    reader: &mut R,
    chunk_size: usize,
    out_len: usize,
) -> Result<Digest> {
    acc.configure(variant.rate())?;
    let mut stager = MessageStager::new();
    let mut buf = vec![0u8; chunk_size];
    let mut total = 0usize;
    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("failed to read input"),
        };
        stager.push(acc, &buf[..n])?;
        total += n;
    }
    let absorb = stager.finish(acc, variant.pad())?;

    let mut bytes = vec![0u8; out_len.next_multiple_of(LANE_SIZE)];
    let squeeze = acc.squeeze(&mut bytes)?;
    bytes.truncate(out_len);

    tracing::info!(
        variant = variant.name(),
        input_len = total,
        out_len,
        cycles = absorb.cycles + squeeze.cycles,
        "hashed"
    );
    Ok(Digest { bytes, absorb, squeeze })
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use rstest::rstest;
    use tiny_keccak::{Hasher, Keccak, Sha3, Shake};

    use super::*;

    fn finalize<H: Hasher>(mut hasher: H, message: &[u8], out_len: usize) -> Vec<u8> {
        hasher.update(message);
        let mut out = vec![0u8; out_len];
        hasher.finalize(&mut out);
        out
    }

    fn reference(variant: Variant, message: &[u8], out_len: usize) -> Vec<u8> {
        match variant {
            Variant::Sha3_224 => finalize(Sha3::v224(), message, out_len),
            Variant::Sha3_256 => finalize(Sha3::v256(), message, out_len),
            Variant::Sha3_384 => finalize(Sha3::v384(), message, out_len),
            Variant::Sha3_512 => finalize(Sha3::v512(), message, out_len),
            Variant::Shake128 => finalize(Shake::v128(), message, out_len),
            Variant::Shake256 => finalize(Shake::v256(), message, out_len),
            Variant::Keccak256 => finalize(Keccak::v256(), message, out_len),
        }
    }

    #[rstest]
    #[case(1)]
    #[case(7)]
    #[case(136)]
    #[case(4096)]
    fn test_hash_reader_matches_reference(#[case] chunk_size: usize) {
        let message: Vec<u8> = (0..777u32).map(|i| (i * 31) as u8).collect();
        for variant in Variant::ALL {
            let out_len = variant.default_out_len();
            let mut acc = Accelerator::new();
            let digest =
                hash_reader(&mut acc, variant, &mut Cursor::new(&message), chunk_size, out_len)
                    .unwrap();
            assert_eq!(digest.bytes, reference(variant, &message, out_len), "{}", variant.name());
            assert_eq!(acc.report().total_cycles(), digest.absorb.cycles + digest.squeeze.cycles);
        }
    }

    #[test]
    fn test_odd_shake_length() {
        let mut acc = Accelerator::new();
        let digest =
            hash_reader(&mut acc, Variant::Shake256, &mut Cursor::new(b"abc"), 64, 301).unwrap();
        assert_eq!(digest.bytes, reference(Variant::Shake256, b"abc", 301));
        assert_eq!(acc.report().bytes_squeezed, 304);
        assert_eq!(digest.squeeze.permutations, 3);
    }

    #[test]
    fn test_resolve_out_len() {
        assert_eq!(resolve_out_len(Variant::Sha3_384, None).unwrap(), 48);
        assert_eq!(resolve_out_len(Variant::Sha3_384, Some(48)).unwrap(), 48);
        assert!(resolve_out_len(Variant::Sha3_384, Some(32)).is_err());
        assert_eq!(resolve_out_len(Variant::Shake128, Some(1000)).unwrap(), 1000);
    }

    #[test]
    fn test_json_output() {
        let mut acc = Accelerator::new();
        let digest =
            hash_reader(&mut acc, Variant::Sha3_256, &mut Cursor::new(b""), 4096, 32).unwrap();
        let output = HashOutput { variant: "sha3-256", digest: &digest, report: acc.report() };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(
            value["digest"],
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
        assert_eq!(value["squeeze"]["permutations"], 1);
        assert_eq!(value["report"]["permutations"], 1);
    }

    #[test]
    fn test_parse_args() {
        let cmd = HashCmd::parse_from(["hash", "--variant", "shake128", "--out-len", "100", "-"]);
        assert_eq!(cmd.variant, Variant::Shake128);
        assert_eq!(cmd.out_len, Some(100));
        assert_eq!(cmd.file, Some(PathBuf::from("-")));
    }

    #[test]
    fn test_open_input() {
        let manifest = Path::new(env!("CARGO_MANIFEST_DIR")).join("Cargo.toml");
        let contents = std::fs::read(&manifest).unwrap();

        let mut input = open_input(Some(&manifest)).unwrap();
        let mut acc = Accelerator::new();
        let digest = hash_reader(&mut acc, Variant::Sha3_256, &mut input, 64, 32).unwrap();
        assert_eq!(digest.bytes, reference(Variant::Sha3_256, &contents, 32));

        assert!(open_input(Some(Path::new("-"))).is_ok());
        assert!(open_input(None).is_ok());
        let err = open_input(Some(Path::new("does/not/exist.bin"))).err().unwrap();
        assert!(err.to_string().contains("failed to open does/not/exist.bin"));
    }
}
