//! Safetensors I/O for signals and kernels.
//!
//! Only what the `firfilt` binary needs: a minimal writer for named F64
//! tensors and a reader for a `signal` tensor of shape `[T]` or `[C, T]`.
use anyhow::{bail, Context, Result};
use ndarray::Array2;
use std::collections::HashMap;
use std::io::Write;
use std::path::Path;

// ── Low-level parser ──────────────────────────────────────────────────────────

fn parse_header(bytes: &[u8]) -> Result<(HashMap<String, serde_json::Value>, usize)> {
    if bytes.len() < 8 {
        bail!("safetensors file too small");
    }
    let n = u64::from_le_bytes(bytes[..8].try_into()?) as usize;
    let end = 8usize.checked_add(n).filter(|&e| e <= bytes.len())
        .context("safetensors header length exceeds file size")?;
    let header: HashMap<String, serde_json::Value> =
        serde_json::from_slice(&bytes[8..end]).context("failed to parse safetensors header")?;
    Ok((header, end))
}

fn shape_of(entry: &serde_json::Value) -> Result<Vec<usize>> {
    entry["shape"]
        .as_array()
        .context("tensor entry has no shape")?
        .iter()
        .map(|v| v.as_u64().map(|d| d as usize).context("non-integer dimension"))
        .collect()
}

/// Decode an F32 or F64 tensor into `f64`.
fn read_float_tensor(bytes: &[u8], data_start: usize, entry: &serde_json::Value) -> Result<Vec<f64>> {
    let offsets = entry["data_offsets"].as_array().context("tensor entry has no data_offsets")?;
    let (s, e) = match offsets.as_slice() {
        [s, e] => (
            s.as_u64().context("bad start offset")? as usize,
            e.as_u64().context("bad end offset")? as usize,
        ),
        _ => bail!("data_offsets must have two elements"),
    };
    let end = data_start.checked_add(e).filter(|&end| s <= e && end <= bytes.len())
        .with_context(|| format!("tensor data [{s}, {e}) out of bounds"))?;
    let raw = &bytes[data_start + s..end];
    match entry["dtype"].as_str() {
        Some("F64") => Ok(raw
            .chunks_exact(8)
            .map(|b| f64::from_le_bytes([b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7]]))
            .collect()),
        Some("F32") => Ok(raw
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]) as f64)
            .collect()),
        other => bail!("unsupported dtype {other:?} (expected F32 or F64)"),
    }
}

// ── Reader ────────────────────────────────────────────────────────────────────

/// A signal loaded from a safetensors file.
pub struct SignalFile {
    /// `[C, T]`; a 1-D tensor loads as a single row.
    pub data: Array2<f64>,
}

impl SignalFile {
    /// Load the tensor named `signal`.
    pub fn load(path: &Path) -> Result<Self> {
        Self::load_key(path, "signal")
    }

    pub fn load_key(path: &Path, key: &str) -> Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let (header, data_start) = parse_header(&bytes)?;

        let entry = header.get(key).with_context(|| format!("missing '{key}' key"))?;
        let shape = shape_of(entry)?;
        let values = read_float_tensor(&bytes, data_start, entry)?;
        let (rows, cols) = match shape.as_slice() {
            [t] => (1, *t),
            [c, t] => (*c, *t),
            _ => bail!("'{key}' must be 1-D or 2-D, got shape {shape:?}"),
        };
        let data = Array2::from_shape_vec((rows, cols), values)
            .with_context(|| format!("'{key}' data does not match shape {shape:?}"))?;
        Ok(SignalFile { data })
    }
}

// ── Writer ────────────────────────────────────────────────────────────────────

/// Minimal safetensors writer for F64 tensors.
///
/// ```rust,no_run
/// use sincfir::io::StWriter;
/// use std::path::Path;
/// let mut w = StWriter::new();
/// w.add_f64("kernel", &[0.25, 0.5, 0.25], &[3]);
/// w.write(Path::new("/tmp/kernel.safetensors")).unwrap();
/// ```
#[derive(Default)]
pub struct StWriter {
    entries: Vec<(String, Vec<u8>, Vec<usize>)>,
}

impl StWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_f64(&mut self, name: &str, data: &[f64], shape: &[usize]) {
        let bytes: Vec<u8> = data.iter().flat_map(|v| v.to_le_bytes()).collect();
        self.entries.push((name.to_string(), bytes, shape.to_vec()));
    }

    pub fn add_f64_arr2(&mut self, name: &str, arr: &Array2<f64>) {
        let data: Vec<f64> = arr.iter().copied().collect();
        self.add_f64(name, &data, &[arr.nrows(), arr.ncols()]);
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let mut header_map = serde_json::Map::new();
        let mut offset: usize = 0;
        for (name, data, shape) in &self.entries {
            header_map.insert(name.clone(), serde_json::json!({
                "dtype": "F64",
                "shape": shape,
                "data_offsets": [offset, offset + data.len()],
            }));
            offset += data.len();
        }
        let hdr_bytes = serde_json::to_vec(&header_map)?;
        let pad = (8 - hdr_bytes.len() % 8) % 8;
        let padded: Vec<u8> = hdr_bytes.into_iter()
            .chain(std::iter::repeat(b' ').take(pad))
            .collect();

        let mut f = std::fs::File::create(path)
            .with_context(|| format!("creating {}", path.display()))?;
        f.write_all(&(padded.len() as u64).to_le_bytes())?;
        f.write_all(&padded)?;
        for (_, data, _) in &self.entries {
            f.write_all(data)?;
        }
        Ok(())
    }
}
