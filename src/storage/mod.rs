use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::Context;

use crate::engine::ComputationResult;

/// Writes the result document as 2-space indented JSON, keys in declaration order.
///
/// Non-finite floats are emitted as `null`.
pub fn write_results(path: &Path, result: &ComputationResult) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create output file at {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, result)
        .with_context(|| format!("failed to serialize results to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("failed to flush output file at {}", path.display()))?;
    Ok(())
}
