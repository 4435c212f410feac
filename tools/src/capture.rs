//! Directories of captured packets.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::Pattern;
use wire::MAX_PACKET_SIZE;

/// One captured packet file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketCapture {
    pub path: PathBuf,
    pub size: usize,
}

impl PacketCapture {
    /// Whether the file is small enough to be a packet at all.
    #[must_use]
    pub const fn fits_packet(&self) -> bool {
        self.size <= MAX_PACKET_SIZE
    }
}

/// Order in which captures are listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureOrder {
    #[default]
    Path,
    /// Largest first, ties by path.
    Size,
}

/// Lists the files in `dir` whose names match `glob`, in `order`.
///
/// Subdirectories are skipped. Files over the packet size limit are still
/// listed so callers can report them; see [`PacketCapture::fits_packet`].
pub fn collect_captures(
    dir: &Path,
    glob: Option<&str>,
    order: CaptureOrder,
) -> Result<Vec<PacketCapture>> {
    let pattern = glob
        .map(|value| Pattern::new(value).with_context(|| format!("invalid glob {value:?}")))
        .transpose()?;

    let mut captures = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("read dir {}", dir.display()))? {
        let entry = entry.with_context(|| format!("read dir {}", dir.display()))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if let Some(pattern) = &pattern {
            let name = path.file_name().and_then(|name| name.to_str());
            if !name.is_some_and(|name| pattern.matches(name)) {
                continue;
            }
        }
        let len = entry
            .metadata()
            .with_context(|| format!("stat {}", path.display()))?
            .len();
        let size = usize::try_from(len).unwrap_or(usize::MAX);
        captures.push(PacketCapture { path, size });
    }

    sort_captures(&mut captures, order);
    Ok(captures)
}

/// Sorts `captures` in place.
pub fn sort_captures(captures: &mut [PacketCapture], order: CaptureOrder) {
    match order {
        CaptureOrder::Path => captures.sort_by(|a, b| a.path.cmp(&b.path)),
        CaptureOrder::Size => {
            captures.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.path.cmp(&b.path)));
        }
    }
}
