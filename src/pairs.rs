//! # Pairs — Collected Twin Prime Pairs and Results File
//!
//! `TwinPairs` is an append-only, insertion-ordered collection. The search
//! fills it in ascending k order, with (3, 5) first when requested, so the
//! results file comes out sorted without a separate pass.
//!
//! The results file holds one `a, b` line per pair. It is written to a
//! sibling temp file and renamed into place, so a failed run never leaves a
//! truncated results file behind.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TwinPair {
    pub a: u64,
    pub b: u64,
}

impl TwinPair {
    pub fn new(a: u64) -> Self {
        TwinPair { a, b: a + 2 }
    }
}

impl std::fmt::Display for TwinPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.a, self.b)
    }
}

#[derive(Debug, Default, Clone)]
pub struct TwinPairs {
    pairs: Vec<TwinPair>,
}

impl TwinPairs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        TwinPairs {
            pairs: Vec::with_capacity(capacity),
        }
    }

    pub fn insert(&mut self, pair: TwinPair) {
        self.pairs.push(pair);
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TwinPair> {
        self.pairs.iter()
    }

    pub fn as_slice(&self) -> &[TwinPair] {
        &self.pairs
    }

    /// Write every pair as an `a, b` line.
    pub fn write_to<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for pair in &self.pairs {
            writeln!(out, "{}", pair)?;
        }
        Ok(())
    }

    /// Replace `path` with the full list of pairs.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("tmp");
        let file = fs::File::create(&tmp)
            .with_context(|| format!("failed to open results file {}", tmp.display()))?;
        let mut out = BufWriter::new(file);
        self.write_to(&mut out)
            .and_then(|_| out.flush())
            .with_context(|| format!("failed to write results file {}", tmp.display()))?;
        drop(out);
        fs::rename(&tmp, path)
            .with_context(|| format!("failed to move results into {}", path.display()))?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a TwinPairs {
    type Item = &'a TwinPair;
    type IntoIter = std::slice::Iter<'a, TwinPair>;

    fn into_iter(self) -> Self::IntoIter {
        self.pairs.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_preserves_order_and_count() {
        let mut pairs = TwinPairs::new();
        assert!(pairs.is_empty());
        pairs.insert(TwinPair::new(3));
        pairs.insert(TwinPair::new(5));
        pairs.insert(TwinPair::new(11));
        assert_eq!(pairs.len(), 3);
        let firsts: Vec<u64> = pairs.iter().map(|p| p.a).collect();
        assert_eq!(firsts, vec![3, 5, 11]);
    }

    #[test]
    fn pair_display_is_comma_space() {
        assert_eq!(TwinPair::new(101).to_string(), "101, 103");
    }

    #[test]
    fn write_to_emits_one_line_per_pair() {
        let mut pairs = TwinPairs::new();
        pairs.insert(TwinPair::new(3));
        pairs.insert(TwinPair::new(17));
        let mut buf = Vec::new();
        pairs.write_to(&mut buf).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "3, 5\n17, 19\n");
    }

    #[test]
    fn write_to_file_replaces_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        fs::write(&path, "stale\nlines\n").unwrap();

        let mut pairs = TwinPairs::new();
        pairs.insert(TwinPair::new(107));
        pairs.write_to_file(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "107, 109\n");
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn empty_list_writes_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        TwinPairs::new().write_to_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn write_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/output.txt");
        let err = TwinPairs::new().write_to_file(&path).unwrap_err();
        assert!(err.to_string().contains("failed to open results file"));
    }
}
