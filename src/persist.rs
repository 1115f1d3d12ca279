//! Binary persistence for lookup tables.
//!
//! # Layout
//!
//! ```text
//! magic    [u8; 8]   b"DDTABLE\0"
//! version  u32
//! count    u64
//! keys     count × [u32; 4]
//! values   count × [u32; 4]
//! ```
//!
//! Everything is bincode with fixed-width little-endian integers, so each
//! record is exactly 16 bytes and the file size is `20 + 32 × count`.

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::deal::DealKey;
use super::error::{CorruptDataError, Result, TableError};
use super::packing::{MAX_DEAL_COMPONENT, MAX_RESULT_COMPONENT};
use super::result::ResultValue;
use super::table::LookupTable;

pub const MAGIC: [u8; 8] = *b"DDTABLE\0";
pub const FORMAT_VERSION: u32 = 1;

/// Upper bound on preallocation so a corrupt count cannot exhaust memory
const PREALLOC_LIMIT: usize = 1 << 20;

#[derive(Serialize, Deserialize)]
struct Header {
    magic: [u8; 8],
    version: u32,
    count: u64,
}

/// Write a table to any writer
pub fn save<W: Write>(table: &LookupTable, mut writer: W) -> Result<()> {
    let header = Header {
        magic: MAGIC,
        version: FORMAT_VERSION,
        count: table.len() as u64,
    };
    bincode::serialize_into(&mut writer, &header).map_err(io::Error::other)?;
    for key in table.keys() {
        bincode::serialize_into(&mut writer, key).map_err(io::Error::other)?;
    }
    for value in table.values() {
        bincode::serialize_into(&mut writer, value).map_err(io::Error::other)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read a table written by [`save`]
pub fn load<R: Read>(mut reader: R) -> Result<LookupTable> {
    let header: Header = bincode::deserialize_from(&mut reader).map_err(decode_error)?;
    if header.magic != MAGIC {
        return Err(CorruptDataError::BadMagic.into());
    }
    if header.version != FORMAT_VERSION {
        return Err(CorruptDataError::UnsupportedVersion(header.version).into());
    }
    let count = usize::try_from(header.count)
        .map_err(|_| CorruptDataError::Decode(format!("record count {} too large", header.count)))?;

    let mut keys = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for index in 0..count {
        let key: DealKey = bincode::deserialize_from(&mut reader).map_err(decode_error)?;
        if let Some(&component) = key.0.iter().find(|&&c| c > MAX_DEAL_COMPONENT) {
            return Err(CorruptDataError::OutOfRange { index, component }.into());
        }
        keys.push(key);
    }

    let mut values = Vec::with_capacity(count.min(PREALLOC_LIMIT));
    for index in 0..count {
        let value: ResultValue = bincode::deserialize_from(&mut reader).map_err(decode_error)?;
        if let Some(&component) = value.0.iter().find(|&&c| c > MAX_RESULT_COMPONENT) {
            return Err(CorruptDataError::OutOfRange { index, component }.into());
        }
        values.push(value);
    }

    let mut probe = [0u8; 1];
    if reader.read(&mut probe)? != 0 {
        return Err(CorruptDataError::TrailingBytes {
            count: header.count,
        }
        .into());
    }

    Ok(LookupTable::from_parts(keys, values)?)
}

/// Save a table to a file.
///
/// The table is written to a sibling `.tmp` file and renamed into place,
/// so an interrupted save never leaves a partial artifact at `path`.
pub fn save_file(table: &LookupTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let tmp = temp_path(path)?;

    let written = File::create(&tmp).map_err(TableError::from).and_then(|file| {
        let mut writer = BufWriter::new(file);
        save(table, &mut writer)?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()?;
        Ok(())
    });
    if let Err(err) = written {
        let _ = fs::remove_file(&tmp);
        return Err(err);
    }

    fs::rename(&tmp, path)?;
    info!(path = %path.display(), records = table.len(), "lookup table saved");
    Ok(())
}

/// Load a table from a file
pub fn load_file(path: impl AsRef<Path>) -> Result<LookupTable> {
    let path = path.as_ref();
    let table = load(BufReader::new(File::open(path)?))?;
    debug!(path = %path.display(), records = table.len(), "lookup table loaded");
    Ok(table)
}

/// Reload a saved table and check it matches `expected` record for record
pub fn verify_file(path: impl AsRef<Path>, expected: &LookupTable) -> Result<LookupTable> {
    let loaded = load_file(path)?;
    if let Some(index) = first_difference(&loaded, expected) {
        return Err(CorruptDataError::Mismatch { index }.into());
    }
    Ok(loaded)
}

fn first_difference(a: &LookupTable, b: &LookupTable) -> Option<usize> {
    a.iter()
        .zip(b.iter())
        .position(|(x, y)| x != y)
        .or_else(|| (a.len() != b.len()).then(|| a.len().min(b.len())))
}

fn temp_path(path: &Path) -> io::Result<PathBuf> {
    let name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("not a file path: {}", path.display()),
        )
    })?;
    let mut tmp_name = name.to_os_string();
    tmp_name.push(".tmp");
    Ok(path.with_file_name(tmp_name))
}

fn decode_error(err: bincode::Error) -> TableError {
    match *err {
        bincode::ErrorKind::Io(io) if io.kind() == io::ErrorKind::UnexpectedEof => {
            CorruptDataError::Truncated.into()
        }
        bincode::ErrorKind::Io(io) => io.into(),
        other => CorruptDataError::Decode(other.to_string()).into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample(n: u32) -> LookupTable {
        let keys = (0..n).map(|i| DealKey([i, i * 7, MAX_DEAL_COMPONENT - i, 0])).collect();
        let values = (0..n).map(|i| ResultValue([i, MAX_RESULT_COMPONENT, 4160, i % 13])).collect();
        LookupTable::from_parts(keys, values).unwrap()
    }

    fn to_bytes(table: &LookupTable) -> Vec<u8> {
        let mut bytes = Vec::new();
        save(table, &mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_roundtrip_preserves_order() {
        for n in [0, 1, 257] {
            let table = sample(n);
            let bytes = to_bytes(&table);
            assert_eq!(bytes.len(), 20 + 32 * n as usize);
            assert_eq!(load(&bytes[..]).unwrap(), table);
        }
    }

    #[test]
    fn test_layout() {
        let table = LookupTable::from_parts(
            vec![DealKey([24494087, 53250751, 4828063, 22552142])],
            vec![ResultValue([213810, 694955, 148274, 629419])],
        )
        .unwrap();
        let bytes = to_bytes(&table);
        assert_eq!(&bytes[..8], b"DDTABLE\0");
        assert_eq!(&bytes[8..12], &1u32.to_le_bytes());
        assert_eq!(&bytes[12..20], &1u64.to_le_bytes());
        assert_eq!(&bytes[20..24], &24494087u32.to_le_bytes());
        assert_eq!(&bytes[36..40], &213810u32.to_le_bytes());
    }

    #[test]
    fn test_truncated() {
        let bytes = to_bytes(&sample(3));
        for cut in [0, 5, 19, 20, 50, bytes.len() - 1] {
            let err = load(&bytes[..cut]).unwrap_err();
            assert!(
                matches!(err, TableError::Corrupt(CorruptDataError::Truncated)),
                "cut at {cut}: {err:?}"
            );
        }
    }

    #[test]
    fn test_malformed_headers_and_tails() {
        let mut bytes = to_bytes(&sample(2));
        bytes.push(0);
        assert!(matches!(
            load(&bytes[..]),
            Err(TableError::Corrupt(CorruptDataError::TrailingBytes { count: 2 }))
        ));

        let mut bytes = to_bytes(&sample(2));
        bytes[0] = b'X';
        assert!(matches!(
            load(&bytes[..]),
            Err(TableError::Corrupt(CorruptDataError::BadMagic))
        ));

        let mut bytes = to_bytes(&sample(2));
        bytes[8] = 9;
        assert!(matches!(
            load(&bytes[..]),
            Err(TableError::Corrupt(CorruptDataError::UnsupportedVersion(9)))
        ));
    }

    #[test]
    fn test_out_of_range_component() {
        let table = LookupTable::from_parts(
            vec![DealKey([0; 4]), DealKey([MAX_DEAL_COMPONENT + 1, 0, 0, 0])],
            vec![ResultValue([0; 4]); 2],
        )
        .unwrap();
        let bytes = to_bytes(&table);
        assert!(matches!(
            load(&bytes[..]),
            Err(TableError::Corrupt(CorruptDataError::OutOfRange { index: 1, .. }))
        ));
    }

    #[test]
    fn test_file_roundtrip_and_verify() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("table.ddt");
        let table = sample(100);

        save_file(&table, &path).unwrap();
        assert!(!dir.path().join("table.ddt.tmp").exists());
        assert_eq!(load_file(&path).unwrap(), table);
        assert_eq!(verify_file(&path, &table).unwrap(), table);

        let err = verify_file(&path, &sample(99)).unwrap_err();
        assert!(matches!(
            err,
            TableError::Corrupt(CorruptDataError::Mismatch { index: 99 })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_file(dir.path().join("missing.ddt")),
            Err(TableError::Io(_))
        ));
    }
}
