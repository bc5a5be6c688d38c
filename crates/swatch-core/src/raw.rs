//! Raw swatch files
//!
//! Loads `.ase` files from disk as identifier + bytes pairs. A directory of
//! downloaded files may carry a collection list (`collections_data.yaml`)
//! mapping each file name to the vendor's collection name; mapped files are
//! identified by that name, the rest by their file stem.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// File name of the collection list kept next to downloaded `.ase` files
pub const COLLECTIONS_FILE: &str = "collections_data.yaml";

/// One entry of a collection list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    /// Name the vendor publishes the collection under
    pub collection_name: String,
    /// Name of the downloaded `.ase` file
    pub file_name: String,
    /// Where the file was downloaded from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

/// Read a collection list
pub fn load_collections(path: impl AsRef<Path>) -> Result<Vec<CollectionInfo>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let collections: Vec<CollectionInfo> = serde_yaml::from_reader(reader)?;

    debug!(path = %path.display(), collections = collections.len(), "loaded collection list");
    Ok(collections)
}

/// Write a collection list
pub fn save_collections(path: impl AsRef<Path>, collections: &[CollectionInfo]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_yaml::to_writer(&mut writer, collections)?;
    writer.flush()?;
    Ok(())
}

/// The collection list of `dir`, or an empty list when it has none
pub fn collections_in(dir: impl AsRef<Path>) -> Result<Vec<CollectionInfo>> {
    let path = dir.as_ref().join(COLLECTIONS_FILE);
    if path.is_file() {
        load_collections(path)
    } else {
        Ok(Vec::new())
    }
}

/// Identifier for a file: its listed collection name, else its file stem
pub fn collection_id(path: &Path, collections: &[CollectionInfo]) -> String {
    let listed = path.file_name().and_then(|name| {
        collections
            .iter()
            .find(|info| name == info.file_name.as_str())
    });
    if let Some(info) = listed {
        return info.collection_name.clone();
    }

    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Undecoded contents of one swatch-exchange file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Collection name, URL or file stem
    pub id: String,
    pub bytes: Vec<u8>,
}

impl RawFile {
    pub fn new(id: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            id: id.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file; the identifier is the file stem
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_path_with(path, &[])
    }

    /// Read a file, taking its identifier from `collections` when listed
    pub fn from_path_with(path: impl AsRef<Path>, collections: &[CollectionInfo]) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let id = collection_id(path, collections);

        debug!(path = %path.display(), %id, bytes = bytes.len(), "loaded swatch file");
        Ok(Self { id, bytes })
    }
}

/// Whether a path has an `.ase` extension (any case)
pub fn is_ase_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|e| e.eq_ignore_ascii_case("ase"))
}

/// Paths of every `.ase` file directly inside `dir`, sorted
fn ase_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && is_ase_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

/// Load every `.ase` file directly inside `dir`, sorted by path
///
/// Files listed in the directory's collection list are identified by their
/// collection name.
pub fn scan_dir(dir: impl AsRef<Path>) -> Result<Vec<RawFile>> {
    let dir = dir.as_ref();
    let collections = collections_in(dir)?;
    ase_files_in(dir)?
        .iter()
        .map(|path| RawFile::from_path_with(path, &collections))
        .collect()
}

/// Expand files and directories into a list of `.ase` paths
///
/// Files are kept as given regardless of extension; directories are scanned.
pub fn expand_paths(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for input in inputs {
        if input.is_dir() {
            paths.extend(ase_files_in(input)?);
        } else {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_ase_file() {
        assert!(is_ase_file(Path::new("colors.ase")));
        assert!(is_ase_file(Path::new("dir/COLORS.ASE")));
        assert!(!is_ase_file(Path::new("colors.aco")));
        assert!(!is_ase_file(Path::new("ase")));
    }

    #[test]
    fn test_scan_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b.ase"), b"BBBB").unwrap();
        std::fs::write(dir.path().join("a.ASE"), b"AAAA").unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"skip").unwrap();
        std::fs::create_dir(dir.path().join("nested.ase")).unwrap();

        let files = scan_dir(dir.path()).unwrap();
        let ids: Vec<_> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(files[1].bytes, b"BBBB");
    }

    #[test]
    fn test_expand_paths() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("one.ase"), b"").unwrap();
        std::fs::write(dir.path().join("two.ase"), b"").unwrap();
        let explicit = dir.path().join("explicit.bin");

        let paths = expand_paths(&[dir.path().to_path_buf(), explicit.clone()]).unwrap();
        assert_eq!(
            paths,
            vec![dir.path().join("one.ase"), dir.path().join("two.ase"), explicit]
        );
    }

    fn info(collection_name: &str, file_name: &str) -> CollectionInfo {
        CollectionInfo {
            collection_name: collection_name.into(),
            file_name: file_name.into(),
            file_url: Some(format!("https://example.com/ase/{file_name}")),
        }
    }

    #[test]
    fn test_collection_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COLLECTIONS_FILE);
        let listed = vec![info("Fire Reds", "reds.ase"), info("Ocean Blues", "blues.ase")];

        save_collections(&path, &listed).unwrap();
        assert_eq!(load_collections(&path).unwrap(), listed);
    }

    #[test]
    fn test_collection_list_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COLLECTIONS_FILE);
        std::fs::write(
            &path,
            "- collection_name: Fire Reds\n  file_name: reds.ase\n  file_url: https://example.com/reds.ase\n\
             - collection_name: Greys\n  file_name: greys.ase\n",
        )
        .unwrap();

        let collections = load_collections(&path).unwrap();
        assert_eq!(collections.len(), 2);
        assert_eq!(collections[0].collection_name, "Fire Reds");
        assert_eq!(
            collections[0].file_url.as_deref(),
            Some("https://example.com/reds.ase")
        );
        assert_eq!(collections[1].file_url, None);
    }

    #[test]
    fn test_malformed_collection_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(COLLECTIONS_FILE);
        std::fs::write(&path, "- file_name: reds.ase\n").unwrap();

        assert!(matches!(
            load_collections(&path),
            Err(crate::Error::Collections(_))
        ));
    }

    #[test]
    fn test_collection_id() {
        let collections = [info("Fire Reds", "reds.ase")];

        assert_eq!(collection_id(Path::new("dl/reds.ase"), &collections), "Fire Reds");
        assert_eq!(collection_id(Path::new("dl/blues.ase"), &collections), "blues");
        assert_eq!(collection_id(Path::new("dl/reds.ase"), &[]), "reds");
    }

    #[test]
    fn test_scan_dir_uses_collection_names() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("reds.ase"), b"RRRR").unwrap();
        std::fs::write(dir.path().join("blues.ase"), b"BBBB").unwrap();
        save_collections(
            dir.path().join(COLLECTIONS_FILE),
            &[info("Fire Reds", "reds.ase")],
        )
        .unwrap();

        let files = scan_dir(dir.path()).unwrap();
        let ids: Vec<_> = files.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["blues", "Fire Reds"]);
        assert_eq!(files[1].bytes, b"RRRR");
    }

    #[test]
    fn test_collections_in_without_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(collections_in(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RawFile::from_path(dir.path().join("gone.ase")).is_err());
    }
}
