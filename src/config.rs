//! Project configuration describing which pages to rewrite and which images to verify.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::asset_paths::{Identifier, PageMode};

/// File name looked up in the base directory by [`ProjectConfig::discover`].
pub const DEFAULT_CONFIG_FILE: &str = "gallery.config.json";

/// Identifiers referenced by the gallery pages when they were moved off the photo host.
const DEFAULT_IDENTIFIERS: &[u32] = &[
  1288, 1289, 1292, 1293, 1294, 1299, 1300, 1301, 1303, 1304, 1305, 1307, 1309, 1310, 1313, 1315,
  1316, 1317, 1319, 1320, 1321, 1328, 1329, 1331, 1332, 1334, 1342, 1344, 1346, 1350, 1353, 1361,
  1362, 1363, 1369, 1371, 1372, 1375, 1376, 1377, 1380, 1382, 1383, 1385, 1390, 1393, 1397, 1399,
  1407, 1408, 1415, 1420, 1446, 1452, 1456, 1459, 1461, 1462, 1463, 1464, 1465, 1469, 1474, 1477,
  1481, 1509, 1513, 1515, 1518, 1520, 1527, 1529, 1534, 1538, 1539, 1542, 1543, 1544, 1549, 1550,
  1551, 1553, 1554, 1555, 1562, 1565, 1567, 1578, 1579, 1580, 1590, 1594, 1595, 1597, 1598, 1599,
  1600, 1601, 1602, 1603, 1623, 1624, 1630, 1633, 1634, 1657, 1662, 1670, 1671, 1673, 1677, 1681,
  1691, 1695, 1714, 1715, 1722, 1737, 1740, 1742, 1744, 1746, 1747, 1749, 1752, 1762, 1766, 1776,
  1785, 1790, 1792, 1794, 1798, 1809, 1811, 1814, 1816, 1817, 1834, 1835, 1837, 1838, 1839, 1840,
  1849, 1852, 1853, 1862, 1881, 1885, 1894, 1895, 1911, 1921, 1927, 1933, 1938, 1939, 1946, 1949,
  1950, 1975, 1982, 1984, 1986, 1994, 2019, 2027, 2033, 2034, 2035, 2038, 2039, 2042, 2044, 2048,
  2050, 2051, 2053, 2054, 2055,
];

/// A page to rewrite, relative to the base directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PageEntry {
  /// Page path relative to the base directory.
  pub path: PathBuf,
  /// Whether the page sits at the root or inside `pics/`.
  pub mode: PageMode,
}

impl PageEntry {
  /// Convenience constructor.
  pub fn new(path: impl Into<PathBuf>, mode: PageMode) -> Self {
    Self {
      path: path.into(),
      mode,
    }
  }
}

/// Discoverable configuration for a gallery site.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
  /// Pages to rewrite, processed in order.
  pub pages: Vec<PageEntry>,
  /// Identifiers whose image files should exist.
  pub identifiers: Vec<Identifier>,
  /// Thumbnail directory relative to the base directory.
  pub thumbs_dir: String,
  /// Full-size image directory relative to the base directory.
  pub full_dir: String,
  /// Name of the missing-files report written into the base directory.
  pub report_file: String,
}

impl Default for ProjectConfig {
  fn default() -> Self {
    let mut pages = vec![PageEntry::new("pics.html", PageMode::Root)];
    pages.extend((2..=6).map(|n| PageEntry::new(format!("pics/p{n}.html"), PageMode::Nested)));

    Self {
      pages,
      identifiers: DEFAULT_IDENTIFIERS.iter().copied().map(Identifier::from).collect(),
      thumbs_dir: "pics/thumbs".into(),
      full_dir: "pics/full".into(),
      report_file: "missing-images.txt".into(),
    }
  }
}

/// Errors that can occur while loading the configuration file.
#[derive(Debug)]
pub enum ConfigError {
  /// Failed to read the configuration file from disk.
  Io {
    /// Path that caused the error.
    path: PathBuf,
    /// Source I/O error.
    source: std::io::Error,
  },
  /// Failed to parse the JSON configuration file.
  Parse {
    /// Path that caused the error.
    path: PathBuf,
    /// Source parse error.
    source: serde_json::Error,
  },
}

impl ProjectConfig {
  /// Load `gallery.config.json` from the base directory, or defaults when it is absent.
  pub fn discover(base_dir: &Path) -> Result<Self, ConfigError> {
    Self::load_from_path(base_dir.join(DEFAULT_CONFIG_FILE))
  }

  /// Read configuration from a specific JSON file.
  ///
  /// A missing file yields [`ProjectConfig::default`]; unreadable or malformed files are errors.
  pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let contents = match fs::read_to_string(path) {
      Ok(contents) => contents,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        return Ok(Self::default());
      }
      Err(err) => {
        return Err(ConfigError::Io {
          path: path.to_path_buf(),
          source: err,
        });
      }
    };

    serde_json::from_str(&contents).map_err(|err| ConfigError::Parse {
      path: path.to_path_buf(),
      source: err,
    })
  }

  /// Absolute thumbnail directory for a base directory.
  pub fn thumbs_dir_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.thumbs_dir)
  }

  /// Absolute full-size directory for a base directory.
  pub fn full_dir_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.full_dir)
  }

  /// Where the missing-files report is written.
  pub fn report_path(&self, base_dir: &Path) -> PathBuf {
    base_dir.join(&self.report_file)
  }
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Io { path, source } => {
        write!(f, "failed to read {}: {}", path.display(), source)
      }
      Self::Parse { path, source } => {
        write!(f, "failed to parse {}: {}", path.display(), source)
      }
    }
  }
}

impl std::error::Error for ConfigError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      Self::Io { source, .. } => Some(source),
      Self::Parse { source, .. } => Some(source),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn defaults_describe_the_gallery_batch() {
    let config = ProjectConfig::default();

    assert_eq!(config.pages.len(), 6);
    assert_eq!(config.pages[0], PageEntry::new("pics.html", PageMode::Root));
    assert_eq!(
      config.pages[5],
      PageEntry::new("pics/p6.html", PageMode::Nested)
    );
    assert_eq!(config.identifiers.len(), 181);
    assert_eq!(config.identifiers[0].as_str(), "1288");
    assert_eq!(config.identifiers[180].as_str(), "2055");
  }

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let dir = tempdir().unwrap();
    let config = ProjectConfig::discover(dir.path()).unwrap();
    assert_eq!(config, ProjectConfig::default());
  }

  #[test]
  fn partial_file_keeps_remaining_defaults() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{ "pages": [{ "path": "index.html", "mode": "root" }], "identifiers": ["7", "0042"] }"#,
    )
    .unwrap();

    let config = ProjectConfig::discover(dir.path()).unwrap();
    assert_eq!(config.pages, vec![PageEntry::new("index.html", PageMode::Root)]);
    assert_eq!(config.identifiers[1].as_str(), "0042");
    assert_eq!(config.thumbs_dir, "pics/thumbs");
    assert_eq!(
      config.report_path(dir.path()),
      dir.path().join("missing-images.txt")
    );
  }

  #[test]
  fn accepts_numeric_identifiers() {
    let dir = tempdir().unwrap();
    fs::write(
      dir.path().join(DEFAULT_CONFIG_FILE),
      r#"{ "identifiers": [1288, 2055] }"#,
    )
    .unwrap();

    let config = ProjectConfig::discover(dir.path()).unwrap();
    assert_eq!(
      config.identifiers,
      vec![Identifier::from(1288), Identifier::from(2055)]
    );
  }

  #[test]
  fn malformed_file_is_reported_with_its_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_CONFIG_FILE);
    fs::write(&path, r#"{ "identifiers": ["IMG_1"] }"#).unwrap();

    let err = ProjectConfig::load_from_path(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains(DEFAULT_CONFIG_FILE));
  }
}
