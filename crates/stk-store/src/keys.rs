//! Names of the persisted blobs.

use std::fmt;

/// One of the five persisted blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Entries,
    Products,
    ScannedCodes,
    Registry,
    ActiveLicense,
}

impl StoreKey {
    /// Every key, in the order `clear` removes them.
    pub const ALL: [StoreKey; 5] = [
        Self::Entries,
        Self::Products,
        Self::ScannedCodes,
        Self::Registry,
        Self::ActiveLicense,
    ];

    /// Storage name, shared with blobs written by earlier versions.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entries => "barcodeEntries",
            Self::Products => "importedProducts",
            Self::ScannedCodes => "scannedCodes",
            Self::Registry => "adminLicenses",
            Self::ActiveLicense => "systemLicense",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_distinct() {
        let names: HashSet<_> = StoreKey::ALL.iter().map(StoreKey::as_str).collect();
        assert_eq!(names.len(), StoreKey::ALL.len());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(StoreKey::Registry.to_string(), "adminLicenses");
    }
}
