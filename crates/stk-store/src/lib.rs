//! # stk-store — Persistence and Session State for Stocktake
//!
//! ## Layers
//!
//! - [`backend`] — the [`Store`] trait over five named JSON blobs, with a
//!   directory-backed [`FileStore`] and an in-memory [`MemoryStore`].
//! - [`blob`] — typed load/save. A blob that fails to parse is logged,
//!   removed and treated as empty.
//! - [`inventory`] — [`Inventory`], the session that owns every piece of
//!   mutable state, loads it once and writes it back after each mutation.
//!
//! ## Storage Keys
//!
//! | Key | Contents |
//! |-----|----------|
//! | `barcodeEntries` | scan entries, in submission order |
//! | `importedProducts` | reference product list |
//! | `scannedCodes` | normalized codes seen in check mode |
//! | `adminLicenses` | issued license records |
//! | `systemLicense` | the active license key |

pub mod backend;
pub mod blob;
pub mod error;
pub mod inventory;
pub mod keys;

pub use backend::{FileStore, MemoryStore, Store};
pub use error::{InventoryError, StoreError};
pub use inventory::{CheckOutcome, Inventory};
pub use keys::StoreKey;
