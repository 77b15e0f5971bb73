//! Persisted stores: the editor buffer, the theme catalog and brand profiles.
//!
//! Stores never return errors. Not-found and validation problems are logged
//! and ignored; storage failures are logged and the in-memory change stands.

pub mod catalog;
pub mod clock;
pub mod editor;
pub mod events;
pub mod ids;
pub mod profiles;

pub use catalog::{CreateThemeOptions, ThemeCatalog, ThemePatch};
pub use clock::{Clock, SystemClock};
pub use editor::EditorStore;
pub use events::StoreEvent;
pub use profiles::{CreateProfileOptions, ProfilePatch, ProfileStore};
