//! Lookup-service adapters.

mod open_library;

pub use open_library::{OpenLibraryClient, OPEN_LIBRARY_BASE_URL};
