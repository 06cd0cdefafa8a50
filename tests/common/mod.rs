// Shared helpers for integration tests
#![allow(dead_code)]

use std::fs::File;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use people_screen::{Contact, ContactDirectory};

static INIT_LOGGER: Once = Once::new();

/// Set up the logger for the tests
pub fn setup_logging() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::new()
            .filter_level(LevelFilter::Debug)
            .is_test(true)
            .init();
    });
}

/// Directory of `len` contacts named "Contact 0", "Contact 1", ...
pub fn directory_of(len: usize) -> ContactDirectory {
    ContactDirectory::new(
        (0..len)
            .map(|i| Contact::new(&format!("contact-{}", i), &format!("Contact {}", i)))
            .collect(),
    )
}

/// Create empty files standing in for avatar images.
pub fn touch_assets(dir: &Path, handles: &[&str]) {
    for handle in handles {
        File::create(dir.join(handle)).expect("Failed to create asset file");
    }
}

pub fn names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.name.as_str()).collect()
}
