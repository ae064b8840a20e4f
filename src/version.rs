use std::env::consts::{ARCH, OS};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn full_version() -> String {
    format!("{VERSION}-{ARCH}-{OS}")
}

#[test]
fn test_full_version() {
    let version = full_version();
    assert!(version.starts_with(VERSION));
    assert!(version.ends_with(OS));
}
