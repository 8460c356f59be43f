//! Host platform queries

use crate::lang::strings;
use std::path::PathBuf;

pub const LINUX_OS_NAME: &str = "linux";
pub const MAC_OSX_NAME: &str = "macos";
pub const WINDOWS_OS_NAME: &str = "windows";

/// Current working directory, `None` if it was removed or is unreadable
pub fn current_directory() -> Option<PathBuf> {
    std::env::current_dir().ok()
}

pub fn is_linux() -> bool {
    is_os(LINUX_OS_NAME)
}

pub fn is_mac_osx() -> bool {
    is_os(MAC_OSX_NAME)
}

pub fn is_windows() -> bool {
    is_os(WINDOWS_OS_NAME)
}

/// Case-insensitive containment check against the target OS name
pub fn is_os(expected_os_name: &str) -> bool {
    std::env::consts::OS
        .to_lowercase()
        .contains(&expected_os_name.to_lowercase())
}

/// Compare dotted versions by their digits only
///
/// The expected digits are right-padded with '0' to the length of the actual
/// digits, so `"1.8"` vs `"1.8.0_45"` compares `18000` against `18045`.
pub fn is_version_at_least(actual_version: &str, expected_version: &str) -> bool {
    let actual_digits = strings::digits_only(Some(actual_version));
    let expected_digits = strings::pad(
        &strings::digits_only(Some(expected_version)),
        '0',
        actual_digits.len(),
    );

    match (actual_digits.parse::<u128>(), expected_digits.parse::<u128>()) {
        (Ok(actual), Ok(expected)) => actual >= expected,
        _ => false,
    }
}
