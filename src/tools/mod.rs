//! Small diagnostic programs exposed as `cp-commons` subcommands

pub mod dependency_graph;

pub use dependency_graph::{Dependency, DependencyGraph};

use crate::lang::values;
use std::path::{Path, PathBuf};

/// One line per pathname: `File (<absolute path>) exists (Yes|No).`
pub fn abs_path_report<S: AsRef<str>>(pathnames: &[S]) -> Vec<String> {
    pathnames
        .iter()
        .map(|pathname| {
            let path = Path::new(pathname.as_ref());
            let absolute = std::path::absolute(path).unwrap_or_else(|_| PathBuf::from(path));
            format!(
                "File ({}) exists ({}).",
                absolute.display(),
                values::bool_value_of(Some(path.exists()), "Yes", "No")
            )
        })
        .collect()
}

/// One line per variable: `NAME = value`, or `NAME = null` when unset
pub fn env_var_report<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let value = std::env::var(name).unwrap_or_else(|_| "null".to_string());
            format!("{} = {}", name, value)
        })
        .collect()
}
