//! Path helpers for user-supplied locations.

use std::path::PathBuf;

/// Expand `~` and `$VAR` / `${VAR}` in a user-supplied path.
///
/// Unknown variables are left as written rather than failing, so the later
/// file access reports the path the user actually typed.
pub fn expand_path(raw: &str) -> PathBuf {
    match shellexpand::full(raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => PathBuf::from(shellexpand::tilde(raw).as_ref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_path_leaves_plain_paths_alone() {
        assert_eq!(expand_path("data/tree.json"), PathBuf::from("data/tree.json"));
    }

    #[test]
    fn expand_path_keeps_unknown_variables() {
        let p = expand_path("$FAMGRAPH_SURELY_UNSET_VAR/tree.json");
        assert_eq!(p, PathBuf::from("$FAMGRAPH_SURELY_UNSET_VAR/tree.json"));
    }
}
