//! Manifest-driven ordering of directory entries.

use crate::manifest::Manifest;

/// Where entries missing from a manifest end up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnlistedPlacement {
    /// Before every listed entry (an unlisted entry ranks as position -1).
    #[default]
    First,
    /// After every listed entry.
    Last,
}

/// Sort rank of `name` under `manifest`.
///
/// Listed names rank by manifest position. Unlisted names rank below
/// position 0 (`First`) or above every position (`Last`).
#[must_use]
pub fn rank(manifest: &Manifest, name: &str, placement: UnlistedPlacement) -> usize {
    match (manifest.position(name), placement) {
        (Some(index), _) => index + 1,
        (None, UnlistedPlacement::First) => 0,
        (None, UnlistedPlacement::Last) => usize::MAX,
    }
}

/// Reorder `items` by manifest rank.
///
/// Without a manifest the input order is kept. The sort is stable, so
/// items of equal rank keep their relative input order.
pub fn sort_by_manifest<T>(
    items: &mut [T],
    manifest: Option<&Manifest>,
    placement: UnlistedPlacement,
    name_of: impl Fn(&T) -> &str,
) {
    let Some(manifest) = manifest else {
        return;
    };
    items.sort_by_key(|item| rank(manifest, name_of(item), placement));
}

/// Manifest names that match none of `names`, in manifest order.
pub fn missing_names<'m>(manifest: &'m Manifest, names: &[&str]) -> Vec<&'m str> {
    manifest
        .entries()
        .iter()
        .map(crate::manifest::ManifestEntry::name)
        .filter(|listed| !names.contains(listed))
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::manifest::ManifestEntry;

    fn manifest(names: &[&str]) -> Manifest {
        Manifest::new(
            names
                .iter()
                .map(|n| ManifestEntry::Name((*n).to_owned()))
                .collect(),
        )
    }

    fn sorted(items: &[&str], manifest: Option<&Manifest>, placement: UnlistedPlacement) -> Vec<String> {
        let mut items: Vec<String> = items.iter().map(|s| (*s).to_owned()).collect();
        sort_by_manifest(&mut items, manifest, placement, String::as_str);
        items
    }

    #[test]
    fn test_manifest_order() {
        let m = manifest(&["c", "a", "b"]);
        assert_eq!(
            sorted(&["b", "a", "c"], Some(&m), UnlistedPlacement::First),
            ["c", "a", "b"]
        );
    }

    #[test]
    fn test_unlisted_first() {
        let m = manifest(&["a"]);
        assert_eq!(
            sorted(&["a", "z"], Some(&m), UnlistedPlacement::First),
            ["z", "a"]
        );
    }

    #[test]
    fn test_unlisted_last() {
        let m = manifest(&["a"]);
        assert_eq!(
            sorted(&["z", "a"], Some(&m), UnlistedPlacement::Last),
            ["a", "z"]
        );
    }

    #[test]
    fn test_unlisted_keep_input_order() {
        let m = manifest(&["m"]);
        assert_eq!(
            sorted(&["b", "m", "a"], Some(&m), UnlistedPlacement::First),
            ["b", "a", "m"]
        );
        assert_eq!(
            sorted(&["b", "m", "a"], Some(&m), UnlistedPlacement::Last),
            ["m", "b", "a"]
        );
    }

    #[test]
    fn test_no_manifest_keeps_input_order() {
        assert_eq!(
            sorted(&["b", "a", "c"], None, UnlistedPlacement::Last),
            ["b", "a", "c"]
        );
    }

    #[test]
    fn test_empty_manifest_keeps_input_order() {
        let m = Manifest::default();
        assert_eq!(
            sorted(&["b", "a"], Some(&m), UnlistedPlacement::First),
            ["b", "a"]
        );
    }

    #[test]
    fn test_rank() {
        let m = manifest(&["x", "y"]);
        assert_eq!(rank(&m, "x", UnlistedPlacement::First), 1);
        assert_eq!(rank(&m, "y", UnlistedPlacement::Last), 2);
        assert_eq!(rank(&m, "q", UnlistedPlacement::First), 0);
        assert_eq!(rank(&m, "q", UnlistedPlacement::Last), usize::MAX);
    }

    #[test]
    fn test_missing_names() {
        let m = manifest(&["intro", "gone", "guide"]);
        assert_eq!(missing_names(&m, &["guide", "intro", "extra"]), ["gone"]);
    }
}
