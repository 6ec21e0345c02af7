use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::PathError;

/// Folder path separator.
pub const SEPARATOR: char = '/';

/// The root folder of every storage.
pub const ROOT: &str = "/";

/// A rooted folder location inside a storage.
///
/// Always `"/"` or `"/a/b"`: no trailing separator except the root itself,
/// no empty segments and no `.`/`..` segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FolderPath(String);

impl FolderPath {
    pub fn root() -> Self {
        Self(ROOT.to_string())
    }

    /// Parses an already-canonical path, rejecting anything that breaks the
    /// path invariant.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw == ROOT {
            return Ok(Self::root());
        }
        let rest = raw
            .strip_prefix(SEPARATOR)
            .ok_or_else(|| PathError::NotRooted(raw.to_string()))?;
        for segment in rest.split(SEPARATOR) {
            validate_segment(raw, segment)?;
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == ROOT
    }

    /// Segments below the root, in order. Empty for the root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(SEPARATOR).filter(|segment| !segment.is_empty())
    }

    /// Last segment, or `None` for the root.
    pub fn leaf(&self) -> Option<&str> {
        if self.is_root() {
            return None;
        }
        self.0.rsplit(SEPARATOR).next()
    }

    pub fn parent(&self) -> Option<FolderPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rfind(SEPARATOR) {
            Some(0) | None => Some(Self::root()),
            Some(index) => Some(Self(self.0[..index].to_string())),
        }
    }

    /// Appends a single segment.
    pub fn join(&self, leaf: &str) -> Result<FolderPath, PathError> {
        validate_leaf(leaf)?;
        if self.is_root() {
            Ok(Self(format!("{}{}", ROOT, leaf)))
        } else {
            Ok(Self(format!("{}{}{}", self.0, SEPARATOR, leaf)))
        }
    }

    /// Every non-root prefix of this path, shallowest first.
    ///
    /// `/a/b` yields `/a` then `/a/b`; the root yields nothing.
    pub fn ancestors(&self) -> Vec<FolderPath> {
        let mut prefixes = Vec::new();
        let mut current = String::new();
        for segment in self.segments() {
            current.push(SEPARATOR);
            current.push_str(segment);
            prefixes.push(Self(current.clone()));
        }
        prefixes
    }

    /// True if `self` is `other` or lies underneath it.
    pub fn is_within(&self, other: &FolderPath) -> bool {
        if other.is_root() || self == other {
            return true;
        }
        self.0
            .strip_prefix(other.as_str())
            .is_some_and(|rest| rest.starts_with(SEPARATOR))
    }

    /// Moves this path from under `from` to under `to`.
    ///
    /// Returns `None` when `self` is not within `from`.
    pub fn rebase(&self, from: &FolderPath, to: &FolderPath) -> Option<FolderPath> {
        if !self.is_within(from) {
            return None;
        }
        let rest = if from.is_root() {
            self.0.as_str()
        } else {
            &self.0[from.0.len()..]
        };
        if rest.is_empty() || rest == ROOT {
            return Some(to.clone());
        }
        if to.is_root() {
            Some(Self(rest.to_string()))
        } else {
            Some(Self(format!("{}{}", to.0, rest)))
        }
    }
}

impl fmt::Display for FolderPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for FolderPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<FolderPath> for String {
    fn from(path: FolderPath) -> Self {
        path.0
    }
}

fn validate_segment(path: &str, segment: &str) -> Result<(), PathError> {
    if segment.is_empty() {
        return Err(PathError::EmptySegment(path.to_string()));
    }
    if segment == "." || segment == ".." {
        return Err(PathError::Traversal {
            path: path.to_string(),
            segment: segment.to_string(),
        });
    }
    Ok(())
}

/// Validates a single folder name as entered in a rename prompt.
pub fn validate_leaf(leaf: &str) -> Result<(), PathError> {
    if leaf.is_empty() {
        return Err(PathError::EmptySegment(leaf.to_string()));
    }
    if leaf.contains(SEPARATOR) {
        return Err(PathError::SeparatorInLeaf(leaf.to_string()));
    }
    if leaf == "." || leaf == ".." {
        return Err(PathError::ReservedLeaf(leaf.to_string()));
    }
    Ok(())
}

/// Turns the text of a create-folder prompt into a folder path.
///
/// Exactly one trailing separator is stripped; an input that is empty after
/// that denotes the root. Input without a leading separator is resolved under
/// `base`.
pub fn normalize_create_path(base: &FolderPath, raw_input: &str) -> Result<FolderPath, PathError> {
    let trimmed = raw_input.strip_suffix(SEPARATOR).unwrap_or(raw_input);
    if trimmed.is_empty() {
        return Ok(FolderPath::root());
    }
    if trimmed.starts_with(SEPARATOR) {
        return FolderPath::parse(trimmed);
    }
    if base.is_root() {
        FolderPath::parse(&format!("{}{}", ROOT, trimmed))
    } else {
        FolderPath::parse(&format!("{}{}{}", base, SEPARATOR, trimmed))
    }
}

/// Result of applying a rename prompt to a folder path.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenameTarget {
    /// Nothing to do: the prompt was empty or repeated the current name.
    NoOp,
    Rename(FolderPath),
}

/// Replaces the last segment of `old_path` with `raw_new_leaf`.
///
/// The comparison with the current leaf is exact: no case folding, no
/// trimming.
pub fn compute_rename_target(
    old_path: &FolderPath,
    raw_new_leaf: Option<&str>,
) -> Result<RenameTarget, PathError> {
    let Some(new_leaf) = raw_new_leaf.filter(|leaf| !leaf.is_empty()) else {
        return Ok(RenameTarget::NoOp);
    };
    let (Some(old_leaf), Some(parent)) = (old_path.leaf(), old_path.parent()) else {
        return Err(PathError::RootNotRenamable);
    };
    if new_leaf == old_leaf {
        return Ok(RenameTarget::NoOp);
    }
    Ok(RenameTarget::Rename(parent.join(new_leaf)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn path(raw: &str) -> FolderPath {
        FolderPath::parse(raw).unwrap()
    }

    #[test]
    fn test_parse_accepts_root_and_nested() {
        assert!(path("/").is_root());
        assert_eq!(path("/a/b").as_str(), "/a/b");
    }

    #[test]
    fn test_parse_rejects_trailing_separator() {
        assert!(matches!(FolderPath::parse("/a/"), Err(PathError::EmptySegment(_))));
    }

    #[test]
    fn test_parse_rejects_relative_and_traversal() {
        assert!(matches!(FolderPath::parse("a/b"), Err(PathError::NotRooted(_))));
        assert!(matches!(FolderPath::parse("/a/../b"), Err(PathError::Traversal { .. })));
        assert!(matches!(FolderPath::parse("/a//b"), Err(PathError::EmptySegment(_))));
    }

    #[test]
    fn test_leaf_and_parent() {
        let p = path("/projects/draft");
        assert_eq!(p.leaf(), Some("draft"));
        assert_eq!(p.parent(), Some(path("/projects")));
        assert_eq!(path("/projects").parent(), Some(FolderPath::root()));
        assert_eq!(FolderPath::root().leaf(), None);
        assert_eq!(FolderPath::root().parent(), None);
    }

    #[test]
    fn test_ancestors() {
        assert_eq!(path("/a/b").ancestors(), vec![path("/a"), path("/a/b")]);
        assert!(FolderPath::root().ancestors().is_empty());
    }

    #[test]
    fn test_is_within_does_not_match_sibling_prefix() {
        assert!(path("/a/b").is_within(&path("/a")));
        assert!(path("/a").is_within(&path("/a")));
        assert!(!path("/ab").is_within(&path("/a")));
        assert!(path("/ab").is_within(&FolderPath::root()));
    }

    #[test]
    fn test_rebase() {
        let from = path("/projects/draft");
        let to = path("/projects/final");
        assert_eq!(path("/projects/draft").rebase(&from, &to), Some(to.clone()));
        assert_eq!(
            path("/projects/draft/notes").rebase(&from, &to),
            Some(path("/projects/final/notes"))
        );
        assert_eq!(path("/projects/other").rebase(&from, &to), None);
    }

    #[test]
    fn test_serde_uses_plain_string() {
        let json = serde_json::to_string(&path("/a/b")).unwrap();
        assert_eq!(json, "\"/a/b\"");
        assert!(serde_json::from_str::<FolderPath>("\"/a/\"").is_err());
    }

    #[test]
    fn test_normalize_strips_one_trailing_separator() {
        let base = path("/notes");
        assert_eq!(normalize_create_path(&base, "/notes/ideas/").unwrap(), path("/notes/ideas"));
        assert_eq!(normalize_create_path(&base, "/notes/ideas").unwrap(), path("/notes/ideas"));
    }

    #[test]
    fn test_normalize_root_input_is_root() {
        let base = path("/notes");
        assert!(normalize_create_path(&base, "/").unwrap().is_root());
        assert!(normalize_create_path(&base, "").unwrap().is_root());
    }

    #[test]
    fn test_normalize_rejects_double_trailing_separator() {
        let base = FolderPath::root();
        assert!(normalize_create_path(&base, "/a//").is_err());
    }

    #[test]
    fn test_normalize_resolves_relative_input_under_base() {
        assert_eq!(normalize_create_path(&path("/notes"), "ideas/").unwrap(), path("/notes/ideas"));
        assert_eq!(normalize_create_path(&FolderPath::root(), "ideas").unwrap(), path("/ideas"));
    }

    #[test]
    fn test_rename_replaces_leaf() {
        let target = compute_rename_target(&path("/a/b"), Some("c")).unwrap();
        assert_eq!(target, RenameTarget::Rename(path("/a/c")));

        let target = compute_rename_target(&path("/draft"), Some("final")).unwrap();
        assert_eq!(target, RenameTarget::Rename(path("/final")));
    }

    #[test]
    fn test_rename_noop_cases() {
        let p = path("/a/b");
        assert_eq!(compute_rename_target(&p, None).unwrap(), RenameTarget::NoOp);
        assert_eq!(compute_rename_target(&p, Some("")).unwrap(), RenameTarget::NoOp);
        assert_eq!(compute_rename_target(&p, Some("b")).unwrap(), RenameTarget::NoOp);
    }

    #[test]
    fn test_rename_comparison_is_exact() {
        let p = path("/a/b");
        assert_eq!(
            compute_rename_target(&p, Some("B")).unwrap(),
            RenameTarget::Rename(path("/a/B"))
        );
        assert_eq!(
            compute_rename_target(&p, Some(" b")).unwrap(),
            RenameTarget::Rename(path("/a/ b"))
        );
    }

    #[test]
    fn test_rename_rejects_invalid_leaf() {
        let p = path("/a/b");
        assert!(matches!(
            compute_rename_target(&p, Some("c/d")),
            Err(PathError::SeparatorInLeaf(_))
        ));
        assert!(matches!(
            compute_rename_target(&p, Some("..")),
            Err(PathError::ReservedLeaf(_))
        ));
        assert_eq!(
            compute_rename_target(&FolderPath::root(), Some("x")),
            Err(PathError::RootNotRenamable)
        );
    }

    fn segment() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 _-]{1,8}"
    }

    fn folder_path() -> impl Strategy<Value = FolderPath> {
        prop::collection::vec(segment(), 1..5)
            .prop_map(|segments| FolderPath::parse(&format!("/{}", segments.join("/"))).unwrap())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_normalized_path_never_ends_with_separator(p in folder_path(), trailing in any::<bool>()) {
            let raw = if trailing { format!("{}/", p) } else { p.to_string() };
            let normalized = normalize_create_path(&FolderPath::root(), &raw).unwrap();
            prop_assert!(!normalized.as_str().ends_with(SEPARATOR));
            prop_assert_eq!(normalized, p);
        }

        #[test]
        fn prop_rename_to_current_leaf_is_noop(p in folder_path()) {
            let leaf = p.leaf().unwrap().to_string();
            prop_assert_eq!(compute_rename_target(&p, Some(&leaf)).unwrap(), RenameTarget::NoOp);
        }

        #[test]
        fn prop_rename_keeps_parent(p in folder_path(), leaf in segment()) {
            match compute_rename_target(&p, Some(&leaf)).unwrap() {
                RenameTarget::NoOp => prop_assert_eq!(p.leaf(), Some(leaf.as_str())),
                RenameTarget::Rename(target) => {
                    prop_assert_eq!(target.parent(), p.parent());
                    prop_assert_eq!(target.leaf(), Some(leaf.as_str()));
                }
            }
        }

        #[test]
        fn prop_ancestors_end_with_path(p in folder_path()) {
            let ancestors = p.ancestors();
            prop_assert_eq!(ancestors.len(), p.segments().count());
            prop_assert_eq!(ancestors.last(), Some(&p));
        }
    }
}
