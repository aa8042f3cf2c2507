//! Row Prop Checks
//!
//! Development-time checks on `RowProps`. Problems are reported, never fatal:
//! the row still renders.

use thiserror::Error;

use crate::row::RowProps;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowPropsError {
    #[error("scaffold_block_px_width must be greater than zero")]
    ZeroScaffoldWidth,
    #[error("path is empty; every row needs at least its own key")]
    EmptyPath,
    #[error("lower_sibling_counts has {counts} entries but path has {path}")]
    SiblingCountMismatch { counts: usize, path: usize },
    #[error("tree_id is empty")]
    EmptyTreeId,
    #[error("swap_from, swap_length and swap_depth must be set together")]
    PartialSwap,
}

impl RowProps {
    /// Collect every problem with these props
    pub fn validate(&self) -> Result<(), Vec<RowPropsError>> {
        let mut errors = Vec::new();

        if self.scaffold_block_px_width == 0 {
            errors.push(RowPropsError::ZeroScaffoldWidth);
        }
        let path = self.position.path.len();
        if path == 0 {
            errors.push(RowPropsError::EmptyPath);
        }
        let counts = self.position.lower_sibling_counts.len();
        if counts != path {
            errors.push(RowPropsError::SiblingCountMismatch { counts, path });
        }
        if self.tree_id.is_empty() {
            errors.push(RowPropsError::EmptyTreeId);
        }
        let swap_set = [self.swap_from, self.swap_length, self.swap_depth]
            .iter()
            .filter(|v| v.is_some())
            .count();
        if swap_set != 0 && swap_set != 3 {
            errors.push(RowPropsError::PartialSwap);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Log validation problems in debug builds
    pub fn warn_invalid(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(errors) = self.validate() {
            for err in errors {
                log::warn!(target: "ROW", "row {} in tree '{}': {}", self.node.key, self.tree_id, err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeKey, TreeNode};
    use crate::row::{DragFlags, RowDirection, RowPosition};

    fn valid() -> RowProps {
        let position = RowPosition {
            path: vec![NodeKey::from(1), NodeKey::from(2)],
            tree_index: 1,
            list_index: 1,
            lower_sibling_counts: vec![0, 1],
        };
        RowProps::new(TreeNode::new(2, "x"), position, 44, "tree-1", RowDirection::Ltr, DragFlags::default())
    }

    #[test]
    fn test_valid_props() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut props = valid();
        props.scaffold_block_px_width = 0;
        props.tree_id.clear();
        props.position.lower_sibling_counts = vec![0];

        let errors = props.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                RowPropsError::ZeroScaffoldWidth,
                RowPropsError::SiblingCountMismatch { counts: 1, path: 2 },
                RowPropsError::EmptyTreeId,
            ]
        );
    }

    #[test]
    fn test_empty_path() {
        let mut props = valid();
        props.position.path.clear();
        props.position.lower_sibling_counts.clear();
        assert_eq!(props.validate(), Err(vec![RowPropsError::EmptyPath]));
    }

    #[test]
    fn test_partial_swap() {
        let mut props = valid();
        props.swap_from = Some(2);
        assert_eq!(props.validate(), Err(vec![RowPropsError::PartialSwap]));

        props.swap_length = Some(1);
        props.swap_depth = Some(0);
        assert_eq!(props.validate(), Ok(()));
    }

    #[test]
    fn test_error_messages() {
        let err = RowPropsError::SiblingCountMismatch { counts: 1, path: 3 };
        assert_eq!(err.to_string(), "lower_sibling_counts has 1 entries but path has 3");
    }
}
