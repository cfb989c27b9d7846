//! Comparison-efficient selection and sorting over an arena of linked-list nodes.
//!
//! Three pieces compose: [`ListArena`], a pool of (value, next) nodes addressed by
//! integer handles with O(1) free of whole spans; [`BinaryReducer`], which folds a
//! stream pairwise like a binary counter so only O(log n) partial results are ever
//! alive; and the algorithms on top, [`min_and_second_min`] (the single-elimination
//! tournament reaching the n + ceil(lg n) - 2 comparison bound, with a stable
//! variant) and [`sort_list`] (stable bottom-up linked mergesort driven by the same
//! reducer).

pub mod arena;
pub mod list_sort;
pub mod reducer;
pub mod selection;

pub use arena::{Link, ListArena, Queue};
pub use list_sort::{merge_sorted, sort_list};
pub use reducer::BinaryReducer;
pub use selection::{min_and_second_min, min_and_second_min_scan, min_and_second_min_stable};
