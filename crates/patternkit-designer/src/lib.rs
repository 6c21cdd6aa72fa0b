//! # PatternKit Designer
//!
//! The undoable state engine of the PatternKit editor.
//!
//! ## Core Components
//!
//! - **State** ([`State`]): the document: paths, groups, guides, mirrors,
//!   clips, overlays, tilings, animation timeline, G-code settings and the
//!   undo history.
//! - **Actions** ([`Action`]): tagged edits and history controls.
//! - **Reducer** ([`Reducer`]): the only way the state changes. Each edit
//!   produces an [`UndoAction`] recording exactly what it overwrote.
//! - **History** ([`history`]): a branching undo tree. Recording while part
//!   of the history is undone forks a new branch instead of discarding it.
//!
//! ## Usage
//!
//! ```rust
//! use patternkit_designer::{initial_state, reducer, Action, ControlAction};
//!
//! let action: Action = serde_json::from_str(
//!     r##"{"type": "palette:update", "colors": ["#123456"]}"##,
//! )
//! .unwrap();
//! let state = reducer(initial_state(), action);
//! assert_eq!(state.palette, vec!["#123456".to_string()]);
//!
//! let state = reducer(state, ControlAction::Undo);
//! assert_eq!(state.palette.len(), 4);
//! ```

pub mod action;
pub mod clip;
pub mod error;
pub mod history;
pub mod list_edit;
pub mod model;
pub mod path_ops;
pub mod reducer;
pub mod state;
pub mod undo;

pub use action::{
    Action, AddRemoveEdit, Added, Allocated, ControlAction, Flip, UndoAction, UndoableAction,
};
pub use clip::{ClipMode, ContainmentClipper, PathClipper};
pub use error::{HistoryError, Result};
pub use history::{
    add_action, branch_ancestry, branch_switch_plan, get_historical_action, reachable_depth,
    redo_action, undo_action, Branch, BranchParent, HistoricalAction, History, SwitchPlan,
};
pub use model::{Id, Selection, SelectionKind};
pub use reducer::{reduce_without_undo, reducer, Reduced, Reducer, ReducerOptions};
pub use state::{initial_state, Meta, State, View};
pub use undo::undo;
