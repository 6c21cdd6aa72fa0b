//! # Branching History
//!
//! Undo records are stored in a tree of branches. Each branch holds a list of
//! [`UndoAction`]s and may hang off a parent branch at a fork point; the
//! logical history of a branch is its parent's first `idx` items followed by
//! its own items, recursively.
//!
//! `undo` counts how many records at the end of the current branch's logical
//! history have been undone. Recording a new action while `undo > 0` never
//! discards the undone tail: a new branch is forked at the current position
//! and the old tail stays reachable (see [`branch_switch_plan`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::action::{UndoAction, UndoableAction};
use crate::error::{HistoryError, Result};

/// Where a branch hangs off its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchParent {
    pub branch: usize,
    /// Number of the parent's items that precede the fork.
    pub idx: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: usize,
    pub items: Vec<UndoAction>,
    pub parent: Option<BranchParent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History {
    pub next_id: usize,
    pub undo: usize,
    pub current_branch: usize,
    pub branches: BTreeMap<usize, Branch>,
}

impl Default for History {
    fn default() -> Self {
        let mut branches = BTreeMap::new();
        branches.insert(
            0,
            Branch {
                id: 0,
                items: vec![],
                parent: None,
            },
        );
        Self {
            next_id: 1,
            undo: 0,
            current_branch: 0,
            branches,
        }
    }
}

impl History {
    fn branch(&self, id: usize) -> Result<&Branch> {
        self.branches
            .get(&id)
            .ok_or(HistoryError::UnknownBranch { branch: id })
    }

    pub fn can_undo(&self) -> bool {
        matches!(get_historical_action(self, self.undo + 1), Ok(Some(_)))
    }

    pub fn can_redo(&self) -> bool {
        self.undo > 0
    }
}

/// A record located in the branch tree.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistoricalAction<'a> {
    pub action: &'a UndoAction,
    pub idx: usize,
    pub branch: usize,
}

/// Finds the record `at` steps back from the tip of the current branch's
/// logical history (1 is the newest). `Ok(None)` means the history is shorter.
pub fn get_historical_action(history: &History, at: usize) -> Result<Option<HistoricalAction<'_>>> {
    if at == 0 {
        return Err(HistoryError::InvalidDepth);
    }

    let mut remaining = at;
    let mut branch = history.branch(history.current_branch)?;
    let mut span = branch.items.len();

    loop {
        if remaining <= span {
            let idx = span - remaining;
            return Ok(Some(HistoricalAction {
                action: &branch.items[idx],
                idx,
                branch: branch.id,
            }));
        }
        remaining -= span;

        let Some(parent) = branch.parent else {
            return Ok(None);
        };
        if parent.branch >= branch.id {
            return Err(HistoryError::Corrupt {
                reason: format!(
                    "branch {} has parent {} which is not older",
                    branch.id, parent.branch
                ),
            });
        }
        branch = history.branch(parent.branch)?;
        span = parent.idx.min(branch.items.len());
    }
}

/// Records `action`, forking a new branch when part of the history is undone.
pub fn add_action(mut history: History, action: UndoAction) -> History {
    if history.undo > 0 {
        let fork = match get_historical_action(&history, history.undo) {
            Ok(Some(found)) => Some(BranchParent {
                branch: found.branch,
                idx: found.idx,
            }),
            Ok(None) => None,
            Err(err) => {
                warn!(%err, "Cannot locate fork point, appending to current branch");
                None
            }
        };

        if let Some(parent) = fork {
            let id = history.next_id;
            history.next_id += 1;
            debug!(branch = id, parent = parent.branch, idx = parent.idx, "Forking history");
            history.branches.insert(
                id,
                Branch {
                    id,
                    items: vec![],
                    parent: Some(parent),
                },
            );
            history.current_branch = id;
        }
        history.undo = 0;
    }

    match history.branches.get_mut(&history.current_branch) {
        Some(branch) => branch.items.push(action),
        None => warn!(
            branch = history.current_branch,
            "Current branch missing, dropping history record"
        ),
    }
    history
}

/// Steps back one record. Returns the record to reverse, or `None` at the
/// start of history.
pub fn undo_action(mut history: History) -> (History, Option<UndoAction>) {
    let found = match get_historical_action(&history, history.undo + 1) {
        Ok(found) => found.map(|found| found.action.clone()),
        Err(err) => {
            warn!(%err, "Cannot undo");
            None
        }
    };
    if found.is_some() {
        history.undo += 1;
    }
    (history, found)
}

/// Steps forward one record. Returns the forward action to re-apply.
pub fn redo_action(mut history: History) -> (History, Option<UndoableAction>) {
    if history.undo == 0 {
        return (history, None);
    }
    let found = match get_historical_action(&history, history.undo) {
        Ok(found) => found.map(|found| found.action.action()),
        Err(err) => {
            warn!(%err, "Cannot redo");
            None
        }
    };
    if found.is_some() {
        history.undo -= 1;
    }
    (history, found)
}

/// Every record position `(branch, idx)` in `branch`'s logical history,
/// oldest first.
pub fn branch_ancestry(history: &History, branch: usize) -> Result<Vec<(usize, usize)>> {
    let mut spans = Vec::new();
    let mut current = history.branch(branch)?;
    let mut span = current.items.len();

    loop {
        spans.push((current.id, span));
        let Some(parent) = current.parent else {
            break;
        };
        if parent.branch >= current.id {
            return Err(HistoryError::Corrupt {
                reason: format!(
                    "branch {} has parent {} which is not older",
                    current.id, parent.branch
                ),
            });
        }
        current = history.branch(parent.branch)?;
        span = parent.idx.min(current.items.len());
    }

    Ok(spans
        .into_iter()
        .rev()
        .flat_map(|(branch, len)| (0..len).map(move |idx| (branch, idx)))
        .collect())
}

/// Number of records that can be undone from the current tip.
pub fn reachable_depth(history: &History) -> usize {
    branch_ancestry(history, history.current_branch)
        .map(|positions| positions.len())
        .unwrap_or(0)
}

/// The records to reverse and re-apply when moving to another branch.
#[derive(Debug, Clone, PartialEq)]
pub struct SwitchPlan {
    /// Newest first.
    pub undo: Vec<UndoAction>,
    /// Oldest first.
    pub redo: Vec<UndoableAction>,
}

/// Plans a jump from the current position to the tip of `target`: undo back
/// to the last record both histories share, then redo along `target`.
pub fn branch_switch_plan(history: &History, target: usize) -> Result<SwitchPlan> {
    history.branch(target)?;

    let mut current = branch_ancestry(history, history.current_branch)?;
    current.truncate(current.len().saturating_sub(history.undo));
    let wanted = branch_ancestry(history, target)?;

    let common = current
        .iter()
        .zip(&wanted)
        .take_while(|(a, b)| a == b)
        .count();

    let lookup = |&(branch, idx): &(usize, usize)| -> Result<&UndoAction> {
        history
            .branch(branch)?
            .items
            .get(idx)
            .ok_or_else(|| HistoryError::Corrupt {
                reason: format!("branch {branch} has no item {idx}"),
            })
    };

    let undo = current[common..]
        .iter()
        .rev()
        .map(|pos| lookup(pos).cloned())
        .collect::<Result<Vec<_>>>()?;
    let redo = wanted[common..]
        .iter()
        .map(|pos| lookup(pos).map(UndoAction::action))
        .collect::<Result<Vec<_>>>()?;

    Ok(SwitchPlan { undo, redo })
}
