//! Orchestration of collection, matching, resolution, and assignment.
//!
//! The injector is stateless. Each call collects candidates from the target,
//! asks the strategy which of them accept the value, resolves the value for
//! the accepted members, and writes it through each member's setter.
//! Single-target injection stops asking once a candidate accepts.

use crate::collect::{Candidate, collect_with};
use crate::error::{AssignError, InjectError, InjectResult};
use crate::member::Injectable;
use crate::strategy::MatchStrategy;
use crate::value::Value;
use crate::value_source::ValueSource;

/// Injects into the first member of `target` that `strategy` accepts.
///
/// # Errors
///
/// Returns [`InjectError::NoMatchFound`] when no member accepts the value,
/// or the conversion or assignment failure for the chosen member.
pub fn inject_one(
    source: &ValueSource,
    target: &mut dyn Injectable,
    strategy: &dyn MatchStrategy,
) -> InjectResult<()> {
    let value = source.effective();
    let accepted = collect_with(target, |member| strategy.admits(member, value))
        .into_iter()
        .find(|candidate| accepts(strategy, candidate, value))
        .ok_or_else(|| no_match(target, strategy, value))?;
    assign(target, &accepted, strategy, value)
}

/// Injects into every member of `target` that `strategy` accepts.
///
/// Returns the number of members assigned. Assignment stops at the first
/// failure; members assigned before it keep their new values.
///
/// # Errors
///
/// Returns [`InjectError::NoMatchFound`] when no member accepts the value,
/// or the first conversion or assignment failure.
pub fn inject_all(
    source: &ValueSource,
    target: &mut dyn Injectable,
    strategy: &dyn MatchStrategy,
) -> InjectResult<usize> {
    let value = source.effective();
    let accepted = accepted_candidates(target, strategy, value);
    if accepted.is_empty() {
        return Err(no_match(target, strategy, value));
    }
    for candidate in &accepted {
        assign(target, candidate, strategy, value)?;
    }
    Ok(accepted.len())
}

fn accepted_candidates(
    target: &dyn Injectable,
    strategy: &dyn MatchStrategy,
    value: Option<&Value>,
) -> Vec<Candidate> {
    collect_with(target, |member| strategy.admits(member, value))
        .into_iter()
        .filter(|candidate| accepts(strategy, candidate, value))
        .collect()
}

fn accepts(strategy: &dyn MatchStrategy, candidate: &Candidate, value: Option<&Value>) -> bool {
    let accepted = strategy.accepts(candidate.member(), value);
    if !accepted {
        tracing::trace!(
            owner = candidate.owner(),
            member = candidate.member().name(),
            strategy = %strategy.describe(),
            "candidate rejected"
        );
    }
    accepted
}

fn assign(
    target: &mut dyn Injectable,
    candidate: &Candidate,
    strategy: &dyn MatchStrategy,
    value: Option<&Value>,
) -> InjectResult<()> {
    let member = candidate.member();
    let resolved = strategy
        .resolve(member, value.cloned())
        .map_err(|source| InjectError::Conversion {
            owner: candidate.owner(),
            member: member.name(),
            source,
        })?;
    let assignment_error = |source| InjectError::Assignment {
        owner: candidate.owner(),
        member: member.name(),
        source,
    };
    let node = node_at(target, candidate.depth()).ok_or_else(|| {
        assignment_error(AssignError::Detached {
            depth: candidate.depth(),
        })
    })?;
    member
        .assign(node.as_any_mut(), resolved)
        .map_err(assignment_error)?;
    tracing::debug!(
        owner = candidate.owner(),
        member = member.name(),
        strategy = %strategy.describe(),
        "injected value"
    );
    Ok(())
}

/// Walks `depth` steps up the ancestor chain.
fn node_at(target: &mut dyn Injectable, depth: usize) -> Option<&mut dyn Injectable> {
    match depth.checked_sub(1) {
        None => Some(target),
        Some(remaining) => target
            .parent_mut()
            .and_then(|parent| node_at(parent, remaining)),
    }
}

fn no_match(
    target: &dyn Injectable,
    strategy: &dyn MatchStrategy,
    value: Option<&Value>,
) -> InjectError {
    let err = InjectError::NoMatchFound {
        target: target.descriptor().type_name(),
        strategy: strategy.describe(),
        value: value.map_or_else(|| "null".to_owned(), Value::describe),
    };
    tracing::debug!(error = %err, "injection found no match");
    err
}
