use dealing::{DealConfig, GameState, RuleField};
use log::{debug, info, warn};

use crate::error::StoreError;
use crate::state::{SavedSession, SESSION};
use crate::storage::Storage;

/// Write the whole session record.
pub fn save_state<S: Storage + ?Sized>(
    storage: &mut S,
    state: &GameState,
) -> Result<(), StoreError> {
    SESSION.save(storage, &SavedSession::from(state))
}

/// The saved session, or `None` if there is nothing usable to resume.
pub fn restore_state<S: Storage + ?Sized>(storage: &S) -> Option<GameState> {
    let saved = match SESSION.may_load(storage) {
        Ok(Some(saved)) => saved,
        Ok(None) => return None,
        Err(err) => {
            warn!("Discarding unreadable game session: {err}");
            return None;
        }
    };

    match saved.remain {
        Some(remain) if remain != saved.deck.len() => warn!(
            "Saved session reports {remain} cards remaining but holds {}",
            saved.deck.len()
        ),
        None => debug!("Saved session has no card count, using the deck"),
        _ => {}
    }

    let mut state = GameState::from(saved);
    if !state.players.is_empty() && state.current_index >= state.players.len() {
        warn!(
            "Saved turn pointer {} is past the last seat, wrapping",
            state.current_index
        );
        state.current_index %= state.players.len();
    }
    Some(state)
}

pub fn clear_state<S: Storage + ?Sized>(storage: &mut S) {
    if let Err(err) = SESSION.remove(storage) {
        warn!("Failed to clear game session: {err}");
    }
}

/// What to do with a saved session when the game screen opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumePlan {
    /// Saved rules match the live ones
    Resume(GameState),
    /// Nothing saved, or rules changed and the user opted out of warnings
    StartFresh,
    /// Rules changed since the session was saved; ask before discarding it
    ConfirmRuleChange { changes: Vec<RuleField> },
}

pub fn plan_resume(saved: Option<GameState>, live: &DealConfig, skip_confirmation: bool) -> ResumePlan {
    let Some(saved) = saved else {
        return ResumePlan::StartFresh;
    };

    let changes = saved.cfg.changes_from(live);
    if changes.is_empty() {
        return ResumePlan::Resume(saved);
    }

    if skip_confirmation {
        info!("Rules changed ({}), starting a new game", describe_changes(&changes));
        ResumePlan::StartFresh
    } else {
        ResumePlan::ConfirmRuleChange { changes }
    }
}

pub fn describe_changes(changes: &[RuleField]) -> String {
    changes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
