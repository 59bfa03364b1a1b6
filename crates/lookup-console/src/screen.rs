//! Screen state machine
//!
//! The console shows exactly one of four screens. The current screen is a
//! single value and every change goes through [`Screen::next`], so no
//! sequence of triggers can leave two screens active.

use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// The mutually exclusive top-level views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Introductory page
    #[default]
    Home,
    /// Details of the last successful lookup
    Lookup,
    /// Operator form for registering an entry (privileged)
    AddItem,
    /// Nothing but the current notification
    Void,
}

impl Screen {
    /// Every screen
    pub const ALL: [Screen; 4] = [Screen::Home, Screen::Lookup, Screen::AddItem, Screen::Void];

    /// Stable view identifier
    pub fn id(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Lookup => "lookup",
            Screen::AddItem => "add-item",
            Screen::Void => "void",
        }
    }

    /// Transition function
    ///
    /// Returns `None` when the trigger is refused in the current state; the
    /// only refusal is navigating to the add-item form without privilege.
    /// `privileged` is the session state after the trigger's own effects.
    pub fn next(self, trigger: Trigger, privileged: bool) -> Option<Screen> {
        match trigger {
            Trigger::NavigateHome | Trigger::LoggedOut => Some(Screen::Home),
            Trigger::NavigateAddItem | Trigger::Authenticated if privileged => {
                Some(Screen::AddItem)
            }
            Trigger::NavigateAddItem | Trigger::Authenticated => None,
            Trigger::LookupFound => Some(Screen::Lookup),
            Trigger::LookupMissed | Trigger::Inserted => Some(Screen::Void),
            Trigger::InsertFailed => Some(self),
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Screen::ALL
            .into_iter()
            .find(|screen| screen.id() == s)
            .ok_or_else(|| format!("Unknown screen: {}", s))
    }
}

/// Events that move the console between screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// Operator pressed Home
    NavigateHome,
    /// Operator pressed Add Item
    NavigateAddItem,
    /// Lookup returned an entry
    LookupFound,
    /// Lookup returned nothing or failed
    LookupMissed,
    /// Ledger accepted the login signature
    Authenticated,
    /// Ledger stored the entry
    Inserted,
    /// Insert refused or failed
    InsertFailed,
    /// Operator logged out
    LoggedOut,
}

/// Holder of the current screen
#[derive(Debug, Default)]
pub struct ScreenMachine {
    current: Screen,
}

impl ScreenMachine {
    /// Start on the home screen
    pub fn new() -> Self {
        Self::default()
    }

    /// The active screen
    pub fn current(&self) -> Screen {
        self.current
    }

    /// Apply a trigger; returns the new screen, or `None` if refused
    pub fn apply(&mut self, trigger: Trigger, privileged: bool) -> Option<Screen> {
        let next = self.current.next(trigger, privileged)?;
        if next != self.current {
            debug!(from = %self.current, to = %next, ?trigger, "Screen transition");
        }
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_home() {
        assert_eq!(ScreenMachine::new().current(), Screen::Home);
    }

    #[test]
    fn test_lookup_outcomes() {
        assert_eq!(Screen::Home.next(Trigger::LookupFound, false), Some(Screen::Lookup));
        assert_eq!(Screen::AddItem.next(Trigger::LookupMissed, true), Some(Screen::Void));
    }

    #[test]
    fn test_add_item_requires_privilege() {
        assert_eq!(Screen::Home.next(Trigger::NavigateAddItem, false), None);
        assert_eq!(Screen::Home.next(Trigger::NavigateAddItem, true), Some(Screen::AddItem));
        assert_eq!(Screen::Void.next(Trigger::Authenticated, true), Some(Screen::AddItem));
    }

    #[test]
    fn test_insert_outcomes() {
        assert_eq!(Screen::AddItem.next(Trigger::Inserted, true), Some(Screen::Void));
        assert_eq!(Screen::AddItem.next(Trigger::InsertFailed, true), Some(Screen::AddItem));
    }

    #[test]
    fn test_logout_forces_home() {
        for screen in Screen::ALL {
            assert_eq!(screen.next(Trigger::LoggedOut, false), Some(Screen::Home));
        }
    }

    #[test]
    fn test_refused_trigger_keeps_state() {
        let mut machine = ScreenMachine::new();
        machine.apply(Trigger::LookupFound, false);

        assert_eq!(machine.apply(Trigger::NavigateAddItem, false), None);
        assert_eq!(machine.current(), Screen::Lookup);
    }

    #[test]
    fn test_ids_roundtrip() {
        for screen in Screen::ALL {
            assert_eq!(screen.id().parse::<Screen>().unwrap(), screen);
        }
        assert!("settings".parse::<Screen>().is_err());
    }
}
