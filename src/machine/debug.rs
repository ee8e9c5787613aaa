//! Human-readable summaries of an FSM.

use crate::core::ActionKind;
use crate::machine::fsm::Fsm;
use std::fmt::{self, Write};

impl fmt::Display for Fsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Fsm(states={}, regions={}, current={})",
            self.states().len(),
            self.regions().len(),
            self.current_state().map_or("<none>", |s| s.name())
        )
    }
}

impl fmt::Debug for Fsm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("states", &self.states().len())
            .field("regions", &self.regions().len())
            .field("current", &self.current_state().map(|s| s.name()))
            .field("attached", &self.parent().is_some())
            .finish()
    }
}

impl Fsm {
    /// Full listing of states, transitions, actions and regions.
    ///
    /// Unresolved names are suffixed with `?`; the current state is
    /// prefixed with `*`.
    pub fn dump(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_dump(&mut out);
        out
    }

    fn write_dump(&self, out: &mut String) -> fmt::Result {
        writeln!(out, "{}", self)?;

        writeln!(out, "regions:")?;
        for region in self.regions() {
            match region.content() {
                Some(content) => writeln!(out, "  {} = {content}", region.name())?,
                None => writeln!(out, "  {}", region.name())?,
            }
        }

        writeln!(out, "states:")?;
        let current = self.current_state_id();
        for (index, state) in self.states().iter().enumerate() {
            let marker = if current.map(|id| id.index()) == Some(index) {
                "*"
            } else {
                " "
            };
            writeln!(out, " {marker}{}", state.name())?;

            for transition in state.transitions() {
                let event = transition.event();
                let on = match event.region() {
                    Some(region) => format!("{}@{region}", event.event_type()),
                    None => event.event_type().to_string(),
                };
                let target = transition
                    .target()
                    .map_or_else(|| "<none>".to_string(), |t| t.to_string());
                writeln!(out, "    on {on} -> {target}")?;

                for action in transition.actions() {
                    let kind = match action.kind() {
                        ActionKind::SetContent(value) => format!("set {value}"),
                        ActionKind::ClearContent => "clear".to_string(),
                        ActionKind::Damage => "damage".to_string(),
                        ActionKind::Callback(_) => "call".to_string(),
                    };
                    writeln!(out, "      {kind} {}", action.region())?;
                }
            }
        }

        Ok(())
    }
}
