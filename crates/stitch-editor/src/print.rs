use owo_colors::OwoColorize;
use std::fmt;

use stitch_tree::prelude::*;

use crate::{
    action::{Action, Transition},
    state::State,
};

/// Multi-line colored summary of a state for terminal output.
///
/// Unlike the plain `Display` impls, variables are shown with their current labels.
pub struct StateReport<'s> {
    state: &'s State,
}

impl<'s> StateReport<'s> {
    pub fn new(state: &'s State) -> Self {
        Self { state }
    }

    fn variable(&self, name: VarName) -> String {
        match self.state.term().binder(name) {
            Some(binder) => binder.to_string(),
            None => name.to_string(),
        }
    }

    fn action(&self, action: Action) -> String {
        match action {
            Action::Variable(name) => self.variable(name),
            other => other.to_string(),
        }
    }

    fn transition(&self, transition: &Transition) -> String {
        match transition {
            Transition::Select(hole) => format!("select {hole}"),
            Transition::Put(action) => format!("put {}", self.action(*action)),
            Transition::Relabel(name, _) => format!("relabel {}", self.variable(*name)),
        }
    }
}

impl fmt::Display for StateReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", "term:".bold().bright_white(), self.state.term())?;
        writeln!(f, "{} {}", "type:".bold().bright_white(), self.state.ty().green())?;

        let Some(focus) = self.state.focus() else {
            return writeln!(f, "{} {}", "focus:".bold().bright_white(), "none".dimmed());
        };

        writeln!(
            f,
            "{} {} : {}",
            "focus:".bold().bright_white(),
            focus.hole.yellow(),
            focus.ty.green()
        )?;

        writeln!(f, "{}", "context:".bold().bright_white())?;
        for (name, ty) in focus.context.iter() {
            writeln!(f, "  {} : {}", self.variable(name).red(), ty.green())?;
        }

        writeln!(f, "{}", "transitions:".bold().bright_white())?;
        for transition in &focus.transitions {
            writeln!(f, "  {}", self.transition(transition).blue())?;
        }

        Ok(())
    }
}

impl State {
    pub fn report(&self) -> StateReport<'_> {
        StateReport::new(self)
    }
}
