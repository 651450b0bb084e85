use anyhow::Context;
use inquire::{InquireError, Select, Text};
use std::fmt;
use weather_core::{PresentationState, WeatherResolver};

use crate::render;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Search,
    ToggleUnit,
    Quit,
}

/// Menu entry; the unit toggle names the unit it switches to.
#[derive(Debug, Clone)]
struct MenuItem {
    action: Action,
    label: String,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

fn menu(state: &PresentationState) -> Vec<MenuItem> {
    let mut items = vec![MenuItem {
        action: Action::Search,
        label: "Look up another ZIP code".into(),
    }];
    if state.record().is_some() {
        let next = state.unit().toggled();
        items.push(MenuItem {
            action: Action::ToggleUnit,
            label: format!("Switch to {} ({next})", next.name()),
        });
    }
    items.push(MenuItem {
        action: Action::Quit,
        label: "Quit".into(),
    });
    items
}

/// Prompt for ZIP codes until the user quits. Esc or Ctrl-C ends the session.
pub async fn run(resolver: &WeatherResolver) -> anyhow::Result<()> {
    let mut state = PresentationState::new();
    print!("{}", render::render(&state));

    let mut action = Action::Search;
    loop {
        match action {
            Action::Search => {
                let Some(zip) = prompt_zip()? else {
                    return Ok(());
                };
                state.set_query(zip);
                let Some(postal_code) = state.begin_lookup() else {
                    continue;
                };
                print!("{}", render::render(&state));
                let outcome = resolver.resolve(&postal_code).await;
                state.finish_lookup(outcome);
                print!("{}", render::render(&state));
            }
            Action::ToggleUnit => {
                state.toggle_unit();
                print!("{}", render::render(&state));
            }
            Action::Quit => return Ok(()),
        }

        action = match Select::new("What next?", menu(&state)).prompt() {
            Ok(item) => item.action,
            Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => {
                Action::Quit
            }
            Err(e) => return Err(e).context("Failed to read menu choice"),
        };
    }
}

/// `None` when the user cancels.
fn prompt_zip() -> anyhow::Result<Option<String>> {
    match Text::new("ZIP code:")
        .with_placeholder("e.g. 10001, 90210, 33101")
        .prompt()
    {
        Ok(zip) => Ok(Some(zip)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(e).context("Failed to read ZIP code"),
    }
}
