//! Interactive picking session.
//!
//! Walks one location through the workflow: entry point (map click or search
//! result), coordinates, skill dialog, confirm. Uses dialoguer for terminal
//! UI prompts; anything pre-filled from CLI args skips its prompt.

use std::io::{self, Write};

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use routepick_core::prelude::*;

/// How the pending coordinate arrives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryPoint {
    Map,
    Search,
}

/// Pre-filled values from CLI args that skip prompts.
#[derive(Debug, Clone, Default)]
pub struct PrefilledSelection {
    /// Entry point - if Some, skip the source prompt
    pub entry: Option<EntryPoint>,
    /// Coordinate - if Some, skip the coordinate prompt
    pub coordinate: Option<Coordinates>,
    /// Address for search entries - if Some, skip the address prompt
    pub address: Option<String>,
    /// Skill - if Some, skip the skill prompt
    pub skill: Option<SkillTag>,
    /// Confirm without asking
    pub yes: bool,
}

/// What happened to the pending selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickResult {
    Committed,
    Cancelled,
    Discarded,
}

pub struct PickFlow<'a, W: Write = io::Stdout> {
    coordinator: &'a mut EditingCoordinator<InMemoryStore>,
    prefilled: PrefilledSelection,
    writer: W,
    theme: ColorfulTheme,
}

impl<'a> PickFlow<'a, io::Stdout> {
    pub fn new(
        coordinator: &'a mut EditingCoordinator<InMemoryStore>,
        prefilled: PrefilledSelection,
    ) -> Self {
        Self {
            coordinator,
            prefilled,
            writer: io::stdout(),
            theme: ColorfulTheme::default(),
        }
    }
}

impl<'a, W: Write> PickFlow<'a, W> {
    /// Create a flow with a custom writer (for testing).
    #[cfg(test)]
    pub fn with_writer(
        coordinator: &'a mut EditingCoordinator<InMemoryStore>,
        prefilled: PrefilledSelection,
        writer: W,
    ) -> Self {
        Self {
            coordinator,
            prefilled,
            writer,
            theme: ColorfulTheme::default(),
        }
    }

    /// Run one selection through the dialog.
    ///
    /// Flow:
    /// 1. Choose map click or search result
    /// 2. Enter coordinate (and address for search)
    /// 3. Show the dialog body
    /// 4. Choose a skill
    /// 5. Confirm or cancel
    pub fn collect(&mut self) -> Result<PickResult> {
        self.print_header()?;

        let entry = self.prompt_entry_point()?;
        let coordinate = self.prompt_coordinate()?;
        let event = match entry {
            EntryPoint::Map => InteractionEvent::Map(MapClick { coordinate }),
            EntryPoint::Search => InteractionEvent::Search(SearchResult {
                coordinate,
                address: self.prompt_address()?,
            }),
        };
        self.coordinator.handle_interaction(event);

        loop {
            self.print_dialog()?;

            let skill = self.prompt_skill()?;
            if let Some(skill) = skill
                && !self.coordinator.choose_skill(skill)
            {
                anyhow::bail!("Skill '{}' is disabled in this catalog", skill);
            }

            if !self.prompt_confirm()? {
                self.coordinator.handle_dialog_cancel();
                writeln!(self.writer, "  {}", style("Selection cancelled").yellow())?;
                return Ok(PickResult::Cancelled);
            }

            match self.coordinator.handle_dialog_confirm() {
                ConfirmOutcome::Committed => {
                    writeln!(self.writer, "  {}", style("✓ Location added").green())?;
                    return Ok(PickResult::Committed);
                }
                ConfirmOutcome::Rejected(error) => {
                    writeln!(self.writer, "  {}", style(format!("⚠ {error}")).red())?;
                    if !self.coordinator.dialog().is_open() {
                        return Ok(PickResult::Discarded);
                    }
                }
                ConfirmOutcome::Ignored => return Ok(PickResult::Cancelled),
            }
        }
    }

    fn print_header(&mut self) -> Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", style("  Add Location").bold().cyan())?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn print_dialog(&mut self) -> Result<()> {
        writeln!(self.writer, "{}", style(format!("  {}", SelectionDialog::TITLE)).bold())?;
        writeln!(self.writer, "  ───────────────────────────")?;
        if let Some(lines) = self.coordinator.dialog().coordinate_lines() {
            for line in lines {
                writeln!(self.writer, "  {line}")?;
            }
        }
        if let Some(address) = self.coordinator.dialog().address_line() {
            writeln!(self.writer, "  {address}")?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn prompt_entry_point(&self) -> Result<EntryPoint> {
        if let Some(entry) = self.prefilled.entry {
            return Ok(entry);
        }

        let options = vec![
            "Map click  - a bare coordinate",
            "Search     - a coordinate with an address",
        ];
        let selection = Select::with_theme(&self.theme)
            .with_prompt("Where does the location come from?")
            .items(&options)
            .default(0)
            .interact()?;

        Ok(match selection {
            0 => EntryPoint::Map,
            _ => EntryPoint::Search,
        })
    }

    fn prompt_coordinate(&self) -> Result<Coordinates> {
        if let Some(coordinate) = self.prefilled.coordinate {
            return Ok(coordinate);
        }

        let coordinate: String = Input::with_theme(&self.theme)
            .with_prompt("Coordinate (lat,lng)")
            .validate_with(|input: &String| {
                input
                    .parse::<Coordinates>()
                    .map(|_| ())
                    .map_err(|e| e.to_string())
            })
            .interact_text()?;

        Ok(coordinate.parse()?)
    }

    fn prompt_address(&self) -> Result<String> {
        if let Some(address) = &self.prefilled.address {
            return Ok(address.clone());
        }

        let address: String = Input::with_theme(&self.theme)
            .with_prompt("Address")
            .allow_empty(true)
            .interact_text()?;

        Ok(address)
    }

    fn prompt_skill(&mut self) -> Result<Option<SkillTag>> {
        if let Some(skill) = self.prefilled.skill {
            return Ok(Some(skill));
        }

        let selectable: Vec<SkillOption> =
            self.coordinator.catalog().selectable().copied().collect();
        let mut items = vec!["(no skill)".to_string()];
        items.extend(selectable.iter().map(|option| option.label.to_string()));

        let selection = Select::with_theme(&self.theme)
            .with_prompt("Skill")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(selection
            .checked_sub(1)
            .and_then(|index| selectable.get(index))
            .map(|option| option.value))
    }

    fn prompt_confirm(&self) -> Result<bool> {
        if self.prefilled.yes {
            return Ok(true);
        }

        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt("Confirm?")
            .default(true)
            .interact()?;

        Ok(confirmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefilled(entry: EntryPoint, skill: SkillTag) -> PrefilledSelection {
        PrefilledSelection {
            entry: Some(entry),
            coordinate: Some(Coordinates::new(3.0, 4.0)),
            address: Some("5 Oak Ave".to_string()),
            skill: Some(skill),
            yes: true,
        }
    }

    #[test]
    fn test_prefilled_selection_default() {
        let prefilled = PrefilledSelection::default();

        assert!(prefilled.entry.is_none());
        assert!(prefilled.coordinate.is_none());
        assert!(prefilled.address.is_none());
        assert!(prefilled.skill.is_none());
        assert!(!prefilled.yes);
    }

    #[test]
    fn test_prefilled_search_commits_with_address() {
        let mut coordinator = EditingCoordinator::with_defaults(InMemoryStore::new());
        let mut output = Vec::new();

        let result = PickFlow::with_writer(
            &mut coordinator,
            prefilled(EntryPoint::Search, SkillTag::Testkit),
            &mut output,
        )
        .collect()
        .unwrap();

        assert_eq!(result, PickResult::Committed);
        let plan = coordinator.plan();
        let depot = plan.depot.as_ref().unwrap();
        assert_eq!(depot.description.as_deref(), Some("5 Oak Ave"));
        assert_eq!(depot.required_skill, SkillTag::Testkit);
    }

    #[test]
    fn test_prefilled_map_click_ignores_address() {
        let mut coordinator = EditingCoordinator::with_defaults(InMemoryStore::new());
        let mut output = Vec::new();

        PickFlow::with_writer(
            &mut coordinator,
            prefilled(EntryPoint::Map, SkillTag::Depot),
            &mut output,
        )
        .collect()
        .unwrap();

        assert!(coordinator.plan().depot.as_ref().unwrap().description.is_none());
    }

    #[test]
    fn test_dialog_output_format() {
        let mut coordinator = EditingCoordinator::with_defaults(InMemoryStore::new());
        let mut output = Vec::new();

        PickFlow::with_writer(
            &mut coordinator,
            prefilled(EntryPoint::Search, SkillTag::Vaccination),
            &mut output,
        )
        .collect()
        .unwrap();

        let output_str = String::from_utf8(output).unwrap();
        assert!(output_str.contains("Select Skill"));
        assert!(output_str.contains("Latitude : 3"));
        assert!(output_str.contains("Longitude : 4"));
        assert!(output_str.contains("Address : 5 Oak Ave"));
    }

    #[test]
    fn test_disabled_skill_is_an_error() {
        let config = AppConfig {
            disabled_skills: vec![SkillTag::Depot],
            ..AppConfig::default()
        };
        let mut coordinator = EditingCoordinator::new(InMemoryStore::new(), &config);
        let mut output = Vec::new();

        let result = PickFlow::with_writer(
            &mut coordinator,
            prefilled(EntryPoint::Map, SkillTag::Depot),
            &mut output,
        )
        .collect();

        assert!(result.is_err());
        assert!(coordinator.plan().is_empty());
    }
}
