use crate::error::SelectionError;
use crate::event::Fixture;
use dialoguer::{theme::ColorfulTheme, Select};

/// Picks one fixture by display name from a non-empty list.
pub trait FixtureChooser {
    fn choose(&self, fixtures: &[Fixture]) -> Result<String, SelectionError>;
}

/// A name supplied up front, e.g. from the command line.
#[derive(Debug, Clone)]
pub struct ByName(pub String);

impl FixtureChooser for ByName {
    fn choose(&self, _fixtures: &[Fixture]) -> Result<String, SelectionError> {
        Ok(self.0.clone())
    }
}

/// Interactive terminal list of fixture names.
#[derive(Debug, Default)]
pub struct Prompt;

impl FixtureChooser for Prompt {
    fn choose(&self, fixtures: &[Fixture]) -> Result<String, SelectionError> {
        let items: Vec<String> = fixtures
            .iter()
            .map(|f| format!("{}  ({})", f.name, f.start_label()))
            .collect();

        let index = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Select a game")
            .items(&items)
            .default(0)
            .interact()?;

        Ok(fixtures[index].name.clone())
    }
}

/// Resolve a display name to its fixture. With duplicate names the first wins.
pub fn resolve<'a>(fixtures: &'a [Fixture], name: &str) -> Result<&'a Fixture, SelectionError> {
    fixtures
        .iter()
        .find(|f| f.name == name)
        .ok_or_else(|| SelectionError::UnknownFixture(name.to_string()))
}

/// Run the selection step over a fetched fixture list.
pub fn select<'a>(
    fixtures: &'a [Fixture],
    tournament_slug: &str,
    chooser: &dyn FixtureChooser,
) -> Result<&'a Fixture, SelectionError> {
    if fixtures.is_empty() {
        return Err(SelectionError::NoFixturesAvailable {
            slug: tournament_slug.to_string(),
        });
    }

    let name = chooser.choose(fixtures)?;
    let fixture = resolve(fixtures, &name)?;
    if fixture.id.is_empty() {
        return Err(SelectionError::MissingEventId(fixture.name.clone()));
    }
    Ok(fixture)
}
