//! Glue code tying the workshop and the console menus together.
use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use client_bootstrap::{BuildingInfo, RuntimeSetup};
use runtime::Workshop;

use crate::config::CliConfig;
use crate::console::{Console, Selection};
use crate::screens::BuildingKind;

/// Interactive text front-end.
///
/// Owns the workshop for the whole session; every screen is a blocking
/// prompt/response loop over the [`Console`].
pub struct CliFrontend<R, W> {
    pub(crate) config: CliConfig,
    pub(crate) console: Console<R, W>,
    pub(crate) workshop: Workshop,
    pub(crate) buildings: Vec<BuildingInfo>,
}

impl CliFrontend<StdinLock<'static>, Stdout> {
    /// Front-end bound to the process terminal.
    pub fn stdio(config: CliConfig, setup: RuntimeSetup) -> Self {
        let console = Console::new(io::stdin().lock(), io::stdout(), config.clear_screen);
        Self::from_setup(config, console, setup)
    }
}

impl<R: BufRead, W: Write> CliFrontend<R, W> {
    pub fn new(
        config: CliConfig,
        console: Console<R, W>,
        workshop: Workshop,
        buildings: Vec<BuildingInfo>,
    ) -> Self {
        Self {
            config,
            console,
            workshop,
            buildings,
        }
    }

    pub fn from_setup(config: CliConfig, console: Console<R, W>, setup: RuntimeSetup) -> Self {
        Self::new(config, console, setup.workshop, setup.buildings)
    }

    pub fn workshop(&self) -> &Workshop {
        &self.workshop
    }

    pub fn console(&self) -> &Console<R, W> {
        &self.console
    }

    /// Runs the district directory until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!(buildings = self.buildings.len(), "Console menus starting");

        while let Some(index) = self.select_building()? {
            let building = self.buildings[index].clone();
            tracing::debug!(building = %building.name, "Entering building");

            let flow = match BuildingKind::from_name(&building.name) {
                BuildingKind::DesignBureau => self.design_bureau()?,
                BuildingKind::ResearchLab => self.research_lab()?,
                BuildingKind::Archive => self.archive()?,
                BuildingKind::Other => self.placeholder(&building)?,
            };
            if flow.is_break() {
                break;
            }
        }

        tracing::info!("Console menus exiting");
        Ok(())
    }

    /// Returns the chosen building index, or `None` to quit.
    fn select_building(&mut self) -> Result<Option<usize>> {
        let names: Vec<String> = self.buildings.iter().map(|b| b.name.clone()).collect();
        loop {
            self.screen("=== District Directory ===")?;
            self.console.line("Select a building (or 'q' to quit):")?;
            self.console.blank()?;

            match self.console.select(&names, "\nEnter choice: ")? {
                Selection::Item(index) => return Ok(Some(index)),
                Selection::Closed => return Ok(None),
                Selection::Other(answer) if is_quit(&answer) => return Ok(None),
                Selection::Other(_) => {}
            }
            if self.notice("Invalid selection.")?.is_break() {
                return Ok(None);
            }
        }
    }

    /// Clears the terminal, then draws the resource bar and `title`.
    pub(crate) fn screen(&mut self, title: &str) -> io::Result<()> {
        self.console.clear()?;
        let gold = self.workshop.resources().gold();
        if gold != 0 {
            self.console.line(format!("=== Resources: Gold: {gold} ==="))?;
        }
        self.console.line(title)
    }

    /// Shows `message` and waits for Enter.
    pub(crate) fn notice(&mut self, message: &str) -> io::Result<ControlFlow<()>> {
        self.console.line(message)?;
        self.wait("Press Enter to continue...")
    }

    pub(crate) fn wait(&mut self, text: &str) -> io::Result<ControlFlow<()>> {
        Ok(if self.console.pause(text)? {
            ControlFlow::Continue(())
        } else {
            ControlFlow::Break(())
        })
    }
}

pub(crate) fn is_quit(input: &str) -> bool {
    input.eq_ignore_ascii_case("q")
}
