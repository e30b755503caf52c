//! Research lab: unlock parts for the design bureau.
use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use mech_core::PartOracle;

use crate::app::{CliFrontend, is_quit};
use crate::console::parse_index;

impl<R: BufRead, W: Write> CliFrontend<R, W> {
    pub(crate) fn research_lab(&mut self) -> Result<ControlFlow<()>> {
        loop {
            self.screen("=== Research Lab ===")?;
            self.console.blank()?;
            self.console.line("1. Research by Category")?;
            self.console.line("2. Research from full list")?;
            self.console.line("3. View researched parts")?;
            self.console.line("q. Back to District Directory")?;
            self.console.blank()?;

            let Some(input) = self.console.prompt("Enter choice: ")? else {
                return Ok(ControlFlow::Break(()));
            };
            let flow = match input.as_str() {
                "1" => self.research_by_category()?,
                "2" => self.research_full_list()?,
                "3" => self.show_researched()?,
                other if is_quit(other) => return Ok(ControlFlow::Continue(())),
                _ => self.notice("Invalid selection.")?,
            };
            if flow.is_break() {
                return Ok(flow);
            }
        }
    }

    fn research_by_category(&mut self) -> Result<ControlFlow<()>> {
        loop {
            self.screen("== Research by Category ==")?;
            self.console.blank()?;

            let categories = self.workshop.oracles().parts().categories();
            if categories.is_empty() {
                self.console.line("No categories found.")?;
                return Ok(self.wait("Press Enter to return...")?);
            }

            let category = match self.select_or_back(&categories, "Select category: ")? {
                Pick::Item(index) => &categories[index],
                Pick::Back => return Ok(ControlFlow::Continue(())),
                Pick::Retry => continue,
                Pick::Closed => return Ok(ControlFlow::Break(())),
            };

            let locked = {
                let workshop = &self.workshop;
                workshop
                    .research()
                    .unresearched_in_category(workshop.oracles().parts(), category)
            };
            if locked.is_empty() {
                let message = format!("No unresearched parts in {category}.");
                if self.notice(&message)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
                continue;
            }

            if self.research_one_of(&locked)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
    }

    fn research_full_list(&mut self) -> Result<ControlFlow<()>> {
        loop {
            self.screen("== Research: All Unresearched Parts ==")?;
            self.console.blank()?;

            let locked = {
                let workshop = &self.workshop;
                workshop.research().unresearched(workshop.oracles().parts())
            };
            if locked.is_empty() {
                self.console
                    .line("All parts are researched or no parts available.")?;
                return Ok(self.wait("Press Enter to return...")?);
            }

            match self.research_one_of(&locked)? {
                ControlFlow::Continue(true) => {}
                ControlFlow::Continue(false) => return Ok(ControlFlow::Continue(())),
                ControlFlow::Break(()) => return Ok(ControlFlow::Break(())),
            }
        }
    }

    /// Lists `locked` and researches the pick.
    ///
    /// Continues with `false` when the user backs out.
    fn research_one_of(&mut self, locked: &[String]) -> Result<ControlFlow<(), bool>> {
        let name = match self.select_or_back(locked, "Select part to research: ")? {
            Pick::Item(index) => &locked[index],
            Pick::Back => return Ok(ControlFlow::Continue(false)),
            Pick::Retry => return Ok(ControlFlow::Continue(true)),
            Pick::Closed => return Ok(ControlFlow::Break(())),
        };

        self.workshop.research_mut().research(name);
        Ok(match self.notice(&format!("Researched: {name}"))? {
            ControlFlow::Continue(()) => ControlFlow::Continue(true),
            ControlFlow::Break(()) => ControlFlow::Break(()),
        })
    }

    fn show_researched(&mut self) -> Result<ControlFlow<()>> {
        self.screen("== Researched Parts ==")?;
        self.console.blank()?;

        let researched = self.workshop.research().researched();
        if researched.is_empty() {
            self.console.line("No parts researched yet.")?;
        }
        for name in &researched {
            self.console.line(format!("- {name}"))?;
        }
        self.console.blank()?;
        Ok(self.wait("Press Enter to return...")?)
    }

    /// Numbered list with a `0. Back` entry.
    fn select_or_back(&mut self, items: &[String], prompt: &str) -> Result<Pick> {
        for (i, item) in items.iter().enumerate() {
            self.console.line(format!("{}. {}", i + 1, item))?;
        }
        self.console.line("0. Back")?;
        self.console.blank()?;

        let Some(answer) = self.console.prompt(prompt)? else {
            return Ok(Pick::Closed);
        };
        if answer == "0" {
            return Ok(Pick::Back);
        }
        if let Some(index) = parse_index(&answer, items.len()) {
            return Ok(Pick::Item(index));
        }
        Ok(match self.notice("Invalid selection.")? {
            ControlFlow::Continue(()) => Pick::Retry,
            ControlFlow::Break(()) => Pick::Closed,
        })
    }
}

enum Pick {
    Item(usize),
    Back,
    Retry,
    Closed,
}
