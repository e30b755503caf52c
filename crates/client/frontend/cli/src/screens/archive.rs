use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use mech_core::PartOracle;

use crate::app::CliFrontend;

impl<R: BufRead, W: Write> CliFrontend<R, W> {
    /// Researched parts with their catalog descriptions.
    pub(crate) fn archive(&mut self) -> Result<ControlFlow<()>> {
        self.screen("=== Archive ===")?;
        self.console.blank()?;

        let entries: Vec<(String, String)> = self
            .workshop
            .research()
            .researched()
            .into_iter()
            .map(|name| {
                let description = self
                    .workshop
                    .oracles()
                    .parts()
                    .definition(&name)
                    .and_then(|def| def.description())
                    .unwrap_or("No description.")
                    .to_string();
                (name, description)
            })
            .collect();

        if entries.is_empty() {
            self.console.line("No researched parts available.")?;
        }
        for (i, (name, description)) in entries.iter().enumerate() {
            self.console.line(format!("{}. {}", i + 1, name))?;
            self.console.line(format!("   {description}"))?;
            self.console.blank()?;
        }

        Ok(self.wait("Press Enter to return...")?)
    }
}

#[cfg(test)]
mod tests {
    use runtime::ResearchLedger;

    use crate::screens::fixtures::*;

    #[test]
    fn lists_researched_parts_with_descriptions() {
        let mut cli = scripted(&["3", "", "q"], workshop());
        cli.run().unwrap();

        let out = output(&cli);
        assert!(out.contains("=== Archive ==="));
        assert!(out.contains("1. Exosuit-Frame\n   Main chassis"));
        assert!(out.contains("2. Gun\n   No description."));
    }

    #[test]
    fn empty_archive_says_so() {
        let mut workshop = workshop();
        *workshop.research_mut() = ResearchLedger::in_memory();
        let mut cli = scripted(&["3", "", "q"], workshop);
        cli.run().unwrap();

        assert!(output(&cli).contains("No researched parts available."));
    }
}
