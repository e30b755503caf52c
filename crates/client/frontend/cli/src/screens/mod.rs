//! Building screens reachable from the district directory.
mod archive;
mod bureau;
mod research;

use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use client_bootstrap::BuildingInfo;

use crate::app::CliFrontend;

/// Buildings with a dedicated screen; everything else shows a placeholder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BuildingKind {
    DesignBureau,
    ResearchLab,
    Archive,
    Other,
}

impl BuildingKind {
    pub(crate) fn from_name(name: &str) -> Self {
        let name = name.trim();
        if name.eq_ignore_ascii_case("Design Bureau") {
            Self::DesignBureau
        } else if name.eq_ignore_ascii_case("Research Lab") {
            Self::ResearchLab
        } else if name.eq_ignore_ascii_case("Archive") {
            Self::Archive
        } else {
            Self::Other
        }
    }
}

impl<R: BufRead, W: Write> CliFrontend<R, W> {
    pub(crate) fn placeholder(&mut self, building: &BuildingInfo) -> Result<ControlFlow<()>> {
        self.screen(&format!("=== {} ===", building.name))?;
        self.console.blank()?;
        if !building.description.is_empty() {
            self.console.line(&building.description)?;
        }
        self.console.line("This building is not open yet.")?;
        self.console.blank()?;
        Ok(self.wait("Press Enter to return...")?)
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn building_names_map_to_screens() {
        assert_eq!(
            BuildingKind::from_name("design bureau"),
            BuildingKind::DesignBureau
        );
        assert_eq!(
            BuildingKind::from_name(" Research Lab "),
            BuildingKind::ResearchLab
        );
        assert_eq!(BuildingKind::from_name("Archive"), BuildingKind::Archive);
        assert_eq!(BuildingKind::from_name("Mech Factory"), BuildingKind::Other);
    }

    #[test]
    fn district_lists_buildings_and_quits() {
        let mut cli = scripted(&["q"], workshop());
        cli.run().unwrap();

        let out = output(&cli);
        assert!(out.contains("=== Resources: Gold: 1000 ==="));
        assert!(out.contains("=== District Directory ==="));
        assert!(out.contains("1. Design Bureau"));
        assert!(out.contains("4. Sales Office"));
    }

    #[test]
    fn invalid_choice_reprompts_until_input_ends() {
        let mut cli = scripted(&["9", ""], workshop());
        cli.run().unwrap();

        let out = output(&cli);
        assert!(out.contains("Invalid selection."));
        assert_eq!(out.matches("=== District Directory ===").count(), 2);
    }

    #[test]
    fn placeholder_buildings_return_to_directory() {
        let mut cli = scripted(&["4", "", "q"], workshop());
        cli.run().unwrap();

        let out = output(&cli);
        assert!(out.contains("=== Sales Office ==="));
        assert!(out.contains("This building is not open yet."));
        assert_eq!(out.matches("=== District Directory ===").count(), 2);
    }

    #[test]
    fn resource_bar_hidden_without_gold() {
        let mut workshop = workshop();
        workshop.resources_mut().set_gold(0);
        let mut cli = scripted(&["q"], workshop);
        cli.run().unwrap();

        assert!(!output(&cli).contains("Resources"));
    }
}
