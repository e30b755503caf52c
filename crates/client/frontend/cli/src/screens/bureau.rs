//! Design bureau: the part-tree navigator.
//!
//! The navigator walks the tree by `PartID`. The current position is a stack
//! of the IDs entered so far; the empty stack is the top level of the
//! template.
use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use mech_core::{AttachRequest, MechStats, PartId, PartInstance, PartOracle, TagOracle};
use runtime::Workshop;
use serde_json::Value;

use crate::app::{CliFrontend, is_quit};
use crate::config::KeyConfig;
use crate::console::{Selection, parse_index};

impl<R: BufRead, W: Write> CliFrontend<R, W> {
    pub(crate) fn design_bureau(&mut self) -> Result<ControlFlow<()>> {
        let mut path: Vec<PartId> = Vec::new();
        let keys = self.config.keys.clone();

        loop {
            let current = path.last().copied();
            let can_add = self.workshop.can_add(current);

            let stats = self.workshop.stats();
            self.screen(&format!(
                "=== Design Bureau ===    Weight limit: {}",
                stats.weight_limit
            ))?;
            for line in navigator_lines(&self.workshop, &stats, &keys, current, can_add) {
                self.console.line(line)?;
            }

            let hint = if can_add {
                "\nEnter number to navigate, letter for action, or 'q' to quit: "
            } else {
                "\nEnter number to navigate, or 'q' to quit: "
            };
            let Some(input) = self.console.prompt(hint)? else {
                return Ok(ControlFlow::Break(()));
            };

            let flow = if is_quit(&input) {
                return Ok(ControlFlow::Continue(()));
            } else if current.is_some() && KeyConfig::matches(keys.go_up, &input) {
                path.pop();
                ControlFlow::Continue(())
            } else if can_add && KeyConfig::matches(keys.add_part, &input) {
                self.add_part(current)?
            } else if KeyConfig::matches(keys.save, &input) {
                self.save_template()?
            } else if KeyConfig::matches(keys.load, &input) {
                self.load_template(&mut path)?
            } else if let Some(child) = self.child_at(current, &input) {
                path.push(child);
                ControlFlow::Continue(())
            } else {
                self.notice("Invalid input!")?
            };

            if flow.is_break() {
                return Ok(flow);
            }
        }
    }

    fn child_at(&self, parent: Option<PartId>, input: &str) -> Option<PartId> {
        let children = self.workshop.tree().children_of(parent)?;
        parse_index(input, children.len()).map(|index| children[index].part_id)
    }

    /// Category, then part, then scale; attaches under `parent`.
    fn add_part(&mut self, parent: Option<PartId>) -> Result<ControlFlow<()>> {
        let candidates = match parent {
            None => self.workshop.root_parts(),
            Some(_) => {
                let categories = self.workshop.child_categories();
                if categories.is_empty() {
                    let message = "No child categories available (frames are root-only).";
                    return Ok(self.notice(message)?);
                }
                self.console.line("Select category to add:")?;
                match self.console.select(&categories, "Enter category number: ")? {
                    Selection::Item(index) => {
                        self.workshop.parts_in_category(&categories[index])
                    }
                    Selection::Other(_) => {
                        return Ok(self.notice("Invalid category selection!")?);
                    }
                    Selection::Closed => return Ok(ControlFlow::Break(())),
                }
            }
        };

        if candidates.is_empty() {
            return Ok(self.notice("No parts available.")?);
        }

        let labels: Vec<String> = candidates
            .iter()
            .map(|name| catalog_label(&self.workshop, name))
            .collect();
        self.console.line("Select a part to add:")?;
        let name = match self.console.select(&labels, "Enter number: ")? {
            Selection::Item(index) => &candidates[index],
            Selection::Other(_) => return Ok(self.notice("Invalid part selection!")?),
            Selection::Closed => return Ok(ControlFlow::Break(())),
        };

        let request = match parent {
            None => AttachRequest::root(name),
            Some(parent) => AttachRequest::under(name, parent),
        };
        match self.workshop.attach(&request, &mut self.console) {
            Ok(_) => Ok(ControlFlow::Continue(())),
            Err(e) => Ok(self.notice(&format!("Cannot attach {name}: {e}"))?),
        }
    }

    fn save_template(&mut self) -> Result<ControlFlow<()>> {
        let Some(name) = self.console.prompt("Template name: ")? else {
            return Ok(ControlFlow::Break(()));
        };
        if name.is_empty() {
            return Ok(self.notice("Template name cannot be empty.")?);
        }

        let message = match self.workshop.save_template(&name) {
            Ok(()) => format!("Template '{name}' saved."),
            Err(e) => format!("Could not save template: {e}"),
        };
        Ok(self.notice(&message)?)
    }

    /// Replaces the tree with a saved template and returns to the top level.
    fn load_template(&mut self, path: &mut Vec<PartId>) -> Result<ControlFlow<()>> {
        let names = match self.workshop.template_names() {
            Ok(names) => names,
            Err(e) => return Ok(self.notice(&format!("Could not list templates: {e}"))?),
        };
        if names.is_empty() {
            return Ok(self.notice("No saved templates.")?);
        }

        self.console.line("Select a template to load:")?;
        let name = match self.console.select(&names, "Enter number: ")? {
            Selection::Item(index) => &names[index],
            Selection::Other(_) => return Ok(self.notice("Invalid template selection!")?),
            Selection::Closed => return Ok(ControlFlow::Break(())),
        };

        let message = match self.workshop.load_template(name) {
            Ok(()) => {
                path.clear();
                format!("Template '{name}' loaded.")
            }
            Err(e) => format!("Could not load template: {e}"),
        };
        Ok(self.notice(&message)?)
    }
}

/// Stats, current part and the numbered children of `current`.
fn navigator_lines(
    workshop: &Workshop,
    stats: &MechStats,
    keys: &KeyConfig,
    current: Option<PartId>,
    can_add: bool,
) -> Vec<String> {
    let parts = workshop.oracles().parts();
    let mut lines = Vec::new();

    let scale = stats
        .scale
        .map(|scale| scale.to_string())
        .unwrap_or_else(|| "-".to_string());
    let mut summary = format!(
        "Weight: {} / {} | Scale: {}",
        stats.weight, stats.weight_limit, scale
    );
    if stats.is_overweight() {
        summary.push_str(" [OVERWEIGHT]");
    }
    lines.push(summary);

    if !stats.actions.is_empty() {
        let actions: Vec<String> = stats
            .actions
            .iter()
            .map(|action| {
                if action.description.is_empty() {
                    action.name.clone()
                } else {
                    format!("{} ({})", action.name, action.description)
                }
            })
            .collect();
        lines.push(format!("Actions: {}", actions.join(", ")));
    }

    if let Some(node) = current.and_then(|id| workshop.tree().get(id)) {
        lines.push(format!("Current: {} (PartID: {})", node.name, node.part_id.0));
        let tags = parts
            .definition(&node.name)
            .map(|def| def.tags())
            .unwrap_or_default();
        for tag in tags {
            match workshop.oracles().tags().description(tag) {
                Some(description) => lines.push(format!("  {tag}: {description}")),
                None => lines.push(format!("  {tag}")),
            }
        }
    }
    lines.push(String::new());

    if current.is_some() {
        lines.push(format!("{}. [Go Up]", keys.go_up));
    }
    let children = workshop.tree().children_of(current).unwrap_or_default();
    for (i, child) in children.iter().enumerate() {
        lines.push(format!("{}. {}", i + 1, instance_label(workshop, child)));
    }
    if can_add {
        lines.push(format!("{}. [Add New Part]", keys.add_part));
    }
    lines.push(format!("{}. [Save Template]", keys.save));
    lines.push(format!("{}. [Load Template]", keys.load));
    lines
}

/// `Gun (PartID: 2) | Scale: Vehicle(2) | ...` from the stamped snapshot.
fn instance_label(workshop: &Workshop, node: &PartInstance) -> String {
    let parts = workshop.oracles().parts();
    let mut label = format!("{} (PartID: {})", node.name, node.part_id.0);
    if let Some(category) = parts.category_of(&node.name) {
        for property in parts.display_properties(category) {
            let value = node
                .display_value(&property)
                .unwrap_or_else(|| "N/A".to_string());
            label.push_str(&format!(" | {property}: {value}"));
        }
    }
    label
}

/// `Gun | Scale: N/A | MinScale: 1 | ...` from the catalog definition.
fn catalog_label(workshop: &Workshop, name: &str) -> String {
    let parts = workshop.oracles().parts();
    let mut label = name.to_string();
    if let Some(def) = parts.definition(name) {
        for property in parts.display_properties(def.category()) {
            let value = def
                .field(&property)
                .map(render_value)
                .unwrap_or_else(|| "N/A".to_string());
            label.push_str(&format!(" | {property}: {value}"));
        }
    }
    label
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
