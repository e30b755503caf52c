//! Live figures derived from the current part tree.

use crate::env::{MechEnv, PartOracle};
use crate::scale::ScaleLevel;
use crate::state::{PartInstance, PartTree};

/// An action granted by a placed part, paired with its description.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrantedAction {
    pub name: String,
    /// Empty when the action is undocumented.
    pub description: String,
}

/// Summary shown above the design bureau after every change.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MechStats {
    /// Scale of the first top-level frame.
    pub scale: Option<ScaleLevel>,
    pub weight: f64,
    pub weight_limit: i64,
    pub actions: Vec<GrantedAction>,
}

impl MechStats {
    /// Only a tree with capacity can be over it.
    pub fn is_overweight(&self) -> bool {
        self.weight_limit > 0 && self.weight > self.weight_limit as f64
    }
}

fn first_frame<'t>(tree: &'t PartTree, parts: &dyn PartOracle) -> Option<&'t PartInstance> {
    tree.roots()
        .iter()
        .find(|node| parts.is_root_part(&node.name))
}

/// Capacity granted by the first top-level frame; 0 without one.
pub fn weight_limit(tree: &PartTree, parts: &dyn PartOracle) -> i64 {
    first_frame(tree, parts)
        .and_then(|frame| parts.definition(&frame.name))
        .and_then(|def| def.weight_limit())
        .unwrap_or(0)
}

/// Summed weight of every placed part except frames.
///
/// Frames carry capacity, not load; their children still count.
pub fn total_weight(tree: &PartTree, parts: &dyn PartOracle) -> f64 {
    tree.iter()
        .filter(|node| !parts.is_root_part(&node.name))
        .map(|node| parts.weight_of(&node.name, node.scale))
        .sum()
}

/// Collects every action granted anywhere in the tree, depth-first.
pub fn granted_actions(tree: &PartTree, env: &MechEnv<'_>) -> Vec<GrantedAction> {
    let parts = env.parts();
    tree.iter()
        .filter_map(|node| parts.definition(&node.name))
        .flat_map(|def| def.actions())
        .map(|action| GrantedAction {
            name: action.to_string(),
            description: env
                .actions()
                .and_then(|oracle| oracle.description(action))
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

pub fn mech_stats(tree: &PartTree, env: &MechEnv<'_>) -> MechStats {
    let parts = env.parts();
    MechStats {
        scale: first_frame(tree, parts).map(|frame| frame.scale),
        weight: total_weight(tree, parts),
        weight_limit: weight_limit(tree, parts),
        actions: granted_actions(tree, env),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::env::{ActionOracle, PartDefinition};
    use crate::state::PartId;
    use serde_json::json;

    struct Catalog(Vec<PartDefinition>);

    impl PartOracle for Catalog {
        fn definition(&self, name: &str) -> Option<&PartDefinition> {
            self.0
                .iter()
                .find(|def| def.name().eq_ignore_ascii_case(name))
        }

        fn part_names(&self) -> Vec<String> {
            self.0.iter().map(|def| def.name().to_string()).collect()
        }

        fn parts_in_category(&self, _category: &str) -> Vec<String> {
            Vec::new()
        }

        fn categories(&self) -> Vec<String> {
            Vec::new()
        }
    }

    struct Descriptions(HashMap<&'static str, &'static str>);

    impl ActionOracle for Descriptions {
        fn description(&self, action: &str) -> Option<&str> {
            self.0.get(action).copied()
        }
    }

    fn catalog() -> Catalog {
        Catalog(vec![
            PartDefinition::new("Exosuit-Frame", "Frame")
                .with_field("WeightLimit", 2000)
                .with_field("Weight", 500),
            PartDefinition::new("Gun", "Weapon")
                .with_field("Weight", 10)
                .with_field("Actions", json!(["Shoot"])),
            PartDefinition::new("Hand", "Extremity")
                .with_field("Weight", 3)
                .with_field("WeightGrowth", 2)
                .with_field("Actions", json!(["Grab", "Punch"])),
        ])
    }

    fn node(id: u32, name: &str, scale: ScaleLevel) -> PartInstance {
        PartInstance::new(PartId(id), name, scale, 4)
    }

    fn sample_tree() -> PartTree {
        let mut hand = node(3, "Hand", ScaleLevel::Vehicle);
        hand.children.push(node(4, "Gun", ScaleLevel::Personal));
        let mut frame = node(1, "Exosuit-Frame", ScaleLevel::Building);
        frame.children.push(node(2, "Gun", ScaleLevel::Vehicle));
        frame.children.push(hand);
        PartTree::from_roots(vec![frame])
    }

    #[test]
    fn frames_alone_weigh_nothing() {
        let parts = catalog();
        let tree = PartTree::from_roots(vec![node(1, "Exosuit-Frame", ScaleLevel::Building)]);
        assert_eq!(total_weight(&tree, &parts), 0.0);
        assert_eq!(weight_limit(&tree, &parts), 2000);
    }

    #[test]
    fn sums_children_of_frames() {
        let parts = catalog();
        let tree = sample_tree();
        // Gun@2: 10*4, Hand@2: 3*2, Gun@1: 10
        assert_eq!(total_weight(&tree, &parts), 56.0);
    }

    #[test]
    fn no_frame_means_no_capacity() {
        let parts = catalog();
        let tree = PartTree::from_roots(vec![node(1, "Gun", ScaleLevel::Personal)]);
        assert_eq!(weight_limit(&tree, &parts), 0);
        assert_eq!(total_weight(&tree, &parts), 10.0);

        let stats = mech_stats(&tree, &MechEnv::new(&parts));
        assert!(!stats.is_overweight());
    }

    #[test]
    fn overweight_only_past_a_real_limit() {
        let mut stats = MechStats {
            weight: 2000.0,
            weight_limit: 2000,
            ..MechStats::default()
        };
        assert!(!stats.is_overweight());
        stats.weight = 2000.5;
        assert!(stats.is_overweight());
    }

    #[test]
    fn stats_collect_actions_depth_first() {
        let parts = catalog();
        let descriptions = Descriptions(HashMap::from([("Shoot", "Fire the weapon")]));
        let env = MechEnv::new(&parts).with_actions(&descriptions);

        let stats = mech_stats(&sample_tree(), &env);

        assert_eq!(stats.scale, Some(ScaleLevel::Building));
        assert_eq!(stats.weight_limit, 2000);
        assert!(!stats.is_overweight());
        let names: Vec<_> = stats.actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Shoot", "Grab", "Punch", "Shoot"]);
        assert_eq!(stats.actions[0].description, "Fire the weapon");
        assert_eq!(stats.actions[1].description, "");
    }

    #[test]
    fn empty_tree_has_empty_stats() {
        let parts = catalog();
        let stats = mech_stats(&PartTree::new(), &MechEnv::new(&parts));
        assert_eq!(stats, MechStats::default());
    }
}
