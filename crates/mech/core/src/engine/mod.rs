//! The attach pipeline.
//!
//! [`CompositionEngine`] is the only way new parts enter a [`PartTree`]. Each
//! attach runs as a single transaction:
//!
//! 1. **Placement**: resolve the parent and check root eligibility.
//! 2. **Definition**: look the part up and apply the research gate.
//! 3. **Scale**: pick the scale (fixed, requested or chosen) and validate it
//!    against the parent and the part's own bounds.
//! 4. **Commit**: stamp properties, take the next ID and append.
//!
//! Nothing is written before step 4, so a rejected attach leaves the tree and
//! its ID counter exactly as they were.
mod errors;

pub use errors::AttachError;

use crate::env::{MechEnv, PartDefinition, keys};
use crate::scale::{self, ScaleChooser, ScaleLevel};
use crate::state::{PartId, PartInstance, PartTree};

/// A request to place one part.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttachRequest {
    pub name: String,
    /// Attach under this part; `None` places it at the top level.
    pub parent: Option<PartId>,
    /// Pre-selected scale. Ignored when the definition fixes one; when absent
    /// the chooser is consulted.
    pub scale: Option<ScaleLevel>,
}

impl AttachRequest {
    pub fn root(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
            scale: None,
        }
    }

    pub fn under(name: impl Into<String>, parent: PartId) -> Self {
        Self {
            name: name.into(),
            parent: Some(parent),
            scale: None,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: ScaleLevel) -> Self {
        self.scale = Some(scale);
        self
    }
}

/// Bounds resolved for a part before its scale is picked.
#[derive(Clone, Copy, Debug)]
struct ScaleBounds {
    parent: Option<ScaleLevel>,
    min_level: Option<u8>,
    max_level: u8,
}

/// Applies attach requests to a borrowed part tree.
pub struct CompositionEngine<'a> {
    tree: &'a mut PartTree,
}

impl<'a> CompositionEngine<'a> {
    pub fn new(tree: &'a mut PartTree) -> Self {
        Self { tree }
    }

    pub fn tree(&self) -> &PartTree {
        self.tree
    }

    /// Whether anything may be placed at `parent`.
    ///
    /// Under an existing part this is always true. At the top level it is
    /// true only while no root-category part sits there.
    pub fn can_add(&self, env: &MechEnv<'_>, parent: Option<PartId>) -> bool {
        can_add(self.tree, env, parent)
    }

    /// Validates `request` and appends the new part.
    ///
    /// `chooser` is consulted only when neither the definition nor the
    /// request supplies a scale.
    pub fn attach(
        &mut self,
        env: &MechEnv<'_>,
        request: &AttachRequest,
        chooser: &mut dyn ScaleChooser,
    ) -> Result<PartId, AttachError> {
        let parent_scale = self.resolve_placement(env, request)?;

        let definition = env.parts().definition(&request.name);
        check_research(env, request, definition)?;

        let bounds = ScaleBounds {
            parent: parent_scale,
            min_level: scale::min_level_for(definition),
            max_level: scale::max_level_for(definition),
        };
        let scale = desired_scale(request, definition, bounds, chooser)?;
        validate_scale(scale, bounds)?;

        let part_id = self
            .tree
            .next_part_id()
            .ok_or(AttachError::PartIdOverflow {
                last: self.tree.last_id(),
            })?;
        let instance = stamp_instance(env, part_id, request, definition, scale, bounds);

        self.tree
            .append(request.parent, instance)
            .map_err(|_| AttachError::ParentNotFound {
                parent: request.parent.unwrap_or(part_id),
            })?;

        tracing::info!(
            part = %request.name,
            id = %part_id,
            scale = %scale,
            parent = ?request.parent.map(|p| p.0),
            "Attached part"
        );
        Ok(part_id)
    }

    /// Returns the parent's scale (`None` at the top level).
    fn resolve_placement(
        &self,
        env: &MechEnv<'_>,
        request: &AttachRequest,
    ) -> Result<Option<ScaleLevel>, AttachError> {
        match request.parent {
            Some(parent) => self
                .tree
                .get(parent)
                .map(|node| Some(node.scale))
                .ok_or(AttachError::ParentNotFound { parent }),
            None if can_add(self.tree, env, None) => Ok(None),
            None => Err(AttachError::CategoryNotAllowedAtRoot {
                part: request.name.clone(),
            }),
        }
    }
}

/// See [`CompositionEngine::can_add`].
pub fn can_add(tree: &PartTree, env: &MechEnv<'_>, parent: Option<PartId>) -> bool {
    match parent {
        Some(_) => true,
        None => !tree
            .roots()
            .iter()
            .any(|node| env.parts().is_root_part(&node.name)),
    }
}

fn check_research(
    env: &MechEnv<'_>,
    request: &AttachRequest,
    definition: Option<&PartDefinition>,
) -> Result<(), AttachError> {
    let Some(research) = env.research() else {
        return Ok(());
    };
    let name = definition.map_or(request.name.as_str(), PartDefinition::name);
    if research.is_researched(name) {
        Ok(())
    } else {
        Err(AttachError::PartNotResearched {
            part: request.name.clone(),
        })
    }
}

fn desired_scale(
    request: &AttachRequest,
    definition: Option<&PartDefinition>,
    bounds: ScaleBounds,
    chooser: &mut dyn ScaleChooser,
) -> Result<ScaleLevel, AttachError> {
    if let Some(fixed) = definition.and_then(PartDefinition::fixed_scale) {
        return Ok(fixed);
    }
    if let Some(requested) = request.scale {
        return Ok(requested);
    }
    scale::choose_scale(
        chooser,
        &request.name,
        bounds.parent,
        bounds.min_level,
        Some(bounds.max_level),
    )
    .ok_or_else(|| AttachError::InvalidScaleSelection {
        part: request.name.clone(),
    })
}

fn validate_scale(scale: ScaleLevel, bounds: ScaleBounds) -> Result<(), AttachError> {
    if let Some(parent_scale) = bounds.parent.filter(|p| scale.level() > p.level()) {
        return Err(AttachError::ScaleExceedsParent {
            scale,
            parent_scale,
        });
    }
    if let Some(min_level) = bounds.min_level.filter(|&min| scale.level() < min) {
        return Err(AttachError::ScaleBelowMinimum { scale, min_level });
    }
    if scale.level() > bounds.max_level {
        return Err(AttachError::ScaleAboveMaximum {
            scale,
            max_level: bounds.max_level,
        });
    }
    Ok(())
}

fn stamp_instance(
    env: &MechEnv<'_>,
    part_id: PartId,
    request: &AttachRequest,
    definition: Option<&PartDefinition>,
    scale: ScaleLevel,
    bounds: ScaleBounds,
) -> PartInstance {
    let mut instance = PartInstance::new(part_id, request.name.clone(), scale, bounds.max_level);
    instance.min_level = bounds.min_level;

    let Some(definition) = definition else {
        return instance;
    };
    for property in env.parts().display_properties(definition.category()) {
        // Written by the instance itself; copying them would duplicate keys.
        if matches!(
            property.as_str(),
            keys::SCALE
                | keys::MIN_SCALE
                | keys::MAX_SCALE
                | keys::NAME
                | keys::PART_ID
                | keys::CHILDREN
        ) {
            continue;
        }
        if let Some(value) = definition.field(&property) {
            instance.properties.insert(property, value.clone());
        }
    }
    instance
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::env::{PartOracle, ResearchOracle};
    use crate::scale::NoScaleChoice;
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

        fn parts_in_category(&self, category: &str) -> Vec<String> {
            self.0
                .iter()
                .filter(|def| def.category().eq_ignore_ascii_case(category))
                .map(|def| def.name().to_string())
                .collect()
        }

        fn categories(&self) -> Vec<String> {
            let mut seen = Vec::new();
            for def in &self.0 {
                if !seen.iter().any(|c: &String| c == def.category()) {
                    seen.push(def.category().to_string());
                }
            }
            seen
        }
    }

    struct Unlocked(HashSet<&'static str>);

    impl ResearchOracle for Unlocked {
        fn is_researched(&self, part_name: &str) -> bool {
            self.0.contains(part_name)
        }
    }

    fn catalog() -> Catalog {
        Catalog(vec![
            PartDefinition::new("Exosuit-Frame", "Frame")
                .with_field("Scale", "Building(4)")
                .with_field("WeightLimit", 2000),
            PartDefinition::new("Gun", "Weapon")
                .with_field("MinScale", 1)
                .with_field("MaxScale", 2)
                .with_field("Description", "Fires things"),
            PartDefinition::new("Joint", "Extremity"),
        ])
    }

    fn with_frame(tree: &mut PartTree, env: &MechEnv<'_>) -> PartId {
        CompositionEngine::new(tree)
            .attach(env, &AttachRequest::root("Exosuit-Frame"), &mut NoScaleChoice)
            .unwrap()
    }

    #[test]
    fn frame_then_gun_scenario() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();

        let frame = with_frame(&mut tree, &env);
        assert_eq!(frame, PartId(1));
        let frame_node = tree.get(frame).unwrap();
        assert_eq!(frame_node.scale, ScaleLevel::Building);
        assert_eq!(frame_node.properties.get("WeightLimit"), Some(&json!(2000)));

        let mut engine = CompositionEngine::new(&mut tree);
        let second = engine.attach(&env, &AttachRequest::root("Exosuit-Frame"), &mut NoScaleChoice);
        assert!(matches!(
            second,
            Err(AttachError::CategoryNotAllowedAtRoot { .. })
        ));

        let too_big = engine.attach(
            &env,
            &AttachRequest::under("Gun", frame).with_scale(ScaleLevel::House),
            &mut NoScaleChoice,
        );
        assert_eq!(
            too_big,
            Err(AttachError::ScaleAboveMaximum {
                scale: ScaleLevel::House,
                max_level: 2
            })
        );

        let gun = engine
            .attach(
                &env,
                &AttachRequest::under("Gun", frame).with_scale(ScaleLevel::Personal),
                &mut NoScaleChoice,
            )
            .unwrap();
        assert_eq!(gun, PartId(2));

        let gun_node = tree.get(gun).unwrap();
        assert_eq!(gun_node.min_level, Some(1));
        assert_eq!(gun_node.max_level, 2);
        // Weapons only display scale fields by default
        assert!(gun_node.properties.is_empty());
    }

    struct WideSchema(Catalog);

    impl PartOracle for WideSchema {
        fn definition(&self, name: &str) -> Option<&PartDefinition> {
            self.0.definition(name)
        }

        fn part_names(&self) -> Vec<String> {
            self.0.part_names()
        }

        fn parts_in_category(&self, category: &str) -> Vec<String> {
            self.0.parts_in_category(category)
        }

        fn categories(&self) -> Vec<String> {
            self.0.categories()
        }

        fn display_properties(&self, _category: &str) -> Vec<String> {
            ["name", "PartID", "children", "Description"]
                .map(String::from)
                .to_vec()
        }
    }

    #[test]
    fn instance_keys_are_never_stamped_as_properties() {
        let parts = WideSchema(Catalog(vec![
            PartDefinition::new("Exosuit-Frame", "Frame")
                .with_field("Scale", "Building(4)")
                .with_field("PartID", 99)
                .with_field("children", json!([]))
                .with_field("Description", "Carries everything"),
        ]));
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let keys: Vec<_> = tree.get(frame).unwrap().properties.keys().cloned().collect();
        assert_eq!(keys, vec!["Description"]);

        let json = serde_json::to_string(&tree).unwrap();
        assert_eq!(json.matches("\"PartID\"").count(), 1);
        assert_eq!(json.matches("\"name\"").count(), 1);
        let restored: PartTree = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.get(PartId(1)).unwrap().name, "Exosuit-Frame");
    }

    #[test]
    fn missing_parent_leaves_tree_unchanged() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        with_frame(&mut tree, &env);
        let before = serde_json::to_string(&tree).unwrap();

        let result = CompositionEngine::new(&mut tree).attach(
            &env,
            &AttachRequest::under("Gun", PartId(42)).with_scale(ScaleLevel::Personal),
            &mut NoScaleChoice,
        );

        assert_eq!(
            result,
            Err(AttachError::ParentNotFound { parent: PartId(42) })
        );
        assert_eq!(serde_json::to_string(&tree).unwrap(), before);
        assert_eq!(tree.next_part_id(), Some(PartId(2)));
    }

    #[test]
    fn chooser_sees_only_compatible_scales() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let mut offered = Vec::new();
        let mut chooser = |_: &str, candidates: &[ScaleLevel]| {
            offered = candidates.to_vec();
            Some(1)
        };
        let gun = CompositionEngine::new(&mut tree)
            .attach(&env, &AttachRequest::under("Gun", frame), &mut chooser)
            .unwrap();

        assert_eq!(offered, vec![ScaleLevel::Personal, ScaleLevel::Vehicle]);
        assert_eq!(tree.get(gun).unwrap().scale, ScaleLevel::Vehicle);
    }

    #[test]
    fn cancelled_choice_is_invalid_selection() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let mut engine = CompositionEngine::new(&mut tree);
        let cancelled = engine.attach(&env, &AttachRequest::under("Joint", frame), &mut NoScaleChoice);
        assert!(matches!(
            cancelled,
            Err(AttachError::InvalidScaleSelection { .. })
        ));

        let mut out_of_range = |_: &str, _: &[ScaleLevel]| Some(9);
        let result = engine.attach(&env, &AttachRequest::under("Joint", frame), &mut out_of_range);
        assert!(matches!(
            result,
            Err(AttachError::InvalidScaleSelection { .. })
        ));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn child_cannot_exceed_parent_scale() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let mut engine = CompositionEngine::new(&mut tree);
        let joint = engine
            .attach(
                &env,
                &AttachRequest::under("Joint", frame).with_scale(ScaleLevel::Vehicle),
                &mut NoScaleChoice,
            )
            .unwrap();
        let result = engine.attach(
            &env,
            &AttachRequest::under("Joint", joint).with_scale(ScaleLevel::House),
            &mut NoScaleChoice,
        );

        assert_eq!(
            result,
            Err(AttachError::ScaleExceedsParent {
                scale: ScaleLevel::House,
                parent_scale: ScaleLevel::Vehicle
            })
        );
    }

    #[test]
    fn scale_below_minimum_is_rejected() {
        let parts = Catalog(vec![
            PartDefinition::new("Exosuit-Frame", "Frame").with_field("Scale", "Building(4)"),
            PartDefinition::new("Siege-Mount", "Weapon").with_field("MinScale", "House(3)"),
        ]);
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let result = CompositionEngine::new(&mut tree).attach(
            &env,
            &AttachRequest::under("Siege-Mount", frame).with_scale(ScaleLevel::Vehicle),
            &mut NoScaleChoice,
        );
        assert_eq!(
            result,
            Err(AttachError::ScaleBelowMinimum {
                scale: ScaleLevel::Vehicle,
                min_level: 3
            })
        );
    }

    #[test]
    fn unknown_parts_attach_without_properties() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let id = CompositionEngine::new(&mut tree)
            .attach(
                &env,
                &AttachRequest::under("Mystery-Box", frame).with_scale(ScaleLevel::House),
                &mut NoScaleChoice,
            )
            .unwrap();

        let node = tree.get(id).unwrap();
        assert_eq!(node.name, "Mystery-Box");
        assert_eq!(node.max_level, 4);
        assert_eq!(node.min_level, None);
        assert!(node.properties.is_empty());
    }

    #[test]
    fn non_frame_roots_blocked_once_frame_exists() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();

        let mut engine = CompositionEngine::new(&mut tree);
        assert!(engine.can_add(&env, None));
        engine
            .attach(
                &env,
                &AttachRequest::root("Joint").with_scale(ScaleLevel::Personal),
                &mut NoScaleChoice,
            )
            .unwrap();
        assert!(engine.can_add(&env, None));

        engine
            .attach(&env, &AttachRequest::root("Exosuit-Frame"), &mut NoScaleChoice)
            .unwrap();
        assert!(!engine.can_add(&env, None));
        assert!(engine.can_add(&env, Some(PartId(1))));
    }

    #[test]
    fn research_gate_blocks_locked_parts() {
        let parts = catalog();
        let unlocked = Unlocked(HashSet::from(["Exosuit-Frame"]));
        let env = MechEnv::new(&parts).with_research(&unlocked);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let result = CompositionEngine::new(&mut tree).attach(
            &env,
            &AttachRequest::under("gun", frame).with_scale(ScaleLevel::Personal),
            &mut NoScaleChoice,
        );
        assert_eq!(
            result,
            Err(AttachError::PartNotResearched {
                part: "gun".to_string()
            })
        );
    }

    #[test]
    fn ids_strictly_increase_across_failures() {
        let parts = catalog();
        let env = MechEnv::new(&parts);
        let mut tree = PartTree::new();
        let frame = with_frame(&mut tree, &env);

        let mut engine = CompositionEngine::new(&mut tree);
        let mut ids = vec![frame];
        for scale in [
            ScaleLevel::Personal,
            ScaleLevel::Building,
            ScaleLevel::Vehicle,
            ScaleLevel::House,
        ] {
            if let Ok(id) = engine.attach(
                &env,
                &AttachRequest::under("Gun", frame).with_scale(scale),
                &mut NoScaleChoice,
            ) {
                ids.push(id);
            }
        }

        assert_eq!(ids, vec![PartId(1), PartId(2), PartId(3)]);
        for node in tree.iter().filter(|node| node.name == "Gun") {
            assert!(node.scale.level() <= 2);
            assert!(node.min_level.is_none_or(|min| node.scale.level() >= min));
        }
    }
}
