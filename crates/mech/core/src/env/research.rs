/// Which parts have been unlocked by research.
///
/// Present in [`crate::env::MechEnv`] only when the research gate is enforced.
pub trait ResearchOracle {
    fn is_researched(&self, part_name: &str) -> bool;
}
