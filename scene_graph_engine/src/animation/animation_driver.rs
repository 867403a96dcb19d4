/// AnimationDriver - runs registered bindings once per tick.
///
/// A tick runs in two phases:
///
/// 1. independent bindings mutate local transforms (registration order)
/// 2. world transforms are recomputed, then dependent bindings read the
///    fresh world positions of their dependencies (registration order)
///
/// When a dependent binding moves a node, that node's subtree is recomputed
/// before the next dependent runs, so chained dependents (a light aimed at a
/// follower) see the move in the same frame. Reading world positions before
/// step 2's recomputation would lag one frame behind.

use slotmap::{new_key_type, SlotMap};
use crate::scene::SceneGraph;
use crate::{engine_debug, engine_trace};
use super::animation_binding::{
    AnimationBinding, DependentOutcome, DependentRule, MutationRule, NodeRef,
};

const SOURCE: &str = "scenegraph::AnimationDriver";

/// Default host timestamp scale: milliseconds to seconds
pub const DEFAULT_TIME_SCALE: f64 = 0.001;

new_key_type! {
    /// Stable key of a registered binding, used for removal.
    pub struct BindingKey;
}

/// Summary of one tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    /// Simulated time passed to every binding this tick
    pub time_seconds: f32,
    /// Bindings whose rule ran
    pub applied: usize,
    /// Bindings skipped because a node was absent (or the rule did not apply)
    pub skipped: usize,
    /// World recomputations performed inside the tick
    pub recomputations: usize,
}

/// Owns the bindings and enforces the two-phase update order.
pub struct AnimationDriver {
    bindings: SlotMap<BindingKey, AnimationBinding>,
    order: Vec<BindingKey>,
    time_scale: f64,
}

impl AnimationDriver {
    /// Create a driver converting host timestamps with `time_scale`
    pub fn new(time_scale: f64) -> Self {
        Self {
            bindings: SlotMap::with_key(),
            order: Vec::new(),
            time_scale,
        }
    }

    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Host timestamp to simulated seconds
    pub fn to_seconds(&self, timestamp: f64) -> f32 {
        (timestamp * self.time_scale) as f32
    }

    // ===== REGISTRATION =====

    /// Register a rule mutating `target`'s local transform
    pub fn add_binding<R>(&mut self, target: impl Into<NodeRef>, rule: R) -> BindingKey
    where
        R: MutationRule + 'static,
    {
        self.insert(AnimationBinding::Independent {
            target: target.into(),
            rule: Box::new(rule),
        })
    }

    /// Register a rule deriving `target`'s state from `dependency`'s world position
    pub fn add_dependent_binding(
        &mut self,
        target: impl Into<NodeRef>,
        dependency: impl Into<NodeRef>,
        rule: DependentRule,
    ) -> BindingKey {
        self.insert(AnimationBinding::Dependent {
            target: target.into(),
            dependency: dependency.into(),
            rule,
        })
    }

    /// Unregister a binding. Returns false if the key is unknown.
    pub fn remove_binding(&mut self, key: BindingKey) -> bool {
        if self.bindings.remove(key).is_some() {
            self.order.retain(|&k| k != key);
            true
        } else {
            false
        }
    }

    pub fn contains_binding(&self, key: BindingKey) -> bool {
        self.bindings.contains_key(key)
    }

    pub fn binding_count(&self) -> usize {
        self.bindings.len()
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
        self.order.clear();
    }

    fn insert(&mut self, binding: AnimationBinding) -> BindingKey {
        let key = self.bindings.insert(binding);
        self.order.push(key);
        key
    }

    // ===== TICK =====

    /// Run one tick from a host timestamp (converted once, shared by all bindings)
    pub fn tick(&mut self, graph: &mut SceneGraph, timestamp: f64) -> TickReport {
        let seconds = self.to_seconds(timestamp);
        self.tick_seconds(graph, seconds)
    }

    /// Run one tick at `time` simulated seconds
    pub fn tick_seconds(&mut self, graph: &mut SceneGraph, time: f32) -> TickReport {
        let mut report = TickReport {
            time_seconds: time,
            ..TickReport::default()
        };
        let mut has_dependents = false;

        // Phase 1: independent bindings
        for &key in &self.order {
            let binding = match self.bindings.get_mut(key) {
                Some(binding) => binding,
                None => continue,
            };
            let (target, rule) = match binding {
                AnimationBinding::Independent { target, rule } => (target, rule),
                AnimationBinding::Dependent { .. } => {
                    has_dependents = true;
                    continue;
                }
            };
            let node = match target.resolve(graph) {
                Some(node) => node,
                None => {
                    engine_debug!(SOURCE, "Skipping binding: target {:?} not found", target);
                    report.skipped += 1;
                    continue;
                }
            };
            if let Ok(transform) = graph.transform_mut(node) {
                rule.apply(transform, time);
                report.applied += 1;
            }
        }

        if !has_dependents {
            engine_trace!(SOURCE, "t={:.3}s applied={} skipped={}", time, report.applied, report.skipped);
            return report;
        }

        // Phase 2: dependents read world positions that include phase 1
        graph.recompute_world_transforms();
        report.recomputations += 1;

        for &key in &self.order {
            let (target, dependency, rule) = match self.bindings.get(key) {
                Some(AnimationBinding::Dependent { target, dependency, rule }) => {
                    (target, dependency, rule)
                }
                _ => continue,
            };
            let (target_key, dependency_key) = match (target.resolve(graph), dependency.resolve(graph)) {
                (Some(t), Some(d)) => (t, d),
                _ => {
                    engine_debug!(SOURCE,
                        "Skipping dependent binding: {:?} -> {:?} not found", dependency, target);
                    report.skipped += 1;
                    continue;
                }
            };
            let dependency_world = match graph.world_position(dependency_key) {
                Some(position) => position,
                None => {
                    report.skipped += 1;
                    continue;
                }
            };
            match rule.apply(graph, target_key, dependency_world) {
                DependentOutcome::Derived(_) => report.applied += 1,
                DependentOutcome::Moved(_) => {
                    graph.recompute_subtree(target_key);
                    report.recomputations += 1;
                    report.applied += 1;
                }
                DependentOutcome::NotApplicable => {
                    engine_debug!(SOURCE, "Dependent rule {:?} does not apply to {:?}", rule, target);
                    report.skipped += 1;
                }
            }
        }

        engine_trace!(SOURCE, "t={:.3}s applied={} skipped={} recomputations={}",
            time, report.applied, report.skipped, report.recomputations);
        report
    }
}

impl Default for AnimationDriver {
    fn default() -> Self {
        Self::new(DEFAULT_TIME_SCALE)
    }
}

#[cfg(test)]
#[path = "animation_driver_tests.rs"]
mod tests;
