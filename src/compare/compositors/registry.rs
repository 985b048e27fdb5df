use std::collections::HashMap;

use crate::{
    compare::compositors::{BlendCompositor, Compositor, ConcatCompositor, SplitCompositor},
    compare::mode::ComparisonMode,
    error::Result,
};

/// Registry mapping comparison modes to compositor implementations
///
/// Built-in compositors are registered up front; hosts can swap in their own
/// implementation for a mode with [`register`](Self::register).
pub struct CompositorRegistry {
    compositors: HashMap<ComparisonMode, Box<dyn Fn() -> Box<dyn Compositor>>>,
}

impl CompositorRegistry {
    /// Create a new registry with all built-in compositors
    pub fn new() -> Self {
        let mut registry = Self {
            compositors: HashMap::new(),
        };

        registry.register_builtin_compositors();
        registry
    }

    fn register_builtin_compositors(&mut self) {
        self.compositors.insert(
            ComparisonMode::Concat,
            Box::new(|| Box::new(ConcatCompositor::new())),
        );

        self.compositors.insert(
            ComparisonMode::Blend,
            Box::new(|| Box::new(BlendCompositor::new())),
        );

        self.compositors.insert(
            ComparisonMode::Split,
            Box::new(|| Box::new(SplitCompositor::new())),
        );
    }

    /// Register a compositor for `mode`, replacing any previous one
    pub fn register<F>(&mut self, mode: ComparisonMode, factory: F)
    where
        F: Fn() -> Box<dyn Compositor> + 'static,
    {
        self.compositors.insert(mode, Box::new(factory));
    }

    /// Get a fresh compositor for `mode`
    pub fn get(&self, mode: ComparisonMode) -> Option<Box<dyn Compositor>> {
        self.compositors.get(&mode).map(|factory| factory())
    }

    /// Look up a compositor by mode name or alias
    pub fn resolve(&self, name: &str) -> Result<Box<dyn Compositor>> {
        let mode: ComparisonMode = name.parse()?;
        self.get(mode).ok_or_else(|| {
            crate::error::InvalidModeError {
                mode: name.to_string(),
                expected: self
                    .available_modes()
                    .iter()
                    .map(|m| m.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            }
            .into()
        })
    }

    /// Registered modes in declaration order
    pub fn available_modes(&self) -> Vec<ComparisonMode> {
        ComparisonMode::ALL
            .into_iter()
            .filter(|mode| self.compositors.contains_key(mode))
            .collect()
    }

    pub fn has_mode(&self, mode: ComparisonMode) -> bool {
        self.compositors.contains_key(&mode)
    }

    pub fn len(&self) -> usize {
        self.compositors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.compositors.is_empty()
    }
}

impl Default for CompositorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompareError;
    use crate::video::Frame;

    #[test]
    fn test_builtin_compositors_available() {
        let registry = CompositorRegistry::new();

        assert!(registry.has_mode(ComparisonMode::Concat));
        assert!(registry.has_mode(ComparisonMode::Blend));
        assert!(registry.has_mode(ComparisonMode::Split));
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.available_modes(), ComparisonMode::ALL.to_vec());
    }

    #[test]
    fn test_resolve_by_name_and_alias() {
        let registry = CompositorRegistry::new();

        assert_eq!(registry.resolve("blend").unwrap().name(), "blend");
        assert_eq!(registry.resolve("side_by_side").unwrap().mode(), ComparisonMode::Concat);

        let err = registry.resolve("unknown").err().unwrap();
        assert!(matches!(err, CompareError::InvalidMode(ref e) if e.mode == "unknown"));
    }

    struct AlwaysA;

    impl Compositor for AlwaysA {
        fn name(&self) -> &str {
            "always_a"
        }

        fn description(&self) -> &str {
            "Ignores B"
        }

        fn mode(&self) -> ComparisonMode {
            ComparisonMode::Blend
        }

        fn composite_frame(&self, a: &Frame, _b: &Frame, _position: f32) -> Frame {
            a.clone()
        }
    }

    #[test]
    fn test_custom_compositor_replaces_builtin() {
        let mut registry = CompositorRegistry::new();
        registry.register(ComparisonMode::Blend, || Box::new(AlwaysA));

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get(ComparisonMode::Blend).unwrap().name(), "always_a");
    }
}
