//! Storyboard: the set of named scenes and which one is current.

use framekit_scene_core::SceneGraph;
use indexmap::IndexMap;
use log::debug;

use crate::error::{EngineError, Result};

#[derive(Debug, Default)]
pub struct Storyboard {
    scenes: IndexMap<String, SceneGraph>,
    current: Option<String>,
}

impl Storyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scene. The first scene added becomes current.
    pub fn add_scene(&mut self, name: impl Into<String>, scene: SceneGraph) -> Result<()> {
        let name = name.into();
        if self.scenes.contains_key(&name) {
            return Err(EngineError::DuplicateScene { name });
        }
        if self.current.is_none() {
            debug!("storyboard: '{}' is now current", name);
            self.current = Some(name.clone());
        }
        self.scenes.insert(name, scene);
        Ok(())
    }

    pub fn goto_scene(&mut self, name: &str) -> Result<()> {
        if !self.scenes.contains_key(name) {
            return Err(EngineError::UnknownScene {
                name: name.to_owned(),
            });
        }
        debug!("storyboard: switching to '{}'", name);
        self.current = Some(name.to_owned());
        Ok(())
    }

    /// Removing the current scene leaves the storyboard without one.
    pub fn remove_scene(&mut self, name: &str) -> Option<SceneGraph> {
        let scene = self.scenes.shift_remove(name)?;
        if self.current.as_deref() == Some(name) {
            debug!("storyboard: current scene '{}' removed", name);
            self.current = None;
        }
        Some(scene)
    }

    pub fn contains_scene(&self, name: &str) -> bool {
        self.scenes.contains_key(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current(&self) -> Option<&SceneGraph> {
        self.current.as_deref().and_then(|n| self.scenes.get(n))
    }

    pub fn current_mut(&mut self) -> Option<&mut SceneGraph> {
        let name = self.current.as_deref()?;
        self.scenes.get_mut(name)
    }

    pub fn scene(&self, name: &str) -> Option<&SceneGraph> {
        self.scenes.get(name)
    }

    pub fn scene_mut(&mut self, name: &str) -> Option<&mut SceneGraph> {
        self.scenes.get_mut(name)
    }

    /// Scene names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scenes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scenes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_scene_becomes_current() {
        let mut board = Storyboard::new();
        board.add_scene("menu", SceneGraph::new()).unwrap();
        board.add_scene("level", SceneGraph::new()).unwrap();
        assert_eq!(board.current_name(), Some("menu"));
        assert_eq!(board.names().collect::<Vec<_>>(), vec!["menu", "level"]);
    }

    #[test]
    fn duplicate_and_unknown_names_fail() {
        let mut board = Storyboard::new();
        board.add_scene("menu", SceneGraph::new()).unwrap();
        assert!(matches!(
            board.add_scene("menu", SceneGraph::new()),
            Err(EngineError::DuplicateScene { .. })
        ));
        assert!(matches!(
            board.goto_scene("credits"),
            Err(EngineError::UnknownScene { .. })
        ));
        assert_eq!(board.current_name(), Some("menu"));
    }

    #[test]
    fn removing_current_clears_it() {
        let mut board = Storyboard::new();
        board.add_scene("a", SceneGraph::new()).unwrap();
        board.add_scene("b", SceneGraph::new()).unwrap();
        assert!(board.remove_scene("b").is_some());
        assert_eq!(board.current_name(), Some("a"));
        assert!(board.remove_scene("a").is_some());
        assert!(board.current().is_none());
        assert!(board.remove_scene("a").is_none());
        assert!(board.is_empty());
    }
}
