//! Render and asset boundaries.
//!
//! The graph decides what is drawn, where and in which order; pixels are the
//! sink's business. Assets are opaque handles resolved by the host.

use framekit_api_core::{Color, Vec2};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SceneError};

/// Host-issued handle to a loaded texture.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle(pub u32);

pub trait AssetProvider {
    fn texture(&mut self, name: &str) -> Option<AssetHandle>;
    /// Pixel size of a loaded texture.
    fn texture_size(&self, handle: AssetHandle) -> Vec2;
}

/// Resolved placement handed to the sink for one visual.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DrawTransform {
    /// Screen position of the hot spot.
    pub position: Vec2,
    pub angle: f32,
    pub scale: Vec2,
    pub tint: Color,
    pub hot_spot: Vec2,
    /// Depth in `0..=1`, decreasing in draw order.
    pub layer: f32,
}

pub trait RenderSink {
    fn draw_sprite(&mut self, asset: AssetHandle, frame: u32, transform: &DrawTransform);
}

/// Something a node can show.
pub trait Visual {
    /// Unscaled size.
    fn size(&self) -> Vec2;

    /// Pivot, measured from the top-left corner of the unscaled visual.
    fn hot_spot(&self) -> Vec2 {
        Vec2::ZERO
    }

    fn update(&mut self, _delta: f32) {}

    fn draw(&self, transform: &DrawTransform, sink: &mut dyn RenderSink);
}

/// Texture, optionally a horizontal strip of animation frames.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    asset: AssetHandle,
    size: Vec2,
    hot_spot: Vec2,
    frames: u32,
    frame_rate: f32,
    looped: bool,
    current: u32,
    elapsed: f32,
}

impl Sprite {
    pub fn new(asset: AssetHandle, size: Vec2) -> Self {
        Self {
            asset,
            size,
            hot_spot: Vec2::ZERO,
            frames: 1,
            frame_rate: 0.0,
            looped: false,
            current: 0,
            elapsed: 0.0,
        }
    }

    pub fn load(provider: &mut dyn AssetProvider, name: &str) -> Result<Self> {
        let asset = provider
            .texture(name)
            .ok_or_else(|| SceneError::UnknownAsset {
                name: name.to_string(),
            })?;
        Ok(Self::new(asset, provider.texture_size(asset)))
    }

    pub fn with_hot_spot(mut self, hot_spot: Vec2) -> Self {
        self.hot_spot = hot_spot;
        self
    }

    /// Pivot at the middle of the visual.
    pub fn centered(self) -> Self {
        let hot = self.size / 2.0;
        self.with_hot_spot(hot)
    }

    /// Play `frames` frames at `frame_rate` per second.
    pub fn animated(mut self, frames: u32, frame_rate: f32, looped: bool) -> Self {
        self.frames = frames.max(1);
        self.frame_rate = frame_rate;
        self.looped = looped;
        self
    }

    pub fn asset(&self) -> AssetHandle {
        self.asset
    }

    pub fn frame(&self) -> u32 {
        self.current
    }

    pub fn is_playing(&self) -> bool {
        self.frames > 1 && self.frame_rate > 0.0 && (self.looped || self.current + 1 < self.frames)
    }
}

impl Visual for Sprite {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn hot_spot(&self) -> Vec2 {
        self.hot_spot
    }

    fn update(&mut self, delta: f32) {
        if !self.is_playing() {
            return;
        }
        let step = 1.0 / self.frame_rate;
        self.elapsed += delta;
        while self.elapsed >= step {
            self.elapsed -= step;
            if self.current + 1 < self.frames {
                self.current += 1;
            } else if self.looped {
                self.current = 0;
            } else {
                break;
            }
        }
    }

    fn draw(&self, transform: &DrawTransform, sink: &mut dyn RenderSink) {
        sink.draw_sprite(self.asset, self.current, transform);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap;

    struct Atlas(HashMap<String, (AssetHandle, Vec2)>);

    impl AssetProvider for Atlas {
        fn texture(&mut self, name: &str) -> Option<AssetHandle> {
            self.0.get(name).map(|(h, _)| *h)
        }

        fn texture_size(&self, handle: AssetHandle) -> Vec2 {
            self.0
                .values()
                .find(|(h, _)| *h == handle)
                .map_or(Vec2::ZERO, |(_, s)| *s)
        }
    }

    #[test]
    fn load_resolves_size_or_fails() {
        let mut atlas = Atlas(HashMap::new());
        atlas
            .0
            .insert("ship".into(), (AssetHandle(3), Vec2::new(32.0, 16.0)));
        let sprite = Sprite::load(&mut atlas, "ship").unwrap().centered();
        assert_eq!(sprite.size(), Vec2::new(32.0, 16.0));
        assert_eq!(sprite.hot_spot(), Vec2::new(16.0, 8.0));
        assert_eq!(
            Sprite::load(&mut atlas, "rock").unwrap_err(),
            SceneError::UnknownAsset {
                name: "rock".into()
            }
        );
    }

    #[test]
    fn frames_advance_and_stop_or_loop() {
        let mut once = Sprite::new(AssetHandle(0), Vec2::ONE).animated(3, 4.0, false);
        once.update(1.0);
        assert_eq!(once.frame(), 2);
        assert!(!once.is_playing());

        let mut looped = Sprite::new(AssetHandle(0), Vec2::ONE).animated(3, 4.0, true);
        looped.update(0.75);
        assert_eq!(looped.frame(), 0);
    }
}
