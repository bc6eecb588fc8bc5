//! Scene files: data-driven draggable maps.
//!
//! A scene is a JSON document listing the maps to spawn. Each map becomes a
//! [`Draggable`] root entity and, unless `visual_child` is false, a child
//! entity carrying the [`Sprite`] and the map's scale.
//!
//! ```json
//! {
//!   "maps": [
//!     { "name": "world", "texture": "assets/map.png",
//!       "width": 1600, "height": 1200,
//!       "position": [0, 0], "scale": [1, 1], "z_index": 0,
//!       "collider": { "size": [1600, 1200], "offset": [-800, -600] } }
//!   ]
//! }
//! ```
//!
//! `collider` is optional when loading and is filled in by the
//! [`fitcolliders`](crate::fitcolliders) batch command.

use bevy_ecs::hierarchy::ChildOf;
use bevy_ecs::prelude::*;
use raylib::prelude::Vector2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::components::boxcollider::BoxCollider;
use crate::components::draggable::{Draggable, MapName};
use crate::components::mapposition::MapPosition;
use crate::components::scale::Scale;
use crate::components::sprite::Sprite;
use crate::components::zindex::ZIndex;

fn unit_scale() -> [f32; 2] {
    [1.0, 1.0]
}

fn default_true() -> bool {
    true
}

/// Root of a scene file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SceneData {
    pub maps: Vec<MapData>,
}

/// One draggable map.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MapData {
    pub name: String,
    /// Image file; also used as the texture key. Maps without a texture are
    /// drawn as flat rectangles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub width: f32,
    pub height: f32,
    #[serde(default)]
    pub position: [f32; 2],
    #[serde(default = "unit_scale")]
    pub scale: [f32; 2],
    #[serde(default)]
    pub z_index: i32,
    /// Put the sprite on a child entity (the map's visual).
    #[serde(default = "default_true")]
    pub visual_child: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collider: Option<ColliderData>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct ColliderData {
    pub size: [f32; 2],
    pub offset: [f32; 2],
}

impl From<&BoxCollider> for ColliderData {
    fn from(c: &BoxCollider) -> Self {
        Self {
            size: [c.size.x, c.size.y],
            offset: [c.offset.x, c.offset.y],
        }
    }
}

impl From<ColliderData> for BoxCollider {
    fn from(c: ColliderData) -> Self {
        BoxCollider::new(c.size[0], c.size[1]).with_offset(Vector2 {
            x: c.offset[0],
            y: c.offset[1],
        })
    }
}

impl MapData {
    /// Key the sprite uses to look up its texture.
    pub fn texture_key(&self) -> String {
        self.texture.clone().unwrap_or_else(|| self.name.clone())
    }

    pub fn sprite(&self) -> Sprite {
        Sprite::centered(self.texture_key(), self.width, self.height)
    }
}

impl SceneData {
    /// Loads scene data from a JSON file at the specified path.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        let scene: SceneData = serde_json::from_str(&file_content)?;
        Ok(scene)
    }

    /// Writes scene data as pretty-printed JSON.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn map(&self, name: &str) -> Option<&MapData> {
        self.maps.iter().find(|m| m.name == name)
    }
}

/// Spawn one root entity per map. Returns the roots in scene order.
///
/// Colliders stored in the scene are inserted as-is; maps without one get
/// theirs from [`fit_colliders_system`](crate::systems::collider::fit_colliders_system).
pub fn spawn_scene(world: &mut World, scene: &SceneData) -> Vec<Entity> {
    scene
        .maps
        .iter()
        .map(|map| {
            let scale = Scale::new(map.scale[0], map.scale[1]);
            let mut root = world.spawn((
                Draggable,
                MapName(map.name.clone()),
                MapPosition::new(map.position[0], map.position[1]),
                ZIndex(map.z_index),
            ));
            if let Some(collider) = map.collider {
                root.insert(BoxCollider::from(collider));
            }
            if map.visual_child {
                root.insert(Scale::default());
                let root_id = root.id();
                world.spawn((map.sprite(), scale, ChildOf(root_id)));
                root_id
            } else {
                root.insert((map.sprite(), scale));
                root.id()
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{ "maps": [ { "name": "world", "width": 64, "height": 32 } ] }"#;

    #[test]
    fn minimal_map_gets_defaults() {
        let scene: SceneData = serde_json::from_str(MINIMAL).unwrap();
        let map = &scene.maps[0];
        assert_eq!(map.position, [0.0, 0.0]);
        assert_eq!(map.scale, [1.0, 1.0]);
        assert_eq!(map.z_index, 0);
        assert!(map.visual_child);
        assert!(map.collider.is_none());
        assert_eq!(map.texture_key(), "world");
    }

    #[test]
    fn save_omits_absent_optionals() {
        let scene: SceneData = serde_json::from_str(MINIMAL).unwrap();
        let json = serde_json::to_string(&scene).unwrap();
        assert!(!json.contains("collider"));
        assert!(!json.contains("texture"));
    }

    #[test]
    fn spawn_with_visual_child() {
        let scene: SceneData = serde_json::from_str(MINIMAL).unwrap();
        let mut world = World::new();
        let roots = spawn_scene(&mut world, &scene);
        assert_eq!(roots.len(), 1);

        let root = world.entity(roots[0]);
        assert!(root.contains::<Draggable>());
        assert!(!root.contains::<Sprite>());
        assert_eq!(root.get::<MapName>().unwrap().0, "world");

        let mut children = world.query::<(&Sprite, &ChildOf)>();
        let (sprite, parent) = children.single(&world).unwrap();
        assert_eq!(parent.parent(), roots[0]);
        assert_eq!(sprite.width, 64.0);
    }

    #[test]
    fn spawn_without_visual_child_keeps_sprite_on_root() {
        let json = r#"{ "maps": [ { "name": "m", "width": 8, "height": 8,
            "visual_child": false, "scale": [2, 2],
            "collider": { "size": [1, 1], "offset": [0, 0] } } ] }"#;
        let scene: SceneData = serde_json::from_str(json).unwrap();
        let mut world = World::new();
        let roots = spawn_scene(&mut world, &scene);

        let root = world.entity(roots[0]);
        assert!(root.contains::<Sprite>());
        assert_eq!(root.get::<Scale>().unwrap().scale.x, 2.0);
        assert_eq!(root.get::<BoxCollider>().unwrap().size.x, 1.0);
    }
}
