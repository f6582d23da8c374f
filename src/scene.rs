//! Scene nodes to component bundles
//!
//! The host decodes its scene file into a flat list of named nodes. Node names
//! follow a naming convention and decide which components an entity gets:
//!
//! | name                | bundle                             |
//! |---------------------|------------------------------------|
//! | contains `player`   | player                             |
//! | `enemy*`            | enemy template (not instantiated)  |
//! | `hit`               | hit zone                           |
//! | `spawn-left*`       | spawn point, left                  |
//! | `spawn-right*`      | spawn point, right                 |
//! | `start-left<N>`     | slot N, left                       |
//! | `start-right<N>`    | slot N, right                      |
//! | `chrono*`           | session timer + text               |
//! | `score*`            | score meter + text                 |
//! | anything else       | plain prop                         |

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::components::*;
use crate::sim::world::World;

/// Scene errors
#[derive(thiserror::Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("slot node '{0}' does not end with an index digit 1-9")]
    BadSlotIndex(String),

    #[error("duplicate slot index {index} on the {side:?} lane")]
    DuplicateSlot { side: Side, index: u8 },

    #[error("{side:?} lane has no slot {index}; slots must run 1, 2, 3... without gaps")]
    SlotGap { side: Side, index: u8 },

    #[error("scene has no '{0}' node")]
    MissingNode(&'static str),
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

fn default_half_extents() -> Vec3 {
    Vec3::splat(0.5)
}

/// A decoded scene node
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneNode {
    pub name: String,
    #[serde(default)]
    pub translation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    /// Half-extents of the node's model bounding box
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, translation: Vec3) -> Self {
        Self {
            name: name.into(),
            translation,
            scale: default_scale(),
            half_extents: default_half_extents(),
        }
    }

    fn transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            scale: self.scale,
        }
    }
}

/// What a node becomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    Player,
    EnemyTemplate,
    HitZone,
    Spawn(Side),
    Slot(Side, u8),
    Chrono,
    Score,
    Prop,
}

impl NodeRole {
    pub fn classify(name: &str) -> Result<Self, SceneError> {
        let role = if name.contains("player") {
            NodeRole::Player
        } else if name.starts_with("enemy") {
            NodeRole::EnemyTemplate
        } else if name == "hit" {
            NodeRole::HitZone
        } else if name.starts_with("spawn-left") {
            NodeRole::Spawn(Side::Left)
        } else if name.starts_with("spawn-right") {
            NodeRole::Spawn(Side::Right)
        } else if name.starts_with("start-left") {
            NodeRole::Slot(Side::Left, extract_index(name)?)
        } else if name.starts_with("start-right") {
            NodeRole::Slot(Side::Right, extract_index(name)?)
        } else if name.starts_with("chrono") {
            NodeRole::Chrono
        } else if name.starts_with("score") {
            NodeRole::Score
        } else {
            NodeRole::Prop
        };
        Ok(role)
    }
}

/// Slot index from the trailing digit of a node name
pub fn extract_index(name: &str) -> Result<u8, SceneError> {
    name.chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .filter(|d| *d > 0)
        .map(|d| d as u8)
        .ok_or_else(|| SceneError::BadSlotIndex(name.to_string()))
}

/// Slot indices of a lane must be exactly 1..=N. The front is index 1 and
/// reflow moves enemies from index i + 1 to i, so a missing index strands
/// every enemy queued behind it.
fn check_slot_sequence(side: Side, seen: &HashSet<(Side, u8)>) -> Result<(), SceneError> {
    let mut indices: Vec<u8> = seen
        .iter()
        .filter(|(s, _)| *s == side)
        .map(|(_, index)| *index)
        .collect();
    indices.sort_unstable();
    for (expected, index) in (1u8..).zip(indices) {
        if index != expected {
            return Err(SceneError::SlotGap {
                side,
                index: expected,
            });
        }
    }
    Ok(())
}

/// Prefab every spawned enemy is instantiated from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyTemplate {
    pub scale: Vec3,
    pub bounds: Bounds,
}

impl Default for EnemyTemplate {
    fn default() -> Self {
        Self {
            scale: Vec3::ONE,
            bounds: Bounds::new(default_half_extents()),
        }
    }
}

/// A decoded scene
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn from_json(json: &str) -> Result<Self, SceneError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, SceneError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Built-in arena: the player at the origin, five slots per side spaced
    /// two units apart, spawn points well beyond the last slot.
    pub fn demo() -> Self {
        let mut nodes = vec![
            SceneNode::new("player", Vec3::ZERO),
            SceneNode::new("enemy1", Vec3::new(0.0, -50.0, 0.0)),
            SceneNode::new("hit", Vec3::new(0.0, 0.0, 1.0)),
            SceneNode::new("spawn-left", Vec3::new(-16.0, 0.0, 0.0)),
            SceneNode::new("spawn-right", Vec3::new(16.0, 0.0, 0.0)),
            SceneNode::new("chrono", Vec3::new(0.0, 8.0, 0.0)),
            SceneNode::new("score", Vec3::new(0.0, 7.0, 0.0)),
            SceneNode {
                half_extents: Vec3::new(20.0, 0.1, 2.0),
                ..SceneNode::new("ground", Vec3::new(0.0, -1.0, 0.0))
            },
        ];
        for index in 1..=5u8 {
            let x = 2.0 * index as f32;
            nodes.push(SceneNode::new(format!("start-left{}", index), Vec3::new(-x, 0.0, 0.0)));
            nodes.push(SceneNode::new(format!("start-right{}", index), Vec3::new(x, 0.0, 0.0)));
        }
        Self { nodes }
    }

    /// Create one entity per node (except the enemy template, which is
    /// returned instead) and attach the bundle its name calls for.
    pub fn populate(
        &self,
        world: &mut World,
        session_seconds: f32,
    ) -> Result<EnemyTemplate, SceneError> {
        let mut template = None;
        let mut seen_slots = HashSet::new();

        for node in &self.nodes {
            let role = NodeRole::classify(&node.name)?;
            if role == NodeRole::EnemyTemplate {
                template = Some(EnemyTemplate {
                    scale: node.scale,
                    bounds: Bounds::new(node.half_extents),
                });
                continue;
            }

            let id = world.spawn_at(node.transform());
            world.bounds.insert(id, Bounds::new(node.half_extents));
            match role {
                NodeRole::Player => world.players.insert(id, Player::default()),
                NodeRole::HitZone => world.hit_zones.insert(id, HitZone),
                NodeRole::Spawn(side) => {
                    world.spawns.insert(id, SpawnPoint);
                    world.sides.insert(id, side);
                }
                NodeRole::Slot(side, index) => {
                    if !seen_slots.insert((side, index)) {
                        return Err(SceneError::DuplicateSlot { side, index });
                    }
                    world.slots.insert(id, Slot::new(index));
                    world.sides.insert(id, side);
                }
                NodeRole::Chrono => {
                    let chrono = Chrono::new(session_seconds);
                    world.labels.insert(id, Label::new(chrono.display()));
                    world.chronos.insert(id, chrono);
                }
                NodeRole::Score => {
                    world.score_meters.insert(id, ScoreMeter::default());
                    world.labels.insert(id, Label::new("0000"));
                }
                NodeRole::Prop | NodeRole::EnemyTemplate => {}
            }
        }

        if world.players.is_empty() {
            return Err(SceneError::MissingNode("player"));
        }
        for side in Side::BOTH {
            check_slot_sequence(side, &seen_slots)?;
        }
        for side in Side::BOTH {
            let has_spawn = world.spawns.iter().any(|(id, _)| world.sides.get(id) == Some(&side));
            if !has_spawn {
                log::warn!("no spawn point on the {:?} lane; it will stay empty", side);
            }
        }
        if world.chronos.is_empty() {
            log::warn!("scene has no chrono; the session only ends on lives");
        }

        template.ok_or(SceneError::MissingNode("enemy"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_name() {
        assert_eq!(NodeRole::classify("the-player").unwrap(), NodeRole::Player);
        assert_eq!(NodeRole::classify("enemy1").unwrap(), NodeRole::EnemyTemplate);
        assert_eq!(NodeRole::classify("hit").unwrap(), NodeRole::HitZone);
        assert_eq!(NodeRole::classify("hitbox").unwrap(), NodeRole::Prop);
        assert_eq!(NodeRole::classify("spawn-left.001").unwrap(), NodeRole::Spawn(Side::Left));
        assert_eq!(NodeRole::classify("spawn-right").unwrap(), NodeRole::Spawn(Side::Right));
        assert_eq!(NodeRole::classify("start-left3").unwrap(), NodeRole::Slot(Side::Left, 3));
        assert_eq!(NodeRole::classify("start-right5").unwrap(), NodeRole::Slot(Side::Right, 5));
        assert_eq!(NodeRole::classify("chrono").unwrap(), NodeRole::Chrono);
        assert_eq!(NodeRole::classify("score-text").unwrap(), NodeRole::Score);
        assert_eq!(NodeRole::classify("camera").unwrap(), NodeRole::Prop);
    }

    #[test]
    fn test_bad_slot_index() {
        assert!(matches!(
            NodeRole::classify("start-left"),
            Err(SceneError::BadSlotIndex(_))
        ));
        assert!(matches!(extract_index("start-right0"), Err(SceneError::BadSlotIndex(_))));
        assert_eq!(extract_index("start-right7").unwrap(), 7);
    }

    #[test]
    fn test_demo_populates_world() {
        let mut world = World::new();
        let template = Scene::demo().populate(&mut world, 60.0).unwrap();
        assert_eq!(template.bounds.half_extents, Vec3::splat(0.5));
        assert_eq!(world.players.len(), 1);
        assert_eq!(world.slots.len(), 10);
        assert_eq!(world.spawns.len(), 2);
        assert_eq!(world.hit_zones.len(), 1);
        assert!(world.enemies.is_empty());

        let (chrono_id, _) = world.chronos.iter().next().unwrap();
        assert_eq!(world.labels.get(chrono_id).unwrap().text, "60:00");
    }

    #[test]
    fn test_duplicate_slot_is_rejected() {
        let scene = Scene {
            nodes: vec![
                SceneNode::new("player", Vec3::ZERO),
                SceneNode::new("start-left1", Vec3::ZERO),
                SceneNode::new("start-left1", Vec3::X),
            ],
        };
        let err = scene.populate(&mut World::new(), 60.0).unwrap_err();
        assert!(matches!(
            err,
            SceneError::DuplicateSlot {
                side: Side::Left,
                index: 1
            }
        ));
    }

    fn scene_with_slots(names: &[&str]) -> Scene {
        let mut nodes = vec![
            SceneNode::new("player", Vec3::ZERO),
            SceneNode::new("enemy1", Vec3::ZERO),
        ];
        for (i, name) in names.iter().enumerate() {
            nodes.push(SceneNode::new(*name, Vec3::new(i as f32 * 2.0, 0.0, 0.0)));
        }
        Scene { nodes }
    }

    #[test]
    fn test_lane_without_front_slot_is_rejected() {
        let scene = scene_with_slots(&["start-left2", "start-left3"]);
        let err = scene.populate(&mut World::new(), 60.0).unwrap_err();
        assert!(matches!(
            err,
            SceneError::SlotGap {
                side: Side::Left,
                index: 1
            }
        ));
    }

    #[test]
    fn test_lane_with_gap_is_rejected() {
        let scene =
            scene_with_slots(&["start-left1", "start-right1", "start-right3", "start-right4"]);
        let err = scene.populate(&mut World::new(), 60.0).unwrap_err();
        assert!(matches!(
            err,
            SceneError::SlotGap {
                side: Side::Right,
                index: 2
            }
        ));
    }

    #[test]
    fn test_contiguous_lanes_in_any_order() {
        let scene =
            scene_with_slots(&["start-left3", "start-left1", "start-left2", "start-right1"]);
        let mut world = World::new();
        scene.populate(&mut world, 60.0).unwrap();
        assert_eq!(world.slots.len(), 4);
    }

    #[test]
    fn test_missing_player_or_template() {
        let no_player = Scene {
            nodes: vec![SceneNode::new("enemy1", Vec3::ZERO)],
        };
        assert!(matches!(
            no_player.populate(&mut World::new(), 60.0),
            Err(SceneError::MissingNode("player"))
        ));

        let no_enemy = Scene {
            nodes: vec![SceneNode::new("player", Vec3::ZERO)],
        };
        assert!(matches!(
            no_enemy.populate(&mut World::new(), 60.0),
            Err(SceneError::MissingNode("enemy"))
        ));
    }

    #[test]
    fn test_scene_from_json_defaults() {
        let json = r#"{ "nodes": [
            { "name": "player" },
            { "name": "start-right2", "translation": [4.0, 0.0, 0.0] }
        ] }"#;
        let scene = Scene::from_json(json).unwrap();
        assert_eq!(scene.nodes.len(), 2);
        assert_eq!(scene.nodes[0].scale, Vec3::ONE);
        assert_eq!(scene.nodes[1].translation, Vec3::new(4.0, 0.0, 0.0));
        assert_eq!(scene.nodes[1].half_extents, Vec3::splat(0.5));
    }
}
