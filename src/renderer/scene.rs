//! Frame assembly.
//!
//! Flattens the whole game state into the queue in a fixed layer order:
//! backdrop, player, saucer, bullets, asteroids, healthbar. Deleted
//! entities are skipped, and with the overlay on each entity is followed
//! by its collision box so the box draws right on top of it.

use glam::Vec3;

use crate::palette;
use crate::sim::bounds::bounding_box;
use crate::sim::mesh::{MeshId, MeshRegistry, Topology};
use crate::sim::state::{Body, BufferId, GameState, LayoutId, ShaderId};

use super::queue::{DrawCommand, DrawQueue};

/// Rebuild the queue for the current frame.
pub fn queue_frame(state: &GameState, queue: &mut DrawQueue) {
    queue.clear();

    // The backdrop never gets a box, even with the overlay on.
    submit_body(queue, &state.background.body, false, &state.meshes);

    let overlay = state.show_bounds;
    submit_body(queue, &state.player.body, overlay, &state.meshes);
    submit_body(queue, &state.saucer.body, overlay, &state.meshes);
    for bullet in state.bullets.iter() {
        submit_body(queue, &bullet.body, overlay, &state.meshes);
    }
    for asteroid in state.asteroids.iter() {
        submit_body(queue, &asteroid.body, overlay, &state.meshes);
    }
    for slot in &state.health_bar {
        submit_body(queue, &slot.body, overlay, &state.meshes);
    }
}

/// Where the score readout sits, tucked into the top-left corner.
pub fn score_anchor(state: &GameState) -> Vec3 {
    let half = state.field_half();
    Vec3::new(-half + 1.0, half - 1.0, 0.0)
}

fn submit_body(queue: &mut DrawQueue, body: &Body, overlay: bool, meshes: &MeshRegistry) {
    if body.deleted {
        return;
    }
    queue.submit(DrawCommand::for_body(body));
    if overlay {
        if let Some(command) = box_overlay(body, meshes) {
            queue.submit(command);
        }
    }
}

/// The gray line rectangle around an entity, sized from its transformed
/// mesh. Axis aligned, so the rotation stays zero.
fn box_overlay(body: &Body, meshes: &MeshRegistry) -> Option<DrawCommand> {
    let mesh = meshes.get(body.sprite.mesh)?;
    let bounds = bounding_box(body, mesh);
    Some(DrawCommand {
        position: bounds.center,
        scale: bounds.extent,
        rotation_deg: 0.0,
        color: palette::BOX_GRAY,
        mesh: MeshId::RECTANGLE_LINES,
        texture: None,
        shader: ShaderId::POSITION,
        layout: LayoutId::POSITION,
        constants: BufferId::FRAME,
        topology: Topology::LineList,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::ArtHandles;
    use crate::tuning::Tuning;

    fn fresh_state() -> GameState {
        GameState::new(21, Tuning::default(), ArtHandles::default())
    }

    #[test]
    fn test_frame_starts_with_backdrop() {
        let state = fresh_state();
        let mut queue = DrawQueue::new();
        queue_frame(&state, &mut queue);

        let first = &queue.commands()[0];
        assert_eq!(first.color, palette::BACKDROP);
        assert_eq!(first.scale, Vec3::new(15.0, 15.0, 1.0));
        // Backdrop, player, three rocks, five pips; the saucer is out.
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn test_deleted_entities_are_skipped() {
        let mut state = fresh_state();
        let mut queue = DrawQueue::new();

        state.asteroids.get_mut(0).unwrap().body.deleted = true;
        queue_frame(&state, &mut queue);
        assert_eq!(queue.len(), 9);

        // A live saucer joins the frame.
        state.saucer.body.deleted = false;
        queue_frame(&state, &mut queue);
        assert_eq!(queue.len(), 10);
    }

    #[test]
    fn test_overlay_boxes_follow_their_entities() {
        let mut state = fresh_state();
        state.show_bounds = true;
        let mut queue = DrawQueue::new();
        queue_frame(&state, &mut queue);

        // Every entity except the backdrop doubles up with its box.
        assert_eq!(queue.len(), 1 + 9 * 2);
        let commands = queue.commands();
        assert_ne!(commands[1].topology, Topology::LineList);
        let player_box = &commands[2];
        assert_eq!(player_box.topology, Topology::LineList);
        assert_eq!(player_box.color, palette::BOX_GRAY);
        assert_eq!(player_box.mesh, MeshId::RECTANGLE_LINES);
        // Unit quad at the origin boxes out to a unit square.
        assert_eq!(player_box.scale, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_score_anchor_sits_top_left() {
        let state = fresh_state();
        assert_eq!(score_anchor(&state), Vec3::new(-6.5, 6.5, 0.0));
    }
}
