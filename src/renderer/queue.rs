//! Ordered draw command list.

use glam::{Vec3, Vec4};

use crate::palette;
use crate::sim::mesh::{MeshId, Topology};
use crate::sim::state::{Body, BufferId, LayoutId, ShaderId, TextureId};

/// Everything a backend needs for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawCommand {
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation_deg: f32,
    pub color: Vec4,
    pub mesh: MeshId,
    pub texture: Option<TextureId>,
    pub shader: ShaderId,
    pub layout: LayoutId,
    pub constants: BufferId,
    pub topology: Topology,
}

impl DrawCommand {
    /// Flatten a body and its sprite into a command.
    pub fn for_body(body: &Body) -> Self {
        Self {
            position: body.position,
            scale: body.scale,
            rotation_deg: body.rotation_deg,
            color: body.color,
            mesh: body.sprite.mesh,
            texture: body.sprite.texture,
            shader: body.sprite.shader,
            layout: body.sprite.layout,
            constants: body.sprite.constants,
            topology: body.sprite.topology,
        }
    }
}

/// Commands for one frame, replayed strictly in submission order. The
/// scene relies on that order for layering, so there is no depth sort.
#[derive(Debug, Clone)]
pub struct DrawQueue {
    pub clear_color: Vec4,
    commands: Vec<DrawCommand>,
}

impl DrawQueue {
    pub fn new() -> Self {
        Self { clear_color: palette::CLEAR, commands: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    pub fn submit(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Hand every command to the backend, in order.
    pub fn replay<F>(&self, mut draw: F)
    where
        F: FnMut(&DrawCommand),
    {
        for command in &self.commands {
            draw(command);
        }
    }
}

impl Default for DrawQueue {
    fn default() -> Self {
        Self::new()
    }
}
