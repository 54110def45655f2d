//! Play a named animation once.

use ae_command::{Command, CommandBatch};

use crate::{ActionCore, ActionStatus, TickContext};

#[derive(Clone, Debug)]
pub struct Animate {
    name:    String,
    forward: bool,
}

impl Animate {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), forward: true }
    }

    /// Play the animation backwards.
    pub fn reversed(mut self) -> Self {
        self.forward = false;
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub(crate) fn initialize(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        core.lease.exclude_all(ctx.policy, ctx.dynamic.held().iter());
        let mut out = CommandBatch::new();
        out.push(Command::PlayAnimation { agent: ctx.id(), name: self.name.clone(), forward: self.forward });
        out
    }

    pub(crate) fn ongoing(&mut self, core: &mut ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        if !ctx.dynamic.collision_enters(ctx.policy).is_empty() {
            core.end(ActionStatus::Collision);
        } else if ctx.dynamic.motion_done() {
            core.end(ActionStatus::Success);
        }
        CommandBatch::new()
    }

    /// An interrupted animation is stopped; a finished one needs nothing.
    pub(crate) fn finalize(&mut self, core: &ActionCore, ctx: &mut TickContext<'_>) -> CommandBatch {
        let mut out = CommandBatch::new();
        if core.status() != ActionStatus::Success {
            out.push(Command::StopMotion { agent: ctx.id() });
        }
        out
    }
}
