//! The simulation backend seam.

use ae_command::{CommandBatch, TickTelemetry};

use crate::BackendResult;

/// An engine that executes one command batch per tick and replies with the
/// resulting telemetry.
///
/// Implementations must execute commands in batch order and step physics
/// exactly once per call.  Query results (`RequestOverlap`, `RequestPath`)
/// issued in a batch appear in the telemetry that call returns, tagged with
/// their `QueryId`; actions read them on the following tick.
///
/// The session primes the backend with an empty batch before the first tick
/// so that every Orchestrator starts from real telemetry.
pub trait Backend {
    fn step(&mut self, commands: &CommandBatch) -> BackendResult<TickTelemetry>;
}

impl<B: Backend + ?Sized> Backend for &mut B {
    fn step(&mut self, commands: &CommandBatch) -> BackendResult<TickTelemetry> {
        (**self).step(commands)
    }
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn step(&mut self, commands: &CommandBatch) -> BackendResult<TickTelemetry> {
        (**self).step(commands)
    }
}
