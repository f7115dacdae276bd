use crate::{
    application::{
        handlers::InstructionHandler,
        network::{
            TransportInterface,
            interface::{TransportError, TransportResult},
        },
        storage::StorageInterface,
    },
    domain::{ClientId, Instruction},
};
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Serves one client connection until it fails or closes.
pub struct Session<T: TransportInterface, S: StorageInterface> {
    id: Uuid,
    peer: ClientId,
    transport: T,
    handler: Arc<InstructionHandler<S>>,
}

impl<T: TransportInterface, S: StorageInterface> Session<T, S> {
    pub fn new(transport: T, peer: ClientId, handler: Arc<InstructionHandler<S>>) -> Self {
        Self {
            id: Uuid::new_v4(),
            peer,
            transport,
            handler,
        }
    }

    /// Dispatches instructions until the transport fails, returning the error
    /// that ended the session. Dropping the session releases the connection.
    pub async fn run(mut self) -> TransportError {
        info!(session = %self.id, peer = %self.peer, "🟢 Session opened");

        let err = loop {
            let instruction = match self.transport.recv().await {
                Ok(instruction) => instruction,
                Err(err) => break err,
            };

            if let Err(err) = self.dispatch(instruction).await {
                break err;
            }
        };

        match &err {
            TransportError::ConnectionLost(reason) => {
                info!(session = %self.id, peer = %self.peer, "🔴 Session closed: {reason}")
            }
            TransportError::Decode(reason) => {
                warn!(session = %self.id, peer = %self.peer, "🔴 Session closed on protocol error: {reason}")
            }
        }

        err
    }

    async fn dispatch(&mut self, instruction: Instruction) -> TransportResult<()> {
        let kind = instruction.kind();
        info!(session = %self.id, peer = %self.peer, kind, "[⬇️  RECV]");

        match instruction {
            Instruction::SyncRequest(known) => {
                let response = self.handler.sync(&known).await;
                self.reply(Instruction::SyncResponse(response)).await
            }

            Instruction::Add(file) => {
                // No reply for Add; a failed write only skips the registry update.
                if let Err(err) = self.handler.add(self.peer, file).await {
                    debug!(session = %self.id, peer = %self.peer, "Add not applied, session continues: {err}");
                }
                Ok(())
            }

            Instruction::DeleteRequest(name) => {
                let outcome = self.handler.delete(self.peer, &name).await;
                self.reply(Instruction::DeleteResponse(outcome)).await
            }

            Instruction::SyncResponse(_) | Instruction::DeleteResponse(_) => Err(
                TransportError::decode(format!("unexpected {kind} from client")),
            ),
        }
    }

    async fn reply(&mut self, instruction: Instruction) -> TransportResult<()> {
        info!(session = %self.id, peer = %self.peer, kind = instruction.kind(), "[⬆️  SEND]");
        self.transport.send(&instruction).await
    }
}
