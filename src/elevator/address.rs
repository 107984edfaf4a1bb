use tokio::sync::mpsc::Sender;
use tokio::sync::oneshot;

use crate::elevator::{ElevatorError, ElevatorId, ElevatorStatus};
use crate::message::{Command, Envelope};

/// Represents the address of an [ElevatorActor](crate::elevator::ElevatorActor). The dispatcher
/// talks to an elevator only through its [ElevatorAddr].
#[derive(Clone, Debug)]
pub struct ElevatorAddr {
    id: ElevatorId,
    tx: Sender<Envelope>
}

impl ElevatorAddr {
    pub(crate) fn new(id: ElevatorId, tx: Sender<Envelope>) -> Self {
        Self {
            id,
            tx
        }
    }

    pub fn id(&self) -> ElevatorId {
        self.id
    }

    /// Sends the command and waits until the elevator has fully processed it. The acknowledgment
    /// carries the elevator's new status.
    pub async fn ask(&self, command: Command) -> Result<ElevatorStatus, ElevatorError> {
        let (reply_to, reply) = oneshot::channel();
        self.tx
            .send(Envelope { command, reply_to })
            .await
            .map_err(|_| ElevatorError::Unreachable(self.id))?;

        match reply.await {
            Ok(result) => result,
            Err(_) => Err(ElevatorError::Unreachable(self.id))
        }
    }
}
