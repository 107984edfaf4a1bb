use std::fmt::{Display, Formatter};
use tokio::sync::oneshot;

use crate::elevator::{ElevatorError, ElevatorStatus};

/// The commands a dispatcher can give an elevator. Exactly one is issued per elevator and tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Drop off everybody who has arrived, then pick up waiting persons while there is room.
    OpenDoors,
    Ascend,
    Descend,
    Idle
}

impl Display for Command {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Command::OpenDoors => "open-doors",
            Command::Ascend => "ascend",
            Command::Descend => "descend",
            Command::Idle => "idle"
        };
        write!(f, "{}", name)
    }
}

/// A [Command] together with the address its acknowledgment is sent to. The acknowledgment is the
/// elevator's status after it processed the command, or the reason it refused to.
#[derive(Debug)]
pub(crate) struct Envelope {
    pub(crate) command: Command,
    pub(crate) reply_to: oneshot::Sender<Result<ElevatorStatus, ElevatorError>>
}
