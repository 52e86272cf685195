use strum::{Display, EnumString};

/// Transport protocol of a socket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Protocol {
    Tcp,
    Tcp6,
}

/// TCP socket state, named the way `netstat` prints it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TcpState {
    Established,
    SynSent,
    SynRecv,
    #[strum(serialize = "FIN_WAIT1")]
    FinWait1,
    #[strum(serialize = "FIN_WAIT2")]
    FinWait2,
    TimeWait,
    Close,
    CloseWait,
    LastAck,
    Listen,
    Closing,
    NewSynRecv,
    Unknown,
}

impl TcpState {
    /// Map the kernel's numeric state (the `st` column of `/proc/net/tcp`).
    pub fn from_kernel_code(code: u8) -> Self {
        match code {
            0x01 => Self::Established,
            0x02 => Self::SynSent,
            0x03 => Self::SynRecv,
            0x04 => Self::FinWait1,
            0x05 => Self::FinWait2,
            0x06 => Self::TimeWait,
            0x07 => Self::Close,
            0x08 => Self::CloseWait,
            0x09 => Self::LastAck,
            0x0A => Self::Listen,
            0x0B => Self::Closing,
            0x0C => Self::NewSynRecv,
            _ => Self::Unknown,
        }
    }
}

/// A socket as seen during one refresh. Read-only, replaced wholesale on the
/// next [`ConnectionsResult`](crate::Event::ConnectionsResult).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Connection {
    pub protocol: Protocol,
    pub local: String,
    pub remote: String,
    pub state: TcpState,
}

impl Connection {
    pub fn new(
        protocol: Protocol,
        local: impl Into<String>,
        remote: impl Into<String>,
        state: TcpState,
    ) -> Self {
        Self {
            protocol,
            local: local.into(),
            remote: remote.into(),
            state,
        }
    }
}
