//! Commands the bridge issues to the backend daemon.

/// The three commands one session needs, in the order they are sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Request the player status block.
    Status,
    /// Request the currently-playing track block.
    CurrentSong,
    /// Graceful goodbye; no response is awaited.
    Close,
}

impl Command {
    /// Command name as it appears on the wire.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Status => "status",
            Command::CurrentSong => "currentsong",
            Command::Close => "close",
        }
    }

    /// Full wire encoding, newline-terminated.
    pub fn wire(&self) -> &'static str {
        match self {
            Command::Status => "status\n",
            Command::CurrentSong => "currentsong\n",
            Command::Close => "close\n",
        }
    }

    /// Whether a response block is expected after sending this command.
    pub fn expects_response(&self) -> bool {
        !matches!(self, Command::Close)
    }
}

impl std::fmt::Display for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_encoding_is_newline_terminated() {
        for cmd in [Command::Status, Command::CurrentSong, Command::Close] {
            assert_eq!(cmd.wire(), format!("{}\n", cmd.name()));
        }
    }

    #[test]
    fn only_close_is_fire_and_forget() {
        assert!(Command::Status.expects_response());
        assert!(Command::CurrentSong.expects_response());
        assert!(!Command::Close.expects_response());
    }
}
