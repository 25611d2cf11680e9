//! Shared utilities for integration testing: mock mpd daemons.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;

pub const GREETING: &str = "OK MPD 0.21.0\n";
pub const STATUS_BLOCK: &str = "volume: 50\nstate: play\nOK\n";
pub const SONG_BLOCK: &str = "file: song.mp3\nArtist: Tester\nOK\n";

/// Commands a mock daemon received, in arrival order.
pub type CommandLog = Arc<Mutex<Vec<String>>>;

/// Start a well-behaved mock mpd daemon on an ephemeral port.
///
/// Every accepted connection gets the greeting, then canned responses to
/// `status` and `currentsong`; `close` ends the connection. Returns the
/// daemon address and the log of received commands.
pub async fn start_mock_mpd() -> (SocketAddr, CommandLog) {
    start_scripted_mpd(GREETING, Duration::ZERO).await
}

/// Like [`start_mock_mpd`] but pausing before each response block, to hold
/// a session in flight for concurrency tests.
#[allow(dead_code)]
pub async fn start_slow_mock_mpd(delay: Duration) -> (SocketAddr, CommandLog) {
    start_scripted_mpd(GREETING, delay).await
}

/// Mock daemon that greets with garbage instead of the mpd banner.
#[allow(dead_code)]
pub async fn start_bad_greeting_mpd() -> (SocketAddr, CommandLog) {
    start_scripted_mpd("WELCOME garbage\n", Duration::ZERO).await
}

/// Mock daemon that sends the greeting and then never answers anything.
#[allow(dead_code)]
pub async fn start_silent_mock_mpd() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    tokio::spawn(async move {
                        let _ = socket.write_all(GREETING.as_bytes()).await;
                        // Swallow whatever arrives without ever replying.
                        let mut sink = [0u8; 256];
                        use tokio::io::AsyncReadExt;
                        while let Ok(n) = socket.read(&mut sink).await {
                            if n == 0 {
                                break;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

async fn start_scripted_mpd(greeting: &'static str, delay: Duration) -> (SocketAddr, CommandLog) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log: CommandLog = Arc::new(Mutex::new(Vec::new()));
    let accept_log = log.clone();

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((socket, _)) => {
                    let log = accept_log.clone();
                    tokio::spawn(async move {
                        let (read_half, mut write_half) = socket.into_split();

                        if write_half.write_all(greeting.as_bytes()).await.is_err() {
                            return;
                        }

                        let mut lines = BufReader::new(read_half).lines();
                        while let Ok(Some(line)) = lines.next_line().await {
                            log.lock().unwrap().push(line.clone());

                            if !delay.is_zero() {
                                tokio::time::sleep(delay).await;
                            }

                            let response = match line.as_str() {
                                "status" => STATUS_BLOCK,
                                "currentsong" => SONG_BLOCK,
                                "close" => return,
                                // Unknown command: empty successful block.
                                _ => "OK\n",
                            };
                            if write_half.write_all(response.as_bytes()).await.is_err() {
                                return;
                            }
                        }
                    });
                }
                Err(_) => break,
            }
        }
    });

    (addr, log)
}
