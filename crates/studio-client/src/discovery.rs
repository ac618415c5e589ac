//! Host/guest bootstrap.
//!
//! The first client on a machine becomes the room's host: it launches the
//! bundled server executable sitting next to its own binary and waits for
//! it to come up. Every later client finds the port already answering and
//! joins as a guest. Every failure along the way degrades to guest;
//! nothing here returns an error to the caller.

use std::io::{Read, Write};
use std::net::{TcpStream, ToSocketAddrs};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::Duration;

use tracing::{debug, info, warn};

const PROBE_TIMEOUT: Duration = Duration::from_millis(500);
const HEALTH_ATTEMPTS: u32 = 20;
const HEALTH_INTERVAL: Duration = Duration::from_millis(250);

/// Production deployments sit on :80; :8080 covers dev builds and older
/// servers.
const PROBE_ADDRS: [&str; 2] = ["localhost:80", "localhost:8080"];

const SERVER_EXE: &str = "CollabServer";

/// Which side of the room this client ended up on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerRole {
    Host,
    Guest,
}

/// Outcome of the startup race: the role this client plays, and the
/// server process it spawned, if any.
#[derive(Debug)]
pub struct Bootstrap {
    pub role: ServerRole,
    pub server: Option<BackendServer>,
}

/// Handle to a server process this client launched. The child is killed
/// when the handle drops so closing the host window never leaves an
/// orphaned server behind.
#[derive(Debug)]
pub struct BackendServer {
    child: Child,
}

impl BackendServer {
    pub fn pid(&self) -> u32 {
        self.child.id()
    }

    /// Explicit shutdown, for callers that want to log around it.
    pub fn shutdown(mut self) {
        self.kill();
    }

    fn kill(&mut self) {
        info!(pid = self.child.id(), "stopping backend server");
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for BackendServer {
    fn drop(&mut self) {
        self.kill();
    }
}

/// Decides this client's role, launching the bundled server if nobody
/// answers yet.
pub fn bootstrap() -> Bootstrap {
    if server_alive() {
        info!("found a running server, joining as guest");
        return Bootstrap {
            role: ServerRole::Guest,
            server: None,
        };
    }

    let Some(exe) = sibling_server_exe() else {
        warn!("no bundled server executable next to this binary, joining as guest");
        return Bootstrap {
            role: ServerRole::Guest,
            server: None,
        };
    };

    let mut cmd = Command::new(&exe);
    cmd.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    if let Some(dir) = exe.parent() {
        cmd.current_dir(dir);
    }
    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        const CREATE_NO_WINDOW: u32 = 0x0800_0000;
        cmd.creation_flags(CREATE_NO_WINDOW);
    }

    let child = match cmd.spawn() {
        Ok(child) => child,
        Err(e) => {
            warn!(error = %e, "failed to launch the bundled server, joining as guest");
            return Bootstrap {
                role: ServerRole::Guest,
                server: None,
            };
        }
    };
    let server = BackendServer { child };

    if wait_for_health() {
        info!(pid = server.pid(), "backend server is up, acting as host");
        Bootstrap {
            role: ServerRole::Host,
            server: Some(server),
        }
    } else {
        // Keep the handle so whatever did start still gets killed on
        // shutdown.
        warn!("backend server never became healthy, joining as guest");
        Bootstrap {
            role: ServerRole::Guest,
            server: Some(server),
        }
    }
}

/// One-shot check whether any known local server answers.
pub fn server_alive() -> bool {
    PROBE_ADDRS.iter().any(|addr| ping(addr))
}

/// Sends a minimal health request and accepts any 200 answer. The whole
/// exchange is bounded by [`PROBE_TIMEOUT`] per phase so a wedged port
/// cannot stall startup.
fn ping(addr: &str) -> bool {
    let Ok(mut candidates) = addr.to_socket_addrs() else {
        return false;
    };
    let Some(sock_addr) = candidates.next() else {
        return false;
    };
    let Ok(mut stream) = TcpStream::connect_timeout(&sock_addr, PROBE_TIMEOUT) else {
        return false;
    };
    let _ = stream.set_read_timeout(Some(PROBE_TIMEOUT));
    let _ = stream.set_write_timeout(Some(PROBE_TIMEOUT));

    let request = format!("GET /ping HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    if stream.write_all(request.as_bytes()).is_err() {
        return false;
    }

    let mut head = [0u8; 64];
    let Ok(n) = stream.read(&mut head) else {
        return false;
    };
    let status_line = String::from_utf8_lossy(&head[..n]);
    let alive = status_line.starts_with("HTTP/1.1 200") || status_line.starts_with("HTTP/1.0 200");
    debug!(addr, alive, "health probe");
    alive
}

/// The server binary ships in the same directory as the client.
fn sibling_server_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let dir = exe.parent()?;
    let name = if cfg!(windows) {
        format!("{SERVER_EXE}.exe")
    } else {
        SERVER_EXE.to_owned()
    };
    let path = dir.join(name);
    path.exists().then_some(path)
}

fn wait_for_health() -> bool {
    for _ in 0..HEALTH_ATTEMPTS {
        if server_alive() {
            return true;
        }
        thread::sleep(HEALTH_INTERVAL);
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::TcpListener;

    fn serve_once(response: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            if let Ok((mut stream, _)) = listener.accept() {
                let mut buf = [0u8; 512];
                let _ = stream.read(&mut buf);
                let _ = stream.write_all(response);
            }
        });
        addr.to_string()
    }

    #[test]
    fn ping_accepts_a_healthy_server() {
        let addr = serve_once(b"HTTP/1.1 200 OK\r\nContent-Length: 4\r\n\r\npong");
        assert!(ping(&addr));
    }

    #[test]
    fn ping_rejects_an_unhealthy_status() {
        let addr = serve_once(b"HTTP/1.1 404 Not Found\r\n\r\n");
        assert!(!ping(&addr));
    }

    #[test]
    fn ping_rejects_a_closed_port() {
        // Bind then drop to get a port nobody is listening on.
        let addr = TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .to_string();
        assert!(!ping(&addr));
    }
}
