use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use blokus::Request;
use serde::Deserialize;
use tracing::{trace, warn};

use crate::recording::Recorder;

/// How to start a bot, read from a JSON file.
///
/// ```json
/// { "nick": "random", "cmd": ["target/release/random_bot", "--seed", "1"] }
/// ```
#[derive(Clone, Debug, Deserialize)]
pub struct PlayerConfig {
    pub nick: String,
    /// The executable, followed by its arguments.
    pub cmd: Vec<String>,
}

impl PlayerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = std::fs::File::open(path)?;
        let config: PlayerConfig = serde_json::from_reader(BufReader::new(file))?;
        if config.cmd.is_empty() {
            anyhow::bail!("The player config '{}' has an empty cmd", path.display());
        }
        Ok(config)
    }
}

/// A bot running as a child process, talking JSON over its stdin/stdout.
pub struct Player {
    pub name: String,
    child: Child,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after perform_request().
    buf: String,
}

impl Player {
    pub fn from_config(config: &PlayerConfig) -> anyhow::Result<Self> {
        let Some((program, args)) = config.cmd.split_first() else {
            anyhow::bail!("No command given for player '{}'", config.nick);
        };
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;
        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| anyhow::anyhow!("Could not access stdin of '{}'", config.nick))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| anyhow::anyhow!("Could not access stdout of '{}'", config.nick))?;

        Ok(Self {
            name: config.nick.clone(),
            child,
            stdin,
            stdout: BufReader::new(stdout),
            buf: String::new(),
        })
    }

    pub fn perform_request<T: serde::de::DeserializeOwned + std::fmt::Debug>(
        &mut self,
        recorder: &mut Option<Recorder>,
        req: &Request,
    ) -> anyhow::Result<T> {
        let mut req_json = serde_json::to_string(req)?;
        trace!(name: "Sending request", player = &self.name, request = %req_json);
        req_json.push('\n');
        self.stdin.write_all(req_json.as_bytes())?;
        self.stdin.flush()?;
        self.buf.clear();
        if self.stdout.read_line(&mut self.buf)? == 0 {
            anyhow::bail!("Player '{}' closed its output", self.name);
        }
        let serialized_response = self.buf.trim_end();
        trace!(name: "Received response", player = &self.name, response = %serialized_response);
        // Recorded before parsing, so that malformed responses end up in the recording
        if let Some(recorder) = recorder {
            recorder.store_request(&self.name, req, serialized_response);
        }
        let response = serde_json::from_str::<T>(serialized_response);
        self.buf.clear();
        Ok(response?)
    }

    /// Tells the bot to shut down and waits for it to exit.
    pub fn bye(mut self) -> anyhow::Result<()> {
        let mut req_json = serde_json::to_string(&Request::Bye)?;
        req_json.push('\n');
        // The bot may already be gone, which is fine
        if let Err(err) = self
            .stdin
            .write_all(req_json.as_bytes())
            .and_then(|_| self.stdin.flush())
        {
            warn!(player = &self.name, %err, "Could not say bye");
        }
        drop(self.stdin);
        let status = self.child.wait()?;
        if !status.success() {
            warn!(player = &self.name, %status, "Player exited with an error");
        }
        Ok(())
    }
}
