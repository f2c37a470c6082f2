use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use blokus::Request;
use serde::{Deserialize, Serialize};

/// Writes the requests and responses of each game into a numbered JSON file.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    requests: Vec<RequestToPlayer>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            requests: Vec::new(),
        })
    }

    pub fn store_request(&mut self, player: &str, request: &Request, response: &str) {
        // A response that isn't valid JSON is kept as a string, so that it can be inspected
        let response = serde_json::from_str(response)
            .unwrap_or_else(|_| serde_json::Value::String(String::from(response)));
        self.requests.push(RequestToPlayer {
            player: String::from(player),
            request: request.clone(),
            response,
        });
    }

    /// Writes the recorded requests of the current game, and starts a new one.
    ///
    /// Returns the path of the written file.
    pub fn write_game_recording(&mut self) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(&filepath)?);
        let recording = GameRecording {
            requests: std::mem::take(&mut self.requests),
        };
        serde_json::to_writer_pretty(writer, &recording)?;
        self.num += 1;
        Ok(filepath)
    }
}

#[derive(Serialize, Deserialize)]
pub struct GameRecording {
    pub requests: Vec<RequestToPlayer>,
}

#[derive(Serialize, Deserialize)]
pub struct RequestToPlayer {
    pub player: String,
    pub request: Request,
    pub response: serde_json::Value,
}
