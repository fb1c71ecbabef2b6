// Scripted stand-in for the trivia server, shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use reel_trivia::engine::api_client::TriviaApi;
use reel_trivia::engine::error::{TriviaError, TriviaResult};
use serde_json::{json, Value};

#[derive(Default)]
struct Script {
    // the last reply for a path repeats forever
    replies: HashMap<String, VecDeque<Value>>,
    gets: Vec<String>,
    posts: Vec<String>,
    delays: HashMap<String, Duration>,
}

#[derive(Clone, Default)]
pub struct FakeApi {
    script: Arc<Mutex<Script>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, path: &str, value: Value) -> Self {
        self.script
            .lock()
            .unwrap()
            .replies
            .entry(path.to_string())
            .or_default()
            .push_back(value);
        self
    }

    /// Makes every GET of `path` take `delay`, like a stalled server.
    pub fn slow(self, path: &str, delay: Duration) -> Self {
        self.script
            .lock()
            .unwrap()
            .delays
            .insert(path.to_string(), delay);
        self
    }

    pub fn gets(&self) -> Vec<String> {
        self.script.lock().unwrap().gets.clone()
    }

    pub fn posts(&self) -> Vec<String> {
        self.script.lock().unwrap().posts.clone()
    }

    /// Cancel requests go out on a detached thread, so give them a moment.
    pub fn wait_for_post(&self, path: &str, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if self.posts().iter().any(|p| p == path) {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }
}

impl TriviaApi for FakeApi {
    fn get_json(&self, path: &str) -> TriviaResult<Value> {
        let delay = self.script.lock().unwrap().delays.get(path).copied();
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        let mut script = self.script.lock().unwrap();
        script.gets.push(path.to_string());

        let queue = script
            .replies
            .get_mut(path)
            .ok_or(TriviaError::Status(404))?;
        let value = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        value.ok_or(TriviaError::Status(404))
    }

    fn post(&self, path: &str) -> TriviaResult<()> {
        self.script.lock().unwrap().posts.push(path.to_string());
        Ok(())
    }
}

pub fn library() -> Value {
    json!({
        "movies": ["Heat", "Alien", "Aliens", "Ronin"],
        "shows": ["Alias"]
    })
}

pub fn frame_result() -> Value {
    json!({
        "title": "Heat",
        "frame_colors": [{"color": "#102030"}, {"color": "rgb(200, 100, 50)"}],
        "total_samples": 2,
        "sample_rate": 24,
        "options": ["Alien", "Heat", "Ronin", "Collateral"],
        "correct_answer": 1
    })
}

pub fn processing(percent: u32) -> Value {
    json!({"status": "processing", "progress": percent, "message": "Sampling frames"})
}
