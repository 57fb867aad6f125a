//! Test doubles shared by unit tests

use crate::error::SweepResult;
use crate::registry::{command_line, CommandOutput, CommandRunner};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

struct Response {
    code: i32,
    stdout: String,
    stderr: Vec<String>,
}

/// `CommandRunner` that replays canned responses in order and records
/// every invocation. Panics if more commands run than were scripted.
#[derive(Default)]
pub struct ScriptedRunner {
    responses: Mutex<VecDeque<Response>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, code: i32, stdout: &str) -> Self {
        self.respond_with_stderr(code, stdout, &[])
    }

    pub fn respond_with_stderr(self, code: i32, stdout: &str, stderr: &[&str]) -> Self {
        self.responses.lock().unwrap().push_back(Response {
            code,
            stdout: stdout.to_string(),
            stderr: stderr.iter().map(|s| s.to_string()).collect(),
        });
        self
    }

    /// Every command line run so far
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(
        &self,
        program: &str,
        args: &[String],
        on_stderr: &(dyn Fn(String) + Send + Sync),
    ) -> SweepResult<CommandOutput> {
        let line = command_line(program, args);
        self.calls.lock().unwrap().push(line.clone());

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected command: {line}"));

        for stderr in response.stderr {
            on_stderr(stderr);
        }

        Ok(CommandOutput {
            code: Some(response.code),
            stdout: response.stdout,
        })
    }
}
