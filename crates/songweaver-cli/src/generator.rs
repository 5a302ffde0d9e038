use std::io::Write;
use std::process::{Command, Stdio};

use songweaver_engine::{GenerateError, GenerationRequest, TextGenerator};

/// Environment variable carrying the system instruction to the command
pub const SYSTEM_INSTRUCTION_ENV: &str = "SONGWEAVER_SYSTEM_INSTRUCTION";

/// Generates text by running a user-configured shell command.
///
/// The user prompt is written to the command's stdin and the system
/// instruction is passed in [`SYSTEM_INSTRUCTION_ENV`]. Whatever the
/// command prints on stdout is the response.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    command: String,
}

impl CommandGenerator {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl TextGenerator for CommandGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let backend = |e: std::io::Error| GenerateError::Backend(e.to_string());

        let mut child = Command::new("sh")
            .arg("-c")
            .arg(&self.command)
            .env(SYSTEM_INSTRUCTION_ENV, &request.system_instruction)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(backend)?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(request.prompt.as_bytes()).map_err(backend)?;
        }
        let output = child.wait_with_output().map_err(backend)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GenerateError::Backend(format!(
                "'{}' exited with {}: {}",
                self.command,
                output.status.code().unwrap_or(-1),
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songweaver_engine::BlockId;

    fn request() -> GenerationRequest {
        GenerationRequest {
            block_id: BlockId::from("lyrics-1"),
            system_instruction: "You are a creative songwriter.".to_string(),
            prompt: "Musical Context: None.".to_string(),
        }
    }

    #[test]
    fn test_prompt_goes_to_stdin() {
        let generator = CommandGenerator::new("cat");
        assert_eq!(generator.generate(&request()).unwrap(), "Musical Context: None.");
    }

    #[test]
    fn test_system_instruction_in_environment() {
        let generator = CommandGenerator::new("cat >/dev/null; printf '%s' \"$SONGWEAVER_SYSTEM_INSTRUCTION\"");
        assert_eq!(
            generator.generate(&request()).unwrap(),
            "You are a creative songwriter."
        );
    }

    #[test]
    fn test_failing_command_is_a_backend_error() {
        let generator = CommandGenerator::new("cat >/dev/null; echo quota >&2; exit 3");

        let err = generator.generate(&request()).unwrap_err();

        assert_eq!(
            err,
            GenerateError::Backend("'cat >/dev/null; echo quota >&2; exit 3' exited with 3: quota".into())
        );
    }
}
