use std::path::Path;
use std::process::Command;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SendError {
    #[error("could not start `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
}

/// Delivers one image with a caption to one destination.
pub trait Sender {
    fn send(&self, destination: &str, image: &Path, caption: &str) -> Result<(), SendError>;
}

/// Runs an external automation program once per message and waits for it.
///
/// `{number}`, `{image}` and `{caption}` are substituted in every argument.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CommandSender {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for CommandSender {
    fn default() -> Self {
        Self {
            program: "whatsapp-send".to_string(),
            args: vec!["{number}".into(), "{image}".into(), "{caption}".into()],
        }
    }
}

impl CommandSender {
    fn expand_args(&self, destination: &str, image: &Path, caption: &str) -> Vec<String> {
        let image = image.to_string_lossy();
        let values = [
            ("{number}", destination),
            ("{image}", &*image),
            ("{caption}", caption),
        ];
        self.args.iter().map(|a| expand(a, &values)).collect()
    }
}

// Single left-to-right pass so substituted text is never expanded again.
fn expand(arg: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(arg.len());
    let mut rest = arg;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push('{');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

impl Sender for CommandSender {
    fn send(&self, destination: &str, image: &Path, caption: &str) -> Result<(), SendError> {
        let args = self.expand_args(destination, image, caption);
        log::debug!("running {} for {}", self.program, destination);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .map_err(|source| SendError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(SendError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}
