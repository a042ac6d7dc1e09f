use crate::domain::ports::Prompter;
use crate::utils::error::{DirectoryError, Result};
use std::io::{BufRead, Write};

/// 以行為單位的提示器，適用於管線輸入與測試；讀到 EOF 視為空白回應
pub struct LinePrompter<R: BufRead + Send, W: Write + Send> {
    input: R,
    output: W,
}

impl<R: BufRead + Send, W: Write + Send> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl LinePrompter<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    pub fn stdio() -> Self {
        Self::new(std::io::BufReader::new(std::io::stdin()), std::io::stdout())
    }
}

impl<R: BufRead + Send, W: Write + Send> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, label: &str, current: &str) -> Result<String> {
        let shown = if current.is_empty() {
            format!("Enter {}", label)
        } else {
            current.to_string()
        };
        write!(self.output, "{} [{}]: ", label, shown).map_err(prompt_error)?;
        self.output.flush().map_err(prompt_error)?;

        let mut line = String::new();
        self.input.read_line(&mut line).map_err(prompt_error)?;
        Ok(line)
    }
}

fn prompt_error(e: std::io::Error) -> DirectoryError {
    DirectoryError::PromptError {
        message: e.to_string(),
    }
}

/// 互動式終端機提示，目前值以預設值顯示
#[cfg(feature = "cli")]
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

#[cfg(feature = "cli")]
impl Prompter for TerminalPrompter {
    fn ask(&mut self, label: &str, current: &str) -> Result<String> {
        let mut input: dialoguer::Input<String> = dialoguer::Input::new()
            .with_prompt(label)
            .allow_empty(true);
        if !current.is_empty() {
            input = input.default(current.to_string());
        }

        input
            .interact_text()
            .map_err(|e| DirectoryError::PromptError {
                message: e.to_string(),
            })
    }
}
