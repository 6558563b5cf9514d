//! REPL (Read-Eval-Print Loop) for interactive chat
//!
//! One chat keeps one session id; every line is a session turn.

use crate::cli::commands::OutputFormat;
use crate::output::console::ConsoleFormatter;
use crate::progress::reporter::ProgressReporter;
use council_application::ports::progress::NoProgress;
use council_application::{RunSessionTurnInput, RunSessionTurnUseCase};
use council_domain::{Model, NodeId, SaveBucket};
use reedline::{DefaultPrompt, DefaultPromptSegment, FileBackedHistory, Reedline, Signal};

const HISTORY_CAPACITY: usize = 500;

/// A parsed chat line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Message(String),
    Help,
    Node(String),
    Enable(Vec<String>),
    History,
    Symptoms,
    Saved(String),
    Quit,
    Unknown(String),
}

impl ChatCommand {
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        if !line.starts_with('/') {
            return Some(ChatCommand::Message(line.to_string()));
        }

        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };
        Some(match (name, arg) {
            ("/quit" | "/exit" | "/q", _) => ChatCommand::Quit,
            ("/help" | "/h" | "/?", _) => ChatCommand::Help,
            ("/node", arg) if !arg.is_empty() => ChatCommand::Node(arg.to_string()),
            ("/enable", arg) => ChatCommand::Enable(
                arg.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            ("/history", _) => ChatCommand::History,
            ("/symptoms", _) => ChatCommand::Symptoms,
            ("/saved", arg) if !arg.is_empty() => ChatCommand::Saved(arg.to_string()),
            _ => ChatCommand::Unknown(line.to_string()),
        })
    }
}

/// Interactive chat REPL
pub struct ChatRepl {
    use_case: RunSessionTurnUseCase,
    session_id: String,
    model: Model,
    active_node: String,
    enabled_nodes: Vec<String>,
    output: OutputFormat,
    show_progress: bool,
}

impl ChatRepl {
    pub fn new(use_case: RunSessionTurnUseCase, session_id: impl Into<String>, model: Model) -> Self {
        Self {
            use_case,
            session_id: session_id.into(),
            model,
            active_node: NodeId::Yapper.to_string(),
            enabled_nodes: Vec::new(),
            output: OutputFormat::Response,
            show_progress: true,
        }
    }

    pub fn with_active_node(mut self, node: impl Into<String>) -> Self {
        self.active_node = node.into();
        self
    }

    pub fn with_enabled_nodes(mut self, nodes: Vec<String>) -> Self {
        self.enabled_nodes = nodes;
        self
    }

    pub fn with_output(mut self, output: OutputFormat) -> Self {
        self.output = output;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Run the interactive REPL until `/quit` or end of input
    pub async fn run(&mut self) -> std::io::Result<()> {
        let mut editor = Reedline::create();
        if let Some(path) = dirs::data_dir().map(|p| p.join("symptom-council").join("history.txt")) {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            match FileBackedHistory::with_file(HISTORY_CAPACITY, path) {
                Ok(history) => editor = editor.with_history(Box::new(history)),
                Err(e) => tracing::warn!("Chat history disabled: {}", e),
            }
        }
        let prompt = DefaultPrompt::new(
            DefaultPromptSegment::Basic("council".to_string()),
            DefaultPromptSegment::Empty,
        );

        self.print_welcome();

        loop {
            match editor.read_line(&prompt)? {
                Signal::Success(line) => {
                    let Some(command) = ChatCommand::parse(&line) else {
                        continue;
                    };
                    if self.handle(command).await {
                        break;
                    }
                }
                Signal::CtrlC => {
                    println!("^C");
                }
                Signal::CtrlD => {
                    println!("Bye!");
                    break;
                }
            }
        }
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("Symptom Council - Chat Mode");
        println!("Session: {}  Leader: {}  Model: {}", self.session_id, self.active_node, self.model);
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help              - Show this help");
        println!("  /node <id>         - Change the leading node");
        println!("  /enable <a,b>      - Restrict supporting nodes (empty = all)");
        println!("  /history           - Show this session's conversation");
        println!("  /symptoms          - Show the structured symptom list");
        println!("  /saved <bucket>    - List items saved in a bucket");
        println!("  /quit              - Exit chat");
        println!();
    }

    /// Returns true when the loop should end
    async fn handle(&mut self, command: ChatCommand) -> bool {
        match command {
            ChatCommand::Quit => {
                println!("Bye!");
                return true;
            }
            ChatCommand::Help => Self::print_help(),
            ChatCommand::Node(node) => match node.parse::<NodeId>() {
                Ok(node) => {
                    self.active_node = node.to_string();
                    println!("Leader is now {}", node.display_name());
                }
                Err(e) => eprintln!("{}", e),
            },
            ChatCommand::Enable(nodes) => {
                match nodes.iter().find(|n| n.parse::<NodeId>().is_err()) {
                    Some(bad) => eprintln!("Unknown node: {}", bad),
                    None => {
                        println!(
                            "Supporting nodes: {}",
                            if nodes.is_empty() { "all".to_string() } else { nodes.join(", ") }
                        );
                        self.enabled_nodes = nodes;
                    }
                }
            }
            ChatCommand::History => {
                for turn in self.use_case.store().history(&self.session_id) {
                    println!("{}: {}", turn.role.as_str(), turn.content);
                }
            }
            ChatCommand::Symptoms => {
                let symptoms = self
                    .use_case
                    .store()
                    .snapshot(&self.session_id)
                    .structured_symptom_list;
                if symptoms.is_empty() {
                    println!("No symptoms captured yet.");
                } else {
                    println!("{}", symptoms.join(", "));
                }
            }
            ChatCommand::Saved(bucket) => match bucket.parse::<SaveBucket>() {
                Ok(bucket) => {
                    for item in self.use_case.store().list_saved(&self.session_id, bucket) {
                        println!("[{}] {}", item.timestamp, item.content);
                    }
                }
                Err(e) => eprintln!("{}", e),
            },
            ChatCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
            ChatCommand::Message(message) => self.process_message(message).await,
        }
        false
    }

    async fn process_message(&self, message: String) {
        println!();
        let input = RunSessionTurnInput::new(&self.session_id, message, self.model.clone())
            .with_active_node(&self.active_node)
            .with_enabled_nodes(self.enabled_nodes.clone());

        let result = if self.show_progress {
            self.use_case.execute(input, &ProgressReporter::new()).await
        } else {
            self.use_case.execute(input, &NoProgress).await
        };

        match result {
            Ok(result) => {
                let text = match self.output {
                    OutputFormat::Full => ConsoleFormatter::format(&result),
                    OutputFormat::Json => ConsoleFormatter::format_json(&result),
                    OutputFormat::Response => ConsoleFormatter::format_response_only(&result),
                };
                println!("{}", text);
            }
            Err(e) => {
                tracing::debug!("Session turn failed: {:?}", e);
                eprintln!("Error: {}", e);
            }
        }
    }
}
