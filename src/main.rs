//! damage-control - Pre-execution guard for Claude Code tool calls
//!
//! # Usage
//!
//! ```bash
//! # As a Claude Code PreToolUse hook (reads JSON from stdin)
//! echo '{"tool_name":"Bash","tool_input":{"command":"rm -rf /"}}' | damage-control
//!
//! # With an explicit pattern directory
//! damage-control --patterns ~/.claude/hooks/damage-control/patterns
//! ```
//!
//! Exit status 0 allows (with a JSON payload on stdout for "ask"), 2 blocks
//! with the reason on stderr, 1 means the input could not be read.

use std::env;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process;

use damage_control::{
    audit::AuditLogger,
    config::Settings,
    engine::DamageControl,
    error::InputError,
    input::HookInput,
    output::{Decision, EXIT_INPUT_ERROR},
};

/// Print version information
fn print_version() {
    println!("damage-control {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message
fn print_help() {
    println!(
        r#"damage-control - Pre-execution guard for Claude Code tool calls

USAGE:
    damage-control [OPTIONS] < hook-input.json

OPTIONS:
    -h, --help              Print this help message
    -v, --version           Print version information
    -c, --config PATH       Path to settings file (TOML)
    -p, --patterns PATH     Pattern directory or patterns.yaml file

PATTERN SEARCH ORDER:
    $CLAUDE_PROJECT_DIR/.claude/hooks/damage-control/patterns/
    <binary dir>/patterns/
    <binary dir>/../../patterns/
    then patterns.yaml in the same places

EXIT STATUS:
    0   allowed (stdout carries a JSON "ask" decision when confirmation is needed)
    1   input could not be read
    2   blocked (reason on stderr)

USAGE AS HOOK:
    Configure in ~/.claude/settings.json:
    {{
      "hooks": {{
        "PreToolUse": [{{
          "matcher": "Bash|Edit|Write|Read|Grep",
          "hooks": [{{ "type": "command", "command": "~/.claude/hooks/damage-control/damage-control" }}]
        }}]
      }}
    }}
"#
    );
}

/// Parse command line arguments
struct Args {
    help: bool,
    version: bool,
    config_path: Option<PathBuf>,
    patterns_path: Option<PathBuf>,
}

impl Args {
    fn parse() -> Self {
        let args: Vec<String> = env::args().collect();
        let mut result = Args {
            help: false,
            version: false,
            config_path: None,
            patterns_path: None,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "-h" | "--help" => result.help = true,
                "-v" | "--version" => result.version = true,
                "-c" | "--config" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.config_path = Some(PathBuf::from(&args[i]));
                    }
                }
                "-p" | "--patterns" => {
                    if i + 1 < args.len() {
                        i += 1;
                        result.patterns_path = Some(PathBuf::from(&args[i]));
                    }
                }
                arg if arg.starts_with("--config=") => {
                    result.config_path = Some(PathBuf::from(arg.trim_start_matches("--config=")));
                }
                arg if arg.starts_with("--patterns=") => {
                    result.patterns_path =
                        Some(PathBuf::from(arg.trim_start_matches("--patterns=")));
                }
                _ => {}
            }
            i += 1;
        }

        result
    }
}

fn read_input() -> Result<HookInput, InputError> {
    let mut json = String::new();
    io::stdin().read_to_string(&mut json)?;
    HookInput::from_json(&json)
}

fn emit(decision: &Decision) {
    if let Some(out) = decision.stdout() {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        let _ = writeln!(handle, "{}", out);
        let _ = handle.flush();
    }
    if let Some(err) = decision.stderr() {
        eprintln!("{}", err);
    }
}

fn main() {
    let args = Args::parse();

    if args.help {
        print_help();
        return;
    }

    if args.version {
        print_version();
        return;
    }

    let settings = match args.config_path {
        Some(ref path) => Settings::load_from(path).unwrap_or_else(|e| {
            eprintln!("Warning: {}", e);
            Settings::default()
        }),
        None => Settings::load(),
    };

    let patterns = args.patterns_path.clone().or_else(|| settings.patterns_path());
    let engine = DamageControl::load(patterns.as_deref());

    let input = match read_input() {
        Ok(input) => input,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(EXIT_INPUT_ERROR);
        }
    };

    let decision = engine.check(&input);

    let mut logger = AuditLogger::new(settings.audit_path().as_deref());
    if let Err(e) = logger.log_decision(&input, &decision) {
        eprintln!("Warning: Failed to write audit log: {}", e);
    }

    emit(&decision);
    process::exit(decision.exit_code());
}
