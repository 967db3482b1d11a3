//! Command-line argument parsing.

use thiserror::Error;

use crate::models::{validate_meta_data, MetaData};

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    Version,
    Help,
    Chat(ChatArgs),
}

/// Arguments of a chat run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatArgs {
    pub bot_id: String,
    pub user_id: String,
    pub conversation_id: Option<String>,
    pub meta_data: MetaData,
    /// Use create + polling instead of streaming
    pub no_stream: bool,
    pub prompt: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgsError {
    #[error("missing value for {0}")]
    MissingValue(String),
    #[error("missing required option {0}")]
    MissingOption(&'static str),
    #[error("unknown option {0}")]
    UnknownOption(String),
    #[error("no prompt given")]
    MissingPrompt,
    #[error("invalid --meta value '{0}', expected KEY=VALUE")]
    InvalidMeta(String),
    #[error("{0}")]
    MetaLimits(String),
}

/// Parse command-line arguments. The first item is the program name.
///
/// `--version` and `--help` win over everything else. Positional arguments
/// are joined with spaces to form the prompt; `--` ends option parsing.
///
/// # Examples
///
/// ```
/// use coze_chat::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["coze-chat".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, ArgsError>
where
    I: Iterator<Item = String>,
{
    let mut args = args.skip(1);
    let mut parsed = ChatArgs::default();
    let mut prompt: Vec<String> = Vec::new();
    let mut options_done = false;

    while let Some(arg) = args.next() {
        if options_done || !arg.starts_with('-') || arg == "-" {
            prompt.push(arg);
            continue;
        }

        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--no-stream" => parsed.no_stream = true,
            "--" => options_done = true,
            "--bot-id" => parsed.bot_id = value_for(&arg, args.next())?,
            "--user-id" => parsed.user_id = value_for(&arg, args.next())?,
            "--conversation-id" => {
                parsed.conversation_id = Some(value_for(&arg, args.next())?)
            }
            "--meta" => {
                let pair = value_for(&arg, args.next())?;
                let (key, value) = pair
                    .split_once('=')
                    .ok_or_else(|| ArgsError::InvalidMeta(pair.clone()))?;
                parsed.meta_data.insert(key.to_string(), value.to_string());
            }
            _ => return Err(ArgsError::UnknownOption(arg)),
        }
    }

    if parsed.bot_id.is_empty() {
        return Err(ArgsError::MissingOption("--bot-id"));
    }
    if parsed.user_id.is_empty() {
        return Err(ArgsError::MissingOption("--user-id"));
    }

    parsed.prompt = prompt.join(" ");
    if parsed.prompt.trim().is_empty() {
        return Err(ArgsError::MissingPrompt);
    }

    validate_meta_data(&parsed.meta_data).map_err(ArgsError::MetaLimits)?;

    Ok(CliCommand::Chat(parsed))
}

fn value_for(option: &str, value: Option<String>) -> Result<String, ArgsError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ArgsError::MissingValue(option.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<CliCommand, ArgsError> {
        let mut all = vec!["coze-chat".to_string()];
        all.extend(args.iter().map(|s| s.to_string()));
        parse_args(all.into_iter())
    }

    #[test]
    fn test_parse_version_flag() {
        assert_eq!(parse(&["--version"]), Ok(CliCommand::Version));
        assert_eq!(parse(&["--bot-id", "b", "-V"]), Ok(CliCommand::Version));
    }

    #[test]
    fn test_parse_help_flag() {
        assert_eq!(parse(&["-h"]), Ok(CliCommand::Help));
    }

    #[test]
    fn test_parse_chat() {
        let command = parse(&[
            "--bot-id",
            "7350",
            "--user-id",
            "u1",
            "--conversation-id",
            "conv",
            "What",
            "is",
            "Rust?",
        ])
        .unwrap();

        match command {
            CliCommand::Chat(args) => {
                assert_eq!(args.bot_id, "7350");
                assert_eq!(args.user_id, "u1");
                assert_eq!(args.conversation_id.as_deref(), Some("conv"));
                assert_eq!(args.prompt, "What is Rust?");
                assert!(!args.no_stream);
            }
            other => panic!("Expected Chat, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_meta_and_no_stream() {
        let command = parse(&[
            "--bot-id", "b", "--user-id", "u", "--meta", "source=cli", "--no-stream", "hi",
        ])
        .unwrap();

        let CliCommand::Chat(args) = command else {
            panic!("Expected Chat");
        };
        assert!(args.no_stream);
        assert_eq!(args.meta_data.get("source").map(String::as_str), Some("cli"));
    }

    #[test]
    fn test_double_dash_ends_options() {
        let CliCommand::Chat(args) = parse(&["--bot-id", "b", "--user-id", "u", "--", "--not-a-flag"]).unwrap()
        else {
            panic!("Expected Chat");
        };
        assert_eq!(args.prompt, "--not-a-flag");
    }

    #[test]
    fn test_missing_required() {
        assert_eq!(
            parse(&["--user-id", "u", "hi"]),
            Err(ArgsError::MissingOption("--bot-id"))
        );
        assert_eq!(
            parse(&["--bot-id", "b", "hi"]),
            Err(ArgsError::MissingOption("--user-id"))
        );
        assert_eq!(
            parse(&["--bot-id", "b", "--user-id", "u"]),
            Err(ArgsError::MissingPrompt)
        );
        assert_eq!(
            parse(&["--bot-id"]),
            Err(ArgsError::MissingValue("--bot-id".to_string()))
        );
    }

    #[test]
    fn test_bad_options() {
        assert_eq!(
            parse(&["--colour"]),
            Err(ArgsError::UnknownOption("--colour".to_string()))
        );
        assert!(matches!(
            parse(&["--bot-id", "b", "--user-id", "u", "--meta", "novalue", "hi"]),
            Err(ArgsError::InvalidMeta(_))
        ));
        assert!(matches!(
            parse(&["--bot-id", "b", "--user-id", "u", "--meta", "=v", "hi"]),
            Err(ArgsError::MetaLimits(_))
        ));
    }
}
