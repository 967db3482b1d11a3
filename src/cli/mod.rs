//! Command-line front end of the `coze-chat` binary.
//!
//! ```ignore
//! use coze_chat::cli::{parse_args, CliCommand};
//!
//! match parse_args(std::env::args())? {
//!     CliCommand::Version => println!("{}", version_string()),
//!     CliCommand::Help => println!("{}", USAGE),
//!     CliCommand::Chat(args) => { /* run_chat(&client, &args, &mut stdout).await? */ }
//! }
//! ```

pub mod args;
pub mod run;
pub mod version;

pub use args::{parse_args, ArgsError, ChatArgs, CliCommand};
pub use run::{run_chat, run_polling, run_streaming, ChatOutcome};
pub use version::{version_string, USAGE, VERSION};
