use clap::{Parser, ValueEnum};
use userdb_core::config::{DbConfig, WriteMode};

/// userdb: interactive shell over an in-process user store
#[derive(Debug, Parser)]
#[command(name = "userdb", version)]
pub struct Args {
    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// What a second concurrent writer does
    #[arg(long, env = "USERDB_WRITE_MODE", value_enum, default_value_t = WriteModeArg::Block)]
    pub write_mode: WriteModeArg,

    /// Print JSON on one line instead of pretty-printed
    #[arg(long)]
    pub compact: bool,
}

impl Args {
    pub fn db_config(&self) -> DbConfig {
        DbConfig::default().with_write_mode(self.write_mode.into())
    }

    pub const fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

///
/// WriteModeArg
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum WriteModeArg {
    Block,
    FailFast,
}

impl From<WriteModeArg> for WriteMode {
    fn from(arg: WriteModeArg) -> Self {
        match arg {
            WriteModeArg::Block => Self::Block,
            WriteModeArg::FailFast => Self::FailFast,
        }
    }
}

///
/// TESTS
///
