use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "slipcheck")]
#[command(author, version, about = "LINE bot that verifies payment slips from their QR code", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the LINE webhook
    Run {
        /// Port to listen on (overrides PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Decode the QR code of a slip image on disk and print the token
    Decode {
        /// Path to a JPEG or PNG slip image
        path: PathBuf,
    },

    /// Look up a slip token and print the reply the bot would send
    Lookup {
        /// Token as decoded from the slip QR code
        token: String,

        /// Reply language (th or en)
        #[arg(long)]
        lang: Option<String>,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
