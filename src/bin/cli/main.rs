//! CLI tool for binarc archive operations.

mod commands;
mod exit_codes;
mod output;
mod password;
mod progress;

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Encrypted Huffman/RLE archive tool
#[derive(Parser)]
#[command(name = "binarc")]
#[command(author, version, about = "Encrypted Huffman/RLE archive tool", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, short = 'f', value_enum, default_value = "human", global = true)]
    format: OutputFormat,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an archive from files and directories (alias: c)
    #[command(alias = "c")]
    Compress {
        /// Archive to create (".bin" is appended when there is no extension)
        archive: PathBuf,

        /// Standalone files to store
        files: Vec<PathBuf>,

        /// Directories whose files are stored as dir/file
        #[arg(short = 'd', long = "dir")]
        dirs: Vec<PathBuf>,

        /// Compression codec
        #[arg(short = 'e', long, value_enum, default_value = "huf")]
        encoding: Encoding,

        /// RLE unit length in bytes
        #[arg(short = 'u', long, default_value = "1")]
        unit_len: u16,

        /// Replace an existing archive
        #[arg(long)]
        overwrite: bool,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Extract every entry into a directory (alias: x)
    #[command(alias = "x")]
    Extract {
        /// Archive to extract
        archive: PathBuf,

        /// Destination directory
        #[arg(default_value = ".")]
        dest: PathBuf,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Add a file or directory to an archive (alias: a)
    #[command(alias = "a")]
    Add {
        /// Archive to modify
        archive: PathBuf,

        /// File or directory to add
        path: PathBuf,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Delete an entry or a directory from an archive (alias: d)
    #[command(alias = "d")]
    Delete {
        /// Archive to modify
        archive: PathBuf,

        /// Entry name ("file", "dir/file" or "dir")
        name: String,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// Replace an entry with the current contents of a file (alias: u)
    #[command(alias = "u")]
    Update {
        /// Archive to modify
        archive: PathBuf,

        /// File or directory whose entry is replaced
        path: PathBuf,

        #[command(flatten)]
        password: PasswordArgs,
    },

    /// List archive contents (alias: l)
    #[command(alias = "l")]
    List {
        /// Archive to list
        archive: PathBuf,

        #[command(flatten)]
        password: PasswordArgs,
    },
}

/// Password options shared by every command.
#[derive(Args, Clone)]
pub struct PasswordArgs {
    /// Archive password
    #[arg(short = 'p', long, env = "BINARC_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// Prompt for the password
    #[arg(long, conflicts_with = "password")]
    ask_password: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum Encoding {
    Huf,
    Rle,
}

impl From<Encoding> for binarc::Codec {
    fn from(encoding: Encoding) -> Self {
        match encoding {
            Encoding::Huf => binarc::Codec::Huffman,
            Encoding::Rle => binarc::Codec::Rle,
        }
    }
}

fn main() {
    // Writes go through a temporary file, so an interrupted run leaves the
    // previous archive in place.
    ctrlc::set_handler(move || {
        eprintln!("\nInterrupted");
        std::process::exit(exit_codes::USER_INTERRUPT);
    })
    .ok();

    let cli = Cli::parse();
    let ui = commands::Ui {
        format: cli.format,
        quiet: cli.quiet,
    };

    let exit_code = match cli.command {
        Commands::Compress {
            archive,
            files,
            dirs,
            encoding,
            unit_len,
            overwrite,
            password,
        } => commands::compress(
            &commands::CompressConfig {
                archive_path: &archive,
                files: &files,
                dirs: &dirs,
                codec: encoding.into(),
                unit_len,
                overwrite,
                password,
            },
            ui,
        ),

        Commands::Extract {
            archive,
            dest,
            password,
        } => commands::extract(&archive, &dest, password, ui),

        Commands::Add {
            archive,
            path,
            password,
        } => commands::add(&archive, &path, password, ui),

        Commands::Delete {
            archive,
            name,
            password,
        } => commands::delete(&archive, &name, password, ui),

        Commands::Update {
            archive,
            path,
            password,
        } => commands::update(&archive, &path, password, ui),

        Commands::List { archive, password } => commands::list(&archive, password, ui),
    };

    std::process::exit(exit_code.code());
}
