//! Command implementations for the CLI tool.

use std::path::{Path, PathBuf};

use binarc::{Codec, Password, Result, WriteOptions};
use console::style;

use crate::exit_codes::{ExitCode, error_to_exit_code};
use crate::output::create_formatter;
use crate::password::resolve_password;
use crate::progress::Spinner;
use crate::{OutputFormat, PasswordArgs};

/// Output settings shared by every command.
#[derive(Clone, Copy)]
pub struct Ui {
    pub format: OutputFormat,
    pub quiet: bool,
}

impl Ui {
    fn spinner(&self, message: &str) -> Spinner {
        Spinner::start(message, self.quiet || self.format == OutputFormat::Json)
    }
}

/// Configuration for the compress command.
pub struct CompressConfig<'a> {
    pub archive_path: &'a Path,
    pub files: &'a [PathBuf],
    pub dirs: &'a [PathBuf],
    pub codec: Codec,
    pub unit_len: u16,
    pub overwrite: bool,
    pub password: PasswordArgs,
}

/// Appends ".bin" to archive paths without an extension.
pub fn archive_path(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension("bin")
    }
}

fn password(args: &PasswordArgs, confirm: bool) -> std::result::Result<Password, ExitCode> {
    resolve_password(args, confirm).ok_or_else(|| {
        eprintln!("{} no password entered", style("Error:").red().bold());
        ExitCode::BadArgs
    })
}

fn report_error(error: &binarc::Error) -> ExitCode {
    eprintln!("{} {}", style("Error:").red().bold(), error);
    error_to_exit_code(error)
}

/// Runs an operation that produces statistics and prints them.
fn run_stats(
    ui: Ui,
    message: &str,
    op: impl FnOnce() -> Result<binarc::OperationStats>,
) -> ExitCode {
    let spinner = ui.spinner(message);
    let result = op();
    spinner.finish();

    match result {
        Ok(stats) => {
            if !ui.quiet || ui.format == OutputFormat::Json {
                print!("{}", create_formatter(ui.format).format_stats(&stats));
                if ui.format == OutputFormat::Json {
                    println!();
                }
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e),
    }
}

/// Compress command implementation
pub fn compress(config: &CompressConfig<'_>, ui: Ui) -> ExitCode {
    let password = match password(&config.password, true) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let archive = archive_path(config.archive_path);
    let options = WriteOptions::new()
        .codec(config.codec)
        .unit_len(config.unit_len)
        .password(password)
        .overwrite(config.overwrite);

    run_stats(ui, "Compressing...", || {
        binarc::compress(&archive, config.files, config.dirs, options)
    })
}

/// Extract command implementation
pub fn extract(archive: &Path, dest: &Path, args: PasswordArgs, ui: Ui) -> ExitCode {
    let password = match password(&args, false) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let archive = archive_path(archive);
    run_stats(ui, "Extracting...", || {
        binarc::extract(&archive, dest, Some(&password))
    })
}

/// Add command implementation
pub fn add(archive: &Path, path: &Path, args: PasswordArgs, ui: Ui) -> ExitCode {
    let password = match password(&args, false) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let archive = archive_path(archive);
    run_stats(ui, "Adding...", || binarc::add(&archive, path, Some(&password)))
}

/// Delete command implementation
pub fn delete(archive: &Path, name: &str, args: PasswordArgs, ui: Ui) -> ExitCode {
    let password = match password(&args, false) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let archive = archive_path(archive);
    run_stats(ui, "Deleting...", || {
        binarc::delete(&archive, name, Some(&password))
    })
}

/// Update command implementation
pub fn update(archive: &Path, path: &Path, args: PasswordArgs, ui: Ui) -> ExitCode {
    let password = match password(&args, false) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let archive = archive_path(archive);
    run_stats(ui, "Updating...", || {
        binarc::update(&archive, path, Some(&password))
    })
}

/// List command implementation
pub fn list(archive: &Path, args: PasswordArgs, ui: Ui) -> ExitCode {
    let password = match password(&args, false) {
        Ok(p) => p,
        Err(code) => return code,
    };
    let archive = archive_path(archive);
    match binarc::list(&archive, Some(&password)) {
        Ok(entries) => {
            let output = create_formatter(ui.format).format_list(&entries);
            print!("{output}");
            if ui.format == OutputFormat::Json {
                println!();
            }
            ExitCode::Success
        }
        Err(e) => report_error(&e),
    }
}
