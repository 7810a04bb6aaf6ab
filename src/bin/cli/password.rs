//! Password handling for CLI operations.

use rpassword::prompt_password;
use binarc::Password;

use crate::PasswordArgs;

/// Resolves the password for an operation.
///
/// A password given on the command line or through `BINARC_PASSWORD` wins;
/// otherwise the user is prompted when `--ask-password` is set, and the
/// empty password is used when it is not. Returns `None` when prompting
/// fails or the confirmation does not match.
pub fn resolve_password(args: &PasswordArgs, confirm: bool) -> Option<Password> {
    if let Some(pwd) = &args.password {
        return Some(Password::new(pwd.as_str()));
    }
    if !args.ask_password {
        return Some(Password::default());
    }
    if confirm {
        confirm_password()
    } else {
        prompt_password("Enter password: ").ok().map(Password::new)
    }
}

/// Prompts for password confirmation (for creating archives)
fn confirm_password() -> Option<Password> {
    let pwd1 = prompt_password("Enter password: ").ok()?;
    let pwd2 = prompt_password("Confirm password: ").ok()?;

    if pwd1 == pwd2 {
        Some(Password::new(pwd1))
    } else {
        eprintln!("Passwords do not match");
        None
    }
}
