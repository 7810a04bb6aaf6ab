//! Archive editing and modification.
//!
//! This module provides the operations that change an existing archive:
//! - [`add`] appends new entries and keeps the archive key
//! - [`delete`] removes a file or directory and rebuilds the archive
//! - [`update`] replaces an entry with the current contents of a file
//!
//! # Example
//!
//! ```rust,no_run
//! use binarc::Password;
//! use binarc::edit;
//!
//! let password = Password::new("pw");
//! edit::add("backup.bin", "todo.txt", Some(&password))?;
//! edit::update("backup.bin", "todo.txt", Some(&password))?;
//! edit::delete("backup.bin", "todo.txt", Some(&password))?;
//! # Ok::<(), binarc::Error>(())
//! ```
//!
//! # Implementation Notes
//!
//! The format has no free space or in-place patching. Every edit decrypts
//! the whole payload, changes it in memory and writes a complete new archive
//! through a temporary file. Deleting goes further: the archive is extracted
//! into a scratch directory, the target is removed there, and what remains
//! is compressed again with the same codec, unit length and password. The
//! scratch directory is removed on every exit path.
//!
//! None of these operations lock the archive. Running two of them against
//! the same archive at once loses one of the edits.

mod append;
mod rebuild;
mod replace;

pub use append::add;
pub use rebuild::delete;
pub use replace::update;

pub(crate) use append::append_inputs;
