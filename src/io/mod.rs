//! Types and methods for reading and parsing input and writing output.

pub mod file;
pub mod parsers;
pub mod writer;

pub use file::{read_seqlens, InputFile, OutputFile};
pub use parsers::CoordinateIterator;
pub use writer::{ReportWriter, PROFILE_HEADER, WINDOWS_HEADER};
