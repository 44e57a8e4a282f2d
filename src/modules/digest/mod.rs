pub mod formatter;

pub use formatter::Digest;
