use std::{fmt, path::Path};

/// A program and its argument list.
///
/// Nothing is ever handed to a shell: paths stay single arguments even when
/// they contain spaces, and recipe fragments are split on whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImCommand {
    program: String,
    args: Vec<String>,
}

impl ImCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: vec![],
        }
    }

    /// Parses a whole command line, splitting on whitespace.
    ///
    /// Returns `None` for a blank line.
    pub fn parse(line: &str) -> Option<Self> {
        let mut tokens = line.split_whitespace();
        let program = tokens.next()?;

        Some(Self {
            program: program.to_string(),
            args: tokens.map(str::to_string).collect(),
        })
    }

    /// Appends one argument verbatim.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn arg_path(self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_string_lossy().to_string();
        self.arg(path)
    }

    /// Appends every whitespace separated token of `fragment`.
    pub fn fragment(mut self, fragment: impl AsRef<str>) -> Self {
        self.args
            .extend(fragment.as_ref().split_whitespace().map(str::to_string));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The output file by ImageMagick convention.
    pub fn last_arg(&self) -> Option<&str> {
        self.args.last().map(String::as_str)
    }
}

impl fmt::Display for ImCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
