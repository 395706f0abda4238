use core::fmt;

use crate::config::Config;
use crate::context::Context;
use crate::error::Error;
use crate::plum::Plum8;

/// Reasons a `Builder` could not produce a machine
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    MissingContext,
    MissingProgram,
    Load(Error),
}

impl From<Error> for BuildError {
    fn from(error: Error) -> Self {
        BuildError::Load(error)
    }
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::MissingContext => write!(f, "context not provided"),
            BuildError::MissingProgram => write!(f, "program not provided"),
            BuildError::Load(error) => write!(f, "cannot load program: {}", error),
        }
    }
}

impl core::error::Error for BuildError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            BuildError::Load(error) => Some(error),
            _ => None,
        }
    }
}

pub struct Builder<'a, C: Context> {
    context: Option<C>,
    program: Option<&'a [u8]>,
    config: Config,
}

impl<'a, C: Context> Builder<'a, C> {
    pub fn new() -> Self {
        Self {
            context: None,
            program: None,
            config: Config::default(),
        }
    }

    pub fn with_context(mut self, ctx: C) -> Self {
        self.context = Some(ctx);
        self
    }

    pub fn with_program(mut self, prog: &'a [u8]) -> Self {
        self.program = Some(prog);
        self
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Machine with font and program in memory, ready to `cycle`
    pub fn build(self) -> Result<Plum8<C>, BuildError> {
        let context = self.context.ok_or(BuildError::MissingContext)?;
        let program = self.program.ok_or(BuildError::MissingProgram)?;
        let mut plum = Plum8::with_config(context, self.config);
        plum.load_font();
        plum.load_program(program)?;
        Ok(plum)
    }
}

impl<'a, C: Context> Default for Builder<'a, C> {
    fn default() -> Self {
        Self::new()
    }
}
