//! Command type describing a single invocation

use async_process::Command as AsyncCommand;

/// A program name plus its ordered argument list.
///
/// Unlike `async_process::Command`, this type is `Clone` and can be inspected
/// after construction, which is what lets wrapping runners rewrite it. Each
/// rewriting layer builds a fresh `Command`; an instance is never mutated once
/// an invocation is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// The program to execute
    program: String,
    /// The arguments to pass to the program
    args: Vec<String>,
}

impl Command {
    /// Create a new command for the given program
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument to the command
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments to the command
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for arg in args {
            self.arg(arg);
        }
        self
    }

    /// Get the program name
    pub fn get_program(&self) -> &str {
        &self.program
    }

    /// Get the arguments
    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    /// Prepare this command for execution by converting to an
    /// `async_process::Command`.
    ///
    /// Only the program and arguments are carried over; stdio and environment
    /// are the executing runner's concern.
    pub fn prepare(&self) -> AsyncCommand {
        let mut cmd = AsyncCommand::new(&self.program);
        cmd.args(&self.args);
        cmd
    }

    /// Create a builder for this command (for chaining)
    pub fn builder(program: impl Into<String>) -> CommandBuilder {
        CommandBuilder(Command::new(program))
    }
}

/// Builder wrapper for more ergonomic command construction
pub struct CommandBuilder(Command);

impl CommandBuilder {
    /// Add an argument
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.0.arg(arg);
        self
    }

    /// Add multiple arguments
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0.args(args);
        self
    }

    /// Build the command
    pub fn build(self) -> Command {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_creation() {
        let cmd = Command::new("echo");
        assert_eq!(cmd.get_program(), "echo");
        assert_eq!(cmd.get_args().len(), 0);
    }

    #[test]
    fn test_command_with_args() {
        let mut cmd = Command::new("ls");
        cmd.arg("-la").arg("/tmp");

        assert_eq!(cmd.get_args(), ["-la", "/tmp"]);
    }

    #[test]
    fn test_command_builder() {
        let cmd = Command::builder("echo").arg("hello").arg("world").build();

        assert_eq!(cmd.get_program(), "echo");
        assert_eq!(cmd.get_args(), ["hello", "world"]);
    }

    #[test]
    fn test_command_args_preserve_order() {
        let cmd = Command::builder("tar")
            .args(["-C", "/srv", "-xzf", "backup.tar.gz"])
            .build();

        assert_eq!(cmd.get_args(), ["-C", "/srv", "-xzf", "backup.tar.gz"]);
    }

    #[test]
    fn test_command_clone() {
        let cmd1 = Command::builder("test").arg("arg1").build();
        let cmd2 = cmd1.clone();

        assert_eq!(cmd1, cmd2);
    }

    #[test]
    fn test_command_prepare() {
        let cmd = Command::builder("echo").arg("hello").build();

        let _async_cmd = cmd.prepare();
    }
}
