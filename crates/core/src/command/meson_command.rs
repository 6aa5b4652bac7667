use std::path::{Path, PathBuf};

/// One fully built meson invocation.
///
/// `args[0]` is the meson executable; the rest are passed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MesonCommand {
    pub args: Vec<String>,
    pub working_dir: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl MesonCommand {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            args,
            working_dir: None,
            env: Vec::new(),
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.env
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn program(&self) -> Option<&str> {
        self.args.first().map(String::as_str)
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Tokens joined by single spaces, as echoed in the output header.
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }

    /// Copy-pasteable form, quoting tokens that contain spaces.
    pub fn to_shell_command(&self) -> String {
        let mut cmd = String::new();
        for (i, arg) in self.args.iter().enumerate() {
            if i > 0 {
                cmd.push(' ');
            }
            if arg.contains(' ') {
                cmd.push_str(&format!("'{arg}'"));
            } else {
                cmd.push_str(arg);
            }
        }
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_command_quotes_spaces() {
        let command = MesonCommand::new(vec![
            "/usr/bin/meson".into(),
            "test".into(),
            "--test-args".into(),
            "--gtest_filter=Foo --verbose".into(),
        ]);
        insta::assert_snapshot!(
            command.to_shell_command(),
            @"/usr/bin/meson test --test-args '--gtest_filter=Foo --verbose'"
        );
        assert_eq!(
            command.command_line(),
            "/usr/bin/meson test --test-args --gtest_filter=Foo --verbose"
        );
    }

    #[test]
    fn test_builder_methods() {
        let command = MesonCommand::new(vec!["meson".into(), "compile".into()])
            .with_working_dir("/proj")
            .with_env("CC", "clang")
            .with_envs([("CXX", "clang++")]);

        assert_eq!(command.program(), Some("meson"));
        assert_eq!(command.working_dir(), Some(Path::new("/proj")));
        assert_eq!(
            command.env,
            vec![
                ("CC".to_string(), "clang".to_string()),
                ("CXX".to_string(), "clang++".to_string())
            ]
        );
    }
}
