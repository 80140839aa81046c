//! Example-level translation and fragment assembly.
//!
//! An example is split into commands, every command is dispatched to the
//! first matching rule, and the rendered calls are wrapped in `tag:`/`end:`
//! markers keyed by the example digest. Either every command translates or
//! the example fails as a whole.

use crate::error::{Result, TranslateError};
use crate::model::Example;
use crate::rules::{find_rule, Call, Imports};
use crate::split::split;

/// Post-call code for runnable examples: print the response, exit on error.
const EXAMPLE_TAIL: &str = "\tif err != nil {
\t\tfmt.Println(\"Error getting the response:\", err)
\t\tos.Exit(1)
\t}
\tdefer res.Body.Close()
\tfmt.Println(res)
";

/// Post-call code inside generated `go test` functions.
const TEST_TAIL: &str = "\tif err != nil {
\t\tt.Fatalf(\"Error getting the response: %s\", err)
\t}
\tdefer res.Body.Close()
\tfmt.Println(res)
";

/// Selects the code appended after each translated call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Profile {
    #[default]
    Example,
    Test,
}

impl Profile {
    fn tail(self) -> &'static str {
        match self {
            Profile::Example => EXAMPLE_TAIL,
            Profile::Test => TEST_TAIL,
        }
    }
}

/// Converts one console example into Go source.
pub struct Translator<'a> {
    example: &'a Example,
    profile: Profile,
}

impl<'a> Translator<'a> {
    pub fn new(example: &'a Example) -> Self {
        Self {
            example,
            profile: Profile::default(),
        }
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    /// Returns true when the example has commands and a rule exists for each.
    pub fn is_translated(&self) -> bool {
        let commands = split(&self.example.source);
        !commands.is_empty() && commands.iter().all(|c| find_rule(c).is_some())
    }

    /// The rendered Go call for every command, without markers or tail.
    pub fn fragments(&self) -> Result<Vec<Call>> {
        let commands = split(&self.example.source);
        if commands.is_empty() {
            return Err(TranslateError::NoRule);
        }

        let rules = commands
            .iter()
            .map(|c| find_rule(c).ok_or(TranslateError::NoRule))
            .collect::<Result<Vec<_>>>()?;

        rules
            .iter()
            .zip(&commands)
            .map(|(rule, command)| rule.render(command))
            .collect()
    }

    /// The complete annotated fragment for the example.
    pub fn translate(&self) -> Result<String> {
        Ok(self.assemble(&self.fragments()?))
    }

    /// Wrap rendered calls in `tag:`/`end:` markers and the profile tail.
    pub fn assemble(&self, calls: &[Call]) -> String {
        let digest = self.example.digest();
        let scoped = calls.len() > 1;

        let mut out = String::from("\n");
        for (i, call) in calls.iter().enumerate() {
            if scoped {
                out.push_str("\t{\n");
            }
            out.push_str(&format!("\t// tag:{digest}[]\n"));
            out.push_str(&call.src);
            out.push('\n');
            out.push_str(&format!("\t// end:{digest}[]\n"));
            out.push_str(self.profile.tail());
            if scoped {
                out.push_str("\t}\n");
                if i != calls.len() - 1 {
                    out.push('\n');
                }
            }
        }

        out
    }
}

/// Packages needed by a set of rendered calls.
pub fn imports(calls: &[Call]) -> Imports {
    calls
        .iter()
        .fold(Imports::default(), |acc, call| acc.union(call.imports))
}
