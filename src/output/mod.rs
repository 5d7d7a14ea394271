//! Dry-run rendering and the pre-run summary

pub mod summary;

pub use summary::render_summary;

use crate::domain::model::CommandPlan;

/// Render a plan as one copy-pasteable command line.
///
/// Quoting is for display only; execution always uses the argument vector.
pub fn render_command_line(plan: &CommandPlan) -> String {
    plan.argv()
        .iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

/// POSIX single-quote an argument when it holds anything outside a safe set
pub fn quote_arg(arg: &str) -> String {
    let safe = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=,+@%".contains(c));

    if safe {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{ArgGroup, GroupKind};

    #[test]
    fn test_quote_arg() {
        assert_eq!(quote_arg("-c:v"), "-c:v");
        assert_eq!(quote_arg("scale=1280:720"), "scale=1280:720");
        assert_eq!(quote_arg("My Movie.mkv"), "'My Movie.mkv'");
        assert_eq!(quote_arg("it's.mkv"), r"'it'\''s.mkv'");
        assert_eq!(quote_arg(""), "''");
    }

    #[test]
    fn test_render_includes_wrapper() {
        let plan = CommandPlan {
            wrapper: vec!["nice".into(), "-n".into(), "10".into()],
            program: "ffmpeg".to_string(),
            groups: vec![
                ArgGroup {
                    kind: GroupKind::Input,
                    args: vec!["-i".into(), "a b.mkv".into()],
                },
                ArgGroup {
                    kind: GroupKind::Output,
                    args: vec!["out.mkv".into()],
                },
            ],
        };

        assert_eq!(
            render_command_line(&plan),
            "nice -n 10 ffmpeg -i 'a b.mkv' out.mkv"
        );
    }
}
