//! Payload injection.
//!
//! The only escaping applied is `"` → `\"`, so the payload survives being
//! wrapped in double quotes. `$`, backticks and backslashes are passed
//! through untouched: commands are trusted configuration and payloads are
//! expected to come from authenticated senders.

use antenna_core::Injection;

/// Escape every double quote in `payload`.
pub fn escape(payload: &str) -> String {
    payload.replace('"', "\\\"")
}

/// Build the shell line for one configured `command`.
///
/// `variable` is the service's `injection_variable`; it is ignored by the
/// `none` and `pipe` modes.
pub fn build_command(command: &str, injection: Injection, variable: &str, payload: &str) -> String {
    match injection {
        Injection::None => command.to_string(),
        Injection::Pipe => format!("echo \"{}\" | {command}", escape(payload)),
        Injection::Variable => format!("{variable}=\"{}\"; {command}", escape(payload)),
        Injection::Argv => format!("{command} --{variable}=\"{}\"", escape(payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_only_touches_double_quotes() {
        assert_eq!(escape(r#"{"a":"$b"}"#), r#"{\"a\":\"$b\"}"#);
        assert_eq!(escape("it's `fine`"), "it's `fine`");
    }

    #[test]
    fn none_leaves_command_untouched() {
        assert_eq!(build_command("make deploy", Injection::None, "X", "{}"), "make deploy");
    }

    #[test]
    fn pipe_echoes_payload_into_command() {
        assert_eq!(build_command("cat", Injection::Pipe, "X", "123"), r#"echo "123" | cat"#);
    }

    #[test]
    fn variable_assigns_before_command() {
        assert_eq!(
            build_command("./hook.sh", Injection::Variable, "ANTENNA_BODY", r#"{"k":1}"#),
            r#"ANTENNA_BODY="{\"k\":1}"; ./hook.sh"#
        );
    }

    #[test]
    fn argv_appends_named_argument() {
        assert_eq!(
            build_command("python3 hook.py", Injection::Argv, "body", r#"{"message":"Hello"}"#),
            r#"python3 hook.py --body="{\"message\":\"Hello\"}""#
        );
    }
}
