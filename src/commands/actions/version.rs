//! Version command handler.

use log::debug;

use crate::commands::{CommandResult, markdown_response::format_version};

pub fn handle_version() -> CommandResult {
    debug!("handling version command");

    CommandResult {
        response: format_version(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handle_version() {
        let result = handle_version();
        assert!(result.response.contains(env!("CARGO_PKG_VERSION")));
    }
}
