use woothee::parser::Parser;

/// Browser/platform derivation backed by woothee.
pub struct UaEngine {
    parser: Parser,
}

impl Default for UaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UaEngine {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&self, ua: &str) -> UserAgentInfo {
        let Some(result) = self.parser.parse(ua) else {
            return UserAgentInfo {
                browser: None,
                platform: None,
            };
        };

        UserAgentInfo {
            browser: known(result.name),
            platform: known(result.os),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserAgentInfo {
    pub browser: Option<String>,
    pub platform: Option<String>,
}

fn known(value: &str) -> Option<String> {
    // Woothee reports "UNKNOWN" rather than failing the whole parse.
    if value.is_empty() || value == "UNKNOWN" {
        None
    } else {
        Some(value.to_string())
    }
}
